use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for vacancies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VacancyId(pub String);

/// Identifier of a pipeline bucket such as `screening`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageId(pub String);

impl StageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for VacancyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person moving through the hiring pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub skills: BTreeSet<String>,
    /// Free text such as "5 years experience".
    pub experience: String,
    pub location: String,
    pub desired_salary: Option<u32>,
    pub stage: StageId,
    pub days_in_stage: u32,
    pub last_updated: NaiveDate,
    pub applied_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<NextAction>,
}

impl Candidate {
    /// Leading run of digits in the experience text, or 0 when there is none.
    pub fn experience_years(&self) -> u32 {
        leading_number(&self.experience)
    }
}

fn leading_number(text: &str) -> u32 {
    text.chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .fold(0u32, |acc, ch| {
            acc.saturating_mul(10)
                .saturating_add(ch.to_digit(10).unwrap_or(0))
        })
}

/// An open (or drafted, or filled) role candidates are matched against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: VacancyId,
    pub title: String,
    pub skills: BTreeSet<String>,
    pub required_experience_years: u32,
    pub location: String,
    /// Free text such as "$110K - $140K".
    pub salary: String,
    pub posted_on: NaiveDate,
    pub status: VacancyStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacancyStatus {
    Draft,
    Open,
    Closed,
}

impl VacancyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VacancyStatus::Draft => "draft",
            VacancyStatus::Open => "open",
            VacancyStatus::Closed => "closed",
        }
    }
}

/// Progress of a scheduled follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Pending,
    Scheduled,
    Completed,
    Cancelled,
}

/// The next scheduled touchpoint with a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NextAction {
    Interview {
        #[serde(default)]
        due: Option<NaiveDate>,
        #[serde(default)]
        status: ActionStatus,
        #[serde(default)]
        interviewer: Option<String>,
    },
    Email {
        #[serde(default)]
        due: Option<NaiveDate>,
        #[serde(default)]
        status: ActionStatus,
        #[serde(default)]
        subject: Option<String>,
    },
    Call {
        #[serde(default)]
        due: Option<NaiveDate>,
        #[serde(default)]
        status: ActionStatus,
    },
    Task {
        #[serde(default)]
        due: Option<NaiveDate>,
        #[serde(default)]
        status: ActionStatus,
        title: String,
    },
    Decision {
        #[serde(default)]
        due: Option<NaiveDate>,
        #[serde(default)]
        status: ActionStatus,
        #[serde(default)]
        outcome: Option<String>,
    },
}

impl NextAction {
    pub const fn label(&self) -> &'static str {
        match self {
            NextAction::Interview { .. } => "interview",
            NextAction::Email { .. } => "email",
            NextAction::Call { .. } => "call",
            NextAction::Task { .. } => "task",
            NextAction::Decision { .. } => "decision",
        }
    }

    pub fn due(&self) -> Option<NaiveDate> {
        match self {
            NextAction::Interview { due, .. }
            | NextAction::Email { due, .. }
            | NextAction::Call { due, .. }
            | NextAction::Task { due, .. }
            | NextAction::Decision { due, .. } => *due,
        }
    }

    pub fn status(&self) -> ActionStatus {
        match self {
            NextAction::Interview { status, .. }
            | NextAction::Email { status, .. }
            | NextAction::Call { status, .. }
            | NextAction::Task { status, .. }
            | NextAction::Decision { status, .. } => *status,
        }
    }

    /// True when the action is still open and its due date has passed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        matches!(
            self.status(),
            ActionStatus::Pending | ActionStatus::Scheduled
        ) && self.due().map(|due| due < today).unwrap_or(false)
    }
}

/// Intake payload for a candidate; the id and pipeline stamps are assigned on registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub desired_salary: Option<u32>,
    #[serde(default)]
    pub stage: Option<StageId>,
    #[serde(default)]
    pub applied_on: Option<NaiveDate>,
    #[serde(default)]
    pub next_action: Option<NextAction>,
}

/// Intake payload for a vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVacancy {
    pub title: String,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub required_experience_years: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub posted_on: Option<NaiveDate>,
    #[serde(default = "default_vacancy_status")]
    pub status: VacancyStatus,
}

fn default_vacancy_status() -> VacancyStatus {
    VacancyStatus::Open
}
