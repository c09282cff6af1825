use std::cmp::Reverse;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Candidate, Vacancy};
use super::matching::{MatchResult, MatchScorer};

/// Orderings offered by candidate and vacancy match lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Highest score first.
    #[default]
    Score,
    /// Most recent application or posting first.
    Date,
    /// Candidate name or vacancy title, A to Z.
    Name,
}

impl SortMode {
    pub const fn label(self) -> &'static str {
        match self {
            SortMode::Score => "score",
            SortMode::Date => "date",
            SortMode::Name => "name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode '{0}' (expected score, date, or name)")]
pub struct SortModeError(pub String);

impl FromStr for SortMode {
    type Err = SortModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "score" | "match" => Ok(SortMode::Score),
            "date" | "recent" => Ok(SortMode::Date),
            "name" | "title" => Ok(SortMode::Name),
            _ => Err(SortModeError(raw.to_string())),
        }
    }
}

/// One scored counterpart in a ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedMatch {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Scores every vacancy against one candidate and orders the list.
pub fn rank_vacancies(
    scorer: &MatchScorer,
    candidate: &Candidate,
    vacancies: &[Vacancy],
    mode: SortMode,
) -> Vec<RankedMatch> {
    let ranked = vacancies
        .iter()
        .map(|vacancy| RankedMatch {
            id: vacancy.id.0.clone(),
            name: vacancy.title.clone(),
            date: vacancy.posted_on,
            result: scorer.score(candidate, vacancy),
        })
        .collect();

    sort_ranked(ranked, mode)
}

/// Scores every candidate against one vacancy and orders the list.
pub fn rank_candidates(
    scorer: &MatchScorer,
    vacancy: &Vacancy,
    candidates: &[Candidate],
    mode: SortMode,
) -> Vec<RankedMatch> {
    let ranked = candidates
        .iter()
        .map(|candidate| RankedMatch {
            id: candidate.id.0.clone(),
            name: candidate.name.clone(),
            date: candidate.applied_on,
            result: scorer.score(candidate, vacancy),
        })
        .collect();

    sort_ranked(ranked, mode)
}

fn sort_ranked(mut ranked: Vec<RankedMatch>, mode: SortMode) -> Vec<RankedMatch> {
    match mode {
        SortMode::Score => ranked.sort_by_key(|entry| Reverse(entry.result.score)),
        SortMode::Date => ranked.sort_by_key(|entry| Reverse(entry.date)),
        SortMode::Name => ranked.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    ranked
}
