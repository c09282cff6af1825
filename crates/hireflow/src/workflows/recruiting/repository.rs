use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, Vacancy, VacancyId};

/// Storage abstraction over the hosted record store so the service can be exercised in
/// isolation.
pub trait TalentRepository: Send + Sync {
    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError>;
    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError>;
    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    fn list_candidates(&self) -> Result<Vec<Candidate>, RepositoryError>;
    fn delete_candidate(&self, id: &CandidateId) -> Result<(), RepositoryError>;
    fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError>;
    fn fetch_vacancy(&self, id: &VacancyId) -> Result<Option<Vacancy>, RepositoryError>;
    fn list_vacancies(&self) -> Result<Vec<Vacancy>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for user-facing toasts.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    StageMoved,
    MatchComputed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
