//! Recruiting core: candidate-to-vacancy match scoring and the hiring pipeline board.
//!
//! Scoring and stage moves are pure in-memory transformations. The service layer wires
//! them to a record store and a notification sink, and the router exposes both over HTTP.

pub mod domain;
pub mod matching;
pub mod pipeline;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ActionStatus, Candidate, CandidateId, NewCandidate, NewVacancy, NextAction, StageId, Vacancy,
    VacancyId, VacancyStatus,
};
pub use matching::{MatchResult, MatchScorer, MatchWeights, DEFAULT_WEIGHTS};
pub use pipeline::{
    PipelineBoard, PipelineError, Stage, StageDefinition, StageMove, StageSummaryEntry,
};
pub use ranking::{rank_candidates, rank_vacancies, RankedMatch, SortMode, SortModeError};
pub use repository::{
    Notification, NotificationKind, NotificationPublisher, NotifyError, RepositoryError,
    TalentRepository,
};
pub use router::recruiting_router;
pub use service::{BoardView, RecruitingService, RecruitingServiceError};
