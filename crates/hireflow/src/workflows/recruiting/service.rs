use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::http::StatusCode;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{
    Candidate, CandidateId, NewCandidate, NewVacancy, NextAction, StageId, Vacancy, VacancyId,
};
use super::matching::{MatchResult, MatchScorer};
use super::pipeline::{PipelineBoard, PipelineError, Stage, StageMove, StageSummaryEntry};
use super::ranking::{rank_candidates, rank_vacancies, RankedMatch, SortMode};
use super::repository::{
    Notification, NotificationKind, NotificationPublisher, RepositoryError, TalentRepository,
};
use crate::config::MatchingConfig;

/// Source of "today" for move stamps and intake defaults.
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Service composing the record store, the pipeline board, the scorer, and notifications.
///
/// The board sits behind a single mutex; a move holds it for the whole remove, append, and
/// persist sequence so concurrent moves are serialized.
pub struct RecruitingService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    scorer: MatchScorer,
    board: Mutex<PipelineBoard>,
    candidate_sequence: AtomicU64,
    vacancy_sequence: AtomicU64,
    clock: Clock,
}

impl<R, N> RecruitingService<R, N>
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    /// Builds the service on the standard stage set, hydrating the board from the repository.
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        config: &MatchingConfig,
    ) -> Result<Self, RecruitingServiceError> {
        Self::with_board(repository, notifier, config, PipelineBoard::standard())
    }

    pub fn with_board(
        repository: Arc<R>,
        notifier: Arc<N>,
        config: &MatchingConfig,
        mut board: PipelineBoard,
    ) -> Result<Self, RecruitingServiceError> {
        let candidates = repository.list_candidates()?;
        let vacancies = repository.list_vacancies()?;

        let next_candidate = next_sequence(candidates.iter().map(|candidate| &candidate.id.0));
        let next_vacancy = next_sequence(vacancies.iter().map(|vacancy| &vacancy.id.0));

        let mut hydrated = candidates;
        hydrated.sort_by(|a, b| a.last_updated.cmp(&b.last_updated).then(a.id.cmp(&b.id)));
        for candidate in hydrated {
            board.admit(candidate)?;
        }
        info!(
            candidates = board.candidate_count(),
            vacancies = vacancies.len(),
            "pipeline board hydrated"
        );

        Ok(Self {
            repository,
            notifier,
            scorer: MatchScorer::new(config),
            board: Mutex::new(board),
            candidate_sequence: AtomicU64::new(next_candidate),
            vacancy_sequence: AtomicU64::new(next_vacancy),
            clock: local_today,
        })
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    /// Persist a new candidate and place them on the board.
    pub fn register_candidate(
        &self,
        intake: NewCandidate,
    ) -> Result<Candidate, RecruitingServiceError> {
        let today = (self.clock)();
        let mut board = self.lock_board()?;

        let stage = match intake.stage {
            Some(stage) => stage,
            None => board
                .first_stage()
                .cloned()
                .ok_or_else(|| PipelineError::StageNotFound(StageId::new("")))?,
        };
        if board.stage(&stage).is_none() {
            return Err(PipelineError::StageNotFound(stage).into());
        }

        let sequence = self.candidate_sequence.fetch_add(1, Ordering::Relaxed);
        let candidate = Candidate {
            id: CandidateId(format!("cand-{sequence:06}")),
            name: intake.name,
            skills: intake.skills,
            experience: intake.experience,
            location: intake.location,
            desired_salary: intake.desired_salary,
            stage,
            days_in_stage: 0,
            last_updated: today,
            applied_on: intake.applied_on.unwrap_or(today),
            next_action: intake.next_action,
        };

        let stored = self.repository.insert_candidate(candidate)?;
        board.admit(stored.clone())?;
        info!(candidate = %stored.id, stage = %stored.stage, "candidate registered");
        Ok(stored)
    }

    pub fn register_vacancy(&self, intake: NewVacancy) -> Result<Vacancy, RecruitingServiceError> {
        let sequence = self.vacancy_sequence.fetch_add(1, Ordering::Relaxed);
        let vacancy = Vacancy {
            id: VacancyId(format!("vac-{sequence:06}")),
            title: intake.title,
            skills: intake.skills,
            required_experience_years: intake.required_experience_years,
            location: intake.location,
            salary: intake.salary,
            posted_on: intake.posted_on.unwrap_or_else(self.clock),
            status: intake.status,
        };

        let stored = self.repository.insert_vacancy(vacancy)?;
        info!(vacancy = %stored.id, "vacancy registered");
        Ok(stored)
    }

    pub fn candidate(&self, id: &CandidateId) -> Result<Candidate, RecruitingServiceError> {
        self.repository
            .fetch_candidate(id)?
            .ok_or_else(|| RecruitingServiceError::CandidateNotFound(id.clone()))
    }

    pub fn vacancy(&self, id: &VacancyId) -> Result<Vacancy, RecruitingServiceError> {
        self.repository
            .fetch_vacancy(id)?
            .ok_or_else(|| RecruitingServiceError::VacancyNotFound(id.clone()))
    }

    /// Score one pair and announce the result.
    pub fn score(
        &self,
        candidate_id: &CandidateId,
        vacancy_id: &VacancyId,
    ) -> Result<MatchResult, RecruitingServiceError> {
        let candidate = self.candidate(candidate_id)?;
        let vacancy = self.vacancy(vacancy_id)?;
        let result = self.scorer.score(&candidate, &vacancy);
        debug!(
            candidate = %candidate.id,
            vacancy = %vacancy.id,
            score = result.score,
            "match computed"
        );

        self.notify(Notification::new(
            NotificationKind::MatchComputed,
            format!(
                "{} matches {} at {}%",
                candidate.name, vacancy.title, result.score
            ),
        ));
        Ok(result)
    }

    pub fn rank_vacancies_for(
        &self,
        candidate_id: &CandidateId,
        mode: SortMode,
    ) -> Result<Vec<RankedMatch>, RecruitingServiceError> {
        let candidate = self.candidate(candidate_id)?;
        let vacancies = self.repository.list_vacancies()?;
        Ok(rank_vacancies(&self.scorer, &candidate, &vacancies, mode))
    }

    pub fn rank_candidates_for(
        &self,
        vacancy_id: &VacancyId,
        mode: SortMode,
    ) -> Result<Vec<RankedMatch>, RecruitingServiceError> {
        let vacancy = self.vacancy(vacancy_id)?;
        let candidates: Vec<Candidate> = {
            let board = self.lock_board()?;
            board
                .stages()
                .iter()
                .flat_map(|stage| stage.candidates().iter().cloned())
                .collect()
        };
        Ok(rank_candidates(&self.scorer, &vacancy, &candidates, mode))
    }

    /// Apply a drag-and-drop move. The board and the store change together or not at all.
    pub fn move_candidate(
        &self,
        candidate_id: &CandidateId,
        destination: &StageId,
    ) -> Result<StageMove, RecruitingServiceError> {
        let today = (self.clock)();
        let receipt = {
            let mut board = self.lock_board()?;
            let before = board.clone();

            let receipt = match board.move_candidate(candidate_id, destination, today) {
                Ok(receipt) => receipt,
                Err(err) => {
                    debug!(candidate = %candidate_id, stage = %destination, %err, "move ignored");
                    return Err(err.into());
                }
            };

            let moved = board
                .candidate(candidate_id)
                .cloned()
                .ok_or_else(|| PipelineError::CandidateNotFound(candidate_id.clone()))?;
            if let Err(err) = self.repository.update_candidate(moved) {
                *board = before;
                return Err(err.into());
            }
            receipt
        };

        info!(
            candidate = %receipt.candidate_id,
            from = %receipt.from,
            to = %receipt.to,
            "candidate moved"
        );
        self.notify(Notification::new(
            NotificationKind::StageMoved,
            receipt.summary(),
        ));
        Ok(receipt)
    }

    /// Replace the candidate's next scheduled action.
    pub fn schedule_next_action(
        &self,
        candidate_id: &CandidateId,
        next_action: Option<NextAction>,
    ) -> Result<Candidate, RecruitingServiceError> {
        let mut board = self.lock_board()?;
        let mut candidate = board
            .candidate(candidate_id)
            .cloned()
            .ok_or_else(|| RecruitingServiceError::CandidateNotFound(candidate_id.clone()))?;
        candidate.next_action = next_action;

        self.repository.update_candidate(candidate.clone())?;
        board.refresh(candidate.clone())?;
        Ok(candidate)
    }

    pub fn withdraw_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Candidate, RecruitingServiceError> {
        let mut board = self.lock_board()?;
        if board.candidate(candidate_id).is_none() {
            return Err(RecruitingServiceError::CandidateNotFound(
                candidate_id.clone(),
            ));
        }

        match self.repository.delete_candidate(candidate_id) {
            Ok(()) | Err(RepositoryError::NotFound) => {}
            Err(err) => return Err(err.into()),
        }

        let removed = board
            .withdraw(candidate_id)
            .ok_or_else(|| RecruitingServiceError::CandidateNotFound(candidate_id.clone()))?;
        info!(candidate = %removed.id, "candidate withdrawn");
        Ok(removed)
    }

    /// Age every candidate on the board and persist the new counters.
    pub fn record_elapsed_days(&self, days: u32) -> Result<(), RecruitingServiceError> {
        let mut board = self.lock_board()?;
        let before = board.clone();
        board.advance_days(days);

        let aged: Vec<Candidate> = board
            .stages()
            .iter()
            .flat_map(|stage| stage.candidates().iter().cloned())
            .collect();
        for (written, candidate) in aged.into_iter().enumerate() {
            if let Err(err) = self.repository.update_candidate(candidate) {
                let restored: Vec<Candidate> = before
                    .stages()
                    .iter()
                    .flat_map(|stage| stage.candidates().iter().cloned())
                    .take(written)
                    .collect();
                for original in restored {
                    if let Err(restore_err) = self.repository.update_candidate(original) {
                        warn!(%restore_err, "failed to restore candidate after aging error");
                    }
                }
                *board = before;
                return Err(err.into());
            }
        }
        Ok(())
    }

    pub fn board(&self) -> Result<BoardView, RecruitingServiceError> {
        let board = self.lock_board()?;
        Ok(BoardView {
            stages: board.stages().to_vec(),
            summary: board.summary(),
        })
    }

    fn lock_board(&self) -> Result<MutexGuard<'_, PipelineBoard>, RecruitingServiceError> {
        self.board
            .lock()
            .map_err(|_| RecruitingServiceError::BoardUnavailable)
    }

    fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifier.publish(notification) {
            warn!(%err, "notification dropped");
        }
    }
}

/// Serializable snapshot of the board for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub stages: Vec<Stage>,
    pub summary: Vec<StageSummaryEntry>,
}

fn next_sequence<'a, I>(ids: I) -> u64
where
    I: Iterator<Item = &'a String>,
{
    ids.filter_map(|id| id.rsplit('-').next()?.parse::<u64>().ok())
        .max()
        .map_or(1, |highest| highest + 1)
}

/// Error raised by the recruiting service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitingServiceError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("candidate {0} not found")]
    CandidateNotFound(CandidateId),
    #[error("vacancy {0} not found")]
    VacancyNotFound(VacancyId),
    #[error("pipeline board unavailable")]
    BoardUnavailable,
}

impl RecruitingServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecruitingServiceError::CandidateNotFound(_)
            | RecruitingServiceError::VacancyNotFound(_)
            | RecruitingServiceError::Pipeline(PipelineError::CandidateNotFound(_))
            | RecruitingServiceError::Pipeline(PipelineError::StageNotFound(_))
            | RecruitingServiceError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            RecruitingServiceError::Pipeline(PipelineError::AlreadyInStage { .. })
            | RecruitingServiceError::Pipeline(PipelineError::DuplicateCandidate(_))
            | RecruitingServiceError::Repository(RepositoryError::Conflict) => {
                StatusCode::CONFLICT
            }
            RecruitingServiceError::Repository(RepositoryError::Unavailable(_))
            | RecruitingServiceError::BoardUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
