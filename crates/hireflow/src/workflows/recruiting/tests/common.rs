use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::workflows::recruiting::domain::{
    Candidate, CandidateId, NewCandidate, NewVacancy, StageId, Vacancy, VacancyId, VacancyStatus,
};
use crate::workflows::recruiting::pipeline::{PipelineBoard, StageDefinition};
use crate::workflows::recruiting::repository::{
    Notification, NotificationPublisher, NotifyError, RepositoryError, TalentRepository,
};
use crate::workflows::recruiting::{recruiting_router, RecruitingService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 12).expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn skills(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub(super) fn candidate(id: &str, name: &str, stage: &str) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: name.to_string(),
        skills: skills(&["React", "TypeScript", "CSS"]),
        experience: "5 years experience".to_string(),
        location: "Des Moines, IA".to_string(),
        desired_salary: Some(120_000),
        stage: StageId::new(stage),
        days_in_stage: 3,
        last_updated: date(2025, 5, 1),
        applied_on: date(2025, 4, 20),
        next_action: None,
    }
}

pub(super) fn vacancy(id: &str, title: &str) -> Vacancy {
    Vacancy {
        id: VacancyId(id.to_string()),
        title: title.to_string(),
        skills: skills(&["React", "TypeScript", "Redux"]),
        required_experience_years: 5,
        location: "Remote".to_string(),
        salary: "$110K - $140K".to_string(),
        posted_on: date(2025, 4, 1),
        status: VacancyStatus::Open,
    }
}

pub(super) fn new_candidate(name: &str) -> NewCandidate {
    NewCandidate {
        name: name.to_string(),
        skills: skills(&["Rust", "SQL"]),
        experience: "4 years".to_string(),
        location: "Seattle, WA".to_string(),
        desired_salary: Some(150_000),
        stage: None,
        applied_on: None,
        next_action: None,
    }
}

pub(super) fn new_vacancy(title: &str) -> NewVacancy {
    NewVacancy {
        title: title.to_string(),
        skills: skills(&["Rust", "SQL", "Kafka"]),
        required_experience_years: 5,
        location: "Seattle".to_string(),
        salary: "$140K - $160K".to_string(),
        posted_on: None,
        status: VacancyStatus::Open,
    }
}

/// `new [c1, c2]`, `screening [c3]`, and empty later stages.
pub(super) fn seeded_board() -> PipelineBoard {
    let mut board = PipelineBoard::new(StageDefinition::standard());
    board
        .admit(candidate("c1", "Ada", "new"))
        .expect("admit c1");
    board
        .admit(candidate("c2", "Grace", "new"))
        .expect("admit c2");
    board
        .admit(candidate("c3", "Linus", "screening"))
        .expect("admit c3");
    board
}

pub(super) fn ids(board: &PipelineBoard, stage: &str) -> Vec<String> {
    board
        .stage(&StageId::new(stage))
        .expect("stage exists")
        .candidate_ids()
        .into_iter()
        .map(|id| id.0.clone())
        .collect()
}

pub(super) fn build_service() -> (
    RecruitingService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service =
        RecruitingService::new(repository.clone(), notifier.clone(), &MatchingConfig::default())
            .expect("service builds")
            .with_clock(today);
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) candidates: Arc<Mutex<HashMap<CandidateId, Candidate>>>,
    pub(super) vacancies: Arc<Mutex<HashMap<VacancyId, Vacancy>>>,
}

impl MemoryRepository {
    pub(super) fn with_records(candidates: Vec<Candidate>, vacancies: Vec<Vacancy>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.candidates.lock().expect("repository mutex poisoned");
            for candidate in candidates {
                guard.insert(candidate.id.clone(), candidate);
            }
        }
        {
            let mut guard = repository.vacancies.lock().expect("repository mutex poisoned");
            for vacancy in vacancies {
                guard.insert(vacancy.id.clone(), vacancy);
            }
        }
        repository
    }
}

impl TalentRepository for MemoryRepository {
    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        let mut guard = self.candidates.lock().expect("repository mutex poisoned");
        if guard.contains_key(&candidate.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(candidate.id.clone(), candidate.clone());
        Ok(candidate)
    }

    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut guard = self.candidates.lock().expect("repository mutex poisoned");
        guard.insert(candidate.id.clone(), candidate);
        Ok(())
    }

    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.candidates.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        let guard = self.candidates.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete_candidate(&self, id: &CandidateId) -> Result<(), RepositoryError> {
        let mut guard = self.candidates.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        let mut guard = self.vacancies.lock().expect("repository mutex poisoned");
        if guard.contains_key(&vacancy.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(vacancy.id.clone(), vacancy.clone());
        Ok(vacancy)
    }

    fn fetch_vacancy(&self, id: &VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        let guard = self.vacancies.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_vacancies(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        let guard = self.vacancies.lock().expect("repository mutex poisoned");
        let mut vacancies: Vec<Vacancy> = guard.values().cloned().collect();
        vacancies.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(vacancies)
    }
}

/// Serves reads from the wrapped store but refuses every write.
pub(super) struct ReadOnlyRepository(pub(super) MemoryRepository);

impl TalentRepository for ReadOnlyRepository {
    fn insert_candidate(&self, _candidate: Candidate) -> Result<Candidate, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn update_candidate(&self, _candidate: Candidate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        self.0.fetch_candidate(id)
    }

    fn list_candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        self.0.list_candidates()
    }

    fn delete_candidate(&self, _id: &CandidateId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn insert_vacancy(&self, _vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch_vacancy(&self, id: &VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        self.0.fetch_vacancy(id)
    }

    fn list_vacancies(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        self.0.list_vacancies()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl NotificationPublisher for OfflineNotifier {
    fn publish(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("toast channel closed".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: RecruitingService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    recruiting_router(Arc::new(service))
}
