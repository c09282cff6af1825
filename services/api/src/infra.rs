use hireflow::workflows::recruiting::{
    Candidate, CandidateId, Notification, NotificationPublisher, NotifyError, RepositoryError,
    TalentRepository, Vacancy, VacancyId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Records {
    candidates: HashMap<CandidateId, Candidate>,
    vacancies: HashMap<VacancyId, Vacancy>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTalentRepository {
    records: Arc<Mutex<Records>>,
}

impl InMemoryTalentRepository {
    fn records(&self) -> Result<MutexGuard<'_, Records>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl TalentRepository for InMemoryTalentRepository {
    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        let mut guard = self.records()?;
        if guard.candidates.contains_key(&candidate.id) {
            return Err(RepositoryError::Conflict);
        }
        guard
            .candidates
            .insert(candidate.id.clone(), candidate.clone());
        Ok(candidate)
    }

    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut guard = self.records()?;
        match guard.candidates.get_mut(&candidate.id) {
            Some(slot) => {
                *slot = candidate;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        Ok(self.records()?.candidates.get(id).cloned())
    }

    fn list_candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        let mut candidates: Vec<Candidate> = self.records()?.candidates.values().cloned().collect();
        candidates.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(candidates)
    }

    fn delete_candidate(&self, id: &CandidateId) -> Result<(), RepositoryError> {
        self.records()?
            .candidates
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        let mut guard = self.records()?;
        if guard.vacancies.contains_key(&vacancy.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.vacancies.insert(vacancy.id.clone(), vacancy.clone());
        Ok(vacancy)
    }

    fn fetch_vacancy(&self, id: &VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        Ok(self.records()?.vacancies.get(id).cloned())
    }

    fn list_vacancies(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        let mut vacancies: Vec<Vacancy> = self.records()?.vacancies.values().cloned().collect();
        vacancies.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(vacancies)
    }
}

/// Emits notifications as structured log events in place of UI toasts.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotifier;

impl NotificationPublisher for LoggingNotifier {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(kind = ?notification.kind, message = %notification.message, "notification");
        Ok(())
    }
}
