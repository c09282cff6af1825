use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateId, NewCandidate, NewVacancy, StageId, VacancyId};
use super::ranking::{SortMode, SortModeError};
use super::repository::{NotificationPublisher, TalentRepository};
use super::service::{RecruitingService, RecruitingServiceError};

/// Router builder exposing candidate, vacancy, matching, and pipeline endpoints.
pub fn recruiting_router<R, N>(service: Arc<RecruitingService<R, N>>) -> Router
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/candidates", post(register_candidate_handler::<R, N>))
        .route(
            "/api/v1/candidates/:candidate_id",
            get(candidate_handler::<R, N>).delete(withdraw_candidate_handler::<R, N>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/matches",
            get(candidate_matches_handler::<R, N>),
        )
        .route("/api/v1/vacancies", post(register_vacancy_handler::<R, N>))
        .route("/api/v1/vacancies/:vacancy_id", get(vacancy_handler::<R, N>))
        .route(
            "/api/v1/vacancies/:vacancy_id/matches",
            get(vacancy_matches_handler::<R, N>),
        )
        .route(
            "/api/v1/matches/:candidate_id/:vacancy_id",
            get(match_handler::<R, N>),
        )
        .route("/api/v1/pipeline", get(board_handler::<R, N>))
        .route("/api/v1/pipeline/moves", post(move_handler::<R, N>))
        .with_state(service)
}

/// Resolved drag-and-drop intent.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub candidate_id: CandidateId,
    pub stage_id: StageId,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SortQuery {
    #[serde(default)]
    sort: Option<String>,
}

impl SortQuery {
    fn mode(&self) -> Result<SortMode, Response> {
        match self.sort.as_deref() {
            None => Ok(SortMode::default()),
            Some(raw) => raw.parse().map_err(|err: SortModeError| {
                let payload = json!({ "error": err.to_string() });
                (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
            }),
        }
    }
}

fn error_response(error: RecruitingServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}

pub(crate) async fn register_candidate_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    axum::Json(intake): axum::Json<NewCandidate>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.register_candidate(intake) {
        Ok(candidate) => (StatusCode::CREATED, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidate_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.candidate(&CandidateId(candidate_id)) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn withdraw_candidate_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.withdraw_candidate(&CandidateId(candidate_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidate_matches_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path(candidate_id): Path<String>,
    Query(query): Query<SortQuery>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let mode = match query.mode() {
        Ok(mode) => mode,
        Err(response) => return response,
    };

    match service.rank_vacancies_for(&CandidateId(candidate_id), mode) {
        Ok(ranked) => (StatusCode::OK, axum::Json(ranked)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_vacancy_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    axum::Json(intake): axum::Json<NewVacancy>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.register_vacancy(intake) {
        Ok(vacancy) => (StatusCode::CREATED, axum::Json(vacancy)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn vacancy_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path(vacancy_id): Path<String>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.vacancy(&VacancyId(vacancy_id)) {
        Ok(vacancy) => (StatusCode::OK, axum::Json(vacancy)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn vacancy_matches_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path(vacancy_id): Path<String>,
    Query(query): Query<SortQuery>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let mode = match query.mode() {
        Ok(mode) => mode,
        Err(response) => return response,
    };

    match service.rank_candidates_for(&VacancyId(vacancy_id), mode) {
        Ok(ranked) => (StatusCode::OK, axum::Json(ranked)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn match_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path((candidate_id, vacancy_id)): Path<(String, String)>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.score(&CandidateId(candidate_id), &VacancyId(vacancy_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn board_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.board() {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn move_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    axum::Json(request): axum::Json<MoveRequest>,
) -> Response
where
    R: TalentRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.move_candidate(&request.candidate_id, &request.stage_id) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}
