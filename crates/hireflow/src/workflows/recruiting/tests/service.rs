use super::common::*;
use crate::config::MatchingConfig;
use crate::workflows::recruiting::domain::{
    ActionStatus, CandidateId, NextAction, StageId, VacancyId,
};
use crate::workflows::recruiting::pipeline::PipelineError;
use crate::workflows::recruiting::ranking::SortMode;
use crate::workflows::recruiting::repository::{
    NotificationKind, RepositoryError, TalentRepository,
};
use crate::workflows::recruiting::{RecruitingService, RecruitingServiceError};
use axum::http::StatusCode;
use std::sync::Arc;

#[test]
fn register_candidate_assigns_id_and_first_stage() {
    let (service, repository, _) = build_service();

    let first = service
        .register_candidate(new_candidate("Ada"))
        .expect("registers");
    let second = service
        .register_candidate(new_candidate("Grace"))
        .expect("registers");

    assert_eq!(first.id, CandidateId("cand-000001".to_string()));
    assert_eq!(second.id, CandidateId("cand-000002".to_string()));
    assert_eq!(first.stage, StageId::new("new"));
    assert_eq!(first.days_in_stage, 0);
    assert_eq!(first.last_updated, today());
    assert_eq!(first.applied_on, today());

    let stored = repository
        .fetch_candidate(&first.id)
        .expect("fetch succeeds")
        .expect("stored");
    assert_eq!(stored, first);

    let board = service.board().expect("board available");
    assert_eq!(board.stages[0].candidates().len(), 2);
}

#[test]
fn register_candidate_rejects_unknown_stage() {
    let (service, repository, _) = build_service();
    let mut intake = new_candidate("Ada");
    intake.stage = Some(StageId::new("limbo"));

    match service.register_candidate(intake) {
        Err(RecruitingServiceError::Pipeline(PipelineError::StageNotFound(stage))) => {
            assert_eq!(stage, StageId::new("limbo"));
        }
        other => panic!("expected unknown stage, got {other:?}"),
    }
    assert!(repository
        .list_candidates()
        .expect("list succeeds")
        .is_empty());
}

#[test]
fn service_hydrates_board_and_continues_sequences() {
    let repository = Arc::new(MemoryRepository::with_records(
        vec![
            candidate("cand-000007", "Ada", "interview"),
            candidate("cand-000002", "Grace", "new"),
        ],
        vec![vacancy("vac-000004", "Frontend Engineer")],
    ));
    let notifier = Arc::new(MemoryNotifier::default());
    let service = RecruitingService::new(repository, notifier, &MatchingConfig::default())
        .expect("hydrates")
        .with_clock(today);

    let board = service.board().expect("board available");
    assert_eq!(board.summary[0].candidates, 1);
    assert_eq!(board.summary[2].candidates, 1);

    let next = service
        .register_candidate(new_candidate("Linus"))
        .expect("registers");
    assert_eq!(next.id.0, "cand-000008");
    let vacancy = service
        .register_vacancy(new_vacancy("Platform Engineer"))
        .expect("registers");
    assert_eq!(vacancy.id.0, "vac-000005");
    assert_eq!(vacancy.posted_on, today());
}

#[test]
fn hydration_fails_on_unknown_stage() {
    let repository = Arc::new(MemoryRepository::with_records(
        vec![candidate("c1", "Ada", "archived")],
        Vec::new(),
    ));
    let result = RecruitingService::new(
        repository,
        Arc::new(MemoryNotifier::default()),
        &MatchingConfig::default(),
    );
    assert!(matches!(
        result,
        Err(RecruitingServiceError::Pipeline(PipelineError::StageNotFound(_)))
    ));
}

#[test]
fn move_persists_and_notifies() {
    let (service, repository, notifier) = build_service();
    let ada = service
        .register_candidate(new_candidate("Ada"))
        .expect("registers");

    let receipt = service
        .move_candidate(&ada.id, &StageId::new("interview"))
        .expect("moves");
    assert_eq!(receipt.moved_on, today());

    let stored = repository
        .fetch_candidate(&ada.id)
        .expect("fetch succeeds")
        .expect("stored");
    assert_eq!(stored.stage, StageId::new("interview"));
    assert_eq!(stored.days_in_stage, 0);

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, NotificationKind::StageMoved);
    assert_eq!(events[0].message, "Ada moved to Interview");
}

#[test]
fn invalid_move_reports_error_without_notifying() {
    let (service, _, notifier) = build_service();
    let ada = service
        .register_candidate(new_candidate("Ada"))
        .expect("registers");
    let before = serde_json::to_string(&service.board().expect("board")).expect("serializes");

    let err = service
        .move_candidate(&ada.id, &StageId::new("archived"))
        .expect_err("unknown stage");
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    let err = service
        .move_candidate(&CandidateId("ghost".to_string()), &StageId::new("offer"))
        .expect_err("unknown candidate");
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    let err = service
        .move_candidate(&ada.id, &StageId::new("new"))
        .expect_err("already there");
    assert_eq!(err.status_code(), StatusCode::CONFLICT);

    let after = serde_json::to_string(&service.board().expect("board")).expect("serializes");
    assert_eq!(before, after);
    assert!(notifier.events().is_empty());
}

#[test]
fn failed_persistence_rolls_the_board_back() {
    let seed = MemoryRepository::with_records(vec![candidate("c1", "Ada", "new")], Vec::new());
    let service = RecruitingService::new(
        Arc::new(ReadOnlyRepository(seed)),
        Arc::new(MemoryNotifier::default()),
        &MatchingConfig::default(),
    )
    .expect("hydrates")
    .with_clock(today);

    let err = service
        .move_candidate(&CandidateId("c1".to_string()), &StageId::new("offer"))
        .expect_err("store is read only");
    assert!(matches!(
        err,
        RecruitingServiceError::Repository(RepositoryError::Unavailable(_))
    ));

    let board = service.board().expect("board available");
    assert_eq!(board.summary[0].candidates, 1);
    assert_eq!(board.summary[3].candidates, 0);
    assert_eq!(board.stages[0].candidates()[0].days_in_stage, 3);
}

#[test]
fn failed_aging_leaves_board_unchanged() {
    let seed = MemoryRepository::with_records(
        vec![candidate("c1", "Ada", "new"), candidate("c2", "Grace", "screening")],
        Vec::new(),
    );
    let service = RecruitingService::new(
        Arc::new(ReadOnlyRepository(seed)),
        Arc::new(MemoryNotifier::default()),
        &MatchingConfig::default(),
    )
    .expect("hydrates")
    .with_clock(today);

    let err = service
        .record_elapsed_days(4)
        .expect_err("store is read only");
    assert!(matches!(
        err,
        RecruitingServiceError::Repository(RepositoryError::Unavailable(_))
    ));

    let board = service.board().expect("board available");
    assert_eq!(board.stages[0].candidates()[0].days_in_stage, 3);
    assert_eq!(board.stages[1].candidates()[0].days_in_stage, 3);
}

#[test]
fn notification_failures_do_not_fail_moves() {
    let repository = Arc::new(MemoryRepository::with_records(
        vec![candidate("c1", "Ada", "new")],
        Vec::new(),
    ));
    let service = RecruitingService::new(
        repository,
        Arc::new(OfflineNotifier),
        &MatchingConfig::default(),
    )
    .expect("hydrates")
    .with_clock(today);

    let receipt = service
        .move_candidate(&CandidateId("c1".to_string()), &StageId::new("screening"))
        .expect("move survives notifier outage");
    assert_eq!(receipt.to, StageId::new("screening"));
}

#[test]
fn score_uses_stored_records_and_announces_result() {
    let repository = Arc::new(MemoryRepository::with_records(
        vec![candidate("c1", "Ada", "new")],
        vec![vacancy("v1", "Frontend Engineer")],
    ));
    let notifier = Arc::new(MemoryNotifier::default());
    let service =
        RecruitingService::new(repository, notifier.clone(), &MatchingConfig::default())
            .expect("hydrates");

    let result = service
        .score(
            &CandidateId("c1".to_string()),
            &VacancyId("v1".to_string()),
        )
        .expect("scores");
    assert_eq!(result.score, 70);

    let events = notifier.events();
    assert_eq!(events[0].kind, NotificationKind::MatchComputed);
    assert_eq!(events[0].message, "Ada matches Frontend Engineer at 70%");

    match service.score(
        &CandidateId("c1".to_string()),
        &VacancyId("missing".to_string()),
    ) {
        Err(RecruitingServiceError::VacancyNotFound(id)) => assert_eq!(id.0, "missing"),
        other => panic!("expected missing vacancy, got {other:?}"),
    }
}

#[test]
fn rankings_cover_every_counterpart() {
    let (service, _, _) = build_service();
    let ada = service
        .register_candidate(new_candidate("Ada"))
        .expect("registers");
    let mut grace = new_candidate("Grace");
    grace.skills = skills(&["Rust", "SQL", "Kafka"]);
    grace.experience = "5 years".to_string();
    let grace = service.register_candidate(grace).expect("registers");

    let platform = service
        .register_vacancy(new_vacancy("Platform Engineer"))
        .expect("registers");
    let mut design = new_vacancy("Designer");
    design.skills = skills(&["Figma"]);
    service.register_vacancy(design).expect("registers");

    let for_ada = service
        .rank_vacancies_for(&ada.id, SortMode::Score)
        .expect("ranks");
    assert_eq!(for_ada.len(), 2);
    assert_eq!(for_ada[0].name, "Platform Engineer");

    let for_platform = service
        .rank_candidates_for(&platform.id, SortMode::Score)
        .expect("ranks");
    assert_eq!(for_platform[0].id, grace.id.0);
    assert_eq!(for_platform[0].result.skills_match, 100);

    let by_name = service
        .rank_candidates_for(&platform.id, SortMode::Name)
        .expect("ranks");
    assert_eq!(by_name[0].name, "Ada");
}

#[test]
fn schedule_next_action_updates_board_and_store() {
    let (service, repository, _) = build_service();
    let ada = service
        .register_candidate(new_candidate("Ada"))
        .expect("registers");

    let action = NextAction::Interview {
        due: Some(date(2025, 5, 20)),
        status: ActionStatus::Scheduled,
        interviewer: Some("Grace".to_string()),
    };
    let updated = service
        .schedule_next_action(&ada.id, Some(action.clone()))
        .expect("schedules");
    assert_eq!(updated.next_action, Some(action.clone()));

    let stored = repository
        .fetch_candidate(&ada.id)
        .expect("fetch succeeds")
        .expect("stored");
    assert_eq!(stored.next_action, Some(action));
    let board = service.board().expect("board");
    assert!(board.stages[0].candidates()[0].next_action.is_some());
}

#[test]
fn withdraw_removes_from_board_and_store() {
    let (service, repository, _) = build_service();
    let ada = service
        .register_candidate(new_candidate("Ada"))
        .expect("registers");

    let removed = service.withdraw_candidate(&ada.id).expect("withdraws");
    assert_eq!(removed.id, ada.id);
    assert!(repository
        .fetch_candidate(&ada.id)
        .expect("fetch succeeds")
        .is_none());

    match service.withdraw_candidate(&ada.id) {
        Err(RecruitingServiceError::CandidateNotFound(_)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn elapsed_days_are_persisted() {
    let (service, repository, _) = build_service();
    let ada = service
        .register_candidate(new_candidate("Ada"))
        .expect("registers");

    service.record_elapsed_days(4).expect("ages board");

    let stored = repository
        .fetch_candidate(&ada.id)
        .expect("fetch succeeds")
        .expect("stored");
    assert_eq!(stored.days_in_stage, 4);
}
