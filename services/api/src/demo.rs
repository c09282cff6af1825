use crate::infra::{InMemoryTalentRepository, LoggingNotifier};
use chrono::Local;
use clap::Args;
use hireflow::config::MatchingConfig;
use hireflow::error::AppError;
use hireflow::workflows::recruiting::{
    ActionStatus, BoardView, Candidate, CandidateId, MatchResult, MatchScorer, NewCandidate,
    NewVacancy, NextAction, RankedMatch, RecruitingService, SortMode, StageId, Vacancy, VacancyId,
    VacancyStatus,
};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct MatchArgs {
    /// Candidate skills, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) candidate_skills: Vec<String>,
    /// Vacancy skills, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) vacancy_skills: Vec<String>,
    /// Free-text experience, e.g. "5 years experience"
    #[arg(long, default_value = "")]
    pub(crate) experience: String,
    /// Years of experience the vacancy asks for
    #[arg(long, default_value_t = 0)]
    pub(crate) required_years: u32,
    /// Candidate location
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// Candidate desired salary in whole currency units
    #[arg(long)]
    pub(crate) desired_salary: Option<u32>,
    /// Vacancy salary text, e.g. "$110K - $140K"
    #[arg(long, default_value = "")]
    pub(crate) salary: String,
    /// Comma separated list replacing the default major cities
    #[arg(long)]
    pub(crate) major_cities: Option<String>,
    /// Emit the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Ranking order for the printed match tables (score, date, or name)
    #[arg(long, default_value = "score")]
    pub(crate) sort: SortMode,
    /// Skip the pipeline walkthrough and only print rankings
    #[arg(long)]
    pub(crate) skip_moves: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = match args.major_cities.as_deref() {
        Some(raw) => MatchingConfig::from_list(raw)?,
        None => MatchingConfig::default(),
    };
    let scorer = MatchScorer::new(&config);
    let today = Local::now().date_naive();

    let candidate = Candidate {
        id: CandidateId("cli-candidate".to_string()),
        name: "Candidate".to_string(),
        skills: args.candidate_skills.into_iter().collect(),
        experience: args.experience,
        location: args.location,
        desired_salary: args.desired_salary,
        stage: StageId::new("new"),
        days_in_stage: 0,
        last_updated: today,
        applied_on: today,
        next_action: None,
    };
    let vacancy = Vacancy {
        id: VacancyId("cli-vacancy".to_string()),
        title: "Vacancy".to_string(),
        skills: args.vacancy_skills.into_iter().collect(),
        required_experience_years: args.required_years,
        location: String::new(),
        salary: args.salary,
        posted_on: today,
        status: VacancyStatus::Open,
    };

    let result = scorer.score(&candidate, &vacancy);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_match(&result);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = RecruitingService::new(
        Arc::new(InMemoryTalentRepository::default()),
        Arc::new(LoggingNotifier),
        &MatchingConfig::default(),
    )?;

    for intake in sample_vacancies() {
        service.register_vacancy(intake)?;
    }
    let mut registered = Vec::new();
    for intake in sample_candidates() {
        registered.push(service.register_candidate(intake)?);
    }

    println!("Recruiting pipeline demo");
    for candidate in &registered {
        let ranked = service.rank_vacancies_for(&candidate.id, args.sort)?;
        println!(
            "\nVacancies for {} ({}, sorted by {})",
            candidate.name,
            candidate.location,
            args.sort.label()
        );
        render_ranking(&ranked);
    }

    if !args.skip_moves {
        if let Some(first) = registered.first() {
            println!("\nPipeline walkthrough for {}", first.name);
            for stage in ["screening", "interview", "offer"] {
                let receipt = service.move_candidate(&first.id, &StageId::new(stage))?;
                println!("  - {} (on {})", receipt.summary(), receipt.moved_on);
            }
            let due = Local::now().date_naive() + chrono::Duration::days(3);
            service.schedule_next_action(
                &first.id,
                Some(NextAction::Decision {
                    due: Some(due),
                    status: ActionStatus::Pending,
                    outcome: None,
                }),
            )?;
            if let Err(err) = service.move_candidate(&first.id, &StageId::new("offer")) {
                println!("  - repeated move rejected: {err}");
            }
        }
        service.record_elapsed_days(2)?;
    }

    render_board(&service.board()?);
    Ok(())
}

fn render_match(result: &MatchResult) {
    println!("Match score: {}%", result.score);
    println!("  skills     {:>3}%", result.skills_match);
    println!("  experience {:>3}%", result.exp_match);
    println!("  location   {:>3}%", result.location_match);
    println!("  salary     {:>3}%", result.salary_match);
}

fn render_ranking(ranked: &[RankedMatch]) {
    if ranked.is_empty() {
        println!("  (no vacancies)");
        return;
    }
    for entry in ranked {
        println!(
            "  {:>3}%  {:<28} posted {}  [skills {}%, exp {}%, location {}%, salary {}%]",
            entry.result.score,
            entry.name,
            entry.date,
            entry.result.skills_match,
            entry.result.exp_match,
            entry.result.location_match,
            entry.result.salary_match,
        );
    }
}

fn render_board(board: &BoardView) {
    println!("\nBoard");
    for (stage, summary) in board.stages.iter().zip(&board.summary) {
        println!(
            "  {:<10} {} candidate(s), avg {:.1} day(s) in stage",
            stage.name, summary.candidates, summary.average_days_in_stage
        );
        for candidate in stage.candidates() {
            let action = candidate
                .next_action
                .as_ref()
                .map(|action| format!(" next: {}", action.label()))
                .unwrap_or_default();
            println!("    - {}{}", candidate.name, action);
        }
    }
}

fn skill_set(raw: &[&str]) -> BTreeSet<String> {
    raw.iter().map(|skill| skill.to_string()).collect()
}

fn sample_vacancies() -> Vec<NewVacancy> {
    vec![
        NewVacancy {
            title: "Frontend Engineer".to_string(),
            skills: skill_set(&["React", "TypeScript", "Redux"]),
            required_experience_years: 5,
            location: "Remote".to_string(),
            salary: "$110K - $140K".to_string(),
            posted_on: None,
            status: VacancyStatus::Open,
        },
        NewVacancy {
            title: "Platform Engineer".to_string(),
            skills: skill_set(&["Rust", "Kubernetes", "SQL"]),
            required_experience_years: 6,
            location: "Seattle, WA".to_string(),
            salary: "$150,000 - $180,000".to_string(),
            posted_on: None,
            status: VacancyStatus::Open,
        },
        NewVacancy {
            title: "Data Analyst".to_string(),
            skills: skill_set(&["SQL", "Python", "Tableau"]),
            required_experience_years: 2,
            location: "Austin, TX".to_string(),
            salary: "$85K".to_string(),
            posted_on: None,
            status: VacancyStatus::Open,
        },
    ]
}

fn sample_candidates() -> Vec<NewCandidate> {
    vec![
        NewCandidate {
            name: "Ada Lovelace".to_string(),
            skills: skill_set(&["React", "TypeScript", "CSS"]),
            experience: "5 years experience".to_string(),
            location: "Des Moines, IA".to_string(),
            desired_salary: Some(120_000),
            stage: None,
            applied_on: None,
            next_action: None,
        },
        NewCandidate {
            name: "Grace Hopper".to_string(),
            skills: skill_set(&["Rust", "SQL", "Kubernetes", "Go"]),
            experience: "7 years".to_string(),
            location: "Seattle, WA".to_string(),
            desired_salary: Some(170_000),
            stage: None,
            applied_on: None,
            next_action: Some(NextAction::Interview {
                due: None,
                status: ActionStatus::Scheduled,
                interviewer: Some("Platform panel".to_string()),
            }),
        },
    ]
}
