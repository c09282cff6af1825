mod rules;
mod weights;

pub use rules::{
    experience_match, location_match, normalize_skills, parse_salary, salary_match, skills_match,
};
pub use weights::{MatchWeights, DEFAULT_WEIGHTS};

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, Vacancy};
use crate::config::MatchingConfig;

/// Cities whose presence in a candidate location earns the higher location sub-score.
pub const DEFAULT_MAJOR_CITIES: [&str; 6] = [
    "New York",
    "San Francisco",
    "Seattle",
    "Boston",
    "Austin",
    "London",
];

/// Compatibility of one candidate with one vacancy. Every field is in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub skills_match: u8,
    pub exp_match: u8,
    pub location_match: u8,
    pub salary_match: u8,
}

/// Stateless scorer; holds only the location heuristic inputs and the weights.
#[derive(Debug, Clone)]
pub struct MatchScorer {
    major_cities: Vec<String>,
    weights: MatchWeights,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

impl MatchScorer {
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            major_cities: config.major_cities.clone(),
            weights: DEFAULT_WEIGHTS,
        }
    }

    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> MatchWeights {
        self.weights
    }

    pub fn score(&self, candidate: &Candidate, vacancy: &Vacancy) -> MatchResult {
        let skills_match = skills_match(&candidate.skills, &vacancy.skills);
        let exp_match = experience_match(
            candidate.experience_years(),
            vacancy.required_experience_years,
        );
        let location_match = location_match(&candidate.location, &self.major_cities);
        let salary_match = salary_match(
            u64::from(candidate.desired_salary.unwrap_or(0)),
            parse_salary(&vacancy.salary),
        );

        let score = self
            .weights
            .combine(skills_match, exp_match, location_match, salary_match);

        MatchResult {
            score,
            skills_match,
            exp_match,
            location_match,
            salary_match,
        }
    }
}
