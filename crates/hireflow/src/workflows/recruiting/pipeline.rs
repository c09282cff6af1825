//! Hiring pipeline board: an ordered set of stages partitioning the candidate pool.
//!
//! Every candidate lives in exactly one stage. A move removes the candidate from its current
//! slot and appends it to the destination, so the partition holds after every call. Failed
//! moves report why but never touch the board.

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Candidate, CandidateId, StageId};

/// Static description of a pipeline bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageDefinition {
    pub id: StageId,
    pub name: String,
}

impl StageDefinition {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: StageId::new(id),
            name: name.to_string(),
        }
    }

    pub fn standard() -> Vec<Self> {
        vec![
            Self::new("new", "New"),
            Self::new("screening", "Screening"),
            Self::new("interview", "Interview"),
            Self::new("offer", "Offer"),
            Self::new("hired", "Hired"),
        ]
    }
}

/// A pipeline bucket and the candidates currently in it, in board order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    candidates: Vec<Candidate>,
}

impl Stage {
    fn from_definition(definition: StageDefinition) -> Self {
        Self {
            id: definition.id,
            name: definition.name,
            candidates: Vec::new(),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate_ids(&self) -> Vec<&CandidateId> {
        self.candidates.iter().map(|candidate| &candidate.id).collect()
    }

    fn position(&self, candidate_id: &CandidateId) -> Option<usize> {
        self.candidates
            .iter()
            .position(|candidate| &candidate.id == candidate_id)
    }
}

/// Receipt for a completed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMove {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub from: StageId,
    pub to: StageId,
    pub to_name: String,
    pub moved_on: NaiveDate,
}

impl StageMove {
    pub fn summary(&self) -> String {
        format!("{} moved to {}", self.candidate_name, self.to_name)
    }
}

/// Per-stage rollup for dashboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummaryEntry {
    pub stage_id: StageId,
    pub stage_name: String,
    pub candidates: usize,
    pub average_days_in_stage: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("candidate {0} is not on the board")]
    CandidateNotFound(CandidateId),
    #[error("stage {0} does not exist")]
    StageNotFound(StageId),
    #[error("candidate {candidate} is already in stage {stage}")]
    AlreadyInStage {
        candidate: CandidateId,
        stage: StageId,
    },
    #[error("candidate {0} is already on the board")]
    DuplicateCandidate(CandidateId),
}

/// Owns the stage/candidate partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineBoard {
    stages: Vec<Stage>,
}

impl Default for PipelineBoard {
    fn default() -> Self {
        Self::standard()
    }
}

impl PipelineBoard {
    pub fn new(definitions: Vec<StageDefinition>) -> Self {
        let mut stages: Vec<Stage> = Vec::with_capacity(definitions.len());
        for definition in definitions {
            if stages.iter().all(|stage| stage.id != definition.id) {
                stages.push(Stage::from_definition(definition));
            }
        }
        Self { stages }
    }

    pub fn standard() -> Self {
        Self::new(StageDefinition::standard())
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, stage_id: &StageId) -> Option<&Stage> {
        self.stages.iter().find(|stage| &stage.id == stage_id)
    }

    /// The stage new candidates land in when intake names none.
    pub fn first_stage(&self) -> Option<&StageId> {
        self.stages.first().map(|stage| &stage.id)
    }

    /// Stage index and slot of a candidate.
    pub fn locate(&self, candidate_id: &CandidateId) -> Option<(usize, usize)> {
        self.stages
            .iter()
            .enumerate()
            .find_map(|(stage_index, stage)| {
                stage.position(candidate_id).map(|slot| (stage_index, slot))
            })
    }

    pub fn candidate(&self, candidate_id: &CandidateId) -> Option<&Candidate> {
        self.locate(candidate_id)
            .map(|(stage_index, slot)| &self.stages[stage_index].candidates[slot])
    }

    pub fn candidate_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.candidates.len()).sum()
    }

    /// Places a candidate at the end of the stage named by its `stage` field.
    pub fn admit(&mut self, candidate: Candidate) -> Result<(), PipelineError> {
        if self.locate(&candidate.id).is_some() {
            return Err(PipelineError::DuplicateCandidate(candidate.id));
        }

        let stage_index = self
            .stage_index(&candidate.stage)
            .ok_or_else(|| PipelineError::StageNotFound(candidate.stage.clone()))?;
        self.stages[stage_index].candidates.push(candidate);
        Ok(())
    }

    /// Moves a candidate to the end of `destination`, stamping the move date and resetting
    /// the days-in-stage counter. On error the board is left exactly as it was.
    pub fn move_candidate(
        &mut self,
        candidate_id: &CandidateId,
        destination: &StageId,
        today: NaiveDate,
    ) -> Result<StageMove, PipelineError> {
        let (source_index, slot) = self
            .locate(candidate_id)
            .ok_or_else(|| PipelineError::CandidateNotFound(candidate_id.clone()))?;
        let destination_index = self
            .stage_index(destination)
            .ok_or_else(|| PipelineError::StageNotFound(destination.clone()))?;

        if source_index == destination_index {
            return Err(PipelineError::AlreadyInStage {
                candidate: candidate_id.clone(),
                stage: destination.clone(),
            });
        }

        let mut candidate = self.stages[source_index].candidates.remove(slot);
        let from = std::mem::replace(&mut candidate.stage, destination.clone());
        candidate.last_updated = today;
        candidate.days_in_stage = 0;

        let receipt = StageMove {
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            from,
            to: destination.clone(),
            to_name: self.stages[destination_index].name.clone(),
            moved_on: today,
        };
        self.stages[destination_index].candidates.push(candidate);

        Ok(receipt)
    }

    /// Drag-and-drop flavour of [`move_candidate`](Self::move_candidate): invalid intents
    /// are dropped silently.
    pub fn apply_move(
        &mut self,
        candidate_id: &CandidateId,
        destination: &StageId,
        today: NaiveDate,
    ) -> Option<StageMove> {
        self.move_candidate(candidate_id, destination, today).ok()
    }

    pub fn withdraw(&mut self, candidate_id: &CandidateId) -> Option<Candidate> {
        let (stage_index, slot) = self.locate(candidate_id)?;
        Some(self.stages[stage_index].candidates.remove(slot))
    }

    /// Replaces a candidate record in place, keeping its stage and slot.
    pub(crate) fn refresh(&mut self, candidate: Candidate) -> Result<(), PipelineError> {
        let (stage_index, slot) = self
            .locate(&candidate.id)
            .ok_or_else(|| PipelineError::CandidateNotFound(candidate.id.clone()))?;
        let current = &mut self.stages[stage_index].candidates[slot];
        let stage = current.stage.clone();
        *current = Candidate { stage, ..candidate };
        Ok(())
    }

    /// Ages every candidate by `days`.
    pub fn advance_days(&mut self, days: u32) {
        for candidate in self
            .stages
            .iter_mut()
            .flat_map(|stage| stage.candidates.iter_mut())
        {
            candidate.days_in_stage = candidate.days_in_stage.saturating_add(days);
        }
    }

    pub fn summary(&self) -> Vec<StageSummaryEntry> {
        self.stages
            .iter()
            .map(|stage| {
                let count = stage.candidates.len();
                let total_days: u64 = stage
                    .candidates
                    .iter()
                    .map(|candidate| u64::from(candidate.days_in_stage))
                    .sum();
                let average_days_in_stage = if count == 0 {
                    0.0
                } else {
                    total_days as f32 / count as f32
                };

                StageSummaryEntry {
                    stage_id: stage.id.clone(),
                    stage_name: stage.name.clone(),
                    candidates: count,
                    average_days_in_stage,
                }
            })
            .collect()
    }

    fn stage_index(&self, stage_id: &StageId) -> Option<usize> {
        self.stages.iter().position(|stage| &stage.id == stage_id)
    }
}
