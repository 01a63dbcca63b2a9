//! # Pipeline Phases
//!
//! Defines the phases of the generation pipeline.

use serde::{Deserialize, Serialize};

/// Phase of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    /// Extracting intent from the description
    Understanding,
    /// Planning the blueprint
    Planning,
    /// Generating sections
    Generating,
    /// Running quality checks
    Validating,
    /// Regenerating failed sections
    Regenerating,
    /// Complete
    Complete,
    /// Failed
    Failed,
}

/// The pipeline state machine
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Current phase
    pub phase: PipelinePhase,
    /// Number of regeneration rounds run (for loop bounding)
    pub regeneration_rounds: u32,
    /// Maximum regeneration rounds before accepting the page as-is
    pub max_rounds: u32,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            phase: PipelinePhase::Understanding,
            regeneration_rounds: 0,
            max_rounds: 2,
        }
    }
}

impl Pipeline {
    /// Create a new pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next phase
    pub fn advance(&mut self) {
        self.phase = match self.phase {
            PipelinePhase::Understanding => PipelinePhase::Planning,
            PipelinePhase::Planning => PipelinePhase::Generating,
            PipelinePhase::Generating => PipelinePhase::Validating,
            PipelinePhase::Validating => PipelinePhase::Complete,
            PipelinePhase::Regenerating => PipelinePhase::Validating,
            PipelinePhase::Complete => PipelinePhase::Complete,
            PipelinePhase::Failed => PipelinePhase::Failed,
        };
    }

    /// Enter a regeneration round. Returns false when the round budget is
    /// spent, in which case the phase is left at Validating and the page
    /// ships as-is.
    pub fn begin_regeneration(&mut self) -> bool {
        if self.regeneration_rounds >= self.max_rounds {
            return false;
        }
        self.regeneration_rounds += 1;
        self.phase = PipelinePhase::Regenerating;
        true
    }

    /// Fail the pipeline
    pub fn fail(&mut self) {
        self.phase = PipelinePhase::Failed;
    }

    /// Check if pipeline is complete
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, PipelinePhase::Complete | PipelinePhase::Failed)
    }

    /// Check if pipeline succeeded
    pub fn is_success(&self) -> bool {
        self.phase == PipelinePhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_advance() {
        let mut pipeline = Pipeline::new();
        assert_eq!(pipeline.phase, PipelinePhase::Understanding);

        pipeline.advance();
        assert_eq!(pipeline.phase, PipelinePhase::Planning);

        pipeline.advance();
        assert_eq!(pipeline.phase, PipelinePhase::Generating);

        pipeline.advance();
        assert_eq!(pipeline.phase, PipelinePhase::Validating);

        pipeline.advance();
        assert_eq!(pipeline.phase, PipelinePhase::Complete);
        assert!(pipeline.is_complete());
        assert!(pipeline.is_success());
    }

    #[test]
    fn test_regeneration_round_budget() {
        let mut pipeline = Pipeline::new();
        pipeline.phase = PipelinePhase::Validating;

        // First round
        assert!(pipeline.begin_regeneration());
        assert_eq!(pipeline.phase, PipelinePhase::Regenerating);
        pipeline.advance();
        assert_eq!(pipeline.phase, PipelinePhase::Validating);

        // Second round
        assert!(pipeline.begin_regeneration());
        pipeline.advance();

        // Budget spent
        assert!(!pipeline.begin_regeneration());
        assert_eq!(pipeline.phase, PipelinePhase::Validating);
        assert_eq!(pipeline.regeneration_rounds, 2);
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut pipeline = Pipeline::new();
        pipeline.fail();
        assert!(pipeline.is_complete());
        assert!(!pipeline.is_success());
        pipeline.advance();
        assert_eq!(pipeline.phase, PipelinePhase::Failed);
    }
}
