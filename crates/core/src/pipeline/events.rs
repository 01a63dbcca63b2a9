//! # Pipeline Events
//!
//! Progress events streamed to the caller at phase boundaries and after
//! each generated section.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::phase::PipelinePhase;

/// Kind of pipeline event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineEventKind {
    /// Pipeline started
    PipelineStarted,
    /// A phase started
    PhaseStarted,
    /// A phase completed
    PhaseCompleted,
    /// One section finished generating
    SectionCompleted,
    /// A regeneration round started
    RegenerationStarted,
    /// One section was regenerated
    SectionRegenerated,
    /// Pipeline completed
    PipelineCompleted,
    /// Pipeline failed
    PipelineFailed,
}

/// An event in the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// Unique event ID
    pub id: String,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Kind of event
    pub kind: PipelineEventKind,
    /// Phase the event belongs to
    pub phase: PipelinePhase,
    /// Overall progress, 0-100
    pub progress: u8,
    /// Human-readable status line
    pub message: String,
    /// Section counter, when a section is involved
    #[serde(default)]
    pub current_section: Option<usize>,
    #[serde(default)]
    pub total_sections: Option<usize>,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl PipelineEvent {
    /// Create a new event
    pub fn new(
        kind: PipelineEventKind,
        phase: PipelinePhase,
        progress: u8,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            phase,
            progress: progress.min(100),
            message: message.into(),
            current_section: None,
            total_sections: None,
            data: None,
        }
    }

    /// Attach the section counter
    pub fn with_section(mut self, current: usize, total: usize) -> Self {
        self.current_section = Some(current);
        self.total_sections = Some(total);
        self
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
