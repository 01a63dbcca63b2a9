//! # Pipeline
//!
//! The orchestration layer: phase state machine, progress events, and the
//! coordinator that runs understanding -> planning -> generating ->
//! validating with a bounded regeneration loop.

use serde::{Deserialize, Serialize};

pub mod events;
pub mod orchestrator;
pub mod phase;

pub use events::{PipelineEvent, PipelineEventKind};
pub use orchestrator::{OrchestrationResult, Orchestrator, OrchestratorConfig, RunMetadata};
pub use phase::{Pipeline, PipelinePhase};

/// Inbound request from the (excluded) UI layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrchestrationInput {
    /// Free-text product description
    pub description: String,
    /// Structured hints from the setup wizard
    #[serde(default)]
    pub wizard: Option<WizardData>,
    /// Caller preferences
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

impl OrchestrationInput {
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            wizard: None,
            preferences: None,
        }
    }
}

/// Optional structured hints collected before generation. Hint values win
/// over anything the intent analyzer infers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardData {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub color_theme: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default)]
    pub font_pair: Option<String>,
    #[serde(default)]
    pub page_type: Option<String>,
}

/// Caller preferences for a single run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Override the planned section count (clamped to 3..=12)
    #[serde(default)]
    pub section_count: Option<usize>,
    /// Toggle the quality-gated regeneration loop
    #[serde(default)]
    pub enable_refinement: Option<bool>,
}
