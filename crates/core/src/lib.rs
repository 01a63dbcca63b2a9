//! # PageForge Core
//!
//! The "Brain" of the PageForge landing-page builder: the multi-phase
//! pipeline that turns a free-text product description into a structured,
//! styled, quality-gated page.
//!
//! ## Architecture
//!
//! - `skills/` - One skill per generative phase (intent, blueprint, sections)
//! - `catalog/` - Static template patterns, copy frameworks, themes, variants
//! - `quality/` - Pure validation pass producing scored, typed issues
//! - `pipeline/` - Phase state machine, progress events, and the orchestrator
//! - `generator/` - The raw-text LLM transport every phase calls through
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pageforge_core::pipeline::{OrchestrationInput, Orchestrator, OrchestratorConfig};
//!
//! let mut orchestrator = Orchestrator::new(OrchestratorConfig::default());
//! let result = orchestrator
//!     .run(OrchestrationInput::from_description("AI email tool for founders"))
//!     .await;
//! ```

pub mod catalog;
pub mod content;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod quality;
pub mod skills;

pub use content::{LandingPage, PageSection, SectionType};
pub use pipeline::{
    OrchestrationInput, OrchestrationResult, Orchestrator, OrchestratorConfig, Preferences,
    WizardData,
};
pub use quality::{assess_quality, QualityIssue, QualityReport, Severity};
pub use skills::{PageBlueprint, PageIntent, SectionPlan};
