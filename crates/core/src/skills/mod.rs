//! # PageForge Skills
//!
//! One skill per generative phase of the pipeline, each exposing an
//! SDK-style `run` for direct orchestrator integration.
//!
//! ## Pipeline order
//!
//! ```text
//! IntentSkill     description + hints -> PageIntent
//! BlueprintSkill  PageIntent -> PageBlueprint (plans, framework, visuals)
//! SectionSkill    SectionPlan + context -> PageSection (one call each)
//! ```
//!
//! Every skill calls the generator through the same raw-text contract and
//! recovers from malformed output with its own deterministic fallback; the
//! quality gate (`crate::quality`) is pure and lives outside the skills.

pub mod decode;
pub mod prompts;

pub mod blueprint_skill;
pub mod intent_skill;
pub mod section_skill;

// Re-exports for convenience
pub use blueprint_skill::{BlueprintSkill, PageBlueprint, SectionPlan};
pub use intent_skill::{IntentSkill, PageIntent};
pub use section_skill::{GenerationContext, SectionSkill};
