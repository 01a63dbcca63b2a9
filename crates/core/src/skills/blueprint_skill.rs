//! # Blueprint Skill
//!
//! Second phase: turn a `PageIntent` into a `PageBlueprint`. Pattern
//! matching, framework selection, and visual resolution are pure catalog
//! lookups; the single generator call only proposes the section sequence.
//! If that call's JSON cannot be parsed the whole sequence is substituted
//! from the matched pattern's canonical flow, with variants still resolved
//! through the selector.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::catalog::frameworks::CopyFramework;
use crate::catalog::templates::TemplatePattern;
use crate::catalog::themes::{ColorStrategy, Typography};
use crate::catalog::variants::Tier;
use crate::catalog::Catalog;
use crate::content::SectionType;
use crate::generator::{GenerationRequest, GeneratorError, TextGenerator, TokenUsage};
use crate::pipeline::OrchestrationInput;
use crate::skills::decode::{decode_object, ParseError};
use crate::skills::intent_skill::PageIntent;
use crate::skills::prompts;

/// Hard bounds on how many sections a page may plan.
pub const MIN_SECTION_COUNT: usize = 3;
pub const MAX_SECTION_COUNT: usize = 12;

/// One planned section, consumed (never mutated) by the section generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPlan {
    pub kind: SectionType,
    pub variant: String,
    pub effects: Vec<String>,
    pub tier: Tier,
    pub purpose: String,
    pub copy_guidelines: String,
    pub key_elements: Vec<String>,
}

/// The full plan. Read-only after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBlueprint {
    pub copy_framework: CopyFramework,
    pub framework_rationale: String,
    pub section_sequence: Vec<SectionPlan>,
    pub color_strategy: ColorStrategy,
    pub typography: Typography,
    pub target_section_count: usize,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
struct RawBlueprint {
    sections: Vec<RawPlannedSection>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
struct RawPlannedSection {
    section_type: String,
    purpose: String,
    copy_guidelines: String,
    key_elements: Vec<String>,
}

impl Default for RawPlannedSection {
    fn default() -> Self {
        Self {
            section_type: String::new(),
            purpose: "desire".to_string(),
            copy_guidelines: String::new(),
            key_elements: Vec::new(),
        }
    }
}

/// Blueprint skill: intent in, full page plan out, exactly one generator
/// call.
pub struct BlueprintSkill;

impl BlueprintSkill {
    /// Run blueprint planning. Only transport failures propagate.
    pub async fn run(
        intent: &PageIntent,
        request: &OrchestrationInput,
        catalog: &Catalog,
        generator: &dyn TextGenerator,
    ) -> Result<(PageBlueprint, TokenUsage), GeneratorError> {
        let pattern = catalog.match_pattern(intent.product_type, &intent.keywords);
        let (framework, rationale) = catalog.select_framework(intent);

        let wizard = request.wizard.as_ref();
        let color_strategy =
            catalog.resolve_color_strategy(wizard.and_then(|w| w.color_theme.as_deref()));
        let typography = catalog.resolve_typography(wizard.and_then(|w| w.font_pair.as_deref()));
        let vibe = wizard.and_then(|w| w.vibe.as_deref());

        let preferred_count = request.preferences.as_ref().and_then(|p| p.section_count);
        let target_count = preferred_count
            .map(|count| count.clamp(MIN_SECTION_COUNT, MAX_SECTION_COUNT))
            .unwrap_or(pattern.section_flow.len());

        let generation = GenerationRequest::new(
            Self::system_prompt(),
            Self::user_message(intent, pattern, framework, catalog, target_count),
        )
        .with_max_tokens(2048)
        .with_temperature(0.5);

        let response = generator.generate(&generation).await?;

        let section_sequence = match Self::parse_sequence(
            &response.text,
            intent,
            vibe,
            framework,
            catalog,
            target_count,
        ) {
            Ok(sequence) => sequence,
            Err(err) => {
                tracing::warn!(
                    pattern = pattern.id,
                    "blueprint parse failed, substituting pattern flow: {}",
                    err
                );
                Self::fallback_sequence(pattern, intent, vibe, framework, catalog, preferred_count)
            }
        };

        let blueprint = PageBlueprint {
            copy_framework: framework,
            framework_rationale: rationale,
            section_sequence,
            color_strategy,
            typography,
            target_section_count: target_count,
        };

        Ok((blueprint, response.usage))
    }

    fn system_prompt() -> String {
        let schema = schema_for!(RawBlueprint);
        format!(
            "{}\n\n## Schema\n\n```json\n{}\n```",
            prompts::BLUEPRINT,
            serde_json::to_string_pretty(&schema).unwrap_or_default()
        )
    }

    fn user_message(
        intent: &PageIntent,
        pattern: &TemplatePattern,
        framework: CopyFramework,
        catalog: &Catalog,
        target_count: usize,
    ) -> String {
        let canonical_flow: Vec<String> = pattern
            .section_flow
            .iter()
            .map(|slot| format!("{} ({}, {})", slot.kind.as_str(), slot.purpose, slot.variant))
            .collect();
        let definition = catalog.framework(framework);

        format!(
            "Intent:\n{}\n\nMatched archetype: {} (avg {} sections)\n\
             Canonical flow: {}\nConversion tactics: {}\n\n\
             Copy framework: {} - {}\n\nPlan exactly {} sections.",
            serde_json::to_string_pretty(intent).unwrap_or_default(),
            pattern.id,
            pattern.avg_sections,
            canonical_flow.join(" -> "),
            pattern.conversion_tactics.join("; "),
            framework.as_str(),
            definition.summary,
            target_count
        )
    }

    /// Parse the generator's proposed sequence. Unknown section types are
    /// skipped; a sequence with nothing left counts as a parse failure.
    fn parse_sequence(
        text: &str,
        intent: &PageIntent,
        vibe: Option<&str>,
        framework: CopyFramework,
        catalog: &Catalog,
        target_count: usize,
    ) -> Result<Vec<SectionPlan>, ParseError> {
        let raw: RawBlueprint = decode_object(text)?;

        let mut sequence = Vec::new();
        for section in raw.sections {
            let Some(kind) = SectionType::parse_loose(&section.section_type) else {
                tracing::warn!("skipping unknown section type '{}'", section.section_type);
                continue;
            };
            let choice = catalog.select_variant(kind, intent, vibe, framework);
            let purpose = if section.purpose.trim().is_empty() {
                "desire".to_string()
            } else {
                section.purpose.trim().to_lowercase()
            };
            let copy_guidelines = if section.copy_guidelines.trim().is_empty() {
                catalog.guidance_for_purpose(framework, &purpose).to_string()
            } else {
                section.copy_guidelines
            };
            sequence.push(SectionPlan {
                kind,
                variant: choice.key,
                effects: choice.effects,
                tier: choice.tier,
                purpose,
                copy_guidelines,
                key_elements: section.key_elements,
            });
            if sequence.len() == target_count {
                break;
            }
        }

        if sequence.is_empty() {
            return Err(ParseError::NoJson);
        }
        Ok(sequence)
    }

    /// Full structural fallback: the pattern's canonical flow becomes the
    /// section sequence, with variants resolved through the selector and
    /// copy guidance derived from the framework's purpose map.
    pub fn fallback_sequence(
        pattern: &TemplatePattern,
        intent: &PageIntent,
        vibe: Option<&str>,
        framework: CopyFramework,
        catalog: &Catalog,
        preferred_count: Option<usize>,
    ) -> Vec<SectionPlan> {
        let limit = preferred_count
            .map(|count| count.clamp(MIN_SECTION_COUNT, MAX_SECTION_COUNT))
            .unwrap_or(pattern.section_flow.len())
            .min(pattern.section_flow.len());

        pattern
            .section_flow
            .iter()
            .take(limit)
            .map(|slot| {
                let choice = catalog.select_variant(slot.kind, intent, vibe, framework);
                SectionPlan {
                    kind: slot.kind,
                    variant: choice.key,
                    effects: choice.effects,
                    tier: choice.tier,
                    purpose: slot.purpose.to_string(),
                    copy_guidelines: catalog
                        .guidance_for_purpose(framework, slot.purpose)
                        .to_string(),
                    key_elements: Vec::new(),
                }
            })
            .collect()
    }
}
