//! # Section Skill
//!
//! Third phase: one generator call per planned section. Each call sees a
//! short summary of the immediately preceding section, which bounds prompt
//! growth linearly while keeping the narrative connected. The skill never
//! throws on contract failures: malformed JSON becomes a minimal fallback
//! section, and post-processing (palette, variant, effect flags) is applied
//! uniformly either way.

use schemars::{schema_for, JsonSchema};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::content::{
    CallToAction, PageSection, SectionBody, SectionItem, SectionPalette, SectionType,
};
use crate::generator::{GenerationRequest, GeneratorError, TextGenerator, TokenUsage};
use crate::skills::blueprint_skill::{PageBlueprint, SectionPlan};
use crate::skills::decode::decode_object;
use crate::skills::intent_skill::{PageIntent, ProductType};
use crate::skills::prompts;

/// Everything a single section generation needs. Built fresh per section
/// and per regeneration; `previous` is the read-only generated prefix.
pub struct GenerationContext<'a> {
    pub blueprint: &'a PageBlueprint,
    pub intent: &'a PageIntent,
    pub previous: &'a [PageSection],
    pub index: usize,
    pub total: usize,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        blueprint: &'a PageBlueprint,
        intent: &'a PageIntent,
        previous: &'a [PageSection],
        index: usize,
    ) -> Self {
        Self {
            blueprint,
            intent,
            previous,
            index,
            total: blueprint.section_sequence.len(),
        }
    }

    /// Summary of the immediately preceding section: headline, key
    /// message, item count. The only cross-section context that travels.
    pub fn previous_summary(&self) -> Option<String> {
        self.previous.last().map(summarize_section)
    }
}

/// One-line summary used to thread narrative between adjacent sections.
pub fn summarize_section(section: &PageSection) -> String {
    let mut summary = format!(
        "{}: \"{}\"",
        section.kind.as_str(),
        section.body.heading()
    );
    if let Some(message) = section.body.subheading().or_else(|| section.body.body_text()) {
        let short: String = message.chars().take(100).collect();
        summary.push_str(&format!(" - {}", short));
    }
    let items = section.item_count();
    if items > 0 {
        summary.push_str(&format!(" ({} items)", items));
    }
    summary
}

/// Wire shape the generator is asked to produce for any section type.
/// Aliases accept the camelCase keys models habitually emit.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
struct RawSectionContent {
    heading: Option<String>,
    subheading: Option<String>,
    #[serde(alias = "bodyText")]
    body_text: Option<String>,
    #[serde(alias = "ctaText")]
    cta_text: Option<String>,
    #[serde(alias = "ctaUrl")]
    cta_url: Option<String>,
    #[serde(alias = "secondaryCtaText")]
    secondary_cta_text: Option<String>,
    #[serde(alias = "bulletPoints")]
    bullet_points: Vec<String>,
    items: Vec<RawItem>,
    #[serde(alias = "backgroundColor")]
    background_color: Option<String>,
    #[serde(alias = "textColor")]
    text_color: Option<String>,
    #[serde(alias = "accentColor")]
    accent_color: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
struct RawItem {
    title: String,
    description: String,
    icon: Option<String>,
    value: Option<String>,
    attribution: Option<String>,
}

/// Section skill: one plan + context in, one structurally valid section
/// out, exactly one generator call per invocation.
pub struct SectionSkill;

impl SectionSkill {
    /// Generate a section with a fresh id.
    pub async fn generate(
        plan: &SectionPlan,
        ctx: &GenerationContext<'_>,
        generator: &dyn TextGenerator,
    ) -> Result<(PageSection, TokenUsage), GeneratorError> {
        Self::generate_with_id(Uuid::new_v4().to_string(), plan, ctx, generator).await
    }

    /// Regenerate a section, retaining the replaced section's id so
    /// editor-side references survive.
    pub async fn regenerate(
        id: &str,
        plan: &SectionPlan,
        ctx: &GenerationContext<'_>,
        generator: &dyn TextGenerator,
    ) -> Result<(PageSection, TokenUsage), GeneratorError> {
        Self::generate_with_id(id.to_string(), plan, ctx, generator).await
    }

    async fn generate_with_id(
        id: String,
        plan: &SectionPlan,
        ctx: &GenerationContext<'_>,
        generator: &dyn TextGenerator,
    ) -> Result<(PageSection, TokenUsage), GeneratorError> {
        let request = GenerationRequest::new(Self::system_prompt(), Self::user_message(plan, ctx))
            .with_max_tokens(2048)
            .with_temperature(0.8);

        let response = generator.generate(&request).await?;

        let section = match decode_object::<RawSectionContent>(&response.text) {
            Ok(raw) => Self::assemble(id, plan, ctx, raw),
            Err(err) => {
                tracing::warn!(
                    kind = plan.kind.as_str(),
                    index = ctx.index,
                    "section parse failed, synthesizing fallback: {}",
                    err
                );
                Self::fallback_section(id, plan, ctx)
            }
        };

        Ok((section, response.usage))
    }

    /// Drive generation over the whole planned sequence, reporting
    /// (current, total) after each section. Sections are appended in plan
    /// order; a parse failure inserts a fallback, never drops a slot.
    pub async fn generate_all(
        blueprint: &PageBlueprint,
        intent: &PageIntent,
        generator: &dyn TextGenerator,
        mut on_progress: impl FnMut(usize, usize),
    ) -> Result<(Vec<PageSection>, TokenUsage), GeneratorError> {
        let total = blueprint.section_sequence.len();
        let mut sections: Vec<PageSection> = Vec::with_capacity(total);
        let mut usage = TokenUsage::default();

        for (index, plan) in blueprint.section_sequence.iter().enumerate() {
            let ctx = GenerationContext::new(blueprint, intent, &sections, index);
            let (section, section_usage) = Self::generate(plan, &ctx, generator).await?;
            usage += section_usage;
            sections.push(section);
            on_progress(index + 1, total);
        }

        Ok((sections, usage))
    }

    fn system_prompt() -> String {
        let schema = schema_for!(RawSectionContent);
        format!(
            "{}\n\n## Schema\n\n```json\n{}\n```",
            prompts::SECTION,
            serde_json::to_string_pretty(&schema).unwrap_or_default()
        )
    }

    fn user_message(plan: &SectionPlan, ctx: &GenerationContext<'_>) -> String {
        let strategy = &ctx.blueprint.color_strategy;
        let mut message = format!(
            "Section {} of {}: {}\nPurpose: {}\nVariant: {}\n\
             Copy guidelines: {}\nKey elements: {}\n\n\
             Product: {}\nAudience: {}\nTone: {:?}\n\
             Framework: {}\n\nColors: background {}, text {}, accent {}",
            ctx.index + 1,
            ctx.total,
            plan.kind.as_str(),
            plan.purpose,
            plan.variant,
            plan.copy_guidelines,
            if plan.key_elements.is_empty() {
                "none specified".to_string()
            } else {
                plan.key_elements.join(", ")
            },
            ctx.intent.primary_value_prop,
            ctx.intent.target_audience,
            ctx.intent.tone,
            ctx.blueprint.copy_framework.as_str(),
            strategy.background,
            strategy.text,
            strategy.accent,
        );
        match ctx.previous_summary() {
            Some(summary) => {
                message.push_str(&format!("\n\nPrevious section: {}", summary));
            }
            None => message.push_str("\n\nThis is the first section of the page."),
        }
        message
    }

    /// Build a typed section from parsed generator output, defaulting every
    /// missing piece.
    fn assemble(
        id: String,
        plan: &SectionPlan,
        ctx: &GenerationContext<'_>,
        raw: RawSectionContent,
    ) -> PageSection {
        let heading = raw
            .heading
            .clone()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| ctx.intent.primary_value_prop.clone());
        let cta = || {
            CallToAction {
                label: raw
                    .cta_text
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| default_cta_label(ctx.intent.product_type).to_string()),
                url: raw.cta_url.clone(),
            }
        };

        let body = match plan.kind {
            SectionType::Hero => SectionBody::Hero {
                heading,
                subheading: raw.subheading.clone(),
                cta: cta(),
                secondary_cta: raw
                    .secondary_cta_text
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .map(CallToAction::new),
            },
            SectionType::Cta | SectionType::LeadCapture | SectionType::Contact => {
                SectionBody::Conversion {
                    heading,
                    subheading: raw.subheading.clone(),
                    cta: cta(),
                    bullet_points: raw.bullet_points.clone(),
                }
            }
            kind if kind.requires_items()
                || kind == SectionType::Benefits
                || kind == SectionType::SocialProof =>
            {
                let mut items: Vec<SectionItem> = raw
                    .items
                    .iter()
                    .filter(|item| !item.title.trim().is_empty())
                    .map(|item| SectionItem {
                        title: item.title.clone(),
                        description: item.description.clone(),
                        icon: item.icon.clone(),
                        value: item.value.clone(),
                        attribution: item.attribution.clone(),
                    })
                    .collect();
                if items.is_empty() {
                    items = raw
                        .bullet_points
                        .iter()
                        .filter(|p| !p.trim().is_empty())
                        .map(|point| SectionItem {
                            title: point.clone(),
                            ..Default::default()
                        })
                        .collect();
                }
                if items.is_empty() && kind.requires_items() {
                    items = default_items();
                }
                SectionBody::ItemGrid {
                    heading,
                    subheading: raw.subheading.clone(),
                    items,
                }
            }
            _ => SectionBody::Narrative {
                heading,
                body_text: raw
                    .body_text
                    .clone()
                    .or_else(|| raw.subheading.clone())
                    .filter(|b| !b.trim().is_empty())
                    .unwrap_or_else(|| ctx.intent.primary_value_prop.clone()),
                cta: raw
                    .cta_text
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .map(|label| CallToAction {
                        label,
                        url: raw.cta_url.clone(),
                    }),
            },
        };

        Self::finish(id, plan, ctx, body, &raw)
    }

    /// Minimal structurally valid section for unparseable generator
    /// output. Heading falls back to the value proposition; list-type
    /// sections get default items so the items-required check holds.
    pub fn fallback_section(
        id: String,
        plan: &SectionPlan,
        ctx: &GenerationContext<'_>,
    ) -> PageSection {
        let heading = ctx.intent.primary_value_prop.clone();
        let body = match plan.kind {
            SectionType::Hero => SectionBody::Hero {
                heading,
                subheading: Some(format!("Built for {}", ctx.intent.target_audience)),
                cta: CallToAction::new(default_cta_label(ctx.intent.product_type)),
                secondary_cta: None,
            },
            SectionType::Cta | SectionType::LeadCapture | SectionType::Contact => {
                SectionBody::Conversion {
                    heading,
                    subheading: None,
                    cta: CallToAction::new(default_cta_label(ctx.intent.product_type)),
                    bullet_points: Vec::new(),
                }
            }
            kind if kind.requires_items()
                || kind == SectionType::Benefits
                || kind == SectionType::SocialProof =>
            {
                SectionBody::ItemGrid {
                    heading,
                    subheading: None,
                    items: default_items(),
                }
            }
            _ => SectionBody::Narrative {
                heading,
                body_text: format!(
                    "{} Made for {}.",
                    ctx.intent.primary_value_prop, ctx.intent.target_audience
                ),
                cta: None,
            },
        };

        Self::finish(id, plan, ctx, body, &RawSectionContent::default())
    }

    /// Post-processing applied to every section regardless of how its body
    /// came to be: palette defaulted from the blueprint's color strategy,
    /// variant key from the plan, effect flags when the tier carries them.
    fn finish(
        id: String,
        plan: &SectionPlan,
        ctx: &GenerationContext<'_>,
        body: SectionBody,
        raw: &RawSectionContent,
    ) -> PageSection {
        let strategy = &ctx.blueprint.color_strategy;
        let palette = SectionPalette {
            background_color: valid_hex(&raw.background_color)
                .unwrap_or_else(|| strategy.background.clone()),
            text_color: valid_hex(&raw.text_color).unwrap_or_else(|| strategy.text.clone()),
            accent_color: valid_hex(&raw.accent_color).unwrap_or_else(|| strategy.accent.clone()),
        };

        let mut styling = std::collections::BTreeMap::new();
        if plan.tier.has_effects() {
            for effect in &plan.effects {
                styling.insert(effect.clone(), json!(true));
            }
        }

        PageSection {
            id,
            kind: plan.kind,
            body,
            palette,
            variant: plan.variant.clone(),
            styling,
        }
    }
}

/// Default items satisfying the items-required check when the generator
/// gave us nothing usable.
fn default_items() -> Vec<SectionItem> {
    vec![
        SectionItem {
            title: "Key Feature".to_string(),
            description: "The core capability your visitors care about most.".to_string(),
            ..Default::default()
        },
        SectionItem {
            title: "Another Feature".to_string(),
            description: "A second reason to believe the headline.".to_string(),
            ..Default::default()
        },
        SectionItem {
            title: "Third Feature".to_string(),
            description: "The detail that separates you from alternatives.".to_string(),
            ..Default::default()
        },
    ]
}

fn default_cta_label(product_type: ProductType) -> &'static str {
    match product_type {
        ProductType::Saas => "Start Free Trial",
        ProductType::Ecommerce => "Shop Now",
        ProductType::Course => "Enroll Now",
        ProductType::Coaching => "Book a Call",
        ProductType::Agency => "Get a Quote",
        ProductType::LocalService => "Book Now",
        ProductType::Webinar => "Save My Seat",
        ProductType::LeadMagnet => "Get the Guide",
        ProductType::General => "Get Started",
    }
}

/// Accept only #rgb / #rrggbb values; anything else falls back to the
/// blueprint strategy.
fn valid_hex(value: &Option<String>) -> Option<String> {
    let value = value.as_ref()?.trim();
    let hex_ok = value.starts_with('#')
        && matches!(value.len(), 4 | 7)
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    hex_ok.then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::generator::mock::MockGenerator;
    use crate::pipeline::OrchestrationInput;
    use crate::skills::blueprint_skill::BlueprintSkill;
    use crate::skills::intent_skill::{PageIntent, PricePoint, Tone, UrgencyLevel};

    fn intent() -> PageIntent {
        PageIntent {
            product_type: ProductType::Saas,
            target_audience: "founders".to_string(),
            primary_value_prop: "Write investor updates in minutes".to_string(),
            secondary_value_props: vec![],
            tone: Tone::Professional,
            urgency_level: UrgencyLevel::Medium,
            price_point: PricePoint::Mid,
            keywords: vec!["email".to_string()],
        }
    }

    async fn blueprint(intent: &PageIntent) -> PageBlueprint {
        // Structural fallback gives us the full deterministic SaaS flow.
        let mock = MockGenerator::new().push_text("not json");
        let request = OrchestrationInput {
            description: "AI email tool".to_string(),
            wizard: None,
            preferences: None,
        };
        let (blueprint, _) = BlueprintSkill::run(intent, &request, Catalog::builtin(), &mock)
            .await
            .unwrap();
        blueprint
    }

    fn plan_for(blueprint: &PageBlueprint, kind: SectionType) -> SectionPlan {
        blueprint
            .section_sequence
            .iter()
            .find(|p| p.kind == kind)
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_testimonials_fallback_gets_three_default_items() {
        let intent = intent();
        let blueprint = blueprint(&intent).await;
        let plan = plan_for(&blueprint, SectionType::Testimonials);
        let ctx = GenerationContext::new(&blueprint, &intent, &[], 5);

        let mock = MockGenerator::new().push_text("{{{{ definitely broken");
        let (section, _) = SectionSkill::generate(&plan, &ctx, &mock).await.unwrap();

        let items = section.body.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Key Feature");
        assert_eq!(items[1].title, "Another Feature");
        assert_eq!(items[2].title, "Third Feature");
    }

    #[tokio::test]
    async fn test_palette_defaults_from_strategy() {
        let intent = intent();
        let blueprint = blueprint(&intent).await;
        let plan = plan_for(&blueprint, SectionType::Hero);
        let ctx = GenerationContext::new(&blueprint, &intent, &[], 0);

        let mock = MockGenerator::new()
            .push_text(r#"{"heading": "Ship updates fast", "cta_text": "Start Free Trial"}"#);
        let (section, _) = SectionSkill::generate(&plan, &ctx, &mock).await.unwrap();

        assert_eq!(
            section.palette.background_color,
            blueprint.color_strategy.background
        );
        assert_eq!(section.palette.accent_color, blueprint.color_strategy.accent);
    }

    #[tokio::test]
    async fn test_generated_colors_kept_when_valid() {
        let intent = intent();
        let blueprint = blueprint(&intent).await;
        let plan = plan_for(&blueprint, SectionType::Hero);
        let ctx = GenerationContext::new(&blueprint, &intent, &[], 0);

        let mock = MockGenerator::new().push_text(
            r##"{"heading": "Ship it", "cta_text": "Go", "background_color": "#123456",
                "text_color": "not-a-color"}"##,
        );
        let (section, _) = SectionSkill::generate(&plan, &ctx, &mock).await.unwrap();
        assert_eq!(section.palette.background_color, "#123456");
        assert_eq!(section.palette.text_color, blueprint.color_strategy.text);
    }

    #[tokio::test]
    async fn test_regenerate_retains_id_generate_does_not() {
        let intent = intent();
        let blueprint = blueprint(&intent).await;
        let plan = plan_for(&blueprint, SectionType::Hero);
        let ctx = GenerationContext::new(&blueprint, &intent, &[], 0);

        let mock = MockGenerator::new().with_exhausted_text(r#"{"heading": "A"}"#);
        let (first, _) = SectionSkill::generate(&plan, &ctx, &mock).await.unwrap();
        let (second, _) = SectionSkill::generate(&plan, &ctx, &mock).await.unwrap();
        assert_ne!(first.id, second.id);

        let (redone, _) = SectionSkill::regenerate(&first.id, &plan, &ctx, &mock)
            .await
            .unwrap();
        assert_eq!(redone.id, first.id);
    }

    #[tokio::test]
    async fn test_generate_all_preserves_count_under_parse_failures() {
        let intent = intent();
        let blueprint = blueprint(&intent).await;

        let mock = MockGenerator::new().with_exhausted_text("garbage every time");
        let mut progress = Vec::new();
        let (sections, usage) =
            SectionSkill::generate_all(&blueprint, &intent, &mock, |current, total| {
                progress.push((current, total))
            })
            .await
            .unwrap();

        assert_eq!(sections.len(), blueprint.section_sequence.len());
        assert_eq!(progress.len(), blueprint.section_sequence.len());
        assert_eq!(progress.last(), Some(&(10, 10)));
        assert!(usage.total() > 0);
        // Every list-type slot still has items
        for section in &sections {
            if section.kind.requires_items() {
                assert!(section.item_count() >= 1);
            }
        }
    }

    #[tokio::test]
    async fn test_previous_summary_threads_into_prompt() {
        let intent = intent();
        let blueprint = blueprint(&intent).await;

        let mock = MockGenerator::new()
            .push_text(r#"{"heading": "The Five Hour Problem", "body_text": "Updates eat a day."}"#)
            .with_exhausted_text(r#"{"heading": "Another"}"#);
        let (_, _) = SectionSkill::generate_all(&blueprint, &intent, &mock, |_, _| {})
            .await
            .unwrap();

        let second_request = mock.request(1).unwrap();
        assert!(second_request
            .user_message
            .contains("The Five Hour Problem"));
        let first_request = mock.request(0).unwrap();
        assert!(first_request
            .user_message
            .contains("first section of the page"));
    }

    #[tokio::test]
    async fn test_premium_tier_applies_effect_flags() {
        let mut intent = intent();
        intent.tone = Tone::Bold;
        intent.price_point = PricePoint::Premium;
        let blueprint = blueprint(&intent).await;
        let plan = plan_for(&blueprint, SectionType::Hero);
        assert!(plan.tier.has_effects(), "premium intent should pick an effect tier");

        let ctx = GenerationContext::new(&blueprint, &intent, &[], 0);
        let mock = MockGenerator::new().push_text(r#"{"heading": "Lux"}"#);
        let (section, _) = SectionSkill::generate(&plan, &ctx, &mock).await.unwrap();
        assert!(!section.styling.is_empty());
        for effect in &plan.effects {
            assert_eq!(section.styling.get(effect), Some(&json!(true)));
        }
    }
}
