//! # Intent Skill
//!
//! First phase of the pipeline: one generator call that converts a
//! free-text product description (plus optional wizard hints) into a
//! normalized `PageIntent`. This skill cannot fail the pipeline: malformed
//! generator output takes a deterministic default-filled fallback, and
//! wizard hints always override whatever the generator inferred.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::generator::{GenerationRequest, GeneratorError, TextGenerator, TokenUsage};
use crate::pipeline::WizardData;
use crate::skills::decode::decode_object;
use crate::skills::prompts;

/// What kind of product the page sells. Doubles as the direct key into the
/// template pattern catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    #[default]
    General,
    Saas,
    Ecommerce,
    Course,
    Coaching,
    Agency,
    LocalService,
    Webinar,
    LeadMagnet,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::General => "general",
            ProductType::Saas => "saas",
            ProductType::Ecommerce => "ecommerce",
            ProductType::Course => "course",
            ProductType::Coaching => "coaching",
            ProductType::Agency => "agency",
            ProductType::LocalService => "local-service",
            ProductType::Webinar => "webinar",
            ProductType::LeadMagnet => "lead-magnet",
        }
    }

    fn parse_loose(raw: &str) -> Option<ProductType> {
        let normalized = raw.trim().to_lowercase().replace([' ', '_'], "-");
        let value = match normalized.as_str() {
            "general" => ProductType::General,
            "saas" | "software" | "app" => ProductType::Saas,
            "ecommerce" | "e-commerce" | "store" | "shop" => ProductType::Ecommerce,
            "course" | "education" => ProductType::Course,
            "coaching" | "consulting" => ProductType::Coaching,
            "agency" | "portfolio" | "services" => ProductType::Agency,
            "local-service" | "local" | "local-business" => ProductType::LocalService,
            "webinar" | "event" | "workshop" => ProductType::Webinar,
            "lead-magnet" | "leadmagnet" | "ebook" | "opt-in" => ProductType::LeadMagnet,
            _ => return None,
        };
        Some(value)
    }
}

/// Voice of the copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Bold,
    Luxury,
    Playful,
    Minimal,
}

impl Tone {
    fn parse_loose(raw: &str) -> Option<Tone> {
        let value = match raw.trim().to_lowercase().as_str() {
            "professional" => Tone::Professional,
            "friendly" => Tone::Friendly,
            "bold" => Tone::Bold,
            "luxury" => Tone::Luxury,
            "playful" => Tone::Playful,
            "minimal" => Tone::Minimal,
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl UrgencyLevel {
    fn parse_loose(raw: &str) -> Option<UrgencyLevel> {
        let value = match raw.trim().to_lowercase().as_str() {
            "low" => UrgencyLevel::Low,
            "medium" | "normal" => UrgencyLevel::Medium,
            "high" | "urgent" => UrgencyLevel::High,
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePoint {
    Free,
    Budget,
    #[default]
    Mid,
    Premium,
    Enterprise,
}

impl PricePoint {
    fn parse_loose(raw: &str) -> Option<PricePoint> {
        let value = match raw.trim().to_lowercase().as_str() {
            "free" => PricePoint::Free,
            "budget" | "low" | "cheap" => PricePoint::Budget,
            "mid" | "medium" | "mid-range" => PricePoint::Mid,
            "premium" | "high" => PricePoint::Premium,
            "enterprise" => PricePoint::Enterprise,
            _ => return None,
        };
        Some(value)
    }
}

/// Normalized understanding of the request. Created once, immutable
/// afterward, consumed by every later phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageIntent {
    pub product_type: ProductType,
    pub target_audience: String,
    pub primary_value_prop: String,
    pub secondary_value_props: Vec<String>,
    pub tone: Tone,
    pub urgency_level: UrgencyLevel,
    pub price_point: PricePoint,
    pub keywords: Vec<String>,
}

/// Wire shape the generator is asked to produce. Everything optional:
/// normalization fills the gaps.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
struct RawIntent {
    product_type: Option<String>,
    target_audience: Option<String>,
    primary_value_prop: Option<String>,
    secondary_value_props: Vec<String>,
    tone: Option<String>,
    urgency_level: Option<String>,
    price_point: Option<String>,
    keywords: Vec<String>,
}

/// Intent skill: description + hints in, `PageIntent` out, exactly one
/// generator call.
pub struct IntentSkill;

impl IntentSkill {
    /// Run intent extraction. Only transport failures propagate; parse
    /// failures fall back deterministically.
    pub async fn run(
        description: &str,
        wizard: Option<&WizardData>,
        generator: &dyn TextGenerator,
    ) -> Result<(PageIntent, TokenUsage), GeneratorError> {
        let request = GenerationRequest::new(Self::system_prompt(), Self::user_message(description, wizard))
            .with_max_tokens(1024)
            .with_temperature(0.3);

        let response = generator.generate(&request).await?;

        let mut intent = match decode_object::<RawIntent>(&response.text) {
            Ok(raw) => Self::normalize(raw, description, wizard),
            Err(err) => {
                tracing::warn!("intent parse failed, using fallback: {}", err);
                Self::fallback_intent(description, wizard)
            }
        };
        Self::apply_wizard_overrides(&mut intent, wizard);

        Ok((intent, response.usage))
    }

    fn system_prompt() -> String {
        let schema = schema_for!(RawIntent);
        format!(
            "{}\n\n## Schema\n\n```json\n{}\n```",
            prompts::INTENT,
            serde_json::to_string_pretty(&schema).unwrap_or_default()
        )
    }

    fn user_message(description: &str, wizard: Option<&WizardData>) -> String {
        let mut message = format!("Product description:\n{}", description.trim());
        if let Some(wizard) = wizard {
            let mut hints = Vec::new();
            if let Some(name) = &wizard.business_name {
                hints.push(format!("business name: {}", name));
            }
            if let Some(audience) = &wizard.target_audience {
                hints.push(format!("target audience: {}", audience));
            }
            if let Some(vibe) = &wizard.vibe {
                hints.push(format!("requested vibe: {}", vibe));
            }
            if let Some(page_type) = &wizard.page_type {
                hints.push(format!("page type: {}", page_type));
            }
            if !hints.is_empty() {
                message.push_str("\n\nWizard hints:\n");
                message.push_str(&hints.join("\n"));
            }
        }
        message
    }

    fn normalize(raw: RawIntent, description: &str, wizard: Option<&WizardData>) -> PageIntent {
        let fallback_audience = || {
            wizard
                .and_then(|w| w.target_audience.clone())
                .unwrap_or_else(|| "general audience".to_string())
        };
        let keywords = {
            let cleaned: Vec<String> = raw
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if cleaned.is_empty() {
                derive_keywords(description)
            } else {
                cleaned
            }
        };

        PageIntent {
            product_type: raw
                .product_type
                .as_deref()
                .and_then(ProductType::parse_loose)
                .unwrap_or_default(),
            target_audience: raw
                .target_audience
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(fallback_audience),
            primary_value_prop: raw
                .primary_value_prop
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default_value_prop(description)),
            secondary_value_props: raw
                .secondary_value_props
                .into_iter()
                .filter(|v| !v.trim().is_empty())
                .take(4)
                .collect(),
            tone: raw
                .tone
                .as_deref()
                .and_then(Tone::parse_loose)
                .unwrap_or_default(),
            urgency_level: raw
                .urgency_level
                .as_deref()
                .and_then(UrgencyLevel::parse_loose)
                .unwrap_or_default(),
            price_point: raw
                .price_point
                .as_deref()
                .and_then(PricePoint::parse_loose)
                .unwrap_or_default(),
            keywords,
        }
    }

    /// Deterministic default-filled intent for unparseable generator
    /// output. Every field populated, nothing left for later phases to
    /// trip on.
    pub fn fallback_intent(description: &str, wizard: Option<&WizardData>) -> PageIntent {
        PageIntent {
            product_type: ProductType::General,
            target_audience: wizard
                .and_then(|w| w.target_audience.clone())
                .unwrap_or_else(|| "general audience".to_string()),
            primary_value_prop: default_value_prop(description),
            secondary_value_props: Vec::new(),
            tone: Tone::Professional,
            urgency_level: UrgencyLevel::Medium,
            price_point: PricePoint::Mid,
            keywords: derive_keywords(description),
        }
    }

    /// Wizard hints win over generator inference, via fixed lookup tables.
    fn apply_wizard_overrides(intent: &mut PageIntent, wizard: Option<&WizardData>) {
        let Some(wizard) = wizard else { return };
        if let Some(tone) = wizard.vibe.as_deref().and_then(tone_for_vibe) {
            intent.tone = tone;
        }
        if let Some(product_type) = wizard
            .page_type
            .as_deref()
            .and_then(product_type_for_page_type)
        {
            intent.product_type = product_type;
        }
    }
}

/// Fixed vibe-to-tone lookup. Unknown vibes override nothing.
fn tone_for_vibe(vibe: &str) -> Option<Tone> {
    let tone = match vibe.trim().to_lowercase().as_str() {
        "professional" | "corporate" | "serious" => Tone::Professional,
        "friendly" | "warm" | "approachable" => Tone::Friendly,
        "bold" | "edgy" | "confident" => Tone::Bold,
        "luxury" | "elegant" | "premium" => Tone::Luxury,
        "playful" | "fun" | "quirky" => Tone::Playful,
        "minimal" | "clean" | "simple" => Tone::Minimal,
        _ => return None,
    };
    Some(tone)
}

/// Fixed page-type-to-product-type lookup. Unknown page types override
/// nothing.
fn product_type_for_page_type(page_type: &str) -> Option<ProductType> {
    let normalized = page_type.trim().to_lowercase().replace([' ', '_'], "-");
    let product_type = match normalized.as_str() {
        "saas" | "software" => ProductType::Saas,
        "ecommerce" | "e-commerce" | "product" => ProductType::Ecommerce,
        "course" => ProductType::Course,
        // Sales funnel pages run on the course archetype's long-form arc.
        "sales-funnel" | "funnel" => ProductType::Course,
        "coaching" => ProductType::Coaching,
        "agency" | "portfolio" => ProductType::Agency,
        "local-service" | "local-business" => ProductType::LocalService,
        "webinar" | "event" => ProductType::Webinar,
        "lead-magnet" | "opt-in" => ProductType::LeadMagnet,
        _ => return None,
    };
    Some(product_type)
}

fn default_value_prop(description: &str) -> String {
    let cleaned = description.trim().replace('\n', " ");
    if cleaned.is_empty() {
        return "A better way to get results".to_string();
    }
    let first_sentence = cleaned
        .split(['.', '!', '?'])
        .next()
        .unwrap_or(&cleaned)
        .trim()
        .to_string();
    if first_sentence.chars().count() > 120 {
        let truncated: String = first_sentence.chars().take(117).collect();
        format!("{}...", truncated)
    } else {
        first_sentence
    }
}

const STOPWORDS: &[&str] = &[
    "that", "this", "with", "from", "your", "their", "have", "will", "them", "they", "into",
    "about", "which", "when", "what", "where", "makes", "more", "than", "then", "very",
];

fn derive_keywords(description: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for word in description.split_whitespace() {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if cleaned.len() < 4 || STOPWORDS.contains(&cleaned.as_str()) {
            continue;
        }
        if !seen.contains(&cleaned) {
            seen.push(cleaned);
        }
        if seen.len() == 8 {
            break;
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::mock::MockGenerator;

    fn wizard(vibe: Option<&str>, page_type: Option<&str>) -> WizardData {
        WizardData {
            business_name: None,
            product_description: None,
            target_audience: None,
            color_theme: None,
            vibe: vibe.map(String::from),
            font_pair: None,
            page_type: page_type.map(String::from),
        }
    }

    #[test]
    fn test_fallback_intent_fully_populated() {
        let intent = IntentSkill::fallback_intent("", None);
        assert_eq!(intent.product_type, ProductType::General);
        assert_eq!(intent.tone, Tone::Professional);
        assert_eq!(intent.urgency_level, UrgencyLevel::Medium);
        assert_eq!(intent.price_point, PricePoint::Mid);
        assert!(!intent.target_audience.is_empty());
        assert!(!intent.primary_value_prop.is_empty());
    }

    #[test]
    fn test_derive_keywords_skips_stopwords_and_dupes() {
        let keywords = derive_keywords("An email tool that sends email campaigns with your data");
        assert!(keywords.contains(&"email".to_string()));
        assert!(!keywords.contains(&"that".to_string()));
        assert_eq!(
            keywords.iter().filter(|k| *k == "email").count(),
            1,
            "keywords must be deduplicated"
        );
    }

    #[test]
    fn test_sales_funnel_page_type_forces_course() {
        let mut intent = IntentSkill::fallback_intent("a big launch", None);
        intent.product_type = ProductType::Saas;
        IntentSkill::apply_wizard_overrides(&mut intent, Some(&wizard(None, Some("sales-funnel"))));
        assert_eq!(intent.product_type, ProductType::Course);
    }

    #[test]
    fn test_vibe_override_wins_over_inference() {
        let mut intent = IntentSkill::fallback_intent("desc", None);
        intent.tone = Tone::Bold;
        IntentSkill::apply_wizard_overrides(&mut intent, Some(&wizard(Some("elegant"), None)));
        assert_eq!(intent.tone, Tone::Luxury);

        // Unknown vibes leave the inferred tone alone
        let mut intent = IntentSkill::fallback_intent("desc", None);
        intent.tone = Tone::Bold;
        IntentSkill::apply_wizard_overrides(&mut intent, Some(&wizard(Some("zzz"), None)));
        assert_eq!(intent.tone, Tone::Bold);
    }

    #[tokio::test]
    async fn test_run_parses_generator_output() {
        let mock = MockGenerator::new().push_text(
            r#"{"product_type": "saas", "target_audience": "founders",
                "primary_value_prop": "Write investor updates in minutes",
                "tone": "professional", "urgency_level": "low",
                "price_point": "mid", "keywords": ["email", "founders"]}"#,
        );
        let (intent, usage) = IntentSkill::run("AI email tool for founders", None, &mock)
            .await
            .unwrap();
        assert_eq!(intent.product_type, ProductType::Saas);
        assert_eq!(intent.target_audience, "founders");
        assert_eq!(intent.urgency_level, UrgencyLevel::Low);
        assert!(usage.total() > 0);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_falls_back_on_garbage() {
        let mock = MockGenerator::new().push_text("I am not JSON at all");
        let (intent, _) = IntentSkill::run("AI email tool for founders", None, &mock)
            .await
            .unwrap();
        assert_eq!(intent.product_type, ProductType::General);
        assert_eq!(intent.tone, Tone::Professional);
        assert!(intent.keywords.contains(&"email".to_string()));
    }

    #[tokio::test]
    async fn test_run_applies_overrides_after_parse() {
        let mock = MockGenerator::new()
            .push_text(r#"{"product_type": "saas", "tone": "bold"}"#);
        let hints = wizard(Some("minimal"), Some("sales-funnel"));
        let (intent, _) = IntentSkill::run("launch offer", Some(&hints), &mock)
            .await
            .unwrap();
        assert_eq!(intent.product_type, ProductType::Course);
        assert_eq!(intent.tone, Tone::Minimal);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mock = MockGenerator::new();
        let result = IntentSkill::run("anything", None, &mock).await;
        assert!(result.is_err());
    }
}
