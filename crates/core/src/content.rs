//! # Page Content Model
//!
//! The renderable output of the pipeline: a `LandingPage` made of typed
//! `PageSection`s. Section content is a tagged union keyed by section type,
//! with a generic `styling` side-map for premium effect flags so visual
//! extras never leak into the content fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::themes::{ColorStrategy, Typography};

/// Every section archetype the planner can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Hero,
    Problem,
    Solution,
    Features,
    Benefits,
    Testimonials,
    SocialProof,
    Pricing,
    Faq,
    Stats,
    Process,
    About,
    Guarantee,
    Urgency,
    LeadCapture,
    Video,
    Contact,
    Cta,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Problem => "problem",
            SectionType::Solution => "solution",
            SectionType::Features => "features",
            SectionType::Benefits => "benefits",
            SectionType::Testimonials => "testimonials",
            SectionType::SocialProof => "social-proof",
            SectionType::Pricing => "pricing",
            SectionType::Faq => "faq",
            SectionType::Stats => "stats",
            SectionType::Process => "process",
            SectionType::About => "about",
            SectionType::Guarantee => "guarantee",
            SectionType::Urgency => "urgency",
            SectionType::LeadCapture => "lead-capture",
            SectionType::Video => "video",
            SectionType::Contact => "contact",
            SectionType::Cta => "cta",
        }
    }

    /// Tolerant parsing for generator output, which names section types
    /// freely ("call-to-action", "FAQs", "social proof").
    pub fn parse_loose(raw: &str) -> Option<SectionType> {
        let normalized = raw.trim().to_lowercase().replace([' ', '_'], "-");
        let kind = match normalized.as_str() {
            "hero" | "header" | "above-the-fold" => SectionType::Hero,
            "problem" | "pain" | "pain-points" => SectionType::Problem,
            "solution" | "transformation" => SectionType::Solution,
            "features" | "feature" | "feature-grid" | "services" => SectionType::Features,
            "benefits" | "benefit" | "value" | "outcomes" => SectionType::Benefits,
            "testimonials" | "testimonial" | "reviews" | "quotes" => SectionType::Testimonials,
            "social-proof" | "logos" | "trust" | "trust-badges" => SectionType::SocialProof,
            "pricing" | "plans" | "tiers" => SectionType::Pricing,
            "faq" | "faqs" | "questions" => SectionType::Faq,
            "stats" | "statistics" | "metrics" | "numbers" => SectionType::Stats,
            "process" | "how-it-works" | "steps" | "curriculum" => SectionType::Process,
            "about" | "team" | "instructor" | "host" | "story" => SectionType::About,
            "guarantee" | "risk-reversal" | "refund" => SectionType::Guarantee,
            "urgency" | "scarcity" | "countdown" | "deadline" => SectionType::Urgency,
            "lead-capture" | "optin" | "opt-in" | "signup-form" | "newsletter" => {
                SectionType::LeadCapture
            }
            "video" | "demo" | "vsl" => SectionType::Video,
            "contact" | "contact-form" | "location" => SectionType::Contact,
            "cta" | "call-to-action" | "final-cta" | "closing" => SectionType::Cta,
            _ => return None,
        };
        Some(kind)
    }

    /// Section types that are broken without at least one item.
    pub fn requires_items(&self) -> bool {
        matches!(
            self,
            SectionType::Features
                | SectionType::Testimonials
                | SectionType::Pricing
                | SectionType::Faq
                | SectionType::Stats
                | SectionType::Process
        )
    }
}

/// A clickable action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl CallToAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: None,
        }
    }
}

/// One entry of a list-type section: a feature card, a testimonial, a
/// pricing tier, an FAQ pair, a stat, a process step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
}

/// Typed section content, keyed by what the section is for.
///
/// `ItemGrid` covers every list-type section (features, testimonials,
/// pricing, faq, stats, process, benefits, social proof); `Narrative`
/// covers long-copy sections; `Conversion` covers form/CTA sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SectionBody {
    Hero {
        heading: String,
        #[serde(default)]
        subheading: Option<String>,
        cta: CallToAction,
        #[serde(default)]
        secondary_cta: Option<CallToAction>,
    },
    ItemGrid {
        heading: String,
        #[serde(default)]
        subheading: Option<String>,
        items: Vec<SectionItem>,
    },
    Narrative {
        heading: String,
        body_text: String,
        #[serde(default)]
        cta: Option<CallToAction>,
    },
    Conversion {
        heading: String,
        #[serde(default)]
        subheading: Option<String>,
        cta: CallToAction,
        #[serde(default)]
        bullet_points: Vec<String>,
    },
}

impl SectionBody {
    pub fn heading(&self) -> &str {
        match self {
            SectionBody::Hero { heading, .. }
            | SectionBody::ItemGrid { heading, .. }
            | SectionBody::Narrative { heading, .. }
            | SectionBody::Conversion { heading, .. } => heading,
        }
    }

    pub fn subheading(&self) -> Option<&str> {
        match self {
            SectionBody::Hero { subheading, .. }
            | SectionBody::ItemGrid { subheading, .. }
            | SectionBody::Conversion { subheading, .. } => subheading.as_deref(),
            SectionBody::Narrative { .. } => None,
        }
    }

    pub fn body_text(&self) -> Option<&str> {
        match self {
            SectionBody::Narrative { body_text, .. } => Some(body_text),
            _ => None,
        }
    }

    pub fn cta(&self) -> Option<&CallToAction> {
        match self {
            SectionBody::Hero { cta, .. } | SectionBody::Conversion { cta, .. } => Some(cta),
            SectionBody::Narrative { cta, .. } => cta.as_ref(),
            SectionBody::ItemGrid { .. } => None,
        }
    }

    pub fn items(&self) -> &[SectionItem] {
        match self {
            SectionBody::ItemGrid { items, .. } => items,
            _ => &[],
        }
    }
}

/// The three color slots every rendered section carries, always populated
/// from the blueprint's `ColorStrategy` when the generator omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPalette {
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
}

impl SectionPalette {
    pub fn from_strategy(strategy: &ColorStrategy) -> Self {
        Self {
            background_color: strategy.background.clone(),
            text_color: strategy.text.clone(),
            accent_color: strategy.accent.clone(),
        }
    }
}

/// One generated, renderable section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    pub id: String,
    pub kind: SectionType,
    pub body: SectionBody,
    pub palette: SectionPalette,
    /// Variant key chosen by the planner (e.g. "split-visual").
    pub variant: String,
    /// Premium effect flags and other renderer hints. Kept out of the
    /// content fields on purpose.
    #[serde(default)]
    pub styling: BTreeMap<String, serde_json::Value>,
}

impl PageSection {
    /// Count of list items, zero for non-list bodies.
    pub fn item_count(&self) -> usize {
        self.body.items().len()
    }
}

/// The persisted/rendered page shape handed to the editor and storage
/// layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingPage {
    pub title: String,
    pub description: String,
    pub sections: Vec<PageSection>,
    pub color_scheme: ColorStrategy,
    pub typography: Typography,
    pub smooth_scroll: bool,
    pub animation_preset: String,
    pub content_width: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loose_aliases() {
        assert_eq!(
            SectionType::parse_loose("Call To Action"),
            Some(SectionType::Cta)
        );
        assert_eq!(SectionType::parse_loose("FAQs"), Some(SectionType::Faq));
        assert_eq!(
            SectionType::parse_loose("how_it_works"),
            Some(SectionType::Process)
        );
        assert_eq!(SectionType::parse_loose("sidebar"), None);
    }

    #[test]
    fn test_requires_items() {
        assert!(SectionType::Testimonials.requires_items());
        assert!(SectionType::Pricing.requires_items());
        assert!(!SectionType::Hero.requires_items());
        assert!(!SectionType::Cta.requires_items());
    }

    #[test]
    fn test_body_accessors() {
        let body = SectionBody::Hero {
            heading: "Launch faster".to_string(),
            subheading: Some("Ship in days".to_string()),
            cta: CallToAction::new("Start Free Trial"),
            secondary_cta: None,
        };
        assert_eq!(body.heading(), "Launch faster");
        assert_eq!(body.subheading(), Some("Ship in days"));
        assert_eq!(body.cta().unwrap().label, "Start Free Trial");
        assert!(body.items().is_empty());

        let grid = SectionBody::ItemGrid {
            heading: "Features".to_string(),
            subheading: None,
            items: vec![SectionItem {
                title: "Fast".to_string(),
                ..Default::default()
            }],
        };
        assert_eq!(grid.items().len(), 1);
        assert!(grid.cta().is_none());
    }

    #[test]
    fn test_section_type_round_trip() {
        let json = serde_json::to_string(&SectionType::LeadCapture).unwrap();
        assert_eq!(json, "\"lead-capture\"");
        let back: SectionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SectionType::LeadCapture);
    }
}
