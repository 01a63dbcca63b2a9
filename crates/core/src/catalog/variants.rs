//! # Variant Selector
//!
//! Scores the candidate visual/content variants for a section type against
//! the product intent, the requested vibe, and the chosen copy framework.
//! Selection is deterministic: strictly higher score wins, first entry wins
//! ties.

use serde::{Deserialize, Serialize};

use crate::catalog::frameworks::CopyFramework;
use crate::content::SectionType;
use crate::skills::intent_skill::{PageIntent, PricePoint, Tone};

/// Visual-richness classification of a variant. Controls which effects the
/// section generator turns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Standard,
    Premium,
    Advanced,
}

impl Tier {
    /// Premium and advanced tiers carry effect flags into the section.
    pub fn has_effects(&self) -> bool {
        matches!(self, Tier::Premium | Tier::Advanced)
    }
}

/// The selector's output for one planned section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantChoice {
    pub key: String,
    pub tier: Tier,
    pub effects: Vec<String>,
}

pub(crate) struct VariantOption {
    pub key: &'static str,
    pub tier: Tier,
    pub tones: &'static [Tone],
    pub frameworks: &'static [CopyFramework],
    pub vibes: &'static [&'static str],
    pub effects: &'static [&'static str],
}

const HERO_VARIANTS: &[VariantOption] = &[
    VariantOption {
        key: "centered-spotlight",
        tier: Tier::Standard,
        tones: &[Tone::Professional, Tone::Minimal],
        frameworks: &[CopyFramework::Aida],
        vibes: &["clean", "minimal", "professional"],
        effects: &[],
    },
    VariantOption {
        key: "split-visual",
        tier: Tier::Premium,
        tones: &[Tone::Friendly, Tone::Professional],
        frameworks: &[CopyFramework::Pas],
        vibes: &["modern", "warm", "friendly"],
        effects: &["parallax"],
    },
    VariantOption {
        key: "gradient-immersive",
        tier: Tier::Advanced,
        tones: &[Tone::Bold, Tone::Luxury, Tone::Playful],
        frameworks: &[CopyFramework::Bab],
        vibes: &["bold", "luxury", "futuristic", "playful"],
        effects: &["gradient-mesh", "particles"],
    },
];

const FEATURES_VARIANTS: &[VariantOption] = &[
    VariantOption {
        key: "icon-grid",
        tier: Tier::Standard,
        tones: &[Tone::Professional, Tone::Minimal, Tone::Friendly],
        frameworks: &[CopyFramework::Aida, CopyFramework::Pas],
        vibes: &["clean", "minimal"],
        effects: &[],
    },
    VariantOption {
        key: "alternating-rows",
        tier: Tier::Premium,
        tones: &[Tone::Professional, Tone::Luxury],
        frameworks: &[CopyFramework::Bab],
        vibes: &["elegant", "editorial"],
        effects: &["scroll-reveal"],
    },
    VariantOption {
        key: "bento-cards",
        tier: Tier::Advanced,
        tones: &[Tone::Bold, Tone::Playful],
        frameworks: &[CopyFramework::Aida],
        vibes: &["bold", "modern", "playful"],
        effects: &["hover-tilt", "glassmorphism"],
    },
];

const TESTIMONIAL_VARIANTS: &[VariantOption] = &[
    VariantOption {
        key: "quote-wall",
        tier: Tier::Standard,
        tones: &[Tone::Professional, Tone::Friendly],
        frameworks: &[CopyFramework::Aida, CopyFramework::Pas],
        vibes: &["clean"],
        effects: &[],
    },
    VariantOption {
        key: "carousel",
        tier: Tier::Premium,
        tones: &[Tone::Friendly, Tone::Playful],
        frameworks: &[CopyFramework::Bab],
        vibes: &["warm", "friendly"],
        effects: &["auto-scroll"],
    },
    VariantOption {
        key: "spotlight",
        tier: Tier::Premium,
        tones: &[Tone::Luxury, Tone::Bold],
        frameworks: &[CopyFramework::Bab, CopyFramework::Pas],
        vibes: &["luxury", "bold"],
        effects: &["scroll-reveal"],
    },
];

const PRICING_VARIANTS: &[VariantOption] = &[
    VariantOption {
        key: "tier-columns",
        tier: Tier::Standard,
        tones: &[Tone::Professional, Tone::Minimal, Tone::Friendly],
        frameworks: &[CopyFramework::Aida, CopyFramework::Bab],
        vibes: &["clean"],
        effects: &[],
    },
    VariantOption {
        key: "comparison-table",
        tier: Tier::Premium,
        tones: &[Tone::Professional, Tone::Bold],
        frameworks: &[CopyFramework::Pas],
        vibes: &["detailed"],
        effects: &["highlight-column"],
    },
];

const FAQ_VARIANTS: &[VariantOption] = &[
    VariantOption {
        key: "accordion",
        tier: Tier::Standard,
        tones: &[Tone::Professional, Tone::Friendly, Tone::Minimal],
        frameworks: &[CopyFramework::Aida, CopyFramework::Pas, CopyFramework::Bab],
        vibes: &["clean"],
        effects: &[],
    },
    VariantOption {
        key: "two-column",
        tier: Tier::Standard,
        tones: &[Tone::Minimal],
        frameworks: &[CopyFramework::Aida],
        vibes: &["minimal", "editorial"],
        effects: &[],
    },
];

const STATS_VARIANTS: &[VariantOption] = &[
    VariantOption {
        key: "counter-band",
        tier: Tier::Premium,
        tones: &[Tone::Professional, Tone::Bold],
        frameworks: &[CopyFramework::Aida, CopyFramework::Pas],
        vibes: &["modern"],
        effects: &["count-up"],
    },
    VariantOption {
        key: "metric-cards",
        tier: Tier::Standard,
        tones: &[Tone::Minimal, Tone::Professional],
        frameworks: &[CopyFramework::Bab],
        vibes: &["clean", "minimal"],
        effects: &[],
    },
];

const PROCESS_VARIANTS: &[VariantOption] = &[
    VariantOption {
        key: "numbered-steps",
        tier: Tier::Standard,
        tones: &[Tone::Professional, Tone::Friendly, Tone::Minimal],
        frameworks: &[CopyFramework::Aida, CopyFramework::Pas],
        vibes: &["clean"],
        effects: &[],
    },
    VariantOption {
        key: "timeline",
        tier: Tier::Premium,
        tones: &[Tone::Luxury, Tone::Bold],
        frameworks: &[CopyFramework::Bab],
        vibes: &["elegant", "editorial"],
        effects: &["scroll-reveal"],
    },
];

const CTA_VARIANTS: &[VariantOption] = &[
    VariantOption {
        key: "banner",
        tier: Tier::Standard,
        tones: &[Tone::Professional, Tone::Minimal, Tone::Friendly],
        frameworks: &[CopyFramework::Aida, CopyFramework::Pas],
        vibes: &["clean"],
        effects: &[],
    },
    VariantOption {
        key: "boxed-gradient",
        tier: Tier::Premium,
        tones: &[Tone::Bold, Tone::Luxury, Tone::Playful],
        frameworks: &[CopyFramework::Bab],
        vibes: &["bold", "luxury", "modern"],
        effects: &["gradient-mesh"],
    },
];

// Single-variant table for section types without meaningful visual
// alternatives.
const DEFAULT_VARIANTS: &[VariantOption] = &[VariantOption {
    key: "standard",
    tier: Tier::Standard,
    tones: &[],
    frameworks: &[],
    vibes: &[],
    effects: &[],
}];

pub(crate) fn variants_for(kind: SectionType) -> &'static [VariantOption] {
    match kind {
        SectionType::Hero => HERO_VARIANTS,
        SectionType::Features | SectionType::Benefits => FEATURES_VARIANTS,
        SectionType::Testimonials | SectionType::SocialProof => TESTIMONIAL_VARIANTS,
        SectionType::Pricing => PRICING_VARIANTS,
        SectionType::Faq => FAQ_VARIANTS,
        SectionType::Stats => STATS_VARIANTS,
        SectionType::Process => PROCESS_VARIANTS,
        SectionType::Cta | SectionType::LeadCapture => CTA_VARIANTS,
        _ => DEFAULT_VARIANTS,
    }
}

/// Pick the best-scoring variant for a section type.
///
/// Scoring: +3 tone match, +2 framework affinity, +2 vibe substring match,
/// +2 premium/advanced tier when the price point supports it, +1 standard
/// tier for free/budget offers. First entry wins ties.
pub fn select_variant(
    kind: SectionType,
    intent: &PageIntent,
    vibe: Option<&str>,
    framework: CopyFramework,
) -> VariantChoice {
    let vibe_lower = vibe.map(|v| v.trim().to_lowercase());
    let options = variants_for(kind);

    let mut best = &options[0];
    let mut best_score = i32::MIN;
    for option in options {
        let mut score = 0;
        if option.tones.contains(&intent.tone) {
            score += 3;
        }
        if option.frameworks.contains(&framework) {
            score += 2;
        }
        if let Some(vibe) = &vibe_lower {
            if option.vibes.iter().any(|v| vibe.contains(v)) {
                score += 2;
            }
        }
        match (option.tier, intent.price_point) {
            (Tier::Premium | Tier::Advanced, PricePoint::Premium | PricePoint::Enterprise) => {
                score += 2
            }
            (Tier::Standard, PricePoint::Free | PricePoint::Budget) => score += 1,
            _ => {}
        }
        if score > best_score {
            best = option;
            best_score = score;
        }
    }

    VariantChoice {
        key: best.key.to_string(),
        tier: best.tier,
        effects: best.effects.iter().map(|e| e.to_string()).collect(),
    }
}
