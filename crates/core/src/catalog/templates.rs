//! # Template Pattern Catalog
//!
//! The known page archetypes. Each pattern carries a canonical section
//! flow, a preferred copy framework, and the conversion tactics that make
//! the archetype work. Matching is deterministic and total: direct id
//! match, then keyword-substring match against the pattern's industries,
//! then the first (SaaS) pattern.

use crate::catalog::frameworks::CopyFramework;
use crate::content::SectionType;
use crate::skills::intent_skill::ProductType;

/// One slot of a pattern's canonical flow.
pub struct SectionSlot {
    pub kind: SectionType,
    pub purpose: &'static str,
    pub variant: &'static str,
}

/// A known page archetype.
pub struct TemplatePattern {
    pub id: &'static str,
    pub industries: &'static [&'static str],
    pub copy_framework: CopyFramework,
    pub section_flow: &'static [SectionSlot],
    pub avg_sections: usize,
    pub conversion_tactics: &'static [&'static str],
}

macro_rules! slot {
    ($kind:ident, $purpose:literal, $variant:literal) => {
        SectionSlot {
            kind: SectionType::$kind,
            purpose: $purpose,
            variant: $variant,
        }
    };
}

// Order matters: the first pattern is the fallback, and keyword matching
// walks the list front to back.
pub(crate) const PATTERNS: &[TemplatePattern] = &[
    TemplatePattern {
        id: "saas",
        industries: &[
            "software", "saas", "app", "platform", "tool", "startup", "api", "b2b",
        ],
        copy_framework: CopyFramework::Aida,
        section_flow: &[
            slot!(Hero, "attention", "centered-spotlight"),
            slot!(Problem, "interest", "pain-points"),
            slot!(Solution, "desire", "outcome-statement"),
            slot!(Features, "desire", "icon-grid"),
            slot!(Stats, "proof", "counter-band"),
            slot!(Testimonials, "proof", "quote-wall"),
            slot!(Pricing, "action", "tier-columns"),
            slot!(Faq, "objections", "accordion"),
            slot!(Guarantee, "objections", "badge-strip"),
            slot!(Cta, "action", "banner"),
        ],
        avg_sections: 10,
        conversion_tactics: &[
            "free trial or freemium entry point",
            "social proof adjacent to pricing",
            "objection handling before the final ask",
        ],
    },
    TemplatePattern {
        id: "agency",
        industries: &[
            "agency", "consult", "marketing", "design", "studio", "freelance",
        ],
        copy_framework: CopyFramework::Aida,
        section_flow: &[
            slot!(Hero, "attention", "split-visual"),
            slot!(Features, "interest", "alternating-rows"),
            slot!(Process, "desire", "numbered-steps"),
            slot!(Testimonials, "proof", "spotlight"),
            slot!(Stats, "proof", "metric-cards"),
            slot!(About, "interest", "team-story"),
            slot!(Cta, "action", "boxed-gradient"),
        ],
        avg_sections: 7,
        conversion_tactics: &[
            "portfolio-grade visuals over copy volume",
            "named client results",
            "single consultation CTA repeated",
        ],
    },
    TemplatePattern {
        id: "course",
        industries: &[
            "course",
            "academy",
            "learn",
            "training",
            "bootcamp",
            "education",
            "masterclass",
        ],
        copy_framework: CopyFramework::Bab,
        section_flow: &[
            slot!(Hero, "attention", "centered-spotlight"),
            slot!(Problem, "interest", "pain-points"),
            slot!(Solution, "desire", "outcome-statement"),
            slot!(Process, "desire", "timeline"),
            slot!(About, "proof", "instructor-bio"),
            slot!(Testimonials, "proof", "carousel"),
            slot!(Pricing, "action", "tier-columns"),
            slot!(Faq, "objections", "accordion"),
            slot!(Urgency, "action", "deadline-bar"),
            slot!(Cta, "action", "banner"),
        ],
        avg_sections: 10,
        conversion_tactics: &[
            "instructor credibility before the pitch",
            "student transformation stories",
            "enrollment deadline",
        ],
    },
    TemplatePattern {
        id: "ecommerce",
        industries: &[
            "shop", "store", "product", "ecommerce", "retail", "merch", "brand",
        ],
        copy_framework: CopyFramework::Pas,
        section_flow: &[
            slot!(Hero, "attention", "split-visual"),
            slot!(Features, "desire", "bento-cards"),
            slot!(Benefits, "desire", "icon-grid"),
            slot!(Testimonials, "proof", "quote-wall"),
            slot!(Guarantee, "objections", "badge-strip"),
            slot!(Stats, "proof", "counter-band"),
            slot!(Faq, "objections", "two-column"),
            slot!(Cta, "action", "banner"),
        ],
        avg_sections: 8,
        conversion_tactics: &[
            "risk reversal near the buy button",
            "review volume as proof",
            "shipping and returns answered in FAQ",
        ],
    },
    TemplatePattern {
        id: "lead-magnet",
        industries: &[
            "ebook", "guide", "checklist", "whitepaper", "template", "free",
        ],
        copy_framework: CopyFramework::Aida,
        section_flow: &[
            slot!(Hero, "attention", "centered-spotlight"),
            slot!(Benefits, "interest", "icon-grid"),
            slot!(SocialProof, "proof", "logo-strip"),
            slot!(LeadCapture, "action", "inline-form"),
            slot!(Faq, "objections", "accordion"),
            slot!(Cta, "action", "banner"),
        ],
        avg_sections: 6,
        conversion_tactics: &[
            "single email field, nothing more",
            "instant-delivery promise",
            "what's-inside preview",
        ],
    },
    TemplatePattern {
        id: "webinar",
        industries: &["webinar", "workshop", "event", "live", "summit"],
        copy_framework: CopyFramework::Bab,
        section_flow: &[
            slot!(Hero, "attention", "centered-spotlight"),
            slot!(Benefits, "interest", "icon-grid"),
            slot!(About, "proof", "instructor-bio"),
            slot!(Testimonials, "proof", "carousel"),
            slot!(Urgency, "action", "deadline-bar"),
            slot!(LeadCapture, "action", "inline-form"),
        ],
        avg_sections: 6,
        conversion_tactics: &[
            "date-and-time anchoring",
            "what-you-will-learn bullets",
            "seats-limited scarcity",
        ],
    },
    TemplatePattern {
        id: "sales-funnel",
        industries: &["funnel", "offer", "launch", "sales"],
        copy_framework: CopyFramework::Pas,
        section_flow: &[
            slot!(Hero, "attention", "centered-spotlight"),
            slot!(Problem, "interest", "pain-points"),
            slot!(Solution, "desire", "outcome-statement"),
            slot!(Benefits, "desire", "icon-grid"),
            slot!(Testimonials, "proof", "spotlight"),
            slot!(Pricing, "action", "comparison-table"),
            slot!(Guarantee, "objections", "badge-strip"),
            slot!(Urgency, "action", "deadline-bar"),
            slot!(Faq, "objections", "accordion"),
            slot!(Cta, "action", "boxed-gradient"),
        ],
        avg_sections: 10,
        conversion_tactics: &[
            "long-form single-path page",
            "stacked value before price reveal",
            "guarantee immediately after price",
        ],
    },
    TemplatePattern {
        id: "local-service",
        industries: &[
            "local", "restaurant", "salon", "clinic", "repair", "plumb", "dental", "gym",
        ],
        copy_framework: CopyFramework::Aida,
        section_flow: &[
            slot!(Hero, "attention", "split-visual"),
            slot!(Features, "interest", "icon-grid"),
            slot!(About, "interest", "team-story"),
            slot!(Testimonials, "proof", "quote-wall"),
            slot!(Process, "desire", "numbered-steps"),
            slot!(Contact, "action", "map-form"),
        ],
        avg_sections: 6,
        conversion_tactics: &[
            "phone number above the fold",
            "neighborhood name in the headline",
            "booking form over generic contact",
        ],
    },
    TemplatePattern {
        id: "coaching",
        industries: &["coach", "coaching", "mentor", "consulting", "advisor"],
        copy_framework: CopyFramework::Bab,
        section_flow: &[
            slot!(Hero, "attention", "centered-spotlight"),
            slot!(Problem, "interest", "pain-points"),
            slot!(Solution, "desire", "outcome-statement"),
            slot!(About, "proof", "instructor-bio"),
            slot!(Testimonials, "proof", "spotlight"),
            slot!(Process, "desire", "timeline"),
            slot!(Pricing, "action", "tier-columns"),
            slot!(Cta, "action", "boxed-gradient"),
        ],
        avg_sections: 8,
        conversion_tactics: &[
            "personal story before methodology",
            "application or discovery-call CTA",
            "client outcome specifics",
        ],
    },
];

/// Match an intent to a template pattern.
///
/// Deterministic and total over `(product_type, keywords)`: a direct id
/// match wins; otherwise the first pattern with any industry term that
/// substring-matches a keyword (either direction); otherwise the first
/// pattern in the table.
pub fn match_pattern(product_type: ProductType, keywords: &[String]) -> &'static TemplatePattern {
    if let Some(pattern) = PATTERNS.iter().find(|p| p.id == product_type.as_str()) {
        return pattern;
    }

    let lowered: Vec<String> = keywords.iter().map(|k| k.trim().to_lowercase()).collect();
    for pattern in PATTERNS {
        for industry in pattern.industries {
            if lowered
                .iter()
                .any(|k| !k.is_empty() && (k.contains(industry) || industry.contains(k.as_str())))
            {
                return pattern;
            }
        }
    }

    &PATTERNS[0]
}
