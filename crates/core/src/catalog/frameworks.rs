//! # Copy Framework Catalog
//!
//! Static definitions of the three copywriting frameworks the planner can
//! choose from, plus the fixed decision table that picks one for a given
//! intent. Each framework is a stage progression mapping section purposes
//! to copywriting guidance.

use serde::{Deserialize, Serialize};

use crate::content::SectionType;
use crate::skills::intent_skill::{PageIntent, PricePoint, ProductType, UrgencyLevel};

/// The three supported copywriting frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyFramework {
    #[serde(rename = "AIDA")]
    Aida,
    #[serde(rename = "PAS")]
    Pas,
    #[serde(rename = "BAB")]
    Bab,
}

impl CopyFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyFramework::Aida => "AIDA",
            CopyFramework::Pas => "PAS",
            CopyFramework::Bab => "BAB",
        }
    }
}

/// One stage of a framework's progression.
pub struct FrameworkStage {
    pub name: &'static str,
    /// Section types this stage usually maps onto.
    pub section_kinds: &'static [SectionType],
    pub guidance: &'static str,
}

/// A full framework definition.
pub struct FrameworkDefinition {
    pub framework: CopyFramework,
    pub summary: &'static str,
    pub stages: &'static [FrameworkStage],
}

pub(crate) const FRAMEWORKS: &[FrameworkDefinition] = &[
    FrameworkDefinition {
        framework: CopyFramework::Aida,
        summary: "Attention, Interest, Desire, Action. The default arc for \
                  products sold on capability: hook hard, build relevance, \
                  stack value, then ask.",
        stages: &[
            FrameworkStage {
                name: "Attention",
                section_kinds: &[SectionType::Hero],
                guidance: "Open with the single strongest outcome the visitor \
                           gets. One bold claim, no qualifiers.",
            },
            FrameworkStage {
                name: "Interest",
                section_kinds: &[SectionType::Problem, SectionType::About, SectionType::Video],
                guidance: "Show you understand their situation. Name the \
                           specific friction they feel today.",
            },
            FrameworkStage {
                name: "Desire",
                section_kinds: &[
                    SectionType::Solution,
                    SectionType::Features,
                    SectionType::Benefits,
                    SectionType::Process,
                ],
                guidance: "Translate capabilities into outcomes. Every feature \
                           line should answer 'so what?'.",
            },
            FrameworkStage {
                name: "Action",
                section_kinds: &[
                    SectionType::Pricing,
                    SectionType::Cta,
                    SectionType::LeadCapture,
                    SectionType::Urgency,
                    SectionType::Contact,
                ],
                guidance: "One clear next step, stated as a verb the visitor \
                           performs. Remove every competing link.",
            },
        ],
    },
    FrameworkDefinition {
        framework: CopyFramework::Pas,
        summary: "Problem, Agitate, Solve. For urgent or commodity purchases: \
                  make the pain concrete, make it cost something, then \
                  present the product as relief.",
        stages: &[
            FrameworkStage {
                name: "Problem",
                section_kinds: &[SectionType::Hero, SectionType::Problem],
                guidance: "Lead with the pain, not the product. The visitor \
                           should see their own day described.",
            },
            FrameworkStage {
                name: "Agitate",
                section_kinds: &[SectionType::Stats, SectionType::Urgency],
                guidance: "Quantify what inaction costs: time lost, money \
                           burned, deals missed. Keep it factual, not shrill.",
            },
            FrameworkStage {
                name: "Solve",
                section_kinds: &[
                    SectionType::Solution,
                    SectionType::Features,
                    SectionType::Benefits,
                    SectionType::Pricing,
                    SectionType::Guarantee,
                    SectionType::Cta,
                ],
                guidance: "Present the product as the shortest path out. \
                           Pair every pain named earlier with its fix.",
            },
        ],
    },
    FrameworkDefinition {
        framework: CopyFramework::Bab,
        summary: "Before, After, Bridge. For transformation purchases \
                  (courses, coaching, premium tools): paint the current \
                  state, the desired state, and the product as the bridge.",
        stages: &[
            FrameworkStage {
                name: "Before",
                section_kinds: &[SectionType::Hero, SectionType::Problem],
                guidance: "Describe where the visitor is now, in their own \
                           words. Empathy before aspiration.",
            },
            FrameworkStage {
                name: "After",
                section_kinds: &[
                    SectionType::Solution,
                    SectionType::Benefits,
                    SectionType::Testimonials,
                    SectionType::Stats,
                ],
                guidance: "Paint the end state vividly and specifically. \
                           Real numbers and real names beat adjectives.",
            },
            FrameworkStage {
                name: "Bridge",
                section_kinds: &[
                    SectionType::Process,
                    SectionType::Pricing,
                    SectionType::Guarantee,
                    SectionType::Cta,
                ],
                guidance: "Show the path from before to after as a short, \
                           finite set of steps the product walks them \
                           through.",
            },
        ],
    },
];

/// Look up the full definition for a framework.
pub fn definition(framework: CopyFramework) -> &'static FrameworkDefinition {
    FRAMEWORKS
        .iter()
        .find(|def| def.framework == framework)
        .expect("all frameworks are defined")
}

/// Copywriting guidance for a section purpose within a framework.
///
/// Purposes use the shared vocabulary the planner and templates emit:
/// attention / interest / desire / action / proof / objections.
pub fn guidance_for_purpose(framework: CopyFramework, purpose: &str) -> &'static str {
    match purpose.trim().to_lowercase().as_str() {
        "proof" => {
            "Back every claim with evidence: named customers, concrete \
             numbers, verifiable outcomes. No anonymous praise."
        }
        "objections" => {
            "Answer the question exactly as the visitor would ask it, then \
             resolve it in two sentences or less."
        }
        purpose => {
            let def = definition(framework);
            let stage = match (framework, purpose) {
                (_, "attention") => def.stages.first(),
                (CopyFramework::Aida, "interest") => def.stages.get(1),
                (CopyFramework::Aida, "desire") => def.stages.get(2),
                (CopyFramework::Pas, "interest") => def.stages.get(1),
                (CopyFramework::Pas, "desire") => def.stages.get(2),
                (CopyFramework::Bab, "interest") => def.stages.get(1),
                (CopyFramework::Bab, "desire") => def.stages.get(1),
                (_, "action") => def.stages.last(),
                _ => None,
            };
            stage
                .map(|s| s.guidance)
                .unwrap_or("Write for one reader, in the second person, with a single idea per sentence.")
        }
    }
}

/// Fixed decision table mapping intent signals to a framework.
///
/// High urgency or commodity e-commerce sells on pain relief (PAS);
/// transformation products and premium price points sell on the end state
/// (BAB); everything else takes the default capability arc (AIDA).
pub fn select_framework(intent: &PageIntent) -> (CopyFramework, String) {
    if intent.urgency_level == UrgencyLevel::High || intent.product_type == ProductType::Ecommerce {
        let reason = if intent.urgency_level == UrgencyLevel::High {
            "High urgency favors a pain-first arc: name the problem, make \
             waiting expensive, offer relief."
        } else {
            "E-commerce visitors compare on pain relief; PAS keeps the \
             product framed as the fix."
        };
        return (CopyFramework::Pas, reason.to_string());
    }

    let transformation = matches!(
        intent.product_type,
        ProductType::Course | ProductType::Webinar | ProductType::Coaching
    );
    let premium = matches!(
        intent.price_point,
        PricePoint::Premium | PricePoint::Enterprise
    );
    if transformation || premium {
        let reason = if transformation {
            "Education and coaching sell a transformation; BAB contrasts the \
             before and after states and positions the offer as the bridge."
        } else {
            "Premium pricing needs an aspirational frame; BAB sells the end \
             state before the invoice."
        };
        return (CopyFramework::Bab, reason.to_string());
    }

    (
        CopyFramework::Aida,
        "No urgency or premium signal; AIDA's attention-to-action arc is the \
         reliable default."
            .to_string(),
    )
}
