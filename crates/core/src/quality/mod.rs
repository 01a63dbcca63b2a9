//! # Quality Validator
//!
//! Pure static checks over an assembled page: placeholder residue, weak
//! headlines and CTAs, missing required items, color drift. No generator
//! calls, no side effects; the same `(page, blueprint)` always produces the
//! same report. The orchestrator's regeneration loop consumes the typed
//! issues, not exceptions.

mod patterns;

use serde::{Deserialize, Serialize};

use crate::content::{LandingPage, PageSection, SectionType};
use crate::skills::blueprint_skill::PageBlueprint;

use patterns::{has_placeholder, has_power_word, is_weak_cta};

/// How bad a finding is. Only errors gate validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One detected defect, anchored to a section and field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub section_id: String,
    pub field: String,
    pub issue: String,
    pub suggestion: String,
}

/// Aggregate verdict for one validation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub score: u8,
    pub issues: Vec<QualityIssue>,
    pub suggestions: Vec<String>,
    pub passes_validation: bool,
}

impl QualityReport {
    /// Ids of sections carrying at least one error, in page order.
    pub fn sections_with_errors(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for issue in &self.issues {
            if issue.severity == Severity::Error && !ids.contains(&issue.section_id) {
                ids.push(issue.section_id.clone());
            }
        }
        ids
    }
}

const ERROR_PENALTY: i32 = 15;
const WARNING_PENALTY: i32 = 5;
const MIN_HEADLINE_WORDS: usize = 3;
const MAX_HEADLINE_WORDS: usize = 15;

/// Assess an assembled page against its blueprint.
pub fn assess_quality(page: &LandingPage, blueprint: &PageBlueprint) -> QualityReport {
    let mut issues = Vec::new();

    for section in &page.sections {
        check_placeholders(section, &mut issues);
        check_headline(section, &mut issues);
        check_cta(section, &mut issues);
        check_required_items(section, &mut issues);
        check_color_consistency(section, blueprint, &mut issues);
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count() as i32;
    let warnings = issues
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .count() as i32;

    let score = (100 - ERROR_PENALTY * errors - WARNING_PENALTY * warnings).max(0) as u8;

    QualityReport {
        score,
        suggestions: derive_suggestions(&issues),
        passes_validation: errors == 0,
        issues,
    }
}

/// Scan every text surface of a section for placeholder residue.
fn check_placeholders(section: &PageSection, issues: &mut Vec<QualityIssue>) {
    let mut surfaces: Vec<(String, &str)> =
        vec![("heading".to_string(), section.body.heading())];
    if let Some(subheading) = section.body.subheading() {
        surfaces.push(("subheading".to_string(), subheading));
    }
    if let Some(body_text) = section.body.body_text() {
        surfaces.push(("body_text".to_string(), body_text));
    }
    if let Some(cta) = section.body.cta() {
        surfaces.push(("cta".to_string(), &cta.label));
    }
    for (index, item) in section.body.items().iter().enumerate() {
        surfaces.push((format!("items[{}].title", index), &item.title));
        surfaces.push((format!("items[{}].description", index), &item.description));
    }

    for (field, text) in surfaces {
        if has_placeholder(text) {
            issues.push(QualityIssue {
                severity: Severity::Error,
                section_id: section.id.clone(),
                field,
                issue: format!("placeholder text: \"{}\"", truncate(text, 60)),
                suggestion: "Replace with finished copy about the actual product".to_string(),
            });
        }
    }
}

fn check_headline(section: &PageSection, issues: &mut Vec<QualityIssue>) {
    let heading = section.body.heading().trim();
    if heading.is_empty() {
        issues.push(QualityIssue {
            severity: Severity::Error,
            section_id: section.id.clone(),
            field: "heading".to_string(),
            issue: "missing headline".to_string(),
            suggestion: "Every section needs a headline".to_string(),
        });
        return;
    }

    let words = heading.split_whitespace().count();
    if words < MIN_HEADLINE_WORDS {
        issues.push(QualityIssue {
            severity: Severity::Warning,
            section_id: section.id.clone(),
            field: "heading".to_string(),
            issue: format!("headline too short ({} words)", words),
            suggestion: "Aim for 3-12 words with a concrete benefit".to_string(),
        });
    } else if words > MAX_HEADLINE_WORDS {
        issues.push(QualityIssue {
            severity: Severity::Warning,
            section_id: section.id.clone(),
            field: "heading".to_string(),
            issue: format!("headline too long ({} words)", words),
            suggestion: "Cut to one idea; move detail to the subheading".to_string(),
        });
    }

    if section.kind == SectionType::Hero && !has_power_word(heading) {
        issues.push(QualityIssue {
            severity: Severity::Info,
            section_id: section.id.clone(),
            field: "heading".to_string(),
            issue: "hero headline has no power word".to_string(),
            suggestion: "Consider a stronger verb (transform, unlock, launch)".to_string(),
        });
    }
}

fn check_cta(section: &PageSection, issues: &mut Vec<QualityIssue>) {
    let Some(cta) = section.body.cta() else { return };
    // Placeholder CTAs are caught by the placeholder scan; this check only
    // grades label strength.
    if has_placeholder(&cta.label) {
        return;
    }
    if is_weak_cta(&cta.label) {
        issues.push(QualityIssue {
            severity: Severity::Warning,
            section_id: section.id.clone(),
            field: "cta".to_string(),
            issue: format!("weak CTA label: \"{}\"", cta.label),
            suggestion: "Use a specific action (\"Start Free Trial\", \"Get the Guide\")"
                .to_string(),
        });
    }
}

fn check_required_items(section: &PageSection, issues: &mut Vec<QualityIssue>) {
    if section.kind.requires_items() && section.item_count() == 0 {
        issues.push(QualityIssue {
            severity: Severity::Error,
            section_id: section.id.clone(),
            field: "items".to_string(),
            issue: format!("{} section has no items", section.kind.as_str()),
            suggestion: "List sections need at least one item".to_string(),
        });
    }
}

/// Background drift from the blueprint is informational: intentional
/// variation between bands is a legitimate design choice.
fn check_color_consistency(
    section: &PageSection,
    blueprint: &PageBlueprint,
    issues: &mut Vec<QualityIssue>,
) {
    if !section
        .palette
        .background_color
        .eq_ignore_ascii_case(&blueprint.color_strategy.background)
    {
        issues.push(QualityIssue {
            severity: Severity::Info,
            section_id: section.id.clone(),
            field: "background_color".to_string(),
            issue: format!(
                "section background {} differs from page background {}",
                section.palette.background_color, blueprint.color_strategy.background
            ),
            suggestion: "Fine if intentional; check contrast against the text color".to_string(),
        });
    }
}

fn derive_suggestions(issues: &[QualityIssue]) -> Vec<String> {
    let mut suggestions = Vec::new();
    if issues
        .iter()
        .any(|i| i.severity == Severity::Error && i.issue.starts_with("placeholder"))
    {
        suggestions.push("Replace all placeholder copy before publishing".to_string());
    }
    if issues.iter().any(|i| i.field == "items") {
        suggestions.push("Fill every list section with real entries".to_string());
    }
    if issues.iter().any(|i| i.field == "cta") {
        suggestions.push("Strengthen CTA labels with specific actions".to_string());
    }
    suggestions
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::themes::{resolve_color_strategy, resolve_typography};
    use crate::content::{CallToAction, SectionBody, SectionItem, SectionPalette};

    fn test_blueprint() -> PageBlueprint {
        PageBlueprint {
            copy_framework: crate::catalog::frameworks::CopyFramework::Aida,
            framework_rationale: String::new(),
            section_sequence: vec![],
            color_strategy: resolve_color_strategy(None),
            typography: resolve_typography(None),
            target_section_count: 1,
        }
    }

    fn page_with(sections: Vec<PageSection>) -> LandingPage {
        let strategy = resolve_color_strategy(None);
        LandingPage {
            title: "Test".to_string(),
            description: "Test page".to_string(),
            sections,
            color_scheme: strategy,
            typography: resolve_typography(None),
            smooth_scroll: true,
            animation_preset: "subtle".to_string(),
            content_width: "contained".to_string(),
        }
    }

    fn section(kind: SectionType, body: SectionBody) -> PageSection {
        let strategy = resolve_color_strategy(None);
        PageSection {
            id: format!("sec-{}", kind.as_str()),
            kind,
            body,
            palette: SectionPalette::from_strategy(&strategy),
            variant: "standard".to_string(),
            styling: Default::default(),
        }
    }

    fn hero(heading: &str) -> PageSection {
        section(
            SectionType::Hero,
            SectionBody::Hero {
                heading: heading.to_string(),
                subheading: None,
                cta: CallToAction::new("Start Free Trial"),
                secondary_cta: None,
            },
        )
    }

    #[test]
    fn test_lorem_ipsum_hero_fails_validation() {
        let page = page_with(vec![hero("Lorem ipsum dolor sit amet")]);
        let report = assess_quality(&page, &test_blueprint());

        assert!(!report.passes_validation);
        let issue = report
            .issues
            .iter()
            .find(|i| i.severity == Severity::Error)
            .unwrap();
        assert_eq!(issue.field, "heading");
        assert_eq!(report.sections_with_errors(), vec!["sec-hero".to_string()]);
    }

    #[test]
    fn test_clean_page_passes_with_full_score() {
        let page = page_with(vec![hero("Transform your investor updates")]);
        let report = assess_quality(&page, &test_blueprint());
        assert!(report.passes_validation);
        assert_eq!(report.score, 100);
        // Power word present, so not even an info issue on the hero heading
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_score_formula() {
        // One error (empty items) + one warning (weak CTA)
        let sections = vec![
            section(
                SectionType::Features,
                SectionBody::ItemGrid {
                    heading: "What you get from us".to_string(),
                    subheading: None,
                    items: vec![],
                },
            ),
            section(
                SectionType::Cta,
                SectionBody::Conversion {
                    heading: "Ready when you are".to_string(),
                    subheading: None,
                    cta: CallToAction::new("Submit"),
                    bullet_points: vec![],
                },
            ),
        ];
        let report = assess_quality(&page_with(sections), &test_blueprint());
        assert_eq!(report.score, 100 - 15 - 5);
        assert!(!report.passes_validation);
    }

    #[test]
    fn test_headline_length_warnings() {
        let short = section(
            SectionType::Problem,
            SectionBody::Narrative {
                heading: "Too slow".to_string(),
                body_text: "Writing updates takes hours.".to_string(),
                cta: None,
            },
        );
        let report = assess_quality(&page_with(vec![short]), &test_blueprint());
        assert!(report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.issue.contains("too short")));
        // Warnings alone do not fail validation
        assert!(report.passes_validation);
    }

    #[test]
    fn test_color_drift_is_info_only() {
        let mut drifted = hero("Transform your investor updates");
        drifted.palette.background_color = "#111111".to_string();
        let report = assess_quality(&page_with(vec![drifted]), &test_blueprint());
        assert!(report.passes_validation);
        assert!(report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Info && i.field == "background_color"));
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_assess_quality_is_pure() {
        let page = page_with(vec![
            hero("Lorem ipsum dolor sit amet"),
            section(
                SectionType::Faq,
                SectionBody::ItemGrid {
                    heading: "Questions we hear often".to_string(),
                    subheading: None,
                    items: vec![SectionItem {
                        title: "How long does setup take?".to_string(),
                        description: "Under five minutes.".to_string(),
                        ..Default::default()
                    }],
                },
            ),
        ]);
        let blueprint = test_blueprint();
        let a = assess_quality(&page, &blueprint);
        let b = assess_quality(&page, &blueprint);
        assert_eq!(a.score, b.score);
        assert_eq!(a.issues, b.issues);
        assert_eq!(a.passes_validation, b.passes_validation);
    }

    #[test]
    fn test_item_placeholder_scanned() {
        let bad_items = section(
            SectionType::Features,
            SectionBody::ItemGrid {
                heading: "What you get from us".to_string(),
                subheading: None,
                items: vec![SectionItem {
                    title: "Your Feature Here".to_string(),
                    description: "real description".to_string(),
                    ..Default::default()
                }],
            },
        );
        let report = assess_quality(&page_with(vec![bad_items]), &test_blueprint());
        assert!(!report.passes_validation);
        assert!(report.issues.iter().any(|i| i.field == "items[0].title"));
    }
}
