//! # Static Catalogs
//!
//! Template patterns, copy frameworks, themes, and variant tables: the
//! immutable knowledge the planner works from. Everything here is pure
//! lookup over data built once at process start; no catalog call performs
//! I/O or mutates state.

use once_cell::sync::Lazy;

pub mod frameworks;
pub mod templates;
pub mod themes;
pub mod variants;

use crate::catalog::frameworks::{CopyFramework, FrameworkDefinition};
use crate::catalog::templates::TemplatePattern;
use crate::catalog::themes::{ColorStrategy, Typography};
use crate::catalog::variants::VariantChoice;
use crate::content::SectionType;
use crate::skills::intent_skill::{PageIntent, ProductType};

/// The bundled catalogs, constructed once and passed by reference into the
/// planner and selector components.
pub struct Catalog {
    patterns: &'static [TemplatePattern],
    frameworks: &'static [FrameworkDefinition],
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    patterns: templates::PATTERNS,
    frameworks: frameworks::FRAMEWORKS,
});

impl Catalog {
    /// The built-in catalog tables.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn patterns(&self) -> &[TemplatePattern] {
        self.patterns
    }

    /// Deterministic, total pattern match (see `templates::match_pattern`).
    pub fn match_pattern(
        &self,
        product_type: ProductType,
        keywords: &[String],
    ) -> &'static TemplatePattern {
        templates::match_pattern(product_type, keywords)
    }

    pub fn framework(&self, framework: CopyFramework) -> &'static FrameworkDefinition {
        self.frameworks
            .iter()
            .find(|def| def.framework == framework)
            .expect("all frameworks are defined")
    }

    pub fn select_framework(&self, intent: &PageIntent) -> (CopyFramework, String) {
        frameworks::select_framework(intent)
    }

    pub fn guidance_for_purpose(&self, framework: CopyFramework, purpose: &str) -> &'static str {
        frameworks::guidance_for_purpose(framework, purpose)
    }

    pub fn resolve_color_strategy(&self, theme: Option<&str>) -> ColorStrategy {
        themes::resolve_color_strategy(theme)
    }

    pub fn resolve_typography(&self, pair: Option<&str>) -> Typography {
        themes::resolve_typography(pair)
    }

    pub fn select_variant(
        &self,
        kind: SectionType,
        intent: &PageIntent,
        vibe: Option<&str>,
        framework: CopyFramework,
    ) -> VariantChoice {
        variants::select_variant(kind, intent, vibe, framework)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_shared() {
        let a = Catalog::builtin() as *const Catalog;
        let b = Catalog::builtin() as *const Catalog;
        assert_eq!(a, b);
    }

    #[test]
    fn test_builtin_tables_populated() {
        let catalog = Catalog::builtin();
        assert!(!catalog.patterns().is_empty());
        assert_eq!(catalog.patterns()[0].id, "saas");
    }
}
