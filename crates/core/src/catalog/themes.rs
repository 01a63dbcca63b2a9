//! # Theme & Typography Tables
//!
//! Static visual defaults keyed by requested theme / font pair. Resolution
//! is a pure table lookup; the same name always yields byte-identical hex
//! values. Unknown or missing names fall back to the "dark" theme and the
//! "modern" font pair.

use serde::{Deserialize, Serialize};

/// Light/dark classification a renderer can key contrast decisions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Dark,
    Light,
}

/// The page-wide color contract. Chosen once during planning and copied
/// into every section's palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStrategy {
    pub mode: ColorMode,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

/// Heading/body font pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
}

pub(crate) struct ThemeDef {
    pub name: &'static str,
    pub mode: ColorMode,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

impl ThemeDef {
    fn to_strategy(&self) -> ColorStrategy {
        ColorStrategy {
            mode: self.mode,
            primary: self.primary.to_string(),
            secondary: self.secondary.to_string(),
            accent: self.accent.to_string(),
            background: self.background.to_string(),
            text: self.text.to_string(),
        }
    }
}

// First entry is the default.
pub(crate) const THEMES: &[ThemeDef] = &[
    ThemeDef {
        name: "dark",
        mode: ColorMode::Dark,
        primary: "#6366F1",
        secondary: "#8B5CF6",
        accent: "#22D3EE",
        background: "#0A0A0F",
        text: "#F4F4F5",
    },
    ThemeDef {
        name: "light",
        mode: ColorMode::Light,
        primary: "#2563EB",
        secondary: "#7C3AED",
        accent: "#F59E0B",
        background: "#FFFFFF",
        text: "#111827",
    },
    ThemeDef {
        name: "midnight",
        mode: ColorMode::Dark,
        primary: "#3B82F6",
        secondary: "#6366F1",
        accent: "#38BDF8",
        background: "#020617",
        text: "#E2E8F0",
    },
    ThemeDef {
        name: "ocean",
        mode: ColorMode::Dark,
        primary: "#0EA5E9",
        secondary: "#06B6D4",
        accent: "#67E8F9",
        background: "#0C1B2A",
        text: "#E0F2FE",
    },
    ThemeDef {
        name: "sunset",
        mode: ColorMode::Dark,
        primary: "#F97316",
        secondary: "#EF4444",
        accent: "#FBBF24",
        background: "#1C0F0A",
        text: "#FEF3C7",
    },
    ThemeDef {
        name: "forest",
        mode: ColorMode::Dark,
        primary: "#22C55E",
        secondary: "#16A34A",
        accent: "#A3E635",
        background: "#08130B",
        text: "#ECFDF5",
    },
];

pub(crate) struct FontPairDef {
    pub name: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
}

// First entry is the default.
pub(crate) const FONT_PAIRS: &[FontPairDef] = &[
    FontPairDef {
        name: "modern",
        heading: "Inter",
        body: "Inter",
    },
    FontPairDef {
        name: "elegant",
        heading: "Playfair Display",
        body: "Source Sans 3",
    },
    FontPairDef {
        name: "bold",
        heading: "Space Grotesk",
        body: "Inter",
    },
    FontPairDef {
        name: "friendly",
        heading: "Nunito",
        body: "Open Sans",
    },
    FontPairDef {
        name: "technical",
        heading: "IBM Plex Sans",
        body: "IBM Plex Sans",
    },
    FontPairDef {
        name: "editorial",
        heading: "Fraunces",
        body: "Georgia",
    },
];

/// Resolve a theme name to its color strategy. Unknown names get the
/// default ("dark") theme.
pub fn resolve_color_strategy(theme: Option<&str>) -> ColorStrategy {
    let requested = theme.map(|t| t.trim().to_lowercase());
    THEMES
        .iter()
        .find(|def| Some(def.name) == requested.as_deref())
        .unwrap_or(&THEMES[0])
        .to_strategy()
}

/// Resolve a font-pair name to its typography. Unknown names get the
/// default ("modern") pair.
pub fn resolve_typography(pair: Option<&str>) -> Typography {
    let requested = pair.map(|p| p.trim().to_lowercase());
    let def = FONT_PAIRS
        .iter()
        .find(|def| Some(def.name) == requested.as_deref())
        .unwrap_or(&FONT_PAIRS[0]);
    Typography {
        heading_font: def.heading.to_string(),
        body_font: def.body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_is_default_and_stable() {
        let a = resolve_color_strategy(None);
        let b = resolve_color_strategy(Some("dark"));
        let c = resolve_color_strategy(Some("no-such-theme"));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.background, "#0A0A0F");
        assert_eq!(a.mode, ColorMode::Dark);
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        assert_eq!(
            resolve_color_strategy(Some("Ocean")),
            resolve_color_strategy(Some("ocean"))
        );
    }

    #[test]
    fn test_every_theme_has_hex_colors() {
        for def in THEMES {
            for value in [def.primary, def.secondary, def.accent, def.background, def.text] {
                assert!(value.starts_with('#'), "{} has non-hex {}", def.name, value);
                assert_eq!(value.len(), 7);
            }
        }
    }

    #[test]
    fn test_typography_defaults() {
        let t = resolve_typography(None);
        assert_eq!(t.heading_font, "Inter");
        let e = resolve_typography(Some("elegant"));
        assert_eq!(e.heading_font, "Playfair Display");
    }
}
