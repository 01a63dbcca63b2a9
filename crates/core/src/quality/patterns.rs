//! Compiled pattern sets for the quality checks. Built once, shared by
//! every validation pass.

use once_cell::sync::Lazy;
use regex::Regex;

/// Text that should never ship: template residue, stand-ins, dev notes.
pub(crate) static PLACEHOLDER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)lorem\s+ipsum",
        r"\[[^\]]+\]",
        r"\{\{[^}]*\}\}",
        r"(?i)\byour\s+\w+\s+here\b",
        r"(?i)\btodo:",
        r"(?i)\bexample\.com\b",
        r"(?i)\binsert\s+(your|text|copy|headline)\b",
        r"(?i)\bplaceholder\b",
        r"(?i)\b(tbd|xxx)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("placeholder patterns are valid"))
    .collect()
});

/// CTA labels that convert poorly enough to flag.
pub(crate) const WEAK_CTAS: &[&str] = &[
    "click here",
    "submit",
    "learn more",
    "read more",
    "more info",
    "click",
    "here",
    "go",
];

/// Hero headlines without one of these read as inert. Informational only.
pub(crate) const POWER_WORDS: &[&str] = &[
    "transform",
    "unlock",
    "discover",
    "boost",
    "grow",
    "effortless",
    "instantly",
    "proven",
    "free",
    "guaranteed",
    "exclusive",
    "powerful",
    "smart",
    "faster",
    "master",
    "launch",
    "stop",
    "never",
    "finally",
];

/// True if any placeholder pattern matches the text.
pub(crate) fn has_placeholder(text: &str) -> bool {
    PLACEHOLDER_PATTERNS.iter().any(|re| re.is_match(text))
}

/// True if the label is on the weak-CTA list (exact match, case folded).
pub(crate) fn is_weak_cta(label: &str) -> bool {
    let folded = label.trim().to_lowercase();
    WEAK_CTAS.contains(&folded.as_str())
}

/// True if the headline contains a power word.
pub(crate) fn has_power_word(headline: &str) -> bool {
    let folded = headline.to_lowercase();
    POWER_WORDS
        .iter()
        .any(|word| folded.split_whitespace().any(|w| w.trim_matches(|c: char| !c.is_alphanumeric()) == *word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        assert!(has_placeholder("Lorem ipsum dolor sit amet"));
        assert!(has_placeholder("[your product name]"));
        assert!(has_placeholder("Your Headline Here"));
        assert!(has_placeholder("TODO: write this"));
        assert!(has_placeholder("visit example.com today"));
        assert!(has_placeholder("{{company}}"));
        assert!(!has_placeholder("Ship investor updates in minutes"));
    }

    #[test]
    fn test_weak_cta_exact_match_only() {
        assert!(is_weak_cta("Click Here"));
        assert!(is_weak_cta("submit"));
        assert!(is_weak_cta("Learn More"));
        assert!(!is_weak_cta("Learn More About Pricing"));
        assert!(!is_weak_cta("Start Free Trial"));
    }

    #[test]
    fn test_power_words() {
        assert!(has_power_word("Transform your reporting"));
        assert!(has_power_word("Finally, updates that write themselves"));
        assert!(!has_power_word("A tool for reporting"));
    }
}
