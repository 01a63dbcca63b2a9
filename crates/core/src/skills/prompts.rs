//! Default prompt templates bundled at compile time.
//!
//! Each phase appends its machine-generated JSON schema to the bundled
//! prompt at call time; the markdown holds only the human-authored rules.

/// Intent Analyst - normalizes free text into a `PageIntent`
pub const INTENT: &str = include_str!("defaults/intent.md");

/// Page Architect - plans the ordered section sequence
pub const BLUEPRINT: &str = include_str!("defaults/blueprint.md");

/// Section Copywriter - writes one section's content
pub const SECTION: &str = include_str!("defaults/section.md");

/// All default prompts with their slugs
pub fn all_defaults() -> Vec<(&'static str, &'static str)> {
    vec![
        ("intent", INTENT),
        ("blueprint", BLUEPRINT),
        ("section", SECTION),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_prompts_non_empty() {
        for (slug, content) in all_defaults() {
            assert!(!content.is_empty(), "Prompt '{}' should not be empty", slug);
            assert!(content.len() > 50, "Prompt '{}' seems too short", slug);
        }
    }

    #[test]
    fn test_prompt_count() {
        assert_eq!(all_defaults().len(), 3, "Should have 3 default prompts");
    }
}
