//! # Generator Output Decoding
//!
//! Generators are instructed to answer with JSON, but nothing enforces it:
//! responses arrive fenced, prefixed with prose, or outright malformed.
//! Every phase decodes through this module and maps `ParseError` to its own
//! deterministic fallback; a parse failure is never a pipeline failure.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Contract failure: the generator answered, but not with the JSON shape
/// the prompt asked for.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in generator output")]
    NoJson,
    #[error("malformed JSON in generator output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the first JSON object in the response into `T`.
pub fn decode_object<T: DeserializeOwned>(text: &str) -> Result<T, ParseError> {
    let raw = extract_json(text).ok_or(ParseError::NoJson)?;
    Ok(serde_json::from_str(raw)?)
}

/// Find the JSON payload inside a response: strips markdown fences and
/// surrounding prose, returning the outermost `{...}` span.
fn extract_json(text: &str) -> Option<&str> {
    let trimmed = text.trim();

    // Prefer a fenced block when present.
    if let Some(fence_start) = trimmed.find("```") {
        let after = &trimmed[fence_start + 3..];
        // Skip an optional language tag on the fence line.
        let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after[body_start..];
        if let Some(fence_end) = body.find("```") {
            let fenced = body[..fence_end].trim();
            if let Some(span) = brace_span(fenced) {
                return Some(span);
            }
        }
    }

    brace_span(trimmed)
}

/// The span from the first `{` to its matching closing brace, string-aware.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_bare_json() {
        let sample: Sample = decode_object(r#"{"name": "hero", "count": 3}"#).unwrap();
        assert_eq!(sample.name, "hero");
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn test_fenced_json_with_language_tag() {
        let text = "Here you go:\n```json\n{\"name\": \"faq\", \"count\": 5}\n```\nDone.";
        let sample: Sample = decode_object(text).unwrap();
        assert_eq!(sample.name, "faq");
    }

    #[test]
    fn test_prose_wrapped_json() {
        let text = "Sure! The result is {\"name\": \"cta\", \"count\": 1} as requested.";
        let sample: Sample = decode_object(text).unwrap();
        assert_eq!(sample.name, "cta");
    }

    #[test]
    fn test_nested_braces_and_strings() {
        let text = r#"{"name": "tricky } brace", "count": 2}"#;
        let sample: Sample = decode_object(text).unwrap();
        assert_eq!(sample.name, "tricky } brace");
    }

    #[test]
    fn test_no_json_is_error() {
        let result: Result<Sample, _> = decode_object("I could not produce that.");
        assert!(matches!(result, Err(ParseError::NoJson)));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result: Result<Sample, _> = decode_object(r#"{"name": "x", "count": }"#);
        assert!(matches!(result, Err(ParseError::Json(_))));
    }
}
