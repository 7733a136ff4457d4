use once_cell::sync::Lazy;
use regex::Regex;

use crate::compile_regex;

static FENCE_OPEN_REGEX: Lazy<Regex> =
    Lazy::new(|| compile_regex(r"(?i)^```(?:json|text|md|markdown)?\s*"));
static FENCE_CLOSE_REGEX: Lazy<Regex> = Lazy::new(|| compile_regex(r"\s*```$"));

/// Prepares raw model output for parsing: typographic quotes become their
/// ASCII equivalents, one surrounding Markdown code fence (with an optional
/// language tag) is stripped, and the result is trimmed.
///
/// Total and idempotent; empty input yields an empty string.
pub fn normalize_response_text(raw: &str) -> String {
    let cleaned = raw
        .trim()
        .replace(['“', '”'], "\"")
        .replace(['‘', '’'], "'");
    if !cleaned.starts_with("```") {
        return cleaned;
    }
    let unfenced = FENCE_OPEN_REGEX.replace(&cleaned, "");
    let unfenced = FENCE_CLOSE_REGEX.replace(&unfenced, "");
    unfenced.trim().to_string()
}

/// Undoes the escape sequences that survive a failed JSON decode, so that
/// regex-recovered fragments read like the text the model intended.
pub fn decode_jsonish_text(value: &str) -> String {
    value
        .replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\n", "\n")
        .replace("\\t", " ")
        .replace("\\\\", "\\")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_fence_with_language_tag() {
        let raw = "```json\n{\"summary\": \"ok\"}\n```";
        assert_eq!(normalize_response_text(raw), "{\"summary\": \"ok\"}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(normalize_response_text("```\nhello\n```"), "hello");
    }

    #[test]
    fn replaces_typographic_quotes() {
        assert_eq!(
            normalize_response_text("{“summary”: ‘ok’}"),
            "{\"summary\": 'ok'}"
        );
    }

    #[test]
    fn is_idempotent() {
        for raw in ["```json\n{\"a\": 1}\n```", "  plain text  ", "", "“quoted”"] {
            let once = normalize_response_text(raw);
            let twice = normalize_response_text(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize_response_text(""), "");
        assert_eq!(normalize_response_text("   \n  "), "");
    }

    #[test]
    fn decodes_escape_sequences() {
        assert_eq!(
            decode_jsonish_text(r#"line one\nline \"two\"\tend"#),
            "line one\nline \"two\" end"
        );
        assert_eq!(decode_jsonish_text(r"a\\b"), r"a\b");
    }
}
