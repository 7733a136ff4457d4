use once_cell::sync::Lazy;
use regex::Captures;
use regex::Regex;
use serde_json::Map;
use serde_json::Value;

use crate::compile_regex;
use crate::normalize::normalize_response_text;

static TRAILING_COMMA_REGEX: Lazy<Regex> = Lazy::new(|| compile_regex(r",\s*([}\]])"));
static UNQUOTED_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| compile_regex(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_-]*)\s*:"));
static SINGLE_QUOTED_REGEX: Lazy<Regex> =
    Lazy::new(|| compile_regex(r"'([^'\\]*(?:\\.[^'\\]*)*)'"));

/// Best-effort decode of model output into a JSON object.
///
/// Candidate substrings (the full normalized text, then the span from the
/// first `{` to the last `}`) are each tried through a fixed ladder of
/// variants: unchanged, trailing commas removed, bare keys quoted, single
/// quotes converted to double quotes. The first variant that parses to an
/// object wins; parses that succeed but are not object-shaped (bare arrays,
/// scalars) are skipped. Returns `None` when nothing parses — never errors.
///
/// All fields of a result come from one consistent parse; candidates are
/// never merged.
pub fn parse_object_loose(raw: &str) -> Option<Map<String, Value>> {
    let cleaned = normalize_response_text(raw);
    if cleaned.is_empty() {
        return None;
    }

    let mut candidates: Vec<&str> = vec![&cleaned];
    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}'))
        && start < end
    {
        candidates.push(&cleaned[start..=end]);
    }

    for candidate in candidates {
        for (idx, variant) in relaxed_variants(candidate).iter().enumerate() {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(variant) {
                if idx > 0 {
                    tracing::debug!(variant = idx, "model output parsed after relaxation");
                }
                return Some(map);
            }
        }
    }
    None
}

/// The variant ladder, each step applied on top of the previous one.
fn relaxed_variants(candidate: &str) -> Vec<String> {
    let without_trailing = TRAILING_COMMA_REGEX
        .replace_all(candidate, "${1}")
        .into_owned();
    let quoted_keys = UNQUOTED_KEY_REGEX
        .replace_all(&without_trailing, "${1}\"${2}\":")
        .into_owned();
    let double_quoted = SINGLE_QUOTED_REGEX
        .replace_all(&quoted_keys, |caps: &Captures| {
            // `\'` is a valid escape in the model's pseudo-JSON but not in
            // real JSON, so it is unescaped while `"` gains an escape.
            format!("\"{}\"", caps[1].replace("\\'", "'").replace('"', "\\\""))
        })
        .into_owned();

    let mut variants = vec![
        candidate.to_string(),
        without_trailing,
        quoted_keys,
        double_quoted,
    ];
    variants.dedup();
    variants
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn parsed(raw: &str) -> Map<String, Value> {
        parse_object_loose(raw).unwrap_or_else(|| panic!("expected an object from {raw:?}"))
    }

    #[test]
    fn parses_strict_json() {
        let map = parsed(r#"{"summary": "ok", "key_points": ["a"]}"#);
        assert_eq!(map["summary"], Value::String("ok".to_string()));
    }

    #[test]
    fn parses_fenced_json() {
        let map = parsed("```json\n{\"summary\": \"ok\"}\n```");
        assert_eq!(map["summary"], Value::String("ok".to_string()));
    }

    #[test]
    fn matches_strict_parse_on_valid_input() {
        let body = r#"{"summary": "ok", "count": 3}"#;
        let strict: Value = serde_json::from_str(body).unwrap_or_default();
        let loose = parsed(&format!("```json\n{body}\n```"));
        assert_eq!(Value::Object(loose), strict);
    }

    #[test]
    fn removes_trailing_commas() {
        let map = parsed(r#"{"key_points": ["a", "b",], "summary": "ok",}"#);
        assert_eq!(map["key_points"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn quotes_bare_keys() {
        let map = parsed(r#"{summary: "ok", key_points: ["a"]}"#);
        assert_eq!(map["summary"], Value::String("ok".to_string()));
    }

    #[test]
    fn converts_single_quotes() {
        let map = parsed(r#"{'summary': 'it\'s fine'}"#);
        assert_eq!(map["summary"], Value::String("it's fine".to_string()));
    }

    #[test]
    fn handles_combined_malformations() {
        let map = parsed("{summary: 'All good', key_points: ['A', 'B',],}");
        assert_eq!(map["summary"], Value::String("All good".to_string()));
        assert_eq!(map["key_points"], serde_json::json!(["A", "B"]));
    }

    #[test]
    fn extracts_object_embedded_in_prose() {
        let raw = "Here are the minutes you asked for:\n{\"summary\": \"ok\"}\nLet me know!";
        let map = parsed(raw);
        assert_eq!(map["summary"], Value::String("ok".to_string()));
    }

    #[test]
    fn skips_non_object_parses() {
        assert_eq!(parse_object_loose(r#"["a", "b"]"#), None);
        assert_eq!(parse_object_loose("42"), None);
        assert_eq!(parse_object_loose("\"just a string\""), None);
    }

    #[test]
    fn returns_none_for_garbage() {
        assert_eq!(parse_object_loose("no json here at all"), None);
        assert_eq!(parse_object_loose(""), None);
        assert_eq!(parse_object_loose("{broken: [}"), None);
    }
}
