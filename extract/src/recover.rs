use once_cell::sync::Lazy;
use regex::Regex;

use crate::compile_regex;
use crate::keys::KEY_POINT_KEYS;
use crate::keys::SUMMARY_KEYS;
use crate::normalize::decode_jsonish_text;
use crate::normalize::normalize_response_text;

// The quoted value ends at the next `"key":` pair, a closing brace, or the
// end of input, which lets a bare `summary: "..."` fragment with no
// surrounding object still be recovered.
static SUMMARY_DOUBLE_QUOTED: Lazy<Regex> = Lazy::new(|| {
    compile_regex(&format!(
        r#"(?i)["']?(?:{keys})["']?\s*:\s*"([\s\S]*?)"\s*(?:,\s*["']?[A-Za-z_][A-Za-z0-9_-]*["']?\s*:|\}}|$)"#,
        keys = SUMMARY_KEYS.join("|")
    ))
});
static SUMMARY_SINGLE_QUOTED: Lazy<Regex> = Lazy::new(|| {
    compile_regex(&format!(
        r#"(?i)["']?(?:{keys})["']?\s*:\s*'([\s\S]*?)'\s*(?:,\s*["']?[A-Za-z_][A-Za-z0-9_-]*["']?\s*:|\}}|$)"#,
        keys = SUMMARY_KEYS.join("|")
    ))
});

static KEY_POINT_SPAN: Lazy<Regex> = Lazy::new(|| {
    compile_regex(&format!(
        r#"(?i)["']?(?:{keys})["']?\s*:\s*\[([\s\S]*?)\]"#,
        keys = KEY_POINT_KEYS.join("|")
    ))
});
static QUOTED_ITEM: Lazy<Regex> =
    Lazy::new(|| compile_regex(r#""((?:\\.|[^"\\])*)"|'((?:\\.|[^'\\])*)'"#));
static SPAN_SEPARATOR: Lazy<Regex> = Lazy::new(|| compile_regex(r"[\n,;]+"));
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[-*•\d.)\s]+"));

// Prose headings such as `Key Points:` followed by a bulleted block.
static KEY_POINT_HEADING: Lazy<Regex> = Lazy::new(|| {
    compile_regex(
        r"(?i)\b(?:key[\s_-]?points?|keypoints|highlights|main[\s_-]?points|takeaways|bullet[\s_-]?points)\b\s*:?",
    )
});
static BULLET_LINE: Lazy<Regex> = Lazy::new(|| compile_regex(r"^(?:[-*•]|\d+[.)])\s*(.+)$"));

/// Recovers a summary string from text no JSON variant could parse.
///
/// Returns an empty string (not an error) when nothing matches.
pub fn recover_summary(raw: &str) -> String {
    let cleaned = normalize_response_text(raw);
    for pattern in [&*SUMMARY_DOUBLE_QUOTED, &*SUMMARY_SINGLE_QUOTED] {
        if let Some(caps) = pattern.captures(&cleaned) {
            let value = decode_jsonish_text(&caps[1]);
            if !value.is_empty() {
                tracing::debug!("summary recovered by regex after parse failure");
                return value;
            }
        }
    }
    String::new()
}

/// Recovers key points from text no JSON variant could parse.
///
/// Tries a `key_points: [...]` span first (quoted items, then separator
/// splitting), then a prose `Key Points:` heading followed by bullet lines.
/// Returns an empty list when nothing matches.
pub fn recover_key_points(raw: &str) -> Vec<String> {
    let cleaned = normalize_response_text(raw);
    if let Some(caps) = KEY_POINT_SPAN.captures(&cleaned) {
        let span = &caps[1];
        let mut points: Vec<String> = QUOTED_ITEM
            .captures_iter(span)
            .filter_map(|item| {
                let text = item.get(1).or_else(|| item.get(2))?.as_str();
                let decoded = decode_jsonish_text(text);
                (!decoded.is_empty()).then_some(decoded)
            })
            .collect();
        if points.is_empty() {
            points = split_span_items(span);
        }
        if !points.is_empty() {
            return points;
        }
    }
    bullet_block_points(&cleaned)
}

fn split_span_items(span: &str) -> Vec<String> {
    SPAN_SEPARATOR
        .split(span)
        .filter_map(|part| {
            let stripped = BULLET_PREFIX.replace(part.trim(), "").trim().to_string();
            (!stripped.is_empty()).then_some(stripped)
        })
        .collect()
}

fn bullet_block_points(text: &str) -> Vec<String> {
    let Some(heading) = KEY_POINT_HEADING.find(text) else {
        return Vec::new();
    };
    let mut points = Vec::new();
    for line in text[heading.end()..].lines() {
        let line = line.trim();
        if line.is_empty() || !BULLET_LINE.is_match(line) {
            // Skip leading prose until the block starts; stop once it ends.
            if points.is_empty() {
                continue;
            }
            break;
        }
        if let Some(caps) = BULLET_LINE.captures(line) {
            let item = caps[1].trim().to_string();
            if !item.is_empty() {
                points.push(item);
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recovers_double_quoted_summary() {
        let raw = r#"{summary: "Team aligned on launch", key_points: [}"#;
        assert_eq!(recover_summary(raw), "Team aligned on launch");
    }

    #[test]
    fn recovers_single_quoted_summary() {
        let raw = "{'overview': 'Launch moved to May'}";
        assert_eq!(recover_summary(raw), "Launch moved to May");
    }

    #[test]
    fn recovers_bare_summary_fragment() {
        assert_eq!(recover_summary(r#"summary: "X""#), "X");
    }

    #[test]
    fn recovered_summary_is_unescaped() {
        let raw = r#"summary: "Line one\nLine \"two\"""#;
        assert_eq!(recover_summary(raw), "Line one\nLine \"two\"");
    }

    #[test]
    fn returns_empty_when_no_summary_present() {
        assert_eq!(recover_summary("nothing to see here"), "");
    }

    #[test]
    fn recovers_quoted_key_points_from_span() {
        let raw = r#"key_points: ["First point", 'Second point'] trailing garbage"#;
        assert_eq!(
            recover_key_points(raw),
            vec!["First point".to_string(), "Second point".to_string()]
        );
    }

    #[test]
    fn splits_unquoted_span_items() {
        let raw = "highlights: [- first item\n- second item]";
        assert_eq!(
            recover_key_points(raw),
            vec!["first item".to_string(), "second item".to_string()]
        );
    }

    #[test]
    fn recovers_bulleted_prose_block() {
        let raw = "The model said:\nKey Points:\n- Revenue is up\n- Hiring paused\n\nThanks!";
        assert_eq!(
            recover_key_points(raw),
            vec!["Revenue is up".to_string(), "Hiring paused".to_string()]
        );
    }

    #[test]
    fn returns_empty_when_no_key_points_present() {
        assert_eq!(recover_key_points("just prose"), Vec::<String>::new());
    }
}
