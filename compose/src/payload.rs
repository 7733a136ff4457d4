use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Map;
use serde_json::Value;

use minutes_extract::KEY_POINT_KEYS;
use minutes_extract::SUMMARY_KEYS;
use minutes_extract::decode_jsonish_text;
use minutes_extract::parse_object_loose;
use minutes_extract::recover_key_points;
use minutes_extract::recover_summary;

use crate::compile_regex;

/// Upper bound on normalized key points.
pub const MAX_KEY_POINTS: usize = 12;

/// Sub-keys tried, in order, when a key-point entry arrives as an object.
const POINT_SUB_KEYS: &[&str] = &["point", "text", "summary", "content", "description", "title"];

/// Sub-keys tried, in order, for keyword/topic label entries.
const LABEL_SUB_KEYS: &[&str] = &["keyword", "topic", "label", "name", "title", "text", "point"];

const DEFAULT_PLACEHOLDER_MARKERS: &[&str] = &[
    "khong ro",
    "không rõ",
    "khong co",
    "không có",
    "unknown",
    "not specified",
    "n/a",
    "none",
    "null",
    "timestamp: khong ro",
    "timestamp: không rõ",
];

static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[-*•\d.)\s]+"));
static POINT_SEPARATOR: Lazy<Regex> = Lazy::new(|| compile_regex(r"[\n;]+"));
static LABEL_SEPARATOR: Lazy<Regex> = Lazy::new(|| compile_regex(r"[,\n;]+"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| compile_regex(r"\s+"));

/// Detects "no data" filler the model emits instead of leaving a field out:
/// "unknown", "n/a", "không rõ", and friends.
///
/// The marker set is configurable because new models keep inventing new
/// filler phrasing; matching is by lowercase substring.
#[derive(Debug, Clone)]
pub struct PlaceholderFilter {
    markers: Vec<String>,
}

impl Default for PlaceholderFilter {
    fn default() -> Self {
        Self {
            markers: DEFAULT_PLACEHOLDER_MARKERS
                .iter()
                .map(|marker| (*marker).to_string())
                .collect(),
        }
    }
}

impl PlaceholderFilter {
    /// The default marker set plus deployment-specific additions.
    pub fn with_extra_markers<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut filter = Self::default();
        filter
            .markers
            .extend(extra.into_iter().map(|marker| marker.trim().to_lowercase()));
        filter
    }

    /// Empty and whitespace-only values are placeholders too.
    pub fn is_placeholder(&self, value: &str) -> bool {
        let value = value.trim().to_lowercase();
        if value.is_empty() {
            return true;
        }
        self.markers.iter().any(|marker| value.contains(marker.as_str()))
    }
}

/// Pulls a summary and key points out of raw model text.
///
/// Relaxed JSON parsing is tried first; when it yields an object, synonym
/// keys are resolved in priority order (one level of `"data"` nesting
/// included) and both fields come from that single parse. Only when parsing
/// yields nothing usable does regex recovery run over the raw text.
pub fn extract_summary_payload(raw: &str, filter: &PlaceholderFilter) -> (String, Vec<String>) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (String::new(), Vec::new());
    }

    if let Some(map) = parse_object_loose(raw) {
        let (summary, points) = summary_payload_from_map(&map, filter);
        if !summary.is_empty() || !points.is_empty() {
            return (summary, points);
        }
    }

    recover_payload(raw, filter)
}

/// Resolves summary and key points from an already-parsed object. Shared with
/// the pipeline so the raw text is parsed exactly once per request.
pub(crate) fn summary_payload_from_map(
    map: &Map<String, Value>,
    filter: &PlaceholderFilter,
) -> (String, Vec<String>) {
    let summary = resolve_summary(map);
    let points = resolve_key_points(map)
        .map(|value| normalize_key_points(value, filter))
        .unwrap_or_default();
    (decode_jsonish_text(&summary), points)
}

/// Last-resort regex recovery over the raw text.
pub(crate) fn recover_payload(raw: &str, filter: &PlaceholderFilter) -> (String, Vec<String>) {
    tracing::debug!("no parse variant produced summary fields; falling back to regex recovery");
    let summary = recover_summary(raw);
    let points = clean_points(recover_key_points(raw), filter);
    (summary, points)
}

fn resolve_summary(map: &Map<String, Value>) -> String {
    if let Some(summary) = first_string_field(map, SUMMARY_KEYS) {
        return summary;
    }
    if let Some(Value::Object(nested)) = map.get("data")
        && let Some(summary) = first_string_field(nested, SUMMARY_KEYS)
    {
        return summary;
    }
    String::new()
}

fn resolve_key_points(map: &Map<String, Value>) -> Option<&Value> {
    if let Some(value) = first_list_field(map, KEY_POINT_KEYS) {
        return Some(value);
    }
    if let Some(Value::Object(nested)) = map.get("data") {
        return first_list_field(nested, KEY_POINT_KEYS);
    }
    None
}

fn first_string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    })
}

fn first_list_field<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        map.get(*key)
            .filter(|value| matches!(value, Value::Array(_) | Value::String(_)))
    })
}

/// Coerces whatever shape the model returned for key points into a clean,
/// bounded list: a string is split on newlines/semicolons, objects are mapped
/// through point sub-keys, bullet markers are stripped, placeholders dropped,
/// and duplicates removed case-insensitively keeping first-occurrence casing.
pub fn normalize_key_points(raw: &Value, filter: &PlaceholderFilter) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    match raw {
        Value::String(text) => {
            candidates.extend(POINT_SEPARATOR.split(text).map(str::to_string));
        }
        Value::Array(items) => {
            for item in items {
                collect_point_candidate(item, &mut candidates);
            }
        }
        Value::Object(_) => collect_point_candidate(raw, &mut candidates),
        _ => {}
    }
    clean_points(candidates, filter)
}

fn collect_point_candidate(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(text) => out.push(text.clone()),
        Value::Object(map) => {
            for key in POINT_SUB_KEYS {
                if let Some(Value::String(text)) = map.get(*key)
                    && !text.trim().is_empty()
                {
                    out.push(text.clone());
                    return;
                }
            }
        }
        Value::Number(number) => out.push(number.to_string()),
        _ => {}
    }
}

pub(crate) fn clean_points(candidates: Vec<String>, filter: &PlaceholderFilter) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut points: Vec<String> = Vec::new();
    for candidate in candidates {
        let stripped = BULLET_PREFIX.replace(candidate.trim(), "");
        let cleaned = WHITESPACE_RUN.replace_all(stripped.trim(), " ").to_string();
        if cleaned.is_empty() || filter.is_placeholder(&cleaned) {
            continue;
        }
        let key = cleaned.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        points.push(cleaned);
        if points.len() >= MAX_KEY_POINTS {
            break;
        }
    }
    points
}

/// Like [`normalize_key_points`] but for keyword/topic label lists: comma is
/// a separator too, entries shorter than two characters are dropped, and the
/// cap is caller-supplied.
pub fn normalize_label_list(raw: &Value, max_items: usize, filter: &PlaceholderFilter) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    match raw {
        Value::String(text) => {
            candidates.extend(LABEL_SEPARATOR.split(text).map(str::to_string));
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(text) => candidates.push(text.clone()),
                    Value::Object(map) => {
                        for key in LABEL_SUB_KEYS {
                            if let Some(Value::String(text)) = map.get(*key)
                                && !text.trim().is_empty()
                            {
                                candidates.push(text.clone());
                                break;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }

    let mut seen: Vec<String> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    for candidate in candidates {
        let cleaned = BULLET_PREFIX.replace(candidate.trim(), "").trim().to_string();
        if cleaned.chars().count() < 2 || filter.is_placeholder(&cleaned) {
            continue;
        }
        let key = cleaned.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        labels.push(cleaned);
        if labels.len() >= max_items {
            break;
        }
    }
    labels
}
