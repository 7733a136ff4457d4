use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use minutes_protocol::ActionRow;
use minutes_protocol::DecisionRow;
use minutes_protocol::RiskRow;
use minutes_protocol::TopicSegment;

use crate::compile_regex;
use crate::payload::PlaceholderFilter;

const MAX_KEYWORDS: usize = 8;
const MAX_TOPICS: usize = 8;

/// Bilingual stopword list; tokens in here never become keywords.
const STOPWORDS: &[&str] = &[
    "the", "and", "with", "from", "this", "that", "have", "been", "were", "into", "about",
    "summary", "key", "point", "points", "meeting", "session", "evidence", "timestamp",
    "của", "và", "là", "cho", "với", "những", "được", "trong", "một", "nhiều", "nội", "dung",
    "không", "theo", "các", "đã", "đang", "về", "để", "cần", "từ", "sẽ", "việc", "quyết", "định",
];

static KEYWORD_TOKEN: Lazy<Regex> = Lazy::new(|| compile_regex(r"[0-9A-Za-zÀ-ỹà-ỹ]{3,}"));
static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| compile_regex(r"[.;!?]"));
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[-*•\d.)\s]+"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| compile_regex(r"\s+"));

/// Ranks the most frequent non-stopword tokens of the summary and key points.
///
/// The frequency map preserves first-seen order and the sort is stable, so
/// equally frequent tokens rank in order of appearance and the result is
/// deterministic for a given input.
pub fn derive_keywords(summary: &str, key_points: &[String], max_items: usize) -> Vec<String> {
    let mut corpus = summary.to_lowercase();
    for point in key_points {
        corpus.push(' ');
        corpus.push_str(&point.to_lowercase());
    }
    if corpus.trim().is_empty() {
        return Vec::new();
    }

    let mut freq: IndexMap<String, usize> = IndexMap::new();
    for token in KEYWORD_TOKEN.find_iter(&corpus) {
        let token = token.as_str();
        if STOPWORDS.contains(&token) {
            continue;
        }
        *freq.entry(token.to_string()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(max_items.min(MAX_KEYWORDS))
        .map(|(word, _)| word)
        .collect()
}

/// Derives display topics from tracker titles, key-point lead phrases, and
/// keywords, in that priority order, deduplicated case-insensitively.
pub fn derive_topics(
    key_points: &[String],
    topic_tracker: &[TopicSegment],
    keywords: &[String],
    filter: &PlaceholderFilter,
) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();

    for segment in topic_tracker {
        let title = segment.title.trim();
        if !title.is_empty() && !filter.is_placeholder(title) {
            topics.push(title.to_string());
        }
    }

    for point in key_points {
        let cleaned = BULLET_PREFIX.replace(point.trim(), "");
        let Some(sentence) = SENTENCE_SPLIT.split(&cleaned).next() else {
            continue;
        };
        let words: Vec<&str> = sentence.split_whitespace().collect();
        if words.len() <= 1 {
            continue;
        }
        topics.push(words[..words.len().min(6)].join(" "));
    }

    topics.extend(keywords.iter().cloned());

    let mut seen: Vec<String> = Vec::new();
    let mut deduped: Vec<String> = Vec::new();
    for topic in topics {
        let cleaned = WHITESPACE_RUN.replace_all(topic.trim(), " ").to_string();
        if cleaned.chars().count() < 2 || filter.is_placeholder(&cleaned) {
            continue;
        }
        let key = cleaned.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        deduped.push(cleaned);
        if deduped.len() >= MAX_TOPICS {
            break;
        }
    }
    deduped
}

fn is_high(level: &str) -> bool {
    matches!(level.to_lowercase().as_str(), "high" | "critical")
}

/// Pre-computed filter chips for the client: each entry is `kind:facet (n)`.
///
/// An owner of "Unassigned" counts as unassigned; it is the default filled in
/// when the model names nobody.
pub fn build_ai_filters(
    actions: &[ActionRow],
    decisions: &[DecisionRow],
    risks: &[RiskRow],
    topic_tracker: &[TopicSegment],
) -> Vec<String> {
    let mut filters: Vec<String> = Vec::new();

    if !actions.is_empty() {
        filters.push(format!("action:all ({})", actions.len()));
        let high = actions.iter().filter(|row| is_high(&row.priority)).count();
        if high > 0 {
            filters.push(format!("action:high_priority ({high})"));
        }
        let unassigned = actions
            .iter()
            .filter(|row| {
                let owner = row.owner.trim();
                owner.is_empty() || owner.eq_ignore_ascii_case("unassigned")
            })
            .count();
        if unassigned > 0 {
            filters.push(format!("action:unassigned ({unassigned})"));
        }
    }

    if !decisions.is_empty() {
        filters.push(format!("decision:all ({})", decisions.len()));
        let pending = decisions
            .iter()
            .filter(|row| matches!(row.status.to_lowercase().as_str(), "" | "proposed" | "draft"))
            .count();
        if pending > 0 {
            filters.push(format!("decision:pending_confirmation ({pending})"));
        }
    }

    if !risks.is_empty() {
        filters.push(format!("risk:all ({})", risks.len()));
        let high = risks.iter().filter(|row| is_high(&row.severity)).count();
        if high > 0 {
            filters.push(format!("risk:high_or_critical ({high})"));
        }
    }

    if !topic_tracker.is_empty() {
        filters.push(format!("topic:tracked ({})", topic_tracker.len()));
    }

    filters
}
