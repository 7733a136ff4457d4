use serde_json::Map;
use serde_json::Value;

use minutes_extract::parse_object_loose;
use minutes_protocol::ActionRow;
use minutes_protocol::ComposedMinutes;
use minutes_protocol::ContextBundle;
use minutes_protocol::DecisionRow;
use minutes_protocol::MinutesError;
use minutes_protocol::OutputLanguage;
use minutes_protocol::RenderFormat;
use minutes_protocol::Result;
use minutes_protocol::RiskRow;
use minutes_protocol::SessionType;
use minutes_protocol::StudyPack;

use crate::fallback::synthesize;
use crate::keywords::build_ai_filters;
use crate::keywords::derive_keywords;
use crate::keywords::derive_topics;
use crate::payload::PlaceholderFilter;
use crate::payload::normalize_key_points;
use crate::payload::normalize_label_list;
use crate::payload::recover_payload;
use crate::payload::summary_payload_from_map;
use crate::render::MinutesDocument;
use crate::render::render_minutes;
use crate::rows::normalize_action_rows;
use crate::rows::normalize_decision_rows;
use crate::rows::normalize_risk_rows;
use crate::rows::normalize_study_pack;

const MAX_LABELS: usize = 10;
const MAX_DERIVED: usize = 8;
const DEFAULT_NEXT_STEPS: usize = 3;

/// Per-request knobs for [`compose_minutes`]. `Default` matches what the
/// production call sites use: Vietnamese markdown with every section enabled.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub language: OutputLanguage,
    pub format: RenderFormat,
    /// Explicit session type; inferred from the meeting type when `None`.
    pub session_type: Option<SessionType>,
    pub include_topic_tracker: bool,
    pub include_ai_filters: bool,
    pub include_quiz: bool,
    pub include_knowledge_table: bool,
    pub placeholder_filter: PlaceholderFilter,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            language: OutputLanguage::default(),
            format: RenderFormat::default(),
            session_type: None,
            include_topic_tracker: true,
            include_ai_filters: true,
            include_quiz: true,
            include_knowledge_table: true,
            placeholder_filter: PlaceholderFilter::default(),
        }
    }
}

impl ComposeOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Turns a raw model response plus the evidence bundle into finished minutes.
///
/// The raw text is parsed once; every downstream consumer (summary, rows,
/// keywords, topics, study pack) reads from that single parse. The result is
/// total for any bundle with identity: a response that yields nothing usable
/// still produces synthesized minutes from the bundle alone.
pub fn compose_minutes(
    raw: &str,
    ctx: &ContextBundle,
    opts: &ComposeOptions,
) -> Result<ComposedMinutes> {
    if !ctx.has_identity() {
        return Err(MinutesError::MissingContext);
    }

    let filter = &opts.placeholder_filter;
    let session_type = SessionType::infer(&ctx.meeting_type, opts.session_type);
    let parsed = parse_object_loose(raw);
    tracing::debug!(
        parsed = parsed.is_some(),
        %session_type,
        title = %ctx.title,
        "composing minutes"
    );

    let (summary, key_points) = match &parsed {
        Some(map) => {
            let (summary, points) = summary_payload_from_map(map, filter);
            if summary.is_empty() && points.is_empty() {
                recover_payload(raw, filter)
            } else {
                (summary, points)
            }
        }
        None => recover_payload(raw, filter),
    };

    let actions = action_rows(ctx, parsed.as_ref(), filter);
    let decisions = decision_rows(ctx, parsed.as_ref(), filter);
    let risks = risk_rows(ctx, parsed.as_ref(), filter);

    let mut next_steps = parsed
        .as_ref()
        .and_then(|map| map.get("next_steps"))
        .map(|value| normalize_key_points(value, filter))
        .unwrap_or_default();
    if next_steps.is_empty() {
        next_steps = actions
            .iter()
            .take(DEFAULT_NEXT_STEPS)
            .map(|row| row.description.clone())
            .collect();
    }

    let study_pack = if session_type == SessionType::Course {
        resolve_study_pack(parsed.as_ref())
    } else {
        None
    };

    let summary = synthesize(
        &summary,
        &key_points,
        ctx,
        &actions,
        &decisions,
        &risks,
        &next_steps,
        opts.language,
        filter,
    );

    let keywords = labels_or(parsed.as_ref(), "keywords", filter, || {
        derive_keywords(&summary.summary, &summary.key_points, MAX_DERIVED)
    });
    let topics = labels_or(parsed.as_ref(), "topics", filter, || {
        derive_topics(&summary.key_points, &ctx.topic_tracker, &keywords, filter)
    });

    let ai_filters = if session_type == SessionType::Meeting && opts.include_ai_filters {
        build_ai_filters(&actions, &decisions, &risks, &ctx.topic_tracker)
    } else {
        Vec::new()
    };

    let doc = MinutesDocument {
        ctx,
        session_type,
        language: opts.language,
        summary: &summary.summary,
        key_points: &summary.key_points,
        keywords: &keywords,
        topics: &topics,
        actions: &actions,
        decisions: &decisions,
        risks: &risks,
        next_steps: &next_steps,
        ai_filters: &ai_filters,
        study_pack: study_pack.as_ref(),
        include_topic_tracker: opts.include_topic_tracker,
        include_ai_filters: opts.include_ai_filters,
        include_quiz: opts.include_quiz,
        include_knowledge_table: opts.include_knowledge_table,
    };
    let rendered = render_minutes(&doc, opts.format);

    Ok(ComposedMinutes {
        summary,
        keywords,
        topics,
        actions,
        decisions,
        risks,
        next_steps,
        ai_filters,
        study_pack,
        rendered,
    })
}

fn action_rows(
    ctx: &ContextBundle,
    parsed: Option<&Map<String, Value>>,
    filter: &PlaceholderFilter,
) -> Vec<ActionRow> {
    if !ctx.actions.is_empty() {
        return ctx.actions.clone();
    }
    first_present(parsed, &["action_items", "actions"])
        .map(|value| normalize_action_rows(value, filter))
        .unwrap_or_default()
}

fn decision_rows(
    ctx: &ContextBundle,
    parsed: Option<&Map<String, Value>>,
    filter: &PlaceholderFilter,
) -> Vec<DecisionRow> {
    if !ctx.decisions.is_empty() {
        return ctx.decisions.clone();
    }
    first_present(parsed, &["decisions"])
        .map(|value| normalize_decision_rows(value, filter))
        .unwrap_or_default()
}

fn risk_rows(
    ctx: &ContextBundle,
    parsed: Option<&Map<String, Value>>,
    filter: &PlaceholderFilter,
) -> Vec<RiskRow> {
    if !ctx.risks.is_empty() {
        return ctx.risks.clone();
    }
    first_present(parsed, &["risks"])
        .map(|value| normalize_risk_rows(value, filter))
        .unwrap_or_default()
}

fn first_present<'a>(
    parsed: Option<&'a Map<String, Value>>,
    keys: &[&str],
) -> Option<&'a Value> {
    let map = parsed?;
    keys.iter()
        .find_map(|key| map.get(*key).filter(|value| !value.is_null()))
}

/// A dedicated `study_pack` key wins; otherwise the payload itself is treated
/// as the pack when it carries any study key at the top level.
fn resolve_study_pack(parsed: Option<&Map<String, Value>>) -> Option<StudyPack> {
    let map = parsed?;
    let pack = if let Some(value) = map.get("study_pack") {
        normalize_study_pack(value)
    } else if ["concepts", "formulas", "important_formulas", "key_formulas", "quiz", "quizzes", "questions"]
        .iter()
        .any(|key| map.contains_key(*key))
    {
        normalize_study_pack(&Value::Object(map.clone()))
    } else {
        None
    };
    pack.filter(|pack| !pack.is_empty())
}

fn labels_or(
    parsed: Option<&Map<String, Value>>,
    key: &str,
    filter: &PlaceholderFilter,
    derive: impl FnOnce() -> Vec<String>,
) -> Vec<String> {
    let explicit = parsed
        .and_then(|map| map.get(key))
        .map(|value| normalize_label_list(value, MAX_LABELS, filter))
        .unwrap_or_default();
    if explicit.is_empty() { derive() } else { explicit }
}
