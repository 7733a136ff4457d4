use serde_json::Map;
use serde_json::Value;

use minutes_protocol::ActionRow;
use minutes_protocol::Concept;
use minutes_protocol::DecisionRow;
use minutes_protocol::Formula;
use minutes_protocol::QuizItem;
use minutes_protocol::RiskRow;
use minutes_protocol::StudyPack;

use minutes_extract::parse_object_loose;

use crate::payload::PlaceholderFilter;

/// Risk descriptions that are a negative answer, not a risk. Rows matching
/// these are discarded instead of stored.
const NO_RISK_MARKERS: &[&str] = &[
    "no risk",
    "không có rủi ro",
    "khong co rui ro",
    "no issue",
    "không có vấn đề",
    "khong co van de",
];

fn object_items(raw: &Value) -> Vec<&Map<String, Value>> {
    match raw {
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

fn field(row: &Map<String, Value>, keys: &[&str]) -> String {
    for key in keys {
        let text = match row.get(*key) {
            Some(Value::String(text)) => text.trim().to_string(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        };
        if !text.is_empty() {
            return text;
        }
    }
    String::new()
}

fn field_or(row: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    let value = field(row, keys);
    if value.is_empty() { default.to_string() } else { value }
}

fn keep_description(description: &str, filter: &PlaceholderFilter) -> bool {
    !filter.is_placeholder(description)
}

/// Coerces a model-provided action list into typed rows. Rows without a real
/// description are dropped; missing sub-fields get the conventional defaults.
pub fn normalize_action_rows(raw: &Value, filter: &PlaceholderFilter) -> Vec<ActionRow> {
    object_items(raw)
        .into_iter()
        .filter_map(|row| {
            let description = field(row, &["description", "task"]);
            keep_description(&description, filter).then(|| ActionRow {
                description,
                owner: field_or(row, &["owner", "created_by"], "Unassigned"),
                deadline: field(row, &["deadline"]),
                priority: field_or(row, &["priority"], "medium"),
                status: field_or(row, &["status"], "proposed"),
            })
        })
        .collect()
}

pub fn normalize_decision_rows(raw: &Value, filter: &PlaceholderFilter) -> Vec<DecisionRow> {
    object_items(raw)
        .into_iter()
        .filter_map(|row| {
            let description = field(row, &["description", "title"]);
            keep_description(&description, filter).then(|| DecisionRow {
                description,
                rationale: field(row, &["rationale"]),
                status: field_or(row, &["status"], "proposed"),
                confirmed_by: field(row, &["approved_by", "decided_by"]),
            })
        })
        .collect()
}

/// Risk rows additionally drop "no risks found" sentinel answers.
pub fn normalize_risk_rows(raw: &Value, filter: &PlaceholderFilter) -> Vec<RiskRow> {
    object_items(raw)
        .into_iter()
        .filter_map(|row| {
            let description = field(row, &["description", "risk"]);
            if !keep_description(&description, filter) {
                return None;
            }
            let lowered = description.to_lowercase();
            if NO_RISK_MARKERS.iter().any(|marker| lowered.contains(marker)) {
                return None;
            }
            Some(RiskRow {
                description,
                severity: field_or(row, &["severity"], "medium"),
                mitigation: field(row, &["mitigation"]),
                status: field_or(row, &["status"], "proposed"),
                owner: field(row, &["raised_by", "owner"]),
            })
        })
        .collect()
}

/// Normalizes a study-pack payload for course sessions. Accepts an object or
/// a JSON-ish string; bare string lists are lifted into rows with defaulted
/// sub-fields. Returns `None` when the payload is not object-shaped.
pub fn normalize_study_pack(raw: &Value) -> Option<StudyPack> {
    let parsed;
    let map = match raw {
        Value::Object(map) => map,
        Value::String(text) => {
            parsed = parse_object_loose(text)?;
            &parsed
        }
        _ => return None,
    };

    let concepts_raw = map.get("concepts");
    let formulas_raw = first_present(map, &["formulas", "important_formulas", "key_formulas"]);
    let quiz_raw = first_present(map, &["quiz", "quizzes", "questions"]);

    Some(StudyPack {
        concepts: list_of(concepts_raw, concept_from_object, |text| Concept {
            concept: text,
            ..Default::default()
        }),
        formulas: list_of(formulas_raw, formula_from_object, |text| Formula {
            name: text.clone(),
            formula: text,
            ..Default::default()
        }),
        quiz: list_of(quiz_raw, quiz_from_object, |text| QuizItem {
            question: text,
            ..Default::default()
        }),
    })
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        map.get(*key)
            .filter(|value| !value.is_null())
    })
}

fn list_of<T>(
    raw: Option<&Value>,
    from_object: impl Fn(&Map<String, Value>) -> Option<T>,
    from_text: impl Fn(String) -> T,
) -> Vec<T> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };
    let typed: Vec<T> = items
        .iter()
        .filter_map(|item| item.as_object().and_then(&from_object))
        .collect();
    if !typed.is_empty() {
        return typed;
    }
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) if !text.trim().is_empty() => Some(from_text(text.trim().to_string())),
            _ => None,
        })
        .collect()
}

fn concept_from_object(map: &Map<String, Value>) -> Option<Concept> {
    let concept = field(map, &["concept", "name"]);
    (!concept.is_empty()).then(|| Concept {
        concept,
        explanation: field(map, &["explanation", "description"]),
        example: field(map, &["example"]),
    })
}

fn formula_from_object(map: &Map<String, Value>) -> Option<Formula> {
    let name = field(map, &["name", "title"]);
    let formula = field(map, &["formula", "expression"]);
    (!name.is_empty() || !formula.is_empty()).then(|| Formula {
        meaning: field(map, &["meaning", "usage", "description"]),
        usage: field(map, &["usage"]),
        name,
        formula,
    })
}

fn quiz_from_object(map: &Map<String, Value>) -> Option<QuizItem> {
    let question = field(map, &["question"]);
    (!question.is_empty()).then(|| QuizItem {
        question,
        options: match map.get("options") {
            Some(Value::Array(options)) => options
                .iter()
                .filter_map(|option| option.as_str())
                .map(|option| option.trim().to_string())
                .collect(),
            _ => Vec::new(),
        },
        answer: field(map, &["answer", "correct_answer"]),
        explanation: field(map, &["explanation"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn action_rows_get_defaults_and_synonyms() {
        let filter = PlaceholderFilter::default();
        let raw = json!([
            {"task": "Ship the release", "created_by": "lan"},
            {"description": "Review budget", "priority": "high", "status": "open"}
        ]);
        let rows = normalize_action_rows(&raw, &filter);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "Ship the release");
        assert_eq!(rows[0].owner, "lan");
        assert_eq!(rows[0].priority, "medium");
        assert_eq!(rows[0].status, "proposed");
        assert_eq!(rows[1].priority, "high");
    }

    #[test]
    fn rows_with_placeholder_descriptions_are_dropped() {
        let filter = PlaceholderFilter::default();
        let raw = json!([{"description": "Không rõ"}, {"description": ""}, {"owner": "x"}]);
        assert_eq!(normalize_action_rows(&raw, &filter), Vec::new());
    }

    #[test]
    fn decision_rows_map_confirmed_by_synonyms() {
        let filter = PlaceholderFilter::default();
        let raw = json!([{"title": "Adopt plan B", "decided_by": "chi"}]);
        let rows = normalize_decision_rows(&raw, &filter);
        assert_eq!(rows[0].description, "Adopt plan B");
        assert_eq!(rows[0].confirmed_by, "chi");
        assert_eq!(rows[0].status, "proposed");
    }

    #[test]
    fn risk_sentinel_rows_are_discarded() {
        let filter = PlaceholderFilter::default();
        let raw = json!([
            {"description": "No risks identified"},
            {"description": "Không có rủi ro"},
            {"risk": "Vendor delay", "severity": "high"}
        ]);
        let rows = normalize_risk_rows(&raw, &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Vendor delay");
        assert_eq!(rows[0].severity, "high");
    }

    #[test]
    fn non_list_input_yields_no_rows() {
        let filter = PlaceholderFilter::default();
        assert_eq!(normalize_action_rows(&json!("not a list"), &filter), Vec::new());
        assert_eq!(normalize_risk_rows(&Value::Null, &filter), Vec::new());
    }

    #[test]
    fn study_pack_lifts_bare_string_lists() {
        let raw = json!({
            "concepts": ["Gradient descent"],
            "key_formulas": [{"name": "MSE", "expression": "mean((y-ŷ)²)"}],
            "questions": ["What is overfitting?"]
        });
        let pack = normalize_study_pack(&raw).unwrap_or_default();
        assert_eq!(pack.concepts[0].concept, "Gradient descent");
        assert_eq!(pack.formulas[0].formula, "mean((y-ŷ)²)");
        assert_eq!(pack.quiz[0].question, "What is overfitting?");
    }

    #[test]
    fn study_pack_accepts_jsonish_strings() {
        let raw = json!("{concepts: [{'concept': 'Recursion', 'explanation': 'self reference'}]}");
        let pack = normalize_study_pack(&raw).unwrap_or_default();
        assert_eq!(pack.concepts[0].concept, "Recursion");
        assert_eq!(pack.concepts[0].explanation, "self reference");
    }

    #[test]
    fn study_pack_rejects_non_objects() {
        assert_eq!(normalize_study_pack(&json!(42)), None);
        assert_eq!(normalize_study_pack(&json!("plain prose")), None);
    }
}
