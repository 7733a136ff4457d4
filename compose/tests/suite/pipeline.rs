#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use minutes_compose::ComposeOptions;
use minutes_compose::compose_minutes;
use minutes_protocol::ActionRow;
use minutes_protocol::ContextBundle;
use minutes_protocol::MinutesError;
use minutes_protocol::OutputLanguage;

fn english_opts() -> ComposeOptions {
    ComposeOptions {
        language: OutputLanguage::English,
        ..ComposeOptions::default()
    }
}

fn bundle(title: &str) -> ContextBundle {
    ContextBundle {
        title: title.to_string(),
        meeting_type: "standup".to_string(),
        ..Default::default()
    }
}

#[test]
fn relaxed_json_response_yields_cleaned_summary() {
    let raw = "```json\n{summary: 'All good', key_points: ['A','B','A']}\n```";
    let minutes = compose_minutes(raw, &bundle("Weekly sync"), &english_opts()).unwrap();
    assert!(minutes.summary.summary.starts_with("All good"));
    assert_eq!(minutes.summary.key_points, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn prose_response_recovers_key_points() {
    let raw = "The model rambled on.\nKey Points:\n- Revenue is up\n- Hiring paused\nThanks!";
    let ctx = ContextBundle {
        description: "Quarterly business review".to_string(),
        ..bundle("QBR")
    };
    let minutes = compose_minutes(raw, &ctx, &english_opts()).unwrap();
    assert_eq!(
        minutes.summary.key_points,
        vec!["Revenue is up".to_string(), "Hiring paused".to_string()]
    );
    assert!(!minutes.summary.summary.is_empty());
}

#[test]
fn empty_response_synthesizes_from_description() {
    let ctx = ContextBundle {
        description: "Discuss Q3 roadmap".to_string(),
        ..bundle("Planning")
    };
    let minutes = compose_minutes("", &ctx, &english_opts()).unwrap();
    assert!(minutes.summary.summary.contains("Q3 roadmap"), "{}", minutes.summary.summary);
    assert!(!minutes.summary.key_points.is_empty());
}

#[test]
fn empty_bundle_is_rejected() {
    let result = compose_minutes("{}", &ContextBundle::default(), &english_opts());
    assert_eq!(result, Err(MinutesError::MissingContext));
}

#[test]
fn composition_is_deterministic() -> anyhow::Result<()> {
    let raw = r#"{"summary": "Recap", "key_points": ["Budget approved"]}"#;
    let ctx = ContextBundle {
        actions: vec![ActionRow {
            description: "Ship v2".to_string(),
            owner: "lan".to_string(),
            priority: "high".to_string(),
            ..Default::default()
        }],
        ..bundle("Weekly sync")
    };
    let opts = english_opts();
    let first = compose_minutes(raw, &ctx, &opts)?;
    let second = compose_minutes(raw, &ctx, &opts)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn vietnamese_is_the_default_output_language() {
    let ctx = ContextBundle {
        description: "Bàn về lộ trình quý ba".to_string(),
        ..bundle("Họp tuần")
    };
    let minutes = compose_minutes("", &ctx, &ComposeOptions::default()).unwrap();
    assert!(minutes.rendered.contains("Tóm tắt điều hành"), "{}", minutes.rendered);
    assert!(minutes.summary.summary.contains("Tóm tắt sơ bộ"));
}

#[test]
fn ai_filters_summarize_the_row_lists() {
    let raw = r#"{
        "summary": "Recap",
        "action_items": [{"task": "Fix login", "priority": "critical"}],
        "risks": [{"risk": "Vendor delay", "severity": "high"}]
    }"#;
    let minutes = compose_minutes(raw, &bundle("Sync"), &english_opts()).unwrap();
    assert!(minutes.ai_filters.contains(&"action:all (1)".to_string()));
    assert!(minutes.ai_filters.contains(&"action:high_priority (1)".to_string()));
    assert!(minutes.ai_filters.contains(&"risk:high_or_critical (1)".to_string()));
}
