#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use minutes_compose::ComposeOptions;
use minutes_compose::compose_minutes;
use minutes_protocol::ContextBundle;
use minutes_protocol::OutputLanguage;
use minutes_protocol::RenderFormat;
use minutes_protocol::SessionType;
use minutes_protocol::TopicSegment;

const ENGLISH_HEADERS: &[&str] = &[
    "## Meeting information",
    "## Executive summary",
    "## Key points",
    "## Core keywords",
    "## Primary topics",
    "## Decisions",
    "## Action items",
    "## Risks and blockers",
    "## AI filters (reference)",
    "## Topic tracker",
    "## Next steps",
];

fn ctx() -> ContextBundle {
    ContextBundle {
        title: "Weekly sync".to_string(),
        meeting_type: "standup".to_string(),
        ..Default::default()
    }
}

#[test]
fn markdown_contains_every_section_exactly_once() {
    let opts = ComposeOptions {
        language: OutputLanguage::English,
        ..ComposeOptions::default()
    };
    let minutes = compose_minutes("no structure here", &ctx(), &opts).unwrap();
    for header in ENGLISH_HEADERS {
        assert_eq!(
            minutes.rendered.matches(header).count(),
            1,
            "{header:?} should appear exactly once"
        );
    }
}

#[test]
fn disabled_sections_are_omitted() {
    let opts = ComposeOptions {
        language: OutputLanguage::English,
        include_ai_filters: false,
        include_topic_tracker: false,
        ..ComposeOptions::default()
    };
    let minutes = compose_minutes("{}", &ctx(), &opts).unwrap();
    assert!(!minutes.rendered.contains("## AI filters"));
    assert!(!minutes.rendered.contains("## Topic tracker"));
}

#[test]
fn pipe_characters_in_model_rows_cannot_break_tables() {
    let raw = r#"{"summary": "x", "action_items": [{"task": "Use a | b", "owner": "lan"}]}"#;
    let opts = ComposeOptions {
        language: OutputLanguage::English,
        ..ComposeOptions::default()
    };
    let minutes = compose_minutes(raw, &ctx(), &opts).unwrap();
    assert!(minutes.rendered.contains(r"Use a \| b"));
}

#[test]
fn topic_tracker_table_renders_segment_timing() {
    let bundle = ContextBundle {
        topic_tracker: vec![TopicSegment::new("t1", "Kickoff", Some(0.0), Some(90.0))],
        ..ctx()
    };
    let opts = ComposeOptions {
        language: OutputLanguage::English,
        ..ComposeOptions::default()
    };
    let minutes = compose_minutes("{}", &bundle, &opts).unwrap();
    assert!(minutes.rendered.contains("| Kickoff | 00:00 | 01:30 | 90 |"));
}

#[test]
fn html_format_produces_markup() {
    let opts = ComposeOptions {
        language: OutputLanguage::English,
        format: RenderFormat::Html,
        ..ComposeOptions::default()
    };
    let minutes = compose_minutes("{\"summary\": \"Recap\"}", &ctx(), &opts).unwrap();
    assert!(minutes.rendered.contains("<h1>"));
    assert!(minutes.rendered.contains("<h2>"));
}

#[test]
fn text_format_has_no_markdown_markers() {
    let opts = ComposeOptions {
        language: OutputLanguage::English,
        format: RenderFormat::Text,
        ..ComposeOptions::default()
    };
    let minutes = compose_minutes("{\"summary\": \"Recap\"}", &ctx(), &opts).unwrap();
    assert!(!minutes.rendered.contains('#'));
    assert!(!minutes.rendered.contains("**"));
}

#[test]
fn course_sessions_render_quiz_sections() {
    let bundle = ContextBundle {
        title: "Statistics lecture".to_string(),
        meeting_type: "course".to_string(),
        ..Default::default()
    };
    let raw = r#"{
        "summary": "Lecture recap",
        "quiz": [{"question": "What is variance?", "options": ["Spread", "Mean"], "answer": "Spread"}]
    }"#;
    let opts = ComposeOptions {
        language: OutputLanguage::English,
        session_type: Some(SessionType::Course),
        ..ComposeOptions::default()
    };
    let minutes = compose_minutes(raw, &bundle, &opts).unwrap();
    assert!(minutes.rendered.contains("## Review questions"));
    assert!(minutes.rendered.contains("1. What is variance?"));
    assert!(minutes.rendered.contains("- **Answer:** Spread"));
    assert!(!minutes.rendered.contains("## AI filters"));
}
