use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::html;

use minutes_protocol::ActionRow;
use minutes_protocol::ContextBundle;
use minutes_protocol::DecisionRow;
use minutes_protocol::OutputLanguage;
use minutes_protocol::RenderFormat;
use minutes_protocol::RiskRow;
use minutes_protocol::SessionType;
use minutes_protocol::StudyPack;

use crate::phrases::Phrase;
use crate::phrases::phrase;

/// Everything the renderer needs, borrowed from the pipeline. The document
/// itself owns nothing; rendering is a pure function over it.
#[derive(Debug)]
pub struct MinutesDocument<'a> {
    pub ctx: &'a ContextBundle,
    pub session_type: SessionType,
    pub language: OutputLanguage,
    pub summary: &'a str,
    pub key_points: &'a [String],
    pub keywords: &'a [String],
    pub topics: &'a [String],
    pub actions: &'a [ActionRow],
    pub decisions: &'a [DecisionRow],
    pub risks: &'a [RiskRow],
    pub next_steps: &'a [String],
    pub ai_filters: &'a [String],
    pub study_pack: Option<&'a StudyPack>,
    pub include_topic_tracker: bool,
    pub include_ai_filters: bool,
    pub include_quiz: bool,
    pub include_knowledge_table: bool,
}

/// Escapes a value for use inside a markdown pipe table. Empty cells become
/// `-` so the table stays rectangular.
fn md_cell(value: &str) -> String {
    let cell = value.replace('|', "\\|").replace('\n', " ").trim().to_string();
    if cell.is_empty() { "-".to_string() } else { cell }
}

fn fmt_seconds(value: Option<f64>) -> String {
    match value {
        Some(seconds) => {
            let total = seconds.max(0.0) as u64;
            format!("{:02}:{:02}", total / 60, total % 60)
        }
        None => String::new(),
    }
}

fn fmt_datetime(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match value {
        Some(instant) => instant.format("%d/%m/%Y %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}

/// Renders the document in the requested format. Markdown is the base body;
/// the other formats are derived from it.
pub fn render_minutes(doc: &MinutesDocument<'_>, format: RenderFormat) -> String {
    let body = markdown_body(doc);
    match format {
        RenderFormat::Markdown => body,
        RenderFormat::Html => markdown_to_html(&body),
        RenderFormat::Text => markdown_to_text(&body),
    }
}

fn markdown_body(doc: &MinutesDocument<'_>) -> String {
    let lang = doc.language;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}: {}", phrase(lang, Phrase::DocTitle), doc.ctx.title.trim()));
    lines.push(String::new());

    let meeting_type = doc.ctx.meeting_type.trim();
    let meeting_type = if meeting_type.is_empty() { "N/A" } else { meeting_type };
    lines.push(format!("## {}", phrase(lang, Phrase::MeetingInfoHeader)));
    lines.push(format!("- **{}:** {meeting_type}", phrase(lang, Phrase::MeetingTypeLabel)));
    lines.push(format!("- **{}:** {}", phrase(lang, Phrase::SessionModeLabel), doc.session_type));
    lines.push(format!(
        "- **{}:** {} - {}",
        phrase(lang, Phrase::TimeLabel),
        fmt_datetime(doc.ctx.start_time),
        fmt_datetime(doc.ctx.end_time)
    ));
    lines.push(String::new());

    lines.push(format!("## {}", phrase(lang, Phrase::ExecutiveSummaryHeader)));
    let summary = doc.summary.trim();
    if summary.is_empty() {
        lines.push(phrase(lang, Phrase::NoSummary).to_string());
    } else {
        lines.push(summary.to_string());
    }
    lines.push(String::new());

    bullet_section(&mut lines, lang, Phrase::KeyPointsHeader, doc.key_points, Phrase::NoKeyPoints);
    bullet_section(&mut lines, lang, Phrase::KeywordsHeader, doc.keywords, Phrase::NoKeywords);
    bullet_section(&mut lines, lang, Phrase::TopicsHeader, doc.topics, Phrase::NoTopics);

    lines.push(format!("## {}", phrase(lang, Phrase::DecisionsHeader)));
    if doc.decisions.is_empty() {
        lines.push(phrase(lang, Phrase::NoDecisions).to_string());
    } else {
        lines.push(phrase(lang, Phrase::DecisionTableHeader).to_string());
        lines.push("| --- | --- | --- | --- |".to_string());
        for row in doc.decisions {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                md_cell(&row.description),
                md_cell(&row.rationale),
                md_cell(&row.status),
                md_cell(&row.confirmed_by)
            ));
        }
    }
    lines.push(String::new());

    lines.push(format!("## {}", phrase(lang, Phrase::ActionsHeader)));
    if doc.actions.is_empty() {
        lines.push(phrase(lang, Phrase::NoActions).to_string());
    } else {
        lines.push(phrase(lang, Phrase::ActionTableHeader).to_string());
        lines.push("| --- | --- | --- | --- | --- |".to_string());
        for row in doc.actions {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                md_cell(&row.owner),
                md_cell(&row.deadline),
                md_cell(&row.priority),
                md_cell(&row.status),
                md_cell(&row.description)
            ));
        }
    }
    lines.push(String::new());

    lines.push(format!("## {}", phrase(lang, Phrase::RisksHeader)));
    if doc.risks.is_empty() {
        lines.push(phrase(lang, Phrase::NoRisks).to_string());
    } else {
        lines.push(phrase(lang, Phrase::RiskTableHeader).to_string());
        lines.push("| --- | --- | --- | --- | --- |".to_string());
        for row in doc.risks {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                md_cell(&row.description),
                md_cell(&row.severity),
                md_cell(&row.mitigation),
                md_cell(&row.owner),
                md_cell(&row.status)
            ));
        }
    }
    lines.push(String::new());

    if doc.include_ai_filters && doc.session_type == SessionType::Meeting {
        bullet_section(&mut lines, lang, Phrase::AiFiltersHeader, doc.ai_filters, Phrase::NoAiFilters);
    }

    if doc.include_topic_tracker {
        lines.push(format!("## {}", phrase(lang, Phrase::TopicTrackerHeader)));
        if doc.ctx.topic_tracker.is_empty() {
            lines.push(phrase(lang, Phrase::NoTopicTracker).to_string());
        } else {
            lines.push(phrase(lang, Phrase::TopicTableHeader).to_string());
            lines.push("| --- | --- | --- | --- |".to_string());
            for segment in &doc.ctx.topic_tracker {
                let duration = segment
                    .duration_seconds
                    .map(|value| value.to_string())
                    .unwrap_or_default();
                lines.push(format!(
                    "| {} | {} | {} | {} |",
                    md_cell(&segment.title),
                    md_cell(&fmt_seconds(segment.start_time)),
                    md_cell(&fmt_seconds(segment.end_time)),
                    md_cell(&duration)
                ));
            }
        }
        lines.push(String::new());
    }

    if doc.session_type == SessionType::Course
        && let Some(pack) = doc.study_pack
    {
        study_sections(&mut lines, lang, pack, doc.include_knowledge_table, doc.include_quiz);
    }

    lines.push(format!("## {}", phrase(lang, Phrase::NextStepsHeader)));
    if doc.next_steps.is_empty() {
        lines.push(phrase(lang, Phrase::NoNextSteps).to_string());
    } else {
        for (idx, step) in doc.next_steps.iter().enumerate() {
            lines.push(format!("{}. {step}", idx + 1));
        }
    }
    lines.push(String::new());

    lines.join("\n")
}

fn bullet_section(
    lines: &mut Vec<String>,
    lang: OutputLanguage,
    header: Phrase,
    items: &[String],
    empty: Phrase,
) {
    lines.push(format!("## {}", phrase(lang, header)));
    if items.is_empty() {
        lines.push(phrase(lang, empty).to_string());
    } else {
        for item in items {
            lines.push(format!("- {item}"));
        }
    }
    lines.push(String::new());
}

fn study_sections(
    lines: &mut Vec<String>,
    lang: OutputLanguage,
    pack: &StudyPack,
    include_knowledge_table: bool,
    include_quiz: bool,
) {
    if include_knowledge_table {
        lines.push(format!("## {}", phrase(lang, Phrase::KnowledgeTableHeader)));
        if pack.concepts.is_empty() {
            lines.push(phrase(lang, Phrase::NoConcepts).to_string());
        } else {
            lines.push(phrase(lang, Phrase::ConceptTableHeader).to_string());
            lines.push("| --- | --- |".to_string());
            for concept in &pack.concepts {
                lines.push(format!(
                    "| {} | {} |",
                    md_cell(&concept.concept),
                    md_cell(&concept.explanation)
                ));
            }
        }
        lines.push(String::new());

        lines.push(format!("## {}", phrase(lang, Phrase::FormulasHeader)));
        if pack.formulas.is_empty() {
            lines.push(phrase(lang, Phrase::NoFormulas).to_string());
        } else {
            lines.push(phrase(lang, Phrase::FormulaTableHeader).to_string());
            lines.push("| --- | --- | --- |".to_string());
            for formula in &pack.formulas {
                let meaning = if formula.meaning.trim().is_empty() {
                    &formula.usage
                } else {
                    &formula.meaning
                };
                lines.push(format!(
                    "| {} | {} | {} |",
                    md_cell(&formula.name),
                    md_cell(&formula.formula),
                    md_cell(meaning)
                ));
            }
        }
        lines.push(String::new());
    }

    if include_quiz {
        lines.push(format!("## {}", phrase(lang, Phrase::QuizHeader)));
        if pack.quiz.is_empty() {
            lines.push(phrase(lang, Phrase::NoQuiz).to_string());
        } else {
            for (idx, item) in pack.quiz.iter().enumerate() {
                let question = item.question.trim();
                let question = if question.is_empty() {
                    phrase(lang, Phrase::NoQuestionText)
                } else {
                    question
                };
                lines.push(format!("{}. {question}", idx + 1));
                for option in &item.options {
                    lines.push(format!("   - {}", option.trim()));
                }
                let answer = item.answer.trim();
                if !answer.is_empty() {
                    lines.push(format!("   - **{}:** {answer}", phrase(lang, Phrase::AnswerLabel)));
                }
            }
        }
        lines.push(String::new());
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Plain-text rendition: heading markers and bold markers stripped, structure
/// otherwise left as-is so bullet lists and tables stay readable.
fn markdown_to_text(markdown: &str) -> String {
    markdown
        .lines()
        .map(|line| line.trim_start_matches('#').trim_start().replace("**", ""))
        .collect::<Vec<_>>()
        .join("\n")
}
