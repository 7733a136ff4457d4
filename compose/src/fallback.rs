use once_cell::sync::Lazy;
use regex::Regex;

use minutes_protocol::ActionRow;
use minutes_protocol::ContextBundle;
use minutes_protocol::DecisionRow;
use minutes_protocol::MinutesSummary;
use minutes_protocol::OutputLanguage;
use minutes_protocol::RiskRow;

use crate::compile_regex;
use crate::payload::PlaceholderFilter;
use crate::payload::clean_points;
use crate::phrases::Phrase;
use crate::phrases::phrase;

/// Summaries shorter than this many words get evidence paragraphs appended.
const MIN_SUMMARY_WORDS: usize = 140;
/// Upper bound on synthesized fallback key points.
const MAX_FALLBACK_POINTS: usize = 8;

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| compile_regex(r"[0-9A-Za-zÀ-ỹà-ỹ]+"));

pub(crate) fn word_count(text: &str) -> usize {
    WORD_TOKEN.find_iter(text).count()
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn join_preview(values: &[String], limit: usize) -> String {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .take(limit)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Guarantees a non-empty, evidence-grounded summary and key-point list.
///
/// Pure and deterministic: identical inputs produce byte-identical output.
/// When the normalized summary is empty, a preliminary paragraph is composed
/// from the strongest available evidence (description, then transcript, then
/// row counts, then documents, then a generic sentence). Summaries under the
/// word threshold are expanded with localized evidence paragraphs, mirroring
/// what a careful secretary would add by hand.
#[allow(clippy::too_many_arguments)]
pub fn synthesize(
    summary: &str,
    key_points: &[String],
    ctx: &ContextBundle,
    actions: &[ActionRow],
    decisions: &[DecisionRow],
    risks: &[RiskRow],
    next_steps: &[String],
    lang: OutputLanguage,
    filter: &PlaceholderFilter,
) -> MinutesSummary {
    let key_points = if key_points.is_empty() {
        tracing::debug!("synthesizing fallback key points from context counts");
        fallback_key_points(ctx, actions, decisions, risks, lang, filter)
    } else {
        key_points.to_vec()
    };

    let base = summary.trim();
    let base = if base.is_empty() {
        tracing::debug!("model yielded no usable summary; synthesizing preliminary text");
        preliminary_summary(ctx, actions, decisions, risks, lang)
    } else {
        base.to_string()
    };

    let expanded = expand_summary(&base, ctx, &key_points, actions, decisions, risks, next_steps, lang);

    MinutesSummary {
        summary: expanded,
        key_points,
    }
}

fn preliminary_summary(
    ctx: &ContextBundle,
    actions: &[ActionRow],
    decisions: &[DecisionRow],
    risks: &[RiskRow],
    lang: OutputLanguage,
) -> String {
    let title = ctx.title.trim();
    let description = ctx.description.trim();
    let transcript = ctx.transcript.trim();

    if !description.is_empty() {
        let excerpt = truncate_chars(description, 360).trim();
        return if lang.is_vietnamese() {
            format!(
                "Tóm tắt sơ bộ cho '{title}': {excerpt}. Vui lòng bổ sung transcript để tạo biên bản sâu và đáng tin cậy hơn."
            )
        } else {
            format!(
                "Preliminary summary for '{title}': {excerpt}. Add transcript evidence for deeper and more reliable minutes."
            )
        };
    }

    if !transcript.is_empty() {
        let excerpt = truncate_chars(transcript, 420).replace('\n', " ");
        let excerpt = excerpt.trim();
        return if lang.is_vietnamese() {
            format!(
                "Tóm tắt sơ bộ cho '{title}': {excerpt}. Bản nháp này nên được tinh chỉnh bằng transcript đầy đủ."
            )
        } else {
            format!(
                "Preliminary summary for '{title}': {excerpt}. This draft should be refined with full transcript context."
            )
        };
    }

    let row_total = actions.len() + decisions.len() + risks.len();
    if row_total > 0 {
        return if lang.is_vietnamese() {
            format!(
                "Tóm tắt sơ bộ cho '{title}': đã ghi nhận {} đầu việc, {} quyết định và {} rủi ro.",
                actions.len(),
                decisions.len(),
                risks.len()
            )
        } else {
            format!(
                "Preliminary summary for '{title}': {} action item(s), {} decision(s), and {} risk(s) were captured.",
                actions.len(),
                decisions.len(),
                risks.len()
            )
        };
    }

    if !ctx.documents.is_empty() {
        return if lang.is_vietnamese() {
            format!(
                "Tóm tắt sơ bộ cho '{title}': đã có tài liệu liên quan. Vui lòng bổ sung dữ liệu transcript để tạo biên bản chi tiết."
            )
        } else {
            format!(
                "Preliminary summary for '{title}': related documents are available. Please add transcript data to generate detailed minutes."
            )
        };
    }

    if lang.is_vietnamese() {
        format!(
            "Tóm tắt sơ bộ cho '{title}': phiên họp đã được ghi nhận, nhưng bằng chứng nội dung hiện còn hạn chế."
        )
    } else {
        format!(
            "Preliminary summary for '{title}': this session is recorded, but content evidence is currently limited."
        )
    }
}

fn fallback_key_points(
    ctx: &ContextBundle,
    actions: &[ActionRow],
    decisions: &[DecisionRow],
    risks: &[RiskRow],
    lang: OutputLanguage,
    filter: &PlaceholderFilter,
) -> Vec<String> {
    let mut points: Vec<String> = Vec::new();
    if !actions.is_empty() {
        points.push(if lang.is_vietnamese() {
            format!("Đã ghi nhận {} đầu việc.", actions.len())
        } else {
            format!("{} action item(s) were captured.", actions.len())
        });
    }
    if !decisions.is_empty() {
        points.push(if lang.is_vietnamese() {
            format!("Đã ghi nhận {} quyết định.", decisions.len())
        } else {
            format!("{} decision(s) were captured.", decisions.len())
        });
    }
    if !risks.is_empty() {
        points.push(if lang.is_vietnamese() {
            format!("Đã ghi nhận {} rủi ro.", risks.len())
        } else {
            format!("{} risk(s) were captured.", risks.len())
        });
    }
    if !ctx.documents.is_empty() {
        points.push(if lang.is_vietnamese() {
            format!("Có {} tài liệu tham chiếu liên quan.", ctx.documents.len())
        } else {
            format!("{} reference document(s) are linked.", ctx.documents.len())
        });
    }
    if points.is_empty() {
        points.push(phrase(lang, Phrase::AdviceAddTranscript).to_string());
    }
    points.truncate(MAX_FALLBACK_POINTS);
    clean_points(points, filter)
}

#[allow(clippy::too_many_arguments)]
fn expand_summary(
    base: &str,
    ctx: &ContextBundle,
    key_points: &[String],
    actions: &[ActionRow],
    decisions: &[DecisionRow],
    risks: &[RiskRow],
    next_steps: &[String],
    lang: OutputLanguage,
) -> String {
    if word_count(base) >= MIN_SUMMARY_WORDS {
        return base.to_string();
    }

    let vi = lang.is_vietnamese();
    let mut paragraphs: Vec<String> = vec![base.to_string()];

    let points_preview = join_preview(key_points, 5);
    if !points_preview.is_empty() {
        paragraphs.push(if vi {
            format!(
                "Các điểm thảo luận trọng tâm gồm: {points_preview}. Nội dung cho thấy các bên đã làm rõ vấn đề, phạm vi ảnh hưởng và hướng xử lý ưu tiên."
            )
        } else {
            format!(
                "Core discussion points included: {points_preview}. The flow clarified scope, impact, and priority handling direction."
            )
        });
    }

    if !decisions.is_empty() {
        let descriptions: Vec<String> =
            decisions.iter().map(|row| row.description.clone()).collect();
        let preview = join_preview(&descriptions, 3);
        let notable = if preview.is_empty() {
            String::new()
        } else if vi {
            format!("Các quyết định đáng chú ý: {preview}. ")
        } else {
            format!("Notable decisions: {preview}. ")
        };
        paragraphs.push(if vi {
            format!(
                "Đã ghi nhận {} quyết định. {notable}Các quyết định này là căn cứ để triển khai kế hoạch và phân quyền thực thi.",
                decisions.len()
            )
        } else {
            format!(
                "{} decision(s) were captured. {notable}These decisions establish the execution baseline and ownership boundaries.",
                decisions.len()
            )
        });
    }

    if !actions.is_empty() {
        let descriptions: Vec<String> = actions
            .iter()
            .filter(|row| !row.description.trim().is_empty())
            .map(|row| {
                let owner = if row.owner.trim().is_empty() { "N/A" } else { row.owner.trim() };
                format!("{} (owner: {owner})", row.description.trim())
            })
            .collect();
        let preview = join_preview(&descriptions, 3);
        let representative = if preview.is_empty() {
            String::new()
        } else if vi {
            format!("Một số đầu việc tiêu biểu: {preview}. ")
        } else {
            format!("Representative items: {preview}. ")
        };
        paragraphs.push(if vi {
            format!(
                "Đã tổng hợp {} đầu việc cần theo dõi. {representative}Cần rà soát deadline và trạng thái định kỳ để đảm bảo tiến độ cam kết.",
                actions.len()
            )
        } else {
            format!(
                "{} action item(s) were consolidated. {representative}Deadlines and status should be reviewed on a recurring cadence.",
                actions.len()
            )
        });
    }

    if !risks.is_empty() {
        let descriptions: Vec<String> = risks.iter().map(|row| row.description.clone()).collect();
        let preview = join_preview(&descriptions, 3);
        let primary = if preview.is_empty() {
            String::new()
        } else if vi {
            format!("Các rủi ro chính: {preview}. ")
        } else {
            format!("Primary risks: {preview}. ")
        };
        paragraphs.push(if vi {
            format!(
                "Đã phát hiện {} rủi ro/vướng mắc. {primary}Đề xuất theo dõi mức độ ảnh hưởng và kế hoạch giảm thiểu theo từng mốc.",
                risks.len()
            )
        } else {
            format!(
                "{} risk(s)/blockers were identified. {primary}Impact levels and mitigation plans should be tracked by milestone.",
                risks.len()
            )
        });
    }

    if !next_steps.is_empty() {
        let preview = join_preview(next_steps, 4);
        paragraphs.push(if vi {
            format!(
                "Các bước tiếp theo đã được xác định: {preview}. Cần chốt người phụ trách và thời hạn cụ thể cho từng hạng mục."
            )
        } else {
            format!(
                "Next steps were identified: {preview}. Owners and concrete due dates should be finalized per item."
            )
        });
    }

    if !ctx.topic_tracker.is_empty() {
        paragraphs.push(if vi {
            format!(
                "Phiên họp ghi nhận {} cụm chủ đề theo timeline, hỗ trợ truy vết nhanh nội dung và quyết định.",
                ctx.topic_tracker.len()
            )
        } else {
            format!(
                "The session tracked {} topic clusters on the timeline for better traceability.",
                ctx.topic_tracker.len()
            )
        });
    }

    let transcript = ctx.transcript.trim();
    if !transcript.is_empty() && word_count(&paragraphs.join("\n\n")) < 120 {
        let snippet = truncate_chars(transcript, 520).replace('\n', " ");
        let snippet = snippet.trim();
        if !snippet.is_empty() {
            paragraphs.push(if vi {
                format!("Bằng chứng transcript tiêu biểu: {snippet}.")
            } else {
                format!("Representative transcript evidence: {snippet}.")
            });
        }
    }

    paragraphs
        .iter()
        .map(|paragraph| paragraph.trim())
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
