use minutes_protocol::OutputLanguage;

/// Every static user-facing string the renderer and synthesizer emit, keyed
/// by language. Parameterized sentences live next to their call sites in
/// `fallback.rs`; this table covers the fixed ones so language branching is
/// not scattered through the formatting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phrase {
    DocTitle,
    MeetingInfoHeader,
    MeetingTypeLabel,
    SessionModeLabel,
    TimeLabel,
    ExecutiveSummaryHeader,
    KeyPointsHeader,
    KeywordsHeader,
    TopicsHeader,
    DecisionsHeader,
    ActionsHeader,
    RisksHeader,
    AiFiltersHeader,
    TopicTrackerHeader,
    KnowledgeTableHeader,
    FormulasHeader,
    QuizHeader,
    NextStepsHeader,
    NoSummary,
    NoKeyPoints,
    NoKeywords,
    NoTopics,
    NoDecisions,
    NoActions,
    NoRisks,
    NoAiFilters,
    NoTopicTracker,
    NoConcepts,
    NoFormulas,
    NoQuiz,
    NoNextSteps,
    NoQuestionText,
    AnswerLabel,
    DecisionTableHeader,
    ActionTableHeader,
    RiskTableHeader,
    TopicTableHeader,
    ConceptTableHeader,
    FormulaTableHeader,
    AdviceAddTranscript,
}

pub(crate) fn phrase(lang: OutputLanguage, phrase: Phrase) -> &'static str {
    use Phrase::*;
    match (lang, phrase) {
        (OutputLanguage::Vietnamese, DocTitle) => "Biên bản",
        (OutputLanguage::English, DocTitle) => "Minutes",
        (OutputLanguage::Vietnamese, MeetingInfoHeader) => "Thông tin cuộc họp",
        (OutputLanguage::English, MeetingInfoHeader) => "Meeting information",
        (OutputLanguage::Vietnamese, MeetingTypeLabel) => "Loại cuộc họp",
        (OutputLanguage::English, MeetingTypeLabel) => "Meeting type",
        (OutputLanguage::Vietnamese, SessionModeLabel) => "Chế độ phiên",
        (OutputLanguage::English, SessionModeLabel) => "Session mode",
        (OutputLanguage::Vietnamese, TimeLabel) => "Thời gian",
        (OutputLanguage::English, TimeLabel) => "Time",
        (OutputLanguage::Vietnamese, ExecutiveSummaryHeader) => "Tóm tắt điều hành",
        (OutputLanguage::English, ExecutiveSummaryHeader) => "Executive summary",
        (OutputLanguage::Vietnamese, KeyPointsHeader) => "Các điểm chính",
        (OutputLanguage::English, KeyPointsHeader) => "Key points",
        (OutputLanguage::Vietnamese, KeywordsHeader) => "Từ khóa trọng tâm",
        (OutputLanguage::English, KeywordsHeader) => "Core keywords",
        (OutputLanguage::Vietnamese, TopicsHeader) => "Chủ đề chính",
        (OutputLanguage::English, TopicsHeader) => "Primary topics",
        (OutputLanguage::Vietnamese, DecisionsHeader) => "Quyết định",
        (OutputLanguage::English, DecisionsHeader) => "Decisions",
        (OutputLanguage::Vietnamese, ActionsHeader) => "Hành động cần thực hiện",
        (OutputLanguage::English, ActionsHeader) => "Action items",
        (OutputLanguage::Vietnamese, RisksHeader) => "Rủi ro và trở ngại",
        (OutputLanguage::English, RisksHeader) => "Risks and blockers",
        (OutputLanguage::Vietnamese, AiFiltersHeader) => "Bộ lọc AI (tham chiếu)",
        (OutputLanguage::English, AiFiltersHeader) => "AI filters (reference)",
        (OutputLanguage::Vietnamese, TopicTrackerHeader) => "Theo dõi chủ đề",
        (OutputLanguage::English, TopicTrackerHeader) => "Topic tracker",
        (OutputLanguage::Vietnamese, KnowledgeTableHeader) => "Bảng kiến thức trọng tâm",
        (OutputLanguage::English, KnowledgeTableHeader) => "Key knowledge table",
        (OutputLanguage::Vietnamese, FormulasHeader) => "Công thức quan trọng",
        (OutputLanguage::English, FormulasHeader) => "Important formulas",
        (OutputLanguage::Vietnamese, QuizHeader) => "Câu hỏi ôn tập",
        (OutputLanguage::English, QuizHeader) => "Review questions",
        (OutputLanguage::Vietnamese, NextStepsHeader) => "Bước tiếp theo",
        (OutputLanguage::English, NextStepsHeader) => "Next steps",
        (OutputLanguage::Vietnamese, NoSummary) => "_Chưa có tóm tắt điều hành._",
        (OutputLanguage::English, NoSummary) => "_No executive summary available._",
        (OutputLanguage::Vietnamese, NoKeyPoints) => "- Chưa có điểm chính được trích xuất.",
        (OutputLanguage::English, NoKeyPoints) => "- No key points extracted yet.",
        (OutputLanguage::Vietnamese, NoKeywords) => "- Chưa có từ khóa nổi bật.",
        (OutputLanguage::English, NoKeywords) => "- No notable keywords yet.",
        (OutputLanguage::Vietnamese, NoTopics) => "- Chưa có chủ đề nổi bật.",
        (OutputLanguage::English, NoTopics) => "- No primary topics available.",
        (OutputLanguage::Vietnamese, NoDecisions) => "- Chưa ghi nhận quyết định cụ thể.",
        (OutputLanguage::English, NoDecisions) => "- No concrete decisions recorded.",
        (OutputLanguage::Vietnamese, NoActions) => "- Chưa có đầu việc cần theo dõi.",
        (OutputLanguage::English, NoActions) => "- No tracked action items.",
        (OutputLanguage::Vietnamese, NoRisks) => "- Chưa ghi nhận rủi ro nổi bật.",
        (OutputLanguage::English, NoRisks) => "- No major risks recorded.",
        (OutputLanguage::Vietnamese, NoAiFilters) => "- Chưa có bộ lọc AI.",
        (OutputLanguage::English, NoAiFilters) => "- No AI filter metadata.",
        (OutputLanguage::Vietnamese, NoTopicTracker) => "- Chưa có dữ liệu theo dõi chủ đề.",
        (OutputLanguage::English, NoTopicTracker) => "- No topic-tracker data yet.",
        (OutputLanguage::Vietnamese, NoConcepts) => "- Chưa có dữ liệu khái niệm.",
        (OutputLanguage::English, NoConcepts) => "- No concept data available.",
        (OutputLanguage::Vietnamese, NoFormulas) => "- Chưa có dữ liệu công thức.",
        (OutputLanguage::English, NoFormulas) => "- No formula data available.",
        (OutputLanguage::Vietnamese, NoQuiz) => "- Chưa có câu hỏi ôn tập.",
        (OutputLanguage::English, NoQuiz) => "- No quiz data available.",
        (OutputLanguage::Vietnamese, NoNextSteps) => "- Chưa xác định bước tiếp theo.",
        (OutputLanguage::English, NoNextSteps) => "- Next steps are not specified yet.",
        (OutputLanguage::Vietnamese, NoQuestionText) => "Chưa có nội dung câu hỏi",
        (OutputLanguage::English, NoQuestionText) => "No question text",
        (OutputLanguage::Vietnamese, AnswerLabel) => "Đáp án",
        (OutputLanguage::English, AnswerLabel) => "Answer",
        (OutputLanguage::Vietnamese, DecisionTableHeader) => {
            "| Quyết định | Lý do | Trạng thái | Người xác nhận |"
        }
        (OutputLanguage::English, DecisionTableHeader) => {
            "| Decision | Rationale | Status | Confirmed by |"
        }
        (OutputLanguage::Vietnamese, ActionTableHeader) => {
            "| Người phụ trách | Hạn chót | Mức ưu tiên | Trạng thái | Hành động |"
        }
        (OutputLanguage::English, ActionTableHeader) => {
            "| Owner | Deadline | Priority | Status | Action |"
        }
        (OutputLanguage::Vietnamese, RiskTableHeader) => {
            "| Rủi ro | Mức độ | Giảm thiểu | Người phụ trách | Trạng thái |"
        }
        (OutputLanguage::English, RiskTableHeader) => {
            "| Risk | Severity | Mitigation | Owner | Status |"
        }
        (OutputLanguage::Vietnamese, TopicTableHeader) => {
            "| Chủ đề | Bắt đầu | Kết thúc | Thời lượng (giây) |"
        }
        (OutputLanguage::English, TopicTableHeader) => {
            "| Topic | Start | End | Duration (seconds) |"
        }
        (OutputLanguage::Vietnamese, ConceptTableHeader) => "| Khái niệm | Giải thích |",
        (OutputLanguage::English, ConceptTableHeader) => "| Concept | Explanation |",
        (OutputLanguage::Vietnamese, FormulaTableHeader) => {
            "| Tên công thức | Biểu thức | Ý nghĩa |"
        }
        (OutputLanguage::English, FormulaTableHeader) => "| Formula | Expression | Meaning |",
        (OutputLanguage::Vietnamese, AdviceAddTranscript) => {
            "Vui lòng bổ sung transcript để tăng độ sâu và độ chính xác của tóm tắt."
        }
        (OutputLanguage::English, AdviceAddTranscript) => {
            "Add transcript evidence to improve summary depth and accuracy."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phrase_exists_in_both_languages() {
        use Phrase::*;
        let all = [
            DocTitle,
            MeetingInfoHeader,
            MeetingTypeLabel,
            SessionModeLabel,
            TimeLabel,
            ExecutiveSummaryHeader,
            KeyPointsHeader,
            KeywordsHeader,
            TopicsHeader,
            DecisionsHeader,
            ActionsHeader,
            RisksHeader,
            AiFiltersHeader,
            TopicTrackerHeader,
            KnowledgeTableHeader,
            FormulasHeader,
            QuizHeader,
            NextStepsHeader,
            NoSummary,
            NoKeyPoints,
            NoKeywords,
            NoTopics,
            NoDecisions,
            NoActions,
            NoRisks,
            NoAiFilters,
            NoTopicTracker,
            NoConcepts,
            NoFormulas,
            NoQuiz,
            NoNextSteps,
            NoQuestionText,
            AnswerLabel,
            DecisionTableHeader,
            ActionTableHeader,
            RiskTableHeader,
            TopicTableHeader,
            ConceptTableHeader,
            FormulaTableHeader,
            AdviceAddTranscript,
        ];
        for entry in all {
            for lang in [OutputLanguage::Vietnamese, OutputLanguage::English] {
                assert!(!phrase(lang, entry).is_empty());
            }
        }
    }
}
