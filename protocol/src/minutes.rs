use serde::Deserialize;
use serde::Serialize;

use crate::rows::ActionRow;
use crate::rows::DecisionRow;
use crate::rows::RiskRow;
use crate::study::StudyPack;

/// Canonical executive-summary record.
///
/// Invariants enforced by the pipeline: `summary` is never empty in the final
/// output, and `key_points` entries are de-duplicated case-insensitively with
/// bullet markers stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinutesSummary {
    pub summary: String,
    pub key_points: Vec<String>,
}

/// Everything the pipeline produces for one generation request: the
/// normalized summary, the typed row lists for the item tables, derived
/// metadata, and the rendered minutes document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposedMinutes {
    pub summary: MinutesSummary,
    pub keywords: Vec<String>,
    pub topics: Vec<String>,
    pub actions: Vec<ActionRow>,
    pub decisions: Vec<DecisionRow>,
    pub risks: Vec<RiskRow>,
    pub next_steps: Vec<String>,
    pub ai_filters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_pack: Option<StudyPack>,
    pub rendered: String,
}
