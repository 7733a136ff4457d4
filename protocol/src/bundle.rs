use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::rows::ActionRow;
use crate::rows::DecisionRow;
use crate::rows::RiskRow;

/// A document already linked to the meeting by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_type: String,
}

/// One entry of the topic timeline, timestamps in seconds from session start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicSegment {
    pub topic_id: String,
    pub title: String,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub duration_seconds: Option<f64>,
}

impl TopicSegment {
    /// Builds a segment, deriving the duration when both endpoints exist and
    /// are ordered sanely.
    pub fn new(
        topic_id: impl Into<String>,
        title: impl Into<String>,
        start_time: Option<f64>,
        end_time: Option<f64>,
    ) -> Self {
        let duration_seconds = match (start_time, end_time) {
            (Some(start), Some(end)) if end >= start => Some(((end - start) * 100.0).round() / 100.0),
            _ => None,
        };
        Self {
            topic_id: topic_id.into(),
            title: title.into(),
            start_time,
            end_time,
            duration_seconds,
        }
    }
}

/// Read-only evidence bundle supplied by the surrounding application.
///
/// The pipeline never mutates this; it is the ground truth that fallback
/// synthesis quotes from when the model response yields nothing usable.
/// `transcript` arrives pre-truncated to whatever character budget the call
/// site chose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextBundle {
    pub title: String,
    #[serde(default)]
    pub meeting_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub actions: Vec<ActionRow>,
    #[serde(default)]
    pub decisions: Vec<DecisionRow>,
    #[serde(default)]
    pub risks: Vec<RiskRow>,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    #[serde(default)]
    pub topic_tracker: Vec<TopicSegment>,
    #[serde(default)]
    pub visual_context: Vec<String>,
}

impl ContextBundle {
    /// Whether the bundle carries enough identifying information for
    /// synthesis to be attempted at all.
    pub fn has_identity(&self) -> bool {
        !self.title.trim().is_empty()
            || !self.description.trim().is_empty()
            || !self.transcript.trim().is_empty()
            || !self.actions.is_empty()
            || !self.decisions.is_empty()
            || !self.risks.is_empty()
            || !self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_segment_derives_duration() {
        let segment = TopicSegment::new("t1", "Kickoff", Some(10.0), Some(95.5));
        assert_eq!(segment.duration_seconds, Some(85.5));
    }

    #[test]
    fn topic_segment_ignores_inverted_bounds() {
        let segment = TopicSegment::new("t1", "Kickoff", Some(95.5), Some(10.0));
        assert_eq!(segment.duration_seconds, None);
    }

    #[test]
    fn empty_bundle_has_no_identity() {
        assert!(!ContextBundle::default().has_identity());
        let bundle = ContextBundle {
            title: "Q3 sync".to_string(),
            ..Default::default()
        };
        assert!(bundle.has_identity());
    }
}
