use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use strum::Display;

use crate::error::MinutesError;

const COURSE_MARKERS: &[&str] = &[
    "study",
    "training",
    "education",
    "learning",
    "workshop",
    "course",
    "class",
    "dao tao",
    "đào tạo",
    "hoc",
    "học",
];

/// Whether a session is a regular meeting or a course/training session.
/// Course sessions get a study pack instead of decision/action tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionType {
    #[default]
    Meeting,
    Course,
}

impl SessionType {
    /// Infers the session type from the stored meeting type, unless the
    /// caller explicitly requested one.
    pub fn infer(meeting_type: &str, requested: Option<SessionType>) -> Self {
        if let Some(requested) = requested {
            return requested;
        }
        let meeting_type = meeting_type.trim().to_lowercase();
        if meeting_type.is_empty() {
            return Self::Meeting;
        }
        if COURSE_MARKERS.iter().any(|marker| meeting_type.contains(marker)) {
            Self::Course
        } else {
            Self::Meeting
        }
    }
}

/// Output format of the rendered minutes document. Unrecognized formats are
/// one of the two hard errors in the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Markdown,
    Html,
    Text,
}

impl FromStr for RenderFormat {
    type Err = MinutesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "text" | "plain" => Ok(Self::Text),
            other => Err(MinutesError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn infers_course_sessions_from_markers() {
        assert_eq!(SessionType::infer("Training/Study", None), SessionType::Course);
        assert_eq!(SessionType::infer("Đào tạo nội bộ", None), SessionType::Course);
        assert_eq!(SessionType::infer("standup", None), SessionType::Meeting);
        assert_eq!(SessionType::infer("", None), SessionType::Meeting);
    }

    #[test]
    fn explicit_request_overrides_inference() {
        assert_eq!(
            SessionType::infer("workshop", Some(SessionType::Meeting)),
            SessionType::Meeting
        );
    }

    #[test]
    fn render_format_parses_known_aliases() {
        assert_eq!("markdown".parse::<RenderFormat>(), Ok(RenderFormat::Markdown));
        assert_eq!("HTML".parse::<RenderFormat>(), Ok(RenderFormat::Html));
        assert_eq!("plain".parse::<RenderFormat>(), Ok(RenderFormat::Text));
    }

    #[test]
    fn render_format_rejects_unknown_values() {
        assert_eq!(
            "pdf".parse::<RenderFormat>(),
            Err(MinutesError::UnsupportedFormat("pdf".to_string()))
        );
    }
}
