//! Shared data model for the minutes composition pipeline.
//!
//! Everything here is plain data: the read-only [`ContextBundle`] supplied by
//! the surrounding application, the typed rows recovered from model output,
//! and the composed result handed back for persistence. No I/O happens in
//! this crate.

mod bundle;
mod error;
mod language;
mod minutes;
mod rows;
mod session;
mod study;

pub use bundle::ContextBundle;
pub use bundle::DocumentRef;
pub use bundle::TopicSegment;
pub use error::MinutesError;
pub use error::Result;
pub use language::OUTPUT_LANGUAGE_ENV_VAR;
pub use language::OutputLanguage;
pub use minutes::ComposedMinutes;
pub use minutes::MinutesSummary;
pub use rows::ActionRow;
pub use rows::DecisionRow;
pub use rows::RiskRow;
pub use session::RenderFormat;
pub use session::SessionType;
pub use study::Concept;
pub use study::Formula;
pub use study::QuizItem;
pub use study::StudyPack;
