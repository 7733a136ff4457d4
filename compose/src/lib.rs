//! Normalization, fallback synthesis, and rendering of meeting minutes.
//!
//! The entry point is [`compose_minutes`]: given the raw text of a model
//! response and the read-only [`minutes_protocol::ContextBundle`], it
//! produces a [`minutes_protocol::ComposedMinutes`] whose summary is
//! guaranteed non-empty, whose row lists are typed and placeholder-free, and
//! whose rendered document carries every section in fixed order.
//!
//! The pipeline is pure and synchronous; it performs no I/O and holds no
//! state across invocations, so it is safe to call concurrently.

mod fallback;
mod keywords;
mod payload;
mod phrases;
mod pipeline;
mod render;
mod rows;

pub use fallback::synthesize;
pub use keywords::build_ai_filters;
pub use keywords::derive_keywords;
pub use keywords::derive_topics;
pub use payload::MAX_KEY_POINTS;
pub use payload::PlaceholderFilter;
pub use payload::extract_summary_payload;
pub use payload::normalize_key_points;
pub use payload::normalize_label_list;
pub use pipeline::ComposeOptions;
pub use pipeline::compose_minutes;
pub use render::MinutesDocument;
pub use render::render_minutes;
pub use rows::normalize_action_rows;
pub use rows::normalize_decision_rows;
pub use rows::normalize_risk_rows;
pub use rows::normalize_study_pack;

pub(crate) fn compile_regex(pattern: &str) -> regex::Regex {
    match regex::Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}
