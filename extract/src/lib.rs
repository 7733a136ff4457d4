//! Extraction of structured data from unreliable model text output.
//!
//! Models asked for strict JSON return, in practice, JSON wrapped in prose or
//! code fences, single-quoted pseudo-JSON, unquoted keys, trailing commas, or
//! free text with embedded `key: value` fragments. This crate turns that text
//! into something typed, in three layers that degrade gracefully:
//!
//! 1. [`normalize_response_text`] — fence/quote cleanup.
//! 2. [`parse_object_loose`] — strict parse, then increasingly permissive
//!    candidate variants.
//! 3. [`recover_summary`] / [`recover_key_points`] — targeted regex recovery
//!    of specific fields when no variant parses.
//!
//! Every function here is total: malformed input yields an empty result,
//! never an error.

mod keys;
mod loose;
mod normalize;
mod recover;

pub use keys::KEY_POINT_KEYS;
pub use keys::SUMMARY_KEYS;
pub use loose::parse_object_loose;
pub use normalize::decode_jsonish_text;
pub use normalize::normalize_response_text;
pub use recover::recover_key_points;
pub use recover::recover_summary;

/// Compiles a pattern that is a compile-time constant of this crate.
pub(crate) fn compile_regex(pattern: &str) -> regex::Regex {
    match regex::Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}
