use thiserror::Error;

/// Hard failures surfaced to the caller. Everything else in the pipeline
/// degrades to placeholder text instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinutesError {
    #[error("context bundle carries no identifying information")]
    MissingContext,

    #[error("unsupported minutes format: `{0}`")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, MinutesError>;
