use serde::Deserialize;
use serde::Serialize;

/// Environment variable consulted by [`OutputLanguage::from_env`].
pub const OUTPUT_LANGUAGE_ENV_VAR: &str = "MINUTES_OUTPUT_LANGUAGE";

/// Output language for every user-facing string the pipeline emits.
///
/// Read once per request from configuration; the deployment this was built
/// for defaults to Vietnamese.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLanguage {
    #[default]
    Vietnamese,
    English,
}

impl OutputLanguage {
    /// Maps the many aliases seen in configuration ("vi", "vi-VN",
    /// "vietnamese", "tiếng việt", ...) onto a canonical language. Anything
    /// unrecognized falls back to English rather than erroring.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "" | "vi" | "vi-vn" | "vn" | "vietnamese" | "vietnam" | "tieng viet"
            | "tiếng việt" => Self::Vietnamese,
            _ => Self::English,
        }
    }

    pub fn from_env() -> Self {
        std::env::var(OUTPUT_LANGUAGE_ENV_VAR)
            .map(|code| Self::from_code(&code))
            .unwrap_or_default()
    }

    pub fn is_vietnamese(self) -> bool {
        matches!(self, Self::Vietnamese)
    }

    /// English-language name of the language, used when instructing a model
    /// which language to answer in.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vietnamese => "Vietnamese",
            Self::English => "English",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aliases_map_to_vietnamese() {
        for code in ["vi", "VI-vn", "vn", "Vietnamese", "vietnam", "tieng viet", "tiếng việt", ""] {
            assert_eq!(OutputLanguage::from_code(code), OutputLanguage::Vietnamese);
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_english() {
        for code in ["en", "en-US", "fr", "japanese"] {
            assert_eq!(OutputLanguage::from_code(code), OutputLanguage::English);
        }
    }
}
