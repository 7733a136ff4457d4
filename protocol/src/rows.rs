use serde::Deserialize;
use serde::Serialize;

/// A tracked action item. `description` is guaranteed non-empty and
/// non-placeholder once a row has passed payload normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    pub description: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRow {
    pub description: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub confirmed_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRow {
    pub description: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub mitigation: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub owner: String,
}
