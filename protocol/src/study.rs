use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub concept: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub example: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub name: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub usage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Study material extracted for course-type sessions: concept table,
/// formula table, and review quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPack {
    #[serde(default)]
    pub concepts: Vec<Concept>,
    #[serde(default)]
    pub formulas: Vec<Formula>,
    #[serde(default)]
    pub quiz: Vec<QuizItem>,
}

impl StudyPack {
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty() && self.formulas.is_empty() && self.quiz.is_empty()
    }
}
