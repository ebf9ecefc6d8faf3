//! Keyword-based topic classification.
//!
//! The policy is first-match: topics are tried in table order and the first
//! one owning any keyword contained in the text wins, no matter how many
//! keywords other topics match. Several keywords ("ratio", "speed",
//! "distance", "train", "percentage", "logical") appear under both Maths and
//! Aptitude, so Aptitude only wins through its own exclusive keywords.
//!
//! TODO: score topics by keyword hit count instead of table order once the
//! keyword lists are deduplicated.

use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;
use crate::model::Topic;

const BUILTIN_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Maths,
        &[
            "probability", "math", "average", "percentage", "ratio", "logical", "reasoning",
            "series", "train", "speed", "distance", "equation",
        ],
    ),
    (
        Topic::Aptitude,
        &[
            "problem", "logical", "pattern", "puzzle", "sequence", "train", "ratio", "speed",
            "percentage", "mathematical", "time", "distance", "work",
        ],
    ),
    (
        Topic::Programming,
        &[
            "code", "algorithm", "variable", "loop", "function", "oop", "python", "java", "api",
            "compile", "debug", "class", "object", "javascript",
        ],
    ),
    (
        Topic::Communication,
        &[
            "email", "language", "verbal", "nonverbal", "tone", "clarity", "expression",
            "communication", "team", "presentation", "listening", "interpersonal",
            "public speaking",
        ],
    ),
    (
        Topic::General,
        &[
            "history", "geography", "science", "politics", "culture", "general", "knowledge",
            "current affairs", "events",
        ],
    ),
    (
        Topic::Education,
        &[
            "learning", "school", "teacher", "student", "curriculum", "study", "exam", "subject",
            "classroom", "pedagogy",
        ],
    ),
];

/// Ordered topic → keyword lists. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<(Topic, Vec<String>)>,
}

#[derive(Debug, Deserialize)]
struct KeywordEntry {
    topic: String,
    keywords: Vec<String>,
}

impl KeywordTable {
    /// Keywords are lowercased; blank keywords are dropped since they would match any text.
    pub fn new(entries: impl IntoIterator<Item = (Topic, Vec<String>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(topic, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (topic, keywords)
            })
            .collect();
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_KEYWORDS.iter().map(|(topic, keywords)| {
            (*topic, keywords.iter().map(|k| k.to_string()).collect())
        }))
    }

    /// Parses a JSON array of `{"topic": "...", "keywords": [...]}`; array order is table order.
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        let raw: Vec<KeywordEntry> = serde_json::from_str(content)
            .map_err(|e| AppError::Config(format!("invalid keyword table: {e}")))?;
        let entries = raw
            .into_iter()
            .map(|entry| {
                let topic = entry
                    .topic
                    .parse::<Topic>()
                    .map_err(|e| AppError::Config(format!("invalid keyword table: {e}")))?;
                Ok((topic, entry.keywords))
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(Self::new(entries))
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    pub fn entries(&self) -> &[(Topic, Vec<String>)] {
        &self.entries
    }

    pub fn classify(&self, text: &str) -> Topic {
        let lower = text.to_lowercase();
        self.entries
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|(topic, _)| *topic)
            .unwrap_or(Topic::FALLBACK)
    }

    /// One label per input, in input order.
    pub fn classify_all<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> Vec<Topic> {
        texts.into_iter().map(|t| self.classify(t)).collect()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}
