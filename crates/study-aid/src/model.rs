use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Closed set of quiz topics.
///
/// Variant order is the keyword table's default traversal order and the order
/// in which weak topics are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Topic {
    Maths,
    Aptitude,
    Programming,
    Communication,
    General,
    Education,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Maths,
        Topic::Aptitude,
        Topic::Programming,
        Topic::Communication,
        Topic::General,
        Topic::Education,
    ];

    /// Label used when nothing else matches.
    pub const FALLBACK: Topic = Topic::General;

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Maths => "Maths",
            Topic::Aptitude => "Aptitude",
            Topic::Programming => "Programming",
            Topic::Communication => "Communication",
            Topic::General => "General",
            Topic::Education => "Education",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topic: {0}")]
pub struct UnknownTopic(pub String);

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownTopic(name.to_string()))
    }
}

/// Unknown names collapse to [`Topic::FALLBACK`] instead of failing the request.
impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Topic::FALLBACK))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub topic: Topic,
}

/// Question index to selected option index.
pub type AnswerRecord = HashMap<usize, usize>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakTopicStats {
    pub wrong: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyPath {
    pub topic: String,
    pub resources: Vec<String>,
}
