use std::collections::HashMap;
use std::path::Path;

use crate::error::AppError;
use crate::model::{StudyPath, Topic};

const FALLBACK_RESOURCES: &[&str] = &[
    "Review basics from textbooks",
    "Search YouTube for explanation videos",
    "Take a practice quiz",
];

const BUILTIN_RESOURCES: &[(Topic, &[&str])] = &[
    (
        Topic::Programming,
        &[
            "Solve 5 LeetCode easy problems",
            "Watch a crash course on algorithms (YouTube)",
            "Revise basic OOP concepts (inheritance, polymorphism)",
            "Build a small project (e.g., calculator app)",
            "Read 2 GeeksforGeeks articles on data structures",
        ],
    ),
    (
        Topic::Maths,
        &[
            "Revise key formulas (algebra, geometry)",
            "Solve 10 questions from RS Aggarwal",
            "Watch Khan Academy video on current topic",
            "Attempt 1 mock test",
        ],
    ),
    (
        Topic::Aptitude,
        &[
            "Solve logical reasoning puzzles",
            "Practice speed-distance-time problems",
            "Use Indiabix or SSS aptitude practice sets",
            "Watch quick tip videos for shortcuts",
        ],
    ),
    (
        Topic::Communication,
        &[
            "Record yourself explaining a topic in 1 min",
            "Watch a TED Talk and take notes",
            "Practice active listening for 10 mins/day",
            "Write and review a formal email draft",
        ],
    ),
    (
        Topic::General,
        &[
            "Read top 5 current affairs of the day",
            "Watch an explainer video (e.g., UN, climate, tech)",
            "Take a GK quiz online",
        ],
    ),
    (
        Topic::Education,
        &[
            "Review your recent class notes",
            "Make 5 flashcards on hard concepts",
            "Teach a concept to a peer or yourself",
        ],
    ),
];

/// Static topic → recommended study actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTable {
    by_topic: HashMap<Topic, Vec<String>>,
    fallback: Vec<String>,
}

impl ResourceTable {
    pub fn new(by_topic: HashMap<Topic, Vec<String>>) -> Self {
        Self {
            by_topic,
            fallback: FALLBACK_RESOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_RESOURCES
                .iter()
                .map(|(topic, items)| (*topic, items.iter().map(|s| s.to_string()).collect()))
                .collect(),
        )
    }

    /// Parses a JSON object of topic name → list of actions. Topics left out use the fallback.
    /// Names that resolve to the same topic (e.g. "maths" and "Maths") are rejected.
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(content)
            .map_err(|e| AppError::Config(format!("invalid resource table: {e}")))?;
        let mut by_topic = HashMap::with_capacity(raw.len());
        for (name, items) in raw {
            let topic = name
                .parse::<Topic>()
                .map_err(|e| AppError::Config(format!("invalid resource table: {e}")))?;
            if by_topic.insert(topic, items).is_some() {
                return Err(AppError::Config(format!(
                    "invalid resource table: topic {topic} listed more than once"
                )));
            }
        }
        Ok(Self::new(by_topic))
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Actions for a topic name (case-insensitive). Unknown or unlisted names get the fallback.
    pub fn resources_for(&self, name: &str) -> &[String] {
        name.parse::<Topic>()
            .ok()
            .and_then(|topic| self.by_topic.get(&topic))
            .unwrap_or(&self.fallback)
    }

    /// One path per requested name, in request order, echoing the name as given.
    pub fn study_paths(&self, topics: &[String]) -> Vec<StudyPath> {
        topics
            .iter()
            .map(|name| StudyPath {
                topic: name.clone(),
                resources: self.resources_for(name).to_vec(),
            })
            .collect()
    }
}

impl Default for ResourceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_topic_returns_its_list() {
        let table = ResourceTable::builtin();
        let items = table.resources_for("Programming");
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], "Solve 5 LeetCode easy problems");
    }

    #[test]
    fn lookup_ignores_case() {
        let table = ResourceTable::builtin();
        assert_eq!(
            table.resources_for("communication"),
            table.resources_for("Communication")
        );
        assert_eq!(table.resources_for("GENERAL")[2], "Take a GK quiz online");
    }

    #[test]
    fn unknown_topic_gets_fallback() {
        let table = ResourceTable::builtin();
        assert_eq!(
            table.resources_for("Underwater Basket Weaving"),
            &[
                "Review basics from textbooks".to_string(),
                "Search YouTube for explanation videos".to_string(),
                "Take a practice quiz".to_string(),
            ]
        );
    }

    #[test]
    fn every_topic_has_builtin_resources() {
        let table = ResourceTable::builtin();
        for topic in Topic::ALL {
            assert_ne!(table.resources_for(topic.as_str()), table.fallback.as_slice());
        }
    }

    #[test]
    fn study_paths_keep_request_order_and_names() {
        let table = ResourceTable::builtin();
        let paths = table.study_paths(&["maths".to_string(), "Cooking".to_string()]);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].topic, "maths");
        assert_eq!(paths[0].resources[0], "Revise key formulas (algebra, geometry)");
        assert_eq!(paths[1].topic, "Cooking");
        assert_eq!(paths[1].resources.len(), 3);
    }

    #[test]
    fn from_json_rejects_topics_differing_only_in_case() {
        let err = ResourceTable::from_json(r#"{"maths": ["a"], "Maths": ["b"]}"#).unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains("Maths listed more than once"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_json_partial_table() {
        let table = ResourceTable::from_json(r#"{"maths": ["Do sums"]}"#).unwrap();
        assert_eq!(table.resources_for("Maths"), &["Do sums".to_string()]);
        assert_eq!(table.resources_for("Programming").len(), 3);
    }

    #[test]
    fn from_json_rejects_unknown_topic() {
        assert!(matches!(
            ResourceTable::from_json(r#"{"Cooking": ["Boil water"]}"#),
            Err(AppError::Config(_))
        ));
    }
}
