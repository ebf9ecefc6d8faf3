use regex::Regex;

use crate::model::{QuizQuestion, Topic};
use crate::topic::KeywordTable;

/// A question as scanned from quiz text, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    /// The full numbered line, marker included. This is what gets classified.
    pub heading: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: Option<usize>,
}

impl QuestionDraft {
    fn new(heading: &str, prompt: &str) -> Self {
        Self {
            heading: heading.to_string(),
            prompt: prompt.to_string(),
            options: Vec::new(),
            correct_index: None,
        }
    }

    /// A draft is kept only with a prompt, at least two options and a known answer.
    pub fn is_complete(&self) -> bool {
        !self.prompt.is_empty() && self.options.len() >= 2 && self.correct_index.is_some()
    }

    fn into_question(self, topic: Topic) -> Option<QuizQuestion> {
        Some(QuizQuestion {
            correct_index: self.correct_index?,
            question: self.prompt,
            options: self.options,
            topic,
        })
    }
}

/// Parses free-form quiz text into questions.
///
/// Expected shape, one item per line:
///
/// ```text
/// 1. Question text?
///    a) First option
///    b) Second option
/// Answer: b
/// ```
///
/// Blocks that never become complete are dropped without error, so the result
/// may hold fewer questions than the text numbers. Each kept question is
/// classified exactly once, after scanning.
pub fn parse_quiz(raw: &str, keywords: &KeywordTable) -> Vec<QuizQuestion> {
    let drafts = scan_quiz(raw);
    let topics = keywords.classify_all(drafts.iter().map(|d| d.heading.as_str()));
    drafts
        .into_iter()
        .zip(topics)
        .filter_map(|(draft, topic)| draft.into_question(topic))
        .collect()
}

/// Line scan without classification. Returns only complete drafts, in input order.
pub fn scan_quiz(raw: &str) -> Vec<QuestionDraft> {
    let question_re = Regex::new(r"^[0-9]+\.\s*(.*)$").expect("valid regex");
    let option_re = Regex::new(r"^[a-dA-D]\)\s*(.*)$").expect("valid regex");
    let answer_line_re = Regex::new(r"(?i)^answer:").expect("valid regex");
    let answer_re = Regex::new(r"(?i)^answer:\s*([a-d])").expect("valid regex");

    let mut drafts = Vec::new();
    let mut current: Option<QuestionDraft> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(caps) = question_re.captures(line) {
            if let Some(done) = current.take().filter(QuestionDraft::is_complete) {
                drafts.push(done);
            }
            current = Some(QuestionDraft::new(line, caps[1].trim()));
            continue;
        }

        let Some(draft) = current.as_mut() else {
            continue;
        };

        if let Some(caps) = option_re.captures(line) {
            draft.options.push(caps[1].trim().to_string());
        } else if answer_line_re.is_match(line) {
            if let Some(caps) = answer_re.captures(line) {
                draft.correct_index = letter_index(&caps[1]);
            }
        }
    }

    if let Some(done) = current.filter(QuestionDraft::is_complete) {
        drafts.push(done);
    }
    drafts
}

fn letter_index(letter: &str) -> Option<usize> {
    let c = letter.chars().next()?.to_ascii_lowercase();
    c.is_ascii_lowercase().then(|| (c as u8 - b'a') as usize)
}
