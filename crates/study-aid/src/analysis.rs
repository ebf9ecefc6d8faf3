use std::collections::BTreeMap;

use crate::model::{AnswerRecord, QuizQuestion, Score, Topic, WeakTopicStats};

/// A topic is weak when strictly more than this share of its answers is wrong.
const WEAK_THRESHOLD_PERCENT: usize = 60;

impl WeakTopicStats {
    pub fn is_weak(&self) -> bool {
        self.total > 0 && self.wrong * 100 > self.total * WEAK_THRESHOLD_PERCENT
    }
}

/// Per-topic wrong/total counts. Unanswered questions count as wrong;
/// answers for indexes outside the quiz are ignored.
pub fn topic_stats(answers: &AnswerRecord, quiz: &[QuizQuestion]) -> BTreeMap<Topic, WeakTopicStats> {
    let mut stats: BTreeMap<Topic, WeakTopicStats> = BTreeMap::new();
    for (index, question) in quiz.iter().enumerate() {
        let entry = stats.entry(question.topic).or_default();
        entry.total += 1;
        if answers.get(&index) != Some(&question.correct_index) {
            entry.wrong += 1;
        }
    }
    stats
}

/// Weak topics in topic order.
pub fn analyze_weak_topics(answers: &AnswerRecord, quiz: &[QuizQuestion]) -> Vec<Topic> {
    topic_stats(answers, quiz)
        .into_iter()
        .filter(|(_, s)| s.is_weak())
        .map(|(topic, _)| topic)
        .collect()
}

pub fn score(answers: &AnswerRecord, quiz: &[QuizQuestion]) -> Score {
    let correct = quiz
        .iter()
        .enumerate()
        .filter(|(index, q)| answers.get(index) == Some(&q.correct_index))
        .count();
    Score {
        correct,
        total: quiz.len(),
    }
}
