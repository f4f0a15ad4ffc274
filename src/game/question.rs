//! Questions and their aggregate answer statistics

use std::collections::VecDeque;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{Category, QuestionId};

/// Number of most recent outcomes kept per question
pub const RECENT_HISTORY_LEN: usize = 10;

/// A multiple-choice question. Immutable once drawn into a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    /// Answer texts in display order
    pub answers: Vec<String>,
    /// Index into `answers`
    pub correct_index: usize,
    pub categories: AHashSet<Category>,
    /// 0.0 = trivial, 1.0 = hardest
    pub difficulty: f64,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        answers: Vec<String>,
        correct_index: usize,
        categories: impl IntoIterator<Item = Category>,
        difficulty: f64,
    ) -> Self {
        Self {
            id: QuestionId::new(id),
            prompt: prompt.into(),
            answers,
            correct_index,
            categories: categories.into_iter().collect(),
            difficulty: difficulty.clamp(0.0, 1.0),
        }
    }

    pub fn is_correct(&self, answer: Option<usize>) -> bool {
        answer == Some(self.correct_index)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Points a correct answer is worth before any multiplier, in [1, 2]
    pub fn base_points(&self) -> f64 {
        1.0 + self.difficulty
    }
}

/// Bounded FIFO of the latest outcomes; the oldest entry is dropped first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentOutcomes(VecDeque<bool>);

impl RecentOutcomes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, correct: bool) {
        self.0.push_back(correct);
        while self.0.len() > RECENT_HISTORY_LEN {
            self.0.pop_front();
        }
    }

    pub fn extend(&mut self, outcomes: impl IntoIterator<Item = bool>) {
        for outcome in outcomes {
            self.push(outcome);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn correct(&self) -> usize {
        self.0.iter().filter(|&&c| c).count()
    }
}

impl FromIterator<bool> for RecentOutcomes {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut outcomes = Self::new();
        outcomes.extend(iter);
        outcomes
    }
}

/// Aggregate human answer statistics for one question, owned by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub correct_count: u64,
    pub incorrect_count: u64,
    pub recent: RecentOutcomes,
}

impl QuestionStats {
    pub fn total_answers(&self) -> u64 {
        self.correct_count + self.incorrect_count
    }
}
