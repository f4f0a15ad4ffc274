//! Question store interface
//!
//! The engine never fetches or persists anything itself. A session driver
//! forwards `QuestionRequest`s and calibration results to an implementation
//! of `QuestionStore`. `InMemoryQuestionStore` backs tests and the headless
//! playtest runner.

use std::fs;
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TriviaError};
use crate::core::types::{Category, QuestionId};
use crate::game::calibration::CalibrationOutcome;
use crate::game::question::{Question, QuestionStats};

/// Slack on range bounds so 0.7 ± 0.1 still admits 0.8
const RANGE_EPSILON: f64 = 1e-9;

/// Inclusive difficulty bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRange {
    pub min: f64,
    pub max: f64,
}

impl DifficultyRange {
    /// `center ± window`, clamped to [0, 1]
    pub fn around(center: f64, window: f64) -> Self {
        Self {
            min: (center - window).clamp(0.0, 1.0),
            max: (center + window).clamp(0.0, 1.0),
        }
    }

    pub fn contains(&self, difficulty: f64) -> bool {
        difficulty >= self.min - RANGE_EPSILON && difficulty <= self.max + RANGE_EPSILON
    }
}

/// An outstanding request for a question, answered via
/// `RoundStateMachine::provide_question`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub id: u64,
    pub category: Category,
    pub difficulty: f64,
    pub range: DifficultyRange,
}

/// Narrow read/write interface to wherever questions live
pub trait QuestionStore {
    /// A question tagged with `category` whose difficulty lies in `range`
    fn draw_question(&mut self, category: &str, range: DifficultyRange) -> Option<Question>;

    /// Current aggregate statistics for a question
    fn stats(&self, id: &QuestionId) -> Result<QuestionStats>;

    /// Persist a calibration result
    fn record_outcome(&mut self, id: &QuestionId, outcome: &CalibrationOutcome) -> Result<()>;
}

/// Question bank held in memory
///
/// Draws avoid repeating a question within one store's lifetime until
/// every match has been drawn.
#[derive(Debug, Clone)]
pub struct InMemoryQuestionStore {
    questions: Vec<Question>,
    stats: AHashMap<QuestionId, QuestionStats>,
    drawn: AHashSet<QuestionId>,
    rng: ChaCha8Rng,
}

impl InMemoryQuestionStore {
    pub fn new(questions: Vec<Question>, seed: u64) -> Self {
        Self {
            questions,
            stats: AHashMap::new(),
            drawn: AHashSet::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Parse a JSON array of questions
    pub fn from_json_str(json: &str, seed: u64) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Ok(Self::new(questions, seed))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionStore for InMemoryQuestionStore {
    fn draw_question(&mut self, category: &str, range: DifficultyRange) -> Option<Question> {
        let matching: Vec<usize> = self
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.has_category(category) && range.contains(q.difficulty))
            .map(|(i, _)| i)
            .collect();

        let fresh: Vec<usize> = matching
            .iter()
            .copied()
            .filter(|i| !self.drawn.contains(&self.questions[*i].id))
            .collect();

        let pool = if fresh.is_empty() { &matching } else { &fresh };
        if pool.is_empty() {
            return None;
        }

        let question = self.questions[pool[self.rng.gen_range(0..pool.len())]].clone();
        self.drawn.insert(question.id.clone());
        Some(question)
    }

    fn stats(&self, id: &QuestionId) -> Result<QuestionStats> {
        if self.question(id).is_none() {
            return Err(TriviaError::QuestionNotFound(id.clone()));
        }
        Ok(self.stats.get(id).cloned().unwrap_or_default())
    }

    fn record_outcome(&mut self, id: &QuestionId, outcome: &CalibrationOutcome) -> Result<()> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| &q.id == id)
            .ok_or_else(|| TriviaError::QuestionNotFound(id.clone()))?;
        question.difficulty = outcome.new_difficulty;
        self.stats.insert(id.clone(), outcome.stats.clone());
        Ok(())
    }
}

/// Load a question bank from a JSON file
pub fn load_questions(path: &Path, seed: u64) -> Result<InMemoryQuestionStore> {
    let contents = fs::read_to_string(path)?;
    InMemoryQuestionStore::from_json_str(&contents, seed)
}
