//! Per-game options supplied by the lobby
//!
//! Every tunable of a match lives here, with the defaults a casual lobby
//! starts from. Options can also be read from a TOML file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TriviaError};
use crate::core::types::{Category, Seconds};

/// Configuration for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    // === GAME LENGTH ===
    /// Number of rounds (one question per round). Must be at least 1.
    pub questions_per_game: usize,

    // === TIMERS ===
    /// Seconds the turn player has to pick a category and difficulty
    ///
    /// When it runs out the engine picks the missing parts at random
    /// from the turn player's unused options.
    pub selection_time_limit: Seconds,

    /// Seconds everyone has to answer
    ///
    /// Players who have not answered when it expires are recorded
    /// with an invalid answer.
    pub question_time_limit: Seconds,

    // === POWER-UPS ===
    /// I-KNOW uses granted to every player at game start, never replenished
    pub i_know_powerups_per_player: u32,

    // === SELECTION SPACE ===
    /// Categories a turn player may choose from
    pub categories: Vec<Category>,

    /// Difficulty levels a turn player may choose from, each in [0, 1]
    pub difficulty_levels: Vec<f64>,

    /// Half-width of the difficulty range requested from the question store
    ///
    /// At 0.1, picking difficulty 0.5 accepts any question in [0.4, 0.6].
    pub difficulty_window: f64,

    // === AI PACING ===
    /// Ticks between each stage of an AI turn player's reveal
    ///
    /// The AI decides instantly; the category is shown after this many
    /// ticks, then the difficulty, then the selection is locked in.
    /// Zero locks the selection in immediately.
    pub ai_reveal_ticks: u32,

    /// Seed for every random draw the engine makes (None = from entropy)
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            questions_per_game: 10,
            selection_time_limit: 15,
            question_time_limit: 20,
            i_know_powerups_per_player: 2,
            categories: vec![
                "science".to_string(),
                "history".to_string(),
                "geography".to_string(),
                "sports".to_string(),
                "entertainment".to_string(),
                "art".to_string(),
            ],
            difficulty_levels: vec![0.1, 0.3, 0.5, 0.7, 0.9],
            difficulty_window: 0.1,
            ai_reveal_ticks: 1,
            seed: None,
        }
    }
}

impl GameOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML, filling unspecified fields with defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let options: GameOptions = toml::from_str(contents)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the options for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.questions_per_game == 0 {
            return Err(TriviaError::InvalidConfig(
                "questions_per_game must be at least 1".into(),
            ));
        }

        if self.selection_time_limit == 0 || self.question_time_limit == 0 {
            return Err(TriviaError::InvalidConfig(
                "time limits must be positive".into(),
            ));
        }

        if self.categories.is_empty() {
            return Err(TriviaError::InvalidConfig(
                "at least one category is required".into(),
            ));
        }

        if self.difficulty_levels.is_empty() {
            return Err(TriviaError::InvalidConfig(
                "at least one difficulty level is required".into(),
            ));
        }

        if let Some(bad) = self
            .difficulty_levels
            .iter()
            .find(|d| !(0.0..=1.0).contains(*d))
        {
            return Err(TriviaError::InvalidConfig(format!(
                "difficulty level {} is outside [0, 1]",
                bad
            )));
        }

        if self.difficulty_window.is_nan() || self.difficulty_window < 0.0 {
            return Err(TriviaError::InvalidConfig(
                "difficulty_window must be non-negative".into(),
            ));
        }

        Ok(())
    }
}

/// Load game options from a TOML file
pub fn load_options(path: &Path) -> Result<GameOptions> {
    let contents = fs::read_to_string(path)?;
    GameOptions::from_toml_str(&contents)
}
