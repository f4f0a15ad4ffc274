//! Players and their per-round / per-game transient state
//!
//! Transient fields are split by lifetime so the reset rules are explicit:
//! `RoundPlayerState` is replaced wholesale at every round start, while
//! `GamePlayerState` lives until the game ends.

use ahash::AHashSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::ai::AiPersonality;
use crate::core::types::{Category, DifficultyKey, PlayerId};

/// State that is reset at the start of every round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundPlayerState {
    pub has_answered: bool,
    /// `None` when the player timed out
    pub selected_answer: Option<usize>,
    pub used_i_know_this_round: bool,
}

/// State that persists for the whole game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePlayerState {
    pub i_know_remaining: u32,
    pub used_categories: AHashSet<Category>,
    pub used_difficulties: AHashSet<DifficultyKey>,
}

impl GamePlayerState {
    pub fn new(i_know_allotment: u32) -> Self {
        Self {
            i_know_remaining: i_know_allotment,
            ..Self::default()
        }
    }

    /// Consume one I-KNOW use. Returns false when none are left.
    pub fn consume_i_know(&mut self) -> bool {
        match self.i_know_remaining.checked_sub(1) {
            Some(left) => {
                self.i_know_remaining = left;
                true
            }
            None => false,
        }
    }

    pub fn has_used_category(&self, category: &str) -> bool {
        self.used_categories.contains(category)
    }

    pub fn has_used_difficulty(&self, difficulty: f64) -> bool {
        self.used_difficulties.contains(&OrderedFloat(difficulty))
    }

    /// Categories from `all` this player has not used yet, in `all` order
    pub fn unused_categories(&self, all: &[Category]) -> Vec<Category> {
        all.iter()
            .filter(|c| !self.has_used_category(c))
            .cloned()
            .collect()
    }

    /// Difficulties from `all` this player has not used yet, in `all` order
    pub fn unused_difficulties(&self, all: &[f64]) -> Vec<f64> {
        all.iter()
            .copied()
            .filter(|d| !self.has_used_difficulty(*d))
            .collect()
    }

    /// Clear either used set that would leave no choice at all
    pub fn refresh_exhausted(&mut self, categories: &[Category], difficulties: &[f64]) {
        if categories.iter().all(|c| self.has_used_category(c)) {
            self.used_categories.clear();
        }
        if difficulties.iter().all(|d| self.has_used_difficulty(*d)) {
            self.used_difficulties.clear();
        }
    }

    pub fn mark_used(&mut self, category: &str, difficulty: f64) {
        self.used_categories.insert(category.to_string());
        self.used_difficulties.insert(OrderedFloat(difficulty));
    }

    pub fn unmark(&mut self, category: &str, difficulty: f64) {
        self.used_categories.remove(category);
        self.used_difficulties.remove(&OrderedFloat(difficulty));
    }
}

/// A seat in the game, human or AI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_ai: bool,
    pub is_ready: bool,
    /// Cumulative score; never clamped, may go negative
    pub score: f64,
    pub personality: Option<AiPersonality>,
    pub round: RoundPlayerState,
    pub game: GamePlayerState,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            is_ai: false,
            is_ready: false,
            score: 0.0,
            personality: None,
            round: RoundPlayerState::default(),
            game: GamePlayerState::default(),
        }
    }

    pub fn ai(name: impl Into<String>, personality: AiPersonality) -> Self {
        Self {
            is_ai: true,
            is_ready: true,
            personality: Some(personality),
            ..Self::human(name)
        }
    }

    pub fn reset_round(&mut self) {
        self.round = RoundPlayerState::default();
    }

    /// Personality to drive decisions with; humans fall back to the default
    pub fn personality_or_default(&self) -> AiPersonality {
        self.personality.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec!["science".into(), "history".into()]
    }

    #[test]
    fn test_consume_i_know_never_negative() {
        let mut state = GamePlayerState::new(1);
        assert!(state.consume_i_know());
        assert!(!state.consume_i_know());
        assert_eq!(state.i_know_remaining, 0);
    }

    #[test]
    fn test_unused_sets_filter_in_order() {
        let mut state = GamePlayerState::new(0);
        state.mark_used("science", 0.5);

        assert_eq!(state.unused_categories(&categories()), vec!["history".to_string()]);
        assert_eq!(state.unused_difficulties(&[0.1, 0.5, 0.9]), vec![0.1, 0.9]);
    }

    #[test]
    fn test_refresh_clears_only_exhausted_sets() {
        let mut state = GamePlayerState::new(0);
        state.mark_used("science", 0.1);
        state.mark_used("history", 0.1);

        state.refresh_exhausted(&categories(), &[0.1, 0.5]);

        assert!(state.used_categories.is_empty());
        assert!(state.has_used_difficulty(0.1));
    }

    #[test]
    fn test_reset_round_keeps_game_state() {
        let mut player = Player::human("Ada");
        player.game = GamePlayerState::new(2);
        player.game.mark_used("science", 0.3);
        player.round.has_answered = true;
        player.round.used_i_know_this_round = true;

        player.reset_round();

        assert_eq!(player.round, RoundPlayerState::default());
        assert_eq!(player.game.i_know_remaining, 2);
        assert!(player.game.has_used_category("science"));
    }
}
