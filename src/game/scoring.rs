//! Round scoring with point stealing
//!
//! The turn player scores on a correct answer. When the turn player misses,
//! every other correct player steals. I-KNOW doubles a non-turn player's
//! steal, and doubles the penalty when that player is wrong. Points shrink
//! as more competitors also answer correctly, down to half.

use serde::{Deserialize, Serialize};

use crate::core::types::round10;
use crate::game::question::Question;

/// Multiplier applied when every eligible competitor is also correct
pub const MIN_MULTIPLIER: f64 = 0.5;
/// Factor I-KNOW applies to both steals and penalties
pub const I_KNOW_FACTOR: f64 = 2.0;

/// One player's submission as seen by the scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringEntry {
    pub selected_answer: Option<usize>,
    pub used_i_know: bool,
}

/// Why a player received their delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreReason {
    /// Turn player answered correctly
    TurnCorrect,
    /// Turn player answered incorrectly
    TurnMissed,
    /// Correct while the turn player missed
    Steal,
    /// Correct with I-KNOW while the turn player missed
    BoostedSteal,
    /// Correct, but the turn player was correct too
    Blocked,
    /// Wrong after using I-KNOW
    Penalty,
    /// Wrong without I-KNOW
    NoScore,
}

/// Scoring result for one player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerDelta {
    pub delta: f64,
    pub reason: ScoreReason,
}

impl PlayerDelta {
    fn new(delta: f64, reason: ScoreReason) -> Self {
        Self {
            delta: round10(delta),
            reason,
        }
    }
}

/// `1 - 0.5 * correct / eligible`, or 1 with nobody eligible
pub fn multiplier(eligible: usize, correct: usize) -> f64 {
    if eligible == 0 {
        return 1.0;
    }
    1.0 - (1.0 - MIN_MULTIPLIER) * (correct as f64 / eligible as f64)
}

/// Compute every player's delta for a round
///
/// `entries` is in roster order; the result is too. An out-of-range
/// `turn_index` scores nobody.
pub fn score_round(question: &Question, entries: &[ScoringEntry], turn_index: usize) -> Vec<PlayerDelta> {
    if turn_index >= entries.len() {
        return entries
            .iter()
            .map(|_| PlayerDelta::new(0.0, ScoreReason::NoScore))
            .collect();
    }

    let base = question.base_points();
    let correct: Vec<bool> = entries
        .iter()
        .map(|e| question.is_correct(e.selected_answer))
        .collect();
    let turn_correct = correct[turn_index];

    // Correct competitors excluding the turn player and `me`
    let correct_excluding = |me: usize| -> (usize, usize) {
        let eligible = entries.len().saturating_sub(if me == turn_index { 1 } else { 2 });
        let hits = correct
            .iter()
            .enumerate()
            .filter(|(j, c)| **c && *j != me && *j != turn_index)
            .count();
        (eligible, hits)
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let (eligible, hits) = correct_excluding(i);
            let points = base * multiplier(eligible, hits);

            if i == turn_index {
                return if turn_correct {
                    PlayerDelta::new(points, ScoreReason::TurnCorrect)
                } else {
                    PlayerDelta::new(0.0, ScoreReason::TurnMissed)
                };
            }

            match (correct[i], entry.used_i_know) {
                (false, true) => PlayerDelta::new(-I_KNOW_FACTOR * points, ScoreReason::Penalty),
                (false, false) => PlayerDelta::new(0.0, ScoreReason::NoScore),
                (true, _) if turn_correct => PlayerDelta::new(0.0, ScoreReason::Blocked),
                (true, true) => PlayerDelta::new(I_KNOW_FACTOR * points, ScoreReason::BoostedSteal),
                (true, false) => PlayerDelta::new(points, ScoreReason::Steal),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(difficulty: f64) -> Question {
        Question::new(
            "q",
            "prompt",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            0,
            ["science".to_string()],
            difficulty,
        )
    }

    fn right() -> ScoringEntry {
        ScoringEntry {
            selected_answer: Some(0),
            used_i_know: false,
        }
    }

    fn wrong() -> ScoringEntry {
        ScoringEntry {
            selected_answer: Some(1),
            used_i_know: false,
        }
    }

    fn boosted(entry: ScoringEntry) -> ScoringEntry {
        ScoringEntry {
            used_i_know: true,
            ..entry
        }
    }

    fn deltas(q: &Question, entries: &[ScoringEntry], turn: usize) -> Vec<f64> {
        score_round(q, entries, turn).iter().map(|d| d.delta).collect()
    }

    #[test]
    fn test_multiplier_bounds() {
        assert_eq!(multiplier(0, 0), 1.0);
        assert_eq!(multiplier(4, 0), 1.0);
        assert_eq!(multiplier(4, 4), 0.5);
        assert_eq!(multiplier(2, 1), 0.75);
    }

    #[test]
    fn test_turn_player_correct_alone() {
        let q = question(0.5);
        assert_eq!(deltas(&q, &[right(), wrong(), wrong()], 0), vec![1.5, 0.0, 0.0]);
    }

    #[test]
    fn test_turn_player_shares_with_correct_others() {
        let q = question(0.5);
        // N = 2 others, K = 1 correct -> 1.5 * 0.75
        let result = score_round(&q, &[right(), right(), wrong()], 0);
        assert_eq!(result[0].delta, 1.125);
        assert_eq!(result[1].reason, ScoreReason::Blocked);
        assert_eq!(result[1].delta, 0.0);
    }

    #[test]
    fn test_steal_when_turn_player_wrong() {
        let q = question(0.2);
        assert_eq!(deltas(&q, &[wrong(), right(), wrong()], 0), vec![0.0, 1.2, 0.0]);
    }

    #[test]
    fn test_boosted_steal_doubles() {
        let q = question(0.2);
        let result = score_round(&q, &[wrong(), boosted(right()), wrong()], 0);
        assert_eq!(result[1].delta, 2.4);
        assert_eq!(result[1].reason, ScoreReason::BoostedSteal);
    }

    #[test]
    fn test_penalty_regardless_of_turn_player() {
        let q = question(0.5);
        for turn_answer in [right(), wrong()] {
            let result = score_round(&q, &[turn_answer, boosted(wrong()), wrong()], 0);
            assert_eq!(result[1].reason, ScoreReason::Penalty);
            assert_eq!(result[1].delta, -3.0);
        }
    }

    #[test]
    fn test_penalty_shrinks_with_correct_competitors() {
        let q = question(0.5);
        // N = 1 (the third player), K = 1 -> multiplier 0.5
        let result = score_round(&q, &[wrong(), boosted(wrong()), right()], 0);
        assert_eq!(result[1].delta, -1.5);
    }

    #[test]
    fn test_boosted_correct_with_correct_turn_player_is_zero() {
        let q = question(0.8);
        let result = score_round(&q, &[right(), boosted(right())], 0);
        assert_eq!(result[1].delta, 0.0);
        assert_eq!(result[1].reason, ScoreReason::Blocked);
    }

    #[test]
    fn test_timed_out_player_counts_as_wrong() {
        let q = question(0.0);
        let timed_out = ScoringEntry::default();
        assert_eq!(deltas(&q, &[timed_out, right()], 0), vec![0.0, 1.0]);
    }

    #[test]
    fn test_out_of_range_turn_index_scores_nobody() {
        let q = question(0.5);
        assert_eq!(deltas(&q, &[right(), right()], 5), vec![0.0, 0.0]);
    }

    #[test]
    fn test_fractional_deltas_rounded() {
        let q = question(0.1);
        // 1.1 * (1 - 0.5 * 1/3)
        let result = score_round(&q, &[right(), right(), wrong(), wrong()], 0);
        assert_eq!(result[0].delta, round10(1.1 * (1.0 - 0.5 / 3.0)));
    }
}
