//! Adaptive question difficulty
//!
//! After each round the question's difficulty is nudged toward what human
//! players actually managed. The nudge is large while little is known about
//! the question and shrinks as answers accumulate and the recent success
//! rate agrees with the difficulty.

use serde::{Deserialize, Serialize};

use crate::game::question::QuestionStats;

/// Smallest adjustment step, reached at full confidence
pub const MIN_ADJUSTMENT: f64 = 0.001;
/// Largest adjustment step, reached at zero confidence
pub const MAX_ADJUSTMENT: f64 = 0.10;
/// Answers needed before the sample size alone is fully trusted
pub const FULL_CONFIDENCE_SAMPLES: f64 = 1000.0;

/// This round's human results for one question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub correct: u32,
    pub incorrect: u32,
}

impl RoundOutcome {
    pub fn answers(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Everything the store needs to persist after calibration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    pub new_difficulty: f64,
    pub confidence: f64,
    /// Signed change applied to the difficulty before clamping
    pub adjustment: f64,
    pub stats: QuestionStats,
}

/// Success rate a question of this difficulty should see: 0 -> 0.9, 1 -> 0.1
pub fn expected_success_rate(difficulty: f64) -> f64 {
    1.0 - (difficulty * 0.8 + 0.1)
}

/// Confidence in the current difficulty, in [0, 1]
pub fn confidence(difficulty: f64, stats: &QuestionStats) -> f64 {
    let sample_confidence = (stats.total_answers() as f64 / FULL_CONFIDENCE_SAMPLES).min(1.0);

    if stats.recent.is_empty() {
        return sample_confidence * 0.5;
    }

    let actual = stats.recent.correct() as f64 / stats.recent.len() as f64;
    let variance = (expected_success_rate(difficulty) - actual).abs();
    let variance_confidence = 1.0 - (variance * 2.0).min(1.0);
    (sample_confidence * variance_confidence).sqrt()
}

/// Recalibrate a question from this round's human answers
pub fn calibrate(difficulty: f64, stats: &QuestionStats, round: RoundOutcome) -> CalibrationOutcome {
    let expected_rate = expected_success_rate(difficulty);
    let confidence = confidence(difficulty, stats);
    let magnitude = MIN_ADJUSTMENT + (1.0 - confidence).powi(2) * (MAX_ADJUSTMENT - MIN_ADJUSTMENT);

    let answers = round.answers() as f64;
    let normalized_difference = if round.answers() == 0 {
        0.0
    } else {
        (round.correct as f64 - answers * expected_rate) / answers
    };

    let scale = (normalized_difference.abs() * 2.0).min(1.0);
    // Better than expected lowers the value, worse raises it.
    let adjustment = if normalized_difference > 0.0 {
        -magnitude * scale
    } else {
        magnitude * scale
    };

    let mut updated = stats.clone();
    updated.correct_count += u64::from(round.correct);
    updated.incorrect_count += u64::from(round.incorrect);
    updated
        .recent
        .extend((0..round.correct).map(|_| true).chain((0..round.incorrect).map(|_| false)));

    CalibrationOutcome {
        new_difficulty: (difficulty + adjustment).clamp(0.0, 1.0),
        confidence,
        adjustment,
        stats: updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::question::{RecentOutcomes, RECENT_HISTORY_LEN};

    #[test]
    fn test_expected_rate_endpoints() {
        assert!((expected_success_rate(0.0) - 0.9).abs() < 1e-12);
        assert!((expected_success_rate(1.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_fresh_question_has_zero_confidence() {
        assert_eq!(confidence(0.5, &QuestionStats::default()), 0.0);
    }

    #[test]
    fn test_empty_history_halves_sample_confidence() {
        let stats = QuestionStats {
            correct_count: 300,
            incorrect_count: 200,
            recent: RecentOutcomes::new(),
        };
        assert!((confidence(0.5, &stats) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_matching_history_gives_full_confidence() {
        // difficulty 0.5 expects 50% success
        let stats = QuestionStats {
            correct_count: 600,
            incorrect_count: 600,
            recent: (0..10).map(|i| i % 2 == 0).collect(),
        };
        assert!((confidence(0.5, &stats) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fresh_question_swings_full_step() {
        // Nobody correct at 0.5: normalized difference -0.5, scale 1
        let outcome = calibrate(0.5, &QuestionStats::default(), RoundOutcome { correct: 0, incorrect: 3 });
        assert!((outcome.adjustment - MAX_ADJUSTMENT).abs() < 1e-12);
        assert!((outcome.new_difficulty - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_outperforming_lowers_difficulty() {
        let outcome = calibrate(0.5, &QuestionStats::default(), RoundOutcome { correct: 3, incorrect: 0 });
        assert!(outcome.adjustment < 0.0);
        assert!(outcome.new_difficulty < 0.5);
    }

    #[test]
    fn test_no_answers_no_change() {
        let stats = QuestionStats::default();
        let outcome = calibrate(0.42, &stats, RoundOutcome::default());
        assert_eq!(outcome.adjustment, 0.0);
        assert_eq!(outcome.new_difficulty, 0.42);
        assert_eq!(outcome.stats, stats);
    }

    #[test]
    fn test_clamped_at_bounds() {
        let up = calibrate(0.99, &QuestionStats::default(), RoundOutcome { correct: 0, incorrect: 5 });
        assert_eq!(up.new_difficulty, 1.0);

        let down = calibrate(0.01, &QuestionStats::default(), RoundOutcome { correct: 5, incorrect: 0 });
        assert_eq!(down.new_difficulty, 0.0);
    }

    #[test]
    fn test_stats_accumulate_and_history_caps() {
        let stats = QuestionStats {
            correct_count: 4,
            incorrect_count: 5,
            recent: (0..9).map(|_| false).collect(),
        };
        let outcome = calibrate(0.3, &stats, RoundOutcome { correct: 2, incorrect: 1 });

        assert_eq!(outcome.stats.correct_count, 6);
        assert_eq!(outcome.stats.incorrect_count, 6);
        assert_eq!(outcome.stats.recent.len(), RECENT_HISTORY_LEN);
        assert_eq!(outcome.stats.recent.correct(), 2);
    }
}
