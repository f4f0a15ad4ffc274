//! AI decision model
//!
//! Pure functions parameterized by an `AiPersonality` and a caller-owned
//! RNG. Timing (the staged "thinking" reveal) is the round machine's job;
//! every decision here is instantaneous.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rand::Rng;

use crate::ai::personality::AiPersonality;
use crate::core::types::Category;
use crate::game::question::Question;

/// Half-width of the noise blurring category rankings and difficulty targets
pub const BLUR: f64 = 0.1;
/// Ranked score above which a category counts as strong
pub const STRONG_THRESHOLD: f64 = 0.05;
/// Ranked score below which a category counts as weak
pub const WEAK_THRESHOLD: f64 = -0.05;
/// Chance of picking among the top three strong categories instead of the best
pub const TOP_THREE_CHANCE: f64 = 0.3;
/// Difficulties at or below this are "low"
pub const LOW_DIFFICULTY_MAX: f64 = 0.3;
/// Difficulties strictly inside (LOW_DIFFICULTY_MAX, this) are "medium"
pub const MEDIUM_DIFFICULTY_MAX: f64 = 0.6;
/// Scale of the random answer variance for a completely inconsistent AI
pub const ANSWER_VARIANCE: f64 = 0.3;
/// Best category modifier above which the AI considers spending I-KNOW
pub const BOOST_CATEGORY_THRESHOLD: f64 = 0.1;

/// A category and difficulty picked for a round
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChoice {
    pub category: Category,
    pub difficulty: f64,
}

/// What the AI needs to know to decide on the power-up
#[derive(Debug, Clone, Copy)]
pub struct PowerupContext {
    pub is_turn_player: bool,
    pub uses_remaining: u32,
    pub used_this_round: bool,
}

/// Uniform noise in [-spread, spread)
fn blur<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    (rng.gen::<f64>() * 2.0 - 1.0) * spread
}

fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.gen_range(0..items.len())])
    }
}

/// Uniformly random category, used for timeouts and as a building block
pub fn random_category<R: Rng + ?Sized>(categories: &[Category], rng: &mut R) -> Option<Category> {
    pick(categories, rng).cloned()
}

/// Uniformly random difficulty, used for timeouts and as a building block
pub fn random_difficulty<R: Rng + ?Sized>(difficulties: &[f64], rng: &mut R) -> Option<f64> {
    pick(difficulties, rng).copied()
}

fn closest_difficulty(difficulties: &[f64], target: f64) -> Option<f64> {
    difficulties
        .iter()
        .copied()
        .min_by_key(|d| OrderedFloat((d - target).abs()))
}

/// Pick a category and difficulty from the unused options
///
/// Returns `None` only when either option list is empty.
pub fn choose_selection<R: Rng + ?Sized>(
    personality: &AiPersonality,
    categories: &[Category],
    difficulties: &[f64],
    rng: &mut R,
) -> Option<SelectionChoice> {
    if categories.is_empty() || difficulties.is_empty() {
        return None;
    }

    let mut ranked: Vec<(&Category, f64)> = categories
        .iter()
        .map(|c| (c, personality.modifier(c) + blur(rng, BLUR)))
        .collect();
    ranked.sort_by_key(|(_, score)| Reverse(OrderedFloat(*score)));

    let strong: Vec<&Category> = ranked
        .iter()
        .filter(|(_, s)| *s > STRONG_THRESHOLD)
        .map(|(c, _)| *c)
        .collect();
    let weak: Vec<&Category> = ranked
        .iter()
        .filter(|(_, s)| *s < WEAK_THRESHOLD)
        .map(|(c, _)| *c)
        .collect();
    let neutral: Vec<&Category> = ranked
        .iter()
        .filter(|(_, s)| (WEAK_THRESHOLD..=STRONG_THRESHOLD).contains(s))
        .map(|(c, _)| *c)
        .collect();

    let low: Vec<f64> = difficulties
        .iter()
        .copied()
        .filter(|d| *d <= LOW_DIFFICULTY_MAX)
        .collect();
    let medium: Vec<f64> = difficulties
        .iter()
        .copied()
        .filter(|d| *d > LOW_DIFFICULTY_MAX && *d < MEDIUM_DIFFICULTY_MAX)
        .collect();
    let best = ranked[0].0;

    if !strong.is_empty() {
        let index = if rng.gen_bool(TOP_THREE_CHANCE) {
            rng.gen_range(0..strong.len().min(3))
        } else {
            0
        };
        let category = strong[index];
        let target = personality.base_success_rate + personality.modifier(category) + blur(rng, BLUR);
        let difficulty = closest_difficulty(difficulties, target)?;
        return Some(SelectionChoice {
            category: category.clone(),
            difficulty,
        });
    }

    if !weak.is_empty() && !low.is_empty() {
        let category = *pick(&weak, rng)?;
        let difficulty = *pick(&low, rng)?;
        return Some(SelectionChoice {
            category: category.clone(),
            difficulty,
        });
    }

    if !medium.is_empty() {
        let category = neutral.first().copied().unwrap_or(best);
        let difficulty = *pick(&medium, rng)?;
        return Some(SelectionChoice {
            category: category.clone(),
            difficulty,
        });
    }

    let hardest = difficulties
        .iter()
        .copied()
        .max_by_key(|d| OrderedFloat(*d))?;
    Some(SelectionChoice {
        category: best.clone(),
        difficulty: hardest,
    })
}

/// Category modifier with the largest magnitude among the question's tags
fn dominant_modifier(personality: &AiPersonality, question: &Question) -> f64 {
    question
        .categories
        .iter()
        .map(|c| personality.modifier(c))
        .max_by_key(|m| (OrderedFloat(m.abs()), OrderedFloat(*m)))
        .unwrap_or(0.0)
}

/// Highest category modifier among the question's tags
fn best_modifier(personality: &AiPersonality, question: &Question) -> Option<f64> {
    question
        .categories
        .iter()
        .map(|c| personality.modifier(c))
        .max_by_key(|m| OrderedFloat(*m))
}

/// Probability of answering correctly, given an already drawn variance term
pub fn answer_chance(personality: &AiPersonality, question: &Question, variance: f64) -> f64 {
    let mut chance = 1.0 - question.difficulty;
    chance += (personality.base_success_rate - 0.5) * 0.5;
    chance += dominant_modifier(personality, question);
    chance += variance;
    chance.clamp(0.0, 1.0)
}

/// Pick an answer index for the question
pub fn choose_answer<R: Rng + ?Sized>(
    personality: &AiPersonality,
    question: &Question,
    rng: &mut R,
) -> usize {
    let spread = (1.0 - personality.consistency).max(0.0) * ANSWER_VARIANCE;
    let chance = answer_chance(personality, question, blur(rng, spread));

    if rng.gen::<f64>() < chance {
        return question.correct_index;
    }

    let wrong: Vec<usize> = (0..question.answers.len())
        .filter(|i| *i != question.correct_index)
        .collect();
    pick(&wrong, rng).copied().unwrap_or(question.correct_index)
}

/// Decide whether to spend I-KNOW on this question
pub fn should_use_i_know<R: Rng + ?Sized>(
    personality: &AiPersonality,
    question: &Question,
    context: PowerupContext,
    rng: &mut R,
) -> bool {
    if context.is_turn_player || context.uses_remaining == 0 || context.used_this_round {
        return false;
    }

    match best_modifier(personality, question) {
        Some(best) if best > BOOST_CATEGORY_THRESHOLD => {
            rng.gen_bool(personality.boost_usage_rate.clamp(0.0, 1.0))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn categories() -> Vec<Category> {
        ["science", "history", "sports", "art"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn levels() -> Vec<f64> {
        vec![0.1, 0.3, 0.5, 0.7, 0.9]
    }

    fn all_weak_except(strong: Option<&str>) -> AiPersonality {
        let mut personality = AiPersonality::default();
        for c in categories() {
            let modifier = if Some(c.as_str()) == strong { 0.25 } else { -0.25 };
            personality = personality.with_modifier(c, modifier);
        }
        personality
    }

    fn question(difficulty: f64, tags: &[&str]) -> Question {
        Question::new(
            "q",
            "prompt",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            2,
            tags.iter().map(|t| t.to_string()),
            difficulty,
        )
    }

    #[test]
    fn test_empty_options_yield_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let p = AiPersonality::default();
        assert!(choose_selection(&p, &[], &levels(), &mut rng).is_none());
        assert!(choose_selection(&p, &categories(), &[], &mut rng).is_none());
    }

    #[test]
    fn test_single_strong_category_always_chosen() {
        let p = all_weak_except(Some("science"));
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let choice = choose_selection(&p, &categories(), &levels(), &mut rng).unwrap();
            assert_eq!(choice.category, "science");
            // target = 0.5 + 0.25 ± 0.1
            assert!(choice.difficulty >= 0.7, "got {}", choice.difficulty);
        }
    }

    #[test]
    fn test_several_strong_categories_sometimes_pick_runner_up() {
        // Gaps of 0.3 keep the ranking stable under ±0.1 blur
        let p = AiPersonality::default()
            .with_modifier("science", 0.9)
            .with_modifier("history", 0.6)
            .with_modifier("sports", 0.3);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut counts = AHashMap::new();
        for _ in 0..400 {
            let choice = choose_selection(&p, &categories(), &levels(), &mut rng).unwrap();
            *counts.entry(choice.category).or_insert(0u32) += 1;
        }

        let count = |c: &str| counts.get(c).copied().unwrap_or(0);
        assert!(count("science") > count("history") + count("sports"));
        assert!(count("history") > 0);
        assert!(count("sports") > 0);
        assert_eq!(count("art"), 0);
    }

    #[test]
    fn test_weak_everywhere_prefers_low_difficulty() {
        let p = all_weak_except(None);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let choice = choose_selection(&p, &categories(), &levels(), &mut rng).unwrap();
            assert!(choice.difficulty <= LOW_DIFFICULTY_MAX);
            assert!(categories().contains(&choice.category));
        }
    }

    #[test]
    fn test_weak_without_low_falls_back_to_medium() {
        let p = all_weak_except(None);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let choice = choose_selection(&p, &categories(), &[0.5, 0.9], &mut rng).unwrap();
        assert_eq!(choice.difficulty, 0.5);
    }

    #[test]
    fn test_no_low_or_medium_takes_hardest() {
        let p = all_weak_except(None);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let choice = choose_selection(&p, &categories(), &[0.7, 0.9], &mut rng).unwrap();
        assert_eq!(choice.difficulty, 0.9);
    }

    #[test]
    fn test_answer_chance_components() {
        let mut p = AiPersonality::default();
        assert_eq!(answer_chance(&p, &question(0.5, &["science"]), 0.0), 0.5);

        p.base_success_rate = 0.9;
        assert!((answer_chance(&p, &question(0.5, &["science"]), 0.0) - 0.7).abs() < 1e-9);

        let p = AiPersonality::default()
            .with_modifier("science", 0.2)
            .with_modifier("history", -0.25);
        let q = question(0.5, &["science", "history"]);
        assert!((answer_chance(&p, &q, 0.0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_answer_chance_clamped() {
        let p = AiPersonality::default();
        assert_eq!(answer_chance(&p, &question(0.0, &[]), 0.9), 1.0);
        assert_eq!(answer_chance(&p, &question(1.0, &[]), -0.9), 0.0);
    }

    #[test]
    fn test_certain_ai_always_correct() {
        let p = AiPersonality {
            base_success_rate: 1.0,
            consistency: 1.0,
            ..AiPersonality::default()
        };
        let q = question(0.0, &["art"]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            assert_eq!(choose_answer(&p, &q, &mut rng), q.correct_index);
        }
    }

    #[test]
    fn test_hopeless_ai_picks_wrong_answers() {
        let p = AiPersonality {
            base_success_rate: 0.0,
            consistency: 1.0,
            ..AiPersonality::default()
        }
        .with_modifier("art", -0.25);
        let q = question(1.0, &["art"]);
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        for _ in 0..100 {
            let answer = choose_answer(&p, &q, &mut rng);
            assert_ne!(answer, q.correct_index);
            assert!(answer < q.answers.len());
        }
    }

    fn eligible() -> PowerupContext {
        PowerupContext {
            is_turn_player: false,
            uses_remaining: 1,
            used_this_round: false,
        }
    }

    #[test]
    fn test_powerup_eligibility() {
        let p = AiPersonality {
            boost_usage_rate: 1.0,
            ..AiPersonality::default()
        }
        .with_modifier("science", 0.2);
        let q = question(0.5, &["science"]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert!(should_use_i_know(&p, &q, eligible(), &mut rng));

        let turn = PowerupContext {
            is_turn_player: true,
            ..eligible()
        };
        assert!(!should_use_i_know(&p, &q, turn, &mut rng));

        let exhausted = PowerupContext {
            uses_remaining: 0,
            ..eligible()
        };
        assert!(!should_use_i_know(&p, &q, exhausted, &mut rng));

        let reused = PowerupContext {
            used_this_round: true,
            ..eligible()
        };
        assert!(!should_use_i_know(&p, &q, reused, &mut rng));
    }

    #[test]
    fn test_powerup_needs_strong_category() {
        let p = AiPersonality {
            boost_usage_rate: 1.0,
            ..AiPersonality::default()
        }
        .with_modifier("science", 0.1);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        assert!(!should_use_i_know(&p, &question(0.5, &["science"]), eligible(), &mut rng));
        assert!(!should_use_i_know(&p, &question(0.5, &[]), eligible(), &mut rng));
    }

    #[test]
    fn test_powerup_never_used_at_zero_rate() {
        let p = AiPersonality {
            boost_usage_rate: 0.0,
            ..AiPersonality::default()
        }
        .with_modifier("science", 0.25);
        let q = question(0.5, &["science"]);
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        for _ in 0..50 {
            assert!(!should_use_i_know(&p, &q, eligible(), &mut rng));
        }
    }
}
