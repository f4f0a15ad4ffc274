//! AI opponents
//!
//! Architecture: Data + pure functions
//! - AiPersonality holds TOML-loaded success rates and category skills
//! - decision module turns a personality plus an RNG into choices

pub mod decision;
pub mod personality;

pub use decision::{
    answer_chance, choose_answer, choose_selection, random_category, random_difficulty,
    should_use_i_know, PowerupContext, SelectionChoice,
};
pub use personality::{load_personality, load_personality_from, AiPersonality};
