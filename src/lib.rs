//! Steal Trivia - turn-based trivia rounds with point stealing

pub mod ai;
pub mod core;
pub mod game;
