//! Trivia game rules: questions, players, scoring, calibration and rounds

pub mod calibration;
pub mod events;
pub mod player;
pub mod question;
pub mod round;
pub mod scoring;
pub mod session;
pub mod store;

pub use calibration::{calibrate, CalibrationOutcome, RoundOutcome};
pub use events::{GameEvent, GameEventLog, GameEventType};
pub use player::{GamePlayerState, Player, RoundPlayerState};
pub use question::{Question, QuestionStats, RecentOutcomes};
pub use round::{GameSnapshot, PlayerSnapshot, QuestionView, RoundPhase, RoundStateMachine};
pub use scoring::{score_round, PlayerDelta, ScoreReason, ScoringEntry};
pub use session::GameSession;
pub use store::{load_questions, DifficultyRange, InMemoryQuestionStore, QuestionRequest, QuestionStore};
