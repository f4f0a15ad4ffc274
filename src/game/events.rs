//! Game event log
//!
//! Each `RoundStateMachine` owns its log; the owner drains it after every
//! call to learn what happened (question requests, scoring, game end).

use serde::{Deserialize, Serialize};

use crate::core::types::{Category, PlayerId, QuestionId};
use crate::game::calibration::RoundOutcome;
use crate::game::scoring::PlayerDelta;
use crate::game::store::QuestionRequest;

/// Log entry for game events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    /// 1-based round the event belongs to
    pub round: usize,
    pub event_type: GameEventType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEventType {
    RoundStarted {
        turn_player: PlayerId,
    },
    CategoryRevealed {
        player: PlayerId,
        category: Category,
    },
    DifficultyRevealed {
        player: PlayerId,
        difficulty: f64,
    },
    SelectionAutoPicked {
        player: PlayerId,
    },
    QuestionRequested {
        request: QuestionRequest,
    },
    QuestionUnavailable {
        request_id: u64,
    },
    AnsweringStarted {
        question_id: QuestionId,
    },
    AnswerSubmitted {
        player: PlayerId,
    },
    IKnowUsed {
        player: PlayerId,
    },
    AnswersTimedOut {
        players: Vec<PlayerId>,
    },
    RoundScored {
        question_id: QuestionId,
        difficulty: f64,
        deltas: Vec<(PlayerId, PlayerDelta)>,
        /// Human answers only; feeds difficulty calibration
        human_outcome: RoundOutcome,
    },
    GameEnded {
        standings: Vec<(PlayerId, f64)>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameEventLog {
    pub events: Vec<GameEvent>,
}

impl GameEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: GameEventType, description: String, round: usize) {
        self.events.push(GameEvent {
            round,
            event_type,
            description,
        });
    }

    /// Take every event logged so far
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
