//! Game session driver
//!
//! Wires a `RoundStateMachine` to a `QuestionStore`. After every mutation the
//! session drains the machine's events, fulfils question requests from the
//! store and persists difficulty calibration when a round is scored. Store
//! failures during calibration are logged and never interrupt play.

use crate::core::config::GameOptions;
use crate::core::error::{Result, TriviaError};
use crate::core::types::{PlayerId, QuestionId};
use crate::game::calibration::{calibrate, RoundOutcome};
use crate::game::events::{GameEvent, GameEventType};
use crate::game::player::Player;
use crate::game::round::{GameSnapshot, RoundPhase, RoundStateMachine};
use crate::game::store::{QuestionRequest, QuestionStore};

/// Automatic redraws allowed before the retry is left to the selection timer
pub const MAX_DRAW_ATTEMPTS: usize = 16;

/// A running game backed by a question store
pub struct GameSession<S: QuestionStore> {
    machine: RoundStateMachine,
    store: S,
    draw_attempts: usize,
    history: Vec<GameEvent>,
}

impl<S: QuestionStore> GameSession<S> {
    pub fn new(players: Vec<Player>, options: GameOptions, store: S) -> Result<Self> {
        let machine = RoundStateMachine::new(players, options)?;
        let mut session = Self {
            machine,
            store,
            draw_attempts: 0,
            history: Vec::new(),
        };
        // An AI opener may already have asked for a question
        if let Err(e) = session.process_events() {
            tracing::warn!("First selection could not be served: {}", e);
        }
        Ok(session)
    }

    pub fn machine(&self) -> &RoundStateMachine {
        &self.machine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.machine.snapshot()
    }

    /// Every event the machine has emitted, oldest first
    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    pub fn select_category(&mut self, player: PlayerId, category: &str) -> Result<()> {
        self.machine.select_category(player, category)?;
        self.draw_attempts = 0;
        self.process_events()
    }

    pub fn select_difficulty(&mut self, player: PlayerId, difficulty: f64) -> Result<()> {
        self.machine.select_difficulty(player, difficulty)?;
        self.draw_attempts = 0;
        self.process_events()
    }

    pub fn submit_answer(&mut self, player: PlayerId, answer: usize) -> Result<()> {
        self.machine.submit_answer(player, answer)?;
        self.process_events()
    }

    pub fn use_i_know(&mut self, player: PlayerId) -> Result<()> {
        self.machine.use_i_know(player)?;
        self.process_events()
    }

    pub fn tick(&mut self) -> Result<()> {
        self.machine.tick();
        self.process_events()
    }

    pub fn next_round(&mut self) -> Result<()> {
        self.machine.next_round()?;
        self.process_events()
    }

    pub fn end_game(&mut self) {
        self.machine.end_game();
        if let Err(e) = self.process_events() {
            tracing::debug!("Ignoring error after end of game: {}", e);
        }
    }

    /// Tick and advance rounds until the game ends or `max_ticks` pass
    ///
    /// Humans who never act are auto-selected and timed out, so any roster
    /// finishes once the store can serve its selections. Returns the number
    /// of ticks used.
    pub fn play_out(&mut self, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while !self.machine.is_finished() && ticks < max_ticks {
            let result = if self.machine.phase() == RoundPhase::Results {
                self.next_round()
            } else {
                ticks += 1;
                self.tick()
            };
            if let Err(e) = result {
                tracing::debug!("Recoverable error during play-out: {}", e);
            }
        }
        ticks
    }

    /// Drain and act on machine events until none are left
    ///
    /// Returns the first recoverable error hit while fulfilling requests.
    fn process_events(&mut self) -> Result<()> {
        let mut outcome = Ok(());

        loop {
            let events = self.machine.drain_events();
            if events.is_empty() {
                break;
            }

            for event in &events {
                match &event.event_type {
                    GameEventType::RoundStarted { .. } => self.draw_attempts = 0,
                    GameEventType::QuestionRequested { request } => {
                        if let Err(e) = self.fulfil(request) {
                            if outcome.is_ok() {
                                outcome = Err(e);
                            }
                        }
                    }
                    GameEventType::RoundScored {
                        question_id,
                        difficulty,
                        human_outcome,
                        ..
                    } => self.record_calibration(question_id, *difficulty, *human_outcome),
                    _ => {}
                }
            }
            self.history.extend(events);
        }

        outcome
    }

    fn fulfil(&mut self, request: &QuestionRequest) -> Result<()> {
        if self.machine.pending_request().map(|r| r.id) != Some(request.id) {
            return Err(TriviaError::StaleResult(request.id));
        }

        self.draw_attempts += 1;
        if self.draw_attempts > MAX_DRAW_ATTEMPTS {
            tracing::warn!(
                "{} draws without a question, waiting for the next selection",
                MAX_DRAW_ATTEMPTS
            );
            self.draw_attempts = 0;
            return self.machine.defer_selection(request.id);
        }

        let question = self.store.draw_question(&request.category, request.range);
        self.machine.provide_question(request.id, question)
    }

    fn record_calibration(&mut self, id: &QuestionId, difficulty: f64, round: RoundOutcome) {
        if round.answers() == 0 {
            tracing::debug!("No human answers for {}, skipping calibration", id);
            return;
        }

        let stats = match self.store.stats(id) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!("Could not read stats for {}: {}", id, e);
                return;
            }
        };

        let outcome = calibrate(difficulty, &stats, round);
        tracing::info!(
            "Calibrated {}: {:.3} -> {:.3} (confidence {:.2})",
            id,
            difficulty,
            outcome.new_difficulty,
            outcome.confidence
        );

        if let Err(e) = self.store.record_outcome(id, &outcome) {
            tracing::warn!("Failed to persist calibration for {}: {}", id, e);
        }
    }
}
