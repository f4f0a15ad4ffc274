//! Round state machine
//!
//! Each round: category-selection -> answering -> results.
//!
//! The machine is the single writer of game state. Every mutator is
//! synchronous; rejected calls leave the state untouched and return a
//! recoverable `TriviaError`. Timers advance through `tick()`, one call per
//! second. Work that needs the outside world (drawing a question, persisting
//! calibration) is announced through the event log and completed by the
//! owner, which may do so late: results for a superseded request are
//! discarded.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::ai::decision::{self, PowerupContext, SelectionChoice};
use crate::core::config::GameOptions;
use crate::core::error::{Result, TriviaError};
use crate::core::types::{round10, Category, PlayerId, QuestionId, Seconds};
use crate::game::calibration::RoundOutcome;
use crate::game::events::{GameEvent, GameEventLog, GameEventType};
use crate::game::player::{GamePlayerState, Player};
use crate::game::question::Question;
use crate::game::scoring::{score_round, PlayerDelta, ScoringEntry};
use crate::game::store::{DifficultyRange, QuestionRequest};

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    CategorySelection,
    Answering,
    Results,
}

/// Category and difficulty picked so far this round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TentativeSelection {
    pub category: Option<Category>,
    pub difficulty: Option<f64>,
}

impl TentativeSelection {
    fn complete(&self) -> Option<SelectionChoice> {
        Some(SelectionChoice {
            category: self.category.clone()?,
            difficulty: self.difficulty?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealStage {
    Category,
    Difficulty,
    Finalize,
}

/// AI turn player's decision, revealed one stage at a time
#[derive(Debug, Clone)]
struct AiReveal {
    choice: SelectionChoice,
    stage: RevealStage,
    ticks_left: u32,
}

/// Read-only view of a player for callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub is_ai: bool,
    pub score: f64,
    pub is_turn_player: bool,
    pub has_answered: bool,
    pub used_i_know_this_round: bool,
    pub i_know_remaining: u32,
}

/// Question as shown to players; the answer is only revealed in results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: String,
    pub answers: Vec<String>,
    pub difficulty: f64,
    pub correct_index: Option<usize>,
}

/// Serializable snapshot of the whole game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: RoundPhase,
    pub finished: bool,
    /// 1-based
    pub round: usize,
    pub total_rounds: usize,
    pub turn_player: PlayerId,
    pub selection_time_left: Seconds,
    pub answer_time_left: Seconds,
    pub tentative: TentativeSelection,
    pub selected: Option<(Category, f64)>,
    pub awaiting_question: bool,
    pub players: Vec<PlayerSnapshot>,
    pub question: Option<QuestionView>,
    /// Final ranking, present once the game is over
    pub standings: Option<Vec<(PlayerId, f64)>>,
}

/// Orchestrates rounds for one game
#[derive(Debug, Clone)]
pub struct RoundStateMachine {
    options: GameOptions,
    players: Vec<Player>,
    phase: RoundPhase,
    /// 0-based index of the current round
    round_index: usize,
    turn_index: usize,
    selection_time_left: Seconds,
    answer_time_left: Seconds,
    tentative: TentativeSelection,
    selected: Option<SelectionChoice>,
    pending_request: Option<QuestionRequest>,
    next_request_id: u64,
    /// Categories the store had nothing for this round
    failed_categories: Vec<Category>,
    ai_reveal: Option<AiReveal>,
    questions: Vec<Question>,
    last_deltas: Vec<PlayerDelta>,
    finished: bool,
    rng: ChaCha8Rng,
    events: GameEventLog,
}

impl RoundStateMachine {
    /// Start a game: the first round opens in category selection with the
    /// first player in `players` as turn player.
    pub fn new(players: Vec<Player>, options: GameOptions) -> Result<Self> {
        options.validate()?;
        if players.is_empty() {
            return Err(TriviaError::InvalidConfig("a game needs at least one player".into()));
        }

        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let players = players
            .into_iter()
            .map(|mut p| {
                p.game = GamePlayerState::new(options.i_know_powerups_per_player);
                p.reset_round();
                p
            })
            .collect();

        let mut machine = Self {
            selection_time_left: options.selection_time_limit,
            answer_time_left: options.question_time_limit,
            options,
            players,
            phase: RoundPhase::CategorySelection,
            round_index: 0,
            turn_index: 0,
            tentative: TentativeSelection::default(),
            selected: None,
            pending_request: None,
            next_request_id: 1,
            failed_categories: Vec::new(),
            ai_reveal: None,
            questions: Vec::new(),
            last_deltas: Vec::new(),
            finished: false,
            rng,
            events: GameEventLog::new(),
        };

        tracing::info!(
            "Game started: {} players, {} rounds",
            machine.players.len(),
            machine.options.questions_per_game
        );
        machine.begin_selection();
        Ok(machine)
    }

    // === ACCESSORS ===

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 1-based round number
    pub fn round_number(&self) -> usize {
        self.round_index + 1
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn turn_player(&self) -> &Player {
        &self.players[self.turn_index]
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn selection_time_left(&self) -> Seconds {
        self.selection_time_left
    }

    pub fn answer_time_left(&self) -> Seconds {
        self.answer_time_left
    }

    pub fn tentative(&self) -> &TentativeSelection {
        &self.tentative
    }

    /// Locked-in selection for this round, if any
    pub fn selected(&self) -> Option<&SelectionChoice> {
        self.selected.as_ref()
    }

    pub fn pending_request(&self) -> Option<&QuestionRequest> {
        self.pending_request.as_ref()
    }

    /// Every question drawn so far, one per completed selection
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The round's question, visible while answering and in results
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            RoundPhase::CategorySelection => None,
            RoundPhase::Answering | RoundPhase::Results => self.questions.last(),
        }
    }

    /// Deltas applied at the end of the most recent scored round
    pub fn last_deltas(&self) -> &[PlayerDelta] {
        &self.last_deltas
    }

    /// Take every event logged since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Categories the turn player may pick right now
    pub fn selectable_categories(&self) -> Vec<Category> {
        let unused = self.turn_player().game.unused_categories(&self.options.categories);
        let untried: Vec<Category> = unused
            .iter()
            .filter(|c| !self.failed_categories.contains(c))
            .cloned()
            .collect();
        if untried.is_empty() {
            unused
        } else {
            untried
        }
    }

    /// Difficulties the turn player may pick right now
    pub fn selectable_difficulties(&self) -> Vec<f64> {
        self.turn_player()
            .game
            .unused_difficulties(&self.options.difficulty_levels)
    }

    /// Players ordered by score, highest first; ties keep roster order
    pub fn standings(&self) -> Vec<(PlayerId, f64)> {
        let mut standings: Vec<(PlayerId, f64)> =
            self.players.iter().map(|p| (p.id, p.score)).collect();
        standings.sort_by(|a, b| b.1.total_cmp(&a.1));
        standings
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let question = self.current_question().map(|q| QuestionView {
            id: q.id.clone(),
            prompt: q.prompt.clone(),
            answers: q.answers.clone(),
            difficulty: q.difficulty,
            correct_index: (self.phase == RoundPhase::Results).then_some(q.correct_index),
        });

        GameSnapshot {
            phase: self.phase,
            finished: self.finished,
            round: self.round_number(),
            total_rounds: self.options.questions_per_game,
            turn_player: self.turn_player().id,
            selection_time_left: self.selection_time_left,
            answer_time_left: self.answer_time_left,
            tentative: self.tentative.clone(),
            selected: self
                .selected
                .as_ref()
                .map(|s| (s.category.clone(), s.difficulty)),
            awaiting_question: self.pending_request.is_some(),
            players: self
                .players
                .iter()
                .enumerate()
                .map(|(i, p)| PlayerSnapshot {
                    id: p.id,
                    name: p.name.clone(),
                    is_ai: p.is_ai,
                    score: p.score,
                    is_turn_player: i == self.turn_index,
                    has_answered: p.round.has_answered,
                    used_i_know_this_round: p.round.used_i_know_this_round,
                    i_know_remaining: p.game.i_know_remaining,
                })
                .collect(),
            question,
            standings: self.finished.then(|| self.standings()),
        }
    }

    // === MUTATORS ===

    /// Turn player picks a category
    pub fn select_category(&mut self, player: PlayerId, category: &str) -> Result<()> {
        self.check_selection(player)?;

        if !self.options.categories.iter().any(|c| c == category) {
            return reject(TriviaError::UnknownCategory(category.to_string()));
        }
        if self.turn_player().game.has_used_category(category) {
            return reject(TriviaError::CategoryUsed(category.to_string()));
        }

        self.tentative.category = Some(category.to_string());
        self.try_lock_selection();
        Ok(())
    }

    /// Turn player picks a difficulty
    pub fn select_difficulty(&mut self, player: PlayerId, difficulty: f64) -> Result<()> {
        self.check_selection(player)?;

        if !self.options.difficulty_levels.contains(&difficulty) {
            return reject(TriviaError::UnknownDifficulty(difficulty));
        }
        if self.turn_player().game.has_used_difficulty(difficulty) {
            return reject(TriviaError::DifficultyUsed(difficulty));
        }

        self.tentative.difficulty = Some(difficulty);
        self.try_lock_selection();
        Ok(())
    }

    /// Deliver the store's answer to a question request
    ///
    /// `None` means nothing matched: the selection marks are rolled back and
    /// the turn player chooses again with a fresh timer.
    pub fn provide_question(&mut self, request_id: u64, question: Option<Question>) -> Result<()> {
        let request = match &self.pending_request {
            Some(request) if request.id == request_id && !self.finished => request.clone(),
            _ => {
                tracing::debug!("Discarding stale question result for request {}", request_id);
                return Err(TriviaError::StaleResult(request_id));
            }
        };
        self.pending_request = None;

        let Some(question) = question else {
            tracing::warn!(
                "No question for {} in [{:.2}, {:.2}], retrying selection",
                request.category,
                request.range.min,
                request.range.max
            );
            return Err(self.roll_back_request(request, true));
        };

        self.questions.push(question);
        self.begin_answering();
        Ok(())
    }

    /// Give up on a pending request without an immediate AI retry
    ///
    /// Marks are rolled back like a missing question, but the turn player's
    /// next choice is left to a human action or the selection timer.
    pub fn defer_selection(&mut self, request_id: u64) -> Result<()> {
        let request = match &self.pending_request {
            Some(request) if request.id == request_id && !self.finished => request.clone(),
            _ => return Err(TriviaError::StaleResult(request_id)),
        };
        self.pending_request = None;
        tracing::warn!(
            "Deferring {} selection to the selection timer",
            request.category
        );
        Err(self.roll_back_request(request, false))
    }

    /// Submit an answer; any index is accepted, out-of-range ones are wrong
    pub fn submit_answer(&mut self, player: PlayerId, answer: usize) -> Result<()> {
        self.check_phase(RoundPhase::Answering)?;
        let index = self.player_index(player)?;
        if self.players[index].round.has_answered {
            return reject(TriviaError::AlreadyAnswered(player));
        }

        self.record_answer(index, Some(answer));
        if self.everyone_answered() {
            self.resolve_round();
        }
        Ok(())
    }

    /// Spend an I-KNOW on the current question
    pub fn use_i_know(&mut self, player: PlayerId) -> Result<()> {
        self.check_phase(RoundPhase::Answering)?;
        let index = self.player_index(player)?;

        if index == self.turn_index {
            return reject(TriviaError::IsTurnPlayer);
        }
        let p = &self.players[index];
        if p.round.has_answered {
            return reject(TriviaError::AlreadyAnswered(player));
        }
        if p.round.used_i_know_this_round {
            return reject(TriviaError::PowerupUnavailable("already used this round".into()));
        }
        if p.game.i_know_remaining == 0 {
            return reject(TriviaError::PowerupUnavailable("no uses left".into()));
        }

        self.activate_i_know(index);
        Ok(())
    }

    /// One second passes
    pub fn tick(&mut self) {
        if self.finished {
            return;
        }

        match self.phase {
            RoundPhase::CategorySelection => {
                if self.pending_request.is_some() {
                    return;
                }
                if self.ai_reveal.is_some() {
                    self.advance_ai_reveal();
                    return;
                }
                self.selection_time_left = self.selection_time_left.saturating_sub(1);
                if self.selection_time_left == 0 {
                    self.auto_select();
                }
            }
            RoundPhase::Answering => {
                self.answer_time_left = self.answer_time_left.saturating_sub(1);
                if self.answer_time_left == 0 {
                    self.time_out_answers();
                }
            }
            RoundPhase::Results => {}
        }
    }

    /// Leave the results screen: start the next round or end the game
    pub fn next_round(&mut self) -> Result<()> {
        self.check_phase(RoundPhase::Results)?;

        if self.questions.len() >= self.options.questions_per_game {
            self.finish();
            return Ok(());
        }

        self.round_index += 1;
        self.turn_index = (self.turn_index + 1) % self.players.len();
        self.begin_selection();
        Ok(())
    }

    /// Abandon the game from any phase, cancelling timers and pending requests
    pub fn end_game(&mut self) {
        if self.finished {
            return;
        }
        self.pending_request = None;
        self.ai_reveal = None;
        self.finish();
    }

    // === TRANSITIONS ===

    fn begin_selection(&mut self) {
        self.phase = RoundPhase::CategorySelection;
        self.failed_categories.clear();
        for player in &mut self.players {
            player.reset_round();
        }

        let categories = self.options.categories.clone();
        let difficulties = self.options.difficulty_levels.clone();
        self.turn_player_mut()
            .game
            .refresh_exhausted(&categories, &difficulties);

        let turn_player = self.turn_player().id;
        self.log(
            GameEventType::RoundStarted { turn_player },
            format!("{} is choosing", self.turn_player().name),
        );
        tracing::debug!("Round {} started, turn player {}", self.round_number(), turn_player);

        self.restart_selection();
    }

    /// Open (or reopen after a failed draw) the choosing step
    fn restart_selection(&mut self) {
        self.reopen_selection();
        if !self.turn_player().is_ai {
            return;
        }

        let personality = self.turn_player().personality_or_default();
        let categories = self.selectable_categories();
        let difficulties = self.selectable_difficulties();
        let Some(choice) =
            decision::choose_selection(&personality, &categories, &difficulties, &mut self.rng)
        else {
            return;
        };

        if self.options.ai_reveal_ticks == 0 {
            self.tentative.category = Some(choice.category.clone());
            self.tentative.difficulty = Some(choice.difficulty);
            self.lock_selection(choice);
        } else {
            self.ai_reveal = Some(AiReveal {
                choice,
                stage: RevealStage::Category,
                ticks_left: self.options.ai_reveal_ticks,
            });
        }
    }

    /// Clear the tentative choice and restart the selection timer
    fn reopen_selection(&mut self) {
        self.tentative = TentativeSelection::default();
        self.selected = None;
        self.ai_reveal = None;
        self.selection_time_left = self.options.selection_time_limit;
    }

    fn advance_ai_reveal(&mut self) {
        let Some(mut reveal) = self.ai_reveal.take() else {
            return;
        };

        reveal.ticks_left = reveal.ticks_left.saturating_sub(1);
        if reveal.ticks_left > 0 {
            self.ai_reveal = Some(reveal);
            return;
        }

        let player = self.turn_player().id;
        match reveal.stage {
            RevealStage::Category => {
                self.tentative.category = Some(reveal.choice.category.clone());
                self.log(
                    GameEventType::CategoryRevealed {
                        player,
                        category: reveal.choice.category.clone(),
                    },
                    format!("Category: {}", reveal.choice.category),
                );
                reveal.stage = RevealStage::Difficulty;
                reveal.ticks_left = self.options.ai_reveal_ticks;
                self.ai_reveal = Some(reveal);
            }
            RevealStage::Difficulty => {
                self.tentative.difficulty = Some(reveal.choice.difficulty);
                self.log(
                    GameEventType::DifficultyRevealed {
                        player,
                        difficulty: reveal.choice.difficulty,
                    },
                    format!("Difficulty: {:.2}", reveal.choice.difficulty),
                );
                reveal.stage = RevealStage::Finalize;
                reveal.ticks_left = self.options.ai_reveal_ticks;
                self.ai_reveal = Some(reveal);
            }
            RevealStage::Finalize => self.lock_selection(reveal.choice),
        }
    }

    /// Selection timer ran out: fill in whatever is missing at random
    fn auto_select(&mut self) {
        let categories = self.selectable_categories();
        let difficulties = self.selectable_difficulties();

        if self.tentative.category.is_none() {
            self.tentative.category = decision::random_category(&categories, &mut self.rng);
        }
        if self.tentative.difficulty.is_none() {
            self.tentative.difficulty = decision::random_difficulty(&difficulties, &mut self.rng);
        }

        let player = self.turn_player().id;
        self.log(
            GameEventType::SelectionAutoPicked { player },
            "Selection timed out".to_string(),
        );
        self.try_lock_selection();
    }

    fn try_lock_selection(&mut self) {
        if let Some(choice) = self.tentative.complete() {
            self.lock_selection(choice);
        }
    }

    /// Mark the choice used and ask the store for a matching question
    fn lock_selection(&mut self, choice: SelectionChoice) {
        self.turn_player_mut()
            .game
            .mark_used(&choice.category, choice.difficulty);

        let request = QuestionRequest {
            id: self.next_request_id,
            category: choice.category.clone(),
            difficulty: choice.difficulty,
            range: DifficultyRange::around(choice.difficulty, self.options.difficulty_window),
        };
        self.next_request_id += 1;

        tracing::debug!(
            "Round {}: requesting {} at {:.2}",
            self.round_number(),
            choice.category,
            choice.difficulty
        );
        self.log(
            GameEventType::QuestionRequested {
                request: request.clone(),
            },
            format!("{} at {:.2}", choice.category, choice.difficulty),
        );
        self.pending_request = Some(request);
        self.selected = Some(choice);
    }

    fn begin_answering(&mut self) {
        self.phase = RoundPhase::Answering;
        self.answer_time_left = self.options.question_time_limit;

        let Some(question) = self.questions.last().cloned() else {
            return;
        };
        self.log(
            GameEventType::AnsweringStarted {
                question_id: question.id.clone(),
            },
            question.prompt.clone(),
        );

        for index in 0..self.players.len() {
            if !self.players[index].is_ai {
                continue;
            }
            let personality = self.players[index].personality_or_default();
            let context = PowerupContext {
                is_turn_player: index == self.turn_index,
                uses_remaining: self.players[index].game.i_know_remaining,
                used_this_round: self.players[index].round.used_i_know_this_round,
            };

            if decision::should_use_i_know(&personality, &question, context, &mut self.rng) {
                self.activate_i_know(index);
            }
            let answer = decision::choose_answer(&personality, &question, &mut self.rng);
            self.record_answer(index, Some(answer));
        }

        if self.everyone_answered() {
            self.resolve_round();
        }
    }

    fn time_out_answers(&mut self) {
        let stragglers: Vec<usize> = (0..self.players.len())
            .filter(|i| !self.players[*i].round.has_answered)
            .collect();
        for index in &stragglers {
            self.players[*index].round.has_answered = true;
            self.players[*index].round.selected_answer = None;
        }

        let players = stragglers.iter().map(|i| self.players[*i].id).collect();
        self.log(
            GameEventType::AnswersTimedOut { players },
            format!("{} player(s) ran out of time", stragglers.len()),
        );
        self.resolve_round();
    }

    fn resolve_round(&mut self) {
        let Some(question) = self.questions.last().cloned() else {
            return;
        };

        let entries: Vec<ScoringEntry> = self
            .players
            .iter()
            .map(|p| ScoringEntry {
                selected_answer: p.round.selected_answer,
                used_i_know: p.round.used_i_know_this_round,
            })
            .collect();
        let deltas = score_round(&question, &entries, self.turn_index);

        let mut human_outcome = RoundOutcome::default();
        for (player, delta) in self.players.iter_mut().zip(&deltas) {
            player.score = round10(player.score + delta.delta);
            if !player.is_ai {
                if question.is_correct(player.round.selected_answer) {
                    human_outcome.correct += 1;
                } else {
                    human_outcome.incorrect += 1;
                }
            }
        }

        self.phase = RoundPhase::Results;
        let scored: Vec<(PlayerId, PlayerDelta)> = self
            .players
            .iter()
            .map(|p| p.id)
            .zip(deltas.iter().copied())
            .collect();
        tracing::info!(
            "Round {} scored: {} correct humans, {} incorrect",
            self.round_number(),
            human_outcome.correct,
            human_outcome.incorrect
        );
        self.log(
            GameEventType::RoundScored {
                question_id: question.id.clone(),
                difficulty: question.difficulty,
                deltas: scored,
                human_outcome,
            },
            format!(
                "Answer: {}",
                question
                    .answers
                    .get(question.correct_index)
                    .map(String::as_str)
                    .unwrap_or("?")
            ),
        );
        self.last_deltas = deltas;
    }

    fn finish(&mut self) {
        self.finished = true;
        let standings = self.standings();
        tracing::info!("Game over after {} rounds", self.questions.len());
        self.log(GameEventType::GameEnded { standings }, "Game over".to_string());
    }

    // === HELPERS ===

    /// Undo a request's marks and reopen selection
    fn roll_back_request(&mut self, request: QuestionRequest, plan_ai: bool) -> TriviaError {
        self.turn_player_mut()
            .game
            .unmark(&request.category, request.difficulty);
        self.failed_categories.push(request.category.clone());
        self.log(
            GameEventType::QuestionUnavailable {
                request_id: request.id,
            },
            format!("No {} question near {:.2}", request.category, request.difficulty),
        );

        if plan_ai {
            self.restart_selection();
        } else {
            self.reopen_selection();
        }

        TriviaError::NoMatchingQuestion {
            category: request.category,
            min: request.range.min,
            max: request.range.max,
        }
    }

    fn log(&mut self, event_type: GameEventType, description: String) {
        let round = self.round_number();
        self.events.push(event_type, description, round);
    }

    fn turn_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.turn_index]
    }

    fn player_index(&self, id: PlayerId) -> Result<usize> {
        match self.players.iter().position(|p| p.id == id) {
            Some(index) => Ok(index),
            None => reject(TriviaError::UnknownPlayer(id)),
        }
    }

    fn check_phase(&self, expected: RoundPhase) -> Result<()> {
        if self.finished {
            return reject(TriviaError::GameOver);
        }
        if self.phase != expected {
            return reject(TriviaError::WrongPhase(self.phase));
        }
        Ok(())
    }

    fn check_selection(&self, player: PlayerId) -> Result<()> {
        self.check_phase(RoundPhase::CategorySelection)?;
        self.player_index(player)?;
        if self.turn_player().id != player {
            return reject(TriviaError::NotTurnPlayer(player));
        }
        if self.pending_request.is_some() || self.ai_reveal.is_some() {
            return reject(TriviaError::SelectionPending);
        }
        Ok(())
    }

    fn record_answer(&mut self, index: usize, answer: Option<usize>) {
        let player = &mut self.players[index];
        player.round.has_answered = true;
        player.round.selected_answer = answer;
        let id = player.id;
        self.log(GameEventType::AnswerSubmitted { player: id }, String::new());
    }

    fn activate_i_know(&mut self, index: usize) {
        let player = &mut self.players[index];
        if !player.game.consume_i_know() {
            return;
        }
        player.round.used_i_know_this_round = true;
        let id = player.id;
        let name = player.name.clone();
        self.log(GameEventType::IKnowUsed { player: id }, format!("{} says I KNOW!", name));
    }

    fn everyone_answered(&self) -> bool {
        self.players.iter().all(|p| p.round.has_answered)
    }
}

fn reject<T>(error: TriviaError) -> Result<T> {
    tracing::debug!("Rejected: {}", error);
    Err(error)
}
