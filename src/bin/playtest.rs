//! Headless playtest runner
//!
//! Plays AI-only trivia games against a question bank and prints a report,
//! for tuning personalities and checking scoring balance.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use steal_trivia::ai::{load_personality, AiPersonality};
use steal_trivia::core::config::load_options;
use steal_trivia::core::types::PlayerId;
use steal_trivia::core::GameOptions;
use steal_trivia::game::{load_questions, GameEventType, GameSession, Player, ScoreReason};

/// Headless playtest runner - AI vs AI trivia games
#[derive(Parser, Debug)]
#[command(name = "playtest")]
#[command(about = "Run AI-only trivia games and report scores")]
struct Args {
    /// Comma-separated personality names (loaded from data/ai_personalities/)
    #[arg(long, default_value = "scholar,gambler,rookie")]
    players: String,

    /// Question bank (JSON array of questions)
    #[arg(long, default_value = "data/questions.json")]
    questions: PathBuf,

    /// Game options TOML; built-in defaults when omitted
    #[arg(long)]
    options: Option<PathBuf>,

    /// Override the number of rounds
    #[arg(long)]
    rounds: Option<usize>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks before the game is abandoned
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct PlayerReport {
    name: String,
    personality: String,
    score: f64,
    correct_turns: u32,
    steals: u32,
    penalties: u32,
    i_know_left: u32,
}

/// JSON output structure
#[derive(Serialize)]
struct PlaytestReport {
    seed: u64,
    rounds_played: usize,
    ticks: u64,
    finished: bool,
    winner: Option<String>,
    players: Vec<PlayerReport>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("steal_trivia=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut options = match &args.options {
        Some(path) => match load_options(path) {
            Ok(options) => options,
            Err(e) => {
                tracing::error!("Failed to load options from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GameOptions::default(),
    };
    if let Some(rounds) = args.rounds {
        options.questions_per_game = rounds;
    }
    options.seed = Some(seed);

    let store = match load_questions(&args.questions, seed) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to load questions from {}: {}", args.questions.display(), e);
            std::process::exit(1);
        }
    };
    tracing::info!("Loaded {} questions", store.len());

    let players: Vec<Player> = args
        .players
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(i, name)| {
            let personality = load_personality(name).unwrap_or_else(|e| {
                tracing::warn!("Failed to load personality '{}': {}, using default", name, e);
                AiPersonality::default()
            });
            Player::ai(format!("{} #{}", name, i + 1), personality)
        })
        .collect();

    let mut session = match GameSession::new(players, options, store) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Could not start game: {}", e);
            std::process::exit(1);
        }
    };

    let ticks = session.play_out(args.max_ticks);
    let report = build_report(&session, seed, ticks);

    match args.format.as_str() {
        "text" => print_text(&report),
        "json" => print_json(&report),
        other => {
            tracing::warn!("Unknown format '{}', defaulting to json", other);
            print_json(&report);
        }
    }
}

fn build_report<S: steal_trivia::game::QuestionStore>(
    session: &GameSession<S>,
    seed: u64,
    ticks: u64,
) -> PlaytestReport {
    let machine = session.machine();

    let mut players: Vec<PlayerReport> = machine
        .players()
        .iter()
        .map(|p| PlayerReport {
            name: p.name.clone(),
            personality: p
                .personality
                .as_ref()
                .map(|pers| pers.id.clone())
                .unwrap_or_default(),
            score: p.score,
            correct_turns: 0,
            steals: 0,
            penalties: 0,
            i_know_left: p.game.i_know_remaining,
        })
        .collect();

    let index_of = |id: PlayerId| machine.players().iter().position(|p| p.id == id);
    for event in session.history() {
        let GameEventType::RoundScored { deltas, .. } = &event.event_type else {
            continue;
        };
        for (id, delta) in deltas {
            let Some(report) = index_of(*id).map(|i| &mut players[i]) else {
                continue;
            };
            match delta.reason {
                ScoreReason::TurnCorrect => report.correct_turns += 1,
                ScoreReason::Steal | ScoreReason::BoostedSteal => report.steals += 1,
                ScoreReason::Penalty => report.penalties += 1,
                _ => {}
            }
        }
    }

    let winner = machine
        .standings()
        .first()
        .and_then(|(id, _)| index_of(*id))
        .map(|i| players[i].name.clone());

    PlaytestReport {
        seed,
        rounds_played: machine.questions().len(),
        ticks,
        finished: machine.is_finished(),
        winner,
        players,
    }
}

fn print_json(report: &PlaytestReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize report: {}", e),
    }
}

fn print_text(report: &PlaytestReport) {
    println!("Playtest Result");
    println!("===============");
    println!("Rounds: {} ({} ticks)", report.rounds_played, report.ticks);
    println!("Finished: {}", report.finished);
    println!("Winner: {}", report.winner.as_deref().unwrap_or("-"));
    println!();
    for p in &report.players {
        println!(
            "{:<16} {:>8.2}  turns={} steals={} penalties={} i_know_left={}",
            p.name, p.score, p.correct_turns, p.steals, p.penalties, p.i_know_left
        );
    }
    println!();
    println!("Seed: {}", report.seed);
}
