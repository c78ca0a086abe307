//! Number Rush entry point
//!
//! Runs a seeded autoplay session headless, printing the presentation
//! event stream, then records the result on the local leaderboard.

use std::time::{SystemTime, UNIX_EPOCH};

use number_rush::consts::TICKS_PER_SECOND;
use number_rush::sim::{GameEvent, GameState, TickInput, tick};
use number_rush::{HighScores, Settings};

/// Hard cap on demo length; the autoplayer times out well before this
const MAX_DEMO_TICKS: u64 = 60 * 60 * TICKS_PER_SECOND as u64;

fn main() {
    env_logger::init();
    log::info!("Number Rush (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5EED);

    let settings = Settings::load();
    let mut scores = HighScores::load();

    let mut state = GameState::new(seed);
    let input = TickInput {
        auto_play: true,
        ..Default::default()
    };

    println!("Demo session, seed {seed}");
    let mut result = None;
    for _ in 0..MAX_DEMO_TICKS {
        for event in tick(&mut state, &input) {
            describe(&event, &settings);
            if let GameEvent::GameOver { score, level } = event {
                result = Some((score, level));
            }
        }
        if result.is_some() {
            break;
        }
    }

    let Some((score, level)) = result else {
        log::warn!("Demo cap reached without a game over");
        return;
    };

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    match scores.add_score(score, level, timestamp) {
        Some(rank) => println!("Final score {score} (level {level}) - rank #{rank}"),
        None => println!("Final score {score} (level {level})"),
    }
    scores.save();

    if !scores.is_empty() {
        println!();
        println!("Best sessions:");
        for (i, entry) in scores.entries.iter().enumerate() {
            println!("  {:2}. {:>5}  level {}", i + 1, entry.score, entry.level);
        }
    }
}

/// Terminal stand-in for the presentation layer
fn describe(event: &GameEvent, settings: &Settings) {
    match event {
        GameEvent::RoundStarted { level, cells_shown } => {
            println!("level {level}: {cells_shown} cells");
        }
        GameEvent::ScoreChanged { score } => println!("  score {score}"),
        GameEvent::TimerUpdated { remaining, urgent } => {
            if !settings.show_timer {
                return;
            }
            if *urgent && settings.effective_urgent_flash() {
                println!("  time {remaining}!");
            } else {
                println!("  time {remaining}");
            }
        }
        GameEvent::CorrectResolved { cell } => println!("  correct at cell {cell}"),
        GameEvent::WrongMarker { pos } => {
            println!("  wrong at ({:.0}, {:.0})", pos.x, pos.y);
        }
        GameEvent::GameOver { score, level } => {
            println!("game over - score {score}, level {level}");
        }
        GameEvent::SessionRestarted { seed } => println!("new session, seed {seed}"),
    }
}
