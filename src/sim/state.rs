//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::grid_position;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Round active, taps accepted
    Playing,
    /// Correct answer resolving - input disabled until the next round starts
    Resolving,
    /// Session ended by the countdown
    GameOver,
}

/// Role a cell plays in the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellRole {
    /// Not part of this round's reveal
    #[default]
    Hidden,
    /// Visible with a value below the target
    Wrong,
    /// Visible with the target value - the one to tap
    Correct,
}

/// One grid slot. Created once per session, re-tagged every round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Fixed scene position
    pub pos: Vec2,
    /// Displayed value, when revealed
    pub value: Option<u8>,
    pub visible: bool,
    pub role: CellRole,
}

/// Where the host hit-test resolved a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// A grid cell, by index into `GameState::cells`
    Cell(usize),
    /// The backdrop - counts as a wrong answer
    Background,
}

/// Events emitted by the sim for the presentation layer.
///
/// The presentation layer maps these to labels, effects, and sounds; the
/// sim never touches presentation types. Cell textures and visibility are
/// read back from `GameState::cells` after `RoundStarted`.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A fresh round was generated - re-skin the grid from cell state
    RoundStarted { level: u32, cells_shown: u32 },
    ScoreChanged { score: i64 },
    /// Countdown readout changed; `urgent` drives the warning color
    TimerUpdated { remaining: u32, urgent: bool },
    /// The correct cell was tapped - pulse it, fade the wrong cells out
    CorrectResolved { cell: usize },
    /// A wrong tap landed here - show a transient marker until the next round
    WrongMarker { pos: Vec2 },
    GameOver { score: i64, level: u32 },
    /// A fresh session replaced the finished one
    SessionRestarted { seed: u64 },
}

/// Correct-answer transition length (2 seconds at 120 Hz)
pub const CORRECT_RESOLVE_TICKS: u32 = 2 * TICKS_PER_SECOND;
/// Wrong-answer transition length (1 second at 120 Hz)
pub const WRONG_RESOLVE_TICKS: u32 = TICKS_PER_SECOND;
/// Delay between game over and the replacement session (2 seconds)
pub const RESTART_DELAY_TICKS: u32 = 2 * TICKS_PER_SECOND;

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Sim RNG, advanced by every round generation
    pub rng: Pcg32,
    /// Difficulty level, never below 1
    pub level: u32,
    /// Running score; wrong answers can push it negative
    pub score: i64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks since the current round was generated (drives the countdown)
    pub round_ticks: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks left in the correct-answer transition while `Resolving`
    pub resolve_ticks: u32,
    /// Pending wrong-answer transition; a newer tap outcome replaces it
    pub pending_penalty: Option<u32>,
    /// Ticks left until a fresh session after game over
    pub restart_ticks: u32,
    /// The fixed answer-cell registry, row-major from the bottom-left
    pub cells: Vec<Cell>,
    /// Last timer readout reported, so `TimerUpdated` only fires on change
    pub(crate) last_timer: Option<(i32, bool)>,
}

impl GameState {
    /// Create a new session with the given seed and a level-1 round ready
    pub fn new(seed: u64) -> Self {
        let cells = (0..GRID_ROWS)
            .flat_map(|row| (0..GRID_COLS).map(move |col| (col, row)))
            .map(|(col, row)| Cell {
                pos: grid_position(col, row),
                value: None,
                visible: false,
                role: CellRole::Hidden,
            })
            .collect();

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            score: 0,
            time_ticks: 0,
            round_ticks: 0,
            phase: GamePhase::Playing,
            resolve_ticks: 0,
            pending_penalty: None,
            restart_ticks: 0,
            cells,
            last_timer: None,
        };
        super::round::generate_round(&mut state);
        state
    }

    /// Seconds left on the round countdown, rounded up; zero or below means time is up
    pub fn remaining_secs(&self) -> i32 {
        (ROUND_TIME_LIMIT - self.round_ticks as f32 * SIM_DT).ceil() as i32
    }

    /// Index of the round's correct cell
    pub fn correct_cell(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.role == CellRole::Correct)
    }

    /// How many cells the current round reveals
    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.visible).count()
    }
}
