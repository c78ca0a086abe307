//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod round;
pub mod state;
pub mod tick;

pub use round::{cells_for_level, generate_round};
pub use state::{
    CORRECT_RESOLVE_TICKS, Cell, CellRole, GameEvent, GamePhase, GameState, RESTART_DELAY_TICKS,
    TapTarget, WRONG_RESOLVE_TICKS,
};
pub use tick::{TickInput, tick};
