//! Round generation
//!
//! Re-skins the fixed cell grid for one level: draws a target value, fills
//! a shuffled subset of cells with smaller values, and tags exactly one
//! cell as the correct answer.

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{CellRole, GameEvent, GameState};
use crate::consts::*;

/// Number of cells a round reveals at the given level
pub fn cells_for_level(level: u32) -> usize {
    ((level.saturating_mul(CELLS_PER_LEVEL)) as usize).min(CELL_COUNT)
}

/// Generate a round for the state's current level.
///
/// Resets every cell to hidden, reveals `cells_for_level(level)` of them
/// with one carrying the target value, and restarts the round countdown.
/// Deterministic given the RNG state.
pub fn generate_round(state: &mut GameState) -> GameEvent {
    let shown = cells_for_level(state.level);

    let target = TARGET_MIN + state.rng.random_range(0..TARGET_SPAN);

    // One reveal slot is reserved for the correct cell
    let mut decoys = Vec::with_capacity(shown.saturating_sub(1));
    for _ in 1..shown {
        decoys.push(state.rng.random_range(0..target));
    }

    let mut order: Vec<usize> = (0..state.cells.len()).collect();
    order.shuffle(&mut state.rng);

    for cell in &mut state.cells {
        cell.value = None;
        cell.visible = false;
        cell.role = CellRole::Hidden;
    }

    for (&index, &value) in order.iter().zip(&decoys) {
        let cell = &mut state.cells[index];
        cell.value = Some(value);
        cell.visible = true;
        cell.role = CellRole::Wrong;
    }

    // The last shuffled slot carries the target
    if let Some(&index) = order.last() {
        let cell = &mut state.cells[index];
        cell.value = Some(target);
        cell.visible = true;
        cell.role = CellRole::Correct;
    }

    state.round_ticks = 0;
    state.pending_penalty = None;
    state.last_timer = None;

    log::debug!(
        "level {} round: {} cells shown, target {}",
        state.level,
        shown,
        target
    );

    GameEvent::RoundStarted {
        level: state.level,
        cells_shown: shown as u32,
    }
}
