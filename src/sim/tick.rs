//! Fixed timestep simulation tick
//!
//! Advances the session deterministically: tap scoring, deferred level
//! transitions, the round countdown, and game over/restart.

use glam::Vec2;

use super::round::generate_round;
use super::state::{
    CORRECT_RESOLVE_TICKS, CellRole, GameEvent, GamePhase, GameState, RESTART_DELAY_TICKS,
    TapTarget, WRONG_RESOLVE_TICKS,
};
use crate::consts::*;

/// Ticks the demo player waits into a round before tapping. The wait
/// grows with level until it can no longer beat the countdown, so a demo
/// session always ends in a natural game over.
fn auto_tap_tick(level: u32) -> u32 {
    60 + level.saturating_mul(45)
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tap resolved by the host hit-test, if one landed this frame
    pub tap: Option<TapTarget>,
    /// Demo mode - the sim taps for itself
    pub auto_play: bool,
}

/// Advance the game state by one tick.
///
/// Returns the events the presentation layer should react to. Taps are
/// only honored while `Playing`; the correct-answer transition and the
/// game-over sequence both run with input disabled.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;

    match state.phase {
        GamePhase::GameOver => {
            state.restart_ticks = state.restart_ticks.saturating_sub(1);
            if state.restart_ticks == 0 {
                let seed = next_session_seed(state.seed);
                *state = GameState::new(seed);
                events.push(GameEvent::SessionRestarted { seed });
                events.push(GameEvent::RoundStarted {
                    level: state.level,
                    cells_shown: state.visible_count() as u32,
                });
            }
            return events;
        }
        GamePhase::Resolving => {
            state.resolve_ticks = state.resolve_ticks.saturating_sub(1);
            if state.resolve_ticks == 0 {
                state.level += 1;
                state.phase = GamePhase::Playing;
                events.push(generate_round(state));
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    let tap = match input.tap {
        Some(target) => Some(target),
        None if input.auto_play => auto_play_tap(state),
        None => None,
    };

    if let Some(target) = tap {
        match target {
            TapTarget::Cell(index) if index < state.cells.len() => {
                if state.cells[index].role == CellRole::Correct {
                    resolve_correct(state, index, &mut events);
                } else {
                    // Hidden cells count as wrong, same as the backdrop
                    resolve_wrong(state, state.cells[index].pos, &mut events);
                }
            }
            // Stale handle from the host - nothing to resolve
            TapTarget::Cell(_) => {}
            TapTarget::Background => resolve_wrong(state, Vec2::ZERO, &mut events),
        }
    }

    if state.phase == GamePhase::Resolving {
        return events;
    }

    if let Some(ticks) = state.pending_penalty {
        let ticks = ticks.saturating_sub(1);
        if ticks == 0 {
            state.level = state.level.saturating_sub(1).max(1);
            events.push(generate_round(state));
        } else {
            state.pending_penalty = Some(ticks);
        }
    }

    state.round_ticks += 1;
    let remaining = state.remaining_secs();
    if remaining <= 0 {
        state.phase = GamePhase::GameOver;
        state.restart_ticks = RESTART_DELAY_TICKS;
        state.pending_penalty = None;
        events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        return events;
    }

    let urgent = remaining <= URGENT_THRESHOLD;
    if state.last_timer != Some((remaining, urgent)) {
        state.last_timer = Some((remaining, urgent));
        events.push(GameEvent::TimerUpdated {
            remaining: remaining as u32,
            urgent,
        });
    }

    events
}

fn resolve_correct(state: &mut GameState, index: usize, events: &mut Vec<GameEvent>) {
    state.score += 1;
    state.phase = GamePhase::Resolving;
    state.resolve_ticks = CORRECT_RESOLVE_TICKS;
    state.pending_penalty = None;
    events.push(GameEvent::ScoreChanged { score: state.score });
    events.push(GameEvent::CorrectResolved { cell: index });
}

fn resolve_wrong(state: &mut GameState, pos: Vec2, events: &mut Vec<GameEvent>) {
    state.score -= 1;
    state.pending_penalty = Some(WRONG_RESOLVE_TICKS);
    events.push(GameEvent::ScoreChanged { score: state.score });
    events.push(GameEvent::WrongMarker { pos });
}

/// Deterministic demo player: waits a beat into each round, then taps the
/// correct cell, deliberately missing on a hashed subset of rounds so the
/// penalty path gets exercised too.
fn auto_play_tap(state: &GameState) -> Option<TapTarget> {
    if state.round_ticks != auto_tap_tick(state.level) {
        return None;
    }

    let miss = (state.time_ticks.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 33) % 5 == 0;
    if miss {
        state
            .cells
            .iter()
            .position(|c| c.role == CellRole::Wrong)
            .map(TapTarget::Cell)
            .or(Some(TapTarget::Background))
    } else {
        state.correct_cell().map(TapTarget::Cell)
    }
}

fn next_session_seed(seed: u64) -> u64 {
    seed.wrapping_mul(2654435761).wrapping_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(state: &mut GameState, input: &TickInput, n: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(tick(state, input));
        }
        events
    }

    fn tap(target: TapTarget) -> TickInput {
        TickInput {
            tap: Some(target),
            ..Default::default()
        }
    }

    #[test]
    fn test_correct_tap_scores_and_levels_up() {
        let mut state = GameState::new(11);
        state.score = 5;
        let correct = state.correct_cell().unwrap();

        let events = tick(&mut state, &tap(TapTarget::Cell(correct)));
        assert_eq!(state.score, 6);
        assert_eq!(state.phase, GamePhase::Resolving);
        assert!(events.contains(&GameEvent::ScoreChanged { score: 6 }));
        assert!(events.contains(&GameEvent::CorrectResolved { cell: correct }));

        let events = run_ticks(&mut state, &TickInput::default(), CORRECT_RESOLVE_TICKS);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::RoundStarted { level: 2, cells_shown: 8 }))
        );
    }

    #[test]
    fn test_taps_ignored_while_resolving() {
        let mut state = GameState::new(11);
        let correct = state.correct_cell().unwrap();
        tick(&mut state, &tap(TapTarget::Cell(correct)));
        assert_eq!(state.score, 1);

        // A second tap during the transition must not double-score
        tick(&mut state, &tap(TapTarget::Cell(correct)));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_wrong_tap_penalizes_and_clamps_level() {
        let mut state = GameState::new(11);
        let wrong = state
            .cells
            .iter()
            .position(|c| c.role == CellRole::Wrong)
            .unwrap();

        let events = tick(&mut state, &tap(TapTarget::Cell(wrong)));
        assert_eq!(state.score, -1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::WrongMarker { .. }))
        );

        let events = run_ticks(&mut state, &TickInput::default(), WRONG_RESOLVE_TICKS);
        assert_eq!(state.level, 1);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::RoundStarted { level: 1, .. }))
        );
    }

    #[test]
    fn test_background_and_hidden_taps_count_as_wrong() {
        let mut state = GameState::new(11);
        tick(&mut state, &tap(TapTarget::Background));
        assert_eq!(state.score, -1);

        let hidden = state
            .cells
            .iter()
            .position(|c| c.role == CellRole::Hidden)
            .unwrap();
        tick(&mut state, &tap(TapTarget::Cell(hidden)));
        assert_eq!(state.score, -2);
    }

    #[test]
    fn test_unresolved_tap_changes_nothing() {
        let mut state = GameState::new(11);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);

        // Out-of-range handle from the host is ignored, not scored
        tick(&mut state, &tap(TapTarget::Cell(usize::MAX)));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_correct_tap_supersedes_pending_penalty() {
        let mut state = GameState::new(11);
        tick(&mut state, &tap(TapTarget::Background));
        assert!(state.pending_penalty.is_some());

        let correct = state.correct_cell().unwrap();
        tick(&mut state, &tap(TapTarget::Cell(correct)));
        assert_eq!(state.pending_penalty, None);

        // The penalty never fires: the resolve leads straight to level 2
        run_ticks(&mut state, &TickInput::default(), CORRECT_RESOLVE_TICKS);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_countdown_expiry_ends_the_session() {
        let mut state = GameState::new(11);
        let events = run_ticks(&mut state, &TickInput::default(), 11 * TICKS_PER_SECOND);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { score: 0, level: 1 }))
        );
    }

    #[test]
    fn test_timer_turns_urgent_at_five_seconds() {
        let mut state = GameState::new(11);
        let events = run_ticks(&mut state, &TickInput::default(), 6 * TICKS_PER_SECOND);
        assert!(events.contains(&GameEvent::TimerUpdated {
            remaining: 5,
            urgent: true
        }));
        assert!(!events.contains(&GameEvent::TimerUpdated {
            remaining: 6,
            urgent: true
        }));
    }

    #[test]
    fn test_restart_replaces_the_session() {
        let mut state = GameState::new(11);
        state.score = 3;
        run_ticks(&mut state, &TickInput::default(), 11 * TICKS_PER_SECOND);
        assert_eq!(state.phase, GamePhase::GameOver);

        let events = run_ticks(&mut state, &TickInput::default(), RESTART_DELAY_TICKS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_ne!(state.seed, 11);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::SessionRestarted { .. }))
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let input = TickInput {
            auto_play: true,
            ..Default::default()
        };

        for _ in 0..20 * TICKS_PER_SECOND {
            let ea = tick(&mut a, &input);
            let eb = tick(&mut b, &input);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.level, b.level);
        assert_eq!(a.cells, b.cells);
    }

    #[test]
    fn test_autoplay_progresses() {
        let mut state = GameState::new(4242);
        let input = TickInput {
            auto_play: true,
            ..Default::default()
        };

        // The first demo tap is not a hashed miss, so the player levels up
        run_ticks(&mut state, &input, auto_tap_tick(1) + CORRECT_RESOLVE_TICKS + 1);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_autoplay_session_eventually_times_out() {
        let mut state = GameState::new(77);
        let input = TickInput {
            auto_play: true,
            ..Default::default()
        };

        let mut saw_game_over = false;
        for _ in 0..3_000_000u32 {
            let events = tick(&mut state, &input);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                saw_game_over = true;
                break;
            }
        }
        assert!(saw_game_over);
    }
}
