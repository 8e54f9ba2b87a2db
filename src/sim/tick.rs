//! Input handling: the round/game state machine
//!
//! Idle --click--> Running --time <= 0--> GameOver
//!
//! Each handler runs to completion and reports what the driving loop should
//! do next through a [`Response`].

use glam::Vec2;

use super::hit::{ClickOutcome, resolve_click};
use super::state::{GameEvent, GamePhase, GameState, Response};
use crate::consts::*;

/// One input delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseMove(Vec2),
    Click(Vec2),
    /// One second of countdown elapsed
    TimerTick,
}

/// Dispatch an input to its handler
pub fn handle_input(state: &mut GameState, input: InputEvent) -> Response {
    match input {
        InputEvent::MouseMove(pos) => on_mouse_move(state, pos),
        InputEvent::Click(pos) => on_click(state, pos),
        InputEvent::TimerTick => on_timer_tick(state),
    }
}

/// Track the pointer. Never changes the scene.
pub fn on_mouse_move(state: &mut GameState, pos: Vec2) -> Response {
    state.pointer = pos;
    log::trace!("Pointer at ({:3.0} {:3.0})", pos.x, pos.y);
    Response::none()
}

/// Resolve a click, score it and deal the next pair
pub fn on_click(state: &mut GameState, pos: Vec2) -> Response {
    let mut response = Response::redraw();

    match state.phase {
        GamePhase::GameOver => return Response::none(),
        GamePhase::Idle => {
            state.phase = GamePhase::Running;
            response.push(GameEvent::TimerStarted);
            log::info!("Countdown started");
        }
        GamePhase::Running => {}
    }

    let outcome = resolve_click(state.upper(), state.lower(), pos);
    match outcome {
        ClickOutcome::Correct => {
            state.score += 1;
            state.time += CORRECT_TIME_BONUS;
        }
        ClickOutcome::Incorrect => {
            state.time -= INCORRECT_TIME_PENALTY;
            state.mistakes += 1;
        }
        ClickOutcome::Undefined => {}
    }
    state.last_outcome = outcome;
    log::debug!(
        "Click at ({:.0}, {:.0}): {:?}, score {}, {}s left",
        pos.x,
        pos.y,
        outcome,
        state.score,
        state.time
    );
    response.push(GameEvent::ClickResolved {
        outcome,
        score: state.score,
        time: state.time,
    });

    if state.time <= 0 {
        finish(state, &mut response);
        return response;
    }

    match state.next_round() {
        Ok(event) => response.push(event),
        // GameState::new refuses decks this small, keep the current pair
        Err(err) => log::error!("Could not deal next round: {}", err),
    }
    response
}

/// One second of countdown
pub fn on_timer_tick(state: &mut GameState) -> Response {
    if state.phase != GamePhase::Running {
        return Response::none();
    }

    state.time -= 1;
    let mut response = Response::redraw();
    if state.time <= 0 {
        finish(state, &mut response);
    }
    response
}

fn finish(state: &mut GameState, response: &mut Response) {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over: final score {} ({} mistakes, {} rounds)",
        state.score,
        state.mistakes,
        state.round
    );
    response.push(GameEvent::GameOver {
        score: state.score,
        mistakes: state.mistakes,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;

    const FANO: &str = "7 3\n1 2 3\n1 4 5\n1 6 7\n2 4 6\n2 5 7\n3 4 7\n3 5 6\n";
    const NOWHERE: Vec2 = Vec2::new(-1000.0, -1000.0);

    fn new_state() -> GameState {
        GameState::new(Deck::parse(FANO).unwrap(), 12345).unwrap()
    }

    fn target_center(state: &GameState) -> Vec2 {
        let target = state.target_icon().unwrap();
        state.upper().icon(target).unwrap().center
    }

    #[test]
    fn test_ticks_ignored_while_idle() {
        let mut state = new_state();
        let response = on_timer_tick(&mut state);
        assert!(!response.redraw);
        assert_eq!(state.time, START_TIME);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_first_click_starts_timer() {
        let mut state = new_state();
        let response = on_click(&mut state, NOWHERE);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(response.events[0], GameEvent::TimerStarted);
        assert!(response.redraw);

        // The click itself was scored too
        assert_eq!(state.time, START_TIME - INCORRECT_TIME_PENALTY);
        assert_eq!(state.last_outcome, ClickOutcome::Incorrect);
        assert_eq!(state.mistakes, 1);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn test_correct_click() {
        let mut state = new_state();
        let pos = target_center(&state);
        let response = on_click(&mut state, pos);
        assert_eq!(state.score, 1);
        assert_eq!(state.time, START_TIME + CORRECT_TIME_BONUS);
        assert_eq!(state.last_outcome, ClickOutcome::Correct);
        assert!(response.events.iter().any(|e| matches!(
            e,
            GameEvent::ClickResolved {
                outcome: ClickOutcome::Correct,
                score: 1,
                ..
            }
        )));
        assert!(response
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundStarted { round: 2, .. })));
    }

    #[test]
    fn test_tick_counts_down() {
        let mut state = new_state();
        on_click(&mut state, NOWHERE);
        let before = state.time;
        let response = handle_input(&mut state, InputEvent::TimerTick);
        assert!(response.redraw);
        assert_eq!(state.time, before - 1);
    }

    #[test]
    fn test_mouse_move_only_tracks_pointer() {
        let mut state = new_state();
        let response = handle_input(&mut state, InputEvent::MouseMove(Vec2::new(12.0, 34.0)));
        assert_eq!(response, Response::none());
        assert_eq!(state.pointer, Vec2::new(12.0, 34.0));
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_time_runs_out() {
        let mut state = new_state();
        on_click(&mut state, NOWHERE);
        let mut ticks = 0;
        while !state.is_over() {
            on_timer_tick(&mut state);
            ticks += 1;
            assert!(ticks <= START_TIME);
        }
        assert_eq!(state.time, 0);

        // Nothing is processed after game over
        let round = state.round;
        assert_eq!(on_click(&mut state, NOWHERE), Response::none());
        assert_eq!(on_timer_tick(&mut state), Response::none());
        assert_eq!(state.round, round);
        assert_eq!(state.time, 0);
    }
}
