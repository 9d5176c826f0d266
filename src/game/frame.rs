//! Frame Orchestrator
//!
//! The single per-frame entry point. The host loop calls [`frame`] once,
//! then renders, and stops both calls once the result reports exit.
//!
//! Per-frame order: Escape handling first (it short-circuits the rest of
//! the frame), then screen-specific logic, then the exit check; the loop
//! stops the same frame the exit screen is entered.

use tracing::debug;

use crate::core::timing::sanitize_dt;
use crate::game::combat::{resolve_overlap, resolve_punches};
use crate::game::events::FightEvent;
use crate::game::input::{FrameInput, InputRecording};
use crate::game::screen::{ButtonAction, Screen};
use crate::game::state::{GameState, Outcome};

/// Result of one frame.
#[derive(Debug, Default)]
pub struct FrameResult {
    /// Events generated this frame
    pub events: Vec<FightEvent>,
    /// The exit screen was entered; stop calling update/draw
    pub exited: bool,
}

/// Run one frame of the game.
///
/// `dt` is the elapsed time in seconds since the previous frame; negative
/// and NaN values are treated as zero. Input is the host's poll for this
/// frame.
pub fn frame(state: &mut GameState, dt: f32, input: &FrameInput) -> FrameResult {
    let dt = sanitize_dt(dt);

    if !state.running {
        return FrameResult {
            events: Vec::new(),
            exited: true,
        };
    }

    if input.escape_pressed {
        // Escape pre-empts everything else this frame
        match state.screen {
            Screen::Menu => state.enter_exit(),
            Screen::Game => state.return_to_menu(),
            Screen::Exit => {}
        }
    } else {
        match state.screen {
            Screen::Menu => menu_frame(state, input),
            Screen::Game => game_frame(state, dt, input),
            Screen::Exit => {}
        }
    }

    let exited = state.is_exited();
    state.frame += 1;

    FrameResult {
        events: state.take_events(),
        exited,
    }
}

/// Menu logic: hit-test a left-click release against the buttons.
fn menu_frame(state: &mut GameState, input: &FrameInput) {
    if !input.mouse.left_released {
        return;
    }

    let action = state
        .buttons
        .iter()
        .find(|button| button.contains(input.mouse.x, input.mouse.y))
        .map(|button| button.action);

    match action {
        Some(ButtonAction::Play) => state.start_match(),
        Some(ButtonAction::Quit) => state.enter_exit(),
        None => {}
    }
}

/// Game logic: kinematics for both fighters, then punches (both orderings,
/// current-frame positions), then body separation.
fn game_frame(state: &mut GameState, dt: f32, input: &FrameInput) {
    state.fighters[0].advance(dt, input.left);
    state.fighters[1].advance(dt, input.right);

    let hits = resolve_punches(&mut state.fighters);
    let frame_no = state.frame;
    let mut downed = Vec::new();
    for hit in &hits {
        debug!(
            attacker = ?hit.attacker,
            defender = ?hit.defender,
            health_after = hit.health_after,
            "punch landed"
        );
        state.push_event(FightEvent::punch_landed(frame_no, hit));
        if hit.knockout {
            state.push_event(FightEvent::knockout(frame_no, hit.defender, hit.attacker));
            downed.push(hit.defender);
        }
    }

    // The first knockout decides the bout; a same-frame double knockout
    // is a draw
    match downed.as_slice() {
        [] => {}
        [loser] => state.record_outcome(Outcome::Winner(loser.opponent())),
        _ => state.record_outcome(Outcome::Draw),
    }

    // Separation runs unconditionally: downed fighters still occupy space
    let [left, right] = &mut state.fighters;
    resolve_overlap(left, right);
}

/// Replay a recorded bout from a fresh state.
///
/// Returns the final state and every event, in order. The caller can
/// compare `state.digest()` against the live run's digest.
pub fn replay(recording: &InputRecording) -> (GameState, Vec<FightEvent>) {
    let mut state = GameState::with_bout_id(recording.bout_id);
    let mut events = Vec::new();

    for (_, input) in recording.replay_iter() {
        let result = frame(&mut state, recording.frame_dt, &input);
        events.extend(result.events);
        if result.exited {
            break;
        }
    }

    (state, events)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combat::{PUNCH_DAMAGE, PUNCH_REACH};
    use crate::game::events::FightEventData;
    use crate::game::fighter::{FighterSide, MAX_HEALTH};
    use crate::game::input::FighterInput;
    use uuid::Uuid;

    const DT: f32 = 1.0 / 60.0;

    fn state_in_game() -> GameState {
        let mut state = GameState::with_bout_id(Uuid::nil());
        frame(&mut state, DT, &FrameInput::click(400.0, 250.0));
        state
    }

    #[test]
    fn test_play_click_starts_match() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        // Button centered at (400, 250), 200x50: click dead center
        let result = frame(&mut state, DT, &FrameInput::click(400.0, 250.0));

        assert_eq!(state.screen, Screen::Game);
        assert!(!result.exited);
        assert_eq!(state.fighter(FighterSide::Left).position.x, 200.0);
        assert_eq!(state.fighter(FighterSide::Right).position.x, 600.0);
        assert_eq!(state.fighter(FighterSide::Left).health, MAX_HEALTH);
        assert_eq!(state.fighter(FighterSide::Right).health, MAX_HEALTH);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, FightEventData::MatchStarted)));
    }

    #[test]
    fn test_click_outside_buttons_is_ignored() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        frame(&mut state, DT, &FrameInput::click(10.0, 10.0));
        assert_eq!(state.screen, Screen::Menu);
    }

    #[test]
    fn test_quit_click_exits() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        let result = frame(&mut state, DT, &FrameInput::click(400.0, 330.0));
        assert!(result.exited);
        assert_eq!(state.screen, Screen::Exit);
        assert!(!state.running);
    }

    #[test]
    fn test_escape_in_game_returns_to_menu() {
        let mut state = state_in_game();
        state.fighter_mut(FighterSide::Left).health = 57.0;

        let result = frame(&mut state, DT, &FrameInput::escape());

        assert_eq!(state.screen, Screen::Menu);
        assert!(!result.exited);
        // Fighters untouched by the transition
        assert_eq!(state.fighter(FighterSide::Left).health, 57.0);
    }

    #[test]
    fn test_escape_in_menu_exits_same_frame() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        let result = frame(&mut state, DT, &FrameInput::escape());

        assert_eq!(state.screen, Screen::Exit);
        assert!(!state.running);
        assert!(result.exited);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, FightEventData::ExitRequested)));
    }

    #[test]
    fn test_escape_preempts_click_on_same_frame() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        let mut input = FrameInput::click(400.0, 250.0);
        input.escape_pressed = true;

        frame(&mut state, DT, &input);

        // Escape wins: exit, not match start
        assert_eq!(state.screen, Screen::Exit);
    }

    #[test]
    fn test_frames_after_exit_are_noops() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        frame(&mut state, DT, &FrameInput::escape());
        let frame_after_exit = state.frame;

        let result = frame(&mut state, DT, &FrameInput::click(400.0, 250.0));
        assert!(result.exited);
        assert!(result.events.is_empty());
        assert_eq!(state.frame, frame_after_exit);
    }

    #[test]
    fn test_punch_exchange_in_game() {
        let mut state = state_in_game();
        // Stand the fighters within reach
        state.fighter_mut(FighterSide::Left).position.x = 400.0;
        state.fighter_mut(FighterSide::Right).position.x = 400.0 + PUNCH_REACH - 1.0;

        let input = FrameInput::fighters(
            FighterInput::from_flags(FighterInput::FLAG_PUNCH),
            FighterInput::new(),
        );
        let result = frame(&mut state, DT, &input);

        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, FightEventData::PunchLanded { .. })));
        assert_eq!(
            state.fighter(FighterSide::Right).health,
            MAX_HEALTH - PUNCH_DAMAGE
        );
    }

    #[test]
    fn test_knockout_decides_bout() {
        let mut state = state_in_game();
        state.fighter_mut(FighterSide::Left).position.x = 400.0;
        state.fighter_mut(FighterSide::Right).position.x = 420.0;
        state.fighter_mut(FighterSide::Right).health = PUNCH_DAMAGE;

        let input = FrameInput::fighters(
            FighterInput::from_flags(FighterInput::FLAG_PUNCH),
            FighterInput::new(),
        );
        let result = frame(&mut state, DT, &input);

        assert_eq!(state.outcome, Some(Outcome::Winner(FighterSide::Left)));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, FightEventData::Knockout { .. })));
        assert!(result.events.iter().any(|e| matches!(
            e.data,
            FightEventData::MatchEnded {
                winner: Some(FighterSide::Left)
            }
        )));
    }

    #[test]
    fn test_mutual_knockout_is_a_draw() {
        let mut state = state_in_game();
        state.fighter_mut(FighterSide::Left).position.x = 400.0;
        state.fighter_mut(FighterSide::Right).position.x = 420.0;
        state.fighter_mut(FighterSide::Left).health = PUNCH_DAMAGE;
        state.fighter_mut(FighterSide::Right).health = PUNCH_DAMAGE;

        let both_punch = FrameInput::fighters(
            FighterInput::from_flags(FighterInput::FLAG_PUNCH),
            FighterInput::from_flags(FighterInput::FLAG_PUNCH),
        );
        frame(&mut state, DT, &both_punch);

        assert_eq!(state.outcome, Some(Outcome::Draw));
    }

    #[test]
    fn test_overlap_enforced_during_play() {
        let mut state = state_in_game();
        state.fighter_mut(FighterSide::Left).position.x = 398.0;
        state.fighter_mut(FighterSide::Right).position.x = 402.0;

        frame(&mut state, DT, &FrameInput::idle());

        let separation = state.fighter(FighterSide::Right).position.x
            - state.fighter(FighterSide::Left).position.x;
        assert!(separation >= 60.0 - 1e-3);
    }

    #[test]
    fn test_replay_reproduces_digest() {
        let bout_id = Uuid::nil();
        let mut live = GameState::with_bout_id(bout_id);
        let mut recording = InputRecording::new(bout_id, DT);

        // Script: start the match, walk the fighters together, trade
        // punches for a while, then leave through the menu.
        let mut frame_no = 0u64;
        let mut drive = |state: &mut GameState,
                         recording: &mut InputRecording,
                         input: FrameInput,
                         frames: u64| {
            for _ in 0..frames {
                recording.record(frame_no, input);
                frame(state, DT, &input);
                frame_no += 1;
            }
        };

        drive(&mut live, &mut recording, FrameInput::click(400.0, 250.0), 1);

        let approach = FrameInput::fighters(
            FighterInput::from_flags(FighterInput::FLAG_RIGHT),
            FighterInput::from_flags(FighterInput::FLAG_LEFT),
        );
        drive(&mut live, &mut recording, approach, 60);

        let trade = FrameInput::fighters(
            FighterInput::from_flags(FighterInput::FLAG_PUNCH),
            FighterInput::from_flags(FighterInput::FLAG_PUNCH | FighterInput::FLAG_JUMP),
        );
        drive(&mut live, &mut recording, trade, 30);
        drive(&mut live, &mut recording, FrameInput::idle(), 30);
        drive(&mut live, &mut recording, FrameInput::escape(), 1);
        drive(&mut live, &mut recording, FrameInput::escape(), 1);

        let (replayed, _) = replay(&recording);
        assert_eq!(replayed.digest(), live.digest());
        assert_eq!(replayed.frame, live.frame);
    }

    #[test]
    fn test_replay_reproduces_mashing_bout() {
        use rand::{Rng, SeedableRng};

        // Seeded button-mashing: every fighter flag combination shows up
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x0b07);
        let bout_id = Uuid::nil();
        let mut live = GameState::with_bout_id(bout_id);
        let mut recording = InputRecording::new(bout_id, DT);

        let mut drive = |state: &mut GameState, input: FrameInput| {
            recording.record(state.frame, input);
            frame(state, DT, &input);
        };

        drive(&mut live, FrameInput::click(400.0, 250.0));
        for _ in 0..400 {
            let input = FrameInput::fighters(
                FighterInput::from_flags(rng.gen_range(0..16)),
                FighterInput::from_flags(rng.gen_range(0..16)),
            );
            drive(&mut live, input);
        }

        let (replayed, _) = replay(&recording);
        assert_eq!(replayed.digest(), live.digest());
    }
}
