//! Arena Duel Demo
//!
//! Drives a scripted bout through the simulation headlessly: menu click,
//! walk-in, punch trade to a knockout, then back out through the menu.
//! Records the inputs along the way and verifies that replaying them
//! reproduces the live run's state digest.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use arena_duel::game::events::FightEventData;
use arena_duel::game::frame::{frame, replay};
use arena_duel::game::input::{FighterInput, FrameInput, InputRecording};
use arena_duel::render::draw;
use arena_duel::{GameState, NOMINAL_FRAME_RATE, VERSION};

/// Fixed frame step the demo drives at.
const FRAME_DT: f32 = 1.0 / NOMINAL_FRAME_RATE as f32;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Arena Duel v{}", VERSION);
    info!("Frame Rate: {} Hz", NOMINAL_FRAME_RATE);

    demo_bout()
}

/// Run one scripted bout and verify its replay.
fn demo_bout() -> Result<()> {
    info!("=== Starting Demo Bout ===");

    let mut state = GameState::new();
    let mut recording = InputRecording::new(state.bout_id, FRAME_DT);

    info!("Bout ID: {}", state.bout_id);

    // Click Play on the menu
    step(&mut state, &mut recording, FrameInput::click(400.0, 250.0));
    info!(
        "Entered the arena; scene is {} draw commands",
        draw(&state).len()
    );

    // Walk the fighters toward each other for a second
    let approach = FrameInput::fighters(
        FighterInput::from_flags(FighterInput::FLAG_RIGHT),
        FighterInput::from_flags(FighterInput::FLAG_LEFT),
    );
    for _ in 0..NOMINAL_FRAME_RATE {
        step(&mut state, &mut recording, approach);
    }

    // Both keep pressing in (body separation holds them at arm's length)
    // while the left fighter swings until somebody goes down
    let swinging = FrameInput::fighters(
        FighterInput::from_flags(FighterInput::FLAG_PUNCH | FighterInput::FLAG_RIGHT),
        FighterInput::from_flags(FighterInput::FLAG_LEFT),
    );
    let mut frames = 0u32;
    while state.outcome.is_none() && frames < 5000 {
        step(&mut state, &mut recording, swinging);
        frames += 1;
    }
    info!("Outcome after {} swinging frames: {:?}", frames, state.outcome);

    // Escape back to the menu, then escape out entirely
    step(&mut state, &mut recording, FrameInput::escape());
    let result = step(&mut state, &mut recording, FrameInput::escape());
    assert!(result.exited, "second escape should exit");

    // Final results
    info!("=== Bout Results ===");
    let digest = state.digest();
    info!("Frames: {}", state.frame);
    info!("Final State Digest: {}", hex::encode(digest));
    info!(
        "Recording: {} deltas over {} frames, {} bytes binary",
        recording.delta_count(),
        recording.frame_count,
        recording.to_bytes()?.len()
    );

    // Verify the recording reproduces the bout
    info!("=== Verifying Replay ===");
    let (replayed, events) = replay(&recording);
    let replay_digest = replayed.digest();
    info!("Replay State Digest: {}", hex::encode(replay_digest));
    info!("Replay events: {}", events.len());

    if digest == replay_digest {
        info!("REPLAY VERIFIED: Digests match!");
        Ok(())
    } else {
        anyhow::bail!("replay digest mismatch");
    }
}

/// Drive one frame, record its input, and log notable events.
fn step(
    state: &mut GameState,
    recording: &mut InputRecording,
    input: FrameInput,
) -> arena_duel::FrameResult {
    recording.record(state.frame, input);
    let result = frame(state, FRAME_DT, &input);

    for event in &result.events {
        match &event.data {
            FightEventData::Knockout { fighter, by } => {
                info!("{:?} knocked out by {:?}", fighter, by);
            }
            FightEventData::MatchEnded { winner } => {
                info!("Match ended, winner: {:?}", winner);
            }
            FightEventData::MatchStarted => {
                info!("Match started");
            }
            FightEventData::ReturnedToMenu => {
                info!("Back on the menu");
            }
            FightEventData::ExitRequested => {
                info!("Exiting");
            }
            FightEventData::PunchLanded { .. } => {}
        }
    }

    result
}
