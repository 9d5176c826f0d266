//! Game Logic Module
//!
//! The whole simulation. Everything here is synchronous and owned by one
//! caller; given the same inputs and frame steps it reproduces the same
//! state digest.
//!
//! ## Module Structure
//!
//! - `input`: Polled input types, recording, replay expansion
//! - `fighter`: Fighter state and per-frame kinematics
//! - `combat`: Punch resolution and body separation
//! - `screen`: Screens and menu buttons
//! - `state`: The single game-state object
//! - `frame`: Per-frame orchestrator and replay driver
//! - `events`: Fight events for hosts and replay inspection

pub mod combat;
pub mod events;
pub mod fighter;
pub mod frame;
pub mod input;
pub mod screen;
pub mod state;

// Re-export key types
pub use combat::PunchHit;
pub use events::{FightEvent, FightEventData};
pub use fighter::{Animation, Fighter, FighterSide};
pub use frame::{frame, replay, FrameResult};
pub use input::{FighterInput, FrameInput, InputRecording, MouseFrame, RecordingError};
pub use screen::{ButtonAction, MenuButton, Screen};
pub use state::{GameState, Outcome};
