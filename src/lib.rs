//! # Arena Duel
//!
//! Headless simulation core for a two-fighter arena game: movement, jump
//! arcs, punch combat, a menu/game/exit screen machine, and a draw-command
//! surface for whatever graphics stack hosts it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ARENA DUEL                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Shared primitives                         │
//! │  ├── vec2.rs     - 2D f32 vector                             │
//! │  ├── timing.rs   - Frame delta sanitization                  │
//! │  └── hash.rs     - State digests for replay checks           │
//! │                                                              │
//! │  game/           - Simulation (synchronous, single-owner)    │
//! │  ├── input.rs    - Polled input, recording, replay           │
//! │  ├── fighter.rs  - Fighter state and kinematics              │
//! │  ├── combat.rs   - Punch resolution, body separation         │
//! │  ├── screen.rs   - Menu / game / exit, buttons               │
//! │  ├── state.rs    - The one game-state object                 │
//! │  ├── frame.rs    - Per-frame orchestrator                    │
//! │  └── events.rs   - Fight events                              │
//! │                                                              │
//! │  render/         - Draw-command surface (host executes)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Contract
//!
//! The host loop drives one [`game::frame::frame`] call and then one
//! [`render::draw`] call per frame, strictly in sequence, until the frame
//! result reports exit. The host supplies elapsed time and polled input;
//! garbage deltas (negative, NaN) are sanitized to zero. All state lives
//! in one [`game::state::GameState`] owned by the caller; there is no
//! global.
//!
//! Driven at a fixed step with recorded inputs, a bout reproduces the same
//! state digest, which is what the replay checks in the demo binary and
//! the tests rely on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod render;

// Re-export commonly used types
pub use crate::core::hash::StateDigest;
pub use crate::core::vec2::Vec2;
pub use game::fighter::{Animation, Fighter, FighterSide};
pub use game::frame::{frame, replay, FrameResult};
pub use game::input::{FighterInput, FrameInput, InputRecording};
pub use game::state::{GameState, Outcome};
pub use render::{draw, DrawCommand};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frame rate the demo binary and recordings drive at (Hz). The
/// simulation itself accepts any frame step.
pub const NOMINAL_FRAME_RATE: u32 = 60;
