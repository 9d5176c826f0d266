//! Core primitives.
//!
//! Small building blocks shared by the simulation and the draw surface:
//! vectors, frame timing, and state digests.

pub mod hash;
pub mod timing;
pub mod vec2;

// Re-export core types
pub use hash::{compute_state_digest, StateDigest, StateHasher};
pub use timing::{elapsed_ms_to_dt, sanitize_dt};
pub use vec2::Vec2;
