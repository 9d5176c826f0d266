//! Input Capture and Recording
//!
//! The host polls keyboard and mouse; the simulation consumes one
//! [`FrameInput`] per frame. Recordings store only the frames where input
//! changed, which keeps a full bout to a few kilobytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// PER-FIGHTER INPUT
// =============================================================================

/// Input for a single fighter on a single frame.
///
/// Left/right are level-triggered (key held); jump/punch are edge-triggered
/// (key went down this frame). The host is responsible for edge detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterInput {
    /// Action flags (packed bits):
    /// - Bit 0: move-left held
    /// - Bit 1: move-right held
    /// - Bit 2: jump pressed this frame
    /// - Bit 3: punch pressed this frame
    /// - Bit 4-7: Reserved
    pub flags: u8,
}

impl FighterInput {
    /// Move-left flag bit
    pub const FLAG_LEFT: u8 = 0x01;

    /// Move-right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x04;

    /// Punch flag bit
    pub const FLAG_PUNCH: u8 = 0x08;

    /// Create an empty (idle) input.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create an input from raw flags.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags }
    }

    /// Check if move-left is held.
    #[inline]
    pub fn left_held(&self) -> bool {
        self.flags & Self::FLAG_LEFT != 0
    }

    /// Check if move-right is held.
    #[inline]
    pub fn right_held(&self) -> bool {
        self.flags & Self::FLAG_RIGHT != 0
    }

    /// Check if jump was pressed this frame.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Check if punch was pressed this frame.
    #[inline]
    pub fn punch_pressed(&self) -> bool {
        self.flags & Self::FLAG_PUNCH != 0
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Set the move-left flag.
    #[inline]
    pub fn set_left(&mut self, held: bool) {
        self.set_flag(Self::FLAG_LEFT, held);
    }

    /// Set the move-right flag.
    #[inline]
    pub fn set_right(&mut self, held: bool) {
        self.set_flag(Self::FLAG_RIGHT, held);
    }

    /// Set the jump flag.
    #[inline]
    pub fn set_jump(&mut self, pressed: bool) {
        self.set_flag(Self::FLAG_JUMP, pressed);
    }

    /// Set the punch flag.
    #[inline]
    pub fn set_punch(&mut self, pressed: bool) {
        self.set_flag(Self::FLAG_PUNCH, pressed);
    }

    #[inline]
    fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}

// =============================================================================
// PER-FRAME INPUT
// =============================================================================

/// Mouse state sampled once per frame.
///
/// Coordinates are in the same space as menu button hit-regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MouseFrame {
    /// Cursor X position
    pub x: f32,
    /// Cursor Y position
    pub y: f32,
    /// Left button was released this frame
    pub left_released: bool,
}

impl MouseFrame {
    /// Create a mouse sample at a position with no click.
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            left_released: false,
        }
    }

    /// Create a mouse sample with a left-click release at a position.
    pub const fn click_at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            left_released: true,
        }
    }
}

/// Complete polled input for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Input for the left-slot fighter
    pub left: FighterInput,
    /// Input for the right-slot fighter
    pub right: FighterInput,
    /// Escape key went down this frame
    pub escape_pressed: bool,
    /// Mouse state for menu hit-testing
    pub mouse: MouseFrame,
}

impl FrameInput {
    /// Create an idle frame (no keys, no click, cursor at origin).
    pub const fn idle() -> Self {
        Self {
            left: FighterInput::new(),
            right: FighterInput::new(),
            escape_pressed: false,
            mouse: MouseFrame::at(0.0, 0.0),
        }
    }

    /// Create a frame carrying only an Escape press.
    pub const fn escape() -> Self {
        Self {
            left: FighterInput::new(),
            right: FighterInput::new(),
            escape_pressed: true,
            mouse: MouseFrame::at(0.0, 0.0),
        }
    }

    /// Create a frame carrying only a left-click release at a position.
    pub const fn click(x: f32, y: f32) -> Self {
        Self {
            left: FighterInput::new(),
            right: FighterInput::new(),
            escape_pressed: false,
            mouse: MouseFrame::click_at(x, y),
        }
    }

    /// Create a frame from the two fighters' inputs.
    pub const fn fighters(left: FighterInput, right: FighterInput) -> Self {
        Self {
            left,
            right,
            escape_pressed: false,
            mouse: MouseFrame::at(0.0, 0.0),
        }
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// Error produced by the recording codec.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// JSON encode/decode failed.
    #[error("json codec: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encode/decode failed.
    #[error("binary codec: {0}")]
    Binary(#[from] bincode::Error),

    /// The recording header declares a non-positive frame step.
    #[error("recording frame step must be positive, got {0}")]
    BadFrameStep(f32),
}

/// Delta entry: the input state that began at `frame`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InputDelta {
    /// Frame when this input state began
    pub frame: u64,
    /// The new input state
    pub input: FrameInput,
}

/// Complete input recording for one bout.
///
/// Recordings assume a fixed-step host (the step is stored in the header),
/// which is what the demo binary and tests drive. Only frames where the
/// input changed are stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecording {
    /// Bout identifier
    pub bout_id: Uuid,

    /// Wall-clock time the recording started
    pub recorded_at: DateTime<Utc>,

    /// Fixed frame step the bout was driven at, in seconds
    pub frame_dt: f32,

    /// Total frames in the bout
    pub frame_count: u64,

    /// Delta-compressed input data
    deltas: Vec<InputDelta>,

    /// Last recorded input (for delta comparison)
    #[serde(skip)]
    last_input: FrameInput,
}

impl InputRecording {
    /// Create a new recording for a bout driven at a fixed step.
    pub fn new(bout_id: Uuid, frame_dt: f32) -> Self {
        Self {
            bout_id,
            recorded_at: Utc::now(),
            frame_dt,
            frame_count: 0,
            deltas: Vec::with_capacity(256),
            last_input: FrameInput::idle(),
        }
    }

    /// Record input for a frame.
    ///
    /// Only stores an entry if the input changed since the previous frame.
    pub fn record(&mut self, frame: u64, input: FrameInput) {
        self.frame_count = self.frame_count.max(frame + 1);

        if input != self.last_input {
            self.deltas.push(InputDelta { frame, input });
            self.last_input = input;
        }
    }

    /// Get the input in effect at a specific frame.
    ///
    /// Uses binary search over the deltas.
    pub fn input_at(&self, frame: u64) -> FrameInput {
        let idx = self.deltas.partition_point(|d| d.frame <= frame);
        if idx == 0 {
            FrameInput::idle()
        } else {
            self.deltas[idx - 1].input
        }
    }

    /// All delta entries.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Iterate over every frame's input, expanding the deltas.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            frame: 0,
            delta_idx: 0,
            current: FrameInput::idle(),
        }
    }

    /// Encode as pretty JSON.
    pub fn to_json(&self) -> Result<String, RecordingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, RecordingError> {
        let recording: Self = serde_json::from_str(json)?;
        recording.validate()
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordingError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from compact binary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordingError> {
        let recording: Self = bincode::deserialize(bytes)?;
        recording.validate()
    }

    fn validate(self) -> Result<Self, RecordingError> {
        if self.frame_dt.is_nan() || self.frame_dt <= 0.0 {
            return Err(RecordingError::BadFrameStep(self.frame_dt));
        }
        Ok(self)
    }
}

/// Iterator expanding a recording frame-by-frame.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    frame: u64,
    delta_idx: usize,
    current: FrameInput,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u64, FrameInput);

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.recording.frame_count {
            return None;
        }

        while self.delta_idx < self.recording.deltas.len() {
            let delta = &self.recording.deltas[self.delta_idx];
            if delta.frame <= self.frame {
                self.current = delta.input;
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let result = (self.frame, self.current);
        self.frame += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fighter_input_flags() {
        let mut input = FighterInput::new();
        assert!(input.is_idle());

        input.set_left(true);
        assert!(input.left_held());
        assert!(!input.right_held());

        input.set_punch(true);
        assert!(input.left_held());
        assert!(input.punch_pressed());

        input.set_left(false);
        assert!(!input.left_held());
        assert!(input.punch_pressed());
    }

    #[test]
    fn test_fighter_input_from_flags() {
        let input = FighterInput::from_flags(FighterInput::FLAG_RIGHT | FighterInput::FLAG_JUMP);
        assert!(input.right_held());
        assert!(input.jump_pressed());
        assert!(!input.left_held());
        assert!(!input.punch_pressed());
    }

    #[test]
    fn test_frame_input_constructors() {
        assert_eq!(FrameInput::idle(), FrameInput::default());

        let esc = FrameInput::escape();
        assert!(esc.escape_pressed);

        let click = FrameInput::click(400.0, 250.0);
        assert!(click.mouse.left_released);
        assert_eq!(click.mouse.x, 400.0);
        assert_eq!(click.mouse.y, 250.0);
    }

    #[test]
    fn test_recording_delta_compression() {
        let mut recording = InputRecording::new(Uuid::nil(), 1.0 / 60.0);

        let mut held = FighterInput::new();
        held.set_right(true);
        let input = FrameInput::fighters(held, FighterInput::new());

        recording.record(0, input);
        recording.record(1, input);
        recording.record(2, input);
        recording.record(3, input);
        assert_eq!(recording.delta_count(), 1);

        recording.record(4, FrameInput::idle());
        assert_eq!(recording.delta_count(), 2);
        assert_eq!(recording.frame_count, 5);
    }

    #[test]
    fn test_recording_input_at() {
        let mut recording = InputRecording::new(Uuid::nil(), 1.0 / 60.0);

        let a = FrameInput::fighters(
            FighterInput::from_flags(FighterInput::FLAG_LEFT),
            FighterInput::new(),
        );
        let b = FrameInput::fighters(
            FighterInput::from_flags(FighterInput::FLAG_RIGHT),
            FighterInput::new(),
        );

        recording.record(10, a);
        recording.record(20, b);

        assert_eq!(recording.input_at(5), FrameInput::idle());
        assert_eq!(recording.input_at(10), a);
        assert_eq!(recording.input_at(15), a);
        assert_eq!(recording.input_at(20), b);
        assert_eq!(recording.input_at(100), b);
    }

    #[test]
    fn test_replay_iterator_expands_frames() {
        let mut recording = InputRecording::new(Uuid::nil(), 1.0 / 60.0);

        let a = FrameInput::fighters(
            FighterInput::from_flags(FighterInput::FLAG_LEFT),
            FighterInput::new(),
        );

        recording.record(0, FrameInput::idle());
        recording.record(3, a);
        recording.record(5, FrameInput::idle());

        let frames: Vec<_> = recording.replay_iter().collect();
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[2].1, FrameInput::idle());
        assert_eq!(frames[3].1, a);
        assert_eq!(frames[4].1, a);
        assert_eq!(frames[5].1, FrameInput::idle());
    }

    #[test]
    fn test_recording_json_round_trip() {
        let mut recording = InputRecording::new(Uuid::new_v4(), 1.0 / 60.0);
        recording.record(0, FrameInput::escape());
        recording.record(1, FrameInput::idle());

        let json = recording.to_json().unwrap();
        let decoded = InputRecording::from_json(&json).unwrap();

        assert_eq!(decoded.bout_id, recording.bout_id);
        assert_eq!(decoded.frame_count, recording.frame_count);
        assert_eq!(decoded.delta_count(), recording.delta_count());
        assert_eq!(decoded.input_at(0), FrameInput::escape());
    }

    #[test]
    fn test_recording_binary_round_trip() {
        let mut recording = InputRecording::new(Uuid::new_v4(), 1.0 / 60.0);
        recording.record(0, FrameInput::click(400.0, 250.0));

        let bytes = recording.to_bytes().unwrap();
        let decoded = InputRecording::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.bout_id, recording.bout_id);
        assert_eq!(decoded.input_at(0), FrameInput::click(400.0, 250.0));
    }

    #[test]
    fn test_recording_rejects_bad_frame_step() {
        let mut recording = InputRecording::new(Uuid::nil(), 1.0 / 60.0);
        recording.record(0, FrameInput::idle());
        recording.frame_dt = 0.0;

        let json = recording.to_json().unwrap();
        assert!(matches!(
            InputRecording::from_json(&json),
            Err(RecordingError::BadFrameStep(_))
        ));
    }
}
