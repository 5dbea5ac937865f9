//! Input Capture and Recording
//!
//! Directional key state packed into one byte per tick, plus a
//! delta-compressed recording used for replay.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Directional key state for a single tick.
///
/// No tick field; the recording stores ticks separately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct InputFrame {
    /// Packed key bits:
    /// - Bit 0: left
    /// - Bit 1: right
    /// - Bit 2: up
    /// - Bit 3: down (captured, unused by the rules)
    /// - Bit 4-7: reserved
    pub flags: u8,
}

impl InputFrame {
    /// Left key bit
    pub const LEFT: u8 = 0x01;
    /// Right key bit
    pub const RIGHT: u8 = 0x02;
    /// Up key bit
    pub const UP: u8 = 0x04;
    /// Down key bit
    pub const DOWN: u8 = 0x08;

    const KNOWN: u8 = Self::LEFT | Self::RIGHT | Self::UP | Self::DOWN;

    /// No keys held.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Build from raw bits; reserved bits are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self { flags: bits & Self::KNOWN }
    }

    /// Build from the four key states.
    pub const fn from_keys(left: bool, right: bool, up: bool, down: bool) -> Self {
        let mut flags = 0;
        if left {
            flags |= Self::LEFT;
        }
        if right {
            flags |= Self::RIGHT;
        }
        if up {
            flags |= Self::UP;
        }
        if down {
            flags |= Self::DOWN;
        }
        Self { flags }
    }

    /// Left held.
    #[inline]
    pub fn left(&self) -> bool {
        self.flags & Self::LEFT != 0
    }

    /// Right held.
    #[inline]
    pub fn right(&self) -> bool {
        self.flags & Self::RIGHT != 0
    }

    /// Up held.
    #[inline]
    pub fn up(&self) -> bool {
        self.flags & Self::UP != 0
    }

    /// Down held.
    #[inline]
    pub fn down(&self) -> bool {
        self.flags & Self::DOWN != 0
    }

    /// No key held.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Set or clear a key bit.
    #[inline]
    pub fn set(&mut self, bit: u8, pressed: bool) {
        if pressed {
            self.flags |= bit & Self::KNOWN;
        } else {
            self.flags &= !bit;
        }
    }
}

/// Input change at a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick this input state began on
    pub tick: u32,
    /// The new input state
    pub frame: InputFrame,
}

impl InputDelta {
    /// Create new delta entry.
    pub fn new(tick: u32, frame: InputFrame) -> Self {
        Self { tick, frame }
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Complete input recording for one session.
///
/// Only changes are stored. Ticks are numbered as the scene numbers them:
/// the first simulated tick is 1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed of the recorded session
    pub seed: u64,

    /// First recorded tick
    pub start_tick: u32,

    /// Last recorded tick
    pub end_tick: u32,

    /// Delta-compressed input data.
    deltas: Vec<InputDelta>,

    /// Last recorded input (for delta comparison)
    #[serde(skip)]
    last_frame: InputFrame,
}

impl InputRecording {
    /// Create an empty recording for a session seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start_tick: 1,
            end_tick: 0,
            deltas: Vec::with_capacity(256),
            last_frame: InputFrame::new(),
        }
    }

    /// Record input for a tick.
    ///
    /// Only stores if input changed from previous frame.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.end_tick = self.end_tick.max(tick);

        if frame != self.last_frame {
            self.deltas.push(InputDelta::new(tick, frame));
            self.last_frame = frame;
        }
    }

    /// Input held at `tick`, found by binary search.
    pub fn input_at(&self, tick: u32) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// All deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Number of ticks covered.
    pub fn tick_count(&self) -> u32 {
        (self.end_tick + 1).saturating_sub(self.start_tick)
    }

    /// Close the recording at `end_tick`.
    pub fn finalize(&mut self, end_tick: u32) {
        self.end_tick = end_tick;
    }

    /// Digest of the seed and every delta.
    pub fn digest(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u64(self.seed);
        hasher.update_u32(self.start_tick);
        hasher.update_u32(self.end_tick);
        hasher.update_u32(self.deltas.len() as u32);
        for delta in &self.deltas {
            hasher.update_u32(delta.tick);
            hasher.update_u8(delta.frame.flags);
        }
        hasher.finalize()
    }

    /// Iterate `(tick, input)` pairs from `start_tick` to `end_tick`.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_tick: self.start_tick,
            delta_idx: 0,
            current_frame: InputFrame::new(),
        }
    }
}

/// Iterator for replaying inputs tick-by-tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_tick: u32,
    delta_idx: usize,
    current_frame: InputFrame,
}

impl Iterator for ReplayIterator<'_> {
    type Item = (u32, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_tick > self.recording.end_tick {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.tick > self.current_tick {
                break;
            }
            self.current_frame = delta.frame;
            self.delta_idx += 1;
        }

        let result = (self.current_tick, self.current_frame);
        self.current_tick += 1;
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
    fn test_input_frame_keys() {
        let mut frame = InputFrame::new();
        assert!(frame.is_idle());

        frame.set(InputFrame::LEFT, true);
        frame.set(InputFrame::UP, true);
        assert!(frame.left() && frame.up());
        assert!(!frame.right() && !frame.down());

        frame.set(InputFrame::LEFT, false);
        assert!(!frame.left());
        assert_eq!(frame, InputFrame::from_keys(false, false, true, false));
    }

    #[test]
    fn test_reserved_bits_dropped() {
        let frame = InputFrame::from_bits(0xF2);
        assert_eq!(frame.flags, InputFrame::RIGHT);
    }

    #[test]
    fn test_delta_compression() {
        let mut recording = InputRecording::new(7);
        let right = InputFrame::from_keys(false, true, false, false);
        for tick in 1..=4 {
            recording.record(tick, right);
        }
        assert_eq!(recording.delta_count(), 1);

        recording.record(5, InputFrame::new());
        assert_eq!(recording.delta_count(), 2);
        assert_eq!(recording.tick_count(), 5);
    }

    #[test]
    fn test_idle_prefix_is_not_stored() {
        let mut recording = InputRecording::new(7);
        recording.record(1, InputFrame::new());
        recording.record(2, InputFrame::new());
        assert_eq!(recording.delta_count(), 0);
        assert_eq!(recording.end_tick, 2);
    }

    #[test]
    fn test_input_at() {
        let mut recording = InputRecording::new(1);
        let left = InputFrame::from_keys(true, false, false, false);
        let jump = InputFrame::from_keys(false, false, true, false);

        recording.record(10, left);
        recording.record(20, jump);

        assert!(recording.input_at(5).is_idle());
        assert_eq!(recording.input_at(10), left);
        assert_eq!(recording.input_at(19), left);
        assert_eq!(recording.input_at(20), jump);
        assert_eq!(recording.input_at(500), jump);
    }

    #[test]
    fn test_replay_iterator() {
        let mut recording = InputRecording::new(1);
        let left = InputFrame::from_keys(true, false, false, false);
        let right = InputFrame::from_keys(false, true, false, false);
        recording.record(1, left);
        recording.record(3, right);
        recording.finalize(5);

        let frames: Vec<_> = recording.replay_iter().collect();

        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0], (1, left));
        assert_eq!(frames[1], (2, left));
        assert_eq!(frames[2], (3, right));
        assert_eq!(frames[4], (5, right));
    }

    #[test]
    fn test_digest_tracks_content() {
        let mut a = InputRecording::new(99);
        let mut b = InputRecording::new(99);
        a.record(1, InputFrame::from_bits(InputFrame::LEFT));
        b.record(1, InputFrame::from_bits(InputFrame::LEFT));
        assert_eq!(a.digest(), b.digest());

        b.record(2, InputFrame::from_bits(InputFrame::RIGHT));
        assert_ne!(a.digest(), b.digest());
        assert_ne!(InputRecording::new(1).digest(), InputRecording::new(2).digest());
    }

    #[test]
    fn test_recording_json_round_trip_keeps_replay() {
        let mut recording = InputRecording::new(3);
        recording.record(2, InputFrame::from_bits(InputFrame::UP));
        recording.finalize(4);

        let json = serde_json::to_string(&recording).unwrap();
        let back: InputRecording = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.replay_iter().collect::<Vec<_>>(),
            recording.replay_iter().collect::<Vec<_>>()
        );
    }
}
