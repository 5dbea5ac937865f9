//! Player Animations
//!
//! Named frame ranges over the player spritesheet and the playback state that
//! steps through them at a fixed frame rate.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{Fixed, FIXED_ONE, fixed_div, from_int};

/// Animation names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AnimationKey {
    /// Running left
    Left = 0,
    /// Facing the camera
    Turn = 1,
    /// Running right
    Right = 2,
}

impl AnimationKey {
    /// Name as it appears in logs.
    pub fn name(self) -> &'static str {
        match self {
            AnimationKey::Left => "left",
            AnimationKey::Turn => "turn",
            AnimationKey::Right => "right",
        }
    }
}

/// A contiguous frame range played at a fixed rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDef {
    /// First frame index (inclusive)
    pub first: u32,
    /// Last frame index (inclusive)
    pub last: u32,
    /// Frames per second
    pub frame_rate: u32,
    /// Loop back to `first` after `last`
    pub repeat: bool,
}

impl AnimationDef {
    /// Seconds each frame stays on screen.
    pub fn frame_duration(&self) -> Fixed {
        fixed_div(FIXED_ONE, from_int(self.frame_rate.max(1) as i32))
    }

    /// Frames in the range.
    pub fn frame_count(&self) -> u32 {
        self.last - self.first + 1
    }
}

/// The player's three animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSet {
    /// Frames 0-3 at 10 fps, looping
    pub left: AnimationDef,
    /// Frame 4 at 20 fps
    pub turn: AnimationDef,
    /// Frames 5-8 at 10 fps, looping
    pub right: AnimationDef,
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self {
            left: AnimationDef { first: 0, last: 3, frame_rate: 10, repeat: true },
            turn: AnimationDef { first: 4, last: 4, frame_rate: 20, repeat: false },
            right: AnimationDef { first: 5, last: 8, frame_rate: 10, repeat: true },
        }
    }
}

impl AnimationSet {
    /// Definition for a key.
    pub fn get(&self, key: AnimationKey) -> &AnimationDef {
        match key {
            AnimationKey::Left => &self.left,
            AnimationKey::Turn => &self.turn,
            AnimationKey::Right => &self.right,
        }
    }

    /// Highest frame index referenced by any animation.
    pub fn max_frame(&self) -> u32 {
        self.left.last.max(self.turn.last).max(self.right.last)
    }
}

/// Playback state of the current animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationState {
    /// Animation being played
    pub current: AnimationKey,
    /// Offset into the animation's frame range
    pub frame_offset: u32,
    /// Time spent on the current frame
    pub elapsed: Fixed,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            current: AnimationKey::Turn,
            frame_offset: 0,
            elapsed: 0,
        }
    }
}

impl AnimationState {
    /// Switch to `key`. With `ignore_if_playing`, replaying the current
    /// animation leaves its progress untouched.
    pub fn play(&mut self, key: AnimationKey, ignore_if_playing: bool) {
        if ignore_if_playing && self.current == key {
            return;
        }
        self.current = key;
        self.frame_offset = 0;
        self.elapsed = 0;
    }

    /// Advance playback by `dt` seconds.
    pub fn advance(&mut self, set: &AnimationSet, dt: Fixed) {
        let def = set.get(self.current);
        let frame_duration = def.frame_duration();
        if frame_duration <= 0 {
            return;
        }

        self.elapsed = self.elapsed.wrapping_add(dt);
        while self.elapsed >= frame_duration {
            self.elapsed -= frame_duration;
            if self.frame_offset + 1 < def.frame_count() {
                self.frame_offset += 1;
            } else if def.repeat {
                self.frame_offset = 0;
            }
        }
    }

    /// Spritesheet frame index to display.
    pub fn current_frame(&self, set: &AnimationSet) -> u32 {
        let def = set.get(self.current);
        def.first + self.frame_offset.min(def.frame_count() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::TICK_DURATION;

    #[test]
    fn test_default_frames() {
        let set = AnimationSet::default();
        let mut anim = AnimationState::default();
        assert_eq!(anim.current_frame(&set), 4);

        anim.play(AnimationKey::Left, true);
        assert_eq!(anim.current_frame(&set), 0);

        anim.play(AnimationKey::Right, true);
        assert_eq!(anim.current_frame(&set), 5);
        assert_eq!(set.max_frame(), 8);
    }

    #[test]
    fn test_left_loops_at_ten_fps() {
        let set = AnimationSet::default();
        let mut anim = AnimationState::default();
        anim.play(AnimationKey::Left, true);

        // One frame lasts 0.1 s, just over 6 ticks at 60 Hz
        for _ in 0..7 {
            anim.advance(&set, TICK_DURATION);
        }
        assert_eq!(anim.current_frame(&set), 1);

        // A further 0.4 s runs one full loop
        for _ in 0..24 {
            anim.advance(&set, TICK_DURATION);
        }
        assert_eq!(anim.current_frame(&set), 1);
    }

    #[test]
    fn test_play_ignore_if_playing_keeps_progress() {
        let set = AnimationSet::default();
        let mut anim = AnimationState::default();
        anim.play(AnimationKey::Right, true);
        for _ in 0..7 {
            anim.advance(&set, TICK_DURATION);
        }
        let frame = anim.current_frame(&set);
        assert_eq!(frame, 6);

        anim.play(AnimationKey::Right, true);
        assert_eq!(anim.current_frame(&set), frame);

        anim.play(AnimationKey::Right, false);
        assert_eq!(anim.current_frame(&set), 5);
    }

    #[test]
    fn test_turn_holds_single_frame() {
        let set = AnimationSet::default();
        let mut anim = AnimationState::default();
        for _ in 0..120 {
            anim.advance(&set, TICK_DURATION);
        }
        assert_eq!(anim.current_frame(&set), 4);
    }
}
