//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for the platformer simulation.
//! Positions, velocities and bounce factors are all `Fixed`; floats only
//! appear at configuration time and when handing positions to a renderer.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 pixels                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! An 800x600 world and velocities of a few hundred pixels per second sit
//! comfortably inside that range.

/// Q16.16 fixed-point number stored as i32.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE;

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1;

/// Largest whole-pixel magnitude a world dimension may have.
pub const MAX_WORLD_EXTENT: i32 = 16384;

// =============================================================================
// GAME CONSTANTS (integer literals, no float conversion)
// =============================================================================

/// Tick duration: 1/60 second = 65536 / 60 = 1092
pub const TICK_DURATION: Fixed = 1092;

/// World width: 800 px
pub const WORLD_WIDTH: Fixed = 800 << FIXED_SCALE;

/// World height: 600 px
pub const WORLD_HEIGHT: Fixed = 600 << FIXED_SCALE;

/// World gravity: 300 px/s² downward
pub const GRAVITY: Fixed = 300 << FIXED_SCALE;

/// Player horizontal run speed: 160 px/s
pub const RUN_SPEED: Fixed = 160 << FIXED_SCALE;

/// Jump impulse: -500 px/s (up is negative in screen space)
pub const JUMP_VELOCITY: Fixed = -(500 << FIXED_SCALE);

/// Points per star collected
pub const SCORE_PER_STAR: u32 = 10;

// =============================================================================
// CORE OPERATIONS
// =============================================================================

/// Convert a float to fixed-point.
///
/// # Warning
/// Only use at compile-time or when compiling configuration. NEVER in the
/// tick loop.
///
/// # Example
/// ```
/// use starfall::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Whole pixels to fixed-point.
#[inline]
pub const fn from_int(i: i32) -> Fixed {
    i << FIXED_SCALE
}

/// Fixed-point to whole pixels, truncating toward negative infinity.
#[inline]
pub const fn to_int(f: Fixed) -> i32 {
    f >> FIXED_SCALE
}

/// Convert fixed-point to float for display/rendering.
///
/// # Warning
/// Only use for visual output. NEVER use result in game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Multiply two fixed-point numbers.
///
/// Uses an i64 intermediate to prevent overflow, then truncates.
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    let wide = (a as i64) * (b as i64);
    (wide >> FIXED_SCALE) as Fixed
}

/// Divide two fixed-point numbers.
///
/// Divide-by-zero returns 0 rather than panicking.
#[inline]
pub fn fixed_div(a: Fixed, b: Fixed) -> Fixed {
    if b == 0 {
        return 0;
    }
    let wide = (a as i64) << FIXED_SCALE;
    (wide / b as i64) as Fixed
}

/// Reflect a velocity component off a surface, scaled by `bounce`.
///
/// `bounce = 0` stops dead, `bounce = FIXED_ONE` is perfectly elastic.
#[inline]
pub fn rebound(velocity: Fixed, bounce: Fixed) -> Fixed {
    fixed_mul(velocity, bounce).wrapping_neg()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constants() {
        assert_eq!(FIXED_ONE, 65536);
        assert_eq!(FIXED_HALF, 32768);
        assert_eq!(FIXED_SCALE, 16);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.0), FIXED_ONE);
        assert_eq!(to_fixed(0.5), FIXED_HALF);
        assert_eq!(to_fixed(-1.0), -FIXED_ONE);
        assert_eq!(to_fixed(0.2), 13107);
    }

    #[test]
    fn test_int_conversions() {
        assert_eq!(from_int(400), 400 * FIXED_ONE);
        assert_eq!(to_int(from_int(-12)), -12);
        assert_eq!(to_int(to_fixed(399.75)), 399);
    }

    #[test]
    fn test_fixed_mul() {
        assert_eq!(fixed_mul(to_fixed(2.0), to_fixed(3.0)), to_fixed(6.0));
        assert_eq!(fixed_mul(FIXED_HALF, FIXED_HALF), to_fixed(0.25));
        assert_eq!(fixed_mul(to_fixed(-2.0), to_fixed(3.0)), to_fixed(-6.0));
    }

    #[test]
    fn test_fixed_div() {
        assert_eq!(fixed_div(to_fixed(6.0), to_fixed(2.0)), to_fixed(3.0));
        assert_eq!(fixed_div(FIXED_ONE, to_fixed(4.0)), to_fixed(0.25));
        assert_eq!(fixed_div(FIXED_ONE, 0), 0);
    }

    #[test]
    fn test_rebound() {
        // Fully elastic flips the sign
        assert_eq!(rebound(from_int(20), FIXED_ONE), from_int(-20));
        // Zero bounce stops
        assert_eq!(rebound(from_int(20), 0), 0);
        // Half bounce halves
        assert_eq!(rebound(from_int(-40), FIXED_HALF), from_int(20));
    }

    #[test]
    fn test_game_constants() {
        assert_eq!(TICK_DURATION, FIXED_ONE / 60);
        assert_eq!(to_int(WORLD_WIDTH), 800);
        assert_eq!(to_int(WORLD_HEIGHT), 600);
        assert_eq!(to_int(GRAVITY), 300);
        assert_eq!(to_int(RUN_SPEED), 160);
        assert_eq!(to_int(JUMP_VELOCITY), -500);
    }
}
