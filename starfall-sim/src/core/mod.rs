//! Core deterministic primitives.
//!
//! Fixed-point scalars and vectors, the seeded RNG and state hashing.
//! Nothing in here knows about players, stars or bombs.

pub mod fixed;
pub mod vec2;
pub mod rng;
pub mod hash;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use vec2::FixedVec2;
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
