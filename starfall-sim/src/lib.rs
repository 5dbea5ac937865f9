//! # Starfall Simulation
//!
//! Deterministic simulation of a single-screen platformer: run across
//! platforms, collect falling stars, avoid bouncing bombs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    STARFALL SIMULATION                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point arithmetic             │
//! │  ├── vec2.rs     - 2D vector with fixed-point                │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── body.rs     - Arcade physics bodies                     │
//! │  ├── collision.rs- Colliders and overlap detectors           │
//! │  ├── scene.rs    - Scene construction                        │
//! │  ├── tick.rs     - Simulation loop and replay                │
//! │  ├── star.rs     - Star collection                           │
//! │  └── bomb.rs     - Bomb spawning and contact                 │
//! │                                                              │
//! │  assets.rs       - Asset manifest                            │
//! │  config.rs       - Tunables, JSON loading, fixed-point rules │
//! │  error.rs        - Error types                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No floating-point arithmetic in game logic (config floats are
//!   converted once, when the scene is built)
//! - Bodies visited in id order
//! - No system time dependencies
//! - All randomness from seeded Xorshift128+
//!
//! Given identical inputs and RNG seed, a replayed session hashes
//! identically to the live one.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod assets;
pub mod config;
pub mod core;
pub mod error;
pub mod game;

// Re-export commonly used types
pub use assets::{AssetEntry, AssetKey, AssetKind, AssetManifest};
pub use config::{Rules, SimConfig};
pub use crate::core::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use crate::core::vec2::FixedVec2;
pub use crate::core::rng::DeterministicRng;
pub use error::{Result, SceneError};
pub use game::input::{InputFrame, InputDelta, InputRecording};
pub use game::state::{SceneState, PlayerState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
