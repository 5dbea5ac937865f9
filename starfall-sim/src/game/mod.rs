//! Game Logic Module
//!
//! All game simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `body`: Static and dynamic arcade bodies
//! - `collision`: Colliders and overlap detectors
//! - `animation`: Player animation definitions and playback
//! - `input`: Key state and delta-compressed recording
//! - `state`: Scene state, player, stars, bombs
//! - `scene`: One-time scene construction
//! - `star`: Star collection and row respawn
//! - `bomb`: Bomb spawning and player contact
//! - `tick`: Simulation loop and replay
//! - `events`: Events for the presentation layer

pub mod body;
pub mod collision;
pub mod animation;
pub mod input;
pub mod state;
pub mod scene;
pub mod star;
pub mod bomb;
pub mod tick;
pub mod events;

// Re-export key types
pub use animation::{AnimationKey, AnimationSet, AnimationState};
pub use body::{Aabb, Body, Contacts, StaticBody};
pub use events::{GameEvent, GameEventData, EventPriority};
pub use input::{InputFrame, InputDelta, InputRecording};
pub use scene::build_scene;
pub use state::{SceneState, PlayerState, StarState, BombState, TextLabel};
pub use tick::{tick, apply_input, replay_session, TickResult};
