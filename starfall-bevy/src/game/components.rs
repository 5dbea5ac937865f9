//! Sprite components linking Bevy entities to simulation bodies.

use bevy::prelude::*;

/// Anything spawned for the running scene.
#[derive(Component)]
pub struct SceneEntity;

/// The background image.
#[derive(Component)]
pub struct Background;

/// A static platform sprite.
#[derive(Component)]
pub struct PlatformSprite;

/// The player sprite.
#[derive(Component)]
pub struct PlayerSprite;

/// Sprite for the star with this id.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarSprite(pub u32);

/// Sprite for the bomb with this id.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombSprite(pub u32);

/// Short-lived sparkle spawned where a star was collected (visual only).
#[derive(Component)]
pub struct Sparkle {
    pub velocity: Vec2,
    pub lifetime: f32,
}

/// Draw order, back to front.
pub mod layer {
    pub const BACKGROUND: f32 = -10.0;
    pub const PLATFORM: f32 = 0.0;
    pub const STAR: f32 = 1.0;
    pub const BOMB: f32 = 2.0;
    pub const PLAYER: f32 = 3.0;
    pub const SPARKLE: f32 = 4.0;
}
