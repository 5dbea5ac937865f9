//! Simulation Configuration
//!
//! Human-facing tunables (pixels, seconds, fractions) with defaults matching
//! the stock level. [`SimConfig::rules`] compiles them into fixed-point
//! [`Rules`] once, at scene build time; the tick loop never touches floats.

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::assets::{AssetKey, AssetManifest};
use crate::core::fixed::{
    Fixed, FIXED_ONE, from_int, to_fixed, fixed_div,
    MAX_WORLD_EXTENT, SCORE_PER_STAR, TICK_DURATION,
    WORLD_WIDTH, WORLD_HEIGHT, GRAVITY, RUN_SPEED, JUMP_VELOCITY,
};
use crate::core::vec2::FixedVec2;
use crate::error::{Result, SceneError};
use crate::game::animation::AnimationSet;

/// World dimensions and gravity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in pixels
    pub width: i32,
    /// World height in pixels
    pub height: i32,
    /// Downward acceleration in px/s²
    pub gravity: f64,
    /// Simulation ticks per second
    pub tick_rate: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            gravity: 300.0,
            tick_rate: crate::TICK_RATE,
        }
    }
}

/// One static platform, positioned by its centre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Centre x in pixels
    pub x: i32,
    /// Centre y in pixels
    pub y: i32,
    /// Uniform scale applied to the platform texture size
    #[serde(default = "default_scale")]
    pub scale: i32,
}

fn default_scale() -> i32 {
    1
}

/// Player spawn and movement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn x
    pub spawn_x: i32,
    /// Spawn y
    pub spawn_y: i32,
    /// Bounce factor on both axes
    pub bounce: f64,
    /// Gravity added on top of the world gravity, px/s²
    pub extra_gravity: f64,
    /// Horizontal speed while a direction is held, px/s
    pub run_speed: f64,
    /// Upward speed applied by a jump, px/s
    pub jump_speed: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_x: 100,
            spawn_y: 450,
            bounce: 0.2,
            extra_gravity: 300.0,
            run_speed: 160.0,
            jump_speed: 500.0,
        }
    }
}

/// Collectible row layout and scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    /// Number of stars in the row
    pub count: u32,
    /// X of the first star
    pub start_x: i32,
    /// Horizontal gap between stars
    pub step_x: i32,
    /// Y every star spawns and respawns at
    pub y: i32,
    /// Lower bound of the per-star vertical bounce
    pub bounce_min: f64,
    /// Upper bound of the per-star vertical bounce
    pub bounce_max: f64,
    /// Points awarded per star
    pub score: u32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 12,
            start_x: 12,
            step_x: 70,
            y: 0,
            bounce_min: 0.4,
            bounce_max: 0.8,
            score: 10,
        }
    }
}

/// Hazard spawning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    /// Y every bomb spawns at
    pub spawn_y: i32,
    /// Bounce factor on both axes
    pub bounce: f64,
    /// Horizontal launch speed is drawn from [-max_drift, max_drift]
    pub max_drift: i32,
    /// Initial downward speed
    pub fall_speed: i32,
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            spawn_y: 16,
            bounce: 1.0,
            max_drift: 200,
            fall_speed: 20,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World bounds and gravity
    pub world: WorldConfig,
    /// Static platforms
    pub platforms: Vec<PlatformConfig>,
    /// Player tuning
    pub player: PlayerConfig,
    /// Star row
    pub stars: StarConfig,
    /// Bomb spawning
    pub bombs: BombConfig,
    /// Images to load before the scene starts
    pub assets: AssetManifest,
    /// Skip the input mapper once the game is over.
    ///
    /// Off by default: input keeps driving velocity and animation after a
    /// bomb hit, which is visually inert because physics is paused.
    pub gate_input_on_game_over: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            platforms: vec![
                PlatformConfig { x: 400, y: 568, scale: 2 },
                PlatformConfig { x: 600, y: 400, scale: 1 },
                PlatformConfig { x: 50, y: 250, scale: 1 },
                PlatformConfig { x: 750, y: 220, scale: 1 },
            ],
            player: PlayerConfig::default(),
            stars: StarConfig::default(),
            bombs: BombConfig::default(),
            assets: AssetManifest::default(),
            gate_input_on_game_over: false,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and cross-field consistency.
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        if w.width <= 0 || w.height <= 0 || w.width > MAX_WORLD_EXTENT || w.height > MAX_WORLD_EXTENT {
            return invalid(format!(
                "world size {}x{} must be within 1..={}",
                w.width, w.height, MAX_WORLD_EXTENT
            ));
        }
        if w.tick_rate == 0 || w.tick_rate > 1000 {
            return invalid(format!("tick_rate {} must be within 1..=1000", w.tick_rate));
        }
        check_speed("world.gravity", w.gravity)?;

        let p = &self.player;
        check_pixel("player.spawn_x", p.spawn_x)?;
        check_pixel("player.spawn_y", p.spawn_y)?;
        check_speed("player.extra_gravity", p.extra_gravity)?;
        check_speed("player.run_speed", p.run_speed)?;
        check_speed("player.jump_speed", p.jump_speed)?;

        check_fraction("player.bounce", self.player.bounce)?;
        check_fraction("bombs.bounce", self.bombs.bounce)?;
        check_fraction("stars.bounce_min", self.stars.bounce_min)?;
        check_fraction("stars.bounce_max", self.stars.bounce_max)?;
        if self.stars.bounce_min > self.stars.bounce_max {
            return invalid(format!(
                "stars.bounce_min {} exceeds stars.bounce_max {}",
                self.stars.bounce_min, self.stars.bounce_max
            ));
        }

        let s = &self.stars;
        if s.count == 0 || s.count > w.width as u32 {
            return invalid(format!("stars.count {} must be within 1..={}", s.count, w.width));
        }
        if s.step_x < 0 {
            return invalid(format!("stars.step_x {} must not be negative", s.step_x));
        }
        check_pixel("stars.y", s.y)?;
        let last_x = s.start_x as i64 + s.step_x as i64 * (s.count as i64 - 1);
        if s.start_x < 0 || last_x >= w.width as i64 {
            return invalid(format!(
                "star row spans x={}..={} outside world width {}",
                s.start_x, last_x, w.width
            ));
        }

        let b = &self.bombs;
        check_pixel("bombs.spawn_y", b.spawn_y)?;
        if !(0..=MAX_WORLD_EXTENT).contains(&b.max_drift) || !(0..=MAX_WORLD_EXTENT).contains(&b.fall_speed) {
            return invalid(format!(
                "bomb speeds (drift {}, fall {}) must be within 0..={}",
                b.max_drift, b.fall_speed, MAX_WORLD_EXTENT
            ));
        }
        if w.width < 2 {
            return invalid("world must be at least 2 px wide to pick a bomb side".to_string());
        }

        if let Some(dude) = self.assets.get(AssetKey::Dude) {
            let needed = AnimationSet::default().max_frame() + 1;
            if dude.frame_count() < needed {
                return invalid(format!(
                    "player spritesheet has {} frames, animations need {}",
                    dude.frame_count(),
                    needed
                ));
            }
        }

        for (i, p) in self.platforms.iter().enumerate() {
            check_pixel(&format!("platforms[{}].x", i), p.x)?;
            check_pixel(&format!("platforms[{}].y", i), p.y)?;
            if p.scale <= 0 || p.scale > MAX_WORLD_EXTENT {
                return invalid(format!("platform {} has scale {} outside 1..={}", i, p.scale, MAX_WORLD_EXTENT));
            }
            if let Some(ground) = self.assets.get(AssetKey::Ground) {
                let (gw, gh) = ground.frame_size();
                let extent = gw.max(gh) as i64 * p.scale as i64;
                if extent > MAX_WORLD_EXTENT as i64 {
                    return invalid(format!("platform {} scaled to {} px exceeds {}", i, extent, MAX_WORLD_EXTENT));
                }
            }
        }

        self.assets.validate()
    }

    /// Compile into fixed-point rules.
    pub fn rules(&self) -> Rules {
        Rules {
            dt: fixed_div(FIXED_ONE, from_int(self.world.tick_rate as i32)),
            world_size: FixedVec2::from_ints(self.world.width, self.world.height),
            gravity: to_fixed(self.world.gravity),
            run_speed: to_fixed(self.player.run_speed),
            jump_velocity: -to_fixed(self.player.jump_speed),
            score_per_star: self.stars.score,
            star_respawn_y: from_int(self.stars.y),
            bomb_spawn_y: from_int(self.bombs.spawn_y),
            bomb_bounce: to_fixed(self.bombs.bounce),
            bomb_max_drift: self.bombs.max_drift,
            bomb_fall_speed: from_int(self.bombs.fall_speed),
            gate_input_on_game_over: self.gate_input_on_game_over,
        }
    }
}

fn invalid<T>(msg: String) -> Result<T> {
    Err(SceneError::InvalidConfig(msg))
}

/// Whole-pixel coordinate that converts to Q16.16 without wrapping.
fn check_pixel(name: &str, value: i32) -> Result<()> {
    if !(-MAX_WORLD_EXTENT..=MAX_WORLD_EXTENT).contains(&value) {
        return invalid(format!(
            "{} = {} must be within -{}..={}",
            name, value, MAX_WORLD_EXTENT, MAX_WORLD_EXTENT
        ));
    }
    Ok(())
}

/// Non-negative speed or acceleration, px/s or px/s².
fn check_speed(name: &str, value: f64) -> Result<()> {
    if !(0.0..=MAX_WORLD_EXTENT as f64).contains(&value) {
        return invalid(format!("{} = {} must be within [0, {}]", name, value, MAX_WORLD_EXTENT));
    }
    Ok(())
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return invalid(format!("{} = {} must be within [0, 1]", name, value));
    }
    Ok(())
}

/// Fixed-point rules the tick loop reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Tick duration
    pub dt: Fixed,
    /// World width/height
    pub world_size: FixedVec2,
    /// World gravity
    pub gravity: Fixed,
    /// Horizontal run speed
    pub run_speed: Fixed,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_velocity: Fixed,
    /// Points per star
    pub score_per_star: u32,
    /// Y stars return to when the row respawns
    pub star_respawn_y: Fixed,
    /// Y new bombs appear at
    pub bomb_spawn_y: Fixed,
    /// Bomb bounce on both axes
    pub bomb_bounce: Fixed,
    /// Bound for the random horizontal launch speed, whole px/s
    pub bomb_max_drift: i32,
    /// Initial downward bomb speed
    pub bomb_fall_speed: Fixed,
    /// Skip input once the game is over
    pub gate_input_on_game_over: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            dt: TICK_DURATION,
            world_size: FixedVec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            gravity: GRAVITY,
            run_speed: RUN_SPEED,
            jump_velocity: JUMP_VELOCITY,
            score_per_star: SCORE_PER_STAR,
            star_respawn_y: 0,
            bomb_spawn_y: from_int(16),
            bomb_bounce: FIXED_ONE,
            bomb_max_drift: 200,
            bomb_fall_speed: from_int(20),
            gate_input_on_game_over: false,
        }
    }
}
