//! Scene State
//!
//! The complete simulation context for one session. Owned by the caller and
//! passed by `&mut` into the tick; nothing in the crate holds global state.

use serde::{Serialize, Deserialize};

use crate::config::Rules;
use crate::core::fixed::Fixed;
use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::animation::{AnimationSet, AnimationState};
use crate::game::body::{Body, StaticBody};
use crate::game::events::GameEvent;

/// Tint applied to the player when a bomb hits.
pub const HIT_TINT: u32 = 0xff0000;

/// A piece of on-screen text, positioned by its top-left corner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLabel {
    /// Left edge in pixels
    pub x: i32,
    /// Top edge in pixels
    pub y: i32,
    /// Font size in pixels
    pub font_size: u32,
    /// Text content
    pub text: String,
}

/// The player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    /// Physics body
    pub body: Body,
    /// Colour multiplier, `None` until the player is hit
    pub tint: Option<u32>,
    /// Animation playback
    pub animation: AnimationState,
}

impl PlayerState {
    /// Hash player state.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hash_body(&self.body, hasher);
        hasher.update_u32(self.tint.unwrap_or(0));
        hasher.update_bool(self.tint.is_some());
        hasher.update_u8(self.animation.current as u8);
        hasher.update_u32(self.animation.frame_offset);
        hasher.update_fixed(self.animation.elapsed);
    }
}

/// A collectible star.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StarState {
    /// Star id (index in the row)
    pub id: u32,
    /// X the star returns to when the row respawns
    pub home_x: Fixed,
    /// Physics body; disabled once collected
    pub body: Body,
}

/// A bouncing bomb. Never removed once spawned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BombState {
    /// Bomb id (spawn order)
    pub id: u32,
    /// Physics body
    pub body: Body,
}

/// Complete scene state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneState {
    /// RNG seed of this session
    pub seed: u64,

    /// Ticks simulated so far
    pub tick: u32,

    /// Session RNG; every random quantity is drawn from it
    pub rng: DeterministicRng,

    /// Fixed-point rules compiled from the config
    pub rules: Rules,

    /// The player
    pub player: PlayerState,

    /// Static platforms, in creation order
    pub platforms: Vec<StaticBody>,

    /// Star row, in id order
    pub stars: Vec<StarState>,

    /// Bombs, in spawn order
    pub bombs: Vec<BombState>,

    /// Size of a bomb body
    pub bomb_size: FixedVec2,

    /// Id for the next bomb
    pub next_bomb_id: u32,

    /// Current score
    pub score: u32,

    /// Set on bomb contact, never cleared
    pub game_over: bool,

    /// Set on bomb contact; no body moves and no detector runs while set
    pub physics_paused: bool,

    /// Player animation definitions
    pub animations: AnimationSet,

    /// Events raised since the last drain
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl SceneState {
    /// Empty scene: no platforms, stars or bombs, player at `player_body`.
    ///
    /// [`crate::game::scene::build_scene`] fills it in.
    pub fn new(seed: u64, rules: Rules, player_body: Body, bomb_size: FixedVec2) -> Self {
        Self {
            seed,
            tick: 0,
            rng: DeterministicRng::new(seed),
            rules,
            player: PlayerState {
                body: player_body,
                tint: None,
                animation: AnimationState::default(),
            },
            platforms: Vec::new(),
            stars: Vec::new(),
            bombs: Vec::new(),
            bomb_size,
            next_bomb_id: 0,
            score: 0,
            game_over: false,
            physics_paused: false,
            animations: AnimationSet::default(),
            pending_events: Vec::new(),
        }
    }

    /// Look up a star.
    pub fn star(&self, id: u32) -> Option<&StarState> {
        self.stars.iter().find(|s| s.id == id)
    }

    /// Look up a star mutably.
    pub fn star_mut(&mut self, id: u32) -> Option<&mut StarState> {
        self.stars.iter_mut().find(|s| s.id == id)
    }

    /// Look up a bomb.
    pub fn bomb(&self, id: u32) -> Option<&BombState> {
        self.bombs.iter().find(|b| b.id == id)
    }

    /// Stars still waiting to be collected.
    pub fn active_star_count(&self) -> u32 {
        self.stars.iter().filter(|s| s.body.enabled).count() as u32
    }

    /// Spritesheet frame the player shows.
    pub fn player_frame(&self) -> u32 {
        self.player.animation.current_frame(&self.animations)
    }

    /// Centre of the background image.
    pub fn background_center(&self) -> FixedVec2 {
        self.rules.world_size.half()
    }

    /// Score display text.
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Score label, top-left.
    pub fn score_label(&self) -> TextLabel {
        TextLabel {
            x: 16,
            y: 16,
            font_size: 32,
            text: self.score_text(),
        }
    }

    /// "Game Over" label, once the game has ended.
    pub fn game_over_label(&self) -> Option<TextLabel> {
        self.game_over.then(|| TextLabel {
            x: 250,
            y: 240,
            font_size: 54,
            text: "Game Over".to_string(),
        })
    }

    /// Compute deterministic state hash.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.seed, |hasher| {
            let rng = self.rng.state();
            hasher.update_u64(rng[0]);
            hasher.update_u64(rng[1]);

            hasher.update_u32(self.score);
            hasher.update_bool(self.game_over);
            hasher.update_bool(self.physics_paused);

            self.player.hash_into(hasher);

            hasher.update_u32(self.stars.len() as u32);
            for star in &self.stars {
                hasher.update_u32(star.id);
                hasher.update_fixed(star.home_x);
                hash_body(&star.body, hasher);
            }

            hasher.update_u32(self.bombs.len() as u32);
            for bomb in &self.bombs {
                hasher.update_u32(bomb.id);
                hash_body(&bomb.body, hasher);
            }
            hasher.update_u32(self.next_bomb_id);
        })
    }

    /// Take all pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push an event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

fn hash_body(body: &Body, hasher: &mut StateHasher) {
    hasher.update_vec2(body.position);
    hasher.update_vec2(body.velocity);
    hasher.update_vec2(body.bounce);
    hasher.update_bool(body.enabled);
    hasher.update_bool(body.touching.down);
}
