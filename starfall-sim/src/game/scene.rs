//! Scene Builder
//!
//! Builds the static world, the player, the star row and the empty bomb
//! group from a validated config. Runs once per session.

use crate::assets::AssetKey;
use crate::config::SimConfig;
use crate::core::fixed::{from_int, to_fixed};
use crate::core::vec2::FixedVec2;
use crate::error::Result;
use crate::game::body::{Body, StaticBody};
use crate::game::state::{SceneState, StarState};

/// Build the scene for one session.
///
/// Star bounces are drawn from the session RNG in star id order, so the
/// seed fixes them along with everything else.
pub fn build_scene(config: &SimConfig, seed: u64) -> Result<SceneState> {
    config.validate()?;

    let rules = config.rules();
    let assets = &config.assets;

    let ground_size = assets.body_size(AssetKey::Ground)?;
    let star_size = assets.body_size(AssetKey::Star)?;
    let bomb_size = assets.body_size(AssetKey::Bomb)?;
    let player_size = assets.body_size(AssetKey::Dude)?;

    let p = &config.player;
    let player = Body::new(FixedVec2::from_ints(p.spawn_x, p.spawn_y), player_size)
        .with_bounce(to_fixed(p.bounce))
        .with_extra_gravity(to_fixed(p.extra_gravity))
        .with_world_bounds();

    let mut state = SceneState::new(seed, rules, player, bomb_size);

    state.platforms = config
        .platforms
        .iter()
        .map(|pc| StaticBody::new(FixedVec2::from_ints(pc.x, pc.y), ground_size.scale_int(pc.scale)))
        .collect();

    let s = &config.stars;
    let bounce_min = to_fixed(s.bounce_min);
    let bounce_max = to_fixed(s.bounce_max);
    for i in 0..s.count {
        let home_x = from_int(s.start_x + s.step_x * i as i32);
        // Upper bound inclusive, like a float draw from [min, max]
        let bounce = state.rng.next_fixed_range(bounce_min, bounce_max + 1);
        let body = Body::new(FixedVec2::new(home_x, rules.star_respawn_y), star_size)
            .with_bounce_y(bounce);
        state.stars.push(StarState { id: i, home_x, body });
    }

    tracing::debug!(
        seed,
        platforms = state.platforms.len(),
        stars = state.stars.len(),
        "scene built"
    );

    Ok(state)
}
