//! Bombs
//!
//! Spawning on the side of the world away from the player, and the terminal
//! player-bomb contact.

use crate::core::fixed::{Fixed, from_int, to_int};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::animation::AnimationKey;
use crate::game::body::Body;
use crate::game::events::GameEvent;
use crate::game::state::{BombState, SceneState, HIT_TINT};

/// Pick a whole-pixel spawn x on the half of the world the player is not in.
///
/// Player left of centre: `[width/2, width)`. Otherwise: `[0, width/2)`.
pub fn pick_spawn_x(rng: &mut DeterministicRng, player_x: Fixed, world_width: Fixed) -> Fixed {
    let width = to_int(world_width);
    let half = width / 2;

    let x = if player_x < from_int(half) {
        rng.next_int_range(half, width - 1)
    } else {
        rng.next_int_range(0, half - 1)
    };

    from_int(x)
}

/// Spawn one bomb and return its id.
///
/// The spawn x is drawn before the horizontal speed.
pub fn spawn_bomb(state: &mut SceneState) -> u32 {
    let rules = state.rules;
    let x = pick_spawn_x(&mut state.rng, state.player.body.position.x, rules.world_size.x);
    let drift = state.rng.next_int_range(-rules.bomb_max_drift, rules.bomb_max_drift);

    let position = FixedVec2::new(x, rules.bomb_spawn_y);
    let velocity = FixedVec2::new(from_int(drift), rules.bomb_fall_speed);

    let mut body = Body::new(position, state.bomb_size)
        .with_bounce(rules.bomb_bounce)
        .with_world_bounds();
    body.velocity = velocity;

    let id = state.next_bomb_id;
    state.next_bomb_id += 1;
    state.bombs.push(BombState { id, body });

    let tick = state.tick;
    state.push_event(GameEvent::bomb_spawned(tick, id, position, velocity));

    #[cfg(feature = "debug-tracing")]
    tracing::debug!(tick, bomb_id = id, %position, %velocity, "bomb spawned");

    id
}

/// The player touched a bomb: pause physics, tint the player red, face the
/// camera and end the game.
///
/// Returns false if the game was already over or the bomb is unknown.
pub fn hit_bomb(state: &mut SceneState, bomb_id: u32) -> bool {
    if state.game_over || state.bomb(bomb_id).is_none() {
        return false;
    }

    state.physics_paused = true;
    state.player.tint = Some(HIT_TINT);
    state.player.animation.play(AnimationKey::Turn, false);
    state.game_over = true;

    let tick = state.tick;
    let score = state.score;
    state.push_event(GameEvent::player_hit(tick, bomb_id));
    state.push_event(GameEvent::game_over(tick, score));

    #[cfg(feature = "debug-tracing")]
    tracing::debug!(tick, bomb_id, score, "player hit");

    true
}
