//! Simulation Tick
//!
//! The per-tick loop. Must be 100% deterministic: fixed-point math only,
//! bodies visited in id order, randomness only from `state.rng`.
//!
//! Order within a tick:
//!
//! 1. advance the tick counter
//! 2. input mapper (reads contact flags left by the previous physics step)
//! 3. physics step and detectors, unless physics is paused
//! 4. animation playback
//! 5. drain events

use crate::config::SimConfig;
use crate::error::Result;
use crate::game::animation::AnimationKey;
use crate::game::bomb::hit_bomb;
use crate::game::collision::{
    bodies_overlap, check_star_overlaps, collide_bombs_with_platforms,
    collide_player_with_bombs, collide_stars_with_platforms, collide_with_platforms,
};
use crate::game::events::{sort_events, GameEvent};
use crate::game::input::{InputFrame, InputRecording};
use crate::game::scene::build_scene;
use crate::game::star::collect_star;
use crate::game::state::SceneState;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Tick just simulated
    pub tick: u32,
    /// Events generated this tick, ordered by priority
    pub events: Vec<GameEvent>,
    /// Whether the game is over after this tick
    pub game_over: bool,
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The scene state (will be mutated); carries the compiled rules
/// * `input` - Key state for this tick
pub fn tick(state: &mut SceneState, input: InputFrame) -> TickResult {
    // 0. Advance tick counter
    state.tick += 1;

    // 1. Input mapper
    if !(state.game_over && state.rules.gate_input_on_game_over) {
        apply_input(state, input);
    }

    // 2. Physics and detectors
    if !state.physics_paused {
        step_bodies(state);
        run_detectors(state);
    }

    // 3. Animation
    let animations = state.animations;
    let dt = state.rules.dt;
    state.player.animation.advance(&animations, dt);

    // Collect events
    let mut events = state.take_events();
    sort_events(&mut events);

    TickResult {
        tick: state.tick,
        events,
        game_over: state.game_over,
    }
}

/// Map directional input onto the player's velocity and animation.
///
/// Left wins over right. A jump needs up held while the player stood on
/// something at the end of the previous physics step.
pub fn apply_input(state: &mut SceneState, input: InputFrame) {
    let rules = state.rules;
    let player = &mut state.player;

    if input.left() {
        player.body.velocity.x = -rules.run_speed;
        player.animation.play(AnimationKey::Left, true);
    } else if input.right() {
        player.body.velocity.x = rules.run_speed;
        player.animation.play(AnimationKey::Right, true);
    } else {
        player.body.velocity.x = 0;
        player.animation.play(AnimationKey::Turn, true);
    }

    if input.up() && player.body.touching.down {
        player.body.velocity.y = rules.jump_velocity;
    }
}

/// Integrate every enabled dynamic body and apply world bounds.
fn step_bodies(state: &mut SceneState) {
    let rules = state.rules;

    let bodies = std::iter::once(&mut state.player.body)
        .chain(state.stars.iter_mut().map(|s| &mut s.body))
        .chain(state.bombs.iter_mut().map(|b| &mut b.body));

    for body in bodies {
        if !body.enabled {
            continue;
        }
        body.reset_contacts();
        body.integrate(rules.gravity, rules.dt);
        body.constrain_to_world(rules.world_size);
    }
}

/// Run the detectors in registration order, dispatching to the handlers.
fn run_detectors(state: &mut SceneState) {
    // 1. player <-> platforms
    collide_with_platforms(&mut state.player.body, &state.platforms);

    // 2. stars <-> platforms
    collide_stars_with_platforms(state);

    // 3. player <-> stars (overlap)
    for overlap in check_star_overlaps(state) {
        // An earlier collection this tick may have respawned the row
        let still_touching = state
            .star(overlap.star_id)
            .is_some_and(|star| bodies_overlap(&state.player.body, &star.body));
        if still_touching {
            collect_star(state, overlap.star_id);
        }
    }

    // 4. bombs <-> platforms
    collide_bombs_with_platforms(state);

    // 5. player <-> bombs
    for contact in collide_player_with_bombs(state) {
        hit_bomb(state, contact.bomb_id);
    }
}

/// Replay a recording from a fresh scene.
///
/// Returns the final state and every event raised along the way.
pub fn replay_session(
    config: &SimConfig,
    seed: u64,
    recording: &InputRecording,
) -> Result<(SceneState, Vec<GameEvent>)> {
    let mut state = build_scene(config, seed)?;
    let mut all_events = Vec::new();

    for (_tick, input) in recording.replay_iter() {
        let result = tick(&mut state, input);
        all_events.extend(result.events);
    }

    Ok((state, all_events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::from_int;
    use crate::core::vec2::FixedVec2;
    use crate::game::bomb::spawn_bomb;
    use crate::game::events::GameEventData;

    const LEFT: InputFrame = InputFrame::from_keys(true, false, false, false);
    const RIGHT: InputFrame = InputFrame::from_keys(false, true, false, false);
    const UP: InputFrame = InputFrame::from_keys(false, false, true, false);
    const IDLE: InputFrame = InputFrame::new();

    fn scene(seed: u64) -> SceneState {
        build_scene(&SimConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_left_sets_velocity_and_animation() {
        let mut state = scene(1);
        apply_input(&mut state, LEFT);
        assert_eq!(state.player.body.velocity.x, from_int(-160));
        assert_eq!(state.player.animation.current, AnimationKey::Left);

        // Left wins when both are held
        apply_input(&mut state, InputFrame::from_keys(true, true, false, false));
        assert_eq!(state.player.body.velocity.x, from_int(-160));
    }

    #[test]
    fn test_right_and_idle() {
        let mut state = scene(1);
        apply_input(&mut state, RIGHT);
        assert_eq!(state.player.body.velocity.x, from_int(160));
        assert_eq!(state.player.animation.current, AnimationKey::Right);

        apply_input(&mut state, IDLE);
        assert_eq!(state.player.body.velocity.x, 0);
        assert_eq!(state.player.animation.current, AnimationKey::Turn);
    }

    #[test]
    fn test_jump_needs_ground_contact() {
        let mut state = scene(1);
        state.player.body.velocity.y = from_int(5);

        state.player.body.touching.down = false;
        apply_input(&mut state, UP);
        assert_eq!(state.player.body.velocity.y, from_int(5));

        state.player.body.touching.down = true;
        apply_input(&mut state, IDLE);
        assert_eq!(state.player.body.velocity.y, from_int(5));

        apply_input(&mut state, UP);
        assert_eq!(state.player.body.velocity.y, from_int(-500));
    }

    #[test]
    fn test_player_lands_on_floor_and_can_jump() {
        let mut state = scene(1);
        for _ in 0..120 {
            tick(&mut state, IDLE);
        }
        let player = &state.player.body;
        assert!(player.touching.down);
        // Floor top is y=536, player half height 24
        assert!((player.position.y - from_int(512)).abs() <= from_int(1));

        tick(&mut state, UP);
        assert!(state.player.body.velocity.y < 0);
        assert!(state.player.body.position.y < from_int(512));
    }

    #[test]
    fn test_stars_fall_and_rest_on_platforms() {
        let mut state = scene(2);
        for _ in 0..300 {
            tick(&mut state, IDLE);
        }
        for star in &state.stars {
            let bottom = star.body.aabb().max.y;
            assert!(bottom <= from_int(536) + from_int(1), "star {} fell through", star.id);
        }
    }

    #[test]
    fn test_touching_a_star_collects_it_once() {
        let mut state = scene(3);
        let player_pos = state.player.body.position;
        state.star_mut(5).unwrap().body.position = player_pos;

        let result = tick(&mut state, IDLE);
        assert_eq!(result.events.len(), 1);
        assert!(matches!(result.events[0].data, GameEventData::StarCollected { star_id: 5, score: 10, .. }));
        assert!(!state.star(5).unwrap().body.enabled);

        for _ in 0..30 {
            assert!(tick(&mut state, IDLE).events.is_empty());
        }
        assert_eq!(state.score, 10);
    }

    /// Collect stars 0..10 directly and park 10 and 11 on the player.
    fn two_stars_left_under_player(player_pos: FixedVec2) -> SceneState {
        let mut state = scene(6);
        for id in 0..10 {
            collect_star(&mut state, id);
        }
        state.take_events();

        state.player.body.position = player_pos;
        state.player.body.velocity = FixedVec2::ZERO;
        for id in [10, 11] {
            let star = state.star_mut(id).unwrap();
            star.body.position = player_pos;
            star.body.velocity = FixedVec2::ZERO;
        }
        state
    }

    #[test]
    fn test_last_two_stars_in_one_step() {
        let mut state = two_stars_left_under_player(FixedVec2::from_ints(100, 450));

        let result = tick(&mut state, IDLE);
        let data: Vec<_> = result.events.iter().map(|e| e.data.clone()).collect();
        assert_eq!(data.len(), 4);
        assert!(matches!(data[0], GameEventData::StarCollected { star_id: 10, score: 110, .. }));
        assert!(matches!(data[1], GameEventData::StarCollected { star_id: 11, score: 120, .. }));
        assert_eq!(data[2], GameEventData::StarsRespawned { count: 12 });
        assert!(matches!(data[3], GameEventData::BombSpawned { bomb_id: 0, .. }));

        assert_eq!(state.score, 120);
        assert_eq!(state.active_star_count(), 12);
        assert_eq!(state.bombs.len(), 1);
    }

    #[test]
    fn test_star_respawning_onto_player_waits_a_step() {
        // Star 0 comes home at (12, 0), inside the player's box
        let mut state = two_stars_left_under_player(FixedVec2::from_ints(16, 30));

        let result = tick(&mut state, IDLE);
        let collected = result
            .events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::StarCollected { .. }))
            .count();
        assert_eq!(collected, 2);
        assert_eq!(state.score, 120);
        assert!(state.star(0).unwrap().body.enabled);
        assert!(bodies_overlap(&state.player.body, &state.star(0).unwrap().body));

        let result = tick(&mut state, IDLE);
        assert!(matches!(
            result.events[0].data,
            GameEventData::StarCollected { star_id: 0, score: 130, .. }
        ));
        assert_eq!(state.bombs.len(), 1);
    }

    #[test]
    fn test_bomb_contact_freezes_world() {
        let mut state = scene(4);
        let id = spawn_bomb(&mut state);
        {
            let player_pos = state.player.body.position;
            let bomb = state.bombs.iter_mut().find(|b| b.id == id).unwrap();
            bomb.body.position = player_pos;
            bomb.body.velocity = FixedVec2::ZERO;
        }
        state.take_events();

        let result = tick(&mut state, IDLE);
        assert!(result.game_over);
        assert_eq!(result.events[0].data, GameEventData::PlayerHit { bomb_id: id });
        assert!(matches!(result.events[1].data, GameEventData::GameOver { .. }));

        let frozen: Vec<_> = std::iter::once(state.player.body.position)
            .chain(state.stars.iter().map(|s| s.body.position))
            .chain(state.bombs.iter().map(|b| b.body.position))
            .collect();

        for _ in 0..60 {
            let result = tick(&mut state, RIGHT);
            assert!(result.game_over);
            assert!(result.events.is_empty());
        }

        let after: Vec<_> = std::iter::once(state.player.body.position)
            .chain(state.stars.iter().map(|s| s.body.position))
            .chain(state.bombs.iter().map(|b| b.body.position))
            .collect();
        assert_eq!(frozen, after);
        assert!(state.game_over && state.physics_paused);
    }

    #[test]
    fn test_input_after_game_over() {
        let mut state = scene(5);
        state.game_over = true;
        state.physics_paused = true;

        tick(&mut state, LEFT);
        assert_eq!(state.player.body.velocity.x, from_int(-160));
        assert_eq!(state.player.animation.current, AnimationKey::Left);

        let mut config = SimConfig::default();
        config.gate_input_on_game_over = true;
        let mut gated = build_scene(&config, 5).unwrap();
        gated.game_over = true;
        gated.physics_paused = true;

        tick(&mut gated, LEFT);
        assert_eq!(gated.player.body.velocity.x, 0);
        assert_eq!(gated.player.animation.current, AnimationKey::Turn);
    }

    #[test]
    fn test_replay_matches_live_run() {
        let config = SimConfig::default();
        let seed = 0xDEAD_BEEF;
        let mut live = build_scene(&config, seed).unwrap();
        let mut recording = InputRecording::new(seed);
        let mut live_events = Vec::new();

        for t in 0..600u32 {
            let input = match (t / 45) % 4 {
                0 => RIGHT,
                1 => InputFrame::from_keys(false, true, true, false),
                2 => LEFT,
                _ => UP,
            };
            recording.record(live.tick + 1, input);
            live_events.extend(tick(&mut live, input).events);
        }
        recording.finalize(live.tick);

        let (replayed, events) = replay_session(&config, seed, &recording).unwrap();
        assert_eq!(replayed.tick, live.tick);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        assert_eq!(events, live_events);
    }
}
