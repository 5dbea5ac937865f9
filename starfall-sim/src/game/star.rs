//! Star Collection
//!
//! Collecting a star scores it; collecting the last one respawns the whole
//! row and drops a new bomb in the same call.

use crate::core::vec2::FixedVec2;
use crate::game::bomb::spawn_bomb;
use crate::game::events::GameEvent;
use crate::game::state::SceneState;

/// Collect a star.
///
/// Returns false (and changes nothing) if the star is unknown or already
/// collected.
pub fn collect_star(state: &mut SceneState, star_id: u32) -> bool {
    let tick = state.tick;

    let position = match state.star_mut(star_id) {
        Some(star) if star.body.enabled => {
            star.body.disable();
            star.body.position
        }
        _ => return false,
    };

    state.score = state.score.saturating_add(state.rules.score_per_star);
    let score = state.score;
    state.push_event(GameEvent::star_collected(tick, star_id, score, position));

    #[cfg(feature = "debug-tracing")]
    tracing::debug!(tick, star_id, score, "star collected");

    if state.active_star_count() == 0 {
        respawn_stars(state);
        spawn_bomb(state);
    }

    true
}

/// Re-enable every star at its home x and the respawn height, at rest.
///
/// Returns the number of stars re-enabled.
pub fn respawn_stars(state: &mut SceneState) -> u32 {
    let y = state.rules.star_respawn_y;
    let mut count = 0;

    for star in state.stars.iter_mut() {
        star.body.reset(FixedVec2::new(star.home_x, y));
        count += 1;
    }

    let tick = state.tick;
    state.push_event(GameEvent::stars_respawned(tick, count));

    #[cfg(feature = "debug-tracing")]
    tracing::debug!(tick, count, "star row respawned");

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::game::events::GameEventData;
    use crate::game::scene::build_scene;

    fn scene() -> SceneState {
        build_scene(&SimConfig::default(), 42).unwrap()
    }

    #[test]
    fn test_collect_scores_and_disables() {
        let mut state = scene();
        assert!(collect_star(&mut state, 3));

        assert_eq!(state.score, 10);
        assert!(!state.star(3).unwrap().body.enabled);
        assert_eq!(state.active_star_count(), 11);

        let events = state.take_events();
        assert_eq!(events.len(), 1);
        let home = FixedVec2::new(state.star(3).unwrap().home_x, 0);
        assert_eq!(
            events[0].data,
            GameEventData::StarCollected { star_id: 3, score: 10, position: home }
        );
    }

    #[test]
    fn test_collecting_twice_does_not_double_count() {
        let mut state = scene();
        assert!(collect_star(&mut state, 0));
        assert!(!collect_star(&mut state, 0));
        assert!(!collect_star(&mut state, 0));

        assert_eq!(state.score, 10);
        assert_eq!(state.take_events().len(), 1);
    }

    #[test]
    fn test_unknown_star_ignored() {
        let mut state = scene();
        assert!(!collect_star(&mut state, 999));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_last_star_respawns_row_and_spawns_one_bomb() {
        let mut state = scene();
        for id in 0..11 {
            collect_star(&mut state, id);
        }
        assert!(state.bombs.is_empty());
        state.take_events();

        // Move a star so the respawn is observable
        state.star_mut(0).unwrap().body.position = FixedVec2::from_ints(900, 900);
        let last_seen = FixedVec2::from_ints(300, 480);
        state.star_mut(11).unwrap().body.position = last_seen;

        assert!(collect_star(&mut state, 11));

        assert_eq!(state.score, 120);
        assert_eq!(state.active_star_count(), 12);
        assert_eq!(state.bombs.len(), 1);
        for star in &state.stars {
            assert_eq!(star.body.position, FixedVec2::new(star.home_x, 0));
            assert_eq!(star.body.velocity, FixedVec2::ZERO);
        }

        let kinds: Vec<_> = state.take_events().into_iter().map(|e| e.data).collect();
        // The event keeps where the star was caught, not where it respawned
        assert_eq!(
            kinds[0],
            GameEventData::StarCollected { star_id: 11, score: 120, position: last_seen }
        );
        assert_eq!(kinds[1], GameEventData::StarsRespawned { count: 12 });
        assert!(matches!(kinds[2], GameEventData::BombSpawned { bomb_id: 0, .. }));
        assert_eq!(kinds.len(), 3);
    }
}
