//! Game Events
//!
//! Events raised by the gameplay handlers. The presentation layer reads them
//! instead of being called back by the simulation.

use serde::{Serialize, Deserialize};

use crate::core::vec2::FixedVec2;

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Terminal hazard contact first
    Hazard = 0,
    /// Then pickups
    Collection = 1,
    /// Then row respawns
    Respawn = 2,
    /// Then new hazards
    Spawn = 3,
    /// Lowest priority
    Other = 255,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A star was collected
    StarCollected {
        /// Star collected
        star_id: u32,
        /// Score after the collection
        score: u32,
        /// Where the star was when collected
        position: FixedVec2,
    },

    /// Every star was re-enabled at the top of the world
    StarsRespawned {
        /// Number of stars re-enabled
        count: u32,
    },

    /// A bomb entered the world
    BombSpawned {
        /// New bomb id
        bomb_id: u32,
        /// Spawn position
        position: FixedVec2,
        /// Launch velocity
        velocity: FixedVec2,
    },

    /// The player touched a bomb
    PlayerHit {
        /// Bomb touched
        bomb_id: u32,
    },

    /// The session ended
    GameOver {
        /// Final score
        score: u32,
    },
}

impl GameEventData {
    /// Default priority for this kind of event.
    pub fn priority(&self) -> EventPriority {
        match self {
            GameEventData::PlayerHit { .. } => EventPriority::Hazard,
            GameEventData::StarCollected { .. } => EventPriority::Collection,
            GameEventData::StarsRespawned { .. } => EventPriority::Respawn,
            GameEventData::BombSpawned { .. } => EventPriority::Spawn,
            GameEventData::GameOver { .. } => EventPriority::Other,
        }
    }
}

/// A game event with timing and priority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Processing priority
    pub priority: EventPriority,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event with the kind's default priority.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self {
            tick,
            priority: data.priority(),
            data,
        }
    }

    /// Create star collected event.
    pub fn star_collected(tick: u32, star_id: u32, score: u32, position: FixedVec2) -> Self {
        Self::new(tick, GameEventData::StarCollected { star_id, score, position })
    }

    /// Create stars respawned event.
    pub fn stars_respawned(tick: u32, count: u32) -> Self {
        Self::new(tick, GameEventData::StarsRespawned { count })
    }

    /// Create bomb spawned event.
    pub fn bomb_spawned(tick: u32, bomb_id: u32, position: FixedVec2, velocity: FixedVec2) -> Self {
        Self::new(tick, GameEventData::BombSpawned { bomb_id, position, velocity })
    }

    /// Create player hit event.
    pub fn player_hit(tick: u32, bomb_id: u32) -> Self {
        Self::new(tick, GameEventData::PlayerHit { bomb_id })
    }

    /// Create game over event.
    pub fn game_over(tick: u32, score: u32) -> Self {
        Self::new(tick, GameEventData::GameOver { score })
    }

    /// Ordering key: tick, then priority.
    #[inline]
    pub fn sort_key(&self) -> (u32, EventPriority) {
        (self.tick, self.priority)
    }
}

/// Sort events by tick then priority, keeping emission order for ties.
pub fn sort_events(events: &mut [GameEvent]) {
    events.sort_by_key(GameEvent::sort_key);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ordering() {
        let hit = GameEvent::player_hit(10, 0);
        let collected = GameEvent::star_collected(10, 3, 40, FixedVec2::ZERO);
        let spawned = GameEvent::bomb_spawned(10, 0, FixedVec2::ZERO, FixedVec2::ZERO);
        let over = GameEvent::game_over(10, 40);
        let later = GameEvent::player_hit(11, 0);

        assert!(hit.sort_key() < collected.sort_key());
        assert!(collected.sort_key() < spawned.sort_key());
        assert!(spawned.sort_key() < over.sort_key());
        assert!(over.sort_key() < later.sort_key());
    }

    #[test]
    fn test_stable_sort_keeps_emission_order() {
        let mut events = vec![
            GameEvent::star_collected(5, 7, 10, FixedVec2::ZERO),
            GameEvent::star_collected(5, 2, 20, FixedVec2::ZERO),
            GameEvent::player_hit(5, 0),
        ];
        sort_events(&mut events);

        assert_eq!(events[0].data, GameEventData::PlayerHit { bomb_id: 0 });
        assert!(matches!(events[1].data, GameEventData::StarCollected { star_id: 7, score: 10, .. }));
        assert!(matches!(events[2].data, GameEventData::StarCollected { star_id: 2, score: 20, .. }));
    }
}
