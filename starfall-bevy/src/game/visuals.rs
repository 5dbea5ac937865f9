//! Visuals - sprites mirroring simulation bodies, plus star sparkles

use std::collections::HashSet;

use bevy::prelude::*;

use starfall::game::{Body, GameEventData, SceneState};
use starfall::FixedVec2;

use super::{
    layer, screen_to_world, tint_color, Background, BombSprite, GameAssets, PlatformSprite,
    PlayerSprite, SceneEntity, SimEvent, Simulation, Sparkle, StarSprite,
};

const SPARKLE_COUNT: usize = 8;
const SPARKLE_LIFETIME: f32 = 0.5;

/// Size of a body in pixels.
fn body_size(body: &Body) -> Vec2 {
    let (w, h) = body.half_size.scale_int(2).to_floats();
    Vec2::new(w, h)
}

fn body_translation(body: &Body, world_size: FixedVec2, z: f32) -> Vec3 {
    screen_to_world(body.position, world_size).extend(z)
}

fn visibility(enabled: bool) -> Visibility {
    if enabled {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

// ============================================================================
// SPAWNING
// ============================================================================

/// Spawn the background, platforms, stars and player for a fresh scene.
pub fn spawn_scene_sprites(commands: &mut Commands, state: &SceneState, assets: &GameAssets) {
    let world_size = state.rules.world_size;

    commands.spawn((
        SceneEntity,
        Background,
        Sprite::from_image(assets.sky.clone()),
        Transform::from_translation(screen_to_world(state.background_center(), world_size).extend(layer::BACKGROUND)),
    ));

    for platform in &state.platforms {
        let (w, h) = platform.half_size.scale_int(2).to_floats();
        commands.spawn((
            SceneEntity,
            PlatformSprite,
            Sprite {
                image: assets.ground.clone(),
                custom_size: Some(Vec2::new(w, h)),
                ..default()
            },
            Transform::from_translation(screen_to_world(platform.position, world_size).extend(layer::PLATFORM)),
        ));
    }

    for star in &state.stars {
        commands.spawn((
            SceneEntity,
            StarSprite(star.id),
            Sprite {
                image: assets.star.clone(),
                custom_size: Some(body_size(&star.body)),
                ..default()
            },
            Transform::from_translation(body_translation(&star.body, world_size, layer::STAR)),
            visibility(star.body.enabled),
        ));
    }

    let player = &state.player;
    commands.spawn((
        SceneEntity,
        PlayerSprite,
        Sprite {
            image: assets.dude.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: assets.dude_layout.clone(),
                index: state.player_frame() as usize,
            }),
            color: tint_color(player.tint),
            ..default()
        },
        Transform::from_translation(body_translation(&player.body, world_size, layer::PLAYER)),
    ));

    info!(
        "Spawned {} platforms, {} stars and the player",
        state.platforms.len(),
        state.stars.len()
    );
}

/// Give every bomb in the simulation a sprite.
pub fn spawn_bomb_sprites(
    mut commands: Commands,
    sim: Res<Simulation>,
    assets: Res<GameAssets>,
    existing: Query<&BombSprite>,
) {
    let drawn: HashSet<u32> = existing.iter().map(|sprite| sprite.0).collect();
    let world_size = sim.state.rules.world_size;

    for bomb in sim.state.bombs.iter().filter(|bomb| !drawn.contains(&bomb.id)) {
        commands.spawn((
            SceneEntity,
            BombSprite(bomb.id),
            Sprite {
                image: assets.bomb.clone(),
                custom_size: Some(body_size(&bomb.body)),
                ..default()
            },
            Transform::from_translation(body_translation(&bomb.body, world_size, layer::BOMB)),
        ));
    }
}

// ============================================================================
// SYNC
// ============================================================================

/// Copy positions, frame, tint and visibility from the simulation.
#[allow(clippy::type_complexity)]
pub fn sync_sprites(
    sim: Res<Simulation>,
    mut player_query: Query<(&mut Sprite, &mut Transform), With<PlayerSprite>>,
    mut star_query: Query<(&StarSprite, &mut Transform, &mut Visibility), Without<PlayerSprite>>,
    mut bomb_query: Query<(&BombSprite, &mut Transform, &mut Visibility), (Without<PlayerSprite>, Without<StarSprite>)>,
) {
    let state = &sim.state;
    let world_size = state.rules.world_size;

    if let Ok((mut sprite, mut transform)) = player_query.get_single_mut() {
        transform.translation = body_translation(&state.player.body, world_size, layer::PLAYER);
        sprite.color = tint_color(state.player.tint);
        if let Some(atlas) = &mut sprite.texture_atlas {
            atlas.index = state.player_frame() as usize;
        }
    }

    for (marker, mut transform, mut vis) in star_query.iter_mut() {
        let Some(star) = state.star(marker.0) else {
            continue;
        };
        transform.translation = body_translation(&star.body, world_size, layer::STAR);
        *vis = visibility(star.body.enabled);
    }

    for (marker, mut transform, mut vis) in bomb_query.iter_mut() {
        let Some(bomb) = state.bomb(marker.0) else {
            continue;
        };
        transform.translation = body_translation(&bomb.body, world_size, layer::BOMB);
        *vis = visibility(bomb.body.enabled);
    }
}

// ============================================================================
// SPARKLES
// ============================================================================

/// Where a collection burst starts: the star's position when caught.
fn sparkle_origin(data: &GameEventData, world_size: FixedVec2) -> Option<Vec3> {
    match data {
        GameEventData::StarCollected { position, .. } => {
            Some(screen_to_world(*position, world_size).extend(layer::SPARKLE))
        }
        _ => None,
    }
}

/// Burst of sparkles where a star was collected.
pub fn spawn_sparkles(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut events: EventReader<SimEvent>,
) {
    let world_size = sim.state.rules.world_size;

    for event in events.read() {
        let Some(origin) = sparkle_origin(&event.data, world_size) else {
            continue;
        };

        for i in 0..SPARKLE_COUNT {
            let angle = (i as f32 / SPARKLE_COUNT as f32) * std::f32::consts::TAU;
            let speed = 80.0 + rand::random::<f32>() * 40.0;

            commands.spawn((
                SceneEntity,
                Sparkle {
                    velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                    lifetime: SPARKLE_LIFETIME,
                },
                Sprite {
                    color: Color::srgb(1.0, 0.9, 0.3),
                    custom_size: Some(Vec2::splat(4.0)),
                    ..default()
                },
                Transform::from_translation(origin),
            ));
        }
    }
}

/// Move and fade sparkles, despawning expired ones.
pub fn update_sparkles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Sparkle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut sparkle, mut transform, mut sprite) in query.iter_mut() {
        sparkle.lifetime -= dt;
        if sparkle.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation += (sparkle.velocity * dt).extend(0.0);
        sparkle.velocity *= 0.92;
        sprite.color = sprite.color.with_alpha(sparkle.lifetime / SPARKLE_LIFETIME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_size_is_full_extent() {
        let body = Body::new(FixedVec2::from_ints(100, 100), FixedVec2::from_ints(32, 48));
        assert_eq!(body_size(&body), Vec2::new(32.0, 48.0));
    }

    #[test]
    fn test_disabled_bodies_hidden() {
        assert_eq!(visibility(true), Visibility::Inherited);
        assert_eq!(visibility(false), Visibility::Hidden);
    }

    #[test]
    fn test_sparkles_start_where_star_was_caught() {
        let world = FixedVec2::from_ints(800, 600);
        let caught = GameEventData::StarCollected {
            star_id: 11,
            score: 120,
            position: FixedVec2::from_ints(300, 480),
        };
        assert_eq!(sparkle_origin(&caught, world), Some(Vec3::new(-100.0, -180.0, layer::SPARKLE)));

        let respawned = GameEventData::StarsRespawned { count: 12 };
        assert_eq!(sparkle_origin(&respawned, world), None);
    }
}
