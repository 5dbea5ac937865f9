//! Asset loading - fetch every manifest entry before the scene starts

use bevy::asset::LoadState;
use bevy::prelude::*;

use starfall::{AssetKey, AssetKind, SimConfig};

use crate::AppState;
use super::Settings;

/// Handles for every image in the manifest, plus the player atlas layout.
#[derive(Resource)]
pub struct GameAssets {
    pub sky: Handle<Image>,
    pub ground: Handle<Image>,
    pub star: Handle<Image>,
    pub bomb: Handle<Image>,
    pub dude: Handle<Image>,
    pub dude_layout: Handle<TextureAtlasLayout>,
}

impl GameAssets {
    /// Image handle for a manifest key.
    pub fn image(&self, key: AssetKey) -> &Handle<Image> {
        match key {
            AssetKey::Sky => &self.sky,
            AssetKey::Ground => &self.ground,
            AssetKey::Star => &self.star,
            AssetKey::Bomb => &self.bomb,
            AssetKey::Dude => &self.dude,
        }
    }
}

/// Atlas grid for a spritesheet entry: cell size, columns.
pub fn atlas_grid(config: &SimConfig, key: AssetKey) -> Option<(UVec2, u32)> {
    match config.assets.get(key)?.kind {
        AssetKind::Spritesheet { frame_width, frame_height, frames } => {
            Some((UVec2::new(frame_width, frame_height), frames))
        }
        AssetKind::Image { .. } => None,
    }
}

/// Queue every manifest entry with the asset server.
pub fn start_loading(
    mut commands: Commands,
    settings: Res<Settings>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let config = &settings.config;
    let load = |key: AssetKey| -> Handle<Image> {
        // Validated config declares every key
        let path = config
            .assets
            .get(key)
            .map(|entry| entry.path.clone())
            .unwrap_or_default();
        info!("Loading {} from {}", key.name(), path);
        asset_server.load(path)
    };

    let (cell, columns) = atlas_grid(config, AssetKey::Dude).unwrap_or((UVec2::new(32, 48), 9));
    let dude_layout = layouts.add(TextureAtlasLayout::from_grid(cell, columns, 1, None, None));

    commands.insert_resource(GameAssets {
        sky: load(AssetKey::Sky),
        ground: load(AssetKey::Ground),
        star: load(AssetKey::Star),
        bomb: load(AssetKey::Bomb),
        dude: load(AssetKey::Dude),
        dude_layout,
    });
}

/// Wait for every image; a failed load ends the application.
pub fn check_loading(
    assets: Res<GameAssets>,
    asset_server: Res<AssetServer>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    let mut ready = true;

    for key in AssetKey::ALL {
        let handle = assets.image(key);
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
            error!("Failed to load asset '{}': {}", key.name(), err);
            exit.send(AppExit::error());
            return;
        }
        ready &= asset_server.is_loaded_with_dependencies(handle);
    }

    if ready {
        info!("All assets loaded");
        next_state.set(AppState::Playing);
    }
}
