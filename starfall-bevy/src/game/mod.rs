//! Game module - drives the simulation and mirrors it on screen
//!
//! The simulation owns every rule. Bevy reads keys, ticks it in
//! `FixedUpdate`, forwards its events and draws its bodies.

use std::path::Path;

use bevy::prelude::*;

use starfall::game::{build_scene, tick, GameEventData, SceneState};
use starfall::{FixedVec2, SimConfig};

use crate::AppState;

pub mod components;
pub mod loading;
pub mod player;
pub mod visuals;

pub use components::*;
pub use loading::GameAssets;

/// Optional config file read from the working directory.
const CONFIG_PATH: &str = "starfall.json";

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Events
            .add_event::<SimEvent>()

            // Config and asset loading
            .add_systems(Startup, (load_settings, loading::start_loading).chain())
            .add_systems(Update, loading::check_loading.run_if(in_state(AppState::Loading)))

            // Scene setup
            .add_systems(OnEnter(AppState::Playing), setup_scene)

            // Simulation (fixed timestep). Keeps ticking after game over:
            // physics is paused but input still drives the player.
            .add_systems(FixedUpdate, step_simulation.run_if(resource_exists::<Simulation>))

            // Visual updates (variable timestep)
            .add_systems(Update, (
                visuals::spawn_bomb_sprites,
                visuals::sync_sprites,
                visuals::spawn_sparkles,
                visuals::update_sparkles,
            ).chain().run_if(resource_exists::<Simulation>));
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// Loaded configuration.
#[derive(Resource)]
pub struct Settings {
    pub config: SimConfig,
}

/// The running simulation.
#[derive(Resource)]
pub struct Simulation {
    pub state: SceneState,
}

// ============================================================================
// EVENTS
// ============================================================================

/// A simulation event, forwarded into Bevy.
#[derive(Event, Debug, Clone)]
pub struct SimEvent {
    pub tick: u32,
    pub data: GameEventData,
}

// ============================================================================
// COORDINATES
// ============================================================================

/// Convert a simulation position (top-left origin, +y down) to Bevy world
/// space (centre origin, +y up).
pub fn screen_to_world(position: FixedVec2, world_size: FixedVec2) -> Vec2 {
    let (x, y) = position.to_floats();
    let (w, h) = world_size.to_floats();
    Vec2::new(x - w / 2.0, h / 2.0 - y)
}

/// Convert a simulation RGB tint to a Bevy colour.
pub fn tint_color(tint: Option<u32>) -> Color {
    match tint {
        Some(rgb) => Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        None => Color::WHITE,
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Read `starfall.json` if present, defaults otherwise.
fn load_settings(mut commands: Commands, mut fixed_time: ResMut<Time<Fixed>>) {
    let config = if Path::new(CONFIG_PATH).exists() {
        match SimConfig::load(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded config from {}", CONFIG_PATH);
                config
            }
            Err(err) => {
                warn!("Ignoring {}: {}", CONFIG_PATH, err);
                SimConfig::default()
            }
        }
    } else {
        SimConfig::default()
    };

    fixed_time.set_timestep_hz(config.world.tick_rate as f64);
    commands.insert_resource(Settings { config });
}

/// Build the simulation and spawn a sprite per body.
fn setup_scene(
    mut commands: Commands,
    settings: Res<Settings>,
    assets: Res<GameAssets>,
    mut exit: EventWriter<AppExit>,
) {
    let seed = rand::random::<u64>();
    let state = match build_scene(&settings.config, seed) {
        Ok(state) => state,
        Err(err) => {
            error!("Failed to build scene: {}", err);
            exit.send(AppExit::error());
            return;
        }
    };

    info!("Scene built with seed {}", seed);
    visuals::spawn_scene_sprites(&mut commands, &state, &assets);
    commands.insert_resource(Simulation { state });
}

// ============================================================================
// SIMULATION STEP
// ============================================================================

/// Run one simulation tick with the current arrow keys.
fn step_simulation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<Simulation>,
    mut events: EventWriter<SimEvent>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let input = player::keyboard_frame(&keyboard);
    let result = tick(&mut sim.state, input);

    for event in result.events {
        events.send(SimEvent {
            tick: event.tick,
            data: event.data,
        });
    }

    if result.game_over && *state.get() == AppState::Playing {
        info!("Game over at tick {} with score {}", result.tick, sim.state.score);
        next_state.set(AppState::GameOver);
    }
}
