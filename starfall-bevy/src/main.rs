//! Starfall - Bevy Client
//!
//! Collect the falling stars, dodge the bombs. One life, no restart.
//!
//! The simulation runs in `starfall-sim` at a fixed 60 Hz; this crate loads
//! the images, feeds arrow keys in and draws the result.

mod game;
mod ui;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use game::GamePlugin;
use ui::UiPlugin;

/// Game states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Fetching images
    #[default]
    Loading,
    /// Simulation running
    Playing,
    /// Bomb hit; the scene stays on screen
    GameOver,
}

fn main() {
    App::new()
        // Bevy defaults with a fixed 800x600 window, pixel-art sampling
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Starfall".into(),
                        resolution: WindowResolution::new(800., 600.),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // One simulation tick per fixed step
        .insert_resource(Time::<Fixed>::from_hz(starfall::TICK_RATE as f64))
        // Game state
        .init_state::<AppState>()
        // Our plugins
        .add_plugins((
            GamePlugin,
            UiPlugin,
        ))
        // Startup
        .add_systems(Startup, setup_2d_camera)
        .run();
}

/// 2D camera centred on the world
fn setup_2d_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
    ));

    info!("Starfall client v{} initialized", starfall::VERSION);
}
