//! UI module - score HUD and the game over banner

use bevy::prelude::*;

use starfall::game::TextLabel;

use crate::game::Simulation;
use crate::AppState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Update, update_hud.run_if(resource_exists::<Simulation>))
            .add_systems(OnEnter(AppState::GameOver), show_game_over);
    }
}

/// Both labels are drawn in black
const LABEL_COLOR: Color = Color::BLACK;

/// Marker for the score text
#[derive(Component)]
struct ScoreText;

/// Marker for the game over banner
#[derive(Component)]
struct GameOverText;

/// Text node placed at a label's pixel offset from the top-left corner.
fn label_bundle(label: &TextLabel, color: Color) -> impl Bundle {
    (
        Text::new(label.text.clone()),
        TextFont {
            font_size: label.font_size as f32,
            ..default()
        },
        TextColor(color),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(label.x as f32),
            top: Val::Px(label.y as f32),
            ..default()
        },
    )
}

/// Spawn the score text once, then keep it in step with the simulation.
fn update_hud(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut query: Query<&mut Text, With<ScoreText>>,
) {
    let label = sim.state.score_label();

    let Ok(mut text) = query.get_single_mut() else {
        commands.spawn((ScoreText, label_bundle(&label, LABEL_COLOR)));
        return;
    };

    if text.0 != label.text {
        text.0 = label.text;
    }
}

/// Put the banner up; it stays until the window closes.
fn show_game_over(mut commands: Commands, sim: Res<Simulation>) {
    let Some(label) = sim.state.game_over_label() else {
        return;
    };

    info!("Final score: {}", sim.state.score);
    commands.spawn((GameOverText, label_bundle(&label, LABEL_COLOR)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall::game::build_scene;
    use starfall::SimConfig;

    fn app_with_finished_game() -> App {
        let mut state = build_scene(&SimConfig::default(), 1).unwrap();
        state.game_over = true;
        state.score = 40;

        let mut app = App::new();
        app.insert_resource(Simulation { state });
        app
    }

    #[test]
    fn test_labels_are_black() {
        let mut app = app_with_finished_game();
        app.add_systems(Update, (update_hud, show_game_over));
        app.update();

        let world = app.world_mut();
        let mut score = world.query_filtered::<(&Text, &TextColor), With<ScoreText>>();
        let (text, color) = score.single(world);
        assert_eq!(text.0, "Score: 40");
        assert_eq!(color.0, Color::BLACK);

        let mut banner = world.query_filtered::<(&Text, &TextColor), With<GameOverText>>();
        let (text, color) = banner.single(world);
        assert_eq!(text.0, "Game Over");
        assert_eq!(color.0, Color::BLACK);
    }
}
