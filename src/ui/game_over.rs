//! Game-over overlay with the final score and the play-again prompt.

use bevy::prelude::*;

use super::hud::FONT_PATH;
use crate::game_state::GameState;
use crate::simulation::player::Player;

pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), teardown_game_over);
    }
}

#[derive(Component)]
struct GameOverRoot;

const BACKDROP: Color = Color::srgb(20.0 / 255.0, 20.0 / 255.0, 20.0 / 255.0);
const TITLE: Color = Color::srgb(1.0, 50.0 / 255.0, 50.0 / 255.0);
const SCORE: Color = Color::srgb(1.0, 1.0, 0.0);
const PROMPT: Color = Color::WHITE;

fn setup_game_over(mut commands: Commands, asset_server: Res<AssetServer>, player: Res<Player>) {
    let font: Handle<Font> = asset_server.load(FONT_PATH);
    let lines = [
        ("GAME OVER".to_string(), 72.0, TITLE),
        (format!("Final Score: {}", player.score()), 50.0, SCORE),
        ("Play Again? (Y/N)".to_string(), 32.0, PROMPT),
    ];

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(BACKDROP),
            // Above the road sprites
            GlobalZIndex(10),
            GameOverRoot,
        ))
        .with_children(|panel| {
            for (text, size, color) in lines {
                panel.spawn((
                    Text::new(text),
                    TextFont {
                        font: font.clone(),
                        font_size: size,
                        ..default()
                    },
                    TextColor(color),
                ));
            }
        });
}

fn teardown_game_over(mut commands: Commands, roots: Query<Entity, With<GameOverRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_a_soft_red() {
        assert_eq!(TITLE, Color::srgb_u8(255, 50, 50));
        assert_eq!(BACKDROP, Color::srgb_u8(20, 20, 20));
    }
}
