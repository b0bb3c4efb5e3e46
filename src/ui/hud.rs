//! In-race overlay: score, speed and remaining boost charges.

use bevy::prelude::*;

use crate::game_state::GameState;
use crate::simulation::player::{Player, PlayerConfig};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(OnExit(GameState::Playing), teardown_hud)
            .add_systems(Update, update_hud.run_if(in_state(GameState::Playing)));
    }
}

#[derive(Component)]
struct HudRoot;

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct SpeedText;

/// One boost charge icon; lit while `index < boosts_left`.
#[derive(Component)]
struct BoostIcon(u8);

const SCORE_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const SPEED_COLOR: Color = Color::srgb(0.0, 1.0, 1.0);
const BOOST_LIT: Color = Color::WHITE;
const BOOST_SPENT: Color = Color::srgba(1.0, 1.0, 1.0, 80.0 / 255.0);
const ICON_SIZE: f32 = 32.0;

pub(crate) const FONT_PATH: &str = "fonts/OpenSans.ttf";

pub fn score_label(player: &Player) -> String {
    format!("Score: {}", player.score())
}

pub fn speed_label(player: &Player) -> String {
    if player.boosting {
        format!("Speed: {} km/h [BOOSTING!]", player.speed)
    } else {
        format!("Speed: {} km/h", player.speed)
    }
}

fn setup_hud(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<PlayerConfig>) {
    let font: Handle<Font> = asset_server.load(FONT_PATH);
    let icon: Handle<Image> = asset_server.load("images/boostericon.png");
    let caption: Handle<Image> = asset_server.load("images/boostertext.png");

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                right: Val::Px(10.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|bar| {
            bar.spawn(Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            })
            .with_children(|stats| {
                stats.spawn((
                    Text::new("Score: 0"),
                    TextFont {
                        font: font.clone(),
                        font_size: 30.0,
                        ..default()
                    },
                    TextColor(SCORE_COLOR),
                    ScoreText,
                ));
                stats.spawn((
                    Text::new(""),
                    TextFont {
                        font: font.clone(),
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(SPEED_COLOR),
                    SpeedText,
                ));
            });

            // "Booster" caption centred over the charge icons
            bar.spawn(Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|boosts| {
                boosts.spawn(ImageNode::new(caption));
                boosts
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        ..default()
                    })
                    .with_children(|icons| {
                        for index in 0..config.max_boosts {
                            icons.spawn((
                                ImageNode::new(icon.clone()).with_color(BOOST_LIT),
                                Node {
                                    width: Val::Px(ICON_SIZE),
                                    height: Val::Px(ICON_SIZE),
                                    ..default()
                                },
                                BoostIcon(index),
                            ));
                        }
                    });
            });
        });
}

fn update_hud(
    player: Res<Player>,
    mut score: Query<&mut Text, (With<ScoreText>, Without<SpeedText>)>,
    mut speed: Query<&mut Text, (With<SpeedText>, Without<ScoreText>)>,
    mut icons: Query<(&BoostIcon, &mut ImageNode)>,
) {
    if !player.is_changed() {
        return;
    }
    for mut text in &mut score {
        **text = score_label(&player);
    }
    for mut text in &mut speed {
        **text = speed_label(&player);
    }
    for (icon, mut image) in &mut icons {
        image.color = if icon.0 < player.boosts_left {
            BOOST_LIT
        } else {
            BOOST_SPENT
        };
    }
}

fn teardown_hud(mut commands: Commands, roots: Query<Entity, With<HudRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }
}
