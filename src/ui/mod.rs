//! Host overlays drawn on top of the road.

use bevy::prelude::*;

pub mod game_over;
pub mod hud;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(hud::HudPlugin)
            .add_plugins(game_over::GameOverPlugin);
    }
}
