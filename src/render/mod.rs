//! Pseudo-3D road rendering.
//!
//! The engine half (projection, road rasterization, occupant placement,
//! frame composition) writes a screen-space [`draw_list::DrawList`]; the
//! presenter half turns that list into Bevy meshes and sprites.

use bevy::prelude::*;

pub mod draw_list;
pub mod frame;
pub mod presenter;
pub mod projection;
pub mod road;
pub mod scale_curve;
pub mod scenery;
pub mod sky;
pub mod sprites;
pub mod traffic;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<traffic::TrafficConfig>()
            .init_resource::<scenery::SceneryConfig>()
            .init_resource::<projection::ProjectionCache>()
            .init_resource::<draw_list::DrawList>()
            .add_plugins(sprites::SpritesPlugin)
            .add_plugins(presenter::PresenterPlugin);
    }
}
