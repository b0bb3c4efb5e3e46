//! Roadrush - pseudo-3D lane racer.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use roadrush::{audio, camera, game_state, render, simulation, ui, world};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Roadrush".into(),
                resolution: WindowResolution::new(1024., 768.),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(135, 206, 235)))
        // Game state management
        .add_plugins(game_state::GameStatePlugin)
        // Track and road camera
        .add_plugins(world::WorldPlugin)
        .add_plugins(camera::CameraPlugin)
        // Projection, placement and presentation
        .add_plugins(render::RenderPlugin)
        // Driving, population and collision
        .add_plugins(simulation::SimulationPlugin)
        // Score overlay
        .add_plugins(ui::UiPlugin)
        // Engine and cue sounds
        .add_plugins(audio::AudioPlugin)
        .run();
}
