//! Race state machine.
//!
//! `Playing` runs the fixed-tick simulation. A crash moves to `GameOver`,
//! where the driver either restarts (Y) or quits (N).

use bevy::prelude::*;

pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(Update, play_again_prompt.run_if(in_state(GameState::GameOver)));
    }
}

/// High-level game state controlling which systems run.
#[derive(States, Default, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum GameState {
    /// Driving: simulation and collision checks are live.
    #[default]
    Playing,
    /// Crashed. Simulation is frozen until the driver answers the prompt.
    GameOver,
}

fn play_again_prompt(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::KeyY) {
        info!("Restarting race");
        next_state.set(GameState::Playing);
    } else if keyboard.just_pressed(KeyCode::KeyN) {
        info!("Quitting");
        exit.send(AppExit::Success);
    }
}
