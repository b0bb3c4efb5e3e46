//! Race simulation: driving, population, frame composition and collision.
//!
//! Everything here runs on the fixed 60 Hz tick while the race is live. One
//! tick is: drive the player and camera, inject traffic on score milestones,
//! compose the frame, then test the player against the traffic just drawn.

use bevy::prelude::*;

pub mod collision;
pub mod player;
pub mod population;

use crate::camera::RoadCamera;
use crate::game_state::GameState;
use crate::render::draw_list::DrawList;
use crate::render::frame::compose_frame_system;
use crate::world::{RoadConfig, Track};
use collision::{CollisionEvent, FrameHits};
use player::{BoostActivated, DriverInput, Player, PlayerConfig};
use population::{InjectionSchedule, PopulationConfig, PopulationSummary, RaceRng};

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .init_resource::<PopulationConfig>()
            // RaceRng reads the seed from PopulationConfig
            .init_resource::<RaceRng>()
            .init_resource::<Player>()
            .init_resource::<DriverInput>()
            .init_resource::<InjectionSchedule>()
            .init_resource::<FrameHits>()
            .add_event::<CollisionEvent>()
            .add_event::<BoostActivated>()
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_systems(OnEnter(GameState::Playing), start_race)
            .add_systems(
                Update,
                player::read_driver_input.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                FixedUpdate,
                (
                    player::drive_player,
                    population::inject_live_traffic,
                    compose_frame_system,
                    collision::check_collisions,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Put every piece of race state back to its starting values and repopulate
/// the track.
pub fn reset_race(
    track: &mut Track,
    player: &mut Player,
    camera: &mut RoadCamera,
    schedule: &mut InjectionSchedule,
    input: &mut DriverInput,
    road: &RoadConfig,
    player_config: &PlayerConfig,
    population: &PopulationConfig,
    rng: &mut RaceRng,
) -> PopulationSummary {
    track.rebuild_shape();
    let summary = population::populate_track(track, road.lanes, population, &mut rng.0);
    *player = Player::new(road, player_config);
    camera.reset();
    *schedule = InjectionSchedule::default();
    *input = DriverInput::default();
    summary
}

fn start_race(
    mut track: ResMut<Track>,
    mut player: ResMut<Player>,
    mut camera: ResMut<RoadCamera>,
    mut schedule: ResMut<InjectionSchedule>,
    mut input: ResMut<DriverInput>,
    mut draw: ResMut<DrawList>,
    mut hits: ResMut<FrameHits>,
    road: Res<RoadConfig>,
    player_config: Res<PlayerConfig>,
    population: Res<PopulationConfig>,
    mut rng: ResMut<RaceRng>,
) {
    let summary = reset_race(
        &mut track,
        &mut player,
        &mut camera,
        &mut schedule,
        &mut input,
        &road,
        &player_config,
        &population,
        &mut rng,
    );
    draw.clear();
    hits.clear();
    info!(
        "Race started: {} traffic, {} roadside, {} extra palms",
        summary.traffic, summary.roadside, summary.palms
    );
}
