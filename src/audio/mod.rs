//! Race audio: a looping engine while driving, plus crash and boost cues.
//!
//! Missing sound files only produce a warning; the race runs silently.

use bevy::asset::LoadState;
use bevy::audio::Volume;
use bevy::prelude::*;

use crate::game_state::GameState;
use crate::simulation::collision::CollisionEvent;
use crate::simulation::player::BoostActivated;

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RaceAudioConfig>()
            .add_systems(Startup, load_sounds)
            .add_systems(OnEnter(GameState::Playing), start_engine)
            .add_systems(OnExit(GameState::Playing), stop_engine)
            .add_systems(Update, (play_cues, report_missing_sounds));
    }
}

/// Configuration for race audio.
#[derive(Resource)]
pub struct RaceAudioConfig {
    /// Whether audio is enabled.
    pub enabled: bool,
    pub engine_volume: f32,
    pub cue_volume: f32,
}

impl Default for RaceAudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            engine_volume: 0.6,
            cue_volume: 1.0,
        }
    }
}

#[derive(Resource)]
struct RaceSounds {
    engine: Handle<AudioSource>,
    crash: Handle<AudioSource>,
    boost: Handle<AudioSource>,
    reported: bool,
}

#[derive(Component)]
struct EngineLoop;

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(RaceSounds {
        engine: asset_server.load("sounds/sound.wav"),
        crash: asset_server.load("sounds/game_over.wav"),
        boost: asset_server.load("sounds/boost.wav"),
        reported: false,
    });
}

fn start_engine(mut commands: Commands, sounds: Option<Res<RaceSounds>>, config: Res<RaceAudioConfig>) {
    let Some(sounds) = sounds else { return };
    if !config.enabled {
        return;
    }
    commands.spawn((
        AudioPlayer::new(sounds.engine.clone()),
        PlaybackSettings::LOOP.with_volume(Volume::new(config.engine_volume)),
        EngineLoop,
    ));
}

fn stop_engine(mut commands: Commands, engines: Query<Entity, With<EngineLoop>>) {
    for entity in &engines {
        commands.entity(entity).despawn_recursive();
    }
}

fn play_cues(
    mut commands: Commands,
    sounds: Option<Res<RaceSounds>>,
    config: Res<RaceAudioConfig>,
    mut collisions: EventReader<CollisionEvent>,
    mut boosts: EventReader<BoostActivated>,
) {
    let crashed = collisions.read().count() > 0;
    let boosted = boosts.read().count() > 0;
    let Some(sounds) = sounds else { return };
    if !config.enabled {
        return;
    }

    let cue = || PlaybackSettings::DESPAWN.with_volume(Volume::new(config.cue_volume));
    if crashed {
        commands.spawn((AudioPlayer::new(sounds.crash.clone()), cue()));
    }
    if boosted {
        commands.spawn((AudioPlayer::new(sounds.boost.clone()), cue()));
    }
}

/// Once every sound has settled, warn about the ones that failed to load.
fn report_missing_sounds(sounds: Option<ResMut<RaceSounds>>, asset_server: Res<AssetServer>) {
    let Some(mut sounds) = sounds else { return };
    if sounds.reported {
        return;
    }

    let entries = [
        ("engine", sounds.engine.id()),
        ("crash", sounds.crash.id()),
        ("boost", sounds.boost.id()),
    ];
    let states: Vec<(&str, Option<LoadState>)> = entries
        .into_iter()
        .map(|(name, id)| (name, asset_server.get_load_state(id)))
        .collect();
    if states
        .iter()
        .any(|(_, state)| !matches!(state, Some(LoadState::Loaded | LoadState::Failed(_))))
    {
        return;
    }

    for (name, state) in states {
        if let Some(LoadState::Failed(err)) = state {
            warn!("Sound '{}' unavailable ({}); playing without it", name, err);
        }
    }
    sounds.reported = true;
}
