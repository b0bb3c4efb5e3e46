//! Traffic and scenery population.
//!
//! The track is populated once per race: a sparse quota of traffic cars, a
//! dense weighted pass of roadside scenery, then a sparser pass of extra palms.
//! During play more traffic is injected ahead of the camera each time the
//! score reaches a new milestone. This is the only code that writes occupants.

use std::ops::{Range, RangeInclusive};

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::player::Player;
use crate::camera::RoadCamera;
use crate::render::sprites::traffic_variant_count;
use crate::world::{RoadConfig, RoadSide, SceneryKind, SceneryOccupant, Track, TrafficOccupant};

/// Population tuning.
#[derive(Resource, Clone, Debug)]
pub struct PopulationConfig {
    /// First segment that may hold traffic.
    pub traffic_start: usize,
    /// Maximum cars placed at race start.
    pub traffic_quota: usize,
    pub traffic_gap: RangeInclusive<usize>,
    pub traffic_variants: u8,
    /// Occupant jitter is drawn from `[-jitter, jitter]`.
    pub jitter: f32,
    pub roadside_start: usize,
    pub roadside_gap: Range<usize>,
    pub roadside_chance: f64,
    /// Relative weights of each scenery kind in the roadside pass.
    pub roadside_weights: [(SceneryKind, u32); 4],
    pub palm_start: usize,
    pub palm_gap: Range<usize>,
    pub palm_chance: f64,
    /// Injection only starts once the score is above this.
    pub injection_min_score: u64,
    /// Injection fires on each new multiple of this score.
    pub injection_interval: u64,
    /// Segments ahead of the camera scanned for injection.
    pub injection_window: Range<usize>,
    pub injection_gap: RangeInclusive<usize>,
    pub injection_chance: f64,
    /// Fixed seed for reproducible races. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            traffic_start: 400,
            traffic_quota: 8,
            traffic_gap: 150..=250,
            traffic_variants: traffic_variant_count(),
            jitter: 0.8,
            roadside_start: 100,
            roadside_gap: 20..60,
            roadside_chance: 0.75,
            roadside_weights: [
                (SceneryKind::Palm1, 40),
                (SceneryKind::Palm2, 30),
                (SceneryKind::House, 10),
                (SceneryKind::Grass, 20),
            ],
            palm_start: 50,
            palm_gap: 35..60,
            palm_chance: 0.4,
            injection_min_score: 50,
            injection_interval: 100,
            injection_window: 500..700,
            injection_gap: 100..=200,
            injection_chance: 0.3,
            seed: None,
        }
    }
}

/// The single random source for population. Seeded once per process.
#[derive(Resource)]
pub struct RaceRng(pub StdRng);

impl FromWorld for RaceRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<PopulationConfig>().and_then(|config| config.seed);
        match seed {
            Some(seed) => {
                info!("Population RNG seeded with {seed}");
                Self(StdRng::seed_from_u64(seed))
            }
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Tracks which score milestone last triggered an injection.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InjectionSchedule {
    pub last_milestone: u64,
}

impl InjectionSchedule {
    /// True once per newly reached milestone above the minimum score.
    pub fn due(&mut self, score: u64, config: &PopulationConfig) -> bool {
        if score <= config.injection_min_score || config.injection_interval == 0 {
            return false;
        }
        let milestone = score / config.injection_interval;
        if milestone == 0 || milestone <= self.last_milestone {
            return false;
        }
        self.last_milestone = milestone;
        true
    }
}

/// Counts from a full population pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationSummary {
    pub traffic: usize,
    pub roadside: usize,
    pub palms: usize,
}

/// Clear every occupant and run all start-of-race passes.
pub fn populate_track(
    track: &mut Track,
    lanes: u8,
    config: &PopulationConfig,
    rng: &mut StdRng,
) -> PopulationSummary {
    track.clear_occupants();
    PopulationSummary {
        traffic: scatter_traffic(track, lanes, config, rng),
        roadside: scatter_roadside(track, config, rng),
        palms: scatter_palms(track, config, rng),
    }
}

fn random_traffic(lanes: u8, config: &PopulationConfig, rng: &mut StdRng) -> TrafficOccupant {
    TrafficOccupant {
        lane: rng.gen_range(0..lanes.max(1)),
        jitter: rng.gen_range(-config.jitter..=config.jitter),
        variant: rng.gen_range(0..config.traffic_variants.max(1)),
    }
}

fn random_side(rng: &mut StdRng) -> RoadSide {
    if rng.gen_bool(0.5) {
        RoadSide::Left
    } else {
        RoadSide::Right
    }
}

/// Weighted pick over `weights`. Falls back to the first entry.
fn pick_kind(weights: &[(SceneryKind, u32)], rng: &mut StdRng) -> SceneryKind {
    let total: u32 = weights.iter().map(|(_, weight)| weight).sum();
    if total == 0 {
        return weights.first().map_or(SceneryKind::Palm1, |(kind, _)| *kind);
    }
    let mut choice = rng.gen_range(0..total);
    for (kind, weight) in weights {
        if choice < *weight {
            return *kind;
        }
        choice -= weight;
    }
    weights[0].0
}

/// Place up to the traffic quota, one car per randomized gap.
pub fn scatter_traffic(track: &mut Track, lanes: u8, config: &PopulationConfig, rng: &mut StdRng) -> usize {
    let mut placed = 0;
    let mut index = config.traffic_start;
    while index < track.len() && placed < config.traffic_quota {
        track.segment_mut(index).traffic = Some(random_traffic(lanes, config, rng));
        placed += 1;
        index += rng.gen_range(config.traffic_gap.clone()).max(1);
    }
    placed
}

/// Dense weighted scenery pass. Houses go right and grass goes left; palms
/// get a random side.
pub fn scatter_roadside(track: &mut Track, config: &PopulationConfig, rng: &mut StdRng) -> usize {
    let mut placed = 0;
    let mut index = config.roadside_start;
    while index < track.len() {
        if rng.gen_bool(config.roadside_chance) {
            let kind = pick_kind(&config.roadside_weights, rng);
            let side = match kind {
                SceneryKind::House => RoadSide::Right,
                SceneryKind::Grass => RoadSide::Left,
                SceneryKind::Palm1 | SceneryKind::Palm2 => random_side(rng),
            };
            track.segment_mut(index).scenery = Some(SceneryOccupant {
                kind,
                side,
                jitter: rng.gen_range(-config.jitter..=config.jitter),
            });
            placed += 1;
        }
        index += rng.gen_range(config.roadside_gap.clone()).max(1);
    }
    placed
}

/// Sparse palms-only pass over segments the roadside pass left empty.
pub fn scatter_palms(track: &mut Track, config: &PopulationConfig, rng: &mut StdRng) -> usize {
    let mut placed = 0;
    let mut index = config.palm_start;
    while index < track.len() {
        if rng.gen_bool(config.palm_chance) && track.segment(index).scenery.is_none() {
            let kind = if rng.gen_bool(0.5) {
                SceneryKind::Palm1
            } else {
                SceneryKind::Palm2
            };
            track.segment_mut(index).scenery = Some(SceneryOccupant {
                kind,
                side: random_side(rng),
                jitter: rng.gen_range(-config.jitter..=config.jitter),
            });
            placed += 1;
        }
        index += rng.gen_range(config.palm_gap.clone()).max(1);
    }
    placed
}

/// Add traffic to empty segments in the injection window ahead of `start`.
/// Returns the indices that received a car.
pub fn inject_traffic(
    track: &mut Track,
    start: usize,
    lanes: u8,
    config: &PopulationConfig,
    rng: &mut StdRng,
) -> Vec<usize> {
    let mut added = Vec::new();
    if track.is_empty() {
        return added;
    }
    let mut offset = config.injection_window.start;
    while offset < config.injection_window.end {
        let index = (start + offset) % track.len();
        if track.segment(index).traffic.is_none() && rng.gen_bool(config.injection_chance) {
            track.segment_mut(index).traffic = Some(random_traffic(lanes, config, rng));
            added.push(index);
        }
        offset += rng.gen_range(config.injection_gap.clone()).max(1);
    }
    added
}

pub(crate) fn inject_live_traffic(
    player: Res<Player>,
    camera: Res<RoadCamera>,
    road: Res<RoadConfig>,
    config: Res<PopulationConfig>,
    mut schedule: ResMut<InjectionSchedule>,
    mut track: ResMut<Track>,
    mut rng: ResMut<RaceRng>,
) {
    let score = player.score();
    if !schedule.due(score, &config) {
        return;
    }
    let start = track.index_at(camera.position);
    let added = inject_traffic(&mut track, start, road.lanes, &config, &mut rng.0);
    for index in &added {
        debug!("Injected traffic at segment {index} (score {score})");
    }
}
