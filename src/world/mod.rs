//! World management: the cyclic segment track and its authored shape.

use bevy::prelude::*;

pub mod shape;
pub mod track;

pub use track::{RoadSide, SceneryKind, SceneryOccupant, Segment, Track, TrafficOccupant};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        // Track reads RoadConfig in its FromWorld impl
        app.init_resource::<RoadConfig>().init_resource::<Track>();
    }
}

/// Global road and screen geometry shared by projection, rasterization and placement.
#[derive(Resource, Clone, Debug)]
pub struct RoadConfig {
    /// Drawing surface width in pixels.
    pub screen_width: f32,
    /// Drawing surface height in pixels.
    pub screen_height: f32,
    /// Road half-width in world units.
    pub road_width: f32,
    /// Length of one segment along the track in world units.
    pub segment_length: f32,
    /// Pinhole camera depth (focal factor).
    pub camera_depth: f32,
    /// Camera height above the elevation of the segment it sits on.
    pub camera_height: f32,
    /// Number of discrete lanes.
    pub lanes: u8,
    /// Number of segments in the cyclic track.
    pub segment_count: usize,
    /// Segments evaluated per frame for projection and occupants.
    pub draw_distance: usize,
    /// Segments near the camera that get road quads and traffic.
    pub road_draw_distance: usize,
    /// Rumble strip half-width relative to the road.
    pub rumble_factor: f32,
    /// Segments per color stripe.
    pub stripe_period: usize,
    /// Lane markings are skipped below this projected half-width (px).
    pub marking_min_half_width: f32,
    /// Lane marking half-width as a fraction of the road half-width.
    pub marking_width_factor: f32,
    /// Share of the screen height, from the top, covered by the sky panorama.
    pub sky_fraction: f32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            screen_width: 1024.0,
            screen_height: 768.0,
            road_width: 2500.0,
            segment_length: 200.0,
            camera_depth: 0.84,
            camera_height: 1500.0,
            lanes: 3,
            segment_count: 1600,
            draw_distance: 800,
            road_draw_distance: 300,
            rumble_factor: 1.15,
            stripe_period: 3,
            marking_min_half_width: 50.0,
            marking_width_factor: 0.005,
            sky_fraction: 0.6,
        }
    }
}

impl RoadConfig {
    /// Total track length in world units.
    pub fn track_length(&self) -> f32 {
        self.segment_count as f32 * self.segment_length
    }

    /// Lane width in pixels for a projected road half-width.
    pub fn lane_width(&self, half_width: f32) -> f32 {
        half_width * 2.0 / self.lanes.max(1) as f32
    }

    /// Index of the middle lane (lane 1 on a three-lane road).
    pub fn middle_lane(&self) -> u8 {
        self.lanes.saturating_sub(1) / 2
    }
}
