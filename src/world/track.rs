//! The cyclic segment track.
//!
//! Segment depth is fixed at construction. Curvature and elevation are only
//! rewritten by [`Track::rebuild_shape`] on a full reset, and occupant slots
//! are only written by the population policy. Everything else reads.

use bevy::prelude::*;

use super::shape;
use super::RoadConfig;

/// The four kinds of roadside scenery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneryKind {
    Palm1,
    Palm2,
    House,
    Grass,
}

impl SceneryKind {
    pub const ALL: [SceneryKind; 4] = [
        SceneryKind::Palm1,
        SceneryKind::Palm2,
        SceneryKind::House,
        SceneryKind::Grass,
    ];

    pub fn is_tree(self) -> bool {
        matches!(self, SceneryKind::Palm1 | SceneryKind::Palm2)
    }
}

/// Which side of the road a scenery object stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoadSide {
    Left,
    Right,
}

/// A traffic car parked in one lane of a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrafficOccupant {
    /// Lane index, 0 = leftmost.
    pub lane: u8,
    /// Lateral nudge within the lane, in [-0.8, 0.8].
    pub jitter: f32,
    /// Which traffic sprite to draw.
    pub variant: u8,
}

/// A decorative object beside a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneryOccupant {
    pub kind: SceneryKind,
    pub side: RoadSide,
    /// Varies the clearance from the road edge, in [-0.8, 0.8].
    pub jitter: f32,
}

/// One fixed-length slice of the track.
#[derive(Clone, Debug, Default)]
pub struct Segment {
    /// Distance from the track origin.
    pub world_z: f32,
    /// Hill elevation.
    pub world_y: f32,
    /// Curvature contribution, integrated by the rasterizer.
    pub curve: f32,
    pub traffic: Option<TrafficOccupant>,
    pub scenery: Option<SceneryOccupant>,
}

/// Fixed-size circular array of segments.
#[derive(Resource, Clone, Debug)]
pub struct Track {
    segments: Vec<Segment>,
    segment_length: f32,
}

impl FromWorld for Track {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<RoadConfig>().cloned().unwrap_or_default();
        let track = Track::new(&config);
        info!(
            "Built track: {} segments, {} units long",
            track.len(),
            track.length()
        );
        track
    }
}

impl Track {
    /// Build the segment array with the authored shape and no occupants.
    pub fn new(config: &RoadConfig) -> Self {
        let count = config.segment_count.max(1);
        let segments = (0..count)
            .map(|index| Segment {
                world_z: index as f32 * config.segment_length,
                world_y: shape::elevation_at(index),
                curve: shape::curve_at(index),
                traffic: None,
                scenery: None,
            })
            .collect();

        Self {
            segments,
            segment_length: config.segment_length,
        }
    }

    /// Build a track of `count` flat, straight segments.
    pub fn flat(count: usize, segment_length: f32) -> Self {
        let segments = (0..count.max(1))
            .map(|index| Segment {
                world_z: index as f32 * segment_length,
                ..default()
            })
            .collect();

        Self {
            segments,
            segment_length,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    /// Total length in world units.
    pub fn length(&self) -> f32 {
        self.segments.len() as f32 * self.segment_length
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment at `index`, wrapping modulo the track size.
    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index % self.segments.len()]
    }

    pub(crate) fn segment_mut(&mut self, index: usize) -> &mut Segment {
        let len = self.segments.len();
        &mut self.segments[index % len]
    }

    /// Wrap a track position into `[0, length)`.
    pub fn wrap_position(&self, position: f32) -> f32 {
        position.rem_euclid(self.length())
    }

    /// Index of the segment containing `position`.
    pub fn index_at(&self, position: f32) -> usize {
        let wrapped = self.wrap_position(position);
        (wrapped / self.segment_length) as usize % self.segments.len()
    }

    /// Depth of the segment `offset` steps ahead of `start`, unrolled across the
    /// wrap so depth keeps increasing past the end of the array.
    pub fn depth_ahead(&self, start: usize, offset: usize) -> f32 {
        let absolute = start + offset;
        let lap = absolute / self.segments.len();
        self.segment(absolute).world_z + lap as f32 * self.length()
    }

    /// Re-author curvature and elevation from the deterministic shape.
    pub fn rebuild_shape(&mut self) {
        for (index, segment) in self.segments.iter_mut().enumerate() {
            segment.curve = shape::curve_at(index);
            segment.world_y = shape::elevation_at(index);
        }
    }

    /// Remove every traffic and scenery occupant.
    pub(crate) fn clear_occupants(&mut self) {
        for segment in &mut self.segments {
            segment.traffic = None;
            segment.scenery = None;
        }
    }

    pub fn traffic_count(&self) -> usize {
        self.segments.iter().filter(|s| s.traffic.is_some()).count()
    }

    pub fn scenery_count(&self) -> usize {
        self.segments.iter().filter(|s| s.scenery.is_some()).count()
    }
}
