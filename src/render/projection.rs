//! Pinhole projection of track segments onto the screen.
//!
//! `scale = depth / (z - camZ)` is the single nonlinear step behind the whole
//! illusion: nearer segments get a larger scale, so a wider road and more
//! vertical displacement per unit of world offset.

use bevy::prelude::*;

use crate::world::RoadConfig;

/// Screen-space result of projecting one segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProjectedSegment {
    pub screen_x: f32,
    pub screen_y: f32,
    /// Road half-width in pixels.
    pub half_width: f32,
    pub scale: f32,
}

/// Project `world` as seen from `camera`.
///
/// Returns `None` when the point is at or behind the camera depth.
pub fn project(world: Vec3, camera: Vec3, config: &RoadConfig) -> Option<ProjectedSegment> {
    let depth = world.z - camera.z;
    if depth <= 0.0 || !depth.is_finite() {
        return None;
    }

    let scale = config.camera_depth / depth;
    let half_screen_w = config.screen_width / 2.0;
    let half_screen_h = config.screen_height / 2.0;

    Some(ProjectedSegment {
        screen_x: (1.0 + scale * (world.x - camera.x)) * half_screen_w,
        screen_y: (1.0 - scale * (world.y - camera.y)) * half_screen_h,
        half_width: scale * config.road_width * half_screen_w,
        scale,
    })
}

/// One segment of the per-frame lookahead window.
#[derive(Clone, Copy, Debug)]
pub struct WindowEntry {
    /// Index into the track array.
    pub index: usize,
    /// Steps ahead of the camera's segment.
    pub offset: usize,
    /// Depth unrolled across the track seam.
    pub depth: f32,
    /// `None` when the segment is at or behind the camera.
    pub projected: Option<ProjectedSegment>,
    /// Highest painted screen-Y when this segment was tested.
    pub clip: f32,
    /// Survived the painter's clip test and may be painted.
    pub visible: bool,
}

/// Projections for the current frame's lookahead window, nearest first.
///
/// Rebuilt every frame; nothing carries over between frames.
#[derive(Resource, Default, Debug)]
pub struct ProjectionCache {
    entries: Vec<WindowEntry>,
}

impl ProjectionCache {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, entry: WindowEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[WindowEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearer_segments_are_wider() {
        let config = RoadConfig::default();
        let camera = Vec3::new(0.0, 1500.0, 0.0);
        let mut last_width = f32::INFINITY;
        for step in 1..400 {
            let projected = project(Vec3::new(0.0, 0.0, step as f32 * 200.0), camera, &config)
                .expect("segment ahead of camera");
            assert!(projected.scale > 0.0);
            assert!(projected.half_width < last_width);
            last_width = projected.half_width;
        }
    }

    #[test]
    fn points_at_or_behind_camera_are_rejected() {
        let config = RoadConfig::default();
        let camera = Vec3::new(0.0, 1500.0, 1000.0);
        assert!(project(Vec3::new(0.0, 0.0, 1000.0), camera, &config).is_none());
        assert!(project(Vec3::new(0.0, 0.0, 800.0), camera, &config).is_none());
    }

    #[test]
    fn centerline_under_camera_projects_to_screen_center() {
        let config = RoadConfig::default();
        let camera = Vec3::new(250.0, 1500.0, 0.0);
        let projected = project(Vec3::new(250.0, 0.0, 4000.0), camera, &config).unwrap();
        assert!((projected.screen_x - 512.0).abs() < 1e-3);
        // Ground below the camera lands below the horizon line
        assert!(projected.screen_y > 384.0);
        let expected_width = 0.84 / 4000.0 * 2500.0 * 512.0;
        assert!((projected.half_width - expected_width).abs() < 1e-3);
    }

    #[test]
    fn horizon_is_approached_with_distance() {
        let config = RoadConfig::default();
        let camera = Vec3::new(0.0, 1500.0, 0.0);
        let near = project(Vec3::new(0.0, 0.0, 2000.0), camera, &config).unwrap();
        let far = project(Vec3::new(0.0, 0.0, 200_000.0), camera, &config).unwrap();
        assert!(near.screen_y > far.screen_y);
        assert!((far.screen_y - 384.0).abs() < 5.0);
    }
}
