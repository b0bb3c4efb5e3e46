//! Road camera state and the 2D view camera.
//!
//! The road camera is a scalar position along the track plus a lateral offset
//! that eases toward the player's target lane. The Bevy `Camera2d` only
//! displays the composed frame.

use bevy::prelude::*;

use crate::world::RoadConfig;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoadCamera>()
            .add_systems(Startup, setup_camera);
    }
}

/// Camera position in track space.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct RoadCamera {
    /// Distance along the track, kept in `[0, track length)`.
    pub position: f32,
    /// Lane-relative horizontal offset, roughly [-1, 1].
    pub lateral: f32,
    /// Offset that `lateral` is easing toward.
    pub target_lateral: f32,
}

impl RoadCamera {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move forward by `distance`, wrapping at the end of the track.
    pub fn advance(&mut self, distance: f32, track_length: f32) {
        if track_length <= 0.0 {
            return;
        }
        self.position = (self.position + distance).rem_euclid(track_length);
    }

    /// Exponential approach toward the target offset. `smoothing` is the
    /// fraction of the remaining gap closed per tick.
    pub fn ease_lateral(&mut self, smoothing: f32) {
        let smoothing = smoothing.clamp(0.0, 1.0);
        self.lateral += (self.target_lateral - self.lateral) * smoothing;
    }

    /// Lateral offset in world units, fed to the projector as `camX`.
    pub fn world_x(&self, config: &RoadConfig) -> f32 {
        self.lateral * config.road_width / 2.0
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_without_seam() {
        let mut camera = RoadCamera::default();
        camera.advance(900.0, 1000.0);
        camera.advance(300.0, 1000.0);
        assert!((camera.position - 200.0).abs() < 1e-3);
    }

    #[test]
    fn full_lap_returns_to_start() {
        let mut camera = RoadCamera {
            position: 4200.0,
            ..default()
        };
        camera.advance(320_000.0, 320_000.0);
        assert_eq!(camera.position, 4200.0);
    }

    #[test]
    fn lateral_eases_without_overshoot() {
        let mut camera = RoadCamera {
            target_lateral: 0.6,
            ..default()
        };
        let mut last = camera.lateral;
        for _ in 0..60 {
            camera.ease_lateral(0.15);
            assert!(camera.lateral >= last);
            assert!(camera.lateral <= 0.6);
            last = camera.lateral;
        }
        assert!((camera.lateral - 0.6).abs() < 0.001);
    }

    #[test]
    fn first_ease_step_is_partial() {
        let mut camera = RoadCamera {
            target_lateral: -0.6,
            ..default()
        };
        camera.ease_lateral(0.15);
        assert!((camera.lateral + 0.09).abs() < 1e-6);
    }
}
