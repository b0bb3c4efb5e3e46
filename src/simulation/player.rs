//! Player car: discrete lane, boost charges, speed tiers and distance.
//!
//! The car's visual and collision position both come from the road camera's
//! eased lateral offset; the player only owns the target lane.

use bevy::prelude::*;

use crate::camera::RoadCamera;
use crate::world::{RoadConfig, Track};

/// Tuning for the player car.
#[derive(Resource, Clone, Debug)]
pub struct PlayerConfig {
    /// Lateral offset between adjacent lane targets.
    pub lane_spacing: f32,
    /// Fraction of the lateral gap closed per tick.
    pub steer_smoothing: f32,
    pub normal_speed: u32,
    pub boost_speed: u32,
    /// Ticks a single boost lasts.
    pub boost_ticks: u32,
    pub max_boosts: u8,
    /// Car rectangle on screen.
    pub car_size: Vec2,
    /// Car center sits this many pixels above the bottom of the screen.
    pub bottom_offset: f32,
    /// Screen pixels per unit of lateral offset, as a fraction of screen width.
    pub lateral_screen_factor: f32,
    /// Degrees of tilt per unit of remaining lateral error.
    pub tilt_factor: f32,
    pub shadow_size: Vec2,
    /// Shadow top edge, in pixels above the bottom of the screen.
    pub shadow_offset: f32,
    pub shadow_alpha: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            lane_spacing: 0.6,
            steer_smoothing: 0.15,
            normal_speed: 200,
            boost_speed: 400,
            boost_ticks: 120,
            max_boosts: 3,
            car_size: Vec2::new(120.0, 90.0),
            bottom_offset: 110.0,
            lateral_screen_factor: 1.0 / 3.0,
            tilt_factor: 15.0,
            shadow_size: Vec2::new(110.0, 12.0),
            shadow_offset: 65.0,
            shadow_alpha: 140.0 / 255.0,
        }
    }
}

/// Edge-triggered driver commands latched by the host between ticks.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverInput {
    pub steer_left: bool,
    pub steer_right: bool,
    pub boost: bool,
}

/// Sent when a boost charge is spent.
#[derive(Event, Clone, Copy, Debug)]
pub struct BoostActivated {
    pub remaining: u8,
}

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct Player {
    pub lane: u8,
    pub boosts_left: u8,
    pub boosting: bool,
    /// Boosted ticks still to run.
    pub boost_ticks_left: u32,
    /// Speed applied on the last tick.
    pub speed: u32,
    /// Cumulative distance, never wrapped.
    pub distance: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&RoadConfig::default(), &PlayerConfig::default())
    }
}

impl Player {
    pub fn new(road: &RoadConfig, config: &PlayerConfig) -> Self {
        Self {
            lane: road.middle_lane(),
            boosts_left: config.max_boosts,
            boosting: false,
            boost_ticks_left: 0,
            speed: 0,
            distance: 0,
        }
    }

    pub fn steer_left(&mut self) {
        self.lane = self.lane.saturating_sub(1);
    }

    pub fn steer_right(&mut self, lanes: u8) {
        if self.lane + 1 < lanes {
            self.lane += 1;
        }
    }

    /// Spend a boost charge. Refused while already boosting or out of charges.
    pub fn try_boost(&mut self, config: &PlayerConfig) -> bool {
        if self.boosting || self.boosts_left == 0 {
            return false;
        }
        self.boosts_left -= 1;
        self.boosting = true;
        self.boost_ticks_left = config.boost_ticks;
        true
    }

    /// Pick this tick's speed and count down an active boost.
    pub fn tick_speed(&mut self, config: &PlayerConfig) -> u32 {
        if self.boosting {
            self.speed = config.boost_speed;
            self.boost_ticks_left = self.boost_ticks_left.saturating_sub(1);
            if self.boost_ticks_left == 0 {
                self.boosting = false;
            }
        } else {
            self.speed = config.normal_speed;
        }
        self.speed
    }

    pub fn score(&self) -> u64 {
        self.distance / 100
    }

    /// Lateral offset the camera should ease toward for the current lane.
    pub fn target_lateral(&self, road: &RoadConfig, config: &PlayerConfig) -> f32 {
        (self.lane as f32 - road.middle_lane() as f32) * config.lane_spacing
    }

    /// Center of the car on screen.
    pub fn screen_center(lateral: f32, road: &RoadConfig, config: &PlayerConfig) -> Vec2 {
        Vec2::new(
            road.screen_width / 2.0 + lateral * road.screen_width * config.lateral_screen_factor,
            road.screen_height - config.bottom_offset,
        )
    }

    /// The car's fixed-size screen rectangle, used for drawing and collision.
    pub fn screen_rect(lateral: f32, road: &RoadConfig, config: &PlayerConfig) -> Rect {
        Rect::from_center_size(Self::screen_center(lateral, road, config), config.car_size)
    }

    /// Visual tilt in degrees while the car is still sliding into its lane.
    pub fn tilt(camera: &RoadCamera, config: &PlayerConfig) -> f32 {
        (camera.target_lateral - camera.lateral) * config.tilt_factor
    }
}

/// One fixed tick of driving: lane changes, boost, steering, forward motion.
pub fn drive(
    player: &mut Player,
    camera: &mut RoadCamera,
    input: DriverInput,
    road: &RoadConfig,
    config: &PlayerConfig,
    track_length: f32,
) -> bool {
    if input.steer_left {
        player.steer_left();
    }
    if input.steer_right {
        player.steer_right(road.lanes);
    }
    let boosted = input.boost && player.try_boost(config);

    camera.target_lateral = player.target_lateral(road, config);
    camera.ease_lateral(config.steer_smoothing);

    let speed = player.tick_speed(config);
    camera.advance(speed as f32, track_length);
    player.distance += speed as u64;

    boosted
}

pub(crate) fn drive_player(
    mut input: ResMut<DriverInput>,
    mut player: ResMut<Player>,
    mut camera: ResMut<RoadCamera>,
    road: Res<RoadConfig>,
    config: Res<PlayerConfig>,
    track: Res<Track>,
    mut boosts: EventWriter<BoostActivated>,
) {
    let latched = std::mem::take(&mut *input);
    if drive(&mut player, &mut camera, latched, &road, &config, track.length()) {
        info!("Boost! {} left", player.boosts_left);
        boosts.send(BoostActivated {
            remaining: player.boosts_left,
        });
    }
}

/// Latch key edges until the next fixed tick consumes them.
pub(crate) fn read_driver_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<DriverInput>) {
    if keyboard.any_just_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
        input.steer_left = true;
    }
    if keyboard.any_just_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
        input.steer_right = true;
    }
    if keyboard.just_pressed(KeyCode::Space) {
        input.boost = true;
    }
}
