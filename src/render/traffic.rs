//! Traffic sprite placement.
//!
//! Cars are sized from the projected lane width rather than a distance curve,
//! so perspective comes for free. A short near-range boost makes close cars
//! read as large as they should, and absolute clamps keep extremes sane.

use bevy::prelude::*;

use super::draw_list::DrawList;
use super::projection::ProjectedSegment;
use super::scale_curve::{ScaleCurve, TRAFFIC_NEAR_BOOST, TRAFFIC_SHADOW_ALPHA};
use super::sprites::SpriteKey;
use crate::world::{RoadConfig, TrafficOccupant};

/// Tuning for traffic placement.
#[derive(Resource, Clone, Debug)]
pub struct TrafficConfig {
    /// Fraction of the lane width a car occupies.
    pub lane_fraction: f32,
    /// Width multiplier by distance; `None` past the boost range means 1.0.
    pub near_boost: ScaleCurve,
    pub min_width: f32,
    /// Width ceiling as a fraction of the screen width.
    pub max_width_fraction: f32,
    pub min_height: f32,
    /// Height ceiling as a fraction of the screen height.
    pub max_height_fraction: f32,
    /// Lateral jitter scale in lane widths.
    pub jitter_factor: f32,
    /// Off-screen tolerance before a car is culled.
    pub cull_padding: f32,
    /// Segments whose ground Y falls outside this band are not considered.
    pub ground_band: (f32, f32),
    pub shadow_width_factor: f32,
    pub shadow_height_factor: f32,
    pub shadow_min_height: f32,
    /// Shadow sits this many pixels below the ground line.
    pub shadow_drop: f32,
    /// Shadow opacity (0-255) by distance; past the ramp it stays at `shadow_alpha_far`.
    pub shadow_alpha: ScaleCurve,
    pub shadow_alpha_far: f32,
}

impl TrafficConfig {
    /// Default tuning, with curves and the ground band scaled to `road`.
    pub fn for_road(road: &RoadConfig) -> Self {
        Self {
            lane_fraction: 0.55,
            near_boost: ScaleCurve::in_segments(&TRAFFIC_NEAR_BOOST, road.segment_length),
            min_width: 8.0,
            max_width_fraction: 0.9,
            min_height: 6.0,
            max_height_fraction: 0.9,
            jitter_factor: 0.25,
            cull_padding: 200.0,
            ground_band: (-100.0, road.screen_height),
            shadow_width_factor: 0.78,
            shadow_height_factor: 0.06,
            shadow_min_height: 3.0,
            shadow_drop: 4.0,
            shadow_alpha: ScaleCurve::in_segments(&TRAFFIC_SHADOW_ALPHA, road.segment_length),
            shadow_alpha_far: 60.0,
        }
    }
}

impl FromWorld for TrafficConfig {
    fn from_world(world: &mut World) -> Self {
        let road = world.get_resource::<RoadConfig>().cloned().unwrap_or_default();
        Self::for_road(&road)
    }
}

/// Where a car lands on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrafficPlacement {
    pub rect: Rect,
    pub shadow: Option<Shadow>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub rect: Rect,
    /// Opacity in [0, 1].
    pub alpha: f32,
}

/// Compute the screen rectangle for `occupant`.
///
/// `distance` is the signed depth of the segment ahead of the camera; cars at
/// or behind the camera are not placed. Returns `None` when the car should not
/// be drawn this frame.
pub fn place_traffic(
    occupant: &TrafficOccupant,
    projected: &ProjectedSegment,
    distance: f32,
    native_size: Option<Vec2>,
    road: &RoadConfig,
    config: &TrafficConfig,
) -> Option<TrafficPlacement> {
    let native = native_size.filter(|size| size.x > 0.0 && size.y > 0.0)?;
    if distance <= 0.0 {
        return None;
    }

    let lane_width = road.lane_width(projected.half_width);
    let boost = config.near_boost.sample(distance).unwrap_or(1.0);
    let width = (lane_width * config.lane_fraction * boost)
        .min(road.screen_width * config.max_width_fraction)
        .max(config.min_width);
    let height = (width * native.y / native.x)
        .min(road.screen_height * config.max_height_fraction)
        .max(config.min_height);

    let lane_start = -projected.half_width + lane_width * occupant.lane as f32;
    let lane_center = lane_start + lane_width * 0.5 + occupant.jitter * lane_width * config.jitter_factor;
    let left = projected.screen_x + lane_center - width * 0.5;
    let top = projected.screen_y - height;

    let pad = config.cull_padding;
    if top > road.screen_height + pad
        || top + height < -pad
        || left + width < -pad
        || left > road.screen_width + pad
    {
        return None;
    }

    let rect = Rect::new(left, top, left + width, top + height);
    let shadow = (width > config.min_width).then(|| {
        let shadow_width = width * config.shadow_width_factor;
        let shadow_height = (width * config.shadow_height_factor).max(config.shadow_min_height);
        let center = Vec2::new(
            left + width * 0.5,
            projected.screen_y - shadow_height * 0.5 + config.shadow_drop,
        );
        let alpha = config
            .shadow_alpha
            .sample(distance)
            .unwrap_or(config.shadow_alpha_far)
            .clamp(0.0, 255.0);
        Shadow {
            rect: Rect::from_center_size(center, Vec2::new(shadow_width, shadow_height)),
            alpha: alpha / 255.0,
        }
    });

    Some(TrafficPlacement { rect, shadow })
}

/// Paint a placed car: shadow first, then the sprite.
pub fn draw_traffic(draw: &mut DrawList, placement: &TrafficPlacement, variant: u8) {
    if let Some(shadow) = placement.shadow {
        draw.push_rect(Color::srgba(0.0, 0.0, 0.0, shadow.alpha), shadow.rect);
    }
    draw.push_sprite(SpriteKey::Traffic(variant), placement.rect, 0.0);
}
