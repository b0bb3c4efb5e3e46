//! Road rasterizer.
//!
//! Walks the lookahead window outward from the camera, projecting each
//! segment and integrating curvature into a running centerline drift. A
//! "highest painted Y" cursor culls segments hidden behind nearer ground
//! (hill crests). Surviving segments are then painted far to near so nearer
//! ground always covers farther ground without a depth buffer.

use bevy::prelude::*;

use super::draw_list::{DrawList, QuadEdge};
use super::projection::{project, ProjectedSegment, ProjectionCache, WindowEntry};
use crate::camera::RoadCamera;
use crate::world::{RoadConfig, Track};

/// Two-shade stripe palette, `[dark, light]`.
struct Stripe([Color; 2]);

impl Stripe {
    fn pick(&self, dark: bool) -> Color {
        if dark {
            self.0[0]
        } else {
            self.0[1]
        }
    }
}

const GRASS: Stripe = Stripe([Color::srgb(0.0, 0.471, 0.0), Color::srgb(0.0, 0.529, 0.0)]);
const RUMBLE: Stripe = Stripe([Color::srgb(0.667, 0.0, 0.0), Color::WHITE]);
const ASPHALT: Stripe = Stripe([Color::srgb(0.275, 0.275, 0.275), Color::srgb(0.314, 0.314, 0.314)]);
pub const LANE_MARKING: Color = Color::WHITE;

/// Project the lookahead window into `cache` and paint the road into `draw`.
pub fn rasterize_road(
    track: &Track,
    camera: &RoadCamera,
    config: &RoadConfig,
    cache: &mut ProjectionCache,
    draw: &mut DrawList,
) {
    project_window(track, camera, config, cache);
    paint_road(cache, config, draw);
}

/// Fill `cache` with this frame's projections, nearest segment first.
pub fn project_window(track: &Track, camera: &RoadCamera, config: &RoadConfig, cache: &mut ProjectionCache) {
    cache.clear();
    if track.is_empty() {
        return;
    }

    let start = track.index_at(camera.position);
    let eye = Vec3::new(
        camera.world_x(config),
        track.segment(start).world_y + config.camera_height,
        camera.position,
    );

    let mut drift = 0.0;
    let mut slope = 0.0;
    let mut max_y = config.screen_height;

    for offset in 0..config.draw_distance {
        let index = (start + offset) % track.len();
        let segment = track.segment(index);
        let depth = track.depth_ahead(start, offset);

        let projected = project(Vec3::new(drift, segment.world_y, depth), eye, config);
        drift += slope;
        slope += segment.curve;

        let clip = max_y;
        let visible = match projected {
            Some(p) if p.screen_y < max_y => {
                max_y = p.screen_y;
                true
            }
            _ => false,
        };

        cache.push(WindowEntry {
            index,
            offset,
            depth,
            projected,
            clip,
            visible,
        });
    }
}

/// Paint visible segments of the near sub-window, farthest first.
pub fn paint_road(cache: &ProjectionCache, config: &RoadConfig, draw: &mut DrawList) {
    let entries = cache.entries();
    let reach = config.road_draw_distance.min(entries.len());

    for i in (1..reach).rev() {
        let entry = &entries[i];
        if !entry.visible {
            continue;
        }
        // The previous segment supplies the near edge even when it was itself clipped
        let (Some(near), Some(far)) = (entries[i - 1].projected, entry.projected) else {
            continue;
        };
        let dark = (entry.index / config.stripe_period.max(1)) % 2 == 0;
        paint_segment(draw, config, &near, &far, dark);
    }
}

fn paint_segment(
    draw: &mut DrawList,
    config: &RoadConfig,
    near: &ProjectedSegment,
    far: &ProjectedSegment,
    dark: bool,
) {
    let screen_center = config.screen_width / 2.0;
    draw.push_quad(
        GRASS.pick(dark),
        QuadEdge::new(screen_center, near.screen_y, screen_center),
        QuadEdge::new(screen_center, far.screen_y, screen_center),
    );

    draw.push_quad(
        RUMBLE.pick(dark),
        QuadEdge::new(near.screen_x, near.screen_y, near.half_width * config.rumble_factor),
        QuadEdge::new(far.screen_x, far.screen_y, far.half_width * config.rumble_factor),
    );

    draw.push_quad(
        ASPHALT.pick(dark),
        QuadEdge::new(near.screen_x, near.screen_y, near.half_width),
        QuadEdge::new(far.screen_x, far.screen_y, far.half_width),
    );

    if dark || near.half_width <= config.marking_min_half_width {
        return;
    }

    // Marking width shrinks with distance, never below one pixel
    let marking = (near.half_width * config.marking_width_factor).floor().max(1.0);
    let near_lane = config.lane_width(near.half_width);
    let far_lane = config.lane_width(far.half_width);
    let near_left = near.screen_x - near.half_width;
    let far_left = far.screen_x - far.half_width;

    for boundary in 1..config.lanes {
        let boundary = boundary as f32;
        draw.push_quad(
            LANE_MARKING,
            QuadEdge::new(near_left + near_lane * boundary, near.screen_y, marking),
            QuadEdge::new(far_left + far_lane * boundary, far.screen_y, marking),
        );
    }
}
