//! Roadside scenery placement.
//!
//! Scenery is purely decorative: it is scaled by a banded distance curve,
//! pushed off the road edge by a kind-dependent clearance, and never takes
//! part in collision.

use bevy::prelude::*;

use super::draw_list::DrawList;
use super::projection::ProjectedSegment;
use super::scale_curve::{ScaleCurve, SCENERY_BANDS};
use super::sprites::SpriteKey;
use crate::world::{RoadConfig, RoadSide, SceneryKind, SceneryOccupant};

/// Tuning for scenery placement.
#[derive(Resource, Clone, Debug)]
pub struct SceneryConfig {
    pub scale_curve: ScaleCurve,
    /// Grass is drawn smaller than the curve suggests.
    pub grass_factor: f32,
    /// Fixed clearance between the road edge and a house.
    pub house_clearance: f32,
    /// Grass clearance is `base + |jitter| * spread`.
    pub grass_clearance: (f32, f32),
    /// Palm clearance is `base + |jitter| * spread`.
    pub palm_clearance: (f32, f32),
    pub cull_top: f32,
    pub cull_bottom: f32,
    pub cull_sides: f32,
    /// Anything narrower than this (px) is not drawn.
    pub min_width: f32,
    /// Segments whose ground Y falls outside this band are not considered.
    pub ground_band: (f32, f32),
}

impl FromWorld for SceneryConfig {
    fn from_world(world: &mut World) -> Self {
        let road = world.get_resource::<RoadConfig>().cloned().unwrap_or_default();
        Self::for_road(&road)
    }
}

impl SceneryConfig {
    /// Default tuning, with the scale curve and ground band scaled to `road`.
    pub fn for_road(road: &RoadConfig) -> Self {
        Self {
            scale_curve: ScaleCurve::in_segments(&SCENERY_BANDS, road.segment_length),
            grass_factor: 0.6,
            house_clearance: 200.0,
            grass_clearance: (40.0, 60.0),
            palm_clearance: (60.0, 80.0),
            cull_top: 150.0,
            cull_bottom: 300.0,
            cull_sides: 300.0,
            min_width: 1.5,
            ground_band: (-300.0, road.screen_height + 200.0),
        }
    }

    /// Final sprite scale at `distance`, or `None` when too far to draw.
    pub fn scale_for(&self, kind: SceneryKind, distance: f32) -> Option<f32> {
        let scale = self.scale_curve.sample(distance)?;
        Some(match kind {
            SceneryKind::Grass => scale * self.grass_factor,
            _ => scale,
        })
    }

    /// Side and edge clearance for an occupant. Houses always stand on the
    /// right and grass always on the left; palms keep their assigned side.
    pub fn side_and_clearance(&self, occupant: &SceneryOccupant) -> (RoadSide, f32) {
        let jitter = occupant.jitter.abs();
        match occupant.kind {
            SceneryKind::House => (RoadSide::Right, self.house_clearance),
            SceneryKind::Grass => (
                RoadSide::Left,
                self.grass_clearance.0 + jitter * self.grass_clearance.1,
            ),
            SceneryKind::Palm1 | SceneryKind::Palm2 => (
                occupant.side,
                self.palm_clearance.0 + jitter * self.palm_clearance.1,
            ),
        }
    }
}

/// Compute the screen rectangle for a scenery occupant.
///
/// `distance` is unsigned: scenery just passed reads as large as scenery just
/// ahead.
pub fn place_scenery(
    occupant: &SceneryOccupant,
    projected: &ProjectedSegment,
    distance: f32,
    native_size: Option<Vec2>,
    road: &RoadConfig,
    config: &SceneryConfig,
) -> Option<Rect> {
    let native = native_size.filter(|size| size.x > 0.0 && size.y > 0.0)?;
    let scale = config.scale_for(occupant.kind, distance.abs())?;
    let size = native * scale;

    let (side, clearance) = config.side_and_clearance(occupant);
    let reach = projected.half_width + size.x * 0.5 + clearance;
    let center_x = match side {
        RoadSide::Left => projected.screen_x - reach,
        RoadSide::Right => projected.screen_x + reach,
    };
    let left = center_x - size.x * 0.5;
    let top = projected.screen_y - size.y;

    if top > road.screen_height + config.cull_bottom
        || top + size.y < -config.cull_top
        || left + size.x < -config.cull_sides
        || left > road.screen_width + config.cull_sides
        || size.x < config.min_width
    {
        return None;
    }

    Some(Rect::new(left, top, left + size.x, top + size.y))
}

pub fn draw_scenery(draw: &mut DrawList, kind: SceneryKind, rect: Rect) {
    draw.push_sprite(SpriteKey::Scenery(kind), rect, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::projection::project;

    const TREE: Vec2 = Vec2::new(120.0, 240.0);

    fn occupant(kind: SceneryKind, side: RoadSide, jitter: f32) -> SceneryOccupant {
        SceneryOccupant { kind, side, jitter }
    }

    fn projected_at(distance: f32) -> ProjectedSegment {
        project(
            Vec3::new(0.0, 0.0, distance),
            Vec3::new(0.0, 1500.0, 0.0),
            &RoadConfig::default(),
        )
        .unwrap()
    }

    fn place(occupant: &SceneryOccupant, distance: f32) -> Option<Rect> {
        place_scenery(
            occupant,
            &projected_at(distance),
            distance,
            Some(TREE),
            &RoadConfig::default(),
            &SceneryConfig::for_road(&RoadConfig::default()),
        )
    }

    #[test]
    fn houses_stand_right_and_grass_left_regardless_of_assignment() {
        let distance = 3000.0;
        let center = projected_at(distance).screen_x;

        let house = place(&occupant(SceneryKind::House, RoadSide::Left, 0.3), distance).unwrap();
        assert!(house.min.x > center);

        let grass = place(&occupant(SceneryKind::Grass, RoadSide::Right, 0.3), distance).unwrap();
        assert!(grass.max.x < center);
    }

    #[test]
    fn palms_keep_their_assigned_side() {
        let distance = 3000.0;
        let projected = projected_at(distance);
        let left = place(&occupant(SceneryKind::Palm1, RoadSide::Left, 0.0), distance).unwrap();
        let right = place(&occupant(SceneryKind::Palm2, RoadSide::Right, 0.0), distance).unwrap();
        // 60px clearance from each road edge
        assert!((projected.screen_x - projected.half_width - left.max.x - 60.0).abs() < 1e-3);
        assert!((right.min.x - projected.screen_x - projected.half_width - 60.0).abs() < 1e-3);
    }

    #[test]
    fn jitter_widens_the_clearance() {
        let config = SceneryConfig::for_road(&RoadConfig::default());
        let (_, calm) = config.side_and_clearance(&occupant(SceneryKind::Palm1, RoadSide::Left, 0.0));
        let (_, wild) = config.side_and_clearance(&occupant(SceneryKind::Palm1, RoadSide::Left, -0.8));
        assert_eq!(calm, 60.0);
        assert!((wild - 124.0).abs() < 1e-4);
        let (_, grass) = config.side_and_clearance(&occupant(SceneryKind::Grass, RoadSide::Left, 0.5));
        assert!((grass - 70.0).abs() < 1e-4);
    }

    #[test]
    fn grass_is_shrunk() {
        let config = SceneryConfig::for_road(&RoadConfig::default());
        let palm = config.scale_for(SceneryKind::Palm1, 1000.0).unwrap();
        let grass = config.scale_for(SceneryKind::Grass, 1000.0).unwrap();
        assert!((grass - palm * 0.6).abs() < 1e-6);
    }

    #[test]
    fn sprites_rest_on_the_ground_line() {
        let distance = 2400.0;
        let rect = place(&occupant(SceneryKind::Palm1, RoadSide::Right, 0.0), distance).unwrap();
        assert!((rect.max.y - projected_at(distance).screen_y).abs() < 1e-3);
        assert!((rect.width() - 120.0 * 0.55).abs() < 1e-3);
    }

    #[test]
    fn beyond_range_tiny_or_missing_sprites_are_skipped() {
        let tree = occupant(SceneryKind::Palm1, RoadSide::Left, 0.0);
        assert!(place(&tree, 120.0 * 200.0 + 1.0).is_none());

        let projected = projected_at(20_000.0);
        let road = RoadConfig::default();
        let config = SceneryConfig::for_road(&road);
        // 0.04 scale of a 20px sprite is under one pixel
        assert!(place_scenery(&tree, &projected, 20_000.0, Some(Vec2::new(20.0, 20.0)), &road, &config).is_none());
        assert!(place_scenery(&tree, &projected, 20_000.0, None, &road, &config).is_none());
    }

    #[test]
    fn tuning_follows_the_road_geometry() {
        let road = RoadConfig {
            segment_length: 50.0,
            screen_height: 480.0,
            ..default()
        };
        let config = SceneryConfig::for_road(&road);
        assert_eq!(config.ground_band, (-300.0, 680.0));
        // Still culled past 120 segments
        assert!(config.scale_for(SceneryKind::Palm1, 119.0 * 50.0).is_some());
        assert!(config.scale_for(SceneryKind::Palm1, 121.0 * 50.0).is_none());
    }

    #[test]
    fn passed_scenery_uses_unsigned_distance() {
        let config = SceneryConfig::for_road(&RoadConfig::default());
        assert_eq!(
            config.scale_for(SceneryKind::Palm2, 300.0),
            config.scale_for(SceneryKind::Palm2, (-300.0f32).abs())
        );
        let projected = projected_at(400.0);
        let tree = occupant(SceneryKind::Palm2, RoadSide::Right, 0.0);
        let ahead = place_scenery(&tree, &projected, 150.0, Some(TREE), &RoadConfig::default(), &config);
        let behind = place_scenery(&tree, &projected, -150.0, Some(TREE), &RoadConfig::default(), &config);
        assert_eq!(ahead, behind);
    }
}
