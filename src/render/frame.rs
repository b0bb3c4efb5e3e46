//! Frame composition.
//!
//! One call builds the complete paint list for a tick: the sky, road quads, then
//! roadside scenery and traffic from the farthest segment in the window to
//! the nearest, then the player car on top. Every traffic rectangle that is
//! actually drawn is recorded for the collision check.

use bevy::prelude::*;

use super::draw_list::DrawList;
use super::projection::ProjectionCache;
use super::road::rasterize_road;
use super::scenery::{draw_scenery, place_scenery, SceneryConfig};
use super::sky::draw_sky;
use super::sprites::{SpriteCatalog, SpriteKey};
use super::traffic::{draw_traffic, place_traffic, TrafficConfig};
use crate::camera::RoadCamera;
use crate::simulation::collision::{FrameHits, TrafficHit};
use crate::simulation::player::{Player, PlayerConfig};
use crate::world::{RoadConfig, Track};

/// Read-only inputs to one frame.
pub struct FrameContext<'a> {
    pub track: &'a Track,
    pub camera: &'a RoadCamera,
    pub catalog: &'a SpriteCatalog,
    pub road: &'a RoadConfig,
    pub traffic: &'a TrafficConfig,
    pub scenery: &'a SceneryConfig,
    pub player: &'a PlayerConfig,
}

fn within(y: f32, band: (f32, f32)) -> bool {
    y > band.0 && y < band.1
}

/// Rebuild `cache`, `draw` and `hits` for the current camera.
pub fn compose_frame(ctx: &FrameContext, cache: &mut ProjectionCache, draw: &mut DrawList, hits: &mut FrameHits) {
    draw.clear();
    hits.clear();

    draw_sky(draw, ctx.catalog, ctx.camera.lateral, ctx.road);
    rasterize_road(ctx.track, ctx.camera, ctx.road, cache, draw);
    place_occupants(ctx, cache, draw, hits);
    draw_player(ctx, draw);
}

fn place_occupants(ctx: &FrameContext, cache: &ProjectionCache, draw: &mut DrawList, hits: &mut FrameHits) {
    for entry in cache.entries().iter().rev() {
        let Some(projected) = entry.projected else {
            continue;
        };
        let segment = ctx.track.segment(entry.index);
        let distance = entry.depth - ctx.camera.position;

        if let Some(scenery) = segment.scenery {
            if within(projected.screen_y, ctx.scenery.ground_band) {
                let size = ctx.catalog.native_size(SpriteKey::Scenery(scenery.kind));
                if let Some(rect) = place_scenery(&scenery, &projected, distance, size, ctx.road, ctx.scenery) {
                    draw_scenery(draw, scenery.kind, rect);
                }
            }
        }

        if entry.offset >= ctx.road.road_draw_distance {
            continue;
        }
        let Some(car) = segment.traffic else {
            continue;
        };
        if !within(projected.screen_y, ctx.traffic.ground_band) {
            continue;
        }
        let size = ctx.catalog.native_size(SpriteKey::Traffic(car.variant));
        if let Some(placement) = place_traffic(&car, &projected, distance, size, ctx.road, ctx.traffic) {
            draw_traffic(draw, &placement, car.variant);
            hits.push(TrafficHit {
                segment: entry.index,
                lane: car.lane,
                rect: placement.rect,
            });
        }
    }
}

fn draw_player(ctx: &FrameContext, draw: &mut DrawList) {
    let config = ctx.player;
    let rect = Player::screen_rect(ctx.camera.lateral, ctx.road, config);
    let center_x = rect.center().x;

    let shadow_min = Vec2::new(
        center_x - config.shadow_size.x / 2.0,
        ctx.road.screen_height - config.shadow_offset,
    );
    draw.push_rect(
        Color::srgba(0.0, 0.0, 0.0, config.shadow_alpha),
        Rect::from_corners(shadow_min, shadow_min + config.shadow_size),
    );
    draw.push_sprite(SpriteKey::Player, rect, Player::tilt(ctx.camera, config));
}

pub(crate) fn compose_frame_system(
    track: Res<Track>,
    camera: Res<RoadCamera>,
    catalog: Res<SpriteCatalog>,
    road: Res<RoadConfig>,
    traffic: Res<TrafficConfig>,
    scenery: Res<SceneryConfig>,
    player: Res<PlayerConfig>,
    mut cache: ResMut<ProjectionCache>,
    mut draw: ResMut<DrawList>,
    mut hits: ResMut<FrameHits>,
) {
    let ctx = FrameContext {
        track: &track,
        camera: &camera,
        catalog: &catalog,
        road: &road,
        traffic: &traffic,
        scenery: &scenery,
        player: &player,
    };
    compose_frame(&ctx, &mut cache, &mut draw, &mut hits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw_list::DrawCommand;
    use crate::world::{RoadSide, SceneryKind, SceneryOccupant, TrafficOccupant};

    struct Fixture {
        track: Track,
        catalog: SpriteCatalog,
        road: RoadConfig,
        traffic: TrafficConfig,
        scenery: SceneryConfig,
        player: PlayerConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let road = RoadConfig::default();
            let mut catalog = SpriteCatalog::default();
            catalog.insert_size(SpriteKey::Player, Vec2::new(120.0, 90.0));
            catalog.insert_size(SpriteKey::Traffic(0), Vec2::new(160.0, 120.0));
            catalog.insert_size(SpriteKey::Traffic(1), Vec2::new(150.0, 110.0));
            for kind in SceneryKind::ALL {
                catalog.insert_size(SpriteKey::Scenery(kind), Vec2::new(120.0, 240.0));
            }
            Self {
                track: Track::new(&road),
                catalog,
                traffic: TrafficConfig::for_road(&road),
                scenery: SceneryConfig::for_road(&road),
                road,
                player: PlayerConfig::default(),
            }
        }

        fn compose(&self, camera: &RoadCamera) -> (DrawList, FrameHits) {
            let ctx = FrameContext {
                track: &self.track,
                camera,
                catalog: &self.catalog,
                road: &self.road,
                traffic: &self.traffic,
                scenery: &self.scenery,
                player: &self.player,
            };
            let mut cache = ProjectionCache::default();
            let mut draw = DrawList::default();
            let mut hits = FrameHits::default();
            compose_frame(&ctx, &mut cache, &mut draw, &mut hits);
            (draw, hits)
        }

        fn park(&mut self, index: usize, lane: u8) {
            self.track.segment_mut(index).traffic = Some(TrafficOccupant {
                lane,
                jitter: 0.0,
                variant: 0,
            });
        }

        fn plant(&mut self, index: usize, kind: SceneryKind) {
            self.track.segment_mut(index).scenery = Some(SceneryOccupant {
                kind,
                side: RoadSide::Left,
                jitter: 0.2,
            });
        }
    }

    #[test]
    fn one_lap_later_the_frame_is_identical() {
        let mut fixture = Fixture::new();
        fixture.park(30, 1);
        fixture.park(5, 2);
        fixture.plant(20, SceneryKind::Palm1);
        fixture.plant(10, SceneryKind::House);

        let camera = RoadCamera {
            position: 1000.0,
            ..default()
        };
        let (first, _) = fixture.compose(&camera);

        let mut lapped = camera;
        lapped.advance(fixture.road.track_length(), fixture.road.track_length());
        let (second, _) = fixture.compose(&lapped);

        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn window_across_the_seam_draws_the_next_lap() {
        let mut fixture = Fixture::new();
        // Just past the seam, ahead of a camera near the end of the track
        fixture.park(5, 1);
        let camera = RoadCamera {
            position: 1590.0 * 200.0,
            ..default()
        };
        let (_, hits) = fixture.compose(&camera);
        assert_eq!(hits.iter().map(|hit| hit.segment).collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn scenery_is_drawn_but_never_collides() {
        let mut fixture = Fixture::new();
        for index in (5..200).step_by(5) {
            fixture.plant(index, SceneryKind::ALL[index % 4]);
        }
        let (draw, hits) = fixture.compose(&RoadCamera::default());
        assert!(hits.0.is_empty());
        assert!(draw.sprites().any(|(key, _)| matches!(key, SpriteKey::Scenery(_))));
    }

    #[test]
    fn drawn_traffic_is_reported_with_its_exact_rect() {
        let mut fixture = Fixture::new();
        fixture.park(12, 0);
        fixture.park(40, 2);
        let (draw, hits) = fixture.compose(&RoadCamera::default());

        let drawn: Vec<Rect> = draw
            .sprites()
            .filter(|(key, _)| matches!(key, SpriteKey::Traffic(_)))
            .map(|(_, rect)| rect)
            .collect();
        assert_eq!(drawn.len(), 2);
        assert_eq!(hits.0.len(), 2);
        // Farther car is painted first
        assert_eq!(hits.0[0].segment, 40);
        assert_eq!(hits.0[1].segment, 12);
        for (hit, rect) in hits.iter().zip(&drawn) {
            assert_eq!(hit.rect, *rect);
        }
    }

    #[test]
    fn traffic_beyond_the_road_window_is_ignored() {
        let mut fixture = Fixture::new();
        fixture.park(350, 1);
        let (_, hits) = fixture.compose(&RoadCamera::default());
        assert!(hits.0.is_empty());
    }

    #[test]
    fn player_is_painted_last_over_its_shadow() {
        let fixture = Fixture::new();
        let (draw, _) = fixture.compose(&RoadCamera::default());
        let commands = draw.commands();
        let n = commands.len();
        match (&commands[n - 2], &commands[n - 1]) {
            (DrawCommand::Rect { rect: shadow, .. }, DrawCommand::Sprite { key, rect, rotation }) => {
                assert_eq!(*key, SpriteKey::Player);
                assert_eq!(*rect, Rect::new(452.0, 613.0, 572.0, 703.0));
                assert_eq!(*rotation, 0.0);
                assert_eq!(*shadow, Rect::new(457.0, 703.0, 567.0, 715.0));
            }
            other => panic!("unexpected tail {other:?}"),
        }
    }

    #[test]
    fn sky_is_painted_first_and_follows_the_car() {
        let mut fixture = Fixture::new();
        fixture.catalog.insert_size(SpriteKey::Sky, Vec2::new(2048.0, 500.0));

        let source_at = |lateral: f32| {
            let camera = RoadCamera { lateral, ..default() };
            let (draw, _) = fixture.compose(&camera);
            match draw.commands().first() {
                Some(DrawCommand::Backdrop { key: SpriteKey::Sky, source, .. }) => source.min.x,
                other => panic!("expected the sky first, got {other:?}"),
            }
        };
        assert_eq!(source_at(-0.6), 204.0);
        assert_eq!(source_at(0.0), 512.0);
        assert_eq!(source_at(0.6), 819.0);
    }

    #[test]
    fn missing_sprites_are_skipped_not_fatal() {
        let mut fixture = Fixture::new();
        fixture.catalog = SpriteCatalog::default();
        fixture.park(20, 1);
        fixture.plant(25, SceneryKind::Grass);
        let (draw, hits) = fixture.compose(&RoadCamera::default());
        assert!(hits.0.is_empty());
        assert_eq!(draw.sprites().count(), 1, "only the player");
    }
}
