use bevy::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use roadrush::camera::RoadCamera;
use roadrush::render::draw_list::DrawList;
use roadrush::render::frame::{compose_frame, FrameContext};
use roadrush::render::projection::ProjectionCache;
use roadrush::render::scenery::SceneryConfig;
use roadrush::render::sprites::{SpriteCatalog, SpriteKey};
use roadrush::render::traffic::TrafficConfig;
use roadrush::simulation::collision::{detect_collision, FrameHits};
use roadrush::simulation::player::{Player, PlayerConfig};
use roadrush::simulation::population::{populate_track, PopulationConfig};
use roadrush::world::{RoadConfig, SceneryKind, Track};

fn catalog() -> SpriteCatalog {
    let mut catalog = SpriteCatalog::default();
    catalog.insert_size(SpriteKey::Player, Vec2::new(120.0, 90.0));
    catalog.insert_size(SpriteKey::Traffic(0), Vec2::new(160.0, 120.0));
    catalog.insert_size(SpriteKey::Traffic(1), Vec2::new(150.0, 110.0));
    for kind in SceneryKind::ALL {
        catalog.insert_size(SpriteKey::Scenery(kind), Vec2::new(200.0, 300.0));
    }
    catalog
}

fn bench_frame(c: &mut Criterion) {
    let road = RoadConfig::default();
    let mut track = Track::new(&road);
    let population = PopulationConfig {
        traffic_quota: 40,
        traffic_gap: 20..=40,
        ..Default::default()
    };
    populate_track(&mut track, road.lanes, &population, &mut StdRng::seed_from_u64(7));

    let catalog = catalog();
    let traffic = TrafficConfig::for_road(&road);
    let scenery = SceneryConfig::for_road(&road);
    let player_config = PlayerConfig::default();
    let player = Player::new(&road, &player_config);

    let mut cache = ProjectionCache::default();
    let mut draw = DrawList::default();
    let mut hits = FrameHits::default();

    let mut group = c.benchmark_group("frame");
    // Straight start, the hills and the closing bend
    for (name, position) in [("straight", 20_000.0), ("hill", 150_000.0), ("bend", 230_000.0)] {
        let camera = RoadCamera {
            position,
            ..Default::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let ctx = FrameContext {
                    track: &track,
                    camera: &camera,
                    catalog: &catalog,
                    road: &road,
                    traffic: &traffic,
                    scenery: &scenery,
                    player: &player_config,
                };
                compose_frame(&ctx, &mut cache, &mut draw, &mut hits);
                let player_rect = Player::screen_rect(camera.lateral, &road, &player_config);
                black_box(detect_collision(player_rect, player.lane, &hits));
                black_box(draw.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
