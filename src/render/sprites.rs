//! Sprite catalogue: image handles and their native pixel sizes.
//!
//! Placement only ever sees `Option<Vec2>` sizes. A sprite that is missing,
//! still loading, failed to load, or has a zero dimension reads as `None`
//! and is skipped by the draw code.

use std::collections::{HashMap, HashSet};

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::world::SceneryKind;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteCatalog>()
            .add_systems(Startup, load_sprites)
            .add_systems(Update, refresh_sprite_sizes);
    }
}

/// Identifies one drawable image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Sky,
    Player,
    Traffic(u8),
    Scenery(SceneryKind),
}

const SKY_IMAGE: &str = "images/bg4.png";
const PLAYER_IMAGE: &str = "images/car.png";
const TRAFFIC_IMAGES: &[&str] = &["images/8.png", "images/2nd.png"];

fn scenery_image(kind: SceneryKind) -> &'static str {
    match kind {
        SceneryKind::Palm1 => "images/4.png",
        SceneryKind::Palm2 => "images/5.png",
        SceneryKind::House => "images/7.png",
        SceneryKind::Grass => "images/6.png",
    }
}

/// Number of traffic sprite variants the population policy may pick from.
pub fn traffic_variant_count() -> u8 {
    TRAFFIC_IMAGES.len() as u8
}

#[derive(Resource, Default)]
pub struct SpriteCatalog {
    handles: HashMap<SpriteKey, Handle<Image>>,
    sizes: HashMap<SpriteKey, Vec2>,
    failed: HashSet<SpriteKey>,
}

impl SpriteCatalog {
    /// Native pixel size, or `None` when the sprite cannot be drawn.
    pub fn native_size(&self, key: SpriteKey) -> Option<Vec2> {
        self.sizes
            .get(&key)
            .copied()
            .filter(|size| size.x > 0.0 && size.y > 0.0)
    }

    pub fn handle(&self, key: SpriteKey) -> Option<&Handle<Image>> {
        self.handles.get(&key)
    }

    /// Record a native size directly (used by tests and benchmarks).
    pub fn insert_size(&mut self, key: SpriteKey, size: Vec2) {
        self.sizes.insert(key, size);
    }

    fn insert_handle(&mut self, key: SpriteKey, handle: Handle<Image>) {
        self.handles.insert(key, handle);
    }
}

fn load_sprites(mut catalog: ResMut<SpriteCatalog>, asset_server: Res<AssetServer>) {
    catalog.insert_handle(SpriteKey::Sky, asset_server.load(SKY_IMAGE));
    catalog.insert_handle(SpriteKey::Player, asset_server.load(PLAYER_IMAGE));

    for (variant, path) in TRAFFIC_IMAGES.iter().enumerate() {
        catalog.insert_handle(SpriteKey::Traffic(variant as u8), asset_server.load(*path));
    }

    for kind in SceneryKind::ALL {
        catalog.insert_handle(SpriteKey::Scenery(kind), asset_server.load(scenery_image(kind)));
    }

    info!("Requested {} sprite images", catalog.handles.len());
}

/// Pick up native sizes as images finish loading.
fn refresh_sprite_sizes(
    mut catalog: ResMut<SpriteCatalog>,
    images: Res<Assets<Image>>,
    asset_server: Res<AssetServer>,
) {
    if catalog.sizes.len() + catalog.failed.len() >= catalog.handles.len() {
        return;
    }

    let pending: Vec<(SpriteKey, Handle<Image>)> = catalog
        .handles
        .iter()
        .filter(|(key, _)| !catalog.sizes.contains_key(*key) && !catalog.failed.contains(*key))
        .map(|(key, handle)| (*key, handle.clone()))
        .collect();

    for (key, handle) in pending {
        if let Some(image) = images.get(&handle) {
            let size = image.size().as_vec2();
            if size.x <= 0.0 || size.y <= 0.0 {
                warn!("Sprite {:?} has a zero dimension and will not be drawn", key);
                catalog.failed.insert(key);
            } else {
                catalog.sizes.insert(key, size);
            }
        } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
            warn!("Sprite {:?} failed to load ({}); it will not be drawn", key, err);
            catalog.failed.insert(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_and_degenerate_sizes_are_undrawable() {
        let mut catalog = SpriteCatalog::default();
        assert_eq!(catalog.native_size(SpriteKey::Player), None);

        catalog.insert_size(SpriteKey::Traffic(0), Vec2::new(0.0, 40.0));
        assert_eq!(catalog.native_size(SpriteKey::Traffic(0)), None);

        catalog.insert_size(SpriteKey::Scenery(SceneryKind::House), Vec2::new(300.0, 200.0));
        assert_eq!(
            catalog.native_size(SpriteKey::Scenery(SceneryKind::House)),
            Some(Vec2::new(300.0, 200.0))
        );
    }

    #[test]
    fn every_scenery_kind_has_an_image() {
        let paths: HashSet<&str> = SceneryKind::ALL.iter().map(|k| scenery_image(*k)).collect();
        assert_eq!(paths.len(), 4);
        assert_eq!(traffic_variant_count(), 2);
    }
}
