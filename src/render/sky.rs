//! Panoramic sky backdrop.
//!
//! A wide sky image fills the top of the screen and slides sideways with the
//! car, so steering left reveals the left edge of the panorama.

use bevy::prelude::*;

use super::draw_list::DrawList;
use super::sprites::{SpriteCatalog, SpriteKey};
use crate::world::RoadConfig;

/// Source rectangle (texture pixels) of the sky at a lateral offset.
///
/// Offset -1 shows the left edge of the image and +1 the right edge. Images
/// no wider than the screen do not pan.
pub fn sky_source(texture: Vec2, lateral: f32, road: &RoadConfig) -> Rect {
    let max_pan = (texture.x - road.screen_width).max(0.0);
    let pan = ((lateral * 0.5 + 0.5) * max_pan).clamp(0.0, max_pan).floor();
    let width = road.screen_width.min(texture.x);
    let height = sky_height(road).min(texture.y);
    Rect::new(pan, 0.0, pan + width, height)
}

/// Height in pixels of the band the sky covers.
pub fn sky_height(road: &RoadConfig) -> f32 {
    (road.screen_height * road.sky_fraction).floor()
}

/// Paint the sky behind everything else. Skipped until the image has loaded.
pub fn draw_sky(draw: &mut DrawList, catalog: &SpriteCatalog, lateral: f32, road: &RoadConfig) {
    let Some(texture) = catalog.native_size(SpriteKey::Sky) else {
        return;
    };
    let rect = Rect::new(0.0, 0.0, road.screen_width, sky_height(road));
    draw.push_backdrop(SpriteKey::Sky, rect, sky_source(texture, lateral, road));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw_list::DrawCommand;

    const PANORAMA: Vec2 = Vec2::new(3072.0, 600.0);

    #[test]
    fn pans_across_the_panorama_with_the_car() {
        let road = RoadConfig::default();
        let left = sky_source(PANORAMA, -1.0, &road);
        let center = sky_source(PANORAMA, 0.0, &road);
        let right = sky_source(PANORAMA, 1.0, &road);

        assert_eq!(left, Rect::new(0.0, 0.0, 1024.0, 460.0));
        assert_eq!(center, Rect::new(1024.0, 0.0, 2048.0, 460.0));
        assert_eq!(right, Rect::new(2048.0, 0.0, 3072.0, 460.0));
    }

    #[test]
    fn narrow_images_do_not_pan() {
        let road = RoadConfig::default();
        let narrow = Vec2::new(800.0, 300.0);
        assert_eq!(sky_source(narrow, -1.0, &road), sky_source(narrow, 1.0, &road));
        assert_eq!(sky_source(narrow, 0.5, &road), Rect::new(0.0, 0.0, 800.0, 300.0));
    }

    #[test]
    fn sky_covers_the_top_sixty_percent() {
        let road = RoadConfig::default();
        let mut catalog = SpriteCatalog::default();
        let mut draw = DrawList::default();

        draw_sky(&mut draw, &catalog, 0.0, &road);
        assert!(draw.is_empty(), "no image yet");

        catalog.insert_size(SpriteKey::Sky, PANORAMA);
        draw_sky(&mut draw, &catalog, 0.3, &road);
        match draw.commands() {
            [DrawCommand::Backdrop { key, rect, source }] => {
                assert_eq!(*key, SpriteKey::Sky);
                assert_eq!(*rect, Rect::new(0.0, 0.0, 1024.0, 460.0));
                // (0.3 * 0.5 + 0.5) * 2048
                assert_eq!(source.min.x, 1331.0);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }
}
