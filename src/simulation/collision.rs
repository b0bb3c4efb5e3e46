//! Lane-gated rectangle collision between the player and traffic.
//!
//! The compositor records every traffic rectangle it draws this frame; the
//! check runs against those exact rectangles so what you see is what hits.

use bevy::prelude::*;
use smallvec::SmallVec;

use super::player::{Player, PlayerConfig};
use crate::camera::RoadCamera;
use crate::game_state::GameState;
use crate::world::RoadConfig;

/// A traffic car as drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrafficHit {
    pub segment: usize,
    pub lane: u8,
    pub rect: Rect,
}

/// Traffic rectangles drawn this frame. Cleared at the start of every frame.
#[derive(Resource, Default, Debug)]
pub struct FrameHits(pub SmallVec<[TrafficHit; 8]>);

impl FrameHits {
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn push(&mut self, hit: TrafficHit) {
        self.0.push(hit);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrafficHit> {
        self.0.iter()
    }
}

/// The player ran into a car.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionEvent {
    pub segment: usize,
    pub lane: u8,
}

/// Strict overlap: rectangles that only share an edge do not touch.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// First car in the player's lane whose rectangle overlaps the player's.
pub fn detect_collision(player_rect: Rect, player_lane: u8, hits: &FrameHits) -> Option<CollisionEvent> {
    hits.iter()
        .find(|hit| hit.lane == player_lane && rects_overlap(player_rect, hit.rect))
        .map(|hit| CollisionEvent {
            segment: hit.segment,
            lane: hit.lane,
        })
}

pub(crate) fn check_collisions(
    hits: Res<FrameHits>,
    player: Res<Player>,
    camera: Res<RoadCamera>,
    road: Res<RoadConfig>,
    config: Res<PlayerConfig>,
    mut collisions: EventWriter<CollisionEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // Another tick may run before the state change is applied
    if matches!(*next_state, NextState::Pending(GameState::GameOver)) {
        return;
    }
    let player_rect = Player::screen_rect(camera.lateral, &road, &config);
    if let Some(collision) = detect_collision(player_rect, player.lane, &hits) {
        info!(
            "Crashed into traffic at segment {} lane {} (score {})",
            collision.segment,
            collision.lane,
            player.score()
        );
        collisions.send(collision);
        next_state.set(GameState::GameOver);
    }
}
