//! Per-frame paint list.
//!
//! Commands are stored in paint order: later commands cover earlier ones.
//! Coordinates are screen space, origin top-left, y growing downward.

use bevy::prelude::*;

use super::sprites::SpriteKey;

/// One horizontal edge of a trapezoid: center x, y, half-width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadEdge {
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
}

impl QuadEdge {
    pub fn new(x: f32, y: f32, half_width: f32) -> Self {
        Self { x, y, half_width }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Trapezoid between two parallel horizontal edges.
    Quad {
        color: Color,
        near: QuadEdge,
        far: QuadEdge,
    },
    /// Flat-colored rectangle (shadows).
    Rect { color: Color, rect: Rect },
    /// The `source` pixels of an image stretched over `rect`.
    Backdrop {
        key: SpriteKey,
        rect: Rect,
        source: Rect,
    },
    /// Image scaled to `rect`, rotated by `rotation` degrees about its center.
    Sprite {
        key: SpriteKey,
        rect: Rect,
        rotation: f32,
    },
}

#[derive(Resource, Default, Debug)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push_quad(&mut self, color: Color, near: QuadEdge, far: QuadEdge) {
        self.commands.push(DrawCommand::Quad { color, near, far });
    }

    pub fn push_rect(&mut self, color: Color, rect: Rect) {
        self.commands.push(DrawCommand::Rect { color, rect });
    }

    pub fn push_sprite(&mut self, key: SpriteKey, rect: Rect, rotation: f32) {
        self.commands.push(DrawCommand::Sprite {
            key,
            rect,
            rotation,
        });
    }

    pub fn push_backdrop(&mut self, key: SpriteKey, rect: Rect, source: Rect) {
        self.commands.push(DrawCommand::Backdrop { key, rect, source });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprite commands in paint order.
    pub fn sprites(&self) -> impl Iterator<Item = (SpriteKey, Rect)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Sprite { key, rect, .. } => Some((*key, *rect)),
            _ => None,
        })
    }
}
