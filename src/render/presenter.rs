//! Turns the paint list into Bevy entities.
//!
//! All road quads go into one vertex-colored `Mesh2d`; shadows and images
//! each take an entity from a reusable pool. Every command gets a slightly
//! higher z than the one before it so Bevy's 2D sort keeps the paint order.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use super::draw_list::{DrawCommand, DrawList, QuadEdge};
use super::sprites::SpriteCatalog;
use crate::world::RoadConfig;

/// Depth added per paint command.
const Z_STEP: f32 = 0.01;

pub struct PresenterPlugin;

impl Plugin for PresenterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_road_surface)
            .add_systems(Update, present_frame.run_if(resource_changed::<DrawList>));
    }
}

/// The single mesh holding every road quad.
#[derive(Resource)]
struct RoadSurface {
    mesh: Handle<Mesh>,
}

/// Pooled entity showing one shadow or image.
#[derive(Component)]
struct DrawSlot;

/// Map a screen point (top-left origin, y down) into 2D world space.
pub fn screen_to_world(point: Vec2, road: &RoadConfig) -> Vec2 {
    Vec2::new(point.x - road.screen_width / 2.0, road.screen_height / 2.0 - point.y)
}

fn z_for(order: usize) -> f32 {
    order as f32 * Z_STEP
}

/// Build one triangle-list mesh for every quad in `commands`.
pub fn build_quad_mesh(commands: &[DrawCommand], road: &RoadConfig) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut colors: Vec<[f32; 4]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for (order, command) in commands.iter().enumerate() {
        let DrawCommand::Quad { color, near, far } = command else {
            continue;
        };
        let z = z_for(order);
        let linear = color.to_linear();
        let rgba = [linear.red, linear.green, linear.blue, linear.alpha];
        let base = positions.len() as u32;
        let edge = |edge: &QuadEdge, dx: f32| screen_to_world(Vec2::new(edge.x + dx, edge.y), road).extend(z);

        // Near left, near right, far right, far left: counter-clockwise in world space
        for corner in [
            edge(near, -near.half_width),
            edge(near, near.half_width),
            edge(far, far.half_width),
            edge(far, -far.half_width),
        ] {
            positions.push(corner.to_array());
            colors.push(rgba);
            uvs.push([0.0, 0.0]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

fn setup_road_surface(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    road: Res<RoadConfig>,
) {
    let mesh = meshes.add(build_quad_mesh(&[], &road));
    commands.spawn((
        Mesh2d(mesh.clone()),
        // White so vertex colors come through unchanged
        MeshMaterial2d(materials.add(ColorMaterial::default())),
        Transform::default(),
    ));
    commands.insert_resource(RoadSurface { mesh });
}

fn present_frame(
    mut commands: Commands,
    draw: Res<DrawList>,
    road: Res<RoadConfig>,
    catalog: Res<SpriteCatalog>,
    surface: Option<Res<RoadSurface>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut slots: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<DrawSlot>>,
) {
    if let Some(surface) = surface {
        if let Some(mesh) = meshes.get_mut(&surface.mesh) {
            *mesh = build_quad_mesh(draw.commands(), &road);
        }
    }

    let mut free = slots.iter_mut();
    for (order, command) in draw.commands().iter().enumerate() {
        let (sprite, rect, rotation) = match command {
            DrawCommand::Quad { .. } => continue,
            DrawCommand::Rect { color, rect } => (Sprite::from_color(*color, rect.size()), *rect, 0.0),
            DrawCommand::Backdrop { key, rect, source } => {
                let Some(image) = catalog.handle(*key) else {
                    continue;
                };
                let sprite = Sprite {
                    image: image.clone(),
                    custom_size: Some(rect.size()),
                    rect: Some(*source),
                    ..default()
                };
                (sprite, *rect, 0.0)
            }
            DrawCommand::Sprite { key, rect, rotation } => {
                let Some(image) = catalog.handle(*key) else {
                    continue;
                };
                let sprite = Sprite {
                    image: image.clone(),
                    custom_size: Some(rect.size()),
                    ..default()
                };
                (sprite, *rect, *rotation)
            }
        };

        // Screen rotation is clockwise with y down
        let transform = Transform::from_translation(screen_to_world(rect.center(), &road).extend(z_for(order)))
            .with_rotation(Quat::from_rotation_z(-rotation.to_radians()));

        match free.next() {
            Some((mut slot_sprite, mut slot_transform, mut visibility)) => {
                *slot_sprite = sprite;
                *slot_transform = transform;
                *visibility = Visibility::Visible;
            }
            None => {
                commands.spawn((sprite, transform, DrawSlot));
            }
        }
    }

    for (_, _, mut visibility) in free {
        *visibility = Visibility::Hidden;
    }
}
