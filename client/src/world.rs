use bevy::prelude::*;
use sim::{Category, ColliderDef, ColliderId, ColliderShapeDef, Surface};

use crate::game::{Game, LevelLayout};
use crate::transform::to_transform;

/// Visual for one level collider.
#[derive(Component, Debug)]
pub struct LevelCollider(pub ColliderId);

/// Planes are infinite; draw them this wide.
const PLANE_SIZE: f32 = 200.0;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
    app.add_systems(PostUpdate, despawn_collected);
}

fn setup(
    mut commands: Commands,
    layout: Res<LevelLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("World setup");

    for def in &layout.0.colliders {
        let Some(mesh) = mesh_for(&def.shape) else {
            debug!(id = ?def.id, "collider has no visual");
            continue;
        };
        commands.spawn((
            LevelCollider(def.id),
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(material_for(def))),
            to_transform(&def.translation, &def.rotation),
        ));
    }

    // light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn mesh_for(shape: &ColliderShapeDef) -> Option<Mesh> {
    let mesh = match shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => Plane3d::default()
            .mesh()
            .size(PLANE_SIZE, PLANE_SIZE)
            .build()
            .translated_by(Vec3::Y * *offset_along_normal),
        ColliderShapeDef::Cuboid { half_extents } => {
            Cuboid::new(half_extents.x * 2.0, half_extents.y * 2.0, half_extents.z * 2.0).into()
        }
        ColliderShapeDef::Sphere { radius } => Sphere::new(*radius).into(),
        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => Capsule3d::new(*radius, *half_height * 2.0).into(),
        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => Cylinder::new(*radius, *half_height * 2.0).into(),
        // Triangle meshes come from asset pipelines this host does not have.
        ColliderShapeDef::TriMesh { .. } => return None,
    };
    Some(mesh)
}

fn material_for(def: &ColliderDef) -> StandardMaterial {
    let (base_color, alpha_mode) = match def.category {
        Category::Ground => match def.surface {
            Surface::Grass => (Color::linear_rgb(0.2, 0.45, 0.18), AlphaMode::Opaque),
            Surface::Plain => (Color::linear_rgb(0.35, 0.33, 0.3), AlphaMode::Opaque),
        },
        Category::Water => (Color::srgba(0.2, 0.45, 0.8, 0.6), AlphaMode::Blend),
        Category::Wall => (Color::srgb_u8(124, 100, 80), AlphaMode::Opaque),
        Category::Collectible => (Color::srgb(0.95, 0.95, 1.0), AlphaMode::Opaque),
        Category::SuperCollectible => (Color::srgb(1.0, 0.45, 0.7), AlphaMode::Opaque),
        Category::Enemy => (Color::srgb(1.0, 0.3, 0.05), AlphaMode::Opaque),
        Category::Character => (Color::WHITE, AlphaMode::Opaque),
    };
    let emissive = match def.category {
        Category::Enemy | Category::SuperCollectible => base_color.to_linear(),
        _ => LinearRgba::BLACK,
    };

    StandardMaterial {
        base_color,
        emissive,
        alpha_mode,
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    }
}

/// Pickups disappear once the simulation deactivates their collider.
fn despawn_collected(
    mut commands: Commands,
    game: Option<Res<Game>>,
    visuals: Query<(Entity, &LevelCollider)>,
) {
    let Some(game) = game else {
        return;
    };
    let world = game.0.simulator().world();
    for (entity, collider) in &visuals {
        if !world.is_active(collider.0) {
            commands.entity(entity).despawn();
        }
    }
}
