use bevy::prelude::*;
use sim::constants::CHARACTER_COLLIDER_LIFT;

use crate::game::Game;
use crate::transform::to_vec3;

/// Invincibility blinks once every this many seconds (fade out then in).
const BLINK_PERIOD: f32 = 0.2;

#[derive(Component)]
pub struct FoxBody;

#[derive(Resource)]
struct FoxMaterials {
    normal: Handle<StandardMaterial>,
    burning: Handle<StandardMaterial>,
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_fox);
    app.add_systems(PostUpdate, follow_simulation);
}

fn spawn_fox(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let settings = sim::SimSettings::default();
    let fox_materials = FoxMaterials {
        normal: materials.add(Color::srgb(0.95, 0.55, 0.2)),
        burning: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.25, 0.05),
            emissive: LinearRgba::rgb(4.0, 1.0, 0.1),
            ..default()
        }),
    };

    let body_length = settings.character_height - 2.0 * settings.character_radius;
    commands.spawn((
        FoxBody,
        Mesh3d(meshes.add(Capsule3d::new(settings.character_radius, body_length))),
        MeshMaterial3d(fox_materials.normal.clone()),
        Transform::default(),
    ));
    commands.insert_resource(fox_materials);
}

fn follow_simulation(
    game: Option<Res<Game>>,
    fox_materials: Res<FoxMaterials>,
    fox: Single<
        (
            &mut Transform,
            &mut Visibility,
            &mut MeshMaterial3d<StandardMaterial>,
        ),
        With<FoxBody>,
    >,
) {
    let Some(game) = game else {
        return;
    };
    let character = game.0.character();
    let height = game.0.simulator().settings().character_height;
    let (mut transform, mut visibility, mut material) = fox.into_inner();

    transform.translation =
        to_vec3(&character.position) + Vec3::Y * height * CHARACTER_COLLIDER_LIFT;
    transform.rotation = Quat::from_rotation_y(character.facing);

    material.0 = if character.is_burning() {
        fox_materials.burning.clone()
    } else {
        fox_materials.normal.clone()
    };

    *visibility = match character.status.invincible_remaining {
        Some(remaining) if (remaining / BLINK_PERIOD).fract() < 0.5 => Visibility::Hidden,
        _ => Visibility::Inherited,
    };
}
