use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;

use crate::game::{Game, run_frame};
use crate::input::InputAction;
use crate::transform::{to_quat, to_vec3};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, pan_camera.before(run_frame));
    app.add_systems(PostUpdate, follow_rig);
}

fn add_camera(mut commands: Commands) {
    commands.spawn((
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Camera3d::default(),
        Transform::from_xyz(0.0, 10.0, 10.0).looking_at(Vec3::Y, Vec3::Y),
        DistanceFog {
            color: Color::srgba(0.35, 0.48, 0.66, 1.0),
            directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
            directional_light_exponent: 30.0,
            falloff: FogFalloff::from_visibility_colors(
                120.0, // Fog distance
                Color::srgb(0.35, 0.5, 0.66),
                Color::srgb(0.8, 0.8, 0.7),
            ),
        },
    ));
}

/// Mouse drag orbits the rig. Ignored while the rig is locked.
fn pan_camera(actions: Res<ActionState<InputAction>>, game: Option<ResMut<Game>>) {
    if !actions.pressed(&InputAction::Drag) {
        return;
    }
    let delta = actions.axis_pair(&InputAction::Pan);
    if delta == Vec2::ZERO {
        return;
    }
    if let Some(mut game) = game {
        game.0.pan(delta.x, delta.y);
    }
}

fn follow_rig(game: Option<Res<Game>>, mut camera: Single<&mut Transform, With<Camera3d>>) {
    let Some(game) = game else {
        return;
    };
    let pose = game.0.camera().pose();
    camera.translation = to_vec3(&pose.eye);
    camera.rotation = to_quat(&pose.rotation);
}
