//! Conversions between simulation math (nalgebra) and Bevy math (glam).

use bevy::prelude::*;

pub fn to_vec3(v: &sim::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_quat(q: &sim::types::Quat) -> Quat {
    let c = q.coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

/// Bevy transform for a simulation isometry.
pub fn to_transform(translation: &sim::Vec3, rotation: &sim::types::Quat) -> Transform {
    Transform {
        translation: to_vec3(translation),
        rotation: to_quat(rotation),
        scale: Vec3::ONE,
    }
}
