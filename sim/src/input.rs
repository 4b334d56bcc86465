//! Raw device direction to a planar, camera-relative movement direction.

use crate::camera::Orientation;
use crate::types::{Vec2, Vec3};

/// Source of the raw 2D direction, each axis in `[-1, 1]`.
///
/// `x` is right, `y` is toward the viewer (pressing "up" yields a negative `y`).
pub trait DirectionSource: Send + Sync {
    fn current_raw_direction(&self) -> Vec2;
}

impl DirectionSource for Vec2 {
    fn current_raw_direction(&self) -> Vec2 {
        *self
    }
}

/// Decides whether a planar direction produces movement this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovementGate {
    /// Move only when both planar axes are nonzero.
    #[default]
    DiagonalOnly,
    /// Move whenever the direction is nonzero.
    AnyDirection,
}

impl MovementGate {
    pub fn should_move(self, direction: &Vec3) -> bool {
        match self {
            MovementGate::DiagonalOnly => direction.x != 0.0 && direction.z != 0.0,
            MovementGate::AnyDirection => direction.x != 0.0 || direction.z != 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CacheKey {
    raw: Vec2,
    orientation: Orientation,
}

/// Caches the camera-relative direction until the raw input or the camera moves.
#[derive(Debug, Default)]
pub struct InputAggregator {
    cached: Option<(CacheKey, Vec3)>,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit planar direction in world space, or zero.
    pub fn current_direction(&mut self, source: &dyn DirectionSource, camera: Orientation) -> Vec3 {
        let key = CacheKey {
            raw: source.current_raw_direction(),
            orientation: camera,
        };
        if let Some((cached_key, direction)) = self.cached
            && cached_key == key
        {
            return direction;
        }

        let direction = camera_relative(key.raw, camera);
        self.cached = Some((key, direction));
        direction
    }

    /// Force the next call to recompute.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

/// Rotate `(x, 0, y)` by the camera orientation, drop the vertical part, normalize.
pub fn camera_relative(raw: Vec2, camera: Orientation) -> Vec3 {
    let rotated = camera.rotation() * Vec3::new(raw.x, 0.0, raw.y);
    let planar = Vec3::new(rotated.x, 0.0, rotated.z);
    let length = planar.norm();
    if length > 0.0 { planar / length } else { planar }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn level() -> Orientation {
        Orientation {
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[test]
    fn zero_input_stays_zero() {
        let mut input = InputAggregator::new();
        assert_eq!(input.current_direction(&Vec2::zeros(), level()), Vec3::zeros());
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let mut input = InputAggregator::new();
        let d = input.current_direction(&Vec2::new(1.0, 1.0), level());
        assert!((d.norm() - 1.0).abs() < 1.0e-6);
        assert!((d.x - d.z).abs() < 1.0e-6);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn yaw_rotates_direction_about_up() {
        let camera = Orientation {
            yaw: FRAC_PI_2,
            pitch: 0.0,
        };
        // A quarter turn about +Y maps +X to -Z.
        let d = camera_relative(Vec2::new(1.0, 0.0), camera);
        assert!((d - Vec3::new(0.0, 0.0, -1.0)).norm() < 1.0e-5);
    }

    #[test]
    fn pitch_does_not_shorten_direction() {
        let camera = Orientation {
            yaw: 0.3,
            pitch: -1.2,
        };
        let d = camera_relative(Vec2::new(0.0, -1.0), camera);
        assert!((d.norm() - 1.0).abs() < 1.0e-5);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn cached_value_is_reused_until_input_changes() {
        let mut input = InputAggregator::new();
        let first = input.current_direction(&Vec2::new(1.0, 0.0), level());
        assert_eq!(first, input.current_direction(&Vec2::new(1.0, 0.0), level()));

        let turned = Orientation {
            yaw: FRAC_PI_2,
            pitch: 0.0,
        };
        let second = input.current_direction(&Vec2::new(1.0, 0.0), turned);
        assert!((second - first).norm() > 0.5);

        input.invalidate();
        assert_eq!(second, input.current_direction(&Vec2::new(1.0, 0.0), turned));
    }

    #[test]
    fn diagonal_gate_requires_both_axes() {
        let gate = MovementGate::DiagonalOnly;
        assert!(!gate.should_move(&Vec3::new(1.0, 0.0, 0.0)));
        assert!(!gate.should_move(&Vec3::new(0.0, 0.0, 1.0)));
        assert!(gate.should_move(&Vec3::new(0.7, 0.0, 0.7)));
        assert!(MovementGate::AnyDirection.should_move(&Vec3::new(0.0, 0.0, 1.0)));
        assert!(!MovementGate::AnyDirection.should_move(&Vec3::zeros()));
    }
}
