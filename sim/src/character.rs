//! Character transform and status.

use crate::floor::FloorMaterial;
use crate::types::Vec3;

/// Burning and invincibility are independent: a hit sets both, water clears only the
/// former and the timer clears only the latter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusEffects {
    pub burning: bool,
    /// Seconds of invincibility left, `None` when vulnerable.
    pub invincible_remaining: Option<f32>,
}

impl StatusEffects {
    pub fn is_invincible(&self) -> bool {
        self.invincible_remaining.is_some()
    }

    /// Apply a hit. Returns false and changes nothing while invincible.
    pub fn hit(&mut self, invincibility_seconds: f32) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.burning = true;
        self.invincible_remaining = Some(invincibility_seconds);
        true
    }

    /// Put the fire out. Returns true if the character was burning.
    pub fn extinguish(&mut self) -> bool {
        std::mem::replace(&mut self.burning, false)
    }

    /// Count the invincibility timer down by `dt`.
    pub fn advance(&mut self, dt: f32) {
        if let Some(remaining) = self.invincible_remaining {
            let left = remaining - dt;
            self.invincible_remaining = (left > 0.0).then_some(left);
        }
    }

    pub fn speed_multiplier(&self, burning_multiplier: f32) -> f32 {
        if self.burning { burning_multiplier } else { 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    /// Feet position.
    pub position: Vec3,
    /// Heading around +Y, `atan2(dir.x, dir.z)` of the last movement.
    pub facing: f32,
    /// Downward speed accumulated while above the ground, in units per tick.
    pub vertical_accel: f32,
    pub floor: FloorMaterial,
    pub walking: bool,
    pub status: StatusEffects,
}

impl Character {
    pub fn new(position: Vec3, facing: f32) -> Self {
        Self {
            position,
            facing,
            vertical_accel: 0.0,
            floor: FloorMaterial::default(),
            walking: false,
            status: StatusEffects::default(),
        }
    }

    pub fn is_burning(&self) -> bool {
        self.status.burning
    }

    pub fn is_invincible(&self) -> bool {
        self.status.is_invincible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_sets_both_flags_once() {
        let mut status = StatusEffects::default();
        assert!(status.hit(1.4));
        assert!(status.burning);
        assert_eq!(status.invincible_remaining, Some(1.4));

        status.advance(0.4);
        assert!(!status.hit(1.4));
        let remaining = status.invincible_remaining.unwrap();
        assert!((remaining - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn timer_expiry_keeps_burning() {
        let mut status = StatusEffects::default();
        status.hit(0.2);
        status.advance(0.25);
        assert!(!status.is_invincible());
        assert!(status.burning);
    }

    #[test]
    fn extinguish_keeps_invincibility() {
        let mut status = StatusEffects::default();
        status.hit(1.4);
        assert!(status.extinguish());
        assert!(!status.extinguish());
        assert!(status.is_invincible());
        assert_eq!(status.speed_multiplier(2.3), 1.0);
    }
}
