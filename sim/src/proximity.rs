//! Enemy proximity for the continuous flamethrower sound.

use crate::types::Vec3;

/// Distance to the nearest enemy, or `None` when there are none.
pub fn nearest_distance(position: &Vec3, enemies: &[Vec3]) -> Option<f32> {
    enemies
        .iter()
        .map(|enemy| (enemy - position).norm())
        .min_by(|a, b| a.total_cmp(b))
}

/// 1 within `near` of an enemy, fading linearly to 0 over `fade_range` beyond it.
pub fn enemy_intensity(distance: f32, near: f32, fade_range: f32) -> f32 {
    (1.0 - (distance - near) / fade_range).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_fades_between_near_and_far() {
        assert_eq!(enemy_intensity(0.5, 1.2, 1.6), 1.0);
        assert_eq!(enemy_intensity(1.2, 1.2, 1.6), 1.0);
        assert!((enemy_intensity(2.0, 1.2, 1.6) - 0.5).abs() < 1.0e-6);
        assert_eq!(enemy_intensity(2.8, 1.2, 1.6), 0.0);
        assert_eq!(enemy_intensity(50.0, 1.2, 1.6), 0.0);
    }

    #[test]
    fn nearest_enemy_is_picked() {
        let enemies = [Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -2.0)];
        assert_eq!(nearest_distance(&Vec3::zeros(), &enemies), Some(2.0));
        assert_eq!(nearest_distance(&Vec3::zeros(), &[]), None);
    }
}
