//! Ground region to camera orientation table.

use std::collections::HashMap;

use crate::camera::Orientation;
use crate::types::{RegionId, Vec3};

/// Alternate view used while the character is west of `below_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlternateView {
    pub below_x: f32,
    pub orientation: Orientation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionCamera {
    pub orientation: Orientation,
    pub alternate: Option<AlternateView>,
}

impl RegionCamera {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self {
            orientation: Orientation { yaw, pitch },
            alternate: None,
        }
    }

    pub fn with_alternate(mut self, below_x: f32, pitch: f32, yaw: f32) -> Self {
        self.alternate = Some(AlternateView {
            below_x,
            orientation: Orientation { yaw, pitch },
        });
        self
    }

    /// Orientation to use for a character standing at `position`.
    pub fn orientation_for(&self, position: &Vec3) -> Orientation {
        match self.alternate {
            Some(alt) if position.x < alt.below_x => alt.orientation,
            _ => self.orientation,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GroundRegionMap {
    cameras: HashMap<RegionId, RegionCamera>,
}

impl GroundRegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, region: RegionId, camera: RegionCamera) -> Self {
        self.cameras.insert(region, camera);
        self
    }

    pub fn get(&self, region: RegionId) -> Option<&RegionCamera> {
        self.cameras.get(&region)
    }

    pub fn contains(&self, region: RegionId) -> bool {
        self.cameras.contains_key(&region)
    }

    pub fn target_for(&self, region: RegionId, position: &Vec3) -> Option<Orientation> {
        self.get(region).map(|camera| camera.orientation_for(position))
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternate_applies_west_of_threshold() {
        let map = GroundRegionMap::new().with(
            RegionId(0),
            RegionCamera::new(-0.188683, 4.719608).with_alternate(2.5, -0.098175, 3.926991),
        );

        let west = map.target_for(RegionId(0), &Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(west.yaw, 3.926991);
        let east = map.target_for(RegionId(0), &Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert_eq!(east.pitch, -0.188683);
        assert!(map.target_for(RegionId(9), &Vec3::zeros()).is_none());
    }
}
