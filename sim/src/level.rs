//! In-memory level description and load-time validation.

use crate::error::LevelError;
use crate::regions::GroundRegionMap;
use crate::types::Iso;
use crate::world::{ColliderDef, CollisionWorld};

/// Everything a host provides to start a session. File formats are the host's concern.
#[derive(Clone, Debug, Default)]
pub struct LevelDef {
    pub colliders: Vec<ColliderDef>,
    pub regions: Option<GroundRegionMap>,
    pub starting_point: Option<Iso>,
}

/// A validated level ready to simulate.
pub struct LoadedLevel {
    pub world: CollisionWorld,
    pub regions: GroundRegionMap,
    pub start: Iso,
}

impl LevelDef {
    pub fn load(self) -> Result<LoadedLevel, LevelError> {
        let start = self.starting_point.ok_or(LevelError::MissingStartingPoint)?;
        let regions = self.regions.ok_or(LevelError::MissingRegionMap)?;

        let world = CollisionWorld::build(self.colliders)?;

        let mut referenced: Vec<_> = world.regions().collect();
        referenced.sort();
        if let Some((collider, region)) = referenced
            .into_iter()
            .find(|(_, region)| !regions.contains(*region))
        {
            return Err(LevelError::UnknownRegion { collider, region });
        }

        log::info!(
            "level loaded: {} colliders, {} camera regions",
            world.len(),
            regions.len()
        );
        Ok(LoadedLevel {
            world,
            regions,
            start,
        })
    }
}
