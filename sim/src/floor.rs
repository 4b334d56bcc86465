//! Ground probe and floor material classification.

use crate::category::{Category, CategoryMask, Surface, ground_probe_mask};
use crate::settings::SimSettings;
use crate::types::{RegionId, Vec3};
use crate::world::{CollisionWorld, VerticalHit};

/// What the character is standing on. Also selects the footstep sound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FloorMaterial {
    Grass,
    #[default]
    Rock,
    Water,
    InAir,
}

/// Outcome of classifying a probe hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorReading {
    pub material: FloorMaterial,
    /// Height the character stands on. Under water this is the ground beneath the surface.
    pub ground_y: f32,
    pub region: Option<RegionId>,
}

/// Classify the first probe hit.
///
/// `beneath` is the ground found by re-casting without water, only consulted when the
/// first hit is water. Pure: the same inputs always give the same reading.
pub fn classify_floor(hit: &VerticalHit, beneath: Option<&VerticalHit>) -> FloorReading {
    match hit.category {
        Category::Water => {
            let ground = beneath.unwrap_or(hit);
            FloorReading {
                material: FloorMaterial::Water,
                ground_y: ground.point.y,
                region: ground.region.or(hit.region),
            }
        }
        _ => FloorReading {
            material: match hit.surface {
                Surface::Grass => FloorMaterial::Grass,
                Surface::Plain => FloorMaterial::Rock,
            },
            ground_y: hit.point.y,
            region: hit.region,
        },
    }
}

/// Cast down from just above `position` and classify what is found.
///
/// `None` means there is nothing below within reach: the character left the level.
pub fn probe_floor(
    world: &CollisionWorld,
    settings: &SimSettings,
    position: &Vec3,
) -> Option<FloorReading> {
    let from_y = position.y + settings.rise_limit;
    let to_y = position.y - settings.fall_limit;
    let hit = world.cast_vertical(position.x, position.z, from_y, to_y, ground_probe_mask())?;

    let beneath = if hit.category == Category::Water {
        let ground_only = CategoryMask::empty().with(Category::Ground);
        world.cast_vertical(position.x, position.z, from_y, to_y, ground_only)
    } else {
        None
    };

    Some(classify_floor(&hit, beneath.as_ref()))
}
