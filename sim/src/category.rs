//! Collision categories and the masks used to filter queries.

use crate::bitmask_flags::BitmaskFlags;
use crate::define_bitmask_flags;

define_bitmask_flags!(
    /// What a collider represents in the level.
    Category, u8, {
        Character,
        Ground,
        Wall,
        Water,
        Collectible,
        SuperCollectible,
        Enemy,
    }
);

pub type CategoryMask = BitmaskFlags<u8>;

/// Categories the ground probe can land on.
pub fn ground_probe_mask() -> CategoryMask {
    CategoryMask::from_flags(&[Category::Ground, Category::Water])
}

/// Categories the character capsule reports contacts with.
pub fn character_contact_mask() -> CategoryMask {
    CategoryMask::from_flags(&[
        Category::Wall,
        Category::Collectible,
        Category::SuperCollectible,
        Category::Enemy,
    ])
}

/// Surface tag carried by ground colliders, used for footstep material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Surface {
    #[default]
    Plain,
    Grass,
}
