//! Built-in demo course: six ground blocks, a pond, walls, pickups and two flames.
//!
//! Ground blocks carry region ids so the camera swings to a per-block view when the
//! character crosses from one block to the next.

use nalgebra::{UnitQuaternion, vector};
use sim::{
    Category, ColliderDef, ColliderShapeDef, GroundRegionMap, Iso, LevelDef, RegionCamera,
    RegionId, Surface,
};

const MAIN_GROUND: RegionId = RegionId(4);

/// Block size on the XZ grid.
const BLOCK: f32 = 12.0;

pub fn demo_level() -> LevelDef {
    let mut colliders = Vec::new();

    // Ground blocks: (id, region, centre x, centre z, surface).
    let blocks = [
        (1, MAIN_GROUND, 0.0, 0.0, Surface::Grass),
        (2, RegionId(3), BLOCK, 0.0, Surface::Plain),
        (3, RegionId(7), 2.0 * BLOCK, 0.0, Surface::Grass),
        (4, RegionId(8), 0.0, BLOCK, Surface::Plain),
        (5, RegionId(6), BLOCK, BLOCK, Surface::Grass),
        (6, RegionId(5), 2.0 * BLOCK, BLOCK, Surface::Plain),
    ];
    for (id, region, x, z, surface) in blocks {
        colliders.push(
            ColliderDef::new(
                id,
                Category::Ground,
                vector![x, -0.5, z],
                ColliderShapeDef::Cuboid {
                    half_extents: vector![BLOCK * 0.5, 0.5, BLOCK * 0.5],
                },
            )
            .with_surface(surface)
            .in_region(region),
        );
    }

    // Shallow pond on block 5.
    colliders.push(ColliderDef::new(
        10,
        Category::Water,
        vector![BLOCK, 0.05, BLOCK],
        ColliderShapeDef::Cuboid {
            half_extents: vector![2.5, 0.05, 2.5],
        },
    ));

    // Perimeter walls.
    let (min_x, max_x) = (-0.5 * BLOCK, 2.5 * BLOCK);
    let (min_z, max_z) = (-0.5 * BLOCK, 1.5 * BLOCK);
    let (mid_x, mid_z) = ((min_x + max_x) * 0.5, (min_z + max_z) * 0.5);
    let (span_x, span_z) = ((max_x - min_x) * 0.5, (max_z - min_z) * 0.5);
    let walls = [
        (20, vector![mid_x, 1.0, min_z - 0.5], vector![span_x, 1.0, 0.5]),
        (21, vector![mid_x, 1.0, max_z + 0.5], vector![span_x, 1.0, 0.5]),
        (22, vector![min_x - 0.5, 1.0, mid_z], vector![0.5, 1.0, span_z]),
        (23, vector![max_x + 0.5, 1.0, mid_z], vector![0.5, 1.0, span_z]),
    ];
    for (id, translation, half_extents) in walls {
        colliders.push(ColliderDef::new(
            id,
            Category::Wall,
            translation,
            ColliderShapeDef::Cuboid { half_extents },
        ));
    }

    // A rock in the middle of the main block, turned a little.
    colliders.push(
        ColliderDef::new(
            24,
            Category::Wall,
            vector![3.0, 0.75, 3.0],
            ColliderShapeDef::Cuboid {
                half_extents: vector![0.75, 0.75, 0.75],
            },
        )
        .rotated(UnitQuaternion::from_euler_angles(0.0, 0.6, 0.0)),
    );

    // Pearls along the path.
    let pearls = [
        (4.0, -2.0),
        (8.0, -1.0),
        (14.0, 2.0),
        (20.0, 4.0),
        (26.0, 8.0),
        (6.0, 14.0),
        (16.0, 12.0),
    ];
    for (i, (x, z)) in pearls.into_iter().enumerate() {
        colliders.push(ColliderDef::new(
            100 + i as u32,
            Category::Collectible,
            vector![x, 0.5, z],
            ColliderShapeDef::Sphere { radius: 0.2 },
        ));
    }

    // Flowers: three finish the level.
    let flowers = [
        (2.0 * BLOCK + 3.0, -3.0),
        (2.0 * BLOCK + 2.0, BLOCK + 3.0),
        (-3.0, BLOCK + 4.0),
    ];
    for (i, (x, z)) in flowers.into_iter().enumerate() {
        colliders.push(ColliderDef::new(
            200 + i as u32,
            Category::SuperCollectible,
            vector![x, 0.5, z],
            ColliderShapeDef::Sphere { radius: 0.3 },
        ));
    }

    // Flames.
    for (i, (x, z)) in [(BLOCK, -2.0), (2.0 * BLOCK, BLOCK)].into_iter().enumerate() {
        colliders.push(ColliderDef::new(
            300 + i as u32,
            Category::Enemy,
            vector![x, 0.6, z],
            ColliderShapeDef::CylinderY {
                radius: 0.35,
                half_height: 0.6,
            },
        ));
    }

    LevelDef {
        colliders,
        regions: Some(region_cameras()),
        starting_point: Some(Iso::translation(0.0, 0.0, -3.0)),
    }
}

/// Camera (pitch, yaw) per ground block.
fn region_cameras() -> GroundRegionMap {
    GroundRegionMap::new()
        .with(
            MAIN_GROUND,
            RegionCamera::new(-0.188683, 4.719608).with_alternate(2.5, -0.098175, 3.926991),
        )
        .with(RegionId(3), RegionCamera::new(-0.435909, 6.297167))
        .with(RegionId(7), RegionCamera::new(-0.333663, 7.868592))
        .with(RegionId(8), RegionCamera::new(-0.575011, 8.739003))
        .with(RegionId(6), RegionCamera::new(-1.095519, 9.425292))
        .with(RegionId(5), RegionCamera::new(-0.072051, 8.202264))
}
