//! Rapier-backed collision world for immutable level geometry.
//!
//! The level is built once from a list of [`ColliderDef`] and then only queried:
//! - vertical ray casts for the ground probe, filtered by category mask
//! - overlap/contact queries between the character capsule and the level
//!
//! Design goals
//! - Deterministic: definitions are sorted by `id` before insertion, and contact queries
//!   walk colliders in insertion order.
//! - Query-focused: colliders hang off fixed rigid bodies and the collision pipeline is
//!   stepped once so the broad phase is ready. No dynamics are ever simulated.
//! - Collectibles are deactivated on pickup instead of being removed from the sets, so the
//!   broad phase never needs a rebuild.

use std::collections::HashMap;

use log::warn;
use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::parry::bounding_volume::BoundingVolume;
use rapier3d::parry::query;
use rapier3d::prelude::*;

use crate::category::{Category, CategoryMask, Surface};
use crate::contact::{ContactBody, ContactEvent, ContactPhase};
use crate::error::LevelError;
use crate::settings::SimSettings;
use crate::types::{ColliderId, Iso, RegionId, Vec3};

/// Canonical definition of an immutable level collider.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - For planes, the normal is `rotation * +Y` and the plane passes through
///   `translation + normal * offset_along_normal`.
#[derive(Clone, Debug)]
pub struct ColliderDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: ColliderId,
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
    pub category: Category,
    pub surface: Surface,
    /// Ground region this collider belongs to, for automatic camera placement.
    pub region: Option<RegionId>,
}

impl ColliderDef {
    /// Axis-aligned definition with no surface tag and no region.
    pub fn new(id: u32, category: Category, translation: Vector<f32>, shape: ColliderShapeDef) -> Self {
        Self {
            id: ColliderId(id),
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
            category,
            surface: Surface::Plain,
            region: None,
        }
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn in_region(mut self, region: RegionId) -> Self {
        self.region = Some(region);
        self
    }

    pub fn rotated(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    fn is_finite(&self) -> bool {
        let pose_ok = self.translation.iter().all(|v| v.is_finite())
            && self.rotation.coords.iter().all(|v| v.is_finite());
        let shape_ok = match &self.shape {
            ColliderShapeDef::Plane {
                offset_along_normal,
            } => offset_along_normal.is_finite(),
            ColliderShapeDef::Cuboid { half_extents } => half_extents.iter().all(|v| v.is_finite()),
            ColliderShapeDef::Sphere { radius } => radius.is_finite(),
            ColliderShapeDef::CapsuleY {
                radius,
                half_height,
            }
            | ColliderShapeDef::CylinderY {
                radius,
                half_height,
            } => radius.is_finite() && half_height.is_finite(),
            ColliderShapeDef::TriMesh { vertices, .. } => vertices
                .iter()
                .all(|p| p.coords.iter().all(|v| v.is_finite())),
        };
        pose_ok && shape_ok
    }
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space). Solid below, open above.
    Plane {
        /// Offset along the plane normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },

    /// Pre-baked triangle mesh in collider-local space.
    TriMesh {
        vertices: Vec<Point<f32>>,
        indices: Vec<[u32; 3]>,
    },
}

/// Capsule used for the character's contact queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterShape {
    pub radius: f32,
    /// Total height, caps included.
    pub height: f32,
}

impl CharacterShape {
    pub fn from_settings(settings: &SimSettings) -> Self {
        Self {
            radius: settings.character_radius,
            height: settings.character_height,
        }
    }

    fn capsule(&self) -> Capsule {
        let half_segment = (self.height * 0.5 - self.radius).max(0.0);
        Capsule::new_y(half_segment, self.radius)
    }

    /// Capsule pose for a character standing at `position` (feet).
    fn pose(&self, position: &Vec3) -> Iso {
        let lift = self.height * crate::constants::CHARACTER_COLLIDER_LIFT;
        Iso::from_parts(
            Translation3::new(position.x, position.y + lift, position.z),
            UnitQuaternion::identity(),
        )
    }
}

/// Result of a vertical ray cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalHit {
    pub point: Vec3,
    pub collider: ColliderId,
    pub category: Category,
    pub surface: Surface,
    pub region: Option<RegionId>,
}

#[derive(Clone, Copy, Debug)]
struct ColliderTag {
    id: ColliderId,
    category: Category,
    surface: Surface,
    region: Option<RegionId>,
    active: bool,
}

/// In-memory Rapier structures for scene queries against the static level.
pub struct CollisionWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    tags: HashMap<ColliderHandle, ColliderTag>,
    handles: HashMap<ColliderId, ColliderHandle>,
}

impl CollisionWorld {
    /// Build the collision world from level collider definitions.
    ///
    /// Fails if the list is empty, an id repeats, a value is not finite, or a triangle
    /// mesh cannot be built.
    pub fn build(mut defs: Vec<ColliderDef>) -> Result<Self, LevelError> {
        if defs.is_empty() {
            return Err(LevelError::MissingCollisionMesh);
        }

        // Ensure deterministic insertion order.
        defs.sort_by_key(|d| d.id);
        if let Some(pair) = defs.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(LevelError::DuplicateCollider(pair[0].id));
        }

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut tags = HashMap::with_capacity(defs.len());
        let mut handles = HashMap::with_capacity(defs.len());

        for def in defs {
            if !def.is_finite() {
                return Err(LevelError::NonFiniteCollider(def.id));
            }

            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
            let rb_handle = bodies.insert(RigidBodyBuilder::fixed().pose(iso).build());

            let collider = collider_from_def(&def)?;
            let handle = colliders.insert_with_parent(collider, rb_handle, &mut bodies);

            tags.insert(
                handle,
                ColliderTag {
                    id: def.id,
                    category: def.category,
                    surface: def.surface,
                    region: def.region,
                    active: true,
                },
            );
            handles.insert(def.id, handle);
        }

        // Run collision detection once (no dynamics) so the broad phase BVH is populated.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();
        let hooks = ();
        let events = ();
        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        Ok(Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
            tags,
            handles,
        })
    }

    fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// Closest hit along the vertical segment `(x, from_y, z) -> (x, to_y, z)`, considering
    /// only active colliders whose category is in `mask`.
    pub fn cast_vertical(
        &self,
        x: f32,
        z: f32,
        from_y: f32,
        to_y: f32,
        mask: CategoryMask,
    ) -> Option<VerticalHit> {
        let length = (from_y - to_y).abs();
        let dir_y = if to_y <= from_y { -1.0 } else { 1.0 };

        let predicate = |handle: ColliderHandle, _collider: &Collider| {
            self.tags
                .get(&handle)
                .is_some_and(|tag| tag.active && mask.has(tag.category))
        };
        let pipeline = self.query_pipeline(QueryFilter::default().predicate(&predicate));

        let ray = Ray::new(point![x, from_y, z], vector![0.0, dir_y, 0.0]);
        let (handle, hit) = pipeline.cast_ray_and_get_normal(&ray, length, true)?;
        let tag = self.tags.get(&handle)?;
        let point = ray.point_at(hit.time_of_impact);

        Some(VerticalHit {
            point: point.coords,
            collider: tag.id,
            category: tag.category,
            surface: tag.surface,
            region: tag.region,
        })
    }

    /// Every active collider in `mask` overlapping the character capsule at `position`.
    ///
    /// The first body of each event is the static collider, the second is the character,
    /// so the normal points toward the character. Phases are left as `Began`; the
    /// simulator's contact tracker stamps them.
    pub fn contacts(
        &self,
        shape: &CharacterShape,
        position: &Vec3,
        mask: CategoryMask,
    ) -> Vec<ContactEvent> {
        let capsule = shape.capsule();
        let capsule_iso = shape.pose(position);
        let capsule_aabb = capsule.aabb(&capsule_iso);

        let mut contacts = Vec::new();
        for (handle, collider) in self.colliders.iter() {
            let Some(tag) = self.tags.get(&handle) else {
                continue;
            };
            if !tag.active || !mask.has(tag.category) {
                continue;
            }
            if !collider.compute_aabb().intersects(&capsule_aabb) {
                continue;
            }

            match query::contact(
                collider.position(),
                collider.shape(),
                &capsule_iso,
                &capsule,
                0.0,
            ) {
                Ok(Some(contact)) if contact.dist <= 0.0 => {
                    contacts.push(ContactEvent {
                        first: ContactBody::fixed(tag.id, tag.category),
                        second: ContactBody::character(),
                        depth: -contact.dist,
                        normal: contact.normal1.into_inner(),
                        phase: ContactPhase::Began,
                    });
                }
                Ok(_) => {}
                Err(_) => {
                    warn!("contact query unsupported for collider {:?}", tag.id);
                }
            }
        }
        contacts
    }

    /// Remove a collider from all further queries. Returns false if it was unknown or
    /// already inactive.
    pub fn deactivate(&mut self, id: ColliderId) -> bool {
        let Some(handle) = self.handles.get(&id) else {
            return false;
        };
        match self.tags.get_mut(handle) {
            Some(tag) if tag.active => {
                tag.active = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, id: ColliderId) -> bool {
        self.handles
            .get(&id)
            .and_then(|h| self.tags.get(h))
            .is_some_and(|tag| tag.active)
    }

    /// World position of a collider.
    pub fn position_of(&self, id: ColliderId) -> Option<Vec3> {
        let handle = self.handles.get(&id)?;
        self.colliders.get(*handle).map(|c| *c.translation())
    }

    /// World positions of the active colliders in `category`, in id order.
    pub fn positions_of(&self, category: Category) -> Vec<Vec3> {
        let mut found: Vec<(ColliderId, Vec3)> = self
            .tags
            .iter()
            .filter(|(_, tag)| tag.active && tag.category == category)
            .filter_map(|(handle, tag)| {
                self.colliders
                    .get(*handle)
                    .map(|c| (tag.id, *c.translation()))
            })
            .collect();
        found.sort_by_key(|(id, _)| *id);
        found.into_iter().map(|(_, p)| p).collect()
    }

    /// Regions referenced by any collider.
    pub fn regions(&self) -> impl Iterator<Item = (ColliderId, RegionId)> + '_ {
        self.tags
            .values()
            .filter_map(|tag| tag.region.map(|region| (tag.id, region)))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Build a Rapier collider from a `ColliderDef`.
///
/// The pose lives on the parent fixed rigid-body, so the collider uses an identity local
/// transform, except for planes which are shifted along their local +Y normal.
fn collider_from_def(def: &ColliderDef) -> Result<Collider, LevelError> {
    let collider = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => ColliderBuilder::new(SharedShape::halfspace(Vector::y_axis()))
            .translation(vector![0.0, *offset_along_normal, 0.0])
            .build(),

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).build(),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius).build(),

        ColliderShapeDef::TriMesh { vertices, indices } => {
            ColliderBuilder::trimesh(vertices.clone(), indices.clone())
                .map_err(|err| LevelError::InvalidMesh {
                    id: def.id,
                    reason: format!("{err:?}"),
                })?
                .build()
        }
    };
    Ok(collider)
}
