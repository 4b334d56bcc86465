use thiserror::Error;

use crate::types::{ColliderId, RegionId};

/// Static level data that cannot be turned into a playable session.
///
/// Raised only while loading. Per-tick anomalies never surface as errors.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("level has no collision geometry")]
    MissingCollisionMesh,
    #[error("level has no ground region camera table")]
    MissingRegionMap,
    #[error("level has no starting point")]
    MissingStartingPoint,
    #[error("collider id {0:?} is used more than once")]
    DuplicateCollider(ColliderId),
    #[error("collider {0:?} has a non-finite transform or dimension")]
    NonFiniteCollider(ColliderId),
    #[error("collider {id:?} has an invalid triangle mesh: {reason}")]
    InvalidMesh { id: ColliderId, reason: String },
    #[error("collider {collider:?} refers to region {region:?} missing from the camera table")]
    UnknownRegion {
        collider: ColliderId,
        region: RegionId,
    },
}
