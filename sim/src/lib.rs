pub mod bitmask_flags;
pub mod camera;
pub mod category;
pub mod character;
pub mod clock;
pub mod constants;
pub mod contact;
pub mod error;
pub mod events;
pub mod floor;
pub mod footsteps;
pub mod input;
pub mod level;
pub mod penetration;
pub mod proximity;
pub mod regions;
pub mod session;
pub mod settings;
pub mod simulator;
pub mod types;
pub mod world;

// Re-export Rapier so hosts can build collider definitions without depending on
// `rapier3d` directly.
pub use rapier3d;

pub use camera::{CameraPose, CameraRig, Orientation};
pub use category::{Category, CategoryMask, Surface};
pub use character::{Character, StatusEffects};
pub use error::LevelError;
pub use events::{
    AudioChannel, AudioSink, DomainEvent, EffectKind, EffectsSink, EventDispatcher,
    PickupProgress, SoundCue,
};
pub use floor::FloorMaterial;
pub use input::{DirectionSource, InputAggregator, MovementGate};
pub use level::LevelDef;
pub use regions::{GroundRegionMap, RegionCamera};
pub use session::Session;
pub use settings::{CameraSettings, SimSettings};
pub use simulator::{Simulator, TickOutcome, TickReport};
pub use types::{ColliderId, Iso, RegionId, Vec2, Vec3};
pub use world::{ColliderDef, ColliderShapeDef, CollisionWorld};
