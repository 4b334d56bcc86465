/*!
Tunable parameters for the simulator and the camera rig.

Every field defaults to the matching constant in [`crate::constants`]. Hosts
override individual fields with struct update syntax:

```text
let settings = SimSettings { movement_gate: MovementGate::AnyDirection, ..SimSettings::default() };
```

Notes
- Distances are in world units (meters), time in seconds, angles in radians.
- Values are read every tick; nothing caches derived values.
*/

use crate::constants::*;
use crate::input::MovementGate;

/// Character controller tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimSettings {
    pub min_delta_time: f32,
    pub max_delta_time: f32,
    /// Walking speed in units per second.
    pub base_speed: f32,
    /// Speed multiplier while burning.
    pub burning_speed_multiplier: f32,
    pub walk_cycle_seconds: f32,
    /// Walk cycle fractions that play a footstep.
    pub footstep_key_times: [f32; 2],
    pub gravity: f32,
    /// Probe start above the character.
    pub rise_limit: f32,
    /// Probe reach below the character.
    pub fall_limit: f32,
    pub ground_epsilon: f32,
    /// Vertical gap that classifies the character as airborne.
    pub air_drop_threshold: f32,
    pub invincibility_seconds: f32,
    pub flowers_to_complete: u32,
    pub enemy_near_distance: f32,
    pub enemy_fade_range: f32,
    pub enemy_max_volume: f32,
    pub character_radius: f32,
    pub character_height: f32,
    pub movement_gate: MovementGate,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            min_delta_time: MIN_DELTA_TIME,
            max_delta_time: MAX_DELTA_TIME,
            base_speed: CHARACTER_SPEED_FACTOR,
            burning_speed_multiplier: BURNING_SPEED_MULTIPLIER,
            walk_cycle_seconds: WALK_CYCLE_SECONDS,
            footstep_key_times: FOOTSTEP_KEY_TIMES,
            gravity: GRAVITY_ACCELERATION,
            rise_limit: MAX_RISE,
            fall_limit: MAX_FALL,
            ground_epsilon: GROUND_EPSILON,
            air_drop_threshold: AIR_DROP_THRESHOLD,
            invincibility_seconds: INVINCIBILITY_SECONDS,
            flowers_to_complete: FLOWERS_TO_COMPLETE,
            enemy_near_distance: ENEMY_NEAR_DISTANCE,
            enemy_fade_range: ENEMY_FADE_RANGE,
            enemy_max_volume: ENEMY_MAX_VOLUME,
            character_radius: CHARACTER_RADIUS,
            character_height: CHARACTER_HEIGHT,
            movement_gate: MovementGate::DiagonalOnly,
        }
    }
}

/// Camera rig tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub altitude: f32,
    pub distance: f32,
    pub default_yaw: f32,
    pub default_pitch: f32,
    pub intro_yaw: f32,
    pub intro_pitch: f32,
    pub intro_delay: f32,
    pub intro_duration: f32,
    pub region_transition: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub pan_factor: f32,
    /// Exponential decay rate for pan inertia (1/s).
    pub pan_decay_rate: f32,
    pub victory_delay: f32,
    pub victory_yaw_speed: f32,
    pub victory_pitch: f32,
    pub victory_pitch_duration: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            altitude: CAMERA_ALTITUDE,
            distance: CAMERA_DISTANCE,
            default_yaw: CAMERA_DEFAULT_YAW,
            default_pitch: CAMERA_DEFAULT_PITCH,
            intro_yaw: CAMERA_INTRO_YAW,
            intro_pitch: CAMERA_INTRO_PITCH,
            intro_delay: CAMERA_INTRO_DELAY,
            intro_duration: CAMERA_INTRO_DURATION,
            region_transition: CAMERA_REGION_TRANSITION,
            min_pitch: CAMERA_MIN_PITCH,
            max_pitch: CAMERA_MAX_PITCH,
            pan_factor: CAMERA_PAN_FACTOR,
            pan_decay_rate: CAMERA_PAN_DECAY_RATE,
            victory_delay: CAMERA_VICTORY_DELAY,
            victory_yaw_speed: CAMERA_VICTORY_YAW_SPEED,
            victory_pitch: CAMERA_VICTORY_PITCH,
            victory_pitch_duration: CAMERA_VICTORY_PITCH_DURATION,
        }
    }
}
