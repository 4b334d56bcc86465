use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Smallest delta time a tick integrates (seconds).
pub const MIN_DELTA_TIME: f32 = 1.0 / 60.0;

/// Largest delta time a tick integrates (seconds).
///
/// Frame hitches (suspended app, debugger break) are clamped to this value.
pub const MAX_DELTA_TIME: f32 = 1.0;

/// Base walking speed in world units per second.
pub const CHARACTER_SPEED_FACTOR: f32 = 2.0 / 1.3;

/// Speed multiplier applied while the character is burning.
pub const BURNING_SPEED_MULTIPLIER: f32 = 2.3;

/// Length of one walk cycle at unit playback rate (seconds). The cycle plays at
/// `CHARACTER_SPEED_FACTOR` times this rate, scaled again while burning.
pub const WALK_CYCLE_SECONDS: f32 = 1.0;

/// Points of the walk cycle, as fractions of a loop, where a foot lands.
pub const FOOTSTEP_KEY_TIMES: [f32; 2] = [0.1, 0.6];

/// Gravity accumulation rate. Integrated as `accel += dt * GRAVITY_ACCELERATION`
/// and subtracted from the height once per tick.
pub const GRAVITY_ACCELERATION: f32 = 0.18;

/// How far above the character the ground probe starts (meters).
pub const MAX_RISE: f32 = 0.08;

/// How far below the character the ground probe reaches (meters).
pub const MAX_FALL: f32 = 10.0;

/// Gap below which the character counts as standing on the probed ground.
pub const GROUND_EPSILON: f32 = 1.0e-5;

/// Gap above which the character is classified as airborne.
pub const AIR_DROP_THRESHOLD: f32 = 0.2;

/// Invincibility after a hit: seven blinks, each a 0.1 s fade out and a 0.1 s fade in.
pub const INVINCIBILITY_SECONDS: f32 = 7.0 * 0.2;

/// Flowers required to complete the level.
pub const FLOWERS_TO_COMPLETE: u32 = 3;

/// Enemy distance at which the proximity intensity saturates at 1.
pub const ENEMY_NEAR_DISTANCE: f32 = 1.2;

/// Distance range over which the proximity intensity fades from 1 to 0.
pub const ENEMY_FADE_RANGE: f32 = 1.6;

/// Volume of the flamethrower channel at full proximity intensity.
pub const ENEMY_MAX_VOLUME: f32 = 0.3;

/// Character capsule radius (meters).
pub const CHARACTER_RADIUS: f32 = 0.25;

/// Character capsule total height, caps included (meters).
pub const CHARACTER_HEIGHT: f32 = 1.0;

/// The capsule center sits slightly above half height so it does not touch the floor.
pub const CHARACTER_COLLIDER_LIFT: f32 = 0.51;

/// Height of the camera pivot above the world origin.
pub const CAMERA_ALTITUDE: f32 = 1.0;

/// Distance of the camera from its pivot.
pub const CAMERA_DISTANCE: f32 = 10.0;

/// Resting yaw of the camera once the intro animation completes.
pub const CAMERA_DEFAULT_YAW: f32 = FRAC_PI_2 + FRAC_PI_4 * 3.0;

/// Resting pitch of the camera once the intro animation completes.
pub const CAMERA_DEFAULT_PITCH: f32 = -FRAC_PI_4 * 0.125;

/// Yaw the intro animation starts from.
pub const CAMERA_INTRO_YAW: f32 = PI * 2.0;

/// Pitch the intro animation starts from.
pub const CAMERA_INTRO_PITCH: f32 = -FRAC_PI_2;

/// Delay before the intro animation starts (seconds).
pub const CAMERA_INTRO_DELAY: f32 = 3.0;

/// Duration of the intro animation (seconds).
pub const CAMERA_INTRO_DURATION: f32 = 5.0;

/// Duration of an automatic region transition (seconds).
pub const CAMERA_REGION_TRANSITION: f32 = 3.0;

/// Lowest pitch the camera may reach (looking straight down).
pub const CAMERA_MIN_PITCH: f32 = -FRAC_PI_2;

/// Highest pitch the camera may reach.
pub const CAMERA_MAX_PITCH: f32 = 0.13;

/// Radians of rotation per unit of pan input.
pub const CAMERA_PAN_FACTOR: f32 = 0.005;

/// Exponential decay rate used to follow pan targets (1/s).
pub const CAMERA_PAN_DECAY_RATE: f32 = 8.0;

/// Delay before the victory orbit starts (seconds).
pub const CAMERA_VICTORY_DELAY: f32 = 1.0;

/// Yaw speed of the victory orbit (radians per second).
pub const CAMERA_VICTORY_YAW_SPEED: f32 = -1.0 / 3.0;

/// Pitch the victory orbit settles at.
pub const CAMERA_VICTORY_PITCH: f32 = -FRAC_PI_4;

/// Duration of the victory pitch transition (seconds).
pub const CAMERA_VICTORY_PITCH_DURATION: f32 = 5.0;
