/*!
Orbit camera rig.

Two handles around a fixed pivot: the outer one turns about +Y (yaw), the inner one
about +X (pitch). The eye sits on the inner handle's +Z axis at `distance` and looks
back at the pivot.

Motion sources, in priority order:
- scripted motions ([`Motion::Transition`], [`Motion::Victory`]) drive the angles directly
- otherwise the angles follow the pan target with exponential smoothing

The rig is locked during the intro and the victory orbit; pans are rejected while locked.
*/

use std::f32::consts::{PI, TAU};

use crate::regions::GroundRegionMap;
use crate::settings::CameraSettings;
use crate::types::{Quat, RegionId, Vec3};

/// Yaw and pitch of the two camera handles, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Yaw about +Y, then pitch about the yawed +X.
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), self.yaw) * Quat::from_axis_angle(&Vec3::x_axis(), self.pitch)
    }
}

/// World-space placement of the eye.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub pivot: Vec3,
    /// Eye rotation; the eye looks along its local -Z.
    pub rotation: Quat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcMode {
    /// Interpolate the raw angles.
    Direct,
    /// Take the shorter way around for yaw.
    Shortest,
}

/// Eased move between two orientations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedTransition {
    pub from: Orientation,
    pub to: Orientation,
    pub elapsed: f32,
    pub delay: f32,
    pub duration: f32,
    pub unlock_on_finish: bool,
}

impl TimedTransition {
    pub fn new(from: Orientation, to: Orientation, duration: f32, arc: ArcMode) -> Self {
        let to = match arc {
            ArcMode::Direct => to,
            ArcMode::Shortest => Orientation {
                yaw: from.yaw + wrap_angle(to.yaw - from.yaw),
                pitch: from.pitch + wrap_angle(to.pitch - from.pitch),
            },
        };
        Self {
            from,
            to,
            elapsed: 0.0,
            delay: 0.0,
            duration,
            unlock_on_finish: false,
        }
    }

    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    pub fn sample(&self) -> Orientation {
        let t = smoothstep(self.progress());
        Orientation {
            yaw: lerp(self.from.yaw, self.to.yaw, t),
            pitch: lerp(self.from.pitch, self.to.pitch, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Idle,
    Transition(TimedTransition),
    /// Endless spin started on level completion.
    Victory { elapsed: f32, start: Orientation },
}

pub struct CameraRig {
    settings: CameraSettings,
    orientation: Orientation,
    /// Where pans want the handles to be.
    target: Orientation,
    locked: bool,
    observed_region: bool,
    region: Option<RegionId>,
    motion: Motion,
    complete: bool,
}

impl CameraRig {
    /// A rig that plays the opening sweep before accepting pans.
    pub fn new(settings: CameraSettings) -> Self {
        let intro = Orientation::new(settings.intro_yaw, settings.intro_pitch);
        let default = Orientation::new(settings.default_yaw, settings.default_pitch);

        let mut sweep = TimedTransition::new(intro, default, settings.intro_duration, ArcMode::Direct);
        sweep.delay = settings.intro_delay;
        sweep.unlock_on_finish = true;

        Self {
            settings,
            orientation: intro,
            target: intro,
            locked: true,
            observed_region: false,
            region: None,
            motion: Motion::Transition(sweep),
            complete: false,
        }
    }

    /// A rig resting at the default orientation, unlocked.
    pub fn without_intro(settings: CameraSettings) -> Self {
        let default = Orientation::new(settings.default_yaw, settings.default_pitch);
        Self {
            settings,
            orientation: default,
            target: default,
            locked: false,
            observed_region: false,
            region: None,
            motion: Motion::Idle,
            complete: false,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn target(&self) -> Orientation {
        self.target
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn current_region(&self) -> Option<RegionId> {
        self.region
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Manual orbit from a pointer drag. Returns false if the rig is locked.
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        if self.locked {
            return false;
        }
        if self.motion != Motion::Idle {
            self.motion = Motion::Idle;
            self.target = self.orientation;
        }

        let f = self.settings.pan_factor;
        self.target.yaw -= dx * f;
        self.target.pitch = self.clamp_pitch(self.target.pitch + dy * f);
        true
    }

    /// Track the ground region under the character and start the matching transition.
    ///
    /// The first observation only records the region. Returns true if a transition
    /// started.
    pub fn observe_region(
        &mut self,
        region: Option<RegionId>,
        character: &Vec3,
        map: &GroundRegionMap,
    ) -> bool {
        if self.complete {
            return false;
        }
        if !self.observed_region {
            self.observed_region = true;
            self.region = region;
            return false;
        }
        if region == self.region {
            return false;
        }

        self.region = region;
        if self.locked {
            return false;
        }
        let Some(to) = region.and_then(|r| map.target_for(r, character)) else {
            return false;
        };

        log::debug!("camera region changed to {region:?}");
        self.motion = Motion::Transition(TimedTransition::new(
            self.orientation,
            to,
            self.settings.region_transition,
            ArcMode::Shortest,
        ));
        true
    }

    /// Start the endless victory orbit and ignore regions from now on.
    pub fn begin_victory_orbit(&mut self) {
        self.complete = true;
        self.locked = true;
        self.motion = Motion::Victory {
            elapsed: 0.0,
            start: self.orientation,
        };
    }

    pub fn update(&mut self, dt: f32) {
        let s = self.settings;
        match &mut self.motion {
            Motion::Idle => {
                let k = 1.0 - (-s.pan_decay_rate * dt).exp();
                self.orientation.yaw += (self.target.yaw - self.orientation.yaw) * k;
                self.orientation.pitch += (self.target.pitch - self.orientation.pitch) * k;
            }
            Motion::Transition(transition) => {
                transition.elapsed += dt;
                self.orientation = transition.sample();
                if transition.is_finished() {
                    self.orientation = transition.to;
                    self.target = transition.to;
                    if transition.unlock_on_finish {
                        self.locked = false;
                    }
                    self.motion = Motion::Idle;
                }
            }
            Motion::Victory { elapsed, start } => {
                *elapsed += dt;
                let t = *elapsed - s.victory_delay;
                if t > 0.0 {
                    let pitch_t = (t / s.victory_pitch_duration).min(1.0);
                    self.orientation = Orientation {
                        yaw: start.yaw + s.victory_yaw_speed * t,
                        pitch: lerp(start.pitch, s.victory_pitch, pitch_t),
                    };
                    self.target = self.orientation;
                }
            }
        }
        self.orientation.pitch = self.clamp_pitch(self.orientation.pitch);
    }

    pub fn pose(&self) -> CameraPose {
        let pivot = Vec3::new(0.0, self.settings.altitude, 0.0);
        let rotation = self.orientation.rotation();
        CameraPose {
            eye: pivot + rotation * Vec3::new(0.0, 0.0, self.settings.distance),
            pivot,
            rotation,
        }
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.settings.min_pitch, self.settings.max_pitch)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Wrap into `[-PI, PI)`.
fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionCamera;

    fn run(rig: &mut CameraRig, seconds: f32) {
        let steps = (seconds * 60.0).round() as usize;
        for _ in 0..steps {
            rig.update(1.0 / 60.0);
        }
    }

    fn map() -> GroundRegionMap {
        GroundRegionMap::new()
            .with(RegionId(1), RegionCamera::new(-0.188683, 4.719608))
            .with(RegionId(2), RegionCamera::new(-0.435909, 6.297167))
    }

    #[test]
    fn intro_locks_then_settles_on_default() {
        let settings = CameraSettings::default();
        let mut rig = CameraRig::new(settings);
        assert!(rig.is_locked());
        assert!(!rig.pan(10.0, 0.0));

        run(&mut rig, 2.0);
        assert_eq!(rig.orientation().yaw, settings.intro_yaw);

        run(&mut rig, 6.5);
        assert!(!rig.is_locked());
        assert!((rig.orientation().yaw - settings.default_yaw).abs() < 1.0e-5);
        assert!((rig.orientation().pitch - settings.default_pitch).abs() < 1.0e-5);
        assert!(rig.pan(10.0, 0.0));
    }

    #[test]
    fn pan_moves_target_and_clamps_pitch() {
        let settings = CameraSettings::default();
        let mut rig = CameraRig::without_intro(settings);

        assert!(rig.pan(100.0, 0.0));
        assert!((rig.target().yaw - (settings.default_yaw - 0.5)).abs() < 1.0e-5);

        rig.pan(0.0, 10_000.0);
        assert_eq!(rig.target().pitch, settings.max_pitch);
        rig.pan(0.0, -100_000.0);
        assert_eq!(rig.target().pitch, settings.min_pitch);

        run(&mut rig, 3.0);
        assert!(rig.orientation().pitch >= settings.min_pitch);
        assert!((rig.orientation().pitch - settings.min_pitch).abs() < 1.0e-3);
    }

    #[test]
    fn region_change_reaches_target_after_duration() {
        let mut rig = CameraRig::without_intro(CameraSettings::default());
        let here = Vec3::zeros();

        assert!(!rig.observe_region(Some(RegionId(2)), &here, &map()));
        assert!(!rig.observe_region(Some(RegionId(2)), &here, &map()));
        assert!(rig.observe_region(Some(RegionId(1)), &here, &map()));
        assert_eq!(rig.current_region(), Some(RegionId(1)));

        run(&mut rig, 1.5);
        assert!(matches!(rig.motion(), Motion::Transition(_)));
        run(&mut rig, 1.6);
        assert_eq!(*rig.motion(), Motion::Idle);
        assert!((rig.orientation().yaw - 4.719608).abs() < 1.0e-4);
        assert!((rig.orientation().pitch + 0.188683).abs() < 1.0e-4);
    }

    #[test]
    fn transition_takes_shortest_arc() {
        let from = Orientation::new(0.1, 0.0);
        let to = Orientation::new(TAU - 0.1, 0.0);
        let transition = TimedTransition::new(from, to, 3.0, ArcMode::Shortest);
        assert!((transition.to.yaw + 0.1).abs() < 1.0e-5);
    }

    #[test]
    fn pan_cancels_a_running_transition() {
        let mut rig = CameraRig::without_intro(CameraSettings::default());
        rig.observe_region(Some(RegionId(2)), &Vec3::zeros(), &map());
        rig.observe_region(Some(RegionId(1)), &Vec3::zeros(), &map());
        run(&mut rig, 0.5);

        let mid = rig.orientation();
        assert!(rig.pan(0.0, 0.0));
        assert_eq!(*rig.motion(), Motion::Idle);
        assert_eq!(rig.target(), mid);
    }

    #[test]
    fn victory_spins_after_delay_and_ignores_regions() {
        let settings = CameraSettings::default();
        let mut rig = CameraRig::without_intro(settings);
        rig.observe_region(Some(RegionId(2)), &Vec3::zeros(), &map());
        rig.begin_victory_orbit();
        let start = rig.orientation();

        run(&mut rig, 0.9);
        assert_eq!(rig.orientation(), start);

        run(&mut rig, 3.1);
        assert!((rig.orientation().yaw - (start.yaw - 1.0)).abs() < 1.0e-3);

        run(&mut rig, 3.0);
        assert!((rig.orientation().pitch - settings.victory_pitch).abs() < 1.0e-5);
        assert!(!rig.observe_region(Some(RegionId(1)), &Vec3::zeros(), &map()));
        assert!(!rig.pan(5.0, 5.0));
    }

    #[test]
    fn eye_sits_at_distance_from_pivot() {
        let rig = CameraRig::without_intro(CameraSettings::default());
        let pose = rig.pose();
        assert!(((pose.eye - pose.pivot).norm() - 10.0).abs() < 1.0e-4);
        // Looking down -Z reaches the pivot.
        let forward = pose.rotation * -Vec3::z();
        assert!((pose.eye + forward * 10.0 - pose.pivot).norm() < 1.0e-3);
    }
}
