//! One playable level: simulator, camera and event delivery driven in frame order.

use crate::camera::CameraRig;
use crate::character::Character;
use crate::clock::FrameClock;
use crate::error::LevelError;
use crate::events::{AudioChannel, DispatchContext, DomainEvent, EventDispatcher, PickupProgress};
use crate::input::{DirectionSource, InputAggregator};
use crate::level::LevelDef;
use crate::regions::GroundRegionMap;
use crate::settings::{CameraSettings, SimSettings};
use crate::simulator::{Simulator, TickOutcome, TickReport};

pub struct Session {
    simulator: Simulator,
    camera: CameraRig,
    dispatcher: EventDispatcher,
    input: InputAggregator,
    regions: GroundRegionMap,
    clock: FrameClock,
}

impl Session {
    pub fn load(
        level: LevelDef,
        settings: SimSettings,
        camera: CameraSettings,
        dispatcher: EventDispatcher,
    ) -> Result<Self, LevelError> {
        let loaded = level.load()?;
        Ok(Self {
            simulator: Simulator::new(loaded.world, &loaded.start, settings),
            camera: CameraRig::new(camera),
            dispatcher,
            input: InputAggregator::new(),
            regions: loaded.regions,
            clock: FrameClock::new(),
        })
    }

    /// Replace the opening camera sweep with a rig already at rest.
    pub fn skip_intro(mut self, camera: CameraSettings) -> Self {
        self.camera = CameraRig::without_intro(camera);
        self
    }

    /// Run one frame at render time `now` (seconds).
    ///
    /// Order: time sample, simulation tick, camera follow, event delivery.
    pub fn frame(&mut self, now: f64, source: &dyn DirectionSource) -> TickReport {
        let raw_dt = self.clock.sample(now);
        let direction = self.input.current_direction(source, self.camera.orientation());
        let report = self.simulator.tick(raw_dt, direction);

        if report.outcome == TickOutcome::Advanced {
            self.camera.observe_region(
                report.region,
                &self.simulator.character().position,
                &self.regions,
            );
        }
        self.camera.update(report.dt);

        let ctx = DispatchContext {
            character_position: self.simulator.character().position,
            progress: self.simulator.progress(),
            world: self.simulator.world(),
        };
        self.dispatcher.dispatch(&report.events, &ctx);

        if report.events.contains(&DomainEvent::LevelComplete) {
            self.camera.begin_victory_orbit();
            self.dispatcher
                .set_continuous_volume(AudioChannel::Flamethrower, 0.0);
        } else if let Some(intensity) = report.enemy_intensity {
            let volume = self.simulator.settings().enemy_max_volume * intensity;
            self.dispatcher
                .set_continuous_volume(AudioChannel::Flamethrower, volume);
        }

        report
    }

    /// Pointer drag. Returns false while the camera is locked.
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        let accepted = self.camera.pan(dx, dy);
        if accepted {
            self.input.invalidate();
        }
        accepted
    }

    pub fn character(&self) -> &Character {
        self.simulator.character()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    pub fn progress(&self) -> PickupProgress {
        self.simulator.progress()
    }

    pub fn is_complete(&self) -> bool {
        self.simulator.is_complete()
    }
}
