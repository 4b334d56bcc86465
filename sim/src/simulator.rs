use crate::category::{Category, character_contact_mask};
use crate::character::Character;
use crate::clock::clamp_delta_time;
use crate::contact::ContactTracker;
use crate::events::{DomainEvent, PickupProgress, translate_contacts};
use crate::floor::{FloorMaterial, probe_floor};
use crate::footsteps::WalkCycle;
use crate::penetration::resolve_penetration;
use crate::proximity::{enemy_intensity, nearest_distance};
use crate::settings::SimSettings;
use crate::types::{Iso, RegionId, Vec3};
use crate::world::{CharacterShape, CollisionWorld};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// Nothing below the character: the move was undone and the tick skipped.
    Reverted,
}

/// Summary of one simulation tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// Clamped delta time the tick ran with.
    pub dt: f32,
    pub floor: FloorMaterial,
    pub region: Option<RegionId>,
    pub correction: Option<Vec3>,
    /// Flamethrower closeness in `[0, 1]`; `None` without enemies or after completion.
    pub enemy_intensity: Option<f32>,
    pub events: Vec<DomainEvent>,
}

/// Vertical state after one integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalStep {
    pub y: f32,
    pub accel: f32,
    pub airborne: bool,
}

/// Fall toward `ground_y` or snap onto it.
///
/// Above the ground the accumulator grows by `dt * gravity` and is subtracted from `y`
/// every tick. Landing on or below the ground snaps to it and resets the accumulator.
pub fn integrate_vertical(
    y: f32,
    accel: f32,
    ground_y: f32,
    dt: f32,
    settings: &SimSettings,
) -> VerticalStep {
    let mut accel = accel;
    let mut airborne = false;

    if ground_y < y - settings.ground_epsilon {
        accel += dt * settings.gravity;
        airborne = ground_y < y - settings.air_drop_threshold;
    } else {
        accel = 0.0;
    }

    let mut y = y - accel;
    if ground_y > y {
        y = ground_y;
        accel = 0.0;
    }

    VerticalStep { y, accel, airborne }
}

/// Owns the character and the level and advances them one tick at a time.
pub struct Simulator {
    settings: SimSettings,
    world: CollisionWorld,
    shape: CharacterShape,
    character: Character,
    tracker: ContactTracker,
    walk_cycle: WalkCycle,
    progress: PickupProgress,
    enemies: Vec<Vec3>,
    complete: bool,
}

impl Simulator {
    pub fn new(world: CollisionWorld, start: &Iso, settings: SimSettings) -> Self {
        let forward = start.rotation * Vec3::z();
        let character = Character::new(start.translation.vector, forward.x.atan2(forward.z));
        let enemies = world.positions_of(Category::Enemy);

        Self {
            shape: CharacterShape::from_settings(&settings),
            progress: PickupProgress::new(settings.flowers_to_complete),
            settings,
            world,
            character,
            tracker: ContactTracker::default(),
            walk_cycle: WalkCycle::new(),
            enemies,
            complete: false,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn progress(&self) -> PickupProgress {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Apply an enemy hit. Returns false while invincible.
    pub fn hit(&mut self) -> bool {
        self.character
            .status
            .hit(self.settings.invincibility_seconds)
    }

    /// Put out the fire. Returns true if the character was burning.
    pub fn extinguish(&mut self) -> bool {
        self.character.status.extinguish()
    }

    /// Advance one tick with the camera-relative `direction` (unit planar or zero).
    pub fn tick(&mut self, raw_dt: f32, direction: Vec3) -> TickReport {
        let s = self.settings;
        let dt = clamp_delta_time(raw_dt, s.min_delta_time, s.max_delta_time);

        self.character.status.advance(dt);

        // ---------------------------------------------------------------------------------------------------------
        // Horizontal move
        // ---------------------------------------------------------------------------------------------------------
        let start = self.character.position;
        let speed = s.base_speed * self.character.status.speed_multiplier(s.burning_speed_multiplier);
        if s.movement_gate.should_move(&direction) {
            self.character.position += direction * (dt * speed);
            self.character.facing = direction.x.atan2(direction.z);
            self.character.walking = true;
        } else {
            self.character.walking = false;
        }

        // ---------------------------------------------------------------------------------------------------------
        // Ground probe
        // ---------------------------------------------------------------------------------------------------------
        let Some(reading) = probe_floor(&self.world, &s, &self.character.position) else {
            log::debug!(
                "no ground below {:?}, reverting to {:?}",
                self.character.position,
                start
            );
            self.character.position = start;
            self.character.floor = FloorMaterial::InAir;
            return TickReport {
                outcome: TickOutcome::Reverted,
                dt,
                floor: self.character.floor,
                region: None,
                correction: None,
                enemy_intensity: None,
                events: Vec::new(),
            };
        };

        let mut events = Vec::new();
        if reading.material == FloorMaterial::Water && self.character.status.extinguish() {
            events.push(DomainEvent::Submerge);
        }

        // ---------------------------------------------------------------------------------------------------------
        // Gravity and ground snap
        // ---------------------------------------------------------------------------------------------------------
        let step = integrate_vertical(
            self.character.position.y,
            self.character.vertical_accel,
            reading.ground_y,
            dt,
            &s,
        );
        self.character.position.y = step.y;
        self.character.vertical_accel = step.accel;
        self.character.floor = if step.airborne {
            FloorMaterial::InAir
        } else {
            reading.material
        };

        // ---------------------------------------------------------------------------------------------------------
        // Footsteps
        // ---------------------------------------------------------------------------------------------------------
        if self.character.walking {
            let cycles = dt * speed / s.walk_cycle_seconds;
            let steps = self.walk_cycle.advance(cycles, &s.footstep_key_times);
            // The cycle keeps running in the air; only landed feet make a sound.
            if self.character.floor != FloorMaterial::InAir {
                let material = self.character.floor;
                events.extend((0..steps).map(|_| DomainEvent::Footstep { material }));
            }
        } else {
            self.walk_cycle.reset();
        }

        // ---------------------------------------------------------------------------------------------------------
        // Contacts and penetration
        // ---------------------------------------------------------------------------------------------------------
        let mut contacts =
            self.world
                .contacts(&self.shape, &self.character.position, character_contact_mask());
        self.tracker.update(&mut contacts);

        let correction = resolve_penetration(&contacts);
        if let Some(offset) = correction {
            self.character.position += offset;
        }

        // ---------------------------------------------------------------------------------------------------------
        // Enemy proximity
        // ---------------------------------------------------------------------------------------------------------
        let intensity = if self.complete {
            None
        } else {
            nearest_distance(&self.character.position, &self.enemies)
                .map(|d| enemy_intensity(d, s.enemy_near_distance, s.enemy_fade_range))
        };

        // ---------------------------------------------------------------------------------------------------------
        // Domain events
        // ---------------------------------------------------------------------------------------------------------
        for event in translate_contacts(&contacts, self.character.is_invincible()) {
            match event {
                DomainEvent::Hit { .. } => {
                    if !self.hit() {
                        continue;
                    }
                    events.push(event);
                }
                DomainEvent::PickupSmall { collider } => {
                    self.world.deactivate(collider);
                    self.tracker.forget(collider);
                    self.progress.pearls += 1;
                    events.push(event);
                }
                DomainEvent::PickupMajor { collider } => {
                    self.world.deactivate(collider);
                    self.tracker.forget(collider);
                    self.progress.flowers += 1;
                    events.push(event);

                    if !self.complete && self.progress.is_complete() {
                        self.complete = true;
                        log::info!("level complete after {} flowers", self.progress.flowers);
                        events.push(DomainEvent::LevelComplete);
                    }
                }
                DomainEvent::Submerge | DomainEvent::LevelComplete | DomainEvent::Footstep { .. } => {
                    events.push(event)
                }
            }
        }

        TickReport {
            outcome: TickOutcome::Advanced,
            dt,
            floor: self.character.floor,
            region: reading.region,
            correction,
            enemy_intensity: intensity,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Surface;
    use crate::constants::MIN_DELTA_TIME;
    use crate::input::MovementGate;
    use crate::types::ColliderId;
    use crate::world::{ColliderDef, ColliderShapeDef};
    use rapier3d::prelude::vector;

    fn floor_slab() -> ColliderDef {
        ColliderDef::new(
            1,
            Category::Ground,
            vector![0.0, -0.5, 0.0],
            ColliderShapeDef::Cuboid {
                half_extents: vector![20.0, 0.5, 20.0],
            },
        )
        .with_surface(Surface::Grass)
        .in_region(RegionId(1))
    }

    fn simulator(defs: Vec<ColliderDef>, start: Vec3) -> Simulator {
        let world = CollisionWorld::build(defs).unwrap();
        Simulator::new(world, &Iso::translation(start.x, start.y, start.z), SimSettings::default())
    }

    fn diagonal() -> Vec3 {
        Vec3::new(1.0, 0.0, 1.0).normalize()
    }

    #[test]
    fn diagonal_step_matches_base_speed() {
        let mut sim = simulator(vec![floor_slab()], Vec3::zeros());
        let report = sim.tick(MIN_DELTA_TIME, diagonal());

        assert_eq!(report.outcome, TickOutcome::Advanced);
        let p = sim.character().position;
        assert!((p.x - 0.0181).abs() < 1.0e-4);
        assert!((p.z - 0.0181).abs() < 1.0e-4);
        assert!(p.y.abs() < 1.0e-6);
        assert!(sim.character().walking);
        assert_eq!(report.floor, FloorMaterial::Grass);
        assert_eq!(report.region, Some(RegionId(1)));
    }

    #[test]
    fn axis_aligned_input_does_not_move_by_default() {
        let mut sim = simulator(vec![floor_slab()], Vec3::zeros());
        sim.tick(MIN_DELTA_TIME, Vec3::x());
        assert_eq!(sim.character().position, Vec3::zeros());
        assert!(!sim.character().walking);

        let world = CollisionWorld::build(vec![floor_slab()]).unwrap();
        let settings = SimSettings {
            movement_gate: MovementGate::AnyDirection,
            ..SimSettings::default()
        };
        let mut free = Simulator::new(world, &Iso::identity(), settings);
        free.tick(MIN_DELTA_TIME, Vec3::x());
        assert!(free.character().position.x > 0.0);
    }

    #[test]
    fn out_of_bounds_move_is_reverted_exactly() {
        let start = Vec3::new(19.99, 0.0, 19.99);
        let mut sim = simulator(vec![floor_slab()], start);
        let report = sim.tick(0.5, diagonal());

        assert_eq!(report.outcome, TickOutcome::Reverted);
        assert!(report.events.is_empty());
        assert_eq!(sim.character().position.x.to_bits(), start.x.to_bits());
        assert_eq!(sim.character().position.y.to_bits(), start.y.to_bits());
        assert_eq!(sim.character().position.z.to_bits(), start.z.to_bits());
    }

    #[test]
    fn nothing_below_reads_as_in_air() {
        let far_ground = ColliderDef::new(
            1,
            Category::Ground,
            vector![100.0, -0.5, 0.0],
            ColliderShapeDef::Cuboid {
                half_extents: vector![5.0, 0.5, 5.0],
            },
        );
        let mut sim = simulator(vec![far_ground], Vec3::zeros());
        assert_eq!(sim.character().floor, FloorMaterial::Rock);

        let report = sim.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert_eq!(report.outcome, TickOutcome::Reverted);
        assert_eq!(report.floor, FloorMaterial::InAir);
        assert_eq!(sim.character().floor, FloorMaterial::InAir);
        assert_eq!(sim.character().position, Vec3::zeros());
    }

    #[test]
    fn drop_beyond_threshold_is_airborne() {
        let mut sim = simulator(vec![floor_slab()], Vec3::new(0.0, 0.5, 0.0));
        let report = sim.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert_eq!(report.floor, FloorMaterial::InAir);
        assert!(sim.character().vertical_accel > 0.0);
        assert!(sim.character().position.y < 0.5);
    }

    #[test]
    fn integration_snaps_up_to_ground() {
        let s = SimSettings::default();
        let step = integrate_vertical(-0.05, 0.2, 0.0, MIN_DELTA_TIME, &s);
        assert_eq!(step.y, 0.0);
        assert_eq!(step.accel, 0.0);
        assert!(!step.airborne);

        let small = integrate_vertical(0.1, 0.0, 0.0, MIN_DELTA_TIME, &s);
        assert!(!small.airborne);
        assert!(small.accel > 0.0);
    }

    #[test]
    fn water_extinguishes_and_uses_ground_beneath() {
        let water = ColliderDef::new(
            2,
            Category::Water,
            vector![0.0, 0.1, 0.0],
            ColliderShapeDef::Cuboid {
                half_extents: vector![3.0, 0.1, 3.0],
            },
        );
        let mut sim = simulator(vec![floor_slab(), water], Vec3::zeros());
        assert!(sim.hit());

        let report = sim.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert_eq!(report.floor, FloorMaterial::Water);
        assert_eq!(report.events, vec![DomainEvent::Submerge]);
        assert!(!sim.character().is_burning());
        assert!(sim.character().is_invincible());
        assert!(sim.character().position.y.abs() < 1.0e-4);

        // Already out: no second Submerge.
        let again = sim.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert!(again.events.is_empty());
    }

    #[test]
    fn wall_pushes_character_out_horizontally() {
        let wall = ColliderDef::new(
            3,
            Category::Wall,
            vector![1.5, 1.0, 0.0],
            ColliderShapeDef::Cuboid {
                half_extents: vector![0.5, 2.0, 2.0],
            },
        );
        let mut sim = simulator(vec![floor_slab(), wall], Vec3::new(0.9, 0.0, 0.0));
        let report = sim.tick(MIN_DELTA_TIME, Vec3::zeros());

        let correction = report.correction.unwrap();
        assert!((correction.x + 0.15).abs() < 1.0e-3);
        assert_eq!(correction.y, 0.0);
        assert!((sim.character().position.x - 0.75).abs() < 1.0e-3);
    }

    #[test]
    fn enemy_hits_once_then_invincibility_blocks() {
        let flame = ColliderDef::new(
            4,
            Category::Enemy,
            vector![0.0, 0.5, 0.0],
            ColliderShapeDef::Sphere { radius: 0.3 },
        );
        let mut sim = simulator(vec![floor_slab(), flame], Vec3::zeros());

        let first = sim.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert_eq!(first.events, vec![DomainEvent::Hit { enemy: ColliderId(4) }]);
        assert_eq!(first.enemy_intensity, Some(1.0));
        assert!(sim.character().is_burning());

        let remaining = sim.character().status.invincible_remaining;
        let held = sim.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert!(held.events.is_empty());
        assert!(sim.character().status.invincible_remaining < remaining);
    }

    #[test]
    fn third_flower_completes_the_level() {
        let flower = |id: u32, x: f32| {
            ColliderDef::new(
                id,
                Category::SuperCollectible,
                vector![x, 0.5, 0.0],
                ColliderShapeDef::Sphere { radius: 0.2 },
            )
        };
        let pearl = ColliderDef::new(
            20,
            Category::Collectible,
            vector![0.0, 0.5, 0.0],
            ColliderShapeDef::Sphere { radius: 0.2 },
        );
        let mut sim = simulator(
            vec![floor_slab(), flower(10, 0.0), flower(11, 0.1), flower(12, 5.0), pearl],
            Vec3::zeros(),
        );

        let report = sim.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert_eq!(sim.progress().flowers, 2);
        assert_eq!(sim.progress().pearls, 1);
        assert!(!report.events.contains(&DomainEvent::LevelComplete));

        // Picked items are gone for good.
        let quiet = sim.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert!(quiet.events.is_empty());

        let mut far = simulator(vec![floor_slab(), flower(12, 5.0)], Vec3::new(5.0, 0.0, 0.0));
        far.progress.flowers = 2;
        let done = far.tick(MIN_DELTA_TIME, Vec3::zeros());
        assert_eq!(
            done.events,
            vec![
                DomainEvent::PickupMajor { collider: ColliderId(12) },
                DomainEvent::LevelComplete
            ]
        );
        assert!(far.is_complete());
    }

    #[test]
    fn burning_character_moves_faster() {
        let mut calm = simulator(vec![floor_slab()], Vec3::zeros());
        let mut burning = simulator(vec![floor_slab()], Vec3::zeros());
        burning.hit();

        calm.tick(MIN_DELTA_TIME, diagonal());
        burning.tick(MIN_DELTA_TIME, diagonal());
        let ratio = burning.character().position.x / calm.character().position.x;
        assert!((ratio - 2.3).abs() < 1.0e-3);
    }

    fn footsteps(report: &TickReport) -> Vec<FloorMaterial> {
        report
            .events
            .iter()
            .filter_map(|event| match event {
                DomainEvent::Footstep { material } => Some(*material),
                _ => None,
            })
            .collect()
    }

    fn walk(sim: &mut Simulator, ticks: usize, direction: Vec3) -> Vec<FloorMaterial> {
        (0..ticks)
            .flat_map(|_| footsteps(&sim.tick(MIN_DELTA_TIME, direction)))
            .collect()
    }

    #[test]
    fn walking_on_grass_plays_two_steps_per_cycle() {
        let mut sim = simulator(vec![floor_slab()], Vec3::zeros());
        // One second at the base rate is about 1.54 cycles: keys 0.1, 0.6 and 1.1.
        let steps = walk(&mut sim, 60, diagonal());
        assert_eq!(steps, vec![FloorMaterial::Grass; 3]);
    }

    #[test]
    fn wading_plays_water_steps() {
        let water = ColliderDef::new(
            2,
            Category::Water,
            vector![0.0, 0.1, 0.0],
            ColliderShapeDef::Cuboid {
                half_extents: vector![3.0, 0.1, 3.0],
            },
        );
        let mut sim = simulator(vec![floor_slab(), water], Vec3::zeros());
        let steps = walk(&mut sim, 60, diagonal());
        assert_eq!(steps, vec![FloorMaterial::Water; 3]);
    }

    #[test]
    fn no_steps_in_the_air_or_standing_still() {
        let mut falling = simulator(vec![floor_slab()], Vec3::new(0.0, 0.5, 0.0));
        // Still more than the air threshold above ground after ten ticks, while the
        // cycle passes its first key.
        assert!(walk(&mut falling, 10, diagonal()).is_empty());
        assert_eq!(falling.character().floor, FloorMaterial::InAir);

        let mut idle = simulator(vec![floor_slab()], Vec3::zeros());
        assert!(walk(&mut idle, 120, Vec3::zeros()).is_empty());
        // Rejected by the diagonal gate, so not walking either.
        assert!(walk(&mut idle, 120, Vec3::x()).is_empty());
    }

    #[test]
    fn burning_speeds_up_the_cadence() {
        let mut sim = simulator(vec![floor_slab()], Vec3::zeros());
        sim.hit();
        // About 3.54 cycles: keys 0.1 through 3.1.
        let steps = walk(&mut sim, 60, diagonal());
        assert_eq!(steps.len(), 7);
    }
}
