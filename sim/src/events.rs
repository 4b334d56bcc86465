/*!
Contact to domain event translation and delivery to the host's collaborators.

The simulator produces [`DomainEvent`]s from this tick's contacts; the
[`EventDispatcher`] turns them into sound cues and visual effects for the
registered [`AudioSink`] and [`EffectsSink`]. Both sinks are fire-and-forget.
*/

use std::collections::HashSet;

use crate::category::Category;
use crate::contact::{Body, ContactEvent, ContactPhase};
use crate::floor::FloorMaterial;
use crate::types::{ColliderId, Vec3};
use crate::world::CollisionWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    /// An enemy touched a vulnerable character.
    Hit { enemy: ColliderId },
    /// A pearl was collected.
    PickupSmall { collider: ColliderId },
    /// A flower was collected.
    PickupMajor { collider: ColliderId },
    /// A burning character stepped into water.
    Submerge,
    /// The last required flower was collected.
    LevelComplete,
    /// A foot landed while walking on `material`. Never `InAir`.
    Footstep { material: FloorMaterial },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Hit,
    Extinguish,
    /// Relief after the fire goes out, queued behind `Extinguish`.
    Aah,
    CollectPearl,
    CollectFlower,
    Victory,
    /// Grass, rock or splash step, picked by the floor.
    Footstep(FloorMaterial),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioChannel {
    Flamethrower,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    CollectSparkle,
    Smoke,
    Fire,
    Confetti,
}

/// Collected counts shown by the HUD.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickupProgress {
    pub pearls: u32,
    pub flowers: u32,
    pub flowers_required: u32,
}

impl PickupProgress {
    pub fn new(flowers_required: u32) -> Self {
        Self {
            flowers_required,
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.flowers >= self.flowers_required
    }
}

pub trait AudioSink: Send + Sync {
    fn play(&self, cue: SoundCue);
    fn set_continuous_volume(&self, channel: AudioChannel, volume: f32);
}

pub trait EffectsSink: Send + Sync {
    fn emit(&self, effect: EffectKind, position: Vec3);
    fn notify_pickup_progress(&self, progress: PickupProgress);
}

/// Confetti origin on level completion.
const CONFETTI_POSITION: Vec3 = Vec3::new(0.0, 8.0, 0.0);
/// Sparkles appear slightly above the collected flower.
const SPARKLE_LIFT: f32 = 0.1;

/// Turn this tick's contacts into domain events.
///
/// At most one event per collider, whichever order the pair was reported in. Enemy
/// contacts only count on the tick they begin, and not at all while `invincible`.
pub fn translate_contacts(contacts: &[ContactEvent], invincible: bool) -> Vec<DomainEvent> {
    let mut seen = HashSet::new();
    let mut events = Vec::new();

    for contact in contacts {
        let Some((other, _)) = contact.against_character() else {
            continue;
        };
        let Body::Static(id) = other.body else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }

        let event = match other.category {
            Category::Collectible => DomainEvent::PickupSmall { collider: id },
            Category::SuperCollectible => DomainEvent::PickupMajor { collider: id },
            Category::Enemy if contact.phase == ContactPhase::Began && !invincible => {
                DomainEvent::Hit { enemy: id }
            }
            _ => continue,
        };
        events.push(event);
    }
    events
}

/// What the dispatcher needs to know about the scene to place effects.
pub struct DispatchContext<'a> {
    pub character_position: Vec3,
    pub progress: PickupProgress,
    pub world: &'a CollisionWorld,
}

/// Forwards domain events to the registered collaborators.
#[derive(Default)]
pub struct EventDispatcher {
    audio: Vec<Box<dyn AudioSink>>,
    effects: Vec<Box<dyn EffectsSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audio(mut self, sink: impl AudioSink + 'static) -> Self {
        self.audio.push(Box::new(sink));
        self
    }

    pub fn with_effects(mut self, sink: impl EffectsSink + 'static) -> Self {
        self.effects.push(Box::new(sink));
        self
    }

    pub fn dispatch(&self, events: &[DomainEvent], ctx: &DispatchContext<'_>) {
        let mut progress_changed = false;

        for event in events {
            match *event {
                DomainEvent::Hit { .. } => {
                    self.play(SoundCue::Hit);
                    self.emit(EffectKind::Fire, ctx.character_position);
                }
                DomainEvent::PickupSmall { .. } => {
                    self.play(SoundCue::CollectPearl);
                    progress_changed = true;
                }
                DomainEvent::PickupMajor { collider } => {
                    self.play(SoundCue::CollectFlower);
                    if let Some(mut position) = ctx.world.position_of(collider) {
                        position.y += SPARKLE_LIFT;
                        self.emit(EffectKind::CollectSparkle, position);
                    }
                    progress_changed = true;
                }
                DomainEvent::Submerge => {
                    self.play(SoundCue::Extinguish);
                    self.play(SoundCue::Aah);
                    self.emit(EffectKind::Smoke, ctx.character_position);
                }
                DomainEvent::LevelComplete => {
                    self.play(SoundCue::Victory);
                    self.emit(EffectKind::Confetti, CONFETTI_POSITION);
                }
                DomainEvent::Footstep { material } => self.play(SoundCue::Footstep(material)),
            }
        }

        if progress_changed {
            for sink in &self.effects {
                sink.notify_pickup_progress(ctx.progress);
            }
        }
    }

    pub fn set_continuous_volume(&self, channel: AudioChannel, volume: f32) {
        for sink in &self.audio {
            sink.set_continuous_volume(channel, volume);
        }
    }

    fn play(&self, cue: SoundCue) {
        for sink in &self.audio {
            sink.play(cue);
        }
    }

    fn emit(&self, effect: EffectKind, position: Vec3) {
        for sink in &self.effects {
            sink.emit(effect, position);
        }
    }
}
