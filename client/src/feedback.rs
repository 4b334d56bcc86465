//! Audio and effects collaborators for the simulation.
//!
//! The simulation calls its sinks synchronously from inside `Session::frame`, where no
//! ECS access is available. Cues are logged straight away; effects and progress are
//! queued in shared buffers that regular systems drain afterwards.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use sim::{AudioChannel, AudioSink, EffectKind, EffectsSink, PickupProgress, SoundCue};

use crate::transform::to_vec3;

/// How long an effect burst stays on screen (seconds).
const BURST_LIFETIME: f32 = 0.6;

#[derive(Resource, Clone, Default)]
pub struct FeedbackChannels {
    effects: Arc<Mutex<Vec<(EffectKind, sim::Vec3)>>>,
    progress: Arc<Mutex<Option<PickupProgress>>>,
    flame_volume: Arc<Mutex<f32>>,
}

impl FeedbackChannels {
    /// Most recent progress reported by the simulation, if any.
    pub fn latest_progress(&self) -> Option<PickupProgress> {
        self.progress.lock().ok().and_then(|p| *p)
    }

    pub fn flame_volume(&self) -> f32 {
        self.flame_volume.lock().map(|v| *v).unwrap_or_default()
    }

    fn drain_effects(&self) -> Vec<(EffectKind, sim::Vec3)> {
        self.effects
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

/// Logs sound cues and publishes the flamethrower volume for the HUD.
pub struct LoggingAudio {
    channels: FeedbackChannels,
}

impl LoggingAudio {
    pub fn new(channels: &FeedbackChannels) -> Self {
        Self {
            channels: channels.clone(),
        }
    }
}

impl AudioSink for LoggingAudio {
    fn play(&self, cue: SoundCue) {
        match cue {
            SoundCue::Footstep(material) => debug!(?material, "footstep"),
            _ => info!(?cue, "play sound"),
        }
    }

    fn set_continuous_volume(&self, channel: AudioChannel, volume: f32) {
        trace!(?channel, volume, "continuous volume");
        if let Ok(mut current) = self.channels.flame_volume.lock() {
            *current = volume;
        }
    }
}

pub struct QueuedEffects {
    channels: FeedbackChannels,
}

impl QueuedEffects {
    pub fn new(channels: &FeedbackChannels) -> Self {
        Self {
            channels: channels.clone(),
        }
    }
}

impl EffectsSink for QueuedEffects {
    fn emit(&self, effect: EffectKind, position: sim::Vec3) {
        if let Ok(mut queue) = self.channels.effects.lock() {
            queue.push((effect, position));
        }
    }

    fn notify_pickup_progress(&self, progress: PickupProgress) {
        info!(
            pearls = progress.pearls,
            flowers = progress.flowers,
            "pickup progress"
        );
        if let Ok(mut latest) = self.channels.progress.lock() {
            *latest = Some(progress);
        }
    }
}

#[derive(Component)]
struct Burst {
    expires_at: f32,
    growth: f32,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<FeedbackChannels>();
    app.add_systems(PostUpdate, (spawn_bursts, grow_and_expire_bursts));
}

fn spawn_bursts(
    mut commands: Commands,
    channels: Res<FeedbackChannels>,
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (effect, position) in channels.drain_effects() {
        let (color, radius, growth) = match effect {
            EffectKind::CollectSparkle => (Color::srgb(1.0, 0.9, 0.4), 0.15, 3.0),
            EffectKind::Smoke => (Color::srgba(0.95, 0.95, 0.95, 0.6), 0.3, 2.0),
            EffectKind::Fire => (Color::srgb(1.0, 0.35, 0.05), 0.25, 2.5),
            EffectKind::Confetti => (Color::srgb(0.9, 0.3, 0.8), 0.5, 6.0),
        };
        commands.spawn((
            Burst {
                expires_at: time.elapsed_secs() + BURST_LIFETIME,
                growth,
            },
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: color.to_linear() * 2.0,
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(to_vec3(&position)),
        ));
    }
}

fn grow_and_expire_bursts(
    mut commands: Commands,
    time: Res<Time>,
    mut bursts: Query<(Entity, &Burst, &mut Transform)>,
) {
    let now = time.elapsed_secs();
    for (entity, burst, mut transform) in &mut bursts {
        if now >= burst.expires_at {
            commands.entity(entity).despawn();
            continue;
        }
        transform.scale += Vec3::splat(burst.growth * time.delta_secs());
    }
}
