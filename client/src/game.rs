//! Owns the simulation session and runs it once per rendered frame.

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use sim::{CameraSettings, EventDispatcher, LevelDef, Session, SimSettings, TickOutcome};

use crate::feedback::{FeedbackChannels, LoggingAudio, QueuedEffects};
use crate::input::{ActionDirection, InputAction};
use crate::level::demo_level;

/// The running level. Absent if the level failed to load.
#[derive(Resource)]
pub struct Game(pub Session);

/// Static layout of the loaded level, kept for rendering.
#[derive(Resource)]
pub struct LevelLayout(pub LevelDef);

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(LevelLayout(demo_level()));
    app.add_systems(Startup, start_session);
    app.add_systems(Update, run_frame);
}

fn start_session(
    mut commands: Commands,
    layout: Res<LevelLayout>,
    channels: Res<FeedbackChannels>,
) {
    let dispatcher = EventDispatcher::new()
        .with_audio(LoggingAudio::new(&channels))
        .with_effects(QueuedEffects::new(&channels));

    match Session::load(
        layout.0.clone(),
        SimSettings::default(),
        CameraSettings::default(),
        dispatcher,
    ) {
        Ok(session) => {
            info!("session started");
            commands.insert_resource(Game(session));
        }
        Err(err) => error!("unable to load level: {err}"),
    }
}

pub(crate) fn run_frame(
    time: Res<Time>,
    actions: Res<ActionState<InputAction>>,
    game: Option<ResMut<Game>>,
) {
    let Some(mut game) = game else {
        return;
    };

    let report = game
        .0
        .frame(time.elapsed_secs_f64(), &ActionDirection(&actions));
    if report.outcome == TickOutcome::Reverted {
        debug!("tick reverted at the level edge");
    }
}
