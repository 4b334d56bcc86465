//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin,
};
use bevy::prelude::*;

use crate::game::Game;

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        LogDiagnosticsPlugin::default(),
    ));

    app.add_systems(Update, log_character_state);
}

/// F3 dumps the character state to the log.
fn log_character_state(keys: Res<ButtonInput<KeyCode>>, game: Option<Res<Game>>) {
    if !keys.just_pressed(KeyCode::F3) {
        return;
    }
    let Some(game) = game else {
        return;
    };
    let character = game.0.character();
    debug!(
        position = ?character.position,
        floor = ?character.floor,
        status = ?character.status,
        region = ?game.0.camera().current_region(),
        "character state"
    );
}
