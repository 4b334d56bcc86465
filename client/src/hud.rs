use bevy::prelude::*;

use crate::feedback::FeedbackChannels;
use crate::game::Game;

#[derive(Component)]
struct Hud;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud);
    app.add_systems(PostUpdate, update_hud);
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Hud,
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn update_hud(
    game: Option<Res<Game>>,
    channels: Res<FeedbackChannels>,
    mut hud: Single<&mut Text, With<Hud>>,
) {
    let Some(game) = game else {
        return;
    };
    let progress = channels
        .latest_progress()
        .unwrap_or_else(|| game.0.progress());

    let mut line = format!(
        "Pearls {}   Flowers {}/{}",
        progress.pearls, progress.flowers, progress.flowers_required
    );
    let heat = channels.flame_volume();
    if heat > 0.0 {
        line.push_str(&format!("   Heat {:.0}%", heat / sim::constants::ENEMY_MAX_VOLUME * 100.0));
    }
    if game.0.is_complete() {
        line.push_str("\nCongratulations!");
    }
    hud.0 = line;
}
