//! Simulation plugin: owns the [`Game`] resource and ticks it once per frame.
//!
//! | System             | Schedule                 | Purpose                                  |
//! |--------------------|--------------------------|------------------------------------------|
//! | `init_game`        | Startup                  | Build `Game` from the loaded `GameConfig` |
//! | `game_tick_system` | Update / in `Playing`    | Advance the match, publish `GameEvent`s  |
//!
//! Everything downstream (audio, HUD, scene sync) reads `GameEvent` messages
//! and the `Game` accessors after `game_tick_system`.

use crate::config::{load_game_config, GameConfig};
use crate::events::GameEvent;
use crate::game::{FrameInput, Game};
use crate::menu::GameState;
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameEvent>()
            .init_resource::<FrameInput>()
            .add_systems(Startup, init_game.after(load_game_config))
            .add_systems(
                Update,
                game_tick_system.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Build the match from the final config.  A `Game` inserted ahead of time
/// (tests do this to script the RNG) is left alone.
pub fn init_game(mut commands: Commands, config: Res<GameConfig>, existing: Option<Res<Game>>) {
    if existing.is_some() {
        return;
    }
    commands.insert_resource(Game::new(&config));
    println!(
        "✓ Match ready: {} Kadosh on a {}×{} court",
        config.enemy_count, config.ground_size, config.ground_size
    );
}

/// Advance the match by this frame's delta and publish what happened.
pub fn game_tick_system(
    time: Res<Time>,
    input: Res<FrameInput>,
    game: Option<ResMut<Game>>,
    mut events: MessageWriter<GameEvent>,
) {
    let Some(mut game) = game else {
        return;
    };
    let produced = game.update(time.delta_secs(), &input);
    for event in produced {
        if event == GameEvent::PlayerDied {
            warn!("Game over with {} kills; hold fire to restart", game.kills());
        }
        events.write(event);
    }
}
