use bevy::prelude::*;
use bevy::window::WindowResolution;
use racket_rampage::{audio, config, graphics, input, menu, rendering, simulation};
use std::env;

fn main() {
    // Skip the start screen, e.g. for quick playtesting.
    let skip_menu = env::var("RACKET_RAMPAGE_PLAY").is_ok();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Racket Rampage".into(),
            resolution: WindowResolution::new(1280, 720),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.53, 0.75, 0.92)))
    // Insert GameConfig with compiled defaults; load_game_config will
    // overwrite it from assets/game.toml (if present) in the Startup schedule.
    .insert_resource(config::GameConfig::default())
    .add_plugins(menu::MainMenuPlugin)
    .add_plugins(simulation::SimulationPlugin)
    .add_plugins(input::PlayerInputPlugin)
    .add_plugins(audio::GameAudioPlugin)
    .add_plugins(rendering::GameRenderingPlugin)
    .add_systems(
        Startup,
        (
            // Load config first so every other startup system sees the final values.
            config::load_game_config,
            graphics::setup_camera.after(config::load_game_config),
            graphics::setup_court.after(config::load_game_config),
        ),
    );

    if skip_menu {
        app.insert_state(menu::GameState::Playing);
        println!("ℹ RACKET_RAMPAGE_PLAY set; starting straight into the match");
    }

    app.run();
}
