//! Headless tests for the [`GameState`] state machine and the simulation tick.
//!
//! These tests use [`MinimalPlugins`] (no window, no rendering, no audio)
//! so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `MainMenu`, and a `NextState` request moves to `Playing`.
//! 2. `Game` is built at startup from the `GameConfig` resource.
//! 3. The tick is inactive in `MainMenu` and advances simulated time in `Playing`.
//! 4. `FrameInput` written by a test reaches the game and comes back as `GameEvent` messages.
//! 5. A `Game` inserted before startup is kept (scripted-RNG path).

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use racket_rampage::config::GameConfig;
use racket_rampage::events::GameEvent;
use racket_rampage::game::{FrameInput, Game};
use racket_rampage::menu::GameState;
use racket_rampage::simulation::{game_tick_system, SimulationPlugin};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Every `GameEvent` seen since the app started.
#[derive(Resource, Default)]
struct EventLog(Vec<GameEvent>);

fn record_events(mut reader: MessageReader<GameEvent>, mut log: ResMut<EventLog>) {
    log.0.extend(reader.read().copied());
}

/// Minimal headless app: state machine, seeded config, simulation plugin, and
/// an event recorder.  No input devices; tests write `FrameInput` directly.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.insert_resource(GameConfig {
        rng_seed: Some(99),
        ..GameConfig::default()
    });
    app.init_resource::<EventLog>();
    app.add_plugins(SimulationPlugin);
    app.add_systems(Update, record_events.after(game_tick_system));
    app
}

fn start_playing(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();
}

fn game_time(app: &App) -> f64 {
    app.world().resource::<Game>().now()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn default_state_is_main_menu() {
    let mut app = headless_app();
    app.update();
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::MainMenu, "initial state must be MainMenu");
}

#[test]
fn transition_main_menu_to_playing() {
    let mut app = headless_app();
    app.update();
    start_playing(&mut app);
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::Playing);
}

#[test]
fn game_is_built_from_config_at_startup() {
    let mut app = headless_app();
    app.update();
    let game = app.world().resource::<Game>();
    assert_eq!(game.enemies().enemies().len(), 3);
    assert_eq!(game.config().rng_seed, Some(99));
    assert_eq!(game.hud().hp, 100.0);
}

#[test]
fn tick_is_idle_on_the_menu() {
    let mut app = headless_app();
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(game_time(&app), 0.0, "nothing advances before Playing");
}

#[test]
fn tick_advances_time_while_playing() {
    let mut app = headless_app();
    app.update();
    start_playing(&mut app);
    let first = game_time(&app);
    assert!(
        (first - 1.0 / 60.0).abs() < 1e-9,
        "first tick uses the nominal frame delta"
    );
    for _ in 0..5 {
        app.update();
    }
    assert!(game_time(&app) >= first);
}

#[test]
fn frame_input_reaches_the_game_and_events_come_back() {
    let mut app = headless_app();
    app.update();
    start_playing(&mut app);

    app.insert_resource(FrameInput {
        fire_pressed: true,
        fire_held: true,
        ..default()
    });
    app.update();

    let game = app.world().resource::<Game>();
    assert_eq!(game.weapon().magazine(), 2);
    let log = app.world().resource::<EventLog>();
    assert!(log.0.contains(&GameEvent::ShotFired));
}

#[test]
fn pre_inserted_game_is_kept() {
    let mut app = headless_app();
    let cfg = GameConfig {
        enemy_count: 1,
        ..GameConfig::default()
    };
    app.insert_resource(Game::new(&cfg));
    app.update();
    assert_eq!(app.world().resource::<Game>().enemies().enemies().len(), 1);
}
