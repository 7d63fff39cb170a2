//! Scripted matches driven through the public [`Game`] API.
//!
//! No `App`, no window: each test builds a `Game` from a tweaked config with a
//! fixed RNG seed and feeds it frames of [`FrameInput`] at a steady 50 ms.
//!
//! Covered scenarios:
//! 1. Empty the magazine, get rejected, reload, and fire again.
//! 2. Live enemy count never changes across many kills.
//! 3. A full loop: take a serve, return fire, kill, teabag the corpse.
//! 4. Death freezes the match until the restart hold completes.
//! 5. Long frames are clamped; simulated time never jumps.

use bevy::prelude::*;
use racket_rampage::config::GameConfig;
use racket_rampage::enemy::manager::{rng_from_config, EnemyManager};
use racket_rampage::events::GameEvent;
use racket_rampage::game::{FrameInput, Game};
use racket_rampage::geometry::segment_intersects_sphere;
use racket_rampage::weapon::WeaponSystem;

const FRAME: f32 = 0.05;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One Kadosh, pinned to the court origin (spawn square of zero size) so it
/// stands exactly where the player does.
fn duel_config() -> GameConfig {
    GameConfig {
        enemy_count: 1,
        spawn_edge_margin: 40.0,
        rng_seed: Some(11),
        ..GameConfig::default()
    }
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn fire() -> FrameInput {
    FrameInput {
        fire_pressed: true,
        fire_held: true,
        ..default()
    }
}

fn crouch() -> FrameInput {
    FrameInput {
        crouch: true,
        ..default()
    }
}

/// Run frames until `pred` matches an event or `max_frames` pass.
fn run_until(
    game: &mut Game,
    input: FrameInput,
    max_frames: usize,
    pred: impl Fn(&GameEvent) -> bool,
) -> Option<GameEvent> {
    for _ in 0..max_frames {
        if let Some(e) = game.update(FRAME, &input).into_iter().find(|e| pred(e)) {
            return Some(e);
        }
    }
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Magazine of 3: three instant shots, a fourth rejected, reload, full again.
#[test]
fn magazine_empties_and_reload_refills() {
    let cfg = GameConfig {
        shoot_cooldown: 0.0,
        ..GameConfig::default()
    };
    let mut weapon = WeaponSystem::new(&cfg);
    let origin = Vec3::new(0.0, 1.2, 0.0);

    for _ in 0..3 {
        assert!(weapon.shoot(origin, Vec3::NEG_Z, 1.0));
    }
    assert_eq!(weapon.magazine(), 0);
    assert!(!weapon.shoot(origin, Vec3::NEG_Z, 1.0));
    assert_eq!(weapon.projectiles().len(), 3);

    assert!(weapon.start_reload(1.0));
    let mut now = 1.0;
    while now < 2.6 {
        now += FRAME as f64;
        weapon.update(now, FRAME, |_, _| false);
    }
    assert_eq!(weapon.magazine(), 3);
    assert!(!weapon.is_reloading());
}

#[test]
fn live_enemy_count_survives_many_kills() {
    let cfg = GameConfig {
        rng_seed: Some(5),
        ..GameConfig::default()
    };
    let mut manager = EnemyManager::new(&cfg, rng_from_config(&cfg), 0.0);
    for kill in 1..=40u32 {
        let id = manager.enemies()[(kill as usize) % 3].id;
        assert!(manager.kill_enemy(id, kill as f64 * 0.1, kill));
        assert_eq!(manager.enemies().len(), 3);
        assert!(manager.corpses().len() <= 5);
        // Stale id: nothing happens.
        assert!(!manager.kill_enemy(id, kill as f64 * 0.1, kill));
    }
}

#[test]
fn fast_ball_cannot_tunnel_through_enemy() {
    assert!(segment_intersects_sphere(
        Vec3::new(-3.0, 1.0, 0.0),
        Vec3::new(3.0, 1.0, 0.0),
        Vec3::ZERO,
        1.5,
    ));
}

/// Take one serve, kill the server with two returns, then crouch three times
/// over the corpse to heal back up.
#[test]
fn serve_kill_and_teabag_heal() {
    let mut game = Game::new(&duel_config());
    assert_eq!(game.enemies().enemies().len(), 1);

    // The Kadosh waits out its cooldown, then serves point-blank.
    let hit = run_until(&mut game, idle(), 80, |e| {
        matches!(e, GameEvent::PlayerDamaged { .. })
    });
    assert_eq!(
        hit,
        Some(GameEvent::PlayerDamaged {
            amount: 10.0,
            hp: 90.0
        })
    );

    // Two returns at 25 damage each.
    let first = game.update(FRAME, &fire());
    assert!(first.contains(&GameEvent::ShotFired));
    assert!(first
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyHit { .. })));
    for _ in 0..7 {
        game.update(FRAME, &idle());
    }
    let second = game.update(FRAME, &fire());
    assert!(second.contains(&GameEvent::EnemyKilled { kill_count: 1 }));
    assert_eq!(game.kills(), 1);
    assert_eq!(game.enemies().enemies().len(), 1, "replacement spawned");
    assert_eq!(game.enemies().corpses().len(), 1);

    // Press crouch (counts at once), then hold it (counts every 0.28 s).
    let mut events = game.update(FRAME, &crouch());
    let mut healed = None;
    let mut whispered = false;
    for _ in 0..20 {
        whispered |= events.contains(&GameEvent::DeathWhisper { kill_count: 1 });
        if let Some(e) = events
            .iter()
            .find(|e| matches!(e, GameEvent::TeabagHealed { .. }))
        {
            healed = Some(*e);
            break;
        }
        events = game.update(FRAME, &crouch());
    }
    let Some(GameEvent::TeabagHealed { hp, .. }) = healed else {
        panic!("teabag never completed");
    };
    assert_eq!(hp, 100.0);
    assert!(whispered, "death whisper released during the crouches");
    assert!(game.enemies().corpses().is_empty(), "corpse consumed");
    assert_eq!(game.player().state().teabag.crouches, 0);
}

/// A one-shot serve kills; input is then ignored until fire is held for the
/// full restart hold.
#[test]
fn death_then_restart_hold() {
    let cfg = GameConfig {
        enemy_damage: 1000.0,
        ..duel_config()
    };
    let mut game = Game::new(&cfg);

    let died = run_until(&mut game, idle(), 80, |e| *e == GameEvent::PlayerDied);
    assert_eq!(died, Some(GameEvent::PlayerDied));
    assert!(game.is_game_over());
    assert_eq!(game.hud().hp, 0.0);

    // Firing while dead only starts the hold; no ball is served.
    let magazine = game.weapon().magazine();
    let events = game.update(FRAME, &fire());
    assert!(!events.contains(&GameEvent::ShotFired));
    assert_eq!(game.weapon().magazine(), magazine);

    let held = FrameInput {
        fire_held: true,
        ..default()
    };
    let restarted = run_until(&mut game, held, 60, |e| *e == GameEvent::Restarted);
    assert_eq!(restarted, Some(GameEvent::Restarted));
    assert!(!game.is_game_over());
    assert_eq!(game.hud().hp, 100.0);
    assert_eq!(game.hud().magazine, 3);
    assert_eq!(game.kills(), 0);
    assert_eq!(game.enemies().enemies().len(), 1);
}

#[test]
fn stalled_frames_are_clamped() {
    let mut game = Game::new(&duel_config());
    game.update(0.0, &idle());
    let before = game.now();
    game.update(3.0, &idle());
    assert!((game.now() - before - 0.05).abs() < 1e-6);
}
