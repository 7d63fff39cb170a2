//! Per-frame orchestration of the match.
//!
//! [`Game`] owns every simulation subsystem and is the only piece of game
//! state stored in the ECS.  One call to [`Game::update`] advances the whole
//! match by one rendered frame:
//!
//! | Step | What happens |
//! |------|--------------|
//! | Clocks | `dt` clamped to `max_frame_delta` (first frame uses `first_frame_delta`); simulated time advances by the clamped `dt`, wall time by the raw delta |
//! | Whispers | Due death whispers are released as events |
//! | Game over | While dead, only the restart hold is processed |
//! | Input | Movement intents and mouse look go to the player |
//! | Player | Physics step and camera easing |
//! | Weapon | Fire / reload triggers, then ball flight with enemy hit-testing |
//! | Enemies | AI, enemy balls against the player, corpse expiry |
//! | Teabag | Crouch streak against the nearest unused corpse |
//!
//! Audio and HUD never run in here; they read the returned [`GameEvent`]s and
//! the read-only accessors afterwards.

use crate::config::GameConfig;
use crate::enemy::manager::{rng_from_config, GameRng};
use crate::enemy::EnemyManager;
use crate::events::GameEvent;
use crate::player::{CameraRig, InputAxis, PlayerController};
use crate::weapon::WeaponSystem;
use bevy::prelude::*;

/// Device-decoded intents for one frame.
///
/// Written by the input collaborator, consumed by [`Game::update`].
/// `*_pressed` fields are edges (true only on the frame of the press).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub forward: f32,
    pub right: f32,
    pub jump: bool,
    pub crouch: bool,
    /// Raw mouse motion in pixels since the previous frame.
    pub look_delta: Vec2,
    pub fire_pressed: bool,
    pub fire_held: bool,
    pub reload_pressed: bool,
}

/// Everything the HUD shows, copied out once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub hp: f32,
    pub max_hp: f32,
    pub magazine: u32,
    pub magazine_size: u32,
    pub reloading: bool,
    pub reload_progress: f32,
    pub kills: u32,
    pub crouching: bool,
    pub dead: bool,
    /// Fraction of the restart hold completed; `0` when not holding.
    pub restart_progress: f32,
}

#[derive(Resource, Debug)]
pub struct Game {
    config: GameConfig,
    player: PlayerController,
    camera: CameraRig,
    weapon: WeaponSystem,
    enemies: EnemyManager,
    kills: u32,
    /// Sum of clamped frame deltas.
    sim_time: f64,
    /// Sum of raw frame deltas; measures the restart hold.
    wall_time: f64,
    first_frame: bool,
    /// Wall time the current restart hold began.
    restart_hold_since: Option<f64>,
}

impl Game {
    /// New match with the RNG described by `config.rng_seed`.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, rng_from_config(config))
    }

    /// New match drawing enemy randomness from `rng`.
    pub fn with_rng(config: &GameConfig, rng: GameRng) -> Self {
        Self {
            config: config.clone(),
            player: PlayerController::new(config),
            camera: CameraRig::new(config),
            weapon: WeaponSystem::new(config),
            enemies: EnemyManager::new(config, rng, 0.0),
            kills: 0,
            sim_time: 0.0,
            wall_time: 0.0,
            first_frame: true,
            restart_hold_since: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn weapon(&self) -> &WeaponSystem {
        &self.weapon
    }

    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Current simulated time in seconds.
    pub fn now(&self) -> f64 {
        self.sim_time
    }

    pub fn is_game_over(&self) -> bool {
        self.player.is_dead()
    }

    pub fn restart_progress(&self) -> f32 {
        match self.restart_hold_since {
            Some(start) if self.config.restart_hold > 0.0 => {
                ((self.wall_time - start) / self.config.restart_hold).clamp(0.0, 1.0) as f32
            }
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            hp: self.player.hp(),
            max_hp: self.player.max_hp(),
            magazine: self.weapon.magazine(),
            magazine_size: self.weapon.magazine_size(),
            reloading: self.weapon.is_reloading(),
            reload_progress: self.weapon.reload_progress(self.sim_time),
            kills: self.kills,
            crouching: self.player.is_crouching(),
            dead: self.player.is_dead(),
            restart_progress: self.restart_progress(),
        }
    }

    /// Advance the match by one frame of `frame_delta` seconds.
    pub fn update(&mut self, frame_delta: f32, input: &FrameInput) -> Vec<GameEvent> {
        let mut events = Vec::new();

        let raw = frame_delta.max(0.0);
        let dt = if self.first_frame {
            self.first_frame = false;
            self.config.first_frame_delta
        } else {
            raw.min(self.config.max_frame_delta)
        };
        self.sim_time += dt as f64;
        self.wall_time += raw as f64;
        let now = self.sim_time;

        for kill_count in self.enemies.drain_death_whispers(now) {
            events.push(GameEvent::DeathWhisper { kill_count });
        }

        if self.player.is_dead() {
            self.update_restart_hold(input, &mut events);
            return events;
        }

        // Input
        let crouch_pressed = input.crouch && !self.player.state().input.crouch;
        self.player.set_input(InputAxis::Forward(input.forward));
        self.player.set_input(InputAxis::Right(input.right));
        self.player.set_input(InputAxis::Jump(input.jump));
        self.player.set_input(InputAxis::Crouch(input.crouch));
        let sens = self.config.mouse_sensitivity;
        self.player
            .add_rotation(-input.look_delta.x * sens, -input.look_delta.y * sens);

        // Player
        self.player.update(dt, &mut self.camera);

        // Weapon
        if input.fire_pressed
            && self.weapon.shoot(
                self.player.muzzle_origin(),
                self.player.forward_horizontal(),
                now,
            )
        {
            events.push(GameEvent::ShotFired);
        }
        if input.reload_pressed && self.weapon.start_reload(now) {
            events.push(GameEvent::ReloadStarted);
        }

        let enemies = &mut self.enemies;
        let kills = &mut self.kills;
        self.weapon.update(now, dt, |prev, current| {
            let Some(strike) = enemies.strike(prev, current) else {
                return false;
            };
            if strike.killed {
                *kills += 1;
                enemies.kill_enemy(strike.enemy, now, *kills);
                events.push(GameEvent::EnemyKilled { kill_count: *kills });
            } else {
                events.push(GameEvent::EnemyHit {
                    enemy: strike.enemy,
                });
            }
            true
        });

        // Enemies
        let player_position = self.player.position();
        let player = &mut self.player;
        let mut died = false;
        self.enemies
            .update(dt, now, player_position, self.kills, |amount| {
                if player.is_dead() {
                    return;
                }
                died |= player.take_damage(amount);
                events.push(GameEvent::PlayerDamaged {
                    amount,
                    hp: player.hp(),
                });
            });
        if died {
            info!("Player down after {} kills", self.kills);
            events.push(GameEvent::PlayerDied);
            return events;
        }

        // Teabag
        self.update_teabag(crouch_pressed, now, &mut events);

        events
    }

    fn update_teabag(&mut self, crouch_pressed: bool, now: f64, events: &mut Vec<GameEvent>) {
        if self.player.corpse_in_range(self.enemies.corpses()).is_none() {
            self.player.clear_teabag_tracking();
            return;
        }
        if !self.player.is_crouching() {
            return;
        }
        let Some(corpse_id) = self
            .player
            .check_teabag(self.enemies.corpses())
            .map(|c| c.id)
        else {
            return;
        };
        let completed = if crouch_pressed {
            self.player.record_teabag_crouch(corpse_id, now)
        } else {
            self.player.try_record_teabag_crouch(corpse_id, now)
        };
        if !completed {
            return;
        }
        self.player.heal(self.config.teabag_heal_amount);
        self.enemies.mark_corpse_used(corpse_id);
        self.player.reset_teabag_for_corpse(corpse_id);
        self.enemies.remove_corpse(corpse_id);
        info!("Teabag heal on corpse {corpse_id}");
        events.push(GameEvent::TeabagHealed {
            corpse_id,
            hp: self.player.hp(),
        });
    }

    fn update_restart_hold(&mut self, input: &FrameInput, events: &mut Vec<GameEvent>) {
        if input.fire_pressed && self.restart_hold_since.is_none() {
            self.restart_hold_since = Some(self.wall_time);
        }
        if !input.fire_held && !input.fire_pressed {
            self.restart_hold_since = None;
        }
        let Some(start) = self.restart_hold_since else {
            return;
        };
        if self.wall_time - start >= self.config.restart_hold {
            self.restart();
            events.push(GameEvent::Restarted);
        }
    }

    /// Reset player, weapon, enemies, and score.  Clocks keep running.
    pub fn restart(&mut self) {
        self.player.reset();
        self.camera = CameraRig::new(&self.config);
        self.weapon.reset();
        self.enemies.reset(self.sim_time);
        self.kills = 0;
        self.restart_hold_since = None;
        info!("Match restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game() -> Game {
        Game::with_rng(&GameConfig::default(), Box::new(StdRng::seed_from_u64(3)))
    }

    #[test]
    fn first_frame_uses_nominal_delta_then_clamps() {
        let mut g = game();
        g.update(5.0, &FrameInput::default());
        assert!((g.now() - 1.0 / 60.0).abs() < 1e-9);
        g.update(1.0, &FrameInput::default());
        assert!((g.now() - (1.0 / 60.0 + 0.05)).abs() < 1e-6);
    }

    #[test]
    fn fire_press_spends_a_ball() {
        let mut g = game();
        let fire = FrameInput {
            fire_pressed: true,
            fire_held: true,
            ..default()
        };
        let events = g.update(0.016, &fire);
        assert!(events.contains(&GameEvent::ShotFired));
        assert_eq!(g.weapon().magazine(), 2);
    }

    #[test]
    fn mouse_look_turns_the_player() {
        let mut g = game();
        let look = FrameInput {
            look_delta: Vec2::new(100.0, 0.0),
            ..default()
        };
        g.update(0.016, &look);
        assert!((g.player().state().yaw - (-0.22)).abs() < 1e-5);
    }

    #[test]
    fn restart_needs_an_unbroken_hold() {
        let mut g = game();
        g.update(0.016, &FrameInput::default());
        g.player.take_damage(1000.0);

        let press = FrameInput {
            fire_pressed: true,
            fire_held: true,
            ..default()
        };
        let hold = FrameInput {
            fire_held: true,
            ..default()
        };
        g.update(0.1, &press);
        for _ in 0..10 {
            g.update(0.1, &hold);
        }
        assert!(g.is_game_over());
        assert!(g.restart_progress() > 0.4);

        g.update(0.1, &FrameInput::default());
        assert_eq!(g.restart_progress(), 0.0);

        g.update(0.1, &press);
        let mut restarted = false;
        for _ in 0..25 {
            restarted |= g.update(0.1, &hold).contains(&GameEvent::Restarted);
        }
        assert!(restarted);
        assert!(!g.is_game_over());
        assert_eq!(g.player().hp(), 100.0);
        assert_eq!(g.kills(), 0);
    }
}
