//! The Kadosh population, their served balls, and the corpse pool.
//!
//! ## Invariants
//!
//! - Every death spawns exactly one replacement, so the live count never
//!   changes after construction.
//! - The corpse pool never holds more than `max_corpses`; the oldest corpse
//!   by `spawned_at` is evicted first.
//! - [`EnemyManager::kill_enemy`] resolves enemies by [`EnemyId`], so killing
//!   the same enemy twice is a harmless `false`.
//!
//! Randomness (names, spawn points, taunts) comes from an injected
//! [`RngCore`], so tests can script it.

use super::corpse::Corpse;
use super::kadosh::Enemy;
use super::EnemyId;
use crate::config::GameConfig;
use crate::events::EventSchedule;
use crate::geometry::segment_intersects_sphere;
use crate::weapon::Projectile;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Random source the manager draws from.
pub type GameRng = Box<dyn RngCore + Send + Sync>;

/// Name used if the configured pool is somehow empty.
const FALLBACK_NICKNAME: &str = "Kadosh";

/// Build the session RNG: seeded from `rng_seed` when set, else from entropy.
pub fn rng_from_config(config: &GameConfig) -> GameRng {
    match config.rng_seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}

/// Result of a player ball striking an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub enemy: EnemyId,
    /// The strike took the enemy's last HP.
    pub killed: bool,
}

pub struct EnemyManager {
    enemies: Vec<Enemy>,
    corpses: Vec<Corpse>,
    projectiles: Vec<Projectile>,
    whispers: EventSchedule<u32>,
    next_enemy_id: u64,
    next_corpse_id: u64,
    config: GameConfig,
    rng: GameRng,
}

impl std::fmt::Debug for EnemyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnemyManager")
            .field("enemies", &self.enemies.len())
            .field("corpses", &self.corpses.len())
            .field("projectiles", &self.projectiles.len())
            .field("pending_whispers", &self.whispers.len())
            .finish_non_exhaustive()
    }
}

impl EnemyManager {
    /// Populate `enemy_count` enemies at time `now`.
    pub fn new(config: &GameConfig, rng: GameRng, now: f64) -> Self {
        let mut manager = Self {
            enemies: Vec::with_capacity(config.enemy_count),
            corpses: Vec::with_capacity(config.max_corpses),
            projectiles: Vec::new(),
            whispers: EventSchedule::new(),
            next_enemy_id: 0,
            next_corpse_id: 0,
            config: config.clone(),
            rng,
        };
        manager.populate(now);
        manager
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn corpses(&self) -> &[Corpse] {
        &self.corpses
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    fn populate(&mut self, now: f64) {
        for _ in 0..self.config.enemy_count {
            self.spawn_one(now);
        }
    }

    /// Add one enemy at a random point of the spawn square, preferring a
    /// nickname no live enemy is using.
    pub fn spawn_one(&mut self, now: f64) -> EnemyId {
        let nickname = self.pick_nickname();
        let half = self.config.spawn_half_extent();
        let position = Vec3::new(
            self.rng.gen_range(-half..=half),
            self.config.ground_y,
            self.rng.gen_range(-half..=half),
        );
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        let enemy = Enemy::new(id, nickname, position, now, &self.config, self.rng.as_mut());
        self.enemies.push(enemy);
        id
    }

    fn pick_nickname(&mut self) -> String {
        let pool = &self.config.nicknames;
        let unused: Vec<&String> = pool
            .iter()
            .filter(|n| !self.enemies.iter().any(|e| &e.nickname == *n))
            .collect();
        let candidates: Vec<&String> = if unused.is_empty() {
            pool.iter().collect()
        } else {
            unused
        };
        if candidates.is_empty() {
            return FALLBACK_NICKNAME.to_string();
        }
        candidates[self.rng.gen_range(0..candidates.len())].clone()
    }

    /// Swept test of one player ball against every live enemy's hit sphere.
    /// The first enemy struck takes `weapon_damage`.
    pub fn strike(&mut self, prev: Vec3, current: Vec3) -> Option<Strike> {
        let radius = self.config.enemy_hit_radius;
        let lift = Vec3::Y * self.config.enemy_hit_center_height;
        let damage = self.config.weapon_damage;
        let enemy = self.enemies.iter_mut().find(|e| {
            !e.dead && segment_intersects_sphere(prev, current, e.position + lift, radius)
        })?;
        let killed = enemy.take_damage(damage);
        Some(Strike {
            enemy: enemy.id,
            killed,
        })
    }

    /// Turn enemy `id` into a corpse, queue its death whisper, and spawn its
    /// replacement.  Returns `false` (and does nothing) if `id` is not live.
    pub fn kill_enemy(&mut self, id: EnemyId, now: f64, kill_count: u32) -> bool {
        let Some(idx) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };
        let mut enemy = self.enemies.remove(idx);
        enemy.dead = true;

        while self.corpses.len() >= self.config.max_corpses {
            let Some(oldest) = self.oldest_corpse_index() else {
                break;
            };
            let evicted = self.corpses.remove(oldest);
            debug!("Corpse {} evicted (pool full)", evicted.id);
        }

        self.next_corpse_id += 1;
        let mut ground = enemy.position;
        ground.y = self.config.ground_y;
        self.corpses
            .push(Corpse::new(self.next_corpse_id, ground, now, enemy.yaw));

        self.whispers
            .schedule(now + self.config.death_whisper_delay, kill_count);
        info!("{} is down (kill #{kill_count})", enemy.nickname);

        self.spawn_one(now);
        true
    }

    fn oldest_corpse_index(&self) -> Option<usize> {
        self.corpses
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.spawned_at.total_cmp(&b.spawned_at))
            .map(|(i, _)| i)
    }

    /// Drop corpse `id` from the pool.  Returns `false` if it was not there.
    pub fn remove_corpse(&mut self, id: u64) -> bool {
        let Some(idx) = self.corpses.iter().position(|c| c.id == id) else {
            return false;
        };
        self.corpses.remove(idx);
        true
    }

    /// Flag corpse `id` as having paid out its heal.
    pub fn mark_corpse_used(&mut self, id: u64) {
        if let Some(c) = self.corpses.iter_mut().find(|c| c.id == id) {
            c.used = true;
        }
    }

    /// One manager step: enemy AI, dead-enemy sweep, corpse expiry, and
    /// enemy ball flight.  `on_player_hit` receives the damage of every ball
    /// that reaches the player.
    pub fn update(
        &mut self,
        dt: f32,
        now: f64,
        player_position: Vec3,
        kill_count: u32,
        mut on_player_hit: impl FnMut(f32),
    ) {
        for enemy in &mut self.enemies {
            if let Some(ball) =
                enemy.update(dt, now, player_position, &self.config, self.rng.as_mut())
            {
                self.projectiles.push(ball);
            }
        }

        let fallen: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|e| e.dead)
            .map(|e| e.id)
            .collect();
        for id in fallen {
            self.kill_enemy(id, now, kill_count);
        }

        let lifetime = self.config.corpse_lifetime;
        self.corpses.retain(|c| c.age(now) <= lifetime);

        let ball_lifetime = self.config.enemy_projectile_lifetime;
        let hit_radius = self.config.enemy_projectile_hit_radius;
        let damage = self.config.enemy_damage;
        self.projectiles.retain_mut(|ball| {
            ball.advance(dt);
            if ball.age(now) > ball_lifetime {
                return false;
            }
            if ball.position.distance(player_position) < hit_radius {
                on_player_hit(damage);
                return false;
            }
            true
        });
    }

    /// Kill counts whose whisper delay has elapsed by `now`.
    pub fn drain_death_whispers(&mut self, now: f64) -> Vec<u32> {
        self.whispers.drain_due(now)
    }

    pub fn pending_whispers(&self) -> usize {
        self.whispers.len()
    }

    /// Clear enemies, corpses, balls, and pending whispers, then repopulate.
    pub fn reset(&mut self, now: f64) {
        self.enemies.clear();
        self.corpses.clear();
        self.projectiles.clear();
        self.whispers.clear();
        self.populate(now);
    }
}
