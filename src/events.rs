//! Gameplay notifications and the delayed-event queue.
//!
//! The simulation never calls audio or UI code directly.  Instead each frame
//! produces a list of [`GameEvent`]s that the Bevy collaborators (sound, HUD)
//! read as messages after the tick.  Effects that must happen *later* (the
//! death whisper plays 0.4 s after a kill) are parked in an
//! [`EventSchedule`] and released when simulated time catches up, so tests
//! can fast-forward without sleeping.

use crate::enemy::EnemyId;
use bevy::prelude::*;

/// Something the outside world may want to react to.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The player served a ball.
    ShotFired,
    /// A reload began; play the reload cue.
    ReloadStarted,
    /// A player ball struck an enemy without killing it.
    EnemyHit { enemy: EnemyId },
    /// An enemy went down.  `kill_count` includes this kill.
    EnemyKilled { kill_count: u32 },
    /// Delayed taunt-back after a kill; louder/higher with more kills.
    DeathWhisper { kill_count: u32 },
    /// An enemy ball hit the player.
    PlayerDamaged { amount: f32, hp: f32 },
    /// A teabag completed and consumed a corpse.
    TeabagHealed { corpse_id: u64, hp: f32 },
    /// Player HP reached zero this frame.
    PlayerDied,
    /// The restart hold completed and the match was reset.
    Restarted,
}

/// A time-ordered queue of payloads released once their due time passes.
///
/// Entries with equal due times come out in insertion order.
#[derive(Debug, Clone)]
pub struct EventSchedule<T> {
    pending: Vec<(f64, T)>,
}

impl<T> Default for EventSchedule<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> EventSchedule<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `payload` until simulated time reaches `due`.
    pub fn schedule(&mut self, due: f64, payload: T) {
        // Keep sorted by due time; insert after any equal entries.
        let idx = self.pending.partition_point(|(t, _)| *t <= due);
        self.pending.insert(idx, (due, payload));
    }

    /// Remove and return every payload whose due time is `<= now`, oldest
    /// first.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        let ready = self.pending.partition_point(|(t, _)| *t <= now);
        self.pending.drain(..ready).map(|(_, p)| p).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything still waiting (used on restart).
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_released_early() {
        let mut q = EventSchedule::new();
        q.schedule(1.0, "a");
        assert!(q.drain_due(0.99).is_empty());
        assert_eq!(q.drain_due(1.0), vec!["a"]);
        assert!(q.is_empty());
    }

    #[test]
    fn release_order_follows_due_time_then_insertion() {
        let mut q = EventSchedule::new();
        q.schedule(2.0, 3);
        q.schedule(1.0, 1);
        q.schedule(1.0, 2);
        q.schedule(5.0, 4);
        assert_eq!(q.drain_due(2.5), vec![1, 2, 3]);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn clear_discards_pending() {
        let mut q = EventSchedule::new();
        q.schedule(0.4, ());
        q.clear();
        assert!(q.drain_due(10.0).is_empty());
    }
}
