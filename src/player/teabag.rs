//! Corpse lookup and the crouch streak that earns a heal.
//!
//! A heal is granted after `teabag_crouches_required` accepted crouches on the
//! same unused corpse.  Crouch *presses* always count; a *held* crouch counts
//! again only after `teabag_crouch_interval` seconds.  The orchestrator
//! decides which of the two entry points to call.

use super::controller::PlayerController;
use crate::enemy::Corpse;
use crate::geometry::horizontal_distance_sq;

impl PlayerController {
    /// First unused corpse within `teabag_distance` of the player (XZ plane).
    pub fn corpse_in_range<'a>(&self, corpses: &'a [Corpse]) -> Option<&'a Corpse> {
        let r = self.config.teabag_distance;
        corpses
            .iter()
            .filter(|c| !c.used)
            .find(|c| horizontal_distance_sq(self.state.position, c.position) <= r * r)
    }

    /// Like [`Self::corpse_in_range`], but only while crouching and hurt.
    pub fn check_teabag<'a>(&self, corpses: &'a [Corpse]) -> Option<&'a Corpse> {
        if !self.state.crouching || self.state.hp >= self.config.player_max_hp {
            return None;
        }
        self.corpse_in_range(corpses)
    }

    /// Count one crouch on `corpse_id` unconditionally.  Switching corpses
    /// restarts the count.  Returns `true` once the threshold is reached.
    pub fn record_teabag_crouch(&mut self, corpse_id: u64, now: f64) -> bool {
        let t = &mut self.state.teabag;
        if t.corpse != Some(corpse_id) {
            t.corpse = Some(corpse_id);
            t.crouches = 0;
        }
        t.crouches += 1;
        t.last_record_time = Some(now);
        t.crouches >= self.config.teabag_crouches_required
    }

    /// Rate-limited [`Self::record_teabag_crouch`]: ignored if the previous
    /// accepted crouch was less than `teabag_crouch_interval` ago.
    pub fn try_record_teabag_crouch(&mut self, corpse_id: u64, now: f64) -> bool {
        if let Some(last) = self.state.teabag.last_record_time {
            if now - last < self.config.teabag_crouch_interval {
                return false;
            }
        }
        self.record_teabag_crouch(corpse_id, now)
    }

    /// Forget the streak if it belongs to `corpse_id`.
    pub fn reset_teabag_for_corpse(&mut self, corpse_id: u64) {
        let t = &mut self.state.teabag;
        if t.corpse == Some(corpse_id) {
            t.corpse = None;
            t.crouches = 0;
        }
    }

    /// Forget the streak regardless of corpse (player walked away).
    pub fn clear_teabag_tracking(&mut self) {
        let t = &mut self.state.teabag;
        t.corpse = None;
        t.crouches = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::player::InputAxis;
    use bevy::prelude::*;

    fn corpse(id: u64, x: f32) -> Corpse {
        Corpse::new(id, Vec3::new(x, 0.0, 0.0), 0.0, 0.0)
    }

    fn hurt_crouching_player() -> PlayerController {
        let mut p = PlayerController::new(&GameConfig::default());
        p.take_damage(50.0);
        p.set_input(InputAxis::Crouch(true));
        p
    }

    #[test]
    fn range_check_skips_used_and_distant_corpses() {
        let p = PlayerController::new(&GameConfig::default());
        let mut used = corpse(1, 0.5);
        used.used = true;
        let corpses = vec![used, corpse(2, 10.0), corpse(3, 2.0)];
        assert_eq!(p.corpse_in_range(&corpses).map(|c| c.id), Some(3));
    }

    #[test]
    fn check_requires_crouch_and_missing_hp() {
        let corpses = vec![corpse(1, 1.0)];
        let mut p = PlayerController::new(&GameConfig::default());
        p.set_input(InputAxis::Crouch(true));
        assert!(p.check_teabag(&corpses).is_none(), "full hp");

        p.take_damage(10.0);
        assert!(p.check_teabag(&corpses).is_some());

        p.set_input(InputAxis::Crouch(false));
        assert!(p.check_teabag(&corpses).is_none(), "standing");
    }

    #[test]
    fn third_accepted_crouch_completes() {
        let mut p = hurt_crouching_player();
        assert!(!p.try_record_teabag_crouch(7, 0.0));
        assert!(!p.try_record_teabag_crouch(7, 0.3));
        assert!(p.try_record_teabag_crouch(7, 0.6));
    }

    #[test]
    fn held_crouch_is_rate_limited() {
        let mut p = hurt_crouching_player();
        assert!(!p.try_record_teabag_crouch(7, 1.0));
        for i in 1..10 {
            assert!(!p.try_record_teabag_crouch(7, 1.0 + i as f64 * 0.02));
        }
        assert_eq!(p.state().teabag.crouches, 1);
    }

    #[test]
    fn pressed_crouches_bypass_the_interval() {
        let mut p = hurt_crouching_player();
        assert!(!p.record_teabag_crouch(7, 1.0));
        assert!(!p.record_teabag_crouch(7, 1.01));
        assert!(p.record_teabag_crouch(7, 1.02));
    }

    #[test]
    fn switching_corpse_restarts_count() {
        let mut p = hurt_crouching_player();
        p.record_teabag_crouch(1, 0.0);
        p.record_teabag_crouch(1, 0.1);
        assert!(!p.record_teabag_crouch(2, 0.2));
        assert_eq!(p.state().teabag.crouches, 1);
        assert_eq!(p.state().teabag.corpse, Some(2));
    }

    #[test]
    fn reset_only_touches_matching_corpse() {
        let mut p = hurt_crouching_player();
        p.record_teabag_crouch(1, 0.0);
        p.reset_teabag_for_corpse(2);
        assert_eq!(p.state().teabag.crouches, 1);
        p.reset_teabag_for_corpse(1);
        assert_eq!(p.state().teabag.crouches, 0);
        assert_eq!(p.state().teabag.corpse, None);

        p.record_teabag_crouch(3, 1.0);
        p.clear_teabag_tracking();
        assert_eq!(p.state().teabag.corpse, None);
    }
}
