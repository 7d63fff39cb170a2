//! Kadosh opponents: per-enemy AI, the population manager, and corpses.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`kadosh`] | `Enemy`: chase/serve state machine, taunts, serve swing pose |
//! | [`corpse`] | `Corpse`: fallen enemy record and its resting pose |
//! | [`manager`] | `EnemyManager`: constant-size population, enemy balls, corpse pool, death whispers |

pub mod corpse;
pub mod kadosh;
pub mod manager;

pub use corpse::Corpse;
pub use kadosh::{Enemy, EnemyBehavior};
pub use manager::EnemyManager;

/// Stable identity of a live enemy.  Never reused within a session, so a
/// stale id simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u64);
