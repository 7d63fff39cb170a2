//! Player module: kinematics, mouse look, health, and the teabag heal.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | Plain data: `PlayerState`, `PlayerInput`, `InputAxis`, `TeabagTracker`, `CameraRig` |
//! | [`controller`] | `PlayerController`: input intake, physics step, camera easing, damage and healing |
//! | [`teabag`] | Corpse range checks and the rate-limited crouch streak |
//!
//! Nothing in here touches the ECS.  The controller is owned by
//! [`crate::game::Game`], which is the only Bevy resource in the simulation.

pub mod controller;
pub mod state;
pub mod teabag;

pub use controller::PlayerController;
pub use state::{CameraRig, InputAxis, PlayerInput, PlayerState, TeabagTracker};
