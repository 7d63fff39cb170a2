//! Device input → [`FrameInput`].
//!
//! ## Pipeline (runs in order every `Update` frame while playing)
//!
//! 1. [`frame_input_clear_system`]: resets `FrameInput` to neutral.
//! 2. [`keyboard_mouse_to_frame_input_system`]: WASD, Space, Ctrl, R, mouse.
//! 3. [`gamepad_to_frame_input_system`]: sticks, triggers, face buttons.
//!
//! The simulation only ever sees `FrameInput`, so tests drive the game by
//! writing that resource directly and never need an input device.
//!
//! | Action  | Keyboard / mouse   | Gamepad            |
//! |---------|--------------------|--------------------|
//! | Move    | W A S D            | Left stick         |
//! | Look    | Mouse motion       | Right stick        |
//! | Jump    | Space              | South (A)          |
//! | Crouch  | Left / right Ctrl  | East (B)           |
//! | Serve   | Left mouse button  | Right trigger      |
//! | Reload  | R                  | West (X)           |

use crate::game::FrameInput;
use crate::menu::GameState;
use crate::simulation::game_tick_system;
use bevy::input::gamepad::{GamepadAxis, GamepadButton, GamepadConnection, GamepadConnectionEvent};
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

/// Stick magnitude below which input is ignored.
const GAMEPAD_DEADZONE: f32 = 0.15;
/// Right-stick look rate, in mouse-pixel equivalents per second at full tilt.
const GAMEPAD_LOOK_RATE: f32 = 900.0;

/// The gamepad whose input is read.  Most recently connected wins.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PreferredGamepad(pub Option<Entity>);

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PreferredGamepad>()
            .add_systems(Update, gamepad_connection_system)
            .add_systems(
                Update,
                (
                    frame_input_clear_system,
                    keyboard_mouse_to_frame_input_system,
                    gamepad_to_frame_input_system,
                )
                    .chain()
                    .before(game_tick_system)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Reset every intent so edges and look deltas never leak across frames.
pub fn frame_input_clear_system(mut input: ResMut<FrameInput>) {
    *input = FrameInput::default();
}

pub fn keyboard_mouse_to_frame_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut input: ResMut<FrameInput>,
) {
    let axis = |pos: KeyCode, neg: KeyCode| {
        (keys.pressed(pos) as i8 - keys.pressed(neg) as i8) as f32
    };
    input.forward = axis(KeyCode::KeyW, KeyCode::KeyS);
    input.right = axis(KeyCode::KeyD, KeyCode::KeyA);
    input.jump = keys.pressed(KeyCode::Space);
    input.crouch = keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    input.reload_pressed = keys.just_pressed(KeyCode::KeyR);
    input.fire_pressed = buttons.just_pressed(MouseButton::Left);
    input.fire_held = buttons.pressed(MouseButton::Left);
    input.look_delta = motion.delta;
}

/// Track gamepad connect / disconnect events and update [`PreferredGamepad`].
pub fn gamepad_connection_system(
    mut events: MessageReader<GamepadConnectionEvent>,
    mut preferred: ResMut<PreferredGamepad>,
) {
    for event in events.read() {
        match &event.connection {
            GamepadConnection::Connected { .. } => {
                preferred.0 = Some(event.gamepad);
                info!("[gamepad] Gamepad {:?} connected (now preferred)", event.gamepad);
            }
            GamepadConnection::Disconnected => {
                info!("[gamepad] Gamepad {:?} disconnected", event.gamepad);
                if preferred.0 == Some(event.gamepad) {
                    preferred.0 = None;
                }
            }
        }
    }
}

/// Layer gamepad intents over the keyboard ones.  Sticks only override when
/// outside the deadzone; buttons are OR-ed in.
pub fn gamepad_to_frame_input_system(
    time: Res<Time>,
    preferred: Res<PreferredGamepad>,
    gamepads: Query<&Gamepad>,
    mut input: ResMut<FrameInput>,
) {
    let Some(entity) = preferred.0 else {
        return;
    };
    let Ok(gamepad) = gamepads.get(entity) else {
        return;
    };

    let left = Vec2::new(
        gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0),
        gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0),
    );
    if left.length() >= GAMEPAD_DEADZONE {
        input.forward = left.y;
        input.right = left.x;
    }

    let right = Vec2::new(
        gamepad.get(GamepadAxis::RightStickX).unwrap_or(0.0),
        gamepad.get(GamepadAxis::RightStickY).unwrap_or(0.0),
    );
    if right.length() >= GAMEPAD_DEADZONE {
        // Stick up looks up; mouse-style deltas have +y pointing down.
        input.look_delta +=
            Vec2::new(right.x, -right.y) * GAMEPAD_LOOK_RATE * time.delta_secs();
    }

    input.jump |= gamepad.pressed(GamepadButton::South);
    input.crouch |= gamepad.pressed(GamepadButton::East);
    input.reload_pressed |= gamepad.just_pressed(GamepadButton::West);
    input.fire_pressed |= gamepad.just_pressed(GamepadButton::RightTrigger2);
    input.fire_held |= gamepad.pressed(GamepadButton::RightTrigger2);
}
