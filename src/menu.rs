//! Start screen: `GameState` definition and `MainMenuPlugin`.
//!
//! ## States
//!
//! | State      | Description                                  |
//! |------------|----------------------------------------------|
//! | `MainMenu` | Initial state; start screen shown            |
//! | `Playing`  | Match running; the simulation tick is active |
//!
//! ## Systems (registered by `MainMenuPlugin`)
//!
//! | System                  | Schedule                | Purpose                        |
//! |-------------------------|-------------------------|--------------------------------|
//! | `setup_main_menu`       | `OnEnter(MainMenu)`     | Spawn full-screen start UI     |
//! | `cleanup_main_menu`     | `OnExit(MainMenu)`      | Despawn start UI entities      |
//! | `menu_button_system`    | `Update / in MainMenu`  | Handle Play / Quit clicks      |
//! | `menu_keyboard_system`  | `Update / in MainMenu`  | Enter starts the match         |

use bevy::app::AppExit;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

/// Top-level application state machine.
///
/// The tick in [`crate::simulation::SimulationPlugin`] only runs in
/// `Playing`, so the court is frozen behind the start screen.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
}

/// Root of the start-screen tree; despawned with all descendants on exit.
#[derive(Component)]
pub struct MainMenuRoot;

/// What a start-screen button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Quit,
}

impl MenuAction {
    fn label(self) -> &'static str {
        match self {
            MenuAction::Play => "PLAY",
            MenuAction::Quit => "QUIT",
        }
    }

    /// (fill, border, text)
    fn palette(self) -> (Color, Color, Color) {
        match self {
            MenuAction::Play => (
                Color::srgb(0.55, 0.62, 0.08),
                Color::srgb(0.86, 0.92, 0.24),
                Color::srgb(1.0, 1.0, 0.85),
            ),
            MenuAction::Quit => (
                Color::srgb(0.28, 0.06, 0.06),
                Color::srgb(0.60, 0.12, 0.12),
                Color::srgb(1.0, 0.65, 0.65),
            ),
        }
    }

    fn text_color(self) -> Color {
        self.palette().2
    }
}

const MENU_BACKDROP: Color = Color::srgb(0.04, 0.10, 0.05);
const TITLE_COLOR: Color = Color::srgb(0.95, 0.92, 0.30);
const TAGLINE_COLOR: Color = Color::srgb(0.70, 0.78, 0.70);
const CONTROLS_COLOR: Color = Color::srgb(0.42, 0.48, 0.42);
const CONTROLS_HINT: &str =
    "WASD move  ·  Space jump  ·  Ctrl crouch  ·  Click serve  ·  R reload";

/// Registers `GameState` and the start screen.
///
/// Add it before plugins that gate systems on `GameState`.
pub struct MainMenuPlugin;

impl Plugin for MainMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(
                Update,
                (menu_button_system, menu_keyboard_system).run_if(in_state(GameState::MainMenu)),
            );
    }
}

/// Title, tagline, Play / Quit, and a controls line, stacked and centred.
pub fn setup_main_menu(mut commands: Commands) {
    let column = Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        row_gap: Val::Px(12.0),
        ..default()
    };
    commands
        .spawn((column, BackgroundColor(MENU_BACKDROP), MainMenuRoot))
        .with_children(|root| {
            label(root, "RACKET RAMPAGE", 56.0, TITLE_COLOR);
            label(root, "Serve them before they serve you", 18.0, TAGLINE_COLOR);
            gap(root, 36.0);
            action_button(root, MenuAction::Play);
            action_button(root, MenuAction::Quit);
            gap(root, 36.0);
            label(root, CONTROLS_HINT, 13.0, CONTROLS_COLOR);
        });
}

fn label(parent: &mut ChildSpawnerCommands<'_>, text: &str, size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont::from_font_size(size),
        TextColor(color),
    ));
}

fn gap(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

fn action_button(parent: &mut ChildSpawnerCommands<'_>, action: MenuAction) {
    let (fill, border, text) = action.palette();
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                border: UiRect::all(Val::Px(2.0)),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(fill),
            BorderColor::all(border),
            action,
        ))
        .with_children(|button| label(button, action.label(), 18.0, text));
}

pub fn cleanup_main_menu(mut commands: Commands, roots: Query<Entity, With<MainMenuRoot>>) {
    for root in &roots {
        commands.entity(root).despawn();
    }
}

/// Press: start or quit.  Hover: brighten the label.
pub fn menu_button_system(
    buttons: Query<(&Interaction, &MenuAction, &Children), Changed<Interaction>>,
    mut labels: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, action, children) in &buttons {
        let tint = match (interaction, action) {
            (Interaction::Pressed, MenuAction::Play) => {
                next_state.set(GameState::Playing);
                continue;
            }
            (Interaction::Pressed, MenuAction::Quit) => {
                exit.write(AppExit::Success);
                continue;
            }
            (Interaction::Hovered, _) => Color::WHITE,
            (Interaction::None, _) => action.text_color(),
        };
        for child in children.iter() {
            if let Ok(mut color) = labels.get_mut(child) {
                color.0 = tint;
            }
        }
    }
}

/// Enter (either one) starts the match.
pub fn menu_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        next_state.set(GameState::Playing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_button_has_its_own_label_and_colours() {
        assert_eq!(MenuAction::Play.label(), "PLAY");
        assert_eq!(MenuAction::Quit.label(), "QUIT");
        assert_ne!(MenuAction::Play.palette().0, MenuAction::Quit.palette().0);
    }
}
