//! Scene and HUD collaborators: everything here only *reads* [`Game`].
//!
//! ## Layer Model
//!
//! | Layer              | Technology | Source                              |
//! |--------------------|------------|-------------------------------------|
//! | Court surface      | `Mesh3d`   | spawned once by `graphics`          |
//! | Court lines        | Gizmos     | `GameConfig::ground_size`           |
//! | Kadosh bodies      | Gizmos     | `EnemyManager::enemies`             |
//! | Corpses            | Gizmos     | `EnemyManager::corpses`             |
//! | Balls in flight    | Gizmos     | weapon + enemy projectile lists     |
//! | HP / ammo / kills  | Bevy UI    | `Game::hud`                         |
//! | Name tags, taunts  | Bevy UI    | enemy positions projected to screen |
//! | Game-over overlay  | Bevy UI    | `Game::is_game_over`                |
//!
//! ## System Responsibilities
//!
//! | System                     | Schedule           | Purpose                                 |
//! |----------------------------|--------------------|-----------------------------------------|
//! | `setup_hud`                | `OnEnter(Playing)` | Spawn HUD, crosshair, game-over overlay |
//! | `camera_follow_system`     | Update             | Copy the camera rig onto the 3D camera  |
//! | `scene_gizmo_system`       | Update             | Draw court lines, Kadosh, corpses, balls |
//! | `hud_update_system`        | Update             | Refresh HUD text and HP bar             |
//! | `name_tag_system`          | Update             | Re-place name tags and taunt bubbles    |
//! | `game_over_overlay_system` | Update             | Show/hide overlay, restart-hold meter   |
//!
//! Every system returns early when the camera or the `Game` resource is
//! missing, so a partial scene never disturbs the simulation.

use crate::enemy::Enemy;
use crate::game::{Game, HudSnapshot};
use crate::graphics::PlayerCamera;
use crate::menu::GameState;
use crate::simulation::game_tick_system;
use crate::weapon::{Projectile, ProjectileOwner};
use bevy::prelude::*;

// ── Look ──────────────────────────────────────────────────────────────────────

const BODY_RADIUS: f32 = 0.35;
const BODY_LENGTH: f32 = 0.8;
const BODY_CENTER: f32 = 0.9;
const HEAD_RADIUS: f32 = 0.25;
const HEAD_CENTER: f32 = 1.6;
const RACKET_RADIUS: f32 = 0.32;
const PLAYER_BALL_RADIUS: f32 = 0.12;
const ENEMY_BALL_RADIUS: f32 = 0.1;
/// Name tags float this far above the enemy's feet.
const NAME_TAG_HEIGHT: f32 = 2.2;
/// Taunt bubbles sit this many pixels above the name tag.
const TAUNT_OFFSET_PX: f32 = 28.0;

fn body_color() -> Color {
    Color::srgb(0.55, 0.27, 0.07)
}
fn head_color() -> Color {
    Color::srgb(1.0, 0.86, 0.67)
}
fn racket_color() -> Color {
    Color::srgb(0.2, 0.2, 0.2)
}
fn corpse_color() -> Color {
    Color::srgb(0.35, 0.22, 0.12)
}
fn ball_color() -> Color {
    Color::srgb(1.0, 0.92, 0.23)
}
fn line_color() -> Color {
    Color::srgba(1.0, 1.0, 1.0, 0.6)
}
fn hp_fill_color() -> Color {
    Color::srgb(0.85, 0.18, 0.18)
}
fn hud_text_color() -> Color {
    Color::srgb(0.95, 0.95, 0.9)
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Which HUD readout a text node shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Hp,
    Magazine,
    Kills,
    Crouch,
    Reload,
}

/// Inner bar of the HP gauge; its width tracks HP.
#[derive(Component)]
pub struct HpBarFill;

#[derive(Component)]
pub struct GameOverOverlay;

#[derive(Component)]
pub struct RestartHoldText;

/// A name tag or taunt bubble; all are rebuilt every frame.
#[derive(Component)]
pub struct NameTag;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct GameRenderingPlugin;

impl Plugin for GameRenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(
                Update,
                (
                    camera_follow_system,
                    scene_gizmo_system,
                    hud_update_system,
                    name_tag_system.after(camera_follow_system),
                    game_over_overlay_system,
                )
                    .after(game_tick_system)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ── OnEnter(Playing): HUD ─────────────────────────────────────────────────────

fn hud_text(label: &str, size: f32, kind: HudText) -> impl Bundle {
    (
        Text::new(label),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(hud_text_color()),
        kind,
    )
}

pub fn setup_hud(mut commands: Commands) {
    // ── Top-left: HP bar, ammo, kills ─────────────────────────────────────────
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|hud| {
            hud.spawn((
                Node {
                    width: Val::Px(220.0),
                    height: Val::Px(18.0),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                BorderColor::all(Color::srgb(0.9, 0.9, 0.9)),
            ))
            .with_children(|bar| {
                bar.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(hp_fill_color()),
                    HpBarFill,
                ));
            });
            hud.spawn(hud_text("HP 100", 16.0, HudText::Hp));
            hud.spawn(hud_text("", 22.0, HudText::Magazine));
            hud.spawn(hud_text("Kills: 0", 18.0, HudText::Kills));
            hud.spawn(hud_text("", 16.0, HudText::Reload));
            hud.spawn(hud_text("", 16.0, HudText::Crouch));
        });

    // ── Crosshair ─────────────────────────────────────────────────────────────
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|c| {
            c.spawn((
                Text::new("+"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
            ));
        });

    // ── Game-over overlay (hidden until the player dies) ──────────────────────
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            ZIndex(300),
            Visibility::Hidden,
            GameOverOverlay,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new("GAME, SET, MATCH"),
                TextFont {
                    font_size: 46.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.25, 0.25)),
            ));
            overlay.spawn((
                Text::new("Hold click to restart"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(hud_text_color()),
                RestartHoldText,
            ));
        });

    eprintln!("[SETUP] HUD spawned");
}

// ── Update: camera ────────────────────────────────────────────────────────────

/// Place the 3D camera at the player's smoothed eye point.
pub fn camera_follow_system(
    game: Option<Res<Game>>,
    mut q_camera: Query<&mut Transform, With<PlayerCamera>>,
) {
    let Some(game) = game else { return };
    let Ok(mut transform) = q_camera.single_mut() else {
        return;
    };
    let rig = game.camera();
    transform.translation = rig.position;
    transform.rotation = rig.rotation();
}

// ── Update: gizmos ────────────────────────────────────────────────────────────

pub fn scene_gizmo_system(game: Option<Res<Game>>, mut gizmos: Gizmos) {
    let Some(game) = game else { return };
    let cfg = game.config();
    let now = game.now();

    // Court boundary and centre lines, drawn just above the surface.
    let h = cfg.ground_size / 2.0;
    let y = cfg.ground_y + 0.01;
    let corners = [
        Vec3::new(-h, y, -h),
        Vec3::new(h, y, -h),
        Vec3::new(h, y, h),
        Vec3::new(-h, y, h),
    ];
    for i in 0..corners.len() {
        gizmos.line(corners[i], corners[(i + 1) % corners.len()], line_color());
    }
    gizmos.line(Vec3::new(-h, y, 0.0), Vec3::new(h, y, 0.0), line_color());
    gizmos.line(Vec3::new(0.0, y, -h), Vec3::new(0.0, y, h), line_color());

    for enemy in game.enemies().enemies() {
        draw_enemy(&mut gizmos, enemy, enemy.swing_angle(now, cfg));
    }

    let body = Capsule3d::new(BODY_RADIUS, BODY_LENGTH);
    for corpse in game.enemies().corpses() {
        let t = corpse.fallen_transform(cfg.corpse_rest_height);
        gizmos.primitive_3d(
            &body,
            Isometry3d::new(t.transform_point(Vec3::Y * BODY_CENTER), t.rotation),
            corpse_color(),
        );
        gizmos.sphere(
            Isometry3d::from_translation(t.transform_point(Vec3::Y * HEAD_CENTER)),
            HEAD_RADIUS,
            head_color(),
        );
    }

    for ball in game
        .weapon()
        .projectiles()
        .iter()
        .chain(game.enemies().projectiles())
    {
        draw_ball(&mut gizmos, ball);
    }
}

fn draw_enemy(gizmos: &mut Gizmos, enemy: &Enemy, swing: f32) {
    let facing = Quat::from_rotation_y(enemy.yaw);
    gizmos.primitive_3d(
        &Capsule3d::new(BODY_RADIUS, BODY_LENGTH),
        Isometry3d::new(enemy.position + Vec3::Y * BODY_CENTER, facing),
        body_color(),
    );
    gizmos.sphere(
        Isometry3d::from_translation(enemy.position + Vec3::Y * HEAD_CENTER),
        HEAD_RADIUS,
        head_color(),
    );
    let face = enemy.racket_point();
    let tilt = facing * Quat::from_rotation_x(swing);
    gizmos.circle(Isometry3d::new(face, tilt), RACKET_RADIUS, racket_color());
    let grip = face + tilt * Vec3::new(0.0, -(RACKET_RADIUS + 0.3), 0.0);
    gizmos.line(face, grip, racket_color());
}

fn draw_ball(gizmos: &mut Gizmos, ball: &Projectile) {
    let radius = match ball.owner {
        ProjectileOwner::Player => PLAYER_BALL_RADIUS,
        ProjectileOwner::Enemy => ENEMY_BALL_RADIUS,
    };
    let spin = Quat::from_rotation_x(ball.spin) * Quat::from_rotation_z(ball.spin * 0.7);
    gizmos.sphere(Isometry3d::new(ball.position, spin), radius, ball_color());
}

// ── Update: HUD ───────────────────────────────────────────────────────────────

fn magazine_pips(hud: &HudSnapshot) -> String {
    let full = hud.magazine.min(hud.magazine_size) as usize;
    let empty = hud.magazine_size as usize - full;
    format!("{}{}", "●".repeat(full), "○".repeat(empty))
}

pub fn hud_update_system(
    game: Option<Res<Game>>,
    mut texts: Query<(&HudText, &mut Text)>,
    mut fill: Query<&mut Node, With<HpBarFill>>,
) {
    let Some(game) = game else { return };
    let hud = game.hud();

    for (kind, mut text) in texts.iter_mut() {
        let value = match kind {
            HudText::Hp => format!("HP {:.0}", hud.hp),
            HudText::Magazine => magazine_pips(&hud),
            HudText::Kills => format!("Kills: {}", hud.kills),
            HudText::Crouch if hud.crouching => "CROUCHING".to_string(),
            HudText::Reload if hud.reloading => {
                format!("RELOADING {:.0}%", hud.reload_progress * 100.0)
            }
            HudText::Crouch | HudText::Reload => String::new(),
        };
        if text.0 != value {
            text.0 = value;
        }
    }

    if let Ok(mut node) = fill.single_mut() {
        let pct = if hud.max_hp > 0.0 {
            (hud.hp / hud.max_hp * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        node.width = Val::Percent(pct);
    }
}

/// Rebuild name tags (and taunt bubbles) over every live Kadosh in view.
pub fn name_tag_system(
    mut commands: Commands,
    game: Option<Res<Game>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<PlayerCamera>>,
    q_tags: Query<Entity, With<NameTag>>,
) {
    for entity in q_tags.iter() {
        commands.entity(entity).despawn();
    }
    let Some(game) = game else { return };
    let Ok((camera, camera_transform)) = q_camera.single() else {
        return;
    };

    for enemy in game.enemies().enemies() {
        if enemy.dead {
            continue;
        }
        let anchor = enemy.position + Vec3::Y * NAME_TAG_HEIGHT;
        // Behind the camera or off the viewport: no tag.
        let Ok(screen) = camera.world_to_viewport(camera_transform, anchor) else {
            continue;
        };
        spawn_tag(&mut commands, screen, &enemy.nickname, 14.0, hud_text_color());
        if let Some(taunt) = &enemy.taunt {
            let bubble = screen - Vec2::Y * TAUNT_OFFSET_PX;
            spawn_tag(&mut commands, bubble, taunt, 13.0, Color::srgb(1.0, 0.95, 0.55));
        }
    }
}

fn spawn_tag(commands: &mut Commands, at: Vec2, label: &str, size: f32, color: Color) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(at.x),
            top: Val::Px(at.y),
            ..default()
        },
        Text::new(label),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        NameTag,
    ));
}

pub fn game_over_overlay_system(
    game: Option<Res<Game>>,
    mut q_overlay: Query<&mut Visibility, With<GameOverOverlay>>,
    mut q_hold: Query<&mut Text, With<RestartHoldText>>,
) {
    let Some(game) = game else { return };
    let Ok(mut visibility) = q_overlay.single_mut() else {
        return;
    };
    let dead = game.is_game_over();
    *visibility = if dead {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    if !dead {
        return;
    }
    if let Ok(mut text) = q_hold.single_mut() {
        let progress = game.restart_progress();
        text.0 = if progress > 0.0 {
            format!("Restarting… {:.0}%", progress * 100.0)
        } else {
            format!("{} kills. Hold click to restart", game.kills())
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(magazine: u32) -> HudSnapshot {
        HudSnapshot {
            hp: 100.0,
            max_hp: 100.0,
            magazine,
            magazine_size: 3,
            reloading: false,
            reload_progress: 0.0,
            kills: 0,
            crouching: false,
            dead: false,
            restart_progress: 0.0,
        }
    }

    #[test]
    fn pips_show_loaded_then_spent() {
        assert_eq!(magazine_pips(&snapshot(3)), "●●●");
        assert_eq!(magazine_pips(&snapshot(1)), "●○○");
        assert_eq!(magazine_pips(&snapshot(0)), "○○○");
    }
}
