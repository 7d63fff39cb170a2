use crate::config::GameConfig;
use bevy::prelude::*;

/// Tags the first-person camera driven by the player's camera rig.
#[derive(Component)]
pub struct PlayerCamera;

/// Tags the court surface.
#[derive(Component)]
pub struct Court;

/// Spawn the first-person 3D camera at standing eye height.
pub fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, config.ground_y + config.eye_height, 0.0),
        PlayerCamera,
    ));
    eprintln!("[SETUP] Camera spawned");
}

/// Spawn the court plane and the sun.
pub fn setup_court(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameConfig>,
) {
    let size = config.ground_size;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.16, 0.42, 0.20),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::from_xyz(0.0, config.ground_y, 0.0),
        Court,
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 40.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    eprintln!("[SETUP] Court spawned ({size}×{size})");
}
