//! Camera controls and grid rotation.
//!
//! The orthographic camera looks straight down at the map and can pan and zoom.
//! Rather than rotating the camera, the map itself rotates around the selected tile,
//! or around the tile at the middle of the screen if nothing is selected.

use bevy::{prelude::*, render::camera::ScalingMode, window::PrimaryWindow};
use leafwing_input_manager::prelude::*;

use super::picking::{grid_local_to_world, screen_center_tile};
use super::InteractionSystem;
use crate::chunks::HexGrid;
use crate::config::HexMapConfig;
use crate::graphics::GridRoot;
use crate::selection::SelectedTile;

/// Camera logic
pub(super) struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<CameraAction>::default())
            .init_resource::<GridRotation>()
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (
                    camera_movement.in_set(InteractionSystem::MoveCamera),
                    rotate_grid
                        .in_set(InteractionSystem::RotateGrid)
                        .after(InteractionSystem::MoveCamera),
                ),
            );
    }
}

/// How far above the map the camera floats.
const CAMERA_HEIGHT: f32 = 10.;

/// How much of the remaining distance to its target the camera covers each frame.
const CAMERA_EASING: f32 = 0.9;

/// Rotation deltas smaller than this, in degrees, are not applied.
const MIN_ROTATION_DELTA: f32 = 0.0001;

/// Spawns a [`Camera3dBundle`] with an orthographic projection, and sets up the [`InputManagerBundle`] that handles camera motion
fn setup(mut commands: Commands, config: Res<HexMapConfig>) {
    commands
        .spawn(Camera3dBundle {
            transform: Transform::from_xyz(0., 0., CAMERA_HEIGHT).looking_at(Vec3::ZERO, Vec3::Y),
            projection: OrthographicProjection {
                scaling_mode: ScalingMode::FixedVertical(2. * config.camera_ortho_size),
                ..default()
            }
            .into(),
            ..default()
        })
        .insert(InputManagerBundle::<CameraAction> {
            input_map: CameraAction::default_input_map(),
            ..default()
        })
        .insert(CameraSettings::from(&*config));
}

/// Actions that manipulate the camera
#[derive(Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
enum CameraAction {
    /// Move the camera from side to side
    Pan,
    /// Reveal more of the map
    ZoomOut,
    /// Reveal less of the map
    ZoomIn,
    /// Rotates the map counterclockwise
    RotateLeft,
    /// Rotates the map clockwise
    RotateRight,
    /// Undoes all rotation
    ResetRotation,
    /// Doubles the pan speed
    Fast,
}

impl CameraAction {
    /// The default key bindings.
    fn default_input_map() -> InputMap<CameraAction> {
        let mut input_map = InputMap::default();
        input_map
            .insert(VirtualDPad::wasd(), CameraAction::Pan)
            .insert(VirtualDPad::arrow_keys(), CameraAction::Pan)
            .insert(KeyCode::Q, CameraAction::ZoomOut)
            .insert(KeyCode::Minus, CameraAction::ZoomOut)
            .insert(KeyCode::E, CameraAction::ZoomIn)
            .insert(KeyCode::Equals, CameraAction::ZoomIn)
            .insert(KeyCode::Z, CameraAction::RotateLeft)
            .insert(KeyCode::C, CameraAction::RotateRight)
            .insert(KeyCode::R, CameraAction::ResetRotation)
            .insert(KeyCode::ShiftLeft, CameraAction::Fast)
            .insert(KeyCode::ShiftRight, CameraAction::Fast);
        input_map
    }
}

/// Configure how the camera moves and feels.
#[derive(Component, Debug, Clone, PartialEq)]
struct CameraSettings {
    /// Half of the vertical extent of the view, in world units.
    ortho_size: f32,
    /// The smallest allowed `ortho_size`.
    zoom_min: f32,
    /// The largest allowed `ortho_size`.
    zoom_max: f32,
    /// Scaling factor for how fast the camera zooms in and out.
    zoom_speed: f32,
    /// Scaling factor for how fast the camera moves from side to side.
    pan_speed: f32,
    /// The point the camera is easing towards.
    target: Vec2,
}

impl From<&HexMapConfig> for CameraSettings {
    fn from(config: &HexMapConfig) -> Self {
        CameraSettings {
            ortho_size: config.camera_ortho_size,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            target: Vec2::ZERO,
        }
    }
}

/// How far the map has been rotated, in degrees.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
struct GridRotation {
    /// The rotation requested by the player.
    target_degrees: f32,
    /// The rotation currently applied to the [`GridRoot`].
    applied_degrees: f32,
}

/// Panning covers more ground when zoomed out.
fn effective_pan_speed(pan_speed: f32, fast: bool, ortho_size: f32) -> f32 {
    let boost = if fast { 2. } else { 1. };
    pan_speed * boost * (ortho_size * 0.15).max(1.)
}

/// Applies a zoom step, keeping the view size within the configured limits.
fn zoomed_ortho_size(settings: &CameraSettings, delta: f32) -> f32 {
    (settings.ortho_size + delta).clamp(settings.zoom_min, settings.zoom_max)
}

/// Handles camera motion
fn camera_movement(
    mut camera_query: Query<(
        &mut Transform,
        &mut Projection,
        &ActionState<CameraAction>,
        &mut CameraSettings,
    )>,
    time: Res<Time>,
) {
    let Ok((mut transform, mut projection, actions, mut settings)) = camera_query.get_single_mut()
    else {
        return;
    };
    let delta_seconds = time.delta_seconds();

    // Zoom
    let mut zoom_direction = 0.;
    if actions.pressed(CameraAction::ZoomOut) {
        zoom_direction += 1.;
    }
    if actions.pressed(CameraAction::ZoomIn) {
        zoom_direction -= 1.;
    }
    if zoom_direction != 0. {
        let delta = zoom_direction * settings.zoom_speed * delta_seconds;
        settings.ortho_size = zoomed_ortho_size(&settings, delta);

        if let Projection::Orthographic(orthographic) = &mut *projection {
            orthographic.scaling_mode = ScalingMode::FixedVertical(2. * settings.ortho_size);
        }
    }

    // Pan
    if actions.pressed(CameraAction::Pan) {
        if let Some(dual_axis_data) = actions.axis_pair(CameraAction::Pan) {
            let speed = effective_pan_speed(
                settings.pan_speed,
                actions.pressed(CameraAction::Fast),
                settings.ortho_size,
            );
            settings.target += dual_axis_data.xy() * speed * delta_seconds;
        }
    }

    let target = settings.target.extend(CAMERA_HEIGHT);
    transform.translation = transform.translation.lerp(target, CAMERA_EASING);
}

/// Rotates the [`GridRoot`] around the selected tile, or the tile at the middle of the screen.
#[allow(clippy::too_many_arguments)]
fn rotate_grid(
    camera_query: Query<(&Camera, &GlobalTransform, &ActionState<CameraAction>)>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut root_query: Query<&mut Transform, With<GridRoot>>,
    grid: Option<Res<HexGrid>>,
    selected_tile: Res<SelectedTile>,
    config: Res<HexMapConfig>,
    mut rotation: ResMut<GridRotation>,
    time: Res<Time>,
) {
    let Ok((camera, camera_transform, actions)) = camera_query.get_single() else {
        return;
    };

    let mut direction = 0.;
    if actions.pressed(CameraAction::RotateLeft) {
        direction += 1.;
    }
    if actions.pressed(CameraAction::RotateRight) {
        direction -= 1.;
    }
    if actions.just_pressed(CameraAction::ResetRotation) {
        rotation.target_degrees = 0.;
    }
    rotation.target_degrees += direction * config.rotation_speed_degrees * time.delta_seconds();

    let delta_degrees = rotation.target_degrees - rotation.applied_degrees;
    if delta_degrees.abs() <= MIN_ROTATION_DELTA {
        return;
    }

    let Some(grid) = grid else {
        return;
    };
    let Ok(mut grid_transform) = root_query.get_single_mut() else {
        return;
    };

    let pivot = match selected_tile.get() {
        Some(selection) => grid_local_to_world(&grid_transform, selection.center),
        None => window_query
            .get_single()
            .ok()
            .and_then(|window| {
                screen_center_tile(
                    camera,
                    camera_transform,
                    window,
                    &grid_transform,
                    grid.hex_size(),
                )
            })
            .unwrap_or(Vec3::ZERO),
    };

    grid_transform.rotate_around(pivot, Quat::from_rotation_z(delta_degrees.to_radians()));
    rotation.applied_degrees = rotation.target_degrees;
}
