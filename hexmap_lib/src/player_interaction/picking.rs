//! Turns the cursor position into a point on the map.
//!
//! The map lies in the `z = 0` plane of its [`GridRoot`], which may be rotated.
//! Cursor rays are intersected with the world `z = 0` plane, then moved into grid-local space.

use bevy::{prelude::*, window::PrimaryWindow};
use leafwing_input_manager::prelude::ActionState;

use super::{InteractionSystem, MapAction};
use crate::geometry::HexSize;
use crate::graphics::GridRoot;
use crate::grid::{GridState, SelectTile};
use crate::selection::locate;

/// Selects tiles under the cursor.
pub(super) struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            select_tile_under_cursor
                .in_set(InteractionSystem::SelectTile)
                .after(InteractionSystem::RotateGrid)
                .run_if(in_state(GridState::Ready)),
        );
    }
}

/// Intersects the ray through `screen_pos` with the world `z = 0` plane.
pub(super) fn screen_to_world(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    screen_pos: Vec2,
) -> Option<Vec3> {
    let ray = camera.viewport_to_world(camera_transform, screen_pos)?;
    let distance = ray.intersect_plane(Vec3::ZERO, Vec3::Z)?;
    Some(ray.get_point(distance))
}

/// Moves a world position into the grid's local space.
#[must_use]
pub(super) fn world_to_grid_local(grid_transform: &Transform, world_pos: Vec3) -> Vec2 {
    grid_transform
        .compute_affine()
        .inverse()
        .transform_point3(world_pos)
        .truncate()
}

/// Moves a grid-local position into world space.
#[must_use]
pub(super) fn grid_local_to_world(grid_transform: &Transform, local_pos: Vec2) -> Vec3 {
    grid_transform.transform_point(local_pos.extend(0.))
}

/// The world position of the center of the tile nearest to the middle of the screen.
pub(super) fn screen_center_tile(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    window: &Window,
    grid_transform: &Transform,
    hex_size: HexSize,
) -> Option<Vec3> {
    let screen_center = Vec2::new(window.width(), window.height()) / 2.;
    let world_pos = screen_to_world(camera, camera_transform, screen_center)?;
    let selection = locate(world_to_grid_local(grid_transform, world_pos), hex_size);

    Some(grid_local_to_world(grid_transform, selection.center))
}

/// Sends a [`SelectTile`] event when the player clicks on the map.
fn select_tile_under_cursor(
    actions: Res<ActionState<MapAction>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    root_query: Query<&Transform, With<GridRoot>>,
    mut select_events: EventWriter<SelectTile>,
) {
    if !actions.just_pressed(MapAction::Select) {
        return;
    }

    let Ok(window) = window_query.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Ok(grid_transform) = root_query.get_single() else {
        return;
    };

    if let Some(world_pos) = screen_to_world(camera, camera_transform, cursor_pos) {
        select_events.send(SelectTile {
            local_point: world_to_grid_local(grid_transform, world_pos),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_local_conversions_are_invertable() {
        let mut grid_transform = Transform::default();
        grid_transform.rotate_around(Vec3::new(3., -1., 0.), Quat::from_rotation_z(0.7));

        for local_pos in [Vec2::ZERO, Vec2::new(12.5, -3.25), Vec2::new(-40., 17.)] {
            let world_pos = grid_local_to_world(&grid_transform, local_pos);
            let round_trip = world_to_grid_local(&grid_transform, world_pos);

            assert!((round_trip - local_pos).length() < 1e-3);
        }
    }

    #[test]
    fn unrotated_grid_is_identity() {
        let grid_transform = Transform::default();
        let world_pos = Vec3::new(4., 5., 0.);

        assert_eq!(world_to_grid_local(&grid_transform, world_pos), Vec2::new(4., 5.));
    }
}
