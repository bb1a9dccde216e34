use bevy::ecs::event::Events;
use bevy::prelude::*;

use hexmap_lib::chunks::HexGrid;
use hexmap_lib::config::HexMapConfig;
use hexmap_lib::geometry::{axial_to_world, AxialCoord, GridShape};
use hexmap_lib::grid::{GridState, RegenerateGrid, SelectTile};
use hexmap_lib::selection::SelectedTile;
use hexmap_lib::testing::{grid_app, minimal_app, small_config};

fn grid_state(app: &App) -> GridState {
    *app.world.resource::<State<GridState>>().get()
}

#[test]
fn minimal_app_can_update() {
    let mut app = minimal_app();

    app.update()
}

#[test]
fn grid_is_ready_after_startup() {
    let mut app = grid_app(small_config());
    app.update();

    assert_eq!(grid_state(&app), GridState::Ready);
    let grid = app.world.resource::<HexGrid>();
    assert_eq!(grid.chunks().len(), 9);
    assert_eq!(grid.cell_count(), 100);
}

#[test]
fn invalid_config_never_becomes_ready() {
    let mut app = grid_app(HexMapConfig {
        hex_size: 0.,
        ..small_config()
    });
    app.update();
    app.update();

    assert_eq!(grid_state(&app), GridState::Bootstrapping);
    assert!(app.world.get_resource::<HexGrid>().is_none());
}

#[test]
fn select_tile_event_updates_selection() {
    let mut app = grid_app(small_config());
    app.update();

    let hex_size = app.world.resource::<HexGrid>().hex_size();
    let target = AxialCoord::new(3, -2);
    let local_point = axial_to_world(target, hex_size) + Vec2::new(0.1, -0.05);
    app.world
        .resource_mut::<Events<SelectTile>>()
        .send(SelectTile { local_point });
    app.update();

    let selection = app
        .world
        .resource::<SelectedTile>()
        .get()
        .expect("A tile should be selected");
    assert_eq!(selection.hex, target);
    assert_eq!(selection.center, axial_to_world(target, hex_size));
}

#[test]
fn regenerating_replaces_grid_and_clears_selection() {
    let mut app = grid_app(small_config());
    app.update();

    app.world
        .resource_mut::<Events<SelectTile>>()
        .send(SelectTile {
            local_point: Vec2::ZERO,
        });
    app.update();
    assert!(app.world.resource::<SelectedTile>().get().is_some());

    app.world
        .resource_mut::<Events<RegenerateGrid>>()
        .send(RegenerateGrid {
            shape: GridShape::Hexagon { radius: 3 },
        });
    app.update();

    let grid = app.world.resource::<HexGrid>();
    assert_eq!(grid.shape(), GridShape::Hexagon { radius: 3 });
    assert_eq!(grid.cell_count(), 37);
    assert!(app.world.resource::<SelectedTile>().get().is_none());
}
