use bevy::ecs::event::Events;
use bevy::prelude::*;

use hexmap_lib::chunks::HexGrid;
use hexmap_lib::config::HexMapConfig;
use hexmap_lib::geometry::{axial_to_world, AxialCoord, GridShape};
use hexmap_lib::graphics::{ChunkIndex, GridRoot};
use hexmap_lib::grid::{RegenerateGrid, SelectTile};
use hexmap_lib::selection::SelectedTile;
use hexmap_lib::testing::{graphics_app, small_config};

/// A hexagon whose bounding rectangle has empty corner chunks.
fn hexagon_config() -> HexMapConfig {
    HexMapConfig {
        use_rectangle: false,
        hex_radius: 10,
        chunk_cols: 4,
        chunk_rows: 4,
        ..default()
    }
}

/// The sorted chunk indices of every spawned chunk entity.
fn spawned_chunks(app: &mut App) -> Vec<usize> {
    let mut query = app.world.query::<&ChunkIndex>();
    let mut indices: Vec<usize> = query.iter(&app.world).map(|index| index.0).collect();
    indices.sort_unstable();
    indices
}

/// The indices of the chunks that have any geometry.
fn non_empty_chunks(grid: &HexGrid) -> Vec<usize> {
    grid.chunks()
        .iter()
        .enumerate()
        .filter(|(_, chunk)| !chunk.mesh().is_empty())
        .map(|(index, _)| index)
        .collect()
}

#[test]
fn graphics_app_can_update() {
    let mut app = graphics_app(small_config());

    app.update()
}

#[test]
fn one_entity_per_non_empty_chunk() {
    let mut app = graphics_app(hexagon_config());
    app.update();

    let grid = app.world.resource::<HexGrid>();
    assert_eq!(grid.chunks().len(), 36);
    let expected = non_empty_chunks(grid);
    assert_eq!(expected.len(), 29);

    assert_eq!(spawned_chunks(&mut app), expected);
}

#[test]
fn chunks_are_children_of_the_grid_root() {
    let mut app = graphics_app(hexagon_config());
    app.update();

    let mut root_query = app.world.query_filtered::<Entity, With<GridRoot>>();
    let root = root_query.single(&app.world);

    let mut chunk_query = app.world.query_filtered::<&Parent, With<ChunkIndex>>();
    let parents: Vec<Entity> = chunk_query.iter(&app.world).map(|parent| parent.get()).collect();
    assert!(!parents.is_empty());
    assert!(parents.iter().all(|&parent| parent == root));
}

#[test]
fn regenerating_replaces_every_chunk_entity() {
    let mut app = graphics_app(hexagon_config());
    app.update();
    assert_eq!(spawned_chunks(&mut app).len(), 29);

    app.world
        .resource_mut::<Events<RegenerateGrid>>()
        .send(RegenerateGrid {
            shape: GridShape::Rectangle {
                width: 10,
                height: 10,
            },
        });
    app.update();
    app.update();

    assert_eq!(spawned_chunks(&mut app), (0..9).collect::<Vec<_>>());
}

#[test]
fn selection_outline_can_be_drawn() {
    let mut app = graphics_app(small_config());
    app.update();

    let hex_size = app.world.resource::<HexGrid>().hex_size();
    app.world
        .resource_mut::<Events<SelectTile>>()
        .send(SelectTile {
            local_point: axial_to_world(AxialCoord::new(2, 1), hex_size),
        });
    app.update();
    app.update();

    let selection = app.world.resource::<SelectedTile>().get();
    assert_eq!(selection.map(|selection| selection.hex), Some(AxialCoord::new(2, 1)));
}
