//! Builds the [`HexGrid`] resource and keeps it in sync with grid commands.
//!
//! This plugin is headless: it only needs `MinimalPlugins`, and leaves drawing and input to
//! [`GraphicsPlugin`](crate::graphics::GraphicsPlugin) and
//! [`InteractionPlugin`](crate::player_interaction::InteractionPlugin).

use bevy::prelude::*;

use crate::chunks::HexGrid;
use crate::config::HexMapConfig;
use crate::geometry::GridShape;
use crate::selection::{locate, SelectedTile};

/// Creates the grid on startup, then rebuilds it and selects tiles on request.
pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        info!("Building Grid plugin...");
        app.add_state::<GridState>()
            .init_resource::<HexMapConfig>()
            .init_resource::<SelectedTile>()
            .add_event::<SelectTile>()
            .add_event::<RegenerateGrid>()
            .add_systems(Startup, build_grid)
            .add_systems(
                Update,
                (
                    regenerate_grid.in_set(GridSystem::Regenerate),
                    select_tile
                        .in_set(GridSystem::Select)
                        .after(GridSystem::Regenerate),
                )
                    .run_if(in_state(GridState::Ready)),
            );
    }
}

/// Tracks whether the grid has been built yet.
#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridState {
    /// The grid has not been built, either because startup has not run or because the config was invalid.
    #[default]
    Bootstrapping,
    /// The [`HexGrid`] resource exists and can be drawn and queried.
    Ready,
}

/// System sets for grid upkeep.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GridSystem {
    /// Handles [`RegenerateGrid`] events.
    Regenerate,
    /// Handles [`SelectTile`] events.
    Select,
}

/// Selects the tile under a point, given in the grid's local space.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SelectTile {
    /// A point in the grid's local space.
    pub local_point: Vec2,
}

/// Clears the grid and builds it again with a new shape.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenerateGrid {
    /// The shape of the new grid.
    pub shape: GridShape,
}

/// Creates the [`HexGrid`] described by the [`HexMapConfig`].
///
/// Invalid configs are reported, and leave the app in [`GridState::Bootstrapping`].
fn build_grid(
    mut commands: Commands,
    config: Res<HexMapConfig>,
    mut next_state: ResMut<NextState<GridState>>,
) {
    info!("Building hex grid...");

    match HexGrid::from_config(&config) {
        Ok(grid) => {
            info!(
                "Built {} tiles in {} chunks.",
                grid.cell_count(),
                grid.chunks().len()
            );
            commands.insert_resource(grid);
            next_state.set(GridState::Ready);
        }
        Err(error) => error!("Could not build the hex grid: {error}"),
    }
}

/// Rebuilds the grid when a [`RegenerateGrid`] event is received.
///
/// Only the most recent event of each frame is used.
fn regenerate_grid(
    mut events: EventReader<RegenerateGrid>,
    mut grid: ResMut<HexGrid>,
    mut selected_tile: ResMut<SelectedTile>,
) {
    let Some(request) = events.read().last().copied() else {
        return;
    };

    grid.regenerate(request.shape);
    selected_tile.clear();
    info!(
        "Regenerated hex grid as {:?}: {} tiles in {} chunks.",
        request.shape,
        grid.cell_count(),
        grid.chunks().len()
    );
}

/// Updates the [`SelectedTile`] when a [`SelectTile`] event is received.
fn select_tile(
    mut events: EventReader<SelectTile>,
    grid: Res<HexGrid>,
    mut selected_tile: ResMut<SelectedTile>,
) {
    if let Some(request) = events.read().last() {
        let selection = locate(request.local_point, grid.hex_size());
        selected_tile.set(selection);
    }
}
