//! Draws the map's chunks and the selection outline.

use bevy::prelude::*;

use crate::chunks::HexGrid;
use crate::config::HexMapConfig;
use crate::grid::GridState;
use crate::selection::SelectedTile;

mod chunk_meshes;
pub(crate) use chunk_meshes::chunk_to_mesh;

/// Adds all logic required to render the map.
pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        info!("Building Graphics plugin...");
        app.add_systems(Startup, (spawn_grid_root, configure_gizmos))
            .add_systems(
                Update,
                (
                    spawn_chunk_meshes.run_if(resource_exists_and_changed::<HexGrid>()),
                    draw_selection_outline.run_if(in_state(GridState::Ready)),
                ),
            );
    }
}

/// The parent of every chunk entity.
///
/// Its [`Transform`] maps grid-local space into world space.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct GridRoot;

/// The chunk drawn by an entity, as an index into [`HexGrid::chunks`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkIndex(pub usize);

/// The material shared by every chunk.
#[derive(Resource, Debug, Clone)]
struct ChunkMaterial(Handle<StandardMaterial>);

/// How far in front of the tiles the selection outline is drawn.
const OUTLINE_OFFSET: f32 = 0.002;

/// Spawns the [`GridRoot`] and creates the shared [`ChunkMaterial`].
fn spawn_grid_root(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<HexMapConfig>,
) {
    commands.spawn((SpatialBundle::default(), GridRoot, Name::new("Hex grid")));

    // Vertex colors carry the tint, and tiles wind clockwise as seen by the camera
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        cull_mode: None,
        ..default()
    });
    commands.insert_resource(ChunkMaterial(material));
    commands.insert_resource(ClearColor(config.background_color()));
}

/// Draws the selection outline with a constant on-screen width.
fn configure_gizmos(mut gizmo_config: ResMut<GizmoConfig>, config: Res<HexMapConfig>) {
    gizmo_config.line_width = config.highlight_width_pixels;
}

/// Replaces every chunk entity whenever the [`HexGrid`] is built or rebuilt.
fn spawn_chunk_meshes(
    mut commands: Commands,
    grid: Res<HexGrid>,
    root_query: Query<Entity, With<GridRoot>>,
    chunk_material: Res<ChunkMaterial>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Ok(root) = root_query.get_single() else {
        warn!("No grid root to attach chunks to.");
        return;
    };

    commands.entity(root).despawn_descendants();
    commands.entity(root).with_children(|parent| {
        for (index, chunk) in grid.chunks().iter().enumerate() {
            if chunk.mesh().is_empty() {
                continue;
            }

            let range = chunk.range();
            parent.spawn((
                PbrBundle {
                    mesh: meshes.add(chunk_to_mesh(chunk.mesh())),
                    material: chunk_material.0.clone(),
                    ..default()
                },
                ChunkIndex(index),
                Name::new(format!("Chunk {} {}", range.col0, range.row0)),
            ));
        }
    });

    info!("Spawned meshes for {} chunks.", grid.chunks().len());
}

/// Outlines the [`SelectedTile`], following the grid's current transform.
fn draw_selection_outline(
    selected_tile: Res<SelectedTile>,
    grid: Res<HexGrid>,
    root_query: Query<&GlobalTransform, With<GridRoot>>,
    config: Res<HexMapConfig>,
    mut gizmos: Gizmos,
) {
    let Some(selection) = selected_tile.get() else {
        return;
    };
    let Ok(root_transform) = root_query.get_single() else {
        return;
    };

    let corners = selection
        .outline(grid.hex_size())
        .map(|corner| root_transform.transform_point(corner.extend(OUTLINE_OFFSET)));

    gizmos.linestrip(
        corners.into_iter().chain(std::iter::once(corners[0])),
        config.highlight_color(),
    );
}
