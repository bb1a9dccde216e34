//! Apps and fixtures shared by integration tests and benchmarks.

use bevy::gizmos::GizmoPlugin;
use bevy::prelude::*;
use bevy::render::render_resource::Shader;

use crate::config::HexMapConfig;
use crate::graphics::GraphicsPlugin;
use crate::grid::GridPlugin;

/// Just [`MinimalPlugins`].
pub fn minimal_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

/// A headless app that builds and maintains a grid described by `config`.
pub fn grid_app(config: HexMapConfig) -> App {
    let mut app = minimal_app();
    app.insert_resource(config).add_plugins(GridPlugin);
    app
}

/// A headless [`grid_app`] that also spawns chunk meshes and draws the selection outline.
///
/// Assets are stored but never sent to a GPU.
pub fn graphics_app(config: HexMapConfig) -> App {
    let mut app = grid_app(config);
    app.add_plugins(AssetPlugin::default())
        .init_asset::<Shader>()
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .add_plugins((GizmoPlugin, GraphicsPlugin));
    app
}

/// A small rectangular map, split into a handful of chunks.
pub fn small_config() -> HexMapConfig {
    HexMapConfig {
        use_rectangle: true,
        rect_width: 10,
        rect_height: 10,
        chunk_cols: 4,
        chunk_rows: 4,
        ..default()
    }
}
