use anyhow::Context;
use bevy::prelude::*;
use bevy::window::WindowPlugin;

use hexmap_lib::config::HexMapConfig;
use hexmap_lib::graphics::GraphicsPlugin;
use hexmap_lib::grid::GridPlugin;
use hexmap_lib::player_interaction::InteractionPlugin;

/// Reads the map config from the JSON file passed as the first argument, if any.
fn load_config() -> anyhow::Result<HexMapConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(HexMapConfig::default());
    };

    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Could not read config file {path}"))?;
    HexMapConfig::from_json(&json).with_context(|| format!("Invalid config file {path}"))
}

fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hex map".to_string(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(config)
        .add_plugins((GridPlugin, GraphicsPlugin, InteractionPlugin))
        .run();

    Ok(())
}
