//! Translates player input into camera motion and grid commands.

use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::chunks::HexGrid;
use crate::config::HexMapConfig;
use crate::grid::{GridState, RegenerateGrid};

mod camera;
mod picking;

/// All of the code needed for users to interact with the map.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        info!("Building Interaction plugin...");
        app.add_plugins(InputManagerPlugin::<MapAction>::default())
            .init_resource::<ActionState<MapAction>>()
            .insert_resource(MapAction::default_input_map())
            .add_plugins((camera::CameraPlugin, picking::PickingPlugin))
            .add_systems(
                Update,
                toggle_grid_shape
                    .after(InteractionSystem::SelectTile)
                    .run_if(in_state(GridState::Ready)),
            );
    }
}

/// Public system sets for player interaction, used for system ordering and config
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InteractionSystem {
    /// Moves the camera
    MoveCamera,
    /// Rotates the grid around its pivot
    RotateGrid,
    /// Turns clicks into tile selections
    SelectTile,
}

/// Actions that act on the map itself, rather than the camera.
#[derive(Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum MapAction {
    /// Selects the tile under the cursor.
    Select,
    /// Rebuilds the map with the other configured shape.
    ToggleShape,
}

impl MapAction {
    /// The default key and mouse bindings.
    fn default_input_map() -> InputMap<MapAction> {
        let mut input_map = InputMap::default();
        input_map
            .insert(MouseButton::Left, MapAction::Select)
            .insert(KeyCode::Tab, MapAction::ToggleShape);
        input_map
    }
}

/// Swaps between the rectangular and hexagonal map.
fn toggle_grid_shape(
    actions: Res<ActionState<MapAction>>,
    config: Res<HexMapConfig>,
    grid: Res<HexGrid>,
    mut regenerate_events: EventWriter<RegenerateGrid>,
) {
    if actions.just_pressed(MapAction::ToggleShape) {
        regenerate_events.send(RegenerateGrid {
            shape: config.toggled_shape(grid.shape()),
        });
    }
}
