//! Tunable settings for the hex map, read once when the grid is created.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chunks::{ChunkDimensions, TilePalette};
use crate::geometry::{GridShape, HexSize, InvalidArgument};

/// Controls the shape of the map, how it is drawn and how the camera feels.
///
/// Colors are stored as sRGB `[r, g, b]` triples.
/// Any field missing from a config file falls back to its default value.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexMapConfig {
    /// Half of the vertical extent of the view, in world units.
    pub camera_ortho_size: f32,
    /// The smallest allowed [`HexMapConfig::camera_ortho_size`] while zooming.
    pub zoom_min: f32,
    /// The largest allowed [`HexMapConfig::camera_ortho_size`] while zooming.
    pub zoom_max: f32,
    /// How fast the camera pans, in world units per second before scaling by zoom.
    pub pan_speed: f32,
    /// How fast the camera zooms, in world units per second.
    pub zoom_speed: f32,
    /// How fast the map rotates, in degrees per second.
    pub rotation_speed_degrees: f32,
    /// Should the map be a rectangle rather than a hexagon?
    pub use_rectangle: bool,
    /// The radius of the hexagonal map.
    pub hex_radius: i32,
    /// The number of tiles in each row of the rectangular map.
    pub rect_width: i32,
    /// The number of rows of the rectangular map.
    pub rect_height: i32,
    /// The distance from the center of each tile to its corners, in world units.
    pub hex_size: f32,
    /// The maximum number of columns in each chunk.
    pub chunk_cols: i32,
    /// The maximum number of rows in each chunk.
    pub chunk_rows: i32,
    /// The tint of tiles in color class 0.
    pub base_color: [f32; 3],
    /// The tint of tiles in color class 1.
    pub alt_color: [f32; 3],
    /// The color of the selection outline.
    pub highlight_color: [f32; 3],
    /// The width of the selection outline, in screen pixels.
    pub highlight_width_pixels: f32,
    /// The color behind the map.
    pub background_color: [f32; 3],
}

impl Default for HexMapConfig {
    fn default() -> Self {
        HexMapConfig {
            camera_ortho_size: 60.,
            zoom_min: 2.,
            zoom_max: 60.,
            pan_speed: 8.,
            zoom_speed: 20.,
            rotation_speed_degrees: 90.,
            use_rectangle: true,
            hex_radius: 180,
            rect_width: 360,
            rect_height: 360,
            hex_size: 0.8,
            chunk_cols: 64,
            chunk_rows: 64,
            base_color: [0.18, 0.6, 0.75],
            alt_color: [0.15, 0.5, 0.65],
            highlight_color: [1., 0.92, 0.016],
            highlight_width_pixels: 3.,
            background_color: [0.05, 0.06, 0.08],
        }
    }
}

impl HexMapConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The shape of the map that should be built on startup.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        if self.use_rectangle {
            self.rectangle()
        } else {
            self.hexagon()
        }
    }

    /// The rectangular map described by this config.
    #[must_use]
    pub fn rectangle(&self) -> GridShape {
        GridShape::Rectangle {
            width: self.rect_width,
            height: self.rect_height,
        }
    }

    /// The hexagonal map described by this config.
    #[must_use]
    pub fn hexagon(&self) -> GridShape {
        GridShape::Hexagon {
            radius: self.hex_radius,
        }
    }

    /// Returns whichever of the two configured shapes `current` is not.
    #[must_use]
    pub fn toggled_shape(&self, current: GridShape) -> GridShape {
        if current == self.rectangle() {
            self.hexagon()
        } else {
            self.rectangle()
        }
    }

    /// The validated tile size.
    pub fn hex_size(&self) -> Result<HexSize, InvalidArgument> {
        HexSize::new(self.hex_size)
    }

    /// The validated chunk size.
    pub fn chunk_dimensions(&self) -> Result<ChunkDimensions, InvalidArgument> {
        ChunkDimensions::new(self.chunk_cols, self.chunk_rows)
    }

    /// The tile tints, converted for use as vertex colors.
    #[must_use]
    pub fn palette(&self) -> TilePalette {
        TilePalette::new(srgb(self.base_color), srgb(self.alt_color))
    }

    /// The color of the selection outline.
    #[must_use]
    pub fn highlight_color(&self) -> Color {
        srgb(self.highlight_color)
    }

    /// The color behind the map.
    #[must_use]
    pub fn background_color(&self) -> Color {
        srgb(self.background_color)
    }
}

/// Converts an `[r, g, b]` triple into an opaque [`Color`].
fn srgb([r, g, b]: [f32; 3]) -> Color {
    Color::rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HexMapConfig::default();

        assert!(config.hex_size().is_ok());
        assert!(config.chunk_dimensions().is_ok());
        assert_eq!(
            config.shape(),
            GridShape::Rectangle {
                width: 360,
                height: 360
            }
        );
    }

    #[test]
    fn default_palette_matches_tile_palette_default() {
        assert_eq!(HexMapConfig::default().palette(), TilePalette::default());
    }

    #[test]
    fn missing_json_fields_use_defaults() {
        let config =
            HexMapConfig::from_json(r#"{ "use_rectangle": false, "hex_radius": 12 }"#).unwrap();

        assert_eq!(config.shape(), GridShape::Hexagon { radius: 12 });
        assert_eq!(config.hex_size, 0.8);
        assert_eq!(config.chunk_cols, 64);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(HexMapConfig::from_json(r#"{ "hex_size": "big" }"#).is_err());
    }

    #[test]
    fn invalid_values_are_reported() {
        let config = HexMapConfig {
            hex_size: -2.,
            chunk_rows: 0,
            ..Default::default()
        };

        assert_eq!(config.hex_size(), Err(InvalidArgument::HexSize(-2.)));
        assert_eq!(
            config.chunk_dimensions(),
            Err(InvalidArgument::ChunkDimensions { cols: 64, rows: 0 })
        );
    }

    #[test]
    fn toggling_alternates_between_shapes() {
        let config = HexMapConfig::default();

        let hexagon = config.toggled_shape(config.rectangle());
        assert_eq!(hexagon, GridShape::Hexagon { radius: 180 });
        assert_eq!(config.toggled_shape(hexagon), config.rectangle());
    }
}
