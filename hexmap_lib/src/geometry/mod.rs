//! Manages the map's hex grid: coordinates, shapes and the conversions between them.

mod axial;
pub use axial::{
    axial_to_world, hex_corners, round_to_nearest_axial, world_to_axial_fractional,
    world_to_axial_rounded, AxialCoord, HexSize,
};

mod errors;
pub use errors::InvalidArgument;

mod shapes;
pub use shapes::{color_class, generate_hexagon, generate_rectangle, GridShape, OffsetRect};
