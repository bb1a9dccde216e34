//! Axial hex coordinates and their conversion to and from world space.
//!
//! Every map uses a flat-top layout: two edges of each hex are horizontal,
//! and the corners sit at multiples of 60 degrees starting from the positive x axis.
//!
//! Conversions of NaN or infinite world coordinates produce unspecified (but memory-safe) results.

use bevy::prelude::*;
use core::fmt::Display;
use derive_more::{Add, AddAssign, Sub, SubAssign};
use hexx::Hex;
use serde::{Deserialize, Serialize};

use super::InvalidArgument;

/// The square root of 3, which shows up in every flat-top conversion.
const SQRT_3: f32 = 1.732_050_8;

/// A hex-based coordinate, that represents exactly one tile.
///
/// The `x` field of the underlying [`Hex`] is the axial `q` coordinate, and `y` is `r`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deref,
    DerefMut,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
pub struct AxialCoord {
    /// The underlying hex coordinate
    pub(crate) hex: Hex,
}

impl Display for AxialCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q(), self.r())
    }
}

impl AxialCoord {
    /// The position of the central tile
    pub const ZERO: AxialCoord = AxialCoord {
        hex: Hex { x: 0, y: 0 },
    };

    /// Generates a new [`AxialCoord`] from axial coordinates.
    #[inline]
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        AxialCoord {
            hex: Hex { x: q, y: r },
        }
    }

    /// The `q` (column-like) axial coordinate.
    #[inline]
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.hex.x
    }

    /// The `r` (row-like) axial coordinate.
    #[inline]
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.hex.y
    }

    /// Converts even-row offset coordinates into axial coordinates.
    ///
    /// The shift is arithmetic, so negative rows are floored rather than truncated.
    #[inline]
    #[must_use]
    pub const fn from_offset(col: i32, row: i32) -> Self {
        AxialCoord::new(col - (row >> 1), row)
    }

    /// Converts this coordinate into even-row offset `(col, row)` coordinates.
    ///
    /// This is the exact inverse of [`AxialCoord::from_offset`].
    #[inline]
    #[must_use]
    pub const fn to_offset(self) -> (i32, i32) {
        (self.q() + (self.r() >> 1), self.r())
    }

    /// All six neighbors of `self`.
    ///
    /// # Warning
    ///
    /// This includes neighbors that are not on the map.
    #[inline]
    #[must_use]
    pub fn neighbors(&self) -> [AxialCoord; 6] {
        self.hex.all_neighbors().map(|hex| AxialCoord { hex })
    }

    /// Computes the number of steps between `self` and `other` in tile coordinates.
    ///
    /// Note that this is not the same as the distance between tiles in world coordinates!
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: AxialCoord) -> i32 {
        self.hex.distance_to(other.hex)
    }
}

/// The distance from the center of a hex to any of its corners, in world units.
///
/// This is guaranteed to be positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HexSize(f32);

impl HexSize {
    /// Validates the provided center-to-corner distance.
    pub fn new(size: f32) -> Result<Self, InvalidArgument> {
        if size.is_finite() && size > 0. {
            Ok(HexSize(size))
        } else {
            Err(InvalidArgument::HexSize(size))
        }
    }

    /// The center-to-corner distance, in world units.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for HexSize {
    type Error = InvalidArgument;

    fn try_from(size: f32) -> Result<Self, Self::Error> {
        HexSize::new(size)
    }
}

/// Returns the world position of the center of `hex`.
#[inline]
#[must_use]
pub fn axial_to_world(hex: AxialCoord, size: HexSize) -> Vec2 {
    let q = hex.q() as f32;
    let r = hex.r() as f32;
    let size = size.get();

    Vec2 {
        x: size * 1.5 * q,
        y: size * SQRT_3 * (r + q * 0.5),
    }
}

/// Returns the fractional axial coordinates of `world_pos`, as `(q, r)`.
///
/// This is the exact algebraic inverse of [`axial_to_world`].
#[inline]
#[must_use]
pub fn world_to_axial_fractional(world_pos: Vec2, size: HexSize) -> Vec2 {
    let x = world_pos.x / size.get();
    let y = world_pos.y / size.get();

    Vec2 {
        x: (2. / 3.) * x,
        y: (-1. / 3.) * x + (1. / SQRT_3) * y,
    }
}

/// Rounds fractional axial coordinates to the tile that contains them.
///
/// The coordinates are rounded in cube space, then the component that moved the most is
/// recomputed from the other two so that `x + y + z == 0` holds again.
/// Ties are resolved by checking `x` first, then `y`, and otherwise correcting `z`.
/// Each component rounds half to even, so a point exactly between two centers
/// can snap back toward the origin.
#[must_use]
pub fn round_to_nearest_axial(q: f32, r: f32) -> AxialCoord {
    let x = q;
    let z = r;
    let y = -x - z;

    let rx = x.round_ties_even();
    let ry = y.round_ties_even();
    let rz = z.round_ties_even();

    let x_diff = (rx - x).abs();
    let y_diff = (ry - y).abs();
    let z_diff = (rz - z).abs();

    let (q, r) = if x_diff > y_diff && x_diff > z_diff {
        (-ry - rz, rz)
    } else if y_diff > z_diff {
        // Correcting y leaves both axial components untouched
        (rx, rz)
    } else {
        (rx, -rx - ry)
    };

    AxialCoord::new(q as i32, r as i32)
}

/// Returns the tile whose center is nearest to `world_pos`.
#[inline]
#[must_use]
pub fn world_to_axial_rounded(world_pos: Vec2, size: HexSize) -> AxialCoord {
    let fractional = world_to_axial_fractional(world_pos, size);
    round_to_nearest_axial(fractional.x, fractional.y)
}

/// Returns the six corners of the flat-top hex centered at `center`, counter-clockwise from `0°`.
#[must_use]
pub fn hex_corners(center: Vec2, size: HexSize) -> [Vec2; 6] {
    core::array::from_fn(|i| {
        let angle = (60. * i as f32).to_radians();
        center + Vec2::new(angle.cos(), angle.sin()) * size.get()
    })
}
