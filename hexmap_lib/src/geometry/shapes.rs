//! The sets of tiles that make up a map, and the two ways of addressing them.

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use super::AxialCoord;

/// The overall shape of the map.
///
/// Zero or negative extents are valid, and describe a map with no tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridShape {
    /// A hexagon of tiles centered on [`AxialCoord::ZERO`].
    Hexagon {
        /// The number of tiles from the center to the edge of the map.
        ///
        /// Note that the central tile is not counted.
        radius: i32,
    },
    /// `height` offset rows of `width` tiles each, with the first tile at the origin.
    Rectangle {
        /// The number of tiles in each row.
        width: i32,
        /// The number of rows.
        height: i32,
    },
}

impl GridShape {
    /// Returns every tile in this shape, in generation order.
    #[must_use]
    pub fn cells(&self) -> Vec<AxialCoord> {
        match *self {
            GridShape::Hexagon { radius } => generate_hexagon(radius),
            GridShape::Rectangle { width, height } => generate_rectangle(width, height),
        }
    }

    /// Computes the number of tiles in this shape without generating them.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        match *self {
            GridShape::Hexagon { radius } if radius >= 0 => {
                let radius = radius as usize;
                3 * radius * radius + 3 * radius + 1
            }
            GridShape::Rectangle { width, height } if width > 0 && height > 0 => {
                width as usize * height as usize
            }
            _ => 0,
        }
    }

    /// Is the provided `hex` part of this shape?
    #[must_use]
    pub fn contains(&self, hex: AxialCoord) -> bool {
        match *self {
            GridShape::Hexagon { radius } => AxialCoord::ZERO.distance_to(hex) <= radius,
            GridShape::Rectangle { width, height } => {
                let (col, row) = hex.to_offset();
                (0..width).contains(&col) && (0..height).contains(&row)
            }
        }
    }

    /// The smallest offset rectangle that holds every tile of this shape.
    ///
    /// Returns `None` if the shape has no tiles.
    #[must_use]
    pub fn offset_bounds(&self) -> Option<OffsetRect> {
        match *self {
            GridShape::Hexagon { radius } if radius >= 0 => {
                let mut min_col = i32::MAX;
                let mut max_col = i32::MIN;

                for row in -radius..=radius {
                    let q_min = (-radius).max(-row - radius);
                    let q_max = radius.min(-row + radius);
                    min_col = min_col.min(AxialCoord::new(q_min, row).to_offset().0);
                    max_col = max_col.max(AxialCoord::new(q_max, row).to_offset().0);
                }

                Some(OffsetRect {
                    col0: min_col,
                    row0: -radius,
                    cols: max_col - min_col + 1,
                    rows: 2 * radius + 1,
                })
            }
            GridShape::Rectangle { width, height } if width > 0 && height > 0 => {
                Some(OffsetRect {
                    col0: 0,
                    row0: 0,
                    cols: width,
                    rows: height,
                })
            }
            _ => None,
        }
    }
}

/// A half-open rectangle of even-row offset coordinates: `[col0, col0 + cols) x [row0, row0 + rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRect {
    /// The first column.
    pub col0: i32,
    /// The first row.
    pub row0: i32,
    /// The number of columns.
    pub cols: i32,
    /// The number of rows.
    pub rows: i32,
}

impl OffsetRect {
    /// Does this rectangle contain no positions at all?
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cols <= 0 || self.rows <= 0
    }

    /// The number of offset positions covered.
    #[inline]
    #[must_use]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.cols as usize * self.rows as usize
        }
    }

    /// Is `(col, row)` inside of this rectangle?
    #[inline]
    #[must_use]
    pub fn contains(&self, col: i32, row: i32) -> bool {
        (self.col0..self.col0 + self.cols).contains(&col)
            && (self.row0..self.row0 + self.rows).contains(&row)
    }

    /// Iterates over every `(col, row)` position, one row at a time.
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> {
        iproduct!(
            self.row0..self.row0 + self.rows,
            self.col0..self.col0 + self.cols
        )
        .map(|(row, col)| (col, row))
    }
}

/// Generates a hexagon-shaped map of the provided `radius`, centered on the origin.
///
/// Tiles are yielded ordered by `q`, then by `r`.
/// A negative radius produces an empty map.
#[must_use]
pub fn generate_hexagon(radius: i32) -> Vec<AxialCoord> {
    let mut cells = Vec::new();

    for q in -radius..=radius {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        cells.extend((r_min..=r_max).map(|r| AxialCoord::new(q, r)));
    }

    cells
}

/// Generates a rectangular map of `height` even-row offset rows, each `width` tiles wide.
///
/// Tiles are yielded one row at a time.
#[must_use]
pub fn generate_rectangle(width: i32, height: i32) -> Vec<AxialCoord> {
    iproduct!(0..height, 0..width)
        .map(|(row, col)| AxialCoord::from_offset(col, row))
        .collect()
}

/// Which of the two alternating tile tints `hex` uses: either 0 or 1.
#[inline]
#[must_use]
pub fn color_class(hex: AxialCoord) -> u8 {
    ((hex.q() + hex.r()) & 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::utils::HashSet;
    use hexx::{shapes::hexagon, Hex};

    #[test]
    fn hexagon_has_centered_hexagonal_number_of_cells() {
        for radius in [0, 1, 5, 50] {
            let cells = generate_hexagon(radius);
            let expected = (3 * radius * radius + 3 * radius + 1) as usize;

            assert_eq!(cells.len(), expected);
            assert_eq!(GridShape::Hexagon { radius }.cell_count(), expected);
        }
    }

    #[test]
    fn radius_zero_is_a_single_tile() {
        assert_eq!(generate_hexagon(0), vec![AxialCoord::ZERO]);
    }

    #[test]
    fn negative_radius_is_empty() {
        assert!(generate_hexagon(-3).is_empty());
        assert_eq!(GridShape::Hexagon { radius: -3 }.cell_count(), 0);
        assert_eq!(GridShape::Hexagon { radius: -3 }.offset_bounds(), None);
    }

    #[test]
    fn hexagon_matches_hexx() {
        let ours: HashSet<Hex> = generate_hexagon(7).into_iter().map(|hex| hex.hex).collect();
        let theirs: HashSet<Hex> = hexagon(Hex::ZERO, 7).collect();

        assert_eq!(ours, theirs);
    }

    #[test]
    fn hexagon_is_ordered_by_q_then_r() {
        let cells = generate_hexagon(1);
        assert_eq!(cells[0], AxialCoord::new(-1, 0));
        assert_eq!(cells[1], AxialCoord::new(-1, 1));
        assert_eq!(cells[2], AxialCoord::new(0, -1));
    }

    #[test]
    fn rectangle_cells_are_unique() {
        let (width, height) = (17, 9);
        let cells = generate_rectangle(width, height);
        let unique: HashSet<AxialCoord> = cells.iter().copied().collect();

        assert_eq!(cells.len(), (width * height) as usize);
        assert_eq!(unique.len(), cells.len());
        assert_eq!(GridShape::Rectangle { width, height }.cell_count(), cells.len());
    }

    #[test]
    fn rectangle_rows_are_offset() {
        let cells = generate_rectangle(3, 3);
        assert_eq!(cells[0], AxialCoord::new(0, 0));
        assert_eq!(cells[3], AxialCoord::new(0, 1));
        // Every second row shifts one step back in q
        assert_eq!(cells[6], AxialCoord::new(-1, 2));
    }

    #[test]
    fn degenerate_rectangles_are_empty() {
        assert!(generate_rectangle(0, 10).is_empty());
        assert!(generate_rectangle(10, -1).is_empty());
        assert_eq!(GridShape::Rectangle { width: 0, height: 4 }.cell_count(), 0);
        assert_eq!(
            GridShape::Rectangle { width: 4, height: 0 }.offset_bounds(),
            None
        );
    }

    #[test]
    fn contains_agrees_with_generated_cells() {
        for shape in [
            GridShape::Hexagon { radius: 4 },
            GridShape::Rectangle { width: 6, height: 5 },
        ] {
            let cells: HashSet<AxialCoord> = shape.cells().into_iter().collect();

            for q in -12..=12 {
                for r in -12..=12 {
                    let hex = AxialCoord::new(q, r);
                    assert_eq!(shape.contains(hex), cells.contains(&hex), "{hex}");
                }
            }
        }
    }

    #[test]
    fn offset_bounds_are_tight() {
        for radius in [0, 1, 2, 5, 12] {
            let shape = GridShape::Hexagon { radius };
            let bounds = shape.offset_bounds().unwrap();
            let offsets: Vec<(i32, i32)> =
                shape.cells().into_iter().map(|hex| hex.to_offset()).collect();

            for &(col, row) in &offsets {
                assert!(bounds.contains(col, row));
            }

            let min_col = offsets.iter().map(|&(col, _)| col).min().unwrap();
            let max_col = offsets.iter().map(|&(col, _)| col).max().unwrap();
            assert_eq!(bounds.col0, min_col);
            assert_eq!(bounds.col0 + bounds.cols - 1, max_col);
        }
    }

    #[test]
    fn offset_rect_positions_are_row_major() {
        let rect = OffsetRect {
            col0: 2,
            row0: -1,
            cols: 2,
            rows: 2,
        };
        let positions: Vec<(i32, i32)> = rect.positions().collect();

        assert_eq!(positions, vec![(2, -1), (3, -1), (2, 0), (3, 0)]);
        assert_eq!(rect.area(), 4);
    }

    #[test]
    fn color_class_alternates() {
        assert_eq!(color_class(AxialCoord::new(0, 0)), 0);
        assert_eq!(color_class(AxialCoord::new(1, 0)), 1);
        assert_eq!(color_class(AxialCoord::new(-1, 0)), 1);
        assert_eq!(color_class(AxialCoord::new(-3, -5)), 0);
        assert_eq!(
            color_class(AxialCoord::new(7, 2)),
            color_class(AxialCoord::new(7, 2))
        );
    }
}
