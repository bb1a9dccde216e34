//! Snaps a point on the map to the tile underneath it, so that tile can be highlighted.
//!
//! Points must already be in the grid's local space: any camera projection or grid rotation
//! is undone by the caller before [`locate`] is used.

use bevy::prelude::*;

use crate::geometry::{axial_to_world, hex_corners, world_to_axial_rounded, AxialCoord, HexSize};

/// A tile picked by the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// The selected tile.
    pub hex: AxialCoord,
    /// The exact grid-local center of [`Selection::hex`].
    pub center: Vec2,
}

impl Selection {
    /// The corners of the outline drawn around the selected tile, in grid-local space.
    #[must_use]
    pub fn outline(&self, size: HexSize) -> [Vec2; 6] {
        hex_corners(self.center, size)
    }
}

/// Finds the tile that contains `local_point`, and its center.
///
/// The returned center is always the snapped tile center, never the input point.
#[must_use]
pub fn locate(local_point: Vec2, size: HexSize) -> Selection {
    let hex = world_to_axial_rounded(local_point, size);

    Selection {
        hex,
        center: axial_to_world(hex, size),
    }
}

/// The currently selected tile, if any.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct SelectedTile(Option<Selection>);

impl SelectedTile {
    /// The current selection, if any.
    #[inline]
    pub fn get(&self) -> Option<Selection> {
        self.0
    }

    /// Replaces the current selection.
    #[inline]
    pub fn set(&mut self, selection: Selection) {
        self.0 = Some(selection);
    }

    /// Removes the current selection.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_snaps_to_the_center() {
        let size = HexSize::new(0.8).unwrap();
        let center = axial_to_world(AxialCoord::new(3, -2), size);
        let selection = locate(center + Vec2::new(0.2, -0.15), size);

        assert_eq!(selection.hex, AxialCoord::new(3, -2));
        assert_eq!(selection.center, center);
    }

    #[test]
    fn locate_at_a_center_is_stable() {
        let size = HexSize::new(1.5).unwrap();

        for hex in [AxialCoord::ZERO, AxialCoord::new(-7, 3), AxialCoord::new(12, -40)] {
            let center = axial_to_world(hex, size);
            let selection = locate(center, size);

            assert_eq!(selection.hex, hex);
            assert_eq!(locate(selection.center, size), selection);
        }
    }

    #[test]
    fn outline_surrounds_the_center() {
        let size = HexSize::new(0.8).unwrap();
        let selection = locate(Vec2::new(5., 5.), size);

        for corner in selection.outline(size) {
            assert!((corner.distance(selection.center) - 0.8).abs() < 1e-5);
        }
    }

    #[test]
    fn selected_tile_can_be_cleared() {
        let size = HexSize::new(1.).unwrap();
        let mut selected_tile = SelectedTile::default();
        assert_eq!(selected_tile.get(), None);

        selected_tile.set(locate(Vec2::ZERO, size));
        assert_eq!(selected_tile.get().map(|selection| selection.hex), Some(AxialCoord::ZERO));

        selected_tile.clear();
        assert_eq!(selected_tile.get(), None);
    }
}
