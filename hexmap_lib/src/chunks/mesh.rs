//! Builds the batched triangle geometry for a single chunk of tiles.

use bevy::prelude::Color;

use crate::geometry::{
    axial_to_world, color_class, hex_corners, AxialCoord, GridShape, HexSize, OffsetRect,
};

/// Each tile is drawn as its center followed by its six corners.
pub const VERTICES_PER_TILE: usize = 7;

/// Each tile is drawn as a fan of six triangles around its center.
pub const TRIANGLES_PER_TILE: usize = 6;

/// The vertex colors used for the two alternating tile classes.
///
/// Stored in linear RGBA, ready to be used as a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePalette {
    /// The tint of tiles in color class 0.
    pub base: [f32; 4],
    /// The tint of tiles in color class 1.
    pub alt: [f32; 4],
}

impl TilePalette {
    /// Creates a palette from two (sRGB) colors.
    #[must_use]
    pub fn new(base: Color, alt: Color) -> Self {
        TilePalette {
            base: base.as_linear_rgba_f32(),
            alt: alt.as_linear_rgba_f32(),
        }
    }

    /// The tint to use for tiles of the provided [`color_class`].
    #[inline]
    #[must_use]
    pub fn tint(&self, color_class: u8) -> [f32; 4] {
        if color_class == 0 {
            self.base
        } else {
            self.alt
        }
    }
}

impl Default for TilePalette {
    fn default() -> Self {
        TilePalette::new(Color::rgb(0.18, 0.6, 0.75), Color::rgb(0.15, 0.5, 0.65))
    }
}

/// The vertex, color and index buffers of one chunk.
///
/// Positions lie in the `z = 0` plane, in grid-local world units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions.
    positions: Vec<[f32; 3]>,
    /// One linear RGBA color per vertex.
    colors: Vec<[f32; 4]>,
    /// Three indices per triangle.
    indices: Vec<u32>,
}

impl ChunkMesh {
    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-vertex colors, parallel to [`ChunkMesh::positions`].
    #[inline]
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Triangle indices into [`ChunkMesh::positions`].
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// The number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Does this mesh have no geometry at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends the seven vertices and six triangles of the tile at `hex`.
    fn push_tile(&mut self, hex: AxialCoord, size: HexSize, tint: [f32; 4]) {
        let center = axial_to_world(hex, size);
        let first = self.positions.len() as u32;

        self.positions.push(center.extend(0.).to_array());
        self.positions.extend(
            hex_corners(center, size)
                .iter()
                .map(|corner| corner.extend(0.).to_array()),
        );
        self.colors
            .extend(std::iter::repeat(tint).take(VERTICES_PER_TILE));

        for i in 0..TRIANGLES_PER_TILE as u32 {
            let next = if i == 5 { 1 } else { i + 2 };
            // Clockwise when seen from +z
            self.indices.extend([first, first + next, first + i + 1]);
        }
    }
}

/// Builds the geometry for every tile of `shape` that lies inside of `range`.
#[must_use]
pub fn build_chunk_mesh(
    range: OffsetRect,
    shape: &GridShape,
    size: HexSize,
    palette: &TilePalette,
) -> ChunkMesh {
    let capacity = range.area();
    let mut mesh = ChunkMesh {
        positions: Vec::with_capacity(capacity * VERTICES_PER_TILE),
        colors: Vec::with_capacity(capacity * VERTICES_PER_TILE),
        indices: Vec::with_capacity(capacity * TRIANGLES_PER_TILE * 3),
    };

    for (col, row) in range.positions() {
        let hex = AxialCoord::from_offset(col, row);
        if shape.contains(hex) {
            mesh.push_tile(hex, size, palette.tint(color_class(hex)));
        }
    }

    mesh
}
