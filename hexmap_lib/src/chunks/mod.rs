//! Splits the map into fixed-size rectangular chunks, each drawn as a single mesh.
//!
//! Rather than spawning one entity per tile, every chunk batches all of its tiles into one
//! set of vertex buffers, so the number of draw calls grows with the number of chunks.
//! Chunks are built once and never modified: changing the map clears and rebuilds all of them.

use bevy::prelude::*;

use crate::config::HexMapConfig;
use crate::geometry::{axial_to_world, AxialCoord, GridShape, HexSize, InvalidArgument, OffsetRect};

mod mesh;
pub use mesh::{build_chunk_mesh, ChunkMesh, TilePalette, TRIANGLES_PER_TILE, VERTICES_PER_TILE};

/// The maximum number of offset columns and rows in a single chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkDimensions {
    /// The number of columns per chunk.
    cols: i32,
    /// The number of rows per chunk.
    rows: i32,
}

impl ChunkDimensions {
    /// Validates the provided chunk size.
    pub fn new(cols: i32, rows: i32) -> Result<Self, InvalidArgument> {
        if cols > 0 && rows > 0 {
            Ok(ChunkDimensions { cols, rows })
        } else {
            Err(InvalidArgument::ChunkDimensions { cols, rows })
        }
    }

    /// The number of columns per chunk.
    #[inline]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    /// The number of rows per chunk.
    #[inline]
    pub const fn rows(&self) -> i32 {
        self.rows
    }
}

/// Splits `bounds` into chunk ranges of at most `dimensions` each.
///
/// Ranges are returned one row of chunks at a time; the last chunk of each row and column is clipped.
#[must_use]
pub fn chunk_ranges(bounds: OffsetRect, dimensions: ChunkDimensions) -> Vec<OffsetRect> {
    let col_end = bounds.col0 + bounds.cols;
    let row_end = bounds.row0 + bounds.rows;

    (bounds.row0..row_end)
        .step_by(dimensions.rows as usize)
        .flat_map(|row0| {
            (bounds.col0..col_end)
                .step_by(dimensions.cols as usize)
                .map(move |col0| OffsetRect {
                    col0,
                    row0,
                    cols: dimensions.cols.min(col_end - col0),
                    rows: dimensions.rows.min(row_end - row0),
                })
        })
        .collect()
}

/// A rectangular block of the map, and the geometry of every tile inside of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The offset positions covered by this chunk.
    range: OffsetRect,
    /// The batched tile geometry.
    mesh: ChunkMesh,
}

impl Chunk {
    /// The offset positions covered by this chunk.
    #[inline]
    pub fn range(&self) -> OffsetRect {
        self.range
    }

    /// The batched tile geometry.
    #[inline]
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// The number of tiles drawn by this chunk.
    ///
    /// This may be lower than the area of the range for shapes that are not rectangular.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.mesh.vertex_count() / VERTICES_PER_TILE
    }
}

/// The map: its shape and layout, and the chunks that draw it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HexGrid {
    /// Which tiles exist.
    shape: GridShape,
    /// The center-to-corner distance of each tile.
    hex_size: HexSize,
    /// The maximum size of each chunk.
    chunk_dimensions: ChunkDimensions,
    /// The tile tints.
    palette: TilePalette,
    /// Every chunk, one row of chunks at a time.
    chunks: Vec<Chunk>,
}

impl HexGrid {
    /// Builds every chunk of a new grid.
    ///
    /// The chunks tile the offset rectangle bounding `shape`.
    /// An empty shape produces a grid without any chunks.
    #[must_use]
    pub fn build(
        shape: GridShape,
        hex_size: HexSize,
        chunk_dimensions: ChunkDimensions,
        palette: TilePalette,
    ) -> Self {
        let chunks = match shape.offset_bounds() {
            Some(bounds) => chunk_ranges(bounds, chunk_dimensions)
                .into_iter()
                .map(|range| Chunk {
                    range,
                    mesh: build_chunk_mesh(range, &shape, hex_size, &palette),
                })
                .collect(),
            None => Vec::new(),
        };

        HexGrid {
            shape,
            hex_size,
            chunk_dimensions,
            palette,
            chunks,
        }
    }

    /// Validates `config`, then builds the grid it describes.
    pub fn from_config(config: &HexMapConfig) -> Result<Self, InvalidArgument> {
        Ok(HexGrid::build(
            config.shape(),
            config.hex_size()?,
            config.chunk_dimensions()?,
            config.palette(),
        ))
    }

    /// Releases every chunk.
    pub fn clear(&mut self) {
        self.chunks = Vec::new();
    }

    /// Clears the grid, then builds it again with a new `shape`.
    ///
    /// Hex size, chunk dimensions and palette are kept.
    pub fn regenerate(&mut self, shape: GridShape) {
        self.clear();
        *self = HexGrid::build(shape, self.hex_size, self.chunk_dimensions, self.palette);
    }

    /// Which tiles exist.
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// The center-to-corner distance of each tile.
    #[inline]
    pub fn hex_size(&self) -> HexSize {
        self.hex_size
    }

    /// The maximum size of each chunk.
    #[inline]
    pub fn chunk_dimensions(&self) -> ChunkDimensions {
        self.chunk_dimensions
    }

    /// Every chunk, one row of chunks at a time.
    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The total number of tiles drawn.
    pub fn cell_count(&self) -> usize {
        self.chunks.iter().map(Chunk::cell_count).sum()
    }

    /// The total number of vertices across all chunks.
    pub fn vertex_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.mesh.vertex_count()).sum()
    }

    /// The total number of triangles across all chunks.
    pub fn triangle_count(&self) -> usize {
        self.chunks
            .iter()
            .map(|chunk| chunk.mesh.triangle_count())
            .sum()
    }

    /// The chunk that draws `hex`, if it is on the map.
    pub fn chunk_containing(&self, hex: AxialCoord) -> Option<&Chunk> {
        if !self.shape.contains(hex) {
            return None;
        }

        let (col, row) = hex.to_offset();
        self.chunks
            .iter()
            .find(|chunk| chunk.range.contains(col, row))
    }

    /// Returns the grid-local position of the center of `hex`.
    #[inline]
    pub fn axial_to_world(&self, hex: AxialCoord) -> Vec2 {
        axial_to_world(hex, self.hex_size)
    }

    /// Returns the grid-local position of the center of the tile at offset `(col, row)`.
    #[inline]
    pub fn offset_to_world(&self, col: i32, row: i32) -> Vec2 {
        self.axial_to_world(AxialCoord::from_offset(col, row))
    }
}
