//! Errors raised while configuring a hex grid.

use thiserror::Error;

/// An argument was outside of its valid range.
///
/// These are checked before any geometry is built, so a failure never leaves a partial grid behind.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    /// The hex size was zero, negative or not finite.
    #[error("hex size must be positive and finite, but was {0}")]
    HexSize(f32),
    /// At least one of the chunk dimensions was zero or negative.
    #[error("chunk dimensions must be positive, but were {cols}x{rows}")]
    ChunkDimensions {
        /// The requested number of columns per chunk.
        cols: i32,
        /// The requested number of rows per chunk.
        rows: i32,
    },
}
