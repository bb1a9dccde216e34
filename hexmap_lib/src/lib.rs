//! A flat-top hex map, built in chunks and rendered with Bevy.
//!
//! Tiles are addressed with axial coordinates.
//! The map is split into rectangular chunks of offset coordinates, and each chunk becomes a single mesh.

#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
#![warn(missing_docs)]

pub mod chunks;
pub mod config;
pub mod geometry;
pub mod graphics;
pub mod grid;
pub mod player_interaction;
pub mod selection;
pub mod testing;
