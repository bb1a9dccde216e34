//! Converts chunk geometry into meshes the renderer can draw.

use bevy::{
    prelude::Mesh,
    render::{mesh::Indices, render_resource::PrimitiveTopology},
};

use crate::chunks::ChunkMesh;

/// Chunks with more vertices than this need 32-bit indices.
const MAX_U16_INDEXED_VERTICES: usize = 65_000;

/// Constructs the mesh for a single chunk.
///
/// Normals all face the camera, which looks down the `z` axis.
#[must_use]
pub(crate) fn chunk_to_mesh(chunk_mesh: &ChunkMesh) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, chunk_mesh.positions().to_vec());
    mesh.insert_attribute(
        Mesh::ATTRIBUTE_NORMAL,
        vec![[0., 0., 1.]; chunk_mesh.vertex_count()],
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, chunk_mesh.colors().to_vec());
    mesh.set_indices(Some(chunk_indices(chunk_mesh)));
    mesh
}

/// Picks the smallest index format that can address every vertex of the chunk.
fn chunk_indices(chunk_mesh: &ChunkMesh) -> Indices {
    if chunk_mesh.vertex_count() > MAX_U16_INDEXED_VERTICES {
        Indices::U32(chunk_mesh.indices().to_vec())
    } else {
        Indices::U16(chunk_mesh.indices().iter().map(|&i| i as u16).collect())
    }
}
