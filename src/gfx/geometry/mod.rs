//! # Procedural Geometry Generation
//!
//! Generators for the primitive meshes the viewer places in the scene
//! (cube, sphere, cylinder, pyramid, torus). The bunny and cow are the
//! only shapes loaded from model files; see [`crate::gfx::mesh`].

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Generated geometry ready for GPU upload.
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }

    /// Derives a line-list index buffer from the unique triangle edges,
    /// for the wireframe overlay pipeline.
    pub fn edge_indices(&self) -> Vec<u32> {
        use std::collections::HashSet;

        let mut seen: HashSet<(u32, u32)> = HashSet::new();
        let mut edges = Vec::new();

        for triangle in self.indices.chunks_exact(3) {
            for &(a, b) in &[
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    edges.push(a);
                    edges.push(b);
                }
            }
        }

        edges
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
