//! Mesh kinds, GPU mesh buffers and the mesh library.
//!
//! Every drawable shape is one of the fixed [`MeshKind`] variants. The
//! [`MeshLibrary`] builds one [`GpuMesh`] per kind up front (procedural
//! shapes plus the two OBJ models) and draw calls look meshes up by kind,
//! so there is no per-frame geometry work.

use std::collections::HashMap;
use std::path::Path;

use wgpu::util::DeviceExt;

use crate::error::MaquetteError;
use crate::gfx::geometry::{
    generate_cube, generate_cylinder, generate_pyramid, generate_sphere, generate_torus,
    GeometryData,
};

/// The closed set of drawable shapes.
///
/// Adding a shape means adding a variant here; the compiler then points at
/// every match that needs updating (the library build, the name table, the
/// editor combo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Bunny,
    Cow,
    Cube,
    Cylinder,
    Pyramid,
    Sphere,
    Torus,
}

impl MeshKind {
    /// Every variant, in the order the editor combo lists them.
    pub const ALL: [MeshKind; 7] = [
        MeshKind::Bunny,
        MeshKind::Cow,
        MeshKind::Cube,
        MeshKind::Cylinder,
        MeshKind::Pyramid,
        MeshKind::Sphere,
        MeshKind::Torus,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MeshKind::Bunny => "Bunny",
            MeshKind::Cow => "Cow",
            MeshKind::Cube => "Cube",
            MeshKind::Cylinder => "Cylinder",
            MeshKind::Pyramid => "Pyramid",
            MeshKind::Sphere => "Sphere",
            MeshKind::Torus => "Torus",
        }
    }

    /// Parses a shape name, case-insensitively.
    pub fn from_name(name: &str) -> Result<MeshKind, MaquetteError> {
        MeshKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| MaquetteError::UnknownMesh(name.to_string()))
    }
}

/// Uploaded buffers for one mesh: triangles for the solid pass and a
/// unique-edge line list for the wireframe overlay.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub edge_buffer: wgpu::Buffer,
    pub edge_count: u32,
}

impl GpuMesh {
    pub fn from_geometry(device: &wgpu::Device, label: &str, geometry: &GeometryData) -> Self {
        let vertices = geometry.to_vertices();
        let edges = geometry.edge_indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} vertices", label)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} indices", label)),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} edges", label)),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
            edge_buffer,
            edge_count: edges.len() as u32,
        }
    }
}

/// All meshes the viewer can draw, keyed by kind.
pub struct MeshLibrary {
    meshes: HashMap<MeshKind, GpuMesh>,
}

impl MeshLibrary {
    /// Builds the procedural shapes and loads the bunny and cow models
    /// from `assets_dir`. Fails fast when a model file is missing or
    /// empty rather than drawing a hole in the scene.
    pub fn load(device: &wgpu::Device, assets_dir: &Path) -> Result<Self, MaquetteError> {
        let mut meshes = HashMap::new();

        for kind in MeshKind::ALL {
            let geometry = match kind {
                MeshKind::Bunny => load_obj(&assets_dir.join("bunny.obj"))?,
                MeshKind::Cow => load_obj(&assets_dir.join("cow.obj"))?,
                MeshKind::Cube => generate_cube(),
                MeshKind::Cylinder => generate_cylinder(24),
                MeshKind::Pyramid => generate_pyramid(),
                MeshKind::Sphere => generate_sphere(24, 16),
                MeshKind::Torus => generate_torus(0.35, 0.15, 32, 16),
            };
            meshes.insert(
                kind,
                GpuMesh::from_geometry(device, kind.display_name(), &geometry),
            );
        }

        Ok(Self { meshes })
    }

    pub fn get(&self, kind: MeshKind) -> &GpuMesh {
        // load() inserts every variant, so the lookup cannot miss.
        &self.meshes[&kind]
    }
}

/// Loads the first model of an OBJ file as position/normal geometry.
fn load_obj(path: &Path) -> Result<GeometryData, MaquetteError> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| MaquetteError::MeshAsset {
        path: path.to_path_buf(),
        source,
    })?;

    let model = models
        .first()
        .ok_or_else(|| MaquetteError::EmptyMeshAsset(path.display().to_string()))?;
    let mesh = &model.mesh;

    let mut data = GeometryData::new();
    for chunk in mesh.positions.chunks_exact(3) {
        data.vertices.push([chunk[0], chunk[1], chunk[2]]);
    }
    if mesh.normals.len() == mesh.positions.len() {
        for chunk in mesh.normals.chunks_exact(3) {
            data.normals.push([chunk[0], chunk[1], chunk[2]]);
        }
    } else {
        data.normals = average_vertex_normals(&data.vertices, &mesh.indices);
    }
    data.indices = mesh.indices.clone();

    if data.vertices.is_empty() || data.indices.is_empty() {
        return Err(MaquetteError::EmptyMeshAsset(path.display().to_string()));
    }

    Ok(data)
}

/// Area-weighted vertex normals for models that ship without them.
fn average_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let v0 = positions[triangle[0] as usize];
        let v1 = positions[triangle[1] as usize];
        let v2 = positions[triangle[2] as usize];

        let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let face = [
            edge1[1] * edge2[2] - edge1[2] * edge2[1],
            edge1[2] * edge2[0] - edge1[0] * edge2[2],
            edge1[0] * edge2[1] - edge1[1] * edge2[0],
        ];

        for &idx in triangle {
            let n = &mut normals[idx as usize];
            n[0] += face[0];
            n[1] += face[1];
            n[2] += face[2];
        }
    }

    for n in normals.iter_mut() {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 0.0 {
            n[0] /= len;
            n[1] /= len;
            n[2] /= len;
        }
    }

    normals
}

/// Render-pass extension for drawing library meshes.
pub trait DrawMesh<'a> {
    /// Draws the triangle list of `mesh`.
    fn draw_mesh_solid(&mut self, mesh: &'a GpuMesh);
    /// Draws the unique-edge line list of `mesh`.
    fn draw_mesh_lines(&mut self, mesh: &'a GpuMesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh_solid(&mut self, mesh: &'b GpuMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_mesh_lines(&mut self, mesh: &'b GpuMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.edge_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_names_round_trip() {
        for kind in MeshKind::ALL {
            assert_eq!(MeshKind::from_name(kind.display_name()).unwrap(), kind);
        }
        assert_eq!(MeshKind::from_name("torus").unwrap(), MeshKind::Torus);
    }

    #[test]
    fn unknown_mesh_name_is_an_error() {
        let err = MeshKind::from_name("teapot").unwrap_err();
        assert!(matches!(err, MaquetteError::UnknownMesh(name) if name == "teapot"));
    }

    #[test]
    fn averaged_normals_are_unit_length() {
        let positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = average_vertex_normals(&positions, &[0, 1, 2]);
        for n in normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }
}
