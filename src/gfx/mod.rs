//! Graphics layer: camera, geometry, scene state and the wgpu renderer.

pub mod camera;
pub mod geometry;
pub mod matrix_stack;
pub mod mesh;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use matrix_stack::MatrixStack;
pub use mesh::{MeshKind, MeshLibrary};
pub use rendering::RenderEngine;
pub use scene::{SceneState, SLOT_COUNT};
