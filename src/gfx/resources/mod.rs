//! GPU resource management: uniform bindings, materials and textures.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

pub use global_bindings::{
    FlatBindings, FlatUBO, FlatUniform, FrameUBO, FrameUniform, GlobalBindings, ModelBindings,
    ModelUBO, ModelUniform,
};
pub use material::{Material, MaterialBindings, MaterialUBO, MaterialUniform};
pub use texture_resource::TextureResource;
