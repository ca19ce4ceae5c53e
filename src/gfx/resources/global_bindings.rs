//! Per-frame and per-draw uniform bindings.
//!
//! Three bind group slots are shared by every pipeline:
//!
//! * slot 0: [`FrameUniform`], camera matrices plus the packed light block,
//! * slot 1: [`ModelUniform`], the model-view and normal matrices of one draw,
//! * slot 2: the surface, either a Phong material or a [`FlatUniform`] color.
//!
//! Lights are uploaded in world space; the shader applies the view matrix,
//! so orbiting the camera never drags the lights along.

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::{
    gfx::camera::convert_matrix4_to_array,
    gfx::scene::light::{LightUniform, PackedLights, MAX_LIGHTS},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Per-frame uniform block. MUST match `Frame` in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
    pub n_lights: u32,
    _padding: [u32; 3],
}

impl FrameUniform {
    pub fn new(projection: Matrix4<f32>, view: Matrix4<f32>, lights: &PackedLights) -> Self {
        Self {
            projection: convert_matrix4_to_array(projection),
            view: convert_matrix4_to_array(view),
            lights: lights.lights,
            n_lights: lights.count,
            _padding: [0; 3],
        }
    }
}

/// Per-draw uniform block. MUST match `Model` in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model_view: [[f32; 4]; 4],
    /// Inverse-transpose of `model_view`, so normals survive the floor
    /// slab's negative and non-uniform scales.
    pub normals: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new(model_view: Matrix4<f32>) -> Self {
        let normals = model_view
            .invert()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model_view: convert_matrix4_to_array(model_view),
            normals: convert_matrix4_to_array(normals),
        }
    }
}

/// Solid color block for the flat pipeline (wireframe and light markers).
/// MUST match `Flat` in `flat.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatUniform {
    pub color: [f32; 4],
}

pub type FrameUBO = UniformBuffer<FrameUniform>;
pub type ModelUBO = UniformBuffer<ModelUniform>;
pub type FlatUBO = UniformBuffer<FlatUniform>;

/// Layout and bind group for the per-frame uniforms (slot 0).
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // camera + lights
            .create(device, "Frame Bind Group Layout");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &FrameUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Frame Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// Layout for the per-draw model matrices (slot 1).
///
/// Every drawn object owns its own `ModelUBO` and bind group, so a frame
/// records all draws into one command encoder without uniform aliasing.
pub struct ModelBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl ModelBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(device, "Model Bind Group Layout");

        ModelBindings { bind_group_layout }
    }

    pub fn create_bind_group(&self, device: &wgpu::Device, ubo: &ModelUBO) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Model Bind Group")
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}

/// Layout for the flat color block (slot 2 of the flat pipeline).
pub struct FlatBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl FlatBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Flat Bind Group Layout");

        FlatBindings { bind_group_layout }
    }

    pub fn create_bind_group(&self, device: &wgpu::Device, ubo: &FlatUBO) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Flat Bind Group")
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{pack_lights, Light};

    #[test]
    fn frame_uniform_size_matches_wgsl_layout() {
        // 2 mat4 + 3 lights * 4 vec4 + count vec4
        assert_eq!(std::mem::size_of::<FrameUniform>(), 64 + 64 + 192 + 16);
    }

    #[test]
    fn frame_uniform_carries_packed_light_count() {
        let mut lights = Light::default_rig();
        lights[1].active = true;
        let packed = pack_lights(&lights);
        let frame = FrameUniform::new(Matrix4::identity(), Matrix4::identity(), &packed);
        assert_eq!(frame.n_lights, 2);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let model_view = Matrix4::from_nonuniform_scale(4.0, -0.2, 4.0);
        let uniform = ModelUniform::new(model_view);
        // Inverse-transpose of a diagonal matrix is its reciprocal.
        assert!((uniform.normals[0][0] - 0.25).abs() < 1e-6);
        assert!((uniform.normals[1][1] + 5.0).abs() < 1e-4);
    }
}
