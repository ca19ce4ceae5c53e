//! Phong material model and its GPU uniform layout.
//!
//! Colors are stored in the editor domain `[0, 255]` and shininess in
//! `[0, 300]`; normalisation to shader units happens only when the uniform
//! block is built, so a color edited in the panel and read back displays
//! the same value.

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Divisor applied to shininess before upload.
pub const SHININESS_SCALE: f32 = 300.0;

/// Converts one `[0, 255]` channel to the `[0, 1]` shader domain.
#[inline]
pub fn channel_to_unit(c: f32) -> f32 {
    c / 255.0
}

/// Inverse of [`channel_to_unit`].
#[inline]
pub fn unit_to_channel(u: f32) -> f32 {
    u * 255.0
}

/// Phong material in editor units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectivity, RGB in `[0, 255]`.
    pub ka: [f32; 3],
    /// Diffuse reflectivity, RGB in `[0, 255]`.
    pub kd: [f32; 3],
    /// Specular reflectivity, RGB in `[0, 255]`.
    pub ks: [f32; 3],
    /// Specular exponent in `[0, 300]`.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: [200.0, 200.0, 200.0],
            kd: [10.0, 10.0, 2.0],
            ks: [50.0, 50.0, 50.0],
            shininess: 100.0,
        }
    }
}

impl Material {
    /// Builds the shader-domain uniform block for this material.
    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            ka: [
                channel_to_unit(self.ka[0]),
                channel_to_unit(self.ka[1]),
                channel_to_unit(self.ka[2]),
            ],
            shininess: self.shininess / SHININESS_SCALE,
            kd: [
                channel_to_unit(self.kd[0]),
                channel_to_unit(self.kd[1]),
                channel_to_unit(self.kd[2]),
            ],
            _pad0: 0.0,
            ks: [
                channel_to_unit(self.ks[0]),
                channel_to_unit(self.ks[1]),
                channel_to_unit(self.ks[2]),
            ],
            _pad1: 0.0,
        }
    }
}

/// GPU layout of a material. Must match `Material` in `phong.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ka: [f32; 3],
    pub shininess: f32,
    pub kd: [f32; 3],
    _pad0: f32,
    pub ks: [f32; 3],
    _pad1: f32,
}

pub type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Layout for the material block (slot 2 of the Phong pipeline).
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl MaterialBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group Layout");

        MaterialBindings { bind_group_layout }
    }

    pub fn create_bind_group(&self, device: &wgpu::Device, ubo: &MaterialUBO) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Material Bind Group")
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_round_trips_through_unit_domain() {
        let channels = [99.0_f32, 207.0, 140.0];
        for &c in &channels {
            let unit = channel_to_unit(c);
            let back = unit_to_channel(unit);
            assert!((back - c).abs() < 1e-4, "{c} -> {unit} -> {back}");
            assert_eq!(back.round(), c);
        }
        // Spot-check the normalized values themselves.
        assert!((channel_to_unit(99.0) - 0.388).abs() < 1e-3);
        assert!((channel_to_unit(207.0) - 0.812).abs() < 1e-3);
        assert!((channel_to_unit(140.0) - 0.549).abs() < 1e-3);
    }

    #[test]
    fn uniform_is_normalised() {
        let material = Material {
            ka: [255.0, 0.0, 127.5],
            kd: [0.0, 0.0, 0.0],
            ks: [255.0, 255.0, 255.0],
            shininess: 150.0,
        };
        let u = material.to_uniform();
        assert_eq!(u.ka[0], 1.0);
        assert_eq!(u.ka[1], 0.0);
        assert_eq!(u.ka[2], 0.5);
        assert_eq!(u.ks, [1.0, 1.0, 1.0]);
        assert_eq!(u.shininess, 0.5);
    }

    #[test]
    fn uniform_block_is_densely_padded() {
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
    }
}
