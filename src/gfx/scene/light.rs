//! Light slots, the compact uniform upload protocol and light animation.

use cgmath::{vec4, Deg, Matrix4, Vector4};

use crate::gfx::resources::material::channel_to_unit;

/// Number of light slots, fixed by the shader array size.
pub const MAX_LIGHTS: usize = 3;

/// Per-frame rotation step applied by the light animation.
pub const ANIMATION_STEP: Deg<f32> = Deg(1.0);

/// One light slot in editor units.
///
/// The position's fourth component carries the point/directional flag:
/// `w = 1` is a point light, `w = 0` a direction. Color triples are in
/// `[0, 255]` and divided by 255 at pack time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector4<f32>,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub active: bool,
}

impl Light {
    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }

    /// The three default slots: one active point light on +X, two inactive
    /// directional lights on +Y and +Z, all white.
    pub fn default_rig() -> [Light; MAX_LIGHTS] {
        let white = [255.0, 255.0, 255.0];
        [
            Light {
                position: vec4(3.0, 0.0, 0.0, 1.0),
                ambient: white,
                diffuse: white,
                specular: white,
                active: true,
            },
            Light {
                position: vec4(0.0, 3.0, 0.0, 0.0),
                ambient: white,
                diffuse: white,
                specular: white,
                active: false,
            },
            Light {
                position: vec4(0.0, 0.0, 3.0, 0.0),
                ambient: white,
                diffuse: white,
                specular: white,
                active: false,
            },
        ]
    }
}

/// GPU layout of one packed light. Must match `Light` in `phong.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub pos: [f32; 4],
    pub ia: [f32; 4],
    pub id: [f32; 4],
    pub is: [f32; 4],
}

/// The packed light block uploaded each frame: active lights compacted to
/// the front, plus the active count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedLights {
    pub lights: [LightUniform; MAX_LIGHTS],
    pub count: u32,
}

/// Compacts active lights into a contiguous zero-indexed array.
///
/// Inactive slots are skipped, not zero-filled at their own index, and the
/// shader loops only over `count`, so a light switched off can never leave
/// stale illumination behind. The whole block is rebuilt from scratch every
/// call.
pub fn pack_lights(lights: &[Light; MAX_LIGHTS]) -> PackedLights {
    let mut packed = [LightUniform::default(); MAX_LIGHTS];
    let mut count = 0;

    for light in lights.iter().filter(|l| l.active) {
        let color = |c: [f32; 3]| {
            [
                channel_to_unit(c[0]),
                channel_to_unit(c[1]),
                channel_to_unit(c[2]),
                1.0,
            ]
        };
        packed[count] = LightUniform {
            pos: light.position.into(),
            ia: color(light.ambient),
            id: color(light.diffuse),
            is: color(light.specular),
        };
        count += 1;
    }

    PackedLights {
        lights: packed,
        count: count as u32,
    }
}

/// Rotates a homogeneous light position by `angle` about a world axis.
///
/// The rotation is a general 4x4 multiply, so the result is divided by its
/// w component (when finite) to stay in normalized homogeneous form.
pub fn rotate_light_position(
    position: Vector4<f32>,
    rotation: Matrix4<f32>,
) -> Vector4<f32> {
    let rotated = rotation * position;
    if rotated.w != 0.0 {
        rotated / rotated.w
    } else {
        rotated
    }
}

/// Advances the light animation by one frame: light 0 orbits world Z,
/// light 1 world X, light 2 world Y.
pub fn animate_lights(lights: &mut [Light; MAX_LIGHTS], step: Deg<f32>) {
    let rotations = [
        Matrix4::from_angle_z(step),
        Matrix4::from_angle_x(step),
        Matrix4::from_angle_y(step),
    ];
    for (light, rotation) in lights.iter_mut().zip(rotations) {
        light.position = rotate_light_position(light.position, rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn pack_compacts_active_lights() {
        let mut lights = Light::default_rig();
        lights[0].active = true;
        lights[1].active = false;
        lights[2].active = true;
        lights[2].diffuse = [127.5, 0.0, 255.0];

        let packed = pack_lights(&lights);

        assert_eq!(packed.count, 2);
        // Slot 0 of the shader array is source light 0...
        assert_eq!(packed.lights[0].pos, [3.0, 0.0, 0.0, 1.0]);
        // ...and slot 1 is source light 2, with normalized colors.
        assert_eq!(packed.lights[1].pos, [0.0, 0.0, 3.0, 0.0]);
        assert_eq!(packed.lights[1].id, [0.5, 0.0, 1.0, 1.0]);
        // The unused tail slot is zeroed, never a stale value.
        assert_eq!(packed.lights[2], LightUniform::default());
    }

    #[test]
    fn pack_with_no_active_lights_is_empty() {
        let mut lights = Light::default_rig();
        for light in lights.iter_mut() {
            light.active = false;
        }
        let packed = pack_lights(&lights);
        assert_eq!(packed.count, 0);
    }

    #[test]
    fn full_turn_returns_light_to_start() {
        let start = vec4(3.0, 0.0, 0.0, 1.0);
        let step = Deg(30.0);
        let mut position = start;
        for _ in 0..12 {
            position = rotate_light_position(position, Matrix4::from_angle_z(step));
        }
        assert_abs_diff_eq!(position, start, epsilon = 1e-4);
    }

    #[test]
    fn directional_light_keeps_zero_w() {
        let direction = vec4(0.0, 3.0, 0.0, 0.0);
        let rotated = rotate_light_position(direction, Matrix4::from_angle_x(Deg(90.0)));
        assert_eq!(rotated.w, 0.0);
        assert_abs_diff_eq!(rotated, vec4(0.0, 0.0, 3.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn animation_axes_per_slot() {
        let mut lights = Light::default_rig();
        // Light 0 at +X rotating about Z leaves the Z component alone.
        animate_lights(&mut lights, Deg(90.0));
        assert_abs_diff_eq!(lights[0].position, vec4(0.0, 3.0, 0.0, 1.0), epsilon = 1e-5);
        // Light 1 at +Y rotating about X moves into +Z.
        assert_abs_diff_eq!(lights[1].position, vec4(0.0, 0.0, 3.0, 0.0), epsilon = 1e-5);
        // Light 2 at +Z rotating about Y moves into +X.
        assert_abs_diff_eq!(lights[2].position, vec4(3.0, 0.0, 0.0, 0.0), epsilon = 1e-5);
    }
}
