//! Scene object slots and their transforms.

use cgmath::{vec3, Vector3};

use crate::gfx::mesh::MeshKind;
use crate::gfx::resources::material::Material;

/// Translate/rotate/scale record for one object.
///
/// Rotation is Euler angles in degrees, applied in the fixed order
/// X, Y, Z. Scale may be non-uniform or negative; the floor slab uses a
/// negative Y scale to flip itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 0.0, 0.0),
            rotation: vec3(0.0, 0.0, 0.0),
            scale: vec3(1.0, 1.0, 1.0),
        }
    }
}

/// One placeable object: a mesh kind plus its transform and material.
///
/// Objects are plain values; cloning one yields an independent copy,
/// which is what the selection scratch copy relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub mesh: MeshKind,
    pub transform: Transform,
    pub material: Material,
}

impl SceneObject {
    pub fn new(mesh: MeshKind, transform: Transform, material: Material) -> Self {
        Self {
            mesh,
            transform,
            material,
        }
    }

    /// The four default editable slots: bunny, cow, cube and sphere at the
    /// corners of the floor slab.
    pub fn default_slots() -> [SceneObject; 4] {
        let corner = |mesh, x: f32, z: f32, ka: [f32; 3]| SceneObject {
            mesh,
            transform: Transform {
                position: vec3(x, 0.5, z),
                ..Transform::default()
            },
            material: Material {
                ka,
                kd: [10.0, 10.0, 2.0],
                ks: [50.0, 50.0, 50.0],
                shininess: 100.0,
            },
        };

        [
            corner(MeshKind::Bunny, 1.0, 1.0, [233.0, 192.0, 234.0]),
            corner(MeshKind::Cow, 1.0, -1.0, [193.0, 92.0, 85.0]),
            corner(MeshKind::Cube, -1.0, 1.0, [63.0, 224.0, 26.0]),
            corner(MeshKind::Sphere, -1.0, -1.0, [22.0, 109.0, 3.0]),
        ]
    }

    /// The fixed floor slab: a cube scaled flat, with a negative Y scale
    /// flipping it.
    pub fn floor() -> SceneObject {
        SceneObject {
            mesh: MeshKind::Cube,
            transform: Transform {
                position: vec3(0.0, -0.1, 0.0),
                rotation: vec3(0.0, 0.0, 0.0),
                scale: vec3(4.0, -0.2, 4.0),
            },
            material: Material {
                ka: [99.0, 207.0, 140.0],
                kd: [99.0, 207.0, 140.0],
                ks: [0.0, 0.0, 0.0],
                shininess: 100.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slots_sit_on_floor_corners() {
        let slots = SceneObject::default_slots();
        for slot in &slots {
            assert_eq!(slot.transform.position.y, 0.5);
            assert_eq!(slot.transform.position.x.abs(), 1.0);
            assert_eq!(slot.transform.position.z.abs(), 1.0);
        }
        assert_eq!(slots[0].mesh, MeshKind::Bunny);
        assert_eq!(slots[3].mesh, MeshKind::Sphere);
    }

    #[test]
    fn floor_is_flipped_slab() {
        let floor = SceneObject::floor();
        assert_eq!(floor.mesh, MeshKind::Cube);
        assert!(floor.transform.scale.y < 0.0);
    }
}
