//! Explicit binding table between panel widgets and scene state.
//!
//! Every editable field is a [`FieldPath`] variant with a typed `get` and
//! `set`, so the full editing surface is enumerable: there is no
//! string-keyed reflection, and a widget cannot bind to a field this table
//! does not name. Object edits go through the selection scratch copy;
//! camera plane edits go through the clamping setters.

use crate::gfx::camera::trackball::Camera;
use crate::gfx::mesh::MeshKind;
use crate::gfx::scene::{SceneState, MAX_LIGHTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A value passing through the binding table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundValue {
    Scalar(f32),
    /// RGB in the editor's `[0, 255]` domain.
    Color([f32; 3]),
    Flag(bool),
    /// Index into [`MeshKind::ALL`].
    MeshChoice(usize),
}

/// One editable (or displayed) field of the viewer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    // Active object, through the scratch copy.
    ObjectMesh,
    ObjectPosition(Axis),
    ObjectRotation(Axis),
    ObjectScale(Axis),
    MaterialKa,
    MaterialKd,
    MaterialKs,
    MaterialShininess,

    // Camera.
    CameraFovy,
    CameraNear,
    CameraFar,

    // Lights, indexed 0..MAX_LIGHTS.
    LightActive(usize),
    LightDirectional(usize),
    LightPosition(usize, Axis),
    LightAmbient(usize),
    LightDiffuse(usize),
    LightSpecular(usize),

    // Render options.
    OptionDepthTest,
    OptionBackfaceCulling,
    OptionShowLights,
    OptionAnimateLights,
}

impl FieldPath {
    /// Whether the panel lets the user change this field. The locked
    /// transform components (position y, rotation x and z) are shown but
    /// not editable; objects stay on the floor and spin about Y only.
    pub fn editable(&self) -> bool {
        !matches!(
            self,
            FieldPath::ObjectPosition(Axis::Y)
                | FieldPath::ObjectRotation(Axis::X)
                | FieldPath::ObjectRotation(Axis::Z)
        )
    }

    /// Slider range for scalar fields, where one is bounded.
    pub fn range(&self) -> Option<(f32, f32)> {
        match self {
            FieldPath::MaterialShininess => Some((0.0, 300.0)),
            FieldPath::CameraFovy => Some((1.0, 100.0)),
            FieldPath::CameraNear | FieldPath::CameraFar => Some((0.1, 20.0)),
            FieldPath::ObjectPosition(_) => Some((-5.0, 5.0)),
            FieldPath::ObjectRotation(_) => Some((-180.0, 180.0)),
            FieldPath::ObjectScale(_) => Some((-3.0, 3.0)),
            FieldPath::LightPosition(..) => Some((-10.0, 10.0)),
            _ => None,
        }
    }

    pub fn get(&self, scene: &SceneState, camera: &Camera) -> BoundValue {
        use BoundValue::*;
        match *self {
            FieldPath::ObjectMesh => MeshChoice(
                MeshKind::ALL
                    .iter()
                    .position(|k| *k == scene.scratch.mesh)
                    .unwrap_or(0),
            ),
            FieldPath::ObjectPosition(axis) => {
                Scalar(scene.scratch.transform.position[axis.index()])
            }
            FieldPath::ObjectRotation(axis) => {
                Scalar(scene.scratch.transform.rotation[axis.index()])
            }
            FieldPath::ObjectScale(axis) => Scalar(scene.scratch.transform.scale[axis.index()]),
            FieldPath::MaterialKa => Color(scene.scratch.material.ka),
            FieldPath::MaterialKd => Color(scene.scratch.material.kd),
            FieldPath::MaterialKs => Color(scene.scratch.material.ks),
            FieldPath::MaterialShininess => Scalar(scene.scratch.material.shininess),
            FieldPath::CameraFovy => Scalar(camera.fovy),
            FieldPath::CameraNear => Scalar(camera.near),
            FieldPath::CameraFar => Scalar(camera.far),
            FieldPath::LightActive(i) => Flag(scene.lights[i].active),
            FieldPath::LightDirectional(i) => Flag(scene.lights[i].is_directional()),
            FieldPath::LightPosition(i, axis) => Scalar(scene.lights[i].position[axis.index()]),
            FieldPath::LightAmbient(i) => Color(scene.lights[i].ambient),
            FieldPath::LightDiffuse(i) => Color(scene.lights[i].diffuse),
            FieldPath::LightSpecular(i) => Color(scene.lights[i].specular),
            FieldPath::OptionDepthTest => Flag(scene.options.depth_test),
            FieldPath::OptionBackfaceCulling => Flag(scene.options.backface_culling),
            FieldPath::OptionShowLights => Flag(scene.options.show_lights),
            FieldPath::OptionAnimateLights => Flag(scene.options.animate_lights),
        }
    }

    /// Writes `value` back. Mismatched value kinds and non-editable
    /// fields are ignored rather than panicking; the panel constructs the
    /// value from the same `get` it displayed.
    pub fn set(&self, scene: &mut SceneState, camera: &mut Camera, value: BoundValue) {
        use BoundValue::*;
        if !self.editable() {
            return;
        }
        match (*self, value) {
            (FieldPath::ObjectMesh, MeshChoice(i)) => {
                if let Some(kind) = MeshKind::ALL.get(i) {
                    scene.scratch.mesh = *kind;
                }
            }
            (FieldPath::ObjectPosition(axis), Scalar(v)) => {
                scene.scratch.transform.position[axis.index()] = v;
            }
            (FieldPath::ObjectRotation(axis), Scalar(v)) => {
                scene.scratch.transform.rotation[axis.index()] = v;
            }
            (FieldPath::ObjectScale(axis), Scalar(v)) => {
                scene.scratch.transform.scale[axis.index()] = v;
            }
            (FieldPath::MaterialKa, Color(c)) => scene.scratch.material.ka = c,
            (FieldPath::MaterialKd, Color(c)) => scene.scratch.material.kd = c,
            (FieldPath::MaterialKs, Color(c)) => scene.scratch.material.ks = c,
            (FieldPath::MaterialShininess, Scalar(v)) => {
                scene.scratch.material.shininess = v.clamp(0.0, 300.0);
            }
            (FieldPath::CameraFovy, Scalar(v)) => camera.fovy = v.clamp(1.0, 100.0),
            (FieldPath::CameraNear, Scalar(v)) => camera.set_near(v),
            (FieldPath::CameraFar, Scalar(v)) => camera.set_far(v),
            (FieldPath::LightActive(i), Flag(b)) => scene.lights[i].active = b,
            (FieldPath::LightDirectional(i), Flag(b)) => {
                scene.lights[i].position.w = if b { 0.0 } else { 1.0 };
            }
            (FieldPath::LightPosition(i, axis), Scalar(v)) => {
                scene.lights[i].position[axis.index()] = v;
            }
            (FieldPath::LightAmbient(i), Color(c)) => scene.lights[i].ambient = c,
            (FieldPath::LightDiffuse(i), Color(c)) => scene.lights[i].diffuse = c,
            (FieldPath::LightSpecular(i), Color(c)) => scene.lights[i].specular = c,
            (FieldPath::OptionDepthTest, Flag(b)) => scene.options.depth_test = b,
            (FieldPath::OptionBackfaceCulling, Flag(b)) => scene.options.backface_culling = b,
            (FieldPath::OptionShowLights, Flag(b)) => scene.options.show_lights = b,
            (FieldPath::OptionAnimateLights, Flag(b)) => scene.options.animate_lights = b,
            _ => {}
        }
    }

    /// Every field the panels bind, for exhaustiveness checks.
    pub fn all() -> Vec<FieldPath> {
        let mut paths = vec![
            FieldPath::ObjectMesh,
            FieldPath::MaterialKa,
            FieldPath::MaterialKd,
            FieldPath::MaterialKs,
            FieldPath::MaterialShininess,
            FieldPath::CameraFovy,
            FieldPath::CameraNear,
            FieldPath::CameraFar,
            FieldPath::OptionDepthTest,
            FieldPath::OptionBackfaceCulling,
            FieldPath::OptionShowLights,
            FieldPath::OptionAnimateLights,
        ];
        for axis in Axis::ALL {
            paths.push(FieldPath::ObjectPosition(axis));
            paths.push(FieldPath::ObjectRotation(axis));
            paths.push(FieldPath::ObjectScale(axis));
        }
        for i in 0..MAX_LIGHTS {
            paths.push(FieldPath::LightActive(i));
            paths.push(FieldPath::LightDirectional(i));
            paths.push(FieldPath::LightAmbient(i));
            paths.push(FieldPath::LightDiffuse(i));
            paths.push(FieldPath::LightSpecular(i));
            for axis in Axis::ALL {
                paths.push(FieldPath::LightPosition(i, axis));
            }
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_round_trips() {
        let mut scene = SceneState::new();
        let mut camera = Camera::default();

        for path in FieldPath::all() {
            let value = path.get(&scene, &camera);
            path.set(&mut scene, &mut camera, value);
            assert_eq!(
                path.get(&scene, &camera),
                value,
                "{path:?} changed under a read-back write"
            );
        }
    }

    #[test]
    fn object_edits_go_to_scratch_not_slot() {
        let mut scene = SceneState::new();
        let mut camera = Camera::default();

        FieldPath::ObjectPosition(Axis::X).set(
            &mut scene,
            &mut camera,
            BoundValue::Scalar(7.5),
        );

        assert_eq!(scene.scratch.transform.position.x, 7.5);
        assert_ne!(scene.slots[0].transform.position.x, 7.5);

        scene.commit_scratch();
        assert_eq!(scene.slots[0].transform.position.x, 7.5);
    }

    #[test]
    fn locked_fields_reject_writes() {
        let mut scene = SceneState::new();
        let mut camera = Camera::default();
        let before = scene.scratch.transform;

        for path in [
            FieldPath::ObjectPosition(Axis::Y),
            FieldPath::ObjectRotation(Axis::X),
            FieldPath::ObjectRotation(Axis::Z),
        ] {
            assert!(!path.editable());
            path.set(&mut scene, &mut camera, BoundValue::Scalar(99.0));
        }

        assert_eq!(scene.scratch.transform, before);
    }

    #[test]
    fn camera_planes_clamp_through_table() {
        let mut scene = SceneState::new();
        let mut camera = Camera::default();

        FieldPath::CameraFar.set(&mut scene, &mut camera, BoundValue::Scalar(5.0));
        FieldPath::CameraNear.set(&mut scene, &mut camera, BoundValue::Scalar(19.0));
        assert_eq!(camera.near, 4.5);

        FieldPath::CameraFovy.set(&mut scene, &mut camera, BoundValue::Scalar(500.0));
        assert_eq!(camera.fovy, 100.0);
    }

    #[test]
    fn directional_flag_drives_position_w() {
        let mut scene = SceneState::new();
        let mut camera = Camera::default();

        assert_eq!(scene.lights[0].position.w, 1.0);
        FieldPath::LightDirectional(0).set(&mut scene, &mut camera, BoundValue::Flag(true));
        assert_eq!(scene.lights[0].position.w, 0.0);
        FieldPath::LightDirectional(0).set(&mut scene, &mut camera, BoundValue::Flag(false));
        assert_eq!(scene.lights[0].position.w, 1.0);
    }
}
