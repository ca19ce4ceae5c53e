//! Scene state: object slots, lights, render options and selection.

pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

pub use light::{pack_lights, Light, PackedLights, MAX_LIGHTS};
pub use object::{SceneObject, Transform};
pub use scene::{RenderOptions, SceneState, SLOT_COUNT};
pub use vertex::Vertex3D;
