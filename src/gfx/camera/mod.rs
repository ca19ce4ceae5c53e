//! Trackball camera, its input controller and matrix helpers.

pub mod camera_controller;
pub mod camera_utils;
pub mod trackball;

pub use camera_controller::CameraController;
pub use camera_utils::{convert_matrix4_to_array, CameraManager};
pub use trackball::{Camera, MIN_PLANE_GAP, OPENGL_TO_WGPU_MATRIX};
