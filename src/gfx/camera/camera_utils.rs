//! Camera ownership plus matrix conversion helpers.

use cgmath::Matrix4;
use winit::{event::DeviceEvent, window::Window};

use super::{camera_controller::CameraController, trackball::Camera};

/// Bundles the camera with its input controller.
pub struct CameraManager {
    pub camera: Camera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            controller: CameraController::new(),
        }
    }

    pub fn process_event(&mut self, event: &DeviceEvent, window: &Window) {
        self.controller
            .process_events(event, window, &mut self.camera);
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}
