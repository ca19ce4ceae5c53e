//! Mouse input routing for the trackball camera.

use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    keyboard::ModifiersState,
    window::Window,
};

use super::trackball::Camera;

/// Maps raw mouse input onto camera motions:
///
/// * left drag orbits,
/// * plain wheel zooms (field of view),
/// * wheel with ctrl or the platform command key dollies; ctrl carries the
///   look-at point along so the whole camera slides.
pub struct CameraController {
    is_mouse_pressed: bool,
    modifiers: ModifiersState,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            is_mouse_pressed: false,
            modifiers: ModifiersState::empty(),
        }
    }

    /// Called from the window event loop on `ModifiersChanged`.
    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    pub fn is_dragging(&self) -> bool {
        self.is_mouse_pressed
    }

    pub fn process_events(&mut self, event: &DeviceEvent, window: &Window, camera: &mut Camera) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => scroll * 40.0,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };

                if self.modifiers.control_key() || self.modifiers.super_key() {
                    camera.dolly(scroll_amount, self.modifiers.control_key());
                } else {
                    camera.zoom(scroll_amount);
                }
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    camera.orbit(delta.0 as f32, delta.1 as f32);
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}
