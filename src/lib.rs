//! Maquette 3D scene viewer
//!
//! An interactive scene editor built on wgpu and winit: four editable
//! object slots over a fixed floor, Phong lighting with three editable
//! lights, a trackball camera and an imgui property panel.

pub mod app;
pub mod error;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::MaquetteApp;
pub use error::MaquetteError;

/// Creates a viewer loading meshes from the `assets` directory next to
/// the working directory.
pub fn default() -> MaquetteApp {
    MaquetteApp::new("assets")
}
