//! Window plumbing and the winit application handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{camera_utils::CameraManager, trackball::Camera},
    rendering::RenderEngine,
    scene::SceneState,
};
use crate::ui::{panel, UiManager};

/// The viewer application: owns the event loop and all per-session state.
pub struct MaquetteApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: SceneState,
    camera_manager: CameraManager,
    assets_dir: PathBuf,
}

impl MaquetteApp {
    /// Creates the application with the default scene and camera,
    /// loading mesh assets from `assets_dir`.
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene: SceneState::new(),
                camera_manager: CameraManager::new(Camera::default()),
                assets_dir: assets_dir.into(),
            },
        }
    }

    /// Runs the application, consuming self and blocking on the event loop.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

/// Maps the slot selection keys (1 to 4) to a slot index.
fn slot_for_key(key_code: KeyCode) -> Option<usize> {
    match key_code {
        KeyCode::Digit1 => Some(0),
        KeyCode::Digit2 => Some(1),
        KeyCode::Digit3 => Some(2),
        KeyCode::Digit4 => Some(3),
        _ => None,
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("maquette")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.camera_manager.camera.resize(width, height);

            let window_clone = window_handle.clone();
            let assets_dir = self.assets_dir.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height, &assets_dir).await
            })
            .expect("Failed to create render engine");

            let ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // The UI gets first refusal on input events.
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_input(window, window_id, &event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        state: winit::event::ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::Escape {
                    event_loop.exit();
                } else if let Some(slot) = slot_for_key(key_code) {
                    self.scene.select(slot);
                    window.request_redraw();
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.camera_manager
                    .controller
                    .set_modifiers(modifiers.state());
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.camera.resize(width, height);
                render_engine.resize(width, height);
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.scene.update();

                // The panels mutate the live state while the frame renders
                // a snapshot of it; edits take effect next frame.
                let scene_snapshot = self.scene.clone();
                let camera_snapshot = self.camera_manager.camera;
                let scene = &mut self.scene;
                let camera = &mut self.camera_manager.camera;

                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    let window_clone = window.clone();
                    render_engine.render_frame(
                        &scene_snapshot,
                        &camera_snapshot,
                        Some(|device: &wgpu::Device,
                              queue: &wgpu::Queue,
                              encoder: &mut wgpu::CommandEncoder,
                              color_attachment: &wgpu::TextureView| {
                            ui_manager.draw(
                                device,
                                queue,
                                encoder,
                                &window_clone,
                                color_attachment,
                                |ui| panel::draw_panels(ui, scene, camera),
                            );
                        }),
                    );
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Drags over a panel edit widgets, not the camera.
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_input() {
                return;
            }
        }

        self.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
