//! WGPU-based rendering engine for the scene viewer.
//!
//! Owns the surface, device, depth buffer, pipelines and every uniform
//! buffer. A frame is one command submission: the solid pass draws the
//! floor and the four object slots, then the light markers, then the
//! wireframe overlay of the active object, then the UI overlay.

use std::path::Path;
use std::sync::Arc;

use cgmath::{vec3, Deg};
use wgpu::TextureFormat;

use crate::{
    error::MaquetteError,
    gfx::{
        camera::trackball::Camera,
        matrix_stack::MatrixStack,
        mesh::{DrawMesh, MeshKind, MeshLibrary},
        resources::{
            global_bindings::{
                FlatBindings, FlatUBO, FlatUniform, FrameUBO, FrameUniform, GlobalBindings,
                ModelBindings, ModelUBO, ModelUniform,
            },
            material::{channel_to_unit, MaterialBindings, MaterialUBO},
            texture_resource::TextureResource,
        },
        scene::{
            light::MAX_LIGHTS,
            object::Transform,
            pack_lights,
            scene::{RenderOptions, SceneState, SLOT_COUNT},
        },
    },
};

use super::pipeline_manager::{variant_name, PipelineConfig, PipelineManager};

/// Extra scale added per axis to the wireframe overlay so it sits just
/// outside the surface it outlines.
const WIREFRAME_OFFSET: f32 = 0.01;

/// Uniform scale of the light marker spheres.
const LIGHT_MARKER_SCALE: f32 = 0.1;

/// Per-draw GPU state for one solid object.
struct ObjectDraw {
    model_ubo: ModelUBO,
    model_bind_group: wgpu::BindGroup,
    material_ubo: MaterialUBO,
    material_bind_group: wgpu::BindGroup,
}

/// Per-draw GPU state for a flat-colored draw (markers, wireframe).
struct FlatDraw {
    model_ubo: ModelUBO,
    model_bind_group: wgpu::BindGroup,
    flat_ubo: FlatUBO,
    flat_bind_group: wgpu::BindGroup,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,

    frame_ubo: FrameUBO,
    global_bindings: GlobalBindings,

    mesh_library: MeshLibrary,

    // One set of buffers per drawn thing, all pre-allocated: floor plus
    // the four slots, one marker per light, one wireframe overlay.
    object_draws: Vec<ObjectDraw>,
    light_draws: Vec<FlatDraw>,
    wireframe_draw: FlatDraw,
}

impl RenderEngine {
    /// Creates the engine for the given window, loading all meshes from
    /// `assets_dir` and pre-building every pipeline variant.
    ///
    /// # Panics
    /// Panics if no wgpu adapter or device is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        assets_dir: &Path,
    ) -> Result<RenderEngine, MaquetteError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("WGPU Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    memory_hints: wgpu::MemoryHints::default(),
                    trace: wgpu::Trace::Off,
                })
                .await
                .expect("Failed to request a device!")
        };

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let mesh_library = MeshLibrary::load(&device, assets_dir)?;

        let frame_ubo = FrameUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &frame_ubo);

        let model_bindings = ModelBindings::new(&device);
        let material_bindings = MaterialBindings::new(&device);
        let flat_bindings = FlatBindings::new(&device);

        let object_draws = (0..SLOT_COUNT + 1)
            .map(|_| {
                let model_ubo = ModelUBO::new(&device);
                let material_ubo = MaterialUBO::new(&device);
                ObjectDraw {
                    model_bind_group: model_bindings.create_bind_group(&device, &model_ubo),
                    material_bind_group: material_bindings
                        .create_bind_group(&device, &material_ubo),
                    model_ubo,
                    material_ubo,
                }
            })
            .collect();

        let make_flat_draw = |device: &wgpu::Device| {
            let model_ubo = ModelUBO::new(device);
            let flat_ubo = FlatUBO::new(device);
            FlatDraw {
                model_bind_group: model_bindings.create_bind_group(device, &model_ubo),
                flat_bind_group: flat_bindings.create_bind_group(device, &flat_ubo),
                model_ubo,
                flat_ubo,
            }
        };

        let light_draws = (0..MAX_LIGHTS).map(|_| make_flat_draw(&device)).collect();
        let wireframe_draw = make_flat_draw(&device);

        let device_handle: Arc<wgpu::Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("phong", include_str!("phong.wgsl"));
        pipeline_manager.load_shader("flat", include_str!("flat.wgsl"));

        let color_targets = vec![Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        // One pipeline per option combination, so the panel toggles never
        // trigger a pipeline rebuild mid-session.
        for depth_test in [false, true] {
            for backface_culling in [false, true] {
                let name = variant_name("phong", depth_test, backface_culling);
                pipeline_manager.register_pipeline(
                    &name,
                    PipelineConfig::default_with_shader("phong")
                        .with_label(&name)
                        .with_depth(TextureResource::DEPTH_FORMAT, depth_test)
                        .with_cull_mode(backface_culling.then_some(wgpu::Face::Back))
                        .with_color_targets(color_targets.clone())
                        .with_bind_group_layouts(vec![
                            global_bindings.bind_group_layouts().clone(),
                            model_bindings.bind_group_layouts().clone(),
                            material_bindings.bind_group_layouts().clone(),
                        ]),
                );
            }

            let flat_layouts = vec![
                global_bindings.bind_group_layouts().clone(),
                model_bindings.bind_group_layouts().clone(),
                flat_bindings.bind_group_layouts().clone(),
            ];

            let marker_name = variant_name("flat", depth_test, false);
            pipeline_manager.register_pipeline(
                &marker_name,
                PipelineConfig::default_with_shader("flat")
                    .with_label(&marker_name)
                    .with_depth(TextureResource::DEPTH_FORMAT, depth_test)
                    .with_color_targets(color_targets.clone())
                    .with_bind_group_layouts(flat_layouts.clone()),
            );

            let wire_name = variant_name("wire", depth_test, false);
            pipeline_manager.register_pipeline(
                &wire_name,
                PipelineConfig::default_with_shader("flat")
                    .with_label(&wire_name)
                    .with_depth(TextureResource::DEPTH_FORMAT, depth_test)
                    .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                    .with_color_targets(color_targets.clone())
                    .with_bind_group_layouts(flat_layouts),
            );
        }

        pipeline_manager.create_all_pipelines()?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            frame_ubo,
            global_bindings,
            mesh_library,
            object_draws,
            light_draws,
            wireframe_draw,
        })
    }

    /// Applies a slot transform to the stack in the fixed order:
    /// translation, X rotation, Y rotation, Z rotation, scale.
    fn apply_transform(stack: &mut MatrixStack, transform: &Transform, scale_offset: f32) {
        stack.translate(transform.position);
        stack.rotate_x(Deg(transform.rotation.x));
        stack.rotate_y(Deg(transform.rotation.y));
        stack.rotate_z(Deg(transform.rotation.z));
        stack.scale(transform.scale + vec3(scale_offset, scale_offset, scale_offset));
    }

    /// Renders one frame of `scene` as seen by `camera`.
    ///
    /// The optional `ui_callback` records the UI overlay into the same
    /// command encoder, after the scene passes.
    pub fn render_frame<F>(&mut self, scene: &SceneState, camera: &Camera, ui_callback: Option<F>)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let view = camera.view();
        let projection = camera.projection();

        let packed = pack_lights(&scene.lights);
        self.frame_ubo
            .update_content(&self.queue, FrameUniform::new(projection, view, &packed));

        // The stack starts at the view matrix; every draw composes its
        // model transform on top inside a push/pop scope.
        let mut stack = MatrixStack::new();
        stack.load(view);

        for (draw, object) in self.object_draws.iter_mut().zip(scene.drawn_objects()) {
            let model_view = stack.with_saved(|s| {
                Self::apply_transform(s, &object.transform, 0.0);
                s.current()
            });
            draw.model_ubo
                .update_content(&self.queue, ModelUniform::new(model_view));
            draw.material_ubo
                .update_content(&self.queue, object.material.to_uniform());
        }

        for (draw, light) in self.light_draws.iter_mut().zip(scene.lights.iter()) {
            if !light.active {
                continue;
            }
            let model_view = stack.with_saved(|s| {
                s.translate(light.position.truncate());
                s.scale(vec3(
                    LIGHT_MARKER_SCALE,
                    LIGHT_MARKER_SCALE,
                    LIGHT_MARKER_SCALE,
                ));
                s.current()
            });
            draw.model_ubo
                .update_content(&self.queue, ModelUniform::new(model_view));
            draw.flat_ubo.update_content(
                &self.queue,
                FlatUniform {
                    color: [
                        channel_to_unit(light.diffuse[0]),
                        channel_to_unit(light.diffuse[1]),
                        channel_to_unit(light.diffuse[2]),
                        1.0,
                    ],
                },
            );
        }

        if scene.wireframe {
            let active = &scene.slots[scene.active_index()];
            let model_view = stack.with_saved(|s| {
                Self::apply_transform(s, &active.transform, WIREFRAME_OFFSET);
                s.current()
            });
            self.wireframe_draw
                .model_ubo
                .update_content(&self.queue, ModelUniform::new(model_view));
            self.wireframe_draw.flat_ubo.update_content(
                &self.queue,
                FlatUniform {
                    color: [1.0, 1.0, 1.0, 1.0],
                },
            );
        }
        debug_assert_eq!(stack.depth(), 0);

        let options = scene.options;
        let solid_pipeline = self
            .pipeline_manager
            .get_pipeline(&variant_name(
                "phong",
                options.depth_test,
                options.backface_culling,
            ))
            .cloned();
        let marker_pipeline = self
            .pipeline_manager
            .get_pipeline(&variant_name("flat", options.depth_test, false))
            .cloned();
        let wire_pipeline = self
            .pipeline_manager
            .get_pipeline(&variant_name("wire", options.depth_test, false))
            .cloned();

        let surface_texture = self
            .surface
            .get_current_texture()
            .expect("Failed to get surface texture!");
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.78,
                            g: 0.78,
                            b: 0.78,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

            if let Some(pipeline) = &solid_pipeline {
                render_pass.set_pipeline(pipeline);
                for (draw, object) in self.object_draws.iter().zip(scene.drawn_objects()) {
                    render_pass.set_bind_group(1, &draw.model_bind_group, &[]);
                    render_pass.set_bind_group(2, &draw.material_bind_group, &[]);
                    render_pass.draw_mesh_solid(self.mesh_library.get(object.mesh));
                }
            }

            if options.show_lights {
                if let Some(pipeline) = &marker_pipeline {
                    render_pass.set_pipeline(pipeline);
                    let marker_mesh = self.mesh_library.get(MeshKind::Sphere);
                    for (draw, light) in self.light_draws.iter().zip(scene.lights.iter()) {
                        if !light.active {
                            continue;
                        }
                        render_pass.set_bind_group(1, &draw.model_bind_group, &[]);
                        render_pass.set_bind_group(2, &draw.flat_bind_group, &[]);
                        render_pass.draw_mesh_solid(marker_mesh);
                    }
                }
            }

            if scene.wireframe {
                if let Some(pipeline) = &wire_pipeline {
                    render_pass.set_pipeline(pipeline);
                    let active = &scene.slots[scene.active_index()];
                    render_pass.set_bind_group(1, &self.wireframe_draw.model_bind_group, &[]);
                    render_pass.set_bind_group(2, &self.wireframe_draw.flat_bind_group, &[]);
                    render_pass.draw_mesh_lines(self.mesh_library.get(active.mesh));
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Resizes the surface and recreates the depth buffer to match.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Pipeline variants a frame can request, used to sanity check option
/// routing without a GPU.
pub fn pipelines_for_options(options: &RenderOptions) -> [String; 3] {
    [
        variant_name("phong", options.depth_test, options.backface_culling),
        variant_name("flat", options.depth_test, false),
        variant_name("wire", options.depth_test, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn culling_never_applies_to_flat_variants() {
        let options = RenderOptions {
            depth_test: true,
            backface_culling: true,
            show_lights: true,
            animate_lights: false,
        };
        let [solid, marker, wire] = pipelines_for_options(&options);
        assert_eq!(solid, "phong+depth+cull");
        assert_eq!(marker, "flat+depth");
        assert_eq!(wire, "wire+depth");
    }

    #[test]
    fn wireframe_transform_grows_by_offset() {
        let transform = Transform {
            scale: vec3(2.0, 2.0, 2.0),
            ..Transform::default()
        };
        let mut stack = MatrixStack::new();
        RenderEngine::apply_transform(&mut stack, &transform, WIREFRAME_OFFSET);
        assert!((stack.current()[0][0] - 2.01).abs() < 1e-6);
    }
}
