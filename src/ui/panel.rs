//! The editor panels, built entirely on the binding table.
//!
//! Widgets never touch scene fields directly: each reads its value
//! through a [`FieldPath`] and writes back through the same path, so the
//! set of editable state is exactly what the table enumerates.

use std::borrow::Cow;

use imgui::Ui;

use crate::gfx::camera::trackball::Camera;
use crate::gfx::mesh::MeshKind;
use crate::gfx::resources::material::{channel_to_unit, unit_to_channel};
use crate::gfx::scene::{SceneState, MAX_LIGHTS};

use super::bindings::{Axis, BoundValue, FieldPath};

pub fn draw_panels(ui: &Ui, scene: &mut SceneState, camera: &mut Camera) {
    object_panel(ui, scene, camera);
    camera_panel(ui, scene, camera);
    lights_panel(ui, scene, camera);
    options_panel(ui, scene, camera);
}

fn bound_slider(
    ui: &Ui,
    label: &str,
    path: FieldPath,
    scene: &mut SceneState,
    camera: &mut Camera,
) {
    if let BoundValue::Scalar(mut v) = path.get(scene, camera) {
        let (min, max) = path.range().unwrap_or((-10.0, 10.0));
        ui.disabled(!path.editable(), || {
            if ui.slider(label, min, max, &mut v) {
                path.set(scene, camera, BoundValue::Scalar(v));
            }
        });
    }
}

fn bound_color(
    ui: &Ui,
    label: &str,
    path: FieldPath,
    scene: &mut SceneState,
    camera: &mut Camera,
) {
    if let BoundValue::Color(c) = path.get(scene, camera) {
        let mut rgb = [
            channel_to_unit(c[0]),
            channel_to_unit(c[1]),
            channel_to_unit(c[2]),
        ];
        if ui.color_edit3(label, &mut rgb) {
            path.set(
                scene,
                camera,
                BoundValue::Color([
                    unit_to_channel(rgb[0]),
                    unit_to_channel(rgb[1]),
                    unit_to_channel(rgb[2]),
                ]),
            );
        }
    }
}

fn bound_checkbox(
    ui: &Ui,
    label: &str,
    path: FieldPath,
    scene: &mut SceneState,
    camera: &mut Camera,
) {
    if let BoundValue::Flag(mut b) = path.get(scene, camera) {
        if ui.checkbox(label, &mut b) {
            path.set(scene, camera, BoundValue::Flag(b));
        }
    }
}

fn object_panel(ui: &Ui, scene: &mut SceneState, camera: &mut Camera) {
    ui.window("Object")
        .size([320.0, 480.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .build(|| {
            ui.text(format!(
                "Slot {} (keys 1-4 switch, reselect toggles wireframe)",
                scene.active_index() + 1
            ));
            ui.separator();

            if let BoundValue::MeshChoice(mut idx) = FieldPath::ObjectMesh.get(scene, camera) {
                let names: Vec<&str> = MeshKind::ALL.iter().map(|k| k.display_name()).collect();
                if ui.combo("shape", &mut idx, &names, |name| Cow::Borrowed(*name)) {
                    FieldPath::ObjectMesh.set(scene, camera, BoundValue::MeshChoice(idx));
                }
            }

            if ui.collapsing_header("position", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                for axis in Axis::ALL {
                    bound_slider(ui, axis.label(), FieldPath::ObjectPosition(axis), scene, camera);
                }
            }

            if ui.collapsing_header("rotation", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                for axis in Axis::ALL {
                    let _id = ui.push_id(axis.label());
                    bound_slider(
                        ui,
                        &format!("{} rot", axis.label()),
                        FieldPath::ObjectRotation(axis),
                        scene,
                        camera,
                    );
                }
            }

            if ui.collapsing_header("scale", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                for axis in Axis::ALL {
                    let _id = ui.push_id(axis.label());
                    bound_slider(
                        ui,
                        &format!("{} scale", axis.label()),
                        FieldPath::ObjectScale(axis),
                        scene,
                        camera,
                    );
                }
            }

            if ui.collapsing_header("material", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                bound_color(ui, "Ka", FieldPath::MaterialKa, scene, camera);
                bound_color(ui, "Kd", FieldPath::MaterialKd, scene, camera);
                bound_color(ui, "Ks", FieldPath::MaterialKs, scene, camera);
                bound_slider(ui, "shininess", FieldPath::MaterialShininess, scene, camera);
            }
        });
}

fn camera_panel(ui: &Ui, scene: &mut SceneState, camera: &mut Camera) {
    ui.window("Camera")
        .size([300.0, 220.0], imgui::Condition::FirstUseEver)
        .position([340.0, 10.0], imgui::Condition::FirstUseEver)
        .build(|| {
            bound_slider(ui, "fovy", FieldPath::CameraFovy, scene, camera);
            bound_slider(ui, "near", FieldPath::CameraNear, scene, camera);
            bound_slider(ui, "far", FieldPath::CameraFar, scene, camera);

            ui.separator();
            // The pose is drag-driven; the panel only reports it.
            ui.text(format!(
                "eye {:.2} {:.2} {:.2}",
                camera.eye.x, camera.eye.y, camera.eye.z
            ));
            ui.text(format!(
                "at  {:.2} {:.2} {:.2}",
                camera.at.x, camera.at.y, camera.at.z
            ));
            ui.text(format!(
                "up  {:.2} {:.2} {:.2}",
                camera.up.x, camera.up.y, camera.up.z
            ));
        });
}

fn lights_panel(ui: &Ui, scene: &mut SceneState, camera: &mut Camera) {
    ui.window("Lights")
        .size([320.0, 420.0], imgui::Condition::FirstUseEver)
        .position([340.0, 240.0], imgui::Condition::FirstUseEver)
        .build(|| {
            for i in 0..MAX_LIGHTS {
                let _id = ui.push_id_usize(i);
                if ui.collapsing_header(
                    format!("Light {}", i + 1),
                    imgui::TreeNodeFlags::DEFAULT_OPEN,
                ) {
                    bound_checkbox(ui, "active", FieldPath::LightActive(i), scene, camera);
                    ui.same_line();
                    bound_checkbox(
                        ui,
                        "directional",
                        FieldPath::LightDirectional(i),
                        scene,
                        camera,
                    );

                    for axis in Axis::ALL {
                        bound_slider(
                            ui,
                            axis.label(),
                            FieldPath::LightPosition(i, axis),
                            scene,
                            camera,
                        );
                    }

                    bound_color(ui, "ambient", FieldPath::LightAmbient(i), scene, camera);
                    bound_color(ui, "diffuse", FieldPath::LightDiffuse(i), scene, camera);
                    bound_color(ui, "specular", FieldPath::LightSpecular(i), scene, camera);
                }
            }
        });
}

fn options_panel(ui: &Ui, scene: &mut SceneState, camera: &mut Camera) {
    ui.window("Options")
        .size([300.0, 140.0], imgui::Condition::FirstUseEver)
        .position([340.0, 670.0], imgui::Condition::FirstUseEver)
        .build(|| {
            bound_checkbox(ui, "depth test", FieldPath::OptionDepthTest, scene, camera);
            bound_checkbox(
                ui,
                "backface culling",
                FieldPath::OptionBackfaceCulling,
                scene,
                camera,
            );
            bound_checkbox(ui, "show lights", FieldPath::OptionShowLights, scene, camera);
            bound_checkbox(
                ui,
                "animate lights",
                FieldPath::OptionAnimateLights,
                scene,
                camera,
            );
        });
}
