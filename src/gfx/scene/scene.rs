//! Central scene state: object slots, lights, options and selection.
//!
//! All mutable viewer state lives in one `SceneState` owned by the app and
//! passed by reference to input handlers and the per-frame draw routine;
//! there are no module-scope globals.

use log::debug;

use super::light::{animate_lights, Light, ANIMATION_STEP, MAX_LIGHTS};
use super::object::SceneObject;

/// Number of editable object slots.
pub const SLOT_COUNT: usize = 4;

/// Boolean render toggles editable from the options panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub depth_test: bool,
    pub backface_culling: bool,
    pub show_lights: bool,
    pub animate_lights: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth_test: true,
            backface_culling: false,
            show_lights: true,
            animate_lights: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneState {
    /// The four editable slots.
    pub slots: [SceneObject; SLOT_COUNT],
    /// The fixed floor slab, drawn but never selected.
    pub floor: SceneObject,
    pub lights: [Light; MAX_LIGHTS],
    pub options: RenderOptions,
    /// Index of the slot being edited.
    active: usize,
    /// Working copy the property panel edits; committed back to the active
    /// slot once per frame and on reselect.
    pub scratch: SceneObject,
    /// Whether the wireframe overlay is drawn over the active object.
    pub wireframe: bool,
}

impl SceneState {
    pub fn new() -> Self {
        let slots = SceneObject::default_slots();
        let scratch = slots[0].clone();
        Self {
            slots,
            floor: SceneObject::floor(),
            lights: Light::default_rig(),
            options: RenderOptions::default(),
            active: 0,
            scratch,
            wireframe: false,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Writes the scratch copy back into the active slot. Called once per
    /// frame before drawing, and from [`select`](Self::select).
    pub fn commit_scratch(&mut self) {
        self.slots[self.active] = self.scratch.clone();
    }

    /// Activates slot `index` (0-based).
    ///
    /// Commits the scratch edits to the previously active slot first. If
    /// `index` is already active the wireframe overlay is toggled instead;
    /// otherwise the slot's stored state is cloned into the scratch copy
    /// and the overlay is forced on.
    pub fn select(&mut self, index: usize) {
        debug_assert!(index < SLOT_COUNT);
        self.commit_scratch();

        if index == self.active {
            self.wireframe = !self.wireframe;
            debug!("slot {} re-selected, wireframe {}", index + 1, self.wireframe);
            return;
        }

        self.active = index;
        self.scratch = self.slots[index].clone();
        self.wireframe = true;
        debug!("slot {} activated ({:?})", index + 1, self.scratch.mesh);
    }

    /// Per-frame state advance: commit pending edits and step the light
    /// animation when enabled.
    pub fn update(&mut self) {
        self.commit_scratch();
        if self.options.animate_lights {
            animate_lights(&mut self.lights, ANIMATION_STEP);
        }
    }

    /// Objects drawn with the solid pipeline, floor first.
    pub fn drawn_objects(&self) -> impl Iterator<Item = &SceneObject> {
        std::iter::once(&self.floor).chain(self.slots.iter())
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    #[test]
    fn select_commits_scratch_and_clones_target() {
        let mut scene = SceneState::new();

        // Edit the active object (slot 0) through the scratch copy.
        scene.scratch.transform.position = vec3(2.5, 0.5, -3.0);
        scene.scratch.material.shininess = 42.0;
        let edited = scene.scratch.clone();

        scene.select(1);

        // A's edits were written back unchanged...
        assert_eq!(scene.slots[0], edited);
        // ...and the scratch copy now equals slot B by value.
        assert_eq!(scene.scratch, scene.slots[1]);
        assert_eq!(scene.active_index(), 1);
        assert!(scene.wireframe);

        // Mutating scratch does not touch slot B until the next commit.
        scene.scratch.transform.rotation.y = 90.0;
        assert_ne!(scene.scratch, scene.slots[1]);
    }

    #[test]
    fn reselecting_active_slot_toggles_wireframe() {
        let mut scene = SceneState::new();
        assert!(!scene.wireframe);

        scene.select(0);
        assert!(scene.wireframe);
        assert_eq!(scene.active_index(), 0);

        scene.select(0);
        assert!(!scene.wireframe);

        // Switching to another slot forces the overlay back on.
        scene.select(2);
        assert!(scene.wireframe);
    }

    #[test]
    fn update_commits_and_animates() {
        let mut scene = SceneState::new();
        scene.scratch.transform.position.x = 9.0;
        scene.options.animate_lights = true;
        let light0_before = scene.lights[0].position;

        scene.update();

        assert_eq!(scene.slots[0].transform.position.x, 9.0);
        assert_ne!(scene.lights[0].position, light0_before);
    }

    #[test]
    fn drawn_objects_starts_with_floor() {
        let scene = SceneState::new();
        let drawn: Vec<_> = scene.drawn_objects().collect();
        assert_eq!(drawn.len(), SLOT_COUNT + 1);
        assert_eq!(*drawn[0], scene.floor);
    }
}
