//! Trackball camera: drag to orbit, wheel to zoom or dolly.

use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Minimum separation kept between the near and far planes.
pub const MIN_PLANE_GAP: f32 = 0.5;

/// A free-orientation orbit camera.
///
/// Unlike a pitch/yaw rig there is no fixed pole: orbiting rotates both
/// the eye offset and the up vector, so the camera can roll over the top
/// of the scene without flipping.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vector3<f32>,
    pub at: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: vec3(0.0, 0.0, 5.0),
            at: vec3(0.0, 0.0, 0.0),
            up: vec3(0.0, 1.0, 0.0),
            fovy: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 20.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.at),
            self.up,
        )
    }

    pub fn projection(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(Deg(self.fovy), self.aspect, self.near, self.far)
    }

    /// Rotates the camera about the look-at point from a mouse drag.
    ///
    /// The rotation axis is perpendicular to the drag direction in view
    /// space (a horizontal drag spins about the view-space Y axis), built
    /// in world space by conjugating with the current view matrix. Both
    /// the eye offset and the up vector rotate, as directions.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let angle = Deg(0.5 * (dx * dx + dy * dy).sqrt());
        let axis = vec3(-dy, -dx, 0.0).normalize();

        let view = self.view();
        let inv_view = match view.invert() {
            Some(inv) => inv,
            // look_at of a degenerate eye/at/up triple; skip the drag.
            None => return,
        };
        let rotation = inv_view * Matrix4::from_axis_angle(axis, angle) * view;

        let eye_at = rotation * (self.eye - self.at).extend(0.0);
        let up = rotation * self.up.extend(0.0);

        self.eye = self.at + eye_at.truncate();
        self.up = up.truncate();
    }

    /// Narrows or widens the field of view from a wheel delta, clamped to
    /// `[1, 100]` degrees.
    pub fn zoom(&mut self, delta_y: f32) {
        let factor = 1.0 - delta_y / 1000.0;
        self.fovy = (self.fovy * factor).clamp(1.0, 100.0);
    }

    /// Moves the eye along the view direction. With `move_at` the look-at
    /// point travels too, so the camera slides instead of closing in.
    pub fn dolly(&mut self, delta_y: f32, move_at: bool) {
        let dir = self.at - self.eye;
        if dir.magnitude2() == 0.0 {
            return;
        }
        let offset = dir.normalize() * (delta_y / 1000.0);

        self.eye += offset;
        if move_at {
            self.at += offset;
        }
    }

    /// Sets the near plane, keeping it at least [`MIN_PLANE_GAP`] in front
    /// of the far plane.
    pub fn set_near(&mut self, near: f32) {
        self.near = near.min(self.far - MIN_PLANE_GAP);
    }

    /// Sets the far plane, keeping it at least [`MIN_PLANE_GAP`] behind
    /// the near plane.
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near + MIN_PLANE_GAP);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn orbit_preserves_distance_and_up_length() {
        let mut camera = Camera::default();
        let distance = (camera.eye - camera.at).magnitude();

        camera.orbit(37.0, -12.0);

        assert_abs_diff_eq!(
            (camera.eye - camera.at).magnitude(),
            distance,
            epsilon = 1e-4
        );
        assert_abs_diff_eq!(camera.up.magnitude(), 1.0, epsilon = 1e-4);
        // Up stays perpendicular to the view direction.
        assert_abs_diff_eq!(
            camera.up.dot((camera.at - camera.eye).normalize()),
            0.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn orbit_with_zero_drag_is_identity() {
        let mut camera = Camera::default();
        let before = camera;
        camera.orbit(0.0, 0.0);
        assert_eq!(camera.eye, before.eye);
        assert_eq!(camera.up, before.up);
    }

    #[test]
    fn horizontal_drag_spins_about_view_up() {
        let mut camera = Camera::default();
        camera.orbit(90.0, 0.0);
        // A pure horizontal drag must not roll the camera.
        assert_abs_diff_eq!(camera.up, vec3(0.0, 1.0, 0.0), epsilon = 1e-4);
        // 0.5 deg/pixel: 90 px is a 45 degree swing in the XZ plane.
        let expected = 5.0 * Deg(45.0).sin();
        assert_abs_diff_eq!(camera.eye.x.abs(), expected, epsilon = 1e-3);
        assert_abs_diff_eq!(camera.eye.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn zoom_scales_and_clamps_fovy() {
        let mut camera = Camera::default();
        camera.zoom(100.0);
        assert_abs_diff_eq!(camera.fovy, 45.0 * 0.9, epsilon = 1e-5);

        camera.fovy = 45.0;
        camera.zoom(-500.0);
        assert_abs_diff_eq!(camera.fovy, 67.5, epsilon = 1e-5);

        camera.fovy = 99.0;
        camera.zoom(-2000.0);
        assert_eq!(camera.fovy, 100.0);

        camera.fovy = 2.0;
        camera.zoom(900.0);
        assert_eq!(camera.fovy, 1.0);
    }

    #[test]
    fn dolly_moves_along_view_direction() {
        let mut camera = Camera::default();
        camera.dolly(500.0, false);
        // Eye starts at +5 on Z looking at the origin, so it moves toward -Z.
        assert_abs_diff_eq!(camera.eye, vec3(0.0, 0.0, 4.5), epsilon = 1e-5);
        assert_eq!(camera.at, vec3(0.0, 0.0, 0.0));

        camera.dolly(500.0, true);
        assert_abs_diff_eq!(camera.eye, vec3(0.0, 0.0, 4.0), epsilon = 1e-5);
        assert_abs_diff_eq!(camera.at, vec3(0.0, 0.0, -0.5), epsilon = 1e-5);
    }

    #[test]
    fn near_far_keep_their_gap() {
        let mut camera = Camera::default();
        camera.set_far(5.0);
        camera.set_near(10.0);
        assert_eq!(camera.near, 4.5);

        camera.set_far(camera.near - 3.0);
        assert_eq!(camera.far, camera.near + MIN_PLANE_GAP);
    }
}
