//! Stack-scoped model-view matrix composition.
//!
//! The renderer composes every object's transform onto the current view
//! matrix through this stack. Push and pop are statically paired, one pair
//! per draw; an unpaired pop is a programming error and panics.

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

pub struct MatrixStack {
    stack: Vec<Matrix4<f32>>,
    current: Matrix4<f32>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            current: Matrix4::identity(),
        }
    }

    /// Replaces the current matrix, typically with the view matrix at the
    /// start of a frame.
    pub fn load(&mut self, m: Matrix4<f32>) {
        self.current = m;
    }

    pub fn current(&self) -> Matrix4<f32> {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Duplicates the current matrix onto the stack.
    pub fn push(&mut self) {
        self.stack.push(self.current);
    }

    /// Discards the current matrix and restores the previously pushed one.
    ///
    /// # Panics
    /// Panics on underflow; push/pop calls are paired one per draw.
    pub fn pop(&mut self) {
        self.current = self.stack.pop().expect("matrix stack underflow");
    }

    /// Runs `f` between a push/pop pair so the pairing invariant holds
    /// structurally.
    pub fn with_saved<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push();
        let result = f(self);
        self.pop();
        result
    }

    /// Multiplies `m` onto the current matrix: `current = current * m`.
    pub fn mult(&mut self, m: Matrix4<f32>) {
        self.current = self.current * m;
    }

    pub fn translate(&mut self, t: Vector3<f32>) {
        self.mult(Matrix4::from_translation(t));
    }

    pub fn rotate_x(&mut self, angle: Deg<f32>) {
        self.mult(Matrix4::from_angle_x(angle));
    }

    pub fn rotate_y(&mut self, angle: Deg<f32>) {
        self.mult(Matrix4::from_angle_y(angle));
    }

    pub fn rotate_z(&mut self, angle: Deg<f32>) {
        self.mult(Matrix4::from_angle_z(angle));
    }

    pub fn scale(&mut self, s: Vector3<f32>) {
        self.mult(Matrix4::from_nonuniform_scale(s.x, s.y, s.z));
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::vec3;

    #[test]
    fn push_pop_restores_previous() {
        let mut stack = MatrixStack::new();
        stack.load(Matrix4::from_scale(2.0));
        let before = stack.current();

        stack.push();
        stack.translate(vec3(1.0, 2.0, 3.0));
        assert_ne!(stack.current(), before);
        stack.pop();

        assert_abs_diff_eq!(stack.current(), before);
    }

    #[test]
    fn depth_unchanged_across_scoped_draw() {
        let mut stack = MatrixStack::new();
        stack.push();
        let depth_before = stack.depth();

        stack.with_saved(|s| {
            s.translate(vec3(1.0, 0.5, 1.0));
            s.rotate_x(Deg(15.0));
            s.rotate_y(Deg(30.0));
            s.rotate_z(Deg(45.0));
            s.scale(vec3(1.0, 1.0, 1.0));
        });

        assert_eq!(stack.depth(), depth_before);
    }

    #[test]
    #[should_panic(expected = "matrix stack underflow")]
    fn pop_on_empty_panics() {
        let mut stack = MatrixStack::new();
        stack.pop();
    }

    #[test]
    fn mult_order_is_left_to_right() {
        let mut stack = MatrixStack::new();
        stack.translate(vec3(1.0, 0.0, 0.0));
        stack.scale(vec3(2.0, 2.0, 2.0));

        let expected =
            Matrix4::from_translation(vec3(1.0, 0.0, 0.0)) * Matrix4::from_scale(2.0);
        assert_abs_diff_eq!(stack.current(), expected);
    }
}
