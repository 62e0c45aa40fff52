//! The `Scene` trait every animated background implements.
//!
//! The trait is object-safe so hosts can drive `Box<dyn Scene>` without
//! knowing which background they run.

use crate::draw::DrawTarget;
use serde_json::Value;

/// A fixed-step animation that draws itself onto a [`DrawTarget`].
///
/// One [`advance`](Scene::advance) is one display frame, not a slice of
/// wall-clock time. Hosts call `advance` and then `draw` once per tick, in
/// that order; [`Scene::frame`] does both.
pub trait Scene {
    /// Moves the simulation forward by one frame.
    fn advance(&mut self);

    /// Renders the current state.
    fn draw(&self, target: &mut dyn DrawTarget);

    /// Updates the bounds the simulation lives in. Existing state is kept.
    fn resize(&mut self, width: usize, height: usize);

    /// Current `(width, height)` bounds.
    fn size(&self) -> (usize, usize);

    /// Effective parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Type, default, range and description of every parameter.
    fn param_schema(&self) -> Value;

    /// One tick: advance, then draw.
    fn frame(&mut self, target: &mut dyn DrawTarget) {
        self.advance();
        self.draw(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use crate::draw::{Gradient, Recorder};
    use glam::DVec2;
    use serde_json::json;

    /// A single dot moving right one pixel per frame.
    struct Dot {
        x: f64,
        width: usize,
        height: usize,
    }

    impl Scene for Dot {
        fn advance(&mut self) {
            self.x += 1.0;
        }

        fn draw(&self, target: &mut dyn DrawTarget) {
            target.disc(
                DVec2::new(self.x, 0.0),
                1.0,
                &Gradient::solid(Srgb::WHITE.with_alpha(1.0)),
            );
        }

        fn resize(&mut self, width: usize, height: usize) {
            self.width = width;
            self.height = height;
        }

        fn size(&self) -> (usize, usize) {
            (self.width, self.height)
        }

        fn params(&self) -> Value {
            json!({"x": self.x})
        }

        fn param_schema(&self) -> Value {
            json!({"x": {"type": "number", "default": 0.0}})
        }
    }

    fn dot() -> Dot {
        Dot {
            x: 0.0,
            width: 8,
            height: 8,
        }
    }

    #[test]
    fn scene_is_object_safe() {
        let scene: Box<dyn Scene> = Box::new(dot());
        assert_eq!(scene.size(), (8, 8));
    }

    #[test]
    fn frame_advances_before_drawing() {
        let mut scene = dot();
        let mut rec = Recorder::new(8, 8);
        scene.frame(&mut rec);
        match &rec.commands()[0] {
            crate::draw::DrawCommand::Disc { center, .. } => assert_eq!(center.x, 1.0),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn resize_through_dyn_reference() {
        let mut scene = dot();
        let r: &mut dyn Scene = &mut scene;
        r.resize(32, 16);
        assert_eq!(r.size(), (32, 16));
        assert_eq!(r.params()["x"], 0.0);
        assert_eq!(r.param_schema()["x"]["type"], "number");
    }
}
