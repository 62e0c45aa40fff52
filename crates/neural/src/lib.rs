#![deny(unsafe_code)]
//! Neural-network particle background.
//!
//! A field of small glowing nodes drifts at constant per-node velocity,
//! reflecting off the surface walls. Every pair of nodes closer than a
//! threshold is joined by a line whose opacity fades linearly with distance,
//! producing the "neural network" look behind a page.
//!
//! The simulation is fixed-step: one [`Scene::advance`] is one display frame.

pub mod connections;
pub mod field;
pub mod node;
pub mod params;

use backdrop_core::{BlendMode, DrawTarget, Scene, SceneError, Xorshift64};
use serde_json::Value;

pub use connections::{Connection, ConnectionRenderer};
pub use field::ParticleField;
pub use node::{EdgeMode, Node};
pub use params::{NeuralParams, NodeCount};

/// The animated neural background.
pub struct NeuralScene {
    field: ParticleField,
    renderer: ConnectionRenderer,
    params: NeuralParams,
    width: usize,
    height: usize,
}

impl NeuralScene {
    /// Seeds a field for a `width` x `height` surface.
    ///
    /// The node count is resolved once, from the size given here; later
    /// resizes keep the same nodes. Returns
    /// [`SceneError::InvalidDimensions`] if either side is zero.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: NeuralParams,
    ) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidDimensions);
        }
        let count = params.count.resolve(width, height);
        let mut rng = Xorshift64::new(seed);
        let field = ParticleField::initialize(
            width as f64,
            height as f64,
            count,
            &params.spawn,
            &params.palette,
            &mut rng,
        )
        .with_edges(params.edges);
        let renderer = ConnectionRenderer::new(
            params.links.clone(),
            params.look.clone(),
            params.layering,
            params.palette.clone(),
        );
        log::debug!("neural scene {width}x{height}: {count} nodes, seed {seed}");
        Ok(Self {
            field,
            renderer,
            params,
            width,
            height,
        })
    }

    /// Builds a scene from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, SceneError> {
        Self::new(width, height, seed, NeuralParams::from_json(params))
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn renderer(&self) -> &ConnectionRenderer {
        &self.renderer
    }
}

impl Scene for NeuralScene {
    fn advance(&mut self) {
        self.field.advance();
    }

    /// Fades (or clears) the previous frame, then paints links and nodes.
    fn draw(&self, target: &mut dyn DrawTarget) {
        target.set_blend(BlendMode::Normal);
        let trail = self.params.trail;
        if trail.alpha > 0.0 {
            target.fill(trail.color.with_alpha(trail.alpha));
        } else {
            target.clear(backdrop_core::Rgba::TRANSPARENT);
        }
        self.renderer.draw_frame(self.field.nodes(), target);
    }

    /// Zero sizes are ignored; the last valid bounds stay in effect.
    fn resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {width}x{height}");
            return;
        }
        self.width = width;
        self.height = height;
        self.field.resize(width as f64, height as f64);
    }

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        NeuralParams::schema()
    }
}
