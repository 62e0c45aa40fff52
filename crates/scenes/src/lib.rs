#![deny(unsafe_code)]
//! Scene registry: maps preset names to configured scenes and provides
//! CPU-side snapshot output.
//!
//! This crate sits between `backdrop-core` (which defines the `Scene` trait)
//! and the scene crates (`backdrop-neural`). The host, CLI and browser
//! bindings all construct scenes through [`SceneKind::from_name`].

pub mod pixel;
pub mod presets;

#[cfg(feature = "png")]
pub mod snapshot;

use backdrop_core::params::merge_params;
use backdrop_core::{DrawTarget, Scene, SceneError};
use backdrop_neural::NeuralScene;
use serde_json::Value;

pub use presets::{preset, PRESET_NAMES};

/// Every constructible scene.
///
/// All presets currently share the neural implementation and differ only in
/// constants.
pub enum SceneKind {
    Neural(NeuralScene),
}

impl SceneKind {
    /// Constructs a scene by preset name, with `params` merged over the
    /// preset's own values.
    ///
    /// Returns `SceneError::UnknownScene` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, SceneError> {
        let base = preset(name).ok_or_else(|| SceneError::UnknownScene(name.to_string()))?;
        let merged = merge_params(&base, params);
        log::debug!("building scene '{name}' at {width}x{height}");
        Ok(SceneKind::Neural(NeuralScene::from_json(
            width, height, seed, &merged,
        )?))
    }

    /// Returns a slice of all recognized scene names.
    pub fn list_scenes() -> &'static [&'static str] {
        PRESET_NAMES
    }
}

impl Scene for SceneKind {
    fn advance(&mut self) {
        match self {
            SceneKind::Neural(s) => s.advance(),
        }
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        match self {
            SceneKind::Neural(s) => s.draw(target),
        }
    }

    fn resize(&mut self, width: usize, height: usize) {
        match self {
            SceneKind::Neural(s) => s.resize(width, height),
        }
    }

    fn size(&self) -> (usize, usize) {
        match self {
            SceneKind::Neural(s) => s.size(),
        }
    }

    fn params(&self) -> Value {
        match self {
            SceneKind::Neural(s) => s.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            SceneKind::Neural(s) => s.param_schema(),
        }
    }
}
