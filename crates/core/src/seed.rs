//! Reproducible description of a rendered background.
//!
//! A [`Seed`] captures the scene name, surface size, parameter overrides,
//! PRNG seed and frame count. Replaying a seed through the same binary
//! produces the same pixels.

use crate::error::SceneError;
use serde::{Deserialize, Serialize};

/// Everything needed to reproduce a render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub scene: String,
    pub width: usize,
    pub height: usize,
    #[serde(default = "empty_object")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Seed {
    /// Creates a seed with empty params and zero frames.
    pub fn new(scene: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            scene: scene.to_string(),
            width,
            height,
            params: empty_object(),
            seed,
            frames: 0,
        }
    }

    /// Checks for non-zero dimensions whose product fits in `usize`.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(SceneError::InvalidDimensions)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_empty_params_and_no_frames() {
        let s = Seed::new("contact", 1280, 720, 42);
        assert_eq!(s.scene, "contact");
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_params() {
        let mut s = Seed::new("feedbacks", 800, 600, 7);
        s.params = serde_json::json!({"threshold": 120, "edges": "clamp"});
        s.frames = 240;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_params_and_frames_take_defaults() {
        let s: Seed =
            serde_json::from_str(r#"{"scene":"neural","width":64,"height":32,"seed":1}"#).unwrap();
        assert_eq!(s.params, serde_json::json!({}));
        assert_eq!(s.frames, 0);
    }

    #[test]
    fn validate_rejects_zero_and_overflow() {
        assert!(Seed::new("neural", 64, 64, 1).validate().is_ok());
        assert!(Seed::new("neural", 0, 64, 1).validate().is_err());
        assert!(Seed::new("neural", 64, 0, 1).validate().is_err());
        assert!(Seed::new("neural", usize::MAX, 2, 1).validate().is_err());
    }
}
