//! Error types for backdrop.
//!
//! Only construction and I/O can fail. The per-frame animation path
//! (advance, draw, present) never returns an error: anomalies there degrade
//! to drawing nothing or stopping the cycle.

use thiserror::Error;

/// Errors produced while building scenes, surfaces, palettes, or snapshots.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// No built-in palette has this name.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// No registered scene has this name.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// Writing a snapshot or frame failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_mentions_width_and_height() {
        let msg = SceneError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn unknown_scene_includes_name() {
        let msg = SceneError::UnknownScene("starfield".into()).to_string();
        assert!(msg.contains("starfield"), "missing name in: {msg}");
    }

    #[test]
    fn unknown_palette_includes_name() {
        let msg = SceneError::UnknownPalette("sepia".into()).to_string();
        assert!(msg.contains("sepia"), "missing name in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = SceneError::InvalidColor("bad hex".into()).to_string();
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let msg = SceneError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn scene_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SceneError>();
    }
}
