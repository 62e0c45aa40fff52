//! PNG output of a [`Surface`].
//!
//! Feature-gated behind `png` (default on) so browser builds can depend on
//! this crate without pulling in `image`.

use backdrop_core::{SceneError, Srgb, Surface};
use std::path::Path;

use crate::pixel::surface_to_rgba;

/// Writes a surface as a PNG, optionally flattened onto `backdrop`.
///
/// Returns `SceneError::InvalidDimensions` if the size overflows `u32`, or
/// `SceneError::Io` on write failure.
pub fn write_png(surface: &Surface, backdrop: Option<Srgb>, path: &Path) -> Result<(), SceneError> {
    let rgba = surface_to_rgba(surface, backdrop);
    let w = u32::try_from(surface.width()).map_err(|_| SceneError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| SceneError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| SceneError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SceneError::Io(e.to_string()))
}
