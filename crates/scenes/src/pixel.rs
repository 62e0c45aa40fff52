//! RGBA8 conversion of a [`Surface`].
//!
//! Always available (no feature gate) so the PNG snapshot path and the
//! browser `ImageData` path share one conversion.

use backdrop_core::{Srgb, Surface};

/// Converts a surface to RGBA8 bytes, `width * height * 4` long.
///
/// Without a backdrop the straight alpha is kept, so a page background
/// shows through. With one, every pixel is flattened onto it and comes out
/// opaque.
pub fn surface_to_rgba(surface: &Surface, backdrop: Option<Srgb>) -> Vec<u8> {
    let Some(bg) = backdrop else {
        return surface.to_rgba8();
    };
    surface
        .pixels()
        .iter()
        .flat_map(|p| {
            let mix = |c: f64, b: f64| ((c * p.a + b * (1.0 - p.a)) * 255.0).round().clamp(0.0, 255.0) as u8;
            [mix(p.r, bg.r), mix(p.g, bg.g), mix(p.b, bg.b), 255u8]
        })
        .collect()
}
