//! CPU rasterizer: the pixel buffer scenes are drawn into.
//!
//! Pixels are straight-alpha [`Rgba`] in `f64`. Discs and lines are
//! anti-aliased by a one-pixel coverage ramp at their edge, which is enough
//! for the soft look of glows and hairline connections.

use glam::DVec2;

use crate::color::Rgba;
use crate::draw::{BlendMode, DrawTarget, Gradient};
use crate::error::SceneError;

/// An RGBA pixel buffer implementing [`DrawTarget`].
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
    blend: BlendMode,
}

impl Surface {
    /// Creates a transparent surface.
    ///
    /// Returns `SceneError::InvalidDimensions` if either side is zero or
    /// `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, SceneError> {
        let len = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; len],
            blend: BlendMode::Normal,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Reallocates to a new size. Like a canvas, the contents are cleared.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), SceneError> {
        let len = checked_area(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, Rgba::TRANSPARENT);
        Ok(())
    }

    /// Straight-alpha RGBA8 bytes, row-major, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    fn composite(&mut self, idx: usize, src: Rgba, coverage: f64) {
        let sa = (src.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = self.pixels[idx];
        self.pixels[idx] = match self.blend {
            BlendMode::Normal => {
                let keep = dst.a * (1.0 - sa);
                let out_a = sa + keep;
                Rgba {
                    r: (src.r * sa + dst.r * keep) / out_a,
                    g: (src.g * sa + dst.g * keep) / out_a,
                    b: (src.b * sa + dst.b * keep) / out_a,
                    a: out_a,
                }
            }
            BlendMode::Additive => {
                let out_a = (sa + dst.a).min(1.0);
                let channel = |s: f64, d: f64| ((s * sa + d * dst.a).min(1.0) / out_a).min(1.0);
                Rgba {
                    r: channel(src.r, dst.r),
                    g: channel(src.g, dst.g),
                    b: channel(src.b, dst.b),
                    a: out_a,
                }
            }
        };
    }

    /// Pixel ranges covering `[min, max]`, clipped to the surface.
    fn clip(&self, min: DVec2, max: DVec2) -> Option<(usize, usize, usize, usize)> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let x0 = min.x.floor().max(0.0) as usize;
        let y0 = min.y.floor().max(0.0) as usize;
        let x1 = (max.x.ceil().max(0.0) as usize).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as usize).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

fn checked_area(width: usize, height: usize) -> Result<usize, SceneError> {
    if width == 0 || height == 0 {
        return Err(SceneError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(SceneError::InvalidDimensions)
}

impl DrawTarget for Surface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn fill(&mut self, color: Rgba) {
        for idx in 0..self.pixels.len() {
            self.composite(idx, color, 1.0);
        }
    }

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, paint: &Gradient) {
        if width <= 0.0 || paint.max_alpha() <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let pad = DVec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(from.min(to) - pad, from.max(to) + pad) else {
            return;
        };
        let dir = to - from;
        let len_sq = dir.length_squared();
        // Sub-pixel widths fade instead of thinning.
        let thin = width.min(1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let t = if len_sq > 0.0 {
                    ((p - from).dot(dir) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(from + dir * t);
                let coverage = (half.max(0.5) + 0.5 - d).clamp(0.0, 1.0) * thin;
                if coverage > 0.0 {
                    self.composite(y * self.width + x, paint.sample(t), coverage);
                }
            }
        }
    }

    fn disc(&mut self, center: DVec2, radius: f64, paint: &Gradient) {
        if radius <= 0.0 || paint.max_alpha() <= 0.0 {
            return;
        }
        let pad = DVec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(center - pad, center + pad) else {
            return;
        };
        let tiny = (radius * 2.0).min(1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let d = p.distance(center);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0) * tiny;
                if coverage > 0.0 {
                    let t = (d / radius).min(1.0);
                    self.composite(y * self.width + x, paint.sample(t), coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;

    fn red(a: f64) -> Rgba {
        Rgba {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a,
        }
    }

    #[test]
    fn new_rejects_zero_and_overflow() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SceneError::InvalidDimensions)
        ));
        assert!(Surface::new(10, 0).is_err());
        assert!(Surface::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(4, 3).unwrap();
        assert_eq!(s.pixels().len(), 12);
        assert!(s.pixels().iter().all(|p| p.a == 0.0));
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn resize_clears_and_reallocates() {
        let mut s = Surface::new(4, 4).unwrap();
        s.clear(red(1.0));
        s.resize(8, 2).unwrap();
        assert_eq!((s.width(), s.height()), (8, 2));
        assert_eq!(s.pixels().len(), 16);
        assert!(s.pixels().iter().all(|p| p.a == 0.0));
        assert!(s.resize(0, 2).is_err());
        assert_eq!((s.width(), s.height()), (8, 2));
    }

    #[test]
    fn fill_composites_source_over() {
        let mut s = Surface::new(2, 2).unwrap();
        s.clear(Srgb::WHITE.with_alpha(1.0));
        s.fill(Srgb::BLACK.with_alpha(0.5));
        let p = s.pixel(0, 0).unwrap();
        assert!((p.a - 1.0).abs() < 1e-9);
        assert!((p.r - 0.5).abs() < 1e-9);
    }

    #[test]
    fn repeated_trail_fill_converges_to_fill_color() {
        let mut s = Surface::new(1, 1).unwrap();
        s.clear(Srgb::WHITE.with_alpha(1.0));
        let dark = Srgb::from_hex("#080818").unwrap().with_alpha(0.1);
        for _ in 0..200 {
            s.fill(dark);
        }
        let p = s.pixel(0, 0).unwrap().rgb();
        assert_eq!(p.to_hex(), "#080818");
    }

    #[test]
    fn additive_blend_saturates() {
        let mut s = Surface::new(1, 1).unwrap();
        s.set_blend(BlendMode::Additive);
        s.fill(red(0.8));
        s.fill(red(0.8));
        let p = s.pixel(0, 0).unwrap();
        assert_eq!(p.a, 1.0);
        assert_eq!(p.r, 1.0);
        assert_eq!(p.g, 0.0);
    }

    #[test]
    fn disc_covers_center_not_far_pixels() {
        let mut s = Surface::new(20, 20).unwrap();
        s.disc(DVec2::new(10.0, 10.0), 3.0, &Gradient::solid(red(1.0)));
        assert!((s.pixel(10, 10).unwrap().a - 1.0).abs() < 1e-9);
        assert_eq!(s.pixel(0, 0).unwrap().a, 0.0);
        assert_eq!(s.pixel(10, 16).unwrap().a, 0.0);
    }

    #[test]
    fn radial_paint_fades_toward_rim() {
        let mut s = Surface::new(40, 40).unwrap();
        let glow = Gradient::linear(red(1.0), red(0.0));
        s.disc(DVec2::new(20.0, 20.0), 12.0, &glow);
        let center = s.pixel(20, 20).unwrap().a;
        let mid = s.pixel(26, 20).unwrap().a;
        let edge = s.pixel(31, 20).unwrap().a;
        assert!(center > mid && mid > edge, "{center} {mid} {edge}");
    }

    #[test]
    fn line_touches_pixels_along_segment_only() {
        let mut s = Surface::new(20, 20).unwrap();
        s.line(
            DVec2::new(2.0, 10.5),
            DVec2::new(18.0, 10.5),
            1.0,
            &Gradient::solid(red(1.0)),
        );
        assert!(s.pixel(10, 10).unwrap().a > 0.9);
        assert_eq!(s.pixel(10, 5).unwrap().a, 0.0);
        assert_eq!(s.pixel(0, 10).unwrap().a, 0.0);
    }

    #[test]
    fn line_paint_follows_direction() {
        let mut s = Surface::new(30, 5).unwrap();
        let paint = Gradient::linear(red(1.0), Srgb::from_hex("#0000ff").unwrap().with_alpha(1.0));
        s.line(DVec2::new(0.0, 2.5), DVec2::new(30.0, 2.5), 2.0, &paint);
        let start = s.pixel(1, 2).unwrap();
        let end = s.pixel(28, 2).unwrap();
        assert!(start.r > start.b);
        assert!(end.b > end.r);
    }

    #[test]
    fn invisible_or_degenerate_primitives_draw_nothing() {
        let mut s = Surface::new(10, 10).unwrap();
        s.line(DVec2::ZERO, DVec2::splat(9.0), 0.0, &Gradient::solid(red(1.0)));
        s.line(DVec2::ZERO, DVec2::splat(9.0), 2.0, &Gradient::solid(red(0.0)));
        s.disc(DVec2::splat(5.0), -1.0, &Gradient::solid(red(1.0)));
        s.disc(DVec2::splat(f64::NAN), 3.0, &Gradient::solid(red(1.0)));
        s.disc(DVec2::splat(500.0), 3.0, &Gradient::solid(red(1.0)));
        assert!(s.pixels().iter().all(|p| p.a == 0.0));
    }

    #[test]
    fn to_rgba8_has_four_bytes_per_pixel() {
        let mut s = Surface::new(3, 2).unwrap();
        s.clear(red(1.0));
        let bytes = s.to_rgba8();
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[0..4], &[255, 0, 0, 255]);
    }
}
