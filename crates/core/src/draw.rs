//! Drawing vocabulary shared by scenes and surfaces.
//!
//! Scenes never touch pixels directly: they issue a handful of primitives
//! (clear, translucent fill, painted line, painted disc) against a
//! [`DrawTarget`]. [`crate::Surface`] rasterizes them; [`Recorder`] keeps
//! them as a list so tests can count and inspect what a frame drew.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// How drawn pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source-over alpha compositing.
    #[default]
    Normal,
    /// Premultiplied colors add up, saturating at white ("lighter").
    Additive,
}

impl BlendMode {
    /// Parses `"normal"` or `"additive"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "normal" => Some(BlendMode::Normal),
            "additive" => Some(BlendMode::Additive),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Additive => "additive",
        }
    }
}

/// A color ramp over `t` in [0, 1].
///
/// Lines sample it along their length (0 at the start point), discs sample
/// it along the radius (0 at the center).
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<(f64, Rgba)>,
}

impl Gradient {
    /// A single flat color.
    pub fn solid(color: Rgba) -> Self {
        Self {
            stops: vec![(0.0, color)],
        }
    }

    /// A two-stop ramp from `start` at 0 to `end` at 1.
    pub fn linear(start: Rgba, end: Rgba) -> Self {
        Self {
            stops: vec![(0.0, start), (1.0, end)],
        }
    }

    /// Builds a ramp from `(offset, color)` stops.
    ///
    /// Offsets are clamped to [0, 1] and sorted. No stops at all yields a
    /// fully transparent ramp.
    pub fn new(stops: Vec<(f64, Rgba)>) -> Self {
        let mut stops: Vec<(f64, Rgba)> = stops
            .into_iter()
            .filter(|(offset, _)| !offset.is_nan())
            .map(|(offset, color)| (offset.clamp(0.0, 1.0), color))
            .collect();
        if stops.is_empty() {
            return Self::solid(Rgba::TRANSPARENT);
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    pub fn stops(&self) -> &[(f64, Rgba)] {
        &self.stops
    }

    /// Color at `t`, interpolated between the surrounding stops.
    pub fn sample(&self, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let first = self.stops[0];
        if t <= first.0 {
            return first.1;
        }
        for pair in self.stops.windows(2) {
            let (o0, c0) = pair[0];
            let (o1, c1) = pair[1];
            if t < o1 {
                let span = o1 - o0;
                let frac = if span > 0.0 { (t - o0) / span } else { 1.0 };
                return c0.lerp(c1, frac);
            }
        }
        self.stops[self.stops.len() - 1].1
    }

    /// Highest alpha of any stop; zero means the paint is invisible.
    pub fn max_alpha(&self) -> f64 {
        self.stops.iter().map(|(_, c)| c.a).fold(0.0, f64::max)
    }
}

/// The drawing surface handle scenes render into.
pub trait DrawTarget {
    /// Current `(width, height)` in pixels.
    fn size(&self) -> (usize, usize);

    /// Sets the blend mode for subsequent primitives.
    fn set_blend(&mut self, mode: BlendMode);

    /// Replaces every pixel with `color`.
    fn clear(&mut self, color: Rgba);

    /// Composites `color` over the whole surface (trail fade).
    fn fill(&mut self, color: Rgba);

    /// Strokes a segment of the given width, painted along its length.
    fn line(&mut self, from: DVec2, to: DVec2, width: f64, paint: &Gradient);

    /// Fills a disc, painted from center to rim.
    fn disc(&mut self, center: DVec2, radius: f64, paint: &Gradient);
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Blend(BlendMode),
    Clear(Rgba),
    Fill(Rgba),
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        paint: Gradient,
    },
    Disc {
        center: DVec2,
        radius: f64,
        paint: Gradient,
    },
}

/// A [`DrawTarget`] that records primitives instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    width: usize,
    height: usize,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Endpoints of every recorded line, in draw order.
    pub fn lines(&self) -> Vec<(DVec2, DVec2)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    pub fn disc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
            .count()
    }
}

impl DrawTarget for Recorder {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::Blend(mode));
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, paint: &Gradient) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            paint: paint.clone(),
        });
    }

    fn disc(&mut self, center: DVec2, radius: f64, paint: &Gradient) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            paint: paint.clone(),
        });
    }
}
