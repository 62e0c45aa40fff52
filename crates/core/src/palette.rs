//! Named color palettes for node tints, glows, and connection gradients.
//!
//! A palette is an ordered list of sRGB stops. It can be indexed cyclically
//! (every third node gets the third color) or sampled continuously, in which
//! case neighbouring stops are blended through OKLab.

use crate::color::{mix_oklab, Srgb};
use crate::error::SceneError;

/// Names accepted by [`Palette::from_name`].
const PALETTE_NAMES: &[&str] = &["synapse", "aurora", "ice", "ember", "mono"];

/// An ordered, non-empty list of color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette. Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, SceneError> {
        if colors.is_empty() {
            return Err(SceneError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette from hex strings (`"#rrggbb"` or `"rrggbb"`).
    pub fn from_hex(hexes: &[&str]) -> Result<Self, SceneError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, SceneError> {
        match name {
            "synapse" => Self::from_hex(&["#22d3ee", "#3b82f6", "#a855f7"]),
            "aurora" => Self::from_hex(&["#06b6d4", "#a855f7", "#ec4899"]),
            "ice" => Self::from_hex(&["#e0f2fe", "#60a5fa", "#1d4ed8"]),
            "ember" => Self::from_hex(&["#fde047", "#f97316", "#b91c1c"]),
            "mono" => Self::from_hex(&["#ffffff", "#94a3b8"]),
            _ => Err(SceneError::UnknownPalette(name.to_string())),
        }
    }

    /// Names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All stops in order.
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// The stop at `index`, wrapping around.
    pub fn cycle(&self, index: usize) -> Srgb {
        self.colors[index % self.colors.len()]
    }

    /// Samples at `t` in [0, 1] (clamped; NaN reads as 0).
    ///
    /// `sample(0.0)` is the first stop, `sample(1.0)` the last, with stops
    /// evenly spaced in between.
    pub fn sample(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.colors.len();
        if n == 1 {
            return self.colors[0];
        }
        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        mix_oklab(self.colors[idx], self.colors[idx + 1], scaled - idx as f64)
    }
}
