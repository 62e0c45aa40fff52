//! Color types and conversions.
//!
//! [`Srgb`] is the storage color (hex round-trip, serde as `"#rrggbb"`),
//! [`Rgba`] adds straight (non-premultiplied) alpha for drawing. HSL input
//! covers hue-range node tinting; OKLab is used for perceptual palette
//! interpolation.

use crate::error::SceneError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// sRGB color with straight alpha, all components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Srgb {
    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    ///
    /// Returns `SceneError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Srgb, SceneError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SceneError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| SceneError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Formats as `"#rrggbb"`, quantized to 8 bits with rounding.
    pub fn to_hex(self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(to_byte);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Builds a color from HSL: hue in degrees (any value, wrapped),
    /// saturation and lightness in [0, 1].
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Srgb {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Srgb {
            r: r + m,
            g: g + m,
            b: b + m,
        }
    }

    /// Hue in degrees `[0, 360)`, saturation and lightness in [0, 1].
    /// Grays report hue 0.
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d <= 0.0 {
            return (0.0, 0.0, l);
        }
        let s = d / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == self.r {
            ((self.g - self.b) / d).rem_euclid(6.0)
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };
        (h * 60.0, s, l)
    }

    /// Same hue and saturation with lightness shifted by `amount`.
    pub fn lighten(self, amount: f64) -> Srgb {
        let (h, s, l) = self.to_hsl();
        Srgb::from_hsl(h, s, l + amount)
    }

    /// Attaches an alpha, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// The color without its alpha.
    pub fn rgb(self) -> Srgb {
        Srgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Multiplies alpha by `factor`, clamped to [0, 1].
    pub fn fade(self, factor: f64) -> Rgba {
        Rgba {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise linear interpolation in straight RGBA.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + t * (other.r - self.r),
            g: self.g + t * (other.g - self.g),
            b: self.b + t * (other.b - self.b),
            a: self.a + t * (other.a - self.a),
        }
    }

    /// Quantizes to `[r, g, b, a]` bytes.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(to_byte)
    }
}

fn to_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to OKLab (through linear RGB).
pub fn srgb_to_oklab(c: Srgb) -> OkLab {
    let r = srgb_component_to_linear(c.r);
    let g = srgb_component_to_linear(c.g);
    let b = srgb_component_to_linear(c.b);

    let l_ = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
    let m_ = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
    let s_ = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();

    OkLab {
        l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    }
}

/// Converts OKLab back to sRGB, clamped to [0, 1].
pub fn oklab_to_srgb(c: OkLab) -> Srgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let (l, m, s) = (l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_);

    let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s;
    let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s;
    let b = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s;

    Srgb {
        r: linear_component_to_srgb(r).clamp(0.0, 1.0),
        g: linear_component_to_srgb(g).clamp(0.0, 1.0),
        b: linear_component_to_srgb(b).clamp(0.0, 1.0),
    }
}

/// Interpolates two sRGB colors through OKLab.
pub fn mix_oklab(from: Srgb, to: Srgb, t: f64) -> Srgb {
    let t = t.clamp(0.0, 1.0);
    let a = srgb_to_oklab(from);
    let b = srgb_to_oklab(to);
    oklab_to_srgb(OkLab {
        l: a.l + t * (b.l - a.l),
        a: a.a + t * (b.a - a.a),
        b: a.b + t * (b.b - a.b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx(a: Srgb, b: Srgb, eps: f64) -> bool {
        (a.r - b.r).abs() < eps && (a.g - b.g).abs() < eps && (a.b - b.b).abs() < eps
    }

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let a = Srgb::from_hex("#22d3ee").unwrap();
        let b = Srgb::from_hex("22D3EE").unwrap();
        assert_eq!(a, b);
        assert!((a.r - 0x22 as f64 / 255.0).abs() < EPSILON);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(Srgb::from_hex("#fff").is_err());
        assert!(Srgb::from_hex("#gggggg").is_err());
        assert!(Srgb::from_hex("").is_err());
    }

    #[test]
    fn hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#a855f7", "#080818"] {
            assert_eq!(Srgb::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn hsl_primaries() {
        assert!(approx(Srgb::from_hsl(0.0, 1.0, 0.5), Srgb { r: 1.0, g: 0.0, b: 0.0 }, EPSILON));
        assert!(approx(Srgb::from_hsl(120.0, 1.0, 0.5), Srgb { r: 0.0, g: 1.0, b: 0.0 }, EPSILON));
        assert!(approx(Srgb::from_hsl(240.0, 1.0, 0.5), Srgb { r: 0.0, g: 0.0, b: 1.0 }, EPSILON));
        assert!(approx(Srgb::from_hsl(360.0, 1.0, 0.5), Srgb { r: 1.0, g: 0.0, b: 0.0 }, EPSILON));
    }

    #[test]
    fn hsl_matches_css_line_color() {
        // hsl(200, 60%, 60%)
        assert_eq!(Srgb::from_hsl(200.0, 0.6, 0.6).to_hex(), "#5cadd6");
    }

    #[test]
    fn hsl_reads_back() {
        let (h, s, l) = Srgb::from_hsl(230.0, 1.0, 0.6).to_hsl();
        assert!((h - 230.0).abs() < 1e-9 && (s - 1.0).abs() < 1e-9 && (l - 0.6).abs() < 1e-9);
        assert_eq!(Srgb::WHITE.to_hsl(), (0.0, 0.0, 1.0));
    }

    #[test]
    fn lighten_raises_hsl_lightness() {
        let glow = Srgb::from_hsl(215.0, 1.0, 0.6);
        assert!(approx(glow.lighten(0.1), Srgb::from_hsl(215.0, 1.0, 0.7), 1e-9));
        assert!(approx(glow.lighten(2.0), Srgb::WHITE, 1e-9));
    }

    #[test]
    fn hsl_zero_saturation_is_gray() {
        let c = Srgb::from_hsl(217.0, 0.0, 0.25);
        assert!(approx(c, Srgb { r: 0.25, g: 0.25, b: 0.25 }, EPSILON));
    }

    #[test]
    fn oklab_round_trip() {
        let c = Srgb::from_hex("#3b82f6").unwrap();
        assert!(approx(oklab_to_srgb(srgb_to_oklab(c)), c, 1e-5));
    }

    #[test]
    fn mix_endpoints_are_inputs() {
        let a = Srgb::from_hex("#06b6d4").unwrap();
        let b = Srgb::from_hex("#ec4899").unwrap();
        assert!(approx(mix_oklab(a, b, 0.0), a, 1e-5));
        assert!(approx(mix_oklab(a, b, 1.0), b, 1e-5));
    }

    #[test]
    fn rgba_fade_and_lerp() {
        let c = Srgb::WHITE.with_alpha(0.8);
        assert!((c.fade(0.5).a - 0.4).abs() < EPSILON);
        assert_eq!(c.fade(3.0).a, 1.0);
        let mid = Rgba::TRANSPARENT.lerp(c, 0.5);
        assert!((mid.a - 0.4).abs() < EPSILON);
        assert!((mid.r - 0.5).abs() < EPSILON);
    }

    #[test]
    fn rgba_to_bytes_rounds_and_clamps() {
        let c = Rgba { r: 1.2, g: 0.5, b: -0.1, a: 1.0 };
        assert_eq!(c.to_bytes(), [255, 128, 0, 255]);
    }

    #[test]
    fn srgb_serializes_as_hex() {
        let c = Srgb::from_hex("#ec4899").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#ec4899\"");
        let back: Srgb = serde_json::from_str("\"#ec4899\"").unwrap();
        assert_eq!(back, c);
    }
}
