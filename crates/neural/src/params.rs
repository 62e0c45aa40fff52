//! Tunable parameters of the neural background.
//!
//! Every hosting view supplies its own constants (node count rule, speeds,
//! palette, link threshold, look). [`NeuralParams::from_json`] reads them
//! tolerantly: unknown names and mistyped values fall back to defaults with a
//! warning, so a bad configuration degrades the look, never the page.

use backdrop_core::params::{param_bool, param_count, param_f64, param_string};
use backdrop_core::{BlendMode, Palette, Srgb};
use serde_json::{json, Map, Value};

use crate::node::EdgeMode;

pub const DEFAULT_COUNT: usize = 80;
pub const DEFAULT_MAX_COUNT: usize = 80;
/// Hard ceiling on any node count. Linking is quadratic in the count.
pub const MAX_NODES: usize = 500;
pub const DEFAULT_SPEED: f64 = 0.5;
pub const DEFAULT_RADIUS_MIN: f64 = 1.0;
pub const DEFAULT_RADIUS_MAX: f64 = 3.0;
pub const DEFAULT_THRESHOLD: f64 = 150.0;
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_LINE_ALPHA: f64 = 0.3;
pub const DEFAULT_LINE_COLOR: &str = "#5cadd6";
pub const DEFAULT_HUE_MIN: f64 = 200.0;
pub const DEFAULT_HUE_MAX: f64 = 260.0;
pub const DEFAULT_SATURATION: f64 = 1.0;
pub const DEFAULT_LIGHTNESS: f64 = 0.6;
pub const DEFAULT_PALETTE: &str = "synapse";
pub const DEFAULT_GLOW_SCALE: f64 = 3.0;
pub const DEFAULT_GLOW_ALPHA: f64 = 0.3;
pub const DEFAULT_CORE_ALPHA: f64 = 1.0;
pub const DEFAULT_PULSE_BASE: f64 = 0.6;
pub const DEFAULT_PULSE_AMPLITUDE: f64 = 0.3;
pub const DEFAULT_PULSE_SPEED_MIN: f64 = 0.02;
pub const DEFAULT_PULSE_SPEED_MAX: f64 = 0.07;
pub const DEFAULT_LINK_HALO_WIDTH: f64 = 10.0;
pub const DEFAULT_TRAIL_ALPHA: f64 = 0.1;
pub const DEFAULT_TRAIL_COLOR: &str = "#080818";

/// How many nodes a field is seeded with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeCount {
    /// Exactly this many.
    Fixed(usize),
    /// `min(floor(width * height / area), cap)`.
    PerArea { area: f64, cap: usize },
    /// `min(floor(width / span), cap)`.
    PerWidth { span: f64, cap: usize },
}

impl NodeCount {
    /// Node count for a `width` x `height` surface, never above [`MAX_NODES`].
    pub fn resolve(&self, width: usize, height: usize) -> usize {
        let n = match *self {
            NodeCount::Fixed(n) => n,
            NodeCount::PerArea { area, cap } => {
                (((width as f64) * (height as f64) / area).floor() as usize).min(cap)
            }
            NodeCount::PerWidth { span, cap } => ((width as f64 / span).floor() as usize).min(cap),
        };
        n.min(MAX_NODES)
    }
}

/// Where each node's tint comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coloring {
    /// Random hue in `[min, max)` degrees at fixed saturation and lightness.
    Hue {
        min: f64,
        max: f64,
        saturation: f64,
        lightness: f64,
    },
    /// Node `i` takes palette stop `i % len`.
    Cycle,
    /// Random continuous sample of the palette.
    Palette,
}

impl Coloring {
    pub fn name(&self) -> &'static str {
        match self {
            Coloring::Hue { .. } => "hue",
            Coloring::Cycle => "cycle",
            Coloring::Palette => "palette",
        }
    }
}

/// How connection lines are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid(Srgb),
    /// The palette spread along the line.
    Palette,
    /// From the first node's tint to the second's.
    Endpoints,
}

impl LineStyle {
    pub fn name(&self) -> &'static str {
        match self {
            LineStyle::Solid(_) => "solid",
            LineStyle::Palette => "palette",
            LineStyle::Endpoints => "endpoints",
        }
    }
}

/// Color ramp of the soft halo under each node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GlowStyle {
    /// Node tint fading out.
    #[default]
    Tint,
    /// Palette stops from center to rim, fading out.
    Palette,
}

/// Color of the solid core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoreColor {
    #[default]
    Tint,
    White,
}

/// Whether links are drawn under or over the nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layering {
    #[default]
    LinksBelow,
    LinksAbove,
}

/// Per-node random draws made at seeding time.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawn {
    /// Per-axis velocity half-range.
    pub speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub coloring: Coloring,
    pub pulse_speed_min: f64,
    pub pulse_speed_max: f64,
    /// Start each node at a random pulse phase instead of 0.
    pub random_phase: bool,
}

/// Connection threshold and line look.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStyle {
    pub threshold: f64,
    pub width: f64,
    /// Line opacity at distance 0.
    pub alpha: f64,
    pub style: LineStyle,
    /// Links shorter than `halo_ratio * threshold` get a wide soft stroke
    /// under them in the first node's tint. 0 disables.
    pub halo_ratio: f64,
    /// Extra width of that stroke over `width`.
    pub halo_width: f64,
}

/// Glow and core look of each node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLook {
    pub glow_scale: f64,
    pub glow_alpha: f64,
    pub glow_style: GlowStyle,
    pub glow_blend: BlendMode,
    pub core_color: CoreColor,
    /// HSL lightness added to the tint for `CoreColor::Tint` cores.
    pub core_lighten: f64,
    pub core_alpha: f64,
    pub pulse_base: f64,
    pub pulse_amplitude: f64,
}

/// Per-frame fade that leaves motion trails. Alpha 0 clears instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail {
    pub alpha: f64,
    pub color: Srgb,
}

/// Full configuration of a neural background.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralParams {
    pub count: NodeCount,
    pub palette_name: String,
    pub palette: Palette,
    pub spawn: Spawn,
    pub links: LinkStyle,
    pub look: NodeLook,
    pub edges: EdgeMode,
    pub layering: Layering,
    pub trail: Trail,
}

impl Default for NeuralParams {
    fn default() -> Self {
        Self::from_json(&Value::Object(Map::new()))
    }
}

impl NeuralParams {
    /// Reads parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let max_count = bounded_count(params, "max_count", DEFAULT_MAX_COUNT);
        let per_area = param_f64(params, "count_per_area", 0.0);
        let per_width = param_f64(params, "count_per_width", 0.0);
        let count = if per_area > 0.0 {
            NodeCount::PerArea {
                area: per_area,
                cap: max_count,
            }
        } else if per_width > 0.0 {
            NodeCount::PerWidth {
                span: per_width,
                cap: max_count,
            }
        } else {
            NodeCount::Fixed(bounded_count(params, "count", DEFAULT_COUNT))
        };

        let palette_name = param_string(params, "palette", DEFAULT_PALETTE);
        let (palette_name, palette) = match Palette::from_name(&palette_name) {
            Ok(p) => (palette_name, p),
            Err(e) => {
                log::warn!("{e}; using '{DEFAULT_PALETTE}'");
                (DEFAULT_PALETTE.to_string(), builtin(DEFAULT_PALETTE))
            }
        };

        let coloring = match param_string(params, "coloring", "hue").as_str() {
            "cycle" => Coloring::Cycle,
            "palette" => Coloring::Palette,
            other => {
                if other != "hue" {
                    log::warn!("unknown coloring '{other}'; using 'hue'");
                }
                let (min, max) = ordered(
                    param_f64(params, "hue_min", DEFAULT_HUE_MIN),
                    param_f64(params, "hue_max", DEFAULT_HUE_MAX),
                );
                Coloring::Hue {
                    min,
                    max,
                    saturation: unit(param_f64(params, "saturation", DEFAULT_SATURATION)),
                    lightness: unit(param_f64(params, "lightness", DEFAULT_LIGHTNESS)),
                }
            }
        };

        let (radius_min, radius_max) = ordered(
            param_f64(params, "radius_min", DEFAULT_RADIUS_MIN).max(0.0),
            param_f64(params, "radius_max", DEFAULT_RADIUS_MAX).max(0.0),
        );
        let (pulse_speed_min, pulse_speed_max) = ordered(
            param_f64(params, "pulse_speed_min", DEFAULT_PULSE_SPEED_MIN),
            param_f64(params, "pulse_speed_max", DEFAULT_PULSE_SPEED_MAX),
        );
        let spawn = Spawn {
            speed: param_f64(params, "speed", DEFAULT_SPEED).abs(),
            radius_min,
            radius_max,
            coloring,
            pulse_speed_min,
            pulse_speed_max,
            random_phase: param_bool(params, "random_phase", false),
        };

        let style = match param_string(params, "line_style", "solid").as_str() {
            "palette" => LineStyle::Palette,
            "endpoints" => LineStyle::Endpoints,
            other => {
                if other != "solid" {
                    log::warn!("unknown line_style '{other}'; using 'solid'");
                }
                LineStyle::Solid(color_param(params, "line_color", DEFAULT_LINE_COLOR))
            }
        };
        let links = LinkStyle {
            threshold: param_f64(params, "threshold", DEFAULT_THRESHOLD).max(0.0),
            width: param_f64(params, "line_width", DEFAULT_LINE_WIDTH).max(0.0),
            alpha: unit(param_f64(params, "line_alpha", DEFAULT_LINE_ALPHA)),
            style,
            halo_ratio: unit(param_f64(params, "link_halo_ratio", 0.0)),
            halo_width: param_f64(params, "link_halo_width", DEFAULT_LINK_HALO_WIDTH).max(0.0),
        };

        let look = NodeLook {
            glow_scale: param_f64(params, "glow_scale", DEFAULT_GLOW_SCALE).max(0.0),
            glow_alpha: unit(param_f64(params, "glow_alpha", DEFAULT_GLOW_ALPHA)),
            glow_style: match param_string(params, "glow_style", "tint").as_str() {
                "palette" => GlowStyle::Palette,
                _ => GlowStyle::Tint,
            },
            glow_blend: BlendMode::from_name(&param_string(params, "glow_blend", "normal"))
                .unwrap_or_default(),
            core_color: match param_string(params, "core_color", "tint").as_str() {
                "white" => CoreColor::White,
                _ => CoreColor::Tint,
            },
            core_lighten: param_f64(params, "core_lighten", 0.0).clamp(-1.0, 1.0),
            core_alpha: unit(param_f64(params, "core_alpha", DEFAULT_CORE_ALPHA)),
            pulse_base: param_f64(params, "pulse_base", DEFAULT_PULSE_BASE),
            pulse_amplitude: param_f64(params, "pulse_amplitude", DEFAULT_PULSE_AMPLITUDE),
        };

        let edges = EdgeMode::from_name(&param_string(params, "edges", "reflect")).unwrap_or_default();
        let layering = match param_string(params, "layering", "links_below").as_str() {
            "links_above" => Layering::LinksAbove,
            _ => Layering::LinksBelow,
        };
        let trail = Trail {
            alpha: unit(param_f64(params, "trail_alpha", DEFAULT_TRAIL_ALPHA)),
            color: color_param(params, "trail_color", DEFAULT_TRAIL_COLOR),
        };

        Self {
            count,
            palette_name,
            palette,
            spawn,
            links,
            look,
            edges,
            layering,
            trail,
        }
    }

    /// Effective values, in the same shape `from_json` reads.
    pub fn to_json(&self) -> Value {
        let (count, per_area, per_width, max_count) = match self.count {
            NodeCount::Fixed(n) => (n, 0.0, 0.0, DEFAULT_MAX_COUNT),
            NodeCount::PerArea { area, cap } => (DEFAULT_COUNT, area, 0.0, cap),
            NodeCount::PerWidth { span, cap } => (DEFAULT_COUNT, 0.0, span, cap),
        };
        let mut out = Map::new();
        let mut put = |k: &str, v: Value| {
            out.insert(k.to_string(), v);
        };
        put("count", json!(count));
        put("count_per_area", json!(per_area));
        put("count_per_width", json!(per_width));
        put("max_count", json!(max_count));
        put("speed", json!(self.spawn.speed));
        put("radius_min", json!(self.spawn.radius_min));
        put("radius_max", json!(self.spawn.radius_max));
        put("coloring", json!(self.spawn.coloring.name()));
        if let Coloring::Hue {
            min,
            max,
            saturation,
            lightness,
        } = self.spawn.coloring
        {
            put("hue_min", json!(min));
            put("hue_max", json!(max));
            put("saturation", json!(saturation));
            put("lightness", json!(lightness));
        }
        put("palette", json!(self.palette_name));
        put("pulse_speed_min", json!(self.spawn.pulse_speed_min));
        put("pulse_speed_max", json!(self.spawn.pulse_speed_max));
        put("random_phase", json!(self.spawn.random_phase));
        put("threshold", json!(self.links.threshold));
        put("line_width", json!(self.links.width));
        put("line_alpha", json!(self.links.alpha));
        put("line_style", json!(self.links.style.name()));
        put("link_halo_ratio", json!(self.links.halo_ratio));
        put("link_halo_width", json!(self.links.halo_width));
        if let LineStyle::Solid(c) = self.links.style {
            put("line_color", json!(c.to_hex()));
        }
        put("glow_scale", json!(self.look.glow_scale));
        put("glow_alpha", json!(self.look.glow_alpha));
        put(
            "glow_style",
            json!(match self.look.glow_style {
                GlowStyle::Tint => "tint",
                GlowStyle::Palette => "palette",
            }),
        );
        put("glow_blend", json!(self.look.glow_blend.name()));
        put(
            "core_color",
            json!(match self.look.core_color {
                CoreColor::Tint => "tint",
                CoreColor::White => "white",
            }),
        );
        put("core_lighten", json!(self.look.core_lighten));
        put("core_alpha", json!(self.look.core_alpha));
        put("pulse_base", json!(self.look.pulse_base));
        put("pulse_amplitude", json!(self.look.pulse_amplitude));
        put("edges", json!(self.edges.name()));
        put(
            "layering",
            json!(match self.layering {
                Layering::LinksBelow => "links_below",
                Layering::LinksAbove => "links_above",
            }),
        );
        put("trail_alpha", json!(self.trail.alpha));
        put("trail_color", json!(self.trail.color.to_hex()));
        Value::Object(out)
    }

    /// Schema of every key `from_json` understands.
    pub fn schema() -> Value {
        let mut s = Map::new();
        let mut num = |k: &str, default: f64, min: f64, max: f64, desc: &str| {
            s.insert(
                k.to_string(),
                json!({"type": "number", "default": default, "min": min, "max": max, "description": desc}),
            );
        };
        num("speed", DEFAULT_SPEED, 0.0, 5.0, "Per-axis velocity half-range (px/frame)");
        num("radius_min", DEFAULT_RADIUS_MIN, 0.0, 20.0, "Smallest node radius");
        num("radius_max", DEFAULT_RADIUS_MAX, 0.0, 20.0, "Largest node radius");
        num("hue_min", DEFAULT_HUE_MIN, 0.0, 360.0, "Lowest hue for 'hue' coloring (degrees)");
        num("hue_max", DEFAULT_HUE_MAX, 0.0, 360.0, "Highest hue for 'hue' coloring (degrees)");
        num("saturation", DEFAULT_SATURATION, 0.0, 1.0, "HSL saturation for 'hue' coloring");
        num("lightness", DEFAULT_LIGHTNESS, 0.0, 1.0, "HSL lightness for 'hue' coloring");
        num("pulse_speed_min", DEFAULT_PULSE_SPEED_MIN, 0.0, 1.0, "Slowest pulse phase step");
        num("pulse_speed_max", DEFAULT_PULSE_SPEED_MAX, 0.0, 1.0, "Fastest pulse phase step");
        num("threshold", DEFAULT_THRESHOLD, 0.0, 1000.0, "Link distance; pairs closer than this are joined");
        num("line_width", DEFAULT_LINE_WIDTH, 0.0, 10.0, "Link line width");
        num("line_alpha", DEFAULT_LINE_ALPHA, 0.0, 1.0, "Link opacity at distance 0, falling linearly to 0 at the threshold");
        num("glow_scale", DEFAULT_GLOW_SCALE, 0.0, 20.0, "Glow radius as a multiple of node radius");
        num("glow_alpha", DEFAULT_GLOW_ALPHA, 0.0, 1.0, "Glow opacity at its center");
        num("link_halo_ratio", 0.0, 0.0, 1.0, "Links shorter than this fraction of the threshold get a soft halo; 0 disables");
        num("link_halo_width", DEFAULT_LINK_HALO_WIDTH, 0.0, 50.0, "Halo width added to the link width");
        num("core_lighten", 0.0, -1.0, 1.0, "HSL lightness added to the tint for tinted cores");
        num("core_alpha", DEFAULT_CORE_ALPHA, 0.0, 1.0, "Core opacity factor");
        num("pulse_base", DEFAULT_PULSE_BASE, 0.0, 1.0, "Mean node opacity");
        num("pulse_amplitude", DEFAULT_PULSE_AMPLITUDE, 0.0, 1.0, "Opacity swing of the pulse");
        num("trail_alpha", DEFAULT_TRAIL_ALPHA, 0.0, 1.0, "Per-frame fade strength; 0 clears every frame");
        num("count_per_area", 0.0, 0.0, 1e6, "If > 0, one node per this many square pixels");
        num("count_per_width", 0.0, 0.0, 1e4, "If > 0, one node per this many pixels of width");

        let mut put = |k: &str, v: Value| {
            s.insert(k.to_string(), v);
        };
        put(
            "count",
            json!({"type": "integer", "default": DEFAULT_COUNT, "min": 0, "max": MAX_NODES, "description": "Fixed node count (negative reads as 0)"}),
        );
        put(
            "max_count",
            json!({"type": "integer", "default": DEFAULT_MAX_COUNT, "min": 0, "max": MAX_NODES, "description": "Cap for area- or width-derived counts"}),
        );
        put(
            "random_phase",
            json!({"type": "boolean", "default": false, "description": "Start pulses at random phases"}),
        );
        put("coloring", choice("hue", &["hue", "cycle", "palette"], "Source of node tints"));
        put("palette", choice(DEFAULT_PALETTE, Palette::list_names(), "Palette for cycle/palette coloring, glows and lines"));
        put("line_style", choice("solid", &["solid", "palette", "endpoints"], "Link paint"));
        put(
            "line_color",
            json!({"type": "color", "default": DEFAULT_LINE_COLOR, "description": "Color of solid links"}),
        );
        put("glow_style", choice("tint", &["tint", "palette"], "Glow color ramp"));
        put("glow_blend", choice("normal", &["normal", "additive"], "Glow compositing"));
        put("core_color", choice("tint", &["tint", "white"], "Core color"));
        put("edges", choice("reflect", &["reflect", "clamp"], "Wall behavior"));
        put("layering", choice("links_below", &["links_below", "links_above"], "Links under or over nodes"));
        put(
            "trail_color",
            json!({"type": "color", "default": DEFAULT_TRAIL_COLOR, "description": "Fade color for trails"}),
        );
        Value::Object(s)
    }
}

fn bounded_count(params: &Value, name: &str, default: usize) -> usize {
    let n = param_count(params, name, default);
    if n > MAX_NODES {
        log::warn!("{name} {n} exceeds {MAX_NODES}; using {MAX_NODES}");
        return MAX_NODES;
    }
    n
}

fn choice(default: &str, options: &[&str], desc: &str) -> Value {
    json!({"type": "string", "default": default, "options": options, "description": desc})
}

fn color_param(params: &Value, name: &str, default: &str) -> Srgb {
    let raw = param_string(params, name, default);
    Srgb::from_hex(&raw).unwrap_or_else(|e| {
        log::warn!("{name}: {e}; using {default}");
        Srgb::from_hex(default).unwrap_or(Srgb::WHITE)
    })
}

fn builtin(name: &str) -> Palette {
    Palette::from_name(name).unwrap_or_else(|_| {
        Palette::new(vec![Srgb::WHITE]).unwrap_or_else(|_| unreachable!("one color is a valid palette"))
    })
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let p = NeuralParams::default();
        assert_eq!(p.count, NodeCount::Fixed(80));
        assert_eq!(p.links.threshold, 150.0);
        assert_eq!(p.spawn.speed, 0.5);
        assert_eq!(p.palette_name, "synapse");
        assert_eq!(p.edges, EdgeMode::Reflect);
        assert_eq!(p.layering, Layering::LinksBelow);
        assert!(matches!(p.links.style, LineStyle::Solid(c) if c.to_hex() == "#5cadd6"));
        assert!(matches!(p.spawn.coloring, Coloring::Hue { min, max, .. } if min == 200.0 && max == 260.0));
    }

    #[test]
    fn negative_count_clamps_to_zero() {
        let p = NeuralParams::from_json(&json!({"count": -5}));
        assert_eq!(p.count, NodeCount::Fixed(0));
    }

    #[test]
    fn huge_counts_hit_the_ceiling() {
        let p = NeuralParams::from_json(&json!({"count": 1e18}));
        assert_eq!(p.count, NodeCount::Fixed(MAX_NODES));
        let capped = NeuralParams::from_json(&json!({"count_per_area": 1, "max_count": 1_000_000}));
        assert_eq!(capped.count, NodeCount::PerArea { area: 1.0, cap: MAX_NODES });
        assert_eq!(NodeCount::Fixed(usize::MAX).resolve(10, 10), MAX_NODES);
        assert_eq!(NodeCount::PerWidth { span: 1e-300, cap: usize::MAX }.resolve(100, 1), MAX_NODES);
    }

    #[test]
    fn area_rule_takes_precedence() {
        let p = NeuralParams::from_json(&json!({
            "count": 10, "count_per_area": 15000, "count_per_width": 25, "max_count": 80
        }));
        assert_eq!(p.count, NodeCount::PerArea { area: 15000.0, cap: 80 });
        let w = NeuralParams::from_json(&json!({"count_per_width": 25, "max_count": 60}));
        assert_eq!(w.count, NodeCount::PerWidth { span: 25.0, cap: 60 });
    }

    #[test]
    fn node_count_formulas() {
        let area = NodeCount::PerArea { area: 15000.0, cap: 80 };
        assert_eq!(area.resolve(1280, 720), 61);
        assert_eq!(area.resolve(3840, 2160), 80);
        let width = NodeCount::PerWidth { span: 25.0, cap: 60 };
        assert_eq!(width.resolve(1000, 10), 40);
        assert_eq!(width.resolve(4000, 10), 60);
        assert_eq!(NodeCount::Fixed(3).resolve(1, 1), 3);
    }

    #[test]
    fn inverted_ranges_are_swapped() {
        let p = NeuralParams::from_json(&json!({"radius_min": 4.0, "radius_max": 1.0, "hue_min": 300, "hue_max": 100}));
        assert_eq!((p.spawn.radius_min, p.spawn.radius_max), (1.0, 4.0));
        assert!(matches!(p.spawn.coloring, Coloring::Hue { min, max, .. } if min == 100.0 && max == 300.0));
    }

    #[test]
    fn negative_threshold_reads_as_zero() {
        let p = NeuralParams::from_json(&json!({"threshold": -10}));
        assert_eq!(p.links.threshold, 0.0);
    }

    #[test]
    fn unknown_names_fall_back() {
        let p = NeuralParams::from_json(&json!({
            "palette": "sepia", "coloring": "rainbow", "line_color": "nope", "edges": "wrap", "glow_blend": "screen"
        }));
        assert_eq!(p.palette_name, "synapse");
        assert!(matches!(p.spawn.coloring, Coloring::Hue { .. }));
        assert!(matches!(p.links.style, LineStyle::Solid(c) if c.to_hex() == "#5cadd6"));
        assert_eq!(p.edges, EdgeMode::Reflect);
        assert_eq!(p.look.glow_blend, BlendMode::Normal);
    }

    #[test]
    fn to_json_reads_back_identically() {
        let p = NeuralParams::from_json(&json!({
            "count_per_width": 25, "max_count": 60, "coloring": "cycle", "palette": "aurora",
            "line_style": "endpoints", "edges": "clamp", "layering": "links_above",
            "glow_style": "palette", "core_color": "white", "trail_alpha": 0.0,
            "link_halo_ratio": 0.5, "link_halo_width": 6, "core_lighten": 0.1
        }));
        assert_eq!(NeuralParams::from_json(&p.to_json()), p);
        let d = NeuralParams::default();
        assert_eq!(NeuralParams::from_json(&d.to_json()), d);
    }

    #[test]
    fn schema_covers_every_emitted_key() {
        let schema = NeuralParams::schema();
        let params = NeuralParams::default().to_json();
        for key in params.as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing '{key}'");
        }
        assert_eq!(schema["threshold"]["default"], 150.0);
        assert_eq!(schema["count"]["type"], "integer");
    }
}
