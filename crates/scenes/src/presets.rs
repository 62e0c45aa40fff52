//! Named parameter sets, one per hosting view.
//!
//! Each preset is a partial params object; keys it leaves out take the
//! scene defaults, and user overrides are merged on top.

use serde_json::{json, Value};

/// Preset names, in listing order.
pub const PRESET_NAMES: &[&str] = &["neural", "contact", "experience", "feedbacks"];

/// Parameters for a preset, or `None` for an unknown name.
pub fn preset(name: &str) -> Option<Value> {
    let params = match name {
        "neural" => json!({}),
        // Fixed population, hue-tinted pulsing nodes with cores a step lighter
        // than their glows, faint thin links over a dark blue trail.
        "contact" => json!({
            "count": 80,
            "speed": 0.4,
            "radius_min": 1.0,
            "radius_max": 3.0,
            "coloring": "hue",
            "hue_min": 200.0,
            "hue_max": 260.0,
            "saturation": 1.0,
            "lightness": 0.6,
            "pulse_base": 0.6,
            "pulse_amplitude": 0.3,
            "pulse_speed_min": 0.02,
            "pulse_speed_max": 0.07,
            "glow_scale": 3.0,
            "glow_alpha": 0.3,
            "core_lighten": 0.1,
            "threshold": 150.0,
            "line_style": "solid",
            "line_color": "#5cadd6",
            "line_alpha": 0.2,
            "line_width": 0.5,
            "trail_color": "#080818",
            "trail_alpha": 0.1,
        }),
        // Population scales with area; wide palette halos, white cores and
        // palette-gradient links drawn over the nodes.
        "experience" => json!({
            "count_per_area": 15000.0,
            "max_count": 80,
            "speed": 0.25,
            "radius_min": 1.0,
            "radius_max": 3.0,
            "palette": "synapse",
            "random_phase": true,
            "pulse_base": 0.5,
            "pulse_amplitude": 0.2,
            "pulse_speed_min": 0.01,
            "pulse_speed_max": 0.03,
            "glow_scale": 8.0,
            "glow_alpha": 1.0,
            "glow_style": "palette",
            "core_color": "white",
            "core_alpha": 0.8,
            "threshold": 150.0,
            "line_style": "palette",
            "line_alpha": 0.3,
            "line_width": 1.0,
            "layering": "links_above",
            "trail_color": "#000000",
            "trail_alpha": 0.05,
        }),
        // Population scales with width; three-color cycle, endpoint-gradient
        // links with a halo on the short ones, clamped walls, no trails.
        "feedbacks" => json!({
            "count_per_width": 25.0,
            "max_count": 60,
            "speed": 0.3,
            "radius_min": 1.5,
            "radius_max": 4.0,
            "coloring": "cycle",
            "palette": "aurora",
            "pulse_base": 1.0,
            "pulse_amplitude": 0.0,
            "pulse_speed_min": 0.0,
            "pulse_speed_max": 0.0,
            "glow_scale": 3.0,
            "glow_alpha": 0.8,
            "threshold": 180.0,
            "line_style": "endpoints",
            "line_alpha": 0.4,
            "line_width": 1.5,
            "link_halo_ratio": 0.5,
            "link_halo_width": 10.0,
            "edges": "clamp",
            "trail_alpha": 0.0,
        }),
        _ => return None,
    };
    Some(params)
}
