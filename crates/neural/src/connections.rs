//! Proximity links between nodes, and the per-frame node/link painter.

use backdrop_core::{BlendMode, DrawTarget, Gradient, Palette, Rgba, Srgb};

use crate::node::Node;
use crate::params::{CoreColor, GlowStyle, Layering, LineStyle, LinkStyle, NodeLook};

/// One link between nodes `a < b`, with its faded opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Draws a frame of nodes and the links between them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionRenderer {
    links: LinkStyle,
    look: NodeLook,
    layering: Layering,
    palette: Palette,
}

impl ConnectionRenderer {
    pub fn new(links: LinkStyle, look: NodeLook, layering: Layering, palette: Palette) -> Self {
        Self {
            links,
            look,
            layering,
            palette,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.links.threshold
    }

    /// Every unordered pair closer than the threshold, each listed once.
    ///
    /// Opacity is `line_alpha * (1 - d / threshold)`, so it falls linearly
    /// from `line_alpha` at distance 0 to 0 at the threshold. A threshold of
    /// zero (or NaN) links nothing.
    pub fn connections(&self, nodes: &[Node]) -> Vec<Connection> {
        let threshold = self.links.threshold;
        if threshold.is_nan() || threshold <= 0.0 {
            return Vec::new();
        }
        let mut out = Vec::new();
        for (i, a) in nodes.iter().enumerate() {
            for (j, b) in nodes.iter().enumerate().skip(i + 1) {
                let distance = a.position.distance(b.position);
                if distance < threshold {
                    out.push(Connection {
                        a: i,
                        b: j,
                        distance,
                        opacity: self.links.alpha * (1.0 - distance / threshold),
                    });
                }
            }
        }
        out
    }

    /// Paints links and nodes in the configured layering order.
    ///
    /// Leaves the target's blend mode at [`BlendMode::Normal`].
    pub fn draw_frame(&self, nodes: &[Node], target: &mut dyn DrawTarget) {
        target.set_blend(BlendMode::Normal);
        match self.layering {
            Layering::LinksBelow => {
                self.draw_links(nodes, target);
                self.draw_nodes(nodes, target);
            }
            Layering::LinksAbove => {
                self.draw_nodes(nodes, target);
                self.draw_links(nodes, target);
            }
        }
    }

    fn draw_links(&self, nodes: &[Node], target: &mut dyn DrawTarget) {
        let halo_below = self.links.threshold * self.links.halo_ratio;
        for c in self.connections(nodes) {
            if c.opacity <= 0.0 {
                continue;
            }
            let (a, b) = (&nodes[c.a], &nodes[c.b]);
            if c.distance < halo_below {
                let halo = Gradient::solid(a.tint.with_alpha(c.opacity * 0.5));
                target.line(a.position, b.position, self.links.width + self.links.halo_width, &halo);
            }
            let paint = self.line_paint(a.tint, b.tint, c.opacity);
            target.line(a.position, b.position, self.links.width, &paint);
        }
    }

    fn line_paint(&self, from: Srgb, to: Srgb, opacity: f64) -> Gradient {
        match self.links.style {
            LineStyle::Solid(color) => Gradient::solid(color.with_alpha(opacity)),
            LineStyle::Endpoints => Gradient::linear(from.with_alpha(opacity), to.with_alpha(opacity)),
            LineStyle::Palette => Gradient::new(spread(&self.palette, |_| opacity)),
        }
    }

    fn draw_nodes(&self, nodes: &[Node], target: &mut dyn DrawTarget) {
        let look = &self.look;
        let glows = look.glow_scale > 0.0 && look.glow_alpha > 0.0;
        for node in nodes {
            let alpha = node.pulse_alpha(look.pulse_base, look.pulse_amplitude);
            if glows {
                if look.glow_blend != BlendMode::Normal {
                    target.set_blend(look.glow_blend);
                }
                target.disc(node.position, node.radius * look.glow_scale, &self.glow_paint(node.tint, alpha));
                if look.glow_blend != BlendMode::Normal {
                    target.set_blend(BlendMode::Normal);
                }
            }
            let core = match look.core_color {
                CoreColor::Tint if look.core_lighten != 0.0 => node.tint.lighten(look.core_lighten),
                CoreColor::Tint => node.tint,
                CoreColor::White => Srgb::WHITE,
            };
            target.disc(
                node.position,
                node.radius,
                &Gradient::solid(core.with_alpha(alpha * look.core_alpha)),
            );
        }
    }

    fn glow_paint(&self, tint: Srgb, alpha: f64) -> Gradient {
        let peak = alpha * self.look.glow_alpha;
        match self.look.glow_style {
            GlowStyle::Tint => Gradient::new(vec![
                (0.0, tint.with_alpha(peak)),
                (0.5, tint.with_alpha(peak * 0.5)),
                (1.0, tint.with_alpha(0.0)),
            ]),
            GlowStyle::Palette => Gradient::new(spread(&self.palette, |offset| peak * (1.0 - offset))),
        }
    }
}

/// Palette stops evenly spaced over [0, 1] with alpha chosen per offset.
fn spread(palette: &Palette, alpha_at: impl Fn(f64) -> f64) -> Vec<(f64, Rgba)> {
    let colors = palette.colors();
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let offset = if colors.len() == 1 { 0.0 } else { i as f64 / last };
            (offset, c.with_alpha(alpha_at(offset)))
        })
        .collect()
}
