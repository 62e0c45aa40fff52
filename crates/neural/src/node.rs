//! A single drifting node and its per-frame motion rule.

use backdrop_core::Srgb;
use glam::DVec2;

/// How nodes treat the surface walls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeMode {
    /// Negate the velocity component and mirror the overshoot back inside.
    #[default]
    Reflect,
    /// Reflect, then clamp the position into bounds.
    Clamp,
}

impl EdgeMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reflect" => Some(EdgeMode::Reflect),
            "clamp" => Some(EdgeMode::Clamp),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EdgeMode::Reflect => "reflect",
            EdgeMode::Clamp => "clamp",
        }
    }
}

/// One simulated point.
///
/// Velocity is seeded once and only ever changes sign; radius and tint are
/// fixed for the node's lifetime. `phase` drives the optional alpha pulse
/// and advances by `phase_speed` every frame, independent of motion.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub tint: Srgb,
    pub phase: f64,
    pub phase_speed: f64,
}

impl Node {
    /// A white, non-pulsing node.
    pub fn new(position: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            tint: Srgb::WHITE,
            phase: 0.0,
            phase_speed: 0.0,
        }
    }

    pub fn with_tint(mut self, tint: Srgb) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_pulse(mut self, phase: f64, phase_speed: f64) -> Self {
        self.phase = phase;
        self.phase_speed = phase_speed;
        self
    }

    /// Advances one frame inside a `width` x `height` box.
    pub fn step(&mut self, width: f64, height: f64, edges: EdgeMode) {
        self.position += self.velocity;
        let clamp = edges == EdgeMode::Clamp;
        bounce(&mut self.position.x, &mut self.velocity.x, width, clamp);
        bounce(&mut self.position.y, &mut self.velocity.y, height, clamp);
        self.phase += self.phase_speed;
    }

    /// Pulsing opacity `base + amplitude * sin(phase)`, clamped to [0, 1].
    pub fn pulse_alpha(&self, base: f64, amplitude: f64) -> f64 {
        (base + amplitude * self.phase.sin()).clamp(0.0, 1.0)
    }
}

/// Slack for the "crossed during this step" test, absorbing rounding in
/// `position + velocity - extent`.
const CROSSING_SLACK: f64 = 1e-9;

/// Wall handling on one axis.
///
/// Velocity flips only when the node is outside and still heading outward,
/// so a node stranded outside by a shrink turns around once and drifts back
/// instead of jittering. The overshoot is mirrored only when the wall was
/// crossed during this step, and never past the opposite wall: a step longer
/// than the extent lands on that wall.
fn bounce(pos: &mut f64, vel: &mut f64, extent: f64, clamp: bool) {
    if *pos < 0.0 {
        let overshoot = -*pos;
        if *vel < 0.0 {
            if overshoot <= -*vel + CROSSING_SLACK {
                *pos = overshoot.min(extent.max(0.0));
            }
            *vel = -*vel;
        }
    } else if *pos > extent {
        let overshoot = *pos - extent;
        if *vel > 0.0 {
            if overshoot <= *vel + CROSSING_SLACK {
                *pos = (extent - overshoot).max(0.0);
            }
            *vel = -*vel;
        }
    }
    if clamp {
        *pos = pos.clamp(0.0, extent.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64, vx: f64, vy: f64) -> Node {
        Node::new(DVec2::new(x, y), DVec2::new(vx, vy), 2.0)
    }

    #[test]
    fn free_motion_adds_velocity() {
        let mut n = node(10.0, 10.0, 0.5, -0.25);
        n.step(100.0, 100.0, EdgeMode::Reflect);
        assert_eq!(n.position, DVec2::new(10.5, 9.75));
        assert_eq!(n.velocity, DVec2::new(0.5, -0.25));
    }

    #[test]
    fn right_wall_reflects_and_stays_inside() {
        let mut n = node(100.0, 50.0, 0.4, 0.0);
        n.step(100.0, 100.0, EdgeMode::Reflect);
        assert!(n.velocity.x < 0.0);
        assert!(n.position.x <= 100.0);
        assert!((n.position.x - 99.6).abs() < 1e-12);
    }

    #[test]
    fn left_and_top_walls_reflect() {
        let mut n = node(0.1, 0.2, -0.3, -0.5);
        n.step(50.0, 50.0, EdgeMode::Reflect);
        assert!(n.velocity.x > 0.0 && n.velocity.y > 0.0);
        assert!(n.position.x >= 0.0 && n.position.y >= 0.0);
    }

    #[test]
    fn axes_reflect_independently() {
        let mut n = node(100.0, 40.0, 0.5, 0.5);
        n.step(100.0, 100.0, EdgeMode::Reflect);
        assert!(n.velocity.x < 0.0);
        assert!(n.velocity.y > 0.0);
    }

    #[test]
    fn stranded_node_turns_once_and_drifts_back() {
        // Bounds shrank from 1000 to 600 wide while the node sat at 900.
        let mut n = node(900.0, 10.0, 0.5, 0.0);
        n.step(600.0, 100.0, EdgeMode::Reflect);
        assert!(n.velocity.x < 0.0);
        assert!((n.position.x - 900.5).abs() < 1e-12, "no teleport");
        let before = n.position.x;
        for _ in 0..10 {
            n.step(600.0, 100.0, EdgeMode::Reflect);
        }
        assert!(n.velocity.x < 0.0, "must not flip back while outside");
        assert!(n.position.x < before);
    }

    #[test]
    fn clamp_mode_pulls_stranded_node_inside() {
        let mut n = node(900.0, 10.0, 0.5, 0.0);
        n.step(600.0, 100.0, EdgeMode::Clamp);
        assert_eq!(n.position.x, 600.0);
        assert!(n.velocity.x < 0.0);
    }

    #[test]
    fn step_longer_than_extent_lands_on_far_wall() {
        let mut n = node(5.0, 5.0, 30.0, 0.0);
        n.step(10.0, 10.0, EdgeMode::Reflect);
        assert_eq!(n.position.x, 0.0);
        assert_eq!(n.velocity.x, -30.0);
        for _ in 0..9 {
            n.step(10.0, 10.0, EdgeMode::Reflect);
            assert!((0.0..=10.0).contains(&n.position.x), "x={}", n.position.x);
        }
    }

    #[test]
    fn phase_advances_by_speed() {
        let mut n = node(5.0, 5.0, 0.0, 0.0).with_pulse(1.0, 0.25);
        n.step(10.0, 10.0, EdgeMode::Reflect);
        n.step(10.0, 10.0, EdgeMode::Reflect);
        assert!((n.phase - 1.5).abs() < 1e-12);
    }

    #[test]
    fn pulse_alpha_is_clamped() {
        let n = node(0.0, 0.0, 0.0, 0.0).with_pulse(std::f64::consts::FRAC_PI_2, 0.0);
        assert!((n.pulse_alpha(0.6, 0.3) - 0.9).abs() < 1e-12);
        assert_eq!(n.pulse_alpha(0.9, 0.5), 1.0);
        assert_eq!(n.pulse_alpha(1.0, 0.0), 1.0);
    }

    #[test]
    fn edge_mode_names_round_trip() {
        for mode in [EdgeMode::Reflect, EdgeMode::Clamp] {
            assert_eq!(EdgeMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(EdgeMode::from_name("wrap"), None);
    }
}
