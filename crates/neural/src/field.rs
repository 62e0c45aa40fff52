//! The population of nodes and its bounds.

use backdrop_core::{Palette, Srgb, Xorshift64};
use glam::DVec2;

use crate::node::{EdgeMode, Node};
use crate::params::{Coloring, Spawn};

/// All nodes of one background, living in a `width` x `height` box.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    nodes: Vec<Node>,
    width: f64,
    height: f64,
    edges: EdgeMode,
}

impl ParticleField {
    /// Seeds `count` nodes uniformly inside the box.
    ///
    /// Per node the generator is drawn in a fixed order (x, y, vx, vy,
    /// radius, tint, pulse speed, phase), so one seed always yields the
    /// same field.
    pub fn initialize(
        width: f64,
        height: f64,
        count: usize,
        spawn: &Spawn,
        palette: &Palette,
        rng: &mut Xorshift64,
    ) -> Self {
        let nodes = (0..count)
            .map(|i| {
                let position = DVec2::new(rng.next_f64() * width, rng.next_f64() * height);
                let velocity = DVec2::new(
                    rng.next_symmetric(spawn.speed),
                    rng.next_symmetric(spawn.speed),
                );
                let radius = rng.next_range(spawn.radius_min, spawn.radius_max);
                let tint = pick_tint(&spawn.coloring, palette, i, rng);
                let phase_speed = rng.next_range(spawn.pulse_speed_min, spawn.pulse_speed_max);
                let phase = if spawn.random_phase {
                    rng.next_f64() * std::f64::consts::TAU
                } else {
                    0.0
                };
                Node::new(position, velocity, radius)
                    .with_tint(tint)
                    .with_pulse(phase, phase_speed)
            })
            .collect();
        Self {
            nodes,
            width,
            height,
            edges: EdgeMode::default(),
        }
    }

    /// A field over explicit nodes, for hand-built layouts.
    pub fn from_nodes(width: f64, height: f64, nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            width,
            height,
            edges: EdgeMode::default(),
        }
    }

    pub fn with_edges(mut self, edges: EdgeMode) -> Self {
        self.edges = edges;
        self
    }

    /// Steps every node one frame against the current bounds.
    pub fn advance(&mut self) {
        for node in &mut self.nodes {
            node.step(self.width, self.height, self.edges);
        }
    }

    /// Replaces the bounds. Nodes are neither moved nor reseeded; any left
    /// outside drift back in through the wall rule.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn edges(&self) -> EdgeMode {
        self.edges
    }
}

fn pick_tint(coloring: &Coloring, palette: &Palette, index: usize, rng: &mut Xorshift64) -> Srgb {
    match *coloring {
        Coloring::Hue {
            min,
            max,
            saturation,
            lightness,
        } => Srgb::from_hsl(rng.next_range(min, max), saturation, lightness),
        Coloring::Cycle => palette.cycle(index),
        Coloring::Palette => palette.sample(rng.next_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::NeuralParams;
    use proptest::prelude::*;

    fn seeded(width: f64, height: f64, count: usize, seed: u64) -> ParticleField {
        let p = NeuralParams::default();
        ParticleField::initialize(width, height, count, &p.spawn, &p.palette, &mut Xorshift64::new(seed))
    }

    #[test]
    fn initial_nodes_respect_ranges() {
        let field = seeded(800.0, 600.0, 200, 7);
        assert_eq!(field.len(), 200);
        for n in field.nodes() {
            assert!((0.0..800.0).contains(&n.position.x));
            assert!((0.0..600.0).contains(&n.position.y));
            assert!(n.velocity.x.abs() <= 0.5 && n.velocity.y.abs() <= 0.5);
            assert!((1.0..3.0).contains(&n.radius));
            assert!((0.02..0.07).contains(&n.phase_speed));
            assert_eq!(n.phase, 0.0);
        }
    }

    #[test]
    fn right_wall_reflection_in_a_hand_built_field() {
        let node = Node::new(DVec2::new(100.0, 50.0), DVec2::new(0.4, 0.0), 2.0);
        let mut field = ParticleField::from_nodes(100.0, 100.0, vec![node]);
        field.advance();
        let n = &field.nodes()[0];
        assert!(n.velocity.x < 0.0);
        assert!(n.position.x <= 100.0);
    }

    #[test]
    fn clamp_edges_hold_stranded_nodes_at_the_wall() {
        let node = Node::new(DVec2::new(500.0, 50.0), DVec2::new(0.3, 0.0), 2.0);
        let mut field = ParticleField::from_nodes(200.0, 100.0, vec![node]).with_edges(EdgeMode::Clamp);
        field.advance();
        assert_eq!(field.nodes()[0].position.x, 200.0);
        assert_eq!(field.edges(), EdgeMode::Clamp);
    }

    #[test]
    fn zero_count_is_empty() {
        let field = seeded(100.0, 100.0, 0, 1);
        assert!(field.is_empty());
    }

    #[test]
    fn cycle_coloring_walks_the_palette() {
        let mut p = NeuralParams::default();
        p.spawn.coloring = Coloring::Cycle;
        let field = ParticleField::initialize(50.0, 50.0, 5, &p.spawn, &p.palette, &mut Xorshift64::new(3));
        let tints: Vec<Srgb> = field.nodes().iter().map(|n| n.tint).collect();
        assert_eq!(tints[0], p.palette.cycle(0));
        assert_eq!(tints[3], p.palette.cycle(0));
        assert_eq!(tints[4], p.palette.cycle(1));
    }

    #[test]
    fn resize_keeps_nodes_in_place() {
        let mut field = seeded(1000.0, 1000.0, 30, 11);
        let before: Vec<DVec2> = field.nodes().iter().map(|n| n.position).collect();
        field.resize(300.0, 200.0);
        let after: Vec<DVec2> = field.nodes().iter().map(|n| n.position).collect();
        assert_eq!(before, after);
        assert_eq!((field.width(), field.height()), (300.0, 200.0));
    }

    #[test]
    fn stranded_nodes_return_after_shrink() {
        let mut field = seeded(1000.0, 1000.0, 40, 5);
        field.resize(300.0, 200.0);
        // Worst case: 1000 px away at the slowest nonzero speed takes long,
        // so only check nobody moves further out.
        let outside_before: Vec<f64> = field
            .nodes()
            .iter()
            .map(|n| (n.position.x - 300.0).max(0.0) + (n.position.y - 200.0).max(0.0))
            .collect();
        for _ in 0..50 {
            field.advance();
        }
        for (n, before) in field.nodes().iter().zip(outside_before) {
            let now = (n.position.x - 300.0).max(0.0) + (n.position.y - 200.0).max(0.0);
            assert!(now <= before + 1.0, "node drifted further out: {before} -> {now}");
        }
    }

    proptest! {
        #[test]
        fn nodes_stay_in_bounds(
            seed in 1u64..u64::MAX,
            w in 1.0f64..2000.0,
            h in 1.0f64..2000.0,
            speed in 0.0f64..=5.0,
        ) {
            let mut p = NeuralParams::default();
            p.spawn.speed = speed;
            let mut field = ParticleField::initialize(w, h, 40, &p.spawn, &p.palette, &mut Xorshift64::new(seed));
            for _ in 0..300 {
                field.advance();
                for n in field.nodes() {
                    prop_assert!(n.position.x >= 0.0 && n.position.x <= w, "x={} w={}", n.position.x, w);
                    prop_assert!(n.position.y >= 0.0 && n.position.y <= h, "y={} h={}", n.position.y, h);
                }
            }
        }

        #[test]
        fn same_seed_same_field(seed in 0u64..10_000) {
            let mut a = seeded(640.0, 480.0, 25, seed);
            let mut b = seeded(640.0, 480.0, 25, seed);
            for _ in 0..20 {
                a.advance();
                b.advance();
            }
            prop_assert_eq!(a, b);
        }

        #[test]
        fn speeds_never_change_magnitude(seed in 0u64..10_000) {
            let mut field = seeded(120.0, 90.0, 10, seed);
            let speeds: Vec<DVec2> = field.nodes().iter().map(|n| n.velocity.abs()).collect();
            for _ in 0..500 {
                field.advance();
            }
            for (n, s) in field.nodes().iter().zip(speeds) {
                prop_assert_eq!(n.velocity.abs(), s);
            }
        }
    }
}
