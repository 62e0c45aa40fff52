#![deny(unsafe_code)]
//! Core types for backdrop animated backgrounds.
//!
//! Provides the [`Scene`] trait, the [`DrawTarget`] drawing vocabulary with
//! its CPU rasterizer [`Surface`] and test [`Recorder`], color types
//! ([`Srgb`], [`Rgba`], OKLab helpers), [`Palette`], the seedable
//! [`Xorshift64`] PRNG, reproducible [`Seed`]s, and tolerant parameter helpers.

pub mod color;
pub mod draw;
pub mod error;
pub mod palette;
pub mod params;
pub mod prng;
pub mod scene;
pub mod seed;
pub mod surface;

pub use color::{Rgba, Srgb};
pub use draw::{BlendMode, DrawCommand, DrawTarget, Gradient, Recorder};
pub use error::SceneError;
pub use palette::Palette;
pub use prng::Xorshift64;
pub use scene::Scene;
pub use seed::Seed;
pub use surface::Surface;

/// Re-exported so dependents share one vector type.
pub use glam::DVec2;
