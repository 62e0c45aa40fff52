#![deny(unsafe_code)]
//! Host-lifecycle plumbing for backdrop scenes.
//!
//! Everything here is single-threaded and host-driven: the host's display
//! link calls back once per refresh, the container reports resizes, and a
//! [`Background`] ties one scene to both with guaranteed teardown.

pub mod background;
pub mod headless;
pub mod scheduler;
pub mod viewport;

pub use background::{Background, Presenter, SceneFactory};
pub use headless::{FrameCounter, ManualContainer, ManualDisplay};
pub use scheduler::{DisplayLink, FrameCallback, FrameHandle, FrameScheduler, SchedulerState};
pub use viewport::{Container, ListenerId, Resize, ResizeCallback, ViewportAdapter};
