//! One mounted background: scene, surface, scheduler and viewport together.
//!
//! [`Background::mount`] reads the container size, builds the scene the
//! first time a size is known, subscribes to resizes and starts the frame
//! cycle. [`Background::unmount`] (also run on drop) undoes all of it; after
//! it returns no further advance, draw or present happens for this instance,
//! however many host frames still fire.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use backdrop_core::{Scene, SceneError, Surface};

use crate::scheduler::{DisplayLink, FrameScheduler, SchedulerState};
use crate::viewport::{Container, Resize, ViewportAdapter};

/// Where finished frames go (a canvas, PNG files, a counter).
pub trait Presenter {
    /// Shows `surface`. Returning `false` means the output is gone; the
    /// cycle stops without error.
    fn present(&mut self, surface: &Surface) -> bool;
}

/// Builds the scene for the first known `(width, height)`.
pub type SceneFactory<S> = Box<dyn FnMut(usize, usize) -> Result<S, SceneError>>;

struct Stage<S> {
    factory: SceneFactory<S>,
    scene: Option<S>,
    surface: Option<Surface>,
    presenter: Box<dyn Presenter>,
}

impl<S: Scene> Stage<S> {
    /// Advance, draw, present. `false` when there is nothing to run or the
    /// presenter declined.
    fn tick(&mut self) -> bool {
        let (Some(scene), Some(surface)) = (self.scene.as_mut(), self.surface.as_mut()) else {
            return false;
        };
        scene.frame(surface);
        self.presenter.present(surface)
    }
}

impl<S: Scene> Resize for Stage<S> {
    fn resize(&mut self, width: usize, height: usize) {
        match self.surface.as_mut() {
            Some(surface) => {
                if let Err(e) = surface.resize(width, height) {
                    log::warn!("surface resize to {width}x{height} failed: {e}");
                    return;
                }
            }
            None => match Surface::new(width, height) {
                Ok(surface) => self.surface = Some(surface),
                Err(e) => {
                    log::warn!("surface creation at {width}x{height} failed: {e}");
                    return;
                }
            },
        }
        match self.scene.as_mut() {
            Some(scene) => scene.resize(width, height),
            None => match (self.factory)(width, height) {
                Ok(scene) => self.scene = Some(scene),
                Err(e) => log::warn!("scene construction failed: {e}"),
            },
        }
    }
}

/// A scene bound to a host display and container.
pub struct Background<S: Scene + 'static> {
    stage: Rc<RefCell<Stage<S>>>,
    scheduler: FrameScheduler,
    viewport: ViewportAdapter,
    live: Rc<Cell<bool>>,
}

impl<S: Scene + 'static> Background<S> {
    pub fn new(
        display: Rc<dyn DisplayLink>,
        factory: impl FnMut(usize, usize) -> Result<S, SceneError> + 'static,
        presenter: impl Presenter + 'static,
    ) -> Self {
        Self {
            stage: Rc::new(RefCell::new(Stage {
                factory: Box::new(factory),
                scene: None,
                surface: None,
                presenter: Box::new(presenter),
            })),
            scheduler: FrameScheduler::new(display),
            viewport: ViewportAdapter::new(),
            live: Rc::new(Cell::new(false)),
        }
    }

    /// Attaches to `container` and starts animating.
    ///
    /// Returns `false` and stays idle when the container has no drawable
    /// area or the scene could not be built. Mounting again remounts.
    pub fn mount(&mut self, container: Rc<dyn Container>) -> bool {
        self.unmount();
        if !self.viewport.attach(container, &self.stage) {
            return false;
        }
        if self.stage.borrow().scene.is_none() {
            self.viewport.detach();
            return false;
        }
        self.live.set(true);

        let stage = Rc::downgrade(&self.stage);
        let live = self.live.clone();
        let scheduler = self.scheduler.clone();
        self.scheduler.start(move |_| {
            if !live.get() {
                return;
            }
            let Some(stage) = stage.upgrade() else {
                return;
            };
            let presented = stage.borrow_mut().tick();
            if !presented {
                log::debug!("presenter declined the frame; stopping");
                scheduler.stop();
            }
        });
        log::debug!("background mounted");
        true
    }

    /// Stops the cycle and releases the resize subscription. Idempotent.
    pub fn unmount(&mut self) {
        let was_live = self.live.replace(false);
        self.scheduler.stop();
        self.viewport.detach();
        if was_live {
            log::debug!("background unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.live.get()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.state() == SchedulerState::Running
    }

    /// Frames run since creation.
    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }

    /// Borrows the scene, once it exists.
    pub fn with_scene<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.stage.borrow().scene.as_ref().map(f)
    }

    /// Current surface size, once a surface exists.
    pub fn surface_size(&self) -> Option<(usize, usize)> {
        self.stage
            .borrow()
            .surface
            .as_ref()
            .map(|s| (s.width(), s.height()))
    }
}

impl<S: Scene + 'static> Drop for Background<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
