//! A presenter that writes every frame it is shown to a numbered PNG.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use backdrop_core::{SceneError, Srgb, Surface};
use backdrop_host::Presenter;
use backdrop_scenes::snapshot::write_png;

/// Writes `frame_0000.png`, `frame_0001.png`, ... into a directory.
///
/// The first write failure is kept and ends the cycle; clones share the
/// counter and the failure.
#[derive(Clone)]
pub struct PngSink {
    dir: PathBuf,
    backdrop: Option<Srgb>,
    written: Rc<Cell<usize>>,
    failure: Rc<RefCell<Option<SceneError>>>,
}

impl PngSink {
    pub fn new(dir: &Path, backdrop: Option<Srgb>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            backdrop,
            written: Rc::new(Cell::new(0)),
            failure: Rc::new(RefCell::new(None)),
        }
    }

    pub fn written(&self) -> usize {
        self.written.get()
    }

    /// Takes the write failure that stopped the cycle, if any.
    pub fn take_failure(&self) -> Option<SceneError> {
        self.failure.borrow_mut().take()
    }

    fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:04}.png"))
    }
}

impl Presenter for PngSink {
    fn present(&mut self, surface: &Surface) -> bool {
        let path = self.path_for(self.written.get());
        match write_png(surface, self.backdrop, &path) {
            Ok(()) => {
                self.written.set(self.written.get() + 1);
                true
            }
            Err(e) => {
                log::warn!("writing {} failed: {e}", path.display());
                *self.failure.borrow_mut() = Some(e);
                false
            }
        }
    }
}
