//! Keeps a resizable target in step with its container.

use std::cell::RefCell;
use std::rc::Rc;

/// Host token for a resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Receives the container's new `(width, height)`.
pub type ResizeCallback = Box<dyn FnMut(usize, usize)>;

/// Whatever the background is laid out in (the browser window, a test
/// fixture).
pub trait Container {
    /// Current size, or `None` when there is nothing to draw into.
    fn size(&self) -> Option<(usize, usize)>;

    fn subscribe_resize(&self, callback: ResizeCallback) -> ListenerId;

    /// Unknown ids are ignored.
    fn unsubscribe_resize(&self, id: ListenerId);
}

/// Something that follows the container's size.
pub trait Resize {
    fn resize(&mut self, width: usize, height: usize);
}

/// Owns one resize subscription and guarantees it is released.
///
/// The listener holds only a weak reference to the target, so a target
/// dropped first is never touched.
#[derive(Default)]
pub struct ViewportAdapter {
    subscription: Option<(Rc<dyn Container>, ListenerId)>,
}

impl ViewportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes `target` from the container and follows later resizes.
    ///
    /// Returns `false`, doing nothing, when the container has no size or a
    /// zero dimension. Re-attaching drops the previous subscription first.
    pub fn attach<T: Resize + 'static>(
        &mut self,
        container: Rc<dyn Container>,
        target: &Rc<RefCell<T>>,
    ) -> bool {
        self.detach();
        let Some((width, height)) = container.size().filter(|&(w, h)| w > 0 && h > 0) else {
            log::debug!("container has no drawable area; not attaching");
            return false;
        };
        target.borrow_mut().resize(width, height);

        let weak = Rc::downgrade(target);
        let id = container.subscribe_resize(Box::new(move |width, height| {
            if width == 0 || height == 0 {
                return;
            }
            let Some(target) = weak.upgrade() else {
                return;
            };
            match target.try_borrow_mut() {
                Ok(mut t) => {
                    log::debug!("viewport resized to {width}x{height}");
                    t.resize(width, height);
                }
                Err(_) => log::debug!("target busy; resize to {width}x{height} dropped"),
            };
        }));
        self.subscription = Some((container, id));
        log::debug!("viewport attached at {width}x{height}");
        true
    }

    /// Releases the resize subscription. Idempotent.
    pub fn detach(&mut self) {
        if let Some((container, id)) = self.subscription.take() {
            container.unsubscribe_resize(id);
            log::debug!("viewport detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}

impl Drop for ViewportAdapter {
    fn drop(&mut self) {
        self.detach();
    }
}
