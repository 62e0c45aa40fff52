//! A host without a display: frames and resizes happen when the caller says.
//!
//! Used by the CLI to drive a [`crate::Background`] offline, and by tests to
//! step the lifecycle deterministically.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use backdrop_core::Surface;

use crate::background::Presenter;
use crate::scheduler::{DisplayLink, FrameCallback, FrameHandle};
use crate::viewport::{Container, ListenerId, ResizeCallback};

/// Simulated refresh interval (60 Hz), in ms.
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// A display link whose refreshes are triggered by [`ManualDisplay::pump`].
#[derive(Default)]
pub struct ManualDisplay {
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    next_handle: Cell<u32>,
    refuse: Cell<bool>,
    clock: Cell<f64>,
}

impl ManualDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires one refresh: every callback queued before the call runs once.
    /// Returns how many ran.
    pub fn pump(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let now = self.clock.get() + FRAME_INTERVAL_MS;
        self.clock.set(now);
        let fired = due.len();
        for (_, callback) in due {
            callback(now);
        }
        fired
    }

    /// Fires `frames` refreshes, returning the total callbacks run.
    pub fn pump_frames(&self, frames: usize) -> usize {
        (0..frames).map(|_| self.pump()).sum()
    }

    /// While set, every request is refused.
    pub fn refuse_requests(&self, refuse: bool) {
        self.refuse.set(refuse);
    }

    /// Requests waiting for the next refresh.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl DisplayLink for ManualDisplay {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        if self.refuse.get() {
            return None;
        }
        let handle = FrameHandle(self.next_handle.get());
        self.next_handle.set(self.next_handle.get().wrapping_add(1));
        self.queue.borrow_mut().push((handle, callback));
        Some(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

type Listener = Rc<RefCell<ResizeCallback>>;

/// A container with a settable size.
pub struct ManualContainer {
    size: Cell<Option<(usize, usize)>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<u32>,
}

impl ManualContainer {
    pub fn new(size: Option<(usize, usize)>) -> Self {
        Self {
            size: Cell::new(size),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Changes the size without notifying anyone.
    pub fn set_size(&self, size: Option<(usize, usize)>) {
        self.size.set(size);
    }

    /// Changes the size and notifies every subscribed listener.
    pub fn resize(&self, width: usize, height: usize) {
        self.size.set(Some((width, height)));
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            (&mut *listener.borrow_mut())(width, height);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Container for ManualContainer {
    fn size(&self) -> Option<(usize, usize)> {
        self.size.get()
    }

    fn subscribe_resize(&self, callback: ResizeCallback) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get().wrapping_add(1));
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(callback))));
        id
    }

    fn unsubscribe_resize(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(i, _)| *i != id);
    }
}

/// Counts presented frames and remembers the last size; optionally declines
/// after a limit.
#[derive(Clone, Default)]
pub struct FrameCounter {
    presented: Rc<Cell<usize>>,
    last_size: Rc<Cell<Option<(usize, usize)>>>,
    limit: Option<usize>,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declines every frame after the first `limit`.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Frames accepted so far (shared between clones).
    pub fn presented(&self) -> usize {
        self.presented.get()
    }

    pub fn last_size(&self) -> Option<(usize, usize)> {
        self.last_size.get()
    }
}

impl Presenter for FrameCounter {
    fn present(&mut self, surface: &Surface) -> bool {
        if self.limit.is_some_and(|limit| self.presented.get() >= limit) {
            return false;
        }
        self.presented.set(self.presented.get() + 1);
        self.last_size.set(Some((surface.width(), surface.height())));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_request_never_fires() {
        let display = ManualDisplay::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let handle = display.request_frame(Box::new(move |_| f.set(true))).unwrap();
        display.cancel_frame(handle);
        assert_eq!(display.pump(), 0);
        assert!(!fired.get());
    }

    #[test]
    fn requests_made_during_pump_wait_for_next_refresh() {
        let display = Rc::new(ManualDisplay::new());
        let inner = display.clone();
        display.request_frame(Box::new(move |_| {
            inner.request_frame(Box::new(|_| {}));
        }));
        assert_eq!(display.pump(), 1);
        assert_eq!(display.pending(), 1);
    }

    #[test]
    fn clock_advances_per_pump() {
        let display = ManualDisplay::new();
        let seen = Rc::new(Cell::new(0.0));
        let s = seen.clone();
        display.request_frame(Box::new(move |ts| s.set(ts)));
        display.pump();
        assert!((seen.get() - FRAME_INTERVAL_MS).abs() < 1e-9);
    }

    #[test]
    fn container_notifies_until_unsubscribed() {
        let container = ManualContainer::new(Some((10, 10)));
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let id = container.subscribe_resize(Box::new(move |_, _| c.set(c.get() + 1)));
        container.resize(20, 20);
        container.unsubscribe_resize(id);
        container.resize(30, 30);
        assert_eq!(calls.get(), 1);
        assert_eq!(container.size(), Some((30, 30)));
    }

    #[test]
    fn counter_respects_limit() {
        let surface = Surface::new(3, 2).unwrap();
        let mut counter = FrameCounter::new().with_limit(2);
        let view = counter.clone();
        assert!(counter.present(&surface));
        assert!(counter.present(&surface));
        assert!(!counter.present(&surface));
        assert_eq!(view.presented(), 2);
        assert_eq!(view.last_size(), Some((3, 2)));
    }
}
