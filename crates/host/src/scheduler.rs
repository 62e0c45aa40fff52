//! Chained per-refresh scheduling with cancellation.
//!
//! A [`FrameScheduler`] asks a [`DisplayLink`] for one callback at a time;
//! each callback runs the tick and then requests the next. Nothing is
//! registered on an interval, so a stopped scheduler leaves nothing behind
//! once its single pending request is cancelled.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// One-shot callback receiving the host's frame timestamp (ms).
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host token for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// The host's display-refresh hook (`requestAnimationFrame` in a browser).
pub trait DisplayLink {
    /// Registers `callback` for the next refresh. `None` means the host
    /// refused (no display, hidden document, ...).
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle>;

    /// Drops a pending request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchedulerState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Default)]
struct Inner {
    state: SchedulerState,
    pending: Option<FrameHandle>,
    /// Bumped on every start and stop; callbacks carry the value they were
    /// scheduled under and do nothing once it moved on.
    epoch: u64,
    ticks: u64,
}

type Tick = Rc<RefCell<dyn FnMut(f64)>>;

/// Drives a tick once per display refresh until stopped.
///
/// Clones share state, so a tick can hold a clone and stop its own
/// scheduler.
#[derive(Clone)]
pub struct FrameScheduler {
    display: Rc<dyn DisplayLink>,
    inner: Rc<RefCell<Inner>>,
}

impl FrameScheduler {
    pub fn new(display: Rc<dyn DisplayLink>) -> Self {
        Self {
            display,
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    /// Starts calling `tick` every refresh. A running chain is replaced.
    pub fn start(&self, tick: impl FnMut(f64) + 'static) {
        if self.is_running() {
            self.stop();
        }
        let epoch = {
            let mut inner = self.inner.borrow_mut();
            inner.epoch += 1;
            inner.state = SchedulerState::Running;
            inner.epoch
        };
        log::debug!("frame scheduler started (epoch {epoch})");
        let tick: Tick = Rc::new(RefCell::new(tick));
        schedule(self.display.clone(), Rc::downgrade(&self.inner), epoch, tick);
    }

    /// Cancels the pending request and returns to idle. Safe to call any
    /// number of times.
    pub fn stop(&self) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == SchedulerState::Idle && inner.pending.is_none() {
                return;
            }
            inner.state = SchedulerState::Idle;
            inner.epoch += 1;
            inner.pending.take()
        };
        if let Some(handle) = pending {
            self.display.cancel_frame(handle);
        }
        log::debug!("frame scheduler stopped");
    }

    pub fn state(&self) -> SchedulerState {
        self.inner.borrow().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    /// Ticks run since this scheduler was created.
    pub fn ticks(&self) -> u64 {
        self.inner.borrow().ticks
    }
}

fn schedule(display: Rc<dyn DisplayLink>, inner: Weak<RefCell<Inner>>, epoch: u64, tick: Tick) {
    let next_display = display.clone();
    let next_inner = inner.clone();
    let callback: FrameCallback = Box::new(move |timestamp| {
        let Some(shared) = next_inner.upgrade() else {
            return;
        };
        {
            let mut state = shared.borrow_mut();
            if state.state != SchedulerState::Running || state.epoch != epoch {
                return;
            }
            state.pending = None;
            state.ticks += 1;
        }
        (&mut *tick.borrow_mut())(timestamp);
        // The tick may have stopped or restarted the scheduler.
        let live = {
            let state = shared.borrow();
            state.state == SchedulerState::Running && state.epoch == epoch
        };
        if live {
            schedule(next_display, next_inner, epoch, tick);
        }
    });

    let handle = display.request_frame(callback);
    let Some(shared) = inner.upgrade() else {
        return;
    };
    let mut state = shared.borrow_mut();
    if state.epoch != epoch {
        return;
    }
    match handle {
        Some(h) => state.pending = Some(h),
        None => {
            log::debug!("display refused a frame request; scheduler idle");
            state.state = SchedulerState::Idle;
        }
    }
}
