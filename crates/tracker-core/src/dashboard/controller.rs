//! Auto-refresh controller
//!
//! Owns the poll timer and the pause countdown. Running polls every
//! `refresh_secs`; pausing swaps the poll timer for a one-second countdown
//! that resumes polling when it reaches zero.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::DashboardSettings;
use crate::lifecycle::TimerHandle;
use crate::timer::TimerBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RefreshStatus {
    Running,
    Paused { seconds_left: u32 },
    Stopped,
}

type StatusCallback = Rc<dyn Fn(RefreshStatus)>;

struct Inner {
    timers: Rc<dyn TimerBackend>,
    settings: DashboardSettings,
    on_poll: Rc<dyn Fn()>,
    on_status: RefCell<Option<StatusCallback>>,
    status: Cell<RefreshStatus>,
    poll: RefCell<Option<TimerHandle>>,
    countdown: RefCell<Option<TimerHandle>>,
}

impl Inner {
    fn set_status(&self, status: RefreshStatus) {
        self.status.set(status);
        let callback = self.on_status.borrow().clone();
        if let Some(callback) = callback {
            callback(status);
        }
    }

    // Handles are taken out before dropping so their release never runs
    // under a borrow of the slot.
    fn clear(slot: &RefCell<Option<TimerHandle>>) {
        let handle = slot.borrow_mut().take();
        drop(handle);
    }
}

pub struct RefreshController {
    inner: Rc<Inner>,
}

impl RefreshController {
    /// `on_poll` runs on every poll tick; nothing runs until [`start`](Self::start)
    pub fn new(timers: Rc<dyn TimerBackend>, settings: DashboardSettings, on_poll: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                timers,
                settings,
                on_poll: Rc::new(on_poll),
                on_status: RefCell::new(None),
                status: Cell::new(RefreshStatus::Stopped),
                poll: RefCell::new(None),
                countdown: RefCell::new(None),
            }),
        }
    }

    pub fn on_status(&self, callback: impl Fn(RefreshStatus) + 'static) {
        *self.inner.on_status.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn status(&self) -> RefreshStatus {
        self.inner.status.get()
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.status(), RefreshStatus::Paused { .. })
    }

    /// Countdown value shown by the UI; the full pause length unless paused
    pub fn seconds_left(&self) -> u32 {
        match self.status() {
            RefreshStatus::Paused { seconds_left } => seconds_left,
            _ => self.inner.settings.pause_secs,
        }
    }

    /// (Re)starts polling and cancels any countdown
    pub fn start(&self) {
        start(&self.inner);
    }

    /// Stops polling for `pause_secs`; ignored unless running
    pub fn pause(&self) {
        let inner = &self.inner;
        if inner.status.get() != RefreshStatus::Running {
            return;
        }
        Inner::clear(&inner.poll);

        let weak = Rc::downgrade(inner);
        let countdown = inner
            .timers
            .interval(Duration::from_secs(1), Box::new(move || countdown_tick(&weak)));
        *inner.countdown.borrow_mut() = Some(countdown);

        log::debug!("auto-refresh paused for {}s", inner.settings.pause_secs);
        inner.set_status(RefreshStatus::Paused {
            seconds_left: inner.settings.pause_secs,
        });
    }

    /// Ends a pause early; ignored unless paused
    pub fn resume(&self) {
        resume(&self.inner);
    }

    /// Cancels every timer. Safe to call repeatedly.
    pub fn stop(&self) {
        let inner = &self.inner;
        Inner::clear(&inner.poll);
        Inner::clear(&inner.countdown);
        if inner.status.get() != RefreshStatus::Stopped {
            inner.set_status(RefreshStatus::Stopped);
        }
    }
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        Inner::clear(&self.inner.poll);
        Inner::clear(&self.inner.countdown);
    }
}

fn start(inner: &Rc<Inner>) {
    Inner::clear(&inner.countdown);
    Inner::clear(&inner.poll);

    let weak = Rc::downgrade(inner);
    let poll = inner.timers.interval(
        inner.settings.refresh_interval(),
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                (inner.on_poll)();
            }
        }),
    );
    *inner.poll.borrow_mut() = Some(poll);
    inner.set_status(RefreshStatus::Running);
}

fn resume(inner: &Rc<Inner>) {
    if !matches!(inner.status.get(), RefreshStatus::Paused { .. }) {
        return;
    }
    log::debug!("auto-refresh resumed");
    start(inner);
}

fn countdown_tick(weak: &Weak<Inner>) {
    let Some(inner) = weak.upgrade() else { return };
    let RefreshStatus::Paused { seconds_left } = inner.status.get() else {
        return;
    };
    let seconds_left = seconds_left.saturating_sub(1);
    if seconds_left == 0 {
        resume(&inner);
    } else {
        inner.set_status(RefreshStatus::Paused { seconds_left });
    }
}
