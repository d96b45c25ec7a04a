//! Timers and local task spawning
//!
//! The browser build plugs in gloo-timers and Leptos' `spawn_local`; the
//! [`ManualClock`] drives the same code through virtual time.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::lifecycle::TimerHandle;

/// A boxed single-threaded future
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Repeating timers
pub trait TimerBackend {
    /// Calls `tick` every `period` until the handle is cancelled or dropped
    fn interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle;
}

/// Fire-and-forget execution of local futures
pub trait Spawn {
    fn spawn(&self, task: LocalTask);
}

type Tick = Rc<RefCell<Box<dyn FnMut()>>>;

struct Scheduled {
    id: u64,
    period: Duration,
    due: Duration,
    tick: Tick,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    timers: Vec<Scheduled>,
}

/// Virtual-time [`TimerBackend`]: nothing fires until [`ManualClock::advance`]
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Moves time forward, firing every tick that falls due in order.
    /// Ticks may create or cancel timers, including their own.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .timers
                    .iter_mut()
                    .filter(|t| t.due <= target)
                    .min_by_key(|t| (t.due, t.id));
                match due {
                    Some(timer) => {
                        let fired_at = timer.due;
                        timer.due += timer.period;
                        let tick = timer.tick.clone();
                        state.now = fired_at;
                        Some(tick)
                    }
                    None => None,
                }
            };
            match next {
                Some(tick) => (tick.borrow_mut())(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }
}

fn cancel_timer(state: &Weak<RefCell<ClockState>>, id: u64) {
    if let Some(state) = state.upgrade() {
        state.borrow_mut().timers.retain(|t| t.id != id);
    }
}

impl TimerBackend for ManualClock {
    fn interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle {
        // A zero period would fire forever within one advance.
        let period = period.max(Duration::from_millis(1));
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            let due = state.now + period;
            state.timers.push(Scheduled {
                id,
                period,
                due,
                tick: Rc::new(RefCell::new(tick)),
            });
            id
        };
        let state = Rc::downgrade(&self.state);
        TimerHandle::new(move || cancel_timer(&state, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_interval_fires_per_period() {
        let clock = ManualClock::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let _handle = clock.interval(Duration::from_secs(5), Box::new(move || c.set(c.get() + 1)));

        clock.advance(Duration::from_secs(4));
        assert_eq!(count.get(), 0);
        clock.advance(Duration::from_secs(11));
        assert_eq!(count.get(), 3);
        assert_eq!(clock.now(), Duration::from_secs(15));
    }

    #[test]
    fn test_dropped_handle_stops_timer() {
        let clock = ManualClock::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let handle = clock.interval(Duration::from_secs(1), Box::new(move || c.set(c.get() + 1)));
        clock.advance(Duration::from_secs(2));
        drop(handle);
        clock.advance(Duration::from_secs(5));
        assert_eq!(count.get(), 2);
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_tick_can_cancel_itself() {
        let clock = ManualClock::new();
        let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));
        let (s, c) = (slot.clone(), count.clone());
        let handle = clock.interval(
            Duration::from_secs(1),
            Box::new(move || {
                c.set(c.get() + 1);
                if c.get() == 3 {
                    s.borrow_mut().take();
                }
            }),
        );
        *slot.borrow_mut() = Some(handle);
        clock.advance(Duration::from_secs(10));
        assert_eq!(count.get(), 3);
    }
}
