//! Browser Timers and Task Spawning
//!
//! gloo-timers intervals and Leptos' `spawn_local` behind the tracker-core
//! timer traits.

use std::time::Duration;

use gloo_timers::callback::Interval;
use leptos::task::spawn_local;
use tracker_core::lifecycle::TimerHandle;
use tracker_core::timer::{LocalTask, Spawn, TimerBackend};

#[derive(Clone, Copy, Default)]
pub struct GlooTimers;

impl TimerBackend for GlooTimers {
    fn interval(&self, period: Duration, mut tick: Box<dyn FnMut()>) -> TimerHandle {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        let interval = Interval::new(millis, move || tick());
        TimerHandle::new(move || {
            // The handle may be released from inside its own tick; clear the
            // interval now but free the closure once that tick has returned.
            let closure = interval.cancel();
            spawn_local(async move { drop(closure) });
        })
    }
}

#[derive(Clone, Copy, Default)]
pub struct LeptosSpawner;

impl Spawn for LeptosSpawner {
    fn spawn(&self, task: LocalTask) {
        spawn_local(task);
    }
}
