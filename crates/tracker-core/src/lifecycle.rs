//! Scoped resources
//!
//! Timers and push subscriptions are released through a [`Teardown`]:
//! cancelling runs the release exactly once, and dropping an uncancelled
//! handle cancels it.

use std::fmt;

pub struct Teardown {
    release: Option<Box<dyn FnOnce()>>,
}

impl Teardown {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Runs the release if it has not run yet
    pub fn cancel(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Push-channel registration
pub type Subscription = Teardown;

/// Running interval timer
pub type TimerHandle = Teardown;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_cancel_is_idempotent() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut handle = Teardown::new(move || c.set(c.get() + 1));
        handle.cancel();
        handle.cancel();
        drop(handle);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_releases() {
        let released = Rc::new(Cell::new(false));
        let r = released.clone();
        {
            let _handle = Teardown::new(move || r.set(true));
        }
        assert!(released.get());
    }
}
