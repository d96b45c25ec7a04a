//! Refresh coalescing
//!
//! At most one fetch runs at a time. Triggers that arrive while a fetch is
//! in flight collapse into a single follow-up fetch.

use std::cell::Cell;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum QueueState {
    #[default]
    Idle,
    Running,
    /// Running, and at least one trigger arrived meanwhile
    Rerun,
}

#[derive(Debug, Default)]
pub struct RefreshQueue {
    state: Cell<QueueState>,
}

/// Returns the queue to idle if the running future is dropped mid-fetch
struct IdleOnDrop<'a>(&'a Cell<QueueState>);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(QueueState::Idle);
    }
}

impl RefreshQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.state.get() != QueueState::Idle
    }

    /// Runs `fetch` unless one is already in flight. Returns `false` when the
    /// trigger was folded into the running fetch.
    pub async fn run<F, Fut>(&self, mut fetch: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        if self.is_busy() {
            self.state.set(QueueState::Rerun);
            return false;
        }

        self.state.set(QueueState::Running);
        let _guard = IdleOnDrop(&self.state);
        loop {
            fetch().await;
            if self.state.get() == QueueState::Rerun {
                self.state.set(QueueState::Running);
            } else {
                break;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tokio::sync::Semaphore;

    #[tokio::test]
    async fn test_overlapping_triggers_coalesce() {
        let queue = RefreshQueue::new();
        let calls = Rc::new(Cell::new(0));
        let gate = Rc::new(Semaphore::new(0));

        let fetch = || {
            let calls = calls.clone();
            let gate = gate.clone();
            async move {
                calls.set(calls.get() + 1);
                gate.acquire().await.unwrap().forget();
            }
        };

        let (first, second, third, _) = tokio::join!(
            queue.run(fetch),
            queue.run(fetch),
            queue.run(fetch),
            async { gate.add_permits(2) },
        );

        assert!(first);
        assert!(!second);
        assert!(!third);
        assert_eq!(calls.get(), 2);
        assert!(!queue.is_busy());
    }

    #[tokio::test]
    async fn test_sequential_triggers_each_fetch() {
        let queue = RefreshQueue::new();
        let calls = Cell::new(0);
        for _ in 0..3 {
            queue.run(|| async { calls.set(calls.get() + 1) }).await;
        }
        assert_eq!(calls.get(), 3);
    }
}
