//! Mounted dashboard
//!
//! Wires the data fetch to its three triggers (mount, poll timer, push
//! notifications) and reports results to a [`DashboardSink`]. Everything is
//! released when the [`DashboardHandle`] is unmounted or dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::controller::{RefreshController, RefreshStatus};
use super::stats::{summarize, SubjectSummary};
use crate::config::DashboardSettings;
use crate::domain::{Collection, Subject, Topic};
use crate::lifecycle::Subscription;
use crate::repository::{Binding, ChangeFeed, Query, Repository, SharedStore, Table};
use crate::sync::RefreshQueue;
use crate::timer::{Spawn, TimerBackend};

pub const CHANNEL: &str = "realtime-dashboard";
pub const LOAD_FAILURE: &str = "Failed to load data.";

/// Receives dashboard updates; every method defaults to a no-op
pub trait DashboardSink {
    fn loading(&self, _loading: bool) {}
    fn summaries(&self, _summaries: &[SubjectSummary]) {}
    /// `None` clears a previous error
    fn error(&self, _message: Option<&str>) {}
    fn status(&self, _status: RefreshStatus) {}
}

struct DashboardState {
    subjects: Table<Subject>,
    topics: Table<Topic>,
    sink: Rc<dyn DashboardSink>,
    spawner: Rc<dyn Spawn>,
    queue: RefreshQueue,
    controller: RefreshController,
    subscription: RefCell<Option<Subscription>>,
    live: Cell<bool>,
    loaded: Cell<bool>,
    summaries: RefCell<Vec<SubjectSummary>>,
    error: RefCell<Option<String>>,
}

impl DashboardState {
    /// Schedules a fetch through the coalescing queue
    fn trigger(self: &Rc<Self>) {
        if !self.live.get() || self.controller.is_paused() {
            return;
        }
        let this = Rc::clone(self);
        self.spawner.spawn(Box::pin(async move {
            this.queue.run(|| this.fetch()).await;
        }));
    }

    async fn fetch(&self) {
        if !self.live.get() || self.controller.is_paused() {
            return;
        }
        let first = !self.loaded.get();
        if first {
            self.sink.loading(true);
        }

        let result = async {
            let subjects = self.subjects.list(&Query::all()).await?;
            let topics = self.topics.list(&Query::all()).await?;
            Ok::<_, crate::error::StoreError>((subjects, topics))
        }
        .await;

        if !self.live.get() {
            return;
        }
        match result {
            Ok((subjects, topics)) => {
                let summaries = summarize(&subjects, &topics, &mut rand::thread_rng());
                log::debug!("dashboard refreshed: {} subjects, {} topics", subjects.len(), topics.len());
                self.loaded.set(true);
                if self.error.borrow_mut().take().is_some() {
                    self.sink.error(None);
                }
                *self.summaries.borrow_mut() = summaries.clone();
                self.sink.summaries(&summaries);
            }
            Err(err) => {
                log::error!("dashboard load failed: {}", err);
                *self.error.borrow_mut() = Some(LOAD_FAILURE.to_string());
                self.sink.error(Some(LOAD_FAILURE));
            }
        }
        if first {
            self.sink.loading(false);
        }
    }

    fn teardown(&self) {
        if !self.live.replace(false) {
            return;
        }
        self.controller.stop();
        let subscription = self.subscription.borrow_mut().take();
        drop(subscription);
        log::debug!("dashboard unmounted");
    }
}

pub struct Dashboard;

impl Dashboard {
    /// Fetches immediately, then on every poll tick and every change to
    /// subjects or topics
    pub fn mount(
        store: SharedStore,
        feed: &dyn ChangeFeed,
        timers: Rc<dyn TimerBackend>,
        spawner: Rc<dyn Spawn>,
        settings: DashboardSettings,
        sink: Rc<dyn DashboardSink>,
    ) -> DashboardHandle {
        let state = Rc::new_cyclic(|weak: &Weak<DashboardState>| {
            let on_poll = weak.clone();
            let controller = RefreshController::new(timers, settings, move || {
                if let Some(state) = on_poll.upgrade() {
                    state.trigger();
                }
            });
            let on_status = weak.clone();
            controller.on_status(move |status| {
                if let Some(state) = on_status.upgrade() {
                    if state.live.get() {
                        state.sink.status(status);
                    }
                }
            });
            DashboardState {
                subjects: Table::new(store.clone()),
                topics: Table::new(store),
                sink,
                spawner,
                queue: RefreshQueue::new(),
                controller,
                subscription: RefCell::new(None),
                live: Cell::new(true),
                loaded: Cell::new(false),
                summaries: RefCell::new(Vec::new()),
                error: RefCell::new(None),
            }
        });

        let on_change = Rc::downgrade(&state);
        let subscription = feed.subscribe(
            CHANNEL,
            vec![Binding::all(Collection::Subjects), Binding::all(Collection::Topics)],
            Rc::new(move |event| {
                log::debug!("dashboard change: {:?} on {}", event.kind, event.collection);
                if let Some(state) = on_change.upgrade() {
                    state.trigger();
                }
            }),
        );
        *state.subscription.borrow_mut() = Some(subscription);

        state.controller.start();
        state.trigger();
        DashboardHandle { state }
    }
}

/// Control surface of a mounted dashboard; dropping it unmounts
pub struct DashboardHandle {
    state: Rc<DashboardState>,
}

impl DashboardHandle {
    pub fn pause(&self) {
        self.state.controller.pause();
    }

    pub fn resume(&self) {
        self.state.controller.resume();
    }

    pub fn status(&self) -> RefreshStatus {
        self.state.controller.status()
    }

    pub fn seconds_left(&self) -> u32 {
        self.state.controller.seconds_left()
    }

    pub fn summaries(&self) -> Vec<SubjectSummary> {
        self.state.summaries.borrow().clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.error.borrow().clone()
    }

    pub fn refresh_now(&self) {
        self.state.trigger();
    }

    pub fn is_mounted(&self) -> bool {
        self.state.live.get()
    }

    /// Cancels both timers and the push subscription
    pub fn unmount(&self) {
        self.state.teardown();
    }
}

impl Drop for DashboardHandle {
    fn drop(&mut self) {
        self.state.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Tier;
    use crate::domain::{NewSubject, NewTopic};
    use crate::repository::MemoryStore;
    use crate::testing::{QueueSpawner, RecordingStore, StoreOp};
    use crate::timer::ManualClock;
    use crate::error::StoreError;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        loads: Cell<usize>,
        loading: RefCell<Vec<bool>>,
        last: RefCell<Vec<SubjectSummary>>,
        errors: RefCell<Vec<Option<String>>>,
        statuses: RefCell<Vec<RefreshStatus>>,
    }

    impl Recorder {
        fn calls(&self) -> usize {
            self.loads.get() + self.loading.borrow().len() + self.errors.borrow().len() + self.statuses.borrow().len()
        }
    }

    impl DashboardSink for Recorder {
        fn loading(&self, loading: bool) {
            self.loading.borrow_mut().push(loading);
        }

        fn summaries(&self, summaries: &[SubjectSummary]) {
            self.loads.set(self.loads.get() + 1);
            *self.last.borrow_mut() = summaries.to_vec();
        }

        fn error(&self, message: Option<&str>) {
            self.errors.borrow_mut().push(message.map(str::to_string));
        }

        fn status(&self, status: RefreshStatus) {
            self.statuses.borrow_mut().push(status);
        }
    }

    struct Fixture {
        store: Rc<RecordingStore>,
        clock: ManualClock,
        spawner: QueueSpawner,
        sink: Rc<Recorder>,
    }

    impl Fixture {
        async fn new() -> Self {
            let store = Rc::new(RecordingStore::new(MemoryStore::new()));
            let subjects = Table::<Subject>::new(store.clone());
            let topics = Table::<Topic>::new(store.clone());
            let algebra = subjects.create(&NewSubject::new("Algebra")).await.unwrap().id;
            topics
                .create(&NewTopic::new(algebra, "Linear Equations", "Solve for x"))
                .await
                .unwrap();
            let matrices = topics
                .create(&NewTopic::new(algebra, "Matrices", "Row reduction"))
                .await
                .unwrap()
                .id;
            topics.update(matrices, &serde_json::json!({ "completed": true })).await.unwrap();
            store.reset_calls();
            Self {
                store,
                clock: ManualClock::new(),
                spawner: QueueSpawner::default(),
                sink: Rc::new(Recorder::default()),
            }
        }

        fn mount(&self) -> DashboardHandle {
            Dashboard::mount(
                self.store.clone(),
                self.store.as_ref(),
                Rc::new(self.clock.clone()),
                Rc::new(self.spawner.clone()),
                DashboardSettings::default(),
                self.sink.clone(),
            )
        }
    }

    #[tokio::test]
    async fn test_mount_loads_algebra_summary() {
        let fx = Fixture::new().await;
        let handle = fx.mount();
        fx.spawner.drain().await;

        let summaries = handle.summaries();
        assert_eq!(summaries.len(), 1);
        let algebra = &summaries[0];
        assert_eq!(algebra.name, "Algebra");
        assert_eq!((algebra.completed, algebra.pending, algebra.total), (1, 1, 2));
        assert_eq!(algebra.completion_rate, 50.0);
        assert_eq!(algebra.tier(), Tier::Medium);
        assert_eq!(*fx.sink.loading.borrow(), vec![true, false]);
        assert_eq!(fx.store.inner().subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_poll_and_push_trigger_fetches() {
        let fx = Fixture::new().await;
        let _handle = fx.mount();
        fx.spawner.drain().await;
        assert_eq!(fx.sink.loads.get(), 1);

        fx.clock.advance(Duration::from_secs(5));
        fx.spawner.drain().await;
        assert_eq!(fx.sink.loads.get(), 2);

        Table::<Subject>::new(fx.store.clone())
            .create(&NewSubject::new("Physics"))
            .await
            .unwrap();
        fx.spawner.drain().await;
        assert_eq!(fx.sink.loads.get(), 3);
        assert_eq!(fx.sink.last.borrow().len(), 2);
        // Only the first load shows the spinner
        assert_eq!(fx.sink.loading.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_pause_skips_fetches_until_auto_resume() {
        let fx = Fixture::new().await;
        let handle = fx.mount();
        fx.spawner.drain().await;
        fx.store.reset_calls();

        handle.pause();
        assert_eq!(handle.status(), RefreshStatus::Paused { seconds_left: 60 });
        Table::<Subject>::new(fx.store.clone())
            .create(&NewSubject::new("Physics"))
            .await
            .unwrap();
        fx.clock.advance(Duration::from_secs(30));
        fx.spawner.drain().await;
        assert_eq!(fx.store.calls(StoreOp::Select), 0);
        assert_eq!(handle.seconds_left(), 30);

        fx.clock.advance(Duration::from_secs(30));
        assert_eq!(handle.status(), RefreshStatus::Running);
        assert_eq!(handle.seconds_left(), 60);

        fx.clock.advance(Duration::from_secs(5));
        fx.spawner.drain().await;
        assert_eq!(fx.store.calls(StoreOp::Select), 2);
        assert_eq!(*fx.sink.statuses.borrow().last().unwrap(), RefreshStatus::Running);
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_success_clears_it() {
        let fx = Fixture::new().await;
        fx.store.fail_next_with(StoreOp::Select, StoreError::Network("offline".into()));
        let handle = fx.mount();
        fx.spawner.drain().await;
        assert_eq!(handle.error().as_deref(), Some(LOAD_FAILURE));
        assert!(handle.summaries().is_empty());

        handle.refresh_now();
        fx.spawner.drain().await;
        assert_eq!(handle.error(), None);
        assert_eq!(*fx.sink.errors.borrow(), vec![Some(LOAD_FAILURE.to_string()), None]);
    }

    #[tokio::test]
    async fn test_unmount_releases_everything() {
        let fx = Fixture::new().await;
        let handle = fx.mount();
        fx.spawner.drain().await;
        handle.pause();

        handle.unmount();
        handle.unmount();
        assert!(!handle.is_mounted());
        assert_eq!(fx.clock.active_timers(), 0);
        assert_eq!(fx.store.inner().subscriber_count(), 0);

        let before = fx.sink.calls();
        Table::<Subject>::new(fx.store.clone())
            .create(&NewSubject::new("Physics"))
            .await
            .unwrap();
        fx.clock.advance(Duration::from_secs(120));
        fx.spawner.drain().await;
        assert_eq!(fx.sink.calls(), before);
    }

    #[tokio::test]
    async fn test_fetch_in_flight_after_unmount_is_discarded() {
        let fx = Fixture::new().await;
        let handle = fx.mount();
        assert_eq!(fx.spawner.pending(), 1);
        drop(handle);
        fx.spawner.drain().await;
        assert_eq!(fx.sink.loads.get(), 0);
        assert_eq!(fx.store.inner().subscriber_count(), 0);
    }
}
