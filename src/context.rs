//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_core::domain::Notice;
use tracker_core::sync::Notifier;
use tracker_core::TrackerError;

use crate::backend::Services;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// View models and store; single-threaded, so kept in local storage
    services: StoredValue<Option<Rc<Services>>, LocalStorage>,
    /// Currently shown notice - read
    pub notice: ReadSignal<Option<Notice>>,
    /// Currently shown notice - write
    set_notice: WriteSignal<Option<Notice>>,
    /// Bumped per notice so an old timeout never hides a newer one
    notice_seq: StoredValue<u64>,
    notice_ttl_ms: u32,
}

impl AppContext {
    pub fn new(notice: (ReadSignal<Option<Notice>>, WriteSignal<Option<Notice>>), notice_ttl_ms: u32) -> Self {
        Self {
            services: StoredValue::new_local(None),
            notice: notice.0,
            set_notice: notice.1,
            notice_seq: StoredValue::new(0),
            notice_ttl_ms,
        }
    }

    pub fn install(&self, services: Services) {
        self.services.set_value(Some(Rc::new(services)));
    }

    pub fn services(&self) -> Rc<Services> {
        self.services
            .get_value()
            .expect("services are installed before the app mounts")
    }

    /// Shows `notice`, replacing any current one, and hides it after the TTL
    pub fn notify(&self, notice: Notice) {
        let seq = self.notice_seq.get_value() + 1;
        self.notice_seq.set_value(seq);
        self.set_notice.set(Some(notice));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(ctx.notice_ttl_ms).await;
            if ctx.notice_seq.try_get_value() == Some(seq) {
                ctx.set_notice.set(None);
            }
        });
    }

    pub fn dismiss(&self) {
        self.set_notice.set(None);
    }

    pub fn notifier(&self) -> Notifier {
        let ctx = *self;
        Rc::new(move |notice| ctx.notify(notice))
    }

    /// Logs a view-model failure; the view model has already notified
    pub fn report(&self, action: &str, result: Result<(), TrackerError>) {
        match result {
            Ok(()) | Err(TrackerError::Cancelled) => {}
            Err(err) => log::warn!("[UI] {} failed: {}", action, err),
        }
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
