//! Backend Wiring
//!
//! Builds the remote store, the push feed and the view models from the
//! startup configuration. Without a configured store everything runs on an
//! in-memory store.

use std::rc::Rc;

use tracker_core::config::{
    ENV_NOTICE_TTL_MS, ENV_PAUSE_SECS, ENV_REFRESH_SECS, ENV_STORE_KEY, ENV_STORE_SCHEMA, ENV_STORE_URL,
};
use tracker_core::domain::{Notice, Product};
use tracker_core::repository::{MemoryStore, RestStore, SharedFeed, SharedStore};
use tracker_core::sync::{EntityList, Notifier, SubjectBoard, TopicBoard};
use tracker_core::timer::{Spawn, TimerBackend};
use tracker_core::{RemoteConfig, TrackerConfig};

use crate::realtime::SocketFeed;
use crate::timers::{GlooTimers, LeptosSpawner};

/// Values baked in at build time (`TRACKER_STORE_URL=... trunk build`)
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_STORE_URL => option_env!("TRACKER_STORE_URL"),
        ENV_STORE_KEY => option_env!("TRACKER_STORE_KEY"),
        ENV_STORE_SCHEMA => option_env!("TRACKER_STORE_SCHEMA"),
        ENV_REFRESH_SECS => option_env!("TRACKER_REFRESH_SECS"),
        ENV_PAUSE_SECS => option_env!("TRACKER_PAUSE_SECS"),
        ENV_NOTICE_TTL_MS => option_env!("TRACKER_NOTICE_TTL_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

/// Build-time configuration; falls back to offline defaults when invalid
pub fn load_config() -> (TrackerConfig, Option<Notice>) {
    match TrackerConfig::from_lookup(build_env) {
        Ok(config) => (config, None),
        Err(err) => {
            log::error!("[CONFIG] {}; running offline", err);
            (
                TrackerConfig::default(),
                Some(Notice::warning(format!("Invalid configuration ({}). Running offline.", err))),
            )
        }
    }
}

/// Everything the components talk to
pub struct Services {
    pub config: TrackerConfig,
    pub store: SharedStore,
    pub feed: SharedFeed,
    pub timers: Rc<dyn TimerBackend>,
    pub spawner: Rc<dyn Spawn>,
    pub subjects: SubjectBoard,
    pub topics: TopicBoard,
    pub products: EntityList<Product>,
}

fn remote_backend(remote: &RemoteConfig, timers: Rc<dyn TimerBackend>) -> Result<(SharedStore, SharedFeed), String> {
    let store = RestStore::new(remote).map_err(|e| e.to_string())?;
    let feed = SocketFeed::new(remote.clone(), timers);
    Ok((Rc::new(store), Rc::new(feed)))
}

fn offline_backend() -> (SharedStore, SharedFeed) {
    let memory = Rc::new(MemoryStore::new());
    (memory.clone(), memory)
}

impl Services {
    pub fn connect(config: TrackerConfig, notifier: Notifier) -> Self {
        let timers: Rc<dyn TimerBackend> = Rc::new(GlooTimers);
        let (store, feed) = match &config.remote {
            Some(remote) => match remote_backend(remote, timers.clone()) {
                Ok(backend) => {
                    log::info!("[BACKEND] using remote store at {}", remote.url);
                    backend
                }
                Err(err) => {
                    log::error!("[BACKEND] remote store unavailable: {}", err);
                    notifier(Notice::warning("Remote store unavailable. Running offline."));
                    offline_backend()
                }
            },
            None => {
                log::info!("[BACKEND] no remote store configured, running offline");
                offline_backend()
            }
        };

        Self {
            subjects: SubjectBoard::new(store.clone(), notifier.clone()),
            topics: TopicBoard::new(store.clone(), notifier.clone()),
            products: EntityList::new(store.clone(), notifier),
            config,
            store,
            feed,
            timers,
            spawner: Rc::new(LeptosSpawner),
        }
    }
}
