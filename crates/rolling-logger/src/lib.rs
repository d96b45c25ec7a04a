//! Rolling Logger
//!
//! A `tracing` layer that formats every event on one line, keeps the last
//! `capacity` lines in a circular buffer and forwards each line to the
//! browser console (wasm) or stderr (native). `log` records are bridged in,
//! so crates logging through the `log` facade end up here too.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Layer;

static RECENT: OnceLock<Arc<RecentLogs>> = OnceLock::new();

/// Bounded buffer of formatted lines, oldest first
pub struct RecentLogs {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl RecentLogs {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        let Ok(mut lines) = self.lines.lock() else { return };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Collects the message and, for bridged `log` records, the real target
#[derive(Default)]
struct LineVisitor {
    message: String,
    target: Option<String>,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message.push_str(value),
            "log.target" => self.target = Some(value.to_string()),
            "log.module_path" | "log.file" | "log.line" => {}
            name => {
                let _ = write!(self.fields, " {}={}", name, value);
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => {
                let _ = write!(self.message, "{:?}", value);
            }
            "log.target" | "log.module_path" | "log.file" | "log.line" => {}
            name => {
                let _ = write!(self.fields, " {}={:?}", name, value);
            }
        }
    }
}

pub struct RingLayer {
    app_name: String,
    recent: Arc<RecentLogs>,
    echo: bool,
}

impl RingLayer {
    pub fn new(app_name: &str, recent: Arc<RecentLogs>) -> Self {
        Self {
            app_name: app_name.to_string(),
            recent,
            echo: true,
        }
    }

    /// Buffer only, no console or stderr output
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    fn format(&self, level: &Level, target: &str, visitor: &LineVisitor) -> String {
        format!(
            "{} {:<5} [{}] {}: {}{}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            level,
            self.app_name,
            target,
            visitor.message,
            visitor.fields
        )
    }
}

impl<S: Subscriber> Layer<S> for RingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        let target = visitor.target.clone();
        let line = self.format(
            metadata.level(),
            target.as_deref().unwrap_or_else(|| metadata.target()),
            &visitor,
        );
        if self.echo {
            sink::write(metadata.level(), &line);
        }
        self.recent.push(line);
    }
}

#[cfg(target_arch = "wasm32")]
mod sink {
    use tracing::Level;
    use wasm_bindgen::JsValue;

    pub fn write(level: &Level, line: &str) {
        let value = JsValue::from_str(line);
        match *level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            Level::INFO => web_sys::console::info_1(&value),
            _ => web_sys::console::debug_1(&value),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod sink {
    use tracing::Level;

    pub fn write(_level: &Level, line: &str) {
        eprintln!("{}", line);
    }
}

/// Installs the global subscriber and the `log` bridge. Debug builds log
/// from DEBUG, release builds from INFO. Fails if a subscriber is already set.
pub fn init_logger(app_name: &str, capacity: usize) -> Result<(), TryInitError> {
    let recent = RECENT
        .get_or_init(|| Arc::new(RecentLogs::new(capacity)))
        .clone();
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(RingLayer::new(app_name, recent).with_filter(level))
        .try_init()?;
    log::info!("{} logger ready (keeping {} lines)", app_name, capacity);
    Ok(())
}

/// Lines buffered since [`init_logger`], oldest first
pub fn recent() -> Vec<String> {
    RECENT.get().map(|recent| recent.lines()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(capacity: usize, body: impl FnOnce()) -> Vec<String> {
        let recent = Arc::new(RecentLogs::new(capacity));
        let subscriber =
            tracing_subscriber::registry().with(RingLayer::new("test", recent.clone()).quiet());
        tracing::subscriber::with_default(subscriber, body);
        recent.lines()
    }

    #[test]
    fn test_formats_level_target_and_fields() {
        let lines = capture(8, || {
            tracing::warn!(target: "tracker", attempt = 2, "refresh failed");
        });
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.contains("WARN  [test] tracker: refresh failed attempt=2"), "{}", line);
    }

    #[test]
    fn test_buffer_drops_oldest() {
        let lines = capture(2, || {
            tracing::info!("one");
            tracing::info!("two");
            tracing::info!("three");
        });
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("two"));
        assert!(lines[1].ends_with("three"));
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let recent = RecentLogs::new(0);
        recent.push("a".into());
        recent.push("b".into());
        assert_eq!(recent.lines(), vec!["b".to_string()]);
    }

    #[test]
    fn test_recent_is_empty_before_init() {
        if RECENT.get().is_none() {
            assert!(recent().is_empty());
        }
    }
}
