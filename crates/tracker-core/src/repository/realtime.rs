//! Realtime channel protocol
//!
//! Phoenix-style frames exchanged over the hosted store's websocket. The
//! transport itself lives with the caller; this module only builds and
//! decodes frames.

use std::cell::Cell;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::change::{Binding, ChangeEvent, ChangeKind};
use crate::config::{ConfigError, RemoteConfig};
use crate::domain::Collection;
use crate::error::StoreError;

pub const PHOENIX_TOPIC: &str = "phoenix";
pub const PROTOCOL_VERSION: &str = "1.0.0";
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);

pub const EVENT_JOIN: &str = "phx_join";
pub const EVENT_LEAVE: &str = "phx_leave";
pub const EVENT_REPLY: &str = "phx_reply";
pub const EVENT_HEARTBEAT: &str = "heartbeat";
pub const EVENT_CHANGES: &str = "postgres_changes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_ref: Option<String>,
}

/// Monotonic message references for one socket
#[derive(Debug, Default)]
pub struct RefCounter {
    next: Cell<u64>,
}

impl RefCounter {
    pub fn next(&self) -> String {
        let value = self.next.get() + 1;
        self.next.set(value);
        value.to_string()
    }
}

pub fn channel_topic(channel: &str) -> String {
    format!("realtime:{}", channel)
}

/// `wss://host/realtime/v1/websocket?apikey=..&vsn=1.0.0`
pub fn socket_url(config: &RemoteConfig) -> Result<Url, ConfigError> {
    let mut url = config.base_url()?;
    let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
    url.set_scheme(scheme).map_err(|_| ConfigError::InvalidUrl {
        url: config.url.clone(),
        reason: "cannot derive websocket scheme".to_string(),
    })?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(["realtime", "v1", "websocket"]);
    }
    url.query_pairs_mut()
        .append_pair("apikey", &config.anon_key)
        .append_pair("vsn", PROTOCOL_VERSION);
    Ok(url)
}

impl Frame {
    pub fn join(channel: &str, schema: &str, bindings: &[Binding], access_token: &str, reference: String) -> Self {
        let changes: Vec<Value> = bindings
            .iter()
            .map(|b| {
                json!({
                    "event": b.filter.as_str(),
                    "schema": schema,
                    "table": b.collection.as_str(),
                })
            })
            .collect();
        Self {
            topic: channel_topic(channel),
            event: EVENT_JOIN.to_string(),
            payload: json!({
                "config": {
                    "broadcast": { "ack": false, "self": false },
                    "presence": { "key": "" },
                    "postgres_changes": changes,
                },
                "access_token": access_token,
            }),
            join_ref: Some(reference.clone()),
            reference: Some(reference),
        }
    }

    pub fn heartbeat(reference: String) -> Self {
        Self {
            topic: PHOENIX_TOPIC.to_string(),
            event: EVENT_HEARTBEAT.to_string(),
            payload: json!({}),
            reference: Some(reference),
            join_ref: None,
        }
    }

    pub fn leave(channel: &str, reference: String) -> Self {
        Self {
            topic: channel_topic(channel),
            event: EVENT_LEAVE.to_string(),
            payload: json!({}),
            reference: Some(reference),
            join_ref: None,
        }
    }

    pub fn encode(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reply status of a `phx_reply` frame (`"ok"` / `"error"`)
    pub fn reply_status(&self) -> Option<&str> {
        if self.event != EVENT_REPLY {
            return None;
        }
        self.payload.get("status").and_then(Value::as_str)
    }

    /// Row change carried by a `postgres_changes` frame
    pub fn change_event(&self) -> Option<ChangeEvent> {
        if self.event != EVENT_CHANGES {
            return None;
        }
        let data = self.payload.get("data")?;
        let kind = data
            .get("type")
            .or_else(|| data.get("eventType"))
            .and_then(Value::as_str)
            .and_then(ChangeKind::parse)?;
        let collection = data
            .get("table")
            .and_then(Value::as_str)
            .and_then(Collection::from_table)?;
        let record_id = ["record", "old_record"]
            .iter()
            .filter_map(|key| data.get(*key))
            .find_map(|record| record.get("id").and_then(Value::as_i64));
        Some(ChangeEvent {
            collection,
            kind,
            record_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_url() {
        let url = socket_url(&RemoteConfig::new("https://demo.example.co", "key")).unwrap();
        assert_eq!(
            url.as_str(),
            "wss://demo.example.co/realtime/v1/websocket?apikey=key&vsn=1.0.0"
        );
    }

    #[test]
    fn test_join_frame_lists_bindings() {
        let frame = Frame::join(
            "realtime-dashboard",
            "public",
            &[Binding::all(Collection::Subjects), Binding::all(Collection::Topics)],
            "key",
            "1".to_string(),
        );
        let encoded: Value = serde_json::from_str(&frame.encode().unwrap()).unwrap();
        assert_eq!(encoded["topic"], "realtime:realtime-dashboard");
        assert_eq!(encoded["event"], "phx_join");
        assert_eq!(encoded["ref"], "1");
        let changes = &encoded["payload"]["config"]["postgres_changes"];
        assert_eq!(changes[0]["event"], "*");
        assert_eq!(changes[1]["table"], "topics");
    }

    #[test]
    fn test_decode_postgres_change() {
        let frame = Frame::decode(
            r#"{"topic":"realtime:realtime-dashboard","event":"postgres_changes","ref":null,
                "payload":{"ids":[1],"data":{"type":"DELETE","table":"topics","schema":"public",
                "old_record":{"id":42}}}}"#,
        )
        .unwrap();
        assert_eq!(
            frame.change_event(),
            Some(ChangeEvent {
                collection: Collection::Topics,
                kind: ChangeKind::Delete,
                record_id: Some(42),
            })
        );
    }

    #[test]
    fn test_unrelated_frames_carry_no_change() {
        let reply = Frame::decode(
            r#"{"topic":"phoenix","event":"phx_reply","ref":"2","payload":{"status":"ok","response":{}}}"#,
        )
        .unwrap();
        assert_eq!(reply.reply_status(), Some("ok"));
        assert!(reply.change_event().is_none());

        let refs = RefCounter::default();
        assert_eq!(refs.next(), "1");
        assert_eq!(Frame::heartbeat(refs.next()).reference.as_deref(), Some("2"));
    }
}
