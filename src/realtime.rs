//! Realtime Transport
//!
//! One browser WebSocket per subscription, speaking the channel protocol
//! from `tracker_core::repository::realtime`.

use std::rc::Rc;

use leptos::task::spawn_local;
use tracker_core::lifecycle::{Subscription, TimerHandle};
use tracker_core::repository::realtime::{self, Frame, RefCounter, HEARTBEAT_INTERVAL};
use tracker_core::repository::{Binding, ChangeCallback, ChangeFeed};
use tracker_core::timer::TimerBackend;
use tracker_core::RemoteConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

/// [`ChangeFeed`] backed by the hosted store's realtime endpoint
pub struct SocketFeed {
    config: RemoteConfig,
    timers: Rc<dyn TimerBackend>,
}

impl SocketFeed {
    pub fn new(config: RemoteConfig, timers: Rc<dyn TimerBackend>) -> Self {
        Self { config, timers }
    }
}

impl ChangeFeed for SocketFeed {
    fn subscribe(&self, channel: &str, bindings: Vec<Binding>, callback: ChangeCallback) -> Subscription {
        match Channel::open(&self.config, channel, bindings, callback, self.timers.as_ref()) {
            Ok(channel) => Subscription::new(move || channel.close()),
            Err(err) => {
                log::error!("[REALTIME] cannot open channel {}: {}", channel, err);
                Subscription::noop()
            }
        }
    }
}

struct Handlers {
    _open: Closure<dyn FnMut()>,
    _message: Closure<dyn FnMut(MessageEvent)>,
    _close: Closure<dyn FnMut(CloseEvent)>,
}

struct Channel {
    name: String,
    socket: WebSocket,
    refs: Rc<RefCounter>,
    heartbeat: TimerHandle,
    handlers: Handlers,
}

fn send(socket: &WebSocket, frame: &Frame) {
    let text = match frame.encode() {
        Ok(text) => text,
        Err(err) => {
            log::error!("[REALTIME] encode failed: {}", err);
            return;
        }
    };
    if let Err(err) = socket.send_with_str(&text) {
        log::warn!("[REALTIME] send {} failed: {:?}", frame.event, err);
    }
}

impl Channel {
    fn open(
        config: &RemoteConfig,
        name: &str,
        bindings: Vec<Binding>,
        callback: ChangeCallback,
        timers: &dyn TimerBackend,
    ) -> Result<Self, String> {
        let url = realtime::socket_url(config).map_err(|e| e.to_string())?;
        let socket = WebSocket::new(url.as_str()).map_err(|e| format!("{:?}", e))?;
        let refs = Rc::new(RefCounter::default());

        let join = Frame::join(name, &config.schema, &bindings, &config.anon_key, refs.next());
        let on_open = {
            let socket = socket.clone();
            Closure::<dyn FnMut()>::new(move || {
                log::debug!("[REALTIME] joining {}", join.topic);
                send(&socket, &join);
            })
        };

        let on_message = {
            let name = name.to_string();
            Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
                let Some(text) = ev.data().as_string() else { return };
                let frame = match Frame::decode(&text) {
                    Ok(frame) => frame,
                    Err(err) => {
                        log::warn!("[REALTIME] ignoring frame: {}", err);
                        return;
                    }
                };
                if let Some(status) = frame.reply_status() {
                    if status != "ok" {
                        log::warn!("[REALTIME] {} replied {}: {}", name, status, frame.payload);
                    }
                }
                if let Some(event) = frame.change_event() {
                    if bindings.iter().any(|b| b.matches(&event)) {
                        callback(&event);
                    }
                }
            })
        };

        let on_close = {
            let name = name.to_string();
            Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
                log::info!("[REALTIME] {} closed (code {})", name, ev.code());
            })
        };

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let heartbeat = {
            let socket = socket.clone();
            let refs = refs.clone();
            timers.interval(
                HEARTBEAT_INTERVAL,
                Box::new(move || {
                    if socket.ready_state() == WebSocket::OPEN {
                        send(&socket, &Frame::heartbeat(refs.next()));
                    }
                }),
            )
        };

        Ok(Self {
            name: name.to_string(),
            socket,
            refs,
            heartbeat,
            handlers: Handlers {
                _open: on_open,
                _message: on_message,
                _close: on_close,
            },
        })
    }

    fn close(self) {
        let Channel {
            name,
            socket,
            refs,
            heartbeat,
            handlers,
        } = self;
        drop(heartbeat);
        if socket.ready_state() == WebSocket::OPEN {
            send(&socket, &Frame::leave(&name, refs.next()));
        }
        socket.set_onopen(None);
        socket.set_onmessage(None);
        socket.set_onclose(None);
        if let Err(err) = socket.close() {
            log::warn!("[REALTIME] close {} failed: {:?}", name, err);
        }
        // Closing may happen inside a message handler; free them afterwards.
        spawn_local(async move { drop(handlers) });
        log::debug!("[REALTIME] left {}", name);
    }
}
