use crate::{Subscriber, SubscriberState};

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use axum::extract::ws::{Message, Utf8Bytes};
use futures::{Sink, SinkExt};
use tokio::sync::mpsc;

const CONNECTING: u8 = 0;
const OPEN: u8 = 1;
const CLOSED: u8 = 2;

/// State shared between the registry-facing handle and the writer task.
#[derive(Debug, Default)]
struct Shared {
    state: AtomicU8,
    backlog: AtomicUsize,
}

impl Shared {
    fn close(&self) {
        self.state.store(CLOSED, Ordering::Release);
    }
}

/// WebSocket-backed subscriber.
///
/// Messages go onto an unbounded channel drained by [`WsSubscriber::pump`];
/// the registry's byte threshold is what bounds it. `backlog_bytes` counts
/// bytes enqueued but not yet flushed to the socket.
pub struct WsSubscriber {
    shared: Arc<Shared>,
    tx: mpsc::UnboundedSender<Utf8Bytes>,
}

/// Receiving half handed to the writer task.
pub struct Outbox {
    shared: Arc<Shared>,
    rx: mpsc::UnboundedReceiver<Utf8Bytes>,
}

impl WsSubscriber {
    pub fn new() -> (Arc<Self>, Outbox) {
        let shared = Arc::new(Shared::default());
        let (tx, rx) = mpsc::unbounded_channel();

        let subscriber = Arc::new(Self {
            shared: Arc::clone(&shared),
            tx,
        });

        (subscriber, Outbox { shared, rx })
    }

    /// `Connecting -> Open`; no effect once closed.
    pub fn mark_open(&self) {
        let _ = self.shared.state.compare_exchange(
            CONNECTING,
            OPEN,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn mark_closed(&self) {
        self.shared.close();
    }

    /// Forward queued messages to `sink` until every handle is dropped or the
    /// sink fails, then close the sink.
    ///
    /// The backlog is released only after each message is flushed, so it
    /// tracks what the transport has not yet accepted.
    pub async fn pump<S>(outbox: Outbox, mut sink: S)
    where
        S: Sink<Message> + Unpin,
    {
        let Outbox { shared, mut rx } = outbox;

        while let Some(text) = rx.recv().await {
            let len = text.as_str().len();
            let result = sink.send(Message::Text(text)).await;
            shared.backlog.fetch_sub(len, Ordering::AcqRel);

            if result.is_err() {
                shared.close();
                break;
            }
        }

        let _ = sink.close().await;
    }
}

impl Subscriber for WsSubscriber {
    fn state(&self) -> SubscriberState {
        match self.shared.state.load(Ordering::Acquire) {
            CONNECTING => SubscriberState::Connecting,
            OPEN => SubscriberState::Open,
            _ => SubscriberState::Closed,
        }
    }

    fn backlog_bytes(&self) -> usize {
        self.shared.backlog.load(Ordering::Acquire)
    }

    fn send(&self, message: &Utf8Bytes) {
        let len = message.as_str().len();
        self.shared.backlog.fetch_add(len, Ordering::AcqRel);

        if self.tx.send(message.clone()).is_err() {
            self.shared.backlog.fetch_sub(len, Ordering::AcqRel);
            self.shared.close();
        }
    }
}
