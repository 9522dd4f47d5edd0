mod broadcast_registry;
mod ws_subscriber;

use crate::{Subscriber, SubscriberState};

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::ws::Utf8Bytes;

/// In-memory subscriber with a scripted backlog and state.
pub(crate) struct RecordingSubscriber {
    state: Mutex<SubscriberState>,
    backlog: AtomicUsize,
    received: Mutex<Vec<String>>,
}

impl RecordingSubscriber {
    pub(crate) fn open() -> Self {
        Self::with_state(SubscriberState::Open)
    }

    pub(crate) fn with_state(state: SubscriberState) -> Self {
        Self {
            state: Mutex::new(state),
            backlog: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_backlog(self, bytes: usize) -> Self {
        self.backlog.store(bytes, Ordering::SeqCst);
        self
    }

    pub(crate) fn set_state(&self, state: SubscriberState) {
        *self.state.lock().unwrap() = state;
    }

    pub(crate) fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

impl Subscriber for RecordingSubscriber {
    fn state(&self) -> SubscriberState {
        *self.state.lock().unwrap()
    }

    fn backlog_bytes(&self) -> usize {
        self.backlog.load(Ordering::SeqCst)
    }

    fn send(&self, message: &Utf8Bytes) {
        self.received.lock().unwrap().push(message.as_str().to_owned());
    }
}
