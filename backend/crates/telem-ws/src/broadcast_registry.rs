use crate::{ConnectionId, OutboundMessage, Result as WsResult, Subscriber, SubscriberState};

use telem_core::Sample;

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, trace};

/// Per-call result of a fanout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutOutcome {
    pub delivered: usize,
    /// Withheld from subscribers over the backlog threshold
    pub dropped: usize,
    /// Subscribers not open (still connecting, or closed and pruned)
    pub skipped: usize,
}

/// Open subscriber connections and the drop-new-message backpressure policy.
///
/// Not synchronized on its own; the hub owns it behind its state lock.
pub struct BroadcastRegistry {
    subscribers: HashMap<ConnectionId, Arc<dyn Subscriber>>,
    backlog_threshold: usize,
}

impl BroadcastRegistry {
    pub fn new(backlog_threshold: usize) -> Self {
        Self {
            subscribers: HashMap::new(),
            backlog_threshold,
        }
    }

    pub fn register(&mut self, connection_id: ConnectionId, subscriber: Arc<dyn Subscriber>) {
        self.subscribers.insert(connection_id, subscriber);
        info!(
            "Registered subscriber {connection_id} ({} total)",
            self.subscribers.len()
        );
    }

    /// Returns whether the connection was still registered.
    pub fn unregister(&mut self, connection_id: ConnectionId) -> bool {
        let removed = self.subscribers.remove(&connection_id).is_some();
        if removed {
            info!(
                "Unregistered subscriber {connection_id} ({} total remaining)",
                self.subscribers.len()
            );
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver one sample to every open subscriber without waiting on any of them.
    ///
    /// A subscriber whose backlog exceeds the threshold misses this sample;
    /// nothing is queued for it and nothing is retried.
    pub fn fanout(&mut self, sample: &Sample) -> WsResult<FanoutOutcome> {
        let mut outcome = FanoutOutcome::default();
        if self.subscribers.is_empty() {
            return Ok(outcome);
        }

        let message = OutboundMessage::Sample(*sample).encode()?;
        let mut closed = Vec::new();

        for (connection_id, subscriber) in &self.subscribers {
            let state = subscriber.state();
            if state != SubscriberState::Open {
                trace!("Skipping subscriber {connection_id} ({})", state.as_str());
                outcome.skipped += 1;
                if state == SubscriberState::Closed {
                    closed.push(*connection_id);
                }
                continue;
            }

            let backlog = subscriber.backlog_bytes();
            if backlog > self.backlog_threshold {
                debug!(
                    "Dropping sample t={} for slow subscriber {connection_id} (backlog {backlog}B)",
                    sample.t
                );
                outcome.dropped += 1;
                continue;
            }

            subscriber.send(&message);
            outcome.delivered += 1;
        }

        for connection_id in closed {
            self.unregister(connection_id);
        }

        Ok(outcome)
    }
}
