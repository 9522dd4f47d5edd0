use axum::extract::ws::Utf8Bytes;

/// Per-connection lifecycle: `Connecting -> Open -> Closed` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberState {
    Connecting,
    Open,
    Closed,
}

impl SubscriberState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// One live viewer as seen by the broadcast registry.
///
/// Every method must return without waiting: the registry calls them while
/// holding the hub lock on the ingestion path.
pub trait Subscriber: Send + Sync {
    fn state(&self) -> SubscriberState;

    /// Bytes queued for this subscriber but not yet written to its transport
    fn backlog_bytes(&self) -> usize;

    /// Enqueue one encoded message. A subscriber whose transport is gone
    /// transitions itself to `Closed` instead of failing.
    fn send(&self, message: &Utf8Bytes);
}
