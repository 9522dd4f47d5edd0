use crate::Result as WsResult;

use telem_core::Sample;

use axum::extract::ws::Utf8Bytes;
use serde::Serialize;

/// Real-time message pushed to subscribers, one text frame per sample.
///
/// Serializes as `{"type":"sample","t":<int>,"v":<number>}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Sample(Sample),
}

impl OutboundMessage {
    /// Encode once; the returned frame payload is cheap to clone per subscriber.
    #[track_caller]
    pub fn encode(&self) -> WsResult<Utf8Bytes> {
        Ok(Utf8Bytes::from(serde_json::to_string(self)?))
    }
}
