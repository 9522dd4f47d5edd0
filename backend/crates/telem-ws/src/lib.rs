pub mod app_state;
pub mod broadcast_registry;
pub mod connection_id;
pub mod error;
pub mod hub_settings;
pub mod metrics;
pub mod outbound_message;
pub mod subscriber;
pub mod telemetry_hub;
pub mod web_socket_connection;
pub mod ws_subscriber;

pub use app_state::{AppState, handler};
pub use broadcast_registry::{BroadcastRegistry, FanoutOutcome};
pub use connection_id::ConnectionId;
pub use error::{Result, WsError};
pub use hub_settings::HubSettings;
pub use metrics::Metrics;
pub use outbound_message::OutboundMessage;
pub use subscriber::{Subscriber, SubscriberState};
pub use telemetry_hub::{HubStats, TelemetryHub};
pub use web_socket_connection::WebSocketConnection;
pub use ws_subscriber::WsSubscriber;

#[cfg(test)]
mod tests;
