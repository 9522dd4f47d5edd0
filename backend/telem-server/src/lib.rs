pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod request_logging;
pub mod routes;


pub use crate::error::{Result as ServerResult, ServerError};
pub use crate::health::HealthResponse;
pub use crate::routes::build_router;
