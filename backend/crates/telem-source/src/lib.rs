pub mod error;
pub mod mock_source;
pub mod sample_sink;
pub mod sample_source;
pub mod serial_source;
pub mod source_factory;
pub mod source_health;

pub use error::{Result as SourceResult, SourceError};
pub use mock_source::MockSource;
pub use sample_sink::SampleSink;
pub use sample_source::SampleSource;
pub use serial_source::SerialSource;
pub use source_factory::build_source;
pub use source_health::{SourceHealth, SourceStatus};
