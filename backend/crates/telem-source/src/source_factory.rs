use crate::{MockSource, SampleSource, SerialSource, SourceHealth};

use telem_config::{SourceConfig, SourceKind};

/// Build the one source this process will run.
pub fn build_source(config: &SourceConfig, health: SourceHealth) -> Box<dyn SampleSource> {
    match config.kind {
        SourceKind::Serial => Box::new(SerialSource::new(&config.serial, health)),
        SourceKind::Mock => Box::new(MockSource::new(&config.mock, health)),
    }
}
