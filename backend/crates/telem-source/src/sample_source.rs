use crate::SampleSink;

use telem_core::ShutdownGuard;

use async_trait::async_trait;

/// Produces samples and pushes them into the hub's sink until shutdown.
///
/// Failures are handled inside `run`: a source logs, marks itself degraded,
/// and never takes the process down.
#[async_trait]
pub trait SampleSource: Send {
    fn name(&self) -> &'static str;

    async fn run(self: Box<Self>, sink: SampleSink, shutdown: ShutdownGuard);
}
