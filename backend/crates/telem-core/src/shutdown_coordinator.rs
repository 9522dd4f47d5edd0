use crate::ShutdownGuard;

use tokio::sync::watch;

/// Graceful shutdown coordinator
///
/// Backed by a watch channel so guards created after the signal still observe it.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self { shutdown_tx }
    }

    /// Get a receiver for shutdown notifications
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown (call this from signal handler)
    pub fn shutdown(&self) {
        log::info!("Shutdown signal received, notifying all subsystems");
        self.shutdown_tx.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Convenience method to create a guard (used in tasks and handlers)
    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
