use tokio::signal;
use super::AdminStore;

/// Resets the roster to its header row when dropped.
///
/// Held by `main` for the life of the server, so the file is cleared on a
/// normal return, an error return, and while unwinding from a panic.
pub struct ResetGuard {
    store: AdminStore,
}

impl ResetGuard {
    pub(super) fn new(store: AdminStore) -> Self {
        Self { store }
    }
}

impl Drop for ResetGuard {
    fn drop(&mut self) {
        tracing::info!("Clearing {} cache...", self.store.path().display());
        if let Err(e) = self.store.reset() {
            tracing::error!("Failed to clear roster {}: {}", self.store.path().display(), e);
        }
    }
}

/// Completes on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
