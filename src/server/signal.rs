// Signal handling module
// Resolves once the process is asked to stop

/// Wait for an interrupt (Unix: SIGINT or SIGTERM)
///
/// The accept loop selects on this future; when it resolves the server
/// shuts down cleanly with exit status 0.
#[cfg(unix)]
pub async fn shutdown() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");
    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }
}

/// Wait for Ctrl+C (non-Unix fallback)
#[cfg(not(unix))]
pub async fn shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}
