use anyhow::Result;
use tokio::signal;

/// Signals that can trigger shutdown.
enum ShutdownSignal {
    CtrlC,
    #[cfg(unix)]
    Sigterm,
}

/// Wait for termination signals (Ctrl+C, SIGTERM).
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    let signal = tokio::select! {
        result = wait_ctrl_c() => result?,
        result = wait_sigterm() => result?,
    };

    let name = match signal {
        ShutdownSignal::CtrlC => "ctrl_c",
        #[cfg(unix)]
        ShutdownSignal::Sigterm => "sigterm",
    };
    tracing::info!(signal = name, "Shutdown signal received, draining connections");
    Ok(())
}

async fn wait_ctrl_c() -> Result<ShutdownSignal> {
    signal::ctrl_c().await.map_err(|e| {
        tracing::error!(%e, "Error handling Ctrl+C signal");
        e
    })?;
    Ok(ShutdownSignal::CtrlC)
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    let mut signal_handler =
        signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(|e| {
            tracing::error!(%e, "Failed to install SIGTERM handler");
            e
        })?;
    signal_handler.recv().await;
    Ok(ShutdownSignal::Sigterm)
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    std::future::pending::<Result<ShutdownSignal>>().await
}
