//! Signal handling for graceful shutdown.
//!
//! Supports SIGINT and SIGTERM on Unix and Ctrl+C on Windows.

use horizon_plugin_core::ShutdownState;
use tokio::signal;
use tracing::info;

/// Waits for a termination signal and returns an already-initiated
/// [`ShutdownState`].
pub async fn setup_signal_handlers() -> Result<ShutdownState, Box<dyn std::error::Error>> {
    let shutdown_state = setup_signal_handlers_silent().await?;
    info!("📡 Received shutdown signal - initiating graceful shutdown");
    Ok(shutdown_state)
}

/// Same as [`setup_signal_handlers`] without logging the signal.
pub async fn setup_signal_handlers_silent() -> Result<ShutdownState, Box<dyn std::error::Error>> {
    let shutdown_state = ShutdownState::new();
    wait_for_signal().await?;
    shutdown_state.initiate_shutdown();
    Ok(shutdown_state)
}

async fn wait_for_signal() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => (),
            _ = sigterm.recv() => ()
        }
    }

    #[cfg(windows)]
    signal::ctrl_c().await?;

    Ok(())
}
