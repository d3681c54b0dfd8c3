//! Ctrl-C / SIGTERM handling.

use log::{info, warn};
use tokio_util::sync::CancellationToken;

/// Installs SIGTERM + SIGINT handlers that cancel the given token.
///
/// If no handler can be registered the token is left alone and a warning is logged.
pub fn setup_signal_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if wait_for_signal().await {
            cancel.cancel();
        }
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> bool {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            warn!("Failed to register SIGTERM handler: {}", e);
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        received = wait_for_ctrl_c() => received,
        _ = sigterm.recv() => {
            info!("Received SIGTERM");
            true
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> bool {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> bool {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Received SIGINT");
            true
        }
        Err(e) => {
            warn!("Failed to listen for SIGINT: {}", e);
            false
        }
    }
}
