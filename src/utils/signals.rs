//! Shutdown handling: OS signals or the window's close button

use std::future;

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tokio::sync::broadcast;
use tracing::{error, info};

/// Wait until SIGTERM/SIGINT arrives or a close is requested
pub async fn shutdown_signal(mut close_rx: broadcast::Receiver<()>) {
    tokio::select! {
        signal = next_signal() => info!("Received signal: {}", signal),
        _ = close_rx.recv() => info!("Window closed"),
    }
}

async fn next_signal() -> i32 {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            error!("Failed to create signal handler: {}", e);
            return future::pending().await;
        }
    };

    match signals.next().await {
        Some(signal) => signal,
        None => future::pending().await,
    }
}
