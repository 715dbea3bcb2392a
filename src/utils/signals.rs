//! Shutdown handling: OS signals or an `exit` request from the window

use std::sync::Arc;

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::{info, warn};

use crate::state::AppState;

/// Wait until SIGTERM/SIGINT arrives or an exit has been requested
pub async fn shutdown_signal(state: Arc<AppState>) {
    let mut exit = state.exit_tx.subscribe();
    let exit_requested = async move {
        // The sender lives in `state`, so this only errors if it is dropped
        let _ = exit.wait_for(|requested| *requested).await;
    };

    match Signals::new([signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT]) {
        Ok(mut signals) => {
            tokio::select! {
                Some(signal) = signals.next() => info!("Received signal: {}", signal),
                _ = exit_requested => info!("Exit requested by the window"),
            }
        }
        Err(e) => {
            warn!(
                "Failed to install signal handler, only exit requests will stop the server: {}",
                e
            );
            exit_requested.await;
            info!("Exit requested by the window");
        }
    }
}
