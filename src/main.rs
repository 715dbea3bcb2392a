//! Station Timer - An interval timer for rotating between workout stations
//! 
//! This is the main entry point for the station-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use station_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::interval_timer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("station_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting station-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    // Create application state
    let state = Arc::new(
        AppState::new(config.port, config.host.clone())
            .with_tick_period(config.tick_period())
            .with_muted(config.muted)
            .with_bell(config.bell),
    );

    // Subscribe before the first start-timer goes out
    let inbox = state.host_tx.subscribe();
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        interval_timer_task(timer_state, inbox).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Controls running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start-timer - Start a run with JSON settings");
    info!("  POST /pause       - Pause the countdown");
    info!("  POST /resume      - Close the pause window");
    info!("  POST /restart     - Restart with the last settings");
    info!("  POST /mute        - Mute the cooldown cue");
    info!("  POST /unmute      - Unmute the cooldown cue");
    info!("  POST /exit        - Quit");
    info!("  POST /counter     - Click the counter (quits once complete)");
    info!("  GET  /status      - Current run and display state");
    info!("  GET  /health      - Health check");

    if config.idle {
        info!("Idle until a start-timer request arrives");
    } else if let Err(e) = state.start_timer(config.settings()) {
        anyhow::bail!("{}", e);
    }

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal(Arc::clone(&state)) => {
            info!("Shutdown requested");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
