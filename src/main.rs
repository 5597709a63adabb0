//! Corner Countdown - an always-on-top countdown timer for a display corner
//!
//! This is the main entry point for the corner-countdown application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use corner_countdown::{
    config::Config,
    state::{AppState, Shell},
    api::create_router,
    tasks::{countdown_timer_task, render_log_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("corner_countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting corner-countdown v{}", env!("CARGO_PKG_VERSION"));

    // Configuration errors are fatal before anything is shown
    let settings = match config.validate() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    let placement = settings.placement;
    info!(
        "Configuration: countdown={}, display={}, position={}, window at {},{}",
        settings.timer.display(), placement.monitor, placement.anchor,
        placement.origin.x, placement.origin.y
    );

    let alert = config.alert();
    info!("Alarm sound: {}", alert.path().display());
    let shell = Shell::new(settings.timer, alert, settings.tick_interval);

    // Create application state
    let (state, control_rx) = AppState::new(config.port, config.host.clone(), shell.frame(), placement);
    let state = Arc::new(state);
    let close_rx = state.shutdown_tx.subscribe();

    // Start the countdown and render background tasks
    tokio::spawn(countdown_timer_task(shell, control_rx, Arc::clone(&state)));
    tokio::spawn(render_log_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control surface running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start-stop - Toggle the countdown");
    info!("  POST /start      - Start the countdown");
    info!("  POST /stop       - Pause the countdown");
    info!("  POST /reset      - Restore the configured time");
    info!("  POST /close      - Close the timer");
    info!("  GET  /status     - Current display and placement");
    info!("  GET  /placement  - Window placement");
    info!("  POST /resize     - Re-anchor after a size change");
    info!("  GET  /health     - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal(close_rx) => {
            info!("Shutting down");
            // Stop background tasks when the shutdown came from a signal
            state.shutdown_tx.send(()).ok();
        }
    }

    info!("Corner countdown closed");
    Ok(())
}
