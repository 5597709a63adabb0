//! Render log background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::state::{AppState, Urgency};

/// Background task that follows the render sink and logs what the window
/// would show. Urgency changes are logged at info, every frame at debug.
pub async fn render_log_task(state: Arc<AppState>) {
    info!("Starting render log task");

    let mut frames = state.subscribe_frames();
    let mut shutdown_rx = state.shutdown_tx.subscribe();
    let mut last_urgency = Urgency::Normal;

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = frames.borrow_and_update().clone();

                if frame.urgency != last_urgency {
                    info!("Display turned {} at {}", frame.digit_color, frame.display);
                    last_urgency = frame.urgency;
                }
                debug!(
                    "Render {} color={} state={} button={}{}",
                    frame.display,
                    frame.digit_color,
                    frame.run_state,
                    frame.start_stop_label,
                    if frame.start_stop_enabled { "" } else { " (disabled)" },
                );
            }
        }
    }

    debug!("Render log task finished");
}
