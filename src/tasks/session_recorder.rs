//! Session recorder background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::state::{AppState, TimerEvent};

/// Background task that logs every study interval that runs to completion.
///
/// Skipped intervals never produce a completion event and are not recorded.
pub async fn session_recorder_task(state: Arc<AppState>) {
    info!("Starting session recorder task");

    let mut events = state.subscribe_timer_events();

    loop {
        match events.recv().await {
            Ok(TimerEvent::Completed { was_study_mode: true }) => {
                let minutes = match state.get_timer_config() {
                    Ok(config) => config.study_minutes,
                    Err(e) => {
                        error!("Failed to read timer config: {}", e);
                        continue;
                    }
                };

                if let Err(e) = state.record_study_session(None, minutes) {
                    error!("Failed to record study session: {}", e);
                }
            }
            Ok(event) => {
                debug!("Session recorder ignoring {:?}", event);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Session recorder lagged, missed {} timer events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, stopping session recorder task");
                return;
            }
        }
    }
}
