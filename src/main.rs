//! StudyBuddy - A pomodoro study timer service
//! 
//! This is the main entry point for the study-buddy application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use study_buddy::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{session_recorder_task, study_timer_task, IntervalTicks},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("study_buddy={},tower_http=info", config.log_level()))
        .init();

    info!("Starting study-buddy server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, study={}min, break={}min, long break={}min every {} intervals",
          config.host, config.port, config.study_minutes, config.break_minutes,
          config.long_break_minutes, config.long_break_after);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.timer_config()));

    // Start the background tasks: the tick driver and the session recorder
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        study_timer_task(timer_state, IntervalTicks::every_second()).await;
    });

    let recorder_state = Arc::clone(&state);
    tokio::spawn(async move {
        session_recorder_task(recorder_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /api/timer              - Timer status");
    info!("  POST   /api/timer/toggle       - Start or pause the timer");
    info!("  POST   /api/timer/reset        - Reset the current interval");
    info!("  POST   /api/timer/skip         - Skip to the next interval");
    info!("  POST   /api/study/plan         - Generate a study plan");
    info!("  GET    /api/study/resources    - Find study resources");
    info!("  GET    /api/study/sessions     - List study sessions");
    info!("  POST   /api/study/sessions     - Record a study session");
    info!("  DELETE /api/study/sessions/:id - Remove a study session");
    info!("  GET    /api/study/stats        - Study statistics");
    info!("  PUT    /api/study/subject      - Set the active subject");
    info!("  POST   /api/chat/message       - Ask the study assistant");
    info!("  GET    /api/chat/history       - Chat history");
    info!("  DELETE /api/chat/history       - Clear chat history");
    info!("  GET    /api/health             - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
