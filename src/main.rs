//! Courtside - a match clock and scoreboard server
//!
//! This is the main entry point for the courtside application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use courtside::{
    api::create_router,
    config::Config,
    services::{Alert, BellAlert, DurableStore, FileStore, LogAlert, MemoryStore},
    state::{AppState, AppStateOptions},
    tasks::{wake_up_recovery_task, VisibilityReconciler},
    utils::{resume_signal_task, shutdown_signal, SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("courtside={},tower_http=info", config.log_level()))
        .init();

    info!("Starting courtside server v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn DurableStore> = if config.ephemeral {
        info!("Using in-memory store, scoreboard will not survive restarts");
        Arc::new(MemoryStore::new())
    } else {
        let dir = config.state_dir();
        info!("Saving scoreboard under {}", dir.display());
        Arc::new(FileStore::new(dir))
    };
    let alert: Arc<dyn Alert> = if config.mute {
        Arc::new(LogAlert)
    } else {
        Arc::new(BellAlert)
    };

    // Create application state from the saved snapshot
    let state = AppState::new(
        store,
        alert,
        Arc::new(SystemClock),
        AppStateOptions {
            tick_interval: config.tick_interval(),
        },
    );

    // Reconcile on visibility, focus, wake-up and SIGCONT
    let reconciler = VisibilityReconciler::spawn(&state);
    let wake_task = tokio::spawn(wake_up_recovery_task(
        state.signals().clone(),
        config.wake_check_interval(),
    ));
    let resume_task = tokio::spawn(resume_signal_task(state.signals().clone()));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start | /timer/pause | /timer/toggle | /timer/reset");
    info!("  PUT  /timer/remaining      - Set remaining seconds while paused");
    info!("  POST /quarter/next         - Advance to the next quarter");
    info!("  POST /session/reset        - Back to quarter 1");
    info!("  POST /score/{{side}}/increment | /score/{{side}}/decrement");
    info!("  PUT  /score/{{side}} | /team/{{side}} | /sound");
    info!("  POST /signal/visibility | /signal/focus");
    info!("  GET  /status | /health");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    reconciler.shutdown();
    wake_task.abort();
    resume_task.abort();
    state.shutdown();

    info!("Server shutdown complete");
    Ok(())
}
