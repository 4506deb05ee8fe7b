//! Zen Zone - A state-managed HTTP service for guided relaxation sessions
//! 
//! This is the main entry point for the zen-zone application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use zen_zone::{
    api::create_router,
    config::Config,
    state::{AppState, SessionKind},
    tasks::session_timer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("zen_zone={},tower_http=info", config.log_level()))
        .init();

    info!("Starting zen-zone server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, restart={}s",
          config.host, config.port, config.tick_period().as_millis(), config.restart_seconds);

    let catalog = Arc::new(config.load_catalog()?);

    // Create application state
    let state = Arc::new(
        AppState::new(catalog, config.port, config.host.clone(), config.tick_period())
            .with_restart_seconds(config.restart_seconds),
    );

    // One countdown task per session kind
    for kind in [SessionKind::Breathing, SessionKind::Meditation] {
        let timer_state = Arc::clone(&state);
        tokio::spawn(async move {
            session_timer_task(timer_state, kind).await;
        });
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /breathing/:index/start  - Start a breathing exercise");
    info!("  POST /breathing/toggle        - Pause or resume breathing");
    info!("  POST /breathing/reset         - Reset breathing");
    info!("  POST /breathing/restart       - Start breathing again for a fixed length");
    info!("  POST /meditation/:index/start - Start a guided meditation");
    info!("  POST /meditation/toggle       - Pause or resume meditation");
    info!("  POST /meditation/reset        - Reset meditation");
    info!("  POST /meditation/end          - End meditation");
    info!("  POST /postures/:index/select  - Select a posture");
    info!("  POST /affirmations/next       - Next affirmation");
    info!("  POST /back                    - Host navigated back");
    info!("  GET  /status                  - Current zone state");
    info!("  GET  /catalog                 - Exercises, programs and postures");
    info!("  GET  /health                  - Health check");

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

    info!("Server shutdown complete");
    Ok(())
}
