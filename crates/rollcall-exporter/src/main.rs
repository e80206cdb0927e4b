//! rollcall exporter binary.
//!
//! Loads config, registers metric families, enables collectors against the
//! in-process host hub, and serves `/metrics`, `/healthz`, `/readyz`.
//! Ctrl-C starts draining: readiness flips to 503 and collectors unsubscribe
//! before the server stops.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use rollcall_core::error::Result;
use rollcall_exporter::{app_state::AppState, config, router};

const DEFAULT_CONFIG: &str = "rollcall.yaml";

fn config_path() -> String {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ROLLCALL_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "rollcall exporter failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.exporter.listen_addr()?;

    let state = AppState::new(cfg)?;
    state.enable_collectors();

    let app = router::build_router(state.clone());

    tracing::info!(%listen, prefix = %state.metrics().prefix(), config = %path, "rollcall exporter starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| rollcall_core::RollcallError::Internal(format!("bind {listen} failed: {e}")))?;

    let drain = state.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { drain.drain_on(tokio::signal::ctrl_c()).await })
        .await
        .map_err(|e| rollcall_core::RollcallError::Internal(format!("server failed: {e}")))?;

    tracing::info!("rollcall exporter stopped");
    Ok(())
}
