mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::AllowListState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(outpost_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let outlets = outpost_core::load_outlets(&config.outlets_path)?;
    tracing::info!(
        path = %config.outlets_path.display(),
        count = outlets.len(),
        "loaded outlets"
    );

    let extractor = outpost_extract::Extractor::new(config.expand_timeout_secs, &config.user_agent)?;

    let allow_list = AllowListState::new(
        &config.allowed_emails,
        matches!(config.env, outpost_core::Environment::Development),
    )?;

    let state = AppState {
        outlets: Arc::new(outlets),
        extractor: Arc::new(extractor),
        travel_mode: config.travel_mode,
    };
    let app = build_app(state, allow_list);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
