//! concierge-server: hotel, restaurant and salon back office
//!
//! Serves the GraphQL API, the cookie session routes, the Stripe webhook
//! and the dashboard shell from one HTTP listener.

use std::net::SocketAddr;

use concierge_server::auth::rate_limit::CLEANUP_INTERVAL;
use concierge_server::{AppState, BoxError, Config, api, db, logger};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(&config);

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting concierge-server"
    );

    let database = db::connect(
        &config.database_path,
        &config.database_ns,
        &config.database_db,
    )
    .await?;

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let state = AppState::new(config, database);

    // Periodic rate limiter cleanup
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    });

    let app = api::create_router(state);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("concierge-server HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("concierge-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
