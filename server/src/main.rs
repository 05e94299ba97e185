//! Wayfarer API server.
//!
//! Hosts the auth, catalog, booking, and profile endpoints the travel client
//! talks to, backed by Postgres.

mod config;
mod db;
mod error;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Config::from_env()?;
    let port = config.port;

    let pool = db::init_pool(&config).await?;
    tracing::info!(max_connections = config.db_max_connections, "database ready");

    let _sweeper = services::session::spawn_session_sweeper(pool.clone(), config.session_sweep_interval_secs);
    let state = state::AppState::new(pool, config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "wayfarer listening");
    axum::serve(listener, app).await?;
    Ok(())
}
