use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobly_api::{cli::Cli, config, database::DatabaseManager, is_production, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    let default_filter = if config.api.enable_request_logging {
        "jobly_api=debug,tower_http=debug"
    } else {
        "jobly_api=info,tower_http=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    tracing::info!("Starting Jobly API in {:?} mode", config.environment);

    if !is_production!() && config.security.jwt_secret == "secret-dev" {
        tracing::warn!("Signing tokens with the development secret; set SECRET_KEY outside local use");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    let state = AppState::from_config(config, pool).context("invalid security configuration")?;

    let app = jobly_api::app_with_body_limit(state, config.api.max_request_size_bytes);

    let (host, port) = cli.bind_address(&config.api);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))?;

    tracing::info!("Jobly API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
