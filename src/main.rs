use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing::info;

use address_validator::cache::{Cache, RedisCache};
use address_validator::config::Config;
use address_validator::geocoding::GeocodingService;
use address_validator::observability::logging;
use address_validator::server::{self, AppState};
use address_validator::validator::ValidatorService;

#[derive(Parser)]
#[command(name = "address-validator")]
#[command(about = "HTTP service that validates and normalizes US postal addresses")]
#[command(version = "0.1.0")]
struct Cli {
    /// Port to listen on (overrides the PORT environment variable)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();

    let config = Config::from_env()?;
    info!(environment = %config.environment, "configuration loaded");

    let metrics = PrometheusBuilder::new().install_recorder()?;

    info!(
        "Connecting to Redis at {}:{}...",
        config.redis_host, config.redis_port
    );
    let cache: Arc<dyn Cache> = Arc::new(
        RedisCache::connect(
            &config.redis_host,
            config.redis_port,
            &config.redis_password,
            config.redis_db,
            config.cache_ttl,
        )
        .await?,
    );
    info!("Cache initialized successfully");

    let geocoder = Arc::new(GeocodingService::from_config(&config)?);
    let validator = Arc::new(ValidatorService::new(geocoder, cache.clone()));

    let state = AppState {
        validator,
        api_token: config.api_token.clone(),
        metrics,
    };

    let port = cli.port.unwrap_or(config.port);
    server::start_server(state, port).await?;

    cache.close().await;
    Ok(())
}
