/// NASA imagery viewer service entry point
use nasa_viewer::clients::NasaClient;
use nasa_viewer::config::AppConfig;
use nasa_viewer::handlers::AppState;
use nasa_viewer::routes::build_router;
use nasa_viewer::services::ImageryService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!(api_url = %config.nasa_api_url, "Configuration loaded successfully");

    // Initialize client and service
    let client = NasaClient::new(&config)?;
    let state = AppState {
        imagery_service: Arc::new(ImageryService::new(client)),
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("nasa_viewer listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
