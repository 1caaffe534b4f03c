use std::net::SocketAddr;

use maintenance_tracker::{config::AppConfig, create_router, initialize_backend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the library are captured too
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    info!("Using backing table {:?}", config.data_file);

    let app_state = initialize_backend(&config)?;
    let app = create_router(app_state);

    let addr: SocketAddr = config.bind_address.parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
