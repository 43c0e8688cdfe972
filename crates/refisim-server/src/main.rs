//! Refisim server entry point.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use refisim_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,refisim=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Refisim Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/refisim.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    info!(
        base_rate = %server_config.engine.base_rate,
        break_even = ?server_config.engine.break_even,
        "Engine configured"
    );

    let server = Server::from_config(server_config)?;
    server.start().await?;

    Ok(())
}
