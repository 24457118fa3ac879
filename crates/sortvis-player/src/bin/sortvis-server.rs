//! Sortvis Playback Server
//!
//! Load the configured trace and serve playback controls.

use sortvis_player::{PlayerConfig, PlayerServer, Session};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortvis_server=info,sortvis_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional port argument overrides SORTVIS_ADDR
    let args: Vec<String> = env::args().collect();
    let mut config = PlayerConfig::from_env()?;
    if let Some(port) = args.get(1).and_then(|s| s.parse().ok()) {
        config = config.with_port(port);
    }

    tracing::info!(
        algorithm = %config.algorithm,
        values = config.values.len(),
        base_interval = ?config.base_interval,
        "Starting sortvis server"
    );

    let session = Session::from_config(&config).await?;
    let server = PlayerServer::new(session);
    server.serve(config.addr).await?;

    Ok(())
}
