use std::sync::Arc;

use tracing::info;

use huddle::{Config, PresenceRegistry, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = huddle::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!("Huddle - single-room chat relay");

    let registry = Arc::new(PresenceRegistry::new());
    let server = match WebServer::new(&config.server, registry, config.servers.clone()) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to configure server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
