//! Web server for huddle.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::chat::PresenceRegistry;
use crate::config::{ServerConfig, ServerEndpoint};
use crate::{HuddleError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server hosting the chat relay.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(
        config: &ServerConfig,
        registry: Arc<PresenceRegistry>,
        servers: Vec<ServerEndpoint>,
    ) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| HuddleError::Config(format!("invalid bind address: {e}")))?;

        Ok(Self {
            addr,
            state: Arc::new(AppState::new(registry, servers)),
        })
    }

    /// Get the configured bind address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind and serve until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, router).await?;
        Ok(())
    }
}
