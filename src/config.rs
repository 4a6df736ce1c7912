//! Configuration module for huddle.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{HuddleError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. When absent, logs go to the console only.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// An external chat server endpoint offered to clients on the login page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    /// Display name.
    pub name: String,
    /// Endpoint URL.
    pub url: String,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Selectable chat server endpoints.
    #[serde(default)]
    pub servers: Vec<ServerEndpoint>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HuddleError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
        assert!(config.servers.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [logging]
            level = "debug"
            file = "logs/huddle.log"

            [[servers]]
            name = "本地服务器"
            url = "ws://127.0.0.1:5000/ws"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("logs/huddle.log"));
        assert_eq!(config.servers.len(), 1);
        assert_eq!(config.servers[0].name, "本地服务器");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let toml = r#"
            [server]
            port = 9000
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("nonexistent-config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_server_endpoint_serialize() {
        let endpoint = ServerEndpoint {
            name: "Main".to_string(),
            url: "ws://chat.example.com/ws".to_string(),
        };
        let json = serde_json::to_string(&endpoint).unwrap();
        assert!(json.contains("\"name\":\"Main\""));
        assert!(json.contains("\"url\":\"ws://chat.example.com/ws\""));
    }
}
