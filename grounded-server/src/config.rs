//! Server configuration, read from the environment once at startup.

use std::path::PathBuf;

use anyhow::Context;

/// Bind address and data locations for the service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (`GROUNDED_HOST`, default `127.0.0.1`).
    pub host: String,
    /// Port to bind to (`GROUNDED_PORT`, default `8080`).
    pub port: u16,
    /// Directory holding the vector index and the document file
    /// (`GROUNDED_DATA_DIR`, default `./data`).
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080, data_dir: PathBuf::from("./data") }
    }
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("GROUNDED_HOST").unwrap_or(defaults.host);
        let port = match std::env::var("GROUNDED_PORT") {
            Ok(raw) => raw.parse().with_context(|| format!("invalid GROUNDED_PORT '{raw}'"))?,
            Err(_) => defaults.port,
        };
        let data_dir =
            std::env::var("GROUNDED_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir);

        Ok(Self { host, port, data_dir })
    }
}
