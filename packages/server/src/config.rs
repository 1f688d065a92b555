//! Server configuration.

use std::path::PathBuf;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8055;

/// Default frontend bundle directory.
pub const DEFAULT_STATIC_DIR: &str = "app/dist";

/// Everything [`crate::run_server`] needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Census CSV to load (optionally `.gz`).
    pub data_path: PathBuf,
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
    /// Directory containing the built frontend.
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Creates a config for `data_path` with default network settings.
    #[must_use]
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}
