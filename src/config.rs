//! Environment-driven server configuration.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

/// Dataset file path used when `LCA_DATA_PATH` is unset.
pub const DEFAULT_DATA_PATH: &str = "uploads/TestData.xlsx";

/// Bind address used when `LCA_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the read-only dataset spreadsheet.
    pub data_path: PathBuf,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read configuration from `LCA_DATA_PATH` and `LCA_BIND_ADDR`,
    /// falling back to defaults (with a warning on an unparseable address).
    pub fn from_env() -> Self {
        let data_path = env::var("LCA_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));

        let bind_addr = match env::var("LCA_BIND_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(addr = %raw, "invalid LCA_BIND_ADDR, using default");
                default_bind_addr()
            }),
            Err(_) => default_bind_addr(),
        };

        Self {
            data_path,
            bind_addr,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    // The default is a literal and always parses.
    DEFAULT_BIND_ADDR
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8000)))
}
