//! Server configuration from command-line flags and environment

use crate::storage::StorageOptions;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "pond-server")]
#[command(author, version, about = "Pond Logger API - records pond water-quality readings", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "POND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// SQLite database file, relative to the working directory
    #[arg(long, env = "POND_DATABASE", default_value = "pond.db")]
    pub database: PathBuf,

    /// Upper bound on handling a single request
    #[arg(long, env = "POND_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// How long to wait on a locked database
    #[arg(long, env = "POND_BUSY_TIMEOUT_SECS", default_value_t = 5)]
    pub busy_timeout_secs: u64,

    /// Maximum pooled database connections
    #[arg(
        long,
        env = "POND_MAX_CONNECTIONS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_connections: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn storage_options(&self) -> StorageOptions {
        StorageOptions {
            busy_timeout: Duration::from_secs(self.busy_timeout_secs),
            max_connections: self.max_connections,
        }
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "pond_server=debug,tower_http=debug"
        } else {
            "pond_server=info,tower_http=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "pond-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--database",
            "data/pond.db",
            "--request-timeout-secs",
            "3",
            "--busy-timeout-secs",
            "1",
            "--max-connections",
            "2",
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database, PathBuf::from("data/pond.db"));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));

        let storage = config.storage_options();
        assert_eq!(storage.busy_timeout, Duration::from_secs(1));
        assert_eq!(storage.max_connections, 2);
    }

    #[test]
    fn test_zero_connections_rejected() {
        let result = ServerConfig::try_parse_from(["pond-server", "--max-connections", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let config = ServerConfig::try_parse_from(["pond-server", "-v"]).unwrap();
        assert!(config.default_log_filter().contains("pond_server=debug"));
    }
}
