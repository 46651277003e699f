//! Configuration management for the lockd binary
//!
//! Settings merge, in precedence order: CLI flags, `LOCKD_*` environment
//! variables, an optional `conf/lockd.yml` file, then built-in defaults.

use std::time::Duration;

use clap::Parser;
use config::{Config, Environment};
use lockd_common::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HOLD_SECS, DEFAULT_LEASE_SECS, DEFAULT_LOCK_NAME,
    DEFAULT_READ_TIMEOUT_MS, DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_PORT,
    DEFAULT_SWEEP_INTERVAL_SECS,
};

use crate::startup::logging::LoggingConfig;

/// Command line arguments for the lockd binary
#[derive(Debug, Parser)]
#[command(name = "lockd", about = "Named mutual-exclusion lock service")]
struct Cli {
    /// Run as the lock server instead of client-mode
    #[arg(short = 's', long = "server")]
    server: bool,
    /// Name of the lock to hold (client-mode)
    #[arg(short = 'n', long = "name")]
    name: Option<String>,
    /// Bind address for the lock server
    #[arg(long = "address")]
    address: Option<String>,
    /// Bind port for the lock server
    #[arg(long = "port")]
    port: Option<u16>,
    /// Server URL the client connects to
    #[arg(long = "server-url", env = "LOCKD_SERVER_URL")]
    server_url: Option<String>,
    /// Lease duration requested by client-mode, in seconds
    #[arg(long = "lease-secs")]
    lease_secs: Option<u64>,
    /// How long client-mode holds the lock, in seconds
    #[arg(long = "hold-secs")]
    hold_secs: Option<u64>,
    /// Interval between stale-lease sweeps, in seconds (0 disables)
    #[arg(long = "sweep-interval-secs")]
    sweep_interval_secs: Option<u64>,
}

/// Application configuration loaded from config file, environment, and CLI
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        Self::from_cli(Cli::parse())
    }

    fn from_cli(args: Cli) -> Self {
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("lockd")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/lockd.yml").required(false));

        if args.server {
            config_builder = config_builder
                .set_override("server_mode", true)
                .expect("Failed to set server mode override");
        }
        if let Some(v) = args.name {
            config_builder = config_builder
                .set_override("lock_name", v)
                .expect("Failed to set lock name override");
        }
        if let Some(v) = args.address {
            config_builder = config_builder
                .set_override("server.address", v)
                .expect("Failed to set server address override");
        }
        if let Some(v) = args.port {
            config_builder = config_builder
                .set_override("server.port", i64::from(v))
                .expect("Failed to set server port override");
        }
        if let Some(v) = args.server_url {
            config_builder = config_builder
                .set_override("client.url", v)
                .expect("Failed to set server URL override");
        }
        if let Some(v) = args.lease_secs {
            config_builder = config_builder
                .set_override("client.lease_secs", v as i64)
                .expect("Failed to set lease duration override");
        }
        if let Some(v) = args.hold_secs {
            config_builder = config_builder
                .set_override("client.hold_secs", v as i64)
                .expect("Failed to set hold duration override");
        }
        if let Some(v) = args.sweep_interval_secs {
            config_builder = config_builder
                .set_override("sweep.interval_secs", v as i64)
                .expect("Failed to set sweep interval override");
        }

        let config = config_builder
            .build()
            .expect("Failed to build configuration - check conf/lockd.yml");

        Configuration { config }
    }

    // ========================================================================
    // Mode selection
    // ========================================================================

    pub fn is_server(&self) -> bool {
        self.config.get_bool("server_mode").unwrap_or(false)
    }

    pub fn lock_name(&self) -> String {
        self.config
            .get_string("lock_name")
            .unwrap_or_else(|_| DEFAULT_LOCK_NAME.to_string())
    }

    // ========================================================================
    // Server configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string("server.address")
            .unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int("server.port")
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Sweep interval for the stale-lease sweeper; `None` disables it.
    pub fn sweep_interval(&self) -> Option<Duration> {
        let secs = self
            .config
            .get_int("sweep.interval_secs")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);
        (secs > 0).then(|| Duration::from_secs(secs))
    }

    // ========================================================================
    // Client configuration
    // ========================================================================

    pub fn server_url(&self) -> String {
        self.config
            .get_string("client.url")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{}", DEFAULT_SERVER_PORT))
    }

    pub fn lease_duration(&self) -> Duration {
        let secs = self
            .config
            .get_int("client.lease_secs")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_LEASE_SECS);
        Duration::from_secs(secs)
    }

    pub fn hold_duration(&self) -> Duration {
        let secs = self
            .config
            .get_int("client.hold_secs")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_HOLD_SECS);
        Duration::from_secs(secs)
    }

    pub fn connect_timeout_ms(&self) -> u64 {
        self.config
            .get_int("client.connect_timeout_ms")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS)
    }

    pub fn read_timeout_ms(&self) -> u64 {
        self.config
            .get_int("client.read_timeout_ms")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_READ_TIMEOUT_MS)
    }

    // ========================================================================
    // Logging configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.config.get_string("logs.dir").ok(),
            self.config.get_bool("logs.console").unwrap_or(true),
            self.config.get_bool("logs.file").unwrap_or(false),
            self.config
                .get_string("logs.level")
                .unwrap_or_else(|_| "info".to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Configuration {
        Configuration::from_cli(Cli::parse_from(args))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["lockd"]);
        assert!(!config.is_server());
        assert_eq!(config.lock_name(), "default_lock");
        assert_eq!(config.server_address(), "0.0.0.0");
        assert_eq!(config.server_port(), 8420);
        assert_eq!(config.server_url(), "http://127.0.0.1:8420");
        assert_eq!(config.lease_duration(), Duration::from_secs(60));
        assert_eq!(config.hold_duration(), Duration::from_secs(60));
        assert_eq!(config.sweep_interval(), Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout_ms(), 5000);
        assert_eq!(config.read_timeout_ms(), 30000);
    }

    #[test]
    fn test_server_mode_flag() {
        let config = parse(&["lockd", "--server"]);
        assert!(config.is_server());
    }

    #[test]
    fn test_client_overrides() {
        let config = parse(&[
            "lockd",
            "--name",
            "nightly-backup",
            "--server-url",
            "http://lockd.internal:9000",
            "--lease-secs",
            "120",
            "--hold-secs",
            "30",
        ]);
        assert_eq!(config.lock_name(), "nightly-backup");
        assert_eq!(config.server_url(), "http://lockd.internal:9000");
        assert_eq!(config.lease_duration(), Duration::from_secs(120));
        assert_eq!(config.hold_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_server_overrides() {
        let config = parse(&["lockd", "--server", "--address", "127.0.0.1", "--port", "9999"]);
        assert_eq!(config.server_address(), "127.0.0.1");
        assert_eq!(config.server_port(), 9999);
    }

    #[test]
    fn test_sweeper_disabled_at_zero() {
        let config = parse(&["lockd", "--server", "--sweep-interval-secs", "0"]);
        assert_eq!(config.sweep_interval(), None);
    }

    #[test]
    fn test_default_logging_config() {
        let config = parse(&["lockd"]);
        let logging = config.logging_config();
        assert!(logging.console_output);
        assert!(!logging.file_logging);
    }
}
