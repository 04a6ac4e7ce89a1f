use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    #[serde(default)]
    pub peers: PeersConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Identifier this node reports as `peer_id` in every response.
    pub peer_id: String,
    /// Advertised host, compared against peer addresses for self detection.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub keep_alive: bool,
    /// 0 disables the limit
    #[serde(default)]
    pub max_connections: usize,
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    /// Applies command-line overrides. A port given without an explicit
    /// identifier renames the node `peer_<port - 8000>`.
    pub fn apply_overrides(&mut self, port: Option<u16>, peer_id: Option<String>) {
        if let Some(port) = port {
            self.port = port;
            self.peer_id = format!("peer_{}", i32::from(port) - 8000);
        }
        if let Some(peer_id) = peer_id {
            self.peer_id = peer_id;
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_shutdown_grace_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeersConfig {
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for PeersConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            query_timeout_ms: default_query_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl PeersConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn default_probe_timeout_ms() -> u64 {
    5_000
}

fn default_query_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

/// Loads settings from `path`, falling back to `$LAKE_PEER_CONFIG` and then
/// `config`. Variables such as `LAKE_PEER_SERVER__PORT` override file values.
pub fn load_settings(path: Option<&str>) -> Result<Settings, config::ConfigError> {
    let config_path = match path {
        Some(p) => p.to_string(),
        None => env::var("LAKE_PEER_CONFIG").unwrap_or_else(|_| "config".to_string()),
    };

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .add_source(
            config::Environment::with_prefix("LAKE_PEER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
