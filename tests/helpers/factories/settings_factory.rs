use crate::shared::config::{LoggingConfig, PeersConfig, ServerConfig, Settings};

/// Builds [`Settings`] for a node on `localhost:8001` named `peer_1`.
pub struct SettingsFactory {
    settings: Settings,
}

impl SettingsFactory {
    pub fn new() -> Self {
        Self {
            settings: Settings {
                server: ServerConfig {
                    peer_id: "peer_1".to_string(),
                    host: "localhost".to_string(),
                    port: 8001,
                    bind_addr: "127.0.0.1".to_string(),
                    keep_alive: false,
                    max_connections: 0,
                    shutdown_grace_ms: 200,
                },
                peers: PeersConfig::default(),
                logging: LoggingConfig {
                    log_dir: "logs".to_string(),
                    stdout_level: "info".to_string(),
                    file_level: "debug".to_string(),
                },
            },
        }
    }

    pub fn with_peer_id(mut self, peer_id: &str) -> Self {
        self.settings.server.peer_id = peer_id.to_string();
        self
    }

    pub fn create(self) -> Settings {
        self.settings
    }
}
