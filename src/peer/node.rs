use crate::shared::config::ServerConfig;

/// Identity of the node running the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNode {
    pub peer_id: String,
    pub host: String,
    pub port: u16,
}

impl LocalNode {
    pub fn new(peer_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            peer_id: peer_id.into(),
            host: host.into(),
            port,
        }
    }

    pub fn from_config(server: &ServerConfig) -> Self {
        Self::new(server.peer_id.clone(), server.host.clone(), server.port)
    }

    /// The address other peers use to reach this node.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
