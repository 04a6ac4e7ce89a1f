pub mod model;

pub use model::{LoggingConfig, PeersConfig, ServerConfig, Settings, load_settings};
