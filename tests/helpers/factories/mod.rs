pub mod memory_engine_factory;
pub mod peer_outcome_factory;
pub mod query_response_factory;
pub mod settings_factory;

pub use memory_engine_factory::MemoryEngineFactory;
pub use peer_outcome_factory::PeerOutcomeFactory;
pub use query_response_factory::QueryResponseFactory;
pub use settings_factory::SettingsFactory;

#[cfg(test)]
mod peer_outcome_factory_test;
