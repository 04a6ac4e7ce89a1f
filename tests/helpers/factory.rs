pub use super::factories::{
    MemoryEngineFactory, PeerOutcomeFactory, QueryResponseFactory,
    SettingsFactory,
};
pub use super::mock_transport::MockTransport;

pub struct Factory;

impl Factory {
    pub fn outcome() -> PeerOutcomeFactory {
        PeerOutcomeFactory::new()
    }

    pub fn query_response() -> QueryResponseFactory {
        QueryResponseFactory::new()
    }

    pub fn memory_engine() -> MemoryEngineFactory {
        MemoryEngineFactory::new()
    }

    pub fn settings() -> SettingsFactory {
        SettingsFactory::new()
    }

    pub fn transport() -> MockTransport {
        MockTransport::new()
    }
}
