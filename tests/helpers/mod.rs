pub mod factories;
pub mod factory;
pub mod mock_transport;
