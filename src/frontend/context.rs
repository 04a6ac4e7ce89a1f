use std::sync::Arc;

use crate::engine::LocalQueryExecutor;
use crate::frontend::server_state::ServerState;
use crate::peer::{Dispatcher, HyperTransport, LocalNode, PeerTimeouts, PeerTransport};
use crate::shared::config::Settings;

/// Everything a request handler needs, shared across connections.
#[derive(Clone)]
pub struct FrontendContext {
    pub settings: Arc<Settings>,
    pub node: LocalNode,
    pub executor: Arc<dyn LocalQueryExecutor>,
    pub dispatcher: Arc<Dispatcher>,
    pub server_state: Arc<ServerState>,
}

impl FrontendContext {
    pub fn from_settings(
        settings: Arc<Settings>,
        executor: Arc<dyn LocalQueryExecutor>,
    ) -> Arc<Self> {
        let transport: Arc<dyn PeerTransport> =
            Arc::new(HyperTransport::new(settings.peers.connect_timeout()));
        Self::with_transport(settings, executor, transport)
    }

    pub fn with_transport(
        settings: Arc<Settings>,
        executor: Arc<dyn LocalQueryExecutor>,
        transport: Arc<dyn PeerTransport>,
    ) -> Arc<Self> {
        let node = LocalNode::from_config(&settings.server);
        let dispatcher = Arc::new(Dispatcher::new(
            node.clone(),
            Arc::clone(&executor),
            transport,
            PeerTimeouts::from(&settings.peers),
        ));
        Arc::new(Self {
            settings,
            node,
            executor,
            dispatcher,
            server_state: Arc::new(ServerState::new()),
        })
    }
}
