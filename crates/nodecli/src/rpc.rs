//! The router's view of the node client and its connection lifecycle.

use nodecli_client::{BlockId, ClientError, ClientOptions, NodeClient};
use nodecli_config::Config;
use serde_json::Value;
use tracing::debug;

use crate::AppError;

/// Calls the router issues against the node.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait NodeRpc {
    fn info(&self) -> Result<Value, ClientError>;
    fn mempool(&self) -> Result<Value, ClientError>;
    fn tx(&self, hash: &str) -> Result<Value, ClientError>;
    fn txs_by_address(&self, address: &str) -> Result<Value, ClientError>;
    fn coin(&self, hash: &str, index: &str) -> Result<Value, ClientError>;
    fn coins_by_address(&self, address: &str) -> Result<Value, ClientError>;
    fn block(&self, block: &BlockId) -> Result<Value, ClientError>;
    fn header(&self, block: &BlockId) -> Result<Value, ClientError>;
    fn filter(&self, block: &BlockId) -> Result<Value, ClientError>;
    fn estimate_fee(&self, blocks: u32) -> Result<Value, ClientError>;
    fn broadcast(&self, tx: &str) -> Result<Value, ClientError>;
    fn reset(&self, block: &BlockId) -> Result<Value, ClientError>;
    fn execute(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError>;
    fn close(&mut self);
}

impl NodeRpc for NodeClient {
    fn info(&self) -> Result<Value, ClientError> {
        Self::info(self)
    }

    fn mempool(&self) -> Result<Value, ClientError> {
        Self::mempool(self)
    }

    fn tx(&self, hash: &str) -> Result<Value, ClientError> {
        Self::tx(self, hash)
    }

    fn txs_by_address(&self, address: &str) -> Result<Value, ClientError> {
        Self::txs_by_address(self, address)
    }

    fn coin(&self, hash: &str, index: &str) -> Result<Value, ClientError> {
        Self::coin(self, hash, index)
    }

    fn coins_by_address(&self, address: &str) -> Result<Value, ClientError> {
        Self::coins_by_address(self, address)
    }

    fn block(&self, block: &BlockId) -> Result<Value, ClientError> {
        Self::block(self, block)
    }

    fn header(&self, block: &BlockId) -> Result<Value, ClientError> {
        Self::header(self, block)
    }

    fn filter(&self, block: &BlockId) -> Result<Value, ClientError> {
        Self::filter(self, block)
    }

    fn estimate_fee(&self, blocks: u32) -> Result<Value, ClientError> {
        Self::estimate_fee(self, blocks)
    }

    fn broadcast(&self, tx: &str) -> Result<Value, ClientError> {
        Self::broadcast(self, tx)
    }

    fn reset(&self, block: &BlockId) -> Result<Value, ClientError> {
        Self::reset(self, block)
    }

    fn execute(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        Self::execute(self, method, params)
    }

    fn close(&mut self) {
        Self::close(self);
    }
}

/// Builds the client a recognised command talks to.
pub(crate) trait ClientFactory {
    type Client: NodeRpc;

    fn connect(&self, config: &Config) -> Result<Self::Client, AppError>;
}

/// Connects to the node over HTTP using the resolved endpoint.
pub(crate) struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    type Client = NodeClient;

    fn connect(&self, config: &Config) -> Result<NodeClient, AppError> {
        let endpoint = config.endpoint()?;
        debug!(%endpoint, network = %config.network(), "connecting to node");
        let options =
            ClientOptions::new(endpoint).with_api_key(config.api_key().map(str::to_owned));
        Ok(NodeClient::new(options)?)
    }
}

/// Owns a client and closes it exactly once when dropped.
pub(crate) struct ConnectionGuard<C: NodeRpc> {
    client: C,
}

impl<C: NodeRpc> ConnectionGuard<C> {
    pub(crate) const fn new(client: C) -> Self {
        Self { client }
    }

    pub(crate) const fn client(&self) -> &C {
        &self.client
    }
}

impl<C: NodeRpc> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        self.client.close();
    }
}
