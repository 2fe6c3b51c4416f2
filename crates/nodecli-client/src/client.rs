//! Blocking HTTP client for the node's REST and JSON-RPC endpoints.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::ClientError;
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// Upper bound on a single round trip to the node.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Username paired with the API key for basic authentication.
const AUTH_USER: &str = "x";

/// A block addressed either by hash or by height.
///
/// Heights keep the raw token so that malformed input reaches the node
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockId {
    /// 64-character hex block hash.
    Hash(String),
    /// Height token as typed by the operator.
    Height(String),
}

impl BlockId {
    fn as_segment(&self) -> &str {
        match self {
            Self::Hash(hash) => hash,
            Self::Height(height) => height,
        }
    }
}

/// Connection settings for [`NodeClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the node's HTTP server.
    pub endpoint: Url,
    /// Optional API key sent as the basic-auth password.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientOptions {
    /// Options for `endpoint` with the default timeout and no API key.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            api_key: None,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

/// Client for a single node.
///
/// Resources are released by [`NodeClient::close`]; any call made afterwards
/// fails with [`ClientError::Closed`].
#[derive(Debug)]
pub struct NodeClient {
    endpoint: Url,
    api_key: Option<String>,
    http: Option<Client>,
}

impl NodeClient {
    /// Builds a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be
    /// initialised, for example because no TLS backend is available.
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            endpoint: options.endpoint,
            api_key: options.api_key,
            http: Some(http),
        })
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns true until [`NodeClient::close`] has been called.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.http.is_some()
    }

    /// Releases the HTTP connection pool. Repeated calls are no-ops.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            debug!(endpoint = %self.endpoint, "closed node client");
        }
    }

    /// Node status snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Closed`] after [`NodeClient::close`],
    /// [`ClientError::Transport`] when the node cannot be reached,
    /// [`ClientError::Status`] for unexpected HTTP statuses, and
    /// [`ClientError::Decode`] when the body is not JSON.
    pub fn info(&self) -> Result<Value, ClientError> {
        self.get(&[], &[])
    }

    /// Mempool transaction snapshot.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn mempool(&self) -> Result<Value, ClientError> {
        self.get(&["mempool"], &[])
    }

    /// Transaction by hash; `Value::Null` when the node does not know it.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn tx(&self, hash: &str) -> Result<Value, ClientError> {
        self.get(&["tx", hash], &[])
    }

    /// Transactions touching `address`.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn txs_by_address(&self, address: &str) -> Result<Value, ClientError> {
        self.get(&["tx", "address", address], &[])
    }

    /// Unspent output by outpoint; `Value::Null` when spent or unknown.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn coin(&self, hash: &str, index: &str) -> Result<Value, ClientError> {
        self.get(&["coin", hash, index], &[])
    }

    /// Unspent outputs owned by `address`.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn coins_by_address(&self, address: &str) -> Result<Value, ClientError> {
        self.get(&["coin", "address", address], &[])
    }

    /// Full block.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn block(&self, block: &BlockId) -> Result<Value, ClientError> {
        self.get(&["block", block.as_segment()], &[])
    }

    /// Block header.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn header(&self, block: &BlockId) -> Result<Value, ClientError> {
        self.get(&["header", block.as_segment()], &[])
    }

    /// Compact block filter.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn filter(&self, block: &BlockId) -> Result<Value, ClientError> {
        self.get(&["filter", block.as_segment()], &[])
    }

    /// Fee-rate estimate for confirmation within `blocks` blocks.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn estimate_fee(&self, blocks: u32) -> Result<Value, ClientError> {
        self.get(&["fee"], &[("blocks", blocks.to_string())])
    }

    /// Submits a raw transaction.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn broadcast(&self, tx: &str) -> Result<Value, ClientError> {
        self.post(&["broadcast"], &json!({ "tx": tx }))
    }

    /// Rolls the chain back to `block`.
    ///
    /// # Errors
    ///
    /// Fails as [`NodeClient::info`] does.
    pub fn reset(&self, block: &BlockId) -> Result<Value, ClientError> {
        let body = match block {
            BlockId::Hash(hash) => json!({ "hash": hash }),
            BlockId::Height(height) => match height.parse::<u32>() {
                Ok(height) => json!({ "height": height }),
                Err(_) => json!({ "height": height }),
            },
        };
        self.post(&["reset"], &body)
    }

    /// Invokes an arbitrary remote procedure.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rpc`] when the node answers with a JSON-RPC
    /// error object, whatever the HTTP status. Otherwise fails as
    /// [`NodeClient::info`] does.
    pub fn execute(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        let request = JsonRpcRequest::new(method, params);
        let url = self.url_for(&[])?;
        debug!(%url, method, id = request.id, "calling node procedure");
        let builder = self.http()?.post(url.clone()).json(&request);
        let (status, body) = self.send(builder, &url)?;

        match serde_json::from_str::<JsonRpcResponse>(&body) {
            Ok(JsonRpcResponse {
                error: Some(error), ..
            }) => Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            }),
            Ok(response) if status.is_success() => Ok(response.result.unwrap_or(Value::Null)),
            Ok(_) => Err(status_error(&url, status, body)),
            Err(_) if !status.is_success() => Err(status_error(&url, status, body)),
            Err(source) => Err(ClientError::Decode {
                url: url.to_string(),
                source,
            }),
        }
    }

    fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value, ClientError> {
        let mut url = self.url_for(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        debug!(%url, "GET");
        let builder = self.http()?.get(url.clone());
        self.read_resource(builder, &url)
    }

    fn post(&self, segments: &[&str], body: &Value) -> Result<Value, ClientError> {
        let url = self.url_for(segments)?;
        debug!(%url, "POST");
        let builder = self.http()?.post(url.clone()).json(body);
        self.read_resource(builder, &url)
    }

    fn read_resource(&self, builder: RequestBuilder, url: &Url) -> Result<Value, ClientError> {
        let (status, body) = self.send(builder, url)?;
        if status == StatusCode::NOT_FOUND {
            return Ok(Value::Null);
        }
        if !status.is_success() {
            return Err(status_error(url, status, body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn send(&self, builder: RequestBuilder, url: &Url) -> Result<(StatusCode, String), ClientError> {
        let builder = match self.api_key.as_deref() {
            Some(key) => builder.basic_auth(AUTH_USER, Some(key)),
            None => builder,
        };
        let transport = |source| ClientError::Transport {
            url: url.to_string(),
            source,
        };
        let response = builder.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;
        debug!(%url, %status, bytes = body.len(), "node responded");
        Ok((status, body))
    }

    fn http(&self) -> Result<&Client, ClientError> {
        self.http.as_ref().ok_or(ClientError::Closed)
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.endpoint.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::Endpoint {
                    endpoint: self.endpoint.to_string(),
                })?;
            path.pop_if_empty().extend(segments);
        }
        if segments.is_empty() && !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        Ok(url)
    }
}

fn status_error(url: &Url, status: StatusCode, body: String) -> ClientError {
    ClientError::Status {
        url: url.to_string(),
        status,
        body,
    }
}
