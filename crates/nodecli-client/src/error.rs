//! Error types surfaced by the node client.

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of a [`ClientError`].
///
/// Callers that only care whether the node itself rejected a procedure call
/// match on [`ErrorKind::Rpc`]; every other kind is a local or transport
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The node answered with a JSON-RPC error object.
    Rpc,
    /// The request never produced an HTTP response.
    Transport,
    /// The node answered with a non-success HTTP status.
    Status,
    /// The response body was not the JSON the client expected.
    Decode,
    /// The client was used after [`crate::NodeClient::close`].
    Closed,
    /// A request URL could not be built from the endpoint.
    Endpoint,
}

/// Errors raised by [`crate::NodeClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Rpc { code: i64, message: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("node returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("failed to decode node response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("node client has already been closed")]
    Closed,
    #[error("endpoint {endpoint} cannot carry request paths")]
    Endpoint { endpoint: String },
}

impl ClientError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Rpc { .. } => ErrorKind::Rpc,
            Self::Transport { .. } | Self::Build(_) => ErrorKind::Transport,
            Self::Status { .. } => ErrorKind::Status,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Closed => ErrorKind::Closed,
            Self::Endpoint { .. } => ErrorKind::Endpoint,
        }
    }

    /// Returns true when the node rejected a procedure call.
    #[must_use]
    pub const fn is_rpc(&self) -> bool {
        matches!(self.kind(), ErrorKind::Rpc)
    }
}
