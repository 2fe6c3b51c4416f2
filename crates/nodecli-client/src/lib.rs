//! Blocking client for a full node's HTTP interface.
//!
//! The node exposes REST-style resources (`/tx/{hash}`, `/block/{id}`, ...)
//! alongside a JSON-RPC endpoint at `/`. Missing resources come back as
//! [`serde_json::Value::Null`]; procedure-call failures reported by the node
//! surface as [`ClientError::Rpc`] so callers can tell them apart from
//! transport problems.

mod client;
mod error;
pub mod jsonrpc;

pub use client::{BlockId, ClientOptions, NodeClient, REQUEST_TIMEOUT};
pub use error::{ClientError, ErrorKind};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
