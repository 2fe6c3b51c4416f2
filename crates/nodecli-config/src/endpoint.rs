//! Resolution of the node's HTTP endpoint from layered settings.
//!
//! An explicit URL always wins. Otherwise the endpoint is assembled from the
//! configured host, the configured port (or the network's default port), and
//! the TLS toggle.

use thiserror::Error;
use url::Url;

use crate::Config;
use crate::defaults::DEFAULT_HTTP_HOST;

/// Errors raised while resolving the node endpoint.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The configured URL (or assembled host/port) did not parse.
    #[error("invalid node url '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
    /// The URL used a scheme other than http or https.
    #[error("unsupported node url scheme '{0}'; expected http or https")]
    UnsupportedScheme(String),
}

pub(crate) fn resolve(config: &Config) -> Result<Url, EndpointError> {
    let scheme = if config.ssl() { "https" } else { "http" };
    let input = match config.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => {
            if url.contains("://") {
                url.to_owned()
            } else {
                format!("{scheme}://{url}")
            }
        }
        _ => {
            let host = config
                .httphost
                .as_deref()
                .filter(|host| !host.is_empty())
                .unwrap_or(DEFAULT_HTTP_HOST);
            format!("{scheme}://{host}:{}/", config.port())
        }
    };

    let url = Url::parse(&input).map_err(|source| EndpointError::InvalidUrl {
        input: input.clone(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(EndpointError::UnsupportedScheme(other.to_owned())),
    }
}
