//! Layered configuration for the `nodecli` node client.
//!
//! Settings are merged by `ortho_config` from command-line flags, `NODECLI_*`
//! environment variables, and an optional `.nodecli.toml` file (or the file
//! named by `--config-path`), in that order of precedence, before falling back
//! to the built-in defaults.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

mod defaults;
mod endpoint;
mod logging;
mod network;
mod switch;

pub use defaults::{
    DEFAULT_HTTP_HOST, DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string,
    default_log_format, default_network,
};
pub use endpoint::EndpointError;
pub use logging::LogFormat;
pub use network::Network;
pub use switch::{Switch, SwitchParseError};

/// Long flags understood by the configuration loader.
///
/// The CLI uses this list to separate configuration flags from command
/// tokens; it must track the fields of [`Config`].
pub const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--network",
    "--url",
    "--api-key",
    "--ssl",
    "--httphost",
    "--httpport",
    "--log-filter",
    "--log-format",
];

/// On/off flags that may be given without a value, meaning `true`.
pub const CONFIG_SWITCHES: &[&str] = &["--ssl"];

/// Resolved settings for a single `nodecli` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "NODECLI")]
pub struct Config {
    /// Network the node serves; selects the default port.
    #[ortho_config(default = default_network())]
    pub network: Network,
    /// Full node URL. Overrides `httphost`, `httpport` and the network port.
    pub url: Option<String>,
    /// API key sent as the basic-auth password.
    pub api_key: Option<String>,
    /// Connect over TLS when assembling the endpoint.
    pub ssl: Option<Switch>,
    /// Node HTTP host.
    pub httphost: Option<String>,
    /// Node HTTP port.
    pub httpport: Option<u16>,
    /// `tracing` filter directive for diagnostics on stderr.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Diagnostic output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: default_network(),
            url: None,
            api_key: None,
            ssl: None,
            httphost: None,
            httpport: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Selected network.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.network
    }

    /// API key, when configured and non-empty.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Whether TLS is requested.
    #[must_use]
    pub fn ssl(&self) -> bool {
        self.ssl.is_some_and(Switch::is_on)
    }

    /// Effective port: the explicit port, or the network default.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.httpport.unwrap_or_else(|| self.network.rpc_port())
    }

    /// Log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Node endpoint derived from the URL, host, port, network and TLS settings.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] when the URL does not parse or uses a
    /// scheme other than http or https.
    pub fn endpoint(&self) -> Result<Url, EndpointError> {
        endpoint::resolve(self)
    }
}
