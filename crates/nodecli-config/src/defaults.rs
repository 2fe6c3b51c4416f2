use crate::logging::LogFormat;
use crate::network::Network;

/// Host used when neither a URL nor an HTTP host is configured.
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

/// Default log filter expression used by the binary.
///
/// Kept at `warn` so diagnostic output never competes with command results.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default log filter expression used by the binary.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Network selected when none is configured.
pub fn default_network() -> Network {
    Network::Main
}
