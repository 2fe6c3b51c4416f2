//! Error types and diagnostics helpers for the CLI runtime.

use std::error::Error as _;
use std::io::{self, Write};
use std::sync::Arc;

use nodecli_client::ClientError;
use nodecli_config::EndpointError;
use thiserror::Error;

use crate::CommandKind;
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("invalid node endpoint: {0}")]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("missing {argument} argument for {command}")]
    MissingArgument {
        command: CommandKind,
        argument: &'static str,
    },
    #[error("invalid {argument} for {command}: {value:?}")]
    InvalidArgument {
        command: CommandKind,
        argument: &'static str,
        value: String,
    },
    #[error("failed to render node response: {0}")]
    Render(serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(io::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
}

/// Writes `error` and every distinct cause in its source chain to `stderr`.
///
/// Causes whose text already appears in an earlier line are skipped, since
/// several client errors embed their source in their own message.
pub(crate) fn report<E: Write>(stderr: &mut E, error: &AppError) {
    let mut rendered = error.to_string();
    let _ = writeln!(stderr, "{rendered}");
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            let _ = writeln!(stderr, "caused by: {text}");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    let _ = stderr.flush();
}
