//! Command-line client for a full node's HTTP and JSON-RPC interface.
//!
//! The runtime splits configuration flags from command tokens, resolves the
//! command, issues a single call against the node, and prints the response.
//! Configuration loading, client construction, and IO streams can all be
//! substituted so the router is exercised from tests without a real node.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use tracing::debug;

mod amount;
mod cli;
mod coerce;
mod command;
mod config;
mod errors;
mod localizer;
mod output;
mod router;
mod rpc;
pub mod telemetry;

pub use amount::Amount;
use cli::Cli;
pub(crate) use command::{CommandInvocation, CommandKind};
use config::split_config_arguments;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
use errors::report;
use localizer::{build_localizer, write_help};
pub(crate) use rpc::{ClientFactory, HttpClientFactory};

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct CliRunner<'r, 'io, W: Write, E: Write, L: ConfigLoader, F: ClientFactory> {
    io: &'r mut IoStreams<'io, W, E>,
    loader: &'r L,
    factory: &'r F,
}

impl<W, E, L, F> CliRunner<'_, '_, W, E, L, F>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
    F: ClientFactory,
{
    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        // Empty and unrecognised commands never load configuration.
        let Some(invocation) = Cli::invocation(&split.command_arguments) else {
            return self.print_help();
        };

        match self.execute(invocation, &split.config_arguments) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                report(&mut *self.io.stderr, &error);
                ExitCode::FAILURE
            }
        }
    }

    fn execute(
        &mut self,
        invocation: CommandInvocation,
        config_arguments: &[OsString],
    ) -> Result<(), AppError> {
        let config = self.loader.load(config_arguments)?;
        telemetry::initialise(&config)?;
        debug!(command = %invocation.kind(), "dispatching command");
        let client = self.factory.connect(&config)?;
        router::dispatch(invocation, client, &mut *self.io.stdout)?;
        self.io.stdout.flush().map_err(AppError::Output)
    }

    fn print_help(&mut self) -> ExitCode {
        let localizer = build_localizer();
        match write_help(&mut *self.io.stdout, localizer.as_ref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                report(&mut *self.io.stderr, &AppError::Output(error));
                ExitCode::FAILURE
            }
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader against a real node.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    run_with(args, io, loader, &HttpClientFactory)
}

/// Runs the CLI with a custom configuration loader and client factory.
pub(crate) fn run_with<I, W, E, L, F>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
    factory: &F,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    F: ClientFactory,
{
    CliRunner {
        io,
        loader,
        factory,
    }
    .run(args)
}

#[cfg(test)]
mod tests;
