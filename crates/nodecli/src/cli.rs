//! Command-line surface left after configuration flags are removed.

use std::ffi::OsString;

use clap::Parser;

use crate::{CommandInvocation, CommandKind};

#[derive(Parser, Debug)]
#[command(
    name = "nodecli",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub(crate) struct Cli {
    /// The command to run (for example `info`).
    #[arg(value_name = "COMMAND", allow_hyphen_values = true)]
    command: Option<String>,
    /// Arguments consumed by the command handler.
    #[arg(
        value_name = "ARG",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    arguments: Vec<String>,
}

impl Cli {
    /// Parses command tokens into an invocation.
    ///
    /// Returns `None` for an empty or unrecognised command, or when the tokens
    /// cannot be parsed at all; the caller prints the command listing instead.
    pub(crate) fn invocation(tokens: &[OsString]) -> Option<CommandInvocation> {
        let cli = Self::try_parse_from(tokens).ok()?;
        let kind = CommandKind::from_name(cli.command.as_deref()?)?;
        Some(CommandInvocation::new(kind, cli.arguments))
    }
}
