//! CLI entrypoint for the node client.
//!
//! The binary delegates to [`nodecli::run`], which loads configuration,
//! routes the command to the node, and renders the response.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    nodecli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
