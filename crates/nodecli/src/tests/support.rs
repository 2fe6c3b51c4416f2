//! Test support utilities for the node client CLI.
//!
//! Supplies canned node responses for the shared fake node, static
//! configuration loading, a mock client factory, and the behavioural test
//! world so step definitions and unit tests remain focused on their
//! assertions.

use std::cell::RefCell;
use std::ffi::OsString;
use std::net::TcpListener;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, ensure};
use nodecli_client::test_support::{FakeNode, RecordedRequest};
use nodecli_config::Config;
use rstest::fixture;

use crate::rpc::MockNodeRpc;
use crate::{AppError, ClientFactory, ConfigLoader, IoStreams, run_with_loader};

pub(super) const HASH: &str = "6f2b09c1a2bd46b9e8a3aa4d9c0c5b7d1e3f5a7b9c1d3e5f7a9b1c3d5e7f9a1b";

pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// A config loader that panics if called, proving that help output
/// short-circuits before configuration loading.
pub(super) struct PanickingLoader;

impl ConfigLoader for PanickingLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        panic!("help output must not attempt configuration loading");
    }
}

/// Records the configuration arguments it receives.
#[derive(Default)]
pub(super) struct RecordingLoader {
    pub(super) arguments: RefCell<Vec<OsString>>,
}

impl ConfigLoader for RecordingLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        self.arguments.borrow_mut().extend(args.iter().cloned());
        Ok(Config::default())
    }
}

/// Hands out a prepared mock client at most once.
pub(super) struct MockFactory {
    client: RefCell<Option<MockNodeRpc>>,
}

impl MockFactory {
    pub(super) fn new(client: MockNodeRpc) -> Self {
        Self {
            client: RefCell::new(Some(client)),
        }
    }

    /// A factory that fails the test if a client is ever requested.
    pub(super) fn unused() -> Self {
        Self {
            client: RefCell::new(None),
        }
    }
}

impl ClientFactory for MockFactory {
    type Client = MockNodeRpc;

    fn connect(&self, _config: &Config) -> Result<MockNodeRpc, AppError> {
        Ok(self
            .client
            .borrow_mut()
            .take()
            .expect("no client should be constructed"))
    }
}

/// A mock that expects to be closed exactly once.
pub(super) fn closing_mock() -> MockNodeRpc {
    let mut client = MockNodeRpc::new();
    client.expect_close().times(1).return_const(());
    client
}

pub(super) fn args(words: &[&str]) -> Vec<OsString> {
    std::iter::once("nodecli")
        .chain(words.iter().copied())
        .map(OsString::from)
        .collect()
}

/// Canned node responses referenced by name from feature files.
pub(super) fn response_fixture(name: &str) -> Result<&'static str> {
    let body = match name.trim().trim_matches('"') {
        "info" => r#"{"network":"regtest","version":"2.2.0"}"#,
        "empty" => "",
        "fee" => r#"{"rate":100000000}"#,
        "fractional fee" => r#"{"rate":1.5}"#,
        "success" => r#"{"success":true}"#,
        "rpc error" => {
            r#"{"result":null,"error":{"message":"Method not found.","code":-32601},"id":1}"#
        }
        other => return Err(anyhow!("unknown response fixture {other:?}")),
    };
    Ok(body)
}

#[derive(Default)]
pub(super) struct TestWorld {
    pub config: Config,
    pub node: Option<FakeNode>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<ExitCode>,
    pub request: Option<RecordedRequest>,
}

impl TestWorld {
    pub fn start_node(&mut self, status: u16, fixture: &str) -> Result<()> {
        let node =
            FakeNode::spawn(status, response_fixture(fixture)?).context("spawn fake node")?;
        self.config.url = Some(node.url());
        self.node = Some(node);
        Ok(())
    }

    pub fn configure_unreachable_node(&mut self) -> Result<()> {
        let port = {
            let listener = TcpListener::bind(("127.0.0.1", 0)).context("bind probe")?;
            listener.local_addr().context("probe addr")?.port()
        };
        self.config.url = Some(format!("http://127.0.0.1:{port}/"));
        Ok(())
    }

    pub fn run(&mut self, command: &str) -> Result<()> {
        self.stdout.clear();
        self.stderr.clear();
        self.request = None;
        let args = Self::build_args(command);
        let loader = StaticConfigLoader::new(self.config.clone());
        let mut io = IoStreams::new(&mut self.stdout, &mut self.stderr);
        let exit = run_with_loader(args, &mut io, &loader);
        self.exit_code = Some(exit);
        if let Some(mut node) = self.node.take() {
            self.request = node.take_request().context("join fake node")?;
        }
        Ok(())
    }

    fn build_args(command: &str) -> Vec<OsString> {
        let mut args = vec![OsString::from("nodecli")];
        let trimmed = command.trim().trim_matches('"');
        args.extend(trimmed.split_whitespace().map(OsString::from));
        args
    }

    pub fn stdout_text(&self) -> Result<String> {
        String::from_utf8(self.stdout.clone()).context("stdout utf8")
    }

    pub fn stderr_text(&self) -> Result<String> {
        String::from_utf8(self.stderr.clone()).context("stderr utf8")
    }

    pub fn assert_exit_code(&self, expected: u8) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::from(expected),
            "expected exit code {expected}, got {exit:?}"
        );
        Ok(())
    }

    pub fn assert_failure(&self) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::FAILURE,
            "expected failure exit code, got {exit:?}"
        );
        Ok(())
    }

    pub fn assert_request(&self, expected: &str) -> Result<()> {
        let (method, target) = expected
            .trim()
            .trim_matches('"')
            .split_once(' ')
            .context("request must be written as METHOD TARGET")?;
        let request = self.request.as_ref().context("node received no request")?;
        ensure!(
            request.method == method && request.target == target,
            "expected {method} {target}, node received {} {}",
            request.method,
            request.target
        );
        Ok(())
    }

    pub fn assert_no_request(&self) -> Result<()> {
        ensure!(
            self.request.is_none(),
            "expected no node request but found {:?}",
            self.request
        );
        Ok(())
    }
}

#[fixture]
pub(super) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}
