//! Integration tests for the `nodecli` binary entry point.
//!
//! Verifies the help listing for unrecognised commands and the failure path
//! when the node cannot be reached.

use std::net::TcpListener;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::{contains, starts_with};

#[test]
fn unrecognised_command_prints_help_and_succeeds() {
    let mut command = cargo_bin_cmd!("nodecli");
    command.arg("foobar");
    command
        .assert()
        .success()
        .stdout(starts_with("Unrecognized command."))
        .stdout(contains("$ fee [target]: Estimate smart fee."));
}

#[test]
fn unreachable_node_exits_with_failure() {
    let port = {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind probe");
        listener.local_addr().expect("probe addr").port()
    };
    let url = format!("http://127.0.0.1:{port}/");
    let mut command = cargo_bin_cmd!("nodecli");
    command
        .env_remove("NODECLI_URL")
        .args(["info", "-u", url.as_str()]);
    command
        .assert()
        .failure()
        .stderr(contains("request to http://127.0.0.1"));
}

#[test]
fn missing_arguments_are_reported() {
    let mut command = cargo_bin_cmd!("nodecli");
    command.args(["--url", "http://127.0.0.1:1/", "tx"]);
    command
        .assert()
        .failure()
        .stderr(contains("missing hash or address argument for tx"));
}
