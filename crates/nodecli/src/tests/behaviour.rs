//! BDD step definitions for the node client CLI.
//!
//! These steps map scenarios in `tests/features/nodecli.feature` to harness
//! operations that exercise the CLI against a fake node.

use super::support::*;

use std::cell::RefCell;

use rstest_bdd_macros::{given, scenario, then, when};

#[given("a fake node answering {status} with {fixture}")]
fn given_fake_node(world: &RefCell<TestWorld>, status: u16, fixture: String) {
    world
        .borrow_mut()
        .start_node(status, &fixture)
        .expect("failed to start fake node");
}

#[given("no node is listening")]
fn given_no_node(world: &RefCell<TestWorld>) {
    world
        .borrow_mut()
        .configure_unreachable_node()
        .expect("failed to reserve an unused port");
}

#[when("the operator runs {command}")]
fn when_operator_runs(world: &RefCell<TestWorld>, command: String) {
    world
        .borrow_mut()
        .run(&command)
        .expect("failed to run CLI command");
}

#[then("the node received {request}")]
fn then_node_received(world: &RefCell<TestWorld>, request: String) {
    world
        .borrow()
        .assert_request(&request)
        .expect("node did not receive the expected request");
}

#[then("the request body contains {snippet}")]
fn then_request_body_contains(world: &RefCell<TestWorld>, snippet: String) {
    let world = world.borrow();
    let body = world
        .request
        .as_ref()
        .map(|request| request.body.clone())
        .expect("node received no request");
    let snippet = snippet.trim_matches('"');
    assert!(
        body.contains(snippet),
        "request body {body:?} did not contain {snippet:?}"
    );
}

#[then("no node request was sent")]
fn then_no_request(world: &RefCell<TestWorld>) {
    world
        .borrow()
        .assert_no_request()
        .expect("unexpected node request recorded");
}

#[then("the output is {line}")]
fn then_output_is(world: &RefCell<TestWorld>, line: String) {
    let world = world.borrow();
    let expected = format!("{}\n", line.trim_matches('"'));
    let actual = world.stdout_text().expect("stdout text missing");
    assert_eq!(actual, expected);
}

#[then("stdout contains {snippet}")]
fn then_stdout_contains(world: &RefCell<TestWorld>, snippet: String) {
    let world = world.borrow();
    let stdout = world.stdout_text().expect("stdout text missing");
    let snippet = snippet.trim_matches('"');
    assert!(
        stdout.contains(snippet),
        "stdout {stdout:?} did not contain {snippet:?}"
    );
}

#[then("stderr contains {snippet}")]
fn then_stderr_contains(world: &RefCell<TestWorld>, snippet: String) {
    let world = world.borrow();
    let stderr = world.stderr_text().expect("stderr text missing");
    let snippet = snippet.trim_matches('"');
    assert!(
        stderr.contains(snippet),
        "stderr {stderr:?} did not contain {snippet:?}"
    );
}

#[then("the CLI exits with code {status}")]
fn then_exit_code(world: &RefCell<TestWorld>, status: u8) {
    world
        .borrow()
        .assert_exit_code(status)
        .expect("exit code assertion failed");
}

#[then("the CLI fails")]
fn then_exit_failure(world: &RefCell<TestWorld>) {
    world
        .borrow()
        .assert_failure()
        .expect("CLI did not fail as expected");
}

#[scenario(path = "tests/features/nodecli.feature")]
fn nodecli_behaviour(world: RefCell<TestWorld>) {
    let _ = world;
}
