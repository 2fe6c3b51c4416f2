//! Crate-level tests for the CLI runtime.

mod behaviour;
mod support;
