//! Command names and the token queue each handler consumes.

use std::collections::VecDeque;

use strum::{Display, EnumIter, EnumString};

use crate::AppError;

/// Commands the router understands.
///
/// Variants are listed in the order the help text presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum CommandKind {
    Info,
    Broadcast,
    Mempool,
    Tx,
    Coin,
    Block,
    Header,
    Filter,
    Reset,
    Rpc,
    Fee,
}

impl CommandKind {
    /// Looks up a command by its exact, case-sensitive name.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

/// A recognised command and the argument tokens that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandInvocation {
    kind: CommandKind,
    arguments: VecDeque<String>,
}

impl CommandInvocation {
    pub(crate) fn new<I>(kind: CommandKind, arguments: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            kind,
            arguments: arguments.into_iter().collect(),
        }
    }

    pub(crate) const fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Removes the next positional token, skipping `--name` style options.
    pub(crate) fn next_positional(&mut self) -> Option<String> {
        let index = self
            .arguments
            .iter()
            .position(|token| !token.starts_with("--"))?;
        self.arguments.remove(index)
    }

    /// Removes the next positional token or fails naming the missing argument.
    pub(crate) fn take_positional(&mut self, argument: &'static str) -> Result<String, AppError> {
        self.next_positional().ok_or_else(|| self.missing(argument))
    }

    /// Removes `--name value` or `--name=value` and returns the value.
    pub(crate) fn take_named(&mut self, name: &str) -> Option<String> {
        let flag = format!("--{name}");
        let inline = format!("{flag}=");
        let index = self
            .arguments
            .iter()
            .position(|token| *token == flag || token.starts_with(&inline))?;
        let token = self.arguments.remove(index)?;
        if let Some(value) = token.strip_prefix(&inline) {
            return Some(value.to_owned());
        }
        match self.arguments.get(index) {
            Some(value) if !value.starts_with("--") => self.arguments.remove(index),
            _ => None,
        }
    }

    /// Removes every remaining token in order.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.arguments.drain(..)
    }

    /// Error for a required argument that was not supplied.
    pub(crate) fn missing(&self, argument: &'static str) -> AppError {
        AppError::MissingArgument {
            command: self.kind,
            argument,
        }
    }

    /// Error for a token that cannot be coerced into `argument`.
    pub(crate) fn invalid(&self, argument: &'static str, value: String) -> AppError {
        AppError::InvalidArgument {
            command: self.kind,
            argument,
            value,
        }
    }
}
