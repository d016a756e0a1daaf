// src/cli/error.rs

use thiserror::Error;

/// Represents the fatal conditions of a dispatch run.
///
/// Every variant carries a human-readable message and unwinds through a
/// single error path to the entry point, where it is written to stderr and
/// mapped to a non-zero exit code. Nothing is retried, and no handler ever
/// observes a partially resolved argument set.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    /// No command token was supplied at all.
    #[error("Need a command name.")]
    MissingCommand,
    /// The first token did not match any command name or alias.
    #[error("No command named [{0}].")]
    UnknownCommand(String),
    /// An option token could not be resolved against the command-local or
    /// the global parameter table.
    #[error("Don't know [{name}] in [{token}].")]
    UnknownParameter { name: String, token: String },
    /// A value-needing switch was left unsatisfied, either at end of input
    /// or by an immediately following switch token.
    #[error("Switch [-{switch}] needs a value in [{cluster}].")]
    MissingValue { switch: char, cluster: String },
    /// A command body explicitly terminated the run.
    #[error("{0}")]
    Abort(String),
}

impl CliError {
    /// Shorthand for handler bodies bailing out with a message.
    pub fn abort(message: impl Into<String>) -> Self {
        Self::Abort(message.into())
    }
}
