//! Error types for parsing, dispatch and tag compilation.
//!
//! [`CliError`] covers everything that can happen while a tree runs.
//! Usage-class variants are the user's fault and get a usage render at the
//! entry point; [`TagError`] is a development-time defect in a field
//! declaration and is expected to be treated as fatal.

use std::fmt;

use thiserror::Error;

use crate::command::CommandId;

/// Errors produced while parsing arguments or dispatching commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A branch command was invoked without a subcommand, or a leaf has no run hook.
    #[error("usage error: no command provided: {command} expects a subcommand")]
    NoCommandProvided { command: String, at: CommandId },

    /// The first positional did not name a child command.
    #[error("usage error: no such command: {command} does not have command {name:?}")]
    NoSuchCommand {
        command: String,
        name: String,
        at: CommandId,
    },

    #[error("usage error: unknown option: {0:?}")]
    UnknownOption(String),

    #[error("usage error: option requires a value: {0}")]
    OptionRequiresValue(String),

    /// Command-specific usage failure raised by a run hook or custom type.
    #[error("usage error: {0}")]
    Usage(String),

    /// A builtin option type rejected its input text.
    #[error("invalid {type_name} {input:?}: {reason}")]
    InvalidValue {
        type_name: &'static str,
        input: String,
        reason: String,
    },

    #[error("option {option}: {source}")]
    InvalidOptionValue {
        option: String,
        #[source]
        source: Box<CliError>,
    },

    /// Every error found in one pass over the token stream.
    #[error("{0}")]
    Parse(ParseErrors),

    #[error(transparent)]
    Tag(#[from] TagError),

    /// Explicit termination with a caller-chosen code.
    #[error("exit {0}")]
    ExitCode(i32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Shorthand for a command-specific usage failure.
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// True when this error (or anything it aggregates) is a user input mistake.
    pub fn is_usage(&self) -> bool {
        match self {
            CliError::NoCommandProvided { .. }
            | CliError::NoSuchCommand { .. }
            | CliError::UnknownOption(_)
            | CliError::OptionRequiresValue(_)
            | CliError::Usage(_) => true,
            CliError::InvalidOptionValue { source, .. } => source.is_usage(),
            CliError::Parse(errs) => errs.iter().any(CliError::is_usage),
            CliError::Other(err) => err
                .downcast_ref::<CliError>()
                .is_some_and(CliError::is_usage),
            CliError::InvalidValue { .. }
            | CliError::Tag(_)
            | CliError::ExitCode(_)
            | CliError::Io(_) => false,
        }
    }

    /// Process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        self.explicit_code().unwrap_or(1)
    }

    /// True for a bare [`CliError::ExitCode`], which carries no message worth printing.
    pub fn is_exit_only(&self) -> bool {
        matches!(self, CliError::ExitCode(_))
    }

    /// The command whose usage best explains this error, if known.
    pub fn usage_target(&self) -> Option<CommandId> {
        match self {
            CliError::NoCommandProvided { at, .. } | CliError::NoSuchCommand { at, .. } => {
                Some(*at)
            }
            CliError::Parse(errs) => errs.at(),
            _ => None,
        }
    }

    /// Iterates this error, flattening aggregated parse errors.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &CliError> + '_> {
        match self {
            CliError::Parse(errs) => Box::new(errs.iter().flat_map(CliError::iter)),
            other => Box::new(std::iter::once(other)),
        }
    }

    fn explicit_code(&self) -> Option<i32> {
        match self {
            CliError::ExitCode(code) => Some(*code),
            CliError::Parse(errs) => errs.iter().find_map(CliError::explicit_code),
            CliError::Other(err) => err
                .downcast_ref::<CliError>()
                .and_then(CliError::explicit_code),
            _ => None,
        }
    }
}

/// Errors accumulated over one parse, with the command they were raised at.
#[derive(Debug, Default)]
pub struct ParseErrors {
    at: Option<CommandId>,
    errors: Vec<CliError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: CliError) {
        self.errors.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CliError> {
        self.errors.iter()
    }

    /// Command the parse ran for, when it ran through a tree.
    pub fn at(&self) -> Option<CommandId> {
        self.at
    }

    pub(crate) fn set_at(&mut self, at: CommandId) {
        self.at = Some(at);
    }

    /// `None` when nothing went wrong, else one combined [`CliError::Parse`].
    pub fn into_error(self) -> Option<CliError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(CliError::Parse(self))
        }
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Defects in a field declaration or an option binding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("tag parse error: expected key=value at {rest:?}")]
    MissingEquals { rest: String },

    #[error("tag parse error: empty key before '='")]
    EmptyKey,

    #[error("tag parse error: unterminated quote in value of {key:?}")]
    UnterminatedQuote { key: String },

    #[error("tag parse error: expected whitespace after quoted value of {key:?}")]
    ExpectedSeparator { key: String },

    #[error("tag parse error: unknown tag key {0:?}")]
    UnknownKey(String),

    #[error("tag parse error: unsupported type: {0:?}")]
    UnknownType(String),

    #[error(
        "tag parse error: field {field}: type {declared} conflicts with inferred type {inferred}"
    )]
    TypeConflict {
        field: String,
        declared: String,
        inferred: &'static str,
    },

    #[error("tag parse error: field {field}: default must come after type")]
    DefaultBeforeType { field: String },

    #[error("tag parse error: field {field}: invalid default {value:?}: {reason}")]
    InvalidDefault {
        field: String,
        value: String,
        reason: String,
    },

    #[error("tag parse error: field {field}: no type declared")]
    MissingType { field: String },

    #[error("tag parse error: field {field}: empty option name")]
    EmptyName { field: String },

    #[error("option {option}: type {option_type} cannot be bound to {target} storage")]
    BindingMismatch {
        option: String,
        option_type: String,
        target: &'static str,
    },
}
