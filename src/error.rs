//! Error type shared by every parsing stage

use thiserror::Error;

/// Errors surfaced by tokenizing, classification, declaration, and validation.
///
/// Library code only returns these; the [`parse`](crate::parse) entry point is
/// the single place that turns one into user-facing output and an exit status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    /// A quote opened at `position` (0-based) was never closed
    #[error("Unmatched quote at position {position}")]
    UnmatchedQuote { position: usize },

    /// An `@file` token referenced a file that could not be read
    #[error("Response file '{path}' doesn't exist.")]
    ResponseFileNotFound { path: String },

    /// Commands were declared but the first input token matched none of them
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },

    /// Commands were declared but the input carries no command token
    #[error("missing command")]
    MissingCommand,

    /// A qualifier-shaped input token matched no declared qualifier
    #[error("invalid qualifier {modifier}{name}")]
    InvalidQualifier { modifier: String, name: String },

    /// A scalar qualifier was given more than one value
    #[error("qualifier {name} is specified multiple times")]
    DuplicateQualifierValue { name: String },

    /// A positional input token was left over after all declarations
    #[error("extra parameter '{name}'")]
    ExtraParameter { name: String },

    #[error("required qualifier '{name}' not specified")]
    MissingRequiredQualifier { name: String },

    #[error("required parameter '{name}' not specified")]
    MissingRequiredParameter { name: String },

    /// A value converter rejected the raw text; `target` is `--name` for
    /// qualifiers and `<name>` for parameters
    #[error("cannot parse value for {target}: {message}")]
    ValueConversion { target: String, message: String },

    /// The declaration sequence itself was malformed (duplicate name,
    /// parameters before qualifiers, global parameter after a command)
    #[error("{message}")]
    DeclarationConflict { message: String },
}

impl SyntaxError {
    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        SyntaxError::DeclarationConflict {
            message: message.into(),
        }
    }
}
