//! arglet: declarative command-line parsing
//!
//! Declare commands, qualifiers (flags/options), and positional parameters
//! against a [`CommandLineSyntax`]; each declaration returns the value bound
//! from the input. The same declarations drive validation and generated
//! help text. Input may arrive pre-split or as a raw string with shell-like
//! quoting, and `@file` response files splice extra arguments in.

pub mod argument;
pub mod error;
pub mod escape;
pub mod help;
pub mod parse;
pub mod syntax;
pub mod tokenizer;

pub use argument::{CommandLineArgument, Modifier};
pub use error::SyntaxError;
pub use escape::{escape_argument, join_arguments};
pub use parse::parse;
pub use syntax::{CommandLineSyntax, Necessity};
pub use tokenizer::split;
