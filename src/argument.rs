//! Classification of raw tokens into structured argument records

use std::fmt;
use std::fs;

use crate::error::SyntaxError;
use crate::tokenizer;

/// The prefix that marks a token as a qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    DoubleDash,
    Dash,
    Slash,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::DoubleDash => "--",
            Modifier::Dash => "-",
            Modifier::Slash => "/",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One classified input token: modifier, name, optional inline value, and a
/// matched flag that flips once when a declaration consumes the token.
#[derive(Debug, Clone)]
pub struct CommandLineArgument {
    modifier: Option<Modifier>,
    name: String,
    value: Option<String>,
    matched: bool,
}

impl CommandLineArgument {
    fn new(modifier: Option<Modifier>, name: String, value: Option<String>) -> Self {
        Self {
            modifier,
            name,
            value,
            matched: false,
        }
    }

    /// Classify a raw command line (tokenize first, then classify)
    pub fn parse_line(command_line: &str) -> Result<Vec<CommandLineArgument>, SyntaxError> {
        let tokens = tokenizer::split(command_line)?;
        Self::parse_args(tokens)
    }

    /// Classify pre-split tokens.
    ///
    /// Response files are expanded first. A lone `--` is consumed and turns
    /// every later token into a bare value. Before that point each token is
    /// checked for a `--`, `-`, or `/` prefix (in that order) and, when
    /// prefixed, for a `:`- or `=`-delimited inline value (`:` wins). Finally
    /// single-dash qualifiers with multi-character names expand right-to-left
    /// into one qualifier per character; `/` and `--` qualifiers never expand.
    pub fn parse_args<I, S>(args: I) -> Result<Vec<CommandLineArgument>, SyntaxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = expand_response_files(args)?;

        let mut arguments = Vec::new();
        let mut seen_dash_dash = false;

        for token in tokens {
            if !seen_dash_dash && token == "--" {
                seen_dash_dash = true;
                continue;
            }

            let (modifier, remainder) = if seen_dash_dash {
                (None, token.as_str())
            } else {
                extract_modifier(&token)
            };

            let (name, value) = match modifier {
                Some(_) => split_key_value(remainder),
                None => (remainder, None),
            };

            arguments.push(CommandLineArgument::new(
                modifier,
                name.to_string(),
                value.map(str::to_string),
            ));
        }

        // Combined single-letter qualifiers (-xdf) expand to -x -d -f so
        // later phases never see the combined form.
        let mut index = arguments.len();
        while index > 0 {
            index -= 1;
            if needs_single_letter_expansion(&arguments[index]) {
                let letters: Vec<char> = arguments[index].name.chars().collect();
                arguments.splice(
                    index..=index,
                    letters.into_iter().map(|letter| {
                        CommandLineArgument::new(Some(Modifier::Dash), letter.to_string(), None)
                    }),
                );
            }
        }

        Ok(arguments)
    }

    pub fn modifier(&self) -> Option<Modifier> {
        self.modifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Qualifier-shaped: carries a modifier prefix
    pub fn is_qualifier(&self) -> bool {
        self.modifier.is_some()
    }

    /// A standalone `:` or `=` delimiting a qualifier from its value
    pub fn is_separator(&self) -> bool {
        self.modifier.is_none() && (self.name == ":" || self.name == "=")
    }

    /// Whether an inline value was attached (empty inline values don't count)
    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }
}

impl fmt::Display for CommandLineArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifier = self.modifier.map(|m| m.as_str()).unwrap_or("");
        match self.value.as_deref().filter(|value| !value.is_empty()) {
            Some(value) => write!(f, "{}{}:{}", modifier, self.name, value),
            None => write!(f, "{}{}", modifier, self.name),
        }
    }
}

/// Replace every `@path` token with the referenced file's contents, one
/// argument per line, trimmed, blank lines dropped. Expansion is one level
/// deep: lines from a response file are not scanned for `@` again.
fn expand_response_files<I, S>(args: I) -> Result<Vec<String>, SyntaxError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expanded = Vec::new();

    for argument in args {
        let argument = argument.as_ref();

        match argument.strip_prefix('@') {
            None => expanded.push(argument.to_string()),
            Some(path) => {
                let contents =
                    fs::read_to_string(path).map_err(|_| SyntaxError::ResponseFileNotFound {
                        path: path.to_string(),
                    })?;

                for line in contents.lines() {
                    let line = line.trim();
                    if !line.is_empty() {
                        expanded.push(line.to_string());
                    }
                }
            }
        }
    }

    Ok(expanded)
}

fn extract_modifier(token: &str) -> (Option<Modifier>, &str) {
    for modifier in [Modifier::DoubleDash, Modifier::Dash, Modifier::Slash] {
        if let Some(remainder) = token.strip_prefix(modifier.as_str()) {
            return (Some(modifier), remainder);
        }
    }
    (None, token)
}

fn split_key_value(text: &str) -> (&str, Option<&str>) {
    for separator in [':', '='] {
        if let Some((key, value)) = text.split_once(separator) {
            return (key, Some(value));
        }
    }
    (text, None)
}

fn needs_single_letter_expansion(argument: &CommandLineArgument) -> bool {
    argument.is_qualifier()
        && argument.modifier == Some(Modifier::Dash)
        && argument.name.chars().count() > 1
}
