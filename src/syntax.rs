//! Declaration and matching engine for commands, qualifiers, and parameters
//!
//! One `CommandLineSyntax` serves exactly one parse session: declarations are
//! matched eagerly against the classified argument list as they arrive, and
//! the whole registry is discarded after `validate()`.

use std::fmt;
use std::str::FromStr;

use crate::argument::CommandLineArgument;
use crate::error::SyntaxError;

/// Whether a declared qualifier or parameter must appear in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Necessity {
    Required,
    Optional,
}

impl Necessity {
    pub fn is_required(self) -> bool {
        matches!(self, Necessity::Required)
    }
}

#[derive(Debug)]
pub(crate) struct RegisteredCommand {
    pub(crate) name: String,
    pub(crate) help: String,
}

#[derive(Debug)]
pub(crate) struct RegisteredQualifier {
    pub(crate) command: Option<usize>,
    pub(crate) names: Vec<String>,
    pub(crate) required: bool,
    pub(crate) help: String,
    pub(crate) matched: bool,
}

impl RegisteredQualifier {
    /// Display name: the first alias longer than one character, else the first
    pub(crate) fn display_name(&self) -> &str {
        self.names
            .iter()
            .find(|name| name.chars().count() > 1)
            .unwrap_or(&self.names[0])
    }

    /// Display name with its `-`/`--` prefix
    pub(crate) fn dashed_name(&self) -> String {
        dashed(self.display_name())
    }
}

#[derive(Debug)]
pub(crate) struct RegisteredParameter {
    pub(crate) command: Option<usize>,
    pub(crate) name: String,
    pub(crate) required: bool,
    pub(crate) help: String,
    pub(crate) matched: bool,
}

/// Single-character names take a single dash, everything else a double dash
pub(crate) fn dashed(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

/// Declaration registry and matching engine for one parse session.
///
/// Declarations return the bound value directly. Qualifiers must be declared
/// before the parameters of the same command, and commands close the global
/// parameter namespace. Declarations made while a command other than the
/// recognized one is current still register (so help and validation see them)
/// but return their default untouched.
pub struct CommandLineSyntax {
    pub(crate) arguments: Vec<CommandLineArgument>,
    pub(crate) commands: Vec<RegisteredCommand>,
    pub(crate) qualifiers: Vec<RegisteredQualifier>,
    pub(crate) parameters: Vec<RegisteredParameter>,
    defined_command: Option<usize>,
    pub(crate) parsed_command: Option<usize>,
}

impl CommandLineSyntax {
    /// Build a syntax from a raw command-line string
    pub fn new(command_line: &str) -> Result<Self, SyntaxError> {
        Ok(Self::with_arguments(CommandLineArgument::parse_line(
            command_line,
        )?))
    }

    /// Build a syntax from pre-split arguments (e.g. `std::env::args`)
    pub fn from_args<I, S>(args: I) -> Result<Self, SyntaxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_arguments(CommandLineArgument::parse_args(args)?))
    }

    fn with_arguments(arguments: Vec<CommandLineArgument>) -> Self {
        Self {
            arguments,
            commands: Vec::new(),
            qualifiers: Vec::new(),
            parameters: Vec::new(),
            defined_command: None,
            parsed_command: None,
        }
    }

    /// Declare a command. Returns whether it matched the first input token.
    ///
    /// At most one command matches per session; later declarations no longer
    /// attempt matching once one has.
    pub fn command(&mut self, name: &str, help: &str) -> Result<bool, SyntaxError> {
        if self.parameters.iter().any(|p| p.command.is_none()) {
            return Err(SyntaxError::conflict(
                "cannot define commands if global parameters exist",
            ));
        }
        if name.is_empty() {
            return Err(SyntaxError::conflict("you must specify a command name"));
        }
        if self.commands.iter().any(|c| c.name == name) {
            return Err(SyntaxError::conflict(format!(
                "command '{name}' is already registered"
            )));
        }

        self.commands.push(RegisteredCommand {
            name: name.to_string(),
            help: help.to_string(),
        });
        self.defined_command = Some(self.commands.len() - 1);

        if self.parsed_command.is_some() {
            return Ok(false);
        }

        let first_matches = self.arguments.first().is_some_and(|first| {
            !first.is_matched()
                && !first.is_qualifier()
                && !first.is_separator()
                && first.name() == name
        });

        if first_matches {
            self.arguments[0].mark_matched();
            self.parsed_command = self.defined_command;
        }

        Ok(first_matches)
    }

    /// Name of the command recognized from the input, if any
    pub fn parsed_command(&self) -> Option<&str> {
        self.parsed_command.map(|index| self.commands[index].name.as_str())
    }

    /// Declare a boolean qualifier.
    ///
    /// A bare word following the qualifier is never consumed as its value;
    /// only inline (`-b:true`) or separator-delimited values are parsed, and
    /// a value-less match yields `true`.
    pub fn flag(
        &mut self,
        spec: &str,
        necessity: Necessity,
        help: &str,
    ) -> Result<bool, SyntaxError> {
        let (index, matches) = self.collect_qualifier_matches(spec, necessity, help, true)?;

        let mut values = Vec::with_capacity(matches.len());
        for text in matches {
            let value = match text {
                None => true,
                Some(text) => self.convert_qualifier_value(index, &text, str::parse::<bool>)?,
            };
            values.push(value);
        }

        if values.len() > 1 {
            return Err(SyntaxError::DuplicateQualifierValue {
                name: self.qualifiers[index].dashed_name(),
            });
        }

        Ok(values.pop().unwrap_or(false))
    }

    /// Declare a scalar valued qualifier, converting with `FromStr`
    pub fn qualifier<T>(
        &mut self,
        spec: &str,
        default: T,
        necessity: Necessity,
        help: &str,
    ) -> Result<T, SyntaxError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.qualifier_with(spec, default, necessity, help, str::parse::<T>)
    }

    /// Declare a scalar valued qualifier with a caller-supplied converter
    pub fn qualifier_with<T, E, F>(
        &mut self,
        spec: &str,
        default: T,
        necessity: Necessity,
        help: &str,
        convert: F,
    ) -> Result<T, SyntaxError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        let (index, matches) = self.collect_qualifier_matches(spec, necessity, help, false)?;

        let mut values = Vec::new();
        for text in matches.into_iter().flatten() {
            values.push(self.convert_qualifier_value(index, &text, &convert)?);
        }

        if values.len() > 1 {
            return Err(SyntaxError::DuplicateQualifierValue {
                name: self.qualifiers[index].dashed_name(),
            });
        }

        Ok(values.pop().unwrap_or(default))
    }

    /// Declare an array-valued qualifier; matches accumulate in encounter order
    pub fn qualifier_list<T>(
        &mut self,
        spec: &str,
        necessity: Necessity,
        help: &str,
    ) -> Result<Vec<T>, SyntaxError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.qualifier_list_with(spec, necessity, help, str::parse::<T>)
    }

    /// Declare an array-valued qualifier with a caller-supplied converter
    pub fn qualifier_list_with<T, E, F>(
        &mut self,
        spec: &str,
        necessity: Necessity,
        help: &str,
        convert: F,
    ) -> Result<Vec<T>, SyntaxError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        let (index, matches) = self.collect_qualifier_matches(spec, necessity, help, false)?;

        let mut values = Vec::new();
        for text in matches.into_iter().flatten() {
            values.push(self.convert_qualifier_value(index, &text, &convert)?);
        }

        Ok(values)
    }

    /// Declare a scalar positional parameter, converting with `FromStr`
    pub fn parameter<T>(
        &mut self,
        name: &str,
        default: T,
        necessity: Necessity,
        help: &str,
    ) -> Result<T, SyntaxError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.parameter_with(name, default, necessity, help, str::parse::<T>)
    }

    /// Declare a scalar positional parameter with a caller-supplied converter
    pub fn parameter_with<T, E, F>(
        &mut self,
        name: &str,
        default: T,
        necessity: Necessity,
        help: &str,
        convert: F,
    ) -> Result<T, SyntaxError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        let index = self.register_parameter(name, necessity, help)?;

        if self.parsed_command != self.defined_command {
            return Ok(default);
        }

        match self.next_parameter_value() {
            Some(text) => {
                self.parameters[index].matched = true;
                self.convert_parameter_value(index, &text, &convert)
            }
            None => Ok(default),
        }
    }

    /// Declare an array-valued parameter that greedily consumes every
    /// remaining unmatched positional entry
    pub fn parameter_list<T>(
        &mut self,
        name: &str,
        necessity: Necessity,
        help: &str,
    ) -> Result<Vec<T>, SyntaxError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.parameter_list_with(name, necessity, help, str::parse::<T>)
    }

    /// Declare an array-valued parameter with a caller-supplied converter
    pub fn parameter_list_with<T, E, F>(
        &mut self,
        name: &str,
        necessity: Necessity,
        help: &str,
        convert: F,
    ) -> Result<Vec<T>, SyntaxError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        let index = self.register_parameter(name, necessity, help)?;

        if self.parsed_command != self.defined_command {
            return Ok(Vec::new());
        }

        let mut values = Vec::new();
        while let Some(text) = self.next_parameter_value() {
            self.parameters[index].matched = true;
            values.push(self.convert_parameter_value(index, &text, &convert)?);
        }

        Ok(values)
    }

    /// Post-declaration validation; the first failed check wins.
    ///
    /// Check order: command recognized, no unmatched input entries, required
    /// qualifiers present, required parameters present.
    pub fn validate(&self) -> Result<(), SyntaxError> {
        if self.parsed_command.is_none() && !self.commands.is_empty() {
            if let Some(first) = self.arguments.first() {
                if !first.is_qualifier() && !first.is_separator() {
                    return Err(SyntaxError::UnknownCommand {
                        name: first.name().to_string(),
                    });
                }
            }
            return Err(SyntaxError::MissingCommand);
        }

        for argument in &self.arguments {
            if argument.is_matched() {
                continue;
            }
            if argument.is_qualifier() {
                return Err(SyntaxError::InvalidQualifier {
                    modifier: argument
                        .modifier()
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                    name: argument.name().to_string(),
                });
            }
            return Err(SyntaxError::ExtraParameter {
                name: argument.name().to_string(),
            });
        }

        for qualifier in self.visible_qualifiers(self.parsed_command) {
            if qualifier.required && !qualifier.matched {
                return Err(SyntaxError::MissingRequiredQualifier {
                    name: qualifier.display_name().to_string(),
                });
            }
        }

        for parameter in self.visible_parameters(self.parsed_command) {
            if parameter.required && !parameter.matched {
                return Err(SyntaxError::MissingRequiredParameter {
                    name: parameter.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Qualifiers visible to `command`: global ones plus the command's own
    pub(crate) fn visible_qualifiers(
        &self,
        command: Option<usize>,
    ) -> impl Iterator<Item = &RegisteredQualifier> {
        self.qualifiers
            .iter()
            .filter(move |q| q.command.is_none() || q.command == command)
    }

    pub(crate) fn visible_parameters(
        &self,
        command: Option<usize>,
    ) -> impl Iterator<Item = &RegisteredParameter> {
        self.parameters.iter().filter(move |p| p.command == command)
    }

    fn register_qualifier(
        &mut self,
        spec: &str,
        necessity: Necessity,
        help: &str,
    ) -> Result<usize, SyntaxError> {
        if spec.is_empty() {
            return Err(SyntaxError::conflict("you must specify a qualifier name"));
        }

        let names: Vec<String> = spec.split('|').map(|name| name.trim().to_string()).collect();
        for (position, name) in names.iter().enumerate() {
            let taken = names[..position].contains(name)
                || self
                    .qualifiers
                    .iter()
                    .any(|q| q.names.iter().any(|existing| existing == name));
            if taken {
                return Err(SyntaxError::conflict(format!(
                    "qualifier '{name}' is already registered"
                )));
            }
        }

        self.qualifiers.push(RegisteredQualifier {
            command: self.defined_command,
            names,
            required: necessity.is_required(),
            help: help.to_string(),
            matched: false,
        });

        Ok(self.qualifiers.len() - 1)
    }

    fn register_parameter(
        &mut self,
        name: &str,
        necessity: Necessity,
        help: &str,
    ) -> Result<usize, SyntaxError> {
        if name.is_empty() {
            return Err(SyntaxError::conflict("you must specify a parameter name"));
        }
        if self.parameters.iter().any(|p| p.name == name) {
            return Err(SyntaxError::conflict(format!(
                "parameter '{name}' is already registered"
            )));
        }

        self.parameters.push(RegisteredParameter {
            command: self.defined_command,
            name: name.to_string(),
            required: necessity.is_required(),
            help: help.to_string(),
            matched: false,
        });

        Ok(self.parameters.len() - 1)
    }

    /// Register a qualifier and, when its command is active, scan the whole
    /// input for matches. Each match yields the consumed value text, or
    /// `None` when the occurrence carried no value.
    fn collect_qualifier_matches(
        &mut self,
        spec: &str,
        necessity: Necessity,
        help: &str,
        requires_separator: bool,
    ) -> Result<(usize, Vec<Option<String>>), SyntaxError> {
        if self
            .parameters
            .iter()
            .any(|p| p.command == self.defined_command)
        {
            return Err(SyntaxError::conflict(
                "qualifiers must be defined before any parameters",
            ));
        }

        let index = self.register_qualifier(spec, necessity, help)?;

        if self.parsed_command != self.defined_command {
            return Ok((index, Vec::new()));
        }

        let mut matches = Vec::new();
        let mut position = 0;
        while position < self.arguments.len() {
            if self.match_next_qualifier(&mut position, index) {
                self.qualifiers[index].matched = true;
                matches.push(self.take_value(&mut position, requires_separator));
            }
            position += 1;
        }

        Ok((index, matches))
    }

    /// Advance `position` to the next input entry naming this qualifier
    /// (case-insensitive across all aliases) and mark it consumed.
    fn match_next_qualifier(&mut self, position: &mut usize, qualifier: usize) -> bool {
        while *position < self.arguments.len() {
            let argument = &self.arguments[*position];
            if argument.is_qualifier()
                && self.qualifiers[qualifier]
                    .names
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(argument.name()))
            {
                self.arguments[*position].mark_matched();
                return true;
            }
            *position += 1;
        }
        false
    }

    /// Consume the value for the qualifier at `position`: an inline value if
    /// present, else a following separator-delimited or bare entry.
    fn take_value(&mut self, position: &mut usize, requires_separator: bool) -> Option<String> {
        if self.arguments[*position].has_value() {
            return self.arguments[*position].value().map(str::to_string);
        }

        *position += 1;
        if *position >= self.arguments.len() {
            return None;
        }

        let following = &self.arguments[*position];
        if following.is_qualifier() || following.is_matched() {
            return None;
        }

        if !following.is_separator() {
            // A bare word right after the qualifier; boolean qualifiers only
            // take separator-delimited values, so leave it for parameters.
            if requires_separator {
                return None;
            }
            let value = following.name().to_string();
            self.arguments[*position].mark_matched();
            return Some(value);
        }

        // Skip the separator and take whatever follows it
        self.arguments[*position].mark_matched();
        *position += 1;
        if *position < self.arguments.len() && !self.arguments[*position].is_qualifier() {
            let value = self.arguments[*position].name().to_string();
            self.arguments[*position].mark_matched();
            return Some(value);
        }

        None
    }

    /// Consume the next unmatched positional entry, left to right
    fn next_parameter_value(&mut self) -> Option<String> {
        let argument = self
            .arguments
            .iter_mut()
            .find(|a| !a.is_matched() && !a.is_qualifier() && !a.is_separator())?;
        argument.mark_matched();
        Some(argument.name().to_string())
    }

    fn convert_qualifier_value<T, E, F>(
        &self,
        index: usize,
        text: &str,
        convert: F,
    ) -> Result<T, SyntaxError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        convert(text).map_err(|err| SyntaxError::ValueConversion {
            target: format!("--{}", self.qualifiers[index].display_name()),
            message: err.to_string(),
        })
    }

    fn convert_parameter_value<T, E, F>(
        &self,
        index: usize,
        text: &str,
        convert: F,
    ) -> Result<T, SyntaxError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        convert(text).map_err(|err| SyntaxError::ValueConversion {
            target: format!("<{}>", self.parameters[index].name),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_array_qualifiers() {
        let mut syntax = CommandLineSyntax::new("-a x -b -a y").unwrap();

        let arg1: Vec<String> = syntax
            .qualifier_list("a|arg1", Necessity::Optional, "")
            .unwrap();
        let arg2 = syntax.flag("b|arg2", Necessity::Optional, "").unwrap();
        syntax.validate().unwrap();

        assert_eq!(arg1, vec!["x", "y"]);
        assert!(arg2);
    }

    #[test]
    fn test_parses_array_parameters() {
        let mut syntax = CommandLineSyntax::new("source1.cs source2.cs").unwrap();

        let sources: Vec<String> = syntax
            .parameter_list("sources", Necessity::Optional, "")
            .unwrap();
        syntax.validate().unwrap();

        assert_eq!(sources, vec!["source1.cs", "source2.cs"]);
    }

    #[test]
    fn test_detects_invalid_qualifier() {
        let mut syntax = CommandLineSyntax::new("-e -d").unwrap();

        let exists = syntax
            .flag("e|exists", Necessity::Required, "Some qualifier")
            .unwrap();
        assert!(exists);

        let err = syntax.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid qualifier -d");
    }

    #[test]
    fn test_detects_duplicate_scalar_qualifier() {
        let mut syntax = CommandLineSyntax::new("-a -b -a").unwrap();

        let err = syntax.flag("a|arg1", Necessity::Optional, "").unwrap_err();
        assert_eq!(err.to_string(), "qualifier -a is specified multiple times");
    }

    #[test]
    fn test_matches_command_and_binds_its_declarations() {
        let mut syntax = CommandLineSyntax::new("commit -m fix src/lib.rs").unwrap();

        assert!(syntax.command("commit", "Record changes").unwrap());
        let message = syntax
            .qualifier("m|message", String::new(), Necessity::Optional, "")
            .unwrap();
        let pathspec = syntax
            .parameter("pathspec", String::new(), Necessity::Optional, "")
            .unwrap();

        assert!(!syntax.command("pull", "Fetch and integrate").unwrap());
        let tags = syntax.flag("t|tags", Necessity::Optional, "").unwrap();

        syntax.validate().unwrap();

        assert_eq!(syntax.parsed_command(), Some("commit"));
        assert_eq!(message, "fix");
        assert_eq!(pathspec, "src/lib.rs");
        assert!(!tags);
    }

    #[test]
    fn test_inactive_command_declarations_return_defaults() {
        let mut syntax = CommandLineSyntax::new("pull -t origin").unwrap();

        assert!(!syntax.command("commit", "").unwrap());
        let message = syntax
            .qualifier("m|message", "default".to_string(), Necessity::Optional, "")
            .unwrap();
        assert_eq!(message, "default");

        assert!(syntax.command("pull", "").unwrap());
        let tags = syntax.flag("t|tags", Necessity::Optional, "").unwrap();
        let repository = syntax
            .parameter("repository", String::new(), Necessity::Optional, "")
            .unwrap();
        syntax.validate().unwrap();

        assert!(tags);
        assert_eq!(repository, "origin");
    }

    #[test]
    fn test_unknown_command() {
        let mut syntax = CommandLineSyntax::new("push").unwrap();
        syntax.command("commit", "").unwrap();
        syntax.command("pull", "").unwrap();

        let err = syntax.validate().unwrap_err();
        assert_eq!(err.to_string(), "unknown command 'push'");
    }

    #[test]
    fn test_missing_command() {
        let mut syntax = CommandLineSyntax::new("").unwrap();
        syntax.command("commit", "").unwrap();

        assert_eq!(syntax.validate().unwrap_err(), SyntaxError::MissingCommand);
    }

    #[test]
    fn test_qualifier_first_input_reports_missing_command() {
        let mut syntax = CommandLineSyntax::new("-q").unwrap();
        let quiet = syntax.flag("q|quiet", Necessity::Optional, "").unwrap();
        syntax.command("commit", "").unwrap();

        assert!(quiet);
        assert_eq!(syntax.validate().unwrap_err(), SyntaxError::MissingCommand);
    }

    #[test]
    fn test_missing_required_qualifier() {
        let mut syntax = CommandLineSyntax::new("commit").unwrap();
        syntax.command("commit", "").unwrap();
        syntax
            .qualifier("m|message", String::new(), Necessity::Required, "")
            .unwrap();

        let err = syntax.validate().unwrap_err();
        assert_eq!(err.to_string(), "required qualifier 'message' not specified");
    }

    #[test]
    fn test_missing_required_parameter() {
        let mut syntax = CommandLineSyntax::new("commit").unwrap();
        syntax.command("commit", "").unwrap();
        syntax
            .parameter("pathspec", String::new(), Necessity::Required, "")
            .unwrap();

        let err = syntax.validate().unwrap_err();
        assert_eq!(err.to_string(), "required parameter 'pathspec' not specified");
    }

    #[test]
    fn test_extra_parameter() {
        let mut syntax = CommandLineSyntax::new("one two").unwrap();
        syntax
            .parameter("first", String::new(), Necessity::Optional, "")
            .unwrap();

        let err = syntax.validate().unwrap_err();
        assert_eq!(err.to_string(), "extra parameter 'two'");
    }

    #[test]
    fn test_boolean_never_consumes_following_bare_word() {
        let mut syntax = CommandLineSyntax::new("-v input.txt").unwrap();

        let verbose = syntax.flag("v|verbose", Necessity::Optional, "").unwrap();
        let file = syntax
            .parameter("file", String::new(), Necessity::Optional, "")
            .unwrap();
        syntax.validate().unwrap();

        assert!(verbose);
        assert_eq!(file, "input.txt");
    }

    #[test]
    fn test_boolean_takes_inline_and_separator_values() {
        let mut syntax = CommandLineSyntax::new("-v:false").unwrap();
        assert!(!syntax.flag("v|verbose", Necessity::Optional, "").unwrap());
        syntax.validate().unwrap();

        let mut syntax = CommandLineSyntax::new("-v = true").unwrap();
        assert!(syntax.flag("v|verbose", Necessity::Optional, "").unwrap());
        syntax.validate().unwrap();
    }

    #[test]
    fn test_qualifier_value_forms() {
        for line in ["-o:out.exe", "/o=out.exe", "--out out.exe", "-o : out.exe"] {
            let mut syntax = CommandLineSyntax::new(line).unwrap();
            let out = syntax
                .qualifier("o|out", String::new(), Necessity::Optional, "")
                .unwrap();
            syntax.validate().unwrap();
            assert_eq!(out, "out.exe", "input: {line}");
        }
    }

    #[test]
    fn test_qualifier_matching_is_case_insensitive() {
        let mut syntax = CommandLineSyntax::new("-Q --Force").unwrap();

        assert!(syntax.flag("q|quiet", Necessity::Optional, "").unwrap());
        assert!(syntax.flag("f|force", Necessity::Optional, "").unwrap());
        syntax.validate().unwrap();
    }

    #[test]
    fn test_qualifier_without_value_returns_default() {
        let mut syntax = CommandLineSyntax::new("-o").unwrap();

        let out = syntax
            .qualifier("o|out", "default".to_string(), Necessity::Optional, "")
            .unwrap();
        syntax.validate().unwrap();

        assert_eq!(out, "default");
    }

    #[test]
    fn test_qualifier_conversion_error() {
        let mut syntax = CommandLineSyntax::new("-n:abc").unwrap();

        let err = syntax
            .qualifier("n|number", 0i32, Necessity::Optional, "")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot parse value for --number: invalid digit found in string"
        );
    }

    #[test]
    fn test_parameter_conversion_error() {
        let mut syntax = CommandLineSyntax::new("abc").unwrap();

        let err = syntax
            .parameter("count", 0i32, Necessity::Optional, "")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot parse value for <count>: invalid digit found in string"
        );
    }

    #[test]
    fn test_custom_converter() {
        let mut syntax = CommandLineSyntax::new("--level:warn").unwrap();

        let level = syntax
            .qualifier_with("l|level", 0u8, Necessity::Optional, "", |text| match text {
                "error" => Ok(1),
                "warn" => Ok(2),
                "info" => Ok(3),
                other => Err(format!("unknown level '{other}'")),
            })
            .unwrap();
        syntax.validate().unwrap();

        assert_eq!(level, 2);
    }

    #[test]
    fn test_duplicate_alias_is_a_declaration_conflict() {
        let mut syntax = CommandLineSyntax::new("").unwrap();
        syntax.flag("f|force", Necessity::Optional, "").unwrap();

        let err = syntax.flag("x|force", Necessity::Optional, "").unwrap_err();
        assert_eq!(err.to_string(), "qualifier 'force' is already registered");
    }

    #[test]
    fn test_duplicate_command_is_a_declaration_conflict() {
        let mut syntax = CommandLineSyntax::new("").unwrap();
        syntax.command("commit", "").unwrap();

        let err = syntax.command("commit", "").unwrap_err();
        assert_eq!(err.to_string(), "command 'commit' is already registered");
    }

    #[test]
    fn test_duplicate_parameter_is_a_declaration_conflict() {
        let mut syntax = CommandLineSyntax::new("").unwrap();
        syntax
            .parameter("file", String::new(), Necessity::Optional, "")
            .unwrap();

        let err = syntax
            .parameter("file", String::new(), Necessity::Optional, "")
            .unwrap_err();
        assert_eq!(err.to_string(), "parameter 'file' is already registered");
    }

    #[test]
    fn test_qualifiers_must_precede_parameters() {
        let mut syntax = CommandLineSyntax::new("").unwrap();
        syntax
            .parameter("file", String::new(), Necessity::Optional, "")
            .unwrap();

        let err = syntax.flag("q|quiet", Necessity::Optional, "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "qualifiers must be defined before any parameters"
        );
    }

    #[test]
    fn test_no_commands_after_global_parameters() {
        let mut syntax = CommandLineSyntax::new("").unwrap();
        syntax
            .parameter("file", String::new(), Necessity::Optional, "")
            .unwrap();

        let err = syntax.command("commit", "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot define commands if global parameters exist"
        );
    }

    #[test]
    fn test_qualifier_ordering_is_scoped_per_command() {
        // commit declares a parameter, yet pull may still declare qualifiers
        let mut syntax = CommandLineSyntax::new("pull origin").unwrap();
        syntax.command("commit", "").unwrap();
        syntax
            .parameter("pathspec", String::new(), Necessity::Optional, "")
            .unwrap();
        syntax.command("pull", "").unwrap();
        let tags = syntax.flag("t|tags", Necessity::Optional, "").unwrap();
        let repository = syntax
            .parameter("repository", String::new(), Necessity::Optional, "")
            .unwrap();
        syntax.validate().unwrap();

        assert!(!tags);
        assert_eq!(repository, "origin");
    }

    #[test]
    fn test_everything_after_double_dash_is_positional() {
        let mut syntax = CommandLineSyntax::new("-q -- -r x").unwrap();

        let quiet = syntax.flag("q|quiet", Necessity::Optional, "").unwrap();
        let rest: Vec<String> = syntax
            .parameter_list("args", Necessity::Optional, "")
            .unwrap();
        syntax.validate().unwrap();

        assert!(quiet);
        assert_eq!(rest, vec!["-r", "x"]);
    }
}
