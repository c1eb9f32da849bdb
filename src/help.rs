//! Usage synopsis and two-column word-wrapped help rendering
//!
//! Rendering is driven entirely by the declarations accumulated in a
//! `CommandLineSyntax`; nothing here mutates parse state.

use crate::syntax::{dashed, CommandLineSyntax, RegisteredParameter, RegisteredQualifier};

/// Gap between the longest name column and the help column
const COLUMN_GUTTER: usize = 8;

/// Leading indent of every table row
const ROW_INDENT: usize = 4;

impl CommandLineSyntax {
    /// Render help for the current declarations.
    ///
    /// When commands exist and none matched, a global page listing the
    /// commands is produced; otherwise a single-command page with the
    /// qualifier/parameter table. Lines wrap at `max_width`; pass
    /// `usize::MAX` for unwrapped output.
    pub fn help_text(&self, program_name: &str, max_width: usize) -> String {
        if self.parsed_command.is_some() || self.commands.is_empty() {
            self.command_help_text(program_name, self.parsed_command, max_width)
        } else {
            self.global_help_text(program_name, max_width)
        }
    }

    fn command_help_text(
        &self,
        program_name: &str,
        command: Option<usize>,
        max_width: usize,
    ) -> String {
        let mut text = String::new();
        write_syntax(&mut text, program_name, &self.command_syntax(command), max_width);

        let rows = self.help_rows(command);
        if !rows.is_empty() {
            text.push('\n');
            write_rows(&mut text, &rows, max_width);
        }

        text
    }

    fn global_help_text(&self, program_name: &str, max_width: usize) -> String {
        let mut text = String::new();
        write_syntax(&mut text, program_name, &self.global_syntax(), max_width);

        text.push('\n');
        text.push_str("Available commands:\n");
        text.push('\n');

        let rows: Vec<(String, String)> = self
            .commands
            .iter()
            .map(|command| (command.name.clone(), command.help.clone()))
            .collect();
        write_rows(&mut text, &rows, max_width);

        text
    }

    /// Usage tokens: global qualifiers, the command name, its qualifiers,
    /// then `[--]` and the parameters when any exist
    fn command_syntax(&self, command: Option<usize>) -> Vec<String> {
        let mut tokens = Vec::new();

        for qualifier in self.qualifiers.iter().filter(|q| q.command.is_none()) {
            tokens.push(qualifier_syntax(qualifier));
        }

        if let Some(index) = command {
            tokens.push(self.commands[index].name.clone());
            for qualifier in self.qualifiers.iter().filter(|q| q.command == Some(index)) {
                tokens.push(qualifier_syntax(qualifier));
            }
        }

        let parameters: Vec<&RegisteredParameter> = self.visible_parameters(command).collect();
        if !parameters.is_empty() {
            tokens.push("[--]".to_string());
            for parameter in parameters {
                tokens.push(parameter_syntax(parameter));
            }
        }

        tokens
    }

    fn global_syntax(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .qualifiers
            .iter()
            .filter(|q| q.command.is_none())
            .map(qualifier_syntax)
            .collect();
        tokens.push("<command>".to_string());
        tokens.push("[<args>]".to_string());
        tokens
    }

    /// Table rows: parameters first, then qualifiers, in declaration order
    fn help_rows(&self, command: Option<usize>) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        for parameter in self.visible_parameters(command) {
            rows.push((format!("<{}>", parameter.name), parameter.help.clone()));
        }
        for qualifier in self.visible_qualifiers(command) {
            rows.push((qualifier_column(qualifier), qualifier.help.clone()));
        }
        rows
    }
}

/// `[-q|--quiet]` for optional qualifiers, `(-q|--quiet)` for required ones
/// with several aliases, bare `-q|--quiet` otherwise
fn qualifier_syntax(qualifier: &RegisteredQualifier) -> String {
    let multiple_names = qualifier.names.len() > 1;
    let mut token = String::new();

    if !qualifier.required {
        token.push('[');
    } else if multiple_names {
        token.push('(');
    }

    for (position, name) in qualifier.names.iter().enumerate() {
        if position > 0 {
            token.push('|');
        }
        token.push_str(&dashed(name));
    }

    if !qualifier.required {
        token.push(']');
    } else if multiple_names {
        token.push(')');
    }

    token
}

fn parameter_syntax(parameter: &RegisteredParameter) -> String {
    if parameter.required {
        format!("<{}>", parameter.name)
    } else {
        format!("[<{}>]", parameter.name)
    }
}

fn qualifier_column(qualifier: &RegisteredQualifier) -> String {
    qualifier
        .names
        .iter()
        .map(|name| dashed(name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_syntax(text: &mut String, program_name: &str, tokens: &[String], max_width: usize) {
    text.push_str("usage: ");
    text.push_str(program_name);
    text.push(' ');

    let indent = text.len();
    let width = if indent < max_width {
        max_width - indent
    } else {
        max_width
    };

    let lines = word_wrap(tokens.iter().map(String::as_str), width);
    if lines.is_empty() {
        text.push('\n');
        return;
    }

    for (position, line) in lines.iter().enumerate() {
        if position > 0 {
            push_spaces(text, indent);
        }
        text.push_str(line);
        text.push('\n');
    }
}

fn write_rows(text: &mut String, rows: &[(String, String)], max_width: usize) {
    let max_column_width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let help_indent = max_column_width + COLUMN_GUTTER;
    let max_help_width = if help_indent <= max_width {
        max_width - help_indent
    } else {
        max_width
    };

    for (name, help) in rows {
        push_spaces(text, ROW_INDENT);
        text.push_str(name);
        push_spaces(text, help_indent - ROW_INDENT - name.len());
        write_help(text, help, help_indent, max_help_width);
    }
}

fn write_help(text: &mut String, help: &str, help_indent: usize, max_help_width: usize) {
    let lines = word_wrap(help.split(' '), max_help_width);
    if lines.is_empty() {
        text.push('\n');
        return;
    }

    for (position, line) in lines.iter().enumerate() {
        if position > 0 {
            push_spaces(text, help_indent);
        }
        text.push_str(line);
        text.push('\n');
    }
}

/// Greedily pack whitespace-delimited words into lines of at most
/// `max_width`; a single word longer than the width gets its own line,
/// unbroken.
fn word_wrap<'a, I>(tokens: I, max_width: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in tokens {
        let new_length = if current.is_empty() {
            token.len()
        } else {
            current.len() + 1 + token.len()
        };

        if new_length > max_width {
            if current.is_empty() {
                lines.push(token.to_string());
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(token);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn push_spaces(text: &mut String, count: usize) {
    for _ in 0..count {
        text.push(' ');
    }
}
