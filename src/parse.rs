//! Top-level entry point: the only place errors become output and exits

use std::env;
use std::path::Path;
use std::process;

use crate::error::SyntaxError;
use crate::syntax::{CommandLineSyntax, Necessity};

/// Parse `args` against the declarations made by `declare`.
///
/// A `?`/`help` qualifier is pre-registered before the callback runs. Any
/// `SyntaxError` raised during classification or declaration prints
/// `error: <message>` and exits with status 1. A help request prints the
/// help page and exits with status 0. Otherwise the input is validated; on
/// failure the error and the help page are printed and the process exits
/// with status 1. On success the values bound by the callback's declarations
/// are left in the caller's hands.
pub fn parse<I, S, F>(args: I, declare: F)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnOnce(&mut CommandLineSyntax) -> Result<(), SyntaxError>,
{
    let mut syntax = match CommandLineSyntax::from_args(args) {
        Ok(syntax) => syntax,
        Err(err) => exit_with_error(&err),
    };

    let mut show_help = false;
    let declared = syntax
        .flag("?|help", Necessity::Optional, "Shows this help page")
        .map(|requested| show_help = requested)
        .and_then(|()| declare(&mut syntax));

    if let Err(err) = declared {
        exit_with_error(&err);
    }

    if show_help {
        println!("{}", render_help(&syntax));
        process::exit(0);
    }

    if let Err(err) = syntax.validate() {
        println!("error: {err}");
        println!("{}", render_help(&syntax));
        process::exit(1);
    }
}

fn exit_with_error(err: &SyntaxError) -> ! {
    println!("error: {err}");
    process::exit(1);
}

fn render_help(syntax: &CommandLineSyntax) -> String {
    syntax.help_text(&program_name(), help_width())
}

/// Lowercased file stem of the running executable
fn program_name() -> String {
    env::args()
        .next()
        .and_then(|path| {
            Path::new(&path)
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_lowercase())
        })
        .unwrap_or_else(|| "program".to_string())
}

fn help_width() -> usize {
    let (_, columns) = console::Term::stdout().size();
    (columns as usize).saturating_sub(2)
}
