//! Demonstration program: a toy version-control CLI built on the library

use std::env;

use arglet::{CommandLineSyntax, Necessity, SyntaxError};

fn main() {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    let mut is_quiet = false;
    let mut is_dry_run = false;
    let mut use_force = false;

    let mut command = String::new();

    let mut message = String::new();
    let mut edit = false;
    let mut add_signoff = false;
    let mut pathspec = String::new();

    let mut fetch_tags = false;
    let mut fetch_all = false;
    let mut repository = String::new();
    let mut refspec = String::new();

    let mut source_files: Vec<String> = Vec::new();
    let mut references: Vec<String> = Vec::new();

    arglet::parse(env::args().skip(1), |syntax: &mut CommandLineSyntax| {
        // Global qualifiers
        is_quiet = syntax.flag(
            "q|quiet",
            Necessity::Optional,
            "do not print names of files removed",
        )?;
        is_dry_run = syntax.flag("n|dry-run", Necessity::Optional, "dry run")?;
        use_force = syntax.flag("f|force", Necessity::Optional, "force")?;

        // Commit
        if syntax.command("commit", "Record changes to the repository")? {
            command = "commit".to_string();
        }
        message = syntax.qualifier(
            "m|message",
            String::new(),
            Necessity::Optional,
            "commit message",
        )?;
        edit = syntax.flag("e|edit", Necessity::Optional, "force edit of commit")?;
        add_signoff = syntax.flag("s|signoff", Necessity::Optional, "add Signed-off-by:")?;
        pathspec = syntax.parameter(
            "pathspec",
            String::new(),
            Necessity::Optional,
            "Path to a file",
        )?;

        // Pull
        if syntax.command(
            "pull",
            "Fetch from and integrate with another repository or a local branch",
        )? {
            command = "pull".to_string();
        }
        fetch_tags = syntax.flag(
            "t|tags",
            Necessity::Optional,
            "fetch all tags and associated objects",
        )?;
        fetch_all = syntax.flag("all", Necessity::Optional, "fetch from all remotes")?;
        repository = syntax.parameter(
            "repository",
            String::new(),
            Necessity::Optional,
            "repository to pull from",
        )?;
        refspec = syntax.parameter(
            "refspec",
            String::new(),
            Necessity::Optional,
            "refspec to be pulled. Please note that this help text is quite extensive \
             and should be completely read. Also note how it flows around quite nicely.",
        )?;

        // Compile
        if syntax.command("compile", "Compile the sources using the Rust compiler")? {
            command = "compile".to_string();
        }
        references = syntax.qualifier_list(
            "r|reference",
            Necessity::Optional,
            "Reference metadata from the specified library files",
        )?;
        source_files = syntax.parameter_list(
            "file",
            Necessity::Optional,
            "Rust source from the specified source files",
        )?;

        Ok::<(), SyntaxError>(())
    });

    println!("command    = {command}");
    println!("isQuiet    = {is_quiet}");
    println!("isDryRun   = {is_dry_run}");
    println!("useForce   = {use_force}");

    match command.as_str() {
        "" => {}
        "commit" => {
            println!("message    = {message}");
            println!("edit       = {edit}");
            println!("addSignoff = {add_signoff}");
            println!("pathspec   = {pathspec}");
        }
        "pull" => {
            println!("fetchTags  = {fetch_tags}");
            println!("fetchAll   = {fetch_all}");
            println!("repository = {repository}");
            println!("refspec    = {refspec}");
        }
        "compile" => {
            for value in &references {
                println!("reference  = {value}");
            }
            for value in &source_files {
                println!("source     = {value}");
            }
        }
        _ => {}
    }
}
