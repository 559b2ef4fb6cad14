// File: ./src/cli.rs
//! Command-line arguments and help text.

use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Agenda { date: Option<String>, json: bool },
    List { category: Option<String> },
    Open { category: String },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub no_color: bool,
    pub verbose: bool,
    pub command: Command,
}

/// Parses arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut root = None;
    let mut no_color = false;
    let mut verbose = false;
    let mut json = false;
    let mut positional = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => match iter.next() {
                Some(path) => root = Some(PathBuf::from(path)),
                None => bail!("{} requires a path", arg),
            },
            "--no-color" => no_color = true,
            "-v" | "--verbose" => verbose = true,
            "--json" => json = true,
            "-h" | "--help" => positional.insert(0, "help".to_string()),
            _ if arg.starts_with("--") => bail!("Unknown option '{}'", arg),
            _ => positional.push(arg),
        }
    }

    let mut words = positional.into_iter();
    let Some(name) = words.next() else {
        bail!("Missing command");
    };
    let argument = words.next();
    if let Some(extra) = words.next() {
        bail!("Unexpected argument '{}'", extra);
    }

    let command = match name.as_str() {
        "agenda" | "a" => Command::Agenda {
            date: argument,
            json,
        },
        "list" | "ls" => Command::List { category: argument },
        "open" | "o" => match argument {
            Some(category) => Command::Open { category },
            None => bail!("Usage: todo {} <category>", name),
        },
        "help" | "h" => Command::Help,
        _ => bail!("Unknown command '{}'", name),
    };

    if json && !matches!(command, Command::Agenda { .. }) {
        bail!("--json is only supported by 'agenda'");
    }

    Ok(CliArgs {
        root,
        no_color,
        verbose,
        command,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Plaintask v{} - plaintext task lists and a daily agenda",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <command>", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    a, agenda [date] [--json]   Agenda for a date (default: today)");
    println!("    ls, list [category]         List all categories, or one");
    println!("    o, open <category>          Edit a category file in $EDITOR");
    println!("    h, help                     Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and tasks.");
    println!("    --no-color            Disable colored output.");
    println!("    -v, --verbose         Log debug information to stderr.");
    println!();
    println!("DATES:");
    println!("    4 May 2021, 04 December 2021, today, tomorrow, yesterday,");
    println!("    or a day offset from today (1, -2).");
    println!();
    println!("FILE SYNTAX:");
    println!("    TODO Summary          Task line: DOING NEXT TODO EVENT WAITING HELD");
    println!("                          BACKLOG DONE CANCELLED, then the summary");
    println!("    * SCHEDULED: 4 May 2021 [09:00[-10:00]] [+2w]");
    println!("    * DEADLINE: 4 May 2021");
    println!("    * PRIORITY: 1         Lower numbers come first");
    println!("    * REPEATED: 4 May 2021  Last completed cycle of a repeating task");
    println!("    * NOTE: text");
    println!("    * [] item / * [X] item  Checklist");
    println!("    Any other line is a comment.");
    println!();
    println!("ENVIRONMENT:");
    println!("    TODO_DIRECTORY        Directory of category files (default ~/.todo)");
    println!("    EDITOR                Editor used by 'open' (default vim)");
}
