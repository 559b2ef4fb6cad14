use anyhow::Result;
use plaintask::cli::{self, Command};
use plaintask::config::{Config, Overrides};
use plaintask::context::StandardContext;
use plaintask::controller::TaskController;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: todo [--root <path>] [--no-color] [-v] <agenda|list|open|help>");
            eprintln!("Run 'todo help' for details.");
            std::process::exit(2);
        }
    };
    if args.command == Command::Help {
        cli::print_help("todo");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());
    let config = Config::load_or_default(&ctx)?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.log_level()
    };
    let log_config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    let _ = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto);

    let overrides = Overrides {
        todo_dir: env::var_os("TODO_DIRECTORY")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from),
        editor: env::var("EDITOR").ok().filter(|v| !v.trim().is_empty()),
    };
    let color = config.color && !args.no_color;
    let today = chrono::Local::now().date_naive();
    let controller = TaskController::from_config(&ctx, &config, &overrides, color, today)?;

    match args.command {
        Command::Agenda { date, json } => print!("{}", controller.agenda(date.as_deref(), json)?),
        Command::List { category } => print!("{}", controller.list(category.as_deref())?),
        Command::Open { category } => controller.open(&category)?,
        Command::Help => {}
    }
    Ok(())
}
