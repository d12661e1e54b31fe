//! uvi - interactive front-end for `uv init`

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uvi_core::tui::{is_interactive, ClackPrompter};
use uvi_core::{validate_args, Config, LinePrompter, PtyExecutor, UsageError, INTERRUPT_EXIT_CODE};

/// Environment variable holding the log filter
const LOG_ENV: &str = "UVI_LOG";

#[derive(Parser, Debug)]
#[command(name = "uvi")]
#[command(about = "Interactive uv init")]
#[command(version = concat!("v", env!("CARGO_PKG_VERSION")), disable_version_flag = true)]
pub struct Args {
    /// Project type [b/bare, p/package, a/app, l/lib, s/script]
    #[arg(value_name = "type")]
    pub project_type: Option<String>,

    /// Project name
    #[arg(value_name = "name")]
    pub name: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Show program's version number and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Args {
    /// Positional arguments in the order they were given
    fn positionals(&self) -> Vec<String> {
        self.project_type
            .iter()
            .chain(self.name.iter())
            .chain(self.extra.iter())
            .cloned()
            .collect()
    }
}

fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red(), message);
}

fn stopped() -> i32 {
    let _ = console::Term::stderr().show_cursor();
    eprintln!("\n{}", "stopped".red());
    INTERRUPT_EXIT_CODE
}

fn is_interrupt(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::Interrupted)
    })
}

fn run(args: &Args) -> Result<i32> {
    let config = Config::from_env();

    let project = match validate_args(&args.positionals(), &config.project_types) {
        Ok(project) => project,
        Err(e) => {
            print_error(&e.to_string());
            return Ok(UsageError::EXIT_CODE);
        }
    };

    let mut executor = PtyExecutor::stdout();
    if let Some((rows, cols)) = console::Term::stdout().size_checked() {
        executor = executor.with_size(rows, cols);
    }

    let outcome = if is_interactive() {
        let mut prompter = ClackPrompter::new("uvi")?;
        match uvi_core::run(&config, &project, &mut prompter, &mut executor) {
            Ok(outcome) => {
                prompter.finish(&outcome)?;
                outcome
            }
            Err(e) => {
                if !is_interrupt(&e) {
                    let _ = prompter.abort("Setup failed");
                }
                return Err(e);
            }
        }
    } else {
        let mut prompter = LinePrompter::stdio();
        uvi_core::run(&config, &project, &mut prompter, &mut executor)?
    };

    debug!(?outcome, "session finished");
    Ok(outcome.exit_code())
}

fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        std::process::exit(stopped());
    })
    .ok();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let code = match run(&args) {
        Ok(code) => code,
        Err(e) if is_interrupt(&e) => stopped(),
        Err(e) => {
            print_error(&format!("{:#}", e));
            1
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();
    std::process::exit(code);
}
