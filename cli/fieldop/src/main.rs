//! fieldop CLI: check configuration patches against field operation rules.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fieldop",
    version,
    about = "Field operation validation for configuration patches"
)]
struct Cli {
    /// Configuration file (default: fieldop.toml found upward from the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Rules document, overriding the configuration
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
    /// Log decisions and resolution steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every element of a JSON patch against the running device
    Validate {
        /// Patch file, or '-' for stdin (default: stdin)
        #[arg(long)]
        patch: Option<PathBuf>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the table and field identifiers of each patch element
    Fields {
        /// Patch file, or '-' for stdin (default: stdin)
        #[arg(long)]
        patch: Option<PathBuf>,
    },
    /// Show the resolved platform and branch version of the running device
    Platform,
    /// Inspect the rules document
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// Check the rules document for authoring mistakes
    Check,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = config::resolve(cli.config.as_deref(), &cwd)?;
    let rules = cli.rules.as_deref();

    match cli.command {
        Commands::Validate { patch, format } => {
            let elements = commands::read_patch(patch.as_deref())?;
            commands::validate::run(&config, rules, &elements, format.as_deref())
        }

        Commands::Fields { patch } => {
            let elements = commands::read_patch(patch.as_deref())?;
            commands::fields::run(&elements)
        }

        Commands::Platform => commands::platform::run(&config, rules),

        Commands::Rules { action } => match action {
            RulesAction::Check => commands::rules::check(&config, rules),
        },
    }
}
