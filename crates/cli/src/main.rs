//! Infowidget CLI - Generates static HTML info widgets for update-center plugins.

mod commands;
mod config;
mod discovery;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

use crate::config::SourceArgs;

#[derive(Parser)]
#[command(name = "infowidget")]
#[command(
    author,
    version,
    about = "Generates static HTML info widgets for update-center plugins"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    source: SourceArgs,

    /// Show what would be generated without writing
    #[arg(long)]
    dry_run: bool,

    /// Path to infowidget.toml (auto-detected if not specified)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one widget per plugin
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Dry run mode
        #[arg(long)]
        dry_run: bool,
    },

    /// List all plugins with their last release
    List {
        /// Update-center metadata file
        #[arg(short = 'm', long, value_name = "FILE")]
        metadata: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate the metadata file
    Validate {
        /// Update-center metadata file
        #[arg(short = 'm', long, value_name = "FILE")]
        metadata: Option<PathBuf>,
    },

    /// Initialize a new infowidget.toml
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Regenerate widgets whenever the metadata or resources change
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Keep previous output instead of clearing the screen
        #[arg(long)]
        no_clear: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr; `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "infowidget=debug"
    } else {
        "infowidget=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Handle init command separately (doesn't need a config)
    if let Some(Commands::Init { force }) = &cli.command {
        return commands::init::execute(*force);
    }

    let config_path = match cli.config {
        Some(path) => Some(path),
        None => discovery::find_config()?,
    };

    if let Some(path) = &config_path {
        tracing::debug!(config = %path.display(), "Using config file");
    }

    // Flags given before the subcommand apply unless the subcommand repeats them
    match cli.command {
        Some(Commands::Generate { source, dry_run }) => {
            let settings = config::resolve(config_path.as_deref(), source.or(cli.source))?;
            commands::generate::execute(&settings, dry_run || cli.dry_run).await
        }

        Some(Commands::List { metadata, json }) => {
            let args = SourceArgs {
                metadata: metadata.or(cli.source.metadata),
                ..Default::default()
            };
            let settings = config::resolve(config_path.as_deref(), args)?;
            commands::list::execute(&settings.metadata, json)
        }

        Some(Commands::Validate { metadata }) => {
            let args = SourceArgs {
                metadata: metadata.or(cli.source.metadata),
                ..Default::default()
            };
            let settings = config::resolve(config_path.as_deref(), args)?;
            commands::validate::execute(&settings.metadata)
        }

        Some(Commands::Watch { source, no_clear }) => {
            let settings = config::resolve(config_path.as_deref(), source.or(cli.source))?;
            commands::watch::execute(&settings, config_path, !no_clear).await
        }

        Some(Commands::Init { .. }) => unreachable!("Init is handled earlier"),

        None => {
            let settings = config::resolve(config_path.as_deref(), cli.source)?;
            commands::generate::execute(&settings, cli.dry_run).await
        }
    }
}
