//! cimatrix CLI entrypoint.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod handlers;

use commands::{Commands, ConfigCommands};
use config::{CliConfig, OutputFormat};
use handlers::GenerateMatrixArgs;

#[derive(Parser)]
#[command(name = "cimatrix")]
#[command(author, version, about = "Generate CI job and version matrices", long_about = None)]
struct Cli {
    /// Logging verbosity, specify multiple times for higher levels, i.e. -vvv
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbosity: u8,

    /// Configuration file (defaults to ./cimatrix.yaml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the configured one
    #[arg(long, value_enum, global = true)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.output.unwrap_or(config.output_format);

    match cli.command {
        Commands::GenerateMatrix {
            kind,
            fast,
            partition_module,
            partition_package,
            platform,
            versions,
        } => {
            let args = GenerateMatrixArgs {
                kind,
                fast,
                partition_module,
                partition_package,
                platform,
                versions,
            };
            handlers::generate_matrix(&config, args, cli.verbosity.into(), format).await?
        }
        Commands::GenerateVersionSet { versions } => {
            handlers::generate_version_set(&versions, format)?
        }
        Commands::CombineMatrices { matrices } => handlers::combine_matrices(&matrices, format)?,
        Commands::Schema => handlers::schema()?,
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::show_config(&config)?,
            ConfigCommands::Path => handlers::config_path()?,
        },
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the generated document.
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
