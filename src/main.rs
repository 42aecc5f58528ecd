use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "sift")]
#[command(version, about = "Review a list of documents and pick one excerpt from each")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new sift project
    Init,
    /// Review documents one at a time, resuming after the last saved record
    Review {
        /// Manifest of documents to review (overrides sift.toml)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Record log to append excerpts to (overrides sift.toml)
        #[arg(long)]
        records: Option<PathBuf>,

        /// Wrap width in columns (defaults to the terminal width)
        #[arg(long)]
        width: Option<usize>,
    },
    /// Show review progress
    Status,
    /// List saved excerpts
    Records,
    /// Write all saved excerpts as a JSON array
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Delete the record log
    Reset {
        #[arg(long)]
        force: bool,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default sift.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    // The review screen owns the terminal and logs to a file instead.
    if !matches!(cli.command, Commands::Review { .. }) {
        sift::logging::init_stderr_logging(cli.verbose)?;
    }

    match &cli.command {
        Commands::Init => cmd::cmd_init(&project_dir)?,
        Commands::Review {
            manifest,
            records,
            width,
        } => {
            cmd::cmd_review(
                &cli,
                project_dir,
                manifest.clone(),
                records.clone(),
                *width,
            )
            .await?;
        }
        Commands::Status => cmd::cmd_status(&project_dir, &cli)?,
        Commands::Records => cmd::cmd_records(&project_dir, &cli)?,
        Commands::Export { output } => cmd::cmd_export(&project_dir, &cli, output)?,
        Commands::Reset { force } => cmd::cmd_reset(&project_dir, &cli, *force)?,
        Commands::Config { command } => cmd::cmd_config(&project_dir, command.clone())?,
    }

    Ok(())
}
