mod cli;
mod config;
mod memory;
mod server;
mod tools;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ghostly", version, about = "Per-project episodic memory for terminal commands")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ProjectArgs {
    /// Project root to scope memories to (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    project: Option<PathBuf>,
    /// Use the shared "no project" scope
    #[arg(long, conflicts_with = "project")]
    no_project: bool,
}

impl ProjectArgs {
    fn root(self) -> Result<Option<PathBuf>> {
        cli::project_root(self.project, self.no_project)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (stdio transport)
    Serve,
    /// Save a command or fix
    Capture {
        /// Text to remember
        text: String,
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Search saved memories for the project
    Search {
        /// Case-insensitive substring to look for
        query: String,
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Show the most recent memories for the project
    Recent {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Show store statistics
    Stats {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::GhostlyConfig::load()?;

    // Log to stderr so stdout stays clean for command output and MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }

    match cli.command {
        Command::Serve => {
            server::serve_stdio(config).await?;
        }
        Command::Capture { text, project } => {
            cli::capture::capture(&config, &text, project.root()?.as_deref())?;
        }
        Command::Search { query, project } => {
            cli::search::search(&config, &query, project.root()?.as_deref())?;
        }
        Command::Recent { project } => {
            cli::search::recent(&config, project.root()?.as_deref())?;
        }
        Command::Stats { project } => {
            cli::stats::stats(&config, project.root()?.as_deref())?;
        }
    }

    Ok(())
}
