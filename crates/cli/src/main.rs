//! Bridge Lift Predictor CLI
//!
//! A command-line tool for querying lift schedules, rendering the
//! notification texts, and driving the dispatch channels of the
//! bridge agent.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{notify, schedule, status};

/// Bridge Lift Predictor CLI
#[derive(Parser)]
#[command(name = "blp")]
#[command(author, version, about = "CLI for the Chelsea Bridge lift predictor", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via BLP_API_URL env var)
    #[arg(long, env = "BLP_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a day's lift schedule
    Schedule {
        /// Date to query (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Seed for a reproducible prediction
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render the social-post text
    Social {
        /// Date to query (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Seed for a reproducible prediction
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render the roadway-sign text
    Sign {
        /// Date to query (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Seed for a reproducible prediction
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Dispatch notifications
    #[command(subcommand)]
    Dispatch(DispatchCommands),

    /// Show the recent communication log
    Log {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show agent health and readiness
    Status,
}

#[derive(Subcommand)]
pub enum DispatchCommands {
    /// Push the sign text to the VMS network
    Vms {
        /// Date to dispatch (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Seed for a reproducible prediction
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Schedule { date, seed } => {
            schedule::show_schedule(&client, date, seed, cli.format).await?;
        }
        Commands::Social { date, seed } => {
            notify::show_social(&client, date, seed, cli.format).await?;
        }
        Commands::Sign { date, seed } => {
            notify::show_sign(&client, date, seed, cli.format).await?;
        }
        Commands::Dispatch(dispatch_cmd) => match dispatch_cmd {
            DispatchCommands::Vms { date, seed } => {
                notify::dispatch_vms(&client, date, seed, cli.format).await?;
            }
        },
        Commands::Log { limit } => {
            notify::show_log(&client, limit, cli.format).await?;
        }
        Commands::Status => {
            status::show_status(&client, cli.format).await?;
        }
    }

    Ok(())
}
