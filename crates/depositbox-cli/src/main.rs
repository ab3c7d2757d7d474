//! DepositBox CLI - Main entry point

use clap::{Parser, Subcommand};
use depositbox_cli::{commands, context::default_config_path, AppContext};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "depositbox")]
#[command(about = "DepositBox - deposit tracking and reward allocation", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    /// Config file (defaults to <data>/DepositBox.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the log and write the summary files
    Summary {
        /// Prize pool in sats (defaults to DefaultPrizePool)
        #[arg(long)]
        prize_pool: Option<u64>,
    },

    /// List recorded deposits
    Deposits {
        /// Only show this actor
        #[arg(long)]
        actor: Option<String>,
    },

    /// Check whether an actor's next deposit would be admitted
    Check {
        /// Actor ID
        actor: String,
    },

    /// Write the default config file if it does not exist
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let open = || AppContext::new(&cli.data, cli.config.as_deref());

    match &cli.command {
        Commands::Summary { prize_pool } => {
            commands::summary(&open()?, *prize_pool)?;
        }

        Commands::Deposits { actor } => {
            commands::deposits(&open()?, actor.as_deref());
        }

        Commands::Check { actor } => {
            commands::check(&open()?, actor);
        }

        Commands::InitConfig => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(|| default_config_path(&cli.data));
            commands::init_config(&path)?;
        }
    }

    Ok(())
}
