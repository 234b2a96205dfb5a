mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::config::ConfigAction;

#[derive(Parser)]
#[command(name = "weekly")]
#[command(about = "Weekly project digest: tasks in, report out", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch tasks, build the weekly report, publish it
    Run {
        /// Reference date (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Print the report instead of publishing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
    /// Test connections to the task source and document sink
    Test,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { date, dry_run } => commands::run::handle_run(date, dry_run).await,
        Commands::Test => commands::test::handle_test().await,
        Commands::Config { action } => commands::config::handle_config(action),
    }
}
