// curator/src/main.rs

mod cli;
mod commands;
mod telemetry;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    let log_file = telemetry::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project_dir,
            config,
            run_date,
        } => commands::run::execute(project_dir, config, run_date, &log_file).await,
        Commands::Check {
            project_dir,
            config,
        } => commands::check::execute(project_dir, config),
        Commands::Clean {
            project_dir,
            config,
        } => commands::clean::execute(project_dir, config),
        Commands::Inspect { file, limit } => commands::inspect::execute(file, limit),
    }
}
