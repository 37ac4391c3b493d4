// curator/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "curator")]
#[command(about = "Rule-driven validation, repair and curation of orders & products", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the pipeline (Load -> Validate/Repair -> Curate -> Write)
    Run {
        /// Project directory (searched for curator.yaml / curator_pipeline.yaml)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Explicit configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Date used to replace unparseable dates (default: today)
        #[arg(long, env = "CURATOR_RUN_DATE")]
        run_date: Option<NaiveDate>,
    },

    /// ✅ Loads the configuration and prints the compiled rule plan
    Check {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// 🧹 Removes the output directory
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// 🔍 Pretty-prints the first rows of a CSV file (input or artifact)
    Inspect {
        /// CSV file to display
        #[arg(long, short)]
        file: PathBuf,

        /// Number of sample rows to display
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}
