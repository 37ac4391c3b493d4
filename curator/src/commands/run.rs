// curator/src/commands/run.rs
//
// USE CASE: Run the curation pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use curator_core::application::run_pipeline;
use curator_core::infrastructure::adapters::{CsvStore, TracingSink};
use curator_core::infrastructure::config::load_pipeline_config;
use curator_core::ports::EventSink;

use super::fail;
use crate::telemetry::LogFile;

pub async fn execute(
    project_dir: PathBuf,
    config_path: Option<PathBuf>,
    run_date: Option<NaiveDate>,
    log_file: &LogFile,
) -> anyhow::Result<()> {
    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_pipeline_config(&project_dir, config_path.as_deref())
        .unwrap_or_else(|e| fail(e.into()));

    let log_path = config.log_file();
    log_file
        .attach(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let run_date = run_date.unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::info!(%run_date, log = ?log_path, "Run started");
    println!("   Run date: {}", run_date);
    println!("   Output:   {}", config.output_path().display());

    // B. Adapters
    let store = CsvStore::new(
        config.output_path(),
        config.validation_policy.display_date_format.clone(),
    );
    let sink: Arc<dyn EventSink> = Arc::new(TracingSink);

    // C. Run the Pipeline (Application Layer)
    let result = run_pipeline(&config, &store, &store, sink, run_date)
        .await
        .unwrap_or_else(|e| fail(e));

    for table in &result.tables {
        println!(
            "   📋 {}: {} repaired, {} dropped, {} reported",
            table.table, table.repaired, table.dropped, table.reported
        );
    }
    if result.unmatched_orders > 0 {
        println!(
            "   ⚠️  {} orders without a matching product (excluded from report)",
            result.unmatched_orders
        );
    }
    println!("   📄 Summary: {}", store.summary_path().display());

    Ok(())
}
