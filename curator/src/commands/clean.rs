// curator/src/commands/clean.rs
//
// USE CASE: Remove run artifacts.

use std::path::PathBuf;

use curator_core::application::clean_outputs;
use curator_core::infrastructure::config::load_pipeline_config;

use super::fail;

pub fn execute(project_dir: PathBuf, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_pipeline_config(&project_dir, config_path.as_deref())
        .unwrap_or_else(|e| fail(e.into()));

    match clean_outputs(&config) {
        Ok(true) => {}
        Ok(false) => println!("   Nothing to clean."),
        Err(e) => fail(e),
    }
    Ok(())
}
