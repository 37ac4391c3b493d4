// curator-core/src/application/clean.rs

use std::path::{Component, Path};

use crate::domain::project::PipelineConfig;
use crate::error::CuratorError;
use crate::infrastructure::fs::remove_path;

/// Removes the run's output directory. Refuses anything that could escape
/// the project directory or wipe the project itself.
pub fn clean_outputs(config: &PipelineConfig) -> Result<bool, CuratorError> {
    tracing::info!("🧹 Initializing cleanup sequence...");

    let full_path = config.output_path();

    // Zero-Trust Path Traversal Guard
    let escapes = Path::new(&config.output_dir)
        .components()
        .any(|c| matches!(c, Component::ParentDir));
    if escapes || !full_path.starts_with(&config.base_dir) || full_path == config.base_dir {
        return Err(CuratorError::UnsafePath(config.output_dir.clone()));
    }

    let removed = remove_path(&full_path)?;
    if removed {
        println!("   🗑️  Artifacts removed: {}", config.output_dir);
    }
    Ok(removed)
}
