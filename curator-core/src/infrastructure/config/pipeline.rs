// curator-core/src/infrastructure/config/pipeline.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::project::PipelineConfig;
use crate::domain::rules::TableKind;
use crate::infrastructure::error::InfrastructureError;

/// Looked up in the project directory, in this order, when no path is given.
pub const CONFIG_CANDIDATES: [&str; 2] = ["curator.yaml", "curator_pipeline.yaml"];

pub const ENV_OUTPUT_DIR: &str = "CURATOR_OUTPUT_DIR";
pub const ENV_LOG_PATH: &str = "CURATOR_LOG_PATH";

#[instrument(skip(project_dir, explicit))]
pub fn load_pipeline_config(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> Result<PipelineConfig, InfrastructureError> {
    load_with_env(project_dir, explicit, |key| std::env::var(key).ok())
}

/// Same as [`load_pipeline_config`] with an injectable environment.
pub fn load_with_env<F>(
    project_dir: &Path,
    explicit: Option<&Path>,
    env: F,
) -> Result<PipelineConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    // 1. Découverte
    let config_path = match explicit {
        Some(path) if path.is_file() => path.to_path_buf(),
        Some(path) => {
            return Err(InfrastructureError::ConfigNotFound(
                path.display().to_string(),
            ));
        }
        None => find_pipeline_config(project_dir)?,
    };
    info!(path = ?config_path, "Loading pipeline configuration");

    // 2. Parsing + validation structurelle
    let content = fs::read_to_string(&config_path)?;
    let mut config: PipelineConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    config.base_dir = match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => project_dir.to_path_buf(),
    };

    // 3. Overrides ENV
    apply_env_overrides(&mut config, env);

    if config.orders_validation_rules.is_empty() && config.products_validation_rules.is_empty() {
        warn!("No validation rules declared, tables will only be standardized");
    }

    // 4. Inputs must exist before anything runs
    for kind in [TableKind::Products, TableKind::Orders] {
        let input = config.input_path(kind);
        if !input.is_file() {
            return Err(InfrastructureError::InputNotFound(
                input.display().to_string(),
            ));
        }
    }

    Ok(config)
}

pub fn find_pipeline_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "no configuration file in {:?}. Checked: {:?}",
                root, CONFIG_CANDIDATES
            ))
        })
}

fn apply_env_overrides<F>(config: &mut PipelineConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
        info!(old = ?config.output_dir, new = ?val, "Overriding output dir via ENV");
        config.output_dir = val;
    }
    if let Some(val) = env(ENV_LOG_PATH).filter(|v| !v.is_empty()) {
        info!(old = ?config.log_path, new = ?val, "Overriding log path via ENV");
        config.log_path = val;
    }
}
