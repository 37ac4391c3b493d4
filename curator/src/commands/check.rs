// curator/src/commands/check.rs
//
// USE CASE: Validate the configuration without touching any data.

use std::path::PathBuf;

use curator_core::application::compile_rule_sets;
use curator_core::infrastructure::config::load_pipeline_config;

use super::fail;

pub fn execute(project_dir: PathBuf, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_pipeline_config(&project_dir, config_path.as_deref())
        .unwrap_or_else(|e| fail(e.into()));
    let rules = compile_rule_sets(&config).unwrap_or_else(|e| fail(e));

    println!("📜 Rule plan");
    print!("{}", rules.products);
    print!("{}", rules.orders);
    println!(
        "   Policy: tolerance {}, referential miss -> {}, recompute totals: {}",
        config.validation_policy.tolerance,
        config.validation_policy.referential_miss,
        config.validation_policy.recompute_inconsistent
    );
    println!("✅ Configuration is valid");
    Ok(())
}
