// curator-core/src/domain/project/configuration.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use crate::domain::rules::{RuleSpec, TableKind, ValidationPolicy};
use crate::domain::table::StandardizationConfig;

/// Column name -> rule declaration, in file order.
pub type RuleMap = IndexMap<String, RuleSpec>;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct PipelineConfig {
    #[validate(length(min = 1, message = "orders_path cannot be empty"))]
    pub orders_path: String,

    #[validate(length(min = 1, message = "products_path cannot be empty"))]
    pub products_path: String,

    #[validate(length(min = 1, message = "log_path cannot be empty"))]
    pub log_path: String,

    #[serde(default = "default_output_dir")]
    #[validate(length(min = 1, message = "output_dir cannot be empty"))]
    pub output_dir: String,

    #[serde(default)]
    #[validate(custom(function = "validate_rule_columns"))]
    pub orders_validation_rules: RuleMap,

    #[serde(default)]
    #[validate(custom(function = "validate_rule_columns"))]
    pub products_validation_rules: RuleMap,

    #[serde(default)]
    #[validate(nested)]
    pub validation_policy: ValidationPolicy,

    #[serde(default)]
    pub standardization: StandardizationConfig,

    /// Directory relative paths are resolved against. Set by the loader.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl PipelineConfig {
    pub fn rules_for(&self, table: TableKind) -> &RuleMap {
        match table {
            TableKind::Orders => &self.orders_validation_rules,
            TableKind::Products => &self.products_validation_rules,
        }
    }

    pub fn input_path(&self, table: TableKind) -> PathBuf {
        match table {
            TableKind::Orders => self.resolve(&self.orders_path),
            TableKind::Products => self.resolve(&self.products_path),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    pub fn log_file(&self) -> PathBuf {
        self.resolve(&self.log_path)
    }

    fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn validate_rule_columns(rules: &RuleMap) -> Result<(), ValidationError> {
    if rules.keys().any(|column| column.trim().is_empty()) {
        let mut err = ValidationError::new("empty_column");
        err.message = Some("rule declared on an empty column name".into());
        return Err(err);
    }
    Ok(())
}
