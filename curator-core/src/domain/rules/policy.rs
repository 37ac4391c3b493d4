// curator-core/src/domain/rules/policy.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use validator::Validate;

/// What happens to a row whose foreign key has no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialMissPolicy {
    /// Keep the row in the cleansed table, log the violation.
    #[default]
    Retain,
    /// Remove the row from the cleansed table, log the violation.
    Drop,
}

impl fmt::Display for ReferentialMissPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retain => write!(f, "retain"),
            Self::Drop => write!(f, "drop"),
        }
    }
}

/// Repair parameters shared by every rule of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Relative tolerance for computed consistency checks (0.02 = 2%).
    #[validate(range(min = 0.0, max = 1.0, message = "tolerance must be within [0, 1]"))]
    pub tolerance: f64,

    /// Overwrite inconsistent computed values instead of only reporting them.
    pub recompute_inconsistent: bool,

    pub referential_miss: ReferentialMissPolicy,

    #[validate(length(min = 1, message = "date_pattern cannot be empty"))]
    pub date_pattern: String,

    #[validate(length(min = 1, message = "display_date_format cannot be empty"))]
    pub display_date_format: String,

    /// Per-column fallback for enumerated values. Defaults to the first allowed value.
    pub enum_defaults: HashMap<String, String>,

    /// Per-column fallback for not_null repairs.
    pub not_null_defaults: HashMap<String, String>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            tolerance: 0.02,
            recompute_inconsistent: false,
            referential_miss: ReferentialMissPolicy::Retain,
            date_pattern: "%Y-%m-%d".to_string(),
            display_date_format: "%d-%m-%Y".to_string(),
            enum_defaults: HashMap::new(),
            not_null_defaults: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_policy_keeps_defaults() -> anyhow::Result<()> {
        let policy: ValidationPolicy = serde_yaml::from_str("referential_miss: drop\n")?;
        assert_eq!(policy.referential_miss, ReferentialMissPolicy::Drop);
        assert_eq!(policy.tolerance, 0.02);
        assert_eq!(policy.date_pattern, "%Y-%m-%d");
        Ok(())
    }

    #[test]
    fn test_non_numeric_tolerance_is_rejected() {
        let res: Result<ValidationPolicy, _> = serde_yaml::from_str("tolerance: two percent\n");
        assert!(res.is_err());
    }

    #[test]
    fn test_out_of_range_tolerance_fails_validation() {
        let policy = ValidationPolicy {
            tolerance: 5.0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
        assert!(ValidationPolicy::default().validate().is_ok());
    }
}
