// curator-core/src/domain/validation/violation.rs

use std::fmt;

use crate::domain::table::{Table, Value};

/// How a violation was dealt with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The value was replaced; the row stays.
    Repaired,
    /// The row was removed from the cleansed table.
    Dropped,
    /// Logged only; the stored value is untouched.
    Reported,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repaired => "repaired",
            Self::Dropped => "dropped",
            Self::Reported => "reported",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One failed rule instance on one row.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationRecord {
    pub row_identifier: String,
    pub column: String,
    pub rule: String,
    pub original_value: Value,
    pub repaired_value: Option<Value>,
    pub reason: String,
    pub outcome: Outcome,
}

impl fmt::Display for ViolationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}.{}: {} ({})",
            self.rule, self.row_identifier, self.column, self.reason, self.outcome
        )
    }
}

/// Repaired table plus every violation found on the way, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub table: Table,
    pub violations: Vec<ViolationRecord>,
    pub rows_in: usize,
}

impl ValidationResult {
    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.table.len())
    }

    pub fn violations_for_rule<'a>(
        &'a self,
        rule: &'a str,
    ) -> impl Iterator<Item = &'a ViolationRecord> + 'a {
        self.violations.iter().filter(move |v| v.rule == rule)
    }
}
