// curator-core/src/domain/rules/rule.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::policy::ReferentialMissPolicy;
use crate::domain::table::{Row, Value};

/// The two datasets the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Orders,
    Products,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "orders" => Ok(Self::Orders),
            "products" => Ok(Self::Products),
            _ => Err(format!("Unknown table: {}", s)),
        }
    }
}

/// Declarative rule spec as written in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// `quantity: positive`
    Name(String),
    /// `order_status: [Pending, Shipped]`
    Values(Vec<String>),
    /// `product_id: { all: [not_null, exists_in_products] }`
    All { all: Vec<RuleSpec> },
}

/// Expression checked by a ComputedConsistency rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    Product { left: String, right: String },
}

impl Formula {
    pub fn operands(&self) -> [&str; 2] {
        match self {
            Self::Product { left, right } => [left.as_str(), right.as_str()],
        }
    }

    /// None when an operand is missing or not numeric.
    pub fn evaluate(&self, row: &Row) -> Option<f64> {
        match self {
            Self::Product { left, right } => {
                Some(row.get(left).as_number()? * row.get(right).as_number()?)
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product { left, right } => write!(f, "{} * {}", left, right),
        }
    }
}

/// A resolved constraint on one column, carrying its repair parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    PrimaryKey,
    NotNull {
        default: Value,
    },
    Positive,
    NonNegative,
    DateFormat {
        pattern: String,
    },
    EnumeratedValues {
        allowed: Vec<String>,
        default: String,
    },
    CrossReference {
        table: TableKind,
        column: String,
        on_miss: ReferentialMissPolicy,
    },
    ComputedConsistency {
        formula: Formula,
        tolerance: f64,
        recompute: bool,
    },
}

impl FieldRule {
    /// Rule name as it appears in violation records.
    pub fn name(&self) -> String {
        match self {
            Self::PrimaryKey => "primary_key".into(),
            Self::NotNull { .. } => "not_null".into(),
            Self::Positive => "positive".into(),
            Self::NonNegative => "non_negative".into(),
            Self::DateFormat { .. } => "check_date_format".into(),
            Self::EnumeratedValues { .. } => "enumerated_values".into(),
            Self::CrossReference { table, .. } => format!("exists_in_{}", table),
            Self::ComputedConsistency {
                formula: Formula::Product { left, right },
                ..
            } => format!("multiple_of_{}_{}", left, right),
        }
    }

    pub fn is_cross_reference(&self) -> bool {
        matches!(self, Self::CrossReference { .. })
    }
}

impl fmt::Display for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNull { default } => write!(f, "not_null (default: {})", default),
            Self::DateFormat { pattern } => write!(f, "check_date_format ({})", pattern),
            Self::EnumeratedValues { allowed, default } => {
                write!(f, "one of [{}] (default: {})", allowed.join(", "), default)
            }
            Self::CrossReference {
                table,
                column,
                on_miss,
            } => write!(f, "exists in {}.{} (on miss: {})", table, column, on_miss),
            Self::ComputedConsistency {
                formula,
                tolerance,
                recompute,
            } => write!(
                f,
                "equals {} within {:.2}%{}",
                formula,
                tolerance * 100.0,
                if *recompute { ", recompute" } else { "" }
            ),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// A rule bound to the column it constrains.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRule {
    pub column: String,
    pub rule: FieldRule,
}
