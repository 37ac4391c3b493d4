// curator-core/src/domain/rules/mod.rs

pub mod policy;
pub mod registry;
pub mod rule;

pub use policy::{ReferentialMissPolicy, ValidationPolicy};
pub use registry::{RuleRegistry, RuleSet};
pub use rule::{ColumnRule, FieldRule, Formula, RuleSpec, TableKind};
