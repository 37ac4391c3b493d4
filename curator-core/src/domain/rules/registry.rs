// curator-core/src/domain/rules/registry.rs

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use super::policy::ValidationPolicy;
use super::rule::{ColumnRule, FieldRule, Formula, RuleSpec, TableKind};
use crate::domain::error::DomainError;
use crate::domain::table::value::parse_number;
use crate::domain::table::{ColumnType, Schema, Value};

/// Fallback for not_null repairs on text columns.
pub const UNKNOWN_TEXT: &str = "unknown";

/// Resolves configuration rule specs into typed rules for one table.
/// Every error surfaces here, before a single row is looked at.
pub struct RuleRegistry<'a> {
    table: TableKind,
    policy: &'a ValidationPolicy,
    exists_pattern: Regex,
}

impl<'a> RuleRegistry<'a> {
    pub fn new(table: TableKind, policy: &'a ValidationPolicy) -> Result<Self, DomainError> {
        // Every artifact renders dates with it, whatever rules the table declares
        check_date_pattern(&policy.display_date_format)?;
        Ok(Self {
            table,
            policy,
            // exists_in_<table> or exists_in_<table>.<column>
            exists_pattern: Regex::new(r"^exists_in_([a-z]+)(?:\.([A-Za-z_][A-Za-z0-9_]*))?$")?,
        })
    }

    /// Maps one spec to the rules it stands for (several for `all:`).
    pub fn resolve(&self, column: &str, spec: &RuleSpec) -> Result<Vec<FieldRule>, DomainError> {
        match spec {
            RuleSpec::Name(name) => Ok(vec![self.resolve_name(column, name)?]),
            RuleSpec::Values(values) => Ok(vec![self.resolve_enumeration(column, values)?]),
            RuleSpec::All { all } => {
                if all.is_empty() {
                    return Err(invalid(column, "'all' must list at least one rule"));
                }
                let mut rules = Vec::with_capacity(all.len());
                for nested in all {
                    rules.extend(self.resolve(column, nested)?);
                }
                Ok(rules)
            }
        }
    }

    /// Resolves a whole `column -> spec` map, keeping declaration order.
    pub fn compile(&self, specs: &IndexMap<String, RuleSpec>) -> Result<RuleSet, DomainError> {
        let mut rules = Vec::new();
        for (column, spec) in specs {
            for rule in self.resolve(column, spec)? {
                rules.push(ColumnRule {
                    column: column.clone(),
                    rule,
                });
            }
        }

        let schema = infer_schema(&rules);

        // not_null defaults depend on the column type, known only once every rule is in
        for column_rule in &mut rules {
            if let FieldRule::NotNull { default } = &mut column_rule.rule {
                *default = self.not_null_default(
                    &column_rule.column,
                    schema.column_type(&column_rule.column),
                )?;
            }
        }

        Ok(RuleSet {
            table: self.table,
            rules,
            schema,
        })
    }

    fn resolve_name(&self, column: &str, name: &str) -> Result<FieldRule, DomainError> {
        let rule = match name {
            "primary_key" => FieldRule::PrimaryKey,
            "not_null" => FieldRule::NotNull {
                default: Value::Null,
            },
            "positive" => FieldRule::Positive,
            "non_negative" => FieldRule::NonNegative,
            "check_date_format" => {
                check_date_pattern(&self.policy.date_pattern)?;
                FieldRule::DateFormat {
                    pattern: self.policy.date_pattern.clone(),
                }
            }
            "multiple_of_quantity_unit_price" => {
                let tolerance = self.policy.tolerance;
                if !tolerance.is_finite() || !(0.0..=1.0).contains(&tolerance) {
                    return Err(invalid(
                        column,
                        &format!("tolerance {} is outside [0, 1]", tolerance),
                    ));
                }
                FieldRule::ComputedConsistency {
                    formula: Formula::Product {
                        left: "quantity".into(),
                        right: "unit_price".into(),
                    },
                    tolerance,
                    recompute: self.policy.recompute_inconsistent,
                }
            }
            other => match self.exists_pattern.captures(other) {
                Some(caps) => {
                    let target = caps
                        .get(1)
                        .and_then(|m| TableKind::from_str(m.as_str()).ok())
                        .ok_or_else(|| self.unknown(column, name))?;
                    let target_column = caps.get(2).map_or(column, |m| m.as_str());
                    self.cross_reference(column, target, target_column)?
                }
                None => return Err(self.unknown(column, name)),
            },
        };
        Ok(rule)
    }

    fn cross_reference(
        &self,
        column: &str,
        target: TableKind,
        target_column: &str,
    ) -> Result<FieldRule, DomainError> {
        // The target must be fully validated before this table starts its reference checks
        if validation_rank(target) >= validation_rank(self.table) {
            return Err(invalid(
                column,
                &format!(
                    "{} cannot reference {}: referenced tables are validated first (products, then orders)",
                    self.table, target
                ),
            ));
        }
        Ok(FieldRule::CrossReference {
            table: target,
            column: target_column.to_string(),
            on_miss: self.policy.referential_miss,
        })
    }

    fn resolve_enumeration(&self, column: &str, values: &[String]) -> Result<FieldRule, DomainError> {
        let default = match self.policy.enum_defaults.get(column) {
            Some(configured) => {
                if !values.contains(configured) {
                    return Err(invalid(
                        column,
                        &format!("default '{}' is not one of the allowed values", configured),
                    ));
                }
                configured.clone()
            }
            None => values
                .first()
                .cloned()
                .ok_or_else(|| invalid(column, "allowed values list is empty"))?,
        };
        Ok(FieldRule::EnumeratedValues {
            allowed: values.to_vec(),
            default,
        })
    }

    fn not_null_default(&self, column: &str, ty: ColumnType) -> Result<Value, DomainError> {
        let configured = self.policy.not_null_defaults.get(column);
        match (configured, ty) {
            (Some(raw), ColumnType::Number) => parse_number(raw).map(Value::Number).ok_or_else(|| {
                invalid(column, &format!("not_null default '{}' is not a number", raw))
            }),
            (Some(raw), ColumnType::Date) => NaiveDate::parse_from_str(raw, &self.policy.date_pattern)
                .map(Value::Date)
                .map_err(|_| {
                    invalid(
                        column,
                        &format!("not_null default '{}' does not match the date pattern", raw),
                    )
                }),
            (Some(raw), ColumnType::Text) => Ok(Value::text(raw.clone())),
            (None, ColumnType::Number) => Ok(Value::Number(0.0)),
            (None, _) => Ok(Value::text(UNKNOWN_TEXT)),
        }
    }

    fn unknown(&self, column: &str, rule: &str) -> DomainError {
        DomainError::UnknownRule {
            table: self.table.to_string(),
            column: column.to_string(),
            rule: rule.to_string(),
        }
    }
}

/// Compiled, immutable rules of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    table: TableKind,
    rules: Vec<ColumnRule>,
    schema: Schema,
}

impl RuleSet {
    pub fn table(&self) -> TableKind {
        self.table
    }

    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First column declared as primary key, used as the row identifier.
    pub fn primary_key(&self) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.rule == FieldRule::PrimaryKey)
            .map(|r| r.column.as_str())
    }

    /// Tables and columns this rule set needs a reference index for.
    pub fn references(&self) -> Vec<(TableKind, &str)> {
        let mut targets: Vec<(TableKind, &str)> = self
            .rules
            .iter()
            .filter_map(|r| match &r.rule {
                FieldRule::CrossReference { table, column, .. } => Some((*table, column.as_str())),
                _ => None,
            })
            .collect();
        targets.dedup();
        targets
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} rules)", self.table, self.rules.len())?;
        for r in &self.rules {
            writeln!(
                f,
                "  - {} [{}]: {}",
                r.column,
                self.schema.column_type(&r.column),
                r.rule
            )?;
        }
        Ok(())
    }
}

fn infer_schema(rules: &[ColumnRule]) -> Schema {
    let mut schema = Schema::default();
    for r in rules {
        match &r.rule {
            FieldRule::Positive | FieldRule::NonNegative => {
                schema.declare(&r.column, ColumnType::Number)
            }
            FieldRule::ComputedConsistency { formula, .. } => {
                schema.declare(&r.column, ColumnType::Number);
                for operand in formula.operands() {
                    schema.declare(operand, ColumnType::Number);
                }
            }
            FieldRule::DateFormat { .. } => schema.declare(&r.column, ColumnType::Date),
            _ => {}
        }
    }
    schema
}

fn validation_rank(table: TableKind) -> u8 {
    match table {
        TableKind::Products => 0,
        TableKind::Orders => 1,
    }
}

fn check_date_pattern(pattern: &str) -> Result<(), DomainError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(DomainError::InvalidDatePattern(pattern.to_string()));
    }
    Ok(())
}

fn invalid(column: &str, reason: &str) -> DomainError {
    DomainError::InvalidRuleParameter {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}
