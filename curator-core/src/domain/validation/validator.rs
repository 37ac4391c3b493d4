// curator-core/src/domain/validation/validator.rs

use chrono::NaiveDate;
use std::collections::HashSet;

use super::reference::CrossReferenceChecker;
use super::violation::{Outcome, ValidationResult, ViolationRecord};
use crate::domain::error::DomainError;
use crate::domain::rules::{ColumnRule, FieldRule, ReferentialMissPolicy, RuleSet};
use crate::domain::table::value::round_to;
use crate::domain::table::{Row, Table, Value};
use crate::ports::sink::{EventSink, PipelineEvent};

/// Floor used when a `positive` value cannot be repaired by taking its absolute value.
pub const POSITIVE_FLOOR: f64 = 1.0;
/// Floor used when a `non_negative` value is missing or not numeric.
pub const NON_NEGATIVE_FLOOR: f64 = 0.0;

/// Everything a validation pass may consult besides the table and its rules.
pub struct ValidationContext<'a> {
    /// Replacement for unparseable dates.
    pub run_date: NaiveDate,
    /// Required once a rule set contains cross references.
    pub references: Option<&'a CrossReferenceChecker>,
    pub sink: &'a dyn EventSink,
}

impl<'a> ValidationContext<'a> {
    pub fn new(run_date: NaiveDate, sink: &'a dyn EventSink) -> Self {
        Self {
            run_date,
            references: None,
            sink,
        }
    }

    pub fn with_references(mut self, references: &'a CrossReferenceChecker) -> Self {
        self.references = Some(references);
        self
    }
}

struct WorkingRow {
    id: String,
    /// 1-based data row index.
    position: usize,
    row: Row,
    dropped: bool,
}

/// Outcome of evaluating one rule on one row.
enum Verdict {
    Pass,
    /// Type normalisation (e.g. a valid date string becoming a date). Not a violation.
    Convert(Value),
    Replace { value: Value, reason: String },
    Drop { reason: String },
    Report { reason: String },
}

/// A table that went through every rule except the cross references.
///
/// Splitting here lets the referencing table run its local rules while the
/// referenced table is still being validated.
pub struct PartialValidation {
    name: String,
    columns: Vec<String>,
    rows: Vec<WorkingRow>,
    violations: Vec<ViolationRecord>,
    rows_in: usize,
}

impl PartialValidation {
    pub fn violations(&self) -> &[ViolationRecord] {
        &self.violations
    }

    fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    fn apply_primary_key(&mut self, column: &str, ctx: &ValidationContext<'_>) {
        let mut seen = HashSet::new();
        for working in self.rows.iter_mut().filter(|w| !w.dropped) {
            let value = working.row.get(column);
            let (row_identifier, reason) = match value.key() {
                None => (
                    working.id.clone(),
                    "primary key is null".to_string(),
                ),
                // The key alone would collide with the kept row
                Some(key) if !seen.insert(key.clone()) => (
                    format!("{} (row {})", key, working.position),
                    format!("duplicate primary key '{}' (first occurrence kept)", key),
                ),
                Some(_) => continue,
            };
            let record = ViolationRecord {
                row_identifier,
                column: column.to_string(),
                rule: FieldRule::PrimaryKey.name(),
                original_value: value.clone(),
                repaired_value: None,
                reason,
                outcome: Outcome::Dropped,
            };
            working.dropped = true;
            push(&mut self.violations, &self.name, record, ctx);
        }
    }

    fn apply(&mut self, column_rule: &ColumnRule, ctx: &ValidationContext<'_>) {
        let ColumnRule { column, rule } = column_rule;
        for working in self.rows.iter_mut().filter(|w| !w.dropped) {
            let verdict = evaluate(rule, column, &working.row, ctx);
            let original = working.row.get(column).clone();
            let (repaired_value, reason, outcome) = match verdict {
                Verdict::Pass => continue,
                Verdict::Convert(value) => {
                    working.row.set(column.clone(), value);
                    continue;
                }
                Verdict::Replace { value, reason } => {
                    working.row.set(column.clone(), value.clone());
                    (Some(value), reason, Outcome::Repaired)
                }
                Verdict::Drop { reason } => {
                    working.dropped = true;
                    (None, reason, Outcome::Dropped)
                }
                Verdict::Report { reason } => (None, reason, Outcome::Reported),
            };
            let record = ViolationRecord {
                row_identifier: working.id.clone(),
                column: column.clone(),
                rule: rule.name(),
                original_value: original,
                repaired_value,
                reason,
                outcome,
            };
            push(&mut self.violations, &self.name, record, ctx);
        }
    }

    fn finish(self, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut table = Table::new(self.name, self.columns);
        for working in self.rows.into_iter().filter(|w| !w.dropped) {
            table.push(working.row);
        }
        ctx.sink.emit(PipelineEvent::TableValidated {
            table: table.name.clone(),
            rows_in: self.rows_in,
            rows_out: table.len(),
            violations: self.violations.len(),
        });
        ValidationResult {
            table,
            violations: self.violations,
            rows_in: self.rows_in,
        }
    }
}

fn push(
    violations: &mut Vec<ViolationRecord>,
    table: &str,
    record: ViolationRecord,
    ctx: &ValidationContext<'_>,
) {
    ctx.sink.emit(PipelineEvent::Violation {
        table: table.to_string(),
        record: record.clone(),
    });
    violations.push(record);
}

/// Applies a rule set to a table. Pure: no I/O, violations go to the result and the sink.
pub struct Validator;

impl Validator {
    /// Full pass: primary keys, then the other local rules in declaration order,
    /// then cross references.
    pub fn validate(
        table: Table,
        rules: &RuleSet,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, DomainError> {
        let partial = Self::validate_local(table, rules, ctx);
        Self::validate_references(partial, rules, ctx)
    }

    /// Every rule that does not need another table. Never fails: bad data only
    /// produces violations.
    pub fn validate_local(
        mut table: Table,
        rules: &RuleSet,
        ctx: &ValidationContext<'_>,
    ) -> PartialValidation {
        rules.schema().coerce(&mut table);
        report_missing_columns(&table, rules, ctx);

        let key_column = rules.primary_key().filter(|pk| table.has_column(pk));
        let rows_in = table.len();
        let rows = table
            .rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let id = key_column
                    .and_then(|pk| row.get(pk).key())
                    .unwrap_or_else(|| format!("row {}", i + 1));
                WorkingRow {
                    id,
                    position: i + 1,
                    row,
                    dropped: false,
                }
            })
            .collect();

        let mut partial = PartialValidation {
            name: table.name,
            columns: table.columns,
            rows,
            violations: Vec::new(),
            rows_in,
        };

        for column_rule in rules.rules() {
            if column_rule.rule == FieldRule::PrimaryKey && partial.has_column(&column_rule.column) {
                partial.apply_primary_key(&column_rule.column, ctx);
            }
        }

        for column_rule in rules.rules() {
            if column_rule.rule == FieldRule::PrimaryKey || column_rule.rule.is_cross_reference() {
                continue;
            }
            if applicable(column_rule, &partial) {
                partial.apply(column_rule, ctx);
            }
        }

        partial
    }

    /// Cross-reference rules. Fails only when the referenced table was never indexed,
    /// which is an ordering bug in the caller, not a data problem.
    pub fn validate_references(
        mut partial: PartialValidation,
        rules: &RuleSet,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, DomainError> {
        for column_rule in rules.rules() {
            let FieldRule::CrossReference { table, column, .. } = &column_rule.rule else {
                continue;
            };
            if !ctx
                .references
                .is_some_and(|checker| checker.is_registered(*table, column))
            {
                return Err(DomainError::UnresolvedReference {
                    table: table.to_string(),
                    column: column.clone(),
                });
            }
            if partial.has_column(&column_rule.column) {
                partial.apply(column_rule, ctx);
            }
        }
        Ok(partial.finish(ctx))
    }
}

fn applicable(column_rule: &ColumnRule, partial: &PartialValidation) -> bool {
    if !partial.has_column(&column_rule.column) {
        return false;
    }
    match &column_rule.rule {
        FieldRule::ComputedConsistency { formula, .. } => {
            formula.operands().iter().all(|c| partial.has_column(c))
        }
        _ => true,
    }
}

fn report_missing_columns(table: &Table, rules: &RuleSet, ctx: &ValidationContext<'_>) {
    let mut reported = HashSet::new();
    for column_rule in rules.rules() {
        let mut needed = vec![column_rule.column.as_str()];
        if let FieldRule::ComputedConsistency { formula, .. } = &column_rule.rule {
            needed.extend(formula.operands());
        }
        for column in needed {
            if !table.has_column(column) && reported.insert(column) {
                ctx.sink.emit(PipelineEvent::ColumnMissing {
                    table: table.name.clone(),
                    column: column.to_string(),
                });
            }
        }
    }
}

fn evaluate(rule: &FieldRule, column: &str, row: &Row, ctx: &ValidationContext<'_>) -> Verdict {
    let value = row.get(column);
    match rule {
        // Stateful, handled by the key pass
        FieldRule::PrimaryKey => Verdict::Pass,

        FieldRule::NotNull { default } => {
            if value.is_null() {
                Verdict::Replace {
                    value: default.clone(),
                    reason: "value is null".to_string(),
                }
            } else {
                Verdict::Pass
            }
        }

        FieldRule::Positive => match value.as_number() {
            Some(n) if n > 0.0 => Verdict::Pass,
            Some(n) => {
                let abs = n.abs();
                Verdict::Replace {
                    value: Value::Number(if abs > 0.0 { abs } else { POSITIVE_FLOOR }),
                    reason: format!("value {} is not positive", value),
                }
            }
            None => Verdict::Replace {
                value: Value::Number(POSITIVE_FLOOR),
                reason: not_numeric(value),
            },
        },

        FieldRule::NonNegative => match value.as_number() {
            Some(n) if n >= 0.0 => Verdict::Pass,
            Some(n) => Verdict::Replace {
                value: Value::Number(n.abs()),
                reason: format!("value {} is negative", value),
            },
            None => Verdict::Replace {
                value: Value::Number(NON_NEGATIVE_FLOOR),
                reason: not_numeric(value),
            },
        },

        FieldRule::DateFormat { pattern } => {
            let reason = match value {
                Value::Date(_) => return Verdict::Pass,
                Value::Text(s) => match NaiveDate::parse_from_str(s.trim(), pattern) {
                    Ok(date) => return Verdict::Convert(Value::Date(date)),
                    Err(_) => format!("'{}' does not match date pattern {}", s, pattern),
                },
                Value::Null => "date is null".to_string(),
                Value::Number(_) => format!("{} is not a date", value),
            };
            Verdict::Replace {
                value: Value::Date(ctx.run_date),
                reason,
            }
        }

        FieldRule::EnumeratedValues { allowed, default } => {
            let reason = match value.key() {
                Some(key) if allowed.contains(&key) => return Verdict::Pass,
                Some(key) => format!("'{}' is not an allowed value", key),
                None => "value is null".to_string(),
            };
            Verdict::Replace {
                value: Value::text(default.clone()),
                reason,
            }
        }

        FieldRule::CrossReference {
            table,
            column: target,
            on_miss,
        } => {
            let Some(checker) = ctx.references else {
                return Verdict::Pass;
            };
            let reason = match value.key() {
                Some(key) if checker.exists(&key, *table, target) => return Verdict::Pass,
                Some(key) => format!("'{}' does not exist in {}.{}", key, table, target),
                None => "reference is null".to_string(),
            };
            match on_miss {
                ReferentialMissPolicy::Retain => Verdict::Report { reason },
                ReferentialMissPolicy::Drop => Verdict::Drop { reason },
            }
        }

        FieldRule::ComputedConsistency {
            formula,
            tolerance,
            recompute,
        } => {
            let Some(expected) = formula.evaluate(row) else {
                return Verdict::Report {
                    reason: format!("cannot verify: {} is not computable", formula),
                };
            };
            let rounded = round_to(expected, 2);
            match value.as_number() {
                // Nothing to preserve: fill in the computed value
                None => Verdict::Replace {
                    value: Value::Number(rounded),
                    reason: format!("{}, expected {} = {}", not_numeric(value), formula, rounded),
                },
                // A total this rule filled in earlier is the rounded value
                Some(actual) if actual == rounded => Verdict::Pass,
                Some(actual) if is_consistent(actual, expected, *tolerance) => Verdict::Pass,
                Some(actual) => {
                    let reason = format!(
                        "{} deviates from {} = {} by more than {}%",
                        actual,
                        formula,
                        rounded,
                        tolerance * 100.0
                    );
                    if *recompute {
                        Verdict::Replace {
                            value: Value::Number(rounded),
                            reason,
                        }
                    } else {
                        Verdict::Report { reason }
                    }
                }
            }
        }
    }
}

fn is_consistent(actual: f64, expected: f64, tolerance: f64) -> bool {
    if expected == 0.0 {
        return actual == 0.0;
    }
    (actual - expected).abs() / expected.abs() <= tolerance
}

fn not_numeric(value: &Value) -> String {
    match value {
        Value::Null => "value is null".to_string(),
        other => format!("'{}' is not numeric", other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::rules::{RuleRegistry, RuleSpec, TableKind, ValidationPolicy};
    use crate::infrastructure::adapters::sinks::MemorySink;
    use indexmap::IndexMap;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn compile(table: TableKind, yaml: &str, policy: &ValidationPolicy) -> RuleSet {
        let specs: IndexMap<String, RuleSpec> = serde_yaml::from_str(yaml).unwrap();
        RuleRegistry::new(table, policy).unwrap().compile(&specs).unwrap()
    }

    fn orders(records: Vec<Vec<&str>>) -> Table {
        Table::from_text_rows(
            "orders",
            &[
                "order_id",
                "product_id",
                "quantity",
                "unit_price",
                "total_amount",
                "order_status",
            ],
            records
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
    }

    const ORDER_RULES: &str = r#"
order_id: primary_key
quantity: positive
unit_price: positive
total_amount: multiple_of_quantity_unit_price
order_status: [Pending, Confirmed, Shipped]
"#;

    #[test]
    fn test_negative_quantity_and_bad_status_are_repaired() {
        let policy = ValidationPolicy::default();
        let rules = compile(TableKind::Orders, ORDER_RULES, &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = orders(vec![vec!["1", "P1", "-3", "10", "30", "Pandng"]]);
        let result = Validator::validate(table, &rules, &ctx).unwrap();

        assert_eq!(result.table.len(), 1);
        let row = &result.table.rows[0];
        assert_eq!(row.get("quantity"), &Value::Number(3.0));
        assert_eq!(row.get("order_status"), &Value::text("Pending"));

        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.violations[0].rule, "positive");
        assert_eq!(result.violations[0].row_identifier, "1");
        assert_eq!(result.violations[0].original_value, Value::Number(-3.0));
        assert_eq!(result.violations[0].repaired_value, Some(Value::Number(3.0)));
        assert_eq!(result.violations[1].rule, "enumerated_values");
        assert_eq!(result.violations[1].outcome, Outcome::Repaired);

        assert_eq!(sink.violations().len(), 2);
    }

    #[test]
    fn test_duplicate_primary_key_keeps_first_occurrence() {
        let policy = ValidationPolicy::default();
        let rules = compile(TableKind::Orders, ORDER_RULES, &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = orders(vec![
            vec!["5", "P1", "2", "10", "20", "Pending"],
            vec!["5", "P2", "-1", "3", "3", "Nope"],
            vec!["", "P3", "1", "1", "1", "Pending"],
        ]);
        let result = Validator::validate(table, &rules, &ctx).unwrap();

        assert_eq!(result.table.len(), 1);
        assert_eq!(result.table.rows[0].get("product_id"), &Value::text("P1"));
        assert_eq!(result.rows_dropped(), 2);

        // Dropped rows are not evaluated further: only the key violations show up
        assert_eq!(result.violations.len(), 2);
        assert!(result.violations.iter().all(|v| v.rule == "primary_key"));
        assert_eq!(result.violations[0].row_identifier, "5 (row 2)");
        assert_eq!(result.violations[1].row_identifier, "row 3");
        assert!(result.violations.iter().all(|v| v.outcome == Outcome::Dropped));
    }

    #[test]
    fn test_positive_zero_falls_back_to_floor() {
        let policy = ValidationPolicy::default();
        let rules = compile(TableKind::Orders, "quantity: positive\nstock: non_negative\n", &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = Table::from_text_rows(
            "orders",
            &["quantity", "stock"],
            vec![
                vec!["0".into(), "-4".into()],
                vec!["abc".into(), "".into()],
            ],
        );
        let result = Validator::validate(table, &rules, &ctx).unwrap();

        assert_eq!(result.table.rows[0].get("quantity"), &Value::Number(POSITIVE_FLOOR));
        assert_eq!(result.table.rows[0].get("stock"), &Value::Number(4.0));
        assert_eq!(result.table.rows[1].get("quantity"), &Value::Number(POSITIVE_FLOOR));
        assert_eq!(result.table.rows[1].get("stock"), &Value::Number(NON_NEGATIVE_FLOOR));
        assert_eq!(result.violations.len(), 4);
    }

    #[test]
    fn test_dates_are_typed_and_bad_dates_use_run_date() {
        let policy = ValidationPolicy::default();
        let rules = compile(TableKind::Orders, "order_date: check_date_format\n", &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = Table::from_text_rows(
            "orders",
            &["order_date"],
            vec![
                vec!["2024-02-29".into()],
                vec!["29/02/2024".into()],
                vec!["".into()],
            ],
        );
        let result = Validator::validate(table, &rules, &ctx).unwrap();

        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(result.table.rows[0].get("order_date"), &Value::Date(leap));
        assert_eq!(result.table.rows[1].get("order_date"), &Value::Date(run_date()));
        assert_eq!(result.table.rows[2].get("order_date"), &Value::Date(run_date()));
        assert_eq!(result.violations.len(), 2);
        assert!(result.violations.iter().all(|v| v.rule == "check_date_format"));
    }

    #[test]
    fn test_inconsistent_total_is_reported_not_overwritten() {
        let policy = ValidationPolicy::default();
        let rules = compile(TableKind::Orders, ORDER_RULES, &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = orders(vec![
            vec!["1", "P1", "2", "10", "20.3", "Pending"],
            vec!["2", "P1", "2", "10", "25", "Pending"],
            vec!["3", "P1", "2", "10", "", "Pending"],
        ]);
        let result = Validator::validate(table, &rules, &ctx).unwrap();

        // 1.5% off is within tolerance
        assert_eq!(result.table.rows[0].get("total_amount"), &Value::Number(20.3));
        // 25% off: reported, value untouched
        assert_eq!(result.table.rows[1].get("total_amount"), &Value::Number(25.0));
        // missing total: filled with the computed value
        assert_eq!(result.table.rows[2].get("total_amount"), &Value::Number(20.0));

        let totals: Vec<&ViolationRecord> = result
            .violations_for_rule("multiple_of_quantity_unit_price")
            .collect();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].outcome, Outcome::Reported);
        assert_eq!(totals[0].repaired_value, None);
        assert_eq!(totals[1].outcome, Outcome::Repaired);
    }

    #[test]
    fn test_recompute_mode_overwrites_inconsistent_total() {
        let policy = ValidationPolicy {
            recompute_inconsistent: true,
            ..Default::default()
        };
        let rules = compile(TableKind::Orders, ORDER_RULES, &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = orders(vec![vec!["2", "P1", "2", "10", "25", "Pending"]]);
        let result = Validator::validate(table, &rules, &ctx).unwrap();

        assert_eq!(result.table.rows[0].get("total_amount"), &Value::Number(20.0));
        assert_eq!(result.violations[0].outcome, Outcome::Repaired);
    }

    #[test]
    fn test_cross_reference_without_index_is_an_ordering_error() {
        let policy = ValidationPolicy::default();
        let rules = compile(TableKind::Orders, "product_id: exists_in_products\n", &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = orders(vec![vec!["1", "P1", "1", "1", "1", "Pending"]]);
        let err = Validator::validate(table, &rules, &ctx).unwrap_err();
        assert!(matches!(err, DomainError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_referential_miss_policies() {
        let products = Table::from_text_rows("products", &["product_id"], vec![vec!["P1".into()]]);
        let mut checker = CrossReferenceChecker::new();
        checker.register(TableKind::Products, &products, "product_id");
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink).with_references(&checker);
        let raw = orders(vec![
            vec!["1", "P1", "1", "1", "1", "Pending"],
            vec!["2", "P999", "1", "1", "1", "Pending"],
        ]);

        let retain = ValidationPolicy::default();
        let rules = compile(TableKind::Orders, "order_id: primary_key\nproduct_id: exists_in_products\n", &retain);
        let result = Validator::validate(raw.clone(), &rules, &ctx).unwrap();
        assert_eq!(result.table.len(), 2);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].rule, "exists_in_products");
        assert_eq!(result.violations[0].row_identifier, "2");
        assert_eq!(result.violations[0].outcome, Outcome::Reported);

        let drop = ValidationPolicy {
            referential_miss: ReferentialMissPolicy::Drop,
            ..Default::default()
        };
        let rules = compile(TableKind::Orders, "order_id: primary_key\nproduct_id: exists_in_products\n", &drop);
        let result = Validator::validate(raw, &rules, &ctx).unwrap();
        assert_eq!(result.table.len(), 1);
        assert_eq!(result.violations[0].outcome, Outcome::Dropped);
    }

    #[test]
    fn test_missing_columns_are_skipped_with_a_warning() {
        let policy = ValidationPolicy::default();
        let rules = compile(TableKind::Products, "supplier_id: not_null\n", &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = Table::from_text_rows("products", &["product_id"], vec![vec!["P1".into()]]);
        let result = Validator::validate(table, &rules, &ctx).unwrap();

        assert!(result.violations.is_empty());
        assert!(sink.events().iter().any(|e| matches!(
            e,
            PipelineEvent::ColumnMissing { column, .. } if column == "supplier_id"
        )));
    }

    #[test]
    fn test_revalidating_cleansed_table_is_a_fixed_point() {
        let policy = ValidationPolicy {
            recompute_inconsistent: true,
            ..Default::default()
        };
        let rules = compile(
            TableKind::Orders,
            r#"
order_id: primary_key
order_date: check_date_format
customer_id: not_null
quantity: positive
unit_price: positive
total_amount: multiple_of_quantity_unit_price
order_status: [Pending, Shipped]
"#,
            &policy,
        );
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = Table::from_text_rows(
            "orders",
            &[
                "order_id",
                "order_date",
                "customer_id",
                "quantity",
                "unit_price",
                "total_amount",
                "order_status",
            ],
            vec![
                vec!["1", "2024-01-01", "", "-2", "0", "99", "??"],
                vec!["1", "2024-01-02", "C1", "1", "1", "1", "Pending"],
                vec!["2", "bad", "C2", "x", "5", "", "Shipped"],
                vec!["3", "2024-01-03", "C3", "0.5", "0.33", "", "Pending"],
                vec!["4", "2024-01-04", "C4", "0.5", "0.33", "7", "Pending"],
            ]
            .into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect(),
        );

        let first = Validator::validate(table, &rules, &ctx).unwrap();
        assert!(!first.violations.is_empty());
        let fractional: Vec<&Value> = first
            .table
            .rows
            .iter()
            .filter(|r| r.get("quantity") == &Value::Number(0.5))
            .map(|r| r.get("total_amount"))
            .collect();
        assert_eq!(fractional, vec![&Value::Number(0.17), &Value::Number(0.17)]);

        let second = Validator::validate(first.table.clone(), &rules, &ctx).unwrap();
        assert!(second.violations.is_empty());
        assert_eq!(second.table, first.table);
    }

    #[test]
    fn test_report_only_findings_are_the_only_repeats() {
        let policy = ValidationPolicy::default();
        let rules = compile(TableKind::Orders, ORDER_RULES, &policy);
        let sink = MemorySink::new();
        let ctx = ValidationContext::new(run_date(), &sink);

        let table = orders(vec![
            vec!["1", "P1", "-2", "10", "99", "Nope"],
            vec!["2", "P1", "2", "10", "20", "Pending"],
        ]);
        let first = Validator::validate(table, &rules, &ctx).unwrap();
        let second = Validator::validate(first.table.clone(), &rules, &ctx).unwrap();

        assert_eq!(second.table, first.table);
        assert!(second.violations.iter().all(|v| v.outcome == Outcome::Reported));
        assert!(second.violations.iter().all(|v| first.violations.contains(v)));
    }
}
