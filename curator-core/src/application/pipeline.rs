// curator-core/src/application/pipeline.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

use crate::error::CuratorError;
use crate::ports::sink::{EventSink, PipelineEvent};
use crate::ports::storage::{ArtifactWriter, DatasetReader};

// Domain
use crate::domain::curation::{Aggregator, CurationReport};
use crate::domain::project::PipelineConfig;
use crate::domain::rules::{RuleRegistry, RuleSet, TableKind};
use crate::domain::table::{StandardizationConfig, Table, TableProfile, standardize};
use crate::domain::validation::{
    CrossReferenceChecker, Outcome, ValidationContext, ValidationResult, Validator,
};

/// Rule sets of both tables, compiled and checked against each other.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    pub orders: RuleSet,
    pub products: RuleSet,
}

/// Per-table line of `run_results.json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableSummary {
    pub table: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub violations: usize,
    pub repaired: usize,
    pub dropped: usize,
    pub reported: usize,
}

impl TableSummary {
    fn of(result: &ValidationResult) -> Self {
        let count = |outcome: Outcome| {
            result
                .violations
                .iter()
                .filter(|v| v.outcome == outcome)
                .count()
        };
        Self {
            table: result.table.name.clone(),
            rows_in: result.rows_in,
            rows_out: result.table.len(),
            violations: result.violations.len(),
            repaired: count(Outcome::Repaired),
            dropped: count(Outcome::Dropped),
            reported: count(Outcome::Reported),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub success: bool,
    pub run_date: NaiveDate,
    pub duration_ms: u128,
    pub profiles: Vec<TableProfile>,
    pub tables: Vec<TableSummary>,
    pub report_products: usize,
    pub unmatched_orders: usize,
    pub incomplete_orders: usize,
}

/// Compiles both rule sets. Any unknown rule or bad parameter stops here,
/// before a single input row is read.
pub fn compile_rule_sets(config: &PipelineConfig) -> Result<CompiledRules, CuratorError> {
    let policy = &config.validation_policy;
    let products = RuleRegistry::new(TableKind::Products, policy)?
        .compile(config.rules_for(TableKind::Products))?;
    let orders = RuleRegistry::new(TableKind::Orders, policy)?
        .compile(config.rules_for(TableKind::Orders))?;
    Ok(CompiledRules { orders, products })
}

#[instrument(skip_all, fields(run_date = %run_date))]
pub async fn run_pipeline(
    config: &PipelineConfig,
    reader: &dyn DatasetReader,
    writer: &dyn ArtifactWriter,
    sink: Arc<dyn EventSink>,
    run_date: NaiveDate,
) -> Result<RunResult, CuratorError> {
    println!("🚀 Starting Curation Pipeline...");
    let start_time = Instant::now();

    // 1. RULES (fail fast on declaration errors)
    println!("📜 Compiling validation rules...");
    let rules = compile_rule_sets(config)?;

    // 2. LOAD + PROFILE + STANDARDIZE
    println!("📦 Loading inputs...");
    let products_raw = reader.read_table(
        TableKind::Products.as_str(),
        &config.input_path(TableKind::Products),
    )?;
    let orders_raw = reader.read_table(
        TableKind::Orders.as_str(),
        &config.input_path(TableKind::Orders),
    )?;

    let (products_in, products_profile) = prepare(
        products_raw,
        &rules.products,
        &config.standardization,
        sink.as_ref(),
    );
    let (orders_in, orders_profile) = prepare(
        orders_raw,
        &rules.orders,
        &config.standardization,
        sink.as_ref(),
    );

    // 3. VALIDATION
    // Products fully, orders up to (excluding) cross references, side by side.
    println!("🔍 Validating tables...");
    let products_task = {
        let rules = rules.products.clone();
        let sink = Arc::clone(&sink);
        tokio::task::spawn_blocking(move || {
            let ctx = ValidationContext::new(run_date, sink.as_ref());
            Validator::validate(products_in, &rules, &ctx)
        })
    };
    let orders_task = {
        let rules = rules.orders.clone();
        let sink = Arc::clone(&sink);
        tokio::task::spawn_blocking(move || {
            let ctx = ValidationContext::new(run_date, sink.as_ref());
            Validator::validate_local(orders_in, &rules, &ctx)
        })
    };
    let (products, orders_partial) = tokio::try_join!(products_task, orders_task)
        .map_err(|e| CuratorError::InternalError(format!("Validation task failed: {}", e)))?;
    let products = products?;

    // Reference phase: index the cleansed products, then finish orders.
    let mut checker = CrossReferenceChecker::new();
    for (kind, column) in rules.orders.references() {
        if kind != TableKind::Products {
            continue;
        }
        if !products.table.has_column(column) {
            sink.emit(PipelineEvent::ColumnMissing {
                table: products.table.name.clone(),
                column: column.to_string(),
            });
        }
        let keys = checker.register(kind, &products.table, column);
        info!(table = %kind, %column, keys, "Reference index built");
    }
    let ctx = ValidationContext::new(run_date, sink.as_ref()).with_references(&checker);
    let orders = Validator::validate_references(orders_partial, &rules.orders, &ctx)?;

    print_table_line(&products);
    print_table_line(&orders);

    // 4. CURATION
    println!("📊 Building product performance report...");
    let report = Aggregator::aggregate(&orders.table, &products.table, sink.as_ref());

    // 5. ARTIFACTS
    println!("💾 Writing artifacts...");
    write_artifacts(writer, &orders, &products, &report)?;

    let result = RunResult {
        success: true,
        run_date,
        duration_ms: start_time.elapsed().as_millis(),
        profiles: vec![products_profile, orders_profile],
        tables: vec![TableSummary::of(&products), TableSummary::of(&orders)],
        report_products: report.len(),
        unmatched_orders: report.unmatched_orders,
        incomplete_orders: report.incomplete_orders,
    };
    save_json(writer, &result)?;

    println!(
        "✨ Done in {:.2}s. {} products curated.",
        start_time.elapsed().as_secs_f64(),
        report.len()
    );

    Ok(result)
}

// --- HELPER FUNCTIONS ---

fn prepare(
    mut table: Table,
    rules: &RuleSet,
    standardization: &StandardizationConfig,
    sink: &dyn EventSink,
) -> (Table, TableProfile) {
    let profile = TableProfile::of(&table);
    sink.emit(PipelineEvent::TableProfiled(profile.clone()));
    if table.is_empty() {
        sink.emit(PipelineEvent::EmptyTable {
            table: table.name.clone(),
        });
    }
    // Numbers must be typed before rounding applies
    rules.schema().coerce(&mut table);
    (standardize(table, standardization), profile)
}

fn write_artifacts(
    writer: &dyn ArtifactWriter,
    orders: &ValidationResult,
    products: &ValidationResult,
    report: &CurationReport,
) -> Result<(), CuratorError> {
    writer.write_cleansed(TableKind::Orders, &orders.table)?;
    writer.write_cleansed(TableKind::Products, &products.table)?;
    writer.write_violations(TableKind::Orders, &orders.violations)?;
    writer.write_violations(TableKind::Products, &products.violations)?;
    writer.write_report(report)?;
    Ok(())
}

fn print_table_line(result: &ValidationResult) {
    let icon = if result.violations.is_empty() { "✅" } else { "⚠️ " };
    println!(
        "  {} {}: {} rows in, {} rows out, {} violations",
        icon,
        result.table.name,
        result.rows_in,
        result.table.len(),
        result.violations.len()
    );
}

fn save_json<T: Serialize>(writer: &dyn ArtifactWriter, data: &T) -> Result<(), CuratorError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| CuratorError::InternalError(format!("Serialization: {}", e)))?;
    writer.write_summary(&content)
}
