// curator-core/src/infrastructure/adapters/sinks.rs

use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::validation::ViolationRecord;
use crate::ports::sink::{EventSink, PipelineEvent};

/// Forwards pipeline events to the `tracing` subscriber installed by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::TableProfiled(profile) => info!(
                table = %profile.table,
                rows = profile.rows,
                columns = profile.columns.len(),
                nulls = profile.total_nulls(),
                duplicate_rows = profile.duplicate_rows,
                "Table profiled"
            ),
            PipelineEvent::EmptyTable { table } => warn!(%table, "Input table has no rows"),
            PipelineEvent::ColumnMissing { table, column } => {
                warn!(%table, %column, "Column declared in rules is missing, rule skipped")
            }
            PipelineEvent::Violation { table, record } => warn!(
                %table,
                row = %record.row_identifier,
                column = %record.column,
                rule = %record.rule,
                outcome = %record.outcome,
                "{}",
                record.reason
            ),
            PipelineEvent::TableValidated {
                table,
                rows_in,
                rows_out,
                violations,
            } => info!(%table, rows_in, rows_out, violations, "Validation complete"),
            PipelineEvent::UnmatchedOrders { count } => {
                warn!(count, "Orders without a matching product excluded from report")
            }
            PipelineEvent::IncompleteOrders { count } => {
                warn!(count, "Orders with non-numeric quantity or price excluded from report")
            }
            PipelineEvent::ReportBuilt { products } => debug!(products, "Curated report built"),
        }
    }
}

/// Keeps every event in memory. Used by tests and by callers that want to
/// inspect a run after the fact.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn violations(&self) -> Vec<ViolationRecord> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::Violation { record, .. } => Some(record),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: PipelineEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event);
    }
}
