// curator-core/src/ports/sink.rs

// Injected logging capability. The domain never reaches for a global logger:
// it reports what happened to whatever sink the caller hands in.

use crate::domain::table::TableProfile;
use crate::domain::validation::ViolationRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    TableProfiled(TableProfile),
    EmptyTable {
        table: String,
    },
    ColumnMissing {
        table: String,
        column: String,
    },
    Violation {
        table: String,
        record: ViolationRecord,
    },
    TableValidated {
        table: String,
        rows_in: usize,
        rows_out: usize,
        violations: usize,
    },
    UnmatchedOrders {
        count: usize,
    },
    IncompleteOrders {
        count: usize,
    },
    ReportBuilt {
        products: usize,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}
