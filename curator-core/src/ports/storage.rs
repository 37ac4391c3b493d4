// curator-core/src/ports/storage.rs

// What the application needs from storage, without knowing the file format.

use std::path::Path;

use crate::domain::curation::CurationReport;
use crate::domain::rules::TableKind;
use crate::domain::table::Table;
use crate::domain::validation::ViolationRecord;
use crate::error::CuratorError;

pub trait DatasetReader {
    /// Loads a raw table. Cells come back as text or null; typing happens later.
    fn read_table(&self, name: &str, path: &Path) -> Result<Table, CuratorError>;
}

pub trait ArtifactWriter {
    fn write_cleansed(&self, kind: TableKind, table: &Table) -> Result<(), CuratorError>;

    fn write_violations(
        &self,
        kind: TableKind,
        violations: &[ViolationRecord],
    ) -> Result<(), CuratorError>;

    fn write_report(&self, report: &CurationReport) -> Result<(), CuratorError>;

    /// Run summary, already serialized.
    fn write_summary(&self, json: &str) -> Result<(), CuratorError>;
}
