// curator-core/src/infrastructure/adapters/csv_store.rs

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::domain::curation::CurationReport;
use crate::domain::rules::TableKind;
use crate::domain::table::value::{format_number, round_to};
use crate::domain::table::Table;
use crate::domain::validation::ViolationRecord;
use crate::error::CuratorError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::storage::{ArtifactWriter, DatasetReader};

pub const CLEANSED_DIR: &str = "cleansed";
pub const CURATED_DIR: &str = "curated";
pub const ERRORS_DIR: &str = "errors";
pub const REPORT_FILE: &str = "product_performance.csv";
pub const SUMMARY_FILE: &str = "run_results.json";

pub const VIOLATION_HEADER: [&str; 7] = [
    "row_identifier",
    "column",
    "rule",
    "original_value",
    "repaired_value",
    "reason",
    "outcome",
];

pub const REPORT_HEADER: [&str; 9] = [
    "product_id",
    "product_name",
    "total_quantity",
    "total_revenue",
    "rank",
    "total_orders",
    "avg_order_quantity",
    "first_order_date",
    "last_order_date",
];

/// Reads raw inputs and writes every artifact of a run as CSV under `output_dir`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    output_dir: PathBuf,
    display_date_format: String,
}

impl CsvStore {
    pub fn new(output_dir: impl Into<PathBuf>, display_date_format: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            display_date_format: display_date_format.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn cleansed_path(&self, kind: TableKind) -> PathBuf {
        self.output_dir
            .join(CLEANSED_DIR)
            .join(format!("clean_{}.csv", kind))
    }

    pub fn errors_path(&self, kind: TableKind) -> PathBuf {
        self.output_dir
            .join(ERRORS_DIR)
            .join(format!("{}_errors.csv", kind))
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(CURATED_DIR).join(REPORT_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }

    fn write_csv<I>(&self, path: &Path, header: &[&str], records: I) -> Result<(), CuratorError>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let csv_err = |source: csv::Error| InfrastructureError::Csv {
            path: path.display().to_string(),
            source,
        };

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(header).map_err(csv_err)?;
        for record in records {
            wtr.write_record(&record).map_err(csv_err)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| InfrastructureError::Io(e.into_error()))?;

        atomic_write(path, bytes)?;
        debug!(path = %path.display(), "Artifact written");
        Ok(())
    }

    fn render_date(&self, date: Option<chrono::NaiveDate>) -> String {
        date.map(|d| d.format(&self.display_date_format).to_string())
            .unwrap_or_default()
    }
}

impl DatasetReader for CsvStore {
    #[instrument(skip(self))]
    fn read_table(&self, name: &str, path: &Path) -> Result<Table, CuratorError> {
        if !path.is_file() {
            return Err(InfrastructureError::InputNotFound(path.display().to_string()).into());
        }
        let csv_err = |source: csv::Error| InfrastructureError::Csv {
            path: path.display().to_string(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(csv_err)?;

        let columns: Vec<String> = rdr
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(csv_err)?;
            records.push(record.iter().map(str::to_string).collect());
        }

        debug!(rows = records.len(), columns = columns.len(), "Input loaded");
        Ok(Table::from_text_rows(name, &columns, records))
    }
}

impl ArtifactWriter for CsvStore {
    fn write_cleansed(&self, kind: TableKind, table: &Table) -> Result<(), CuratorError> {
        let header: Vec<&str> = table.columns.iter().map(String::as_str).collect();
        let records = table.rows.iter().map(|row| {
            table
                .columns
                .iter()
                .map(|c| row.get(c).render(&self.display_date_format))
                .collect()
        });
        self.write_csv(&self.cleansed_path(kind), &header, records)
    }

    fn write_violations(
        &self,
        kind: TableKind,
        violations: &[ViolationRecord],
    ) -> Result<(), CuratorError> {
        let records = violations.iter().map(|v| {
            vec![
                v.row_identifier.clone(),
                v.column.clone(),
                v.rule.clone(),
                v.original_value.render(&self.display_date_format),
                v.repaired_value
                    .as_ref()
                    .map(|r| r.render(&self.display_date_format))
                    .unwrap_or_default(),
                v.reason.clone(),
                v.outcome.to_string(),
            ]
        });
        self.write_csv(&self.errors_path(kind), &VIOLATION_HEADER, records)
    }

    fn write_report(&self, report: &CurationReport) -> Result<(), CuratorError> {
        let records = report.rows.iter().map(|p| {
            vec![
                p.product_id.clone(),
                p.product_name.clone(),
                format_number(round_to(p.total_quantity, 2)),
                format_number(round_to(p.total_revenue, 2)),
                p.rank.to_string(),
                p.total_orders.to_string(),
                format_number(round_to(p.avg_order_quantity, 2)),
                self.render_date(p.first_order_date),
                self.render_date(p.last_order_date),
            ]
        });
        self.write_csv(&self.report_path(), &REPORT_HEADER, records)
    }

    fn write_summary(&self, json: &str) -> Result<(), CuratorError> {
        atomic_write(self.summary_path(), json)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::{Row, Value};
    use crate::domain::validation::Outcome;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_table_keeps_empty_cells_as_null() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("orders.csv");
        fs::write(&path, "order_id, quantity\n1,3\n2,\n")?;

        let store = CsvStore::new(dir.path().join("out"), "%d-%m-%Y");
        let table = store.read_table("orders", &path)?;

        assert_eq!(table.columns, vec!["order_id", "quantity"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("quantity"), &Value::text("3"));
        assert!(table.rows[1].get("quantity").is_null());
        Ok(())
    }

    #[test]
    fn test_missing_input_is_reported() {
        let store = CsvStore::new("out", "%d-%m-%Y");
        let err = store
            .read_table("orders", Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Infrastructure(InfrastructureError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_ragged_rows_are_a_csv_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("orders.csv");
        fs::write(&path, "a,b\n1,2,3\n")?;

        let store = CsvStore::new(dir.path(), "%d-%m-%Y");
        let err = store.read_table("orders", &path).unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Infrastructure(InfrastructureError::Csv { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_cleansed_dates_use_display_format() -> Result<()> {
        let dir = tempdir()?;
        let store = CsvStore::new(dir.path(), "%d-%m-%Y");

        let mut table = Table::new("orders", vec!["order_id".into(), "order_date".into()]);
        table.push(
            Row::new()
                .with("order_id", Value::text("1"))
                .with("order_date", Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())),
        );
        table.push(Row::new().with("order_id", Value::text("2")));
        store.write_cleansed(TableKind::Orders, &table)?;

        let written = fs::read_to_string(dir.path().join("cleansed/clean_orders.csv"))?;
        assert_eq!(written, "order_id,order_date\n1,09-03-2024\n2,\n");
        Ok(())
    }

    #[test]
    fn test_empty_violation_log_still_has_header() -> Result<()> {
        let dir = tempdir()?;
        let store = CsvStore::new(dir.path(), "%d-%m-%Y");
        store.write_violations(TableKind::Products, &[])?;

        let written = fs::read_to_string(store.errors_path(TableKind::Products))?;
        assert_eq!(
            written,
            "row_identifier,column,rule,original_value,repaired_value,reason,outcome\n"
        );
        Ok(())
    }

    #[test]
    fn test_violation_rows() -> Result<()> {
        let dir = tempdir()?;
        let store = CsvStore::new(dir.path(), "%d-%m-%Y");
        let record = ViolationRecord {
            row_identifier: "1".into(),
            column: "quantity".into(),
            rule: "positive".into(),
            original_value: Value::Number(-3.0),
            repaired_value: Some(Value::Number(3.0)),
            reason: "value -3 is not positive".into(),
            outcome: Outcome::Repaired,
        };
        store.write_violations(TableKind::Orders, &[record])?;

        let written = fs::read_to_string(dir.path().join("errors/orders_errors.csv"))?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[1], "1,quantity,positive,-3,3,value -3 is not positive,repaired");
        Ok(())
    }
}
