// curator-core/src/domain/table/profile.rs

use serde::Serialize;
use std::collections::HashSet;

use super::model::Table;

/// Shape and completeness summary of a freshly loaded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    pub table: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub null_counts: Vec<(String, usize)>,
    pub distinct_counts: Vec<(String, usize)>,
    /// Rows identical to an earlier row on every column.
    pub duplicate_rows: usize,
}

impl TableProfile {
    pub fn of(table: &Table) -> Self {
        let mut null_counts = Vec::with_capacity(table.columns.len());
        let mut distinct_counts = Vec::with_capacity(table.columns.len());

        for column in &table.columns {
            let mut nulls = 0;
            let mut distinct = HashSet::new();
            for value in table.column_values(column) {
                match value.key() {
                    Some(k) => {
                        distinct.insert(k);
                    }
                    None => nulls += 1,
                }
            }
            null_counts.push((column.clone(), nulls));
            distinct_counts.push((column.clone(), distinct.len()));
        }

        let mut seen = HashSet::new();
        let mut duplicate_rows = 0;
        for row in &table.rows {
            let signature: Vec<Option<String>> =
                table.columns.iter().map(|c| row.get(c).key()).collect();
            if !seen.insert(signature) {
                duplicate_rows += 1;
            }
        }

        Self {
            table: table.name.clone(),
            rows: table.len(),
            columns: table.columns.clone(),
            null_counts,
            distinct_counts,
            duplicate_rows,
        }
    }

    pub fn total_nulls(&self) -> usize {
        self.null_counts.iter().map(|(_, n)| n).sum()
    }
}
