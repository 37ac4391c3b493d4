// curator-core/src/domain/table/model.rs

use std::collections::HashMap;

use super::value::Value;

static NULL: Value = Value::Null;

/// One record: column name -> value. Missing columns read as null.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.cells.insert(column.into(), value);
    }

    pub fn with(mut self, column: impl Into<String>, value: Value) -> Self {
        self.set(column, value);
        self
    }
}

/// An ordered sequence of rows sharing a header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from raw text cells (header + records).
    /// Empty cells become nulls; everything else stays text until a schema types it.
    pub fn from_text_rows<S: AsRef<str>>(
        name: impl Into<String>,
        headers: &[S],
        records: Vec<Vec<String>>,
    ) -> Self {
        let columns: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let mut table = Self::new(name, columns);
        for record in records {
            let mut row = Row::new();
            for (column, cell) in table.columns.iter().zip(record) {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::Text(cell)
                };
                row.set(column.clone(), value);
            }
            table.rows.push(row);
        }
        table
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |r| r.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_rows_maps_empty_cells_to_null() {
        let table = Table::from_text_rows(
            "orders",
            &["order_id", "customer_id"],
            vec![vec!["1".into(), "".into()]],
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("order_id"), &Value::text("1"));
        assert!(table.rows[0].get("customer_id").is_null());
    }

    #[test]
    fn test_missing_column_reads_as_null() {
        let row = Row::new().with("a", Value::Number(1.0));
        assert!(row.get("b").is_null());
    }

    #[test]
    fn test_short_records_leave_trailing_columns_null() {
        let table = Table::from_text_rows("t", &["a", "b"], vec![vec!["x".into()]]);
        assert!(table.has_column("b"));
        assert!(table.rows[0].get("b").is_null());
    }
}
