// curator-core/src/domain/table/schema.rs

use std::collections::HashMap;
use std::fmt;

use super::model::{Row, Table};
use super::value::{Value, parse_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
        };
        write!(f, "{}", s)
    }
}

/// Column types inferred from a rule set. Undeclared columns are text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    types: HashMap<String, ColumnType>,
}

impl Schema {
    pub fn declare(&mut self, column: impl Into<String>, ty: ColumnType) {
        let column = column.into();
        // Number/Date win over Text when a column is typed by several rules
        let current = self.types.get(&column).copied().unwrap_or_default();
        if current == ColumnType::Text {
            self.types.insert(column, ty);
        }
    }

    pub fn column_type(&self, column: &str) -> ColumnType {
        self.types.get(column).copied().unwrap_or_default()
    }

    /// Converts parseable text cells of numeric columns into numbers.
    /// Unparseable cells are left untouched so the numeric rules can flag them.
    /// Date columns are not converted here: the date rule owns that parse.
    pub fn coerce_row(&self, row: &mut Row) {
        for (column, ty) in &self.types {
            if *ty != ColumnType::Number {
                continue;
            }
            let parsed = row.get(column).as_text().and_then(parse_number);
            if let Some(n) = parsed {
                row.set(column.clone(), Value::Number(n));
            }
        }
    }

    pub fn coerce(&self, table: &mut Table) {
        for row in &mut table.rows {
            self.coerce_row(row);
        }
    }
}
