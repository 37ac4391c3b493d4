// curator-core/src/domain/validation/reference.rs

use std::collections::{HashMap, HashSet};

use crate::domain::rules::TableKind;
use crate::domain::table::Table;

/// Existence checks against value sets built once per run.
///
/// Indexes are built from the *cleansed* target table: the target is validated
/// first, so a product dropped as a duplicate or null key is never a valid target.
#[derive(Debug, Default, Clone)]
pub struct CrossReferenceChecker {
    indexes: HashMap<(TableKind, String), HashSet<String>>,
}

impl CrossReferenceChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `table.column`. Returns the number of distinct keys.
    pub fn register(&mut self, kind: TableKind, table: &Table, column: &str) -> usize {
        let keys: HashSet<String> = table.column_values(column).filter_map(|v| v.key()).collect();
        let count = keys.len();
        self.indexes.insert((kind, column.to_string()), keys);
        count
    }

    pub fn is_registered(&self, kind: TableKind, column: &str) -> bool {
        self.indexes.contains_key(&(kind, column.to_string()))
    }

    /// False for unregistered targets as well; callers check `is_registered` first.
    pub fn exists(&self, value: &str, kind: TableKind, column: &str) -> bool {
        self.indexes
            .get(&(kind, column.to_string()))
            .is_some_and(|keys| keys.contains(value))
    }
}
