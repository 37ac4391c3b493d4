// curator-core/src/domain/table/standardize.rs

use serde::{Deserialize, Serialize};

use super::model::Table;
use super::value::{Value, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizationConfig {
    pub round_decimals: u32,
    pub title_case: Vec<String>,
    pub upper_case: Vec<String>,
}

impl Default for StandardizationConfig {
    fn default() -> Self {
        Self {
            round_decimals: 2,
            title_case: Vec::new(),
            upper_case: Vec::new(),
        }
    }
}

/// Cosmetic normalisation applied before validation: whitespace, casing, rounding.
/// Running it twice yields the same table.
pub fn standardize(mut table: Table, config: &StandardizationConfig) -> Table {
    for row in &mut table.rows {
        for column in &table.columns {
            let normalised = match row.get(column) {
                Value::Text(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        Value::Null
                    } else if config.title_case.iter().any(|c| c == column) {
                        Value::Text(title_case(trimmed))
                    } else if config.upper_case.iter().any(|c| c == column) {
                        Value::Text(trimmed.to_uppercase())
                    } else {
                        Value::Text(trimmed.to_string())
                    }
                }
                Value::Number(n) => Value::Number(round_to(*n, config.round_decimals)),
                other => other.clone(),
            };
            row.set(column.clone(), normalised);
        }
    }
    table
}

/// Capitalises the first letter of every alphabetic run, lowercases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
