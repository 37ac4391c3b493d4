// curator/src/commands/inspect.rs
//
// USE CASE: Pretty-print a CSV input or artifact.

use std::path::PathBuf;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table as Grid};
use curator_core::infrastructure::adapters::CsvStore;
use curator_core::ports::DatasetReader;

use super::fail;

pub fn execute(file: PathBuf, limit: usize) -> anyhow::Result<()> {
    let name = file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    // Output dir and date format are irrelevant for reading
    let reader = CsvStore::new(".", "%Y-%m-%d");
    let table = reader
        .read_table(&name, &file)
        .unwrap_or_else(|e| fail(e));

    println!("\n🔍 Inspecting '{}'", file.display());
    println!(
        "   {} rows, {} columns",
        table.len(),
        table.columns.len()
    );

    let mut grid = Grid::new();
    grid.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(table.columns.clone());

    for row in table.rows.iter().take(limit) {
        grid.add_row(
            table
                .columns
                .iter()
                .map(|c| row.get(c).render("%Y-%m-%d"))
                .collect::<Vec<_>>(),
        );
    }
    println!("{grid}");

    if table.len() > limit {
        println!("   … {} more rows", table.len() - limit);
    }
    Ok(())
}
