// curator-core/src/application/mod.rs

pub mod clean;
pub mod pipeline;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use curator_core::application::{run_pipeline, clean_outputs};`

pub use clean::clean_outputs;
pub use pipeline::{CompiledRules, RunResult, TableSummary, compile_rule_sets, run_pipeline};
