// curator-core/src/infrastructure/adapters/mod.rs

pub mod csv_store;
pub mod sinks;

pub use csv_store::CsvStore;
pub use sinks::{MemorySink, TracingSink};
