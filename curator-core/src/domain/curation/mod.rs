// curator-core/src/domain/curation/mod.rs

pub mod aggregator;

pub use aggregator::{Aggregator, CurationReport, ProductPerformance};
