// curator-core/src/infrastructure/config/mod.rs

pub mod pipeline;

pub use crate::domain::project::PipelineConfig;
pub use pipeline::{CONFIG_CANDIDATES, find_pipeline_config, load_pipeline_config};
