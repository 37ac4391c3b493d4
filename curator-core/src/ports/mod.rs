// curator-core/src/ports/mod.rs

pub mod sink;
pub mod storage;

pub use sink::{EventSink, PipelineEvent};
pub use storage::{ArtifactWriter, DatasetReader};
