pub mod pipeline;

pub use pipeline::{PipelineService, RunMode};
