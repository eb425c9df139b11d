//! Application and pipeline entities.

pub mod model;

pub use model::{Application, Pipeline, PipelineStage};
