//! Hosted instance entities.

pub mod model;

pub use model::{Project, ProjectType, Snapshot, Stack};
