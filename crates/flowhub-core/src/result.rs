//! Convenience result type alias for FlowHub.

use crate::error::AppError;

/// A specialized `Result` type for FlowHub operations.
pub type AppResult<T> = Result<T, AppError>;
