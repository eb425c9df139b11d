//! # flowhub-core
//!
//! Core crate for FlowHub. Contains the configuration schemas and the
//! unified error system shared by every other FlowHub crate.
//!
//! This crate has **no** internal dependencies on other FlowHub crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
