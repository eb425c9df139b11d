//! # flowhub-entity
//!
//! Data model for FlowHub audit events and the domain entities that audit
//! events are recorded about. Audit rows derive `sqlx::FromRow`; domain
//! entities serialize with camelCase keys, which is the shape the audit
//! formatters project from.

pub mod application;
pub mod audit;
pub mod billing;
pub mod device;
pub mod project;
pub mod team;
pub mod user;
