//! Billing entities.

pub mod model;

pub use model::{BillingSession, Subscription};
