//! Billing checkout session and subscription models.

use serde::{Deserialize, Serialize};

/// A hosted checkout session with the billing provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSession {
    /// Provider session id.
    pub id: String,
    /// Redirect URL for the customer.
    pub url: Option<String>,
}

/// A team's billing subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Provider subscription id.
    pub subscription: String,
    /// Provider customer id.
    pub customer: Option<String>,
    /// Subscription status.
    pub status: Option<String>,
}
