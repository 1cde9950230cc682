//! Environment-to-account mapping for queue endpoint derivation
//!
//! Queue URLs embed an AWS account id and region that differ per deployment
//! environment. The mapping is explicit configuration supplied by the caller;
//! staging is mandatory and doubles as the fallback for unrecognized tags.

use std::collections::HashMap;

/// Account id and region behind one deployment environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEndpoint {
    /// AWS account id owning the queues for this environment
    pub account_id: String,
    /// AWS region the queues are provisioned in
    pub region: String,
}

impl AccountEndpoint {
    /// Creates an account endpoint
    #[must_use]
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
        }
    }
}

/// Mapping from environment tag to account endpoint
///
/// Any tag without an explicit entry resolves to the staging endpoint.
#[derive(Debug, Clone)]
pub struct EnvironmentMap {
    staging: AccountEndpoint,
    accounts: HashMap<String, AccountEndpoint>,
}

impl EnvironmentMap {
    /// Creates a mapping with the mandatory staging endpoint
    #[must_use]
    pub fn new(staging: AccountEndpoint) -> Self {
        Self {
            staging,
            accounts: HashMap::new(),
        }
    }

    /// Registers an endpoint for an environment tag
    #[must_use]
    pub fn with_environment(mut self, tag: impl Into<String>, endpoint: AccountEndpoint) -> Self {
        self.accounts.insert(tag.into(), endpoint);
        self
    }

    /// Resolves an environment tag, falling back to staging for unknown tags
    #[must_use]
    pub fn resolve(&self, tag: &str) -> &AccountEndpoint {
        self.accounts.get(tag).unwrap_or(&self.staging)
    }
}
