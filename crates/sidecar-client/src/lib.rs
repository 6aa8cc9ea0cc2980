//! # Sidecar Client
//!
//! Client-side data access for sidecar configuration variables: typed CRUD
//! calls against the fleet management REST API, an in-memory cache of the
//! last fetched listing, and synchronous change notifications for embedding
//! UIs.
//!
//! ## Features
//!
//! - **Typed CRUD**: fetch, create, update, delete, and validate
//!   configuration variables over REST
//! - **Read cache**: the last fetched listing, replaced wholesale on every
//!   successful fetch and never updated optimistically
//! - **Subscriptions**: registered callbacks run synchronously after each
//!   cache replacement
//! - **Notifications**: operation outcomes reported through a pluggable
//!   user-notification sink
//! - **Layered configuration**: compiled defaults, TOML file, environment
//!   overrides

pub mod client;
pub mod config;
pub mod error;
pub mod notification;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::{ApiConfig, Config};
pub use error::{ConfigurationError, Error, Result};
pub use notification::{LogNotifier, Notifier};
pub use store::{ConfigurationVariableStore, SubscriptionId};
pub use types::{ConfigurationVariable, ListConfigurationVariablesResponse, ValidationResult};

/// Version of the sidecar-client crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }
}
