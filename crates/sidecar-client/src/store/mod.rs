//! Configuration variable store
//!
//! Mediates between UI actions and the remote collection resource: one REST
//! call per operation, a read cache of the last listing, and synchronous
//! change broadcasts to subscribers.

mod subscription;

pub use subscription::SubscriptionId;

use crate::client::ApiClient;
use crate::error::Result;
use crate::notification::Notifier;
use crate::types::{ConfigurationVariable, ListConfigurationVariablesResponse, ValidationResult};
use parking_lot::RwLock;
use std::sync::Arc;
use subscription::SubscriptionRegistry;
use tracing::debug;

/// Collection path relative to the API base URL
const SOURCE_PATH: &str = "sidecar/configuration_variables";

/// Client-side store for configuration variables
///
/// Holds the last fetched listing and reports every operation outcome
/// through the injected [`Notifier`]. Failures are surfaced both as a
/// notification and as the returned error; nothing is retried.
pub struct ConfigurationVariableStore {
    /// HTTP client for the fleet management API
    client: ApiClient,

    /// Sink for user-visible operation outcomes
    notifier: Arc<dyn Notifier>,

    /// Last fetched listing, absent until the first successful fetch
    cache: RwLock<Option<Vec<ConfigurationVariable>>>,

    /// Cache-change subscribers
    subscriptions: SubscriptionRegistry,
}

impl ConfigurationVariableStore {
    /// Create a new store
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            cache: RwLock::new(None),
            subscriptions: SubscriptionRegistry::new(),
        }
    }

    /// Snapshot of the last fetched listing, if any fetch has succeeded
    pub fn cached(&self) -> Option<Vec<ConfigurationVariable>> {
        self.cache.read().clone()
    }

    /// Register a callback invoked synchronously after every cache change
    ///
    /// The callback receives a read-only view of the new cache.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[ConfigurationVariable]) + Send + Sync + 'static,
    {
        self.subscriptions.subscribe(callback)
    }

    /// Remove a previously registered callback
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    /// Fetch the full listing, replace the cache, and broadcast the change
    ///
    /// The cache is replaced wholesale; concurrent fetches race and the last
    /// response to resolve wins. On failure the cache is left untouched and
    /// the failure is reported once through the notifier.
    pub async fn all(&self) -> Result<Vec<ConfigurationVariable>> {
        match self
            .client
            .get_json::<ListConfigurationVariablesResponse>(SOURCE_PATH)
            .await
        {
            Ok(response) => {
                let variables = response.configuration_variables;
                self.replace_cache(&variables);
                Ok(variables)
            }
            Err(err) => {
                self.notifier.error(
                    &format!("Fetching configuration variables failed with status: {err}"),
                    "Could not retrieve configuration variables",
                );
                Err(err)
            }
        }
    }

    /// Create or update a configuration variable
    ///
    /// An empty `id` creates the record (POST to the collection root); a
    /// non-empty `id` updates it (PUT to the record resource). The cache is
    /// never touched; callers re-fetch when they need the new listing.
    pub async fn save(&self, variable: &ConfigurationVariable) -> Result<()> {
        let result = if variable.is_persisted() {
            self.client
                .put(&format!("{SOURCE_PATH}/{}", variable.id), variable)
                .await
        } else {
            self.client.post(SOURCE_PATH, variable).await
        };

        match result {
            Ok(()) => {
                let action = if variable.is_persisted() {
                    "updated"
                } else {
                    "created"
                };
                self.notifier.success(&format!(
                    "Configuration variable \"{}\" successfully {action}",
                    variable.name
                ));
                Ok(())
            }
            Err(err) => {
                self.notifier.error(
                    &format!(
                        "Saving variable \"{}\" failed with status: {err}",
                        variable.name
                    ),
                    "Could not save variable",
                );
                Err(err)
            }
        }
    }

    /// Delete a persisted configuration variable
    ///
    /// The cache is never touched; callers re-fetch when they need the new
    /// listing.
    pub async fn delete(&self, variable: &ConfigurationVariable) -> Result<()> {
        match self
            .client
            .delete(&format!("{SOURCE_PATH}/{}", variable.id))
            .await
        {
            Ok(()) => {
                self.notifier.success(&format!(
                    "Configuration variable \"{}\" successfully deleted",
                    variable.name
                ));
                Ok(())
            }
            Err(err) => {
                self.notifier.error(
                    &format!(
                        "Deleting variable \"{}\" failed with status: {err}",
                        variable.name
                    ),
                    "Could not delete variable",
                );
                Err(err)
            }
        }
    }

    /// Ask the server to validate a configuration variable
    ///
    /// Always posts to the collection's `validate` resource, regardless of
    /// whether the variable is persisted. The server's response is returned
    /// to the caller; only failures are toasted.
    pub async fn validate(&self, variable: &ConfigurationVariable) -> Result<ValidationResult> {
        match self
            .client
            .post_json::<_, ValidationResult>(&format!("{SOURCE_PATH}/validate"), variable)
            .await
        {
            Ok(result) => Ok(result),
            Err(err) => {
                self.notifier.error(
                    &format!(
                        "Validating variable \"{}\" failed with status: {err}",
                        variable.name
                    ),
                    "Could not validate variable",
                );
                Err(err)
            }
        }
    }

    /// Replace the cache and notify subscribers
    ///
    /// The write lock is released before callbacks run, so a subscriber may
    /// call back into the store.
    fn replace_cache(&self, variables: &[ConfigurationVariable]) {
        *self.cache.write() = Some(variables.to_vec());
        debug!(
            "Replaced configuration variable cache with {} entries",
            variables.len()
        );
        self.subscriptions.broadcast(variables);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::notification::MockNotifier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_against(server: &MockServer, notifier: MockNotifier) -> ConfigurationVariableStore {
        let config = ApiConfig {
            base_url: server.uri().parse().unwrap(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        ConfigurationVariableStore::new(client, Arc::new(notifier))
    }

    fn persisted_variable() -> ConfigurationVariable {
        let mut variable = ConfigurationVariable::new("spool_dir", "Spool directory", "/var/spool");
        variable.id = "v2".to_string();
        variable
    }

    #[tokio::test]
    async fn test_save_posts_new_variables_to_collection_root() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sidecar/configuration_variables"))
            .and(body_json(serde_json::json!({
                "id": "",
                "name": "api_key",
                "description": "Shared key",
                "content": "s3cr3t",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_success()
            .withf(|message| {
                message.contains("\"api_key\"") && message.contains("successfully created")
            })
            .times(1)
            .return_const(());

        let store = store_against(&server, notifier);
        let draft = ConfigurationVariable::new("api_key", "Shared key", "s3cr3t");
        store.save(&draft).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_puts_persisted_variables_to_record_resource() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/sidecar/configuration_variables/v2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_success()
            .withf(|message| {
                message.contains("\"spool_dir\"") && message.contains("successfully updated")
            })
            .times(1)
            .return_const(());

        let store = store_against(&server, notifier);
        store.save(&persisted_variable()).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_failure_is_toasted_and_returned() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sidecar/configuration_variables"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "name already taken"})),
            )
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|message, title| {
                message.starts_with("Saving variable \"api_key\" failed with status:")
                    && message.contains("name already taken")
                    && title == "Could not save variable"
            })
            .times(1)
            .return_const(());

        let store = store_against(&server, notifier);
        let draft = ConfigurationVariable::new("api_key", "Shared key", "s3cr3t");
        store.save(&draft).await.unwrap_err();
    }

    #[tokio::test]
    async fn test_delete_targets_record_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/sidecar/configuration_variables/v2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_success()
            .withf(|message| {
                message.contains("\"spool_dir\"") && message.contains("successfully deleted")
            })
            .times(1)
            .return_const(());

        let store = store_against(&server, notifier);
        store.delete(&persisted_variable()).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_failure_is_toasted_and_returned() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/sidecar/configuration_variables/v2"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|message, title| {
                message.starts_with("Deleting variable \"spool_dir\" failed with status:")
                    && title == "Could not delete variable"
            })
            .times(1)
            .return_const(());

        let store = store_against(&server, notifier);
        store.delete(&persisted_variable()).await.unwrap_err();
    }

    #[tokio::test]
    async fn test_all_replaces_cache_and_broadcasts_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sidecar/configuration_variables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "configurationVariables": [
                    {"id": "v1", "name": "syslog_port", "description": "UDP port", "content": "1514"},
                    {"id": "v2", "name": "spool_dir", "description": "Spool directory", "content": "/var/spool"},
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        // No notifier expectations: a successful fetch must not toast
        let store = store_against(&server, MockNotifier::new());

        let broadcasts = Arc::new(AtomicUsize::new(0));
        let seen = broadcasts.clone();
        store.subscribe(move |variables| {
            assert_eq!(variables.len(), 2);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let variables = store.all().await.unwrap();
        assert_eq!(variables.len(), 2);
        assert_eq!(store.cached().as_deref(), Some(variables.as_slice()));
        assert_eq!(broadcasts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_failure_keeps_cache_and_skips_broadcast() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sidecar/configuration_variables"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|message, title| {
                message.starts_with("Fetching configuration variables failed with status:")
                    && title == "Could not retrieve configuration variables"
            })
            .times(1)
            .return_const(());

        let store = store_against(&server, notifier);

        let broadcasts = Arc::new(AtomicUsize::new(0));
        let seen = broadcasts.clone();
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.all().await.unwrap_err();
        assert!(store.cached().is_none());
        assert_eq!(broadcasts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validate_always_posts_to_validate_resource() {
        let server = MockServer::start().await;

        // A persisted id must not divert validation to the record resource
        Mock::given(method("POST"))
            .and(path("/sidecar/configuration_variables/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "failed": true,
                "errors": {"content": ["Invalid variable reference"]},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_against(&server, MockNotifier::new());
        let result = store.validate(&persisted_variable()).await.unwrap();
        assert!(result.failed);
        assert_eq!(result.errors["content"], vec!["Invalid variable reference"]);
    }

    #[tokio::test]
    async fn test_validate_failure_is_toasted_and_returned() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sidecar/configuration_variables/validate"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|message, title| {
                message.starts_with("Validating variable \"spool_dir\" failed with status:")
                    && title == "Could not validate variable"
            })
            .times(1)
            .return_const(());

        let store = store_against(&server, notifier);
        store.validate(&persisted_variable()).await.unwrap_err();
    }
}
