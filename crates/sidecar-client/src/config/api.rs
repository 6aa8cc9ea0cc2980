//! API connection configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the fleet management API
    pub base_url: Url,

    /// API token sent as HTTP Basic `token:token`; no auth header when unset
    pub api_token: Option<String>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000/api/".parse().unwrap(),
            api_token: None,
            request_timeout: 30,
            connect_timeout: 10,
        }
    }
}
