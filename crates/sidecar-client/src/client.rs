//! Thin HTTP client over the fleet management REST API
//!
//! Wraps `reqwest` with base-URL qualification, optional token
//! authentication, and mapping of non-success responses into [`Error::Api`].

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client for the fleet management API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl ApiClient {
    /// Create a new client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(Error::HttpClient)?;

        // A trailing slash keeps Url::join relative to the API root
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            http,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    /// Qualify a relative API path against the configured base URL
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Issue a GET and parse the JSON response body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        Ok(response.json().await?)
    }

    /// Issue a POST with a JSON body, ignoring the response body
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    /// Issue a POST with a JSON body and parse the JSON response body
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// Issue a PUT with a JSON body, ignoring the response body
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    /// Issue a DELETE, ignoring any response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let url = self.endpoint_url(path)?;
        debug!("Sending {} request to {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.api_token {
            request = request.basic_auth(token, Some("token"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Turn a non-success response into an [`Error::Api`]
    ///
    /// The server usually answers with a JSON `{"message": ...}` body; fall
    /// back to the raw body, then to the status' canonical reason.
    async fn error_from_response(response: Response) -> Error {
        let status = response.status();
        let message = match response.text().await {
            Ok(body) if !body.trim().is_empty() => {
                match serde_json::from_str::<ApiErrorBody>(&body) {
                    Ok(parsed) => parsed.message,
                    Err(_) => body,
                }
            }
            _ => status
                .canonical_reason()
                .unwrap_or("unknown reason")
                .to_string(),
        };

        Error::Api { status, message }
    }
}

/// JSON error body shape used by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
