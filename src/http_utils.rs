//! HTTP utilities for the egtree client.
//!
//! This module wraps the reqwest client with the settings every APS request
//! shares: base URL, default headers, timeout and bearer authentication.

use crate::aps::ApiError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, trace};

pub const USER_AGENT: &str = concat!("egtree/", env!("CARGO_PKG_VERSION"));

/// Configuration for HTTP requests with common settings
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Default headers to include with all requests
    pub default_headers: HashMap<String, String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for HttpRequestConfig {
    fn default() -> Self {
        Self::from_configuration(&crate::configuration::Configuration::default())
    }
}

impl HttpRequestConfig {
    pub fn from_configuration(configuration: &crate::configuration::Configuration) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            base_url: configuration.api_base_url(),
            default_headers,
            timeout: configuration.timeout(),
        }
    }
}

/// HTTP client wrapper with common request handling logic
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    config: HttpRequestConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpRequestConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Get a reference to the HTTP client configuration
    pub fn config(&self) -> &HttpRequestConfig {
        &self.config
    }

    /// Make a GET request to the specified path and decode the JSON response
    pub async fn get<T>(&self, path: &str, auth_token: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, path);
        trace!("GET {}", url);
        self.execute_request(self.client.get(url), auth_token).await
    }

    /// Execute an HTTP request with common error handling and optional authentication
    async fn execute_request<T>(
        &self,
        mut request: reqwest::RequestBuilder,
        auth_token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if let Some(token) = auth_token {
            request = request.bearer_auth(token);
        }

        for (key, value) in &self.config.default_headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
                debug!("Received authentication error ({}), the access token may have expired", status);
            }
            return Err(response.error_for_status().err().map_or(
                ApiError::UnexpectedStatus(status),
                ApiError::HttpError,
            ));
        }

        let response_text = response.text().await?;
        trace!("Raw response text for deserialization: {}", response_text);

        serde_json::from_str::<T>(&response_text).map_err(|e| {
            error!(
                "Failed to deserialize response: {}. Raw response: {}",
                e, response_text
            );
            ApiError::JsonError(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;

    #[test]
    fn test_http_client_config_default() {
        let config = HttpRequestConfig::default();
        assert_eq!(config.base_url, "https://developer.api.autodesk.com");
        assert_eq!(config.timeout, 10);
        assert_eq!(
            config.default_headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert!(config.default_headers["User-Agent"].starts_with("egtree/"));
    }

    #[test]
    fn test_http_client_keeps_config() {
        let config = HttpRequestConfig::from_configuration(&Configuration::default());
        let client = HttpClient::new(config).unwrap();
        assert_eq!(client.config().timeout, 10);
    }
}
