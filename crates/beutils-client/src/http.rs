//! HTTP request adapter
//!
//! A thin base for API integrations: a configured base URL, default headers
//! supplied by the concrete adapter, GET by default and POST when a body is
//! given, returning the response status and parsed JSON.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Configuration for a request adapter
#[derive(Clone, Debug)]
pub struct AdapterConfig {
    /// Base URL all endpoints are joined onto
    pub base_url: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
        }
    }
}

impl AdapterConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }
}

/// Join a base URL, an endpoint, and query parameters
pub fn build_url(base_url: &str, endpoint: &str, params: &[(String, String)]) -> String {
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_matches('/')
    );

    if !params.is_empty() {
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        url = format!("{}?{}", url, query.join("&"));
    }

    url
}

/// Merge per-call headers over the adapter's defaults
pub fn merge_headers(
    defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged = defaults;
    for (key, value) in overrides {
        merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(key));
        merged.push((key.clone(), value.clone()));
    }
    merged
}

/// A base adapter for JSON-over-HTTP APIs
#[async_trait::async_trait]
pub trait Adapter: Send + Sync {
    fn config(&self) -> &AdapterConfig;

    fn client(&self) -> &Client;

    /// Default headers for API requests
    fn default_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Make a GET request to an API endpoint
    async fn get(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
        params: &[(String, String)],
    ) -> anyhow::Result<(u16, Value)> {
        self.request(endpoint, headers, params, None).await
    }

    /// Make a POST request to an API endpoint
    async fn post(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
        params: &[(String, String)],
        body: Value,
    ) -> anyhow::Result<(u16, Value)> {
        self.request(endpoint, headers, params, Some(body)).await
    }

    /// Make an HTTP request to an API endpoint.
    ///
    /// GET by default; POST when a body is supplied. Returns the response
    /// status code and parsed JSON.
    async fn request(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
        params: &[(String, String)],
        body: Option<Value>,
    ) -> anyhow::Result<(u16, Value)> {
        let url = build_url(&self.config().base_url, endpoint, params);
        let merged = merge_headers(self.default_headers(), headers);

        let mut request = match body {
            Some(body) => self.client().post(&url).json(&body),
            None => self.client().get(&url),
        };
        for (key, value) in merged {
            request = request.header(key, value);
        }

        debug!(url = %url, "adapter request");
        let response = request.send().await?;
        let status = response.status().as_u16();
        let json = response.json().await?;

        Ok((status, json))
    }

    /// Additional logic necessary to close the adapter
    fn close(&self) {}
}

/// A ready-to-use adapter with static default headers
pub struct RestAdapter {
    client: Client,
    config: AdapterConfig,
    headers: Vec<(String, String)>,
}

impl RestAdapter {
    pub fn new(config: AdapterConfig) -> anyhow::Result<Self> {
        Self::with_headers(config, Vec::new())
    }

    pub fn with_headers(
        config: AdapterConfig,
        headers: Vec<(String, String)>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            config,
            headers,
        })
    }
}

#[async_trait::async_trait]
impl Adapter for RestAdapter {
    fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn client(&self) -> &Client {
        &self.client
    }

    fn default_headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_trims_slashes() {
        assert_eq!(
            build_url("https://api.example.com/", "/v2/ticker/", &[]),
            "https://api.example.com/v2/ticker"
        );
        assert_eq!(
            build_url("https://api.example.com", "v2/ticker", &[]),
            "https://api.example.com/v2/ticker"
        );
    }

    #[test]
    fn test_build_url_appends_params() {
        let url = build_url(
            "https://api.example.com",
            "ticker",
            &pairs(&[("symbol", "BTC"), ("limit", "10")]),
        );
        assert_eq!(url, "https://api.example.com/ticker?symbol=BTC&limit=10");
    }

    #[test]
    fn test_merge_headers_overrides_defaults() {
        let merged = merge_headers(
            pairs(&[("Accept", "application/json"), ("X-Api-Key", "default")]),
            &pairs(&[("x-api-key", "override")]),
        );
        assert_eq!(merged.len(), 2);
        assert!(
            merged
                .iter()
                .any(|(k, v)| k == "x-api-key" && v == "override")
        );
        assert!(!merged.iter().any(|(_, v)| v == "default"));
    }

    #[test]
    fn test_adapter_default_headers_are_empty() {
        let adapter = RestAdapter::new(AdapterConfig::new("https://api.example.com"))
            .expect("adapter builds");
        assert!(adapter.default_headers().is_empty());
        assert_eq!(adapter.config().base_url, "https://api.example.com");
    }
}
