//! HTTP client for the thing API
//!
//! Provides the single-call request layer:
//! - Every call passes the rate limiter before touching the network
//! - Caller options are merged over the client defaults
//! - Response bodies are decoded as JSON and optionally normalized
//! - Failures are wrapped with the path and options that produced them

use super::rate_limit::RateLimiter;
use crate::error::{Error, Result};
use crate::thing::{normalize, Normalized};
use crate::types::{default_user_agent, JsonValue, StringMap, DEFAULT_BASE_URL};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// API root all paths are resolved against
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// Gate every request passes through
    pub rate_limiter: RateLimiter,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: default_user_agent(),
            default_headers: StringMap::new(),
            rate_limiter: RateLimiter::global(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Options every request starts from before caller options are applied
    pub fn default_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new()
            .header("user-agent", &self.user_agent)
            .header("accept", "application/json")
            .timeout(self.timeout);
        for (key, value) in &self.default_headers {
            options = options.header(key, value);
        }
        options
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .default_headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Use the given limiter (shared state if it is a clone)
    pub fn rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.config.rate_limiter = limiter;
        self
    }

    /// Use a private limiter with the given spacing
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.config.rate_limiter = RateLimiter::new(interval);
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Per-call options: query parameters, headers and an optional timeout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Query parameters
    pub query: StringMap,
    /// Request headers, names lowercased
    pub headers: StringMap,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Merge `self` over `defaults`, group by group.
    ///
    /// Keys present in both take the value from `self`.
    #[must_use]
    pub fn merged_over(&self, defaults: &RequestOptions) -> RequestOptions {
        let mut merged = defaults.clone();
        merged
            .query
            .extend(self.query.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
            .headers
            .extend(self.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        if self.timeout.is_some() {
            merged.timeout = self.timeout;
        }
        merged
    }
}

/// Rate-limited HTTP client for the thing API
///
/// Cheap to clone; clones share the connection pool and the rate limiter.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Issue one rate-limited GET for `path` and return the decoded JSON body.
    ///
    /// Exactly one network call per invocation; nothing is retried.
    pub async fn request(&self, path: &str, options: &RequestOptions) -> Result<JsonValue> {
        let options = options.merged_over(&self.config.default_options());
        let url = self.build_url(path);

        self.config.rate_limiter.wait().await;

        debug!("GET {} query={:?}", url, options.query);
        self.send(&url, &options)
            .await
            .map_err(|cause| Error::request_failed(path, options, cause))
    }

    /// Like [`HttpClient::request`], with the body passed through [`normalize`]
    pub async fn request_normalized(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Normalized> {
        self.request(path, options).await.map(normalize)
    }

    async fn send(&self, url: &str, options: &RequestOptions) -> Result<JsonValue> {
        let mut req = self.client.get(url);

        for (key, value) in &options.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !options.query.is_empty() {
            req = req.query(&options.query);
        }

        if let Some(timeout) = options.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GET {} returned {}", url, status.as_u16());
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response.json().await?)
    }

    /// Build full URL from path: `{base_url}/{path}.json`
    pub fn build_url(&self, path: &str) -> String {
        let path = path.trim_matches('/');

        if path.starts_with("http://") || path.starts_with("https://") {
            return format!("{path}.json");
        }

        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/{path}.json")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
