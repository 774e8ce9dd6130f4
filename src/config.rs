//! Client settings
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables.
//!
//! ```yaml
//! base_url: https://old.reddit.com
//! user_agent: "my-tool/1.0 (by /u/me)"
//! timeout_secs: 20
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiter};
use crate::types::{
    default_user_agent, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT, MIN_REQUEST_INTERVAL,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "REDDIT_THINGS_BASE_URL";
/// Environment variable overriding `user_agent`
pub const ENV_USER_AGENT: &str = "REDDIT_THINGS_USER_AGENT";
/// Environment variable overriding `timeout_secs`
pub const ENV_TIMEOUT_SECS: &str = "REDDIT_THINGS_TIMEOUT_SECS";

/// Client settings loaded from YAML and the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// API root
    pub base_url: String,

    /// User agent identifying the client and its maintainer
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Minimum spacing between requests in milliseconds
    pub min_interval_ms: u64,

    /// Items requested per listing page
    pub page_limit: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout_secs: 30,
            min_interval_ms: MIN_REQUEST_INTERVAL.as_millis() as u64,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ClientSettings {
    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Defaults, then `path` if given, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            self.user_agent = user_agent;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.parse().map_err(|_| {
                Error::config(format!("{ENV_TIMEOUT_SECS} must be a number, got '{timeout}'"))
            })?;
        }
        Ok(self)
    }

    /// Check that the settings can build a working client
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;
        if self.user_agent.trim().is_empty() {
            return Err(Error::config("user_agent must not be empty"));
        }
        if self.page_limit == 0 {
            return Err(Error::config("page_limit must be greater than zero"));
        }
        Ok(())
    }

    /// Build the HTTP client configuration.
    ///
    /// The default interval maps to the process-wide limiter; any other
    /// value gets a private one.
    pub fn into_client_config(self) -> Result<HttpClientConfig> {
        self.validate()?;

        let interval = Duration::from_millis(self.min_interval_ms);
        let limiter = if interval == MIN_REQUEST_INTERVAL {
            RateLimiter::global()
        } else {
            RateLimiter::new(interval)
        };

        Ok(HttpClientConfig::builder()
            .base_url(self.base_url)
            .user_agent(self.user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .rate_limiter(limiter)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_url, "https://www.reddit.com");
        assert_eq!(settings.min_interval_ms, 2000);
        assert_eq!(settings.page_limit, 100);
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = ClientSettings::from_yaml("base_url: https://old.reddit.com\n").unwrap();
        assert_eq!(settings.base_url, "https://old.reddit.com");
        assert_eq!(settings.page_limit, 100);
        assert_eq!(settings.user_agent, default_user_agent());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user_agent: \"tool/1.0 (by /u/me)\"").unwrap();
        writeln!(file, "timeout_secs: 5").unwrap();

        let settings = ClientSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.user_agent, "tool/1.0 (by /u/me)");
        assert_eq!(settings.timeout_secs, 5);
    }

    #[test]
    fn test_missing_file() {
        let err = ClientSettings::from_file("/nonexistent/settings.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ClientSettings::from_yaml("timeout_secs: [1, 2").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://localhost:9000"),
            (ENV_TIMEOUT_SECS, "7"),
        ]
        .into_iter()
        .collect();

        let settings = ClientSettings::default()
            .with_overrides(|key| env.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.timeout_secs, 7);
        assert_eq!(settings.user_agent, default_user_agent());
    }

    #[test]
    fn test_env_override_bad_timeout() {
        let err = ClientSettings::default()
            .with_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_url = ClientSettings {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_url.validate(), Err(Error::InvalidUrl(_))));

        let empty_agent = ClientSettings {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(empty_agent.validate(), Err(Error::Config { .. })));

        let zero_limit = ClientSettings {
            page_limit: 0,
            ..Default::default()
        };
        assert!(zero_limit.validate().is_err());
    }

    #[test]
    fn test_into_client_config_limiter_choice() {
        let config = ClientSettings::default().into_client_config().unwrap();
        assert!(config.rate_limiter.shares_state_with(&RateLimiter::global()));

        let custom = ClientSettings {
            min_interval_ms: 10,
            timeout_secs: 3,
            ..Default::default()
        }
        .into_client_config()
        .unwrap();
        assert!(!custom.rate_limiter.shares_state_with(&RateLimiter::global()));
        assert_eq!(custom.rate_limiter.min_interval(), Duration::from_millis(10));
        assert_eq!(custom.timeout, Duration::from_secs(3));
    }
}
