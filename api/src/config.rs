//! Client configuration.
//!
//! Built explicitly with [`ApiConfig::new`] and the `with_*` methods, or read
//! from the environment:
//!
//! - `NORMANDY_API_URL`: API root, defaults to [`DEFAULT_API_URL`]
//! - `NORMANDY_API_TIMEOUT_SECS`: request timeout in seconds, defaults to 30

use crate::error::ApiError;
use std::time::Duration;

/// Production API root
pub const DEFAULT_API_URL: &str = "https://normandy.cdn.mozilla.net/api/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`NormandyApi`](crate::NormandyApi)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root serving the endpoint index, e.g. `https://host/api/v1`
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    /// Configuration for the API rooted at `api_url`
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("normandy-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Read configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if `NORMANDY_API_TIMEOUT_SECS` is set but
    /// is not a positive whole number of seconds.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value
    ///
    /// # Errors
    ///
    /// As [`ApiConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("NORMANDY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(api_url);

        if let Some(secs) = lookup("NORMANDY_API_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ApiError::Config(format!("NORMANDY_API_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            if secs == 0 {
                return Err(ApiError::Config(
                    "NORMANDY_API_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
