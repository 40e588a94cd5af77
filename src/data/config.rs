//! Brokerage client configuration
//!
//! Credentials and endpoint settings are passed to the client as an explicit
//! value. `from_env` is a convenience for binaries; library code never reads
//! the process environment on its own.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{SpreadError, SpreadResult, DEFAULT_STRIKE_EPSILON};

pub const DEFAULT_BASE_URL: &str = "https://data.alpaca.markets";

pub const KEY_ID_ENV: &str = "APCA_API_KEY_ID";
pub const SECRET_KEY_ENV: &str = "APCA_API_SECRET_KEY";
pub const BASE_URL_ENV: &str = "APCA_API_DATA_URL";
pub const OPTIONS_FEED_ENV: &str = "APCA_OPTIONS_FEED";
pub const STOCK_FEED_ENV: &str = "APCA_STOCK_FEED";

/// Header carrying the key id
pub const KEY_ID_HEADER: &str = "apca-api-key-id";
/// Header carrying the secret key
pub const SECRET_KEY_HEADER: &str = "apca-api-secret-key";

/// Market data client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key id
    pub key_id: String,
    /// API secret key
    #[serde(skip_serializing)]
    pub secret_key: String,
    /// Base URL all endpoint paths are joined to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP timeout per request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size requested from chain endpoints
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
    /// Tolerance when matching strikes
    #[serde(default = "default_strike_epsilon")]
    pub strike_epsilon: f64,
    /// Options data feed (e.g. "indicative", "opra")
    #[serde(default)]
    pub options_feed: Option<String>,
    /// Equity data feed (e.g. "iex", "sip")
    #[serde(default)]
    pub stock_feed: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_page_limit() -> usize {
    1000
}

fn default_strike_epsilon() -> f64 {
    DEFAULT_STRIKE_EPSILON
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            secret_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_limit: default_page_limit(),
            strike_epsilon: default_strike_epsilon(),
            options_feed: None,
            stock_feed: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("key_id", &self.key_id)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("page_limit", &self.page_limit)
            .field("strike_epsilon", &self.strike_epsilon)
            .field("options_feed", &self.options_feed)
            .field("stock_feed", &self.stock_feed)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build from the process environment
    pub fn from_env() -> SpreadResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name -> value lookup
    pub fn from_lookup<F>(lookup: F) -> SpreadResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let key_id = non_empty(KEY_ID_ENV)
            .ok_or_else(|| SpreadError::config(format!("{} is not set", KEY_ID_ENV)))?;
        let secret_key = non_empty(SECRET_KEY_ENV)
            .ok_or_else(|| SpreadError::config(format!("{} is not set", SECRET_KEY_ENV)))?;

        let mut config = Self::new(key_id.trim(), secret_key.trim());
        if let Some(base_url) = non_empty(BASE_URL_ENV) {
            config.base_url = base_url.trim().to_string();
        }
        config.options_feed = non_empty(OPTIONS_FEED_ENV);
        config.stock_feed = non_empty(STOCK_FEED_ENV);

        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> SpreadResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| SpreadError::Serialization(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SpreadResult<()> {
        if self.key_id.trim().is_empty() {
            return Err(SpreadError::config("key id is empty"));
        }
        if self.secret_key.trim().is_empty() {
            return Err(SpreadError::config("secret key is empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SpreadError::config(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.page_limit == 0 {
            return Err(SpreadError::config("page limit must be positive"));
        }
        if !self.strike_epsilon.is_finite() || self.strike_epsilon < 0.0 {
            return Err(SpreadError::config("strike epsilon must be finite and non-negative"));
        }
        Ok(())
    }

    /// Join an endpoint path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
