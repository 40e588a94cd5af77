//! HTTP transport for the brokerage market data API

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use super::config::{ClientConfig, KEY_ID_HEADER, SECRET_KEY_HEADER};
use crate::core::{SpreadError, SpreadResult};

/// A GET-and-decode-JSON capability.
///
/// `path` is relative to the configured base URL.
pub trait MarketDataTransport {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> SpreadResult<Value>;
}

impl<T: MarketDataTransport + ?Sized> MarketDataTransport for &T {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> SpreadResult<Value> {
        (**self).get_json(path, query)
    }
}

/// Blocking reqwest transport with the auth headers preset
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> SpreadResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(KEY_ID_HEADER, header_value(&config.key_id, "key id")?);
        headers.insert(SECRET_KEY_HEADER, header_value(&config.secret_key, "secret key")?);

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("spread-options/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpreadError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl MarketDataTransport for HttpTransport {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> SpreadResult<Value> {
        let url = self.config.url(path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| SpreadError::Network(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpreadError::Request {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json()
            .map_err(|e| SpreadError::data(format!("Failed to parse {}: {}", url, e)))
    }
}

fn header_value(value: &str, name: &str) -> SpreadResult<HeaderValue> {
    let mut header = HeaderValue::from_str(value.trim())
        .map_err(|_| SpreadError::config(format!("{} is not a valid header value", name)))?;
    header.set_sensitive(true);
    Ok(header)
}
