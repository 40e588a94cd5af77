//! Market data access
//!
//! Handles:
//! - Client configuration (credentials, base URL, feeds)
//! - HTTP transport against the brokerage data API
//! - Option chain resolution across endpoint variants
//! - Spread debit and underlying price lookups

pub mod chain;
pub mod client;
pub mod config;
pub mod http;

#[cfg(test)]
pub(crate) mod fixture;

pub use chain::*;
pub use client::*;
pub use config::*;
pub use http::*;
