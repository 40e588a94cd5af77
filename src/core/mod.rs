//! Core data types
//!
//! Defines fundamental types:
//! - NormalizedContract / ChainMatch: contract identity and matched pairs
//! - NormalizedQuote: bid/ask/last/mid plus the alias tables that feed it
//! - OCC symbol codec and expiration parsing
//! - SpreadError: crate-wide error type

pub mod error;
pub mod option;
pub mod quote;
pub mod symbol;

pub use error::*;
pub use option::*;
pub use quote::*;
pub use symbol::*;
