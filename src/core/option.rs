//! Option contract definitions
//!
//! Canonical contract identity as resolved from brokerage payloads, and the
//! matched long/short pair for a vertical spread.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quote::NormalizedQuote;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Type character used in OCC symbols
    pub fn occ_char(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }

    pub fn from_occ_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(OptionType::Call),
            'P' => Some(OptionType::Put),
            _ => None,
        }
    }
}

/// Option contract as located in a chain or quote payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedContract {
    /// Canonical symbol (uppercase, no whitespace)
    pub symbol: String,
    /// Strike price
    pub strike: f64,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Call/put, when the payload or symbol says so
    pub option_type: Option<OptionType>,
    /// Quote, if the payload carried usable pricing
    pub quote: Option<NormalizedQuote>,
}

impl NormalizedContract {
    pub fn new(symbol: impl Into<String>, strike: f64, expiration: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            strike,
            expiration,
            option_type: None,
            quote: None,
        }
    }

    pub fn with_quote(mut self, quote: NormalizedQuote) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn has_quote(&self) -> bool {
        self.quote.as_ref().map(|q| !q.is_empty()).unwrap_or(false)
    }

    /// Dedup identity: (symbol, expiration, strike in thousandths)
    pub fn identity_key(&self) -> (String, NaiveDate, i64) {
        (
            self.symbol.clone(),
            self.expiration,
            (self.strike * 1000.0).round() as i64,
        )
    }
}

/// A long/short pair sharing one expiration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainMatch {
    pub expiration: NaiveDate,
    /// Bought leg, lower strike
    pub long: NormalizedContract,
    /// Sold leg, higher strike
    pub short: NormalizedContract,
}
