//! Quote normalization
//!
//! Brokerage payloads name the same price under many keys depending on the
//! endpoint and API version (`ask_price`, `ap`, `askPrice`, ...). Every alias is
//! listed in [`QUOTE_FIELD_ALIASES`]; adding one never touches control flow.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{SpreadError, SpreadResult};

/// Default tolerance for strike comparisons
pub const DEFAULT_STRIKE_EPSILON: f64 = 1e-6;

/// Price types a quote can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteField {
    Ask,
    Bid,
    Last,
    Mid,
}

/// Aliases per price type, in priority order
pub const QUOTE_FIELD_ALIASES: &[(QuoteField, &[&str])] = &[
    (
        QuoteField::Ask,
        &["ask_price", "ask", "ap", "askPrice", "ask_value"],
    ),
    (
        QuoteField::Bid,
        &["bid_price", "bid", "bp", "bidPrice", "bid_value"],
    ),
    (
        QuoteField::Last,
        &["last_price", "last", "lastPrice", "last_trade_price", "lp"],
    ),
    (
        QuoteField::Mid,
        &["mid_price", "mid", "midPrice", "mark", "mark_price"],
    ),
];

/// Keys under which some endpoints nest the quote one level down
pub const QUOTE_CONTAINER_KEYS: &[&str] =
    &["quote", "quotes", "last_quote", "latestQuote", "latest_quote"];

/// Canonical quote: any subset of ask/bid/last/mid
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuote {
    pub ask: Option<f64>,
    pub bid: Option<f64>,
    pub last: Option<f64>,
    pub mid: Option<f64>,
}

impl NormalizedQuote {
    pub fn set(&mut self, field: QuoteField, value: f64) {
        let slot = match field {
            QuoteField::Ask => &mut self.ask,
            QuoteField::Bid => &mut self.bid,
            QuoteField::Last => &mut self.last,
            QuoteField::Mid => &mut self.mid,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        self.ask.is_none() && self.bid.is_none() && self.last.is_none() && self.mid.is_none()
    }

    /// Best available mid: bid/ask average > mid > last > ask > bid
    pub fn mid_price(&self) -> Option<f64> {
        if let (Some(bid), Some(ask)) = (self.bid, self.ask) {
            return Some((bid + ask) / 2.0);
        }
        self.mid.or(self.last).or(self.ask).or(self.bid)
    }
}

/// Numeric or numeric-string value, if finite
pub fn to_finite_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// First alias in `aliases` holding a finite number
pub fn first_finite(raw: &Value, aliases: &[&str]) -> Option<f64> {
    let object = raw.as_object()?;
    aliases
        .iter()
        .find_map(|key| object.get(*key).and_then(to_finite_number))
}

/// Read the known price fields straight off `raw`
pub fn extract_quote_fields(raw: &Value) -> Option<NormalizedQuote> {
    let mut quote = NormalizedQuote::default();
    for (field, aliases) in QUOTE_FIELD_ALIASES {
        if let Some(value) = first_finite(raw, aliases) {
            quote.set(*field, value);
        }
    }
    (!quote.is_empty()).then_some(quote)
}

/// Extract a quote from `raw` or from one of its known quote containers
pub fn normalize_quote(raw: &Value) -> Option<NormalizedQuote> {
    if let Some(quote) = extract_quote_fields(raw) {
        return Some(quote);
    }

    let object = raw.as_object()?;
    QUOTE_CONTAINER_KEYS
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(extract_quote_fields)
}

/// Mid price for pricing, failing when the quote has nothing usable.
///
/// `description` names the leg in the error, e.g. `"long leg TSLA240920C00250000"`.
pub fn compute_mid_from_quote(
    quote: Option<&NormalizedQuote>,
    description: &str,
) -> SpreadResult<f64> {
    quote.and_then(NormalizedQuote::mid_price).ok_or_else(|| {
        SpreadError::missing_quote(format!(
            "no bid/ask/last/mid available for {}",
            description
        ))
    })
}

/// Float equality within `epsilon`
pub fn approx_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}
