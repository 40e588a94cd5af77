//! OCC option symbol codec
//!
//! Format: ROOT + YYMMDD + C/P + strike x 1000 padded to 8 digits.
//! Example: `TSLA240920C00250500` (TSLA, 2024-09-20, call, 250.5)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{SpreadError, SpreadResult};
use super::option::OptionType;

/// Timestamps above this are read as milliseconds
const SECONDS_CUTOFF: f64 = 10_000_000_000.0;

/// Length of the date + type + strike tail
const OCC_TAIL_LEN: usize = 15;

const MAX_ROOT_LEN: usize = 6;

/// Date formats tried after ISO and numeric input
const FALLBACK_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y", "%d %b %Y"];

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Decoded OCC symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccSymbol {
    pub root: String,
    pub expiration: NaiveDate,
    pub option_type: OptionType,
    pub strike: f64,
}

/// Strip whitespace and uppercase
pub fn sanitize_option_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Build the OCC identifier for a contract
pub fn build_occ_option_symbol(
    underlying: &str,
    expiration: &str,
    strike: f64,
    option_type: OptionType,
) -> SpreadResult<String> {
    let root = sanitize_option_symbol(underlying);
    if root.is_empty() {
        return Err(SpreadError::invalid_input("underlying symbol is empty"));
    }

    let date = normalize_expiration_input(expiration)?;

    if !strike.is_finite() || strike <= 0.0 {
        return Err(SpreadError::invalid_input(format!(
            "strike must be a finite positive number, got {}",
            strike
        )));
    }
    let strike_milli = (strike * 1000.0).round() as u64;
    if strike_milli >= 100_000_000 {
        return Err(SpreadError::invalid_input(format!(
            "strike {} does not fit in an OCC symbol",
            strike
        )));
    }

    Ok(format!(
        "{}{}{}{:08}",
        root,
        date.format("%y%m%d"),
        option_type.occ_char(),
        strike_milli
    ))
}

/// Decode an OCC symbol; `None` if it is not one
pub fn parse_occ_option_symbol(symbol: &str) -> Option<OccSymbol> {
    let symbol = sanitize_option_symbol(symbol);
    if !symbol.is_ascii() || symbol.len() <= OCC_TAIL_LEN {
        return None;
    }

    let (root, tail) = symbol.split_at(symbol.len() - OCC_TAIL_LEN);
    if root.len() > MAX_ROOT_LEN || !root.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let (date, rest) = tail.split_at(6);
    let (type_char, strike) = rest.split_at(1);
    if !date.chars().all(|c| c.is_ascii_digit()) || !strike.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let expiration = NaiveDate::parse_from_str(date, "%y%m%d").ok()?;
    let option_type = OptionType::from_occ_char(type_char.chars().next()?)?;
    let strike_milli: u64 = strike.parse().ok()?;

    Some(OccSymbol {
        root: root.to_string(),
        expiration,
        option_type,
        strike: strike_milli as f64 / 1000.0,
    })
}

/// Call/put from an explicit type field, else from the symbol.
///
/// The symbol fallback reads the 9th character from the end, which is the
/// type character in a canonical OCC symbol.
pub fn option_type_from_symbol_or_field(
    symbol: &str,
    type_field: Option<&str>,
) -> Option<OptionType> {
    if let Some(field) = type_field {
        match field.trim().to_ascii_lowercase().as_str() {
            "call" | "c" | "buy_call" => return Some(OptionType::Call),
            "put" | "p" | "buy_put" => return Some(OptionType::Put),
            _ => {}
        }
    }

    let canonical = sanitize_option_symbol(symbol);
    canonical
        .chars()
        .rev()
        .nth(8)
        .and_then(OptionType::from_occ_char)
}

/// Accept an ISO date, a Unix timestamp (seconds or milliseconds) or a
/// loosely formatted date, and return the calendar date.
pub fn normalize_expiration_input(input: &str) -> SpreadResult<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SpreadError::invalid_input("expiration is empty"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    if input.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return timestamp_to_date(input);
    }

    parse_generic_date(input).ok_or_else(|| {
        SpreadError::invalid_input(format!("unparsable expiration: {}", input))
    })
}

/// Midnight UTC of `date`
pub fn expiration_to_unix_seconds(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn timestamp_to_date(input: &str) -> SpreadResult<NaiveDate> {
    let value: f64 = input
        .parse()
        .map_err(|_| SpreadError::invalid_input(format!("unparsable expiration: {}", input)))?;

    let seconds = if value <= SECONDS_CUTOFF { value } else { value / 1000.0 };

    DateTime::from_timestamp(seconds.floor() as i64, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| {
            SpreadError::invalid_input(format!("expiration timestamp out of range: {}", input))
        })
}

fn parse_generic_date(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        })
}
