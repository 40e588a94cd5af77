//! Payoff engine
//!
//! Closed-form P&L at expiry for:
//! - Bull call spread: profit, max profit/loss, breakeven
//! - Benchmarks: holding the underlying, holding long calls
//! - Position sizing against a portfolio value
//! - Payoff tables over a price grid
//!
//! Intrinsic value only; no pricing model.

pub mod benchmark;
pub mod spread;
pub mod table;

pub use benchmark::*;
pub use spread::*;
pub use table::*;

use crate::core::{SpreadError, SpreadResult};

/// Standard US equity option multiplier
pub const DEFAULT_CONTRACT_SIZE: u32 = 100;

pub(crate) fn ensure_finite(name: &str, value: f64) -> SpreadResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SpreadError::invalid_input(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

pub(crate) fn ensure_positive_count(name: &str, value: u32) -> SpreadResult<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(SpreadError::invalid_input(format!(
            "{} must be a positive integer",
            name
        )))
    }
}

pub(crate) fn ensure_strike_order(long_strike: f64, short_strike: f64) -> SpreadResult<()> {
    ensure_finite("long_strike", long_strike)?;
    ensure_finite("short_strike", short_strike)?;
    if long_strike < short_strike {
        Ok(())
    } else {
        Err(SpreadError::invalid_input(format!(
            "long_strike ({}) must be below short_strike ({})",
            long_strike, short_strike
        )))
    }
}
