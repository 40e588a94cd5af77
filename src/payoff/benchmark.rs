//! Benchmark positions and sizing
//!
//! What the same capital would have done in the underlying or in outright
//! long calls, plus how many spreads a portfolio can afford.

use serde::{Deserialize, Serialize};

use super::{ensure_finite, ensure_positive_count};
use crate::core::{OptionType, SpreadError, SpreadResult};

/// P&L of holding `shares` bought at `spot`
pub fn underlying_pnl(price_at_expiry: f64, spot: f64, shares: f64) -> SpreadResult<f64> {
    ensure_finite("price_at_expiry", price_at_expiry)?;
    ensure_finite("spot", spot)?;
    ensure_finite("shares", shares)?;

    Ok((price_at_expiry - spot) * shares)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongCallArgs {
    pub strike: f64,
    pub premium_per_share: f64,
    pub contract_size: u32,
    pub contracts: u32,
    pub price_at_expiry: f64,
}

/// P&L of an outright long call held to expiry
pub fn long_call_profit(args: &LongCallArgs) -> SpreadResult<f64> {
    ensure_finite("strike", args.strike)?;
    ensure_finite("premium_per_share", args.premium_per_share)?;
    ensure_finite("price_at_expiry", args.price_at_expiry)?;
    ensure_positive_count("contract_size", args.contract_size)?;

    let intrinsic = OptionType::Call.intrinsic(args.price_at_expiry, args.strike);
    Ok((intrinsic - args.premium_per_share) * args.contract_size as f64 * args.contracts as f64)
}

/// Number of spreads to trade.
///
/// An explicit count wins. Otherwise the portfolio is divided by the cost of
/// one spread, rounded down; with neither, a single contract.
pub fn resolve_contracts(
    contracts: Option<u32>,
    portfolio_size: Option<f64>,
    net_debit_per_share: f64,
    contract_size: u32,
) -> SpreadResult<u32> {
    if let Some(n) = contracts {
        ensure_positive_count("contracts", n)?;
        return Ok(n);
    }

    let Some(portfolio) = portfolio_size else {
        return Ok(1);
    };

    ensure_positive_amount("portfolio_size", portfolio)?;
    ensure_positive_count("contract_size", contract_size)?;
    ensure_finite("net_debit_per_share", net_debit_per_share)?;

    let cost = net_debit_per_share * contract_size as f64;
    if cost <= 0.0 {
        return Err(SpreadError::invalid_input(format!(
            "cannot size against a portfolio with a non-positive debit ({})",
            net_debit_per_share
        )));
    }

    affordable("portfolio_size", portfolio, cost)
}

/// Whole shares the portfolio buys at `spot`
pub fn benchmark_shares(portfolio_size: f64, spot: f64) -> SpreadResult<f64> {
    ensure_positive_amount("portfolio_size", portfolio_size)?;
    ensure_positive_amount("spot", spot)?;

    Ok((portfolio_size / spot).floor())
}

/// Whole long-call contracts the portfolio buys at `premium_per_share`
pub fn benchmark_long_call_contracts(
    portfolio_size: f64,
    premium_per_share: f64,
    contract_size: u32,
) -> SpreadResult<u32> {
    ensure_positive_amount("portfolio_size", portfolio_size)?;
    ensure_positive_amount("premium_per_share", premium_per_share)?;
    ensure_positive_count("contract_size", contract_size)?;

    affordable(
        "portfolio_size",
        portfolio_size,
        premium_per_share * contract_size as f64,
    )
}

fn ensure_positive_amount(name: &str, value: f64) -> SpreadResult<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SpreadError::invalid_input(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn affordable(name: &str, budget: f64, unit_cost: f64) -> SpreadResult<u32> {
    let n = (budget / unit_cost).floor();
    if n < 1.0 {
        return Err(SpreadError::invalid_input(format!(
            "{} {} does not cover one contract at {:.2}",
            name, budget, unit_cost
        )));
    }
    Ok(n.min(u32::MAX as f64) as u32)
}
