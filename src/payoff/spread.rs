//! Bull call spread payoff
//!
//! Long call at the lower strike, short call at the higher strike, opened for
//! a net debit. Payoff per share at expiry is the intrinsic width captured,
//! capped at the strike width, minus the debit.

use serde::{Deserialize, Serialize};

use super::{ensure_finite, ensure_positive_count, ensure_strike_order};
use crate::core::{SpreadError, SpreadResult};

/// Inputs for spread P&L at one expiry price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BullCallSpreadArgs {
    pub long_strike: f64,
    pub short_strike: f64,
    pub net_debit_per_share: f64,
    pub contract_size: u32,
    pub contracts: u32,
    pub price_at_expiry: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxProfitArgs {
    pub long_strike: f64,
    pub short_strike: f64,
    pub net_debit_per_share: f64,
    pub contract_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakevenArgs {
    pub long_strike: f64,
    pub net_debit_per_share: f64,
}

/// Total spread P&L at `price_at_expiry`
pub fn bull_call_spread_profit(args: &BullCallSpreadArgs) -> SpreadResult<f64> {
    ensure_finite("net_debit_per_share", args.net_debit_per_share)?;
    if args.net_debit_per_share < 0.0 {
        return Err(SpreadError::invalid_input(format!(
            "net_debit_per_share must be non-negative, got {}",
            args.net_debit_per_share
        )));
    }
    bull_call_spread_pnl(args)
}

/// Same closed form as [`bull_call_spread_profit`], accepting any finite
/// debit. A negative debit is a net credit, as an inverted market quotes it.
pub fn bull_call_spread_pnl(args: &BullCallSpreadArgs) -> SpreadResult<f64> {
    ensure_strike_order(args.long_strike, args.short_strike)?;
    ensure_finite("net_debit_per_share", args.net_debit_per_share)?;
    ensure_positive_count("contract_size", args.contract_size)?;
    ensure_positive_count("contracts", args.contracts)?;
    ensure_finite("price_at_expiry", args.price_at_expiry)?;

    let width = args.short_strike - args.long_strike;
    let intrinsic = (args.price_at_expiry - args.long_strike).min(width).max(0.0);
    let per_share = intrinsic - args.net_debit_per_share;

    Ok(per_share * args.contract_size as f64 * args.contracts as f64)
}

/// (width - debit) x contract size
pub fn bull_call_spread_max_profit_per_contract(args: &MaxProfitArgs) -> SpreadResult<f64> {
    ensure_strike_order(args.long_strike, args.short_strike)?;
    ensure_finite("net_debit_per_share", args.net_debit_per_share)?;
    ensure_positive_count("contract_size", args.contract_size)?;

    Ok((args.short_strike - args.long_strike - args.net_debit_per_share) * args.contract_size as f64)
}

/// -debit x contract size
pub fn bull_call_spread_max_loss_per_contract(
    net_debit_per_share: f64,
    contract_size: u32,
) -> SpreadResult<f64> {
    ensure_finite("net_debit_per_share", net_debit_per_share)?;
    ensure_positive_count("contract_size", contract_size)?;

    Ok(-net_debit_per_share * contract_size as f64)
}

/// Expiry price where the spread breaks even
pub fn bull_call_spread_breakeven(args: &BreakevenArgs) -> SpreadResult<f64> {
    ensure_finite("long_strike", args.long_strike)?;
    ensure_finite("net_debit_per_share", args.net_debit_per_share)?;

    Ok(args.long_strike + args.net_debit_per_share)
}

/// Lowest expiry price at which max profit is reached
pub fn bull_call_spread_max_profit_strike(short_strike: f64) -> f64 {
    short_strike
}

/// Headline figures for a sized spread
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadSummary {
    pub contracts: u32,
    pub cost: f64,
    pub max_profit: f64,
    pub max_loss: f64,
    pub breakeven: f64,
    pub max_profit_price: f64,
}

impl SpreadSummary {
    pub fn compute(args: &MaxProfitArgs, contracts: u32) -> SpreadResult<Self> {
        ensure_positive_count("contracts", contracts)?;
        let n = contracts as f64;

        let max_profit = bull_call_spread_max_profit_per_contract(args)? * n;
        let max_loss =
            bull_call_spread_max_loss_per_contract(args.net_debit_per_share, args.contract_size)? * n;
        let breakeven = bull_call_spread_breakeven(&BreakevenArgs {
            long_strike: args.long_strike,
            net_debit_per_share: args.net_debit_per_share,
        })?;

        Ok(Self {
            contracts,
            cost: -max_loss,
            max_profit,
            max_loss,
            breakeven,
            max_profit_price: bull_call_spread_max_profit_strike(args.short_strike),
        })
    }
}
