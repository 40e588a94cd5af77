//! Price grids and payoff tables

use serde::{Deserialize, Serialize};

use super::benchmark::{long_call_profit, underlying_pnl, LongCallArgs};
use super::spread::{bull_call_spread_pnl, BullCallSpreadArgs};
use super::ensure_finite;
use crate::core::{SpreadError, SpreadResult};

/// Upper bound on grid size
pub const MAX_RANGE_POINTS: usize = 100_000;

const RANGE_ROUNDING: f64 = 1e10;

/// Inclusive arithmetic sequence from `start` towards `end`.
///
/// Values are rounded to 10 decimal places to absorb step accumulation
/// error. A step pointing away from `end` yields an empty grid.
pub fn range(start: f64, end: f64, step: f64) -> SpreadResult<Vec<f64>> {
    ensure_finite("start", start)?;
    ensure_finite("end", end)?;
    ensure_finite("step", step)?;
    if step == 0.0 {
        return Err(SpreadError::invalid_input("step must be non-zero"));
    }

    let span = end - start;
    if span != 0.0 && span.signum() != step.signum() {
        return Ok(Vec::new());
    }

    let steps = (span / step + 1e-9).floor();
    if steps + 1.0 > MAX_RANGE_POINTS as f64 {
        return Err(SpreadError::invalid_input(format!(
            "range {}..={} by {} exceeds {} points",
            start, end, step, MAX_RANGE_POINTS
        )));
    }

    Ok((0..=steps as usize)
        .map(|i| ((start + i as f64 * step) * RANGE_ROUNDING).round() / RANGE_ROUNDING)
        .collect())
}

/// Spread position plus optional benchmarks to tabulate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffTableArgs {
    pub long_strike: f64,
    pub short_strike: f64,
    pub net_debit_per_share: f64,
    pub contract_size: u32,
    pub contracts: u32,
    /// Underlying benchmark: `(spot, shares)`
    pub underlying: Option<(f64, f64)>,
    /// Long-call benchmark: `(premium_per_share, contracts)` at the long strike
    pub long_call: Option<(f64, u32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffRow {
    pub price_at_expiry: f64,
    pub spread_pnl: f64,
    pub underlying_pnl: Option<f64>,
    pub long_call_pnl: Option<f64>,
}

/// One row per expiry price. A negative debit is tabulated as a net credit.
pub fn payoff_table(args: &PayoffTableArgs, prices: &[f64]) -> SpreadResult<Vec<PayoffRow>> {
    prices
        .iter()
        .map(|&price_at_expiry| {
            let spread_pnl = bull_call_spread_pnl(&BullCallSpreadArgs {
                long_strike: args.long_strike,
                short_strike: args.short_strike,
                net_debit_per_share: args.net_debit_per_share,
                contract_size: args.contract_size,
                contracts: args.contracts,
                price_at_expiry,
            })?;

            let underlying_pnl = args
                .underlying
                .map(|(spot, shares)| underlying_pnl(price_at_expiry, spot, shares))
                .transpose()?;

            let long_call_pnl = args
                .long_call
                .map(|(premium_per_share, contracts)| {
                    long_call_profit(&LongCallArgs {
                        strike: args.long_strike,
                        premium_per_share,
                        contract_size: args.contract_size,
                        contracts,
                        price_at_expiry,
                    })
                })
                .transpose()?;

            Ok(PayoffRow {
                price_at_expiry,
                spread_pnl,
                underlying_pnl,
                long_call_pnl,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_range_inclusive() {
        let grid = range(500.0, 900.0, 50.0).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.first(), Some(&500.0));
        assert_eq!(grid.last(), Some(&900.0));
    }

    #[test]
    fn test_range_rounds_accumulation() {
        let grid = range(0.0, 1.0, 0.1).unwrap();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[3], 0.3);
        assert_eq!(grid[10], 1.0);
    }

    #[test]
    fn test_range_descending() {
        assert_eq!(
            range(10.0, 0.0, -2.5).unwrap(),
            vec![10.0, 7.5, 5.0, 2.5, 0.0]
        );
    }

    #[test]
    fn test_range_edges() {
        assert_eq!(range(5.0, 5.0, 1.0).unwrap(), vec![5.0]);
        assert!(range(0.0, 10.0, -1.0).unwrap().is_empty());
        assert_eq!(range(0.0, 10.0, 4.0).unwrap(), vec![0.0, 4.0, 8.0]);

        assert!(range(0.0, 10.0, 0.0).is_err());
        assert!(range(0.0, 10.0, f64::NAN).is_err());
        assert!(range(f64::NEG_INFINITY, 10.0, 1.0).is_err());
        assert!(range(0.0, 1e9, 1.0).is_err());
    }

    #[test]
    fn test_payoff_table() {
        let args = PayoffTableArgs {
            long_strike: 100.0,
            short_strike: 110.0,
            net_debit_per_share: 3.0,
            contract_size: 100,
            contracts: 2,
            underlying: Some((100.0, 50.0)),
            long_call: Some((5.0, 1)),
        };

        let rows = payoff_table(&args, &[90.0, 105.0, 115.0]).unwrap();

        assert_eq!(rows.len(), 3);
        assert_relative_eq!(rows[0].spread_pnl, -600.0);
        assert_relative_eq!(rows[1].spread_pnl, 400.0);
        assert_relative_eq!(rows[2].spread_pnl, 1400.0);

        assert_eq!(rows[0].underlying_pnl, Some(-500.0));
        assert_eq!(rows[2].underlying_pnl, Some(750.0));

        assert_eq!(rows[0].long_call_pnl, Some(-500.0));
        assert_eq!(rows[2].long_call_pnl, Some(1000.0));
    }

    #[test]
    fn test_payoff_table_without_benchmarks() {
        let args = PayoffTableArgs {
            long_strike: 100.0,
            short_strike: 110.0,
            net_debit_per_share: 3.0,
            contract_size: 100,
            contracts: 1,
            underlying: None,
            long_call: None,
        };

        let rows = payoff_table(&args, &range(95.0, 115.0, 5.0).unwrap()).unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.underlying_pnl.is_none() && r.long_call_pnl.is_none()));

        let bad = PayoffTableArgs { net_debit_per_share: f64::NAN, ..args };
        assert!(payoff_table(&bad, &[100.0]).is_err());

        let unordered = PayoffTableArgs { long_strike: 120.0, ..args };
        assert!(payoff_table(&unordered, &[100.0]).is_err());
    }

    #[test]
    fn test_payoff_table_keeps_net_credit() {
        let args = PayoffTableArgs {
            long_strike: 100.0,
            short_strike: 110.0,
            net_debit_per_share: -0.5,
            contract_size: 100,
            contracts: 1,
            underlying: None,
            long_call: None,
        };

        let rows = payoff_table(&args, &[90.0, 115.0]).unwrap();

        assert_relative_eq!(rows[0].spread_pnl, 50.0);
        assert_relative_eq!(rows[1].spread_pnl, 1050.0);
    }
}
