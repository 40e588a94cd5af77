//! # Spread Options - Bull Call Spread Analytics
//!
//! Expiry P&L for vertical bull call spreads, priced from live brokerage
//! option quotes.
//!
//! ## Overview
//!
//! Two halves:
//! - **Payoff engine**: closed-form spread P&L, max profit/loss, breakeven,
//!   benchmarks and price grids. Pure functions, no I/O.
//! - **Quote resolution**: turns (underlying, long strike, short strike,
//!   optional expiration) into a net debit per share from quoted mids,
//!   tolerating the many shapes brokerage market-data payloads come in.
//!
//! ## Key Components
//!
//! - **Quote normalization**: alias tables for bid/ask/last/mid
//! - **OCC symbols**: build and parse `ROOT YYMMDD C/P STRIKE*1000`
//! - **Chain resolution**: bounded payload walk, pagination, best-pair match
//! - **Market data client**: fast path, chain fallback, quote completion
//! - **Payoff**: spread, underlying and long-call P&L
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spread_options::prelude::*;
//!
//! // Credentials from APCA_API_KEY_ID / APCA_API_SECRET_KEY
//! let client = MarketDataClient::from_env().unwrap();
//!
//! let request = SpreadDebitRequest::new("AAPL", 190.0, 200.0).with_expiration("2024-09-20");
//! let priced = client.fetch_spread_mid_debit(&request).unwrap();
//!
//! let pnl = bull_call_spread_profit(&BullCallSpreadArgs {
//!     long_strike: 190.0,
//!     short_strike: 200.0,
//!     net_debit_per_share: priced.net_debit_per_share,
//!     contract_size: 100,
//!     contracts: 1,
//!     price_at_expiry: 196.0,
//! })
//! .unwrap();
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Price options with a volatility model
//! - Place orders or manage positions
//! - Stream or cache quotes

pub mod core;
pub mod data;
pub mod payoff;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        build_occ_option_symbol, compute_mid_from_quote, normalize_expiration_input,
        normalize_quote, parse_occ_option_symbol, ChainMatch, NormalizedContract,
        NormalizedQuote, OccSymbol, OptionType, SpreadError, SpreadResult,
    };

    // Market data
    pub use crate::data::{
        ChainRequest, ChainResolver, ClientConfig, DebitSource, FetchSpreadDebitResult,
        HttpTransport, MarketDataClient, MarketDataTransport, SpreadDebitRequest,
    };

    // Payoff
    pub use crate::payoff::{
        benchmark_long_call_contracts, benchmark_shares, bull_call_spread_breakeven,
        bull_call_spread_max_loss_per_contract, bull_call_spread_max_profit_per_contract,
        bull_call_spread_max_profit_strike, bull_call_spread_pnl, bull_call_spread_profit, long_call_profit,
        payoff_table, range, resolve_contracts, underlying_pnl, BreakevenArgs,
        BullCallSpreadArgs, LongCallArgs, MaxProfitArgs, PayoffRow, PayoffTableArgs,
        SpreadSummary, DEFAULT_CONTRACT_SIZE,
    };
}

// Re-export main types at crate root
pub use crate::core::{SpreadError, SpreadResult};
pub use crate::data::{MarketDataClient, SpreadDebitRequest};
