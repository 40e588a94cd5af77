//! Spread Options CLI
//!
//! Prices a bull call spread from live quotes and prints its expiry payoff
//! next to buying the underlying or long calls with the same capital.
//!
//! Usage:
//!   spread-cli --symbol AAPL --long 190 --short 200 --expiration 2024-09-20 --portfolio 10000
//!
//! Offline, with a known debit:
//!   spread-cli --symbol AAPL --long 190 --short 200 --debit 3.1 --spot 195

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spread_options::prelude::*;

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Bull call spread payoff from brokerage quotes")]
struct Args {
    /// Underlying ticker
    #[arg(long, short = 's')]
    symbol: String,

    /// Long (bought) call strike
    #[arg(long)]
    long: f64,

    /// Short (sold) call strike
    #[arg(long)]
    short: f64,

    /// Expiration (YYYY-MM-DD, Unix timestamp, or a common date format)
    #[arg(long, short = 'e')]
    expiration: Option<String>,

    /// Portfolio value used to size positions
    #[arg(long, short = 'p')]
    portfolio: Option<f64>,

    /// Number of spreads; overrides portfolio sizing
    #[arg(long, short = 'n')]
    contracts: Option<u32>,

    #[arg(long, default_value_t = DEFAULT_CONTRACT_SIZE)]
    contract_size: u32,

    /// Net debit per share; skips the quote lookup
    #[arg(long)]
    debit: Option<f64>,

    /// Underlying price; skips the price lookup
    #[arg(long)]
    spot: Option<f64>,

    #[arg(long)]
    range_start: Option<f64>,

    #[arg(long)]
    range_end: Option<f64>,

    #[arg(long)]
    range_step: Option<f64>,

    /// JSON client config; defaults to APCA_* environment variables
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> SpreadResult<()> {
    // Fail on bad strikes before touching the network
    bull_call_spread_max_profit_per_contract(&MaxProfitArgs {
        long_strike: args.long,
        short_strike: args.short,
        net_debit_per_share: 0.0,
        contract_size: args.contract_size,
    })?;

    let client = if args.debit.is_some() && args.spot.is_some() {
        None
    } else {
        Some(connect(args.config.as_ref())?)
    };

    let (debit, long_premium) = match (args.debit, &client) {
        (Some(debit), _) => (debit, None),
        (None, Some(client)) => {
            let mut request = SpreadDebitRequest::new(&args.symbol, args.long, args.short);
            if let Some(expiration) = &args.expiration {
                request = request.with_expiration(expiration.clone());
            }
            let priced = client.fetch_spread_mid_debit(&request)?;
            print_priced(&priced);
            (priced.net_debit_per_share, Some(priced.long_mid))
        }
        (None, None) => return Err(SpreadError::invalid_input("no debit and no market data client")),
    };

    if debit < 0.0 {
        warn!(
            "Short leg is priced above the long leg: net credit of {:.2} per share",
            -debit
        );
    }

    let spot = match (args.spot, &client) {
        (Some(spot), _) => Some(spot),
        (None, Some(client)) => match client.fetch_latest_stock_price(&args.symbol) {
            Ok(price) => Some(price),
            Err(e) => {
                warn!("Underlying price unavailable, skipping share benchmark: {}", e);
                None
            }
        },
        (None, None) => None,
    };

    let contracts = resolve_contracts(args.contracts, args.portfolio, debit, args.contract_size)?;
    let summary = SpreadSummary::compute(
        &MaxProfitArgs {
            long_strike: args.long,
            short_strike: args.short,
            net_debit_per_share: debit,
            contract_size: args.contract_size,
        },
        contracts,
    )?;
    print_summary(args, debit, spot, &summary);

    let underlying = match (args.portfolio, spot) {
        (Some(portfolio), Some(spot)) => benchmark_or_skip(
            "share",
            benchmark_shares(portfolio, spot).map(|shares| (spot, shares)),
        ),
        _ => None,
    };
    let long_call = match (args.portfolio, long_premium) {
        (Some(portfolio), Some(premium)) => benchmark_or_skip(
            "long call",
            benchmark_long_call_contracts(portfolio, premium, args.contract_size)
                .map(|n| (premium, n)),
        ),
        _ => None,
    };

    let prices = price_grid(args)?;
    let rows = payoff_table(
        &PayoffTableArgs {
            long_strike: args.long,
            short_strike: args.short,
            net_debit_per_share: debit,
            contract_size: args.contract_size,
            contracts,
            underlying,
            long_call,
        },
        &prices,
    )?;
    print_table(&rows, underlying, long_call);

    Ok(())
}

fn connect(config: Option<&PathBuf>) -> SpreadResult<MarketDataClient> {
    let config = match config {
        Some(path) => ClientConfig::from_json_file(path)?,
        None => ClientConfig::from_env()?,
    };
    info!("Market data from {}", config.base_url);
    MarketDataClient::new(config)
}

fn benchmark_or_skip<T>(name: &str, sized: SpreadResult<T>) -> Option<T> {
    match sized {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Skipping {} benchmark: {}", name, e);
            None
        }
    }
}

fn price_grid(args: &Args) -> SpreadResult<Vec<f64>> {
    let width = args.short - args.long;
    let start = args.range_start.unwrap_or((args.long - width).max(0.0));
    let end = args.range_end.unwrap_or(args.short + width);
    let step = args.range_step.unwrap_or(width / 4.0);
    range(start, end, step)
}

fn print_priced(priced: &FetchSpreadDebitResult) {
    println!("Expiration: {} ({:?})", priced.expiration_date, priced.source);
    println!("  Long  {}  mid ${:.2}", priced.long_symbol, priced.long_mid);
    println!("  Short {}  mid ${:.2}", priced.short_symbol, priced.short_mid);
}

fn print_summary(args: &Args, debit: f64, spot: Option<f64>, summary: &SpreadSummary) {
    println!("\n{} {}/{} bull call spread", args.symbol.to_uppercase(), args.long, args.short);
    if let Some(spot) = spot {
        println!("  Spot: ${:.2}", spot);
    }
    println!("  Net debit: ${:.2}/share", debit);
    println!("  Contracts: {}", summary.contracts);
    println!("  Cost: ${:.2}", summary.cost);
    println!("  Max profit: ${:.2} at or above ${:.2}", summary.max_profit, summary.max_profit_price);
    println!("  Max loss: ${:.2}", summary.max_loss);
    println!("  Breakeven: ${:.2}\n", summary.breakeven);
}

fn print_table(rows: &[PayoffRow], underlying: Option<(f64, f64)>, long_call: Option<(f64, u32)>) {
    let mut header = vec!["Price".to_string(), "Spread".to_string()];
    if let Some((_, shares)) = underlying {
        header.push(format!("Shares({})", shares));
    }
    if let Some((_, contracts)) = long_call {
        header.push(format!("LongCall({})", contracts));
    }
    println!("{}", header.join("\t"));

    for row in rows {
        let mut cells = vec![
            format!("{:.2}", row.price_at_expiry),
            format!("{:.2}", row.spread_pnl),
        ];
        cells.extend(row.underlying_pnl.map(|v| format!("{:.2}", v)));
        cells.extend(row.long_call_pnl.map(|v| format!("{:.2}", v)));
        println!("{}", cells.join("\t"));
    }
}
