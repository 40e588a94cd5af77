//! Market data client
//!
//! Entry point for spread pricing. Resolves the two legs of a bull call
//! spread to quoted mids and reports the net debit per share:
//!
//! 1. Expiration given: build both OCC symbols and fetch their quotes in one
//!    batched call.
//! 2. Otherwise, or if that misses: resolve the pair through the option chain
//!    (still filtered to the expiration when one was given).
//! 3. Legs the chain returned without pricing get one more batched quote
//!    lookup before the request fails.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chain::{collect_quotes_by_symbol, ChainRequest, ChainResolver};
use super::config::ClientConfig;
use super::http::{HttpTransport, MarketDataTransport};
use crate::core::{
    build_occ_option_symbol, compute_mid_from_quote, expiration_to_unix_seconds, first_finite,
    normalize_expiration_input, normalize_quote, sanitize_option_symbol, ChainMatch,
    NormalizedContract, NormalizedQuote, OptionType, SpreadError, SpreadResult,
    QUOTE_CONTAINER_KEYS,
};
use crate::payoff::ensure_strike_order;

/// Batched option quote endpoints, tried in order
pub const OPTION_QUOTE_PATHS: &[&str] =
    &["v1beta1/options/quotes/latest", "v1beta1/options/snapshots"];

pub const TRADE_PRICE_ALIASES: &[&str] = &["p", "price", "trade_price", "last_price", "lastPrice"];

const TRADE_CONTAINER_KEYS: &[&str] = &["trade", "latestTrade", "latest_trade", "last_trade"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceKind {
    Trade,
    Quote,
}

struct StockEndpoint {
    kind: PriceKind,
    path: &'static str,
    batched: bool,
}

/// Underlying price sources: trades first, then quote mids
const STOCK_PRICE_ENDPOINTS: &[StockEndpoint] = &[
    StockEndpoint {
        kind: PriceKind::Trade,
        path: "v2/stocks/{symbol}/trades/latest",
        batched: false,
    },
    StockEndpoint {
        kind: PriceKind::Trade,
        path: "v2/stocks/trades/latest",
        batched: true,
    },
    StockEndpoint {
        kind: PriceKind::Quote,
        path: "v2/stocks/{symbol}/quotes/latest",
        batched: false,
    },
    StockEndpoint {
        kind: PriceKind::Quote,
        path: "v2/stocks/quotes/latest",
        batched: true,
    },
];

/// Spread to price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadDebitRequest {
    /// Underlying ticker
    pub symbol: String,
    /// Bought strike
    pub long_strike: f64,
    /// Sold strike
    pub short_strike: f64,
    /// Expiration in any form `normalize_expiration_input` accepts
    pub expiration: Option<String>,
}

impl SpreadDebitRequest {
    pub fn new(symbol: impl Into<String>, long_strike: f64, short_strike: f64) -> Self {
        Self {
            symbol: symbol.into(),
            long_strike,
            short_strike,
            expiration: None,
        }
    }

    pub fn with_expiration(mut self, expiration: impl Into<String>) -> Self {
        self.expiration = Some(expiration.into());
        self
    }
}

/// How the legs were priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebitSource {
    FastPath,
    Chain,
}

/// Priced spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchSpreadDebitResult {
    /// long_mid - short_mid; negative when the market is inverted
    pub net_debit_per_share: f64,
    pub long_mid: f64,
    pub short_mid: f64,
    /// Expiration as Unix seconds (midnight UTC)
    pub expiration: i64,
    pub expiration_date: NaiveDate,
    pub long_symbol: String,
    pub short_symbol: String,
    pub source: DebitSource,
}

impl FetchSpreadDebitResult {
    fn new(
        long_mid: f64,
        short_mid: f64,
        expiration: NaiveDate,
        long_symbol: String,
        short_symbol: String,
        source: DebitSource,
    ) -> Self {
        Self {
            net_debit_per_share: long_mid - short_mid,
            long_mid,
            short_mid,
            expiration: expiration_to_unix_seconds(expiration),
            expiration_date: expiration,
            long_symbol,
            short_symbol,
            source,
        }
    }
}

/// Brokerage market data client
pub struct MarketDataClient<T: MarketDataTransport = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl MarketDataClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> SpreadResult<Self> {
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self { transport, config })
    }

    pub fn from_env() -> SpreadResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: MarketDataTransport> MarketDataClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Net debit per share of the spread, from quoted mids
    pub fn fetch_spread_mid_debit(
        &self,
        request: &SpreadDebitRequest,
    ) -> SpreadResult<FetchSpreadDebitResult> {
        let underlying = validate_symbol(&request.symbol)?;
        ensure_strike_order(request.long_strike, request.short_strike)?;
        let expiration = request
            .expiration
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(normalize_expiration_input)
            .transpose()?;

        if let Some(expiration) = expiration {
            if let Some(result) = self.try_fast_path(&underlying, request, expiration) {
                return Ok(result);
            }
            tracing::debug!("Fast path missed for {}, resolving through chain", underlying);
        }

        let chain_request = ChainRequest::new(&underlying, request.long_strike, request.short_strike)
            .with_expiration(expiration);
        let ChainMatch {
            expiration,
            mut long,
            mut short,
        } = ChainResolver::new(&self.transport, &self.config)
            .fetch_contracts_from_chain(&chain_request)
            .ok_or_else(|| {
                SpreadError::not_found(format!(
                    "no option chain match for {} strikes {}/{}{}",
                    underlying,
                    request.long_strike,
                    request.short_strike,
                    expiration
                        .map(|d| format!(" expiring {}", d))
                        .unwrap_or_default()
                ))
            })?;

        self.complete_quotes(&mut long, &mut short);

        let long_mid =
            compute_mid_from_quote(long.quote.as_ref(), &format!("long leg {}", long.symbol))?;
        let short_mid =
            compute_mid_from_quote(short.quote.as_ref(), &format!("short leg {}", short.symbol))?;

        Ok(FetchSpreadDebitResult::new(
            long_mid,
            short_mid,
            expiration,
            long.symbol,
            short.symbol,
            DebitSource::Chain,
        ))
    }

    /// Latest quotes for option symbols; endpoints that fail are skipped
    pub fn fetch_option_quotes(&self, symbols: &[String]) -> HashMap<String, NormalizedQuote> {
        let mut wanted: Vec<String> = symbols
            .iter()
            .map(|s| sanitize_option_symbol(s))
            .filter(|s| !s.is_empty())
            .collect();
        wanted.sort();
        wanted.dedup();

        let mut found = HashMap::new();

        for path in OPTION_QUOTE_PATHS {
            let missing: Vec<&str> = wanted
                .iter()
                .filter(|s| !found.contains_key(*s))
                .map(String::as_str)
                .collect();
            if missing.is_empty() {
                break;
            }

            let mut query = vec![("symbols", missing.join(","))];
            if let Some(feed) = &self.config.options_feed {
                query.push(("feed", feed.clone()));
            }

            match self.transport.get_json(path, &query) {
                Ok(payload) => {
                    for (symbol, quote) in collect_quotes_by_symbol(&payload) {
                        if missing.contains(&symbol.as_str()) {
                            found.entry(symbol).or_insert(quote);
                        }
                    }
                }
                Err(e) => tracing::debug!("Option quote endpoint {} failed: {}", path, e),
            }
        }

        found
    }

    /// Latest price of the underlying: trade price, else quote mid
    pub fn fetch_latest_stock_price(&self, symbol: &str) -> SpreadResult<f64> {
        let symbol = validate_symbol(symbol)?;

        for endpoint in STOCK_PRICE_ENDPOINTS {
            let path = endpoint.path.replace("{symbol}", &symbol);
            let mut query = Vec::new();
            if endpoint.batched {
                query.push(("symbols", symbol.clone()));
            }
            if let Some(feed) = &self.config.stock_feed {
                query.push(("feed", feed.clone()));
            }

            match self.transport.get_json(&path, &query) {
                Ok(payload) => match stock_price_from_payload(endpoint.kind, &payload, &symbol) {
                    Some(price) => {
                        tracing::debug!("{} price {} from {}", symbol, price, path);
                        return Ok(price);
                    }
                    None => tracing::debug!("No usable price for {} in {}", symbol, path),
                },
                Err(e) => tracing::debug!("Stock price endpoint {} failed: {}", path, e),
            }
        }

        Err(SpreadError::not_found(format!(
            "no trade or quote price available for {}",
            symbol
        )))
    }

    fn try_fast_path(
        &self,
        underlying: &str,
        request: &SpreadDebitRequest,
        expiration: NaiveDate,
    ) -> Option<FetchSpreadDebitResult> {
        let expiration_text = expiration.format("%Y-%m-%d").to_string();
        let build = |strike: f64| {
            build_occ_option_symbol(underlying, &expiration_text, strike, OptionType::Call)
                .map_err(|e| tracing::debug!("Cannot build symbol for strike {}: {}", strike, e))
                .ok()
        };
        let long_symbol = build(request.long_strike)?;
        let short_symbol = build(request.short_strike)?;

        let quotes = self.fetch_option_quotes(&[long_symbol.clone(), short_symbol.clone()]);
        let long_mid = quotes.get(&long_symbol).and_then(NormalizedQuote::mid_price)?;
        let short_mid = quotes.get(&short_symbol).and_then(NormalizedQuote::mid_price)?;

        Some(FetchSpreadDebitResult::new(
            long_mid,
            short_mid,
            expiration,
            long_symbol,
            short_symbol,
            DebitSource::FastPath,
        ))
    }

    /// One batched lookup for legs the chain returned without pricing
    fn complete_quotes(&self, long: &mut NormalizedContract, short: &mut NormalizedContract) {
        let missing: Vec<String> = [&*long, &*short]
            .iter()
            .filter(|leg| !leg.has_quote())
            .map(|leg| leg.symbol.clone())
            .collect();
        if missing.is_empty() {
            return;
        }

        tracing::debug!("Fetching quotes for unpriced legs {:?}", missing);
        let quotes = self.fetch_option_quotes(&missing);
        for leg in [long, short] {
            if !leg.has_quote() {
                if let Some(quote) = quotes.get(&leg.symbol) {
                    leg.quote = Some(*quote);
                }
            }
        }
    }
}

fn validate_symbol(symbol: &str) -> SpreadResult<String> {
    let symbol = sanitize_option_symbol(symbol);
    if symbol.is_empty() {
        return Err(SpreadError::invalid_input("symbol is required"));
    }
    Ok(symbol)
}

/// Price for `symbol` from a trade or quote payload, single or batched
fn stock_price_from_payload(kind: PriceKind, payload: &Value, symbol: &str) -> Option<f64> {
    let (map_key, containers) = match kind {
        PriceKind::Trade => ("trades", TRADE_CONTAINER_KEYS),
        PriceKind::Quote => ("quotes", QUOTE_CONTAINER_KEYS),
    };

    let mut candidates: Vec<&Value> = Vec::new();
    if let Some(entry) = payload.get(map_key).and_then(|map| map.get(symbol)) {
        candidates.push(entry);
    }
    candidates.extend(containers.iter().filter_map(|key| payload.get(*key)));
    candidates.push(payload);

    candidates.into_iter().find_map(|node| {
        match kind {
            PriceKind::Trade => first_finite(node, TRADE_PRICE_ALIASES),
            PriceKind::Quote => normalize_quote(node).and_then(|q| q.mid_price()),
        }
        .filter(|price| *price > 0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture::FixtureTransport;
    use approx::assert_relative_eq;
    use serde_json::json;

    const QUOTES: &str = "v1beta1/options/quotes/latest";
    const QUOTE_SNAPSHOTS: &str = "v1beta1/options/snapshots";
    const CHAIN_SNAPSHOTS: &str = "v1beta1/options/snapshots/TSLA";
    const CONTRACTS: &str = "v2/options/contracts";

    const LONG_SEP: &str = "TSLA240920C00250000";
    const SHORT_SEP: &str = "TSLA240920C00260000";

    fn client(transport: FixtureTransport) -> MarketDataClient<FixtureTransport> {
        MarketDataClient::with_transport(ClientConfig::new("key", "secret"), transport)
    }

    fn quote(bid: f64, ask: f64) -> Value {
        json!({ "bp": bid, "ap": ask })
    }

    fn contracts_page(long_priced: bool) -> Value {
        let long = if long_priced {
            json!({ "symbol": LONG_SEP, "strike_price": "250", "expiration_date": "2024-09-20", "type": "call", "bid": 6.0, "ask": 6.2 })
        } else {
            json!({ "symbol": LONG_SEP, "strike_price": "250", "expiration_date": "2024-09-20", "type": "call", "close_price": null })
        };
        json!({
            "option_contracts": [
                long,
                { "symbol": SHORT_SEP, "strike_price": "260", "expiration_date": "2024-09-20", "type": "call", "close_price": null }
            ],
            "next_page_token": null
        })
    }

    #[test]
    fn test_rejects_invalid_input_before_io() {
        let client = client(FixtureTransport::new());

        let err = client
            .fetch_spread_mid_debit(&SpreadDebitRequest::new("  ", 250.0, 260.0))
            .unwrap_err();
        assert!(matches!(err, SpreadError::InvalidInput(_)));

        let err = client
            .fetch_spread_mid_debit(&SpreadDebitRequest::new("TSLA", f64::NAN, 260.0))
            .unwrap_err();
        assert!(err.to_string().contains("long_strike"));

        let err = client
            .fetch_spread_mid_debit(&SpreadDebitRequest::new("TSLA", 250.0, f64::INFINITY))
            .unwrap_err();
        assert!(err.to_string().contains("short_strike"));

        let err = client
            .fetch_spread_mid_debit(
                &SpreadDebitRequest::new("TSLA", 250.0, 260.0).with_expiration("someday"),
            )
            .unwrap_err();
        assert!(matches!(err, SpreadError::InvalidInput(_)));

        assert!(client.fetch_latest_stock_price("").is_err());
        assert!(client.transport().calls().is_empty());
    }

    #[test]
    fn test_rejects_unordered_strikes_before_io() {
        let transport = FixtureTransport::new().json(
            QUOTES,
            json!({ "quotes": { LONG_SEP: quote(5.0, 5.2), SHORT_SEP: quote(2.0, 2.2) } }),
        );
        let client = client(transport);

        for (long, short) in [(260.0, 250.0), (250.0, 250.0)] {
            let err = client
                .fetch_spread_mid_debit(
                    &SpreadDebitRequest::new("TSLA", long, short).with_expiration("2024-09-20"),
                )
                .unwrap_err();
            assert!(matches!(err, SpreadError::InvalidInput(_)));
            let message = err.to_string();
            assert!(message.contains("long_strike"));
            assert!(message.contains("short_strike"));
        }
        assert!(client.transport().calls().is_empty());
    }

    #[test]
    fn test_fast_path_single_request() {
        let transport = FixtureTransport::new().json(
            QUOTES,
            json!({ "quotes": { LONG_SEP: quote(5.0, 5.2), SHORT_SEP: quote(2.0, 2.2) } }),
        );
        let client = client(transport);

        let result = client
            .fetch_spread_mid_debit(
                &SpreadDebitRequest::new("tsla", 250.0, 260.0).with_expiration("2024-09-20"),
            )
            .unwrap();

        assert_eq!(result.source, DebitSource::FastPath);
        assert_relative_eq!(result.long_mid, 5.1, epsilon = 1e-9);
        assert_relative_eq!(result.short_mid, 2.1, epsilon = 1e-9);
        assert_relative_eq!(result.net_debit_per_share, 3.0, epsilon = 1e-9);
        assert_eq!(result.expiration, 1_726_790_400);
        assert_eq!(result.long_symbol, LONG_SEP);

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].param("symbols"), Some("TSLA240920C00250000,TSLA240920C00260000"));
    }

    #[test]
    fn test_fast_path_miss_falls_back_to_filtered_chain() {
        let transport = FixtureTransport::new()
            .json(QUOTES, json!({ "quotes": { LONG_SEP: quote(5.0, 5.2) } }))
            .json(
                CHAIN_SNAPSHOTS,
                json!({
                    "snapshots": {
                        LONG_SEP: { "latestQuote": quote(5.0, 5.2) },
                        SHORT_SEP: { "latestQuote": quote(2.0, 2.4) }
                    },
                    "next_page_token": null
                }),
            );
        let client = client(transport);

        let result = client
            .fetch_spread_mid_debit(
                &SpreadDebitRequest::new("TSLA", 250.0, 260.0).with_expiration("1726790400"),
            )
            .unwrap();

        assert_eq!(result.source, DebitSource::Chain);
        assert_relative_eq!(result.net_debit_per_share, 2.9, epsilon = 1e-9);

        let chain_calls = client.transport().calls_to(CHAIN_SNAPSHOTS);
        assert_eq!(chain_calls.len(), 1);
        assert_eq!(chain_calls[0].param("expiration_date"), Some("2024-09-20"));
    }

    #[test]
    fn test_no_expiration_uses_earliest_chain_match() {
        let transport = FixtureTransport::new().json(
            CHAIN_SNAPSHOTS,
            json!({
                "snapshots": {
                    "TSLA241018C00250000": { "latestQuote": quote(9.0, 9.4) },
                    "TSLA241018C00260000": { "latestQuote": quote(4.0, 4.4) },
                    LONG_SEP: { "latestQuote": quote(5.0, 5.2) },
                    SHORT_SEP: { "latestQuote": quote(2.0, 2.2) }
                }
            }),
        );
        let client = client(transport);

        let result = client
            .fetch_spread_mid_debit(&SpreadDebitRequest::new("TSLA", 250.0, 260.0))
            .unwrap();

        assert_eq!(result.expiration_date, NaiveDate::from_ymd_opt(2024, 9, 20).unwrap());
        assert_eq!(result.short_symbol, SHORT_SEP);

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, CHAIN_SNAPSHOTS);
        assert_eq!(calls[0].param("expiration_date"), None);
    }

    #[test]
    fn test_completes_only_missing_quotes() {
        let transport = FixtureTransport::new()
            .json(CONTRACTS, contracts_page(true))
            .json(QUOTES, json!({ "quotes": { SHORT_SEP: quote(2.0, 2.2) } }));
        let client = client(transport);

        let result = client
            .fetch_spread_mid_debit(&SpreadDebitRequest::new("TSLA", 250.0, 260.0))
            .unwrap();

        assert_relative_eq!(result.long_mid, 6.1, epsilon = 1e-9);
        assert_relative_eq!(result.short_mid, 2.1, epsilon = 1e-9);

        let quote_calls = client.transport().calls_to(QUOTES);
        assert_eq!(quote_calls.len(), 1);
        assert_eq!(quote_calls[0].param("symbols"), Some(SHORT_SEP));
    }

    #[test]
    fn test_completion_falls_back_to_snapshot_quotes() {
        let transport = FixtureTransport::new()
            .json(CONTRACTS, contracts_page(false))
            .status(QUOTES, 503)
            .json(
                QUOTE_SNAPSHOTS,
                json!({
                    "snapshots": {
                        LONG_SEP: { "latestQuote": quote(5.0, 5.2) },
                        SHORT_SEP: { "latestQuote": quote(2.0, 2.2) }
                    }
                }),
            );
        let client = client(transport);

        let result = client
            .fetch_spread_mid_debit(&SpreadDebitRequest::new("TSLA", 250.0, 260.0))
            .unwrap();

        assert_relative_eq!(result.net_debit_per_share, 3.0, epsilon = 1e-9);
        assert_eq!(
            client.transport().calls_to(QUOTES)[0].param("symbols"),
            Some("TSLA240920C00250000,TSLA240920C00260000")
        );
    }

    #[test]
    fn test_option_quotes_second_request_only_for_missing() {
        let transport = FixtureTransport::new()
            .json(QUOTES, json!({ "quotes": { LONG_SEP: quote(5.0, 5.2) } }))
            .json(
                QUOTE_SNAPSHOTS,
                json!({ "snapshots": { SHORT_SEP: { "latestQuote": quote(2.0, 2.2) } } }),
            );
        let client = client(transport);

        let quotes = client.fetch_option_quotes(&[SHORT_SEP.to_string(), LONG_SEP.to_string()]);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[LONG_SEP].bid, Some(5.0));
        assert_eq!(quotes[SHORT_SEP].ask, Some(2.2));

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].param("symbols"), Some("TSLA240920C00250000,TSLA240920C00260000"));
        assert_eq!(client.transport().calls_to(QUOTE_SNAPSHOTS)[0].param("symbols"), Some(SHORT_SEP));
    }

    #[test]
    fn test_missing_pricing_names_leg() {
        let transport = FixtureTransport::new().json(CONTRACTS, contracts_page(true));
        let client = client(transport);

        let err = client
            .fetch_spread_mid_debit(&SpreadDebitRequest::new("TSLA", 250.0, 260.0))
            .unwrap_err();

        assert!(matches!(err, SpreadError::MissingQuote(_)));
        let message = err.to_string();
        assert!(message.contains("short leg"));
        assert!(message.contains(SHORT_SEP));
    }

    #[test]
    fn test_no_match_reports_context() {
        let client = client(FixtureTransport::new());

        let err = client
            .fetch_spread_mid_debit(
                &SpreadDebitRequest::new("TSLA", 250.0, 260.0).with_expiration("2024-09-20"),
            )
            .unwrap_err();

        assert!(matches!(err, SpreadError::NotFound(_)));
        let message = err.to_string();
        assert!(message.contains("TSLA"));
        assert!(message.contains("250/260"));
        assert!(message.contains("2024-09-20"));
    }

    #[test]
    fn test_inverted_market_yields_net_credit_without_error() {
        // Short leg priced above long leg: permitted, reported as a negative debit
        let transport = FixtureTransport::new().json(
            QUOTES,
            json!({ "quotes": { LONG_SEP: quote(1.9, 2.1), SHORT_SEP: quote(2.9, 3.1) } }),
        );
        let client = client(transport);

        let result = client
            .fetch_spread_mid_debit(
                &SpreadDebitRequest::new("TSLA", 250.0, 260.0).with_expiration("2024-09-20"),
            )
            .unwrap();

        assert_relative_eq!(result.net_debit_per_share, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stock_price_from_trade() {
        let transport = FixtureTransport::new().json(
            "v2/stocks/AAPL/trades/latest",
            json!({ "symbol": "AAPL", "trade": { "p": 227.52, "s": 100 } }),
        );
        let client = client(transport);

        assert_relative_eq!(client.fetch_latest_stock_price("aapl").unwrap(), 227.52);
    }

    #[test]
    fn test_stock_price_falls_back_to_quote_mid() {
        let transport = FixtureTransport::new()
            .status("v2/stocks/AAPL/trades/latest", 500)
            .json("v2/stocks/trades/latest", json!({ "trades": {} }))
            .json(
                "v2/stocks/AAPL/quotes/latest",
                json!({ "symbol": "AAPL", "quote": { "ap": 0, "bp": 0 } }),
            )
            .json(
                "v2/stocks/quotes/latest",
                json!({ "quotes": { "AAPL": { "ap": 228.0, "bp": 227.0 } } }),
            );
        let client = client(transport);

        assert_relative_eq!(client.fetch_latest_stock_price("AAPL").unwrap(), 227.5);

        let batched = client.transport().calls_to("v2/stocks/quotes/latest");
        assert_eq!(batched[0].param("symbols"), Some("AAPL"));
    }

    #[test]
    fn test_stock_price_not_found() {
        let client = client(FixtureTransport::new());

        let err = client.fetch_latest_stock_price("AAPL").unwrap_err();
        assert!(matches!(err, SpreadError::NotFound(_)));
        assert_eq!(client.transport().calls().len(), STOCK_PRICE_ENDPOINTS.len());
    }
}
