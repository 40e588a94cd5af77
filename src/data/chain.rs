//! Option chain resolution
//!
//! Finds the long/short contract pair for a vertical spread in chain payloads
//! whose layout differs by endpoint and API version. Contracts may sit in an
//! array (`option_contracts: [...]`), in a map keyed by OCC symbol
//! (`snapshots: { "TSLA240920C00250000": {...} }`), or deeper. Payloads are
//! walked with a bounded explicit stack and every object that looks like a
//! contract is collected.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde_json::Value;

use super::config::ClientConfig;
use super::http::MarketDataTransport;
use crate::core::{
    approx_equal, first_finite, normalize_expiration_input, normalize_quote,
    option_type_from_symbol_or_field, parse_occ_option_symbol, sanitize_option_symbol,
    ChainMatch, NormalizedContract, NormalizedQuote, OptionType, SpreadError,
    QUOTE_CONTAINER_KEYS, QUOTE_FIELD_ALIASES,
};

/// Pages fetched per endpoint before giving up
pub const MAX_CHAIN_PAGES: usize = 4;

const MAX_TRAVERSAL_DEPTH: usize = 32;
const MAX_TRAVERSAL_NODES: usize = 200_000;

pub const SYMBOL_ALIASES: &[&str] = &[
    "symbol",
    "contract_symbol",
    "contractSymbol",
    "option_symbol",
    "optionSymbol",
    "occ_symbol",
    "occSymbol",
];

pub const STRIKE_ALIASES: &[&str] = &["strike_price", "strike", "strikePrice", "strike_px"];

pub const EXPIRATION_ALIASES: &[&str] = &[
    "expiration_date",
    "expiration",
    "expirationDate",
    "expiry",
    "expiry_date",
    "exp_date",
];

pub const TYPE_ALIASES: &[&str] = &["type", "option_type", "optionType", "right", "put_call"];

/// Price-bearing keys beyond the quote aliases and containers
pub const EXTRA_PRICE_KEYS: &[&str] = &[
    "latestTrade",
    "latest_trade",
    "close_price",
    "closePrice",
    "dailyBar",
];

pub const PAGE_TOKEN_ALIASES: &[&str] = &[
    "next_page_token",
    "nextPageToken",
    "page_token",
    "next_token",
    "next",
];

/// A chain endpoint variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEndpoint {
    pub name: &'static str,
    /// Path template, `{symbol}` is replaced by the underlying
    pub path: &'static str,
    /// Query parameter carrying the underlying, when not in the path
    pub underlying_param: Option<&'static str>,
    pub accepts_feed: bool,
}

/// Chain endpoints in the order they are tried
pub const CHAIN_ENDPOINTS: &[ChainEndpoint] = &[
    ChainEndpoint {
        name: "option snapshots",
        path: "v1beta1/options/snapshots/{symbol}",
        underlying_param: None,
        accepts_feed: true,
    },
    ChainEndpoint {
        name: "option contracts",
        path: "v2/options/contracts",
        underlying_param: Some("underlying_symbols"),
        accepts_feed: false,
    },
];

impl ChainEndpoint {
    pub fn path_for(&self, underlying: &str) -> String {
        self.path.replace("{symbol}", underlying)
    }

    fn query(
        &self,
        request: &ChainRequest,
        config: &ClientConfig,
        page_token: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(param) = self.underlying_param {
            query.push((param, request.underlying.clone()));
        }
        query.push(("type", "call".to_string()));
        query.push((
            "strike_price_gte",
            request.long_strike.min(request.short_strike).to_string(),
        ));
        query.push((
            "strike_price_lte",
            request.long_strike.max(request.short_strike).to_string(),
        ));
        if let Some(expiration) = request.expiration {
            query.push(("expiration_date", expiration.format("%Y-%m-%d").to_string()));
        }
        query.push(("limit", config.page_limit.to_string()));
        if self.accepts_feed {
            if let Some(feed) = &config.options_feed {
                query.push(("feed", feed.clone()));
            }
        }
        if let Some(token) = page_token {
            query.push(("page_token", token.to_string()));
        }
        query
    }
}

/// What to look for in a chain
#[derive(Debug, Clone, PartialEq)]
pub struct ChainRequest {
    /// Canonical underlying ticker
    pub underlying: String,
    pub long_strike: f64,
    pub short_strike: f64,
    /// Restrict matching to this expiration
    pub expiration: Option<NaiveDate>,
}

impl ChainRequest {
    pub fn new(underlying: &str, long_strike: f64, short_strike: f64) -> Self {
        Self {
            underlying: sanitize_option_symbol(underlying),
            long_strike,
            short_strike,
            expiration: None,
        }
    }

    pub fn with_expiration(mut self, expiration: Option<NaiveDate>) -> Self {
        self.expiration = expiration;
        self
    }
}

/// Result of trying one endpoint variant
#[derive(Debug)]
pub enum EndpointOutcome {
    Matched(ChainMatch),
    NoMatch { pages: usize, contracts: usize },
    TransportError(SpreadError),
}

/// Walks chain endpoints until one yields a spread match
pub struct ChainResolver<'a, T: MarketDataTransport> {
    transport: &'a T,
    config: &'a ClientConfig,
    endpoints: &'a [ChainEndpoint],
}

impl<'a, T: MarketDataTransport> ChainResolver<'a, T> {
    pub fn new(transport: &'a T, config: &'a ClientConfig) -> Self {
        Self {
            transport,
            config,
            endpoints: CHAIN_ENDPOINTS,
        }
    }

    pub fn with_endpoints(mut self, endpoints: &'a [ChainEndpoint]) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// First match across endpoint variants, or `None`
    pub fn fetch_contracts_from_chain(&self, request: &ChainRequest) -> Option<ChainMatch> {
        for endpoint in self.endpoints {
            match self.attempt_endpoint(endpoint, request) {
                EndpointOutcome::Matched(chain_match) => {
                    tracing::info!(
                        "Matched {} {}/{} expiring {} via {}",
                        request.underlying,
                        chain_match.long.symbol,
                        chain_match.short.symbol,
                        chain_match.expiration,
                        endpoint.name
                    );
                    return Some(chain_match);
                }
                EndpointOutcome::NoMatch { pages, contracts } => {
                    tracing::debug!(
                        "No match via {} for {} ({} pages, {} contracts)",
                        endpoint.name,
                        request.underlying,
                        pages,
                        contracts
                    );
                }
                EndpointOutcome::TransportError(e) => {
                    tracing::debug!("Chain endpoint {} failed: {}", endpoint.name, e);
                }
            }
        }
        None
    }

    /// Paginate one endpoint and match what it returned.
    ///
    /// A failed request ends pagination; contracts from earlier pages are still
    /// matched.
    pub fn attempt_endpoint(
        &self,
        endpoint: &ChainEndpoint,
        request: &ChainRequest,
    ) -> EndpointOutcome {
        let path = endpoint.path_for(&request.underlying);
        let mut contracts = Vec::new();
        let mut seen = HashSet::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0;
        let mut failure = None;

        while pages < MAX_CHAIN_PAGES {
            let query = endpoint.query(request, self.config, page_token.as_deref());
            let payload = match self.transport.get_json(&path, &query) {
                Ok(payload) => payload,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            };
            pages += 1;

            for contract in gather_contracts_from_response(&payload) {
                if seen.insert(contract.identity_key()) {
                    contracts.push(contract);
                }
            }

            page_token = continuation_token(&payload);
            if page_token.is_none() {
                break;
            }
        }

        let best = pick_best_match(
            &contracts,
            request.long_strike,
            request.short_strike,
            request.expiration,
            self.config.strike_epsilon,
        );

        match (best, failure) {
            (Some(chain_match), _) => EndpointOutcome::Matched(chain_match),
            (None, Some(e)) => EndpointOutcome::TransportError(e),
            (None, None) => EndpointOutcome::NoMatch {
                pages,
                contracts: contracts.len(),
            },
        }
    }
}

/// Every contract-shaped object in `payload`, deduplicated
pub fn gather_contracts_from_response(payload: &Value) -> Vec<NormalizedContract> {
    let mut seen = HashSet::new();
    let mut contracts = Vec::new();

    walk(payload, |node, key_hint| match contract_from_node(node, key_hint) {
        Some(contract) => {
            if seen.insert(contract.identity_key()) {
                contracts.push(contract);
            }
            Visit::Consumed
        }
        None => Visit::Descend,
    });

    contracts
}

/// Quotes keyed by canonical symbol, from any quote or snapshot payload
pub fn collect_quotes_by_symbol(payload: &Value) -> HashMap<String, NormalizedQuote> {
    let mut quotes = HashMap::new();

    walk(payload, |node, key_hint| {
        let symbol = first_text(node, SYMBOL_ALIASES).or_else(|| key_hint.map(str::to_string));
        match (symbol, normalize_quote(node)) {
            (Some(symbol), Some(quote)) => {
                quotes.entry(sanitize_option_symbol(&symbol)).or_insert(quote);
                Visit::Consumed
            }
            _ => Visit::Descend,
        }
    });

    quotes
}

/// Contract-shaped test: a symbol (field or OCC map key), a strike (field or
/// derived from the symbol) and at least one price-like key.
pub fn contract_from_node(node: &Value, key_hint: Option<&str>) -> Option<NormalizedContract> {
    let object = node.as_object()?;
    let has_price_key = QUOTE_FIELD_ALIASES
        .iter()
        .flat_map(|(_, aliases)| aliases.iter())
        .chain(QUOTE_CONTAINER_KEYS.iter())
        .chain(EXTRA_PRICE_KEYS.iter())
        .any(|key| object.contains_key(*key));
    if !has_price_key {
        return None;
    }

    let raw_symbol = first_text(node, SYMBOL_ALIASES).or_else(|| key_hint.map(str::to_string))?;
    let symbol = sanitize_option_symbol(&raw_symbol);
    if symbol.is_empty() {
        return None;
    }
    let occ = parse_occ_option_symbol(&symbol);

    let strike = first_finite(node, STRIKE_ALIASES)
        .or_else(|| occ.as_ref().map(|o| o.strike))
        .filter(|strike| *strike > 0.0)?;

    let expiration = first_text(node, EXPIRATION_ALIASES)
        .and_then(|raw| normalize_expiration_input(&raw).ok())
        .or_else(|| occ.as_ref().map(|o| o.expiration))?;

    let type_field = first_text(node, TYPE_ALIASES);
    let option_type = option_type_from_symbol_or_field(&symbol, type_field.as_deref());

    Some(NormalizedContract {
        symbol,
        strike,
        expiration,
        option_type,
        quote: normalize_quote(node),
    })
}

/// Earliest expiration holding both strikes.
///
/// Puts are ignored. Within a slot a priced contract replaces an unpriced one.
pub fn pick_best_match(
    contracts: &[NormalizedContract],
    long_strike: f64,
    short_strike: f64,
    expiration: Option<NaiveDate>,
    epsilon: f64,
) -> Option<ChainMatch> {
    #[derive(Default)]
    struct Bucket<'c> {
        long: Option<&'c NormalizedContract>,
        short: Option<&'c NormalizedContract>,
    }

    fn fill<'c>(slot: &mut Option<&'c NormalizedContract>, contract: &'c NormalizedContract) {
        let replace = match slot {
            None => true,
            Some(existing) => !existing.has_quote() && contract.has_quote(),
        };
        if replace {
            *slot = Some(contract);
        }
    }

    let mut buckets: BTreeMap<NaiveDate, Bucket<'_>> = BTreeMap::new();

    for contract in contracts {
        if contract.option_type == Some(OptionType::Put) {
            continue;
        }
        if expiration.is_some_and(|wanted| wanted != contract.expiration) {
            continue;
        }

        let bucket = buckets.entry(contract.expiration).or_default();
        if approx_equal(contract.strike, long_strike, epsilon) {
            fill(&mut bucket.long, contract);
        }
        if approx_equal(contract.strike, short_strike, epsilon) {
            fill(&mut bucket.short, contract);
        }
    }

    buckets.into_iter().find_map(|(expiration, bucket)| {
        Some(ChainMatch {
            expiration,
            long: bucket.long?.clone(),
            short: bucket.short?.clone(),
        })
    })
}

/// Continuation token, if the payload has one
pub fn continuation_token(payload: &Value) -> Option<String> {
    first_text(payload, PAGE_TOKEN_ALIASES)
}

/// First alias holding a non-empty string or a number, as text
fn first_text(node: &Value, aliases: &[&str]) -> Option<String> {
    let object = node.as_object()?;
    aliases.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

enum Visit {
    Descend,
    Consumed,
}

/// Depth-first walk over object nodes. Children of a map are tagged with their
/// key when the key is an OCC symbol.
fn walk<'a, F>(payload: &'a Value, mut visit: F)
where
    F: FnMut(&'a Value, Option<&'a str>) -> Visit,
{
    let mut stack: Vec<(&'a Value, Option<&'a str>, usize)> = vec![(payload, None, 0)];
    let mut visited = 0usize;

    while let Some((node, key_hint, depth)) = stack.pop() {
        visited += 1;
        if visited > MAX_TRAVERSAL_NODES {
            tracing::warn!("Payload walk stopped after {} nodes", MAX_TRAVERSAL_NODES);
            break;
        }

        let child_depth = depth + 1;
        match node {
            Value::Object(map) => {
                if let Visit::Consumed = visit(node, key_hint) {
                    continue;
                }
                if child_depth > MAX_TRAVERSAL_DEPTH {
                    continue;
                }
                for (key, child) in map.iter().rev() {
                    if child.is_object() || child.is_array() {
                        let hint = parse_occ_option_symbol(key).map(|_| key.as_str());
                        stack.push((child, hint, child_depth));
                    }
                }
            }
            Value::Array(items) => {
                if child_depth > MAX_TRAVERSAL_DEPTH {
                    continue;
                }
                for child in items.iter().rev() {
                    if child.is_object() || child.is_array() {
                        stack.push((child, None, child_depth));
                    }
                }
            }
            _ => {}
        }
    }
}
