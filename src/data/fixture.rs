//! Canned-response transport for tests

use std::cell::RefCell;

use serde_json::Value;

use super::http::MarketDataTransport;
use crate::core::{SpreadError, SpreadResult};

/// One request as seen by the fixture
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

enum Response {
    Json(Value),
    Status(u16),
}

struct Route {
    path: String,
    query: Vec<(String, String)>,
    response: Response,
}

/// Routes are matched in registration order; a route matches when the path is
/// equal and every query pair it names is present. Unmatched requests get 404.
#[derive(Default)]
pub struct FixtureTransport {
    routes: Vec<Route>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, path: &str, body: Value) -> Self {
        self.json_when(path, &[], body)
    }

    pub fn json_when(mut self, path: &str, query: &[(&str, &str)], body: Value) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            query: owned(query),
            response: Response::Json(body),
        });
        self
    }

    pub fn status(self, path: &str, status: u16) -> Self {
        self.status_when(path, &[], status)
    }

    pub fn status_when(mut self, path: &str, query: &[(&str, &str)], status: u16) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            query: owned(query),
            response: Response::Status(status),
        });
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.path == path)
            .cloned()
            .collect()
    }
}

impl MarketDataTransport for FixtureTransport {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> SpreadResult<Value> {
        let call = RecordedCall {
            path: path.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        };

        let route = self.routes.iter().find(|route| {
            route.path == path
                && route
                    .query
                    .iter()
                    .all(|(k, v)| call.param(k) == Some(v.as_str()))
        });
        self.calls.borrow_mut().push(call);

        match route.map(|r| &r.response) {
            Some(Response::Json(body)) => Ok(body.clone()),
            Some(Response::Status(status)) => Err(SpreadError::Request {
                url: path.to_string(),
                status: *status,
            }),
            None => Err(SpreadError::Request {
                url: path.to_string(),
                status: 404,
            }),
        }
    }
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
