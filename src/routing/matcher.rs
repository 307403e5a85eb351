//! Route table and request matching
//!
//! Routes are registered once at startup and then shared read-only. For a
//! given method every route is tried and the most specific match wins, so
//! registration order only matters between patterns of identical shape.

use std::collections::HashMap;

use hyper::Method;

use super::params::PathParams;
use super::pattern::{decode_path, RoutePattern, Specificity};
use crate::error::{ConfigError, RouteError};
use crate::logger;

struct Route<H> {
    pattern: RoutePattern,
    rank: Vec<Specificity>,
    handler: H,
}

/// Successful match: the bound handler plus its path parameters
#[derive(Debug)]
pub struct RouteMatch<'r, H> {
    pub handler: &'r H,
    pub params: PathParams,
    pub pattern: &'r str,
}

/// Method-indexed route table
pub struct Router<H> {
    routes: HashMap<Method, Vec<Route<H>>>,
    ambiguities: Vec<(String, String)>,
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            ambiguities: Vec::new(),
        }
    }

    /// Register a route.
    ///
    /// Rejects malformed patterns and exact duplicates. A pattern with the
    /// same shape as an existing one (differing only in parameter names) is
    /// accepted with a warning and never wins: the earlier route takes
    /// every path both could match.
    pub fn register(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), ConfigError> {
        let pattern = RoutePattern::parse(pattern)?;
        let routes = self.routes.entry(method.clone()).or_default();

        for existing in routes.iter() {
            if existing.pattern.segments() == pattern.segments() {
                return Err(ConfigError::DuplicateRoute {
                    method: method.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
            if existing.pattern.same_shape(&pattern) {
                logger::log_warning(&format!(
                    "Ambiguous routes {method} {} and {}; the first registered wins",
                    existing.pattern.as_str(),
                    pattern.as_str()
                ));
                self.ambiguities
                    .push((existing.pattern.as_str().to_string(), pattern.as_str().to_string()));
            }
        }

        let rank = pattern.specificity();
        routes.push(Route {
            pattern,
            rank,
            handler,
        });
        Ok(())
    }

    /// Shorthand for `register(Method::GET, ..)`
    pub fn get(&mut self, pattern: &str, handler: H) -> Result<(), ConfigError> {
        self.register(Method::GET, pattern, handler)
    }

    /// Find the most specific route for `method` and `path`
    pub fn match_route(&self, method: &Method, path: &str) -> Result<RouteMatch<'_, H>, RouteError> {
        let not_found = || RouteError::NotFound {
            method: method.to_string(),
            path: path.to_string(),
        };

        let routes = self.routes.get(method).ok_or_else(not_found)?;
        let segments = decode_path(path).map_err(|_| RouteError::InvalidEncoding(path.to_string()))?;

        let mut best: Option<(&Route<H>, PathParams)> = None;
        for route in routes {
            let Some(params) = route.pattern.matches(&segments) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((current, _)) => route.rank > current.rank,
            };
            if better {
                best = Some((route, params));
            }
        }

        best.map(|(route, params)| RouteMatch {
            handler: &route.handler,
            params,
            pattern: route.pattern.as_str(),
        })
        .ok_or_else(not_found)
    }

    /// Pairs of same-shape patterns warned about at registration, earlier
    /// pattern first
    pub fn ambiguities(&self) -> &[(String, String)] {
        &self.ambiguities
    }

    /// Number of registered routes across all methods
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
