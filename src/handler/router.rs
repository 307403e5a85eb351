//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body size validation, route
//! matching, handler dispatch and error-to-status mapping.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, IF_NONE_MATCH, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode};

use super::routes::Endpoint;
use super::{content, demo, media};
use crate::config::AppState;
use crate::error::HandlerError;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{PathParams, QueryParams};

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// Raw (still percent-encoded) path
    pub path: String,
    pub query: QueryParams,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub content_length: Option<String>,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            query: QueryParams::parse(req.uri().query()),
            is_head: req.method() == Method::HEAD,
            if_none_match: header_string(req, IF_NONE_MATCH),
            content_length: header_string(req, CONTENT_LENGTH),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let ctx = RequestContext::from_request(&req);
    let response = dispatch(&ctx, &state).await;
    let response = http::with_server_header(response, &state.config.http.server_name);

    if state.access_log {
        let mut entry = AccessLogEntry::new(peer.ip().to_string(), ctx.method.to_string(), ctx.path);
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = format!("{:?}", req.version()).trim_start_matches("HTTP/").to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.referer = header_string(&req, REFERER);
        entry.user_agent = header_string(&req, USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for one request
///
/// HEAD is routed like GET and answered without a body. Paths with no
/// matching route get a 404 before any handler runs.
pub async fn dispatch(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    if ctx.method == Method::OPTIONS {
        return http::build_options_response(state.config.http.enable_cors);
    }

    if let Some(resp) = check_body_size(ctx.content_length.as_deref(), state.config.http.max_body_size) {
        return resp;
    }

    let method = if ctx.is_head { Method::GET } else { ctx.method.clone() };
    let matched = match state.router.match_route(&method, &ctx.path) {
        Ok(matched) => matched,
        Err(e) => {
            logger::log_route_miss(&e);
            if e.status() == StatusCode::NOT_FOUND {
                return http::build_404_response();
            }
            return http::build_error_response(e.status(), &e.to_string());
        }
    };

    let response = match dispatch_endpoint(*matched.handler, &matched.params, ctx, state).await {
        Ok(response) => response,
        Err(e) => {
            logger::log_handler_error(ctx.method.as_str(), &ctx.path, &e);
            error_response(&e)
        }
    };

    if ctx.is_head {
        http::strip_body(response)
    } else {
        response
    }
}

/// Dispatch to specific endpoint handler
async fn dispatch_endpoint(
    endpoint: Endpoint,
    params: &PathParams,
    ctx: &RequestContext,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    match endpoint {
        Endpoint::Greeting => Ok(demo::greeting()),
        Endpoint::Status => content::status(state),
        Endpoint::Gallery => content::gallery(state),
        Endpoint::MediaByName => media::by_name(params, ctx, state).await,
        Endpoint::MediaByQuery => media::by_query(ctx, state).await,
        Endpoint::Content => content::lookup(&ctx.query, state),
        Endpoint::FixedText(text) => Ok(demo::fixed(text)),
        Endpoint::RegionSpeciality => demo::region_speciality(params),
        Endpoint::LocationSpeciality => demo::location_speciality(params),
        Endpoint::StarRating => demo::star_rating(params),
        Endpoint::Search => demo::search(&ctx.query),
        Endpoint::Hello => Ok(demo::hello(params)),
    }
}

fn error_response(error: &HandlerError) -> Response<Full<Bytes>> {
    let status = error.status();
    if status.is_server_error() {
        // Details stay in the log
        let reason = status.canonical_reason().unwrap_or("Internal Server Error");
        return http::build_error_response(status, reason);
    }
    http::build_error_response(status, &error.to_string())
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(content_length: Option<&str>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size_str = content_length?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
