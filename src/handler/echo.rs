//! Echo responder
//!
//! GET and POST answer with `{"path": "<request target>"}`, HEAD answers with
//! the same status and headers but no body, and any other verb gets a 501.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// JSON payload describing the requested path
#[derive(Debug, Serialize)]
pub struct EchoBody<'a> {
    pub path: &'a str,
}

/// Main entry point for HTTP request handling
///
/// `raw_target` is the request-target copied off the request line; without
/// it the parsed URI is echoed, which loses any `#fragment`. The request
/// body is never read, so a POST payload has no effect on the reply.
pub fn handle_request<B>(
    req: &Request<B>,
    raw_target: Option<&str>,
    state: &Arc<AppState>,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let target = raw_target.map_or_else(|| req.uri().to_string(), ToString::to_string);
    let response = respond(req.method(), &target, &state.config.http.server_name);

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::from_request(req, &peer_addr);
        entry.request_uri = target;
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    response
}

/// Build the reply for `method` on `target`, the request target as received
pub fn respond(method: &Method, target: &str, server_name: &str) -> Response<Full<Bytes>> {
    match *method {
        Method::GET | Method::POST => http::build_json_response(encode_body(target), server_name),
        Method::HEAD => http::build_json_response(Bytes::new(), server_name),
        _ => {
            logger::log_unsupported_method(method);
            http::build_501_response(method, server_name)
        }
    }
}

/// Serialize the echo body for `path`
///
/// Writing into a `Vec` cannot fail, so the error arm only logs.
pub fn encode_body(path: &str) -> Bytes {
    http::json::to_body(&EchoBody { path }).map_or_else(
        |e| {
            logger::log_error(&format!("Failed to serialize echo body: {e}"));
            Bytes::new()
        },
        Bytes::from,
    )
}
