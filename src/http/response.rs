//! HTTP response building module
//!
//! Provides builders for the responses the echo server emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};

/// Build 200 JSON response
///
/// `Content-Length` always matches the body handed in, so a HEAD response
/// built from an empty body advertises zero bytes.
pub fn build_json_response(body: Bytes, server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Server", server_name)
        .header("Content-Type", "application/json")
        .header("Content-Length", body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 501 Not Implemented response for verbs without a handler
pub fn build_501_response(method: &Method, server_name: &str) -> Response<Full<Bytes>> {
    let body = Bytes::from(format!("Unsupported method ('{method}')"));
    Response::builder()
        .status(StatusCode::NOT_IMPLEMENTED)
        .header("Server", server_name)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("501", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
