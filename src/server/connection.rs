// Connection handling module
// Serves a single TCP connection to completion

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use super::request_line::RequestLineRecorder;
use crate::config::AppState;
use crate::handler;
use crate::logger;

type Response = hyper::Response<Full<Bytes>>;

/// Serve one connection and return once it is closed.
///
/// Keep-alive is disabled, so every connection carries exactly one request
/// and the first line read off the socket is that request's line.
/// When `performance.connection_timeout` is non-zero the whole exchange is
/// bounded by it.
pub async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let (stream, request_line) = RequestLineRecorder::new(stream);
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let service_state = Arc::clone(state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req: Request<Incoming>| {
            let target = request_line.target();
            let response =
                handler::handle_request(&req, target.as_deref(), &service_state, peer_addr);
            async move { Ok::<Response, Infallible>(response) }
        }),
    );

    let timeout_secs = state.config.performance.connection_timeout;
    if timeout_secs == 0 {
        if let Err(err) = conn.await {
            logger::log_connection_error(&peer_addr, &err);
        }
        return;
    }

    let timeout = Duration::from_secs(timeout_secs);
    match tokio::time::timeout(timeout, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&peer_addr, &err),
        Err(_) => logger::log_connection_timeout(&peer_addr, timeout),
    }
}
