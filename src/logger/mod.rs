//! Logger module
//!
//! Provides logging utilities for the echo server including:
//! - Diagnostic logging through `tracing`
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - File-based access logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. `RUST_LOG` takes
/// precedence over `logging.level`.
pub fn init(config: &Config) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if config.logging.access_log {
        writer::init(config.logging.access_log_file.as_deref())?;
    }
    Ok(())
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    info!(
        address = %addr,
        server_name = %config.http.server_name,
        access_log = config.logging.access_log,
        access_log_format = %config.logging.access_log_format,
        "Starting httpd..."
    );
    if let Some(ref path) = config.logging.access_log_file {
        info!(path = %path, "Access log file");
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    debug!(peer = %peer_addr, "Connection accepted");
}

pub fn log_accept_error(err: &std::io::Error) {
    error!(error = %err, "Failed to accept connection");
}

pub fn log_connection_error(peer_addr: &SocketAddr, err: &hyper::Error) {
    debug!(peer = %peer_addr, error = %err, "Failed to serve connection");
}

pub fn log_connection_timeout(peer_addr: &SocketAddr, timeout: Duration) {
    warn!(
        peer = %peer_addr,
        timeout_secs = timeout.as_secs(),
        "Connection timed out"
    );
}

pub fn log_unsupported_method(method: &hyper::Method) {
    debug!(%method, "Unsupported method");
}

pub fn log_error(message: &str) {
    error!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    if let Some(writer) = writer::get() {
        writer.write_access(&entry.format(format));
    }
}
