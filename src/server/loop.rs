// Server loop module
// Owns the listening socket and serves connections one at a time

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use super::listener::create_listener;
use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;

/// A bound echo server
///
/// The listening socket is acquired in [`Server::bind`] and held until the
/// server is dropped.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the configured `host:port`
    ///
    /// Must be called from within a Tokio runtime.
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let addr = config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddress {
                addr: format!("{}:{}", config.server.host, config.server.port),
                source,
            })?;
        let listener =
            create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            listener,
            state: Arc::new(AppState::new(config)),
        })
    }

    /// Address actually bound; resolves port 0 to the assigned port
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept and serve connections until the process is killed.
    ///
    /// Each connection is served to completion before the next one is
    /// accepted. Accept errors are logged and the loop carries on.
    pub async fn serve_forever(&self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    logger::log_connection_accepted(&peer_addr);
                    serve_connection(stream, peer_addr, &self.state).await;
                }
                Err(e) => logger::log_accept_error(&e),
            }
        }
    }
}
