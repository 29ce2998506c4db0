//! pathecho: a dummy HTTP server
//!
//! Answers GET and POST with `{"path": "<request path>"}`, HEAD with the same
//! headers and an empty body. Connections are served one at a time on a
//! single-threaded runtime.
//!
//! Usage: `pathecho [port]` (defaults to 80)

use clap::Parser;
use std::process::ExitCode;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

use config::{CliArgs, Config};
use error::ServerError;
use server::Server;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pathecho: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServerError> {
    let cli = CliArgs::parse();
    let cfg = Config::load(&cli)?;
    logger::init(&cfg)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    let server = Server::bind(&cfg)?;
    logger::log_server_start(&server.local_addr()?, &cfg);

    server.serve_forever().await;
    Ok(())
}
