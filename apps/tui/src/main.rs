//! # FleaMarket Text Shell
//!
//! Entry point: wires tracing, configuration and the HTTP transport, then
//! hands control to the screen loop.

mod app;
mod menu;

use tracing_subscriber::EnvFilter;

use fleamarket_client::{ClientConfig, ClientResult, HttpStore};

use crate::app::App;

/// Tracing goes to stderr so it never interleaves with the menus on stdout.
/// Default level is `warn`; override with `RUST_LOG`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> ClientResult<()> {
    let config = ClientConfig::from_env()?;
    let store = HttpStore::new(&config)?;
    App::new(store)?.run().await
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}
