// Review Sentiment Service entry point
// Loads every scoring resource once, then serves the HTTP adapters.

mod config;
mod context;
mod error;
mod logging;
mod sentiment;
mod web;

#[cfg(test)]
mod tests;

use anyhow::Context as _;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::context::AppContext;

const APP_NAME: &str = "sentiment-core";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::init(APP_NAME, config.log_format)?;
    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let context = match AppContext::initialize(&config) {
        Ok(context) => context,
        Err(e) => {
            error!("Startup aborted: {}", e);
            std::process::exit(1);
        }
    };

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, web::router(context))
        .await
        .context("server error")?;
    Ok(())
}
