// behavior-bridge - CDP debugging for behavior-protocol runtimes
//
// Frontend on stdio, runtime over TCP

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod bridge;
mod config;
mod logging;
mod transport;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config.log);

    info!("Starting behavior bridge...");
    bridge::run(&config).await?;
    info!("Behavior bridge shutting down");

    Ok(())
}
