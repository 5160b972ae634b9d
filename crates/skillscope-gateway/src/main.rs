mod config;
mod protocol;
mod service;

use anyhow::Result;
use config::Config;
use service::GatewayService;

/// With arguments, score them as a single prompt and exit; otherwise serve stdin.
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    let gateway = GatewayService::new(config);

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if prompt.trim().is_empty() {
        gateway.run().await
    } else {
        gateway.run_once(&prompt)
    }
}
