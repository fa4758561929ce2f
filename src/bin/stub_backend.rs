use anyhow::Result;
use dotenv::dotenv;
use tracing::info;

use emotion_lens::{logging, stub, StubConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init();

    let config = StubConfig::from_env();
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("stub analysis backend listening on {}", listener.local_addr()?);
    axum::serve(listener, stub::router()).await?;

    Ok(())
}
