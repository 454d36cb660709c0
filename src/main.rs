use std::error::Error;

use completion_client::telemetry;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when one is present.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    tracing_subscriber::registry()
        .with(telemetry::env_filter("info", Level::DEBUG))
        .with(telemetry::layer())
        .try_init()?;

    api::start().await?;

    Ok(())
}
