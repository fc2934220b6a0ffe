//! Command-line driver: runs a scripted encounter through the runtime.
mod presenter;
mod scenario;

use anyhow::Result;
use hexbound_runtime::{Runtime, RuntimeConfig};

use crate::presenter::LogPresenter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    let bundle = config.load_content()?;
    tracing::info!(
        enemies = bundle.bestiary.len(),
        cards = bundle.deck.len(),
        "content loaded"
    );

    let state = scenario::starting_state(bundle.deck.clone());
    let mut runtime = Runtime::builder()
        .config(config)
        .content(bundle)
        .initial_state(state)
        .presenter(LogPresenter)
        .build()?;

    scenario::run(&mut runtime).await
}
