use anyhow::Result;
use std::time::Duration;
use tracing::info;

use gadget_review_pipeline::config::ContentfulConfig;
use gadget_review_pipeline::pipeline::{FixedDelay, ReconcilePipeline};
use gadget_review_pipeline::storage::ContentfulStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = ContentfulConfig::from_env()?;

    info!("🔧 Reconciling stored product categories");

    let store = ContentfulStore::new(&config)?;
    let pacer = FixedDelay::new(Duration::from_secs(1));

    let outcome = ReconcilePipeline::new(&store, &pacer).run().await?;

    info!(
        "✨ Reconciliation complete: {} updated, {} unchanged",
        outcome.updated, outcome.unchanged
    );

    Ok(())
}
