use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

use gadget_review_pipeline::config::{ContentfulConfig, OllamaConfig};
use gadget_review_pipeline::generator::OllamaGenerator;
use gadget_review_pipeline::pipeline::{FixedDelay, ReviewPipeline};
use gadget_review_pipeline::storage::ContentfulStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    let limit = arg_value(&args, "--limit")
        .map(|v| v.parse::<u32>())
        .transpose()
        .context("--limit must be an integer")?
        .unwrap_or(5);

    if arg_value(&args, "--product-id").is_some() {
        warn!("--product-id is not supported yet and will be ignored");
    }

    let contentful_config = ContentfulConfig::from_env()?;
    let ollama_config = OllamaConfig::from_env();

    info!("🤖 Generating reviews for up to {} products", limit);

    let store = ContentfulStore::new(&contentful_config)?;
    let generator = OllamaGenerator::new(ollama_config)?;
    let pacer = FixedDelay::new(Duration::from_secs(2));

    let pipeline = ReviewPipeline::new(&store, &generator, &pacer);
    let outcome = pipeline.run(limit).await?;

    info!(
        "✨ Review generation complete: {} succeeded, {} failed",
        outcome.succeeded, outcome.failed
    );

    Ok(())
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
