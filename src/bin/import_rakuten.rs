use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

use gadget_review_pipeline::config::{ContentfulConfig, RakutenConfig};
use gadget_review_pipeline::fetcher::RakutenFetcher;
use gadget_review_pipeline::models::Category;
use gadget_review_pipeline::pipeline::{FixedDelay, ImportPipeline};
use gadget_review_pipeline::storage::ContentfulStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    let category = match arg_value(&args, "--category") {
        Some(raw) => Category::from_arg(&raw)
            .with_context(|| format!("unknown category: {} (try e.g. wireless-earphones)", raw))?,
        None => {
            let picked = Category::random_importable();
            warn!(
                "No --category given, picked {} at random",
                picked.label()
            );
            picked
        }
    };

    let limit = arg_value(&args, "--limit")
        .map(|v| v.parse::<u32>())
        .transpose()
        .context("--limit must be an integer")?
        .unwrap_or(5);

    let contentful_config = ContentfulConfig::from_env()?;
    let rakuten_config = RakutenConfig::from_env()?;

    info!(
        "🚀 Importing Rakuten listings: category={} limit={}",
        category.label(),
        limit
    );

    let fetcher = RakutenFetcher::new(rakuten_config)?;
    let store = ContentfulStore::new(&contentful_config)?;
    let pacer = FixedDelay::new(Duration::from_secs(1));

    let pipeline = ImportPipeline::new(&fetcher, &store, &pacer)?;
    let outcome = pipeline.run(category, limit).await?;

    info!(
        "✨ Import complete: {} succeeded, {} failed",
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
