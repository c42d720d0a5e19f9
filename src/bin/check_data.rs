use anyhow::Result;
use tracing::{info, warn};

use gadget_review_pipeline::config::DeliveryConfig;
use gadget_review_pipeline::storage::DeliveryClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = DeliveryConfig::from_env()?;

    info!("🔍 Checking Contentful data (space: {})", config.space_id);

    let client = DeliveryClient::new(&config)?;
    let (total, items) = client.product_overview(100).await?;

    info!("📦 Published products: {}", total);

    if total == 0 {
        warn!("⚠️ No products found");
        return Ok(());
    }

    info!("Latest products:");
    for item in items.iter().take(5) {
        info!("- {}", item.title);
        info!("  ID: {}", item.id);
        info!("  Created: {}", item.created_at);
    }

    Ok(())
}
