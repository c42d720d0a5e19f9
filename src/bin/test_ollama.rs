use anyhow::{Context, Result};
use tracing::info;

use gadget_review_pipeline::config::OllamaConfig;
use gadget_review_pipeline::generator::OllamaGenerator;
use gadget_review_pipeline::models::{ProductSummary, SpecMap};
use gadget_review_pipeline::pipeline::ReviewGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = OllamaConfig::from_env();
    let generator = OllamaGenerator::new(config)?;

    info!("🔍 Testing Ollama connection");

    generator.probe().await.context(
        "Ollama is not reachable; check that the service is running and the model is pulled",
    )?;

    info!("✅ Ollama connection OK");
    info!("🤖 Generating a demo review (this can take several minutes)");

    let mut specs = SpecMap::new();
    specs.insert("ノイズキャンセリング".to_string(), "あり".to_string());
    specs.insert("防水".to_string(), "IPX4".to_string());
    specs.insert("接続".to_string(), "Bluetooth 5.3".to_string());

    let demo_product = ProductSummary {
        title: "AirPods Pro（第2世代）".to_string(),
        category: "ワイヤレスイヤホン".to_string(),
        price: 39800,
        brand: "Apple".to_string(),
        specs,
        rating: 5,
    };

    let review = generator.generate_review(&demo_product).await?;

    println!("{}", "=".repeat(80));
    println!("{}", review);
    println!("{}", "=".repeat(80));

    info!("✨ Demo complete ({} chars)", review.chars().count());

    Ok(())
}
