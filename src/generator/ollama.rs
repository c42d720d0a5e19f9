use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;
use wreq::Client;

use crate::config::OllamaConfig;
use crate::models::ProductSummary;
use crate::pipeline::ReviewGenerator;

/// Article generation regularly takes minutes on local hardware.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(300);
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a local Ollama instance serving the review model.
pub struct OllamaGenerator {
    client: Client,
    config: OllamaConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaGenerator {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder().timeout(GENERATE_TIMEOUT).build()?;
        Ok(OllamaGenerator { client, config })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url)
    }

    async fn generate(&self, client: &Client, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": 0.7,
                "top_p": 0.9,
            },
        });

        let response = client
            .post(&self.generate_url())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("AI記事生成に失敗しました")?;

        if !response.status().is_success() {
            return Err(anyhow!("Ollama API error: HTTP {}", response.status()));
        }

        let data: GenerateResponse = response.json().await?;
        Ok(data.response)
    }

    /// Short connection check with a trivial prompt.
    pub async fn probe(&self) -> Result<()> {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        let text = self.generate(&client, "こんにちは").await?;
        if text.is_empty() {
            return Err(anyhow!("Ollama responded with empty output"));
        }
        info!("Ollama connection OK (model: {})", self.config.model);
        Ok(())
    }
}

#[async_trait]
impl ReviewGenerator for OllamaGenerator {
    async fn generate_review(&self, product: &ProductSummary) -> Result<String> {
        let prompt = build_review_prompt(product);
        self.generate(&self.client, &prompt).await
    }
}

fn build_review_prompt(product: &ProductSummary) -> String {
    let specs = serde_json::to_string_pretty(&product.specs).unwrap_or_else(|_| "{}".to_string());

    format!(
        "あなたはガジェットレビューの専門家です。\n\
        以下の商品について、SEOに最適化された2000文字のレビュー記事を日本語で作成してください。\n\
        \n\
        商品名: {title}\n\
        ブランド: {brand}\n\
        カテゴリー: {category}\n\
        価格: ¥{price}\n\
        評価: {rating}/5\n\
        スペック: {specs}\n\
        \n\
        記事構成:\n\
        1. 導入（100文字）- 読者の興味を引く\n\
        2. 商品概要（300文字）- 基本情報とターゲットユーザー\n\
        3. 主な特徴（500文字）- 3-5つの主要機能を詳しく解説\n\
        4. メリット（400文字）- 実際の使用感を含めた利点\n\
        5. デメリット・注意点（300文字）- 正直な評価\n\
        6. おすすめユーザー（200文字）- どんな人に向いているか\n\
        7. まとめ（200文字）- 総合評価と購入判断のポイント\n\
        \n\
        重要なポイント:\n\
        - SEOキーワード「{title}」「レビュー」「口コミ」「評価」を自然に含める\n\
        - 具体的な数値やスペックを活用する\n\
        - 読者の悩みを解決する視点で書く\n\
        - 売り込みではなく、客観的な評価を心がける\n\
        \n\
        それでは記事を作成してください:",
        title = product.title,
        brand = product.brand,
        category = product.category,
        price = product.price,
        rating = product.rating,
        specs = specs,
    )
}
