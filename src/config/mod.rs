use anyhow::{Context, Result};
use std::env;

/// Contentful management-API credentials, used by everything that writes
/// entries. Built once at process start and injected into the store.
#[derive(Debug, Clone)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub management_token: String,
}

impl ContentfulConfig {
    pub fn from_env() -> Result<Self> {
        Ok(ContentfulConfig {
            space_id: require_env("CONTENTFUL_SPACE_ID")?,
            management_token: require_env("CONTENTFUL_MANAGEMENT_TOKEN")?,
        })
    }
}

/// Read-only delivery-API credentials for the data-check script.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub space_id: String,
    pub access_token: String,
}

impl DeliveryConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DeliveryConfig {
            space_id: require_env("CONTENTFUL_SPACE_ID")?,
            access_token: require_env("CONTENTFUL_ACCESS_TOKEN")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RakutenConfig {
    pub app_id: String,
}

impl RakutenConfig {
    pub fn from_env() -> Result<Self> {
        Ok(RakutenConfig {
            app_id: require_env("RAKUTEN_APP_ID")?,
        })
    }
}

/// Local Ollama endpoint. Both values have working defaults, so loading
/// never fails; the env vars only override them.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        OllamaConfig {
            base_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.1:8b".to_string()),
        }
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} is not set in environment variables", name))
}
