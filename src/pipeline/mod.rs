use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    Category, EntryQuery, ProductEntry, ProductFields, ProductListing, ProductSummary,
};

pub mod import;
pub mod pacing;
pub mod reconcile;
pub mod review;

#[cfg(test)]
pub(crate) mod mocks;

pub use import::ImportPipeline;
pub use pacing::{FixedDelay, Pacer};
pub use reconcile::ReconcilePipeline;
pub use review::ReviewPipeline;

/// Product-search collaborator (Rakuten in production).
#[async_trait]
pub trait ProductSearch: Send + Sync {
    async fn search_by_category(
        &self,
        category: Category,
        limit: u32,
    ) -> Result<Vec<ProductListing>>;
}

/// CMS entry collaborator (Contentful management API in production).
/// Writes are versioned; callers must hand back the entry they last read.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn get_entries(&self, query: &EntryQuery) -> Result<Vec<ProductEntry>>;
    async fn create_entry(&self, fields: &ProductFields) -> Result<ProductEntry>;
    async fn update_entry(&self, entry: &ProductEntry) -> Result<ProductEntry>;
    async fn publish(&self, entry: &ProductEntry) -> Result<ProductEntry>;
}

/// Review-text collaborator (local Ollama model in production). A single
/// call may take minutes; failures carry a human-readable message.
#[async_trait]
pub trait ReviewGenerator: Send + Sync {
    async fn generate_review(&self, product: &ProductSummary) -> Result<String>;
}
