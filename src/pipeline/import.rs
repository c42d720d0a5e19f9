use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info};

use crate::models::{Category, ImportOutcome, ProductEntry, ProductFields, ProductListing};
use crate::processor::{SpecExtractor, classify, extract_brand};

use super::{EntryStore, Pacer, ProductSearch};

/// Imports Rakuten listings into the CMS: one search call, then for each
/// listing in returned order derive attributes, create the entry and
/// publish it. Strictly sequential; one listing's failure never aborts
/// the batch.
pub struct ImportPipeline<'a> {
    search: &'a dyn ProductSearch,
    store: &'a dyn EntryStore,
    pacer: &'a dyn Pacer,
    spec_extractor: SpecExtractor,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(
        search: &'a dyn ProductSearch,
        store: &'a dyn EntryStore,
        pacer: &'a dyn Pacer,
    ) -> Result<Self> {
        Ok(ImportPipeline {
            search,
            store,
            pacer,
            spec_extractor: SpecExtractor::new()?,
        })
    }

    /// A failed search aborts the run; everything after that is
    /// best-effort and tallied into the outcome.
    pub async fn run(&self, category: Category, limit: u32) -> Result<ImportOutcome> {
        info!(
            "🔍 Fetching up to {} listings for category {}",
            limit,
            category.label()
        );

        let listings = self
            .search
            .search_by_category(category, limit)
            .await
            .context("failed to fetch listings from Rakuten")?;

        info!("✅ Fetched {} listings", listings.len());

        let mut outcome = ImportOutcome::default();

        for (index, listing) in listings.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, listings.len(), listing.item_name);

            match self.import_listing(listing).await {
                Ok(entry) => {
                    info!(
                        "  ✅ Created and published {} (category: {}, ¥{})",
                        entry.id, entry.fields.category, entry.fields.price
                    );
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    error!("  ❌ Failed to import '{}': {:#}", listing.item_name, e);
                    outcome.failed += 1;
                }
            }

            // Unconditional, including after the last listing.
            self.pacer.pause().await;
        }

        info!(
            "📊 Import result: {} succeeded, {} failed",
            outcome.succeeded, outcome.failed
        );

        Ok(outcome)
    }

    async fn import_listing(&self, listing: &ProductListing) -> Result<ProductEntry> {
        let fields = self.build_entry_fields(listing);
        let entry = self.store.create_entry(&fields).await?;
        self.store.publish(&entry).await
    }

    /// The category is always re-derived from the title; the search
    /// keyword's category and the title's category can diverge.
    fn build_entry_fields(&self, listing: &ProductListing) -> ProductFields {
        let category = classify(&listing.item_name);

        ProductFields {
            title: listing.item_name.clone(),
            slug: format!("{}-{}", category.slug(), listing.item_code),
            category: category.label().to_string(),
            brand: extract_brand(&listing.item_name).to_string(),
            price: listing.item_price,
            rakuten_url: listing.affiliate_url.clone(),
            specs: self.spec_extractor.extract(&listing.item_name),
            rating: listing.review_average.clamp(0.0, 5.0).round() as u8,
            published_date: Utc::now().to_rfc3339(),
            review_content: None,
        }
    }
}
