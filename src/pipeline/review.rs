use anyhow::{Context, Result};
use tracing::{error, info};

use crate::models::{
    EntryQuery, ProductEntry, ProductSummary, ReviewOutcome, review_document,
};

use super::{EntryStore, Pacer, ReviewGenerator};

/// Generates a review article for every product entry that has none yet
/// and publishes it back to the CMS. Generation is slow (minutes per
/// article), so failures are isolated per entry and progress is logged as
/// the run proceeds.
pub struct ReviewPipeline<'a> {
    store: &'a dyn EntryStore,
    generator: &'a dyn ReviewGenerator,
    pacer: &'a dyn Pacer,
}

impl<'a> ReviewPipeline<'a> {
    pub fn new(
        store: &'a dyn EntryStore,
        generator: &'a dyn ReviewGenerator,
        pacer: &'a dyn Pacer,
    ) -> Self {
        ReviewPipeline {
            store,
            generator,
            pacer,
        }
    }

    pub async fn run(&self, limit: u32) -> Result<ReviewOutcome> {
        let query = EntryQuery {
            limit: Some(limit),
            missing_review: true,
        };

        let entries = self
            .store
            .get_entries(&query)
            .await
            .context("failed to fetch entries without review content")?;

        info!("📦 Found {} products without a review", entries.len());

        let mut outcome = ReviewOutcome::default();

        for (index, entry) in entries.iter().enumerate() {
            info!(
                "[{}/{}] {} ({}, ¥{}, {}/5)",
                index + 1,
                entries.len(),
                entry.fields.title,
                entry.fields.category,
                entry.fields.price,
                entry.fields.rating
            );

            match self.write_review(entry).await {
                Ok(chars) => {
                    info!("  ✅ Review generated and published ({} chars)", chars);
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    error!(
                        "  ❌ Failed to generate review for '{}': {:#}",
                        entry.fields.title, e
                    );
                    outcome.failed += 1;
                }
            }

            self.pacer.pause().await;
        }

        info!(
            "📊 Review generation result: {} succeeded, {} failed",
            outcome.succeeded, outcome.failed
        );

        Ok(outcome)
    }

    async fn write_review(&self, entry: &ProductEntry) -> Result<usize> {
        let summary = ProductSummary::from_fields(&entry.fields);
        let text = self.generator.generate_review(&summary).await?;

        let mut entry = entry.clone();
        entry.fields.review_content = Some(review_document(&text));

        let updated = self.store.update_entry(&entry).await?;
        self.store.publish(&updated).await?;

        Ok(text.chars().count())
    }
}
