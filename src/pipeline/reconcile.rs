use anyhow::{Context, Result};
use tracing::{error, info};

use crate::models::{Category, EntryQuery, ProductEntry, ReconcileOutcome};
use crate::processor::classify;

use super::{EntryStore, Pacer};

/// Re-derives the category of every stored product entry from its title
/// and rewrites the entries whose stored label differs. Classification is
/// pure, so a second run over unchanged titles updates nothing.
pub struct ReconcilePipeline<'a> {
    store: &'a dyn EntryStore,
    pacer: &'a dyn Pacer,
}

impl<'a> ReconcilePipeline<'a> {
    pub fn new(store: &'a dyn EntryStore, pacer: &'a dyn Pacer) -> Self {
        ReconcilePipeline { store, pacer }
    }

    pub async fn run(&self) -> Result<ReconcileOutcome> {
        let entries = self
            .store
            .get_entries(&EntryQuery::default())
            .await
            .context("failed to fetch product entries")?;

        info!("📦 Checking {} product entries", entries.len());

        let mut outcome = ReconcileOutcome::default();

        for entry in entries {
            let detected = classify(&entry.fields.title);

            if entry.fields.category == detected.label() {
                info!(
                    "✓ {} (category: {}) - unchanged",
                    entry.fields.title, entry.fields.category
                );
                outcome.unchanged += 1;
                continue;
            }

            info!(
                "📝 {}: {} → {}",
                entry.fields.title, entry.fields.category, detected.label()
            );

            match self.rewrite_category(entry.clone(), detected).await {
                Ok(()) => {
                    info!("  ✅ Updated and republished");
                    outcome.updated += 1;
                }
                Err(e) => {
                    error!("  ❌ Failed to update '{}': {:#}", entry.fields.title, e);
                }
            }

            // Writes are paced; unchanged entries cost no delay.
            self.pacer.pause().await;
        }

        info!(
            "📊 Reconciliation result: {} updated, {} unchanged",
            outcome.updated, outcome.unchanged
        );

        Ok(outcome)
    }

    async fn rewrite_category(&self, mut entry: ProductEntry, category: Category) -> Result<()> {
        entry.fields.category = category.label().to_string();
        let updated = self.store.update_entry(&entry).await?;
        self.store.publish(&updated).await?;
        Ok(())
    }
}
