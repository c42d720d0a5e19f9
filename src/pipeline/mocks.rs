//! In-memory collaborator doubles shared by the pipeline tests.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::models::{
    Category, EntryQuery, ProductEntry, ProductFields, ProductListing, ProductSummary,
    review_document,
};

use super::{EntryStore, Pacer, ProductSearch, ReviewGenerator};

pub fn listing(name: &str, code: &str) -> ProductListing {
    ProductListing {
        item_name: name.to_string(),
        item_price: 9800,
        item_code: code.to_string(),
        item_url: format!("https://item.rakuten.co.jp/{}", code),
        affiliate_url: format!("https://hb.afl.rakuten.co.jp/{}", code),
        medium_image_urls: Vec::new(),
        review_average: 4.0,
        review_count: 120,
        shop_name: "テストショップ".to_string(),
        genre_id: "216131".to_string(),
    }
}

/// Search double returning a fixed listing set, or an error.
pub struct FixedSearch {
    listings: Option<Vec<ProductListing>>,
}

impl FixedSearch {
    pub fn with_listings(listings: Vec<ProductListing>) -> Self {
        FixedSearch {
            listings: Some(listings),
        }
    }

    pub fn failing() -> Self {
        FixedSearch { listings: None }
    }
}

#[async_trait]
impl ProductSearch for FixedSearch {
    async fn search_by_category(
        &self,
        _category: Category,
        _limit: u32,
    ) -> Result<Vec<ProductListing>> {
        match &self.listings {
            Some(listings) => Ok(listings.clone()),
            None => Err(anyhow!("simulated search failure")),
        }
    }
}

/// Entry-store double that keeps entries in memory and records every
/// write, with per-title failure injection.
pub struct RecordingStore {
    entries: Mutex<Vec<ProductEntry>>,
    fail_create: Mutex<Vec<String>>,
    fail_update: Mutex<Vec<String>>,
    published: Mutex<Vec<String>>,
    updated: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        RecordingStore {
            entries: Mutex::new(Vec::new()),
            fail_create: Mutex::new(Vec::new()),
            fail_update: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    pub fn fail_create_for(&self, title: &str) {
        self.fail_create.lock().unwrap().push(title.to_string());
    }

    pub fn fail_update_for(&self, title: &str) {
        self.fail_update.lock().unwrap().push(title.to_string());
    }

    pub fn seed_entry(&self, title: &str, category: &str) {
        self.push_entry(title, category, None);
    }

    pub fn seed_reviewed_entry(&self, title: &str, category: &str) {
        self.push_entry(title, category, Some(review_document("既存レビュー")));
    }

    pub fn entries_snapshot(&self) -> Vec<ProductEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn published_titles(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }

    pub fn updated_ids(&self) -> Vec<String> {
        self.updated.lock().unwrap().clone()
    }

    fn push_entry(&self, title: &str, category: &str, review: Option<serde_json::Value>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().push(ProductEntry {
            id: format!("entry-{}", id),
            version: 1,
            fields: ProductFields {
                title: title.to_string(),
                category: category.to_string(),
                review_content: review,
                ..Default::default()
            },
        });
    }
}

#[async_trait]
impl EntryStore for RecordingStore {
    async fn get_entries(&self, query: &EntryQuery) -> Result<Vec<ProductEntry>> {
        let entries = self.entries.lock().unwrap();
        let filtered = entries
            .iter()
            .filter(|e| !query.missing_review || e.fields.review_content.is_none())
            .take(query.limit.unwrap_or(u32::MAX) as usize)
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn create_entry(&self, fields: &ProductFields) -> Result<ProductEntry> {
        if self.fail_create.lock().unwrap().contains(&fields.title) {
            return Err(anyhow!("simulated create failure"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = ProductEntry {
            id: format!("entry-{}", id),
            version: 1,
            fields: fields.clone(),
        };
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, entry: &ProductEntry) -> Result<ProductEntry> {
        if self.fail_update.lock().unwrap().contains(&entry.fields.title) {
            return Err(anyhow!("simulated update failure"));
        }

        let mut entries = self.entries.lock().unwrap();
        let stored = entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| anyhow!("unknown entry: {}", entry.id))?;
        stored.fields = entry.fields.clone();
        stored.version += 1;

        self.updated.lock().unwrap().push(entry.id.clone());
        Ok(stored.clone())
    }

    async fn publish(&self, entry: &ProductEntry) -> Result<ProductEntry> {
        let mut entries = self.entries.lock().unwrap();
        let stored = entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| anyhow!("unknown entry: {}", entry.id))?;
        stored.version += 1;

        self.published
            .lock()
            .unwrap()
            .push(entry.fields.title.clone());
        Ok(stored.clone())
    }
}

/// Zero-delay pacer that only counts how often it was asked to pause.
pub struct CountingPacer {
    count: AtomicUsize,
}

impl CountingPacer {
    pub fn new() -> Self {
        CountingPacer {
            count: AtomicUsize::new(0),
        }
    }

    pub fn pauses(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Generator double returning fixed text, with per-title failure injection.
pub struct StubGenerator {
    text: String,
    fail_titles: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new(text: &str) -> Self {
        StubGenerator {
            text: text.to_string(),
            fail_titles: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_for(&self, title: &str) {
        self.fail_titles.lock().unwrap().push(title.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewGenerator for StubGenerator {
    async fn generate_review(&self, product: &ProductSummary) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_titles.lock().unwrap().contains(&product.title) {
            return Err(anyhow!("simulated generation failure"));
        }
        Ok(self.text.clone())
    }
}
