use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Extracted product attributes keyed by spec name. Keys are present only
/// when the attribute was detected in the title; absence means unknown.
pub type SpecMap = HashMap<String, String>;

/// One product listing as returned by the Rakuten item search API
/// (formatVersion 2). Externally owned, never mutated by the pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListing {
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(rename = "itemPrice")]
    pub item_price: u64,
    #[serde(rename = "itemCode")]
    pub item_code: String,
    #[serde(rename = "itemUrl", default)]
    pub item_url: String,
    #[serde(rename = "affiliateUrl", default)]
    pub affiliate_url: String,
    #[serde(rename = "mediumImageUrls", default)]
    pub medium_image_urls: Vec<String>,
    #[serde(rename = "reviewAverage", default)]
    pub review_average: f64,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
    #[serde(rename = "shopName", default)]
    pub shop_name: String,
    #[serde(rename = "genreId", default)]
    pub genre_id: String,
}

/// CMS-resident product record. `id` and `version` come from the entry's
/// sys object; every write must carry the version it is based on.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEntry {
    pub id: String,
    pub version: u64,
    pub fields: ProductFields,
}

/// The single-locale field set of a product entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub brand: String,
    pub price: u64,
    pub rakuten_url: String,
    pub specs: SpecMap,
    pub rating: u8,
    pub published_date: String,
    pub review_content: Option<Value>,
}

/// Product summary handed to the review generator.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub title: String,
    pub category: String,
    pub price: u64,
    pub brand: String,
    pub specs: SpecMap,
    pub rating: u8,
}

impl ProductSummary {
    pub fn from_fields(fields: &ProductFields) -> Self {
        ProductSummary {
            title: fields.title.clone(),
            category: fields.category.clone(),
            price: fields.price,
            brand: fields.brand.clone(),
            specs: fields.specs.clone(),
            rating: fields.rating,
        }
    }
}

/// Entry listing filter passed to the CMS collaborator.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    pub limit: Option<u32>,
    /// Only entries that have no review content yet.
    pub missing_review: bool,
}

/// Result tally of one import run. Partial success is normal, not an error.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub succeeded: u32,
    pub failed: u32,
}

/// Result tally of one reconciliation run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub updated: u32,
    pub unchanged: u32,
}

/// Result tally of one review-generation run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub succeeded: u32,
    pub failed: u32,
}

/// Wraps generated review text into a one-paragraph Contentful rich-text
/// document, the shape the `reviewContent` field expects.
pub fn review_document(text: &str) -> Value {
    json!({
        "nodeType": "document",
        "data": {},
        "content": [
            {
                "nodeType": "paragraph",
                "data": {},
                "content": [
                    {
                        "nodeType": "text",
                        "value": text,
                        "marks": [],
                        "data": {},
                    }
                ],
            }
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_document_shape() {
        let doc = review_document("とても良い製品です。");

        assert_eq!(doc["nodeType"], "document");
        assert_eq!(doc["content"][0]["nodeType"], "paragraph");
        assert_eq!(doc["content"][0]["content"][0]["nodeType"], "text");
        assert_eq!(
            doc["content"][0]["content"][0]["value"],
            "とても良い製品です。"
        );
    }

    #[test]
    fn test_summary_from_fields() {
        let mut specs = SpecMap::new();
        specs.insert("接続".to_string(), "Bluetooth 5.3".to_string());

        let fields = ProductFields {
            title: "AirPods Pro（第2世代）".to_string(),
            category: "ワイヤレスイヤホン".to_string(),
            brand: "Apple".to_string(),
            price: 39800,
            rating: 5,
            specs: specs.clone(),
            ..Default::default()
        };

        let summary = ProductSummary::from_fields(&fields);
        assert_eq!(summary.title, fields.title);
        assert_eq!(summary.price, 39800);
        assert_eq!(summary.specs, specs);
    }
}
