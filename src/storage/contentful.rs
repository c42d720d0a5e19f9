use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::time::Duration;
use tracing::info;
use wreq::Client;

use crate::config::{ContentfulConfig, DeliveryConfig};
use crate::models::{EntryQuery, ProductEntry, ProductFields, SpecMap};
use crate::pipeline::EntryStore;

const MANAGEMENT_API: &str = "https://api.contentful.com";
const DELIVERY_API: &str = "https://cdn.contentful.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The single locale every field is written under.
const LOCALE: &str = "en-US";

pub const PRODUCT_CONTENT_TYPE: &str = "product";

/// Contentful management-API client. The CMS owns all persisted entry
/// state; this client reads and writes it but never caches across calls.
pub struct ContentfulStore {
    client: Client,
    base_url: String,
    token: String,
}

impl ContentfulStore {
    pub fn new(config: &ContentfulConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(ContentfulStore {
            client,
            base_url: format!(
                "{}/spaces/{}/environments/master",
                MANAGEMENT_API, config.space_id
            ),
            token: config.management_token.clone(),
        })
    }

    fn entries_url(&self, query: &EntryQuery) -> String {
        let mut url = format!(
            "{}/entries?content_type={}",
            self.base_url, PRODUCT_CONTENT_TYPE
        );
        if let Some(limit) = query.limit {
            url.push_str(&format!("&limit={}", limit));
        }
        if query.missing_review {
            url.push_str("&fields.reviewContent[exists]=false");
        }
        url
    }

    async fn parse_entry_response(response: wreq::Response) -> Result<ProductEntry> {
        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            return Err(anyhow!("Contentful API error: HTTP {}: {}", status, body));
        }
        entry_from_json(&body)
    }
}

#[async_trait]
impl EntryStore for ContentfulStore {
    async fn get_entries(&self, query: &EntryQuery) -> Result<Vec<ProductEntry>> {
        let response = self
            .client
            .get(&self.entries_url(query))
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Contentful API error: HTTP {}",
                response.status()
            ));
        }

        let body: Value = response.json().await?;
        let items = body
            .get("items")
            .and_then(|i| i.as_array())
            .context("entry listing response has no items array")?;

        items.iter().map(entry_from_json).collect()
    }

    async fn create_entry(&self, fields: &ProductFields) -> Result<ProductEntry> {
        let response = self
            .client
            .post(&format!("{}/entries", self.base_url))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("X-Contentful-Content-Type", PRODUCT_CONTENT_TYPE)
            .header(
                "Content-Type",
                "application/vnd.contentful.management.v1+json",
            )
            .json(&json!({ "fields": fields_to_json(fields) }))
            .send()
            .await?;

        let entry = Self::parse_entry_response(response).await?;
        info!("Created entry {} ({})", entry.id, entry.fields.slug);
        Ok(entry)
    }

    async fn update_entry(&self, entry: &ProductEntry) -> Result<ProductEntry> {
        let response = self
            .client
            .put(&format!("{}/entries/{}", self.base_url, entry.id))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("X-Contentful-Version", entry.version.to_string())
            .header(
                "Content-Type",
                "application/vnd.contentful.management.v1+json",
            )
            .json(&json!({ "fields": fields_to_json(&entry.fields) }))
            .send()
            .await?;

        Self::parse_entry_response(response).await
    }

    async fn publish(&self, entry: &ProductEntry) -> Result<ProductEntry> {
        let response = self
            .client
            .put(&format!("{}/entries/{}/published", self.base_url, entry.id))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("X-Contentful-Version", entry.version.to_string())
            .send()
            .await?;

        Self::parse_entry_response(response).await
    }
}

/// Serializes domain fields into the per-locale wire shape. reviewContent
/// is written only when present so the delivery-side "exists" filter keeps
/// working.
fn fields_to_json(fields: &ProductFields) -> Value {
    let mut map = Map::new();
    map.insert("title".to_string(), localized(json!(fields.title)));
    map.insert("slug".to_string(), localized(json!(fields.slug)));
    map.insert("category".to_string(), localized(json!(fields.category)));
    map.insert("brand".to_string(), localized(json!(fields.brand)));
    map.insert("price".to_string(), localized(json!(fields.price)));
    map.insert(
        "rakutenUrl".to_string(),
        localized(json!(fields.rakuten_url)),
    );
    map.insert("specs".to_string(), localized(json!(fields.specs)));
    map.insert("rating".to_string(), localized(json!(fields.rating)));
    map.insert(
        "publishedDate".to_string(),
        localized(json!(fields.published_date)),
    );
    if let Some(review) = &fields.review_content {
        map.insert("reviewContent".to_string(), localized(review.clone()));
    }
    Value::Object(map)
}

fn localized(value: Value) -> Value {
    json!({ LOCALE: value })
}

fn entry_from_json(entry: &Value) -> Result<ProductEntry> {
    let sys = entry.get("sys").context("entry has no sys object")?;
    let id = sys
        .get("id")
        .and_then(|v| v.as_str())
        .context("entry sys has no id")?
        .to_string();
    let version = sys
        .get("version")
        .and_then(|v| v.as_u64())
        .context("entry sys has no version")?;

    let fields = entry.get("fields").cloned().unwrap_or_else(|| json!({}));

    let specs: SpecMap = field_value(&fields, "specs")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    Ok(ProductEntry {
        id,
        version,
        fields: ProductFields {
            title: field_str(&fields, "title"),
            slug: field_str(&fields, "slug"),
            category: field_str(&fields, "category"),
            brand: field_str(&fields, "brand"),
            price: field_value(&fields, "price")
                .and_then(|v| v.as_u64())
                .unwrap_or(0),
            rakuten_url: field_str(&fields, "rakutenUrl"),
            specs,
            rating: field_value(&fields, "rating")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u8,
            published_date: field_str(&fields, "publishedDate"),
            review_content: field_value(&fields, "reviewContent").cloned(),
        },
    })
}

fn field_value<'a>(fields: &'a Value, name: &str) -> Option<&'a Value> {
    fields.get(name).and_then(|v| v.get(LOCALE))
}

fn field_str(fields: &Value, name: &str) -> String {
    field_value(fields, name)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// One row of the delivery-API overview used by the data-check script.
#[derive(Debug, Clone)]
pub struct DeliveryItem {
    pub id: String,
    pub title: String,
    pub created_at: String,
}

/// Read-only delivery-API client. Unlike the management API, delivery
/// responses resolve the locale, so fields arrive as plain values.
pub struct DeliveryClient {
    client: Client,
    base_url: String,
    token: String,
}

impl DeliveryClient {
    pub fn new(config: &DeliveryConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(DeliveryClient {
            client,
            base_url: format!("{}/spaces/{}", DELIVERY_API, config.space_id),
            token: config.access_token.clone(),
        })
    }

    /// Returns the total published-product count and the fetched items.
    pub async fn product_overview(&self, limit: u32) -> Result<(u64, Vec<DeliveryItem>)> {
        let url = format!(
            "{}/entries?content_type={}&limit={}",
            self.base_url, PRODUCT_CONTENT_TYPE, limit
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Contentful delivery API error: HTTP {}",
                response.status()
            ));
        }

        let body: Value = response.json().await?;
        let total = body.get("total").and_then(|v| v.as_u64()).unwrap_or(0);

        let items = body
            .get("items")
            .and_then(|i| i.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|item| DeliveryItem {
                        id: item["sys"]["id"].as_str().unwrap_or_default().to_string(),
                        title: item["fields"]["title"]
                            .as_str()
                            .unwrap_or_default()
                            .to_string(),
                        created_at: item["sys"]["createdAt"]
                            .as_str()
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok((total, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review_document;

    fn sample_fields() -> ProductFields {
        let mut specs = SpecMap::new();
        specs.insert("接続".to_string(), "Bluetooth 5.3".to_string());

        ProductFields {
            title: "Anker Soundcore ワイヤレスイヤホン".to_string(),
            slug: "wireless-earphones-anker:10001".to_string(),
            category: "ワイヤレスイヤホン".to_string(),
            brand: "Anker".to_string(),
            price: 4990,
            rakuten_url: "https://hb.afl.rakuten.co.jp/abc".to_string(),
            specs,
            rating: 4,
            published_date: "2024-06-01T00:00:00+00:00".to_string(),
            review_content: None,
        }
    }

    #[test]
    fn test_fields_are_locale_wrapped() {
        let json = fields_to_json(&sample_fields());

        assert_eq!(json["title"][LOCALE], "Anker Soundcore ワイヤレスイヤホン");
        assert_eq!(json["price"][LOCALE], 4990);
        assert_eq!(json["rating"][LOCALE], 4);
        assert_eq!(json["specs"][LOCALE]["接続"], "Bluetooth 5.3");
    }

    #[test]
    fn test_absent_review_content_is_omitted() {
        let json = fields_to_json(&sample_fields());
        assert!(json.get("reviewContent").is_none());

        let mut fields = sample_fields();
        fields.review_content = Some(review_document("本文"));
        let json = fields_to_json(&fields);
        assert_eq!(json["reviewContent"][LOCALE]["nodeType"], "document");
    }

    #[test]
    fn test_entry_round_trips_through_wire_shape() {
        let fields = sample_fields();
        let wire = json!({
            "sys": { "id": "abc123", "version": 7 },
            "fields": fields_to_json(&fields),
        });

        let entry = entry_from_json(&wire).unwrap();
        assert_eq!(entry.id, "abc123");
        assert_eq!(entry.version, 7);
        assert_eq!(entry.fields, fields);
    }

    #[test]
    fn test_partial_entries_parse_with_defaults() {
        let wire = json!({
            "sys": { "id": "abc123", "version": 1 },
            "fields": { "title": { "en-US": "タイトルのみ" } },
        });

        let entry = entry_from_json(&wire).unwrap();
        assert_eq!(entry.fields.title, "タイトルのみ");
        assert_eq!(entry.fields.price, 0);
        assert!(entry.fields.specs.is_empty());
        assert!(entry.fields.review_content.is_none());
    }

    #[test]
    fn test_entry_without_sys_is_rejected() {
        assert!(entry_from_json(&json!({ "fields": {} })).is_err());
    }

    #[test]
    fn test_entries_url_applies_query() {
        let store = ContentfulStore::new(&ContentfulConfig {
            space_id: "space1".to_string(),
            management_token: "token".to_string(),
        })
        .unwrap();

        let plain = store.entries_url(&EntryQuery::default());
        assert_eq!(
            plain,
            "https://api.contentful.com/spaces/space1/environments/master/entries?content_type=product"
        );

        let filtered = store.entries_url(&EntryQuery {
            limit: Some(5),
            missing_review: true,
        });
        assert!(filtered.contains("&limit=5"));
        assert!(filtered.contains("&fields.reviewContent[exists]=false"));
    }
}
