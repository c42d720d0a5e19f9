use anyhow::{Result, anyhow};
use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;
use wreq::Client;

use crate::config::RakutenConfig;
use crate::models::{Category, ProductListing};
use crate::pipeline::ProductSearch;

const SEARCH_URL: &str =
    "https://app.rakuten.co.jp/services/api/IchibaItem/Search/20170706";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sort by review count, descending.
pub const SORT_REVIEW_COUNT: &str = "-reviewCount";
/// Sort by review average, descending.
pub const SORT_REVIEW_AVERAGE: &str = "-reviewAverage";

#[derive(Debug, Clone, Default)]
pub struct SearchParams<'a> {
    pub keyword: &'a str,
    pub limit: u32,
    pub sort: &'a str,
    pub genre_id: Option<&'a str>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

/// Rakuten Ichiba item-search client.
pub struct RakutenFetcher {
    client: Client,
    config: RakutenConfig,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Items", default)]
    items: Vec<ProductListing>,
}

impl RakutenFetcher {
    pub fn new(config: RakutenConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(RakutenFetcher { client, config })
    }

    /// One search call. An empty result set is an empty Vec, not an error.
    pub async fn search(&self, params: &SearchParams<'_>) -> Result<Vec<ProductListing>> {
        let url = self.build_search_url(params);
        info!("Searching Rakuten: keyword={}", params.keyword);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Rakuten API error: HTTP {}", response.status()));
        }

        let data: SearchResponse = response.json().await?;
        Ok(normalize_listings(data.items))
    }

    pub async fn search_by_category(
        &self,
        category: Category,
        limit: u32,
    ) -> Result<Vec<ProductListing>> {
        self.search(&SearchParams {
            keyword: category.search_keyword(),
            limit,
            sort: SORT_REVIEW_COUNT,
            genre_id: category.genre_id(),
            ..Default::default()
        })
        .await
    }

    /// Most-reviewed items for a keyword.
    pub async fn popular(&self, keyword: &str, limit: u32) -> Result<Vec<ProductListing>> {
        self.search(&SearchParams {
            keyword,
            limit,
            sort: SORT_REVIEW_COUNT,
            ..Default::default()
        })
        .await
    }

    /// Best-rated items for a keyword.
    pub async fn high_rated(&self, keyword: &str, limit: u32) -> Result<Vec<ProductListing>> {
        self.search(&SearchParams {
            keyword,
            limit,
            sort: SORT_REVIEW_AVERAGE,
            ..Default::default()
        })
        .await
    }

    /// Best-rated items for a keyword within a price band.
    pub async fn search_price_range(
        &self,
        keyword: &str,
        min_price: u64,
        max_price: u64,
        limit: u32,
    ) -> Result<Vec<ProductListing>> {
        self.search(&SearchParams {
            keyword,
            limit,
            sort: SORT_REVIEW_AVERAGE,
            min_price: Some(min_price),
            max_price: Some(max_price),
            ..Default::default()
        })
        .await
    }

    fn build_search_url(&self, params: &SearchParams<'_>) -> String {
        let mut url = format!(
            "{}?applicationId={}&format=json&formatVersion=2&keyword={}&hits={}&sort={}",
            SEARCH_URL,
            self.config.app_id,
            utf8_percent_encode(params.keyword, NON_ALPHANUMERIC),
            params.limit,
            utf8_percent_encode(params.sort, NON_ALPHANUMERIC),
        );

        if let Some(genre_id) = params.genre_id {
            url.push_str(&format!("&genreId={}", genre_id));
        }
        if let Some(min_price) = params.min_price {
            url.push_str(&format!("&minPrice={}", min_price));
        }
        if let Some(max_price) = params.max_price {
            url.push_str(&format!("&maxPrice={}", max_price));
        }

        url
    }
}

/// Listings without an affiliate link fall back to the plain item URL.
fn normalize_listings(mut listings: Vec<ProductListing>) -> Vec<ProductListing> {
    for listing in &mut listings {
        if listing.affiliate_url.is_empty() {
            listing.affiliate_url = listing.item_url.clone();
        }
    }
    listings
}

#[async_trait]
impl ProductSearch for RakutenFetcher {
    async fn search_by_category(
        &self,
        category: Category,
        limit: u32,
    ) -> Result<Vec<ProductListing>> {
        RakutenFetcher::search_by_category(self, category, limit).await
    }
}
