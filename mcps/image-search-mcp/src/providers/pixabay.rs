//! Pixabay provider
//!
//! Implements the ImageProvider trait against the Pixabay REST API.
//! See: https://pixabay.com/api/docs/

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::ImageProvider;
use crate::config::PixabayConfig;
use crate::error::SearchError;
use crate::types::{CaptionKind, ImageResult, Query, PAGE_SIZE};

/// Pixabay provider
pub struct PixabayProvider {
    client: Client,
    config: PixabayConfig,
}

impl PixabayProvider {
    pub fn new(config: PixabayConfig, client: Client) -> Self {
        Self { client, config }
    }
}

// Pixabay API response types
//
// Hits are kept as raw JSON and decoded one by one, so a single odd entry
// never takes the rest of the page down with it.
#[derive(Debug, Deserialize)]
struct PixabayResponse {
    #[serde(default)]
    hits: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PixabayHit {
    #[serde(rename = "webformatURL")]
    webformat_url: Option<String>,
    tags: Option<String>,
    user: Option<String>,
    likes: Option<u64>,
    downloads: Option<u64>,
}

impl PixabayHit {
    fn decode(index: usize, raw: Value) -> Self {
        serde_json::from_value(raw).unwrap_or_else(|e| {
            tracing::warn!(index, "Malformed Pixabay hit: {}", e);
            Self::default()
        })
    }
}

/// Normalize "cat,cute , kitten" into "cat, cute, kitten"
fn clean_tags(tags: &str) -> String {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<PixabayHit> for ImageResult {
    fn from(hit: PixabayHit) -> Self {
        ImageResult {
            image_url: hit.webformat_url.unwrap_or_default(),
            caption: clean_tags(hit.tags.as_deref().unwrap_or_default()),
            caption_kind: CaptionKind::Tags,
            photographer_name: hit.user.unwrap_or_default(),
            photographer_link: None,
            likes: hit.likes,
            downloads: hit.downloads,
        }
    }
}

#[async_trait]
impl ImageProvider for PixabayProvider {
    fn name(&self) -> &str {
        "pixabay"
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn request_url(&self, query: &Query) -> Result<Url, SearchError> {
        if !self.is_available() {
            return Err(SearchError::MissingCredentials {
                provider: "pixabay",
                env_var: "PIXABAY_API_KEY",
            });
        }

        let mut url = Url::parse(&self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("key", &self.config.api_key)
            .append_pair("q", query.as_str())
            .append_pair("image_type", "photo")
            .append_pair("per_page", &PAGE_SIZE.to_string());
        Ok(url)
    }

    fn parse_results(&self, body: &str) -> Option<Vec<ImageResult>> {
        let response: PixabayResponse = serde_json::from_str(body).ok()?;
        let hits = response.hits.unwrap_or_default();
        Some(
            hits.into_iter()
                .enumerate()
                .map(|(i, raw)| ImageResult::from(PixabayHit::decode(i, raw)))
                .collect(),
        )
    }

    async fn search(&self, query: &Query) -> Result<Vec<ImageResult>, SearchError> {
        super::execute(self, &self.client, query).await
    }
}
