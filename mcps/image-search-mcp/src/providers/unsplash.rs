//! Unsplash provider
//!
//! Implements the ImageProvider trait against the Unsplash photo search API.
//! See: https://unsplash.com/documentation#search-photos

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::ImageProvider;
use crate::config::UnsplashConfig;
use crate::error::SearchError;
use crate::types::{CaptionKind, ImageResult, Query, PAGE_SIZE};

/// Unsplash provider
pub struct UnsplashProvider {
    client: Client,
    config: UnsplashConfig,
}

impl UnsplashProvider {
    pub fn new(config: UnsplashConfig, client: Client) -> Self {
        Self { client, config }
    }
}

// Unsplash API response types
//
// Every field is optional and photos are decoded one at a time: a photo with
// a missing `urls` or a null user name still becomes a card.
#[derive(Debug, Deserialize)]
struct UnsplashResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UnsplashPhoto {
    urls: Option<UnsplashUrls>,
    alt_description: Option<String>,
    description: Option<String>,
    user: Option<UnsplashUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UnsplashUrls {
    small: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UnsplashUser {
    name: Option<String>,
    links: Option<UnsplashUserLinks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UnsplashUserLinks {
    html: Option<String>,
}

impl UnsplashPhoto {
    fn decode(index: usize, raw: Value) -> Self {
        serde_json::from_value(raw).unwrap_or_else(|e| {
            tracing::warn!(index, "Malformed Unsplash photo: {}", e);
            Self::default()
        })
    }
}

impl From<UnsplashPhoto> for ImageResult {
    fn from(photo: UnsplashPhoto) -> Self {
        // alt_description is null on plenty of photos
        let caption = photo
            .alt_description
            .or(photo.description)
            .unwrap_or_default();
        let user = photo.user.unwrap_or_default();

        ImageResult {
            image_url: photo.urls.and_then(|u| u.small).unwrap_or_default(),
            caption,
            caption_kind: CaptionKind::Description,
            photographer_name: user.name.unwrap_or_default(),
            photographer_link: user.links.and_then(|l| l.html),
            likes: None,
            downloads: None,
        }
    }
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    fn name(&self) -> &str {
        "unsplash"
    }

    fn is_available(&self) -> bool {
        !self.config.access_key.is_empty()
    }

    fn request_url(&self, query: &Query) -> Result<Url, SearchError> {
        if !self.is_available() {
            return Err(SearchError::MissingCredentials {
                provider: "unsplash",
                env_var: "UNSPLASH_ACCESS_KEY",
            });
        }

        let mut url = Url::parse(&self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("query", query.as_str())
            .append_pair("client_id", &self.config.access_key)
            .append_pair("per_page", &PAGE_SIZE.to_string());
        Ok(url)
    }

    fn parse_results(&self, body: &str) -> Option<Vec<ImageResult>> {
        let response: UnsplashResponse = serde_json::from_str(body).ok()?;
        let results = response.results.unwrap_or_default();
        Some(
            results
                .into_iter()
                .enumerate()
                .map(|(i, raw)| ImageResult::from(UnsplashPhoto::decode(i, raw)))
                .collect(),
        )
    }

    async fn search(&self, query: &Query) -> Result<Vec<ImageResult>, SearchError> {
        super::execute(self, &self.client, query).await
    }
}
