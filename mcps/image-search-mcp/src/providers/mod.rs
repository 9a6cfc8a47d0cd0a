//! Image provider implementations
//!
//! This module provides a trait-based abstraction over image-search APIs so
//! the controller and renderers never see a provider's JSON shape.
//! Currently supports Pixabay and Unsplash.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::{Config, ProviderKind};
use crate::error::SearchError;
use crate::types::{ImageResult, Query};

pub mod pixabay;
pub mod unsplash;

pub use pixabay::PixabayProvider;
pub use unsplash::UnsplashProvider;

/// Trait for image providers
///
/// All providers must implement this trait to be selectable by
/// configuration.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Check if this provider has the credential it needs
    fn is_available(&self) -> bool;

    /// Build the GET request URL for a query, credential included
    fn request_url(&self, query: &Query) -> Result<Url, SearchError>;

    /// Map a response body into normalized results
    ///
    /// Returns `None` when the body is not the expected JSON shape. A missing
    /// result array parses as empty.
    fn parse_results(&self, body: &str) -> Option<Vec<ImageResult>>;

    /// Run one search against the provider
    async fn search(&self, query: &Query) -> Result<Vec<ImageResult>, SearchError>;
}

/// Build the HTTP client shared by every provider
pub fn http_client(timeout_seconds: Option<u64>) -> anyhow::Result<Client> {
    let mut builder = Client::builder().user_agent(concat!("image-search/", env!("CARGO_PKG_VERSION")));
    if let Some(secs) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Create the provider selected by configuration
pub fn from_config(config: &Config) -> anyhow::Result<Arc<dyn ImageProvider>> {
    let client = http_client(config.search.timeout_seconds)?;
    let provider: Arc<dyn ImageProvider> = match config.search.provider {
        ProviderKind::Pixabay => Arc::new(PixabayProvider::new(config.pixabay.clone(), client)),
        ProviderKind::Unsplash => Arc::new(UnsplashProvider::new(config.unsplash.clone(), client)),
    };
    Ok(provider)
}

/// Issue the GET and turn the body into results
///
/// This is the only await on external I/O in a search.
pub(crate) async fn execute<P>(
    provider: &P,
    client: &Client,
    query: &Query,
) -> Result<Vec<ImageResult>, SearchError>
where
    P: ImageProvider + ?Sized,
{
    let url = provider.request_url(query)?;

    // The query string carries the credential; only log where we are going
    tracing::debug!(
        provider = provider.name(),
        host = url.host_str().unwrap_or_default(),
        path = url.path(),
        "Sending image search request"
    );

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        tracing::warn!(provider = provider.name(), %status, "Provider returned error status");
        return Err(SearchError::Http {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;

    match provider.parse_results(&body) {
        Some(results) if !results.is_empty() => Ok(results),
        Some(_) => Err(SearchError::ParseOrEmpty {
            query: query.to_string(),
        }),
        None => {
            tracing::warn!(provider = provider.name(), "Response body did not parse");
            Err(SearchError::ParseOrEmpty {
                query: query.to_string(),
            })
        }
    }
}
