//! Common types for image search
//!
//! Provider-independent view of a search: the validated query, the
//! normalized result each provider maps into, and the single display
//! state the renderers consume.

use serde::Serialize;

use crate::error::SearchError;

/// Number of results requested from every provider
pub const PAGE_SIZE: u32 = 12;

/// A validated, trimmed, non-empty search keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim raw user input and reject it if nothing is left
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a provider's caption text is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionKind {
    /// Comma-separated keywords
    Tags,
    /// Free-text alt text or description
    Description,
}

impl CaptionKind {
    /// Label shown before the caption on a card
    pub fn label(&self) -> &'static str {
        match self {
            CaptionKind::Tags => "Tags",
            CaptionKind::Description => "Description",
        }
    }
}

/// A single image, normalized across providers
///
/// Providers fill in the subset of fields their payload carries; absent
/// fields are left out of the rendered card. An empty `image_url` means the
/// provider entry had no usable image link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageResult {
    /// URL of the displayable image
    pub image_url: String,
    /// Tags or alt text
    pub caption: String,
    /// How to label `caption`
    pub caption_kind: CaptionKind,
    /// Photographer display name
    pub photographer_name: String,
    /// Photographer profile page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photographer_link: Option<String>,
    /// Number of likes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// Number of downloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
}

/// Visual treatment of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Loading,
    Error,
}

/// What the output region currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum DisplayState {
    Idle,
    Loading,
    Results(Vec<ImageResult>),
    Error(String),
}

impl DisplayState {
    pub const IDLE_MESSAGE: &'static str = "Enter a search keyword above to fetch images!";
    pub const LOADING_MESSAGE: &'static str = "Searching...";

    /// Build the terminal state for a failed search
    pub fn from_error(err: &SearchError) -> Self {
        DisplayState::Error(err.user_message())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }
}
