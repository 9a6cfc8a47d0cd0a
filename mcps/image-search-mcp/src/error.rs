//! Search error taxonomy
//!
//! Every failure of a search is one of these kinds. None of them escape the
//! controller: each is turned into the message shown in the output region.

/// Generic text for transport failures and anything unclassified
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch image data. Check credentials/network.";

/// Error type for a single search
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Input was empty or whitespace only
    #[error("empty query")]
    EmptyQuery,

    /// Provider answered with a non-success status
    #[error("provider returned HTTP {status}")]
    Http { status: u16 },

    /// Body was not valid JSON, or carried no results
    #[error("no usable results for query {query:?}")]
    ParseOrEmpty { query: String },

    /// Provider has no credential configured
    #[error("{provider} credential missing (set {env_var})")]
    MissingCredentials {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Transport failure or anything else
    #[error("request failed: {0}")]
    NetworkOrUnknown(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry the API credential in their query string
        SearchError::NetworkOrUnknown(err.without_url().to_string())
    }
}

impl From<url::ParseError> for SearchError {
    fn from(err: url::ParseError) -> Self {
        SearchError::NetworkOrUnknown(format!("invalid endpoint: {}", err))
    }
}

impl SearchError {
    /// Text shown to the user in place of results
    pub fn user_message(&self) -> String {
        match self {
            SearchError::EmptyQuery => "Please enter a keyword to search for images.".to_string(),
            SearchError::Http { status } => format!(
                "HTTP error! Status: {}. Check your API credentials or network connection.",
                status
            ),
            SearchError::ParseOrEmpty { query } => {
                format!("No images found for \"{}\". Try a different term.", query)
            }
            SearchError::MissingCredentials { .. } | SearchError::NetworkOrUnknown(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
