//! Image Search Library
//!
//! Keyword image search against Pixabay or Unsplash, rendered as cards.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use image_search::{providers, Config, HtmlRenderer, SearchController};
//!
//! let config = Config::load()?;
//! let view = Arc::new(HtmlRenderer::new());
//! let controller = SearchController::new(providers::from_config(&config)?, view.clone());
//! controller.submit_search("northern lights").await;
//! println!("{}", view.contents());
//! ```
//!
//! # Configuration
//! Set `PIXABAY_API_KEY` or `UNSPLASH_ACCESS_KEY` (and `IMAGE_SEARCH_PROVIDER`),
//! or configure in `~/.image-search/config.toml`

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod providers;
pub mod render;
pub mod server;
pub mod types;

pub use config::{Config, ProviderKind};
pub use controller::SearchController;
pub use error::SearchError;
pub use render::{HtmlRenderer, Renderer, TerminalRenderer};
pub use server::{ImageSearchMcpServer, ImageSearchParams};
pub use types::{DisplayState, ImageResult, MessageKind, Query};
