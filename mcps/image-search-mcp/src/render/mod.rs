//! Output region renderers
//!
//! A renderer owns one output region. Every call clears the region and
//! draws exactly one thing: a list of cards or a single status line.

use crate::types::{DisplayState, ImageResult, MessageKind};

pub mod html;
pub mod terminal;

pub use html::HtmlRenderer;
pub use terminal::TerminalRenderer;

/// Trait for output regions
pub trait Renderer: Send + Sync {
    /// Replace the region with one card per result, in order
    fn render_results(&self, results: &[ImageResult]);

    /// Replace the region with a single styled message
    fn render_message(&self, text: &str, kind: MessageKind);
}

/// Draw a display state through a renderer
pub fn render_state(renderer: &dyn Renderer, state: &DisplayState) {
    match state {
        DisplayState::Idle => renderer.render_message(DisplayState::IDLE_MESSAGE, MessageKind::Info),
        DisplayState::Loading => {
            renderer.render_message(DisplayState::LOADING_MESSAGE, MessageKind::Loading)
        }
        DisplayState::Results(results) => renderer.render_results(results),
        DisplayState::Error(message) => renderer.render_message(message, MessageKind::Error),
    }
}
