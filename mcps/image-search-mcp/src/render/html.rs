//! HTML output region
//!
//! Keeps the rendered markup of the results container in memory. All
//! provider and user text is escaped before it reaches the markup.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::sync::Mutex;

use super::Renderer;
use crate::types::{CaptionKind, ImageResult, MessageKind};

const STYLE: &str = "\
body{font-family:sans-serif;margin:2rem;background:#f4f4f9}\
#results-container{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:1rem}\
.image-card{background:#fff;border-radius:8px;overflow:hidden;box-shadow:0 2px 6px rgba(0,0,0,.1)}\
.image-card img{width:100%;height:180px;object-fit:cover}\
.image-info{padding:.75rem}\
.data-field{display:flex;justify-content:space-between;margin:.25rem 0}\
.caption{color:#666;font-size:.85rem}\
.initial-message{color:#555}\
.error-message{color:#c0392b;font-weight:bold}";

/// In-memory HTML results container
#[derive(Default)]
pub struct HtmlRenderer {
    region: Mutex<String>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup of the results container
    pub fn contents(&self) -> String {
        self.region
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Standalone page wrapping the current results container
    pub fn document(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n\
             <h1>{}</h1>\n<div id=\"results-container\">\n{}</div>\n</body>\n</html>\n",
            text(title),
            STYLE,
            text(title),
            self.contents()
        )
    }

    fn replace(&self, markup: String) {
        *self
            .region
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = markup;
    }
}

fn data_field(label: &str, value: &str) -> String {
    format!(
        "    <div class=\"data-field\"><span>{}:</span> <strong>{}</strong></div>",
        label, value
    )
}

fn card(result: &ImageResult) -> String {
    let mut lines = vec!["<div class=\"image-card\">".to_string()];
    if !result.image_url.is_empty() {
        lines.push(format!(
            "  <img src=\"{}\" alt=\"{}\">",
            attr(&result.image_url),
            attr(&result.caption)
        ));
    }
    lines.push("  <div class=\"image-info\">".to_string());

    let photographer = match &result.photographer_link {
        Some(link) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            attr(link),
            text(&result.photographer_name)
        ),
        None => text(&result.photographer_name).into_owned(),
    };
    lines.push(data_field("Photographer", &photographer));

    if let Some(likes) = result.likes {
        lines.push(data_field("Likes", &likes.to_string()));
    }
    if let Some(downloads) = result.downloads {
        lines.push(data_field("Downloads", &downloads.to_string()));
    }
    if !result.caption.is_empty() {
        lines.push(format!(
            "    <p class=\"caption\">{}: {}</p>",
            result.caption_kind.label(),
            text(&result.caption)
        ));
    }

    lines.push("  </div>".to_string());
    lines.push("</div>".to_string());

    let mut html = lines.join("\n");
    html.push('\n');
    html
}

impl Renderer for HtmlRenderer {
    fn render_results(&self, results: &[ImageResult]) {
        let markup: String = results.iter().map(card).collect();
        self.replace(markup);
    }

    fn render_message(&self, message: &str, kind: MessageKind) {
        let class = match kind {
            MessageKind::Error => "error-message",
            MessageKind::Info | MessageKind::Loading => "initial-message",
        };
        self.replace(format!("<p class=\"{}\">{}</p>\n", class, text(message)));
    }
}
