//! Terminal output region
//!
//! Terminals are append-only, so "replacing" the region means starting a
//! fresh block below the previous one.

use colored::Colorize;
use std::io::Write;
use std::sync::Mutex;

use super::Renderer;
use crate::types::{ImageResult, MessageKind};

/// Card/message printer over any writer (stdout in the CLI)
pub struct TerminalRenderer<W: Write + Send> {
    out: Mutex<W>,
    color: bool,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_block(&self, block: &str) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = out.write_all(block.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }

    fn card(&self, index: usize, result: &ImageResult) -> String {
        let mut lines = Vec::new();

        let header = format!("[{}] {}", index + 1, result.photographer_name);
        lines.push(if self.color {
            header.bold().to_string()
        } else {
            header
        });

        if let Some(link) = &result.photographer_link {
            lines.push(format!("    profile:   {}", link));
        }
        if !result.image_url.is_empty() {
            lines.push(format!("    image:     {}", result.image_url));
        }
        if !result.caption.is_empty() {
            let label = format!("{}:", result.caption_kind.label().to_lowercase());
            lines.push(format!("    {:<10} {}", label, result.caption));
        }
        if let Some(likes) = result.likes {
            lines.push(format!("    likes:     {}", likes));
        }
        if let Some(downloads) = result.downloads {
            lines.push(format!("    downloads: {}", downloads));
        }

        lines.join("\n") + "\n"
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render_results(&self, results: &[ImageResult]) {
        let block: String = results
            .iter()
            .enumerate()
            .map(|(i, r)| self.card(i, r))
            .collect::<Vec<_>>()
            .join("\n");
        self.write_block(&format!("\n{}", block));
    }

    fn render_message(&self, message: &str, kind: MessageKind) {
        let line = match (kind, self.color) {
            (MessageKind::Error, true) => format!("error: {}", message).red().bold().to_string(),
            (MessageKind::Error, false) => format!("error: {}", message),
            (MessageKind::Loading, true) => message.dimmed().to_string(),
            (MessageKind::Loading, false) | (MessageKind::Info, _) => message.to_string(),
        };
        self.write_block(&format!("{}\n", line));
    }
}
