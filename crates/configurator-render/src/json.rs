//! # JSON Renderer
//!
//! Emits the whole [`QuoteDocument`] as pretty-printed JSON, for clients that
//! lay out the document themselves.

use tracing::debug;

use configurator_core::QuoteDocument;

use crate::error::RenderResult;
use crate::{QuoteRenderer, RenderedQuote};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl QuoteRenderer for JsonRenderer {
    async fn render(&self, document: &QuoteDocument) -> RenderResult<RenderedQuote> {
        let mut bytes = serde_json::to_vec_pretty(document)?;
        bytes.push(b'\n');

        debug!(quote_id = %document.quote_id, size = bytes.len(), "Rendered JSON quote");

        Ok(RenderedQuote {
            content_type: "application/json",
            file_name: format!("{}.json", document.file_stem()),
            bytes,
        })
    }
}
