//! # Plain-Text Renderer
//!
//! Lays the document lines out on fixed-length pages.
//!
//! ## Page Layout
//! ```text
//! ┌──────────────────────────────┐
//! │ EliteEV Motors               │  ▲
//! │ Electric Vehicle ...         │  │ page_lines - FOOTER_LINES
//! │ ...                          │  │ document lines
//! │                              │  ▼
//! │                              │  ◄── blank separator
//! │ Page 1 of 2                  │  ◄── footer
//! └──────────────────────────────┘
//!   \x0c (form feed) between pages
//! ```

use tracing::debug;

use configurator_core::QuoteDocument;

use crate::error::{RenderError, RenderResult};
use crate::{QuoteRenderer, RenderedQuote};

/// Lines reserved at the bottom of each page for the footer.
const FOOTER_LINES: usize = 2;

/// Shortest page accepted by [`TextRenderer::new`].
pub const MIN_PAGE_LINES: usize = 10;

/// Page length used by [`TextRenderer::default`].
pub const DEFAULT_PAGE_LINES: usize = 40;

const PAGE_BREAK: &str = "\u{0c}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    page_lines: usize,
}

impl TextRenderer {
    /// Creates a renderer with `page_lines` lines per page, footer included.
    ///
    /// ## Errors
    /// `PageTooShort` below [`MIN_PAGE_LINES`].
    pub fn new(page_lines: usize) -> RenderResult<Self> {
        if page_lines < MIN_PAGE_LINES {
            return Err(RenderError::PageTooShort {
                lines: page_lines,
                min: MIN_PAGE_LINES,
            });
        }
        Ok(TextRenderer { page_lines })
    }

    pub fn page_lines(&self) -> usize {
        self.page_lines
    }

    /// Splits the document into pages, footers included.
    pub fn paginate(&self, document: &QuoteDocument) -> Vec<String> {
        let lines = document.lines();
        let body = self.page_lines - FOOTER_LINES;
        let chunks: Vec<&[String]> = lines.chunks(body).collect();
        let page_count = chunks.len().max(1);

        (0..page_count)
            .map(|index| {
                let mut page = chunks
                    .get(index)
                    .map(|chunk| chunk.join("\n"))
                    .unwrap_or_default();
                page.push_str("\n\n");
                page.push_str(&format!("Page {} of {}\n", index + 1, page_count));
                page
            })
            .collect()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        TextRenderer {
            page_lines: DEFAULT_PAGE_LINES,
        }
    }
}

impl QuoteRenderer for TextRenderer {
    async fn render(&self, document: &QuoteDocument) -> RenderResult<RenderedQuote> {
        let pages = self.paginate(document);

        debug!(
            quote_id = %document.quote_id,
            pages = pages.len(),
            page_lines = self.page_lines,
            "Rendered text quote"
        );

        let text = pages.join(PAGE_BREAK);
        Ok(RenderedQuote {
            content_type: "text/plain; charset=utf-8",
            file_name: format!("{}.txt", document.file_stem()),
            bytes: text.into_bytes(),
        })
    }
}
