//! # Render Error Types

use thiserror::Error;

/// Quote rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer was configured with a page too short for a footer.
    ///
    /// ## When This Occurs
    /// - `TextRenderer::new` with fewer than the minimum lines per page
    /// - `CONFIGURATOR_PAGE_LINES` set too low
    #[error("Page length must be at least {min} lines, got {lines}")]
    PageTooShort { lines: usize, min: usize },

    /// The PDF page cannot hold the margins and a title line.
    #[error("PDF page {width_mm}x{height_mm} mm is too small")]
    PdfPageTooSmall { width_mm: f32, height_mm: f32 },

    /// The PDF writer failed.
    #[error("Failed to write PDF: {0}")]
    Pdf(String),

    /// Serializing the document failed.
    #[error("Failed to encode quote document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
