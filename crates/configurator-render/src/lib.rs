//! # configurator-render: Quote Document Rendering
//!
//! The rendering collaborator. The core decides what a quote document says
//! ([`QuoteDocument::lines`]); a renderer decides how those lines become
//! bytes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rendering Flow                                   │
//! │                                                                         │
//! │  configurator-core: QuoteDocument::build(catalog, quote, vendor)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               configurator-render (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   QuoteRenderer::render(&doc) ──► RenderedQuote                 │   │
//! │  │        │                           ├── content_type             │   │
//! │  │        ├── TextRenderer            ├── file_name                │   │
//! │  │        │   paged, "Page i of n"    └── bytes                    │   │
//! │  │        ├── JsonRenderer                                         │   │
//! │  │        │   pretty JSON                                          │   │
//! │  │        └── PdfRenderer                                          │   │
//! │  │            A4, headings, "Page i of n"                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CLI writes bytes to <output dir>/<file_name>                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`error`] - Render error types
//! - [`text`] - Paginated plain-text renderer
//! - [`json`] - JSON renderer
//! - [`pdf`] - PDF renderer

pub mod error;
pub mod json;
pub mod pdf;
pub mod text;

pub use error::{RenderError, RenderResult};
pub use json::JsonRenderer;
pub use pdf::PdfRenderer;
pub use text::TextRenderer;

use std::future::Future;

use configurator_core::QuoteDocument;

/// A rendered quote document. Opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuote {
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// Suggested file name, including extension.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Turns a quote document into a downloadable artifact.
pub trait QuoteRenderer: Send + Sync {
    fn render(
        &self,
        document: &QuoteDocument,
    ) -> impl Future<Output = RenderResult<RenderedQuote>> + Send;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use configurator_core::{
        assemble_verified_quote, Catalog, CustomerInfo, QuoteDocument, Selection, VendorProfile,
        TAX_RATE,
    };

    /// Tesla Model 3, long-range battery, optional customer.
    pub fn document(customer: Option<CustomerInfo>) -> QuoteDocument {
        let catalog = Catalog::elite_ev().unwrap();
        let selection = Selection::default_for(&catalog)
            .with_option(&catalog, "battery", "long-range")
            .unwrap();
        let quote = assemble_verified_quote(&catalog, selection, TAX_RATE, customer).unwrap();
        QuoteDocument::build(&catalog, &quote, &VendorProfile::default()).unwrap()
    }
}
