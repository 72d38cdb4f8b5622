//! # PDF Renderer
//!
//! The downloadable quote. Same lines as the text renderer, laid out on A4
//! with a heading hierarchy in the built-in Helvetica faces.
//!
//! ## Page Layout
//! ```text
//! ┌──────────────────────────────┐ ▲ MARGIN_MM
//! │ EliteEV Motors        (20pt) │ ◄── Title, bold
//! │ Electric Vehicle ...  (11pt) │
//! │ Quote Date: ...              │
//! │                              │
//! │ Vehicle Configuration (14pt) │ ◄── Heading, bold
//! │ Model: Tesla Model 3         │
//! │ ...                          │
//! │ Total: $59,400        (12pt) │ ◄── Emphasis, bold
//! │                              │
//! │ Page 1 of 1            (9pt) │ ◄── footer band
//! └──────────────────────────────┘ ▼ MARGIN_MM
//! ```

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use tracing::debug;

use configurator_core::QuoteDocument;

use crate::error::{RenderError, RenderResult};
use crate::{QuoteRenderer, RenderedQuote};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Shortest page accepted by [`PdfRenderer::new`].
pub const MIN_PAGE_HEIGHT_MM: f32 = 80.0;

const MARGIN_MM: f32 = 20.0;
const FOOTER_MM: f32 = 10.0;
const FOOTER_PT: f32 = 9.0;
const LINE_SPACING: f32 = 1.4;
const PT_TO_MM: f32 = 0.3528;

/// Typographic role of one document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Emphasis,
    Body,
}

impl LineStyle {
    pub fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 20.0,
            LineStyle::Heading => 14.0,
            LineStyle::Emphasis => 12.0,
            LineStyle::Body => 11.0,
        }
    }

    fn is_bold(self) -> bool {
        !matches!(self, LineStyle::Body)
    }

    fn height_mm(self) -> f32 {
        self.font_size() * PT_TO_MM * LINE_SPACING
    }
}

/// A line placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRenderer {
    width_mm: f32,
    height_mm: f32,
}

impl PdfRenderer {
    /// Creates a renderer for pages of the given size in millimetres.
    ///
    /// ## Errors
    /// `PdfPageTooSmall` below [`MIN_PAGE_HEIGHT_MM`] or with a width that
    /// leaves no room inside the margins.
    pub fn new(width_mm: f32, height_mm: f32) -> RenderResult<Self> {
        let fits = width_mm.is_finite()
            && height_mm.is_finite()
            && width_mm > 2.0 * MARGIN_MM
            && height_mm >= MIN_PAGE_HEIGHT_MM;
        if !fits {
            return Err(RenderError::PdfPageTooSmall {
                width_mm,
                height_mm,
            });
        }
        Ok(PdfRenderer {
            width_mm,
            height_mm,
        })
    }

    /// Assigns each document line a style and splits them into pages.
    ///
    /// Always yields at least one page.
    pub fn layout(&self, document: &QuoteDocument) -> Vec<Vec<PlacedLine>> {
        let usable = self.height_mm - 2.0 * MARGIN_MM - FOOTER_MM;
        let total_line = format!("Total: {}", document.total);

        let mut pages = vec![Vec::new()];
        let mut used = 0.0;

        for (index, text) in document.lines().into_iter().enumerate() {
            let style = match text.as_str() {
                _ if index == 0 => LineStyle::Title,
                "Vehicle Configuration" | "Selected Options:" => LineStyle::Heading,
                t if t == total_line => LineStyle::Emphasis,
                _ => LineStyle::Body,
            };

            let height = style.height_mm();
            if used + height > usable && used > 0.0 {
                pages.push(Vec::new());
                used = 0.0;
            }
            used += height;

            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine { text, style });
            }
        }

        pages
    }
}

impl Default for PdfRenderer {
    /// A4 portrait.
    fn default() -> Self {
        PdfRenderer {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
        }
    }
}

fn pdf_error(err: impl std::fmt::Debug) -> RenderError {
    RenderError::Pdf(format!("{:?}", err))
}

impl QuoteRenderer for PdfRenderer {
    async fn render(&self, document: &QuoteDocument) -> RenderResult<RenderedQuote> {
        let pages = self.layout(document);
        let title = format!("{} Quote {}", document.vendor.name, document.quote_id);

        let (doc, first_page, first_layer) =
            PdfDocument::new(title, Mm(self.width_mm), Mm(self.height_mm), "Quote");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
        for _ in 1..pages.len() {
            let (page, layer) = doc.add_page(Mm(self.width_mm), Mm(self.height_mm), "Quote");
            layers.push(doc.get_page(page).get_layer(layer));
        }

        let page_count = pages.len();
        for (index, (layer, lines)) in layers.iter().zip(&pages).enumerate() {
            self.draw_page(layer, lines, &regular, &bold);
            layer.use_text(
                format!("Page {} of {}", index + 1, page_count),
                FOOTER_PT,
                Mm(MARGIN_MM),
                Mm(MARGIN_MM),
                &regular,
            );
        }

        let bytes = doc.save_to_bytes().map_err(pdf_error)?;

        debug!(
            quote_id = %document.quote_id,
            pages = page_count,
            bytes = bytes.len(),
            "Rendered PDF quote"
        );

        Ok(RenderedQuote {
            content_type: "application/pdf",
            file_name: format!("{}.pdf", document.file_stem()),
            bytes,
        })
    }
}

impl PdfRenderer {
    fn draw_page(
        &self,
        layer: &PdfLayerReference,
        lines: &[PlacedLine],
        regular: &IndirectFontRef,
        bold: &IndirectFontRef,
    ) {
        // y grows upwards from the bottom edge
        let mut y = self.height_mm - MARGIN_MM;
        for line in lines {
            y -= line.style.height_mm();
            if line.text.is_empty() {
                continue;
            }
            let font = if line.style.is_bold() { bold } else { regular };
            layer.use_text(
                line.text.as_str(),
                line.style.font_size(),
                Mm(MARGIN_MM),
                Mm(y),
                font,
            );
        }
    }
}
