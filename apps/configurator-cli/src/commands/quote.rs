//! # Quote Commands
//!
//! Turning the session's selection into a stored, rendered quote.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         export_quote                                    │
//! │                                                                         │
//! │  1. generate_quote ─────────────────────────────────────────────────►   │
//! │     • snapshot the session selection                                    │
//! │     • assemble_verified_quote (prices it again, UUID, timestamp)        │
//! │     • store.save(quote)          quote is complete before this          │
//! │                                                                         │
//! │  2. render_quote ───────────────────────────────────────────────────►   │
//! │     • QuoteDocument::build(catalog, quote, vendor)                      │
//! │     • renderer.render(&document)                                        │
//! │                                                                         │
//! │  3. write_quote ────────────────────────────────────────────────────►   │
//! │     • <output_dir>/<Model_Name>_quote_<date>_<id8>.<ext>                │
//! │     • never overwrites an existing file                                 │
//! │                                                                         │
//! │  A failure at step 2 or 3 leaves the saved quote in the store.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use configurator_core::{
    assemble_verified_quote, CustomerInfo, Money, Quote, QuoteDocument, QuoteId,
};
use configurator_render::{JsonRenderer, PdfRenderer, QuoteRenderer, RenderedQuote, TextRenderer};
use configurator_store::QuoteStore;

use crate::cli::OutputFormat;
use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, SessionState};

/// Result of exporting a quote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote_id: QuoteId,
    pub total: Money,
    pub content_type: String,
    pub path: PathBuf,
}

/// One line of a quote listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub id: QuoteId,
    pub model_id: String,
    pub total: Money,
    pub customer_name: Option<String>,
    /// RFC 3339
    pub created_at: String,
}

impl From<&Quote> for QuoteSummary {
    fn from(quote: &Quote) -> Self {
        QuoteSummary {
            id: quote.id().clone(),
            model_id: quote.selection().model_id().to_string(),
            total: quote.breakdown().total,
            customer_name: quote.customer().map(|c| c.name.clone()),
            created_at: quote.created_at().to_rfc3339(),
        }
    }
}

/// Builds customer details from optional flags.
///
/// No flags means no customer. Any flag means all three are required.
pub fn customer_from_parts(
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<Option<CustomerInfo>, ApiError> {
    if name.is_none() && email.is_none() && phone.is_none() {
        return Ok(None);
    }

    let customer = CustomerInfo::new(
        name.unwrap_or_default(),
        email.unwrap_or_default(),
        phone.unwrap_or_default(),
    )?;
    Ok(Some(customer))
}

/// Assembles a quote from the current selection and saves it.
pub async fn generate_quote<S: QuoteStore>(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    store: &S,
    customer: Option<CustomerInfo>,
) -> Result<Quote, ApiError> {
    let selection = session.selection();
    debug!(model_id = %selection.model_id(), "generate_quote command");

    let quote = assemble_verified_quote(catalog, selection, config.tax_rate, customer)?;
    store.save(quote.clone()).await?;

    info!(
        quote_id = %quote.id(),
        total = %quote.breakdown().total,
        "Quote generated"
    );
    Ok(quote)
}

/// Renders a quote's document.
pub async fn render_quote<R: QuoteRenderer>(
    catalog: &CatalogState,
    config: &ConfigState,
    quote: &Quote,
    renderer: &R,
) -> Result<RenderedQuote, ApiError> {
    let document = QuoteDocument::build(catalog, quote, &config.vendor)?;
    Ok(renderer.render(&document).await?)
}

/// Writes a rendered quote into `dir`, creating it if needed.
///
/// ## Errors
/// `IoError` if a file of that name already exists.
pub async fn write_quote(dir: &Path, rendered: &RenderedQuote) -> Result<PathBuf, ApiError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&rendered.file_name);

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await?;
    file.write_all(&rendered.bytes).await?;
    file.flush().await?;

    info!(path = %path.display(), bytes = rendered.bytes.len(), "Quote written");
    Ok(path)
}

/// Generates, renders and writes a quote into the configured output
/// directory.
pub async fn export_quote<S: QuoteStore, R: QuoteRenderer>(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    store: &S,
    renderer: &R,
    customer: Option<CustomerInfo>,
) -> Result<QuoteResponse, ApiError> {
    let quote = generate_quote(catalog, session, config, store, customer).await?;
    let rendered = render_quote(catalog, config, &quote, renderer).await?;
    let path = write_quote(&config.output_dir, &rendered).await?;

    Ok(QuoteResponse {
        quote_id: quote.id().clone(),
        total: quote.breakdown().total,
        content_type: rendered.content_type.to_string(),
        path,
    })
}

/// [`export_quote`] with the renderer picked by `format`.
///
/// Text pages follow `config.page_lines`; PDF pages are A4.
pub async fn export_quote_as<S: QuoteStore>(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    store: &S,
    format: OutputFormat,
    customer: Option<CustomerInfo>,
) -> Result<QuoteResponse, ApiError> {
    match format {
        OutputFormat::Text => {
            let renderer = TextRenderer::new(config.page_lines)?;
            export_quote(catalog, session, config, store, &renderer, customer).await
        }
        OutputFormat::Json => {
            export_quote(catalog, session, config, store, &JsonRenderer, customer).await
        }
        OutputFormat::Pdf => {
            export_quote(catalog, session, config, store, &PdfRenderer::default(), customer).await
        }
    }
}

/// Looks up a stored quote by id.
pub async fn get_quote<S: QuoteStore>(store: &S, id: &str) -> Result<Quote, ApiError> {
    let quote_id = QuoteId::parse(id)?;
    store
        .get(&quote_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Quote", id))
}

/// All stored quotes, oldest first.
pub async fn list_quotes<S: QuoteStore>(store: &S) -> Result<Vec<QuoteSummary>, ApiError> {
    let quotes = store.list().await?;
    Ok(quotes.iter().map(QuoteSummary::from).collect())
}
