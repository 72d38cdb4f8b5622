//! # Configurator CLI Library
//!
//! The application layer of the EV configurator: state, commands, and the
//! `ev-configurator` binary's dispatch.
//!
//! ## Module Organization
//! ```text
//! configurator_cli_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── output.rs       ◄─── Tables and JSON for stdout
//! ├── interactive.rs  ◄─── `session` subcommand (stdin loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Shared read-only catalog
//! │   ├── session.rs  ◄─── Session selection (Arc<Mutex>)
//! │   └── config.rs   ◄─── Environment configuration
//! ├── commands/
//! │   ├── mod.rs           ◄─── Command exports
//! │   ├── catalog.rs       ◄─── Model/option listings
//! │   ├── configuration.rs ◄─── Selection updates and pricing
//! │   └── quote.rs         ◄─── Quote generation and export
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod interactive;
pub mod output;
pub mod state;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use configurator_store::MemoryQuoteStore;

use cli::{Cli, Command, SelectionArgs};
use error::ApiError;
use interactive::Shell;
use state::{CatalogState, ConfigState, SessionState};

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Load ConfigState from CONFIGURATOR_* variables ───────────────────► │
/// │                                                                         │
/// │  2. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • CONFIGURATOR_CATALOG_PATH, else built-in EliteEV catalog          │
/// │     • apply CONFIGURATOR_DEFAULT_MODEL                                  │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SessionState at catalog defaults                                  │
/// │     • MemoryQuoteStore, empty, CONFIGURATOR_MAX_QUOTES capacity         │
/// │                                                                         │
/// │  4. Dispatch the subcommand, print to stdout ─────────────────────────► │
/// │     • `session` keeps state and store until stdin closes                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let mut config = ConfigState::from_env()?;
    let catalog = CatalogState::load(&config).await?;
    let session = SessionState::new(&catalog);
    let store = match config.max_quotes {
        Some(max) => MemoryQuoteStore::with_capacity_limit(max),
        None => MemoryQuoteStore::new(),
    };

    info!(
        models = catalog.models().len(),
        sections = catalog.sections().len(),
        tax_rate = %config.tax_rate,
        "Configurator ready"
    );

    let output = match cli.command {
        Command::Models => {
            let models = commands::list_models(&catalog);
            if cli.json {
                output::json(&models)?
            } else {
                output::models_table(&models)
            }
        }
        Command::Options => {
            let sections = commands::list_options(&catalog);
            if cli.json {
                output::json(&sections)?
            } else {
                output::options_table(&sections)
            }
        }
        Command::Price { selection } => {
            let response = apply(&catalog, &session, &config, &selection)?;
            if cli.json {
                output::json(&response)?
            } else {
                let model = catalog
                    .model(response.selection.model_id())
                    .ok_or_else(|| ApiError::internal("Selected model vanished from catalog"))?;
                output::price_table(model, &response.price)
            }
        }
        Command::Quote {
            selection,
            customer,
            format,
            out,
        } => {
            apply(&catalog, &session, &config, &selection)?;
            let customer = commands::customer_from_parts(
                customer.name.as_deref(),
                customer.email.as_deref(),
                customer.phone.as_deref(),
            )?;
            if let Some(dir) = out {
                config.output_dir = dir;
            }

            let response =
                commands::export_quote_as(&catalog, &session, &config, &store, format, customer)
                    .await?;

            if cli.json {
                output::json(&response)?
            } else {
                output::quote_summary(&response)
            }
        }
        Command::Session => {
            let mut shell = Shell::new(&catalog, &session, &config, &store, cli.json);
            let mut stdout = tokio::io::stdout();
            let succeeded = shell.run(BufReader::new(tokio::io::stdin()), &mut stdout).await?;
            info!(commands = succeeded, quotes = store.len().await, "Session closed");
            return Ok(());
        }
    };

    print!("{}", output);
    if cli.json {
        println!();
    }
    Ok(())
}

fn apply(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    selection: &SelectionArgs,
) -> Result<commands::SelectionResponse, ApiError> {
    commands::configure(
        catalog,
        session,
        config,
        selection.model.as_deref(),
        &selection.options,
    )
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=configurator_store=trace` - Trace for one crate only
/// - Default: INFO, DEBUG for configurator crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,configurator=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
