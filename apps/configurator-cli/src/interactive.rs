//! # Interactive Session
//!
//! `ev-configurator session` keeps one [`SessionState`] and one quote store
//! alive while it reads commands line by line, so a buyer can build a
//! configuration step by step and look quotes up again later.
//!
//! ## Session Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shell::run                                       │
//! │                                                                         │
//! │  stdin ──► next_line ──► parse_command ──► Shell::execute ──► stdout    │
//! │                 ▲              │                   │                    │
//! │                 │              │ bad input         │ ApiError           │
//! │                 │              ▼                   ▼                    │
//! │                 └──────── "error: [CODE] message" ◄┘                    │
//! │                                                                         │
//! │  Ends on EOF or `quit`. A failed command never ends the session and    │
//! │  never changes the selection.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands
//! ```text
//! models | options                  catalog listings
//! show                              current selection and price
//! model <id>                        switch model, options carry over
//! set <section>=<option>            change one option
//! reset                             back to catalog defaults
//! price                             price breakdown
//! customer <name> | <email> | <phone>
//! customer clear
//! quote [text|json|pdf]             store and write a quote
//! quotes                            stored quotes, oldest first
//! show <quote id>                   one stored quote
//! help | quit
//! ```

use clap::ValueEnum;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use configurator_core::{CustomerInfo, PriceBreakdown};
use configurator_store::QuoteStore;

use crate::cli::{parse_option_pair, OutputFormat};
use crate::commands;
use crate::error::ApiError;
use crate::output;
use crate::state::{CatalogState, ConfigState, SessionState};

const HELP: &str = "\
models                              list vehicle models
options                             list sections and options
show                                current selection and price
model <id>                          switch model
set <section>=<option>              change one option
reset                               back to catalog defaults
price                               price breakdown
customer <name> | <email> | <phone> attach customer details to quotes
customer clear                      drop customer details
quote [text|json|pdf]               store and write a quote
quotes                              list stored quotes
show <quote id>                     show a stored quote
quit                                end the session
";

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Models,
    Options,
    Show,
    Model(String),
    Set { section: String, option: String },
    Reset,
    Price,
    Customer { name: String, email: String, phone: String },
    ClearCustomer,
    Quote(OutputFormat),
    Quotes,
    ShowQuote(String),
    Help,
    Quit,
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, ApiError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let usage = |text: &str| ApiError::validation(format!("usage: {}", text));

    let command = match (verb.to_ascii_lowercase().as_str(), rest) {
        ("models", "") => SessionCommand::Models,
        ("options", "") => SessionCommand::Options,
        ("show", "") => SessionCommand::Show,
        ("show", id) => SessionCommand::ShowQuote(id.to_string()),
        ("model", "") => return Err(usage("model <id>")),
        ("model", id) => SessionCommand::Model(id.to_string()),
        ("set", pair) => {
            let (section, option) = parse_option_pair(pair).map_err(ApiError::validation)?;
            SessionCommand::Set { section, option }
        }
        ("reset", "") => SessionCommand::Reset,
        ("price", "") => SessionCommand::Price,
        ("customer", "clear") => SessionCommand::ClearCustomer,
        ("customer", details) => {
            let parts: Vec<&str> = details.split('|').map(str::trim).collect();
            match parts.as_slice() {
                [name, email, phone] => SessionCommand::Customer {
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                },
                _ => return Err(usage("customer <name> | <email> | <phone>")),
            }
        }
        ("quote", "") => SessionCommand::Quote(OutputFormat::Text),
        ("quote", format) => {
            let format = OutputFormat::from_str(format, true)
                .map_err(|_| usage("quote [text|json|pdf]"))?;
            SessionCommand::Quote(format)
        }
        ("quotes", "") => SessionCommand::Quotes,
        ("help" | "?", _) => SessionCommand::Help,
        ("quit" | "exit", _) => SessionCommand::Quit,
        _ => {
            return Err(ApiError::validation(format!(
                "Unknown command '{}'. Type 'help' for commands.",
                line
            )))
        }
    };

    Ok(Some(command))
}

/// The state one interactive session works on.
pub struct Shell<'a, S> {
    catalog: &'a CatalogState,
    session: &'a SessionState,
    config: &'a ConfigState,
    store: &'a S,
    json: bool,
    customer: Option<CustomerInfo>,
}

impl<'a, S: QuoteStore> Shell<'a, S> {
    pub fn new(
        catalog: &'a CatalogState,
        session: &'a SessionState,
        config: &'a ConfigState,
        store: &'a S,
        json: bool,
    ) -> Self {
        Shell {
            catalog,
            session,
            config,
            store,
            json,
            customer: None,
        }
    }

    /// Reads commands from `input` until EOF or `quit`, writing replies and
    /// errors to `output`.
    ///
    /// Returns the number of commands that succeeded.
    ///
    /// ## Errors
    /// Only I/O failures on `input` or `output` end the session early.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<usize, ApiError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut succeeded = 0;

        while let Some(line) = lines.next_line().await? {
            let reply = match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(SessionCommand::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await,
                Err(err) => Err(err),
            };

            match reply {
                Ok(text) => {
                    succeeded += 1;
                    output.write_all(text.as_bytes()).await?;
                }
                Err(err) => {
                    warn!(code = ?err.code, line = %line.trim(), "Session command failed");
                    output.write_all(format!("error: {}\n", err).as_bytes()).await?;
                }
            }
            output.flush().await?;
        }

        debug!(succeeded, "Session ended");
        Ok(succeeded)
    }

    /// Runs one command against the session.
    pub async fn execute(&mut self, command: SessionCommand) -> Result<String, ApiError> {
        let (catalog, session, config) = (self.catalog, self.session, self.config);

        match command {
            SessionCommand::Models => {
                self.reply(&commands::list_models(catalog), |m| output::models_table(m))
            }
            SessionCommand::Options => {
                self.reply(&commands::list_options(catalog), |s| output::options_table(s))
            }
            SessionCommand::Show => {
                let response = commands::get_selection(catalog, session, config)?;
                self.price_reply(&response, &response.price)
            }
            SessionCommand::Model(model_id) => {
                let response = commands::select_model(catalog, session, config, &model_id)?;
                self.price_reply(&response, &response.price)
            }
            SessionCommand::Set { section, option } => {
                let response = commands::select_option(catalog, session, config, &section, &option)?;
                self.price_reply(&response, &response.price)
            }
            SessionCommand::Reset => {
                let response = commands::reset_selection(catalog, session, config)?;
                self.price_reply(&response, &response.price)
            }
            SessionCommand::Price => {
                let price = commands::get_price(catalog, session, config)?;
                self.price_reply(&price, &price)
            }
            SessionCommand::Customer { name, email, phone } => {
                self.customer =
                    commands::customer_from_parts(Some(&name), Some(&email), Some(&phone))?;
                self.reply(&self.customer, |customer| match customer {
                    Some(c) => format!("Quotes are now prepared for {}\n", c.name),
                    None => "Customer cleared\n".to_string(),
                })
            }
            SessionCommand::ClearCustomer => {
                self.customer = None;
                self.reply(&self.customer, |_| "Customer cleared\n".to_string())
            }
            SessionCommand::Quote(format) => {
                let response = commands::export_quote_as(
                    catalog,
                    session,
                    config,
                    self.store,
                    format,
                    self.customer.clone(),
                )
                .await?;
                self.reply(&response, output::quote_summary)
            }
            SessionCommand::Quotes => {
                let quotes = commands::list_quotes(self.store).await?;
                self.reply(&quotes, |q| output::quotes_table(q))
            }
            SessionCommand::ShowQuote(id) => {
                let quote = commands::get_quote(self.store, &id).await?;
                let model = catalog
                    .model(quote.selection().model_id())
                    .ok_or_else(|| ApiError::internal("Quoted model vanished from catalog"))?;
                self.reply(&quote, |q| output::quote_detail(q, model))
            }
            SessionCommand::Help => Ok(HELP.to_string()),
            SessionCommand::Quit => Ok(String::new()),
        }
    }

    fn reply<T: Serialize>(&self, value: &T, table: impl FnOnce(&T) -> String) -> Result<String, ApiError> {
        if self.json {
            Ok(output::json(value)? + "\n")
        } else {
            Ok(table(value))
        }
    }

    /// JSON of `value`, or the price table for the session's current model.
    fn price_reply<T: Serialize>(&self, value: &T, price: &PriceBreakdown) -> Result<String, ApiError> {
        if self.json {
            return Ok(output::json(value)? + "\n");
        }

        let model_id = self.session.with_selection(|selection| selection.model_id().to_string());
        let model = self
            .catalog
            .model(&model_id)
            .ok_or_else(|| ApiError::internal("Selected model vanished from catalog"))?;
        Ok(output::price_table(model, price))
    }
}
