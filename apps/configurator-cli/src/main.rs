//! # ev-configurator Entry Point
//!
//! ```text
//! $ ev-configurator models
//! $ ev-configurator options
//! $ ev-configurator price --model bmw-i4 --option battery=long-range
//! $ ev-configurator quote --option battery=long-range --name "Ada Lovelace" \
//!       --email ada@example.com --phone "555-123-4567" --format pdf
//! $ printf 'model bmw-i4\nset battery=long-range\nquote\nquotes\n' | ev-configurator session
//! ```
//!
//! The actual setup is in lib.rs for testability.

use std::process::ExitCode;

use clap::Parser;

use configurator_cli_lib::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    configurator_cli_lib::init_tracing();

    let cli = Cli::parse();
    match configurator_cli_lib::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(code = ?err.code, "Command failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
