//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CONFIGURATOR_*`)
//! 2. Defaults (this file)
//!
//! ## Environment Variables
//! | Variable                      | Effect                          | Default        |
//! |-------------------------------|---------------------------------|----------------|
//! | `CONFIGURATOR_TAX_RATE`       | Tax & fees, percent (`8.25`)    | `8`            |
//! | `CONFIGURATOR_DEFAULT_MODEL`  | Starting model id               | first model    |
//! | `CONFIGURATOR_CATALOG_PATH`   | JSON catalog file               | built-in       |
//! | `CONFIGURATOR_VENDOR_NAME`    | Vendor header on quotes         | EliteEV Motors |
//! | `CONFIGURATOR_OUTPUT_DIR`     | Where quote files are written   | ~/Documents    |
//! | `CONFIGURATOR_PAGE_LINES`     | Text quote page length          | 40             |
//! | `CONFIGURATOR_MAX_QUOTES`     | Quotes one session may store    | unlimited      |
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::UserDirs;
use thiserror::Error;

use configurator_core::validation::validate_tax_rate_bps;
use configurator_core::{TaxRate, VendorProfile, TAX_RATE};
use configurator_render::text::{DEFAULT_PAGE_LINES, MIN_PAGE_LINES};

const TAX_RATE_VAR: &str = "CONFIGURATOR_TAX_RATE";
const DEFAULT_MODEL_VAR: &str = "CONFIGURATOR_DEFAULT_MODEL";
const CATALOG_PATH_VAR: &str = "CONFIGURATOR_CATALOG_PATH";
const VENDOR_NAME_VAR: &str = "CONFIGURATOR_VENDOR_NAME";
const OUTPUT_DIR_VAR: &str = "CONFIGURATOR_OUTPUT_DIR";
const PAGE_LINES_VAR: &str = "CONFIGURATOR_PAGE_LINES";
const MAX_QUOTES_VAR: &str = "CONFIGURATOR_MAX_QUOTES";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Tax & fees rate applied to every price and quote.
    pub tax_rate: TaxRate,

    /// Model a fresh session starts with. `None` = catalog default.
    pub default_model: Option<String>,

    /// Catalog file to load instead of the built-in catalog.
    pub catalog_path: Option<PathBuf>,

    /// Header and contact block printed on quotes.
    pub vendor: VendorProfile,

    /// Directory rendered quotes are written to.
    pub output_dir: PathBuf,

    /// Lines per page for text quotes, footer included.
    pub page_lines: usize,

    /// Store capacity. `None` = unlimited.
    pub max_quotes: Option<usize>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Tax: 8%
    /// - Catalog: built-in EliteEV Motors catalog
    /// - Output: the user's documents folder, else the current directory
    /// - Pages: 40 lines
    fn default() -> Self {
        ConfigState {
            tax_rate: TAX_RATE,
            default_model: None,
            catalog_path: None,
            vendor: VendorProfile::default(),
            output_dir: default_output_dir(),
            page_lines: DEFAULT_PAGE_LINES,
            max_quotes: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// Unset or blank variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = ConfigState::default();

        if let Some(raw) = var(TAX_RATE_VAR) {
            config.tax_rate = parse_tax_rate(&raw)?;
        }

        config.default_model = var(DEFAULT_MODEL_VAR);
        config.catalog_path = var(CATALOG_PATH_VAR).map(PathBuf::from);

        if let Some(name) = var(VENDOR_NAME_VAR) {
            config.vendor.name = name;
        }

        if let Some(dir) = var(OUTPUT_DIR_VAR) {
            config.output_dir = PathBuf::from(dir);
        }

        if let Some(raw) = var(PAGE_LINES_VAR) {
            config.page_lines = parse_page_lines(&raw)?;
        }

        if let Some(raw) = var(MAX_QUOTES_VAR) {
            config.max_quotes = Some(parse_max_quotes(&raw)?);
        }

        Ok(config)
    }
}

fn parse_tax_rate(raw: &str) -> Result<TaxRate, ConfigError> {
    let pct: f64 = raw.parse().map_err(|_| {
        ConfigError::InvalidValue(format!("{} must be a percentage, got '{}'", TAX_RATE_VAR, raw))
    })?;

    if !pct.is_finite() || pct < 0.0 {
        return Err(ConfigError::InvalidValue(format!(
            "{} must be between 0 and 100, got '{}'",
            TAX_RATE_VAR, raw
        )));
    }

    let rate = TaxRate::from_percentage(pct);
    validate_tax_rate_bps(rate.bps())
        .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", TAX_RATE_VAR, e)))?;
    Ok(rate)
}

fn parse_page_lines(raw: &str) -> Result<usize, ConfigError> {
    match raw.parse::<usize>() {
        Ok(lines) if lines >= MIN_PAGE_LINES => Ok(lines),
        _ => Err(ConfigError::InvalidValue(format!(
            "{} must be a whole number of at least {}, got '{}'",
            PAGE_LINES_VAR, MIN_PAGE_LINES, raw
        ))),
    }
}

fn parse_max_quotes(raw: &str) -> Result<usize, ConfigError> {
    match raw.parse::<usize>() {
        Ok(max) if max > 0 => Ok(max),
        _ => Err(ConfigError::InvalidValue(format!(
            "{} must be a positive whole number, got '{}'",
            MAX_QUOTES_VAR, raw
        ))),
    }
}

fn default_output_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
