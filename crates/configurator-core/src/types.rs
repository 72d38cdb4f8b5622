//! # Shared Value Types
//!
//! Small value types used across the configurator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Value Types                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    QuoteId      │   │  CustomerInfo   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  UUID v4 string │   │  name           │       │
//! │  │  800 = 8%       │   │  never reused   │   │  email          │       │
//! │  └─────────────────┘   └─────────────────┘   │  phone          │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog types live in [`crate::catalog`], selections in
//! [`crate::configuration`], breakdowns in [`crate::pricing`] and quotes in
//! [`crate::quote`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::validation::{
    validate_customer_name, validate_email, validate_phone, validate_uuid, ValidationResult,
};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the dealership's combined tax & fees rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Displays as a trimmed percentage: `8%`, `8.5%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;

        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Quote Identifier
// =============================================================================

/// Unique identifier of a quote.
///
/// Backed by a random UUID v4 (122 random bits), so two quotes generated
/// anywhere, at any time, will not collide in practice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteId(String);

impl QuoteId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        QuoteId(Uuid::new_v4().to_string())
    }

    /// Parses an identifier received from outside (CLI argument, JSON).
    pub fn parse(id: &str) -> ValidationResult<Self> {
        validate_uuid(id)?;
        Ok(QuoteId(id.trim().to_lowercase()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Optional contact details attached to a quote.
///
/// Deserializing runs the same checks as [`CustomerInfo::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerInfo {
    /// Builds validated contact details.
    ///
    /// All three fields are required once a customer is given at all.
    /// Values are stored trimmed.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        let email = email.into();
        let phone = phone.into();

        validate_customer_name(&name)?;
        validate_email(&email)?;
        validate_phone(&phone)?;

        Ok(CustomerInfo {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for CustomerInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            email: String,
            phone: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        CustomerInfo::new(raw.name, raw.email, raw.phone).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
