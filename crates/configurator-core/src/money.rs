//! # Money Module
//!
//! Provides the `Money` type for every price in the configurator.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHOLE-UNIT INTEGER PRICES                                              │
//! │                                                                         │
//! │  Vehicle prices are quoted in whole dollars:                            │
//! │    base $45,000 + battery $10,000 = $55,000                             │
//! │                                                                         │
//! │  There is no fractional currency anywhere in the catalog, so the        │
//! │  only place a fraction can appear is tax. Tax is rounded exactly once,  │
//! │  with half-up rounding done in integer arithmetic:                      │
//! │    $55,000 × 8% = $4,400                                                │
//! │    $1,006.25 → $1,006   $1,006.50 → $1,007                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use configurator_core::money::Money;
//!
//! let base = Money::from_units(45_000);
//! let battery = Money::from_units(10_000);
//!
//! let subtotal = base + battery;
//! assert_eq!(subtotal.units(), 55_000);
//! assert_eq!(subtotal.to_string(), "$55,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units (dollars).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction
/// - **Single field tuple struct**: serializes as a bare JSON number
///
/// ## Where Money is Used
/// ```text
/// VehicleModel.base_price ──┐
///                           ├──► PriceBreakdown.subtotal ──► tax ──► total
/// ConfigOption.price ───────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use configurator_core::money::Money;
    ///
    /// let price = Money::from_units(1_500);
    /// assert_eq!(price.units(), 1_500);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the amount in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax using half-up rounding.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  HALF-UP ROUNDING (floor(x + 0.5))                                  │
    /// │                                                                     │
    /// │    1006.25 → 1006    1006.50 → 1007    1006.75 → 1007               │
    /// │   -2.50    → -2      (ties always move toward +∞)                   │
    /// │                                                                     │
    /// │  Every implementation of the price breakdown must produce the       │
    /// │  same tax for the same subtotal, so no other mode is offered.       │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// `floor((amount * bps + 5000) / 10000)`, using Euclidean division so the
    /// floor also holds for negative amounts.
    ///
    /// ## Example
    /// ```rust
    /// use configurator_core::money::Money;
    /// use configurator_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_units(55_000);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(tax.units(), 4_400);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps amount * bps from overflowing
        let scaled = self.0 as i128 * rate.bps() as i128 + 5000;
        let units = scaled
            .div_euclid(10000)
            .clamp(i64::MIN as i128, i64::MAX as i128);
        Money::from_units(units as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays as `$45,000` (thousands grouped, no decimals).
///
/// This is the format used on quote documents: `+$10,000` line deltas,
/// `$59,400` totals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}${}", sign, grouped)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
