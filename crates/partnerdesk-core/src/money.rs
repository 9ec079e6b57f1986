//! # Money Module
//!
//! Provides the `Money` type for sale totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Unit costs are stored as integer minor units (kopecks, cents):         │
//! │                                                                         │
//! │    products.min_cost_cents = 125050          (1250.50)                  │
//! │    partner_products.quantity = 300                                      │
//! │                                                                         │
//! │    total = 125050 × 300 = 37515000           (375150.00) exact          │
//! │                                                                         │
//! │  The same product in floating point drifts on large partner volumes.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No currency symbol is attached here; formatting is the presentation
//! layer's job. `Display` renders the bare decimal amount for logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

/// A monetary value in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use partnerdesk_core::money::Money;
    ///
    /// let cost = Money::from_cents(125050); // 1250.50
    /// assert_eq!(cost.cents(), 125050);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit cost by a sold quantity.
    ///
    /// `None` when the product doesn't fit in kopecks.
    ///
    /// ## Example
    /// ```rust
    /// use partnerdesk_core::money::Money;
    ///
    /// let unit_cost = Money::from_cents(299);
    /// assert_eq!(unit_cost.multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(unit_cost.multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `bps` basis points of this amount, rounded half up.
    ///
    /// 2000 bps = 20%.
    ///
    /// ## Example
    /// ```rust
    /// use partnerdesk_core::money::Money;
    ///
    /// let total = Money::from_cents(1005);
    /// assert_eq!(total.portion_bps(2000).cents(), 201);
    /// ```
    pub fn portion_bps(&self, bps: u32) -> Money {
        // i128 keeps large partner totals from overflowing mid-computation
        let portion = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(portion as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
