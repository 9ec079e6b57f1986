//! # Discount Tiers
//!
//! Volume discount derived from a partner's cumulative sold quantity.
//!
//! ## Bands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  summed quantity            discount                                    │
//! │  ─────────────────────────  ────────                                    │
//! │          0 ..   10_000          0%                                      │
//! │     10_000 ..   50_000          5%                                      │
//! │     50_000 ..  300_000         10%                                      │
//! │    300_000 ..                  15%                                      │
//! │                                                                         │
//! │  Half-open bands: the lower bound belongs to the band, the upper        │
//! │  bound belongs to the next one.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tier is never persisted. Repositories return the summed quantity and
//! callers ask [`DiscountTier::for_quantity`] (through
//! [`crate::PartnerStanding::discount`]) at read time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A discount band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTier {
    /// Below 10,000 units.
    None,
    /// 10,000 to 49,999 units.
    Five,
    /// 50,000 to 299,999 units.
    Ten,
    /// 300,000 units and above.
    Fifteen,
}

/// Lower bound (inclusive) of each tier above [`DiscountTier::None`],
/// highest first.
const THRESHOLDS: [(i64, DiscountTier); 3] = [
    (300_000, DiscountTier::Fifteen),
    (50_000, DiscountTier::Ten),
    (10_000, DiscountTier::Five),
];

impl DiscountTier {
    /// Classifies a summed sale quantity.
    ///
    /// ## Example
    /// ```rust
    /// use partnerdesk_core::DiscountTier;
    ///
    /// assert_eq!(DiscountTier::for_quantity(9_999), DiscountTier::None);
    /// assert_eq!(DiscountTier::for_quantity(10_000), DiscountTier::Five);
    /// assert_eq!(DiscountTier::for_quantity(300_000).percent(), 15);
    /// ```
    pub fn for_quantity(total_quantity: i64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(lower, _)| total_quantity >= *lower)
            .map(|(_, tier)| *tier)
            .unwrap_or(DiscountTier::None)
    }

    /// Discount as a whole percentage.
    pub const fn percent(&self) -> u8 {
        match self {
            DiscountTier::None => 0,
            DiscountTier::Five => 5,
            DiscountTier::Ten => 10,
            DiscountTier::Fifteen => 15,
        }
    }
}

impl Default for DiscountTier {
    fn default() -> Self {
        DiscountTier::None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
