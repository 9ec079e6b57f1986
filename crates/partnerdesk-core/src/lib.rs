//! # partnerdesk-core: Pure Business Logic for PartnerDesk
//!
//! Everything PartnerDesk decides without touching the database: discount
//! tiers, partner validation, money, sale date normalization and material
//! arithmetic.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PartnerDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Presentation layer (external, not here)             │   │
//! │  │      Partners tab ── Sales tab ── Material calculator tab       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    partnerdesk-db (repositories)                │   │
//! │  │      PartnerRepository  SalesRepository  MaterialRepository    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ partnerdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   types   discount   money   validation   sale_date  material  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Partner, sale and reference data types
//! - [`discount`] - Volume discount tiers
//! - [`money`] - Integer money for sale totals
//! - [`validation`] - Partner form and search term validation
//! - [`sale_date`] - Normalizing stored sale dates to `YYYY-MM-DD`
//! - [`material`] - Raw material requirement calculation
//! - [`error`] - Domain error types and [`ErrorKind`]
//!
//! ## Example Usage
//!
//! ```rust
//! use partnerdesk_core::material::MaterialEstimate;
//! use partnerdesk_core::DiscountTier;
//!
//! assert_eq!(DiscountTier::for_quantity(75_000).percent(), 10);
//!
//! let estimate = MaterialEstimate::compute(100, 2.0, 3.0, 1.5, 10.0).unwrap();
//! assert_eq!(estimate.required, 990);
//! ```

pub mod discount;
pub mod error;
pub mod material;
pub mod money;
pub mod sale_date;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::DiscountTier;
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use material::{MaterialEstimate, MaterialRequest};
pub use money::Money;
pub use types::*;
pub use validation::{PartnerForm, ValidationOptions};
