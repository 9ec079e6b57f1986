//! # partnerdesk-db: Database Layer for PartnerDesk
//!
//! Database access for PartnerDesk: the partner registry, sale history and
//! material calculator, all backed by one local SQLite file through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PartnerDesk Data Flow                            │
//! │                                                                         │
//! │  Presentation layer (partners / sales / calculator tabs)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  partnerdesk-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ PartnerRepository  │  │            │  │   │
//! │  │   │ SqlitePool    │◄───│ SalesRepository    │  │ 001_init   │  │   │
//! │  │   │ (1 conn)      │    │ MaterialRepository │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (./partnerdesk.db or PARTNERDESK_DB_PATH)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`logging`] - Tracing subscriber setup for binaries
//! - [`repository`] - Partner, sales and material repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use partnerdesk_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()).await?;
//!
//! match db.partners().list_with_discount().await {
//!     Ok(listing) => { /* render */ }
//!     Err(e) if e.is_empty_state() => { /* "no partners yet" */ }
//!     Err(e) => return Err(e),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod logging;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::material::MaterialRepository;
pub use repository::partner::PartnerRepository;
pub use repository::sales::SalesRepository;
pub use repository::Affected;
