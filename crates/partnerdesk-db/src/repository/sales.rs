//! # Sales Repository
//!
//! Partner search and per-partner sale history.
//!
//! ## Partner Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    find_partner("42")                                   │
//! │                                                                         │
//! │  trim, reject blank                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. ById          "42" parses as an integer → WHERE id = 42            │
//! │       │ no row                                                          │
//! │       ▼                                                                 │
//! │  2. NameContains  instr(name, '42') > 0, lowest id wins                │
//! │       │ no row                                                          │
//! │       ▼                                                                 │
//! │  CoreError::PartnerNotFound                                            │
//! │                                                                         │
//! │  An identifier match always beats a name that merely contains the      │
//! │  digits: partner 42 wins over "Склад 42".                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `instr` is used rather than `LIKE` because it is case-sensitive for all
//! of Unicode and has no wildcard characters to escape.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

use crate::error::{DbError, DbResult};
use partnerdesk_core::sale_date::{normalize_sale_date, RawSaleDate};
use partnerdesk_core::validation::validate_search_term;
use partnerdesk_core::{CoreError, Money, PartnerMatch, PartnerSale};

/// One way of resolving a search term to a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupStrategy {
    /// Exact identifier, when the term is an integer.
    ById,
    /// Case-sensitive substring of the company name.
    NameContains,
}

/// Strategies in the order they are tried; the first hit wins.
const LOOKUP_ORDER: [LookupStrategy; 2] = [LookupStrategy::ById, LookupStrategy::NameContains];

/// Repository for partner search and sale history.
#[derive(Debug, Clone)]
pub struct SalesRepository {
    pool: SqlitePool,
}

impl SalesRepository {
    /// Creates a new SalesRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalesRepository { pool }
    }

    /// Resolves "an identifier or part of a name" to a single partner.
    ///
    /// ## Returns
    /// * `Ok(PartnerMatch)` - identifier and company name
    /// * `Err(ValidationError)` - blank term
    /// * `Err(NotFound)` - no strategy produced a row
    pub async fn find_partner(&self, term: &str) -> DbResult<PartnerMatch> {
        let term = validate_search_term(term)?;

        for strategy in LOOKUP_ORDER {
            if let Some(found) = self.lookup(strategy, &term).await? {
                debug!(term = %term, ?strategy, id = found.id, "Partner found");
                return Ok(found);
            }
        }

        debug!(term = %term, "No partner matched");
        Err(CoreError::PartnerNotFound(term).into())
    }

    async fn lookup(&self, strategy: LookupStrategy, term: &str) -> DbResult<Option<PartnerMatch>> {
        let found = match strategy {
            LookupStrategy::ById => {
                let Ok(id) = term.parse::<i64>() else {
                    return Ok(None);
                };
                sqlx::query_as::<_, PartnerMatch>("SELECT id, name FROM partners WHERE id = ?1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            LookupStrategy::NameContains => {
                sqlx::query_as::<_, PartnerMatch>(
                    r#"
                    SELECT id, name
                    FROM partners
                    WHERE instr(name, ?1) > 0
                    ORDER BY id
                    LIMIT 1
                    "#,
                )
                .bind(term)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(found)
    }

    /// Lists every sale of a partner, newest first.
    ///
    /// Totals are `quantity × product minimum cost`, computed now rather than
    /// stored. Dates are normalized to `YYYY-MM-DD` before sorting, so rows
    /// whose dates were stored in different representations still order
    /// correctly. An unknown partner simply has no sales.
    pub async fn partner_sales(&self, partner_id: i64) -> DbResult<Vec<PartnerSale>> {
        debug!(partner_id = %partner_id, "Loading partner sales");

        let rows = sqlx::query(
            r#"
            SELECT
                pr.name AS product_name,
                pp.quantity,
                pp.sale_date,
                pt.label AS product_type,
                pr.min_cost_cents
            FROM partner_products pp
            INNER JOIN products pr ON pr.id = pp.product_id
            INNER JOIN product_types pt ON pt.id = pr.product_type_id
            WHERE pp.partner_id = ?1
            ORDER BY pp.id
            "#,
        )
        .bind(partner_id)
        .fetch_all(&self.pool)
        .await?;

        let mut sales = rows.iter().map(sale_from_row).collect::<DbResult<Vec<_>>>()?;
        sales.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));

        debug!(partner_id = %partner_id, count = sales.len(), "Loaded partner sales");
        Ok(sales)
    }
}

fn sale_from_row(row: &SqliteRow) -> DbResult<PartnerSale> {
    let product_name: String = row.try_get("product_name")?;
    let quantity: i64 = row.try_get("quantity")?;
    let unit_cost = Money::from_cents(row.try_get("min_cost_cents")?);

    let total = unit_cost.multiply_quantity(quantity).ok_or_else(|| {
        DbError::Internal(format!(
            "sale total overflows: {} x {} of {}",
            unit_cost, quantity, product_name
        ))
    })?;

    Ok(PartnerSale {
        product_name,
        quantity,
        sale_date: normalize_sale_date(raw_sale_date(row)?),
        product_type: row.try_get("product_type")?,
        total,
    })
}

/// Reads `sale_date` according to the storage class of this row's value.
fn raw_sale_date(row: &SqliteRow) -> DbResult<RawSaleDate> {
    let storage = {
        let value = row.try_get_raw("sale_date")?;
        if value.is_null() {
            return Ok(RawSaleDate::Null);
        }
        value.type_info().name().to_string()
    };

    let raw = match storage.as_str() {
        "TEXT" => RawSaleDate::Text(row.try_get("sale_date")?),
        "INTEGER" => RawSaleDate::Integer(row.try_get("sale_date")?),
        "REAL" => RawSaleDate::JulianDay(row.try_get("sale_date")?),
        "BLOB" => RawSaleDate::Bytes(row.try_get("sale_date")?),
        other => RawSaleDate::Other(
            row.try_get::<String, _>("sale_date")
                .unwrap_or_else(|_| other.to_string()),
        ),
    };

    Ok(raw)
}

// =============================================================================
// Unit Tests
// =============================================================================
