//! # Partner Repository
//!
//! Database operations for partners.
//!
//! ## Key Operations
//! - Discounted listing (partners joined with their sales)
//! - CRUD by identifier
//!
//! ## Discounted Listing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How the listing is built                             │
//! │                                                                         │
//! │  partners ──INNER JOIN── partner_products                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GROUP BY partner, SUM(quantity) AS total_quantity                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PartnerStanding { partner, total_quantity }                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  standing.discount() → DiscountTier (computed, never stored)           │
//! │                                                                         │
//! │  Partners without a single sale row drop out at the join.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, warn};

use super::Affected;
use crate::error::DbResult;
use partnerdesk_core::{CoreError, Partner, PartnerDetails, PartnerStanding};

/// Repository for partner database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.partners();
///
/// let listing = repo.list_with_discount().await?;
/// repo.add(&details).await?;
/// repo.delete(7).await?.or_not_found("Partner", 7)?;
/// ```
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    pool: SqlitePool,
}

impl PartnerRepository {
    /// Creates a new PartnerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PartnerRepository { pool }
    }

    /// Lists every partner that has sales, with its summed quantity.
    ///
    /// ## Returns
    /// * `Ok(standings)` - ordered by ascending partner identifier
    /// * `Err(DbError::Domain(CoreError::NoPartners))` - no partner has a sale;
    ///   see [`DbError::is_empty_state`](crate::DbError::is_empty_state)
    pub async fn list_with_discount(&self) -> DbResult<Vec<PartnerStanding>> {
        debug!("Listing partners with discount");

        let standings = sqlx::query_as::<_, PartnerStanding>(
            r#"
            SELECT
                p.id,
                p.partner_type,
                p.name,
                p.director,
                p.phone,
                p.rating,
                p.email,
                p.legal_address,
                SUM(pp.quantity) AS total_quantity
            FROM partners p
            INNER JOIN partner_products pp ON pp.partner_id = p.id
            GROUP BY p.id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if standings.is_empty() {
            warn!("No partners with sales");
            return Err(CoreError::NoPartners.into());
        }

        debug!(count = standings.len(), "Listed partners");
        Ok(standings)
    }

    /// Gets a partner by its identifier, whether or not it has sales.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Partner>> {
        let partner = sqlx::query_as::<_, Partner>(
            r#"
            SELECT id, partner_type, name, director, phone, rating, email, legal_address
            FROM partners
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(partner)
    }

    /// Inserts a new partner. The identifier is assigned by the store.
    pub async fn add(&self, details: &PartnerDetails) -> DbResult<()> {
        debug!(name = %details.name, partner_type = %details.partner_type, "Adding partner");

        sqlx::query(
            r#"
            INSERT INTO partners (
                partner_type, name, director, phone, rating, email, legal_address
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(details.partner_type)
        .bind(&details.name)
        .bind(&details.director)
        .bind(&details.phone)
        .bind(details.rating)
        .bind(&details.email)
        .bind(&details.legal_address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites a partner's type, name, director, phone and rating.
    ///
    /// Email and legal address are left untouched; use
    /// [`update_contact_details`](Self::update_contact_details) for those.
    ///
    /// ## Returns
    /// * `Ok(Affected(0))` - no partner with this identifier (not an error)
    pub async fn update(&self, id: i64, details: &PartnerDetails) -> DbResult<Affected> {
        debug!(id = %id, "Updating partner");

        let result = sqlx::query(
            r#"
            UPDATE partners SET
                partner_type = ?2,
                name = ?3,
                director = ?4,
                phone = ?5,
                rating = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(details.partner_type)
        .bind(&details.name)
        .bind(&details.director)
        .bind(&details.phone)
        .bind(details.rating)
        .execute(&self.pool)
        .await?;

        let affected = Affected::new(result.rows_affected());
        if affected.is_noop() {
            warn!(id = %id, "Update matched no partner");
        }
        Ok(affected)
    }

    /// Overwrites a partner's email and legal address.
    pub async fn update_contact_details(
        &self,
        id: i64,
        email: &str,
        legal_address: &str,
    ) -> DbResult<Affected> {
        debug!(id = %id, "Updating partner contact details");

        let result = sqlx::query(
            r#"
            UPDATE partners SET
                email = ?2,
                legal_address = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(legal_address)
        .execute(&self.pool)
        .await?;

        let affected = Affected::new(result.rows_affected());
        if affected.is_noop() {
            warn!(id = %id, "Contact update matched no partner");
        }
        Ok(affected)
    }

    /// Deletes a partner. Its sale rows go with it (`ON DELETE CASCADE`).
    ///
    /// ## Returns
    /// * `Ok(Affected(0))` - no partner with this identifier (not an error)
    pub async fn delete(&self, id: i64) -> DbResult<Affected> {
        debug!(id = %id, "Deleting partner");

        let result = sqlx::query("DELETE FROM partners WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let affected = Affected::new(result.rows_affected());
        if affected.is_noop() {
            warn!(id = %id, "Delete matched no partner");
        }
        Ok(affected)
    }

    /// Counts all partners, with or without sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM partners")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{empty_database, seeded_database};
    use partnerdesk_core::{DiscountTier, ErrorKind, PartnerType};

    fn new_partner(name: &str) -> PartnerDetails {
        PartnerDetails {
            partner_type: PartnerType::Ooo,
            name: name.to_string(),
            director: "Петров Петр Петрович".to_string(),
            phone: "495 111 22 33".to_string(),
            rating: 4,
            email: "petrov@example.ru".to_string(),
            legal_address: "101000, город Москва".to_string(),
        }
    }

    #[tokio::test]
    async fn test_listing_only_includes_partners_with_sales() {
        let db = seeded_database().await;

        let listing = db.partners().list_with_discount().await.unwrap();
        let ids: Vec<i64> = listing.iter().map(|s| s.partner.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 42]);
    }

    #[tokio::test]
    async fn test_listing_discounts() {
        let db = seeded_database().await;

        let listing = db.partners().list_with_discount().await.unwrap();
        let tiers: Vec<(i64, i64, DiscountTier)> = listing
            .iter()
            .map(|s| (s.partner.id, s.total_quantity, s.discount()))
            .collect();

        assert_eq!(
            tiers,
            vec![
                (1, 27_850, DiscountTier::Five),
                (2, 72_400, DiscountTier::Ten),
                (4, 300_000, DiscountTier::Fifteen),
                (42, 32, DiscountTier::None),
            ]
        );
        assert_eq!(listing[0].partner.partner_type, PartnerType::Zao);
        assert_eq!(listing[0].partner.rating, 7);
    }

    #[tokio::test]
    async fn test_empty_listing_is_not_found() {
        let db = empty_database().await;
        db.partners().add(&new_partner("Без продаж")).await.unwrap();

        let err = db.partners().list_with_discount().await.unwrap_err();
        assert!(err.is_empty_state());
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_first_sale_puts_partner_on_listing() {
        let db = seeded_database().await;

        sqlx::query(
            "INSERT INTO partner_products (partner_id, product_id, quantity, sale_date) VALUES (3, 1, 10000, '2024-02-02')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let listing = db.partners().list_with_discount().await.unwrap();
        let standing = listing.iter().find(|s| s.partner.id == 3).unwrap();
        assert_eq!(standing.discount(), DiscountTier::Five);
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let db = empty_database().await;
        let repo = db.partners();

        repo.add(&new_partner("Новый партнер")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        let id: i64 = sqlx::query_scalar("SELECT id FROM partners WHERE name = 'Новый партнер'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.details(), new_partner("Новый партнер"));
    }

    #[tokio::test]
    async fn test_update_leaves_contact_details() {
        let db = seeded_database().await;
        let repo = db.partners();

        let mut details = new_partner("Стройсервис Плюс");
        details.partner_type = PartnerType::Pao;
        details.rating = 10;
        let affected = repo.update(3, &details).await.unwrap();
        assert_eq!(affected.rows(), 1);

        let stored = repo.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(stored.name, "Стройсервис Плюс");
        assert_eq!(stored.partner_type, PartnerType::Pao);
        assert_eq!(stored.rating, 10);
        assert_eq!(stored.email, "ansolovev@st.ru");
        assert_eq!(stored.legal_address, "188910, Ленинградская область, город Приморск");

        repo.update_contact_details(3, "info@stroyservis.ru", "190000, город Санкт-Петербург")
            .await
            .unwrap()
            .or_not_found("Partner", 3)
            .unwrap();
        let stored = repo.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(stored.email, "info@stroyservis.ru");
        assert_eq!(stored.name, "Стройсервис Плюс");
    }

    #[tokio::test]
    async fn test_writes_to_missing_partner_are_noops() {
        let db = seeded_database().await;
        let repo = db.partners();

        let affected = repo.update(9_999, &new_partner("Никто")).await.unwrap();
        assert!(affected.is_noop());

        let affected = repo.update_contact_details(9_999, "a@b.ru", "нигде").await.unwrap();
        assert!(affected.is_noop());

        let affected = repo.delete(9_999).await.unwrap();
        assert!(affected.is_noop());
        assert_eq!(
            affected.or_not_found("Partner", 9_999).unwrap_err().kind(),
            ErrorKind::NotFound
        );

        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_sales() {
        let db = seeded_database().await;
        let repo = db.partners();

        let affected = repo.delete(2).await.unwrap();
        assert_eq!(affected.rows(), 1);
        assert!(repo.get_by_id(2).await.unwrap().is_none());

        let orphans: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM partner_products WHERE partner_id = 2")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(orphans, 0);

        let listing = repo.list_with_discount().await.unwrap();
        assert!(listing.iter().all(|s| s.partner.id != 2));
    }

    #[tokio::test]
    async fn test_negative_rating_rejected_by_store() {
        let db = empty_database().await;

        let err = sqlx::query(
            "INSERT INTO partners (partner_type, name, director, phone, rating, email, legal_address) VALUES ('ООО', 'x', 'x', 'x', -1, 'x@x', 'x')",
        )
        .execute(db.pool())
        .await
        .map_err(crate::DbError::from)
        .unwrap_err();

        assert!(matches!(err, crate::DbError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_partner_type_rejected_by_store() {
        let db = seeded_database().await;

        for label in ["АО", "ooo", ""] {
            let err = sqlx::query(
                "INSERT INTO partners (partner_type, name, director, phone, rating, email, legal_address) VALUES (?1, 'x', 'x', 'x', 1, 'x@x', 'x')",
            )
            .bind(label)
            .execute(db.pool())
            .await
            .map_err(crate::DbError::from)
            .unwrap_err();
            assert!(matches!(err, crate::DbError::CheckViolation { .. }), "{label:?}");
        }

        let err = sqlx::query("UPDATE partners SET partner_type = 'НКО' WHERE id = 1")
            .execute(db.pool())
            .await
            .map_err(crate::DbError::from)
            .unwrap_err();
        assert!(matches!(err, crate::DbError::CheckViolation { .. }));

        // The listing still decodes every row
        let listing = db.partners().list_with_discount().await.unwrap();
        assert_eq!(listing[0].partner.partner_type, PartnerType::Zao);
    }
}
