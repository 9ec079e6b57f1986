//! # Material Repository
//!
//! Reference lists and the raw material calculator.
//!
//! ```text
//! calculate(request)
//!   ├── request.validate()              fails before touching the store
//!   ├── product_coefficient(product)    products ⋈ product_types
//!   ├── defect_percentage(material)     material_types
//!   └── request.estimate(coef, defect)  pure, in partnerdesk-core
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use partnerdesk_core::{CoreError, MaterialEstimate, MaterialRequest, ReferenceItem};

/// Repository for material reference data and calculations.
#[derive(Debug, Clone)]
pub struct MaterialRepository {
    pool: SqlitePool,
}

impl MaterialRepository {
    /// Creates a new MaterialRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MaterialRepository { pool }
    }

    /// Products for the calculator's pick list, by identifier.
    pub async fn list_products(&self) -> DbResult<Vec<ReferenceItem>> {
        let items = sqlx::query_as::<_, ReferenceItem>("SELECT id, name FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Material types for the calculator's pick list, by identifier.
    pub async fn list_material_types(&self) -> DbResult<Vec<ReferenceItem>> {
        let items = sqlx::query_as::<_, ReferenceItem>(
            "SELECT id, label AS name FROM material_types ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Coefficient of the product's category.
    ///
    /// `NotFound` when the product doesn't exist.
    pub async fn product_coefficient(&self, product_id: i64) -> DbResult<f64> {
        let coefficient: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT pt.coefficient
            FROM products p
            INNER JOIN product_types pt ON pt.id = p.product_type_id
            WHERE p.id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        coefficient.ok_or_else(|| CoreError::CoefficientNotFound(product_id).into())
    }

    /// Defect percentage of a material type.
    ///
    /// `NotFound` when the material type doesn't exist.
    pub async fn defect_percentage(&self, material_id: i64) -> DbResult<f64> {
        let defect: Option<f64> =
            sqlx::query_scalar("SELECT defect_percentage FROM material_types WHERE id = ?1")
                .bind(material_id)
                .fetch_optional(&self.pool)
                .await?;

        defect.ok_or_else(|| CoreError::DefectRateNotFound(material_id).into())
    }

    /// Whole units of raw material needed for the request.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let request = MaterialRequest::parse(1, 1, "100", "2.0", "3.0")?;
    /// let estimate = db.materials().calculate(&request).await?;
    /// assert_eq!(estimate.required, 990); // coefficient 1.5, 10% defects
    /// ```
    pub async fn calculate(&self, request: &MaterialRequest) -> DbResult<MaterialEstimate> {
        request.validate()?;

        let coefficient = self.product_coefficient(request.product_id).await?;
        let defect = self.defect_percentage(request.material_id).await?;
        let estimate = request.estimate(coefficient, defect)?;

        debug!(
            product_id = request.product_id,
            material_id = request.material_id,
            quantity = request.quantity,
            coefficient,
            defect,
            required = estimate.required,
            "Calculated material requirement"
        );
        Ok(estimate)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::seeded_database;
    use partnerdesk_core::ErrorKind;

    fn request(product_id: i64, material_id: i64) -> MaterialRequest {
        MaterialRequest {
            product_id,
            material_id,
            quantity: 100,
            param1: 2.0,
            param2: 3.0,
        }
    }

    #[tokio::test]
    async fn test_calculate_with_defects() {
        let db = seeded_database().await;

        let estimate = db.materials().calculate(&request(1, 1)).await.unwrap();
        assert_eq!(estimate.per_unit, 9.0);
        assert_eq!(estimate.required, 990);
    }

    #[tokio::test]
    async fn test_calculate_without_defects() {
        let db = seeded_database().await;

        let estimate = db.materials().calculate(&request(1, 2)).await.unwrap();
        assert_eq!(estimate.required, 900);
    }

    #[tokio::test]
    async fn test_missing_product_or_material() {
        let db = seeded_database().await;

        let err = db.materials().calculate(&request(99, 1)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Coefficient not found for product 99");

        let err = db.materials().calculate(&request(1, 99)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Defect rate not found for material 99");
    }

    #[tokio::test]
    async fn test_invalid_request_fails_before_lookup() {
        let db = seeded_database().await;

        // Unknown product too, but validation is reported first
        let mut bad = request(99, 99);
        bad.quantity = 0;
        let err = db.materials().calculate(&bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[tokio::test]
    async fn test_reference_lists() {
        let db = seeded_database().await;
        let repo = db.materials();

        let products = repo.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);

        let materials = repo.list_material_types().await.unwrap();
        let labels: Vec<String> = materials.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["1 - Тип материала 1", "2 - Тип материала 2"]);
    }
}
