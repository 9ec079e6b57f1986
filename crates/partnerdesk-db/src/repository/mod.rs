//! # Repository Module
//!
//! Database repository implementations for PartnerDesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and their tables                        │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │                                                                 │
//! │       │  db.partners().list_with_discount()                            │
//! │       ▼                                                                 │
//! │  PartnerRepository ─────► partners ⋈ partner_products                  │
//! │  ├── list_with_discount / get_by_id / count                            │
//! │  └── add / update / update_contact_details / delete                    │
//! │                                                                         │
//! │  SalesRepository ───────► partners, partner_products ⋈ products        │
//! │  ├── find_partner (id first, then name substring)                      │
//! │  └── partner_sales (newest first, dates normalized)                    │
//! │                                                                         │
//! │  MaterialRepository ────► products ⋈ product_types, material_types     │
//! │  ├── list_products / list_material_types                               │
//! │  └── calculate (two lookups, then pure arithmetic in the core)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PartnerRepository`](partner::PartnerRepository) - Partner CRUD and discount listing
//! - [`SalesRepository`](sales::SalesRepository) - Partner search and sale history
//! - [`MaterialRepository`](material::MaterialRepository) - Reference lists and material calculator

pub mod material;
pub mod partner;
pub mod sales;

use crate::error::{DbError, DbResult};

/// Number of rows a write statement touched.
///
/// Writes against an identifier that doesn't exist are not errors: they
/// return `Affected(0)`. Callers that care use [`Affected::or_not_found`].
///
/// ## Example
/// ```rust,ignore
/// // Lenient: a missing partner is fine
/// db.partners().delete(id).await?;
///
/// // Strict: a missing partner is NotFound
/// db.partners().delete(id).await?.or_not_found("Partner", id)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "check rows() or call or_not_found() to detect writes that matched nothing"]
pub struct Affected(u64);

impl Affected {
    pub(crate) fn new(rows: u64) -> Self {
        Affected(rows)
    }

    /// Rows touched by the statement.
    pub fn rows(self) -> u64 {
        self.0
    }

    /// True when the statement matched nothing.
    pub fn is_noop(self) -> bool {
        self.0 == 0
    }

    /// Turns a write that matched nothing into [`DbError::NotFound`].
    pub fn or_not_found(self, entity: &str, id: impl ToString) -> DbResult<Self> {
        if self.is_noop() {
            return Err(DbError::not_found(entity, id.to_string()));
        }
        Ok(self)
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Seeded in-memory database shared by the repository tests.
///
/// ```text
///  id  partner              type  sales (qty)            total    discount
///  ──  ───────────────────  ────  ─────────────────────  ───────  ────────
///   1  База Строитель       ЗАО   15500 + 12350          27850    5%
///   2  Паркет 29            ИП    37400 + 35000          72400    10%
///   3  Стройсервис          ООО   none                   -        (unlisted)
///   4  Склад 42             ПАО   300000                 300000   15%
///  42  Ремонт и отделка     ОАО   5 + 20 + 7             32       0%
/// ```
///
/// Partner 42's sale dates are stored as unix seconds, text and a Julian
/// day number respectively.
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::{Database, DbConfig};

    const FIXTURE_SQL: &str = r#"
        INSERT INTO product_types (id, label, coefficient) VALUES
            (1, 'Паркетная доска', 1.5),
            (2, 'Ламинат', 2.35);

        INSERT INTO products (id, name, product_type_id, min_cost_cents) VALUES
            (1, 'Паркетная доска Ясень темный однополосная 14 мм', 1, 445690),
            (2, 'Ламинат Дуб дымчато-белый 33 класс 12 мм', 2, 179975);

        INSERT INTO material_types (id, label, defect_percentage) VALUES
            (1, 'Тип материала 1', 10.0),
            (2, 'Тип материала 2', 0.0);

        INSERT INTO partners (id, partner_type, name, director, phone, rating, email, legal_address) VALUES
            (1, 'ЗАО', 'База Строитель', 'Иванова Александра Ивановна', '493 123 45 67', 7,
                'aleksandraivanova@ml.ru', '652050, Кемеровская область, город Юрга'),
            (2, 'ИП', 'Паркет 29', 'Воробьева Екатерина Валерьевна', '444 222 33 11', 3,
                'ekaterina.vorobeva@ml.ru', '164500, Архангельская область, город Северодвинск'),
            (3, 'ООО', 'Стройсервис', 'Соловьев Андрей Николаевич', '812 223 32 00', 7,
                'ansolovev@st.ru', '188910, Ленинградская область, город Приморск'),
            (4, 'ПАО', 'Склад 42', 'Степанов Степан Сергеевич', '912 888 33 33', 5,
                'stepanov@stepan.ru', '309500, Белгородская область, город Старый Оскол'),
            (42, 'ОАО', 'Ремонт и отделка', 'Воробьев Владислав Александрович', '444 333 33 33', 5,
                'vlad@remont.ru', '143960, Московская область, город Реутов');

        INSERT INTO partner_products (partner_id, product_id, quantity, sale_date) VALUES
            (1, 1, 15500, '2023-03-23'),
            (1, 2, 12350, '2023-12-18'),
            (2, 1, 37400, '2024-06-07'),
            (2, 2, 35000, '2022-12-02'),
            (4, 2, 300000, '2024-03-01'),
            (42, 1, 5, 1700000000),
            (42, 2, 20, '2024-01-05'),
            (42, 1, 7, 2460026.5);
    "#;

    /// Fresh in-memory database with schema and fixture rows.
    pub(crate) async fn seeded_database() -> Database {
        crate::logging::init_test();

        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database");
        sqlx::raw_sql(FIXTURE_SQL)
            .execute(db.pool())
            .await
            .expect("fixture rows");
        db
    }

    /// In-memory database with schema only.
    pub(crate) async fn empty_database() -> Database {
        crate::logging::init_test();

        Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partnerdesk_core::ErrorKind;

    #[test]
    fn test_affected_lenient_and_strict() {
        let none = Affected::new(0);
        assert!(none.is_noop());
        assert_eq!(none.or_not_found("Partner", 9).unwrap_err().kind(), ErrorKind::NotFound);

        let one = Affected::new(1);
        assert_eq!(one.rows(), 1);
        assert_eq!(one.or_not_found("Partner", 1).unwrap(), one);
    }
}
