//! # Domain Types
//!
//! Core domain types used throughout PartnerDesk.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Partner      │   │ PartnerStanding  │   │  PartnerSale    │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (store)     │──►│  partner         │   │  product_name   │      │
//! │  │  partner_type   │   │  total_quantity  │   │  quantity       │      │
//! │  │  name, rating   │   │  discount() ◄─── derived, never stored│      │
//! │  └─────────────────┘   └──────────────────┘   │  total (Money)  │      │
//! │                                               └─────────────────┘      │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │ PartnerDetails  │   │  PartnerMatch    │   │ ReferenceItem   │      │
//! │  │ add/update body │   │  search result   │   │ "id - name"     │      │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::discount::DiscountTier;
use crate::error::ValidationError;
use crate::money::Money;

/// Share of a sale's total reported as estimated profit, in basis points.
pub const ESTIMATED_PROFIT_BPS: u32 = 2000;

// =============================================================================
// Partner Type
// =============================================================================

/// Legal form of a partner company.
///
/// Stored and serialized as its label. The variants differ only in display;
/// no rule in this crate branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum PartnerType {
    /// Limited liability company.
    #[serde(rename = "ООО")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "ООО"))]
    Ooo,
    /// Sole proprietor.
    #[serde(rename = "ИП")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "ИП"))]
    Ip,
    /// Open joint-stock company.
    #[serde(rename = "ОАО")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "ОАО"))]
    Oao,
    /// Public joint-stock company.
    #[serde(rename = "ПАО")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "ПАО"))]
    Pao,
    /// Closed joint-stock company.
    #[serde(rename = "ЗАО")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "ЗАО"))]
    Zao,
}

impl PartnerType {
    /// Every partner type, in the order pick lists show them.
    pub const ALL: [PartnerType; 5] = [
        PartnerType::Ooo,
        PartnerType::Ip,
        PartnerType::Oao,
        PartnerType::Pao,
        PartnerType::Zao,
    ];

    /// Returns the stored label.
    pub const fn label(&self) -> &'static str {
        match self {
            PartnerType::Ooo => "ООО",
            PartnerType::Ip => "ИП",
            PartnerType::Oao => "ОАО",
            PartnerType::Pao => "ПАО",
            PartnerType::Zao => "ЗАО",
        }
    }
}

impl fmt::Display for PartnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PartnerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        PartnerType::ALL
            .into_iter()
            .find(|t| t.label() == label)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "partner_type".to_string(),
                allowed: PartnerType::ALL.iter().map(|t| t.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Partner
// =============================================================================

/// A reseller company as stored.
///
/// There is deliberately no discount field: see [`PartnerStanding`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Partner {
    /// Store-assigned identifier.
    pub id: i64,
    pub partner_type: PartnerType,
    /// Company name.
    pub name: String,
    pub director: String,
    pub phone: String,
    pub rating: u32,
    pub email: String,
    pub legal_address: String,
}

impl Partner {
    /// Returns the writable payload of this partner.
    pub fn details(&self) -> PartnerDetails {
        PartnerDetails {
            partner_type: self.partner_type,
            name: self.name.clone(),
            director: self.director.clone(),
            phone: self.phone.clone(),
            rating: self.rating,
            email: self.email.clone(),
            legal_address: self.legal_address.clone(),
        }
    }
}

/// Partner payload for add and update, already validated.
///
/// Produced by [`crate::validation::validate_partner_form`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PartnerDetails {
    pub partner_type: PartnerType,
    pub name: String,
    pub director: String,
    pub phone: String,
    pub rating: u32,
    pub email: String,
    pub legal_address: String,
}

// =============================================================================
// Partner Standing (partner + aggregated sales)
// =============================================================================

/// A partner together with its summed sale quantity.
///
/// Only partners with at least one sale row ever have a standing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PartnerStanding {
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub partner: Partner,
    /// Sum of `quantity` over every sale row of the partner.
    pub total_quantity: i64,
}

impl PartnerStanding {
    /// Discount tier derived from the summed quantity.
    ///
    /// Recomputed on every call; there is nothing to go stale.
    pub fn discount(&self) -> DiscountTier {
        DiscountTier::for_quantity(self.total_quantity)
    }
}

/// Row of the partner listing handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PartnerListItem {
    #[serde(flatten)]
    pub partner: Partner,
    pub total_quantity: i64,
    pub discount_percent: u8,
}

impl From<PartnerStanding> for PartnerListItem {
    fn from(standing: PartnerStanding) -> Self {
        let discount_percent = standing.discount().percent();
        PartnerListItem {
            partner: standing.partner,
            total_quantity: standing.total_quantity,
            discount_percent,
        }
    }
}

// =============================================================================
// Search & Sales
// =============================================================================

/// Result of a partner search: identifier and company name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PartnerMatch {
    pub id: i64,
    pub name: String,
}

/// One historical sale of a partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PartnerSale {
    pub product_name: String,
    pub quantity: i64,
    /// Always `YYYY-MM-DD` unless the stored value was unrecognizable.
    pub sale_date: String,
    /// Label of the product's category.
    pub product_type: String,
    /// `quantity × unit cost`, computed at query time.
    pub total: Money,
}

impl PartnerSale {
    /// Estimated profit on this sale ([`ESTIMATED_PROFIT_BPS`] of the total).
    pub fn estimated_profit(&self) -> Money {
        self.total.portion_bps(ESTIMATED_PROFIT_BPS)
    }
}

// =============================================================================
// Reference Data
// =============================================================================

/// An `(identifier, display name)` pair from a reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ReferenceItem {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for ReferenceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_partner() -> Partner {
        Partner {
            id: 42,
            partner_type: PartnerType::Zao,
            name: "База Строитель".to_string(),
            director: "Иванова Александра Ивановна".to_string(),
            phone: "493 123 45 67".to_string(),
            rating: 7,
            email: "aleksandraivanova@ml.ru".to_string(),
            legal_address: "652050, Кемеровская область, город Юрга".to_string(),
        }
    }

    #[test]
    fn test_partner_type_labels_round_trip() {
        for t in PartnerType::ALL {
            assert_eq!(t.label().parse::<PartnerType>().unwrap(), t);
        }
        assert_eq!(" ИП ".parse::<PartnerType>().unwrap(), PartnerType::Ip);
    }

    #[test]
    fn test_partner_type_rejects_unknown_label() {
        let err = "LLC".parse::<PartnerType>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_partner_type_serializes_as_label() {
        let json = serde_json::to_string(&PartnerType::Pao).unwrap();
        assert_eq!(json, "\"ПАО\"");
    }

    #[test]
    fn test_standing_discount_is_derived() {
        let mut standing = PartnerStanding {
            partner: sample_partner(),
            total_quantity: 9_999,
        };
        assert_eq!(standing.discount(), DiscountTier::None);

        standing.total_quantity += 1;
        assert_eq!(standing.discount(), DiscountTier::Five);
    }

    #[test]
    fn test_list_item_carries_discount_snapshot() {
        let item = PartnerListItem::from(PartnerStanding {
            partner: sample_partner(),
            total_quantity: 120_000,
        });
        assert_eq!(item.discount_percent, 10);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["discountPercent"], 10);
        assert_eq!(json["name"], "База Строитель");
    }

    #[test]
    fn test_sale_estimated_profit() {
        let sale = PartnerSale {
            product_name: "Паркетная доска Ясень темный".to_string(),
            quantity: 15_500,
            sale_date: "2023-03-23".to_string(),
            product_type: "Паркетная доска".to_string(),
            total: Money::from_cents(100_000),
        };
        assert_eq!(sale.estimated_profit().cents(), 20_000);
    }

    #[test]
    fn test_reference_item_display() {
        let item = ReferenceItem {
            id: 3,
            name: "Тип материала 3".to_string(),
        };
        assert_eq!(item.to_string(), "3 - Тип материала 3");
    }

    #[test]
    fn test_details_copies_writable_fields() {
        let partner = sample_partner();
        let details = partner.details();
        assert_eq!(details.name, partner.name);
        assert_eq!(details.rating, 7);
        assert_eq!(details.partner_type, PartnerType::Zao);
    }
}
