//! # Material Requirements
//!
//! Pure arithmetic for "how much raw material do we need to make N units".
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  per_unit  = param1 × param2 × product_coefficient                      │
//! │  total     = quantity × per_unit                                        │
//! │  total    *= 1 + defect% / 100        (only when defect% > 0)           │
//! │  required  = ⌈total⌉                  (always up, never nearest)        │
//! │                                                                         │
//! │  Example: 100 × (2.0 × 3.0 × 1.5) = 900  →  ×1.10 = 990  →  990         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding up is the point: ordering one unit too many is cheap, stopping
//! a production run one unit short is not.
//!
//! The coefficient and defect percentage come from reference tables, so the
//! lookups live in `partnerdesk-db`; this module only validates and computes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Distance from an integer, in units in the last place of the result, under
/// which the result counts as that integer. Absorbs the rounding error of the
/// multiplication chain, such as `900.0 * 1.1 == 990.0000000000001`, and
/// nothing larger: a fraction of 0.05 on 1e8 units still rounds up.
const NOISE_ULPS: f64 = 4.0;

/// Largest float error `ceil_units` will snap away for `value`.
fn noise_tolerance(value: f64) -> f64 {
    NOISE_ULPS * f64::EPSILON * value.abs()
}

/// A validated material calculation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MaterialRequest {
    pub product_id: i64,
    pub material_id: i64,
    /// Units of product to manufacture.
    pub quantity: i64,
    pub param1: f64,
    pub param2: f64,
}

impl MaterialRequest {
    /// Builds and validates a request from numeric values.
    pub fn new(
        product_id: i64,
        material_id: i64,
        quantity: i64,
        param1: f64,
        param2: f64,
    ) -> CoreResult<Self> {
        let request = MaterialRequest {
            product_id,
            material_id,
            quantity,
            param1,
            param2,
        };
        request.validate()?;
        Ok(request)
    }

    /// Builds a request from the raw text of the calculator form.
    ///
    /// Malformed numbers fail with [`CoreError::InvalidInput`]; well-formed
    /// but non-positive numbers fail with a validation error.
    ///
    /// ## Example
    /// ```rust
    /// use partnerdesk_core::material::MaterialRequest;
    /// use partnerdesk_core::ErrorKind;
    ///
    /// let req = MaterialRequest::parse(1, 2, "100", "2.0", "3").unwrap();
    /// assert_eq!(req.quantity, 100);
    ///
    /// let err = MaterialRequest::parse(1, 2, "100", "2,0", "3").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidInput);
    /// ```
    pub fn parse(
        product_id: i64,
        material_id: i64,
        quantity: &str,
        param1: &str,
        param2: &str,
    ) -> CoreResult<Self> {
        let quantity = parse_number::<i64>("quantity", quantity)?;
        let param1 = parse_number::<f64>("param1", param1)?;
        let param2 = parse_number::<f64>("param2", param2)?;
        MaterialRequest::new(product_id, material_id, quantity, param1, param2)
    }

    /// Checks quantity and process parameters.
    pub fn validate(&self) -> CoreResult<()> {
        if self.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }
        check_parameter("param1", self.param1)?;
        check_parameter("param2", self.param2)?;
        Ok(())
    }

    /// Computes the requirement once the reference values are known.
    pub fn estimate(&self, coefficient: f64, defect_percentage: f64) -> CoreResult<MaterialEstimate> {
        MaterialEstimate::compute(self.quantity, self.param1, self.param2, coefficient, defect_percentage)
    }
}

/// Breakdown of a material calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MaterialEstimate {
    pub per_unit: f64,
    /// `quantity × per_unit`, before the defect allowance.
    pub base_total: f64,
    /// `base_total` inflated by the defect percentage.
    pub total_with_defects: f64,
    /// Whole units to order.
    pub required: i64,
}

impl MaterialEstimate {
    /// Runs the calculation.
    ///
    /// ## Example
    /// ```rust
    /// use partnerdesk_core::material::MaterialEstimate;
    ///
    /// let est = MaterialEstimate::compute(100, 2.0, 3.0, 1.5, 10.0).unwrap();
    /// assert_eq!(est.per_unit, 9.0);
    /// assert_eq!(est.base_total, 900.0);
    /// assert_eq!(est.required, 990);
    /// ```
    pub fn compute(
        quantity: i64,
        param1: f64,
        param2: f64,
        coefficient: f64,
        defect_percentage: f64,
    ) -> CoreResult<Self> {
        let per_unit = param1 * param2 * coefficient;
        let base_total = quantity as f64 * per_unit;

        let total_with_defects = if defect_percentage > 0.0 {
            base_total * (1.0 + defect_percentage / 100.0)
        } else {
            base_total
        };

        let required = ceil_units(total_with_defects).ok_or_else(|| ValidationError::TooLarge {
            field: "quantity".to_string(),
        })?;

        Ok(MaterialEstimate {
            per_unit,
            base_total,
            total_with_defects,
            required,
        })
    }
}

/// Rounds up to whole units, snapping float noise to the nearest integer
/// first. The snap window scales with the value's precision, never with its
/// magnitude in whole units. `None` when the value doesn't fit an `i64`.
fn ceil_units(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }

    let nearest = value.round();
    let snapped = if (value - nearest).abs() <= noise_tolerance(value) {
        nearest
    } else {
        value.ceil()
    };

    if snapped >= i64::MAX as f64 || snapped < i64::MIN as f64 {
        return None;
    }
    Some(snapped as i64)
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> CoreResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| CoreError::invalid_input(field, raw))
}

fn check_parameter(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_format(field, "must be a finite number").into());
    }
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
