//! # Validation Module
//!
//! Input validation applied at the calling boundary, before anything
//! reaches a repository.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (external)                                      │
//! │  └── Immediate feedback while typing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── PartnerForm (raw text) → PartnerDetails (typed)                   │
//! │  └── Search term trimming                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK (rating >= 0)                                    │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories trust what they are given: `PartnerRepository::add` takes a
//! [`PartnerDetails`], which can only be built from a form through
//! [`validate_partner_form`] (or constructed directly by trusted code).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{PartnerDetails, PartnerType};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Options
// =============================================================================

/// Knobs for how strict partner validation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject emails that don't contain `@`.
    /// Default: true
    pub require_email_at: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            require_email_at: true,
        }
    }
}

impl ValidationOptions {
    /// Defaults overridden by environment variables.
    ///
    /// ## Environment Variables
    /// - `PARTNERDESK_STRICT_EMAIL`: `false`/`0`/`no`/`off` disables the `@` check
    pub fn from_env() -> Self {
        let mut options = ValidationOptions::default();

        if let Ok(value) = std::env::var("PARTNERDESK_STRICT_EMAIL") {
            options.require_email_at = parse_flag(&value).unwrap_or(options.require_email_at);
        }

        options
    }

    /// Sets whether emails must contain `@`.
    pub fn require_email_at(mut self, require: bool) -> Self {
        self.require_email_at = require;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Partner Form
// =============================================================================

/// Partner form exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PartnerForm {
    pub name: String,
    pub partner_type: String,
    pub director: String,
    pub phone: String,
    pub email: String,
    pub legal_address: String,
    pub rating: String,
}

/// Validates a partner form and turns it into a typed payload.
///
/// ## Rules (checked in this order, first failure wins)
/// 1. name, partner type, director, phone, email non-empty
/// 2. email contains `@` (when [`ValidationOptions::require_email_at`])
/// 3. legal address, rating non-empty
/// 4. partner type is a known label
/// 5. rating is a non-negative integer
///
/// ## Example
/// ```rust
/// use partnerdesk_core::validation::{validate_partner_form, PartnerForm, ValidationOptions};
///
/// let form = PartnerForm {
///     name: "Стройсервис".into(),
///     partner_type: "ООО".into(),
///     director: "Соловьев Андрей Николаевич".into(),
///     phone: "812 223 32 00".into(),
///     email: "ansolovev@st.ru".into(),
///     legal_address: "188910, Ленинградская область, город Приморск".into(),
///     rating: "7".into(),
/// };
/// let details = validate_partner_form(&form, ValidationOptions::default()).unwrap();
/// assert_eq!(details.rating, 7);
/// ```
pub fn validate_partner_form(
    form: &PartnerForm,
    options: ValidationOptions,
) -> ValidationResult<PartnerDetails> {
    let name = required("name", &form.name)?;
    let partner_type = required("partner_type", &form.partner_type)?;
    let director = required("director", &form.director)?;
    let phone = required("phone", &form.phone)?;
    let email = required("email", &form.email)?;
    if options.require_email_at && !email.contains('@') {
        return Err(ValidationError::invalid_format("email", "must contain '@'"));
    }
    let legal_address = required("legal_address", &form.legal_address)?;
    let rating = required("rating", &form.rating)?;

    Ok(PartnerDetails {
        partner_type: partner_type.parse::<PartnerType>()?,
        name: name.to_string(),
        director: director.to_string(),
        phone: phone.to_string(),
        rating: validate_rating(rating)?,
        email: email.to_string(),
        legal_address: legal_address.to_string(),
    })
}

/// Parses a rating: a non-negative integer.
pub fn validate_rating(raw: &str) -> ValidationResult<u32> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid_format("rating", "must be a whole number"))?;

    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "rating".to_string(),
        });
    }

    u32::try_from(value).map_err(|_| ValidationError::TooLarge {
        field: "rating".to_string(),
    })
}

/// Validates a partner search term ("an ID or part of a name").
///
/// ## Returns
/// The trimmed term; blank terms are rejected.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    required("search term", term).map(str::to_string)
}

fn required<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PartnerForm {
        PartnerForm {
            name: "Паркет 29".to_string(),
            partner_type: "ИП".to_string(),
            director: "Воробьева Екатерина Валерьевна".to_string(),
            phone: "444 222 33 11".to_string(),
            email: "ekaterina.vorobeva@ml.ru".to_string(),
            legal_address: "164500, Архангельская область, город Северодвинск".to_string(),
            rating: "3".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let details = validate_partner_form(&valid_form(), ValidationOptions::default()).unwrap();
        assert_eq!(details.partner_type, PartnerType::Ip);
        assert_eq!(details.rating, 3);
        assert_eq!(details.name, "Паркет 29");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut form = valid_form();
        form.name = "  Паркет 29 ".to_string();
        form.rating = " 10 ".to_string();
        let details = validate_partner_form(&form, ValidationOptions::default()).unwrap();
        assert_eq!(details.name, "Паркет 29");
        assert_eq!(details.rating, 10);
    }

    #[test]
    fn test_each_required_field() {
        let blank: [(fn(&mut PartnerForm), &str); 7] = [
            (|f| f.name.clear(), "name"),
            (|f| f.partner_type.clear(), "partner_type"),
            (|f| f.director = "   ".to_string(), "director"),
            (|f| f.phone.clear(), "phone"),
            (|f| f.email.clear(), "email"),
            (|f| f.legal_address.clear(), "legal_address"),
            (|f| f.rating.clear(), "rating"),
        ];

        for (clear, field) in blank {
            let mut form = valid_form();
            clear(&mut form);
            let err = validate_partner_form(&form, ValidationOptions::default()).unwrap_err();
            assert_eq!(err, ValidationError::required(field));
        }
    }

    #[test]
    fn test_email_at_check_is_optional() {
        let mut form = valid_form();
        form.email = "ekaterina.vorobeva.ml.ru".to_string();

        let err = validate_partner_form(&form, ValidationOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "email"));

        let lenient = ValidationOptions::default().require_email_at(false);
        assert!(validate_partner_form(&form, lenient).is_ok());
    }

    #[test]
    fn test_unknown_partner_type() {
        let mut form = valid_form();
        form.partner_type = "LLC".to_string();
        let err = validate_partner_form(&form, ValidationOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_validate_rating() {
        assert_eq!(validate_rating("0").unwrap(), 0);
        assert_eq!(validate_rating("10").unwrap(), 10);
        assert!(matches!(
            validate_rating("-1").unwrap_err(),
            ValidationError::MustNotBeNegative { .. }
        ));
        assert!(matches!(
            validate_rating("five").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
        assert!(matches!(
            validate_rating("4.5").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
        assert!(matches!(
            validate_rating("99999999999").unwrap_err(),
            ValidationError::TooLarge { .. }
        ));
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("  42 ").unwrap(), "42");
        assert!(validate_search_term("   ").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("OFF"), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
