//! Validation utilities for client-side forms
//!
//! The backend remains the authority; these checks only stop obviously
//! broken input before a request is sent.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::codec::NOTE_SEPARATOR;

/// Longest counterparty name the stock dialog accepts
pub const MAX_PARTNER_LEN: usize = 120;

// ============================================================================
// Field validators used by `#[derive(Validate)]`
// ============================================================================

/// Reject negative monetary values
pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("negative");
        err.message = Some(Cow::from("Value cannot be negative"));
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Stock dialog
// ============================================================================

/// Validate a counterparty name before it is packed into a note
pub fn validate_partner_name(partner: &str) -> Result<(), &'static str> {
    let partner = partner.trim();
    if partner.chars().count() > MAX_PARTNER_LEN {
        return Err("Partner name is too long");
    }
    if partner.contains(NOTE_SEPARATOR.trim()) {
        return Err("Partner name cannot contain the note separator");
    }
    Ok(())
}

// ============================================================================
// Login
// ============================================================================

/// Validate login input before building a credential
pub fn validate_login(username: &str, password: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() {
        return Err("Username is required");
    }
    if username.contains(':') {
        return Err("Username cannot contain ':'");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductForm;
    use std::str::FromStr;
    use validator::Validate;

    #[test]
    fn test_non_negative_decimal() {
        assert!(validate_non_negative_decimal(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_decimal(&Decimal::from_str("3.50").unwrap()).is_ok());
        assert!(validate_non_negative_decimal(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_partner_name() {
        assert!(validate_partner_name("Acme Ltd").is_ok());
        assert!(validate_partner_name("").is_ok());
        assert!(validate_partner_name("Acme · Beta").is_err());
        assert!(validate_partner_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn test_login() {
        assert!(validate_login("admin", "secret").is_ok());
        assert!(validate_login("  ", "secret").is_err());
        assert!(validate_login("ad:min", "secret").is_err());
        assert!(validate_login("admin", "").is_err());
    }

    #[test]
    fn test_product_form() {
        let form = ProductForm {
            name: "Vida M4".to_string(),
            unit_cost: Decimal::from_str("3.5").unwrap(),
            stock_quantity: 120,
            alert_threshold: 50,
            description: None,
        };
        assert!(form.validate().is_ok());

        let invalid = ProductForm {
            name: String::new(),
            unit_cost: Decimal::from_str("-1").unwrap(),
            stock_quantity: -1,
            ..form
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("unit_cost"));
        assert!(fields.contains_key("stock_quantity"));
    }
}
