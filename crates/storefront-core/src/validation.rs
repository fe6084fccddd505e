//! # Validation Module
//!
//! Input validation for product and promotion construction and purchases.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Product::standard / non_stocked / limited                             │
//! │  ├── validate_product_name                                             │
//! │  ├── validate_unit_price                                               │
//! │  ├── validate_stock_quantity                                           │
//! │  └── validate_max_per_order (limited only)                             │
//! │                                                                         │
//! │  Promotion constructors                                                │
//! │  ├── validate_promotion_name                                           │
//! │  └── validate_discount_bps (percentage off only)                       │
//! │                                                                         │
//! │  Product::buy                                                          │
//! │  └── validate_purchase_quantity                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_name, validate_purchase_quantity};
//!
//! validate_product_name("MacBook Air M2").unwrap();
//! assert!(validate_purchase_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Google Pixel 7").is_ok());
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a promotion name. Same rules as product names.
pub fn validate_promotion_name(name: &str) -> ValidationResult<()> {
    validate_name("promotion name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed; negative is not.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a requested purchase quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// Order line: "Google Pixel 7" × 0
///       │
///       ▼
/// validate_purchase_quantity(0) ← THIS FUNCTION
///       │
///       └── qty <= 0? → Error: "quantity must be positive"
/// ```
pub fn validate_purchase_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the per-order cap of a limited product. Must be positive.
pub fn validate_max_per_order(max: i64) -> ValidationResult<()> {
    if max <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "max_per_order".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("MacBook Air M2").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("  \t ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
        assert_eq!(
            validate_product_name(&"A".repeat(201)),
            Err(ValidationError::TooLong {
                field: "name".to_string(),
                max: 200
            })
        );
    }

    #[test]
    fn test_validate_promotion_name() {
        assert!(validate_promotion_name("30% off!").is_ok());
        assert_eq!(
            validate_promotion_name(""),
            Err(ValidationError::Required {
                field: "promotion name".to_string()
            })
        );
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(500).is_ok());
        assert!(validate_stock_quantity(-5).is_err());
    }

    #[test]
    fn test_validate_purchase_quantity() {
        assert!(validate_purchase_quantity(1).is_ok());
        assert!(validate_purchase_quantity(1000).is_ok());

        assert!(validate_purchase_quantity(0).is_err());
        assert!(validate_purchase_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_max_per_order() {
        assert!(validate_max_per_order(1).is_ok());
        assert!(validate_max_per_order(0).is_err());
        assert!(validate_max_per_order(-3).is_err());
    }

    #[test]
    fn test_validate_discount_bps() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(3000).is_ok());
        assert!(validate_discount_bps(10000).is_ok());
        assert!(validate_discount_bps(10001).is_err());
    }
}
