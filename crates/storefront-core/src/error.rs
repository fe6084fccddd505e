//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Purchase and order failures                    │
//! │  └── ValidationError  - Bad constructor input / quantities             │
//! │                                                                         │
//! │  storefront app errors (apps/storefront)                               │
//! │  └── AppError         - Config, I/O, and wrapped CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the product name in every purchase error
//! 3. Errors are enum variants, never String
//! 4. Nothing here is retried; the caller decides what to show

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Purchase and order-processing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Constructor input or requested quantity is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Product has been deactivated (or has run out of stock).
    #[error("Product {product} is not active")]
    Inactive { product: String },

    /// Insufficient stock to complete the purchase.
    ///
    /// ## User Workflow
    /// ```text
    /// Order line (qty: 10)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { product: "MacBook Air M2", available: 5, requested: 10 }
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Requested quantity is over a limited product's per-order cap.
    #[error("Order limit exceeded for {product}: at most {max} per order, requested {requested}")]
    OrderLimitExceeded {
        product: String,
        max: i64,
        requested: i64,
    },

    /// An order referenced a product that is not in the store's catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when constructor input or a purchase quantity doesn't
/// meet requirements. They surface to callers as `CoreError::InvalidArgument`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Operation does not apply to this kind of value.
    #[error("{field}: {reason}")]
    NotAllowed { field: String, reason: String },

    /// Computed amount does not fit in `Money`.
    #[error("{field} is too large")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product: "MacBook Air M2".to_string(),
            available: 5,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for MacBook Air M2: available 5, requested 10"
        );

        let err = CoreError::OrderLimitExceeded {
            product: "Shipping".to_string(),
            max: 1,
            requested: 2,
        };
        assert_eq!(
            err.to_string(),
            "Order limit exceeded for Shipping: at most 1 per order, requested 2"
        );

        let err = CoreError::Inactive {
            product: "Google Pixel 7".to_string(),
        };
        assert_eq!(err.to_string(), "Product Google Pixel 7 is not active");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::InvalidArgument(_)));
        assert_eq!(core_err.to_string(), "Invalid argument: name is required");
    }
}
