//! # App Error Type
//!
//! Unified error type for the storefront binary.
//!
//! ```text
//! ConfigError ──┐
//! CoreError ────┼──► AppError ──► main() prints it and exits non-zero
//! io::Error ────┘
//! ```
//!
//! Order failures never reach this type: the menu catches them and prints
//! them to the user. Only startup failures (bad config, bad seed data) and
//! terminal I/O errors end the program.

use storefront_core::CoreError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Seed data rejected by the catalog rules.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CoreError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ValidationError;

    #[test]
    fn test_core_error_wraps() {
        let err: AppError = CoreError::from(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(
            err.to_string(),
            "Catalog error: Invalid argument: name is required"
        );
    }

    #[test]
    fn test_config_error_wraps() {
        let err: AppError = ConfigError::InvalidConfig("store name is empty".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
    }
}
