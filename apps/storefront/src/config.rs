//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_STORE_NAME="Downtown Branch"                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or STOREFRONT_CONFIG=<PATH>, or                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "Best Buy" with the built-in seed catalog                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Best Buy"
//!
//! [[promotions]]
//! name = "30% off!"
//! kind = "percentage_off"
//! percentage = 30.0
//!
//! [[products]]
//! name = "Windows License"
//! price_cents = 12500
//! kind = "non_stocked"
//! promotion = "30% off!"
//!
//! [[products]]
//! name = "Shipping"
//! price_cents = 1000
//! quantity = 250
//! kind = "limited"
//! max_per_order = 1
//! ```
//!
//! When no `[[products]]` are configured the built-in catalog is used.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Product '{product}' references unknown promotion '{promotion}'")]
    UnknownPromotion { product: String, promotion: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown in the menu header.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Best Buy".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKindConfig {
    PercentageOff,
    SecondUnitHalfPrice,
    ThirdUnitFree,
}

/// One `[[promotions]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionConfig {
    pub name: String,
    pub kind: PromotionKindConfig,
    /// Required for `percentage_off`, ignored otherwise.
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKindConfig {
    #[default]
    Standard,
    NonStocked,
    Limited,
}

/// One `[[products]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub price_cents: i64,
    /// Ignored for `non_stocked`.
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub kind: ProductKindConfig,
    /// Required for `limited`.
    #[serde(default)]
    pub max_per_order: Option<i64>,
    /// Name of a `[[promotions]]` entry.
    #[serde(default)]
    pub promotion: Option<String>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub promotions: Vec<PromotionConfig>,

    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path`, else `STOREFRONT_CONFIG`, else the
    ///    platform default. An explicitly named file must exist; the platform
    ///    default is optional.
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os("STOREFRONT_CONFIG").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::read(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn read(path: &PathBuf) -> ConfigResult<Self> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Checks cross-references and kind-specific fields.
    ///
    /// Field ranges (negative prices, empty names, percentages over 100) are
    /// left to the catalog constructors when the store is seeded.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("store name is empty".into()));
        }

        let mut promotion_names = HashSet::new();
        for promotion in &self.promotions {
            if !promotion_names.insert(promotion.name.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "duplicate promotion '{}'",
                    promotion.name
                )));
            }
            if promotion.kind == PromotionKindConfig::PercentageOff && promotion.percentage.is_none() {
                return Err(ConfigError::InvalidConfig(format!(
                    "promotion '{}' needs a percentage",
                    promotion.name
                )));
            }
        }

        for product in &self.products {
            if product.kind == ProductKindConfig::Limited && product.max_per_order.is_none() {
                return Err(ConfigError::InvalidConfig(format!(
                    "limited product '{}' needs max_per_order",
                    product.name
                )));
            }
            if let Some(promotion) = &product.promotion {
                if !promotion_names.contains(promotion.as_str()) {
                    return Err(ConfigError::UnknownPromotion {
                        product: product.name.clone(),
                        promotion: promotion.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("STOREFRONT_STORE_NAME") {
            debug!(name = %name, "Overriding store name from environment");
            self.store.name = name;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"
[store]
name = "Downtown Branch"

[[promotions]]
name = "30% off!"
kind = "percentage_off"
percentage = 30.0

[[promotions]]
name = "Third One Free!"
kind = "third_unit_free"

[[products]]
name = "Windows License"
price_cents = 12500
kind = "non_stocked"
promotion = "30% off!"

[[products]]
name = "Shipping"
price_cents = 1000
quantity = 250
kind = "limited"
max_per_order = 1

[[products]]
name = "Bose QuietComfort Earbuds"
price_cents = 25000
quantity = 500
promotion = "Third One Free!"
"#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.store.name, "Best Buy");
        assert!(config.products.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(SAMPLE);
        let config = StorefrontConfig::load(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.promotions.len(), 2);
        assert_eq!(config.products.len(), 3);
        assert_eq!(config.products[0].kind, ProductKindConfig::NonStocked);
        assert_eq!(config.products[1].max_per_order, Some(1));
        assert_eq!(config.products[2].kind, ProductKindConfig::Standard);
        assert_eq!(config.promotions[0].percentage, Some(30.0));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = StorefrontConfig::load(Some(PathBuf::from("/nonexistent/storefront.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("[store\nname = ");
        let result = StorefrontConfig::load(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_promotion_rejected() {
        let file = write_config(
            r#"
[[products]]
name = "Google Pixel 7"
price_cents = 50000
quantity = 250
promotion = "Nonexistent"
"#,
        );
        let result = StorefrontConfig::load(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::UnknownPromotion { .. })));
    }

    #[test]
    fn test_validation_rules() {
        let mut config: StorefrontConfig = toml::from_str(SAMPLE).unwrap();
        assert!(config.validate().is_ok());

        config.products[1].max_per_order = None;
        assert!(config.validate().is_err());
        config.products[1].max_per_order = Some(1);

        config.promotions[0].percentage = None;
        assert!(config.validate().is_err());
        config.promotions[0].percentage = Some(30.0);

        config.promotions[1].name = "30% off!".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_sections() {
        let config: StorefrontConfig = toml::from_str(SAMPLE).unwrap();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[[products]]"));
    }
}
