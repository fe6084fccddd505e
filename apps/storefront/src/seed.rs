//! # Catalog Seeding
//!
//! Builds the starting [`Store`] from configuration.
//!
//! ```text
//! StorefrontConfig
//!   ├── [[promotions]] ──► Promotion (by name) ──┐
//!   └── [[products]] ────► Product ◄─────────────┘ attach
//!                              │
//!                              ▼
//!                            Store
//! ```
//!
//! With no `[[products]]` configured, [`default_store`] provides the stock
//! catalog: three laptops/phones/earbuds, a license without stock, and
//! capped shipping.

use std::collections::HashMap;
use std::sync::Arc;

use storefront_core::{DiscountRate, Money, Product, Promotion, SharedProduct, Store};
use tracing::info;

use crate::config::{
    ConfigError, ProductConfig, ProductKindConfig, PromotionConfig, PromotionKindConfig,
    StorefrontConfig,
};
use crate::error::AppResult;

// =============================================================================
// Built-in Catalog
// =============================================================================

/// The built-in catalog with its promotions attached.
pub fn default_store() -> AppResult<Store> {
    let second_half_price = Arc::new(Promotion::second_unit_half_price("Second Half price!")?);
    let third_one_free = Arc::new(Promotion::third_unit_free("Third One Free!")?);
    let thirty_percent = Arc::new(Promotion::percentage_off(
        "30% off!",
        DiscountRate::from_bps(3000),
    )?);

    let macbook = Product::standard("MacBook Air M2", Money::from_major_minor(1450, 0), 100)?;

    let mut earbuds =
        Product::standard("Bose QuietComfort Earbuds", Money::from_major_minor(250, 0), 500)?;
    earbuds.set_promotion(Some(third_one_free));

    let mut pixel = Product::standard("Google Pixel 7", Money::from_major_minor(500, 0), 250)?;
    pixel.set_promotion(Some(second_half_price));

    let mut license = Product::non_stocked("Windows License", Money::from_major_minor(125, 0))?;
    license.set_promotion(Some(thirty_percent));

    let shipping = Product::limited("Shipping", Money::from_major_minor(10, 0), 250, 1)?;

    Ok(Store::with_products(
        [macbook, earbuds, pixel, license, shipping]
            .into_iter()
            .map(SharedProduct::from),
    ))
}

// =============================================================================
// Configured Catalog
// =============================================================================

/// Builds the store described by `config`, falling back to
/// [`default_store`] when it lists no products.
///
/// ## Errors
/// `AppError::Catalog` when a configured product or promotion breaks the
/// catalog rules (empty name, negative price, percentage over 100, ...).
pub fn build_store(config: &StorefrontConfig) -> AppResult<Store> {
    if config.products.is_empty() {
        info!("No products configured, seeding built-in catalog");
        return default_store();
    }

    let mut promotions = HashMap::with_capacity(config.promotions.len());
    for entry in &config.promotions {
        promotions.insert(entry.name.as_str(), Arc::new(build_promotion(entry)?));
    }

    let mut store = Store::new();
    for entry in &config.products {
        let mut product = build_product(entry)?;
        if let Some(name) = &entry.promotion {
            // validate() has already checked the reference
            let promotion = promotions.get(name.as_str()).cloned().ok_or_else(|| {
                ConfigError::UnknownPromotion {
                    product: entry.name.clone(),
                    promotion: name.clone(),
                }
            })?;
            product.set_promotion(Some(promotion));
        }
        store.add(product.into_shared());
    }

    info!(products = store.len(), "Seeded catalog from config");
    Ok(store)
}

fn build_promotion(entry: &PromotionConfig) -> AppResult<Promotion> {
    let promotion = match entry.kind {
        PromotionKindConfig::PercentageOff => {
            let percentage = entry.percentage.ok_or_else(|| {
                ConfigError::InvalidConfig(format!(
                    "promotion '{}' needs a percentage",
                    entry.name
                ))
            })?;
            let rate = DiscountRate::from_percentage(percentage)
                .map_err(storefront_core::CoreError::from)?;
            Promotion::percentage_off(entry.name.as_str(), rate)?
        }
        PromotionKindConfig::SecondUnitHalfPrice => {
            Promotion::second_unit_half_price(entry.name.as_str())?
        }
        PromotionKindConfig::ThirdUnitFree => Promotion::third_unit_free(entry.name.as_str())?,
    };
    Ok(promotion)
}

fn build_product(entry: &ProductConfig) -> AppResult<Product> {
    let price = Money::from_cents(entry.price_cents);
    let product = match entry.kind {
        ProductKindConfig::Standard => {
            Product::standard(entry.name.as_str(), price, entry.quantity)?
        }
        ProductKindConfig::NonStocked => Product::non_stocked(entry.name.as_str(), price)?,
        ProductKindConfig::Limited => {
            let max = entry.max_per_order.ok_or_else(|| {
                ConfigError::InvalidConfig(format!(
                    "limited product '{}' needs max_per_order",
                    entry.name
                ))
            })?;
            Product::limited(entry.name.as_str(), price, entry.quantity, max)?
        }
    };
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use storefront_core::{OrderLine, ProductKind};

    fn find(store: &Store, name: &str) -> SharedProduct {
        store
            .products()
            .iter()
            .find(|p| p.name() == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_default_store_contents() {
        let store = default_store().unwrap();
        assert_eq!(store.len(), 5);
        // 100 + 500 + 250 + 0 (license) + 250 (shipping)
        assert_eq!(store.total_active_quantity(), 1100);
        assert_eq!(store.list_active_products().len(), 5);
    }

    #[test]
    fn test_default_store_promotions() {
        let store = default_store().unwrap();

        let pixel = find(&store, "Google Pixel 7");
        let total = store.process_order(&[OrderLine::new(&pixel, 2)]).unwrap();
        assert_eq!(total, Money::from_major_minor(750, 0));

        let earbuds = find(&store, "Bose QuietComfort Earbuds");
        let total = store.process_order(&[OrderLine::new(&earbuds, 3)]).unwrap();
        assert_eq!(total, Money::from_major_minor(500, 0));

        let license = find(&store, "Windows License");
        let total = store.process_order(&[OrderLine::new(&license, 1)]).unwrap();
        assert_eq!(total, Money::from_major_minor(87, 50));
    }

    #[test]
    fn test_empty_config_uses_default_catalog() {
        let store = build_store(&StorefrontConfig::default()).unwrap();
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_build_store_from_config() {
        let config: StorefrontConfig = toml::from_str(
            r#"
[[promotions]]
name = "Half off"
kind = "percentage_off"
percentage = 50.0

[[products]]
name = "Cable"
price_cents = 1000
quantity = 10
promotion = "Half off"

[[products]]
name = "Gift Wrap"
price_cents = 300
kind = "limited"
quantity = 5
max_per_order = 2
"#,
        )
        .unwrap();

        let store = build_store(&config).unwrap();
        assert_eq!(store.len(), 2);

        let wrap = find(&store, "Gift Wrap");
        assert_eq!(
            wrap.snapshot().kind,
            ProductKind::Limited { max_per_order: 2 }
        );

        let cable = find(&store, "Cable");
        let total = store.process_order(&[OrderLine::new(&cable, 3)]).unwrap();
        assert_eq!(total, Money::from_cents(1500));
    }

    #[test]
    fn test_invalid_catalog_entry() {
        let config: StorefrontConfig = toml::from_str(
            r#"
[[products]]
name = "Broken"
price_cents = -100
quantity = 1
"#,
        )
        .unwrap();

        assert!(matches!(build_store(&config), Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_percentage_over_hundred_rejected() {
        let config: StorefrontConfig = toml::from_str(
            r#"
[[promotions]]
name = "Too generous"
kind = "percentage_off"
percentage = 150.0

[[products]]
name = "Cable"
price_cents = 1000
quantity = 10
"#,
        )
        .unwrap();

        assert!(matches!(build_store(&config), Err(AppError::Catalog(_))));
    }
}
