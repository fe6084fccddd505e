//! # storefront-core: Pricing and Inventory Engine
//!
//! This crate holds the catalog logic for Storefront: products with stock
//! rules, promotions that price a purchase, and a store that runs multi-line
//! orders. It has no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                apps/storefront (terminal menu)                  │   │
//! │  │    list products ──► total stock ──► make an order             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │  product  │  │ promotion │  │   money   │  │   │
//! │  │   │   Store   │─►│  Product  │─►│ Promotion │─►│   Money   │  │   │
//! │  │   │ OrderLine │  │  Shared-  │  │ Discount- │  │           │  │   │
//! │  │   │           │  │  Product  │  │   Rate    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL • PURE FUNCTIONS + STOCK     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`promotion`] - Promotion strategies and discount rates
//! - [`product`] - Product kinds, purchase rules, shared handles
//! - [`store`] - Catalog and order processing
//! - [`error`] - Domain error types
//! - [`validation`] - Constructor and quantity validation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use storefront_core::{Money, OrderLine, Product, Promotion, Store};
//!
//! let laptop = Product::standard("MacBook Air M2", Money::from_major_minor(1450, 0), 100)
//!     .unwrap()
//!     .into_shared();
//! laptop.set_promotion(Some(Arc::new(
//!     Promotion::second_unit_half_price("Second Half price!").unwrap(),
//! )));
//!
//! let mut store = Store::new();
//! store.add(laptop.clone());
//!
//! let total = store.process_order(&[OrderLine::new(&laptop, 2)]).unwrap();
//! assert_eq!(total, Money::from_major_minor(2175, 0));
//! assert_eq!(store.total_active_quantity(), 98);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{Product, ProductKind, ProductSnapshot, SharedProduct};
pub use promotion::{DiscountRate, Promotion, PromotionKind};
pub use store::{OrderLine, Store};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of product and promotion names, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
