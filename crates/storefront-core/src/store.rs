//! # Store
//!
//! An ordered catalog of shared products and the order pipeline.
//!
//! ## Order Processing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store::process_order                                 │
//! │                                                                         │
//! │  shopping list: [(Pixel, 2), (Earbuds, 3), (MacBook, 1)]               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Every product in catalog? ── no ──► ProductNotFound (nothing sold)  │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  2. For each line: product.buy(qty)                                     │
//! │       │    └── error ──► abort, propagate                               │
//! │       │                  (earlier lines stay sold)                      │
//! │       ▼                                                                 │
//! │  3. Sum line totals ──► grand total                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shared Catalogs
//! Stores hold [`SharedProduct`] handles. Merging two stores copies the
//! handles, not the products: a purchase through the merged store is visible
//! through the originals.

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::product::SharedProduct;

// =============================================================================
// Order Line
// =============================================================================

/// One entry of a shopping list.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product: SharedProduct,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product: &SharedProduct, quantity: i64) -> Self {
        OrderLine {
            product: product.clone(),
            quantity,
        }
    }
}

impl From<(SharedProduct, i64)> for OrderLine {
    fn from((product, quantity): (SharedProduct, i64)) -> Self {
        OrderLine { product, quantity }
    }
}

// =============================================================================
// Store
// =============================================================================

/// A catalog of products in insertion order.
///
/// Duplicate handles are allowed; nothing enforces uniqueness.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<SharedProduct>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Store {
            products: Vec::new(),
        }
    }

    /// Creates a store holding the given products in order.
    pub fn with_products(products: impl IntoIterator<Item = SharedProduct>) -> Self {
        Store {
            products: products.into_iter().collect(),
        }
    }

    /// Appends a product to the catalog.
    pub fn add(&mut self, product: SharedProduct) {
        debug!(name = %product.name(), "Adding product to store");
        self.products.push(product);
    }

    /// Removes the first handle to `product`. No-op if it is not present.
    pub fn remove(&mut self, product: &SharedProduct) {
        if let Some(index) = self.products.iter().position(|p| p.ptr_eq(product)) {
            let removed = self.products.remove(index);
            debug!(name = %removed.name(), "Removed product from store");
        }
    }

    /// Returns true if the catalog holds this exact product.
    pub fn contains(&self, product: &SharedProduct) -> bool {
        self.products.iter().any(|p| p.ptr_eq(product))
    }

    /// All products, active or not, in insertion order.
    pub fn products(&self) -> &[SharedProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sum of stock over active products.
    ///
    /// Non-stocked products are always active and always report zero, so
    /// they contribute nothing either way.
    pub fn total_active_quantity(&self) -> i64 {
        self.products
            .iter()
            .map(|p| p.with_product(|p| if p.is_active() { p.quantity() } else { 0 }))
            .sum()
    }

    /// Active products in insertion order.
    pub fn list_active_products(&self) -> Vec<SharedProduct> {
        self.products
            .iter()
            .filter(|p| p.is_active())
            .cloned()
            .collect()
    }

    /// All products sorted by unit price, cheapest first.
    ///
    /// Products with the same price keep their insertion order.
    pub fn products_by_price(&self) -> Vec<SharedProduct> {
        let mut sorted = self.products.clone();
        sorted.sort_by_key(SharedProduct::unit_price);
        sorted
    }

    /// Buys every line of `shopping_list` and returns the grand total.
    ///
    /// ## Errors
    /// - `ProductNotFound` if any line names a product outside this catalog;
    ///   checked for all lines before anything is bought.
    /// - Any error from [`crate::product::Product::buy`]. Processing stops at
    ///   the failing line and lines before it are **not** rolled back.
    /// - `InvalidArgument` if the grand total overflows; the line that
    ///   overflowed it stays sold.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::product::Product;
    /// use storefront_core::store::{OrderLine, Store};
    ///
    /// let pixel = Product::standard("Google Pixel 7", Money::from_major_minor(500, 0), 250)
    ///     .unwrap()
    ///     .into_shared();
    /// let mut store = Store::new();
    /// store.add(pixel.clone());
    ///
    /// let total = store.process_order(&[OrderLine::new(&pixel, 2)]).unwrap();
    /// assert_eq!(total, Money::from_major_minor(1000, 0));
    /// assert_eq!(pixel.quantity(), 248);
    /// ```
    pub fn process_order(&self, shopping_list: &[OrderLine]) -> CoreResult<Money> {
        debug!(lines = shopping_list.len(), "Processing order");

        if let Some(line) = shopping_list.iter().find(|l| !self.contains(&l.product)) {
            return Err(CoreError::ProductNotFound(line.product.name()));
        }

        let mut total = Money::zero();
        for (index, line) in shopping_list.iter().enumerate() {
            let bought = line.product.buy(line.quantity).and_then(|line_total| {
                total.checked_add(line_total).ok_or_else(|| {
                    CoreError::from(ValidationError::Overflow {
                        field: "order total".to_string(),
                    })
                })
            });
            match bought {
                Ok(running) => total = running,
                Err(e) => {
                    warn!(
                        line = index,
                        product = %line.product.name(),
                        error = %e,
                        "Order line failed, earlier lines stay applied"
                    );
                    return Err(e);
                }
            }
        }

        debug!(total = %total, "Order complete");
        Ok(total)
    }

    /// New store with this catalog followed by `other`'s, sharing products.
    pub fn merge(&self, other: &Store) -> Store {
        Store::with_products(self.products.iter().chain(other.products.iter()).cloned())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
