//! # Products
//!
//! Stock-keeping entities and their purchase rules.
//!
//! ## Product Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product Kinds                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Standard     │   │   NonStocked    │   │    Limited      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  stock tracked  │   │  no stock       │   │  stock tracked  │       │
//! │  │  deactivates    │   │  always active  │   │  deactivates    │       │
//! │  │  at zero        │   │  quantity = 0   │   │  at zero        │       │
//! │  │                 │   │  (licenses,     │   │  max_per_order  │       │
//! │  │                 │   │   fees)         │   │  cap per buy    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purchase Checks (in order)
//! ```text
//! buy(q)
//!   │
//!   ├── q <= 0?                         → InvalidArgument
//!   ├── !is_active()?                   → Inactive
//!   ├── Limited and q > max_per_order?  → OrderLimitExceeded
//!   ├── stock-bearing and q > stock?    → InsufficientStock
//!   │
//!   ├── total = promotion.apply(price, q) or price × q
//!   │     └── overflow?                 → InvalidArgument
//!   ├── stock -= q (stock-bearing); stock == 0 → inactive
//!   └── Ok(total)
//! ```

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::promotion::Promotion;
use crate::validation::{
    validate_max_per_order, validate_product_name, validate_purchase_quantity,
    validate_stock_quantity, validate_unit_price,
};

// =============================================================================
// Product Kind
// =============================================================================

/// Which purchase rules a product follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    /// Stock is tracked and decremented by purchases.
    Standard,
    /// Stock is not tracked (digital licenses, fees).
    NonStocked,
    /// Standard stock rules plus a fixed cap per purchase.
    Limited { max_per_order: i64 },
}

impl ProductKind {
    /// Returns true if purchases decrement stock for this kind.
    #[inline]
    pub const fn is_stock_bearing(&self) -> bool {
        !matches!(self, ProductKind::NonStocked)
    }

    /// Label used at the start of a product description.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductKind::Standard => "Product",
            ProductKind::NonStocked => "Non-stocked product",
            ProductKind::Limited { .. } => "Limited product",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone)]
pub struct Product {
    id: Uuid,
    name: String,
    unit_price: Money,
    quantity: i64,
    active: bool,
    kind: ProductKind,
    promotion: Option<Arc<Promotion>>,
}

impl Product {
    fn new(
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        kind: ProductKind,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_unit_price(unit_price)?;
        validate_stock_quantity(quantity)?;

        Ok(Product {
            id: Uuid::new_v4(),
            name,
            unit_price,
            quantity,
            active: true,
            kind,
            promotion: None,
        })
    }

    /// Creates a standard stock-tracked product.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::product::Product;
    ///
    /// let mut laptop = Product::standard("MacBook Air M2", Money::from_major_minor(1450, 0), 10).unwrap();
    /// let total = laptop.buy(2).unwrap();
    /// assert_eq!(total, Money::from_major_minor(2900, 0));
    /// assert_eq!(laptop.quantity(), 8);
    /// ```
    ///
    /// ## Errors
    /// `InvalidArgument` for an empty name, negative price, or negative stock.
    pub fn standard(name: impl Into<String>, unit_price: Money, quantity: i64) -> CoreResult<Self> {
        Self::new(name, unit_price, quantity, ProductKind::Standard)
    }

    /// Creates a product whose stock is not tracked.
    pub fn non_stocked(name: impl Into<String>, unit_price: Money) -> CoreResult<Self> {
        Self::new(name, unit_price, 0, ProductKind::NonStocked)
    }

    /// Creates a stock-tracked product that caps each purchase at
    /// `max_per_order` units.
    ///
    /// ## Errors
    /// `InvalidArgument` for the standard rules or a non-positive cap.
    pub fn limited(
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        max_per_order: i64,
    ) -> CoreResult<Self> {
        validate_max_per_order(max_per_order)?;
        Self::new(
            name,
            unit_price,
            quantity,
            ProductKind::Limited { max_per_order },
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Current stock. Always 0 for non-stocked products.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Sets the stock level directly.
    ///
    /// Setting it to zero deactivates the product. Raising it again does not
    /// reactivate; call [`Product::activate`].
    ///
    /// ## Errors
    /// `InvalidArgument` for a negative quantity or a non-stocked product.
    pub fn set_quantity(&mut self, quantity: i64) -> CoreResult<()> {
        if !self.kind.is_stock_bearing() {
            return Err(ValidationError::NotAllowed {
                field: "quantity".to_string(),
                reason: format!("{} does not track stock", self.name),
            }
            .into());
        }
        validate_stock_quantity(quantity)?;

        debug!(id = %self.id, name = %self.name, from = self.quantity, to = quantity, "Setting stock");
        self.quantity = quantity;
        if self.quantity == 0 {
            self.deactivate();
        }
        Ok(())
    }

    /// Whether the product can currently be bought.
    ///
    /// Non-stocked products are always active. Stock-bearing products are
    /// active only while their flag is set and they have stock left.
    pub fn is_active(&self) -> bool {
        if !self.kind.is_stock_bearing() {
            return true;
        }
        self.active && self.quantity > 0
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Has no visible effect on non-stocked products.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn promotion(&self) -> Option<&Arc<Promotion>> {
        self.promotion.as_ref()
    }

    /// Attaches, replaces, or (with `None`) removes the promotion.
    pub fn set_promotion(&mut self, promotion: Option<Arc<Promotion>>) {
        self.promotion = promotion;
    }

    /// Buys `requested` units and returns the amount charged.
    ///
    /// On error nothing is changed.
    pub fn buy(&mut self, requested: i64) -> CoreResult<Money> {
        validate_purchase_quantity(requested)?;

        if !self.is_active() {
            return Err(CoreError::Inactive {
                product: self.name.clone(),
            });
        }

        if let ProductKind::Limited { max_per_order } = self.kind {
            if requested > max_per_order {
                return Err(CoreError::OrderLimitExceeded {
                    product: self.name.clone(),
                    max: max_per_order,
                    requested,
                });
            }
        }

        if self.kind.is_stock_bearing() && requested > self.quantity {
            return Err(CoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.quantity,
                requested,
            });
        }

        let total = match &self.promotion {
            Some(promotion) => promotion.apply(self.unit_price, requested),
            None => self.unit_price.checked_multiply_quantity(requested),
        }
        .ok_or_else(|| ValidationError::Overflow {
            field: "line total".to_string(),
        })?;

        if self.kind.is_stock_bearing() {
            self.quantity -= requested;
            if self.quantity == 0 {
                self.deactivate();
            }
        }

        debug!(
            id = %self.id,
            name = %self.name,
            requested,
            remaining = self.quantity,
            total = %total,
            "Purchased product"
        );
        Ok(total)
    }

    /// One-line human readable description.
    ///
    /// ```text
    /// Product: MacBook Air M2, Price: $1450.00, Quantity: 100, Active: true
    /// Non-stocked product: Windows License, Price: $125.00, Active: true, Promotion: 30% off!
    /// Limited product: Shipping, Price: $10.00, Quantity: 250, Max per order: 1, Active: true
    /// ```
    pub fn describe(&self) -> String {
        let mut line = format!(
            "{}: {}, Price: {}",
            self.kind.label(),
            self.name,
            self.unit_price
        );

        if self.kind.is_stock_bearing() {
            line.push_str(&format!(", Quantity: {}", self.quantity));
        }
        if let ProductKind::Limited { max_per_order } = self.kind {
            line.push_str(&format!(", Max per order: {}", max_per_order));
        }
        line.push_str(&format!(", Active: {}", self.is_active()));
        if let Some(promotion) = &self.promotion {
            line.push_str(&format!(", Promotion: {}", promotion.name()));
        }

        line
    }

    /// Serializable copy of the current state.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            unit_price_cents: self.unit_price.cents(),
            quantity: self.quantity,
            is_active: self.is_active(),
            promotion: self.promotion.as_ref().map(|p| p.name().to_string()),
        }
    }

    /// Total order by unit price, for sorting listings.
    pub fn cmp_by_price(&self, other: &Product) -> Ordering {
        self.unit_price.cmp(&other.unit_price)
    }

    /// Wraps the product in a shareable handle.
    pub fn into_shared(self) -> SharedProduct {
        SharedProduct::new(self)
    }
}

/// Point-in-time view of a product, for display layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub name: String,
    pub kind: ProductKind,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub is_active: bool,
    pub promotion: Option<String>,
}

// =============================================================================
// Shared Product Handle
// =============================================================================

/// Cloneable handle to a product held by one or more stores.
///
/// ## Identity
/// Two handles are the same product only if they point at the same
/// allocation ([`SharedProduct::ptr_eq`]). Products with equal names are
/// still different products.
///
/// ## Thread Safety
/// Each product sits behind its own `Mutex`, so a `buy` on one handle is
/// exclusive against every other handle to the same product.
#[derive(Debug, Clone)]
pub struct SharedProduct {
    inner: Arc<Mutex<Product>>,
}

impl SharedProduct {
    pub fn new(product: Product) -> Self {
        SharedProduct {
            inner: Arc::new(Mutex::new(product)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Product> {
        // buy() validates before it mutates, so a poisoned product is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the product.
    pub fn with_product<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Product) -> R,
    {
        let product = self.lock();
        f(&product)
    }

    /// Executes a function with write access to the product.
    ///
    /// ## Usage
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::product::Product;
    ///
    /// let pixel = Product::standard("Google Pixel 7", Money::from_major_minor(500, 0), 250)
    ///     .unwrap()
    ///     .into_shared();
    /// pixel.with_product_mut(|p| p.set_quantity(10)).unwrap();
    /// assert_eq!(pixel.quantity(), 10);
    /// ```
    pub fn with_product_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Product) -> R,
    {
        let mut product = self.lock();
        f(&mut product)
    }

    /// Returns true if both handles refer to the same product.
    pub fn ptr_eq(&self, other: &SharedProduct) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn name(&self) -> String {
        self.with_product(|p| p.name().to_string())
    }

    pub fn quantity(&self) -> i64 {
        self.with_product(Product::quantity)
    }

    pub fn is_active(&self) -> bool {
        self.with_product(Product::is_active)
    }

    pub fn unit_price(&self) -> Money {
        self.with_product(Product::unit_price)
    }

    pub fn buy(&self, requested: i64) -> CoreResult<Money> {
        self.with_product_mut(|p| p.buy(requested))
    }

    pub fn describe(&self) -> String {
        self.with_product(Product::describe)
    }

    pub fn snapshot(&self) -> ProductSnapshot {
        self.with_product(Product::snapshot)
    }

    pub fn set_promotion(&self, promotion: Option<Arc<Promotion>>) {
        self.with_product_mut(|p| p.set_promotion(promotion));
    }
}

impl From<Product> for SharedProduct {
    fn from(product: Product) -> Self {
        SharedProduct::new(product)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
