//! # Money Module
//!
//! Provides the `Money` type used for every price and order total.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    125.00 × 2 × 0.7 = 174.99999999999997  ❌ WRONG!                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    25000 cents - 30% (7500 cents) = 17500 cents                         │
//! │    Any half cent from a promotion is rounded explicitly                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_major_minor(1450, 0); // $1450.00
//! let pair = price + price.half();               // second unit half price
//! assert_eq!(pair.cents(), 217_500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Negative values are representable so validation can
///   reject them with a proper error instead of a panic at the boundary
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money Flows
/// ```text
/// Product.unit_price ──┬──► Promotion::apply ──► line total
///                      │                            │
///                      └──► unit × quantity ────────┤
///                                                   ▼
///                                  Store::process_order grand total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_major_minor(250, 0); // $250.00
    /// assert_eq!(price.cents(), 25_000);
    ///
    /// let negative = Money::from_major_minor(-5, 50);
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(299).checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(2).checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns half of this amount, rounding a half cent up.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1450).half().cents(), 725);
    /// assert_eq!(Money::from_cents(999).half().cents(), 500); // 499.5 → 500
    /// ```
    pub fn half(&self) -> Money {
        // Same +0.5 rounding as apply_percentage_discount
        Money(((self.0 as i128 + 1).div_euclid(2)) as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Implementation
    /// Integer math: the discount is `(amount * bps + 5000) / 10000`, i.e.
    /// rounded half up, then subtracted from the amount.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(25_000); // $250.00
    /// let discounted = subtotal.apply_percentage_discount(3000); // 30% off
    /// assert_eq!(discounted.cents(), 17_500); // $175.00
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        // i128 keeps large line totals from overflowing before the division
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_cents(self.0 - discount_amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as `$1450.00`.
///
/// ## Note
/// Used by product descriptions only; no locale handling.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing line totals into an order total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(1450, 0).cents(), 145_000);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_major_minor(1450, 0)), "$1450.00");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let mut total = Money::zero();
        total += a;
        total += b;
        assert_eq!(total.cents(), 1500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 650].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 1000);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_half_rounds_half_cent_up() {
        assert_eq!(Money::from_cents(1450).half().cents(), 725);
        assert_eq!(Money::from_cents(1).half().cents(), 1);
        assert_eq!(Money::from_cents(999).half().cents(), 500);
        assert_eq!(Money::zero().half().cents(), 0);
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.apply_percentage_discount(1000).cents(), 9000);
        assert_eq!(subtotal.apply_percentage_discount(0).cents(), 10000);
        assert_eq!(subtotal.apply_percentage_discount(10000).cents(), 0);
    }

    #[test]
    fn test_percentage_discount_rounding() {
        // 33.33% of 1.00 = 0.3333 → discount of 33 cents
        assert_eq!(Money::from_cents(100).apply_percentage_discount(3333).cents(), 67);
        // 50% of 0.01 = 0.005 → discount rounds up to 1 cent
        assert_eq!(Money::from_cents(1).apply_percentage_discount(5000).cents(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let price = Money::from_major_minor(125, 0);
        assert_eq!(price.checked_multiply_quantity(4), Some(Money::from_cents(50_000)));
        assert_eq!(price.checked_multiply_quantity(i64::MAX / 1000), None);

        let big = Money::from_cents(i64::MAX);
        assert_eq!(big.checked_add(Money::zero()), Some(big));
        assert_eq!(big.checked_add(Money::from_cents(1)), None);
    }
}
