//! # Promotions
//!
//! Stateless pricing strategies. A promotion turns `(unit price, quantity)`
//! into a line total and never looks at, or changes, product stock.
//!
//! ## Promotion Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kind                  Line total for q units at price p                │
//! │  ────────────────────  ──────────────────────────────────────────────   │
//! │  PercentageOff(r)      p × q × (1 − r)                                  │
//! │  SecondUnitHalfPrice   ⌊q/2⌋ × 1.5p + (q mod 2) × p                     │
//! │  ThirdUnitFree         ⌊q/3⌋ × 2p   + (q mod 3) × p                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A half cent (possible with `SecondUnitHalfPrice` on an odd price) rounds up.

use std::fmt;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_discount_bps, validate_promotion_name, ValidationResult};

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 3000 bps = 30% off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    ///
    /// Range is checked when the rate is attached to a promotion.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage in `[0, 100]`.
    ///
    /// Rates are held in whole basis points, so anything finer than
    /// 0.01% is rounded to the nearest basis point (`33.333` → 3333 bps).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::promotion::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percentage(30.0).unwrap().bps(), 3000);
    /// assert_eq!(DiscountRate::from_percentage(12.5).unwrap().bps(), 1250);
    /// assert!(DiscountRate::from_percentage(-1.0).is_err());
    /// assert!(DiscountRate::from_percentage(100.5).is_err());
    /// ```
    pub fn from_percentage(pct: f64) -> ValidationResult<Self> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(ValidationError::OutOfRange {
                field: "percentage".to_string(),
                min: 0,
                max: 100,
            });
        }

        Ok(DiscountRate((pct * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// The pricing rule a promotion applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionKind {
    /// A flat percentage off the whole line.
    PercentageOff(DiscountRate),
    /// Every second unit costs half.
    SecondUnitHalfPrice,
    /// Buy two, get the third free.
    ThirdUnitFree,
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromotionKind::PercentageOff(rate) => write!(f, "{}% off", rate.percentage()),
            PromotionKind::SecondUnitHalfPrice => write!(f, "second unit half price"),
            PromotionKind::ThirdUnitFree => write!(f, "third unit free"),
        }
    }
}

/// A named, immutable pricing strategy.
///
/// Products hold promotions behind an `Arc`, so one promotion can be attached
/// to any number of products and swapped out without touching them.
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::promotion::Promotion;
///
/// let promo = Promotion::third_unit_free("Third One Free!").unwrap();
/// let total = promo.apply(Money::from_major_minor(250, 0), 3);
/// assert_eq!(total, Some(Money::from_major_minor(500, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    name: String,
    kind: PromotionKind,
}

impl Promotion {
    /// Creates a promotion of the given kind.
    ///
    /// ## Errors
    /// `InvalidArgument` if the name is empty or a percentage is over 100%.
    pub fn new(name: impl Into<String>, kind: PromotionKind) -> CoreResult<Self> {
        let name = name.into();
        validate_promotion_name(&name)?;

        if let PromotionKind::PercentageOff(rate) = kind {
            validate_discount_bps(rate.bps())?;
        }

        Ok(Promotion { name, kind })
    }

    /// Percentage off the line total.
    pub fn percentage_off(name: impl Into<String>, rate: DiscountRate) -> CoreResult<Self> {
        Self::new(name, PromotionKind::PercentageOff(rate))
    }

    /// Second unit of every pair at half price.
    pub fn second_unit_half_price(name: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, PromotionKind::SecondUnitHalfPrice)
    }

    /// Third unit of every group of three free.
    pub fn third_unit_free(name: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, PromotionKind::ThirdUnitFree)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PromotionKind {
        self.kind
    }

    /// Computes the discounted line total, or `None` if it does not fit in
    /// [`Money`].
    ///
    /// `quantity` is expected to be positive; `Product::buy` rejects anything
    /// else before a promotion is consulted.
    pub fn apply(&self, unit_price: Money, quantity: i64) -> Option<Money> {
        match self.kind {
            PromotionKind::PercentageOff(rate) => Some(
                unit_price
                    .checked_multiply_quantity(quantity)?
                    .apply_percentage_discount(rate.bps()),
            ),
            PromotionKind::SecondUnitHalfPrice => {
                let pairs = quantity / 2;
                let remainder = quantity % 2;
                // p·n + ⌈p·n / 2⌉ rounds the same as ⌈3·p·n / 2⌉
                let full = unit_price.checked_multiply_quantity(pairs)?;
                full.checked_add(full.half())?
                    .checked_add(unit_price.checked_multiply_quantity(remainder)?)
            }
            PromotionKind::ThirdUnitFree => {
                let groups = quantity / 3;
                let remainder = quantity % 3;
                let paid = groups.checked_mul(2)?.checked_add(remainder)?;
                unit_price.checked_multiply_quantity(paid)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn dollars(d: i64) -> Money {
        Money::from_major_minor(d, 0)
    }

    #[test]
    fn test_second_unit_half_price() {
        let promo = Promotion::second_unit_half_price("Second Half price!").unwrap();

        assert_eq!(promo.apply(dollars(1450), 1), Some(dollars(1450)));
        assert_eq!(promo.apply(dollars(1450), 2), Some(dollars(2175)));
        assert_eq!(promo.apply(dollars(1450), 3), Some(dollars(3625)));
        assert_eq!(promo.apply(dollars(1450), 4), Some(dollars(4350)));
    }

    #[test]
    fn test_second_unit_half_price_odd_cents() {
        let promo = Promotion::second_unit_half_price("Half").unwrap();
        // 0.99 + 0.495 = 1.485 → 1.49
        assert_eq!(promo.apply(Money::from_cents(99), 2).unwrap().cents(), 149);
        // two pairs: 2 × 1.485 = 2.97 exactly, no double rounding
        assert_eq!(promo.apply(Money::from_cents(99), 4).unwrap().cents(), 297);
    }

    #[test]
    fn test_third_unit_free() {
        let promo = Promotion::third_unit_free("Third One Free!").unwrap();

        assert_eq!(promo.apply(dollars(250), 1), Some(dollars(250)));
        assert_eq!(promo.apply(dollars(250), 2), Some(dollars(500)));
        assert_eq!(promo.apply(dollars(250), 3), Some(dollars(500)));
        assert_eq!(promo.apply(dollars(250), 4), Some(dollars(750)));
        assert_eq!(promo.apply(dollars(250), 6), Some(dollars(1000)));
    }

    #[test]
    fn test_percentage_off() {
        let rate = DiscountRate::from_percentage(30.0).unwrap();
        let promo = Promotion::percentage_off("30% off!", rate).unwrap();

        assert_eq!(promo.apply(dollars(125), 2), Some(dollars(175)));
    }

    #[test]
    fn test_percentage_off_bounds() {
        let free = Promotion::percentage_off("Free", DiscountRate::from_bps(10000)).unwrap();
        assert!(free.apply(dollars(125), 4).unwrap().is_zero());

        let none = Promotion::percentage_off("Nothing", DiscountRate::from_bps(0)).unwrap();
        assert_eq!(none.apply(dollars(125), 4), Some(dollars(500)));
    }

    #[test]
    fn test_large_quantities_do_not_overflow() {
        let half = Promotion::second_unit_half_price("Half").unwrap();
        // 3 × pairs would overflow, the 1.5 × total still fits
        let qty = 6_200_000_000_000_000_000;
        assert_eq!(
            half.apply(Money::from_cents(1), qty),
            Some(Money::from_cents(4_650_000_000_000_000_000))
        );
        assert_eq!(half.apply(dollars(1450), i64::MAX), None);

        let third = Promotion::third_unit_free("Third").unwrap();
        assert_eq!(third.apply(dollars(250), i64::MAX), None);

        let pct = Promotion::percentage_off("30%", DiscountRate::from_bps(3000)).unwrap();
        assert_eq!(pct.apply(dollars(125), i64::MAX / 1000), None);
    }

    #[test]
    fn test_percentage_rounds_to_basis_points() {
        assert_eq!(DiscountRate::from_percentage(33.333).unwrap().bps(), 3333);
        assert_eq!(DiscountRate::from_percentage(0.004).unwrap().bps(), 0);
        assert_eq!(DiscountRate::from_percentage(99.996).unwrap().bps(), 10000);
    }

    #[test]
    fn test_percentage_over_hundred_rejected() {
        let result = Promotion::percentage_off("Too generous", DiscountRate::from_bps(10001));
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            Promotion::third_unit_free(" "),
            Err(CoreError::InvalidArgument(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        assert_eq!(DiscountRate::from_percentage(0.0).unwrap().bps(), 0);
        assert_eq!(DiscountRate::from_percentage(100.0).unwrap().bps(), 10000);
        assert!(DiscountRate::from_percentage(f64::NAN).is_err());
        assert!((DiscountRate::from_bps(825).percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_kind_display() {
        let rate = DiscountRate::from_bps(3000);
        assert_eq!(PromotionKind::PercentageOff(rate).to_string(), "30% off");
        assert_eq!(PromotionKind::ThirdUnitFree.to_string(), "third unit free");
    }
}
