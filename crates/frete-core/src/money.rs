//! # Money Module
//!
//! Provides the `Money` type for quoted shipping prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Pricing curves are evaluated in f64:                                   │
//! │    15 + 2.4 × 3 = 22.199999999999996  ❌ NOT A PRICE                    │
//! │                                                                         │
//! │  OUR SOLUTION: Round once, into integer centavos                        │
//! │    22.199999999999996 → 2220 centavos → serialized as 22.2             │
//! │    Nothing after the conversion can reintroduce float artifacts        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use frete_core::money::Money;
//!
//! let price = Money::from_decimal_rounded(22.199999999999996).unwrap();
//! assert_eq!(price.cents(), 2220);
//! assert_eq!(price.to_string(), "R$22.20");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic can go negative; quotes never do
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Wire format**: a JSON number in reais with at most two decimals
///   (`37.0`, `22.2`), which is what checkout frontends expect
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Pricing curve (f64) ──► from_decimal_rounded ──► ShippingOption.price │
/// │                                                                         │
/// │  Surcharge fees ──► Money::zero() ──► ShippingOption.*_fee             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use frete_core::money::Money;
    ///
    /// let price = Money::from_cents(3700); // R$37.00
    /// assert_eq!(price.cents(), 3700);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a decimal amount in reais to the nearest centavo.
    ///
    /// Halves round away from zero. Returns `None` when `value` is NaN,
    /// infinite, or too large to fit in i64 centavos.
    ///
    /// ## Example
    /// ```rust
    /// use frete_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal_rounded(37.0).unwrap().cents(), 3700);
    /// assert!(Money::from_decimal_rounded(f64::NAN).is_none());
    /// ```
    pub fn from_decimal_rounded(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let scaled = (value * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
            return None;
        }

        Some(Money(scaled as i64))
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole reais portion.
    ///
    /// ## Example
    /// ```rust
    /// use frete_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2220).reais(), 22);
    /// assert_eq!(Money::from_cents(-550).reais(), -5);
    /// ```
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in reais as a float (for serialization only).
    ///
    /// The result is the closest f64 to a two-decimal number, so it prints
    /// without artifacts (`2220` → `22.2`).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
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
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `R$37.00`.
///
/// ## Note
/// This is for logs and debugging. Frontends format for their own locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R${}.{:02}", sign, self.reais().abs(), self.cents_part())
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal_rounded(value)
            .ok_or_else(|| serde::de::Error::custom("amount must be a finite number"))
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
        let money = Money::from_cents(3700);
        assert_eq!(money.cents(), 3700);
        assert_eq!(money.reais(), 37);
        assert_eq!(money.cents_part(), 0);
    }

    #[test]
    fn test_rounding_removes_float_artifacts() {
        // 15 + 2.4 * 3 in f64
        let raw = 15.0 + 2.4 * 3.0;
        let money = Money::from_decimal_rounded(raw).unwrap();
        assert_eq!(money.cents(), 2220);
        assert_eq!(money.to_decimal(), 22.2);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(Money::from_decimal_rounded(0.125).unwrap().cents(), 13);
        assert_eq!(Money::from_decimal_rounded(-0.125).unwrap().cents(), -13);
        assert_eq!(Money::from_decimal_rounded(0.124).unwrap().cents(), 12);
    }

    #[test]
    fn test_rejects_non_finite_and_huge() {
        assert!(Money::from_decimal_rounded(f64::NAN).is_none());
        assert!(Money::from_decimal_rounded(f64::INFINITY).is_none());
        assert!(Money::from_decimal_rounded(f64::NEG_INFINITY).is_none());
        assert!(Money::from_decimal_rounded(1e300).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(3700)), "R$37.00");
        assert_eq!(format!("{}", Money::from_cents(2220)), "R$22.20");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-R$5.50");
        assert_eq!(format!("{}", Money::zero()), "R$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert!((b - a).is_negative());

        let mut total = Money::zero();
        total += a;
        assert_eq!(total, a);
    }

    #[test]
    fn test_serializes_as_decimal_number() {
        assert_eq!(serde_json::to_string(&Money::from_cents(3700)).unwrap(), "37.0");
        assert_eq!(serde_json::to_string(&Money::from_cents(2220)).unwrap(), "22.2");
        assert_eq!(serde_json::to_string(&Money::from_cents(1999)).unwrap(), "19.99");
        assert_eq!(serde_json::to_string(&Money::zero()).unwrap(), "0.0");
    }

    #[test]
    fn test_deserializes_with_rounding() {
        let money: Money = serde_json::from_str("22.199999999999996").unwrap();
        assert_eq!(money.cents(), 2220);
    }
}
