//! Money type for representing dollar amounts.
//!
//! Amounts are whole cents so that a breakdown's total is always the exact
//! sum of its components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A dollar amount stored in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents.
    pub cents: i64,
}

impl Money {
    /// Zero dollars.
    pub const ZERO: Money = Money { cents: 0 };

    /// Create a Money value from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a Money value from a dollar amount, rounded to the nearest cent.
    ///
    /// ```
    /// use paint_quote::money::Money;
    /// assert_eq!(Money::from_dollars(49.99).cents, 4999);
    /// ```
    pub fn from_dollars(amount: f64) -> Self {
        Self::from_cents((amount * 100.0).round() as i64)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Convert to dollars.
    pub fn to_dollars(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Multiply by a fractional factor, rounding to the nearest cent.
    pub fn scale(&self, factor: f64) -> Money {
        Money::from_cents((self.cents as f64 * factor).round() as i64)
    }

    /// Calculate a percentage of this amount (15.0 means 15%).
    pub fn percentage(&self, percent: f64) -> Money {
        self.scale(percent / 100.0)
    }

    /// Sum, or `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    /// Product with a whole count, or `None` on overflow.
    pub fn checked_mul(self, factor: u32) -> Option<Money> {
        self.cents
            .checked_mul(i64::from(factor))
            .map(Money::from_cents)
    }

    /// Clamp negative amounts to zero.
    pub fn floor_zero(self) -> Money {
        self.max(Money::ZERO)
    }

    /// Format as a display string (e.g., "$1,249.50").
    pub fn display(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let dollars = (abs / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, ch) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{}${}.{:02}", sign, grouped, abs % 100)
    }
}

/// Serde adapter that reads and writes Money as a dollar number
/// (`65.0` rather than `6500`), for hand-edited configuration files.
pub mod as_dollars {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_dollars())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        f64::deserialize(deserializer).map(Money::from_dollars)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.cents + other.cents)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.cents += other.cents;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_cents(self.cents - other.cents)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, factor: u32) -> Money {
        Money::from_cents(self.cents * i64::from(factor))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_dollars() {
        assert_eq!(Money::from_dollars(49.99).cents, 4999);
        assert_eq!(Money::from_dollars(2500.01).cents, 250_001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(4999).display(), "$49.99");
        assert_eq!(Money::from_cents(69_600).display(), "$696.00");
        assert_eq!(Money::from_cents(123_456_789).display(), "$1,234,567.89");
        assert_eq!(Money::from_cents(-505).display(), "-$5.05");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(300);
        assert_eq!((a + b).cents, 1300);
        assert_eq!((a - b).cents, 700);
        assert_eq!((b * 3).cents, 900);
    }

    #[test]
    fn test_money_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(
            Money::from_cents(300).checked_mul(3),
            Some(Money::from_cents(900))
        );
        assert_eq!(max.checked_mul(2), None);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
    }

    #[test]
    fn test_money_percentage_rounds_to_cent() {
        assert_eq!(Money::from_cents(10_000).percentage(15.0).cents, 1500);
        // 15% of $2,500.01 = $375.0015
        assert_eq!(Money::from_cents(250_001).percentage(15.0).cents, 37_500);
    }

    #[test]
    fn test_money_sum_and_floor() {
        let total: Money = [Money::from_cents(5), Money::from_cents(7)].iter().sum();
        assert_eq!(total.cents, 12);
        assert_eq!(Money::from_cents(-1).floor_zero(), Money::ZERO);
    }
}
