//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that ledger arithmetic is exact:
//! applying and then reversing a transaction restores a balance bit-for-bit.
//! On the wire an amount is a plain JSON number in currency units (`5551.37`),
//! which is what persisted snapshots contain. Amounts are therefore limited
//! to [`Money::MAX_CENTS`] in magnitude, small enough that converting to
//! units and back always lands on the same cent.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Largest representable magnitude in cents (9 999 999 999 999.99 units)
    pub const MAX_CENTS: i64 = 999_999_999_999_999;

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use home_budget::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Convert a decimal amount in currency units, rounding to the nearest cent
    ///
    /// Returns `None` for NaN, infinities and values beyond [`Money::MAX_CENTS`].
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Check that the amount survives the decimal wire format unchanged
    pub const fn is_representable(&self) -> bool {
        self.0 >= -Self::MAX_CENTS && self.0 <= Self::MAX_CENTS
    }

    fn bounded(cents: i64) -> Option<Self> {
        Some(Self(cents)).filter(Self::is_representable)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount as a decimal number of currency units
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Addition that returns `None` when the result leaves the representable range
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).and_then(Self::bounded)
    }

    /// Subtraction that returns `None` when the result leaves the representable range
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).and_then(Self::bounded)
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "10,50" (comma decimal separator), "10" and
    /// amounts with spaces as thousands separators ("1 250,00"). Only ASCII
    /// digits may follow the optional leading minus sign.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let cleaned: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        let (negative, digits) = if let Some(stripped) = cleaned.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, cleaned.as_str())
        };

        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(invalid());
        }

        let cents = if let Some((units_str, cents_str)) = digits.split_once('.') {
            if cents_str.contains('.') || (units_str.is_empty() && cents_str.is_empty()) {
                return Err(invalid());
            }
            let units: i64 = if units_str.is_empty() {
                0
            } else {
                units_str.parse().map_err(|_| invalid())?
            };

            // Pad or truncate cents to 2 digits
            let cents: i64 = match cents_str.len() {
                0 => 0,
                1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => cents_str[..2].parse().map_err(|_| invalid())?,
            };

            units
                .checked_mul(100)
                .and_then(|u| u.checked_add(cents))
                .ok_or_else(invalid)?
        } else {
            digits
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?
        };

        Self::bounded(if negative { -cents } else { cents }).ok_or_else(invalid)
    }

    /// Format with a currency symbol appended, e.g. "1250.00 ₽"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{} {}", self, symbol)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .and_then(Money::bounded)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .and_then(Money::bounded)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_decimal(v).ok_or_else(|| E::custom(format!("invalid amount: {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
