//! # Price Module
//!
//! Provides the `Price` type for handling listing prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every price is an exact count of minor currency units.               │
//! │    Two distinct totals can never compare equal or round together.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Gated Construction
//! The inner total is private to this module, so the only ways to obtain a
//! `Price` are the validated entry points below. An instance therefore
//! always satisfies the `[0, MAX_PRICE_CENTS]` invariant.
//!
//! ## Usage
//! ```rust
//! use fleamarket_core::Price;
//!
//! let price = Price::new(10, 99).unwrap();      // 10.99
//! let parsed = Price::parse("10.99").unwrap();  // same value
//! assert_eq!(price, parsed);
//!
//! let total = price.add(Price::new(0, 1).unwrap()).unwrap();
//! assert_eq!(total.to_string(), "11.00");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, ValidationResult};

/// Largest representable price, in minor units: one short of 10^11.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000 - 1;

/// Largest representable major-unit part.
pub const MAX_PRICE_UNITS: i64 = MAX_PRICE_CENTS / 100;

/// Decimal price grammar: up to 11 integer digits, optionally followed by a
/// dot and exactly two fraction digits.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,11})(?:\.(\d{2}))?$").expect("price grammar compiles"));

// =============================================================================
// Price Type
// =============================================================================

/// A listing price in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **Private field**: construction only through `new` / `parse` / `add`,
///   so the range invariant always holds
/// - **i64**: the full `[0, 10^11)` range fits with room for sums
/// - **Derived ordering**: compares the raw minor-unit total, which is the
///   ordering the listing's price sort relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Validated constructor from a raw minor-unit total.
    ///
    /// Private: every public entry point funnels through here so the range
    /// invariant is re-applied on each construction, including sums.
    fn from_total(total: i64) -> ValidationResult<Self> {
        if !(0..=MAX_PRICE_CENTS).contains(&total) {
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_CENTS,
            });
        }

        Ok(Price(total))
    }

    /// Creates a price from major and minor units.
    ///
    /// ## Rules
    /// - `units` must be in `[0, MAX_PRICE_UNITS]`
    /// - `cents` must be in `[0, 99]`
    ///
    /// ## Example
    /// ```rust
    /// use fleamarket_core::Price;
    ///
    /// let price = Price::new(24, 99).unwrap();
    /// assert_eq!(price.units(), 24);
    /// assert_eq!(price.cents(), 99);
    ///
    /// assert!(Price::new(-1, 0).is_err());
    /// assert!(Price::new(0, 100).is_err());
    /// ```
    pub fn new(units: i64, cents: i64) -> ValidationResult<Self> {
        if !(0..=MAX_PRICE_UNITS).contains(&units) {
            return Err(ValidationError::OutOfRange {
                field: "price units".to_string(),
                min: 0,
                max: MAX_PRICE_UNITS,
            });
        }

        if !(0..=99).contains(&cents) {
            return Err(ValidationError::OutOfRange {
                field: "price cents".to_string(),
                min: 0,
                max: 99,
            });
        }

        Self::from_total(units * 100 + cents)
    }

    /// Parses a decimal price string.
    ///
    /// The fraction is optional; when present it must be exactly two digits.
    /// Anything outside the grammar, or a value past the maximum, fails.
    ///
    /// ## Example
    /// ```rust
    /// use fleamarket_core::Price;
    ///
    /// assert_eq!(Price::parse("10.20").unwrap(), Price::new(10, 20).unwrap());
    /// assert_eq!(Price::parse("7").unwrap(), Price::new(7, 0).unwrap());
    /// assert!(Price::parse("7.5").is_err());
    /// assert!(Price::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let captures = PRICE_RE.captures(raw).ok_or_else(|| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be digits, optionally followed by a dot and two decimals".to_string(),
        })?;

        // Both groups are all-digit and short enough that parsing cannot fail
        // for any string the grammar admits.
        let units: i64 = captures[1].parse().map_err(|_| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "integer part does not fit".to_string(),
        })?;
        let cents: i64 = match captures.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "fraction part does not fit".to_string(),
            })?,
            None => 0,
        };

        Self::new(units, cents)
    }

    /// Adds two prices, returning a new one.
    ///
    /// Pure: neither operand is mutated. The maximum-value invariant is
    /// re-applied to the sum, so totals past the cap are an error rather
    /// than a wraparound.
    pub fn add(&self, other: Price) -> ValidationResult<Self> {
        Self::from_total(self.0 + other.0)
    }

    /// Returns the major-unit part.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit part (always 0-99).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0 % 100
    }

    /// Returns the raw total in minor units, the form the marketplace API
    /// transmits.
    #[inline]
    pub const fn total_cents(&self) -> i64 {
        self.0
    }

    /// Zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0)
    }
}

/// Display shows the decimal form accepted back by [`Price::parse`].
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.units(), self.cents())
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
