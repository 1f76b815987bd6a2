//! # Money
//!
//! Currency-tagged decimal amounts.
//!
//! # Examples
//!
//! ```
//! use ship_rates::domain::value_objects::{Currency, Money};
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(9550, 2), Currency::mxn()).unwrap();
//! assert_eq!(price.to_string(), "95.50 MXN");
//! assert!(Money::new(Decimal::new(-1, 0), Currency::mxn()).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-letter ISO 4217 currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parses a currency code, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCurrency` unless the code is exactly
    /// three ASCII letters.
    pub fn new(code: &str) -> DomainResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Mexican peso.
    #[must_use]
    pub fn mxn() -> Self {
        Self("MXN".to_string())
    }

    /// US dollar.
    #[must_use]
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::mxn()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

/// A non-negative amount in a specific currency.
///
/// # Invariants
///
/// - `amount >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

#[derive(Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: Currency,
}

impl TryFrom<RawMoney> for Money {
    type Error = DomainError;

    fn try_from(raw: RawMoney) -> DomainResult<Self> {
        Self::new(raw.amount, raw.currency)
    }
}

impl Money {
    /// Creates a money value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if `amount` is negative.
    pub fn new(amount: Decimal, currency: Currency) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::InvalidPrice(format!(
                "amount must not be negative, got {}",
                amount
            )));
        }
        Ok(Self { amount, currency })
    }

    /// Returns the amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}
