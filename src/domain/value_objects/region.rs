//! # Region Lookup
//!
//! Maps human-readable state names to the short codes carriers expect.
//!
//! The table is configuration: it is built once at startup and shared
//! read-only. [`RegionTable::mexico`] carries the 32 Mexican federal
//! entities.
//!
//! # Examples
//!
//! ```
//! use ship_rates::domain::value_objects::RegionTable;
//!
//! let table = RegionTable::mexico();
//! assert_eq!(table.lookup("Nuevo León").unwrap().as_str(), "NL");
//! assert_eq!(table.lookup("nuevo león").unwrap().as_str(), "NL");
//! assert!(table.lookup("Texas").is_none());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

const MEXICO_STATES: [(&str, &str); 32] = [
    ("Aguascalientes", "AG"),
    ("Baja California", "BC"),
    ("Baja California Sur", "BS"),
    ("Campeche", "CM"),
    ("Chiapas", "CS"),
    ("Chihuahua", "CH"),
    ("Coahuila", "CO"),
    ("Colima", "CL"),
    ("Durango", "DG"),
    ("Guanajuato", "GT"),
    ("Guerrero", "GR"),
    ("Hidalgo", "HG"),
    ("Jalisco", "JA"),
    ("Mexico City", "DF"),
    ("Mexico State", "EM"),
    ("Michoacán", "MI"),
    ("Morelos", "MR"),
    ("Nayarit", "NA"),
    ("Nuevo León", "NL"),
    ("Oaxaca", "OA"),
    ("Puebla", "PU"),
    ("Querétaro", "QT"),
    ("Quintana Roo", "QR"),
    ("San Luis Potosí", "SL"),
    ("Sinaloa", "SI"),
    ("Sonora", "SO"),
    ("Tabasco", "TB"),
    ("Tamaulipas", "TM"),
    ("Tlaxcala", "TL"),
    ("Veracruz", "VE"),
    ("Yucatán", "YU"),
    ("Zacatecas", "ZA"),
];

/// A short uppercase region code such as `NL` or `DF`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Parses a region code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRegionCode` unless the code is two or
    /// three ASCII letters.
    pub fn new(code: &str) -> DomainResult<Self> {
        let code = code.trim();
        if !(2..=3).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidRegionCode(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}

/// Fixed name-to-code lookup table.
///
/// Names are matched after trimming and lowercasing. A value that is
/// already one of the table's codes resolves to itself, so addresses
/// loaded from configuration may carry either form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionTable {
    by_name: HashMap<String, RegionCode>,
}

impl RegionTable {
    /// Builds a table from `(name, code)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRegionCode` if any code is malformed.
    pub fn from_pairs<I, N, C>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut by_name = HashMap::new();
        for (name, code) in pairs {
            by_name.insert(normalize(name.as_ref()), RegionCode::new(code.as_ref())?);
        }
        Ok(Self { by_name })
    }

    /// The 32 Mexican federal entities.
    #[must_use]
    pub fn mexico() -> Self {
        let by_name = MEXICO_STATES
            .iter()
            .map(|(name, code)| (normalize(name), RegionCode((*code).to_string())))
            .collect();
        Self { by_name }
    }

    /// Looks up a region name, falling back to treating it as a known code.
    #[must_use]
    pub fn lookup(&self, name_or_code: &str) -> Option<&RegionCode> {
        let key = normalize(name_or_code);
        self.by_name.get(&key).or_else(|| {
            self.by_name
                .values()
                .find(|code| code.as_str().eq_ignore_ascii_case(name_or_code.trim()))
        })
    }

    /// Returns the number of region names in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
