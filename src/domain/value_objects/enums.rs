//! # Domain Enums
//!
//! Enumeration types for shipment concepts:
//!
//! - [`WeightUnit`] - Unit a package weight is expressed in
//! - [`LengthUnit`] - Unit package dimensions are expressed in
//! - [`PackageType`] - Physical packaging kind
//! - [`ServiceType`] - Freight class hint sent to carriers
//!
//! All enums implement `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of package weight.
///
/// # Examples
///
/// ```
/// use ship_rates::domain::value_objects::enums::WeightUnit;
///
/// assert_eq!(WeightUnit::Kg.to_string(), "KG");
/// assert_eq!("lb".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightUnit {
    /// Kilograms.
    #[default]
    Kg,
    /// Pounds.
    Lb,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kg => write!(f, "KG"),
            Self::Lb => write!(f, "LB"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "KG" => Ok(Self::Kg),
            "LB" => Ok(Self::Lb),
            _ => Err(ParseEnumError::InvalidValue("WeightUnit", s.to_string())),
        }
    }
}

/// Unit of package dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LengthUnit {
    /// Centimeters.
    #[default]
    Cm,
    /// Inches.
    In,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cm => write!(f, "CM"),
            Self::In => write!(f, "IN"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CM" => Ok(Self::Cm),
            "IN" => Ok(Self::In),
            _ => Err(ParseEnumError::InvalidValue("LengthUnit", s.to_string())),
        }
    }
}

/// Physical packaging kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// Rigid box.
    #[default]
    Box,
    /// Document envelope.
    Envelope,
    /// Palletized freight.
    Pallet,
}

impl PackageType {
    /// Returns the wire name carriers use for this packaging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Envelope => "envelope",
            Self::Pallet => "pallet",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "box" => Ok(Self::Box),
            "envelope" => Ok(Self::Envelope),
            "pallet" => Ok(Self::Pallet),
            _ => Err(ParseEnumError::InvalidValue("PackageType", s.to_string())),
        }
    }
}

/// Freight class hint.
///
/// Uses `#[repr(u8)]`; the discriminant is the numeric code carriers
/// receive as the shipment `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ServiceType {
    /// Small parcel.
    #[default]
    Parcel = 1,
    /// Less-than-truckload freight.
    Ltl = 2,
    /// Full truckload freight.
    Ftl = 3,
}

impl ServiceType {
    /// Returns the numeric wire code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parcel => write!(f, "PARCEL"),
            Self::Ltl => write!(f, "LTL"),
            Self::Ftl => write!(f, "FTL"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PARCEL" | "1" => Ok(Self::Parcel),
            "LTL" | "2" => Ok(Self::Ltl),
            "FTL" | "3" => Ok(Self::Ftl),
            _ => Err(ParseEnumError::InvalidValue("ServiceType", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod weight_unit {
        use super::*;

        #[test]
        fn from_str_any_case() {
            assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
            assert_eq!("LB".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        }

        #[test]
        fn from_str_invalid() {
            let err = "stone".parse::<WeightUnit>().unwrap_err();
            assert_eq!(err.to_string(), "invalid WeightUnit value: 'stone'");
        }

        #[test]
        fn serde_uppercase() {
            assert_eq!(serde_json::to_string(&WeightUnit::Kg).unwrap(), "\"KG\"");
        }
    }

    mod package_type {
        use super::*;

        #[test]
        fn wire_names() {
            assert_eq!(PackageType::Box.as_str(), "box");
            assert_eq!("Pallet".parse::<PackageType>().unwrap(), PackageType::Pallet);
        }
    }

    mod service_type {
        use super::*;

        #[test]
        fn codes() {
            assert_eq!(ServiceType::Parcel.code(), 1);
            assert_eq!(ServiceType::Ltl.code(), 2);
            assert_eq!(ServiceType::Ftl.code(), 3);
        }

        #[test]
        fn from_str_accepts_codes_and_names() {
            assert_eq!("2".parse::<ServiceType>().unwrap(), ServiceType::Ltl);
            assert_eq!("ftl".parse::<ServiceType>().unwrap(), ServiceType::Ftl);
            assert!("air".parse::<ServiceType>().is_err());
        }
    }
}
