//! # Shipment Request
//!
//! The canonical input to rate aggregation.
//!
//! A [`ShipmentRequest`] is what callers build: addresses carry region
//! names as people write them. [`ShipmentRequest::resolve`] validates the
//! request and maps both regions through a [`RegionTable`], producing a
//! [`ResolvedShipment`]. Carrier adapters only ever receive the resolved
//! form.
//!
//! # Examples
//!
//! ```
//! use ship_rates::domain::entities::shipment::{Address, Dimensions, Package, ShipmentRequest};
//! use ship_rates::domain::value_objects::RegionTable;
//! use rust_decimal::Decimal;
//!
//! let origin = Address::new("Warehouse", "Monterrey", "Nuevo León", "64000");
//! let destination = Address::new("Ana", "Guadalajara", "Jalisco", "44100");
//! let package = Package::new(
//!     Decimal::new(6, 1),
//!     Dimensions::new(Decimal::new(40, 0), Decimal::new(10, 0), Decimal::new(50, 0)),
//! );
//!
//! let request = ShipmentRequest::builder(origin, destination)
//!     .package(package)
//!     .build();
//!
//! let resolved = request.resolve(&RegionTable::mexico()).unwrap();
//! assert_eq!(resolved.destination_region().as_str(), "JA");
//! ```

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::{
    Currency, LengthUnit, PackageType, RegionCode, RegionTable, ServiceType, WeightUnit,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A postal address with contact details.
///
/// `state` holds the human-readable region name until the request is
/// resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Contact name.
    pub name: String,
    /// Company name.
    pub company: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// District or colony.
    pub district: String,
    /// City.
    pub city: String,
    /// State or region name.
    pub state: String,
    /// ISO 3166 alpha-2 country code.
    pub country: String,
    /// Postal code.
    pub postal_code: String,
    /// Free-form delivery reference.
    pub reference: String,
}

impl Address {
    /// Creates a Mexican address with the fields rating depends on.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
            country: "MX".to_string(),
            ..Self::default()
        }
    }
}

/// Package dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Length.
    pub length: Decimal,
    /// Width.
    pub width: Decimal,
    /// Height.
    pub height: Decimal,
}

impl Dimensions {
    /// Creates dimensions.
    #[must_use]
    pub fn new(length: Decimal, width: Decimal, height: Decimal) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Returns true if every side is strictly positive.
    #[must_use]
    pub fn all_positive(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .all(|d| *d > Decimal::ZERO)
    }
}

/// One package in a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    content: String,
    #[serde(default = "default_amount")]
    amount: u32,
    #[serde(default)]
    package_type: PackageType,
    weight: Decimal,
    #[serde(default)]
    weight_unit: WeightUnit,
    #[serde(default)]
    length_unit: LengthUnit,
    dimensions: Dimensions,
    #[serde(default)]
    declared_value: Decimal,
    #[serde(default)]
    insurance: Decimal,
}

fn default_amount() -> u32 {
    1
}

impl Package {
    /// Creates a single boxed package in kilograms and centimeters.
    #[must_use]
    pub fn new(weight: Decimal, dimensions: Dimensions) -> Self {
        Self {
            content: String::new(),
            amount: 1,
            package_type: PackageType::Box,
            weight,
            weight_unit: WeightUnit::Kg,
            length_unit: LengthUnit::Cm,
            dimensions,
            declared_value: Decimal::ZERO,
            insurance: Decimal::ZERO,
        }
    }

    /// Sets the content description.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets how many identical packages this entry stands for.
    #[must_use]
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the packaging kind.
    #[must_use]
    pub fn with_package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = package_type;
        self
    }

    /// Sets the units weight and dimensions are expressed in.
    #[must_use]
    pub fn with_units(mut self, weight_unit: WeightUnit, length_unit: LengthUnit) -> Self {
        self.weight_unit = weight_unit;
        self.length_unit = length_unit;
        self
    }

    /// Sets the declared value.
    #[must_use]
    pub fn with_declared_value(mut self, declared_value: Decimal) -> Self {
        self.declared_value = declared_value;
        self
    }

    /// Sets the insured amount.
    #[must_use]
    pub fn with_insurance(mut self, insurance: Decimal) -> Self {
        self.insurance = insurance;
        self
    }

    /// Returns the content description.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the package count.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Returns the packaging kind.
    #[inline]
    #[must_use]
    pub fn package_type(&self) -> PackageType {
        self.package_type
    }

    /// Returns the weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Returns the weight unit.
    #[inline]
    #[must_use]
    pub fn weight_unit(&self) -> WeightUnit {
        self.weight_unit
    }

    /// Returns the length unit.
    #[inline]
    #[must_use]
    pub fn length_unit(&self) -> LengthUnit {
        self.length_unit
    }

    /// Returns the dimensions.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the declared value.
    #[inline]
    #[must_use]
    pub fn declared_value(&self) -> Decimal {
        self.declared_value
    }

    /// Returns the insured amount.
    #[inline]
    #[must_use]
    pub fn insurance(&self) -> Decimal {
        self.insurance
    }

    /// Checks that the package can be rated; `index` labels the error.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPackage` for a zero amount,
    /// non-positive weight or dimensions, or a negative declared value or
    /// insurance.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.amount == 0 {
            return Err(ValidationError::invalid_package(
                index,
                "amount must be at least 1",
            ));
        }
        if self.weight <= Decimal::ZERO {
            return Err(ValidationError::invalid_package(
                index,
                "weight must be positive",
            ));
        }
        if !self.dimensions.all_positive() {
            return Err(ValidationError::invalid_package(
                index,
                "dimensions must be positive",
            ));
        }
        if self.declared_value < Decimal::ZERO || self.insurance < Decimal::ZERO {
            return Err(ValidationError::invalid_package(
                index,
                "declared value and insurance must not be negative",
            ));
        }
        Ok(())
    }
}

/// A shipment to be rated, as supplied by the caller.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    origin: Address,
    destination: Address,
    packages: Vec<Package>,
    currency: Currency,
    service_type: ServiceType,
}

impl ShipmentRequest {
    /// Returns a builder for constructing a request.
    #[must_use]
    pub fn builder(origin: Address, destination: Address) -> ShipmentRequestBuilder {
        ShipmentRequestBuilder::new(origin, destination)
    }

    /// Returns the origin address.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &Address {
        &self.origin
    }

    /// Returns the destination address.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &Address {
        &self.destination
    }

    /// Returns the packages in caller order.
    #[inline]
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Returns the currency quotes should be priced in.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Returns the service type hint.
    #[inline]
    #[must_use]
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Validates the request and resolves both region names.
    ///
    /// # Errors
    ///
    /// - `ValidationError::NoPackages` if there are no packages
    /// - `ValidationError::InvalidPackage` for the first malformed package
    /// - `ValidationError::UnknownRegion` if either region is not in `regions`
    pub fn resolve(&self, regions: &RegionTable) -> Result<ResolvedShipment, ValidationError> {
        if self.packages.is_empty() {
            return Err(ValidationError::NoPackages);
        }
        for (index, package) in self.packages.iter().enumerate() {
            package.validate(index)?;
        }

        let origin_region = regions
            .lookup(&self.origin.state)
            .cloned()
            .ok_or_else(|| ValidationError::unknown_region("origin", &self.origin.state))?;
        let destination_region = regions
            .lookup(&self.destination.state)
            .cloned()
            .ok_or_else(|| {
                ValidationError::unknown_region("destination", &self.destination.state)
            })?;

        Ok(ResolvedShipment {
            request: self.clone(),
            origin_region,
            destination_region,
        })
    }
}

/// Builder for [`ShipmentRequest`].
#[derive(Debug, Clone)]
pub struct ShipmentRequestBuilder {
    origin: Address,
    destination: Address,
    packages: Vec<Package>,
    currency: Currency,
    service_type: ServiceType,
}

impl ShipmentRequestBuilder {
    /// Creates a builder priced in MXN for parcel service.
    #[must_use]
    pub fn new(origin: Address, destination: Address) -> Self {
        Self {
            origin,
            destination,
            packages: Vec::new(),
            currency: Currency::mxn(),
            service_type: ServiceType::Parcel,
        }
    }

    /// Appends a package.
    #[must_use]
    pub fn package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// Appends several packages.
    #[must_use]
    pub fn packages(mut self, packages: impl IntoIterator<Item = Package>) -> Self {
        self.packages.extend(packages);
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the service type hint.
    #[must_use]
    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = service_type;
        self
    }

    /// Builds the request.
    #[must_use]
    pub fn build(self) -> ShipmentRequest {
        ShipmentRequest {
            origin: self.origin,
            destination: self.destination,
            packages: self.packages,
            currency: self.currency,
            service_type: self.service_type,
        }
    }
}

/// A validated shipment whose regions are carrier codes.
///
/// Only [`ShipmentRequest::resolve`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShipment {
    request: ShipmentRequest,
    origin_region: RegionCode,
    destination_region: RegionCode,
}

impl ResolvedShipment {
    /// Returns the underlying request.
    #[inline]
    #[must_use]
    pub fn request(&self) -> &ShipmentRequest {
        &self.request
    }

    /// Returns the resolved origin region code.
    #[inline]
    #[must_use]
    pub fn origin_region(&self) -> &RegionCode {
        &self.origin_region
    }

    /// Returns the resolved destination region code.
    #[inline]
    #[must_use]
    pub fn destination_region(&self) -> &RegionCode {
        &self.destination_region
    }

    /// Returns the currency quotes should be priced in.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &Currency {
        self.request.currency()
    }
}
