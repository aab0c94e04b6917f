//! Vehicles

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Catalog identifier of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(u32);

impl VehicleId {
    /// Creates a new vehicle identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for VehicleId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Technical specification bundle of a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Specifications {
    /// Engine description (e.g. "1.8L 4-Cylinder").
    pub engine: String,

    /// Transmission type.
    pub transmission: String,

    /// Fuel type.
    pub fuel_type: String,

    /// Odometer reading as listed (e.g. "45,000 km").
    pub mileage: String,

    /// Seating capacity.
    pub seating: u8,

    /// Exterior colour.
    pub color: String,
}

/// Immutable catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Unique identifier
    pub id: VehicleId,

    /// Manufacturer
    pub brand: String,

    /// Model name
    pub model: String,

    /// Model year
    pub year: u16,

    /// Asking price
    pub price: Money<'static, Currency>,

    /// Body category (e.g. "Sedan", "SUV")
    pub category: String,

    /// Customer rating between 0 and 5
    pub rating: f32,

    /// Ordered feature list
    pub features: SmallVec<[String; 6]>,

    /// Technical specifications
    pub specifications: Specifications,

    /// Image URLs
    pub images: Vec<String>,

    /// Whether the vehicle is available
    pub in_stock: bool,
}

impl Vehicle {
    /// Creates a vehicle with the given identity and price, leaving descriptive fields empty.
    pub fn new(
        id: impl Into<VehicleId>,
        brand: impl Into<String>,
        model: impl Into<String>,
        year: u16,
        price: Money<'static, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            year,
            price,
            category: String::new(),
            rating: 0.0,
            features: SmallVec::new(),
            specifications: Specifications::default(),
            images: Vec::new(),
            in_stock: true,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    /// `"brand model"`, the key used by name sorting.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Returns true if `term` (already lowercased) occurs in the brand, model or category.
    pub(crate) fn matches_term(&self, term: &str) -> bool {
        [&self.brand, &self.model, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}
