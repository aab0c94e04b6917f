//! Catalog Sources
//!
//! The catalog is read in bulk: no query parameters and no pagination at the source. All
//! narrowing happens client-side once the full list is loaded.

use std::{fs, path::Path, time::Duration};

use humanize_duration::{Truncate, prelude::DurationExt};
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::vehicles::{Specifications, Vehicle, VehicleId};

/// Catalog shipped with the crate, prices in whole Kenyan shillings.
pub const BUNDLED_CATALOG: &str = include_str!("../../data/vehicles.json");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Price does not fit in minor units of the catalog currency
    #[error("Invalid price for vehicle {0}")]
    InvalidPrice(VehicleId),

    /// Two records share an identifier
    #[error("Duplicate vehicle id: {0}")]
    DuplicateId(VehicleId),

    /// The source could not be reached
    #[error("{0}")]
    Unavailable(String),
}

/// Catalog record as stored in JSON, price in whole currency units.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Identifier
    pub id: VehicleId,

    /// Manufacturer
    pub brand: String,

    /// Model name
    pub model: String,

    /// Model year
    pub year: u16,

    /// Price in whole units (no minor part)
    pub price: u64,

    /// Body category
    pub category: String,

    /// Rating (0 - 5)
    #[serde(default)]
    pub rating: f32,

    /// Feature list
    #[serde(default)]
    pub features: SmallVec<[String; 6]>,

    /// Specifications
    #[serde(default)]
    pub specifications: Specifications,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Availability
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
}

fn in_stock_default() -> bool {
    true
}

impl VehicleRecord {
    /// Convert into a [`Vehicle`] priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPrice`] if the price overflows minor units.
    pub fn into_vehicle(self, currency: &'static Currency) -> Result<Vehicle, CatalogError> {
        let price = whole_units(self.price, currency).ok_or(CatalogError::InvalidPrice(self.id))?;

        Ok(Vehicle {
            id: self.id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            price,
            category: self.category,
            rating: self.rating.clamp(0.0, 5.0),
            features: self.features,
            specifications: self.specifications,
            images: self.images,
            in_stock: self.in_stock,
        })
    }
}

/// Money value for `amount` whole units of `currency`, or `None` on overflow.
pub fn whole_units(amount: u64, currency: &'static Currency) -> Option<Money<'static, Currency>> {
    let scale = 10_i64.checked_pow(currency.exponent)?;
    let minor = i64::try_from(amount).ok()?.checked_mul(scale)?;

    Some(Money::from_minor(minor, currency))
}

/// Parse a JSON array of vehicle records.
///
/// # Errors
///
/// Returns an error if the JSON is malformed, a price overflows, or an identifier repeats.
pub fn parse_catalog(json: &str, currency: &'static Currency) -> Result<Vec<Vehicle>, CatalogError> {
    let records: Vec<VehicleRecord> = serde_json::from_str(json)?;
    let mut seen = FxHashSet::default();

    records
        .into_iter()
        .map(|record| {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }

            record.into_vehicle(currency)
        })
        .collect()
}

/// Bulk source of catalog records.
pub trait CatalogSource {
    /// Read the full ordered vehicle list.
    async fn load(&self) -> Result<Vec<Vehicle>, CatalogError>;
}

/// In-memory JSON catalog.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    json: String,
    currency: &'static Currency,
}

impl JsonCatalog {
    /// Catalog backed by the given JSON text.
    pub fn new(json: impl Into<String>, currency: &'static Currency) -> Self {
        Self {
            json: json.into(),
            currency,
        }
    }

    /// The catalog shipped with the crate.
    pub fn bundled(currency: &'static Currency) -> Self {
        Self::new(BUNDLED_CATALOG, currency)
    }

    /// Catalog read from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>, currency: &'static Currency) -> Result<Self, CatalogError> {
        Ok(Self::new(fs::read_to_string(path)?, currency))
    }
}

impl CatalogSource for JsonCatalog {
    async fn load(&self) -> Result<Vec<Vehicle>, CatalogError> {
        parse_catalog(&self.json, self.currency)
    }
}

/// Wraps a source with an artificial network delay.
#[derive(Debug, Clone)]
pub struct SimulatedLatency<S> {
    inner: S,
    delay: Duration,
}

impl<S: CatalogSource> SimulatedLatency<S> {
    /// Delay every load of `inner` by `delay`.
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<S: CatalogSource> CatalogSource for SimulatedLatency<S> {
    async fn load(&self) -> Result<Vec<Vehicle>, CatalogError> {
        debug!(delay = %self.delay.human(Truncate::Nano), "simulating catalog latency");

        tokio::time::sleep(self.delay).await;

        self.inner.load().await
    }
}

/// Source that always fails, standing in for an unreachable backend.
#[derive(Debug, Clone)]
pub struct Unreachable {
    message: String,
}

impl Unreachable {
    /// Source failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for Unreachable {
    fn default() -> Self {
        Self::new("Failed to fetch cars")
    }
}

impl CatalogSource for Unreachable {
    async fn load(&self) -> Result<Vec<Vehicle>, CatalogError> {
        Err(CatalogError::Unavailable(self.message.clone()))
    }
}
