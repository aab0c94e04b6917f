//! Filter Criteria
//!
//! Four independent conjunctive predicates narrowing the catalog: free-text search,
//! inclusive price range, brand membership and category membership.

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};

use crate::vehicles::Vehicle;

/// Brands offered by the filter sidebar.
pub const BRANDS: [&str; 10] = [
    "Toyota",
    "Honda",
    "Ford",
    "BMW",
    "Mercedes-Benz",
    "Volkswagen",
    "Audi",
    "Nissan",
    "Hyundai",
    "Kia",
];

/// Categories offered by the filter sidebar.
pub const CATEGORIES: [&str; 4] = ["Sedan", "SUV", "Hatchback", "Luxury"];

/// Inclusive price bounds.
///
/// `min <= max` is expected but not enforced; an inverted range matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: Money<'static, Currency>,
    max: Money<'static, Currency>,
}

impl PriceRange {
    /// Create a new price range.
    pub fn new(min: Money<'static, Currency>, max: Money<'static, Currency>) -> Self {
        Self { min, max }
    }

    /// Range from zero up to `ceiling`.
    pub fn up_to(ceiling: Money<'static, Currency>) -> Self {
        Self {
            min: Money::from_minor(0, ceiling.currency()),
            max: ceiling,
        }
    }

    /// Lower bound
    pub fn min(&self) -> Money<'static, Currency> {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> Money<'static, Currency> {
        self.max
    }

    /// Returns true if `price` lies within the bounds, inclusive at both ends.
    pub fn contains(&self, price: &Money<'_, Currency>) -> bool {
        let minor = price.to_minor_units();

        self.min.to_minor_units() <= minor && minor <= self.max.to_minor_units()
    }
}

/// Active constraints narrowing the catalog view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    price_range: PriceRange,
    brands: FxHashSet<String>,
    categories: FxHashSet<String>,
    search_term: String,
}

impl FilterCriteria {
    /// Criteria that admit every vehicle priced within `price_range`.
    pub fn new(price_range: PriceRange) -> Self {
        Self {
            price_range,
            brands: FxHashSet::default(),
            categories: FxHashSet::default(),
            search_term: String::new(),
        }
    }

    /// Price bounds
    pub fn price_range(&self) -> &PriceRange {
        &self.price_range
    }

    /// Selected brands; empty means no brand filtering.
    pub fn brands(&self) -> &FxHashSet<String> {
        &self.brands
    }

    /// Selected categories; empty means no category filtering.
    pub fn categories(&self) -> &FxHashSet<String> {
        &self.categories
    }

    /// Free-text search term
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Shallow-merge `update` into these criteria. Fields the update leaves unset keep their values.
    pub fn merge(&mut self, update: FilterUpdate) {
        let FilterUpdate {
            price_range,
            brands,
            categories,
            search_term,
        } = update;

        if let Some(price_range) = price_range {
            self.price_range = price_range;
        }

        if let Some(brands) = brands {
            self.brands = brands;
        }

        if let Some(categories) = categories {
            self.categories = categories;
        }

        if let Some(search_term) = search_term {
            self.search_term = search_term;
        }
    }

    /// Update adding `brand` when unselected, removing it when selected.
    pub fn toggled_brand(&self, brand: &str) -> FilterUpdate {
        FilterUpdate {
            brands: Some(toggled(&self.brands, brand)),
            ..FilterUpdate::default()
        }
    }

    /// Update adding `category` when unselected, removing it when selected.
    pub fn toggled_category(&self, category: &str) -> FilterUpdate {
        FilterUpdate {
            categories: Some(toggled(&self.categories, category)),
            ..FilterUpdate::default()
        }
    }

    /// Case-insensitive substring match against brand, model and category.
    pub fn matches_search(&self, vehicle: &Vehicle) -> bool {
        self.search_term.is_empty() || vehicle.matches_term(&self.search_term.to_lowercase())
    }

    /// Inclusive price bound.
    pub fn matches_price(&self, vehicle: &Vehicle) -> bool {
        self.price_range.contains(&vehicle.price)
    }

    /// Brand membership.
    pub fn matches_brand(&self, vehicle: &Vehicle) -> bool {
        self.brands.is_empty() || self.brands.contains(&vehicle.brand)
    }

    /// Category membership.
    pub fn matches_category(&self, vehicle: &Vehicle) -> bool {
        self.categories.is_empty() || self.categories.contains(&vehicle.category)
    }

    /// Returns true if the vehicle passes every predicate.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.matches_search(vehicle)
            && self.matches_price(vehicle)
            && self.matches_brand(vehicle)
            && self.matches_category(vehicle)
    }

    /// Vehicles passing every predicate, in input order.
    pub fn apply<'v>(&self, vehicles: &'v [Vehicle]) -> Vec<&'v Vehicle> {
        let term = self.search_term.to_lowercase();

        vehicles
            .iter()
            .filter(|vehicle| term.is_empty() || vehicle.matches_term(&term))
            .filter(|vehicle| self.matches_price(vehicle))
            .filter(|vehicle| self.matches_brand(vehicle))
            .filter(|vehicle| self.matches_category(vehicle))
            .collect()
    }
}

fn toggled(selected: &FxHashSet<String>, value: &str) -> FxHashSet<String> {
    let mut next = selected.clone();

    if !next.remove(value) {
        next.insert(value.to_string());
    }

    next
}

/// Partial filter update; unset fields retain their previous values when merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    /// Replacement price bounds
    pub price_range: Option<PriceRange>,

    /// Replacement brand selection
    pub brands: Option<FxHashSet<String>>,

    /// Replacement category selection
    pub categories: Option<FxHashSet<String>>,

    /// Replacement search term
    pub search_term: Option<String>,
}

impl FilterUpdate {
    /// Set the price bounds.
    #[must_use]
    pub fn price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = Some(price_range);
        self
    }

    /// Set the brand selection.
    #[must_use]
    pub fn brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = Some(brands.into_iter().map(Into::into).collect());
        self
    }

    /// Set the category selection.
    #[must_use]
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Set the search term.
    #[must_use]
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }
}
