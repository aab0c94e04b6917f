//! Catalog Store
//!
//! Owns the full vehicle list, the active [`FilterCriteria`] and [`SortKey`], and the load
//! status of the catalog. Every derived view is recomputed from current state on read.
//!
//! Fetches are split into [`CatalogStore::begin_fetch`] and [`CatalogStore::complete_fetch`]
//! so overlapping loads can be issued. Each begin hands out a [`FetchTicket`]; only the
//! completion carrying the most recent ticket is applied, so a slow stale response can
//! never overwrite a newer one.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use tracing::{debug, info, warn};

use crate::vehicles::{Vehicle, VehicleId};

pub mod filters;
pub mod sorting;
pub mod source;

pub use filters::{FilterCriteria, FilterUpdate, PriceRange};
pub use sorting::SortKey;
pub use source::{CatalogError, CatalogSource};

/// Number of vehicles in the featured row.
pub const FEATURED_COUNT: usize = 8;

/// Number of related vehicles shown beside a vehicle.
pub const RELATED_COUNT: usize = 4;

/// Identifies one catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// Catalog mutations
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// Shallow-merge into the filter criteria
    SetFilters(FilterUpdate),

    /// Replace the sort key
    SetSortBy(SortKey),

    /// Restore default criteria, keeping the sort key
    ClearFilters,

    /// Clear brands, categories and search and restore the default sort, keeping the price range
    ResetSearch,

    /// Add or remove a brand from the selection
    ToggleBrand(String),

    /// Add or remove a category from the selection
    ToggleCategory(String),
}

/// Catalog Store
#[derive(Debug, Clone)]
pub struct CatalogStore {
    vehicles: Vec<Vehicle>,
    loading: bool,
    error: Option<String>,
    filters: FilterCriteria,
    default_filters: FilterCriteria,
    sort_by: SortKey,
    featured_count: usize,
    related_count: usize,
    last_ticket: u64,
    revision: u64,
}

impl CatalogStore {
    /// Create an empty store whose default price range runs from zero to `price_ceiling`.
    pub fn new(price_ceiling: Money<'static, Currency>) -> Self {
        let default_filters = FilterCriteria::new(PriceRange::up_to(price_ceiling));

        Self {
            vehicles: Vec::new(),
            loading: false,
            error: None,
            filters: default_filters.clone(),
            default_filters,
            sort_by: SortKey::default(),
            featured_count: FEATURED_COUNT,
            related_count: RELATED_COUNT,
            last_ticket: 0,
            revision: 0,
        }
    }

    /// Override the featured and related row sizes.
    #[must_use]
    pub fn with_row_sizes(mut self, featured_count: usize, related_count: usize) -> Self {
        self.featured_count = featured_count;
        self.related_count = related_count;
        self
    }

    /// Apply a catalog mutation.
    pub fn apply(&mut self, action: CatalogAction) {
        match action {
            CatalogAction::SetFilters(update) => self.set_filters(update),
            CatalogAction::SetSortBy(key) => self.set_sort_by(key),
            CatalogAction::ClearFilters => self.clear_filters(),
            CatalogAction::ResetSearch => self.reset_search(),
            CatalogAction::ToggleBrand(brand) => self.toggle_brand(&brand),
            CatalogAction::ToggleCategory(category) => self.toggle_category(&category),
        }
    }

    /// Shallow-merge `update` into the filter criteria.
    pub fn set_filters(&mut self, update: FilterUpdate) {
        debug!(?update, "set filters");

        self.filters.merge(update);
        self.revision += 1;
    }

    /// Replace the sort key. Unknown keys are stored as-is and do not reorder.
    pub fn set_sort_by(&mut self, key: impl Into<SortKey>) {
        let key = key.into();

        if let SortKey::Unrecognized(name) = &key {
            warn!(key = %name, "unrecognized sort key; results keep their filtered order");
        } else {
            debug!(key = %key, "set sort key");
        }

        self.sort_by = key;
        self.revision += 1;
    }

    /// Reset the filter criteria to their defaults. The sort key is untouched.
    pub fn clear_filters(&mut self) {
        debug!("clear filters");

        self.filters = self.default_filters.clone();
        self.revision += 1;
    }

    /// Clear brands, categories and search term and return to the default sort key.
    pub fn reset_search(&mut self) {
        self.set_filters(
            FilterUpdate::default()
                .search_term("")
                .brands(Vec::<String>::new())
                .categories(Vec::<String>::new()),
        );
        self.set_sort_by(SortKey::default());
    }

    /// Add `brand` to the selection, or remove it if already selected.
    pub fn toggle_brand(&mut self, brand: &str) {
        let update = self.filters.toggled_brand(brand);
        self.set_filters(update);
    }

    /// Add `category` to the selection, or remove it if already selected.
    pub fn toggle_category(&mut self, category: &str) {
        let update = self.filters.toggled_category(category);
        self.set_filters(update);
    }

    /// Enter the pending state for a new fetch.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_ticket += 1;
        self.loading = true;
        self.error = None;

        debug!(ticket = self.last_ticket, "catalog fetch pending");

        FetchTicket(self.last_ticket)
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// On success the vehicle list is replaced wholesale; on failure the error is recorded and
    /// the list is left untouched. Returns `false` without touching state when a newer fetch
    /// has been issued since `ticket`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Vehicle>, CatalogError>,
    ) -> bool {
        if ticket.0 != self.last_ticket {
            warn!(
                ticket = ticket.0,
                latest = self.last_ticket,
                "discarding stale catalog response"
            );

            return false;
        }

        self.loading = false;

        match result {
            Ok(vehicles) => {
                info!(count = vehicles.len(), "catalog loaded");

                self.vehicles = vehicles;
                self.error = None;
                self.revision += 1;
            }
            Err(error) => {
                warn!(%error, "catalog fetch failed");

                self.error = Some(error.to_string());
            }
        }

        true
    }

    /// Load the catalog from `source`, applying the result when it arrives.
    #[tracing::instrument(skip_all)]
    pub async fn fetch_catalog<S: CatalogSource>(&mut self, source: &S) -> bool {
        let ticket = self.begin_fetch();
        let result = source.load().await;

        self.complete_fetch(ticket, result)
    }

    /// Full vehicle list in source order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// True while the latest fetch is pending.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed fetch, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Active filter criteria
    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Active sort key
    pub fn sort_by(&self) -> &SortKey {
        &self.sort_by
    }

    /// Counter bumped by every filter or sort change and every applied reload.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Filtered and sorted view of the catalog.
    pub fn filtered(&self) -> Vec<&Vehicle> {
        let mut vehicles = self.filters.apply(&self.vehicles);
        self.sort_by.sort(&mut vehicles);
        vehicles
    }

    /// The first vehicles of the raw list.
    pub fn featured(&self) -> &[Vehicle] {
        let end = self.featured_count.min(self.vehicles.len());

        self.vehicles.get(..end).unwrap_or_default()
    }

    /// Look up a vehicle by identifier.
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    /// Featured vehicles sharing the category of `id`, excluding itself.
    pub fn related(&self, id: VehicleId) -> Vec<&Vehicle> {
        let Some(vehicle) = self.vehicle(id) else {
            return Vec::new();
        };

        self.featured()
            .iter()
            .filter(|other| other.id != id && other.category == vehicle.category)
            .take(self.related_count)
            .collect()
    }

    /// Distinct brands of the loaded catalog with their record counts, ordered by brand.
    pub fn brand_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();

        for vehicle in &self.vehicles {
            *counts.entry(vehicle.brand.as_str()).or_default() += 1;
        }

        let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
        counts.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        counts
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::KES;
    use testresult::TestResult;

    use super::*;

    fn kes(whole: i64) -> Money<'static, Currency> {
        Money::from_minor(whole * 100, KES)
    }

    fn store() -> CatalogStore {
        CatalogStore::new(kes(5_000_000))
    }

    fn catalog() -> Vec<Vehicle> {
        vec![
            Vehicle::new(1, "Toyota", "Corolla", 2020, kes(1_000_000)).with_category("Sedan"),
            Vehicle::new(2, "Honda", "Civic", 2022, kes(1_500_000)).with_category("Sedan"),
            Vehicle::new(3, "Toyota", "RAV4", 2021, kes(2_800_000)).with_category("SUV"),
        ]
    }

    fn loaded() -> CatalogStore {
        let mut store = store();
        let ticket = store.begin_fetch();
        store.complete_fetch(ticket, Ok(catalog()));
        store
    }

    fn ids(vehicles: &[&Vehicle]) -> Vec<u32> {
        vehicles.iter().map(|vehicle| vehicle.id.get()).collect()
    }

    #[test]
    fn begin_fetch_is_observable_immediately() {
        let mut store = store();

        store.begin_fetch();

        assert!(store.is_loading());
        assert_eq!(store.error(), None);
    }

    #[test]
    fn failed_fetch_keeps_previous_list() {
        let mut store = loaded();

        let ticket = store.begin_fetch();
        let applied = store.complete_fetch(
            ticket,
            Err(CatalogError::Unavailable("Failed to fetch cars".to_string())),
        );

        assert!(applied);
        assert!(!store.is_loading());
        assert_eq!(store.error(), Some("Failed to fetch cars"));
        assert_eq!(store.vehicles().len(), 3);
    }

    #[test]
    fn successful_fetch_clears_error() {
        let mut store = store();

        let ticket = store.begin_fetch();
        store.complete_fetch(ticket, Err(CatalogError::Unavailable("down".to_string())));

        let ticket = store.begin_fetch();
        store.complete_fetch(ticket, Ok(catalog()));

        assert_eq!(store.error(), None);
        assert_eq!(store.vehicles().len(), 3);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut store = store();

        let first = store.begin_fetch();
        let second = store.begin_fetch();

        assert!(store.complete_fetch(second, Ok(catalog())));
        assert!(!store.complete_fetch(first, Ok(Vec::new())));

        assert_eq!(store.vehicles().len(), 3);
    }

    #[test]
    fn stale_completion_does_not_end_newer_pending_fetch() {
        let mut store = store();

        let first = store.begin_fetch();
        let _second = store.begin_fetch();

        store.complete_fetch(first, Ok(catalog()));

        assert!(store.is_loading());
        assert!(store.vehicles().is_empty());
    }

    #[test]
    fn sort_then_search() {
        let mut store = loaded();

        store.set_sort_by("price-low-high");
        assert_eq!(ids(&store.filtered()), [1, 2, 3]);

        store.set_filters(FilterUpdate::default().search_term("honda"));
        assert_eq!(ids(&store.filtered()), [2]);
    }

    #[test]
    fn unrecognized_sort_keeps_source_order() {
        let mut store = loaded();

        store.set_sort_by("popularity");

        assert_eq!(
            store.sort_by(),
            &SortKey::Unrecognized("popularity".to_string())
        );
        assert_eq!(ids(&store.filtered()), [1, 2, 3]);
    }

    #[test]
    fn clear_filters_keeps_sort_key() {
        let mut store = loaded();

        store.set_sort_by(SortKey::Oldest);
        store.set_filters(FilterUpdate::default().brands(["Honda"]));
        store.clear_filters();

        assert_eq!(store.sort_by(), &SortKey::Oldest);
        assert!(store.filters().brands().is_empty());
        assert_eq!(ids(&store.filtered()), [1, 3, 2]);
    }

    #[test]
    fn reset_search_keeps_price_range() {
        let mut store = loaded();
        let range = PriceRange::new(kes(1_200_000), kes(3_000_000));

        store.set_sort_by(SortKey::NameZA);
        store.set_filters(
            FilterUpdate::default()
                .price_range(range)
                .brands(["Toyota"])
                .search_term("rav"),
        );
        store.reset_search();

        assert_eq!(store.filters().price_range(), &range);
        assert_eq!(store.filters().search_term(), "");
        assert_eq!(store.sort_by(), &SortKey::Newest);
        assert_eq!(ids(&store.filtered()), [2, 3]);
    }

    #[test]
    fn toggle_actions_update_selection() {
        let mut store = loaded();

        store.apply(CatalogAction::ToggleCategory("SUV".to_string()));
        assert_eq!(ids(&store.filtered()), [3]);

        store.apply(CatalogAction::ToggleCategory("SUV".to_string()));
        assert_eq!(store.filtered().len(), 3);
    }

    #[test]
    fn revision_bumps_on_every_criteria_change() {
        let mut store = loaded();
        let start = store.revision();

        store.set_filters(FilterUpdate::default());
        store.set_sort_by(SortKey::Newest);
        store.clear_filters();

        assert_eq!(store.revision(), start + 3);
    }

    #[test]
    fn revision_bumps_only_on_applied_reload() {
        let mut store = loaded();
        let start = store.revision();

        let stale = store.begin_fetch();
        let latest = store.begin_fetch();
        store.complete_fetch(stale, Ok(catalog()));
        assert_eq!(store.revision(), start);

        store.complete_fetch(latest, Err(CatalogError::Unavailable("down".to_string())));
        assert_eq!(store.revision(), start);

        let ticket = store.begin_fetch();
        store.complete_fetch(ticket, Ok(catalog()));
        assert_eq!(store.revision(), start + 1);
    }

    #[test]
    fn featured_is_a_prefix_of_the_raw_list() {
        let mut store = store().with_row_sizes(2, 4);
        let ticket = store.begin_fetch();
        store.complete_fetch(ticket, Ok(catalog()));
        store.set_sort_by(SortKey::PriceHighLow);

        let featured: Vec<u32> = store.featured().iter().map(|v| v.id.get()).collect();

        assert_eq!(featured, [1, 2]);
    }

    #[test]
    fn featured_of_short_catalog_is_whole_catalog() {
        assert_eq!(loaded().featured().len(), 3);
        assert!(store().featured().is_empty());
    }

    #[test]
    fn lookup_by_id() -> TestResult {
        let store = loaded();

        let vehicle = store.vehicle(VehicleId::new(3)).ok_or("missing vehicle")?;

        assert_eq!(vehicle.model, "RAV4");
        assert!(store.vehicle(VehicleId::new(99)).is_none());

        Ok(())
    }

    #[test]
    fn related_shares_category_and_excludes_self() {
        let store = loaded();

        assert_eq!(ids(&store.related(VehicleId::new(1))), [2]);
        assert!(store.related(VehicleId::new(3)).is_empty());
        assert!(store.related(VehicleId::new(99)).is_empty());
    }

    #[test]
    fn brand_counts_are_sorted() {
        let store = loaded();

        assert_eq!(store.brand_counts(), [("Honda", 1), ("Toyota", 2)]);
    }
}
