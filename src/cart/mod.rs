//! Cart Store
//!
//! Selected vehicles with quantities. The aggregate (total price and item count) is
//! recomputed from the lines as part of every mutation and can't be set independently.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::vehicles::{Vehicle, VehicleId};

pub mod pricing;

pub use pricing::TotalPriceError;

/// Errors related to cart mutations. A rejected mutation leaves the cart unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The vehicle's currency differs from the cart currency (vehicle, vehicle currency, cart currency).
    #[error("Vehicle {0} is priced in {1}, but the cart is in {2}")]
    CurrencyMismatch(VehicleId, &'static str, &'static str),

    /// The aggregate of the resulting lines can't be represented.
    #[error(transparent)]
    Total(#[from] TotalPriceError),
}

/// One vehicle-plus-quantity entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    vehicle: Vehicle,
    quantity: i64,
}

impl CartLine {
    /// Create a new line.
    pub fn new(vehicle: Vehicle, quantity: i64) -> Self {
        Self { vehicle, quantity }
    }

    /// The vehicle on this line
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Identifier of the vehicle on this line
    pub fn id(&self) -> VehicleId {
        self.vehicle.id
    }

    /// Quantity
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price
    pub fn price(&self) -> Money<'static, Currency> {
        self.vehicle.price
    }

    /// `price × quantity`
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the product does not fit in minor units.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        pricing::line_subtotal(self)
    }
}

/// Cart mutations
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add `quantity` of `vehicle`, merging into an existing line
    Add {
        /// Vehicle to add
        vehicle: Vehicle,
        /// Addend, not validated
        quantity: i64,
    },

    /// Remove the line for a vehicle
    Remove(VehicleId),

    /// Set a line's quantity; non-positive removes it
    UpdateQuantity {
        /// Vehicle whose line changes
        id: VehicleId,
        /// New quantity
        quantity: i64,
    },

    /// Empty the cart
    Clear,
}

/// Cart Store
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
    total: Money<'static, Currency>,
    item_count: i64,
}

impl Cart {
    /// Create an empty cart in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            total: Money::from_minor(0, currency),
            item_count: 0,
        }
    }

    /// Apply a cart mutation.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the mutation is rejected; the cart is unchanged.
    pub fn apply(&mut self, action: CartAction) -> Result<(), CartError> {
        match action {
            CartAction::Add { vehicle, quantity } => self.add_to_cart(&vehicle, quantity),
            CartAction::Remove(id) => self.remove_from_cart(id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(id, quantity),
            CartAction::Clear => {
                self.clear_cart();
                Ok(())
            }
        }
    }

    /// Add `quantity` of `vehicle`.
    ///
    /// An existing line has its quantity incremented by `quantity`, which may be zero or
    /// negative; such a line stays in the cart until updated or removed. Otherwise a new line
    /// is appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] before any change if the vehicle is priced in
    /// another currency, or [`CartError::Total`] if the resulting aggregate overflows.
    pub fn add_to_cart(&mut self, vehicle: &Vehicle, quantity: i64) -> Result<(), CartError> {
        let vehicle_currency = vehicle.price.currency();

        if vehicle_currency != self.currency {
            warn!(id = %vehicle.id, "rejected vehicle priced in another currency");

            return Err(CartError::CurrencyMismatch(
                vehicle.id,
                vehicle_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let mut lines = self.lines.clone();

        if let Some(line) = lines.iter_mut().find(|line| line.id() == vehicle.id) {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(TotalPriceError::Overflow)?;
        } else {
            lines.push(CartLine::new(vehicle.clone(), quantity));
        }

        self.commit(lines)?;

        debug!(id = %vehicle.id, quantity, "added to cart");

        Ok(())
    }

    /// Remove the line for `id`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Total`] if the remaining lines' aggregate overflows.
    pub fn remove_from_cart(&mut self, id: VehicleId) -> Result<(), CartError> {
        let lines = self
            .lines
            .iter()
            .filter(|line| line.id() != id)
            .cloned()
            .collect();

        self.commit(lines)?;

        debug!(%id, "removed from cart");

        Ok(())
    }

    /// Set the quantity of the line for `id`. A quantity of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Total`] if the resulting aggregate overflows.
    pub fn update_quantity(&mut self, id: VehicleId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_from_cart(id);
        }

        let mut lines = self.lines.clone();

        if let Some(line) = lines.iter_mut().find(|line| line.id() == id) {
            line.quantity = quantity;
        }

        self.commit(lines)?;

        debug!(%id, quantity, "updated cart quantity");

        Ok(())
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.total = Money::from_minor(0, self.currency);
        self.item_count = 0;

        debug!("cleared cart");
    }

    /// Replace the lines with `lines` if their aggregate can be computed.
    fn commit(&mut self, lines: Vec<CartLine>) -> Result<(), CartError> {
        let (total, item_count) = pricing::total_price(&lines, self.currency)
            .and_then(|total| Ok((total, pricing::item_count(&lines)?)))
            .inspect_err(|error| warn!(%error, "rejected cart mutation"))?;

        self.lines = lines;
        self.total = total;
        self.item_count = item_count;

        Ok(())
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    pub fn line(&self, id: VehicleId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Sum of `price × quantity` over all lines
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Sum of quantities over all lines
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{KES, USD};

    use super::*;

    fn corolla() -> Vehicle {
        Vehicle::new(1, "Toyota", "Corolla", 2020, Money::from_minor(100_000_000, KES))
    }

    fn civic() -> Vehicle {
        Vehicle::new(2, "Honda", "Civic", 2022, Money::from_minor(150_000_000, KES))
    }

    fn assert_aggregate_matches_lines(cart: &Cart) {
        let total: i64 = cart
            .lines()
            .iter()
            .map(|line| line.price().to_minor_units() * line.quantity())
            .sum();
        let count: i64 = cart.lines().iter().map(CartLine::quantity).sum();

        assert_eq!(cart.total(), Money::from_minor(total, KES), "total diverged");
        assert_eq!(cart.item_count(), count, "item count diverged");
    }

    #[test]
    fn repeated_add_merges_into_one_line() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 2)?;
        cart.add_to_cart(&corolla(), 3)?;

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total(), Money::from_minor(500_000_000, KES));

        Ok(())
    }

    #[test]
    fn negative_addend_keeps_line() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 1)?;
        cart.add_to_cart(&corolla(), -3)?;

        assert_eq!(cart.line(VehicleId::new(1)).map(CartLine::quantity), Some(-2));
        assert_aggregate_matches_lines(&cart);

        Ok(())
    }

    #[test]
    fn update_quantity_replaces() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 2)?;
        cart.update_quantity(VehicleId::new(1), 7)?;

        assert_eq!(cart.item_count(), 7);
        assert_aggregate_matches_lines(&cart);

        Ok(())
    }

    #[test]
    fn update_to_zero_removes_line() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 2)?;
        cart.add_to_cart(&civic(), 1)?;
        cart.update_quantity(VehicleId::new(1), 0)?;

        assert!(cart.line(VehicleId::new(1)).is_none());
        assert_eq!(cart.total(), Money::from_minor(150_000_000, KES));

        Ok(())
    }

    #[test]
    fn update_missing_line_is_noop() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 1)?;
        cart.update_quantity(VehicleId::new(9), 4)?;

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 1);

        Ok(())
    }

    #[test]
    fn remove_missing_line_is_noop() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 1)?;
        cart.remove_from_cart(VehicleId::new(9))?;

        assert_eq!(cart.lines().len(), 1);

        Ok(())
    }

    #[test]
    fn clear_resets_aggregate() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 1)?;
        cart.add_to_cart(&civic(), 2)?;
        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::from_minor(0, KES));
        assert_eq!(cart.item_count(), 0);

        Ok(())
    }

    #[test]
    fn lines_keep_insertion_order() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&civic(), 1)?;
        cart.add_to_cart(&corolla(), 1)?;
        cart.add_to_cart(&civic(), 1)?;

        let ids: Vec<u32> = cart.lines().iter().map(|line| line.id().get()).collect();

        assert_eq!(ids, [2, 1]);

        Ok(())
    }

    #[test]
    fn currency_mismatch_is_rejected_without_change() {
        let mut cart = Cart::new(KES);
        let dollars = Vehicle::new(5, "Ford", "Ranger", 2023, Money::from_minor(100, USD));

        let result = cart.add_to_cart(&dollars, 1);

        assert_eq!(
            result,
            Err(CartError::CurrencyMismatch(
                VehicleId::new(5),
                USD.iso_alpha_code,
                KES.iso_alpha_code
            ))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn overflowing_add_is_rejected_without_change() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 1)?;

        let result = cart.add_to_cart(&corolla(), 100_000_000_000_000);

        assert_eq!(result, Err(CartError::Total(TotalPriceError::Overflow)));
        assert_eq!(cart.line(VehicleId::new(1)).map(CartLine::quantity), Some(1));
        assert_eq!(cart.total(), Money::from_minor(100_000_000, KES));
        assert_aggregate_matches_lines(&cart);

        Ok(())
    }

    #[test]
    fn overflowing_quantity_addend_is_rejected() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);
        let cheap = Vehicle::new(3, "Suzuki", "Alto", 2012, Money::from_minor(0, KES));

        cart.add_to_cart(&cheap, i64::MAX)?;

        assert_eq!(
            cart.add_to_cart(&cheap, 1),
            Err(CartError::Total(TotalPriceError::Overflow))
        );
        assert_eq!(cart.item_count(), i64::MAX);

        Ok(())
    }

    #[test]
    fn overflowing_update_is_rejected_without_change() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.add_to_cart(&corolla(), 2)?;

        let result = cart.update_quantity(VehicleId::new(1), i64::MAX);

        assert_eq!(result, Err(CartError::Total(TotalPriceError::Overflow)));
        assert_eq!(cart.item_count(), 2);
        assert_aggregate_matches_lines(&cart);

        Ok(())
    }

    #[test]
    fn apply_dispatches_actions() -> Result<(), CartError> {
        let mut cart = Cart::new(KES);

        cart.apply(CartAction::Add {
            vehicle: corolla(),
            quantity: 3,
        })?;
        cart.apply(CartAction::UpdateQuantity {
            id: VehicleId::new(1),
            quantity: 1,
        })?;
        assert_eq!(cart.item_count(), 1);

        cart.apply(CartAction::Remove(VehicleId::new(1)))?;
        assert!(cart.is_empty());

        cart.apply(CartAction::Add {
            vehicle: civic(),
            quantity: 1,
        })?;
        cart.apply(CartAction::Clear)?;
        assert!(cart.is_empty());

        Ok(())
    }
}
