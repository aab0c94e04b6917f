//! Cart Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Errors that can occur while calculating cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A subtotal, total or item count does not fit in minor units.
    #[error("cart total overflows")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// `price × quantity` for one line.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product does not fit in minor units.
pub fn line_subtotal(line: &CartLine) -> Result<Money<'static, Currency>, TotalPriceError> {
    let price = line.price();

    let minor = price
        .to_minor_units()
        .checked_mul(line.quantity())
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Sum of `price × quantity` across `lines`, in `currency`.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a subtotal or the running total leaves the minor-unit range.
/// - [`TotalPriceError::Money`]: a line is priced in another currency.
pub fn total_price(
    lines: &[CartLine],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |total, line| {
            let subtotal = line_subtotal(line)?;

            total
                .to_minor_units()
                .checked_add(subtotal.to_minor_units())
                .ok_or(TotalPriceError::Overflow)?;

            Ok(total.add(subtotal)?)
        })
}

/// Sum of quantities across `lines`.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the count leaves the `i64` range.
pub fn item_count(lines: &[CartLine]) -> Result<i64, TotalPriceError> {
    lines.iter().try_fold(0_i64, |count, line| {
        count
            .checked_add(line.quantity())
            .ok_or(TotalPriceError::Overflow)
    })
}
