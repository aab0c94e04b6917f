//! Text rendering of listings and the cart

use std::{io, ops::Range};

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, pagination::Page, vehicles::Vehicle};

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write a page of vehicles as a table, followed by the page position.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_listing(
    mut out: impl io::Write,
    page: &Page<'_, &Vehicle>,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Vehicle", "Year", "Category", "Rating", "Price", "Stock"]);

    for vehicle in page.items {
        builder.push_record([
            vehicle.id.to_string(),
            vehicle.display_name(),
            vehicle.year.to_string(),
            vehicle.category.clone(),
            format!("{:.1}", vehicle.rating),
            vehicle.price.to_string(),
            if vehicle.in_stock { "yes" } else { "no" }.to_string(),
        ]);
    }

    write_table(&mut out, builder, 4..6)?;

    writeln!(
        out,
        " {}  (page {} of {})",
        page.summary(),
        page.number,
        page.total_pages.max(1)
    )
    .map_err(|_err| RenderError::IO)
}

/// Write the cart lines as a table, followed by the aggregate.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    if cart.is_empty() {
        return writeln!(out, " Your cart is empty").map_err(|_err| RenderError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Vehicle", "Unit Price", "Qty", "Line Total"]);

    for line in cart.lines() {
        builder.push_record([
            line.vehicle().display_name(),
            line.price().to_string(),
            line.quantity().to_string(),
            line.subtotal().map_or_else(|_err| "-".to_string(), |sub| sub.to_string()),
        ]);
    }

    write_table(&mut out, builder, 1..4)?;

    let items_label = " Items:";
    let total_label = " Total:";

    let label_width = items_label.len().max(total_label.len());

    write_summary_line(&mut out, items_label, &cart.item_count().to_string(), label_width)?;
    write_summary_line(&mut out, total_label, &cart.total().to_string(), label_width)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: Range<usize>,
) -> Result<(), RenderError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| RenderError::IO)
}

fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_width: usize,
) -> Result<(), RenderError> {
    writeln!(out, "{label:>label_width$}  {value}").map_err(|_err| RenderError::IO)
}
