//! Catalog Browsing Example
//!
//! Loads the catalog, applies filters from the command line, prints one listing page and
//! the cart built from `--add` ids.
//!
//! Use `-s` to search, `-b`/`-c` to select brands and categories, `--sort` to order the
//! listing, `-p` to pick a page and `-l` to sign in with the demo account.
//! Set `RUST_LOG=debug` to trace every store transition.

use std::{io, io::Write, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use rusty_money::iso::Currency;
use tracing_subscriber::{EnvFilter, fmt};

use sokoni::{
    cart::CartAction,
    catalog::{
        CatalogAction, CatalogSource, FilterUpdate, SortKey,
        source::{JsonCatalog, SimulatedLatency},
    },
    config::StorefrontConfig,
    render::{write_cart, write_listing},
    session::auth::{Credentials, DEMO_EMAIL, DEMO_PASSWORD, MockAuthenticator},
    storefront::Storefront,
    utils::ExampleBrowseArgs,
    vehicles::VehicleId,
};

/// Catalog Browsing Example
#[tokio::main]
pub async fn main() -> Result<()> {
    fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ExampleBrowseArgs::parse();

    let config = match args.config.as_deref() {
        Some(path) => StorefrontConfig::from_path(path)?,
        None => StorefrontConfig::default(),
    };
    let currency = config.currency()?;

    let mut storefront = Storefront::new(&config)?;

    let start = Instant::now();
    let loaded = load(&mut storefront, &args, &config, currency).await?;
    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if !loaded {
        if let Some(error) = storefront.catalog().error() {
            writeln!(handle, " Error loading cars: {error}")?;
        }

        return Ok(());
    }

    writeln!(handle, " Catalog loaded in {}", elapsed.human(Truncate::Nano))?;

    let mut update = FilterUpdate::default()
        .brands(args.brand.iter().cloned())
        .categories(args.category.iter().cloned());

    if let Some(search) = args.search.clone() {
        update = update.search_term(search);
    }

    storefront.dispatch(CatalogAction::SetFilters(update))?;
    storefront.dispatch(CatalogAction::SetSortBy(SortKey::parse(&args.sort)))?;
    storefront.go_to_page(args.page);

    writeln!(handle, " Sorted by: {}", storefront.catalog().sort_by().label())?;

    let listing = storefront.catalog().filtered();
    write_listing(&mut handle, &storefront.page(&listing))?;

    for id in &args.add {
        let Some(vehicle) = storefront.catalog().vehicle(VehicleId::new(*id)).cloned() else {
            writeln!(handle, " No vehicle with id {id}")?;
            continue;
        };

        storefront.dispatch(CartAction::Add {
            vehicle,
            quantity: 1,
        })?;
    }

    if args.login {
        let authenticator = MockAuthenticator::new(config.auth_latency());

        storefront
            .login(&authenticator, &Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await?;

        if let Some(name) = storefront.session().profile().name.as_deref() {
            writeln!(handle, " Signed in as {name}")?;
        }
    }

    write_cart(&mut handle, storefront.cart())?;

    Ok(())
}

async fn load(
    storefront: &mut Storefront,
    args: &ExampleBrowseArgs,
    config: &StorefrontConfig,
    currency: &'static Currency,
) -> Result<bool> {
    let catalog = match args.catalog.as_deref() {
        Some(path) => JsonCatalog::from_path(path, currency)?,
        None => JsonCatalog::bundled(currency),
    };

    Ok(fetch(storefront, &SimulatedLatency::new(catalog, config.fetch_latency())).await)
}

async fn fetch<S: CatalogSource>(storefront: &mut Storefront, source: &S) -> bool {
    storefront.fetch_catalog(source).await && storefront.catalog().error().is_none()
}
