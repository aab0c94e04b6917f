//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the browse example
#[derive(Debug, Parser)]
pub struct ExampleBrowseArgs {
    /// Free-text search over brand, model and category
    #[clap(short, long)]
    pub search: Option<String>,

    /// Restrict to a brand (repeatable)
    #[clap(short, long)]
    pub brand: Vec<String>,

    /// Restrict to a category (repeatable)
    #[clap(short, long)]
    pub category: Vec<String>,

    /// Sort key: newest, oldest, price-low-high, price-high-low, name-a-z, name-z-a
    #[clap(long, default_value = "newest")]
    pub sort: String,

    /// Listing page to show
    #[clap(short, long, default_value_t = 1)]
    pub page: usize,

    /// Vehicle ids to add to the cart (repeatable)
    #[clap(short, long)]
    pub add: Vec<u32>,

    /// Sign in with the demo account before printing the cart
    #[clap(short, long)]
    pub login: bool,

    /// YAML configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// JSON catalog file; defaults to the bundled catalog
    #[clap(long)]
    pub catalog: Option<PathBuf>,
}
