//! Sokoni
//!
//! Sokoni is the state layer of a car-marketplace storefront: a catalog with filtering,
//! sorting and pagination, a shopping cart with running totals, and a mock user session.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod pagination;
pub mod prelude;
pub mod render;
pub mod session;
pub mod storefront;
pub mod utils;
pub mod vehicles;
