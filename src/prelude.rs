//! Sokoni prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAction, CartError, CartLine, TotalPriceError},
    catalog::{
        CatalogAction, CatalogError, CatalogSource, CatalogStore, FetchTicket, FilterCriteria,
        FilterUpdate, PriceRange, SortKey,
        source::{JsonCatalog, SimulatedLatency, Unreachable},
    },
    config::{ConfigError, StorefrontConfig},
    pagination::{Page, Pager},
    session::{
        Profile, SessionAction, SessionStore,
        auth::{AuthError, Authenticator, CredentialError, Credentials, MockAuthenticator, Registration},
    },
    storefront::{Action, Storefront, StorefrontError},
    vehicles::{Specifications, Vehicle, VehicleId},
};
