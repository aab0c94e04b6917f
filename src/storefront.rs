//! Storefront
//!
//! Single owner of the catalog, cart and session stores. Presentation sends [`Action`]s
//! through [`Storefront::dispatch`] and reads derived views; no store reads another's state.

use thiserror::Error;

use crate::{
    cart::{Cart, CartAction, CartError},
    catalog::{CatalogAction, CatalogError, CatalogSource, CatalogStore},
    config::{ConfigError, StorefrontConfig},
    pagination::{Page, Pager},
    session::{
        SessionAction, SessionStore,
        auth::{self, Authenticator, CredentialError, Credentials, Registration},
    },
    vehicles::Vehicle,
};

/// Storefront errors
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rejected cart mutation
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Catalog could not be read
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Any store mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Catalog mutation
    Catalog(CatalogAction),

    /// Cart mutation
    Cart(CartAction),

    /// Session mutation
    Session(SessionAction),
}

impl From<CatalogAction> for Action {
    fn from(action: CatalogAction) -> Self {
        Self::Catalog(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Self::Cart(action)
    }
}

impl From<SessionAction> for Action {
    fn from(action: SessionAction) -> Self {
        Self::Session(action)
    }
}

/// Storefront
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: CatalogStore,
    cart: Cart,
    session: SessionStore,
    pager: Pager,
}

impl Storefront {
    /// Build empty stores from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured currency or price ceiling is invalid.
    pub fn new(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        let currency = config.currency()?;

        let catalog = CatalogStore::new(config.price_ceiling()?)
            .with_row_sizes(config.featured_count, config.related_count);

        Ok(Self {
            catalog,
            cart: Cart::new(currency),
            session: SessionStore::new(),
            pager: Pager::new(config.page_size),
        })
    }

    /// Apply `action` to the store it targets.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a cart mutation is rejected; the cart is unchanged.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<(), StorefrontError> {
        match action.into() {
            Action::Catalog(action) => {
                self.catalog.apply(action);
                self.pager.observe(self.catalog.revision());
            }
            Action::Cart(action) => self.cart.apply(action)?,
            Action::Session(action) => self.session.apply(action),
        }

        Ok(())
    }

    /// Load the catalog from `source`.
    pub async fn fetch_catalog<S: CatalogSource>(&mut self, source: &S) -> bool {
        let applied = self.catalog.fetch_catalog(source).await;
        self.pager.observe(self.catalog.revision());
        applied
    }

    /// Sign in through `authenticator`.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialError`] if the form is invalid.
    pub async fn login<A: Authenticator>(
        &mut self,
        authenticator: &A,
        credentials: &Credentials,
    ) -> Result<(), CredentialError> {
        auth::login(&mut self.session, authenticator, credentials).await
    }

    /// Register through `authenticator`.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialError`] if the form is invalid.
    pub async fn register<A: Authenticator>(
        &mut self,
        authenticator: &A,
        registration: &Registration,
    ) -> Result<(), CredentialError> {
        auth::register(&mut self.session, authenticator, registration).await
    }

    /// Move to the next listing page.
    pub fn next_page(&mut self) {
        let total = self.catalog.filtered().len();
        self.pager.next(total);
    }

    /// Move to the previous listing page.
    pub fn previous_page(&mut self) {
        self.pager.previous();
    }

    /// Jump to a listing page.
    pub fn go_to_page(&mut self, page: usize) {
        let total = self.catalog.filtered().len();
        self.pager.go_to(page, total);
    }

    /// The current page of `listing`, as returned by [`CatalogStore::filtered`].
    pub fn page<'a, 'v>(&self, listing: &'a [&'v Vehicle]) -> Page<'a, &'v Vehicle> {
        self.pager.slice(listing)
    }

    /// Catalog Store
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Cart Store
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Session Store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
