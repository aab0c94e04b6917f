//! Session Store
//!
//! Authentication is the boolean flag alone: no token, expiry or stored credential.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub mod auth;

/// Profile fields. Every field is optional; updates merge field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Account identifier
    pub id: Option<String>,

    /// Display name
    pub name: Option<String>,

    /// Email address
    pub email: Option<String>,

    /// Phone number
    pub phone: Option<String>,

    /// Street address
    pub address: Option<String>,

    /// City
    pub city: Option<String>,

    /// Country
    pub country: Option<String>,
}

impl Profile {
    /// Shallow-merge `update` into this profile. Fields the update leaves unset are kept.
    pub fn merge(&mut self, update: Profile) {
        let Profile {
            id,
            name,
            email,
            phone,
            address,
            city,
            country,
        } = update;

        for (field, value) in [
            (&mut self.id, id),
            (&mut self.name, name),
            (&mut self.email, email),
            (&mut self.phone, phone),
            (&mut self.address, address),
            (&mut self.city, city),
            (&mut self.country, country),
        ] {
            if value.is_some() {
                *field = value;
            }
        }
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Profile::default()
    }
}

/// Session mutations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Login submitted
    LoginStart,

    /// Login accepted with the given profile
    LoginSuccess(Profile),

    /// Login rejected with a message
    LoginFailure(String),

    /// Sign out
    Logout,

    /// Registration submitted
    RegisterStart,

    /// Registration accepted with the given profile
    RegisterSuccess(Profile),

    /// Registration rejected with a message
    RegisterFailure(String),

    /// Merge fields into the profile
    UpdateProfile(Profile),

    /// Dismiss the current error
    ClearError,
}

/// Session Store
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    authenticated: bool,
    profile: Profile,
    loading: bool,
    error: Option<String>,
}

impl SessionStore {
    /// Create a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a session mutation.
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::LoginStart => self.login_start(),
            SessionAction::LoginSuccess(profile) => self.login_success(profile),
            SessionAction::LoginFailure(message) => self.login_failure(message),
            SessionAction::Logout => self.logout(),
            SessionAction::RegisterStart => self.register_start(),
            SessionAction::RegisterSuccess(profile) => self.register_success(profile),
            SessionAction::RegisterFailure(message) => self.register_failure(message),
            SessionAction::UpdateProfile(update) => self.update_profile(update),
            SessionAction::ClearError => self.clear_error(),
        }
    }

    /// Mark a login attempt as in flight.
    pub fn login_start(&mut self) {
        debug!("login started");

        self.start();
    }

    /// Sign in with `profile`.
    pub fn login_success(&mut self, profile: Profile) {
        info!(email = profile.email.as_deref(), "signed in");

        self.succeed(profile);
    }

    /// Record a rejected login, dropping any authenticated state.
    pub fn login_failure(&mut self, message: impl Into<String>) {
        let message = message.into();

        warn!(%message, "login failed");

        self.fail(message);
    }

    /// Sign out.
    pub fn logout(&mut self) {
        info!("signed out");

        self.authenticated = false;
        self.profile = Profile::default();
        self.error = None;
    }

    /// Mark a registration as in flight.
    pub fn register_start(&mut self) {
        debug!("registration started");

        self.start();
    }

    /// Sign in the newly registered `profile`.
    pub fn register_success(&mut self, profile: Profile) {
        info!(email = profile.email.as_deref(), "registered");

        self.succeed(profile);
    }

    /// Record a rejected registration, dropping any authenticated state.
    pub fn register_failure(&mut self, message: impl Into<String>) {
        let message = message.into();

        warn!(%message, "registration failed");

        self.fail(message);
    }

    /// Shallow-merge `update` into the profile.
    ///
    /// Does not check authentication; callers are expected to only offer this when signed in.
    pub fn update_profile(&mut self, update: Profile) {
        debug!("profile updated");

        self.profile.merge(update);
    }

    /// Dismiss the current error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn succeed(&mut self, profile: Profile) {
        self.loading = false;
        self.authenticated = true;
        self.profile = profile;
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        self.loading = false;
        self.authenticated = false;
        self.profile = Profile::default();
        self.error = Some(message);
    }

    /// True once a login or registration has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Profile fields
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// True while a login or registration is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
