//! Authentication
//!
//! Form validation and a mock credential check that drive the [`SessionStore`]. The store
//! itself never sees a password.

use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::session::{Profile, SessionStore};

/// Email accepted by [`MockAuthenticator`].
pub const DEMO_EMAIL: &str = "demo@carsokoni.com";

/// Password accepted by [`MockAuthenticator`].
pub const DEMO_PASSWORD: &str = "password123";

/// Minimum password length accepted by the forms.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Something, an `@`, something, a dot, something. Unanchored.
static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

/// Form validation errors, reported before any store transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// No email entered
    #[error("Email is required")]
    MissingEmail,

    /// Email without a `name@host.tld` run
    #[error("Email is invalid")]
    InvalidEmail,

    /// No password entered
    #[error("Password is required")]
    MissingPassword,

    /// Password below [`MIN_PASSWORD_LEN`]
    #[error("Password must be at least 6 characters")]
    ShortPassword,

    /// No name entered on registration
    #[error("Name is required")]
    MissingName,

    /// Confirmation differs from the password
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Authentication outcomes surfaced to the session as messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Email and password did not match
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The attempt could not complete
    #[error("{0}")]
    Unavailable(String),
}

/// Login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

impl Credentials {
    /// Create a new login form.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the form fields.
    ///
    /// # Errors
    ///
    /// Returns the first failing field check.
    pub fn validate(&self) -> Result<(), CredentialError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Password
    pub password: String,

    /// Password confirmation
    pub confirm_password: String,
}

impl Registration {
    /// Check the form fields.
    ///
    /// # Errors
    ///
    /// Returns the first failing field check.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.name.trim().is_empty() {
            return Err(CredentialError::MissingName);
        }

        validate_email(&self.email)?;
        validate_password(&self.password)?;

        if self.password != self.confirm_password {
            return Err(CredentialError::PasswordMismatch);
        }

        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), CredentialError> {
    if email.is_empty() {
        return Err(CredentialError::MissingEmail);
    }

    if !EMAIL_RE.as_ref().is_some_and(|regex| regex.is_match(email)) {
        return Err(CredentialError::InvalidEmail);
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), CredentialError> {
    if password.is_empty() {
        return Err(CredentialError::MissingPassword);
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::ShortPassword);
    }

    Ok(())
}

/// Checks credentials and creates accounts.
pub trait Authenticator {
    /// Resolve `credentials` to a profile.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Profile, AuthError>;

    /// Create an account for `registration`.
    async fn register(&self, registration: &Registration) -> Result<Profile, AuthError>;
}

/// Single hard-coded account behind an artificial delay.
#[derive(Debug, Clone, Default)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    /// Mock that waits `delay` before answering.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Profile, AuthError> {
        tokio::time::sleep(self.delay).await;

        if credentials.email != DEMO_EMAIL || credentials.password != DEMO_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Profile {
            id: Some("1".to_string()),
            name: Some("Demo User".to_string()),
            email: Some(credentials.email.clone()),
            ..Profile::default()
        })
    }

    async fn register(&self, registration: &Registration) -> Result<Profile, AuthError> {
        tokio::time::sleep(self.delay).await;

        Ok(Profile {
            id: Some(format!("user-{}", registration.email.trim().to_lowercase())),
            name: Some(registration.name.trim().to_string()),
            email: Some(registration.email.trim().to_string()),
            ..Profile::default()
        })
    }
}

/// Validate `credentials` and sign in through `authenticator`.
///
/// A form that fails validation is returned as an error without touching the session. An
/// authentication failure is recorded on the session instead.
///
/// # Errors
///
/// Returns a [`CredentialError`] if the form is invalid.
#[tracing::instrument(skip_all, fields(email = %credentials.email))]
pub async fn login<A: Authenticator>(
    session: &mut SessionStore,
    authenticator: &A,
    credentials: &Credentials,
) -> Result<(), CredentialError> {
    credentials.validate()?;

    session.login_start();

    match authenticator.authenticate(credentials).await {
        Ok(profile) => session.login_success(profile),
        Err(error) => session.login_failure(error.to_string()),
    }

    Ok(())
}

/// Validate `registration` and create the account through `authenticator`.
///
/// # Errors
///
/// Returns a [`CredentialError`] if the form is invalid.
#[tracing::instrument(skip_all, fields(email = %registration.email))]
pub async fn register<A: Authenticator>(
    session: &mut SessionStore,
    authenticator: &A,
    registration: &Registration,
) -> Result<(), CredentialError> {
    registration.validate()?;

    session.register_start();

    match authenticator.register(registration).await {
        Ok(profile) => session.register_success(profile),
        Err(error) => session.register_failure(error.to_string()),
    }

    debug!(authenticated = session.is_authenticated(), "registration settled");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            name: "Achieng".to_string(),
            email: "achieng@example.co.ke".to_string(),
            password: "s3cret!".to_string(),
            confirm_password: "s3cret!".to_string(),
        }
    }

    #[test]
    fn email_validation() {
        assert_eq!(validate_email(""), Err(CredentialError::MissingEmail));
        assert_eq!(validate_email("demo"), Err(CredentialError::InvalidEmail));
        assert_eq!(validate_email("demo@host"), Err(CredentialError::InvalidEmail));
        assert_eq!(validate_email("@host.com"), Err(CredentialError::InvalidEmail));
        assert_eq!(validate_email("demo@host."), Err(CredentialError::InvalidEmail));
        assert_eq!(validate_email("   "), Err(CredentialError::InvalidEmail));
        assert_eq!(validate_email(DEMO_EMAIL), Ok(()));
    }

    #[test]
    fn email_validation_accepts_loose_addresses() {
        assert_eq!(validate_email("user@.example.com"), Ok(()));
        assert_eq!(validate_email("wanjiru@mail.example.co.ke"), Ok(()));
        assert_eq!(validate_email("Wanjiru <wanjiru@example.com>"), Ok(()));
    }

    #[test]
    fn password_validation() {
        assert_eq!(validate_password(""), Err(CredentialError::MissingPassword));
        assert_eq!(validate_password("12345"), Err(CredentialError::ShortPassword));
        assert_eq!(validate_password("123456"), Ok(()));
    }

    #[test]
    fn registration_validation() {
        assert_eq!(registration().validate(), Ok(()));

        let mismatched = Registration {
            confirm_password: "other!!".to_string(),
            ..registration()
        };
        assert_eq!(mismatched.validate(), Err(CredentialError::PasswordMismatch));

        let unnamed = Registration {
            name: "  ".to_string(),
            ..registration()
        };
        assert_eq!(unnamed.validate(), Err(CredentialError::MissingName));
    }

    #[tokio::test]
    async fn demo_account_signs_in() -> Result<(), CredentialError> {
        let mut session = SessionStore::new();

        login(
            &mut session,
            &MockAuthenticator::default(),
            &Credentials::new(DEMO_EMAIL, DEMO_PASSWORD),
        )
        .await?;

        assert!(session.is_authenticated());
        assert_eq!(session.profile().name.as_deref(), Some("Demo User"));
        assert!(!session.is_loading());

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_records_failure() -> Result<(), CredentialError> {
        let mut session = SessionStore::new();

        login(
            &mut session,
            &MockAuthenticator::default(),
            &Credentials::new(DEMO_EMAIL, "password124"),
        )
        .await?;

        assert!(!session.is_authenticated());
        assert_eq!(session.error(), Some("Invalid email or password"));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_form_leaves_session_untouched() {
        let mut session = SessionStore::new();

        let result = login(
            &mut session,
            &MockAuthenticator::default(),
            &Credentials::new("not-an-email", DEMO_PASSWORD),
        )
        .await;

        assert_eq!(result, Err(CredentialError::InvalidEmail));
        assert!(!session.is_loading());
        assert_eq!(session.error(), None);
    }

    #[tokio::test]
    async fn registration_signs_in_new_account() -> Result<(), CredentialError> {
        let mut session = SessionStore::new();

        register(&mut session, &MockAuthenticator::default(), &registration()).await?;

        assert!(session.is_authenticated());
        assert_eq!(session.profile().name.as_deref(), Some("Achieng"));
        assert_eq!(
            session.profile().email.as_deref(),
            Some("achieng@example.co.ke")
        );

        Ok(())
    }
}
