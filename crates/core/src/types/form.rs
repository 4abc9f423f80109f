//! User input forms and their local validation.
//!
//! Only checks that can be decided without the backend live here. Anything
//! about content (name length, account uniqueness, ...) is left to the server.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::types::CardValue;

/// Errors raised by local form validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Password and its confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// The card value is not a number.
    #[error("card value must be a number, got {0:?}")]
    InvalidValue(String),
}

/// Email and password submitted on the login page.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Account registration form.
///
/// ## Constraints
///
/// - `password` must equal `confirm_password`
///
/// Name and email are sent as typed; the backend validates them.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignupForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }

    /// Check the form before submission.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::PasswordMismatch`] if the two passwords differ.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

/// A card to be created in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub name: String,
    pub value: CardValue,
}

impl NewCard {
    /// Build a card from raw form input.
    ///
    /// The name is kept as typed, even when empty. The value must parse as
    /// a decimal number (surrounding whitespace is ignored).
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidValue`] if `value` is not numeric.
    pub fn parse(name: &str, value: &str) -> Result<Self, FormError> {
        let value = value
            .parse::<CardValue>()
            .map_err(|_| FormError::InvalidValue(value.to_owned()))?;
        Ok(Self {
            name: name.to_owned(),
            value,
        })
    }
}
