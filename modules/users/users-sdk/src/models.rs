//! Public models for the `users` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the `users` module and its consumers.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub password: Password,
    /// Storage key of the profile image, if one was ever uploaded.
    pub image_id: Option<String>,
    pub country_code: String,
    pub birthday: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub nickname: String,
    pub password: Password,
    pub country_code: String,
    pub birthday: String,
}

/// Opaque user credential.
///
/// The value is kept in a [`SecretString`] and never shows up in `Debug`
/// output or logs.
#[derive(Clone)]
pub struct Password(SecretString);

impl Password {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(SecretString::from(raw.into()))
    }

    /// Access the raw credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Password {}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
