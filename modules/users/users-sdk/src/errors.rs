//! Public error types for the `users` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can be returned by the `UsersClient`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersError {
    /// No user matched the given email.
    #[error("User not found: {email}")]
    NotFound { email: String },

    /// No user has the given ID.
    #[error("User not found: {id}")]
    NotFoundById { id: Uuid },

    /// A user with the specified email already exists.
    #[error("User with email '{email}' already exists")]
    Conflict { email: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl UsersError {
    pub fn not_found(email: impl Into<String>) -> Self {
        Self::NotFound {
            email: email.into(),
        }
    }

    #[must_use]
    pub fn not_found_by_id(id: Uuid) -> Self {
        Self::NotFoundById { id }
    }

    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
