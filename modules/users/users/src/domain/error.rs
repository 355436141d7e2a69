use std::fmt;

use thiserror::Error;
use users_sdk::UsersError;
use uuid::Uuid;

/// Kind of a single rule violation found by the field validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The value is not well formed (bad country code, unparsable date...).
    Malformed,
    /// The value is well formed but the requested change is not allowed.
    InvalidChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn malformed(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Malformed,
            field,
            message: message.into(),
        }
    }

    pub fn invalid_change(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::InvalidChange,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    /// Structural problem with the input: missing field, unparsable body,
    /// syntactically invalid email.
    #[error("{field} {message}")]
    MalformedInput { field: String, message: String },

    /// One or more field rules failed.
    #[error("{}", join_violations(.violations))]
    Validation { violations: Vec<Violation> },

    /// The email of an update form does not belong to any user.
    #[error("user with email {email} was not found")]
    TargetNotFound { email: String },

    #[error("user {id} was not found")]
    UserNotFound { id: Uuid },

    #[error("a user with the following email({email}) exist")]
    EmailAlreadyExists { email: String },

    /// The image store rejected or failed to store the profile image.
    #[error("image upload failed: {message}")]
    UploadFailure { message: String },

    /// Saving the merged user failed. `orphaned_image` holds the key of an
    /// image uploaded earlier in the same request, which is now referenced
    /// by no user.
    #[error("persisting user failed: {message}")]
    PersistFailure {
        message: String,
        orphaned_image: Option<String>,
    },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(violations: Vec<Violation>) -> Self {
        Self::Validation { violations }
    }

    pub fn target_not_found(email: impl Into<String>) -> Self {
        Self::TargetNotFound {
            email: email.into(),
        }
    }

    #[must_use]
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn upload_failure(message: impl Into<String>) -> Self {
        Self::UploadFailure {
            message: message.into(),
        }
    }

    pub fn persist_failure(message: impl Into<String>, orphaned_image: Option<String>) -> Self {
        Self::PersistFailure {
            message: message.into(),
            orphaned_image,
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for UsersError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::TargetNotFound { email } => UsersError::not_found(email),
            DomainError::UserNotFound { id } => UsersError::not_found_by_id(id),
            DomainError::EmailAlreadyExists { email } => UsersError::conflict(email),
            e @ (DomainError::MalformedInput { .. } | DomainError::Validation { .. }) => {
                UsersError::validation(e.to_string())
            }
            DomainError::UploadFailure { .. }
            | DomainError::PersistFailure { .. }
            | DomainError::Database { .. } => UsersError::internal(),
        }
    }
}
