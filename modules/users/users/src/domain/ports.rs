//! Collaborator contracts consumed by the domain service.
//!
//! Implementations live in `infra`; tests use the recording fakes in
//! `test_support`.

use async_trait::async_trait;
use users_sdk::User;
use uuid::Uuid;

use crate::domain::request::ImageStream;

/// Returned (inside the `anyhow::Error`) by [`UserStore::insert`] when the
/// email is already taken by another record.
#[derive(Debug, thiserror::Error)]
#[error("email {email} is already taken")]
pub struct DuplicateEmail {
    pub email: String,
}

/// Persistence of user records.
///
/// `update` must be all-or-nothing for a single record. Concurrent updates
/// of the same record are serialized by the store, not by callers.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Users ordered by email.
    async fn list(&self, limit: u64, offset: u64) -> anyhow::Result<Vec<User>>;

    /// Fails with [`DuplicateEmail`] if the email is already stored.
    async fn insert(&self, user: &User) -> anyhow::Result<()>;

    /// Replace the stored record with the same ID. Fails if no such record
    /// exists.
    async fn update(&self, user: &User) -> anyhow::Result<()>;

    /// Returns `false` if no record had the given ID.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Durable blob storage for profile images.
///
/// The store is append-only from the domain's point of view: nothing
/// written here is ever deleted by the users module.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `image` under a name derived from `filename` and return the
    /// storage key to reference it by. Size and type limits are enforced
    /// here; `content_type` is the media type declared by the client, if
    /// any.
    async fn upload(
        &self,
        image: ImageStream,
        filename: &str,
        content_type: Option<&str>,
    ) -> anyhow::Result<String>;
}
