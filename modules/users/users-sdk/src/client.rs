use async_trait::async_trait;

use crate::errors::UsersError;
use crate::models::User;

/// Object-safe client for in-process consumers of the `users` module.
///
/// Obtain an implementation from the module (`Users::client`); the
/// update workflow is only exposed over REST because it consumes a
/// multipart upload.
#[async_trait]
pub trait UsersClient: Send + Sync {
    /// Look up a single user by email.
    async fn get_user_by_email(&self, email: &str) -> Result<User, UsersError>;

    /// List users ordered by email.
    ///
    /// `limit` falls back to the module's default page size and is clamped
    /// to its maximum.
    async fn list_users(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<User>, UsersError>;
}
