//! Local implementation of `UsersClient`.
//!
//! Used by other modules running in the same process. Delegates to the
//! domain service and converts errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;
use users_sdk::{User, UsersClient, UsersError};

use crate::domain::service::UsersService;

pub struct UsersLocalClient {
    service: Arc<UsersService>,
}

impl UsersLocalClient {
    #[must_use]
    pub fn new(service: Arc<UsersService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersClient for UsersLocalClient {
    async fn get_user_by_email(&self, email: &str) -> Result<User, UsersError> {
        self.service
            .get_user_by_email(email)
            .await
            .map_err(Into::into)
    }

    async fn list_users(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<User>, UsersError> {
        self.service.list_users(limit, offset).await.map_err(|e| {
            tracing::error!(error = %e, "Listing users for local client failed");
            e.into()
        })
    }
}
