use std::sync::Arc;

use tracing::{debug, error, info, warn};
use users_sdk::{NewUser, User};
use uuid::Uuid;

use crate::config::UsersConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::{DuplicateEmail, ImageStore, UserStore};
use crate::domain::request::UpdateRequest;
use crate::domain::uploader::ImageUploader;
use crate::domain::validator::{FieldValidator, ValidatedUpdate};

/// Confirmation returned by a successful profile update.
pub const UPDATE_SUCCESS_MESSAGE: &str = "user updated successfully";

/// Result of a successful update: the persisted state plus the
/// confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSuccess {
    pub user: User,
    pub message: &'static str,
}

/// Domain service for the users module.
///
/// Owns the update workflow (validate, upload, merge, persist) and the
/// plain CRUD operations around it. Collaborators are injected once at
/// construction and shared by every request.
pub struct UsersService {
    store: Arc<dyn UserStore>,
    uploader: ImageUploader,
    validator: FieldValidator,
    default_page_size: u64,
    max_page_size: u64,
}

impl UsersService {
    /// # Errors
    /// Fails if the field rules in `cfg` cannot be compiled.
    pub fn new(
        store: Arc<dyn UserStore>,
        images: Arc<dyn ImageStore>,
        cfg: &UsersConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            store,
            uploader: ImageUploader::new(images),
            validator: FieldValidator::new(cfg)?,
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size.max(1),
        })
    }

    /// Apply a decoded update form to the user it names.
    ///
    /// The image, if any, is stored only after every field rule passed, and
    /// the merged record is persisted only after the image was stored. A
    /// failed persist leaves the uploaded image in place; its key is
    /// reported in [`DomainError::PersistFailure`].
    ///
    /// Dropping the returned future before it completes never persists
    /// anything.
    #[tracing::instrument(skip_all, fields(email = %request.email))]
    pub async fn update_user(&self, request: UpdateRequest) -> Result<UpdateSuccess, DomainError> {
        let ValidatedUpdate { request, existing } =
            self.validator.validate(request, self.store.as_ref()).await?;

        let UpdateRequest {
            nickname,
            password,
            country_code,
            birthday,
            image,
            ..
        } = request;

        let uploaded = match image {
            Some(image) => Some(self.uploader.upload(&existing, image).await?),
            None => None,
        };

        let merged = User {
            id: existing.id,
            email: existing.email.clone(),
            nickname,
            password: password.unwrap_or_else(|| existing.password.clone()),
            image_id: uploaded.clone().or_else(|| existing.image_id.clone()),
            country_code,
            birthday,
        };

        if let Err(e) = self.store.update(&merged).await {
            error!(user_id = %merged.id, error = %e, "Failed to persist updated user");
            if let Some(key) = &uploaded {
                warn!(user_id = %merged.id, image = %key, "Uploaded image is orphaned");
            }
            return Err(DomainError::persist_failure(e.to_string(), uploaded));
        }

        info!(
            user_id = %merged.id,
            image_replaced = uploaded.is_some(),
            "Successfully updated user"
        );
        Ok(UpdateSuccess {
            user: merged,
            message: UPDATE_SUCCESS_MESSAGE,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        debug!("Getting user by email");
        self.store
            .user_by_email(email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::target_not_found(email))
    }

    /// List users ordered by email. `limit` defaults to the configured page
    /// size and is clamped to the configured maximum.
    #[tracing::instrument(skip(self))]
    pub async fn list_users(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<User>, DomainError> {
        let limit = limit
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size);
        let offset = offset.unwrap_or(0);

        let users = self
            .store
            .list(limit, offset)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Successfully listed {} users", users.len());
        Ok(users)
    }

    #[tracing::instrument(skip_all, fields(email = %new_user.email))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let NewUser {
            email,
            nickname,
            password,
            country_code,
            birthday,
        } = self.validator.validate_new_user(new_user)?;

        let taken = self
            .store
            .user_by_email(&email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if taken.is_some() {
            return Err(DomainError::email_already_exists(email));
        }

        let user = User {
            id: Uuid::now_v7(),
            email,
            nickname,
            password,
            image_id: None,
            country_code,
            birthday,
        };

        // A concurrent create can take the email between the check above
        // and this insert; the store reports it as a duplicate.
        self.store.insert(&user).await.map_err(|e| {
            if e.downcast_ref::<DuplicateEmail>().is_some() {
                DomainError::email_already_exists(&user.email)
            } else {
                DomainError::database(e.to_string())
            }
        })?;

        info!(user_id = %user.id, "Successfully created user");
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting user");

        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::user_not_found(id));
        }

        info!("Successfully deleted user");
        Ok(())
    }
}
