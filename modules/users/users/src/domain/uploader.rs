use std::sync::Arc;

use tracing::{debug, error};
use users_sdk::User;

use crate::domain::error::DomainError;
use crate::domain::ports::ImageStore;
use crate::domain::request::ImageUpload;

/// Thin adapter over the [`ImageStore`] collaborator.
///
/// Names the blob after the user it belongs to and turns store failures
/// into [`DomainError::UploadFailure`]. Content checks (size, type) are
/// left to the store.
#[derive(Clone)]
pub struct ImageUploader {
    store: Arc<dyn ImageStore>,
}

impl ImageUploader {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }

    /// Store the image for `owner` and return its storage key.
    pub async fn upload(&self, owner: &User, image: ImageUpload) -> Result<String, DomainError> {
        let name = storage_name(owner, &image.filename);
        debug!(
            user_id = %owner.id,
            original = %image.filename,
            name = %name,
            "Uploading profile image"
        );

        self.store
            .upload(image.stream, &name, image.content_type.as_deref())
            .await
            .map_err(|e| {
                error!(user_id = %owner.id, error = %e, "Image store rejected profile image");
                DomainError::upload_failure(e.to_string())
            })
    }
}

/// `<user id>/<sanitized filename>`. Anything outside `[A-Za-z0-9._-]` is
/// replaced, and leading dots are dropped so the name cannot escape the
/// user's directory.
fn storage_name(owner: &User, filename: &str) -> String {
    let sanitized: String = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = sanitized.trim_start_matches('.');
    let sanitized = if sanitized.is_empty() {
        "image"
    } else {
        sanitized
    };
    format!("{}/{}", owner.id, sanitized)
}
