//! Multipart decoding of the profile update form.
//!
//! The accepted fields are declared by [`FormField`]; anything else in the
//! body is skipped. The image part is spooled to an anonymous temporary
//! file so it is never held in memory as a whole.

use std::io::SeekFrom;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use users_sdk::Password;

use crate::domain::error::DomainError;
use crate::domain::request::{ImageUpload, UpdateRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    Nickname,
    Password,
    CountryCode,
    Birthday,
    ImageData,
}

impl FormField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(Self::Email),
            "nickname" => Some(Self::Nickname),
            "password" => Some(Self::Password),
            "country_code" => Some(Self::CountryCode),
            "birthday" => Some(Self::Birthday),
            "image_data" => Some(Self::ImageData),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Nickname => "nickname",
            Self::Password => "password",
            Self::CountryCode => "country_code",
            Self::Birthday => "birthday",
            Self::ImageData => "image_data",
        }
    }
}

#[derive(Default)]
struct Collected {
    email: Option<String>,
    nickname: Option<String>,
    password: Option<String>,
    country_code: Option<String>,
    birthday: Option<String>,
    image: Option<ImageUpload>,
}

fn malformed_body(e: &MultipartError) -> DomainError {
    DomainError::malformed("body", e.body_text())
}

fn required(value: Option<String>, field: FormField) -> Result<String, DomainError> {
    value.ok_or_else(|| DomainError::malformed(field.name(), "is required"))
}

/// Decode an update form. Text fields must all be present; the image is
/// optional. A repeated field keeps its last value.
pub async fn decode_update_form(mut multipart: Multipart) -> Result<UpdateRequest, DomainError> {
    let mut form = Collected::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| malformed_body(&e))?
    {
        let Some(kind) = field.name().and_then(FormField::from_name) else {
            tracing::debug!(name = ?field.name(), "Skipping unknown form field");
            continue;
        };

        let slot = match kind {
            FormField::ImageData => {
                form.image = spool_image(field).await?;
                continue;
            }
            FormField::Email => &mut form.email,
            FormField::Nickname => &mut form.nickname,
            FormField::Password => &mut form.password,
            FormField::CountryCode => &mut form.country_code,
            FormField::Birthday => &mut form.birthday,
        };
        *slot = Some(field.text().await.map_err(|e| malformed_body(&e))?);
    }

    let password = required(form.password, FormField::Password)?;
    Ok(UpdateRequest {
        email: required(form.email, FormField::Email)?,
        nickname: required(form.nickname, FormField::Nickname)?,
        password: (!password.is_empty()).then(|| Password::new(password)),
        country_code: required(form.country_code, FormField::CountryCode)?,
        birthday: required(form.birthday, FormField::Birthday)?,
        image: form.image,
    })
}

/// Copy the image part into a temp file and rewind it. An empty part with
/// no filename is how browsers send an untouched file input; it yields
/// `None`.
async fn spool_image(mut field: Field<'_>) -> Result<Option<ImageUpload>, DomainError> {
    let filename = field.file_name().map(ToOwned::to_owned).unwrap_or_default();
    let content_type = field.content_type().map(ToOwned::to_owned);

    let spool_error = |e: std::io::Error| DomainError::upload_failure(format!("spooling image: {e}"));

    let file = tempfile::tempfile().map_err(spool_error)?;
    let mut file = tokio::fs::File::from_std(file);
    let mut empty = true;

    while let Some(chunk) = field.chunk().await.map_err(|e| malformed_body(&e))? {
        empty &= chunk.is_empty();
        file.write_all(&chunk).await.map_err(spool_error)?;
    }

    if empty && filename.is_empty() {
        return Ok(None);
    }

    file.flush().await.map_err(spool_error)?;
    file.seek(SeekFrom::Start(0)).await.map_err(spool_error)?;

    Ok(Some(ImageUpload::new(filename, content_type, Box::pin(file))))
}
