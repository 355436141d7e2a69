//! Uniform response envelope for every users endpoint.
//!
//! Success is `{"status":"success","data":...}`, failure is
//! `{"status":"fail","error":"..."}`. [`status_for`] is the only place a
//! domain failure is given an HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Render a success envelope with the given status code.
pub fn respond<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(Envelope::success(data))).into_response()
}

pub type ApiResult<T = Response> = Result<T, ApiError>;

/// Handler-side error: a [`DomainError`] rendered as a fail envelope.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

/// Total mapping from domain failures to HTTP status codes.
pub fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::MalformedInput { .. } | DomainError::Validation { .. } => {
            StatusCode::BAD_REQUEST
        }
        DomainError::TargetNotFound { .. } | DomainError::UserNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        DomainError::EmailAlreadyExists { .. } => StatusCode::CONFLICT,
        DomainError::UploadFailure { .. }
        | DomainError::PersistFailure { .. }
        | DomainError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message shown to the caller. Server-side failures get a fixed text; the
/// detail goes to the log.
fn public_message(e: &DomainError) -> String {
    match e {
        DomainError::UploadFailure { .. } => "failed to store profile image".to_owned(),
        DomainError::PersistFailure { .. } => "failed to persist user".to_owned(),
        DomainError::Database { .. } => "internal database error".to_owned(),
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            match &self.0 {
                DomainError::PersistFailure {
                    orphaned_image: Some(key),
                    ..
                } => {
                    tracing::error!(error = %self.0, orphaned_image = %key, "Request failed");
                }
                e => tracing::error!(error = %e, "Request failed"),
            }
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        (
            status,
            Json(Envelope::<()>::fail(public_message(&self.0))),
        )
            .into_response()
    }
}
