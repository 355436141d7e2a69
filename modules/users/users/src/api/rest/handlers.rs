use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Json, Multipart, Path, Query};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::service::UsersService;

use super::dto::{CreateUserReq, EmailQuery, ListQuery, UserDto};
use super::envelope::{respond, ApiResult};
use super::form::decode_update_form;

/// `GET /api/v1/users`
#[tracing::instrument(skip_all)]
pub async fn list_users(
    Extension(svc): Extension<Arc<UsersService>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query.map_err(|e| DomainError::malformed("query", e.body_text()))?;
    let users = svc.list_users(query.limit, query.offset).await?;
    let dtos: Vec<UserDto> = users.into_iter().map(Into::into).collect();
    Ok(respond(StatusCode::OK, dtos))
}

/// `GET /api/v1/users/email?address=<email>`
#[tracing::instrument(skip_all)]
pub async fn get_user_by_email(
    Extension(svc): Extension<Arc<UsersService>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult {
    let address = query
        .ok()
        .and_then(|Query(q)| q.address)
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| {
            DomainError::malformed("address", "is not present on url as a query param")
        })?;

    let user = svc.get_user_by_email(address.trim()).await?;
    Ok(respond(StatusCode::OK, UserDto::from(user)))
}

/// `POST /api/v1/users`
#[tracing::instrument(skip_all)]
pub async fn create_user(
    Extension(svc): Extension<Arc<UsersService>>,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> ApiResult {
    let Json(req) = body.map_err(|e| DomainError::malformed("body", e.body_text()))?;
    let user = svc.create_user(req.into()).await?;
    Ok(respond(
        StatusCode::CREATED,
        format!("Welcome {}!", user.nickname),
    ))
}

/// `PUT /api/v1/users`, the multipart profile update.
#[tracing::instrument(skip_all)]
pub async fn update_user(
    Extension(svc): Extension<Arc<UsersService>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    let multipart = multipart.map_err(|e| DomainError::malformed("body", e.body_text()))?;
    let request = decode_update_form(multipart).await?;
    let outcome = svc.update_user(request).await?;
    Ok(respond(StatusCode::OK, outcome.message))
}

/// `DELETE /api/v1/users/{id}`
#[tracing::instrument(skip_all)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<UsersService>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult {
    let Path(id) = id.map_err(|e| DomainError::malformed("id", e.body_text()))?;
    svc.delete_user(id).await?;
    Ok(respond(StatusCode::OK, format!("User {id} deleted!")))
}
