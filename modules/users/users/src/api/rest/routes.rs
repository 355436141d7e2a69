use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::UsersService;

pub const USERS_PATH: &str = "/api/v1/users";

/// Mount the users endpoints on `router`.
///
/// `max_body_bytes` caps request bodies for these routes only, which
/// bounds the size of an update form including its image.
pub fn register_routes(
    router: Router,
    service: Arc<UsersService>,
    max_body_bytes: usize,
) -> Router {
    let users = Router::new()
        .route(
            USERS_PATH,
            get(handlers::list_users)
                .post(handlers::create_user)
                .put(handlers::update_user),
        )
        .route("/api/v1/users/email", get(handlers::get_user_by_email))
        .route("/api/v1/users/{id}", delete(handlers::delete_user))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(Extension(service));

    tracing::debug!(path = USERS_PATH, "Registered users routes");
    router.merge(users)
}
