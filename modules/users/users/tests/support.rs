#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support for `users` integration tests.
//!
//! Builds the module on an in-memory SQLite database with a temporary
//! image root, and encodes multipart update forms.

#![allow(dead_code)] // Not every test binary uses every helper

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt as _;
use uuid::Uuid;

use users::config::{ImagesConfig, UsersConfig};
use users::domain::ports::UserStore;
use users::infra::storage::SeaUserStore;
use users::{Password, User, Users};

pub const BOUNDARY: &str = "users-integration-boundary";

pub struct TestContext {
    pub db: DatabaseConnection,
    pub users: Users,
    pub images: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(tweak: impl FnOnce(&mut UsersConfig)) -> Self {
        let images = TempDir::new().expect("Failed to create image root");
        let mut cfg = UsersConfig {
            images: ImagesConfig {
                root_dir: images.path().to_path_buf(),
                ..ImagesConfig::default()
            },
            ..UsersConfig::default()
        };
        tweak(&mut cfg);

        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");
        let users = Users::init(&cfg, db.clone())
            .await
            .expect("Failed to init users module");

        Self { db, users, images }
    }

    pub fn store(&self) -> SeaUserStore {
        SeaUserStore::new(self.db.clone())
    }

    pub fn app(&self) -> Router {
        self.users.register_rest(Router::new(), 1024 * 1024)
    }

    pub async fn seed(&self, user: &User) {
        self.store().insert(user).await.expect("Failed to seed user");
    }

    pub async fn stored(&self, email: &str) -> Option<User> {
        self.store().user_by_email(email).await.unwrap()
    }

    /// Number of files anywhere under the image root.
    pub fn image_count(&self) -> usize {
        fn walk(dir: &std::path::Path) -> usize {
            std::fs::read_dir(dir)
                .unwrap()
                .map(|e| e.unwrap().path())
                .map(|p| if p.is_dir() { walk(&p) } else { 1 })
                .sum()
        }
        walk(self.images.path())
    }
}

pub fn makoto_shishio() -> User {
    User {
        id: Uuid::now_v7(),
        email: "makoto@shishio.com".to_owned(),
        nickname: "Makoto".to_owned(),
        password: Password::new("123456"),
        image_id: Some("profile20.png".to_owned()),
        country_code: "JPN".to_owned(),
        birthday: "07/01/1900".to_owned(),
    }
}

pub fn user3() -> User {
    User {
        id: Uuid::now_v7(),
        email: "user3@gmail.com".to_owned(),
        nickname: "Maldini".to_owned(),
        password: Password::new("123456"),
        image_id: None,
        country_code: "ITA".to_owned(),
        birthday: "08/01/2020".to_owned(),
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        match part {
            Part::Text(name, value) => body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            ),
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Text fields of a valid update form for `email`.
pub fn update_fields(email: &str) -> Vec<Part<'_>> {
    vec![
        Part::Text("email", email),
        Part::Text("nickname", "Mummy"),
        Part::Text("password", "111111"),
        Part::Text("country_code", "UK"),
        Part::Text("birthday", "12/22/2020"),
    ]
}

pub fn put_form(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/api/v1/users")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
