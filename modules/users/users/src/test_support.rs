#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::AsyncReadExt;
use users_sdk::{Password, User};
use uuid::Uuid;

use crate::config::UsersConfig;
use crate::domain::ports::{DuplicateEmail, ImageStore, UserStore};
use crate::domain::request::{ImageStream, ImageUpload, UpdateRequest};
use crate::domain::service::UsersService;

/// Collaborator call as seen by the recording fakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lookup(String),
    Upload(String),
    Update(Uuid),
    Insert(Uuid),
    Delete(Uuid),
}

/// Shared, ordered record of every collaborator call made in a test.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    pub fn lookups(&self) -> usize {
        self.count(|c| matches!(c, Call::Lookup(_)))
    }

    pub fn uploads(&self) -> usize {
        self.count(|c| matches!(c, Call::Upload(_)))
    }

    pub fn updates(&self) -> usize {
        self.count(|c| matches!(c, Call::Update(_)))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().iter().filter(|c| pred(c)).count()
    }
}

/// In-memory `UserStore` that records calls and can be told to fail writes.
pub struct FakeUserStore {
    log: CallLog,
    users: Mutex<Vec<User>>,
    fail_updates: bool,
    duplicate_inserts: bool,
}

impl FakeUserStore {
    pub fn with_users(log: CallLog, users: Vec<User>) -> Self {
        Self {
            log,
            users: Mutex::new(users),
            fail_updates: false,
            duplicate_inserts: false,
        }
    }

    #[must_use]
    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    /// Every insert loses a race against a concurrent create of the same
    /// email.
    #[must_use]
    pub fn duplicate_inserts(mut self) -> Self {
        self.duplicate_inserts = true;
        self
    }

    pub fn snapshot(&self, email: &str) -> Option<User> {
        self.users.lock().iter().find(|u| u.email == email).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().len()
    }
}

#[async_trait]
impl UserStore for FakeUserStore {
    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.log.record(Call::Lookup(email.to_owned()));
        Ok(self.snapshot(email))
    }

    async fn user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, limit: u64, offset: u64) -> anyhow::Result<Vec<User>> {
        let mut users = self.users.lock().clone();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users
            .into_iter()
            .skip(usize::try_from(offset)?)
            .take(usize::try_from(limit)?)
            .collect())
    }

    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        self.log.record(Call::Insert(user.id));
        if self.duplicate_inserts {
            return Err(DuplicateEmail {
                email: user.email.clone(),
            }
            .into());
        }
        self.users.lock().push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> anyhow::Result<()> {
        self.log.record(Call::Update(user.id));
        if self.fail_updates {
            anyhow::bail!("database is locked");
        }
        let mut users = self.users.lock();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| anyhow::anyhow!("no row with id {}", user.id))?;
        *slot = user.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        self.log.record(Call::Delete(id));
        let mut users = self.users.lock();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}

enum ImageMode {
    Ok,
    Failing,
    Pending,
}

/// `ImageStore` fake. Successful uploads return
/// `new-path/for-updated-image/<name>` and keep the received bytes.
pub struct FakeImageStore {
    log: CallLog,
    mode: ImageMode,
    received: Mutex<Vec<Vec<u8>>>,
}

impl FakeImageStore {
    pub fn new(log: CallLog) -> Self {
        Self::with_mode(log, ImageMode::Ok)
    }

    pub fn failing(log: CallLog) -> Self {
        Self::with_mode(log, ImageMode::Failing)
    }

    /// Never completes; used to simulate a client that disconnects mid-upload.
    pub fn pending(log: CallLog) -> Self {
        Self::with_mode(log, ImageMode::Pending)
    }

    fn with_mode(log: CallLog, mode: ImageMode) -> Self {
        Self {
            log,
            mode,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().clone()
    }
}

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn upload(
        &self,
        mut image: ImageStream,
        filename: &str,
        _content_type: Option<&str>,
    ) -> anyhow::Result<String> {
        self.log.record(Call::Upload(filename.to_owned()));
        match self.mode {
            ImageMode::Failing => anyhow::bail!("bucket unavailable"),
            ImageMode::Pending => std::future::pending().await,
            ImageMode::Ok => {
                let mut bytes = Vec::new();
                image.read_to_end(&mut bytes).await?;
                self.received.lock().push(bytes);
                Ok(format!("new-path/for-updated-image/{filename}"))
            }
        }
    }
}

pub fn makoto_shishio() -> User {
    User {
        id: Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001),
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
        id: Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0003),
        email: "user3@gmail.com".to_owned(),
        nickname: "Maldini".to_owned(),
        password: Password::new("123456"),
        image_id: None,
        country_code: "ITA".to_owned(),
        birthday: "08/01/2020".to_owned(),
    }
}

/// The usual update form for [`makoto_shishio`].
pub fn shishio_update(image: Option<ImageUpload>) -> UpdateRequest {
    UpdateRequest {
        email: "makoto@shishio.com".to_owned(),
        nickname: "Mummy".to_owned(),
        password: Some(Password::new("111111")),
        country_code: "UK".to_owned(),
        birthday: "12/22/2020".to_owned(),
        image,
    }
}

pub fn build_service(store: Arc<dyn UserStore>, images: Arc<dyn ImageStore>) -> UsersService {
    UsersService::new(store, images, &UsersConfig::default()).unwrap()
}

/// Hand-built `multipart/form-data` body.
pub struct MultipartBody {
    boundary: &'static str,
    body: Vec<u8>,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self {
            boundary: "X-USERS-TEST-BOUNDARY",
            body: Vec::new(),
        }
    }
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    #[must_use]
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Returns the `Content-Type` header value and the encoded body.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}

/// [`shishio_update`] without an image, encoded as multipart.
pub fn shishio_form() -> MultipartBody {
    MultipartBody::new()
        .text("email", "makoto@shishio.com")
        .text("nickname", "Mummy")
        .text("password", "111111")
        .text("country_code", "UK")
        .text("birthday", "12/22/2020")
}
