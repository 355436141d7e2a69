use std::fmt;
use std::pin::Pin;

use tokio::io::AsyncRead;
use users_sdk::Password;

/// Single-use byte stream of an uploaded image.
pub type ImageStream = Pin<Box<dyn AsyncRead + Send>>;

/// Profile image carried by an update form.
///
/// The stream is owned and can only be consumed once; handing the upload
/// to the image store moves it.
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub stream: ImageStream,
}

impl ImageUpload {
    pub fn new(
        filename: impl Into<String>,
        content_type: Option<String>,
        stream: ImageStream,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            stream,
        }
    }

    /// Wrap an in-memory buffer. Used by callers that already hold the bytes.
    pub fn from_bytes(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(filename, None, Box::pin(std::io::Cursor::new(bytes)))
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Decoded update form.
///
/// `email` is the lookup key of the user being updated; it is never
/// changed by the workflow. An empty password in the form decodes to
/// `None` and keeps the stored credential.
#[derive(Debug)]
pub struct UpdateRequest {
    pub email: String,
    pub nickname: String,
    pub password: Option<Password>,
    pub country_code: String,
    pub birthday: String,
    pub image: Option<ImageUpload>,
}
