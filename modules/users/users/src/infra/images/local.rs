use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

use crate::config::ImagesConfig;
use crate::domain::ports::ImageStore;
use crate::domain::request::ImageStream;

/// Image store on the local filesystem.
///
/// Blobs are written under `root_dir` as `<dir>/<uuid v7>-<file>`, so a
/// new upload never overwrites one a stored user may still reference.
/// Data is streamed to a `.part` file and renamed into place once
/// complete; the `.part` file never outlives the upload.
pub struct LocalImageStore {
    root: PathBuf,
    max_bytes: u64,
    allowed_extensions: Vec<String>,
}

impl LocalImageStore {
    pub fn new(cfg: &ImagesConfig) -> Self {
        Self {
            root: cfg.root_dir.clone(),
            max_bytes: cfg.max_bytes,
            allowed_extensions: cfg
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn storage_key(&self, filename: &str) -> anyhow::Result<String> {
        let path = Path::new(filename);
        if !path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            anyhow::bail!("refusing to store image outside the image root: {filename}");
        }

        let file = path
            .file_name()
            .and_then(|f| f.to_str())
            .context("image filename is empty")?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !self.allowed_extensions.contains(&extension) {
            anyhow::bail!("image type '{extension}' is not allowed");
        }

        let unique = format!("{}-{file}", Uuid::now_v7());
        Ok(match path.parent().and_then(|p| p.to_str()) {
            Some(dir) if !dir.is_empty() => format!("{dir}/{unique}"),
            _ => unique,
        })
    }
}

/// Media types accepted besides `image/*`. Clients that cannot tell the
/// type send the generic one.
const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

fn check_content_type(content_type: Option<&str>) -> anyhow::Result<()> {
    let Some(declared) = content_type else {
        return Ok(());
    };
    let essence = declared
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence.starts_with("image/") || essence == GENERIC_CONTENT_TYPE {
        Ok(())
    } else {
        anyhow::bail!("content type '{declared}' is not an image")
    }
}

/// A staged `.part` file. Removed on drop unless it was moved into place,
/// so an upload that fails or is cancelled mid-stream leaves nothing behind.
struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            committed: false,
        }
    }

    async fn commit(mut self, target: &Path) -> anyhow::Result<()> {
        tokio::fs::rename(&self.path, target)
            .await
            .with_context(|| format!("moving image into {}", target.display()))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove partial image");
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(
        &self,
        image: ImageStream,
        filename: &str,
        content_type: Option<&str>,
    ) -> anyhow::Result<String> {
        check_content_type(content_type)?;
        let key = self.storage_key(filename)?;
        let target = self.root.join(&key);

        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating image directory {}", dir.display()))?;
        }

        // Declared before the file handle so the handle is closed first.
        let partial = PartialFile::new(target.with_extension("part"));
        let mut file = tokio::fs::File::create(&partial.path)
            .await
            .with_context(|| format!("creating {}", partial.path.display()))?;

        // One byte past the limit is enough to tell an oversize image apart.
        let mut limited = image.take(self.max_bytes.saturating_add(1));
        let written = tokio::io::copy(&mut limited, &mut file)
            .await
            .context("writing image data")?;
        file.flush().await.context("flushing image data")?;
        drop(file);

        if written > self.max_bytes {
            anyhow::bail!("image exceeds the {} byte limit", self.max_bytes);
        }

        partial.commit(&target).await?;

        tracing::debug!(key = %key, bytes = written, "Stored profile image");
        Ok(key)
    }
}
