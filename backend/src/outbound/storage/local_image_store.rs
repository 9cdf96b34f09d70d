//! [`ImageStore`] adapter writing uploads to a local directory.
//!
//! Files are named `<uuid>.<ext>` and referenced as `<upload_dir>/<name>`,
//! where `upload_dir` is the directory exactly as configured. Removal accepts
//! only references of that shape, so a stored reference can never name a
//! file outside the directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ImageStore, ImageStoreError};
use crate::domain::{ImageRef, ImageUpload};

/// Image store rooted at one directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    prefix: String,
}

impl LocalImageStore {
    /// Store images under `upload_dir`, creating it on first write.
    pub fn new(upload_dir: impl Into<String>) -> Self {
        let configured = upload_dir.into();
        let prefix = configured.trim_end_matches('/').to_owned();
        Self {
            root: PathBuf::from(&prefix),
            prefix,
        }
    }

    fn file_name<'a>(&self, image: &'a ImageRef) -> Result<&'a str, ImageStoreError> {
        let reference = image.as_ref();
        reference
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| is_plain_file_name(name))
            .ok_or_else(|| ImageStoreError::outside_store(reference))
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, upload: &ImageUpload) -> Result<ImageRef, ImageStoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| ImageStoreError::write(err.to_string()))?;
        let name = format!("{}.{}", Uuid::new_v4(), upload.kind().extension());
        tokio::fs::write(self.root.join(&name), upload.bytes())
            .await
            .map_err(|err| ImageStoreError::write(err.to_string()))?;
        debug!(file = %name, bytes = upload.bytes().len(), "image stored");
        Ok(ImageRef::new(format!("{}/{name}", self.prefix)))
    }

    async fn remove(&self, image: &ImageRef) -> Result<(), ImageStoreError> {
        let name = self.file_name(image)?;
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ImageStoreError::remove(err.to_string())),
        }
    }
}
