//! Driven port for uploaded image files.

use async_trait::async_trait;

use crate::domain::{ImageRef, ImageUpload};

use super::define_port_error;

define_port_error! {
    /// Errors raised by image store adapters.
    pub enum ImageStoreError {
        /// The file could not be written.
        Write { message: String } => "image write failed: {message}",
        /// The file could not be removed.
        Remove { message: String } => "image removal failed: {message}",
        /// The reference does not point inside the store.
        OutsideStore { reference: String } => "image reference outside store: {reference}",
    }
}

/// Stores and removes uploaded images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `upload` under a fresh name and return its reference.
    async fn store(&self, upload: &ImageUpload) -> Result<ImageRef, ImageStoreError>;

    /// Delete the file behind `image`. Removing a file that is already gone
    /// succeeds.
    async fn remove(&self, image: &ImageRef) -> Result<(), ImageStoreError>;
}
