// src/infrastructure/blob_store.rs
use crate::application::BlobStore;
use crate::constants::{IMAGE_EXTENSION, JPEG_QUALITY};
use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Pictures stored as JPEG files in one flat directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a blob, or `None` when the name would leave the root.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }

    fn try_put(&self, image: &DynamicImage) -> Result<String> {
        let mut bytes = Vec::new();
        // JPEG has no alpha channel
        DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY))
            .context("Failed to encode picture as JPEG")?;

        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create {}", self.root.display()))?;

        let name = format!("{}.{}", Uuid::new_v4().to_string().to_uppercase(), IMAGE_EXTENSION);
        let path = self.root.join(&name);
        fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(name = %name, size = bytes.len(), "Stored picture");
        Ok(name)
    }
}

impl BlobStore for FileBlobStore {
    fn put(&self, image: &DynamicImage) -> Option<String> {
        match self.try_put(image) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Failed to store picture");
                None
            }
        }
    }

    fn get(&self, path: &str) -> Option<DynamicImage> {
        let full = self.resolve(path)?;
        let bytes = match fs::read(&full) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(error = %e, path = %full.display(), "Picture not readable");
                return None;
            }
        };
        match image::load_from_memory(&bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(error = %e, path = %full.display(), "Picture not decodable");
                None
            }
        }
    }

    fn delete(&self, path: &str) {
        let Some(full) = self.resolve(path) else {
            warn!(path, "Refusing to delete blob outside the picture directory");
            return;
        };
        match fs::remove_file(&full) {
            Ok(()) => debug!(path = %full.display(), "Deleted picture"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, path = %full.display(), "Failed to delete picture"),
        }
    }
}
