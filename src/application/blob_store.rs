// src/application/blob_store.rs
use image::DynamicImage;

/// Storage for raw image bytes, addressed by generated filename.
///
/// None of these operations fail loudly: implementations log the problem
/// and degrade to "no path", "absent" or a no-op.
pub trait BlobStore {
    /// Encode and persist an image, returning the filename to keep in a note.
    fn put(&self, image: &DynamicImage) -> Option<String>;

    fn get(&self, path: &str) -> Option<DynamicImage>;

    fn delete(&self, path: &str);
}
