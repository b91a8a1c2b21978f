// src/util/testing.rs

use anyhow::Result;
use image::{DynamicImage, Rgb, RgbImage};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{BlobStore, NoteMirror};
use crate::domain::{DomainError, PhotoNote};

/// Solid-colour RGB image for tests.
pub fn test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 120, 40])))
}

/// In-memory mirror recording every successful save.
///
/// # Examples
///
/// ```
/// use photonotes::application::NoteMirror;
/// use photonotes::domain::PhotoNote;
/// use photonotes::util::testing::MockNoteMirror;
///
/// let mirror = MockNoteMirror::builder()
///     .with_notes(vec![PhotoNote::new("Beach", "img1.jpg")])
///     .build();
/// assert_eq!(mirror.load().len(), 1);
/// ```
pub struct MockNoteMirror {
    initial: Vec<PhotoNote>,
    fail_save: bool,
    saves: RefCell<Vec<Vec<PhotoNote>>>,
}

impl MockNoteMirror {
    pub fn builder() -> MockNoteMirrorBuilder {
        MockNoteMirrorBuilder::new()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.borrow().len()
    }

    /// Collection written by the most recent successful save.
    pub fn last_saved(&self) -> Option<Vec<PhotoNote>> {
        self.saves.borrow().last().cloned()
    }
}

impl NoteMirror for MockNoteMirror {
    fn load(&self) -> Vec<PhotoNote> {
        self.initial.clone()
    }

    fn save(&self, notes: &[PhotoNote]) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::Persistence("mock save failure".to_string()));
        }
        self.saves.borrow_mut().push(notes.to_vec());
        Ok(())
    }
}

pub struct MockNoteMirrorBuilder {
    initial: Vec<PhotoNote>,
    fail_save: bool,
}

impl MockNoteMirrorBuilder {
    pub fn new() -> Self {
        Self {
            initial: vec![],
            fail_save: false,
        }
    }

    /// Collection returned by load
    pub fn with_notes(mut self, notes: Vec<PhotoNote>) -> Self {
        self.initial = notes;
        self
    }

    /// Make every save fail with a persistence error
    pub fn with_save_failure(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn build(self) -> MockNoteMirror {
        MockNoteMirror {
            initial: self.initial,
            fail_save: self.fail_save,
            saves: RefCell::new(vec![]),
        }
    }
}

impl Default for MockNoteMirrorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory blob store with switchable failures.
pub struct MockBlobStore {
    blobs: RefCell<HashMap<String, DynamicImage>>,
    deletes: RefCell<Vec<String>>,
    next_id: Cell<usize>,
    fail_put: bool,
    fail_delete: bool,
}

impl MockBlobStore {
    pub fn builder() -> MockBlobStoreBuilder {
        MockBlobStoreBuilder::new()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.blobs.borrow().contains_key(path)
    }

    /// Paths passed to delete, failed attempts included.
    pub fn delete_attempts(&self) -> Vec<String> {
        self.deletes.borrow().clone()
    }
}

impl BlobStore for MockBlobStore {
    fn put(&self, image: &DynamicImage) -> Option<String> {
        if self.fail_put {
            return None;
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let path = format!("blob-{id}.jpg");
        self.blobs.borrow_mut().insert(path.clone(), image.clone());
        Some(path)
    }

    fn get(&self, path: &str) -> Option<DynamicImage> {
        self.blobs.borrow().get(path).cloned()
    }

    fn delete(&self, path: &str) {
        self.deletes.borrow_mut().push(path.to_string());
        if !self.fail_delete {
            self.blobs.borrow_mut().remove(path);
        }
    }
}

pub struct MockBlobStoreBuilder {
    blobs: HashMap<String, DynamicImage>,
    fail_put: bool,
    fail_delete: bool,
}

impl MockBlobStoreBuilder {
    pub fn new() -> Self {
        Self {
            blobs: HashMap::new(),
            fail_put: false,
            fail_delete: false,
        }
    }

    /// Add a blob that can be retrieved by get
    pub fn with_blob(mut self, path: &str, image: DynamicImage) -> Self {
        self.blobs.insert(path.to_string(), image);
        self
    }

    /// Make put report "no path"
    pub fn with_put_failure(mut self) -> Self {
        self.fail_put = true;
        self
    }

    /// Make delete a silent no-op, like a file that cannot be removed
    pub fn with_delete_failure(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn build(self) -> MockBlobStore {
        MockBlobStore {
            blobs: RefCell::new(self.blobs),
            deletes: RefCell::new(vec![]),
            next_id: Cell::new(0),
            fail_put: self.fail_put,
            fail_delete: self.fail_delete,
        }
    }
}

impl Default for MockBlobStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Image codecs are chatty at trace level
    let noisy_modules = ["image", "zune_jpeg", "png"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
