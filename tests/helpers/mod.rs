use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use photonotes::domain::PhotoNote;
use photonotes::infrastructure::{FileBlobStore, JsonMirror};
use photonotes::FileNoteStore;
use photonotes::application::NoteStore;
use std::path::PathBuf;
use tempfile::TempDir;
use uuid::Uuid;

/// Scratch data directory holding a mirror, its backup and pictures
#[allow(dead_code)]
pub struct TestDataDir {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestDataDir {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    pub fn mirror(&self) -> JsonMirror {
        JsonMirror::in_dir(&self.path)
    }

    pub fn blobs(&self) -> FileBlobStore {
        FileBlobStore::new(&self.path)
    }

    /// Open a fresh store instance over this directory
    pub fn open_store(&self) -> FileNoteStore {
        NoteStore::open(self.mirror(), self.blobs())
    }

    pub fn notes_file(&self) -> PathBuf {
        self.mirror().path().to_path_buf()
    }

    pub fn backup_file(&self) -> PathBuf {
        self.mirror().backup_path().to_path_buf()
    }
}

/// Note with fixed, known field values
#[allow(dead_code)]
pub fn fixed_note(caption: &str, image_path: &str) -> PhotoNote {
    PhotoNote {
        id: Uuid::new_v4(),
        caption: caption.to_string(),
        image_path: image_path.to_string(),
        date_created: Utc.with_ymd_and_hms(2025, 5, 7, 9, 30, 15).unwrap(),
    }
}

/// Field-by-field comparison; `PhotoNote` equality only looks at ids
#[allow(dead_code)]
pub fn assert_same_fields(actual: &[PhotoNote], expected: &[PhotoNote]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_eq!(a.id, e.id);
        assert_eq!(a.caption, e.caption);
        assert_eq!(a.image_path, e.image_path);
        assert_eq!(a.date_created, e.date_created);
    }
}
