// src/infrastructure/json_mirror.rs
use crate::application::NoteMirror;
use crate::constants::{BACKUP_FILE_NAME, NOTES_FILE_NAME};
use crate::domain::{DomainError, PhotoNote};
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// Note collection mirrored to a pretty-printed JSON array, with one
/// rolling backup of the previous file.
#[derive(Debug, Clone)]
pub struct JsonMirror {
    path: PathBuf,
    backup_path: PathBuf,
}

impl JsonMirror {
    pub fn new(path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path: backup_path.into(),
        }
    }

    /// Mirror and backup with their default names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(NOTES_FILE_NAME), dir.join(BACKUP_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    fn recover_from_backup(&self) -> Vec<PhotoNote> {
        match read_notes(&self.backup_path) {
            Ok(notes) => {
                warn!(
                    count = notes.len(),
                    backup = %self.backup_path.display(),
                    "Recovered photo notes from backup"
                );
                notes
            }
            Err(e) => {
                error!(
                    error = %format!("{e:#}"),
                    "No usable backup, starting with an empty collection"
                );
                Vec::new()
            }
        }
    }
}

fn read_notes(path: &Path) -> Result<Vec<PhotoNote>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

impl NoteMirror for JsonMirror {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Vec<PhotoNote> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No saved photo notes yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read photo notes file");
                return self.recover_from_backup();
            }
        };

        match serde_json::from_str::<Vec<PhotoNote>>(&content) {
            Ok(notes) => {
                debug!(count = notes.len(), "Parsed photo notes file");
                notes
            }
            Err(e) => {
                warn!(error = %e, "Photo notes file is corrupt");
                self.recover_from_backup()
            }
        }
    }

    #[instrument(level = "debug", skip(self, notes), fields(path = %self.path.display(), count = notes.len()))]
    fn save(&self, notes: &[PhotoNote]) -> Result<(), DomainError> {
        if self.path.exists() {
            if let Err(e) = fs::copy(&self.path, &self.backup_path) {
                warn!(error = %e, backup = %self.backup_path.display(), "Failed to back up photo notes");
            }
        }

        let json = serde_json::to_string_pretty(notes)
            .map_err(|e| DomainError::Persistence(format!("Failed to serialize notes: {e}")))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::Persistence(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        fs::write(&self.path, json).map_err(|e| {
            DomainError::Persistence(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}
