// src/constants.rs
//
// Application-wide constants for file names and encoding parameters.

/// File holding the JSON mirror of the note collection.
///
/// Used in: `infrastructure/json_mirror.rs`, `infrastructure/config.rs`
pub const NOTES_FILE_NAME: &str = "photo_notes.json";

/// Single-generation copy of the mirror taken before each overwrite.
///
/// Used in: `infrastructure/json_mirror.rs`, `infrastructure/config.rs`
pub const BACKUP_FILE_NAME: &str = "photo_notes_backup.json";

/// JPEG quality (0-100) for stored pictures. Fixed, not user-tunable.
///
/// Used in: `infrastructure/blob_store.rs`
pub const JPEG_QUALITY: u8 = 70;

/// Extension appended to generated blob names.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Number of caption lines shown in a list row.
///
/// Used in: `ports/text.rs`
pub const CAPTION_PREVIEW_LINES: usize = 2;

/// Delay in milliseconds after writing the exported picture before the
/// viewer is launched, so the file is fully flushed when it opens.
///
/// Used in: `infrastructure/viewer.rs`
pub const VIEWER_LAUNCH_DELAY_MS: u64 = 200;

/// Application directory name under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "photonotes";
