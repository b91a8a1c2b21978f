// src/application/mod.rs
pub mod blob_store;
pub mod note_editor;
pub mod note_store;
pub mod samples;

pub use blob_store::BlobStore;
pub use note_editor::{DraftImage, NoteDraft, NoteEditor};
pub use note_store::{NoteMirror, NoteStore};
