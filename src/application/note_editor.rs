// src/application/note_editor.rs
use crate::application::{BlobStore, NoteMirror, NoteStore};
use crate::domain::{DomainError, PhotoNote};
use crate::util::text::is_blank;
use image::DynamicImage;
use tracing::{debug, info, instrument, warn};

/// Picture attached to a draft.
#[derive(Debug, Clone)]
pub enum DraftImage {
    None,
    /// Blob already stored for the note being edited.
    Existing(String),
    /// Freshly picked picture, not yet in the blob store.
    Selected(DynamicImage),
}

/// Caption and picture being composed for a new or edited note.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub caption: String,
    pub image: DraftImage,
    editing: Option<PhotoNote>,
}

impl NoteDraft {
    pub fn new() -> Self {
        Self {
            caption: String::new(),
            image: DraftImage::None,
            editing: None,
        }
    }

    /// Start from an existing note, keeping its stored picture.
    pub fn for_note(note: &PhotoNote) -> Self {
        let image = if note.has_image() {
            DraftImage::Existing(note.image_path.clone())
        } else {
            DraftImage::None
        };
        Self {
            caption: note.caption.clone(),
            image,
            editing: Some(note.clone()),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_image(mut self, image: DynamicImage) -> Self {
        self.image = DraftImage::Selected(image);
        self
    }

    pub fn editing(&self) -> Option<&PhotoNote> {
        self.editing.as_ref()
    }

    pub fn can_save(&self) -> bool {
        !matches!(self.image, DraftImage::None) && !is_blank(&self.caption)
    }
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns drafts into stored notes.
pub struct NoteEditor<'a, M: NoteMirror, B: BlobStore> {
    store: &'a mut NoteStore<M, B>,
}

impl<'a, M: NoteMirror, B: BlobStore> NoteEditor<'a, M, B> {
    pub fn new(store: &'a mut NoteStore<M, B>) -> Self {
        Self { store }
    }

    /// Store the draft's picture and append or replace the note.
    ///
    /// An edited note that is no longer in the store is appended as a new
    /// note. When an edit swaps the picture, the previous blob is deleted.
    #[instrument(level = "debug", skip(self, draft))]
    pub fn save(&mut self, draft: NoteDraft) -> Result<PhotoNote, DomainError> {
        if !draft.can_save() {
            return Err(DomainError::IncompleteDraft);
        }

        let image_path = match draft.image {
            DraftImage::Selected(ref image) => {
                self.store.blobs().put(image).ok_or(DomainError::ImageNotStored)?
            }
            DraftImage::Existing(ref path) => path.clone(),
            DraftImage::None => return Err(DomainError::IncompleteDraft),
        };
        let caption = draft.caption.clone();

        let existing = draft
            .editing
            .as_ref()
            .and_then(|note| self.store.get(note.id))
            .cloned();

        match existing {
            Some(mut note) => {
                if note.has_image() && note.image_path != image_path {
                    debug!(old = %note.image_path, new = %image_path, "Replacing note image");
                    self.store.blobs().delete(&note.image_path);
                }
                note.caption = caption;
                note.image_path = image_path;
                self.store.replace(note.clone())?;
                info!(id = %note.id, "Updated photo note");
                Ok(note)
            }
            None => {
                if let Some(vanished) = draft.editing.as_ref() {
                    warn!(id = %vanished.id, "Edited note no longer exists, saving as new note");
                }
                let note = PhotoNote::new(caption, image_path);
                self.store.append(note.clone());
                info!(id = %note.id, "Added photo note");
                Ok(note)
            }
        }
    }
}
