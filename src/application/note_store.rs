// src/application/note_store.rs
use crate::application::BlobStore;
use crate::domain::{DomainError, PhotoNote};
use image::DynamicImage;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Durable copy of the note collection.
pub trait NoteMirror {
    /// Read the persisted collection.
    ///
    /// Never fails: absent or unreadable data yields an empty collection
    /// (after whatever recovery the implementation can offer).
    fn load(&self) -> Vec<PhotoNote>;

    /// Overwrite the persisted collection with `notes`.
    fn save(&self, notes: &[PhotoNote]) -> Result<(), DomainError>;
}

/// Owner of the in-memory note collection.
///
/// The in-memory list is authoritative for the lifetime of the store. Every
/// mutation ends with an explicit [`NoteStore::save`] that rewrites the
/// whole mirror; a failed save is logged and leaves memory ahead of disk
/// until the next successful one.
pub struct NoteStore<M: NoteMirror, B: BlobStore> {
    notes: Vec<PhotoNote>,
    mirror: M,
    blobs: B,
    synced: bool,
}

impl<M: NoteMirror, B: BlobStore> NoteStore<M, B> {
    pub fn open(mirror: M, blobs: B) -> Self {
        let notes = mirror.load();
        info!(count = notes.len(), "Loaded photo notes");
        Self {
            notes,
            mirror,
            blobs,
            synced: true,
        }
    }

    pub fn notes(&self) -> &[PhotoNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&PhotoNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    pub fn note_at(&self, position: usize) -> Result<&PhotoNote, DomainError> {
        self.notes
            .get(position)
            .ok_or(DomainError::PositionOutOfRange {
                position,
                len: self.notes.len(),
            })
    }

    /// Resolve the picture of a note; `None` means "show a placeholder".
    pub fn image(&self, note: &PhotoNote) -> Option<DynamicImage> {
        if !note.has_image() {
            return None;
        }
        self.blobs.get(&note.image_path)
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn mirror(&self) -> &M {
        &self.mirror
    }

    /// Whether the last save reached the mirror.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Rewrite the mirror from the in-memory collection.
    ///
    /// Returns `false` when the write failed; the failure is logged and the
    /// in-memory collection is kept as is.
    #[instrument(level = "debug", skip(self), fields(count = self.notes.len()))]
    pub fn save(&mut self) -> bool {
        match self.mirror.save(&self.notes) {
            Ok(()) => {
                self.synced = true;
                debug!("Saved photo notes");
                true
            }
            Err(e) => {
                self.synced = false;
                error!(error = %e, "Failed to save photo notes, changes kept in memory only");
                false
            }
        }
    }

    #[instrument(level = "debug", skip(self, note), fields(id = %note.id))]
    pub fn append(&mut self, note: PhotoNote) {
        self.notes.push(note);
        self.save();
    }

    /// Overwrite the first note sharing `note.id`.
    ///
    /// Without a match the collection and the mirror are left untouched.
    #[instrument(level = "debug", skip(self, note), fields(id = %note.id))]
    pub fn replace(&mut self, note: PhotoNote) -> Result<(), DomainError> {
        let slot = self
            .notes
            .iter_mut()
            .find(|n| n.id == note.id)
            .ok_or(DomainError::NoteNotFound(note.id))?;
        *slot = note;
        self.save();
        Ok(())
    }

    /// Remove the notes at `positions` and their image blobs.
    ///
    /// Duplicate positions count once, out-of-range ones are skipped. Blob
    /// deletion is best effort and never keeps a note from being removed.
    /// Returns the removed notes in their former order.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_at(&mut self, positions: &[usize]) -> Vec<PhotoNote> {
        let len = self.notes.len();
        let mut positions = positions.to_vec();
        positions.sort_unstable();
        positions.dedup();
        positions.retain(|&position| {
            if position < len {
                true
            } else {
                warn!(position, len, "Skipping out-of-range position");
                false
            }
        });
        if positions.is_empty() {
            return Vec::new();
        }

        for &position in &positions {
            let note = &self.notes[position];
            if note.has_image() {
                self.blobs.delete(&note.image_path);
            }
        }

        let mut removed: Vec<PhotoNote> = positions
            .iter()
            .rev()
            .map(|&position| self.notes.remove(position))
            .collect();
        removed.reverse();

        info!(removed = removed.len(), "Deleted photo notes");
        self.save();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{test_image, MockBlobStore, MockNoteMirror};

    fn store_with(
        notes: Vec<PhotoNote>,
        blobs: MockBlobStore,
    ) -> NoteStore<MockNoteMirror, MockBlobStore> {
        let mirror = MockNoteMirror::builder().with_notes(notes).build();
        NoteStore::open(mirror, blobs)
    }

    #[test]
    fn given_empty_mirror_when_opening_then_store_is_empty() {
        let store = store_with(vec![], MockBlobStore::builder().build());

        assert!(store.is_empty());
        assert!(store.is_synced());
        assert_eq!(store.mirror().save_count(), 0);
    }

    #[test]
    fn given_note_when_appending_then_added_last_and_saved() {
        let first = PhotoNote::new("First", "a.jpg");
        let mut store = store_with(vec![first.clone()], MockBlobStore::builder().build());

        let second = PhotoNote::new("Beach", "img1.jpg");
        store.append(second.clone());

        assert_eq!(store.len(), 2);
        assert_eq!(store.notes()[1].id, second.id);
        let saved = store.mirror().last_saved().expect("Append should save");
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id, first.id);
        assert_eq!(saved[1].caption, "Beach");
    }

    #[test]
    fn given_existing_note_when_replacing_then_overwritten_in_place() {
        let a = PhotoNote::new("A", "a.jpg");
        let b = PhotoNote::new("B", "b.jpg");
        let mut store = store_with(vec![a.clone(), b.clone()], MockBlobStore::builder().build());

        let mut edited = a.clone();
        edited.caption = "A edited".to_string();
        store.replace(edited).expect("Replace should succeed");

        assert_eq!(store.len(), 2);
        assert_eq!(store.notes()[0].caption, "A edited");
        assert_eq!(store.notes()[0].date_created, a.date_created);
        assert_eq!(store.notes()[1].id, b.id);
        assert_eq!(store.mirror().save_count(), 1);
    }

    #[test]
    fn given_unknown_note_when_replacing_then_returns_not_found_and_skips_save() {
        let a = PhotoNote::new("A", "a.jpg");
        let mut store = store_with(vec![a.clone()], MockBlobStore::builder().build());

        let stranger = PhotoNote::new("Stranger", "");
        let result = store.replace(stranger.clone());

        match result {
            Err(DomainError::NoteNotFound(id)) => assert_eq!(id, stranger.id),
            other => panic!("Expected NoteNotFound, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.notes()[0].caption, "A");
        assert_eq!(store.mirror().save_count(), 0);
    }

    #[test]
    fn given_two_notes_when_deleting_first_then_second_remains_and_blob_removed() {
        let a = PhotoNote::new("A", "a.jpg");
        let b = PhotoNote::new("B", "b.jpg");
        let blobs = MockBlobStore::builder()
            .with_blob("a.jpg", test_image(4, 4))
            .with_blob("b.jpg", test_image(4, 4))
            .build();
        let mut store = store_with(vec![a.clone(), b.clone()], blobs);

        let removed = store.delete_at(&[0]);

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, a.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.notes()[0].id, b.id);
        assert!(store.blobs().get("a.jpg").is_none());
        assert!(store.blobs().get("b.jpg").is_some());
        assert_eq!(store.mirror().last_saved().map(|n| n.len()), Some(1));
    }

    #[test]
    fn given_failing_blob_delete_when_deleting_then_note_still_removed() {
        let a = PhotoNote::new("A", "a.jpg");
        let blobs = MockBlobStore::builder()
            .with_blob("a.jpg", test_image(4, 4))
            .with_delete_failure()
            .build();
        let mut store = store_with(vec![a], blobs);

        let removed = store.delete_at(&[0]);

        assert_eq!(removed.len(), 1);
        assert!(store.is_empty());
        assert_eq!(store.blobs().delete_attempts(), vec!["a.jpg".to_string()]);
        assert!(store.blobs().contains("a.jpg"));
    }

    #[test]
    fn given_note_without_image_when_deleting_then_no_blob_delete_issued() {
        let a = PhotoNote::new("No picture", "");
        let mut store = store_with(vec![a], MockBlobStore::builder().build());

        store.delete_at(&[0]);

        assert!(store.is_empty());
        assert!(store.blobs().delete_attempts().is_empty());
    }

    #[test]
    fn given_unsorted_duplicate_positions_when_deleting_then_each_removed_once() {
        let notes: Vec<PhotoNote> = (0..4)
            .map(|i| PhotoNote::new(format!("N{i}"), format!("{i}.jpg")))
            .collect();
        let mut store = store_with(notes.clone(), MockBlobStore::builder().build());

        let removed = store.delete_at(&[3, 1, 3]);

        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].id, notes[1].id);
        assert_eq!(removed[1].id, notes[3].id);
        let remaining: Vec<Uuid> = store.notes().iter().map(|n| n.id).collect();
        assert_eq!(remaining, vec![notes[0].id, notes[2].id]);
        assert_eq!(store.mirror().save_count(), 1);
    }

    #[test]
    fn given_out_of_range_position_when_deleting_then_nothing_changes() {
        let a = PhotoNote::new("A", "a.jpg");
        let mut store = store_with(vec![a], MockBlobStore::builder().build());

        let removed = store.delete_at(&[5]);

        assert!(removed.is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.mirror().save_count(), 0);
    }

    #[test]
    fn given_failing_mirror_when_appending_then_note_kept_in_memory() {
        let mirror = MockNoteMirror::builder().with_save_failure().build();
        let mut store = NoteStore::open(mirror, MockBlobStore::builder().build());

        store.append(PhotoNote::new("Beach", "img1.jpg"));

        assert_eq!(store.len(), 1);
        assert!(!store.is_synced());
        assert!(store.mirror().last_saved().is_none());
    }

    #[test]
    fn given_note_with_missing_blob_when_resolving_image_then_absent() {
        let note = PhotoNote::new("Gone", "missing.jpg");
        let store = store_with(vec![note.clone()], MockBlobStore::builder().build());

        assert!(store.image(&note).is_none());
    }

    #[test]
    fn given_position_past_end_when_getting_note_then_out_of_range() {
        let store = store_with(vec![], MockBlobStore::builder().build());

        assert!(matches!(
            store.note_at(0),
            Err(DomainError::PositionOutOfRange { position: 0, len: 0 })
        ));
    }
}
